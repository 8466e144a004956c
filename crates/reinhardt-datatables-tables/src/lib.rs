//! DataTables tables for Reinhardt
//!
//! This crate assembles [`Column`](reinhardt_datatables_columns::Column)s
//! into complete widget configurations, answers the widget's server-side
//! processing requests, and renders the markup and script a page needs.
//!
//! # Features
//!
//! - **Assembly**: [`Columns`] keeps display order, a default column and
//!   optional schema metadata
//! - **Table options**: [`TableOptions`] validates paging, ordering, ajax
//!   and callback options
//! - **Server-side processing**: [`DataTablesRequest`] parses the widget's
//!   query parameters and [`RequestProcessor`] turns them into a
//!   [`QueryPlan`]
//! - **Rendering**: [`ViewHelper`] emits the table skeleton, the
//!   initialisation script and asset tags
//! - **Settings**: [`DataTablesSettings`] loads project defaults from TOML
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[DataTable] --> B[TableOptions]
//!     A --> C[Columns]
//!     C --> D[Column]
//!     E[DataTablesRequest] --> F[RequestProcessor]
//!     C --> F
//!     F --> G[QueryPlan]
//!     G --> H[DataTablesResponse]
//!     I[ViewHelper] --> A
//!     J[DataTablesSettings] --> A
//! ```
//!
//! # Example
//!
//! ```rust
//! use reinhardt_datatables_tables::{DataTable, DataTablesResponse, ViewHelper};
//! use serde_json::json;
//!
//! let mut table = DataTable::new("articles").unwrap();
//! table.options_mut().set_server_side(true);
//! table.columns_mut().add_field("title").unwrap();
//! table.columns_mut().add_field("author.name").unwrap();
//!
//! let plan = table
//!     .process_query("draw=1&start=0&length=10&search%5Bvalue%5D=rust")
//!     .unwrap();
//! assert_eq!(plan.global_search.unwrap().fields, vec!["title", "author.name"]);
//!
//! let response = DataTablesResponse::new(1, 42, 1, vec![json!(["Rust", "Ferris"])]);
//! assert_eq!(response.to_json().unwrap()["recordsFiltered"], 1);
//!
//! let html = ViewHelper::new().render(&table).unwrap();
//! assert!(html.contains("<th>Name</th>"));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod columns;
pub mod helper;
pub mod options;
pub mod processor;
pub mod request;
pub mod response;
pub mod settings;
pub mod table;

// Re-exports for convenience
pub use columns::Columns;
pub use helper::ViewHelper;
pub use options::{AjaxOptions, HttpMethod, OrderSpec, PagingType, TABLE_OPTIONS, TableOptions};
pub use processor::{ColumnFilter, GlobalSearch, Ordering, QueryPlan, RequestProcessor, SortTarget};
pub use request::{ColumnParams, DataTablesRequest, OrderParams, SearchParams};
pub use response::DataTablesResponse;
pub use settings::{AssetSettings, DataTablesSettings};
pub use table::{DEFAULT_TABLE_CLASS, DataTable};
