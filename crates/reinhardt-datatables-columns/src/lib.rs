//! DataTables column configuration for Reinhardt
//!
//! This crate maps model fields onto the column options of the DataTables
//! client-side widget. A [`Column`] holds typed, validated values for every
//! column option the widget understands and serializes only what was set.
//!
//! # Features
//!
//! - **Typed options**: `cellType`, `type`, `orderDataType`, `orderSequence`
//!   and friends are enums, not strings
//! - **Untyped input**: [`Column::apply_option`] validates raw JSON values from
//!   settings files or requests before storing them
//! - **Type inference**: the display `type` is inferred from the field's
//!   declared storage type
//! - **Callbacks**: inline bodies or Tera-rendered templates
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[Column] --> B[ColumnSource]
//!     A --> C[FieldSchema]
//!     A --> D[Options]
//!     D --> E[CallbackSpec]
//!     C --> F[StorageType]
//!     F --> G[DisplayType]
//!     H[validator] --> A
//! ```
//!
//! # Example
//!
//! ```rust
//! use reinhardt_datatables_columns::{Column, ConfigMode, FieldSchema, StorageType};
//!
//! let column = Column::with_schema("published_at", FieldSchema::new(StorageType::DateTime)).unwrap();
//! let config = column.config(ConfigMode::Dirty);
//!
//! assert_eq!(config["title"], "Published At");
//! assert_eq!(config["type"], "date");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod callback;
pub mod column;
pub mod error;
pub mod options;
pub mod schema;
pub mod text;
pub mod validator;

// Re-exports for convenience
pub use callback::{CallbackKind, CallbackSpec, CallbackTemplates};
pub use column::{
	COLUMN_OPTIONS, Column, ColumnSource, ComputedExpression, ConfigMode, DEFAULT_COLUMN_NAME,
};
pub use error::{DataTablesError, Result};
pub use options::{CellType, DisplayType, OrderData, OrderDataType, OrderDirection};
pub use schema::{FieldSchema, SchemaSource, StaticSchema, StorageType};
