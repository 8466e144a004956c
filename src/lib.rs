//! # Reinhardt DataTables
//!
//! DataTables integration for Reinhardt.
//!
//! Model fields are described as typed column configurations, assembled into
//! tables, and rendered as the markup and script the DataTables widget
//! expects. Server-side processing requests from the widget are parsed and
//! validated into query plans for the application's query layer.
//!
//! ## Feature Flags
//!
//! - `minimal` - Column configuration builder only
//! - `tables` - Table assembly, server-side processing, settings and rendering
//! - `full` (default) - Everything
//!
//! ## Quick Example
//!
//! ```rust
//! use reinhardt_datatables::prelude::*;
//!
//! let mut table = DataTable::new("users").unwrap();
//! table.columns_mut().add_field("username").unwrap();
//! table
//!     .columns_mut()
//!     .add_field("profile.joined_at")
//!     .unwrap()
//!     .set_type(DisplayType::Date)
//!     .set_order_sequence(vec![OrderDirection::Desc, OrderDirection::Asc]);
//!
//! let config = table.config(ConfigMode::Dirty).unwrap();
//! assert_eq!(config["columns"][1]["title"], "Joined At");
//! ```

pub mod columns;
#[cfg(feature = "tables")]
pub mod tables;

// Re-export commonly used types
pub use reinhardt_datatables_columns::{
	Column, ColumnSource, ConfigMode, DataTablesError, DisplayType, FieldSchema, Result,
	StorageType,
};

#[cfg(feature = "tables")]
pub use reinhardt_datatables_tables::{
	DataTable, DataTablesRequest, DataTablesResponse, DataTablesSettings, QueryPlan, ViewHelper,
};

/// Prelude module for convenient imports
pub mod prelude {
	pub use crate::columns::{
		CallbackSpec, CellType, Column, ColumnSource, ComputedExpression, ConfigMode,
		DataTablesError, DisplayType, FieldSchema, OrderData, OrderDataType, OrderDirection,
		SchemaSource, StaticSchema, StorageType,
	};

	#[cfg(feature = "tables")]
	pub use crate::tables::{
		AjaxOptions, Columns, DataTable, DataTablesRequest, DataTablesResponse,
		DataTablesSettings, OrderSpec, QueryPlan, TableOptions, ViewHelper,
	};
}
