//! Tables module.
//!
//! This module provides table assembly, server-side processing, settings
//! and rendering.
//!
//! # Examples
//!
//! ```rust,no_run
//! use reinhardt_datatables::tables::{DataTable, ViewHelper};
//!
//! let table = DataTable::new("orders").unwrap();
//! let html = ViewHelper::new().render(&table).unwrap();
//! ```

#[cfg(feature = "tables")]
pub use reinhardt_datatables_tables::*;
