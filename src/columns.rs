//! Columns module.
//!
//! This module provides the typed column configuration builder.
//!
//! # Examples
//!
//! ```rust
//! use reinhardt_datatables::columns::{Column, DisplayType};
//!
//! let mut column = Column::field("price").unwrap();
//! column.set_type(DisplayType::NumFmt);
//! ```

pub use reinhardt_datatables_columns::*;
