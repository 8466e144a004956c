//! Typed values for the enum-like column options understood by the widget
//!
//! Every type here serializes to the widget's verbatim spelling and parses
//! from it with [`FromStr`], failing with
//! [`DataTablesError::InvalidArgument`] for anything the widget would not
//! recognise.

use crate::error::{DataTablesError, Result};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

macro_rules! widget_enum {
	(
		$(#[$meta:meta])*
		$name:ident, field = $field:literal {
			$($(#[$vmeta:meta])* $variant:ident => $text:literal,)+
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
		pub enum $name {
			$($(#[$vmeta])* $variant,)+
		}

		impl $name {
			/// Every accepted value, in the widget's spelling.
			pub const VALUES: &'static [&'static str] = &[$($text),+];

			/// Returns the widget spelling of this value.
			pub fn as_str(&self) -> &'static str {
				match self {
					$(Self::$variant => $text,)+
				}
			}
		}

		impl FromStr for $name {
			type Err = DataTablesError;

			fn from_str(s: &str) -> Result<Self> {
				match s {
					$($text => Ok(Self::$variant),)+
					other => Err(DataTablesError::invalid_argument(
						$field,
						format!("expected one of {:?}, got {:?}", Self::VALUES, other),
					)),
				}
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(self.as_str())
			}
		}

		impl Serialize for $name {
			fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
				serializer.serialize_str(self.as_str())
			}
		}
	};
}

widget_enum! {
	/// Cell element created for the column's body cells (`cellType`).
	CellType, field = "cellType" {
		/// `<td>` cells.
		Td => "td",
		/// `<th>` cells.
		Th => "th",
	}
}

widget_enum! {
	/// Data type used by the widget for ordering and searching (`type`).
	DisplayType, field = "type" {
		/// Date / time values.
		Date => "date",
		/// Plain numbers.
		Num => "num",
		/// Formatted numbers (currency, thousands separators).
		NumFmt => "num-fmt",
		/// Numbers wrapped in HTML.
		HtmlNum => "html-num",
		/// Formatted numbers wrapped in HTML.
		HtmlNumFmt => "html-num-fmt",
		/// HTML content.
		Html => "html",
		/// Plain strings.
		String => "string",
	}
}

widget_enum! {
	/// Live DOM source used for ordering (`orderDataType`).
	OrderDataType, field = "orderDataType" {
		/// Text content of the cell.
		DomText => "dom-text",
		/// Selected value of a `<select>` in the cell.
		DomSelect => "dom-select",
		/// Checked state of a checkbox in the cell.
		DomCheckbox => "dom-checkbox",
	}
}

widget_enum! {
	/// Ordering direction (`orderSequence` entries, `order` pairs).
	OrderDirection, field = "orderSequence" {
		/// Ascending.
		Asc => "asc",
		/// Descending.
		Desc => "desc",
	}
}

/// Columns used when ordering by this column (`orderData`).
///
/// Either a single column index or a mapping of integer to integer, where
/// the key is a target position and the value a participating column index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderData {
	/// Order by a single column index.
	Index(u32),
	/// Order by several columns.
	Mapping(BTreeMap<u32, u32>),
}

impl OrderData {
	/// Builds a mapping from a list of column indexes, keyed by position.
	pub fn columns(indexes: impl IntoIterator<Item = u32>) -> Self {
		Self::Mapping(
			indexes
				.into_iter()
				.enumerate()
				.map(|(position, index)| (position as u32, index))
				.collect(),
		)
	}

	/// Returns the participating column indexes in key order.
	pub fn indexes(&self) -> Vec<u32> {
		match self {
			Self::Index(index) => vec![*index],
			Self::Mapping(mapping) => mapping.values().copied().collect(),
		}
	}

	fn is_sequential(mapping: &BTreeMap<u32, u32>) -> bool {
		mapping.keys().enumerate().all(|(i, key)| *key as usize == i)
	}
}

impl From<u32> for OrderData {
	fn from(index: u32) -> Self {
		Self::Index(index)
	}
}

impl From<BTreeMap<u32, u32>> for OrderData {
	fn from(mapping: BTreeMap<u32, u32>) -> Self {
		Self::Mapping(mapping)
	}
}

impl TryFrom<i64> for OrderData {
	type Error = DataTablesError;

	fn try_from(index: i64) -> Result<Self> {
		u32::try_from(index).map(Self::Index).map_err(|_| {
			DataTablesError::invalid_argument(
				"orderData",
				format!("expected a non-negative integer, got {}", index),
			)
		})
	}
}

impl Serialize for OrderData {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		match self {
			Self::Index(index) => serializer.serialize_u32(*index),
			// Keys 0..n form a list; sparse keys stay an object
			Self::Mapping(mapping) if Self::is_sequential(mapping) => {
				serializer.collect_seq(mapping.values())
			}
			Self::Mapping(mapping) => {
				serializer.collect_map(mapping.iter().map(|(k, v)| (k.to_string(), v)))
			}
		}
	}
}
