//! Field schema metadata and storage-type inference
//!
//! This module maps the storage types declared by the data model onto the
//! widget's display types. The mapping is fixed; storage types outside it
//! are kept as [`StorageType::Other`] and infer nothing.
//!
//! ```text
//! Data model                     →  Widget
//! ──────────────────────────────────────────────
//! integer / boolean / decimal    →  num
//! string / text / uuid / json    →  string
//! date / datetime / timestamp    →  date
//! ```

use crate::options::DisplayType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Storage type declared for a model field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StorageType {
	/// `tinyinteger`
	TinyInteger,
	/// `smallinteger`
	SmallInteger,
	/// `integer`
	Integer,
	/// `biginteger`
	BigInteger,
	/// `boolean`
	Boolean,
	/// `binary`
	Binary,
	/// `binaryuuid`
	BinaryUuid,
	/// `json`
	Json,
	/// `string`
	String,
	/// `char`
	Char,
	/// `text`
	Text,
	/// `uuid`
	Uuid,
	/// `date`
	Date,
	/// `datetime`
	DateTime,
	/// `datetimefractional`
	DateTimeFractional,
	/// `time`
	Time,
	/// `timestamp`
	Timestamp,
	/// `timestampfractional`
	TimestampFractional,
	/// `timestamptimezone`
	TimestampTimezone,
	/// `decimal`
	Decimal,
	/// `float`
	Float,
	/// Any type without a display mapping.
	Other(String),
}

impl StorageType {
	/// Parses a storage type name, case-insensitively.
	pub fn parse(name: &str) -> Self {
		match name.to_ascii_lowercase().as_str() {
			"tinyinteger" => Self::TinyInteger,
			"smallinteger" => Self::SmallInteger,
			"integer" => Self::Integer,
			"biginteger" => Self::BigInteger,
			"boolean" => Self::Boolean,
			"binary" => Self::Binary,
			"binaryuuid" => Self::BinaryUuid,
			"json" => Self::Json,
			"string" => Self::String,
			"char" => Self::Char,
			"text" => Self::Text,
			"uuid" => Self::Uuid,
			"date" => Self::Date,
			"datetime" => Self::DateTime,
			"datetimefractional" => Self::DateTimeFractional,
			"time" => Self::Time,
			"timestamp" => Self::Timestamp,
			"timestampfractional" => Self::TimestampFractional,
			"timestamptimezone" => Self::TimestampTimezone,
			"decimal" => Self::Decimal,
			"float" => Self::Float,
			_ => Self::Other(name.to_string()),
		}
	}

	/// Returns the storage type name.
	pub fn as_str(&self) -> &str {
		match self {
			Self::TinyInteger => "tinyinteger",
			Self::SmallInteger => "smallinteger",
			Self::Integer => "integer",
			Self::BigInteger => "biginteger",
			Self::Boolean => "boolean",
			Self::Binary => "binary",
			Self::BinaryUuid => "binaryuuid",
			Self::Json => "json",
			Self::String => "string",
			Self::Char => "char",
			Self::Text => "text",
			Self::Uuid => "uuid",
			Self::Date => "date",
			Self::DateTime => "datetime",
			Self::DateTimeFractional => "datetimefractional",
			Self::Time => "time",
			Self::Timestamp => "timestamp",
			Self::TimestampFractional => "timestampfractional",
			Self::TimestampTimezone => "timestamptimezone",
			Self::Decimal => "decimal",
			Self::Float => "float",
			Self::Other(name) => name,
		}
	}

	/// Infers the widget display type for this storage type.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_datatables_columns::schema::StorageType;
	/// use reinhardt_datatables_columns::DisplayType;
	///
	/// assert_eq!(StorageType::Integer.display_type(), Some(DisplayType::Num));
	/// assert_eq!(StorageType::parse("point").display_type(), None);
	/// ```
	pub fn display_type(&self) -> Option<DisplayType> {
		match self {
			Self::TinyInteger
			| Self::SmallInteger
			| Self::Integer
			| Self::BigInteger
			| Self::Boolean => Some(DisplayType::Num),

			Self::Binary
			| Self::BinaryUuid
			| Self::Json
			| Self::String
			| Self::Char
			| Self::Text
			| Self::Uuid => Some(DisplayType::String),

			Self::Date
			| Self::DateTime
			| Self::DateTimeFractional
			| Self::Time
			| Self::Timestamp
			| Self::TimestampFractional
			| Self::TimestampTimezone => Some(DisplayType::Date),

			Self::Decimal | Self::Float => Some(DisplayType::Num),

			Self::Other(_) => None,
		}
	}
}

impl From<String> for StorageType {
	fn from(name: String) -> Self {
		Self::parse(&name)
	}
}

impl From<StorageType> for String {
	fn from(storage_type: StorageType) -> Self {
		storage_type.as_str().to_string()
	}
}

impl fmt::Display for StorageType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Metadata describing the field behind a column.
///
/// Only `type` drives behavior; the remaining keys are carried along for
/// callers that want to inspect them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
	/// Declared storage type.
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub storage_type: Option<StorageType>,
	/// Maximum length.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub length: Option<u32>,
	/// Numeric precision.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub precision: Option<u32>,
	/// Whether the field accepts NULL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub null: Option<bool>,
	/// Default value.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default: Option<Value>,
	/// Column comment.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub comment: Option<String>,
	/// Any other metadata.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}

impl FieldSchema {
	/// Creates a schema with the given storage type.
	pub fn new(storage_type: StorageType) -> Self {
		Self {
			storage_type: Some(storage_type),
			..Self::default()
		}
	}

	/// Sets the maximum length.
	pub fn with_length(mut self, length: u32) -> Self {
		self.length = Some(length);
		self
	}

	/// Sets whether the field accepts NULL.
	pub fn with_null(mut self, null: bool) -> Self {
		self.null = Some(null);
		self
	}

	/// Adds an arbitrary metadata entry.
	pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
		self.extra.insert(key.into(), value);
		self
	}

	/// Display type inferred from the storage type, if any.
	pub fn display_type(&self) -> Option<DisplayType> {
		self.storage_type.as_ref().and_then(StorageType::display_type)
	}
}

/// Supplies field schemas for columns, typically from model metadata.
pub trait SchemaSource: Send + Sync {
	/// Returns the schema of `field`, reached through `association_path`
	/// (empty for fields of the primary model).
	fn field_schema(&self, association_path: &str, field: &str) -> Option<FieldSchema>;
}

/// In-memory [`SchemaSource`] keyed by `field` or `path.field`.
#[derive(Debug, Clone, Default)]
pub struct StaticSchema {
	fields: HashMap<String, FieldSchema>,
}

impl StaticSchema {
	/// Creates an empty schema.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a field schema under a (possibly dotted) name.
	pub fn with_field(mut self, name: impl Into<String>, schema: FieldSchema) -> Self {
		self.fields.insert(name.into(), schema);
		self
	}

	/// Builds a schema from a JSON object mapping names to field schemas.
	pub fn from_json(value: Value) -> crate::Result<Self> {
		let fields = serde_json::from_value(value)?;
		Ok(Self { fields })
	}

	/// Number of fields described.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Returns `true` if no field is described.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

impl SchemaSource for StaticSchema {
	fn field_schema(&self, association_path: &str, field: &str) -> Option<FieldSchema> {
		let key = if association_path.is_empty() {
			field.to_string()
		} else {
			format!("{}.{}", association_path, field)
		};
		self.fields.get(&key).cloned()
	}
}
