//! Column configuration builder
//!
//! A [`Column`] describes one column of a client-side table: where its value
//! comes from, which widget options are set for it, and how it serializes
//! into the widget's `columns` array.
//!
//! # Example
//!
//! ```rust
//! use reinhardt_datatables_columns::{Column, ConfigMode, DisplayType, OrderDirection};
//! use serde_json::json;
//!
//! let mut column = Column::field("author.first_name").unwrap();
//! column
//!     .set_type(DisplayType::Html)
//!     .set_orderable(true)
//!     .set_order_sequence(vec![OrderDirection::Desc, OrderDirection::Asc]);
//!
//! assert_eq!(column.title(), "First Name");
//! assert_eq!(column.association_path(), "author");
//! assert_eq!(
//!     serde_json::Value::Object(column.config(ConfigMode::Dirty)),
//!     json!({
//!         "name": "author.first_name",
//!         "title": "First Name",
//!         "type": "html",
//!         "orderable": true,
//!         "orderSequence": ["desc", "asc"],
//!     })
//! );
//! ```

use crate::callback::CallbackSpec;
use crate::error::{DataTablesError, Result};
use crate::options::{CellType, DisplayType, OrderData, OrderDataType, OrderDirection};
use crate::schema::FieldSchema;
use crate::text::{humanize, last_segment};
use crate::validator;
use serde_json::{Map, Value, json};

/// Option names understood by the widget for a column, in its spelling.
pub const COLUMN_OPTIONS: &[&str] = &[
	"cellType",
	"className",
	"contentPadding",
	"createdCell",
	"orderData",
	"orderDataType",
	"orderSequence",
	"orderable",
	"searchable",
	"title",
	"type",
	"visible",
	"width",
];

/// Name used for the table-wide default column.
pub const DEFAULT_COLUMN_NAME: &str = "_all";

/// An SQL expression computing a column's value.
///
/// The builder never looks inside it; it is handed back to the query layer
/// when the column is ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedExpression {
	sql: String,
}

impl ComputedExpression {
	/// Wraps an SQL expression, e.g. `CONCAT(first_name, ' ', last_name)`.
	pub fn new(sql: impl Into<String>) -> Self {
		Self { sql: sql.into() }
	}

	/// Returns the SQL expression.
	pub fn sql(&self) -> &str {
		&self.sql
	}
}

/// Where a column's value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSource {
	/// A field of the primary model.
	Field {
		/// Field name.
		field: String,
	},
	/// A field reached through one or more associations.
	Association {
		/// Dotted association path, e.g. `author.profile`.
		path: String,
		/// Field name on the associated model.
		field: String,
	},
	/// A computed expression.
	Computed(ComputedExpression),
	/// No data source; the content is produced client-side.
	Unbound,
}

impl ColumnSource {
	/// Derives the source of a database field from a dotted column name.
	pub fn from_dotted(name: &str) -> Self {
		match name.rsplit_once('.') {
			Some((path, field)) => Self::Association {
				path: path.to_string(),
				field: field.to_string(),
			},
			None => Self::Field {
				field: name.to_string(),
			},
		}
	}

	/// Returns `true` for sources backed by a persisted field.
	pub fn is_database_backed(&self) -> bool {
		matches!(self, Self::Field { .. } | Self::Association { .. })
	}
}

/// How much of a column to serialize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigMode {
	/// Only options that have been set.
	#[default]
	Dirty,
	/// Every option, unset ones as `null`.
	Full,
}

#[derive(Debug, Clone, PartialEq)]
struct ColumnOptions {
	cell_type: Option<CellType>,
	class_name: Option<String>,
	content_padding: Option<String>,
	created_cell: Option<CallbackSpec>,
	order_data: Option<OrderData>,
	order_data_type: Option<OrderDataType>,
	order_sequence: Option<Vec<OrderDirection>>,
	orderable: Option<bool>,
	searchable: Option<bool>,
	title: String,
	display_type: Option<DisplayType>,
	visible: Option<bool>,
	width: Option<String>,
}

impl ColumnOptions {
	fn titled(title: String) -> Self {
		Self {
			cell_type: None,
			class_name: None,
			content_padding: None,
			created_cell: None,
			order_data: None,
			order_data_type: None,
			order_sequence: None,
			orderable: None,
			searchable: None,
			title,
			display_type: None,
			visible: None,
			width: None,
		}
	}
}

/// Configuration of a single table column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
	name: String,
	source: ColumnSource,
	schema: Option<FieldSchema>,
	options: ColumnOptions,
}

impl Column {
	/// Creates a column.
	///
	/// The title is derived from the last dotted segment of `name`. For
	/// database-backed sources, a schema whose storage type has a display
	/// mapping pre-populates `type`.
	///
	/// # Errors
	///
	/// Fails with [`DataTablesError::InvalidArgument`] if `name` is empty or
	/// contains an empty dotted segment.
	pub fn new(
		name: impl Into<String>,
		source: ColumnSource,
		schema: Option<FieldSchema>,
	) -> Result<Self> {
		let name = name.into();
		validate_name(&name)?;

		let title = humanize(last_segment(&name));
		let mut column = Self {
			name,
			source,
			schema,
			options: ColumnOptions::titled(title),
		};
		column.infer_display_type();
		Ok(column)
	}

	/// Creates a database-backed column; dotted names refer to associated fields.
	pub fn field(name: impl Into<String>) -> Result<Self> {
		let name = name.into();
		let source = ColumnSource::from_dotted(&name);
		Self::new(name, source, None)
	}

	/// Creates a database-backed column with schema metadata.
	pub fn with_schema(name: impl Into<String>, schema: FieldSchema) -> Result<Self> {
		let name = name.into();
		let source = ColumnSource::from_dotted(&name);
		Self::new(name, source, Some(schema))
	}

	/// Creates a column with no data source.
	pub fn unbound(name: impl Into<String>) -> Result<Self> {
		Self::new(name, ColumnSource::Unbound, None)
	}

	/// Creates a column computed by an SQL expression.
	pub fn computed(name: impl Into<String>, expression: ComputedExpression) -> Result<Self> {
		Self::new(name, ColumnSource::Computed(expression), None)
	}

	/// Creates the table-wide default column.
	pub fn default_column() -> Self {
		Self {
			name: DEFAULT_COLUMN_NAME.to_string(),
			source: ColumnSource::Unbound,
			schema: None,
			options: ColumnOptions::titled(String::new()),
		}
	}

	fn infer_display_type(&mut self) {
		if !self.source.is_database_backed() {
			return;
		}
		let Some(schema) = &self.schema else {
			return;
		};
		match schema.display_type() {
			Some(display_type) => {
				tracing::debug!(
					column = %self.name,
					storage_type = ?schema.storage_type,
					display_type = %display_type,
					"inferred column display type"
				);
				self.options.display_type = Some(display_type);
			}
			None => {
				tracing::debug!(
					column = %self.name,
					storage_type = ?schema.storage_type,
					"no display type for storage type"
				);
			}
		}
	}

	// ----------------------------------------------------------------------
	// Derived fields
	// ----------------------------------------------------------------------

	/// Column name, possibly dotted.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Value source.
	pub fn source(&self) -> &ColumnSource {
		&self.source
	}

	/// Whether the column corresponds to a persisted field.
	pub fn is_database_backed(&self) -> bool {
		self.source.is_database_backed()
	}

	/// Association path, or an empty string when the column has none.
	pub fn association_path(&self) -> &str {
		match &self.source {
			ColumnSource::Association { path, .. } => path,
			_ => "",
		}
	}

	/// Field name for database-backed columns.
	pub fn field_name(&self) -> Option<&str> {
		match &self.source {
			ColumnSource::Field { field } | ColumnSource::Association { field, .. } => Some(field),
			_ => None,
		}
	}

	/// Computed expression, when the column has one.
	pub fn computed_expression(&self) -> Option<&ComputedExpression> {
		match &self.source {
			ColumnSource::Computed(expression) => Some(expression),
			_ => None,
		}
	}

	/// Schema metadata supplied at construction.
	pub fn schema(&self) -> Option<&FieldSchema> {
		self.schema.as_ref()
	}

	// ----------------------------------------------------------------------
	// Option getters
	// ----------------------------------------------------------------------

	/// `cellType`
	pub fn cell_type(&self) -> Option<CellType> {
		self.options.cell_type
	}

	/// `className`
	pub fn class_name(&self) -> Option<&str> {
		self.options.class_name.as_deref()
	}

	/// `contentPadding`
	pub fn content_padding(&self) -> Option<&str> {
		self.options.content_padding.as_deref()
	}

	/// `createdCell`
	pub fn created_cell(&self) -> Option<&CallbackSpec> {
		self.options.created_cell.as_ref()
	}

	/// `orderData`
	pub fn order_data(&self) -> Option<&OrderData> {
		self.options.order_data.as_ref()
	}

	/// `orderDataType`
	pub fn order_data_type(&self) -> Option<OrderDataType> {
		self.options.order_data_type
	}

	/// `orderSequence`
	pub fn order_sequence(&self) -> Option<&[OrderDirection]> {
		self.options.order_sequence.as_deref()
	}

	/// `orderable`
	pub fn orderable(&self) -> Option<bool> {
		self.options.orderable
	}

	/// `searchable`
	pub fn searchable(&self) -> Option<bool> {
		self.options.searchable
	}

	/// `title`
	pub fn title(&self) -> &str {
		&self.options.title
	}

	/// `type`
	pub fn display_type(&self) -> Option<DisplayType> {
		self.options.display_type
	}

	/// `visible`
	pub fn visible(&self) -> Option<bool> {
		self.options.visible
	}

	/// `width`
	pub fn width(&self) -> Option<&str> {
		self.options.width.as_deref()
	}

	// ----------------------------------------------------------------------
	// Option setters
	// ----------------------------------------------------------------------

	/// Sets `cellType`.
	pub fn set_cell_type(&mut self, cell_type: impl Into<Option<CellType>>) -> &mut Self {
		self.options.cell_type = cell_type.into();
		self
	}

	/// Sets `className`.
	pub fn set_class_name(&mut self, class_name: Option<&str>) -> &mut Self {
		self.options.class_name = class_name.map(str::to_string);
		self
	}

	/// Sets `contentPadding`.
	pub fn set_content_padding(&mut self, padding: Option<&str>) -> &mut Self {
		self.options.content_padding = padding.map(str::to_string);
		self
	}

	/// Sets `createdCell` after a structural check of the callback.
	pub fn callback_created_cell(
		&mut self,
		callback: impl Into<Option<CallbackSpec>>,
	) -> Result<&mut Self> {
		let callback = callback.into();
		if let Some(spec) = &callback {
			validator::validate_callback("createdCell", spec)?;
		}
		self.options.created_cell = callback;
		Ok(self)
	}

	/// Sets `orderData`.
	pub fn set_order_data(&mut self, order_data: impl Into<Option<OrderData>>) -> &mut Self {
		self.options.order_data = order_data.into();
		self
	}

	/// Sets `orderDataType`.
	pub fn set_order_data_type(
		&mut self,
		order_data_type: impl Into<Option<OrderDataType>>,
	) -> &mut Self {
		self.options.order_data_type = order_data_type.into();
		self
	}

	/// Sets `orderSequence`.
	pub fn set_order_sequence(
		&mut self,
		sequence: impl Into<Option<Vec<OrderDirection>>>,
	) -> &mut Self {
		self.options.order_sequence = sequence.into();
		self
	}

	/// Sets `orderable`.
	pub fn set_orderable(&mut self, orderable: impl Into<Option<bool>>) -> &mut Self {
		self.options.orderable = orderable.into();
		self
	}

	/// Sets `searchable`.
	pub fn set_searchable(&mut self, searchable: impl Into<Option<bool>>) -> &mut Self {
		self.options.searchable = searchable.into();
		self
	}

	/// Sets `title`. The title cannot be unset.
	pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
		self.options.title = title.into();
		self
	}

	/// Sets `type`.
	pub fn set_type(&mut self, display_type: impl Into<Option<DisplayType>>) -> &mut Self {
		self.options.display_type = display_type.into();
		self
	}

	/// Sets `visible`.
	pub fn set_visible(&mut self, visible: impl Into<Option<bool>>) -> &mut Self {
		self.options.visible = visible.into();
		self
	}

	/// Sets `width`.
	pub fn set_width(&mut self, width: Option<&str>) -> &mut Self {
		self.options.width = width.map(str::to_string);
		self
	}

	// ----------------------------------------------------------------------
	// Untyped input
	// ----------------------------------------------------------------------

	/// Validates an untyped option value and routes it to its setter.
	///
	/// `key` uses the widget's spelling (`orderDataType`, `cellType`, ...).
	/// `null` clears the option, except for `title`, which must be a string.
	/// On error the column is unchanged.
	///
	/// ```
	/// use reinhardt_datatables_columns::Column;
	/// use serde_json::json;
	///
	/// let mut column = Column::field("id").unwrap();
	/// assert!(column.apply_option("type", &json!("bogus")).is_err());
	/// assert!(column.apply_option("orderData", &json!(-1)).is_err());
	/// column.apply_option("orderData", &json!({"0": 1, "1": 2})).unwrap();
	/// ```
	pub fn apply_option(&mut self, key: &str, value: &Value) -> Result<&mut Self> {
		match key {
			"cellType" => {
				let cell_type = validator::parse_optional::<CellType>(key, value)?;
				self.set_cell_type(cell_type);
			}
			"className" => {
				let class_name = validator::validate_optional_string(key, value)?;
				self.set_class_name(class_name.as_deref());
			}
			"contentPadding" => {
				let padding = validator::validate_optional_string(key, value)?;
				self.set_content_padding(padding.as_deref());
			}
			"createdCell" => {
				let callback = CallbackSpec::from_value(key, value)?;
				self.callback_created_cell(callback)?;
			}
			"orderData" => {
				let order_data = validator::validate_order_data(key, value)?;
				self.set_order_data(order_data);
			}
			"orderDataType" => {
				let order_data_type = validator::parse_optional::<OrderDataType>(key, value)?;
				self.set_order_data_type(order_data_type);
			}
			"orderSequence" => {
				let sequence = validator::validate_sequence(key, value, OrderDirection::VALUES)?
					.map(|items| {
						items
							.iter()
							.map(|item| item.parse::<OrderDirection>())
							.collect::<Result<Vec<_>>>()
					})
					.transpose()?;
				self.set_order_sequence(sequence);
			}
			"orderable" => {
				let orderable = validator::validate_optional_bool(key, value)?;
				self.set_orderable(orderable);
			}
			"searchable" => {
				let searchable = validator::validate_optional_bool(key, value)?;
				self.set_searchable(searchable);
			}
			"title" => {
				let title = validator::validate_required_string(key, value)?;
				self.set_title(title);
			}
			"type" => {
				let display_type = validator::parse_optional::<DisplayType>(key, value)?;
				self.set_type(display_type);
			}
			"visible" => {
				let visible = validator::validate_optional_bool(key, value)?;
				self.set_visible(visible);
			}
			"width" => {
				let width = validator::validate_optional_string(key, value)?;
				self.set_width(width.as_deref());
			}
			other => {
				return Err(DataTablesError::invalid_argument(
					other,
					format!("unknown column option; expected one of {:?}", COLUMN_OPTIONS),
				));
			}
		}
		Ok(self)
	}

	/// Applies several untyped options; either all of them apply or none do.
	pub fn apply_options(&mut self, options: &Map<String, Value>) -> Result<&mut Self> {
		let original = self.options.clone();
		for (key, value) in options {
			if let Err(err) = self.apply_option(key, value) {
				self.options = original;
				return Err(err);
			}
		}
		Ok(self)
	}

	// ----------------------------------------------------------------------
	// Serialization
	// ----------------------------------------------------------------------

	/// Serializes the column for the widget's `columns` array.
	///
	/// `name` is always present; `title` is always populated.
	pub fn config(&self, mode: ConfigMode) -> Map<String, Value> {
		let mut config = Map::new();
		config.insert("name".to_string(), json!(self.name));
		self.write_options(&mut config, mode, true);
		config
	}

	/// Serializes the column as the table-wide default (`targets: "_all"`),
	/// without `name` or `title`.
	pub fn default_column_config(&self, mode: ConfigMode) -> Map<String, Value> {
		let mut config = Map::new();
		self.write_options(&mut config, mode, false);
		config.insert("targets".to_string(), json!(DEFAULT_COLUMN_NAME));
		config
	}

	fn write_options(&self, config: &mut Map<String, Value>, mode: ConfigMode, with_title: bool) {
		let options = &self.options;
		let mut put = |key: &str, value: Option<Value>| match value {
			Some(value) => {
				config.insert(key.to_string(), value);
			}
			None if mode == ConfigMode::Full => {
				config.insert(key.to_string(), Value::Null);
			}
			None => {}
		};

		put("cellType", options.cell_type.map(|v| json!(v)));
		put("className", options.class_name.as_ref().map(|v| json!(v)));
		put("contentPadding", options.content_padding.as_ref().map(|v| json!(v)));
		put("createdCell", options.created_cell.as_ref().map(|v| json!(v)));
		put("orderData", options.order_data.as_ref().map(|v| json!(v)));
		put("orderDataType", options.order_data_type.map(|v| json!(v)));
		put("orderSequence", options.order_sequence.as_ref().map(|v| json!(v)));
		put("orderable", options.orderable.map(Value::Bool));
		put("searchable", options.searchable.map(Value::Bool));
		if with_title {
			put("title", Some(json!(options.title)));
		}
		put("type", options.display_type.map(|v| json!(v)));
		put("visible", options.visible.map(Value::Bool));
		put("width", options.width.as_ref().map(|v| json!(v)));
	}
}

fn validate_name(name: &str) -> Result<()> {
	if name.is_empty() {
		return Err(DataTablesError::invalid_argument(
			"name",
			"expected a non-empty column name",
		));
	}
	if name.split('.').any(str::is_empty) {
		return Err(DataTablesError::invalid_argument(
			"name",
			format!("expected dotted segments to be non-empty, got {:?}", name),
		));
	}
	Ok(())
}
