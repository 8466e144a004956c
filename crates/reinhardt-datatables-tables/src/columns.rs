//! Ordered column collection for a table
//!
//! [`Columns`] keeps the configured columns in display order together with
//! the table-wide default column, and assembles them into the widget's
//! `columns` and `columnDefs` arrays.

use reinhardt_datatables_columns::{
	Column, ColumnSource, ComputedExpression, ConfigMode, DataTablesError, Result, SchemaSource,
};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Columns of a table plus the default column.
///
/// # Example
///
/// ```rust
/// use reinhardt_datatables_tables::Columns;
/// use reinhardt_datatables_columns::ConfigMode;
///
/// let mut columns = Columns::new();
/// columns.add_field("title").unwrap().set_orderable(true);
/// columns.add_unbound("actions").unwrap().set_searchable(false);
///
/// assert_eq!(columns.len(), 2);
/// assert_eq!(columns.position("actions"), Some(1));
/// assert_eq!(columns.to_config(ConfigMode::Dirty).len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct Columns {
	columns: Vec<Column>,
	default: Option<Column>,
	schema: Option<Arc<dyn SchemaSource>>,
}

impl Columns {
	/// Creates an empty collection.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty collection that looks field schemas up in `schema`.
	pub fn with_schema(schema: Arc<dyn SchemaSource>) -> Self {
		Self {
			schema: Some(schema),
			..Self::default()
		}
	}

	/// Appends a column.
	///
	/// # Errors
	///
	/// Fails with [`DataTablesError::DuplicateColumn`] if the name is taken.
	pub fn add(&mut self, column: Column) -> Result<&mut Column> {
		if self.position(column.name()).is_some() {
			return Err(DataTablesError::DuplicateColumn(column.name().to_string()));
		}
		self.columns.push(column);
		let index = self.columns.len() - 1;
		Ok(&mut self.columns[index])
	}

	/// Appends a database-backed column, using the schema source if any.
	pub fn add_field(&mut self, name: &str) -> Result<&mut Column> {
		let source = ColumnSource::from_dotted(name);
		let schema = match (&self.schema, &source) {
			(Some(schemas), ColumnSource::Field { field }) => schemas.field_schema("", field),
			(Some(schemas), ColumnSource::Association { path, field }) => {
				schemas.field_schema(path, field)
			}
			_ => None,
		};
		if self.schema.is_some() && schema.is_none() {
			tracing::debug!(column = name, "no schema found for column");
		}
		self.add(Column::new(name, source, schema)?)
	}

	/// Appends a column with no data source.
	pub fn add_unbound(&mut self, name: &str) -> Result<&mut Column> {
		self.add(Column::unbound(name)?)
	}

	/// Appends a computed column.
	pub fn add_computed(&mut self, name: &str, expression: ComputedExpression) -> Result<&mut Column> {
		self.add(Column::computed(name, expression)?)
	}

	/// Looks a column up by name.
	pub fn get(&self, name: &str) -> Option<&Column> {
		self.columns.iter().find(|c| c.name() == name)
	}

	/// Looks a column up by name for modification.
	pub fn get_mut(&mut self, name: &str) -> Option<&mut Column> {
		self.columns.iter_mut().find(|c| c.name() == name)
	}

	/// Column at a display position.
	pub fn at(&self, index: usize) -> Option<&Column> {
		self.columns.get(index)
	}

	/// Display position of a column.
	pub fn position(&self, name: &str) -> Option<usize> {
		self.columns.iter().position(|c| c.name() == name)
	}

	/// Removes a column.
	pub fn remove(&mut self, name: &str) -> Result<Column> {
		let index = self
			.position(name)
			.ok_or_else(|| DataTablesError::UnknownColumn(name.to_string()))?;
		Ok(self.columns.remove(index))
	}

	/// Iterates over the columns in display order.
	pub fn iter(&self) -> std::slice::Iter<'_, Column> {
		self.columns.iter()
	}

	/// Number of columns, not counting the default column.
	pub fn len(&self) -> usize {
		self.columns.len()
	}

	/// Returns `true` if no column is configured.
	pub fn is_empty(&self) -> bool {
		self.columns.is_empty()
	}

	/// The table-wide default column.
	pub fn default_column(&self) -> &Column {
		static FALLBACK: once_cell::sync::Lazy<Column> =
			once_cell::sync::Lazy::new(Column::default_column);
		self.default.as_ref().unwrap_or(&FALLBACK)
	}

	/// The table-wide default column, for modification.
	pub fn default_column_mut(&mut self) -> &mut Column {
		self.default.get_or_insert_with(Column::default_column)
	}

	/// Effective `orderable` flag of a column, falling back to the default
	/// column and then to the widget default (`true`).
	pub fn is_orderable(&self, column: &Column) -> bool {
		column
			.orderable()
			.or_else(|| self.default_column().orderable())
			.unwrap_or(true)
	}

	/// Effective `searchable` flag of a column, with the same fallbacks as
	/// [`Columns::is_orderable`].
	pub fn is_searchable(&self, column: &Column) -> bool {
		column
			.searchable()
			.or_else(|| self.default_column().searchable())
			.unwrap_or(true)
	}

	/// The widget's `columns` array.
	pub fn to_config(&self, mode: ConfigMode) -> Vec<Value> {
		self.columns
			.iter()
			.map(|c| Value::Object(c.config(mode)))
			.collect()
	}

	/// The widget's `columnDefs` array.
	///
	/// In dirty mode the default column is only emitted when something
	/// besides `targets` is set.
	pub fn column_defs(&self, mode: ConfigMode) -> Vec<Value> {
		let config = self.default_column().default_column_config(mode);
		if mode == ConfigMode::Dirty && config.len() <= 1 {
			return Vec::new();
		}
		vec![Value::Object(config)]
	}
}

impl fmt::Debug for Columns {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Columns")
			.field("columns", &self.columns)
			.field("default", &self.default)
			.field("schema", &self.schema.is_some())
			.finish()
	}
}

impl<'a> IntoIterator for &'a Columns {
	type Item = &'a Column;
	type IntoIter = std::slice::Iter<'a, Column>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
