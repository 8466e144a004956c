//! The table facade tying options, columns and processing together

use crate::columns::Columns;
use crate::helper::ViewHelper;
use crate::options::TableOptions;
use crate::processor::{QueryPlan, RequestProcessor};
use crate::request::DataTablesRequest;
use once_cell::sync::Lazy;
use regex::Regex;
use reinhardt_datatables_columns::{ConfigMode, DataTablesError, Result, SchemaSource};
use serde_json::{Map, Value};
use std::sync::Arc;

static TABLE_ID: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("table id pattern is valid"));

/// CSS class applied to tables that do not set one.
pub const DEFAULT_TABLE_CLASS: &str = "display";

/// A configured table.
///
/// # Example
///
/// ```rust
/// use reinhardt_datatables_tables::{DataTable, OrderSpec};
/// use reinhardt_datatables_columns::{ConfigMode, OrderDirection};
/// use serde_json::json;
///
/// let mut table = DataTable::new("articles").unwrap();
/// table.columns_mut().add_field("title").unwrap();
/// table.columns_mut().add_field("author.name").unwrap();
/// table
///     .options_mut()
///     .set_order(vec![OrderSpec::new(1, OrderDirection::Asc)]);
///
/// let config = table.config(ConfigMode::Dirty).unwrap();
/// assert_eq!(config["order"], json!([[1, "asc"]]));
/// assert_eq!(config["columns"][1]["title"], "Name");
/// ```
#[derive(Debug, Clone)]
pub struct DataTable {
	id: String,
	class: String,
	options: TableOptions,
	columns: Columns,
	max_page_length: Option<u32>,
}

impl DataTable {
	/// Creates a table with the given HTML id.
	///
	/// # Errors
	///
	/// The id must start with a letter and contain only letters, digits,
	/// `-` and `_`.
	pub fn new(id: impl Into<String>) -> Result<Self> {
		Self::with_columns(id, Columns::new())
	}

	/// Creates a table whose field columns look their schema up in `schema`.
	pub fn with_schema(id: impl Into<String>, schema: Arc<dyn SchemaSource>) -> Result<Self> {
		Self::with_columns(id, Columns::with_schema(schema))
	}

	fn with_columns(id: impl Into<String>, columns: Columns) -> Result<Self> {
		let id = id.into();
		if !TABLE_ID.is_match(&id) {
			return Err(DataTablesError::invalid_argument(
				"id",
				format!("expected an HTML id made of letters, digits, '-' and '_', got {:?}", id),
			));
		}
		Ok(Self {
			id,
			class: DEFAULT_TABLE_CLASS.to_string(),
			options: TableOptions::new(),
			columns,
			max_page_length: None,
		})
	}

	/// HTML id.
	pub fn id(&self) -> &str {
		&self.id
	}

	/// CSS classes of the `<table>` element.
	pub fn class(&self) -> &str {
		&self.class
	}

	/// Sets the CSS classes of the `<table>` element.
	pub fn set_class(&mut self, class: impl Into<String>) -> &mut Self {
		self.class = class.into();
		self
	}

	/// Table options.
	pub fn options(&self) -> &TableOptions {
		&self.options
	}

	/// Table options, for modification.
	pub fn options_mut(&mut self) -> &mut TableOptions {
		&mut self.options
	}

	/// Columns.
	pub fn columns(&self) -> &Columns {
		&self.columns
	}

	/// Columns, for modification.
	pub fn columns_mut(&mut self) -> &mut Columns {
		&mut self.columns
	}

	/// Upper bound on rows per server-side request.
	pub fn max_page_length(&self) -> Option<u32> {
		self.max_page_length
	}

	/// Sets the upper bound on rows per server-side request.
	pub fn set_max_page_length(&mut self, max: Option<u32>) -> &mut Self {
		self.max_page_length = max;
		self
	}

	/// Complete widget configuration: table options plus `columns` and
	/// `columnDefs`.
	///
	/// # Errors
	///
	/// Fails when `order` or a column's `orderData` refers to a column
	/// index that does not exist.
	pub fn config(&self, mode: ConfigMode) -> Result<Map<String, Value>> {
		self.check_indexes()?;

		let mut config = self.options.config(mode);
		config.insert(
			"columns".to_string(),
			Value::Array(self.columns.to_config(mode)),
		);
		let defs = self.columns.column_defs(mode);
		if !defs.is_empty() {
			config.insert("columnDefs".to_string(), Value::Array(defs));
		}
		Ok(config)
	}

	fn check_indexes(&self) -> Result<()> {
		let count = self.columns.len();
		if let Some(spec) = self
			.options
			.order()
			.into_iter()
			.flatten()
			.find(|spec| spec.column as usize >= count)
		{
			return Err(DataTablesError::invalid_argument(
				"order",
				format!("column index {} is out of range for {} column(s)", spec.column, count),
			));
		}
		for column in &self.columns {
			let Some(order_data) = column.order_data() else {
				continue;
			};
			if let Some(index) = order_data
				.indexes()
				.into_iter()
				.find(|index| *index as usize >= count)
			{
				return Err(DataTablesError::invalid_argument(
					"orderData",
					format!(
						"column '{}' refers to index {} but the table has {} column(s)",
						column.name(),
						index,
						count
					),
				));
			}
		}
		Ok(())
	}

	/// Processor for server-side requests against this table.
	pub fn processor(&self) -> RequestProcessor<'_> {
		RequestProcessor::new(&self.columns).with_max_page_length(self.max_page_length)
	}

	/// Validates a server-side request and builds its plan.
	pub fn process(&self, request: &DataTablesRequest) -> Result<QueryPlan> {
		self.processor().process(request)
	}

	/// Parses and processes a URL-encoded server-side request.
	pub fn process_query(&self, query: &str) -> Result<QueryPlan> {
		self.process(&DataTablesRequest::from_query(query)?)
	}

	/// Renders the `<table>` skeleton.
	pub fn render_html(&self, helper: &ViewHelper) -> Result<String> {
		helper.render_table(self)
	}

	/// Renders the initialisation script.
	pub fn render_script(&self, helper: &ViewHelper) -> Result<String> {
		helper.render_script(self)
	}
}
