//! Project-level DataTables settings
//!
//! Settings are read from TOML. Option tables use the widget's spelling and
//! go through the same validation as the typed setters:
//!
//! ```toml
//! max_page_length = 100
//! script_variable = "jQuery"
//!
//! [table]
//! pageLength = 25
//! lengthMenu = [10, 25, 50, -1]
//!
//! [default_column]
//! className = "dt-body-left"
//!
//! [columns."author.name"]
//! orderable = false
//!
//! [assets]
//! css = ["/static/datatables/datatables.min.css"]
//! js = ["/static/datatables/datatables.min.js"]
//! ```

use crate::table::DataTable;
use once_cell::sync::Lazy;
use regex::Regex;
use reinhardt_datatables_columns::{DataTablesError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

static SCRIPT_VARIABLE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("script variable pattern is valid")
});

/// Stylesheets and scripts to include with a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
	/// Stylesheet URLs.
	pub css: Vec<String>,
	/// Script URLs.
	pub js: Vec<String>,
}

/// DataTables settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataTablesSettings {
	/// Raw table options applied to every table.
	pub table: Map<String, Value>,
	/// Raw options applied to the default column.
	pub default_column: Map<String, Value>,
	/// Raw options per column name.
	pub columns: BTreeMap<String, Map<String, Value>>,
	/// Upper bound on rows per server-side request.
	pub max_page_length: Option<u32>,
	/// Asset URLs.
	pub assets: AssetSettings,
	/// Global name under which the page exposes jQuery.
	pub script_variable: String,
}

impl Default for DataTablesSettings {
	fn default() -> Self {
		Self {
			table: Map::new(),
			default_column: Map::new(),
			columns: BTreeMap::new(),
			max_page_length: None,
			assets: AssetSettings::default(),
			script_variable: "jQuery".to_string(),
		}
	}
}

impl DataTablesSettings {
	/// Parses settings from a TOML string.
	pub fn from_toml_str(content: &str) -> Result<Self> {
		let settings: Self = toml::from_str(content)
			.map_err(|e| DataTablesError::Settings(format!("invalid TOML: {}", e)))?;
		settings.validate()?;
		Ok(settings)
	}

	/// Reads settings from a TOML file.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| {
			DataTablesError::Settings(format!("cannot read {}: {}", path.display(), e))
		})?;
		Self::from_toml_str(&content)
	}

	/// Checks values that are not covered by option validation.
	pub fn validate(&self) -> Result<()> {
		if !SCRIPT_VARIABLE.is_match(&self.script_variable) {
			return Err(DataTablesError::Settings(format!(
				"script_variable must be a JavaScript identifier, got {:?}",
				self.script_variable
			)));
		}
		if self.max_page_length == Some(0) {
			return Err(DataTablesError::Settings(
				"max_page_length must be positive".to_string(),
			));
		}
		Ok(())
	}

	/// Applies the settings to a table. Nothing is applied if any entry fails.
	pub fn apply_to(&self, table: &mut DataTable) -> Result<()> {
		let mut staged = table.clone();
		self.apply_staged(&mut staged).inspect_err(|err| {
			tracing::warn!(table = table.id(), error = %err, "settings could not be applied");
		})?;
		*table = staged;
		Ok(())
	}

	fn apply_staged(&self, table: &mut DataTable) -> Result<()> {
		table.options_mut().apply_options(&self.table)?;
		table
			.columns_mut()
			.default_column_mut()
			.apply_options(&self.default_column)?;
		for (name, options) in &self.columns {
			table
				.columns_mut()
				.get_mut(name)
				.ok_or_else(|| DataTablesError::UnknownColumn(name.clone()))?
				.apply_options(options)?;
		}
		if self.max_page_length.is_some() {
			table.set_max_page_length(self.max_page_length);
		}
		Ok(())
	}
}
