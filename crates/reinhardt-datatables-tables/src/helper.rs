//! HTML and JavaScript rendering for tables
//!
//! [`ViewHelper`] renders a [`DataTable`] into markup through the Tera
//! templates embedded in this crate:
//!
//! - `table.tpl`: the `<table>` skeleton with one `<th>` per column
//! - `script.tpl`: the widget initialisation script
//! - `assets.tpl`: `<link>` and `<script>` tags for configured assets
//!
//! Callback options are emitted as JavaScript functions rather than strings.

use crate::settings::DataTablesSettings;
use crate::table::DataTable;
use once_cell::sync::Lazy;
use reinhardt_datatables_columns::{
	CallbackKind, CallbackSpec, CallbackTemplates, ConfigMode, Result,
};
use serde_json::{Map, Value};
use tera::{Context, Tera};

static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
	let mut tera = Tera::default();

	tera.add_raw_template("table.tpl", include_str!("../templates/table.tpl"))
		.expect("Failed to add table.tpl template");
	tera.add_raw_template("script.tpl", include_str!("../templates/script.tpl"))
		.expect("Failed to add script.tpl template");
	tera.add_raw_template("assets.tpl", include_str!("../templates/assets.tpl"))
		.expect("Failed to add assets.tpl template");

	tera
});

const TABLE_CALLBACKS: [CallbackKind; 4] = [
	CallbackKind::CreatedRow,
	CallbackKind::DrawCallback,
	CallbackKind::InitComplete,
	CallbackKind::RowCallback,
];

/// Renders tables with a set of callback templates and settings.
///
/// # Example
///
/// ```rust
/// use reinhardt_datatables_tables::{DataTable, ViewHelper};
///
/// let mut table = DataTable::new("users").unwrap();
/// table.columns_mut().add_field("email").unwrap();
///
/// let helper = ViewHelper::new();
/// let html = helper.render_table(&table).unwrap();
/// assert!(html.contains("<th>Email</th>"));
///
/// let script = helper.render_script(&table).unwrap();
/// assert!(script.contains("jQuery(function ($) {"));
/// ```
#[derive(Debug)]
pub struct ViewHelper {
	callbacks: CallbackTemplates,
	settings: DataTablesSettings,
}

impl Default for ViewHelper {
	fn default() -> Self {
		Self::new()
	}
}

impl ViewHelper {
	/// Creates a helper with the bundled callback templates and default settings.
	pub fn new() -> Self {
		Self {
			callbacks: CallbackTemplates::with_builtins(),
			settings: DataTablesSettings::default(),
		}
	}

	/// Replaces the settings after validating them.
	pub fn with_settings(mut self, settings: DataTablesSettings) -> Result<Self> {
		settings.validate()?;
		self.settings = settings;
		Ok(self)
	}

	/// Settings in use.
	pub fn settings(&self) -> &DataTablesSettings {
		&self.settings
	}

	/// Callback templates, e.g. to register project templates.
	pub fn callbacks_mut(&mut self) -> &mut CallbackTemplates {
		&mut self.callbacks
	}

	/// Renders the `<table>` skeleton. Titles and classes are HTML-escaped.
	pub fn render_table(&self, table: &DataTable) -> Result<String> {
		let titles: Vec<&str> = table.columns().iter().map(|c| c.title()).collect();
		let mut context = Context::new();
		context.insert("id", table.id());
		context.insert("class", table.class());
		context.insert("titles", &titles);
		Ok(TEMPLATES.render("table.tpl", &context)?)
	}

	/// Renders the `<script>` element initialising the widget.
	pub fn render_script(&self, table: &DataTable) -> Result<String> {
		let mut context = Context::new();
		context.insert("variable", &self.settings.script_variable);
		context.insert("id", table.id());
		context.insert("config", &self.to_javascript(table)?);
		Ok(TEMPLATES.render("script.tpl", &context)?)
	}

	/// Renders `<link>` and `<script>` tags for the configured assets.
	pub fn render_assets(&self) -> Result<String> {
		let mut context = Context::new();
		context.insert("css", &self.settings.assets.css);
		context.insert("js", &self.settings.assets.js);
		Ok(TEMPLATES.render("assets.tpl", &context)?)
	}

	/// Renders the table skeleton followed by its script.
	pub fn render(&self, table: &DataTable) -> Result<String> {
		Ok(format!(
			"{}\n{}",
			self.render_table(table)?,
			self.render_script(table)?
		))
	}

	/// Serializes the table configuration as a JavaScript object literal.
	///
	/// The output is JSON except for callback options, which become function
	/// expressions. `</` is written as `<\/` in string values and in rendered
	/// functions so the literal can sit inside a `<script>` element.
	pub fn to_javascript(&self, table: &DataTable) -> Result<String> {
		let mut config = table.config(ConfigMode::Dirty)?;
		let mut slots = CallbackSlots::new(&serde_json::to_string(&config)?);

		for kind in TABLE_CALLBACKS {
			self.extract_callback(&mut config, kind, &mut slots)?;
		}
		for key in ["columns", "columnDefs"] {
			if let Some(Value::Array(entries)) = config.get_mut(key) {
				for entry in entries.iter_mut().filter_map(Value::as_object_mut) {
					self.extract_callback(entry, CallbackKind::CreatedCell, &mut slots)?;
				}
			}
		}

		let mut script = serde_json::to_string_pretty(&config)?.replace("</", "<\\/");
		for (placeholder, function) in slots.functions {
			script = script.replace(&format!("\"{}\"", placeholder), &function);
		}
		Ok(script)
	}

	fn extract_callback(
		&self,
		options: &mut Map<String, Value>,
		kind: CallbackKind,
		slots: &mut CallbackSlots,
	) -> Result<()> {
		let Some(value) = options.get_mut(kind.option_name()) else {
			return Ok(());
		};
		let Some(spec) = CallbackSpec::from_value(kind.option_name(), value)? else {
			return Ok(());
		};
		let function = self.callbacks.render(kind, &spec)?.replace("</", "<\\/");
		*value = Value::String(slots.push(function));
		Ok(())
	}
}

/// Rendered callbacks keyed by the placeholder strings standing in for them.
///
/// The placeholder prefix never occurs in the serialized configuration, so
/// only substituted slots are replaced.
struct CallbackSlots {
	prefix: String,
	functions: Vec<(String, String)>,
}

impl CallbackSlots {
	fn new(serialized: &str) -> Self {
		let mut salt = 0usize;
		let prefix = loop {
			let prefix = format!("__datatables_callback_{}_", salt);
			if !serialized.contains(&prefix) {
				break prefix;
			}
			salt += 1;
		};
		Self {
			prefix,
			functions: Vec::new(),
		}
	}

	fn push(&mut self, function: String) -> String {
		let placeholder = format!("{}{}__", self.prefix, self.functions.len());
		self.functions.push((placeholder.clone(), function));
		placeholder
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::options::AjaxOptions;
	use reinhardt_datatables_columns::DataTablesError;
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn table() -> DataTable {
		let mut table = DataTable::new("books").unwrap();
		table.columns_mut().add_field("title").unwrap();
		table
			.columns_mut()
			.add_unbound("actions")
			.unwrap()
			.set_title("<b>Actions</b>");
		table
	}

	#[rstest]
	fn test_render_table_escapes_titles(table: DataTable) {
		let html = ViewHelper::new().render_table(&table).unwrap();
		assert!(html.starts_with("<table id=\"books\" class=\"display\">"));
		assert!(html.contains("<th>Title</th>"));
		assert!(html.contains("<th>&lt;b&gt;Actions&lt;"));
		assert!(!html.contains("<b>"));
		assert_eq!(html.matches("<th>").count(), 2);
	}

	#[rstest]
	fn test_render_table_escapes_class(mut table: DataTable) {
		table.set_class("display \"compact\"");
		let html = ViewHelper::new().render_table(&table).unwrap();
		assert!(html.contains("class=\"display &quot;compact&quot;\""));
	}

	#[rstest]
	fn test_script_uses_configured_variable(table: DataTable) {
		let settings = DataTablesSettings::from_toml_str("script_variable = \"$j\"").unwrap();
		let script = ViewHelper::new()
			.with_settings(settings)
			.unwrap()
			.render_script(&table)
			.unwrap();
		assert!(script.starts_with("<script>\n$j(function ($) {"));
		assert!(script.contains("$(\"#books\").DataTable({"));
		assert!(script.trim_end().ends_with("</script>"));
	}

	#[rstest]
	fn test_callbacks_become_functions(mut table: DataTable) {
		table
			.options_mut()
			.set_callback(CallbackKind::DrawCallback, CallbackSpec::body("console.log(settings);"))
			.unwrap();
		let mut params = Map::new();
		params.insert("url".to_string(), json!("/books/"));
		table
			.columns_mut()
			.get_mut("title")
			.unwrap()
			.callback_created_cell(CallbackSpec::template("link", params))
			.unwrap();

		let js = ViewHelper::new().to_javascript(&table).unwrap();
		assert!(js.contains("\"drawCallback\": function (settings) {\nconsole.log(settings);\n}"));
		assert!(js.contains("\"createdCell\": function (cell, cellData, rowData, rowIndex, colIndex) {"));
		assert!(js.contains("\"/books/\""));
		assert!(!js.contains("__datatables_callback_"));
	}

	#[rstest]
	fn test_unknown_template_fails(mut table: DataTable) {
		table
			.options_mut()
			.set_callback(CallbackKind::InitComplete, CallbackSpec::template("missing", Map::new()))
			.unwrap();
		assert!(ViewHelper::new().to_javascript(&table).is_err());
	}

	#[rstest]
	fn test_closing_tags_are_escaped(mut table: DataTable) {
		table
			.options_mut()
			.set_ajax(AjaxOptions::get("/x</script><script>alert(1)"));
		let js = ViewHelper::new().to_javascript(&table).unwrap();
		assert!(!js.contains("</script>"));
		assert!(js.contains("<\\/script>"));
	}

	#[rstest]
	fn test_template_params_cannot_close_script(mut table: DataTable) {
		let mut params = Map::new();
		params.insert("url".to_string(), json!("</script><script>alert(1)//"));
		table
			.columns_mut()
			.get_mut("title")
			.unwrap()
			.callback_created_cell(CallbackSpec::template("link", params))
			.unwrap();

		let script = ViewHelper::new().render_script(&table).unwrap();
		assert!(!script.contains("</script><script>"));
		assert!(script.contains("attr('href', \"<\\/script><script>alert(1)//\" + cellData)"));
		assert_eq!(script.matches("</script>").count(), 1);
	}

	#[rstest]
	fn test_inline_body_cannot_close_script(mut table: DataTable) {
		table
			.options_mut()
			.set_callback(CallbackKind::InitComplete, CallbackSpec::body("var s = '</script>';"))
			.unwrap();
		let script = ViewHelper::new().render_script(&table).unwrap();
		assert!(script.contains("var s = '<\\/script>';"));
		assert_eq!(script.matches("</script>").count(), 1);
	}

	#[rstest]
	#[case("x</script><b>")]
	#[case("")]
	#[case("1abc")]
	#[case("a b")]
	fn test_invalid_script_variable_rejected(#[case] variable: &str) {
		let settings = DataTablesSettings {
			script_variable: variable.to_string(),
			..Default::default()
		};
		let err = ViewHelper::new().with_settings(settings).unwrap_err();
		assert!(matches!(err, DataTablesError::Settings(_)));
	}

	#[rstest]
	fn test_placeholder_lookalike_values_untouched(mut table: DataTable) {
		table
			.columns_mut()
			.get_mut("title")
			.unwrap()
			.set_class_name(Some("__datatables_callback_0_0__"));
		table
			.options_mut()
			.set_callback(CallbackKind::DrawCallback, CallbackSpec::body("redraw();"))
			.unwrap();

		let js = ViewHelper::new().to_javascript(&table).unwrap();
		assert!(js.contains("\"className\": \"__datatables_callback_0_0__\""));
		assert!(js.contains("\"drawCallback\": function (settings) {\nredraw();\n}"));
		assert_eq!(js.matches("function (settings)").count(), 1);
	}

	#[rstest]
	fn test_render_assets() {
		let settings = DataTablesSettings::from_toml_str(
			"[assets]\ncss = [\"/static/dt.css\"]\njs = [\"/static/dt.js\"]\n",
		)
		.unwrap();
		let html = ViewHelper::new()
			.with_settings(settings)
			.unwrap()
			.render_assets()
			.unwrap();
		assert!(html.contains("<link rel=\"stylesheet\" href=\"&#x2F;static&#x2F;dt.css\">"));
		assert!(html.contains("<script src=\"&#x2F;static&#x2F;dt.js\"></script>"));
	}

	#[rstest]
	fn test_render_assets_empty() {
		assert_eq!(ViewHelper::new().render_assets().unwrap().trim(), "");
	}
}
