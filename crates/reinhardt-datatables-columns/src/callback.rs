//! JavaScript callbacks attached to column and table options
//!
//! A callback is described either by an inline function body or by the name
//! of a registered template plus the parameters to render it with. Specs are
//! only checked structurally when they are attached; rendering into a
//! JavaScript function happens when the table script is emitted.
//!
//! ```
//! use reinhardt_datatables_columns::callback::{CallbackKind, CallbackSpec, CallbackTemplates};
//! use serde_json::{Map, json};
//!
//! let templates = CallbackTemplates::with_builtins();
//! let mut params = Map::new();
//! params.insert("url".to_string(), json!("/articles/"));
//!
//! let js = templates
//!     .render(CallbackKind::CreatedCell, &CallbackSpec::template("link", params))
//!     .unwrap();
//! assert!(js.starts_with("function (cell, cellData, rowData, rowIndex, colIndex) {"));
//! ```

use crate::error::{DataTablesError, Result};
use crate::validator::{validate_callback, validate_template_params};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tera::{Context, Tera};

/// Source of a callback function body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallbackSpec {
	/// Inline JavaScript function body.
	Body(String),
	/// Registered template rendered with the given parameters.
	Template {
		/// Template name.
		name: String,
		/// Template parameters.
		#[serde(default)]
		params: Map<String, Value>,
	},
}

impl CallbackSpec {
	/// Creates an inline-body callback.
	pub fn body(body: impl Into<String>) -> Self {
		Self::Body(body.into())
	}

	/// Creates a template callback.
	pub fn template(name: impl Into<String>, params: Map<String, Value>) -> Self {
		Self::Template {
			name: name.into(),
			params,
		}
	}

	/// Reads a callback from an untyped option value.
	///
	/// A plain string is an inline body; objects use the serialized form
	/// (`{"body": ...}` or `{"template": {"name": ..., "params": {...}}}`).
	/// `null` means unset.
	pub fn from_value(field: &str, value: &Value) -> Result<Option<Self>> {
		let spec = match value {
			Value::Null => return Ok(None),
			Value::String(body) => Self::Body(body.clone()),
			Value::Object(_) => serde_json::from_value(value.clone()).map_err(|e| {
				DataTablesError::invalid_argument(
					field,
					format!("expected callback body or template parameters: {}", e),
				)
			})?,
			other => {
				return Err(DataTablesError::invalid_argument(
					field,
					format!(
						"expected callback body or template parameters, got {}",
						crate::validator::describe(other)
					),
				));
			}
		};
		validate_callback(field, &spec)?;
		Ok(Some(spec))
	}
}

/// Widget callbacks and the arguments the widget invokes them with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackKind {
	/// Column `createdCell`.
	CreatedCell,
	/// Table `createdRow`.
	CreatedRow,
	/// Table `drawCallback`.
	DrawCallback,
	/// Table `initComplete`.
	InitComplete,
	/// Table `rowCallback`.
	RowCallback,
}

impl CallbackKind {
	/// All callback kinds.
	pub const ALL: [CallbackKind; 5] = [
		Self::CreatedCell,
		Self::CreatedRow,
		Self::DrawCallback,
		Self::InitComplete,
		Self::RowCallback,
	];

	/// Option name used by the widget.
	pub fn option_name(&self) -> &'static str {
		match self {
			Self::CreatedCell => "createdCell",
			Self::CreatedRow => "createdRow",
			Self::DrawCallback => "drawCallback",
			Self::InitComplete => "initComplete",
			Self::RowCallback => "rowCallback",
		}
	}

	/// Arguments passed to the function by the widget.
	pub fn arguments(&self) -> &'static [&'static str] {
		match self {
			Self::CreatedCell => &["cell", "cellData", "rowData", "rowIndex", "colIndex"],
			Self::CreatedRow => &["row", "data", "dataIndex", "cells"],
			Self::DrawCallback => &["settings"],
			Self::InitComplete => &["settings", "json"],
			Self::RowCallback => &["row", "data", "displayNum", "displayIndex", "dataIndex"],
		}
	}

	/// Looks a kind up by its option name.
	pub fn from_option_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.option_name() == name)
	}
}

const LINK_TEMPLATE: &str = "jQuery(cell).html(jQuery('<a>').attr('href', {{ url | json_encode() | safe }} + cellData).text(cellData));";

const CLASS_WHEN_TEMPLATE: &str = "if (cellData == {{ value | json_encode() | safe }}) {\n\tjQuery(cell).addClass({{ class_name | json_encode() | safe }});\n}";

/// Registry of callback templates backed by Tera.
///
/// Each template declares the parameters it expects; rendering a
/// [`CallbackSpec::Template`] checks the supplied parameters against that
/// declaration first.
#[derive(Debug, Default)]
pub struct CallbackTemplates {
	tera: Tera,
	declared: HashMap<String, Vec<String>>,
}

impl CallbackTemplates {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a registry holding the bundled templates:
	///
	/// - `link` (`url`): wraps the cell value in a link to `url + value`
	/// - `class_when` (`value`, `class_name`): adds a class when the cell equals `value`
	pub fn with_builtins() -> Self {
		let mut templates = Self::new();
		templates
			.register("link", LINK_TEMPLATE, &["url"])
			.expect("Failed to add link template");
		templates
			.register("class_when", CLASS_WHEN_TEMPLATE, &["value", "class_name"])
			.expect("Failed to add class_when template");
		templates
	}

	/// Registers a template and the parameters it expects.
	pub fn register(&mut self, name: &str, source: &str, params: &[&str]) -> Result<&mut Self> {
		self.tera.add_raw_template(name, source)?;
		self.declared
			.insert(name.to_string(), params.iter().map(|p| p.to_string()).collect());
		tracing::debug!(template = name, "registered callback template");
		Ok(self)
	}

	/// Returns `true` if a template with this name is registered.
	pub fn contains(&self, name: &str) -> bool {
		self.declared.contains_key(name)
	}

	/// Renders the function body described by `spec`.
	pub fn render_body(&self, spec: &CallbackSpec) -> Result<String> {
		match spec {
			CallbackSpec::Body(body) => Ok(body.clone()),
			CallbackSpec::Template { name, params } => {
				let declared = self.declared.get(name).ok_or_else(|| {
					DataTablesError::invalid_argument(
						name.as_str(),
						format!("unknown callback template {:?}", name),
					)
				})?;
				validate_template_params(name, params, declared)?;
				let context = Context::from_serialize(params)?;
				Ok(self.tera.render(name, &context)?)
			}
		}
	}

	/// Renders `spec` as a complete JavaScript function expression.
	pub fn render(&self, kind: CallbackKind, spec: &CallbackSpec) -> Result<String> {
		let body = self.render_body(spec)?;
		let body = body.trim();
		Ok(format!(
			"function ({}) {{\n{}\n}}",
			kind.arguments().join(", "),
			body
		))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn templates() -> CallbackTemplates {
		CallbackTemplates::with_builtins()
	}

	#[rstest]
	fn test_builtins_registered(templates: CallbackTemplates) {
		assert!(templates.contains("link"));
		assert!(templates.contains("class_when"));
		assert!(!templates.contains("missing"));
	}

	#[rstest]
	fn test_render_inline_body(templates: CallbackTemplates) {
		let js = templates
			.render(CallbackKind::DrawCallback, &CallbackSpec::body("console.log(settings);"))
			.unwrap();
		assert_eq!(js, "function (settings) {\nconsole.log(settings);\n}");
	}

	#[rstest]
	fn test_render_link_template(templates: CallbackTemplates) {
		let mut params = Map::new();
		params.insert("url".to_string(), json!("/articles/"));
		let body = templates
			.render_body(&CallbackSpec::template("link", params))
			.unwrap();
		assert!(body.contains("attr('href', \"/articles/\" + cellData)"));
	}

	#[rstest]
	fn test_render_class_when_template(templates: CallbackTemplates) {
		let mut params = Map::new();
		params.insert("value".to_string(), json!(0));
		params.insert("class_name".to_string(), json!("text-danger"));
		let body = templates
			.render_body(&CallbackSpec::template("class_when", params))
			.unwrap();
		assert!(body.starts_with("if (cellData == 0) {"));
		assert!(body.contains("addClass(\"text-danger\")"));
	}

	#[rstest]
	fn test_render_unknown_template(templates: CallbackTemplates) {
		let err = templates
			.render_body(&CallbackSpec::template("missing", Map::new()))
			.unwrap_err();
		assert!(err.is_invalid_argument());
	}

	#[rstest]
	fn test_render_missing_params(templates: CallbackTemplates) {
		let err = templates
			.render_body(&CallbackSpec::template("link", Map::new()))
			.unwrap_err();
		assert!(err.to_string().contains("missing template parameter \"url\""));
	}

	#[rstest]
	fn test_register_invalid_template() {
		let mut templates = CallbackTemplates::new();
		let err = templates.register("broken", "{% if %}", &[]).unwrap_err();
		assert!(matches!(err, DataTablesError::Template(_)));
		assert!(!templates.contains("broken"));
	}

	#[rstest]
	fn test_from_value() {
		assert_eq!(
			CallbackSpec::from_value("createdCell", &json!("return;")).unwrap(),
			Some(CallbackSpec::body("return;"))
		);
		assert_eq!(
			CallbackSpec::from_value("createdCell", &json!(null)).unwrap(),
			None
		);

		let spec = CallbackSpec::from_value(
			"createdCell",
			&json!({"template": {"name": "link", "params": {"url": "/"}}}),
		)
		.unwrap()
		.unwrap();
		assert!(matches!(spec, CallbackSpec::Template { ref name, .. } if name == "link"));

		assert!(CallbackSpec::from_value("createdCell", &json!(5)).is_err());
		assert!(CallbackSpec::from_value("createdCell", &json!({"nope": 1})).is_err());
	}

	#[rstest]
	fn test_kind_lookup() {
		assert_eq!(
			CallbackKind::from_option_name("rowCallback"),
			Some(CallbackKind::RowCallback)
		);
		assert_eq!(CallbackKind::from_option_name("render"), None);
	}
}
