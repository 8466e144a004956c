//! Stateless validation functions for raw option values
//!
//! Setters that receive untyped input (settings files, request payloads)
//! run it through these checks before anything is stored. Each function
//! treats JSON `null` as "unset" and returns `None` for it.

use crate::callback::CallbackSpec;
use crate::error::{DataTablesError, Result};
use crate::options::OrderData;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::str::FromStr;

static IDENTIFIER: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// Describes a JSON value for error messages, e.g. `integer -1` or `string "x"`.
pub fn describe(value: &Value) -> String {
	match value {
		Value::Null => "null".to_string(),
		Value::Bool(b) => format!("boolean {}", b),
		Value::Number(n) if n.is_i64() || n.is_u64() => format!("integer {}", n),
		Value::Number(n) => format!("float {}", n),
		Value::String(s) => format!("string {:?}", s),
		Value::Array(items) => format!("list of {} item(s)", items.len()),
		Value::Object(map) => format!("mapping of {} key(s)", map.len()),
	}
}

/// Checks that `value` is one of `allowed`.
pub fn validate_choice(field: &str, value: &str, allowed: &[&str]) -> Result<()> {
	if allowed.contains(&value) {
		Ok(())
	} else {
		Err(DataTablesError::invalid_argument(
			field,
			format!("expected one of {:?}, got {:?}", allowed, value),
		))
	}
}

/// Parses an optional enum-like value through its [`FromStr`] implementation.
pub fn parse_optional<T>(field: &str, value: &Value) -> Result<Option<T>>
where
	T: FromStr<Err = DataTablesError>,
{
	match value {
		Value::Null => Ok(None),
		Value::String(s) => s.parse().map(Some),
		other => Err(DataTablesError::invalid_argument(
			field,
			format!("expected string or null, got {}", describe(other)),
		)),
	}
}

/// Accepts `null` or a boolean.
pub fn validate_optional_bool(field: &str, value: &Value) -> Result<Option<bool>> {
	match value {
		Value::Null => Ok(None),
		Value::Bool(b) => Ok(Some(*b)),
		other => Err(DataTablesError::invalid_argument(
			field,
			format!("expected boolean or null, got {}", describe(other)),
		)),
	}
}

/// Accepts `null` or a string.
pub fn validate_optional_string(field: &str, value: &Value) -> Result<Option<String>> {
	match value {
		Value::Null => Ok(None),
		Value::String(s) => Ok(Some(s.clone())),
		other => Err(DataTablesError::invalid_argument(
			field,
			format!("expected string or null, got {}", describe(other)),
		)),
	}
}

/// Accepts a string only; used for options that always carry a value.
pub fn validate_required_string(field: &str, value: &Value) -> Result<String> {
	match value {
		Value::String(s) => Ok(s.clone()),
		other => Err(DataTablesError::invalid_argument(
			field,
			format!("expected string, got {}", describe(other)),
		)),
	}
}

/// Accepts `null` or a non-negative integer that fits in `u32`.
pub fn validate_optional_index(field: &str, value: &Value) -> Result<Option<u32>> {
	match value {
		Value::Null => Ok(None),
		other => non_negative(field, other).map(Some),
	}
}

/// Accepts `null`, a non-negative integer, or a mapping of integer to integer.
///
/// Mappings arrive either as JSON objects whose keys are integer strings or
/// as lists, in which case the key is the list position.
pub fn validate_order_data(field: &str, value: &Value) -> Result<Option<OrderData>> {
	match value {
		Value::Null => Ok(None),
		Value::Number(_) => non_negative(field, value).map(|i| Some(OrderData::Index(i))),
		Value::Array(items) => {
			let mut mapping = BTreeMap::new();
			for (position, item) in items.iter().enumerate() {
				mapping.insert(position as u32, non_negative(field, item)?);
			}
			Ok(Some(OrderData::Mapping(mapping)))
		}
		Value::Object(map) => {
			let mut mapping = BTreeMap::new();
			for (key, item) in map {
				let key = key.parse::<u32>().map_err(|_| {
					DataTablesError::invalid_argument(
						field,
						format!("expected mapping keys to be integers, got key {:?}", key),
					)
				})?;
				mapping.insert(key, non_negative(field, item)?);
			}
			Ok(Some(OrderData::Mapping(mapping)))
		}
		other => Err(DataTablesError::invalid_argument(
			field,
			format!(
				"expected integer, mapping of integer to integer, or null, got {}",
				describe(other)
			),
		)),
	}
}

/// Accepts `null` or a list of strings drawn from `allowed`.
pub fn validate_sequence(field: &str, value: &Value, allowed: &[&str]) -> Result<Option<Vec<String>>> {
	let items = match value {
		Value::Null => return Ok(None),
		Value::Array(items) => items,
		other => {
			return Err(DataTablesError::invalid_argument(
				field,
				format!("expected list of strings or null, got {}", describe(other)),
			));
		}
	};

	items
		.iter()
		.map(|item| match item {
			Value::String(s) => validate_choice(field, s, allowed).map(|()| s.clone()),
			other => Err(DataTablesError::invalid_argument(
				field,
				format!("expected list entries to be strings, got {}", describe(other)),
			)),
		})
		.collect::<Result<Vec<_>>>()
		.map(Some)
}

/// Structural check of a callback: a non-blank body, or a named template
/// whose parameter names are identifiers. The callback is not evaluated.
pub fn validate_callback(field: &str, spec: &CallbackSpec) -> Result<()> {
	match spec {
		CallbackSpec::Body(body) if body.trim().is_empty() => Err(
			DataTablesError::invalid_argument(field, "expected a non-empty callback body"),
		),
		CallbackSpec::Body(_) => Ok(()),
		CallbackSpec::Template { name, .. } if name.trim().is_empty() => Err(
			DataTablesError::invalid_argument(field, "expected a non-empty template name"),
		),
		CallbackSpec::Template { params, .. } => {
			match params.keys().find(|key| !IDENTIFIER.is_match(key)) {
				Some(key) => Err(DataTablesError::invalid_argument(
					field,
					format!("expected template parameter names to be identifiers, got {:?}", key),
				)),
				None => Ok(()),
			}
		}
	}
}

/// Checks template parameters against the parameter list a template declares.
pub fn validate_template_params(
	template: &str,
	params: &Map<String, Value>,
	declared: &[String],
) -> Result<()> {
	if let Some(missing) = declared.iter().find(|name| !params.contains_key(name.as_str())) {
		return Err(DataTablesError::invalid_argument(
			template,
			format!("missing template parameter {:?}; expected {:?}", missing, declared),
		));
	}
	if let Some(unexpected) = params.keys().find(|key| !declared.contains(key)) {
		return Err(DataTablesError::invalid_argument(
			template,
			format!("unexpected template parameter {:?}; expected {:?}", unexpected, declared),
		));
	}
	Ok(())
}

fn non_negative(field: &str, value: &Value) -> Result<u32> {
	value
		.as_i64()
		.and_then(|i| u32::try_from(i).ok())
		.ok_or_else(|| {
			DataTablesError::invalid_argument(
				field,
				format!("expected a non-negative integer, got {}", describe(value)),
			)
		})
}
