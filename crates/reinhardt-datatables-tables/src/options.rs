//! Table-wide widget options
//!
//! [`TableOptions`] follows the same contract as
//! [`Column`](reinhardt_datatables_columns::Column): typed setters, an
//! untyped [`TableOptions::apply_option`] that validates before storing, and
//! serialization in dirty or full mode.

use reinhardt_datatables_columns::validator::{
	describe, parse_optional, validate_optional_bool, validate_optional_index,
	validate_optional_string,
};
use reinhardt_datatables_columns::{
	CallbackKind, CallbackSpec, ConfigMode, DataTablesError, OrderDirection, Result,
};
use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Option names understood by the widget at table level, in its spelling.
pub const TABLE_OPTIONS: &[&str] = &[
	"ajax",
	"autoWidth",
	"createdRow",
	"deferRender",
	"dom",
	"drawCallback",
	"info",
	"initComplete",
	"language",
	"lengthChange",
	"lengthMenu",
	"order",
	"ordering",
	"pageLength",
	"paging",
	"pagingType",
	"processing",
	"rowCallback",
	"scrollX",
	"scrollY",
	"searchDelay",
	"searching",
	"serverSide",
	"stateSave",
];

/// Pagination control style (`pagingType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PagingType {
	/// Page number buttons only.
	Numbers,
	/// Previous and next buttons.
	Simple,
	/// Previous, next and page numbers.
	SimpleNumbers,
	/// First, previous, next and last buttons.
	Full,
	/// First, previous, next, last and page numbers.
	FullNumbers,
	/// First, last and page numbers.
	FirstLastNumbers,
}

impl PagingType {
	/// Every accepted value, in the widget's spelling.
	pub const VALUES: &'static [&'static str] = &[
		"numbers",
		"simple",
		"simple_numbers",
		"full",
		"full_numbers",
		"first_last_numbers",
	];

	/// Returns the widget spelling of this value.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Numbers => "numbers",
			Self::Simple => "simple",
			Self::SimpleNumbers => "simple_numbers",
			Self::Full => "full",
			Self::FullNumbers => "full_numbers",
			Self::FirstLastNumbers => "first_last_numbers",
		}
	}
}

impl FromStr for PagingType {
	type Err = DataTablesError;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"numbers" => Ok(Self::Numbers),
			"simple" => Ok(Self::Simple),
			"simple_numbers" => Ok(Self::SimpleNumbers),
			"full" => Ok(Self::Full),
			"full_numbers" => Ok(Self::FullNumbers),
			"first_last_numbers" => Ok(Self::FirstLastNumbers),
			other => Err(DataTablesError::invalid_argument(
				"pagingType",
				format!("expected one of {:?}, got {:?}", Self::VALUES, other),
			)),
		}
	}
}

impl fmt::Display for PagingType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Serialize for PagingType {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

/// HTTP method used by the widget for ajax requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
	/// `GET`
	#[default]
	Get,
	/// `POST`
	Post,
}

impl HttpMethod {
	/// Returns the method name.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
		}
	}
}

impl FromStr for HttpMethod {
	type Err = DataTablesError;

	fn from_str(s: &str) -> Result<Self> {
		match s.to_ascii_uppercase().as_str() {
			"GET" => Ok(Self::Get),
			"POST" => Ok(Self::Post),
			_ => Err(DataTablesError::invalid_argument(
				"ajax.type",
				format!("expected \"GET\" or \"POST\", got {:?}", s),
			)),
		}
	}
}

/// Data source for server-side processing (`ajax`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AjaxOptions {
	/// Endpoint URL.
	pub url: String,
	/// Request method.
	pub method: HttpMethod,
}

impl AjaxOptions {
	/// A `GET` data source.
	pub fn get(url: impl Into<String>) -> Self {
		Self {
			url: url.into(),
			method: HttpMethod::Get,
		}
	}

	/// A `POST` data source.
	pub fn post(url: impl Into<String>) -> Self {
		Self {
			url: url.into(),
			method: HttpMethod::Post,
		}
	}
}

impl Serialize for AjaxOptions {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		json!({"url": self.url, "type": self.method.as_str()}).serialize(serializer)
	}
}

/// One entry of the initial ordering (`order`), serialized as `[column, "dir"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSpec {
	/// Column index.
	pub column: u32,
	/// Direction.
	pub direction: OrderDirection,
}

impl OrderSpec {
	/// Creates an order entry.
	pub fn new(column: u32, direction: OrderDirection) -> Self {
		Self { column, direction }
	}
}

impl Serialize for OrderSpec {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		let mut tuple = serializer.serialize_tuple(2)?;
		tuple.serialize_element(&self.column)?;
		tuple.serialize_element(&self.direction)?;
		tuple.end()
	}
}

macro_rules! table_flags {
	($($field:ident, $setter:ident => $key:literal;)+) => {
		#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
		struct Flags {
			$($field: Option<bool>,)+
		}

		impl Flags {
			fn slot(&mut self, key: &str) -> Option<&mut Option<bool>> {
				match key {
					$($key => Some(&mut self.$field),)+
					_ => None,
				}
			}

			fn get(&self, key: &str) -> Option<Option<bool>> {
				match key {
					$($key => Some(self.$field),)+
					_ => None,
				}
			}
		}

		impl TableOptions {
			$(
				#[doc = concat!("`", $key, "`")]
				pub fn $field(&self) -> Option<bool> {
					self.flags.$field
				}

				#[doc = concat!("Sets `", $key, "`.")]
				pub fn $setter(&mut self, value: impl Into<Option<bool>>) -> &mut Self {
					self.flags.$field = value.into();
					self
				}
			)+
		}
	};
}

table_flags! {
	auto_width, set_auto_width => "autoWidth";
	defer_render, set_defer_render => "deferRender";
	info, set_info => "info";
	length_change, set_length_change => "lengthChange";
	ordering, set_ordering => "ordering";
	paging, set_paging => "paging";
	processing, set_processing => "processing";
	scroll_x, set_scroll_x => "scrollX";
	searching, set_searching => "searching";
	server_side, set_server_side => "serverSide";
	state_save, set_state_save => "stateSave";
}

/// Table-level widget options.
///
/// ```
/// use reinhardt_datatables_tables::{AjaxOptions, TableOptions};
/// use reinhardt_datatables_columns::ConfigMode;
/// use serde_json::json;
///
/// let mut options = TableOptions::new();
/// options.set_server_side(true).set_ajax(AjaxOptions::post("/api/posts/"));
/// options.apply_option("pageLength", &json!(25)).unwrap();
///
/// let config = options.config(ConfigMode::Dirty);
/// assert_eq!(config["pageLength"], 25);
/// assert_eq!(config["ajax"], json!({"url": "/api/posts/", "type": "POST"}));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableOptions {
	flags: Flags,
	length_menu: Option<Vec<i64>>,
	order: Option<Vec<OrderSpec>>,
	page_length: Option<u32>,
	paging_type: Option<PagingType>,
	scroll_y: Option<String>,
	search_delay: Option<u32>,
	dom: Option<String>,
	ajax: Option<AjaxOptions>,
	language_url: Option<String>,
	callbacks: HashMap<CallbackKind, CallbackSpec>,
}

impl TableOptions {
	/// Creates an empty option set.
	pub fn new() -> Self {
		Self::default()
	}

	/// `lengthMenu`
	pub fn length_menu(&self) -> Option<&[i64]> {
		self.length_menu.as_deref()
	}

	/// Sets `lengthMenu`. Entries must be positive or `-1` (all rows) and
	/// must not repeat.
	pub fn set_length_menu(&mut self, menu: impl Into<Option<Vec<i64>>>) -> Result<&mut Self> {
		let menu = menu.into();
		if let Some(entries) = &menu {
			validate_length_menu(entries)?;
		}
		self.length_menu = menu;
		Ok(self)
	}

	/// `order`
	pub fn order(&self) -> Option<&[OrderSpec]> {
		self.order.as_deref()
	}

	/// Sets `order`. Column indexes are checked when the table is assembled.
	pub fn set_order(&mut self, order: impl Into<Option<Vec<OrderSpec>>>) -> &mut Self {
		self.order = order.into();
		self
	}

	/// `pageLength`
	pub fn page_length(&self) -> Option<u32> {
		self.page_length
	}

	/// Sets `pageLength`, which must be positive.
	pub fn set_page_length(&mut self, length: impl Into<Option<u32>>) -> Result<&mut Self> {
		let length = length.into();
		if length == Some(0) {
			return Err(DataTablesError::invalid_argument(
				"pageLength",
				"expected a positive integer, got integer 0",
			));
		}
		self.page_length = length;
		Ok(self)
	}

	/// `pagingType`
	pub fn paging_type(&self) -> Option<PagingType> {
		self.paging_type
	}

	/// Sets `pagingType`.
	pub fn set_paging_type(&mut self, paging_type: impl Into<Option<PagingType>>) -> &mut Self {
		self.paging_type = paging_type.into();
		self
	}

	/// `scrollY`
	pub fn scroll_y(&self) -> Option<&str> {
		self.scroll_y.as_deref()
	}

	/// Sets `scrollY`, a CSS height such as `"50vh"`.
	pub fn set_scroll_y(&mut self, height: Option<&str>) -> &mut Self {
		self.scroll_y = height.map(str::to_string);
		self
	}

	/// `searchDelay`
	pub fn search_delay(&self) -> Option<u32> {
		self.search_delay
	}

	/// Sets `searchDelay` in milliseconds.
	pub fn set_search_delay(&mut self, delay: impl Into<Option<u32>>) -> &mut Self {
		self.search_delay = delay.into();
		self
	}

	/// `dom`
	pub fn dom(&self) -> Option<&str> {
		self.dom.as_deref()
	}

	/// Sets `dom`.
	pub fn set_dom(&mut self, dom: Option<&str>) -> &mut Self {
		self.dom = dom.map(str::to_string);
		self
	}

	/// `ajax`
	pub fn ajax(&self) -> Option<&AjaxOptions> {
		self.ajax.as_ref()
	}

	/// Sets `ajax`.
	pub fn set_ajax(&mut self, ajax: impl Into<Option<AjaxOptions>>) -> &mut Self {
		self.ajax = ajax.into();
		self
	}

	/// `language.url`
	pub fn language_url(&self) -> Option<&str> {
		self.language_url.as_deref()
	}

	/// Sets the translation file loaded by the widget.
	pub fn set_language_url(&mut self, url: Option<&str>) -> &mut Self {
		self.language_url = url.map(str::to_string);
		self
	}

	/// Table callback of the given kind.
	pub fn callback(&self, kind: CallbackKind) -> Option<&CallbackSpec> {
		self.callbacks.get(&kind)
	}

	/// Attaches or clears a table callback.
	///
	/// # Errors
	///
	/// `createdCell` is a column callback and is rejected here, as are
	/// structurally invalid specs.
	pub fn set_callback(
		&mut self,
		kind: CallbackKind,
		callback: impl Into<Option<CallbackSpec>>,
	) -> Result<&mut Self> {
		if kind == CallbackKind::CreatedCell {
			return Err(DataTablesError::invalid_argument(
				kind.option_name(),
				"expected a table callback; createdCell belongs to columns",
			));
		}
		match callback.into() {
			Some(spec) => {
				reinhardt_datatables_columns::validator::validate_callback(kind.option_name(), &spec)?;
				self.callbacks.insert(kind, spec);
			}
			None => {
				self.callbacks.remove(&kind);
			}
		}
		Ok(self)
	}

	/// Validates an untyped option value and routes it to its setter.
	///
	/// On error the options are unchanged.
	pub fn apply_option(&mut self, key: &str, value: &Value) -> Result<&mut Self> {
		if self.flags.get(key).is_some() {
			let flag = validate_optional_bool(key, value)?;
			if let Some(slot) = self.flags.slot(key) {
				*slot = flag;
			}
			return Ok(self);
		}
		if let Some(kind) = CallbackKind::from_option_name(key) {
			let callback = CallbackSpec::from_value(key, value)?;
			return self.set_callback(kind, callback);
		}

		match key {
			"ajax" => {
				let ajax = parse_ajax(value)?;
				self.set_ajax(ajax);
			}
			"dom" => {
				let dom = validate_optional_string(key, value)?;
				self.set_dom(dom.as_deref());
			}
			"language" => {
				let url = parse_language(value)?;
				self.set_language_url(url.as_deref());
			}
			"lengthMenu" => {
				let menu = parse_length_menu(value)?;
				self.set_length_menu(menu)?;
			}
			"order" => {
				let order = parse_order(value)?;
				self.set_order(order);
			}
			"pageLength" => {
				let length = validate_optional_index(key, value)?;
				self.set_page_length(length)?;
			}
			"pagingType" => {
				let paging_type = parse_optional::<PagingType>(key, value)?;
				self.set_paging_type(paging_type);
			}
			"scrollY" => {
				let height = validate_optional_string(key, value)?;
				self.set_scroll_y(height.as_deref());
			}
			"searchDelay" => {
				let delay = validate_optional_index(key, value)?;
				self.set_search_delay(delay);
			}
			other => {
				return Err(DataTablesError::invalid_argument(
					other,
					format!("unknown table option; expected one of {:?}", TABLE_OPTIONS),
				));
			}
		}
		Ok(self)
	}

	/// Applies several untyped options; either all of them apply or none do.
	pub fn apply_options(&mut self, options: &Map<String, Value>) -> Result<&mut Self> {
		let original = self.clone();
		for (key, value) in options {
			if let Err(err) = self.apply_option(key, value) {
				*self = original;
				return Err(err);
			}
		}
		Ok(self)
	}

	/// Serializes the options in [`TABLE_OPTIONS`] order.
	///
	/// Callbacks are emitted in their serialized spec form; the view helper
	/// turns them into functions.
	pub fn config(&self, mode: ConfigMode) -> Map<String, Value> {
		let mut config = Map::new();
		for key in TABLE_OPTIONS {
			let value = self.option_value(key);
			match value {
				Some(value) => {
					config.insert(key.to_string(), value);
				}
				None if mode == ConfigMode::Full => {
					config.insert(key.to_string(), Value::Null);
				}
				None => {}
			}
		}
		config
	}

	fn option_value(&self, key: &str) -> Option<Value> {
		if let Some(flag) = self.flags.get(key) {
			return flag.map(Value::Bool);
		}
		if let Some(kind) = CallbackKind::from_option_name(key) {
			return self.callbacks.get(&kind).map(|spec| json!(spec));
		}
		match key {
			"ajax" => self.ajax.as_ref().map(|v| json!(v)),
			"dom" => self.dom.as_ref().map(|v| json!(v)),
			"language" => self.language_url.as_ref().map(|url| json!({"url": url})),
			"lengthMenu" => self.length_menu.as_ref().map(|v| json!(v)),
			"order" => self.order.as_ref().map(|v| json!(v)),
			"pageLength" => self.page_length.map(|v| json!(v)),
			"pagingType" => self.paging_type.map(|v| json!(v)),
			"scrollY" => self.scroll_y.as_ref().map(|v| json!(v)),
			"searchDelay" => self.search_delay.map(|v| json!(v)),
			_ => None,
		}
	}
}

fn validate_length_menu(entries: &[i64]) -> Result<()> {
	for (position, entry) in entries.iter().enumerate() {
		if *entry == 0 || *entry < -1 {
			return Err(DataTablesError::invalid_argument(
				"lengthMenu",
				format!("expected positive entries or -1, got integer {}", entry),
			));
		}
		if entries[..position].contains(entry) {
			return Err(DataTablesError::invalid_argument(
				"lengthMenu",
				format!("expected distinct entries, got {} twice", entry),
			));
		}
	}
	Ok(())
}

fn parse_length_menu(value: &Value) -> Result<Option<Vec<i64>>> {
	let items = match value {
		Value::Null => return Ok(None),
		Value::Array(items) => items,
		other => {
			return Err(DataTablesError::invalid_argument(
				"lengthMenu",
				format!("expected list of integers or null, got {}", describe(other)),
			));
		}
	};
	items
		.iter()
		.map(|item| {
			item.as_i64().ok_or_else(|| {
				DataTablesError::invalid_argument(
					"lengthMenu",
					format!("expected list entries to be integers, got {}", describe(item)),
				)
			})
		})
		.collect::<Result<Vec<_>>>()
		.map(Some)
}

fn parse_order(value: &Value) -> Result<Option<Vec<OrderSpec>>> {
	let items = match value {
		Value::Null => return Ok(None),
		Value::Array(items) => items,
		other => {
			return Err(DataTablesError::invalid_argument(
				"order",
				format!("expected list of [column, direction] pairs or null, got {}", describe(other)),
			));
		}
	};
	items
		.iter()
		.map(|item| match item.as_array().map(Vec::as_slice) {
			Some([column, Value::String(direction)]) => {
				let column = validate_optional_index("order", column)?.ok_or_else(|| {
					DataTablesError::invalid_argument("order", "expected a column index, got null")
				})?;
				Ok(OrderSpec::new(column, direction.parse()?))
			}
			_ => Err(DataTablesError::invalid_argument(
				"order",
				format!("expected [column, direction] pair, got {}", describe(item)),
			)),
		})
		.collect::<Result<Vec<_>>>()
		.map(Some)
}

fn parse_ajax(value: &Value) -> Result<Option<AjaxOptions>> {
	match value {
		Value::Null => Ok(None),
		Value::String(url) => Ok(Some(AjaxOptions::get(url.clone()))),
		Value::Object(map) => {
			let url = match map.get("url") {
				Some(Value::String(url)) => url.clone(),
				other => {
					return Err(DataTablesError::invalid_argument(
						"ajax.url",
						format!(
							"expected string, got {}",
							other.map(describe).unwrap_or_else(|| "nothing".to_string())
						),
					));
				}
			};
			let method = match map.get("type") {
				None | Some(Value::Null) => HttpMethod::Get,
				Some(Value::String(method)) => method.parse()?,
				Some(other) => {
					return Err(DataTablesError::invalid_argument(
						"ajax.type",
						format!("expected string, got {}", describe(other)),
					));
				}
			};
			Ok(Some(AjaxOptions { url, method }))
		}
		other => Err(DataTablesError::invalid_argument(
			"ajax",
			format!("expected URL string, mapping or null, got {}", describe(other)),
		)),
	}
}

fn parse_language(value: &Value) -> Result<Option<String>> {
	match value {
		Value::Null => Ok(None),
		Value::Object(map) => match map.get("url") {
			Some(Value::String(url)) if map.len() == 1 => Ok(Some(url.clone())),
			_ => Err(DataTablesError::invalid_argument(
				"language",
				"expected a mapping with a single \"url\" entry",
			)),
		},
		other => Err(DataTablesError::invalid_argument(
			"language",
			format!("expected mapping or null, got {}", describe(other)),
		)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_json_diff::assert_json_eq;
	use rstest::rstest;

	#[rstest]
	fn test_dirty_config_is_empty_by_default() {
		assert!(TableOptions::new().config(ConfigMode::Dirty).is_empty());
	}

	#[rstest]
	fn test_full_config_lists_every_option() {
		let config = TableOptions::new().config(ConfigMode::Full);
		assert_eq!(config.len(), TABLE_OPTIONS.len());
		assert!(config.values().all(Value::is_null));
	}

	#[rstest]
	fn test_flags() {
		let mut options = TableOptions::new();
		options.set_paging(false).set_state_save(true);
		options.apply_option("serverSide", &json!(true)).unwrap();
		assert!(options.apply_option("info", &json!("yes")).is_err());

		assert_eq!(options.paging(), Some(false));
		assert_eq!(options.server_side(), Some(true));
		assert_eq!(options.info(), None);
		assert_json_eq!(
			Value::Object(options.config(ConfigMode::Dirty)),
			json!({"paging": false, "serverSide": true, "stateSave": true})
		);
	}

	#[rstest]
	#[case(json!([10, 25, 50, -1]), true)]
	#[case(json!([10, 0]), false)]
	#[case(json!([10, -2]), false)]
	#[case(json!([10, 10]), false)]
	#[case(json!(["10"]), false)]
	#[case(json!(null), true)]
	fn test_length_menu(#[case] value: Value, #[case] accepted: bool) {
		let mut options = TableOptions::new();
		assert_eq!(options.apply_option("lengthMenu", &value).is_ok(), accepted);
		if !accepted {
			assert_eq!(options.length_menu(), None);
		}
	}

	#[rstest]
	fn test_page_length_must_be_positive() {
		let mut options = TableOptions::new();
		assert!(options.set_page_length(0).is_err());
		assert!(options.apply_option("pageLength", &json!(-5)).is_err());
		options.apply_option("pageLength", &json!(50)).unwrap();
		assert_eq!(options.page_length(), Some(50));
	}

	#[rstest]
	fn test_order() {
		let mut options = TableOptions::new();
		options
			.apply_option("order", &json!([[1, "desc"], [0, "asc"]]))
			.unwrap();
		assert_eq!(
			options.order(),
			Some(
				&[
					OrderSpec::new(1, OrderDirection::Desc),
					OrderSpec::new(0, OrderDirection::Asc)
				][..]
			)
		);
		assert_eq!(
			options.config(ConfigMode::Dirty)["order"],
			json!([[1, "desc"], [0, "asc"]])
		);
		assert!(options.apply_option("order", &json!([[1, "up"]])).is_err());
		assert!(options.apply_option("order", &json!([1])).is_err());
	}

	#[rstest]
	#[case("numbers")]
	#[case("simple_numbers")]
	#[case("first_last_numbers")]
	fn test_paging_type(#[case] name: &str) {
		let mut options = TableOptions::new();
		options.apply_option("pagingType", &json!(name)).unwrap();
		assert_eq!(options.paging_type().unwrap().as_str(), name);
	}

	#[rstest]
	fn test_ajax_forms() {
		let mut options = TableOptions::new();
		options.apply_option("ajax", &json!("/data")).unwrap();
		assert_eq!(options.ajax(), Some(&AjaxOptions::get("/data")));

		options
			.apply_option("ajax", &json!({"url": "/data", "type": "post"}))
			.unwrap();
		assert_eq!(options.ajax(), Some(&AjaxOptions::post("/data")));

		assert!(options.apply_option("ajax", &json!({"type": "GET"})).is_err());
		assert!(options.apply_option("ajax", &json!({"url": "/x", "type": "PUT"})).is_err());
		assert_eq!(options.ajax(), Some(&AjaxOptions::post("/data")));
	}

	#[rstest]
	fn test_language() {
		let mut options = TableOptions::new();
		options
			.apply_option("language", &json!({"url": "/i18n/fr.json"}))
			.unwrap();
		assert_eq!(
			options.config(ConfigMode::Dirty)["language"],
			json!({"url": "/i18n/fr.json"})
		);
		assert!(options.apply_option("language", &json!("fr")).is_err());
	}

	#[rstest]
	fn test_callbacks() {
		let mut options = TableOptions::new();
		options
			.apply_option("drawCallback", &json!("console.log(settings);"))
			.unwrap();
		assert_eq!(
			options.callback(CallbackKind::DrawCallback),
			Some(&CallbackSpec::body("console.log(settings);"))
		);
		assert!(
			options
				.set_callback(CallbackKind::CreatedCell, CallbackSpec::body("x"))
				.is_err()
		);
		assert!(options.apply_option("createdCell", &json!("x")).is_err());

		options.apply_option("drawCallback", &Value::Null).unwrap();
		assert!(options.callback(CallbackKind::DrawCallback).is_none());
	}

	#[rstest]
	fn test_apply_options_is_atomic() {
		let mut options = TableOptions::new();
		options.set_info(false);
		let before = options.clone();

		let mut raw = Map::new();
		raw.insert("paging".to_string(), json!(true));
		raw.insert("pageLength".to_string(), json!(0));
		assert!(options.apply_options(&raw).is_err());
		assert_eq!(options, before);
	}

	#[rstest]
	fn test_unknown_option() {
		let err = TableOptions::new()
			.apply_option("responsive", &json!(true))
			.unwrap_err();
		assert!(err.to_string().contains("unknown table option"));
	}
}
