//! Server-side processing request parameters
//!
//! The widget sends its state as flat, bracket-indexed query parameters:
//!
//! ```text
//! draw=3&start=20&length=10
//! &search[value]=smith&search[regex]=false
//! &order[0][column]=1&order[0][dir]=desc
//! &columns[0][data]=0&columns[0][name]=id&columns[0][searchable]=true
//! &columns[0][orderable]=true&columns[0][search][value]=&columns[0][search][regex]=false
//! ```
//!
//! [`DataTablesRequest`] parses them into typed values. Keys it does not
//! recognise (such as the `_` cache buster) are ignored.

use reinhardt_datatables_columns::{DataTablesError, OrderDirection, Result};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Page length assumed when the request does not send `length`.
pub const DEFAULT_PAGE_LENGTH: i64 = 10;

/// A search term and whether it is a regular expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
	/// Search term; empty means no search.
	pub value: String,
	/// Whether `value` is a regular expression.
	pub regex: bool,
}

impl SearchParams {
	/// Returns `true` when there is something to search for.
	pub fn is_active(&self) -> bool {
		!self.value.is_empty()
	}
}

/// One `order[i]` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderParams {
	/// Index into the submitted columns.
	pub column: usize,
	/// Sort direction.
	pub direction: OrderDirection,
	/// Column name, sent by newer widget versions.
	pub name: Option<String>,
}

/// One `columns[i]` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnParams {
	/// `columns[i][data]`
	pub data: String,
	/// `columns[i][name]`
	pub name: String,
	/// `columns[i][searchable]`
	pub searchable: bool,
	/// `columns[i][orderable]`
	pub orderable: bool,
	/// `columns[i][search]`
	pub search: SearchParams,
}

impl Default for ColumnParams {
	fn default() -> Self {
		Self {
			data: String::new(),
			name: String::new(),
			searchable: true,
			orderable: true,
			search: SearchParams::default(),
		}
	}
}

/// A parsed server-side processing request.
///
/// ```
/// use reinhardt_datatables_tables::DataTablesRequest;
///
/// let request = DataTablesRequest::from_query(
///     "draw=2&start=10&length=5&order%5B0%5D%5Bcolumn%5D=0&order%5B0%5D%5Bdir%5D=desc\
///      &columns%5B0%5D%5Bname%5D=title",
/// )
/// .unwrap();
/// assert_eq!(request.draw, 2);
/// assert_eq!(request.start, 10);
/// assert_eq!(request.columns[0].name, "title");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTablesRequest {
	/// Draw counter, echoed back in the response.
	pub draw: u64,
	/// Index of the first row.
	pub start: u64,
	/// Rows per page; `-1` means all rows.
	pub length: i64,
	/// Global search.
	pub search: SearchParams,
	/// Requested ordering, by priority.
	pub order: Vec<OrderParams>,
	/// Submitted column descriptions, in display order.
	pub columns: Vec<ColumnParams>,
}

impl Default for DataTablesRequest {
	fn default() -> Self {
		Self {
			draw: 0,
			start: 0,
			length: DEFAULT_PAGE_LENGTH,
			search: SearchParams::default(),
			order: Vec::new(),
			columns: Vec::new(),
		}
	}
}

#[derive(Default)]
struct PartialOrder {
	column: Option<usize>,
	direction: Option<OrderDirection>,
	name: Option<String>,
}

impl DataTablesRequest {
	/// Parses a URL-encoded query string or form body.
	pub fn from_query(query: &str) -> Result<Self> {
		let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
			.map_err(|e| DataTablesError::InvalidRequest(format!("malformed query string: {}", e)))?;
		Self::from_pairs(pairs)
	}

	/// Parses already-decoded key/value pairs.
	pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let mut request = Self::default();
		let mut orders: BTreeMap<usize, PartialOrder> = BTreeMap::new();
		let mut columns: BTreeMap<usize, ColumnParams> = BTreeMap::new();

		for (key, value) in pairs {
			let (key, value) = (key.as_ref(), value.as_ref());
			let Some((base, segments)) = split_key(key) else {
				tracing::debug!(key, "ignoring malformed request key");
				continue;
			};

			match (base, segments.as_slice()) {
				("draw", []) => request.draw = parse_number(key, value)?,
				("start", []) => {
					let start: i64 = parse_number(key, value)?;
					request.start = u64::try_from(start).map_err(|_| {
						DataTablesError::InvalidRequest(format!(
							"start must not be negative, got {}",
							start
						))
					})?;
				}
				("length", []) => {
					let length: i64 = parse_number(key, value)?;
					if length == 0 || length < -1 {
						return Err(DataTablesError::InvalidRequest(format!(
							"length must be positive or -1, got {}",
							length
						)));
					}
					request.length = length;
				}
				("search", ["value"]) => request.search.value = value.to_string(),
				("search", ["regex"]) => request.search.regex = parse_bool(key, value)?,
				("order", [index, field]) => {
					let entry = orders.entry(parse_number(key, index)?).or_default();
					match *field {
						"column" => entry.column = Some(parse_number(key, value)?),
						"dir" => {
							entry.direction = Some(OrderDirection::from_str(value).map_err(|_| {
								DataTablesError::InvalidRequest(format!(
									"{} must be \"asc\" or \"desc\", got {:?}",
									key, value
								))
							})?)
						}
						"name" => entry.name = Some(value.to_string()),
						_ => {}
					}
				}
				("columns", [index, rest @ ..]) => {
					let column = columns.entry(parse_number(key, index)?).or_default();
					match rest {
						["data"] => column.data = value.to_string(),
						["name"] => column.name = value.to_string(),
						["searchable"] => column.searchable = parse_bool(key, value)?,
						["orderable"] => column.orderable = parse_bool(key, value)?,
						["search", "value"] => column.search.value = value.to_string(),
						["search", "regex"] => column.search.regex = parse_bool(key, value)?,
						_ => {}
					}
				}
				_ => {}
			}
		}

		request.columns = contiguous("columns", columns)?;
		request.order = contiguous("order", orders)?
			.into_iter()
			.enumerate()
			.map(|(i, entry)| {
				let column = entry.column.ok_or_else(|| {
					DataTablesError::InvalidRequest(format!("order[{}][column] is missing", i))
				})?;
				Ok(OrderParams {
					column,
					direction: entry.direction.unwrap_or(OrderDirection::Asc),
					name: entry.name.filter(|name| !name.is_empty()),
				})
			})
			.collect::<Result<Vec<_>>>()?;

		if let Some(entry) = request
			.order
			.iter()
			.find(|entry| entry.column >= request.columns.len())
		{
			return Err(DataTablesError::InvalidRequest(format!(
				"order refers to column {} but {} column(s) were submitted",
				entry.column,
				request.columns.len()
			)));
		}

		Ok(request)
	}
}

/// Splits `order[0][dir]` into `("order", ["0", "dir"])`.
fn split_key(key: &str) -> Option<(&str, Vec<&str>)> {
	let (base, mut rest) = match key.find('[') {
		Some(position) => key.split_at(position),
		None => return Some((key, Vec::new())),
	};
	let mut segments = Vec::new();
	while !rest.is_empty() {
		let inner = rest.strip_prefix('[')?;
		let end = inner.find(']')?;
		segments.push(&inner[..end]);
		rest = &inner[end + 1..];
	}
	Some((base, segments))
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T> {
	value.trim().parse().map_err(|_| {
		DataTablesError::InvalidRequest(format!("{} must be an integer, got {:?}", key, value))
	})
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
	match value {
		"true" => Ok(true),
		"false" => Ok(false),
		other => Err(DataTablesError::InvalidRequest(format!(
			"{} must be \"true\" or \"false\", got {:?}",
			key, other
		))),
	}
}

fn contiguous<T>(what: &str, entries: BTreeMap<usize, T>) -> Result<Vec<T>> {
	entries
		.into_iter()
		.enumerate()
		.map(|(expected, (index, entry))| {
			if index == expected {
				Ok(entry)
			} else {
				Err(DataTablesError::InvalidRequest(format!(
					"{}[{}] is missing",
					what, expected
				)))
			}
		})
		.collect()
}
