//! Server-side processing response

use crate::processor::QueryPlan;
use reinhardt_datatables_columns::Result;
use serde::Serialize;
use serde_json::Value;

/// Body returned to the widget for one draw.
///
/// ```
/// use reinhardt_datatables_tables::DataTablesResponse;
/// use serde_json::json;
///
/// let response = DataTablesResponse::new(7, 120, 3, vec![json!(["a", "b"])]);
/// assert_eq!(
///     response.to_json().unwrap(),
///     json!({"draw": 7, "recordsTotal": 120, "recordsFiltered": 3, "data": [["a", "b"]]})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTablesResponse<T> {
	/// Draw counter from the request.
	pub draw: u64,
	/// Rows before filtering.
	pub records_total: u64,
	/// Rows after filtering.
	pub records_filtered: u64,
	/// Rows of the current page.
	pub data: Vec<T>,
	/// Error shown by the widget instead of the data.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

impl<T> DataTablesResponse<T> {
	/// Creates a successful response.
	pub fn new(draw: u64, records_total: u64, records_filtered: u64, data: Vec<T>) -> Self {
		Self {
			draw,
			records_total,
			records_filtered,
			data,
			error: None,
		}
	}

	/// Creates a response for `plan`, taking the draw counter from it.
	pub fn for_plan(plan: &QueryPlan, records_total: u64, records_filtered: u64, data: Vec<T>) -> Self {
		Self::new(plan.draw, records_total, records_filtered, data)
	}

	/// Creates an error response with no rows.
	pub fn error(draw: u64, message: impl Into<String>) -> Self {
		Self {
			draw,
			records_total: 0,
			records_filtered: 0,
			data: Vec::new(),
			error: Some(message.into()),
		}
	}
}

impl<T: Serialize> DataTablesResponse<T> {
	/// Serializes the response body.
	pub fn to_json(&self) -> Result<Value> {
		Ok(serde_json::to_value(self)?)
	}
}
