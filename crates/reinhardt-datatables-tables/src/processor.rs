//! Translation of server-side requests into query plans
//!
//! [`RequestProcessor`] checks a [`DataTablesRequest`] against the configured
//! [`Columns`] and produces a [`QueryPlan`]: paging, searching and ordering
//! expressed in terms of model fields and computed expressions. Executing
//! the plan is left to the caller's query layer.
//!
//! ## Column resolution
//!
//! Each submitted column is matched to a configured column by `name`; when
//! no name is sent, by `data`; otherwise by position. A name that matches no
//! configured column fails the request.
//!
//! ## Ordering
//!
//! Ordering a column whose `orderData` is set orders by the columns listed
//! there instead. Computed columns order by their expression; unbound
//! columns cannot be ordered.

use crate::columns::Columns;
use crate::request::{DataTablesRequest, SearchParams};
use regex::Regex;
use reinhardt_datatables_columns::{
	Column, ColumnSource, DataTablesError, OrderDirection, Result,
};
use serde::Serialize;

/// What a plan sorts by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum SortTarget {
	/// A (possibly dotted) model field.
	Field(String),
	/// An SQL expression of a computed column.
	Expression(String),
}

/// One ordering term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ordering {
	/// Name of the column that provides the term.
	pub column: String,
	/// What to sort by.
	pub target: SortTarget,
	/// Direction.
	pub direction: OrderDirection,
}

/// The global search box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalSearch {
	/// Search term.
	pub term: String,
	/// Whether `term` is a regular expression.
	pub regex: bool,
	/// Fields to match the term against, any of which may match.
	pub fields: Vec<String>,
}

/// A per-column search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnFilter {
	/// Column name.
	pub column: String,
	/// Field to filter on.
	pub field: String,
	/// Search term.
	pub term: String,
	/// Whether `term` is a regular expression.
	pub regex: bool,
}

/// Validated paging, searching and ordering for one draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryPlan {
	/// Draw counter to echo back.
	pub draw: u64,
	/// Rows to skip.
	pub offset: u64,
	/// Rows to return; `None` returns all.
	pub limit: Option<u64>,
	/// Global search, when a term was sent and a field can be searched.
	pub global_search: Option<GlobalSearch>,
	/// Per-column searches.
	pub column_filters: Vec<ColumnFilter>,
	/// Ordering terms, by priority.
	pub ordering: Vec<Ordering>,
}

impl QueryPlan {
	/// Returns `true` if the plan filters rows.
	pub fn is_filtered(&self) -> bool {
		self.global_search.is_some() || !self.column_filters.is_empty()
	}
}

/// Builds [`QueryPlan`]s for a set of columns.
#[derive(Debug, Clone, Copy)]
pub struct RequestProcessor<'a> {
	columns: &'a Columns,
	max_page_length: Option<u32>,
}

impl<'a> RequestProcessor<'a> {
	/// Creates a processor for `columns`.
	pub fn new(columns: &'a Columns) -> Self {
		Self {
			columns,
			max_page_length: None,
		}
	}

	/// Caps the number of rows a single request may ask for.
	pub fn with_max_page_length(mut self, max: Option<u32>) -> Self {
		self.max_page_length = max;
		self
	}

	/// Validates `request` and builds its plan.
	pub fn process(&self, request: &DataTablesRequest) -> Result<QueryPlan> {
		self.build(request).inspect_err(|err| {
			tracing::warn!(draw = request.draw, error = %err, "rejected server-side request");
		})
	}

	fn build(&self, request: &DataTablesRequest) -> Result<QueryPlan> {
		let resolved = self.resolve(request)?;
		let plan = QueryPlan {
			draw: request.draw,
			offset: request.start,
			limit: self.limit(request.length),
			global_search: self.global_search(request, &resolved)?,
			column_filters: self.column_filters(request, &resolved)?,
			ordering: self.ordering(request, &resolved)?,
		};

		tracing::debug!(
			draw = plan.draw,
			offset = plan.offset,
			limit = ?plan.limit,
			filters = plan.column_filters.len(),
			ordering = plan.ordering.len(),
			"built query plan"
		);
		Ok(plan)
	}

	fn resolve(&self, request: &DataTablesRequest) -> Result<Vec<&'a Column>> {
		if request.columns.is_empty() {
			return Ok(self.columns.iter().collect());
		}
		request
			.columns
			.iter()
			.enumerate()
			.map(|(position, params)| {
				if !params.name.is_empty() {
					return self
						.columns
						.get(&params.name)
						.ok_or_else(|| DataTablesError::UnknownColumn(params.name.clone()));
				}
				self.columns
					.get(&params.data)
					.or_else(|| self.columns.at(position))
					.ok_or_else(|| DataTablesError::UnknownColumn(format!("#{}", position)))
			})
			.collect()
	}

	fn limit(&self, length: i64) -> Option<u64> {
		let max = self.max_page_length.map(u64::from);
		match u64::try_from(length) {
			Ok(length) => Some(max.map_or(length, |max| length.min(max))),
			Err(_) => max,
		}
	}

	fn global_search(
		&self,
		request: &DataTablesRequest,
		resolved: &[&Column],
	) -> Result<Option<GlobalSearch>> {
		if !request.search.is_active() {
			return Ok(None);
		}
		check_pattern("search[value]", &request.search)?;

		let fields: Vec<String> = resolved
			.iter()
			.enumerate()
			.filter(|(position, column)| {
				let requested = request
					.columns
					.get(*position)
					.is_none_or(|params| params.searchable);
				requested && column.is_database_backed() && self.columns.is_searchable(column)
			})
			.map(|(_, column)| column.name().to_string())
			.collect();

		if fields.is_empty() {
			tracing::debug!("no searchable column for the global search");
			return Ok(None);
		}
		Ok(Some(GlobalSearch {
			term: request.search.value.clone(),
			regex: request.search.regex,
			fields,
		}))
	}

	fn column_filters(
		&self,
		request: &DataTablesRequest,
		resolved: &[&Column],
	) -> Result<Vec<ColumnFilter>> {
		let mut filters = Vec::new();
		for (params, column) in request.columns.iter().zip(resolved) {
			if !params.search.is_active() {
				continue;
			}
			if !column.is_database_backed() || !self.columns.is_searchable(column) {
				return Err(DataTablesError::InvalidRequest(format!(
					"column '{}' is not searchable",
					column.name()
				)));
			}
			check_pattern(column.name(), &params.search)?;
			filters.push(ColumnFilter {
				column: column.name().to_string(),
				field: column.name().to_string(),
				term: params.search.value.clone(),
				regex: params.search.regex,
			});
		}
		Ok(filters)
	}

	fn ordering(&self, request: &DataTablesRequest, resolved: &[&Column]) -> Result<Vec<Ordering>> {
		let mut ordering: Vec<Ordering> = Vec::new();
		for entry in &request.order {
			let column = resolved.get(entry.column).ok_or_else(|| {
				DataTablesError::InvalidRequest(format!("no column at index {}", entry.column))
			})?;
			if !self.columns.is_orderable(column) {
				return Err(DataTablesError::InvalidRequest(format!(
					"column '{}' is not orderable",
					column.name()
				)));
			}

			let participants: Vec<&Column> = match column.order_data() {
				Some(order_data) => order_data
					.indexes()
					.into_iter()
					.map(|index| {
						self.columns.at(index as usize).ok_or_else(|| {
							DataTablesError::InvalidRequest(format!(
								"column '{}' orders by missing column {}",
								column.name(),
								index
							))
						})
					})
					.collect::<Result<_>>()?,
				None => vec![*column],
			};

			for participant in participants {
				let target = sort_target(participant)?;
				if ordering.iter().any(|existing| existing.target == target) {
					continue;
				}
				ordering.push(Ordering {
					column: participant.name().to_string(),
					target,
					direction: entry.direction,
				});
			}
		}
		Ok(ordering)
	}
}

fn sort_target(column: &Column) -> Result<SortTarget> {
	match column.source() {
		ColumnSource::Field { .. } | ColumnSource::Association { .. } => {
			Ok(SortTarget::Field(column.name().to_string()))
		}
		ColumnSource::Computed(expression) => Ok(SortTarget::Expression(expression.sql().to_string())),
		ColumnSource::Unbound => Err(DataTablesError::InvalidRequest(format!(
			"column '{}' has no data to order by",
			column.name()
		))),
	}
}

fn check_pattern(field: &str, search: &SearchParams) -> Result<()> {
	if !search.regex {
		return Ok(());
	}
	Regex::new(&search.value).map(|_| ()).map_err(|e| {
		DataTablesError::InvalidRequest(format!("{} is not a valid regular expression: {}", field, e))
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use reinhardt_datatables_columns::{ComputedExpression, OrderData};
	use rstest::{fixture, rstest};

	#[fixture]
	fn columns() -> Columns {
		let mut columns = Columns::new();
		columns.add_field("id").unwrap();
		columns.add_field("author.name").unwrap();
		columns
			.add_computed("full_name", ComputedExpression::new("first || ' ' || last"))
			.unwrap();
		columns.add_unbound("actions").unwrap().set_orderable(false);
		columns.add_field("secret").unwrap().set_searchable(false);
		columns
	}

	fn request(raw: &[(&str, &str)]) -> DataTablesRequest {
		DataTablesRequest::from_pairs(raw.iter().copied()).unwrap()
	}

	#[rstest]
	fn test_paging(columns: Columns) {
		let processor = RequestProcessor::new(&columns);
		let plan = processor
			.process(&request(&[("draw", "3"), ("start", "40"), ("length", "20")]))
			.unwrap();
		assert_eq!(plan.draw, 3);
		assert_eq!(plan.offset, 40);
		assert_eq!(plan.limit, Some(20));

		let all = processor.process(&request(&[("length", "-1")])).unwrap();
		assert_eq!(all.limit, None);
	}

	#[rstest]
	fn test_max_page_length_caps_limit(columns: Columns) {
		let processor = RequestProcessor::new(&columns).with_max_page_length(Some(100));
		assert_eq!(
			processor.process(&request(&[("length", "500")])).unwrap().limit,
			Some(100)
		);
		assert_eq!(
			processor.process(&request(&[("length", "-1")])).unwrap().limit,
			Some(100)
		);
	}

	#[rstest]
	fn test_global_search_skips_unsearchable_columns(columns: Columns) {
		let plan = RequestProcessor::new(&columns)
			.process(&request(&[("search[value]", "ann")]))
			.unwrap();
		let search = plan.global_search.unwrap();
		assert_eq!(search.term, "ann");
		assert_eq!(search.fields, vec!["id".to_string(), "author.name".to_string()]);
	}

	#[rstest]
	fn test_column_filter_on_unbound_column_is_rejected(columns: Columns) {
		let err = RequestProcessor::new(&columns)
			.process(&request(&[
				("columns[0][name]", "actions"),
				("columns[0][search][value]", "x"),
			]))
			.unwrap_err();
		assert!(err.to_string().contains("not searchable"));
	}

	#[rstest]
	fn test_column_filter(columns: Columns) {
		let plan = RequestProcessor::new(&columns)
			.process(&request(&[
				("columns[0][name]", "author.name"),
				("columns[0][search][value]", "^A"),
				("columns[0][search][regex]", "true"),
			]))
			.unwrap();
		assert_eq!(
			plan.column_filters,
			vec![ColumnFilter {
				column: "author.name".to_string(),
				field: "author.name".to_string(),
				term: "^A".to_string(),
				regex: true,
			}]
		);
		assert!(plan.is_filtered());
	}

	#[rstest]
	fn test_invalid_regex_is_rejected(columns: Columns) {
		let err = RequestProcessor::new(&columns)
			.process(&request(&[("search[value]", "(unclosed"), ("search[regex]", "true")]))
			.unwrap_err();
		assert!(matches!(err, DataTablesError::InvalidRequest(_)));
	}

	#[rstest]
	fn test_ordering_targets(columns: Columns) {
		let plan = RequestProcessor::new(&columns)
			.process(&request(&[
				("columns[0][name]", "full_name"),
				("columns[1][name]", "author.name"),
				("order[0][column]", "0"),
				("order[0][dir]", "desc"),
				("order[1][column]", "1"),
			]))
			.unwrap();
		assert_eq!(
			plan.ordering,
			vec![
				Ordering {
					column: "full_name".to_string(),
					target: SortTarget::Expression("first || ' ' || last".to_string()),
					direction: OrderDirection::Desc,
				},
				Ordering {
					column: "author.name".to_string(),
					target: SortTarget::Field("author.name".to_string()),
					direction: OrderDirection::Asc,
				},
			]
		);
	}

	#[rstest]
	fn test_non_orderable_column_is_rejected(columns: Columns) {
		let err = RequestProcessor::new(&columns)
			.process(&request(&[("columns[0][name]", "actions"), ("order[0][column]", "0")]))
			.unwrap_err();
		assert!(err.to_string().contains("not orderable"));
	}

	#[rstest]
	fn test_order_data_expands(mut columns: Columns) {
		columns
			.get_mut("author.name")
			.unwrap()
			.set_order_data(OrderData::columns([1, 0]));
		let plan = RequestProcessor::new(&columns)
			.process(&request(&[("columns[0][name]", "author.name"), ("order[0][column]", "0")]))
			.unwrap();
		let targets: Vec<_> = plan.ordering.iter().map(|o| o.target.clone()).collect();
		assert_eq!(
			targets,
			vec![
				SortTarget::Field("author.name".to_string()),
				SortTarget::Field("id".to_string())
			]
		);
	}

	#[rstest]
	fn test_unknown_column_name(columns: Columns) {
		let err = RequestProcessor::new(&columns)
			.process(&request(&[("columns[0][name]", "nope")]))
			.unwrap_err();
		assert!(matches!(err, DataTablesError::UnknownColumn(name) if name == "nope"));
	}

	#[rstest]
	fn test_positional_resolution(columns: Columns) {
		let plan = RequestProcessor::new(&columns)
			.process(&request(&[
				("columns[0][data]", "0"),
				("columns[1][data]", "1"),
				("order[0][column]", "1"),
			]))
			.unwrap();
		assert_eq!(plan.ordering[0].column, "author.name");
	}
}
