//! Table property-based tests
//!
//! Property-based tests for request parsing, query planning and rendering.

use proptest::prelude::*;
use reinhardt_datatables_columns::DataTablesError;
use reinhardt_datatables_tables::{DataTable, DataTablesRequest, SortTarget, ViewHelper};

// ============================================================================
// Property-Based Tests: DataTablesRequest
// ============================================================================

proptest! {
	/// Test: negative start is rejected
	///
	/// Category: Property
	/// Verifies that any negative `start` fails as an invalid request.
	#[test]
	fn prop_negative_start_rejected(start in i64::MIN..0) {
		let result = DataTablesRequest::from_pairs([("start", start.to_string())]);
		prop_assert!(matches!(result, Err(DataTablesError::InvalidRequest(_))));
	}

	/// Test: unknown order directions are rejected
	///
	/// Category: Property
	/// Verifies that directions other than asc/desc fail.
	#[test]
	fn prop_unknown_direction_rejected(dir in "[a-z]{1,8}") {
		prop_assume!(dir != "asc" && dir != "desc");
		let result = DataTablesRequest::from_pairs([
			("columns[0][name]", "a".to_string()),
			("order[0][column]", "0".to_string()),
			("order[0][dir]", dir),
		]);
		prop_assert!(matches!(result, Err(DataTablesError::InvalidRequest(_))));
	}

	/// Test: paging values are carried through
	///
	/// Category: Property
	/// Verifies that valid start/length pairs parse unchanged.
	#[test]
	fn prop_paging_parsed(start in 0u32..100_000, length in 1i64..1000) {
		let request = DataTablesRequest::from_pairs([
			("start", start.to_string()),
			("length", length.to_string()),
		])
		.unwrap();
		prop_assert_eq!(request.start, u64::from(start));
		prop_assert_eq!(request.length, length);
	}
}

// ============================================================================
// Property-Based Tests: RequestProcessor
// ============================================================================

fn table_with_flags(flags: &[(bool, bool)]) -> DataTable {
	let mut table = DataTable::new("items").unwrap();
	for (i, (orderable, searchable)) in flags.iter().enumerate() {
		table
			.columns_mut()
			.add_field(format!("field_{}", i).as_str())
			.unwrap()
			.set_orderable(*orderable)
			.set_searchable(*searchable);
	}
	table.columns_mut().add_unbound("actions").unwrap();
	table
}

proptest! {
	/// Test: ordering respects orderable flags
	///
	/// Category: Property
	/// Verifies that a plan never orders by a non-orderable or unbound column,
	/// and that requests asking for one are rejected.
	#[test]
	fn prop_never_orders_non_orderable(
		flags in prop::collection::vec((any::<bool>(), any::<bool>()), 1..6),
		pick in 0usize..8,
	) {
		let table = table_with_flags(&flags);
		let count = table.columns().len();
		let target = pick % count;
		let request = DataTablesRequest::from_pairs(
			(0..count)
				.map(|i| (format!("columns[{}][data]", i), i.to_string()))
				.chain([
					("order[0][column]".to_string(), target.to_string()),
					("order[0][dir]".to_string(), "desc".to_string()),
				]),
		)
		.unwrap();

		let orderable = flags.get(target).is_some_and(|(orderable, _)| *orderable);
		match table.process(&request) {
			Ok(plan) => {
				prop_assert!(orderable);
				prop_assert_eq!(plan.ordering.len(), 1);
				prop_assert_eq!(
					&plan.ordering[0].target,
					&SortTarget::Field(format!("field_{}", target))
				);
			}
			Err(_) => prop_assert!(!orderable || target == flags.len()),
		}
	}

	/// Test: global search only covers searchable database columns
	///
	/// Category: Property
	/// Verifies that the unbound column and non-searchable columns are
	/// never part of the global search.
	#[test]
	fn prop_global_search_fields(
		flags in prop::collection::vec((any::<bool>(), any::<bool>()), 1..6),
		term in "[a-z]{1,10}",
	) {
		let table = table_with_flags(&flags);
		let plan = DataTablesRequest::from_pairs([("search[value]", term.clone())])
			.and_then(|request| table.process(&request))
			.unwrap();

		let expected: Vec<String> = flags
			.iter()
			.enumerate()
			.filter(|(_, (_, searchable))| *searchable)
			.map(|(i, _)| format!("field_{}", i))
			.collect();
		match plan.global_search {
			Some(search) => {
				prop_assert_eq!(search.term, term);
				prop_assert_eq!(search.fields, expected);
			}
			None => prop_assert!(expected.is_empty()),
		}
	}
}

// ============================================================================
// Property-Based Tests: ViewHelper
// ============================================================================

proptest! {
	/// Test: rendered titles are escaped
	///
	/// Category: Property
	/// Verifies that no raw markup from a title reaches the table skeleton.
	#[test]
	fn prop_titles_escaped(title in "[a-z<>&\"' ]{1,20}") {
		let mut table = DataTable::new("items").unwrap();
		table.columns_mut().add_unbound("c").unwrap().set_title(title.as_str());
		let html = ViewHelper::new().render_table(&table).unwrap();

		let start = html.find("<th>").unwrap() + "<th>".len();
		let end = html.find("</th>").unwrap();
		let cell = &html[start..end];
		prop_assert!(!cell.contains('<'));
		prop_assert!(!cell.contains('>'));
		prop_assert!(!cell.contains('"'));
	}
}
