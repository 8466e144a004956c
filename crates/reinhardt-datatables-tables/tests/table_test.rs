use assert_json_diff::assert_json_eq;
use reinhardt_datatables_columns::{
	ConfigMode, DisplayType, OrderDirection, SchemaSource, StaticSchema,
};
use reinhardt_datatables_tables::{
	DataTable, DataTablesRequest, DataTablesResponse, DataTablesSettings, QueryPlan, SortTarget,
	ViewHelper,
};
use rstest::*;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Debug, Clone)]
struct Book {
	id: i64,
	title: &'static str,
	author: &'static str,
	published: &'static str,
}

#[fixture]
fn books() -> Vec<Book> {
	vec![
		Book {
			id: 1,
			title: "The Rust Programming Language",
			author: "Klabnik",
			published: "2018-06-26",
		},
		Book {
			id: 2,
			title: "Programming Rust",
			author: "Blandy",
			published: "2017-12-21",
		},
		Book {
			id: 3,
			title: "Rust for Rustaceans",
			author: "Gjengset",
			published: "2021-12-14",
		},
		Book {
			id: 4,
			title: "Zero To Production",
			author: "Palmieri",
			published: "2022-02-01",
		},
	]
}

#[fixture]
fn schema() -> Arc<dyn SchemaSource> {
	Arc::new(
		StaticSchema::from_json(json!({
			"id": {"type": "integer"},
			"title": {"type": "string", "length": 255},
			"author.name": {"type": "string", "length": 100},
			"published": {"type": "date", "null": true}
		}))
		.unwrap(),
	)
}

#[fixture]
fn table(schema: Arc<dyn SchemaSource>) -> DataTable {
	let mut table = DataTable::with_schema("books", schema).unwrap();
	table.options_mut().set_server_side(true);
	let columns = table.columns_mut();
	columns.add_field("id").unwrap().set_searchable(false);
	columns.add_field("title").unwrap();
	columns.add_field("author.name").unwrap();
	columns.add_field("published").unwrap();
	columns.add_unbound("actions").unwrap().set_orderable(false).set_searchable(false);
	table
}

fn cell(book: &Book, column: &str) -> String {
	match column {
		"id" => book.id.to_string(),
		"title" => book.title.to_string(),
		"author.name" => book.author.to_string(),
		"published" => book.published.to_string(),
		_ => String::new(),
	}
}

/// Applies a plan to in-memory rows the way a query layer would.
fn execute(plan: &QueryPlan, rows: &[Book]) -> (u64, Vec<Book>) {
	let mut matched: Vec<Book> = rows
		.iter()
		.filter(|book| {
			plan.global_search.as_ref().is_none_or(|search| {
				search
					.fields
					.iter()
					.any(|field| cell(book, field).to_lowercase().contains(&search.term.to_lowercase()))
			})
		})
		.filter(|book| {
			plan.column_filters
				.iter()
				.all(|filter| cell(book, &filter.field).contains(&filter.term))
		})
		.cloned()
		.collect();

	for ordering in plan.ordering.iter().rev() {
		let SortTarget::Field(field) = &ordering.target else {
			continue;
		};
		matched.sort_by(|a, b| {
			let order = if field == "id" {
				a.id.cmp(&b.id)
			} else {
				cell(a, field).cmp(&cell(b, field))
			};
			match ordering.direction {
				OrderDirection::Asc => order,
				OrderDirection::Desc => order.reverse(),
			}
		});
	}

	let filtered = matched.len() as u64;
	let page = matched
		.into_iter()
		.skip(plan.offset as usize)
		.take(plan.limit.map_or(usize::MAX, |limit| limit as usize))
		.collect();
	(filtered, page)
}

#[rstest]
fn test_inferred_types_in_config(table: DataTable) {
	let columns = table.columns();
	assert_eq!(columns.get("id").unwrap().display_type(), Some(DisplayType::Num));
	assert_eq!(columns.get("published").unwrap().display_type(), Some(DisplayType::Date));
	assert_eq!(columns.get("actions").unwrap().display_type(), None);

	assert_json_eq!(
		Value::Object(table.config(ConfigMode::Dirty).unwrap()),
		json!({
			"serverSide": true,
			"columns": [
				{"name": "id", "title": "Id", "type": "num", "searchable": false},
				{"name": "title", "title": "Title", "type": "string"},
				{"name": "author.name", "title": "Name", "type": "string"},
				{"name": "published", "title": "Published", "type": "date"},
				{"name": "actions", "title": "Actions", "orderable": false, "searchable": false}
			]
		})
	);
}

#[rstest]
fn test_server_side_round_trip(table: DataTable, books: Vec<Book>) {
	let request = DataTablesRequest::from_pairs([
		("draw", "5"),
		("start", "0"),
		("length", "2"),
		("search[value]", "rust"),
		("columns[0][name]", "id"),
		("columns[1][name]", "title"),
		("columns[2][name]", "author.name"),
		("order[0][column]", "2"),
		("order[0][dir]", "desc"),
	])
	.unwrap();

	let plan = table.process(&request).unwrap();
	assert_eq!(
		plan.global_search.as_ref().unwrap().fields,
		vec!["title", "author.name"]
	);

	let (filtered, page) = execute(&plan, &books);
	assert_eq!(filtered, 3);
	let rows: Vec<Value> = page
		.iter()
		.map(|book| json!([book.id, book.title, book.author]))
		.collect();
	let response = DataTablesResponse::for_plan(&plan, books.len() as u64, filtered, rows);

	assert_json_eq!(
		response.to_json().unwrap(),
		json!({
			"draw": 5,
			"recordsTotal": 4,
			"recordsFiltered": 3,
			"data": [
				[1, "The Rust Programming Language", "Klabnik"],
				[3, "Rust for Rustaceans", "Gjengset"]
			]
		})
	);
}

#[rstest]
fn test_rejected_request_becomes_error_response(table: DataTable) {
	let request = DataTablesRequest::from_pairs([
		("draw", "8"),
		("columns[0][name]", "actions"),
		("order[0][column]", "0"),
	])
	.unwrap();
	let err = table.process(&request).unwrap_err();
	let response = DataTablesResponse::<Value>::error(request.draw, err.to_string());

	let body = response.to_json().unwrap();
	assert_eq!(body["draw"], 8);
	assert_eq!(body["data"], json!([]));
	assert!(body["error"].as_str().unwrap().contains("not orderable"));
}

#[rstest]
fn test_settings_and_rendering(mut table: DataTable) {
	let settings = DataTablesSettings::from_toml_str(
		r#"
max_page_length = 50

[table]
pageLength = 25
ajax = { url = "/books/data/", type = "POST" }

[default_column]
className = "dt-body-left"

[assets]
js = ["/static/datatables.min.js"]
"#,
	)
	.unwrap();
	settings.apply_to(&mut table).unwrap();

	let helper = ViewHelper::new().with_settings(settings).unwrap();
	let page = format!(
		"{}\n{}",
		helper.render_assets().unwrap(),
		helper.render(&table).unwrap()
	);

	assert!(page.contains("<script src=\"&#x2F;static&#x2F;datatables.min.js\"></script>"));
	assert!(page.contains("<table id=\"books\" class=\"display\">"));
	assert_eq!(page.matches("<th>").count(), 5);
	assert!(page.contains("\"pageLength\": 25"));
	assert!(page.contains("\"targets\": \"_all\""));

	let plan = table.process_query("length=-1").unwrap();
	assert_eq!(plan.limit, Some(50));
}
