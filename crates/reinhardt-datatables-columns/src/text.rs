//! Text helpers for deriving column titles

/// Converts a field identifier into a human-readable label.
///
/// Underscores, hyphens and camel-case boundaries become word breaks, and
/// every word is capitalized.
///
/// # Examples
///
/// ```
/// use reinhardt_datatables_columns::text::humanize;
///
/// assert_eq!(humanize("created_at"), "Created At");
/// assert_eq!(humanize("firstName"), "First Name");
/// assert_eq!(humanize("HTTPServer"), "Http Server");
/// ```
pub fn humanize(identifier: &str) -> String {
	split_words(identifier)
		.iter()
		.map(|word| capitalize(word))
		.collect::<Vec<_>>()
		.join(" ")
}

/// Returns the segment after the last `.`, or the whole string.
pub fn last_segment(name: &str) -> &str {
	name.rsplit('.').next().unwrap_or(name)
}

fn split_words(identifier: &str) -> Vec<String> {
	let chars: Vec<char> = identifier.chars().collect();
	let mut words = Vec::new();
	let mut current = String::new();

	for (i, &c) in chars.iter().enumerate() {
		if matches!(c, '_' | '-' | ' ') {
			if !current.is_empty() {
				words.push(std::mem::take(&mut current));
			}
			continue;
		}

		if c.is_uppercase() && !current.is_empty() {
			let prev = chars[i - 1];
			let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
			// "fooBar" and the "S" of "HTTPServer" both start a new word
			if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
			{
				words.push(std::mem::take(&mut current));
			}
		}

		current.push(c);
	}

	if !current.is_empty() {
		words.push(current);
	}
	words
}

fn capitalize(word: &str) -> String {
	let mut chars = word.chars();
	match chars.next() {
		Some(first) => first
			.to_uppercase()
			.chain(chars.flat_map(char::to_lowercase))
			.collect(),
		None => String::new(),
	}
}
