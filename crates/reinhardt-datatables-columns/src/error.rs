//! Error types shared by the DataTables crates

use thiserror::Error;

/// Errors raised while building, validating, or rendering DataTables configuration.
#[derive(Debug, Error)]
pub enum DataTablesError {
	/// A value was rejected by a setter or validator.
	#[error("Invalid argument for '{field}': {message}")]
	InvalidArgument {
		/// Option or parameter that failed validation.
		field: String,
		/// Expected vs. actual description.
		message: String,
	},

	/// A column with the same name is already registered.
	#[error("Column '{0}' is already defined")]
	DuplicateColumn(String),

	/// No column with the given name is registered.
	#[error("Column '{0}' is not defined")]
	UnknownColumn(String),

	/// A server-side processing request could not be interpreted.
	#[error("Invalid request: {0}")]
	InvalidRequest(String),

	/// Template registration or rendering failed.
	#[error("Template error: {0}")]
	Template(String),

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// Settings could not be read or applied.
	#[error("Settings error: {0}")]
	Settings(String),
}

impl DataTablesError {
	/// Shorthand for [`DataTablesError::InvalidArgument`].
	pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidArgument {
			field: field.into(),
			message: message.into(),
		}
	}

	/// Returns `true` for [`DataTablesError::InvalidArgument`].
	pub fn is_invalid_argument(&self) -> bool {
		matches!(self, Self::InvalidArgument { .. })
	}
}

impl From<tera::Error> for DataTablesError {
	fn from(err: tera::Error) -> Self {
		// tera nests the useful part of the message in its source chain
		let mut message = err.to_string();
		let mut source = std::error::Error::source(&err);
		while let Some(inner) = source {
			message.push_str(": ");
			message.push_str(&inner.to_string());
			source = inner.source();
		}
		Self::Template(message)
	}
}

/// Result type alias for DataTables operations.
pub type Result<T> = std::result::Result<T, DataTablesError>;
