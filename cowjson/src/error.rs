//! Error taxonomy of the value engine and the `JsonType` tag enum.

use std::fmt::{self, Display};
use thiserror::Error;

/// The six kinds of JSON value a node can hold.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum JsonType {
	Null,
	Boolean,
	Number,
	String,
	Array,
	Object,
}

impl Display for JsonType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			JsonType::Null => "null",
			JsonType::Boolean => "boolean",
			JsonType::Number => "number",
			JsonType::String => "string",
			JsonType::Array => "array",
			JsonType::Object => "object",
		})
	}
}

/// Errors raised by the value engine.
///
/// All errors are raised synchronously at the point of violation; nothing in
/// this crate retries. [`Json::try_get`](crate::Json::try_get) is the one
/// operation that recovers locally, converting [`JsonError::Type`] and
/// [`JsonError::Taken`] into an empty result.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum JsonError {
	/// A typed accessor was used against a node of a different tag.
	#[error("expected a {expected}, found a {actual}")]
	Type { expected: JsonType, actual: JsonType },

	/// Malformed input text, reported with the position of the first violation.
	#[error("{message} at line {line}, column {column}")]
	Parse {
		message: String,
		line: usize,
		column: usize,
	},

	/// A structural array/object operation was called on the wrong tag.
	#[error("{op} called on a {actual}")]
	InvalidOperation { op: &'static str, actual: JsonType },

	/// Array index access past the end.
	#[error("index {index} out of bounds for array of length {len}")]
	OutOfBounds { index: usize, len: usize },

	/// Object read access for a key that is not present.
	#[error("key {key:?} not found")]
	KeyNotFound { key: String },

	/// `pop` on an empty array.
	#[error("cannot pop from an empty array")]
	EmptyPop,

	/// Content access on a value whose record was moved out with `take`.
	#[error("value content has been taken")]
	Taken,

	/// The serializer re-entered a record that is already on its path.
	#[error("circular reference detected during serialization")]
	CircularReference,
}

impl JsonError {
	/// Line of a parse failure, if this is a [`JsonError::Parse`].
	#[must_use]
	pub fn line(&self) -> Option<usize> {
		match self {
			JsonError::Parse { line, .. } => Some(*line),
			_ => None,
		}
	}

	/// Column of a parse failure, if this is a [`JsonError::Parse`].
	#[must_use]
	pub fn column(&self) -> Option<usize> {
		match self {
			JsonError::Parse { column, .. } => Some(*column),
			_ => None,
		}
	}
}
