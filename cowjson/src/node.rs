//! The tagged-union payload behind every [`Json`] handle.

use crate::JsonType;
use crate::map::JsonMap;
use crate::value::Json;

/// One JSON value of exactly one of the six kinds.
///
/// A node's tag never changes in place; retagging a value replaces the whole
/// payload through the COW choke point in [`Json`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Node {
	Null,
	Boolean(bool),
	Number(f64),
	String(String),
	Array(Vec<Json>),
	Object(JsonMap),
}

impl Node {
	pub(crate) fn kind(&self) -> JsonType {
		match self {
			Node::Null => JsonType::Null,
			Node::Boolean(_) => JsonType::Boolean,
			Node::Number(_) => JsonType::Number,
			Node::String(_) => JsonType::String,
			Node::Array(_) => JsonType::Array,
			Node::Object(_) => JsonType::Object,
		}
	}
}
