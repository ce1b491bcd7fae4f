//! The [`Json`] handle and its accessor and mutation surface.
//!
//! A `Json` is a cheap handle onto a reference-counted node. Cloning a handle
//! shares the node; the first mutation through a shared handle copies the node
//! so the other holders never observe the change. All mutating accessors
//! funnel through [`Json::node_mut`], which performs that copy-on-write step.

use crate::error::{JsonError, JsonType};
use crate::map::JsonMap;
use crate::node::Node;
use crate::pool;
use crate::{FromJson, Result};
use std::fmt::{self, Debug};
use std::sync::Arc;

/// A JSON document or fragment with copy-on-write sharing.
///
/// Handles start as `null` and can hold any JSON value. A handle whose
/// content has been [taken](Json::take) answers type queries with defaults
/// and fails content operations with [`JsonError::Taken`].
pub struct Json {
	record: Option<Arc<Node>>,
}

impl Json {
	/// Create a `null` value.
	#[must_use]
	pub fn null() -> Json {
		Json::from_node(Node::Null)
	}

	/// Create an empty array.
	#[must_use]
	pub fn array() -> Json {
		Json::from_node(Node::Array(Vec::new()))
	}

	/// Create an empty object.
	#[must_use]
	pub fn object() -> Json {
		Json::from_node(Node::Object(JsonMap::new()))
	}

	pub(crate) fn from_node(node: Node) -> Json {
		let mut record = pool::acquire();
		*Arc::make_mut(&mut record) = node;
		Json { record: Some(record) }
	}

	pub(crate) fn record(&self) -> Option<&Arc<Node>> {
		self.record.as_ref()
	}

	pub(crate) fn node(&self) -> Result<&Node> {
		self.record.as_deref().ok_or(JsonError::Taken)
	}

	/// Exclusive access to the node. The one place a shared node is copied;
	/// every mutating operation goes through here.
	fn exclusive_node(&mut self) -> Option<&mut Node> {
		self.record.as_mut().map(Arc::make_mut)
	}

	/// Exclusive access to the node, copying it first if it is shared.
	pub(crate) fn node_mut(&mut self) -> Result<&mut Node> {
		self.exclusive_node().ok_or(JsonError::Taken)
	}

	/// Unwrap the handle into its node, cloning only if the node is shared.
	pub(crate) fn into_node(mut self) -> Node {
		let record = self.record.take();
		record.map_or(Node::Null, Arc::unwrap_or_clone)
	}

	/// The type of the held value. A taken handle reports `Null`.
	#[must_use]
	pub fn kind(&self) -> JsonType {
		self.record.as_deref().map_or(JsonType::Null, Node::kind)
	}

	#[must_use]
	pub fn is_null(&self) -> bool {
		matches!(self.record.as_deref(), Some(Node::Null))
	}

	#[must_use]
	pub fn is_boolean(&self) -> bool {
		matches!(self.record.as_deref(), Some(Node::Boolean(_)))
	}

	#[must_use]
	pub fn is_number(&self) -> bool {
		matches!(self.record.as_deref(), Some(Node::Number(_)))
	}

	#[must_use]
	pub fn is_string(&self) -> bool {
		matches!(self.record.as_deref(), Some(Node::String(_)))
	}

	#[must_use]
	pub fn is_array(&self) -> bool {
		matches!(self.record.as_deref(), Some(Node::Array(_)))
	}

	#[must_use]
	pub fn is_object(&self) -> bool {
		matches!(self.record.as_deref(), Some(Node::Object(_)))
	}

	/// Whether the handle's content has been moved out with [`Json::take`].
	#[must_use]
	pub fn is_taken(&self) -> bool {
		self.record.is_none()
	}

	/// Move the content out, leaving this handle in the taken state.
	///
	/// No node is copied: the returned handle adopts the record and this
	/// handle keeps nothing.
	pub fn take(&mut self) -> Json {
		Json { record: self.record.take() }
	}

	/// Extract a typed copy of the value.
	///
	/// # Errors
	///
	/// Returns an error when the value has a different type or has been
	/// taken.
	pub fn get<T: FromJson>(&self) -> Result<T> {
		T::from_json(self)
	}

	/// Like [`Json::get`], but swallows the failure.
	#[must_use]
	pub fn try_get<T: FromJson>(&self) -> Option<T> {
		self.get().ok()
	}

	/// Replace the content with `value`, copying the node first if shared.
	///
	/// # Errors
	///
	/// Returns [`JsonError::Taken`] when the content has been taken.
	pub fn set<T>(&mut self, value: T) -> Result<()>
	where
		Json: From<T>,
	{
		*self.node_mut()? = Json::from(value).into_node();
		Ok(())
	}

	/// # Errors
	///
	/// Returns an error when the value is not a boolean.
	pub fn as_bool(&self) -> Result<bool> {
		match self.node()? {
			Node::Boolean(value) => Ok(*value),
			node => Err(type_error(JsonType::Boolean, node)),
		}
	}

	/// # Errors
	///
	/// Returns an error when the value is not a number.
	pub fn as_f64(&self) -> Result<f64> {
		match self.node()? {
			Node::Number(value) => Ok(*value),
			node => Err(type_error(JsonType::Number, node)),
		}
	}

	/// # Errors
	///
	/// Returns an error when the value is not a string.
	pub fn as_str(&self) -> Result<&str> {
		match self.node()? {
			Node::String(value) => Ok(value),
			node => Err(type_error(JsonType::String, node)),
		}
	}

	/// Owned copy of the string content.
	///
	/// # Errors
	///
	/// Returns an error when the value is not a string.
	pub fn as_string(&self) -> Result<String> {
		self.as_str().map(str::to_owned)
	}

	/// Number of elements in an array or keys in an object.
	///
	/// # Errors
	///
	/// Returns an error when the value is not a container.
	pub fn len(&self) -> Result<usize> {
		match self.node()? {
			Node::Array(items) => Ok(items.len()),
			Node::Object(map) => Ok(map.len()),
			node => Err(op_error("len", node)),
		}
	}

	/// # Errors
	///
	/// Returns an error when the value is not a container.
	pub fn is_empty(&self) -> Result<bool> {
		Ok(self.len()? == 0)
	}

	/// Borrow the array element at `index`.
	///
	/// # Errors
	///
	/// Returns an error when the value is not an array or `index` is out of
	/// bounds.
	pub fn at(&self, index: usize) -> Result<&Json> {
		match self.node()? {
			Node::Array(items) => items.get(index).ok_or(JsonError::OutOfBounds {
				index,
				len: items.len(),
			}),
			node => Err(type_error(JsonType::Array, node)),
		}
	}

	/// Mutably borrow the array element at `index`, copying the node first if
	/// it is shared.
	///
	/// # Errors
	///
	/// Returns an error when the value is not an array or `index` is out of
	/// bounds.
	pub fn at_mut(&mut self, index: usize) -> Result<&mut Json> {
		match self.node_mut()? {
			Node::Array(items) => {
				let len = items.len();
				items.get_mut(index).ok_or(JsonError::OutOfBounds { index, len })
			}
			node => Err(type_error(JsonType::Array, node)),
		}
	}

	/// Append a value to an array.
	///
	/// # Errors
	///
	/// Returns an error when the value is not an array.
	pub fn push(&mut self, value: impl Into<Json>) -> Result<()> {
		match self.node_mut()? {
			Node::Array(items) => {
				items.push(value.into());
				Ok(())
			}
			node => Err(op_error("push", node)),
		}
	}

	/// Remove and return the last array element.
	///
	/// # Errors
	///
	/// Returns an error when the value is not an array or the array is
	/// empty.
	pub fn pop(&mut self) -> Result<Json> {
		match self.node_mut()? {
			Node::Array(items) => items.pop().ok_or(JsonError::EmptyPop),
			node => Err(op_error("pop", node)),
		}
	}

	/// Pre-size an array or object for `capacity` total entries.
	///
	/// A no-op on every other type, including taken handles.
	pub fn reserve(&mut self, capacity: usize) {
		match self.exclusive_node() {
			Some(Node::Array(items)) => {
				items.reserve(capacity.saturating_sub(items.len()));
			}
			Some(Node::Object(map)) => map.reserve(capacity),
			_ => {}
		}
	}

	/// Borrow the value under `key`.
	///
	/// # Errors
	///
	/// Returns an error when the value is not an object or the key is
	/// absent.
	pub fn field(&self, key: &str) -> Result<&Json> {
		match self.node()? {
			Node::Object(map) => map.get(key).ok_or_else(|| JsonError::KeyNotFound {
				key: key.to_owned(),
			}),
			node => Err(type_error(JsonType::Object, node)),
		}
	}

	/// Mutably borrow the value under `key`, inserting `null` if the key is
	/// absent. Copies the node first if it is shared.
	///
	/// # Errors
	///
	/// Returns an error when the value is not an object.
	pub fn field_mut(&mut self, key: &str) -> Result<&mut Json> {
		match self.node_mut()? {
			Node::Object(map) => Ok(map.get_or_insert(key)),
			node => Err(type_error(JsonType::Object, node)),
		}
	}

	/// Insert a value under `key`, returning the previous value if any.
	///
	/// # Errors
	///
	/// Returns an error when the value is not an object.
	pub fn insert(&mut self, key: &str, value: impl Into<Json>) -> Result<Option<Json>> {
		match self.node_mut()? {
			Node::Object(map) => Ok(map.insert(key, value.into())),
			node => Err(op_error("insert", node)),
		}
	}

	/// # Errors
	///
	/// Returns an error when the value is not an object.
	pub fn contains(&self, key: &str) -> Result<bool> {
		match self.node()? {
			Node::Object(map) => Ok(map.contains_key(key)),
			node => Err(op_error("contains", node)),
		}
	}

	/// Remove and return the value under `key`, if present.
	///
	/// # Errors
	///
	/// Returns an error when the value is not an object.
	pub fn remove(&mut self, key: &str) -> Result<Option<Json>> {
		match self.node_mut()? {
			Node::Object(map) => Ok(map.remove(key)),
			node => Err(op_error("remove", node)),
		}
	}

	/// The object's keys, in unspecified order.
	///
	/// # Errors
	///
	/// Returns an error when the value is not an object.
	pub fn keys(&self) -> Result<Vec<String>> {
		match self.node()? {
			Node::Object(map) => Ok(map.keys().map(str::to_owned).collect()),
			node => Err(op_error("keys", node)),
		}
	}
}

fn type_error(expected: JsonType, actual: &Node) -> JsonError {
	JsonError::Type {
		expected,
		actual: actual.kind(),
	}
}

fn op_error(op: &'static str, actual: &Node) -> JsonError {
	JsonError::InvalidOperation {
		op,
		actual: actual.kind(),
	}
}

impl Clone for Json {
	/// Cheap handle copy. The node itself is only copied later, on the first
	/// mutation through either handle.
	fn clone(&self) -> Json {
		Json {
			record: self.record.clone(),
		}
	}
}

impl Drop for Json {
	fn drop(&mut self) {
		if let Some(record) = self.record.take() {
			pool::release(record);
		}
	}
}

impl Default for Json {
	fn default() -> Json {
		Json::null()
	}
}

impl PartialEq for Json {
	fn eq(&self, other: &Json) -> bool {
		match (&self.record, &other.record) {
			(Some(left), Some(right)) => Arc::ptr_eq(left, right) || left == right,
			(None, None) => true,
			_ => false,
		}
	}
}

impl Debug for Json {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.record.as_deref() {
			Some(node) => node.fmt(f),
			None => f.write_str("<taken>"),
		}
	}
}
