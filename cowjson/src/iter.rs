//! Iteration over array elements and object entries.
//!
//! Element iteration is lenient: iterating a value that is not an array
//! yields nothing instead of failing, so `for element in &value` is always
//! safe. Entry iteration over objects works the same way through
//! [`Json::entries`].

use crate::map;
use crate::node::Node;
use crate::value::Json;
use std::slice;

static EMPTY: [Json; 0] = [];

impl Json {
	/// Iterate over array elements. Empty for every other type, including
	/// taken handles.
	pub fn iter(&self) -> slice::Iter<'_, Json> {
		match self.record().map(|record| &**record) {
			Some(Node::Array(items)) => items.iter(),
			_ => EMPTY.iter(),
		}
	}

	/// Mutably iterate over array elements, copying the node first if it is
	/// shared. Empty for every other type.
	pub fn iter_mut(&mut self) -> slice::IterMut<'_, Json> {
		match self.node_mut() {
			Ok(Node::Array(items)) => items.iter_mut(),
			_ => {
				let empty: &'static mut [Json] = &mut [];
				empty.iter_mut()
			}
		}
	}

	/// Iterate over object entries as `(key, value)` pairs. Empty for every
	/// other type.
	pub fn entries(&self) -> Entries<'_> {
		match self.record().map(|record| &**record) {
			Some(Node::Object(map)) => Entries {
				inner: Some(map.iter()),
			},
			_ => Entries { inner: None },
		}
	}

	/// Mutably iterate over object entries, copying the node first if it is
	/// shared. Keys stay immutable. Empty for every other type.
	pub fn entries_mut(&mut self) -> EntriesMut<'_> {
		match self.node_mut() {
			Ok(Node::Object(map)) => EntriesMut {
				inner: Some(map.iter_mut()),
			},
			_ => EntriesMut { inner: None },
		}
	}
}

impl<'a> IntoIterator for &'a Json {
	type Item = &'a Json;
	type IntoIter = slice::Iter<'a, Json>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<'a> IntoIterator for &'a mut Json {
	type Item = &'a mut Json;
	type IntoIter = slice::IterMut<'a, Json>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter_mut()
	}
}

/// Iterator over object entries in unspecified order.
#[derive(Clone)]
pub struct Entries<'a> {
	inner: Option<map::Iter<'a>>,
}

impl<'a> Iterator for Entries<'a> {
	type Item = (&'a str, &'a Json);

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.as_mut()?.next()
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.as_ref().map_or((0, Some(0)), Iterator::size_hint)
	}
}

impl ExactSizeIterator for Entries<'_> {}

/// Mutable iterator over object entries in unspecified order.
pub struct EntriesMut<'a> {
	inner: Option<map::IterMut<'a>>,
}

impl<'a> Iterator for EntriesMut<'a> {
	type Item = (&'a str, &'a mut Json);

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.as_mut()?.next()
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.as_ref().map_or((0, Some(0)), Iterator::size_hint)
	}
}

impl ExactSizeIterator for EntriesMut<'_> {}

#[cfg(test)]
mod tests {
	use super::*;
	use anyhow::Result;

	#[test]
	fn test_iter_array() -> Result<()> {
		let json = Json::parse("[1, 2, 3]")?;
		let total: f64 = json.iter().map(|item| item.as_f64().unwrap()).sum();
		assert_eq!(total, 6.0);
		assert_eq!(json.iter().len(), 3);

		let mut seen = 0;
		for element in &json {
			assert!(element.is_number());
			seen += 1;
		}
		assert_eq!(seen, 3);
		Ok(())
	}

	#[test]
	fn test_iter_mut_array() -> Result<()> {
		let mut json = Json::parse("[1, 2, 3]")?;
		let shared = json.clone();
		for element in &mut json {
			let doubled = element.as_f64()? * 2.0;
			element.set(doubled)?;
		}
		assert_eq!(json.stringify()?, "[2,4,6]");
		// The shared handle kept the original elements.
		assert_eq!(shared.stringify()?, "[1,2,3]");
		Ok(())
	}

	#[test]
	fn test_iter_non_array_is_empty() {
		assert_eq!(Json::from(5).iter().len(), 0);
		assert_eq!(Json::object().iter().len(), 0);
		assert_eq!(Json::null().iter_mut().len(), 0);

		let mut taken = Json::from(1);
		let _ = taken.take();
		assert_eq!(taken.iter().len(), 0);
		assert_eq!(taken.iter_mut().len(), 0);
	}

	#[test]
	fn test_entries() -> Result<()> {
		let json = Json::parse(r#"{"a": 1, "b": 2}"#)?;
		assert_eq!(json.entries().len(), 2);

		let mut pairs: Vec<(String, f64)> = json
			.entries()
			.map(|(key, value)| (key.to_owned(), value.as_f64().unwrap()))
			.collect();
		pairs.sort_by(|left, right| left.0.cmp(&right.0));
		assert_eq!(pairs, vec![("a".to_owned(), 1.0), ("b".to_owned(), 2.0)]);
		Ok(())
	}

	#[test]
	fn test_entries_mut() -> Result<()> {
		let mut json = Json::parse(r#"{"a": 1, "b": 2}"#)?;
		for (_key, value) in json.entries_mut() {
			value.set(0)?;
		}
		assert_eq!(json.field("a")?.as_f64()?, 0.0);
		assert_eq!(json.field("b")?.as_f64()?, 0.0);
		Ok(())
	}

	#[test]
	fn test_entries_non_object_is_empty() {
		assert_eq!(Json::array().entries().len(), 0);
		assert_eq!(Json::from("text").entries_mut().len(), 0);

		let mut taken = Json::object();
		let _ = taken.take();
		assert_eq!(taken.entries().len(), 0);
	}
}
