//! `JsonMap`, the adaptive keyed container backing JSON objects.
//!
//! A hash map from interned keys to values whose capacity growth is
//! size-tiered instead of plainly doubling: most JSON objects are small, so
//! the map first grows to a small tier (8 keys), then a medium tier (32 keys),
//! and only doubles beyond that. An explicit [`JsonMap::reserve`] applies the
//! same tiering up front. Iteration order is unspecified.

use crate::intern::intern;
use crate::value::Json;
use ahash::AHasher;
use std::collections::HashMap;
use std::collections::hash_map;
use std::fmt::{self, Debug};
use std::hash::BuildHasherDefault;
use std::sync::Arc;

const SMALL_TIER: usize = 8;
const MEDIUM_TIER: usize = 32;

// Deterministic hasher: equal key sets land in equal iteration orders across
// map instances, which keeps repeated serializations of equal documents
// byte-identical.
type Entries = HashMap<Arc<str>, Json, BuildHasherDefault<AHasher>>;

/// Mapping from object keys to values with size-tiered capacity growth.
#[derive(Clone, PartialEq)]
pub struct JsonMap {
	entries: Entries,
}

impl JsonMap {
	/// Create an empty map pre-sized for the small tier.
	#[must_use]
	pub fn new() -> Self {
		JsonMap {
			entries: Entries::with_capacity_and_hasher(SMALL_TIER, BuildHasherDefault::default()),
		}
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	#[must_use]
	pub fn get(&self, key: &str) -> Option<&Json> {
		self.entries.get(key)
	}

	#[must_use]
	pub fn get_mut(&mut self, key: &str) -> Option<&mut Json> {
		self.entries.get_mut(key)
	}

	#[must_use]
	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Insert a value under `key`, returning the previous value if any.
	///
	/// The key is interned and capacity is grown tier-wise before the insert.
	pub fn insert(&mut self, key: &str, value: Json) -> Option<Json> {
		self.grow_for(self.entries.len() + 1);
		self.entries.insert(intern(key), value)
	}

	/// Get the value under `key`, inserting `Null` first if the key is absent.
	pub fn get_or_insert(&mut self, key: &str) -> &mut Json {
		self.grow_for(self.entries.len() + 1);
		self.entries.entry(intern(key)).or_insert_with(Json::null)
	}

	pub fn remove(&mut self, key: &str) -> Option<Json> {
		self.entries.remove(key)
	}

	/// Size the map for `capacity` total keys using the tiering policy.
	///
	/// Small and medium requests snap to their tier; large requests get 25%
	/// headroom on top.
	pub fn reserve(&mut self, capacity: usize) {
		let target = if capacity <= SMALL_TIER {
			SMALL_TIER
		} else if capacity <= MEDIUM_TIER {
			MEDIUM_TIER
		} else {
			capacity + capacity / 4
		};
		self.grow_to(target);
	}

	/// Tier-wise growth ahead of an insert.
	///
	/// The tier is chosen from the entry count, not the table's reported
	/// capacity: hash tables over-allocate, so a capacity check would let a
	/// map slide past a tier boundary without ever snapping to the next tier.
	fn grow_for(&mut self, needed: usize) {
		let target = if needed <= SMALL_TIER {
			SMALL_TIER
		} else if needed <= MEDIUM_TIER {
			MEDIUM_TIER
		} else if needed > self.entries.capacity() {
			needed.max(self.entries.capacity() * 2)
		} else {
			return;
		};
		self.grow_to(target);
	}

	fn grow_to(&mut self, target: usize) {
		let additional = target.saturating_sub(self.entries.len());
		if self.entries.capacity() < target {
			self.entries.reserve(additional);
		}
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(|key| &**key)
	}

	#[must_use]
	pub fn iter(&self) -> Iter<'_> {
		Iter {
			inner: self.entries.iter(),
		}
	}

	#[must_use]
	pub fn iter_mut(&mut self) -> IterMut<'_> {
		IterMut {
			inner: self.entries.iter_mut(),
		}
	}
}

impl Default for JsonMap {
	fn default() -> Self {
		Self::new()
	}
}

impl Debug for JsonMap {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.iter()).finish()
	}
}

/// Borrowing iterator over key/value pairs in unspecified order.
#[derive(Clone)]
pub struct Iter<'a> {
	inner: hash_map::Iter<'a, Arc<str>, Json>,
}

impl<'a> Iterator for Iter<'a> {
	type Item = (&'a str, &'a Json);

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next().map(|(key, value)| (&**key, value))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}
}

impl ExactSizeIterator for Iter<'_> {}

/// Mutably borrowing iterator over key/value pairs in unspecified order.
pub struct IterMut<'a> {
	inner: hash_map::IterMut<'a, Arc<str>, Json>,
}

impl<'a> Iterator for IterMut<'a> {
	type Item = (&'a str, &'a mut Json);

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next().map(|(key, value)| (&**key, value))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}
}

impl ExactSizeIterator for IterMut<'_> {}
