//! Thread-local interning of short object keys.
//!
//! Repeated keys are the norm in real JSON (arrays of uniform records), so
//! short keys are canonicalized in a per-thread table and shared via
//! [`Arc<str>`]. Keys longer than [`MAX_INTERNED_KEY_LEN`] bypass the table to
//! keep it bounded. Like the node pool, this is a pure throughput layer and
//! is never consulted for correctness.

use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::Arc;

pub(crate) const MAX_INTERNED_KEY_LEN: usize = 32;

thread_local! {
	static KEYS: RefCell<HashSet<Arc<str>>> = RefCell::new(HashSet::new());
}

/// Return the canonical shared copy of `key`, inserting it on first sight.
pub(crate) fn intern(key: &str) -> Arc<str> {
	if key.len() > MAX_INTERNED_KEY_LEN {
		return Arc::from(key);
	}
	KEYS
		.try_with(|keys| {
			let mut keys = keys.borrow_mut();
			if let Some(existing) = keys.get(key) {
				Arc::clone(existing)
			} else {
				let canonical: Arc<str> = Arc::from(key);
				keys.insert(Arc::clone(&canonical));
				canonical
			}
		})
		.unwrap_or_else(|_| Arc::from(key))
}
