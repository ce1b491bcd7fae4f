//! Thread-local recycling pool for node storage.
//!
//! Every [`Json`](crate::Json) handle draws its backing record from this pool
//! and hands it back on drop. The pool is a pure throughput layer: removing it
//! changes no observable behavior. It is scoped per thread, so it needs no
//! synchronization and introduces no cross-thread contention.

use crate::node::Node;
use std::cell::RefCell;
use std::sync::Arc;

const MAX_POOL_SIZE: usize = 1000;
const WARMUP_SIZE: usize = 50;

struct NodePool {
	slots: Vec<Arc<Node>>,
	warmed: bool,
}

impl NodePool {
	const fn new() -> Self {
		NodePool {
			slots: Vec::new(),
			warmed: false,
		}
	}

	fn warm(&mut self) {
		self.slots.reserve(MAX_POOL_SIZE);
		for _ in 0..WARMUP_SIZE {
			self.slots.push(Arc::new(Node::Null));
		}
		self.warmed = true;
		log::trace!("warmed node pool with {WARMUP_SIZE} slots");
	}
}

thread_local! {
	static POOL: RefCell<NodePool> = const { RefCell::new(NodePool::new()) };
}

/// Hand out an exclusively owned, `Null`-initialized record.
///
/// The first call on a thread pre-populates the pool; afterwards acquisition
/// is a `Vec::pop`. Falls back to a fresh allocation when the pool is empty
/// or its thread-local storage is already gone.
pub(crate) fn acquire() -> Arc<Node> {
	POOL
		.try_with(|pool| {
			let mut pool = pool.borrow_mut();
			if !pool.warmed {
				pool.warm();
			}
			pool.slots.pop()
		})
		.ok()
		.flatten()
		.unwrap_or_else(|| Arc::new(Node::Null))
}

/// Take a record back, keeping it for reuse if this was the last owner.
///
/// Records still shared with other handles are left untouched; their payload
/// stays alive for the remaining owners and the allocation is simply released
/// from this handle's point of view.
pub(crate) fn release(mut record: Arc<Node>) {
	let Some(node) = Arc::get_mut(&mut record) else {
		return;
	};
	// Resetting the payload drops children, which recursively re-enters this
	// function, so it must happen before the pool is borrowed.
	*node = Node::Null;
	let _ = POOL.try_with(|pool| {
		let mut pool = pool.borrow_mut();
		if pool.slots.len() < MAX_POOL_SIZE {
			pool.slots.push(record);
		}
	});
}
