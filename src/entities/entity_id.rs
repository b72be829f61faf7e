use std::sync::atomic::{AtomicU64, Ordering::Relaxed};
use std::fmt::{Display, Formatter};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A process-wide unique identifier of an [`Entity`](crate::entities::Entity).
///
/// Identifiers are handed out in increasing order and are never reused,
/// not even after the entity they belonged to has been removed from its world.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct EntityId {
	value: u64,
}

impl EntityId {
	pub(crate) fn next() -> Self {
		let value = NEXT_ID.fetch_add(1, Relaxed);
		debug_assert!(value != u64::MAX, "Entity identifiers have been exhausted");
		Self { value }
	}

	#[inline(always)]
	pub const fn value(&self) -> u64 {
		self.value
	}
}

impl nohash_hasher::IsEnabled for EntityId {}

impl Display for EntityId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{}", self.value)
	}
}
