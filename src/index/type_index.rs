use crate::components::ComponentInfo;
use crate::entities::{Entity, EntityId};
use std::collections::{BTreeSet, HashMap};
use std::any::TypeId;

/// A denormalised lookup from a query key to the entities holding a matching component.
///
/// Keys are concrete component types and the capabilities they declare. Buckets keep their
/// entities ordered by [EntityId], hold every entity at most once and are dropped as soon as they
/// become empty.
#[derive(Default)]
pub struct TypeIndex {
	buckets: HashMap<TypeId, Bucket>,
}

struct Bucket {
	name: &'static str,
	entities: BTreeSet<EntityId>,
}

impl TypeIndex {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	/// The entities indexed under `key`, active or not.
	pub fn entities(&self, key: TypeId) -> Option<&BTreeSet<EntityId>> {
		self.buckets.get(&key).map(|bucket| &bucket.entities)
	}

	pub fn contains(&self, key: TypeId, entity: EntityId) -> bool {
		self.buckets.get(&key).map_or(false, |bucket| bucket.entities.contains(&entity))
	}

	/// The number of non-empty buckets.
	pub fn bucket_count(&self) -> usize {
		self.buckets.len()
	}

	/// The names of the indexed keys, sorted alphabetically.
	pub fn key_names(&self) -> Vec<&'static str> {
		let mut names = self.buckets.values().map(|bucket| bucket.name).collect::<Vec<_>>();
		names.sort_unstable();
		names
	}

	/// Indexes a component attached to `entity` under all of its keys.
	pub(crate) fn register(&mut self, entity: EntityId, info: &ComponentInfo) {
		for capability in info.capabilities() {
			let bucket = self.buckets.entry(capability.id()).or_insert_with(|| {
				log::trace!("Created index bucket for {}", capability.name());
				Bucket {
					name: capability.name(),
					entities: BTreeSet::new(),
				}
			});
			bucket.entities.insert(entity);
		}
	}

	/// Removes the index entries of a component that was just detached from `entity`.
	///
	/// A key stays indexed when one of the entity's remaining components still provides it.
	pub(crate) fn unregister(&mut self, entity: &Entity, info: &ComponentInfo) {
		for key in info.keys() {
			if !entity.provides(key) {
				self.remove_from(key, entity.id());
			}
		}
	}

	/// Removes every index entry of an entity leaving its world.
	pub(crate) fn unregister_entity(&mut self, entity: &Entity) {
		for info in entity.infos() {
			for key in info.keys() {
				self.remove_from(key, entity.id());
			}
		}
	}

	fn remove_from(&mut self, key: TypeId, entity: EntityId) {
		let Some(bucket) = self.buckets.get_mut(&key) else {
			return;
		};

		bucket.entities.remove(&entity);
		if bucket.entities.is_empty() {
			log::trace!("Dropped empty index bucket for {}", bucket.name);
			self.buckets.remove(&key);
		}
	}

	/// Checks that `entity` is indexed under exactly the keys its components provide.
	#[inline(always)]
	pub(crate) fn assert_consistent(&self, entity: &Entity) {
		for info in entity.infos() {
			for key in info.keys() {
				#[cfg(not(feature = "debug_only_assertions"))]
				assert!(self.contains(key, entity.id()), "Entity {} is missing from the {} bucket", entity.id(), info.type_name());

				#[cfg(feature = "debug_only_assertions")]
				debug_assert!(self.contains(key, entity.id()), "Entity {} is missing from the {} bucket", entity.id(), info.type_name());
			}
		}
	}
}
