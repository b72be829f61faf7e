use crate::entities::{Entity, EntityId};
use nohash_hasher::BuildNoHashHasher;
use std::collections::HashMap;

type Hasher = BuildNoHashHasher<EntityId>;

/// Vacant slots tolerated before the registry compacts itself.
const MIN_VACANT_BEFORE_COMPACT: usize = 32;

/// The entities owned by a [World](crate::world::World), kept in insertion order.
///
/// Removal leaves a vacant slot behind so that the remaining entities keep their relative order;
/// the slots are compacted once more than half of them are vacant.
pub(crate) struct EntityRegistry {
	slots: Vec<Option<Entity>>,
	lookup: HashMap<EntityId, usize, Hasher>,
	vacant: usize,
}

impl EntityRegistry {
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			slots: Vec::with_capacity(capacity),
			lookup: HashMap::with_capacity_and_hasher(capacity, Hasher::default()),
			vacant: 0,
		}
	}

	#[inline(always)]
	pub fn len(&self) -> usize {
		self.lookup.len()
	}

	#[inline(always)]
	pub fn contains(&self, id: EntityId) -> bool {
		self.lookup.contains_key(&id)
	}

	pub fn get(&self, id: EntityId) -> Option<&Entity> {
		let slot = *self.lookup.get(&id)?;
		self.slots[slot].as_ref()
	}

	pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
		let slot = *self.lookup.get(&id)?;
		self.slots[slot].as_mut()
	}

	/// Stores an entity. The caller guarantees it is not already present.
	pub fn insert(&mut self, entity: Entity) {
		debug_assert!(!self.contains(entity.id()), "Entity {} was inserted twice", entity.id());
		self.lookup.insert(entity.id(), self.slots.len());
		self.slots.push(Some(entity));
	}

	pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
		let slot = self.lookup.remove(&id)?;
		let entity = self.slots[slot].take();
		self.vacant += 1;

		if self.vacant > MIN_VACANT_BEFORE_COMPACT && self.vacant * 2 > self.slots.len() {
			self.compact();
		}

		entity
	}

	pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
		self.slots.iter().flatten()
	}

	#[inline(never)]
	fn compact(&mut self) {
		self.slots.retain(Option::is_some);
		self.lookup.clear();
		for (slot, entity) in self.slots.iter().flatten().enumerate() {
			self.lookup.insert(entity.id(), slot);
		}
		self.vacant = 0;
	}
}

#[cfg(test)]
impl EntityRegistry {
	pub fn slot_count(&self) -> usize {
		self.slots.len()
	}
}
