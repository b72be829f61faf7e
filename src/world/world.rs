use crate::components::{Component, ComponentSet};
use crate::systems::{Phase, System, SystemEntry, SystemStore};
use crate::entities::{Entity, EntityId, EntityRegistry};
use std::sync::atomic::{AtomicU32, Ordering::Relaxed};
use crate::world::WorldBuilder;
use std::collections::HashMap;
use crate::index::TypeIndex;
use crate::events::EventBus;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::any::{Any, TypeId};
use crate::EcsError;

static NEXT_ID: AtomicU32 = AtomicU32::new(1);

/// A process-wide unique identifier of a [World].
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct WorldId {
	value: u32,
}

impl WorldId {
	fn next() -> Self {
		Self {
			value: NEXT_ID.fetch_add(1, Relaxed),
		}
	}

	#[inline(always)]
	pub const fn value(&self) -> u32 {
		self.value
	}
}

impl std::fmt::Display for WorldId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "W{}", self.value)
	}
}

/// A container for [entities](Entity) and [systems](System).
///
/// The world owns its entities and keeps a [TypeIndex] over their components, so that systems can
/// ask for every entity holding a given component type or capability without scanning them all.
/// It also carries an [EventBus] and a string-keyed side channel for data shared between systems.
pub struct World {
	id: WorldId,
	tick: u64,
	index: TypeIndex,
	events: EventBus,
	systems: SystemStore,
	entities: EntityRegistry,
	data: HashMap<String, Box<dyn Any>>,
}

impl World {
	pub fn new() -> Self {
		WorldBuilder::new().build()
	}

	pub fn builder() -> WorldBuilder {
		WorldBuilder::new()
	}

	pub(crate) fn with_parts(events: EventBus, entity_capacity: usize) -> Self {
		let id = WorldId::next();
		log::debug!("Created world {}", id);
		Self {
			id,
			tick: 0,
			events,
			index: TypeIndex::new(),
			systems: SystemStore::new(),
			entities: EntityRegistry::with_capacity(entity_capacity),
			data: HashMap::default(),
		}
	}

	#[inline(always)]
	pub fn id(&self) -> WorldId {
		self.id
	}

	/// The number of completed [`update`](Self::update) calls.
	#[inline(always)]
	pub fn tick(&self) -> u64 {
		self.tick
	}

	/// The [EventBus] shared by this world's systems.
	pub fn events(&self) -> &EventBus {
		&self.events
	}

	pub fn type_index(&self) -> &TypeIndex {
		&self.index
	}

	/// The number of non-empty index buckets.
	pub fn bucket_count(&self) -> usize {
		self.index.bucket_count()
	}

	/// Returns `true` if the entity is indexed under `C`, whether it is active or not.
	pub fn is_indexed<C: ?Sized + 'static>(&self, id: EntityId) -> bool {
		self.index.contains(TypeId::of::<C>(), id)
	}

	// Entities

	/// Adds an [entity](Entity) and indexes all of its [components](Component).
	///
	/// Adding an entity that already belongs to this world is a no-op.
	/// Fails, before anything is modified, if the entity belongs to another world.
	pub fn add_entity(&mut self, entity: Entity) -> Result<EntityId, EcsError> {
		let id = entity.id();
		match entity.world() {
			Some(owner) if owner != self.id => {
				log::warn!("Entity {} belongs to world {} and cannot be added to world {}", id, owner, self.id);
				return Err(EcsError::EntityOwnedByOtherWorld {
					entity: id,
					owner,
					target: self.id,
				});
			},
			_ => {},
		}

		if self.entities.contains(id) {
			return Ok(id);
		}

		Ok(self.insert_entity(entity))
	}

	/// Creates an empty [entity](Entity) directly inside the world.
	pub fn spawn(&mut self) -> EntityId {
		self.insert_entity(Entity::new())
	}

	/// Removes an [entity](Entity) and all of its index entries.
	/// The function will return *false* if the entity isn't part of this world.
	pub fn remove_entity(&mut self, id: EntityId) -> bool {
		self.detach_entity(id).is_some()
	}

	/// Removes an [entity](Entity) and hands it back, components included, with no world attached.
	pub fn detach_entity(&mut self, id: EntityId) -> Option<Entity> {
		let mut entity = self.entities.remove(id)?;
		self.index.unregister_entity(&entity);
		entity.world = None;

		log::debug!("Removed entity {} from world {}", id, self.id);
		Some(entity)
	}

	pub fn entity(&self, id: EntityId) -> Option<&Entity> {
		self.entities.get(id)
	}

	pub fn contains_entity(&self, id: EntityId) -> bool {
		self.entities.contains(id)
	}

	pub fn entity_count(&self) -> usize {
		self.entities.len()
	}

	/// Iterates over every entity in insertion order, inactive ones included.
	pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
		self.entities.iter()
	}

	/// Activates or deactivates an entity.
	/// The function will return *false* if the entity isn't part of this world.
	pub fn set_active(&mut self, id: EntityId, active: bool) -> bool {
		match self.entities.get_mut(id) {
			None => false,
			Some(entity) => {
				entity.set_active(active);
				true
			},
		}
	}

	fn insert_entity(&mut self, mut entity: Entity) -> EntityId {
		let id = entity.id();
		entity.world = Some(self.id);

		for info in entity.infos() {
			self.index.register(id, info);
		}
		self.index.assert_consistent(&entity);
		self.entities.insert(entity);

		log::debug!("Added entity {} to world {}", id, self.id);
		id
	}

	// Components

	/// Attaches a [component](Component) to an entity of this world and indexes it.
	pub fn add_component<T: Component>(&mut self, id: EntityId, component: T) -> Result<(), EcsError> {
		let entity = self.entities.get_mut(id).ok_or(EcsError::EntityNotFound(id))?;
		let info = entity.attach(component)?;
		self.index.register(id, &info);
		self.index.assert_consistent(entity);
		Ok(())
	}

	/// Removes the [component](Component) of type `T` from an entity of this world.
	/// The function will return *false* if the entity or the component is not present.
	pub fn remove_component<T: Component>(&mut self, id: EntityId) -> bool {
		self.take_component::<T>(id).is_some()
	}

	/// Removes the [component](Component) of type `T` from an entity of this world and hands it back.
	pub fn take_component<T: Component>(&mut self, id: EntityId) -> Option<T> {
		let entity = self.entities.get_mut(id)?;
		let slot = entity.detach(TypeId::of::<T>())?;
		self.index.unregister(entity, slot.info());
		slot.into_value()
	}

	pub fn get_component<C: ?Sized + 'static>(&self, id: EntityId) -> Option<&C> {
		self.entities.get(id)?.get_component::<C>()
	}

	pub fn get_component_mut<C: ?Sized + 'static>(&mut self, id: EntityId) -> Option<&mut C> {
		self.entities.get_mut(id)?.get_component_mut::<C>()
	}

	pub fn has_component<C: ?Sized + 'static>(&self, id: EntityId) -> bool {
		self.entities.get(id).map_or(false, Entity::has_component::<C>)
	}

	// Queries

	/// Returns every active entity holding a component of type `C` or declaring the capability `C`.
	pub fn get_entities_with_component<C: ?Sized + 'static>(&self) -> Vec<EntityId> {
		self.active_in(TypeId::of::<C>()).collect()
	}

	/// Returns every active entity matching all elements of a [ComponentSet], e.g. `(&A, &dyn B)`.
	///
	/// The bucket of the first element is scanned and filtered by the others,
	/// so the rarest type should come first.
	pub fn get_entities_with_components<S: ComponentSet>(&self) -> Vec<EntityId> {
		self.active_in(S::lead())
			.filter(|id| self.entities.get(*id).map_or(false, S::matches_rest))
			.collect()
	}

	/// Iterates over every active entity exposing `C`, together with the matching component.
	pub fn query<C: ?Sized + 'static>(&self) -> impl Iterator<Item = (EntityId, &C)> + '_ {
		self.active_in(TypeId::of::<C>()).filter_map(move |id| {
			let component = self.entities.get(id)?.get_component::<C>()?;
			Some((id, component))
		})
	}

	/// Runs `func` on every active entity exposing `C`, with mutable access to the matching component.
	pub fn for_each_mut<C: ?Sized + 'static>(&mut self, mut func: impl FnMut(EntityId, &mut C)) {
		let Some(bucket) = self.index.entities(TypeId::of::<C>()) else {
			return;
		};

		for &id in bucket {
			let Some(entity) = self.entities.get_mut(id) else {
				continue;
			};

			if !entity.is_active() {
				continue;
			}

			if let Some(component) = entity.get_component_mut::<C>() {
				func(id, component);
			}
		}
	}

	fn active_in(&self, key: TypeId) -> impl Iterator<Item = EntityId> + '_ {
		self.index
			.entities(key)
			.into_iter()
			.flatten()
			.copied()
			.filter(move |id| self.entities.get(*id).map_or(false, Entity::is_active))
	}

	// Systems

	/// Adds a [system](System), keeping the list sorted by [priority](crate::systems::Priority).
	///
	/// Returns *false* without doing anything if a system of the same type is already present.
	/// Systems added after [`initialize`](Self::initialize) are initialised immediately; systems added
	/// while the world is updating run from the next tick on.
	pub fn add_system<T: System>(&mut self, mut system: T) -> bool {
		if !self.systems.reserve::<T>() {
			log::debug!("System {} is already part of world {}", std::any::type_name::<T>(), self.id);
			return false;
		}

		if self.systems.is_initialized() {
			if let Err(panic) = catch_unwind(AssertUnwindSafe(|| system.initialize(self))) {
				self.systems.release::<T>();
				resume_unwind(panic);
			}

			// The system may have removed itself while initialising.
			if !self.systems.contains::<T>() {
				return false;
			}
		}

		log::debug!("Added system {} to world {}", std::any::type_name::<T>(), self.id);
		self.systems.insert(SystemEntry::new(system));
		true
	}

	/// Removes the [system](System) of type `T`.
	/// The function will return *false* if no such system is present.
	pub fn remove_system<T: System>(&mut self) -> bool {
		let removed = self.systems.remove::<T>();
		if removed {
			log::debug!("Removed system {} from world {}", std::any::type_name::<T>(), self.id);
		}
		removed
	}

	/// Gets the [system](System) of type `T`.
	///
	/// A system is moved out of the world while its own `initialize` or `update` runs,
	/// so a system looking itself up gets `None`. Every other system stays reachable.
	pub fn get_system<T: System>(&self) -> Option<&T> {
		self.systems.get::<T>()
	}

	pub fn get_system_mut<T: System>(&mut self) -> Option<&mut T> {
		self.systems.get_mut::<T>()
	}

	pub fn system_count(&self) -> usize {
		self.systems.len()
	}

	/// The names of the stored systems in execution order.
	pub fn system_names(&self) -> Vec<&'static str> {
		self.systems.names()
	}

	/// Initialises all [systems](System) in priority order. Only the first call has an effect.
	pub fn initialize(&mut self) {
		if self.systems.is_initialized() {
			log::warn!("World {} has already been initialized", self.id);
			return;
		}

		if !self.systems.begin(Phase::Initializing) {
			return;
		}

		for index in 0..self.systems.pass_len() {
			let Some(mut system) = self.systems.take(index) else {
				continue;
			};
			system.initialize(self);
			self.systems.restore(index, system);
		}

		self.systems.finish();
		log::debug!("Initialized world {} with {} systems", self.id, self.systems.len());
	}

	/// Runs every enabled [system](System) once, in priority order.
	///
	/// Changes made by a system are visible to the systems running after it in the same tick.
	/// The world is initialised first if [`initialize`](Self::initialize) hasn't been called yet.
	pub fn update(&mut self, delta_time: f32) {
		if !self.systems.is_initialized() {
			self.initialize();
		}

		if !self.systems.begin(Phase::Updating) {
			log::warn!("Ignored nested update of world {} (phase {:?})", self.id, self.systems.phase());
			return;
		}

		for index in 0..self.systems.pass_len() {
			let Some(mut system) = self.systems.take(index) else {
				continue;
			};

			if system.enabled() {
				system.update(self, delta_time);
			}
			self.systems.restore(index, system);
		}

		self.systems.finish();
		self.tick += 1;
	}

	// Side channel

	/// Stores a value under `key`, replacing any previous value regardless of its type.
	pub fn set_data<T: Any>(&mut self, key: impl Into<String>, value: T) {
		self.data.insert(key.into(), Box::new(value));
	}

	/// Gets the value stored under `key`, if present and of type `T`.
	pub fn get_data<T: Any>(&self, key: &str) -> Option<&T> {
		self.data.get(key)?.downcast_ref::<T>()
	}

	pub fn get_data_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
		self.data.get_mut(key)?.downcast_mut::<T>()
	}

	pub fn remove_data(&mut self, key: &str) -> bool {
		self.data.remove(key).is_some()
	}
}

impl Default for World {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for World {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("World")
			.field("id", &self.id)
			.field("tick", &self.tick)
			.field("entities", &self.entities.len())
			.field("buckets", &self.index.bucket_count())
			.field("systems", &self.systems.names())
			.finish()
	}
}
