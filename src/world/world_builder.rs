use crate::systems::System;
use crate::events::EventBus;
use crate::world::World;
use std::any::Any;

type Setup = Box<dyn FnOnce(&mut World)>;

/// Assembles a [World] from an explicit list of [systems](System), shared data and an [EventBus].
///
/// ```ignore
/// let bus = EventBus::new();
/// let mut world = World::builder()
///     .with_event_bus(bus.clone())
///     .with_system(MovementSystem::default())
///     .with_system(RenderQueueSystem::default())
///     .with_data("gravity", 9.81_f32)
///     .build();
/// ```
#[derive(Default)]
pub struct WorldBuilder {
	entity_capacity: usize,
	events: Option<EventBus>,
	setup: Vec<Setup>,
}

impl WorldBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Pre-allocates room for `capacity` entities.
	pub fn with_entity_capacity(mut self, capacity: usize) -> Self {
		self.entity_capacity = capacity;
		self
	}

	/// Uses `events` instead of a fresh [EventBus], so that it can be shared with code outside the world.
	pub fn with_event_bus(mut self, events: EventBus) -> Self {
		self.events = Some(events);
		self
	}

	/// Adds a [system](System). A second system of the same type is ignored.
	pub fn with_system<T: System>(mut self, system: T) -> Self {
		self.setup.push(Box::new(move |world| {
			world.add_system(system);
		}));
		self
	}

	/// Stores a value in the world's side channel.
	pub fn with_data<T: Any>(mut self, key: impl Into<String>, value: T) -> Self {
		let key = key.into();
		self.setup.push(Box::new(move |world| world.set_data(key, value)));
		self
	}

	pub fn build(self) -> World {
		let mut world = World::with_parts(self.events.unwrap_or_default(), self.entity_capacity);
		for setup in self.setup {
			setup(&mut world);
		}
		world
	}
}
