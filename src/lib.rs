//! An entity-component-system runtime with a polymorphic type index.
//!
//! A [World](world::World) owns [entities](entities::Entity) and indexes their
//! [components](components::Component) by concrete type and by every capability the component type
//! declares, runs priority-ordered [systems](systems::System) once per tick, and carries an
//! [EventBus](events::EventBus) for notifications between systems.

extern crate self as keystone_ecs;

pub mod components;
pub mod entities;
pub mod events;
pub mod index;
pub mod systems;
pub mod world;
mod error;

pub use error::EcsError;

pub mod prelude {
	pub use crate::impl_component;
	pub use crate::EcsError;
	pub use crate::components::{CastTo, Capabilities, Component, ComponentRef, ComponentSet};
	pub use crate::entities::{Entity, EntityId};
	pub use crate::events::{DispatchSummary, EventBus, EventHandler, HandlerError};
	pub use crate::systems::{Priority, System};
	pub use crate::world::{World, WorldBuilder, WorldId};
}

#[cfg(test)]
mod tests;
