use crate::entities::EntityId;
use crate::world::WorldId;
use thiserror::Error;

/// Errors produced by [World](crate::world::World) and [Entity](crate::entities::Entity) operations.
///
/// Every failing operation leaves the entity, the world and its type index untouched.
#[derive(Error, Clone, Eq, PartialEq, Debug)]
pub enum EcsError {
	/// The entity is owned by another world and must be removed from it first.
	#[error("entity {entity} belongs to world {owner} and cannot be added to world {target}")]
	EntityOwnedByOtherWorld {
		entity: EntityId,
		owner: WorldId,
		target: WorldId,
	},

	/// A component of the same concrete type is already attached.
	#[error("entity {entity} already has a component of type `{component}`")]
	DuplicateComponent {
		entity: EntityId,
		component: &'static str,
	},

	/// The entity is not a member of the world the operation was invoked on.
	#[error("entity {0} is not a member of this world")]
	EntityNotFound(EntityId),
}
