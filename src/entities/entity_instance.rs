use crate::components::{Component, ComponentInfo, ComponentRef, ComponentSlot};
use crate::entities::EntityId;
use crate::world::WorldId;
use crate::EcsError;
use std::any::TypeId;
use std::sync::Arc;

/// A set of [components](Component) sharing one identity.
///
/// An entity starts out standalone and can be filled in freely before being handed to a
/// [World](crate::world::World) with [`add_entity`](crate::world::World::add_entity).
/// Once it belongs to a world, components are attached and detached through the world so that
/// its type index stays in sync.
pub struct Entity {
	id: EntityId,
	active: bool,
	pub(crate) world: Option<WorldId>,
	components: Vec<ComponentSlot>,
}

impl Entity {
	/// Creates an active entity with no [components](Component) attached.
	pub fn new() -> Self {
		Self {
			id: EntityId::next(),
			active: true,
			world: None,
			components: vec![],
		}
	}

	#[inline(always)]
	pub fn id(&self) -> EntityId {
		self.id
	}

	/// Inactive entities stay indexed but are left out of query results.
	#[inline(always)]
	pub fn is_active(&self) -> bool {
		self.active
	}

	pub fn set_active(&mut self, active: bool) {
		self.active = active;
	}

	/// The [World](crate::world::World) this entity belongs to, if any.
	#[inline(always)]
	pub fn world(&self) -> Option<WorldId> {
		self.world
	}

	/// Attaches a [component](Component) to the entity.
	/// Fails if a component of the same concrete type is already attached, leaving the entity untouched.
	pub fn add_component<T: Component>(&mut self, component: T) -> Result<&mut Self, EcsError> {
		self.attach(component)?;
		Ok(self)
	}

	/// Builder form of [`add_component`](Self::add_component).
	pub fn with<T: Component>(mut self, component: T) -> Result<Self, EcsError> {
		self.attach(component)?;
		Ok(self)
	}

	/// Gets a reference to the first component that is either of type `C` or declares `C` as a capability.
	pub fn get_component<C: ?Sized + 'static>(&self) -> Option<&C> {
		self.components.iter().find_map(ComponentSlot::get::<C>)
	}

	/// Gets a mutable reference to the first component that is either of type `C` or declares `C` as a capability.
	pub fn get_component_mut<C: ?Sized + 'static>(&mut self) -> Option<&mut C> {
		self.components.iter_mut().find_map(ComponentSlot::get_mut::<C>)
	}

	/// Returns `true` if any attached component is of type `C` or declares `C` as a capability.
	pub fn has_component<C: ?Sized + 'static>(&self) -> bool {
		self.provides(TypeId::of::<C>())
	}

	/// Removes the component of type `T`.
	/// The function will return *false* if no such component is present.
	pub fn remove_component<T: Component>(&mut self) -> bool {
		self.take_component::<T>().is_some()
	}

	/// Removes the component of type `T` and hands it back.
	pub fn take_component<T: Component>(&mut self) -> Option<T> {
		self.detach(TypeId::of::<T>())?.into_value()
	}

	/// Iterates over all attached components in the order they were added.
	pub fn components(&self) -> impl Iterator<Item = ComponentRef<'_>> + '_ {
		let owner = self.id;
		self.components.iter().map(move |slot| slot.view(owner))
	}

	pub fn component_count(&self) -> usize {
		self.components.len()
	}

	pub(crate) fn provides(&self, key: TypeId) -> bool {
		self.components.iter().any(|slot| slot.info().provides(key))
	}

	pub(crate) fn infos(&self) -> impl Iterator<Item = &ComponentInfo> + '_ {
		self.components.iter().map(ComponentSlot::info)
	}

	pub(crate) fn attach<T: Component>(&mut self, component: T) -> Result<Arc<ComponentInfo>, EcsError> {
		let type_id = TypeId::of::<T>();
		if self.components.iter().any(|slot| slot.component_type() == type_id) {
			let component = std::any::type_name::<T>();
			log::warn!("Entity {} already has a component of type {}", self.id, component);
			return Err(EcsError::DuplicateComponent { entity: self.id, component });
		}

		let info = ComponentInfo::of::<T>();
		self.components.push(ComponentSlot::new(info.clone(), component));
		Ok(info)
	}

	pub(crate) fn detach(&mut self, type_id: TypeId) -> Option<ComponentSlot> {
		let position = self.components.iter().position(|slot| slot.component_type() == type_id)?;
		Some(self.components.remove(position))
	}
}

impl Default for Entity {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for Entity {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Entity")
			.field("id", &self.id)
			.field("active", &self.active)
			.field("world", &self.world)
			.field("components", &self.components().map(|c| c.type_name()).collect::<Vec<_>>())
			.finish()
	}
}

#[cfg(test)]
impl Entity {
	/// An empty entity sharing this entity's identity and world.
	pub(crate) fn twin(&self) -> Entity {
		Entity {
			id: self.id,
			active: self.active,
			world: self.world,
			components: vec![],
		}
	}
}
