use crate::components::ComponentInfo;
use crate::entities::EntityId;
use std::any::{Any, TypeId};
use std::sync::Arc;

/// A type-erased [component](crate::components::Component) owned by an [entity](crate::entities::Entity).
pub(crate) struct ComponentSlot {
	info: Arc<ComponentInfo>,
	value: Box<dyn Any>,
}

impl ComponentSlot {
	pub fn new<T: 'static>(info: Arc<ComponentInfo>, value: T) -> Self {
		Self {
			info,
			value: Box::new(value),
		}
	}

	#[inline(always)]
	pub fn info(&self) -> &ComponentInfo {
		&self.info
	}

	#[inline(always)]
	pub fn component_type(&self) -> TypeId {
		self.info.component_type()
	}

	pub fn get<C: ?Sized + 'static>(&self) -> Option<&C> {
		self.info.cast_ref(&*self.value)
	}

	pub fn get_mut<C: ?Sized + 'static>(&mut self) -> Option<&mut C> {
		self.info.cast_mut(&mut *self.value)
	}

	pub fn view(&self, owner: EntityId) -> ComponentRef<'_> {
		ComponentRef {
			owner,
			info: &self.info,
			value: &*self.value,
		}
	}

	pub fn into_value<T: 'static>(self) -> Option<T> {
		self.value.downcast::<T>().ok().map(|value| *value)
	}
}

/// A read-only view of a component together with the entity owning it.
#[derive(Copy, Clone)]
pub struct ComponentRef<'l> {
	owner: EntityId,
	info: &'l ComponentInfo,
	value: &'l dyn Any,
}

impl<'l> ComponentRef<'l> {
	/// The entity this component is attached to.
	pub fn owner(&self) -> EntityId {
		self.owner
	}

	pub fn info(&self) -> &'l ComponentInfo {
		self.info
	}

	pub fn type_name(&self) -> &'static str {
		self.info.type_name()
	}

	/// Returns `true` if the component can be viewed as `C`, either its concrete type or a declared capability.
	pub fn provides<C: ?Sized + 'static>(&self) -> bool {
		self.info.provides(TypeId::of::<C>())
	}

	pub fn get<C: ?Sized + 'static>(&self) -> Option<&'l C> {
		self.info.cast_ref(self.value)
	}
}

impl std::fmt::Debug for ComponentRef<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ComponentRef")
			.field("owner", &self.owner)
			.field("type", &self.info.type_name())
			.finish()
	}
}
