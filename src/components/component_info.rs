//! Runtime description of a [Component] type.
//!
//! A [ComponentInfo] is built the first time a component type is attached to an entity and cached
//! for the rest of the process. It holds every query key the type answers to: its own concrete
//! type first, followed by the capabilities declared in [`Component::describe`].

use crate::components::{Capabilities, Capability, Component};
use std::collections::HashMap;
use lazy_static::lazy_static;
use std::any::{Any, TypeId};
use parking_lot::RwLock;
use std::sync::Arc;

lazy_static! {
	static ref TYPE_TO_INFO: RwLock<HashMap<TypeId, Arc<ComponentInfo>>> = RwLock::new(HashMap::default());
}

pub struct ComponentInfo {
	name: &'static str,
	capabilities: Vec<Capability>,
}

impl ComponentInfo {
	/// Get the cached [ComponentInfo] of the type `T`.
	pub fn of<T: Component>() -> Arc<ComponentInfo> {
		let key = TypeId::of::<T>();
		if let Some(info) = TYPE_TO_INFO.read().get(&key) {
			return info.clone();
		}

		create_info::<T>(key)
	}

	/// The concrete type of the component.
	pub fn component_type(&self) -> TypeId {
		self.capabilities[0].id()
	}

	pub fn type_name(&self) -> &'static str {
		self.name
	}

	/// Every key the component is indexed under, starting with its concrete type.
	pub fn keys(&self) -> impl Iterator<Item = TypeId> + '_ {
		self.capabilities.iter().map(Capability::id)
	}

	pub fn capabilities(&self) -> &[Capability] {
		&self.capabilities
	}

	pub fn provides(&self, key: TypeId) -> bool {
		self.capabilities.iter().any(|c| c.id() == key)
	}

	pub(crate) fn cast_ref<'l, C: ?Sized + 'static>(&self, value: &'l dyn Any) -> Option<&'l C> {
		let key = TypeId::of::<C>();
		self.capabilities.iter().find(|c| c.id() == key)?.cast_ref(value)
	}

	pub(crate) fn cast_mut<'l, C: ?Sized + 'static>(&self, value: &'l mut dyn Any) -> Option<&'l mut C> {
		let key = TypeId::of::<C>();
		self.capabilities.iter().find(|c| c.id() == key)?.cast_mut(value)
	}
}

impl std::fmt::Debug for ComponentInfo {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ComponentInfo")
			.field("name", &self.name)
			.field("capabilities", &self.capabilities.iter().map(Capability::name).collect::<Vec<_>>())
			.finish()
	}
}

#[inline(never)]
fn create_info<T: Component>(key: TypeId) -> Arc<ComponentInfo> {
	let mut capabilities = Capabilities::<T>::new();
	T::describe(&mut capabilities);

	let info = Arc::new(ComponentInfo {
		name: std::any::type_name::<T>(),
		capabilities: capabilities.into_entries(),
	});

	let mut tti = TYPE_TO_INFO.write();
	tti.entry(key)
		.or_insert_with(|| {
			log::trace!("Registered component type {:?}", info);
			info.clone()
		})
		.clone()
}
