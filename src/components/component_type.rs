use std::marker::PhantomData;
use std::any::{Any, TypeId};

/// A piece of data that can be attached to an [entity](crate::entities::Entity).
///
/// Besides its concrete type, a component can be looked up through any capability it declares
/// in [`describe`](Component::describe). Capabilities are trait-object types (`dyn Trait`), which
/// lets a single query match every component implementing a shared behaviour.
///
/// Implementations are normally generated by #\[derive([`Component`](keystone_ecs_derive::Component))]
/// or by [`impl_component!`](crate::impl_component).
pub trait Component: Sized + 'static {
	/// Declares the capabilities provided by this component type.
	fn describe(_capabilities: &mut Capabilities<Self>) {}
}

/// Converts a [Component] into one of the capabilities it declares.
///
/// The implementation is a plain unsizing coercion, so it is generated by
/// #\[derive([`Component`](keystone_ecs_derive::Component))] for every type listed in
/// `#[capabilities(...)]`.
pub trait CastTo<C: ?Sized + 'static> {
	fn cast_ref(&self) -> &C;
	fn cast_mut(&mut self) -> &mut C;
}

/// The typed capability list handed to [`Component::describe`].
pub struct Capabilities<T: Component> {
	entries: Vec<Capability>,
	phantom: PhantomData<fn() -> T>,
}

impl<T: Component> Capabilities<T> {
	pub(crate) fn new() -> Self {
		Self {
			entries: vec![Capability::new::<T>(self_ref::<T>, self_mut::<T>)],
			phantom: PhantomData::default(),
		}
	}

	/// Registers the capability `C`. Declaring the same capability twice has no effect.
	pub fn provide<C: ?Sized + 'static>(&mut self) -> &mut Self
	where
		T: CastTo<C>,
	{
		let id = TypeId::of::<C>();
		if !self.entries.iter().any(|c| c.id == id) {
			self.entries.push(Capability::new::<C>(erased_ref::<T, C>, erased_mut::<T, C>));
		}
		self
	}

	pub(crate) fn into_entries(self) -> Vec<Capability> {
		self.entries
	}
}

/// A type-erased query key together with the caster producing `&C` from a stored component.
pub struct Capability {
	id: TypeId,
	name: &'static str,
	caster: Box<dyn Any + Send + Sync>,
}

struct Caster<C: ?Sized + 'static> {
	cast_ref: fn(&dyn Any) -> Option<&C>,
	cast_mut: fn(&mut dyn Any) -> Option<&mut C>,
}

impl Capability {
	fn new<C: ?Sized + 'static>(
		cast_ref: fn(&dyn Any) -> Option<&C>, cast_mut: fn(&mut dyn Any) -> Option<&mut C>,
	) -> Self {
		Self {
			id: TypeId::of::<C>(),
			name: std::any::type_name::<C>(),
			caster: Box::new(Caster { cast_ref, cast_mut }),
		}
	}

	pub fn id(&self) -> TypeId {
		self.id
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub(crate) fn cast_ref<'l, C: ?Sized + 'static>(&self, value: &'l dyn Any) -> Option<&'l C> {
		let caster = self.caster.downcast_ref::<Caster<C>>()?;
		(caster.cast_ref)(value)
	}

	pub(crate) fn cast_mut<'l, C: ?Sized + 'static>(&self, value: &'l mut dyn Any) -> Option<&'l mut C> {
		let caster = self.caster.downcast_ref::<Caster<C>>()?;
		(caster.cast_mut)(value)
	}
}

fn self_ref<T: 'static>(value: &dyn Any) -> Option<&T> {
	value.downcast_ref::<T>()
}

fn self_mut<T: 'static>(value: &mut dyn Any) -> Option<&mut T> {
	value.downcast_mut::<T>()
}

fn erased_ref<T: CastTo<C> + 'static, C: ?Sized + 'static>(value: &dyn Any) -> Option<&C> {
	value.downcast_ref::<T>().map(<T as CastTo<C>>::cast_ref)
}

fn erased_mut<T: CastTo<C> + 'static, C: ?Sized + 'static>(value: &mut dyn Any) -> Option<&mut C> {
	value.downcast_mut::<T>().map(<T as CastTo<C>>::cast_mut)
}

/// Implements [Component] for a type, optionally declaring the traits it can be queried as.
///
/// ```ignore
/// impl_component!(Circle: Drawable, Shape);
/// impl_component!(Health);
/// ```
#[macro_export]
macro_rules! impl_component {
	($t: ty $(: $($cap: path),+ $(,)?)?) => {
		impl $crate::components::Component for $t {
			#[allow(unused_variables)]
			fn describe(capabilities: &mut $crate::components::Capabilities<Self>) {
				$($(capabilities.provide::<dyn $cap>();)+)?
			}
		}

		$($(
			impl $crate::components::CastTo<dyn $cap> for $t {
				fn cast_ref(&self) -> &(dyn $cap + 'static) {
					self
				}

				fn cast_mut(&mut self) -> &mut (dyn $cap + 'static) {
					self
				}
			}
		)+)?
	};
}
