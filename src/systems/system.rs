use crate::world::World;
use std::any::Any;

/// It provides the logic for modifying the state of [Entities](crate::entities::Entity)
/// and their associated [Components](crate::components::Component).
///
/// Systems run once per [`World::update`] in ascending [Priority] order.
/// A [World] holds at most one system of each concrete type.
pub trait System: 'static {
	/// Initialises the [System].
	/// **This function should not be called by user code.**
	fn initialize(&mut self, _world: &mut World) {}

	/// Executes the system for one tick.
	fn update(&mut self, world: &mut World, delta_time: f32);

	/// Disabled systems are skipped by [`World::update`].
	fn enabled(&self) -> bool {
		true
	}

	fn priority(&self) -> Priority {
		Priority::NORMAL
	}

	fn name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}
}

/// The position of a [System] in the update order. Lower values run first.
#[derive(Default, Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct Priority(pub i32);

impl Priority {
	pub const FIRST: Self = Self(-1000);
	pub const EARLY: Self = Self(-100);
	pub const NORMAL: Self = Self(0);
	pub const LATE: Self = Self(100);
	pub const LAST: Self = Self(1000);
}

impl From<i32> for Priority {
	fn from(value: i32) -> Self {
		Self(value)
	}
}

pub(crate) trait AnySystem: System {
	fn as_any(&self) -> &dyn Any;
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: System> AnySystem for T {
	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}
