use crate::entities::Entity;
use std::any::TypeId;

/// A set of [component](crate::components::Component) types or capabilities queried together,
/// written as a tuple of references: `(&Position, &Velocity)` or `(&dyn Drawable, &Sprite)`.
///
/// The first element selects the index bucket that is scanned, the others narrow it down,
/// so the rarest type should come first.
pub trait ComponentSet {
	/// The key whose bucket drives the query.
	fn lead() -> TypeId;

	/// Checks the remaining elements of the set against an entity.
	fn matches_rest(entity: &Entity) -> bool;
}

macro_rules! impl_component_set {
	($first: ident $(, $rest: ident)*) => {
		impl<$first: ?Sized + 'static $(, $rest: ?Sized + 'static)*> ComponentSet for (&$first, $(&$rest),*) {
			#[inline(always)]
			fn lead() -> TypeId {
				TypeId::of::<$first>()
			}

			#[inline(always)]
			#[allow(unused_variables)]
			fn matches_rest(entity: &Entity) -> bool {
				true $(&& entity.has_component::<$rest>())*
			}
		}
	};
}

impl_component_set!(T0);
impl_component_set!(T0, T1);
impl_component_set!(T0, T1, T2);
impl_component_set!(T0, T1, T2, T3);
impl_component_set!(T0, T1, T2, T3, T4);
impl_component_set!(T0, T1, T2, T3, T4, T5);
