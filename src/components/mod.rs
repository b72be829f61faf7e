//! [Components](Component) hold the data attached to [entities](crate::entities::Entity).
//!
//! A component type is indexed under its concrete type and under every capability it declares,
//! so systems can query "everything that is `dyn Drawable`" without knowing the concrete types.

mod component_ref;
mod component_set;
mod component_info;
mod component_type;

pub use component_set::*;
pub use component_info::*;
pub use component_type::*;
pub use component_ref::ComponentRef;
pub use keystone_ecs_derive::Component;

pub(crate) use component_ref::ComponentSlot;
