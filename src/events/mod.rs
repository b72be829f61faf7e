//! A type-keyed publish/subscribe channel for notifications that do not fit the
//! component-query model.
//!
//! An [EventBus] is an explicit context object: a [World](crate::world::World) carries one and
//! hands it to its systems, while tests can create as many isolated buses as they need.

mod event_bus;
mod event_handler;

pub use event_bus::*;
pub use event_handler::*;
