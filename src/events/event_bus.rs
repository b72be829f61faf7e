use crate::events::EventHandler;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::collections::HashMap;
use std::any::{Any, TypeId};
use parking_lot::Mutex;
use std::sync::Arc;

type HandlerList = Vec<Box<dyn Any + Send + Sync>>;

/// A synchronous publish/subscribe channel keyed by event type.
///
/// Cloning the bus yields another handle to the same subscriptions.
#[derive(Clone, Default)]
pub struct EventBus {
	handlers: Arc<Mutex<HashMap<TypeId, HandlerList>>>,
}

/// The outcome of a single [`EventBus::publish`] call.
#[derive(Default, Copy, Clone, Eq, PartialEq, Debug)]
pub struct DispatchSummary {
	/// Handlers that ran to completion.
	pub delivered: usize,
	/// Handlers that returned an error or panicked.
	pub failed: usize,
}

impl EventBus {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `handler` for events of type `E`.
	/// Subscribing a handler that is already registered has no effect.
	pub fn subscribe<E: 'static>(&self, handler: &EventHandler<E>) {
		let mut handlers = self.handlers.lock();
		let list = handlers.entry(TypeId::of::<E>()).or_default();
		if list.iter().any(|h| h.downcast_ref::<EventHandler<E>>() == Some(handler)) {
			return;
		}

		list.push(Box::new(handler.clone()));
	}

	/// Removes `handler` from the subscribers of `E`.
	/// The function will return *false* if it wasn't subscribed.
	pub fn unsubscribe<E: 'static>(&self, handler: &EventHandler<E>) -> bool {
		let key = TypeId::of::<E>();
		let mut handlers = self.handlers.lock();
		let Some(list) = handlers.get_mut(&key) else {
			return false;
		};

		let before = list.len();
		list.retain(|h| h.downcast_ref::<EventHandler<E>>() != Some(handler));
		let removed = list.len() != before;

		if list.is_empty() {
			handlers.remove(&key);
		}

		removed
	}

	/// Invokes every handler subscribed to `E` at the time of the call.
	///
	/// Subscriptions changed by a handler only affect later calls. A handler returning an error or
	/// panicking is logged and counted in the returned summary; the remaining handlers still run.
	pub fn publish<E: 'static>(&self, event: &E) -> DispatchSummary {
		let snapshot = self.snapshot::<E>();
		let mut summary = DispatchSummary::default();

		for handler in snapshot {
			match catch_unwind(AssertUnwindSafe(|| handler.call(event))) {
				Ok(Ok(())) => summary.delivered += 1,
				Ok(Err(err)) => {
					log::error!("{:?} failed while handling {}: {}", handler, std::any::type_name::<E>(), err);
					summary.failed += 1;
				},
				Err(panic) => {
					log::error!(
						"{:?} panicked while handling {}: {}",
						handler,
						std::any::type_name::<E>(),
						panic_message(panic.as_ref())
					);
					summary.failed += 1;
				},
			}
		}

		summary
	}

	/// Drops every subscription of every event type.
	pub fn clear_all(&self) {
		self.handlers.lock().clear();
	}

	pub fn subscriber_count<E: 'static>(&self) -> usize {
		self.handlers.lock().get(&TypeId::of::<E>()).map_or(0, Vec::len)
	}

	/// The number of event types with at least one subscriber.
	pub fn event_type_count(&self) -> usize {
		self.handlers.lock().len()
	}

	fn snapshot<E: 'static>(&self) -> Vec<EventHandler<E>> {
		let handlers = self.handlers.lock();
		match handlers.get(&TypeId::of::<E>()) {
			None => vec![],
			Some(list) => list
				.iter()
				.filter_map(|h| h.downcast_ref::<EventHandler<E>>())
				.cloned()
				.collect(),
		}
	}
}

impl std::fmt::Debug for EventBus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EventBus")
			.field("event_types", &self.event_type_count())
			.finish()
	}
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
	if let Some(message) = panic.downcast_ref::<&'static str>() {
		message
	} else if let Some(message) = panic.downcast_ref::<String>() {
		message.as_str()
	} else {
		"<non-string panic payload>"
	}
}
