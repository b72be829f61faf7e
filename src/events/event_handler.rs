use std::sync::Arc;

/// The error type returned by a fallible [EventHandler].
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

type HandlerFn<E> = dyn Fn(&E) -> Result<(), HandlerError> + Send + Sync;

/// A callback subscribed to events of type `E`.
///
/// Handlers are compared by identity: clones of the same handler are equal, two handlers built
/// from identical closures are not. Keep a clone around to [unsubscribe](crate::events::EventBus::unsubscribe).
pub struct EventHandler<E: 'static> {
	func: Arc<HandlerFn<E>>,
}

impl<E: 'static> EventHandler<E> {
	pub fn new(func: impl Fn(&E) + Send + Sync + 'static) -> Self {
		Self::fallible(move |event| {
			func(event);
			Ok(())
		})
	}

	/// Creates a handler whose errors are reported by the bus instead of being handled in place.
	pub fn fallible(func: impl Fn(&E) -> Result<(), HandlerError> + Send + Sync + 'static) -> Self {
		Self { func: Arc::new(func) }
	}

	#[inline(always)]
	pub(crate) fn call(&self, event: &E) -> Result<(), HandlerError> {
		(self.func)(event)
	}
}

impl<E: 'static> Clone for EventHandler<E> {
	fn clone(&self) -> Self {
		Self {
			func: self.func.clone(),
		}
	}
}

impl<E: 'static> PartialEq for EventHandler<E> {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.func, &other.func)
	}
}

impl<E: 'static> Eq for EventHandler<E> {}

impl<E: 'static> std::fmt::Debug for EventHandler<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "EventHandler<{}>({:p})", std::any::type_name::<E>(), Arc::as_ptr(&self.func))
	}
}
