use crate::systems::{AnySystem, System};
use std::collections::HashSet;
use std::any::TypeId;

pub(crate) struct SystemEntry {
	system_type: TypeId,
	removed: bool,
	// Empty while the system itself is running.
	system: Option<Box<dyn AnySystem>>,
}

impl SystemEntry {
	pub fn new<T: System>(system: T) -> Self {
		Self {
			system_type: TypeId::of::<T>(),
			removed: false,
			system: Some(Box::new(system)),
		}
	}

	fn is_live(&self, system_type: TypeId) -> bool {
		self.system_type == system_type && !self.removed
	}
}

/// The priority-ordered systems of a [World](crate::world::World).
///
/// While the world runs a pass over its systems, only the system currently executing is moved out
/// of the store so that it can borrow the world mutably; every other system stays reachable.
/// The running list keeps its length for the whole pass: systems added during it are queued in
/// `pending`, systems removed during it are flagged and dropped when it ends.
pub(crate) struct SystemStore {
	state: State,
	phase: Phase,
	set: HashSet<TypeId>,
	systems: Vec<SystemEntry>,
	pending: Vec<SystemEntry>,
}

#[derive(Default, Copy, Clone, Eq, PartialEq, Debug)]
enum State {
	#[default]
	Uninitialized,
	Initialized,
}

#[derive(Default, Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Phase {
	#[default]
	Idle,
	Initializing,
	Updating,
}

impl SystemStore {
	pub fn new() -> Self {
		Self {
			state: State::default(),
			phase: Phase::default(),
			set: HashSet::default(),
			systems: Vec::default(),
			pending: Vec::default(),
		}
	}

	#[inline(always)]
	pub fn is_initialized(&self) -> bool {
		self.state == State::Initialized
	}

	#[inline(always)]
	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn len(&self) -> usize {
		self.set.len()
	}

	pub fn contains<T: System>(&self) -> bool {
		self.set.contains(&TypeId::of::<T>())
	}

	/// Claims the slot for a system of type `T`.
	/// Returns *false* if one is already present.
	pub fn reserve<T: System>(&mut self) -> bool {
		self.set.insert(TypeId::of::<T>())
	}

	/// Gives up a [reservation](Self::reserve) that was never followed by an [insert](Self::insert).
	pub fn release<T: System>(&mut self) {
		self.set.remove(&TypeId::of::<T>());
	}

	/// Stores an entry whose type was previously [reserved](Self::reserve).
	pub fn insert(&mut self, entry: SystemEntry) {
		match self.phase {
			Phase::Idle => {
				self.systems.push(entry);
				self.sort();
			},
			Phase::Initializing | Phase::Updating => self.pending.push(entry),
		}
	}

	pub fn remove<T: System>(&mut self) -> bool {
		let system_type = TypeId::of::<T>();
		if !self.set.remove(&system_type) {
			return false;
		}

		if let Some(position) = self.pending.iter().position(|e| e.system_type == system_type) {
			self.pending.remove(position);
			return true;
		}

		let Some(position) = self.systems.iter().position(|e| e.is_live(system_type)) else {
			// Reserved but not stored yet: the system removed itself while being initialised.
			return true;
		};

		if self.phase == Phase::Idle {
			self.systems.remove(position);
		} else {
			let entry = &mut self.systems[position];
			entry.removed = true;
			entry.system = None;
		}

		true
	}

	pub fn get<T: System>(&self) -> Option<&T> {
		let system_type = TypeId::of::<T>();
		let entry = self.entries().find(|e| e.is_live(system_type))?;
		entry.system.as_ref()?.as_any().downcast_ref::<T>()
	}

	pub fn get_mut<T: System>(&mut self) -> Option<&mut T> {
		let system_type = TypeId::of::<T>();
		let entry = self.systems.iter_mut().chain(self.pending.iter_mut()).find(|e| e.is_live(system_type))?;
		entry.system.as_mut()?.as_any_mut().downcast_mut::<T>()
	}

	/// The names of the stored systems, those of the pass first, in execution order.
	pub fn names(&self) -> Vec<&'static str> {
		self.entries()
			.filter(|e| !e.removed)
			.filter_map(|e| e.system.as_ref())
			.map(|system| system.name())
			.collect()
	}

	/// Starts a pass over the stored systems.
	/// Returns *false* if a pass is already running.
	pub fn begin(&mut self, phase: Phase) -> bool {
		debug_assert_ne!(phase, Phase::Idle);
		if self.phase != Phase::Idle {
			return false;
		}

		self.phase = phase;
		if phase == Phase::Initializing {
			self.state = State::Initialized;
		}
		true
	}

	/// The number of systems taking part in the running pass.
	#[inline(always)]
	pub fn pass_len(&self) -> usize {
		self.systems.len()
	}

	/// Moves the system at `index` of the running pass out of the store.
	/// Returns `None` if it was removed.
	pub fn take(&mut self, index: usize) -> Option<Box<dyn AnySystem>> {
		let entry = self.systems.get_mut(index)?;
		if entry.removed {
			return None;
		}
		entry.system.take()
	}

	/// Puts a system [taken](Self::take) from the running pass back, unless it was removed meanwhile.
	pub fn restore(&mut self, index: usize, system: Box<dyn AnySystem>) {
		match self.systems.get_mut(index) {
			Some(entry) if !entry.removed => entry.system = Some(system),
			_ => {},
		}
	}

	/// Ends a pass, dropping the systems removed during it and merging the ones added.
	pub fn finish(&mut self) {
		self.systems.retain(|e| !e.removed);
		self.systems.append(&mut self.pending);
		self.phase = Phase::Idle;
		self.sort();
	}

	fn entries(&self) -> impl Iterator<Item = &SystemEntry> + '_ {
		self.systems.iter().chain(self.pending.iter())
	}

	fn sort(&mut self) {
		// Stable, so systems sharing a priority keep their insertion order.
		self.systems.sort_by_key(|e| e.system.as_ref().map(|system| system.priority()));
	}
}
