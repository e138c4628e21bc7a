// Copyright 2025 Irreducible Inc.
//! The value arena: a flat store of 64-bit values addressed by [`Wire`].

use std::collections::{BTreeSet, HashMap};

use cranelift_entity::{EntityRef, SecondaryMap, entity_impl};
use ktrace_core::{ArenaLayout, Word};

use crate::error::{Region, TraceError};

/// A wire names one immutable slot of the [`ValueArena`].
///
/// The wire index is the position of its value in the trace.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Wire(u32);
entity_impl!(Wire, "w");

#[derive(Copy, Clone, Debug, Default)]
enum Slot {
	#[default]
	Vacant,
	Constant(Word),
	Witness(Option<Word>),
	Internal(Word),
}

/// Maps every distinct constant value to the single wire that holds it.
#[derive(Default)]
struct ConstPool {
	pool: HashMap<Word, Wire>,
}

impl ConstPool {
	fn get(&self, value: Word) -> Option<Wire> {
		self.pool.get(&value).cloned()
	}

	/// Records `wire` as the holder of `word`. Each value is recorded once.
	fn insert(&mut self, word: Word, wire: Wire) {
		let prev = self.pool.insert(word, wire);
		assert!(prev.is_none());
	}

	fn len(&self) -> usize {
		self.pool.len()
	}
}

/// Append-only store of trace values.
///
/// The arena is partitioned according to its [`ArenaLayout`] into a constant region, a witness
/// region and an internal region. Every region is filled front to back and nothing is ever
/// removed. The only value that may be assigned after allocation is a witness, exactly once.
pub struct ValueArena {
	layout: ArenaLayout,
	slots: SecondaryMap<Wire, Slot>,
	const_pool: ConstPool,
	n_witness: usize,
	n_internal: usize,
}

impl ValueArena {
	/// Creates an arena with the given layout and seeds its constant region.
	///
	/// The seed is deduplicated and laid out in ascending order of value, which makes the
	/// constant region independent of the order in which constants are mentioned.
	pub fn new(
		layout: ArenaLayout,
		constants: impl IntoIterator<Item = Word>,
	) -> Result<Self, TraceError> {
		layout.validate()?;

		let constants: BTreeSet<Word> = constants.into_iter().collect();
		layout.check_constants(constants.len())?;

		let mut arena = Self {
			slots: SecondaryMap::with_capacity(layout.capacity),
			layout,
			const_pool: ConstPool::default(),
			n_witness: 0,
			n_internal: 0,
		};
		for value in constants {
			arena.add_constant(value)?;
		}
		Ok(arena)
	}

	/// Returns the layout of this arena.
	pub fn layout(&self) -> &ArenaLayout {
		&self.layout
	}

	/// Returns the wire holding `value`, allocating it in the constant region on first use.
	pub fn add_constant(&mut self, value: Word) -> Result<Wire, TraceError> {
		if let Some(wire) = self.const_pool.get(value) {
			return Ok(wire);
		}
		let n_const = self.const_pool.len();
		if n_const == self.layout.n_const_slots {
			return Err(TraceError::CapacityExceeded {
				region: Region::Constant,
				capacity: self.layout.n_const_slots,
			});
		}
		let wire = Wire::new(n_const);
		self.slots[wire] = Slot::Constant(value);
		self.const_pool.insert(value, wire);
		Ok(wire)
	}

	/// Returns the wire holding `value` if it was allocated.
	pub fn constant(&self, value: Word) -> Option<Wire> {
		self.const_pool.get(value)
	}

	/// Allocates the next witness wire. Its value stays unbound until [`Self::bind_witness`].
	pub fn add_witness(&mut self) -> Result<Wire, TraceError> {
		if self.n_witness == self.layout.n_witness {
			return Err(TraceError::CapacityExceeded {
				region: Region::Witness,
				capacity: self.layout.n_witness,
			});
		}
		let wire = Wire::new(self.layout.offset_witness + self.n_witness);
		self.slots[wire] = Slot::Witness(None);
		self.n_witness += 1;
		Ok(wire)
	}

	/// Binds the value of a witness wire. Every witness is bound exactly once.
	pub fn bind_witness(&mut self, wire: Wire, value: Word) -> Result<(), TraceError> {
		match self.slots[wire] {
			Slot::Witness(None) => {
				self.slots[wire] = Slot::Witness(Some(value));
				Ok(())
			}
			Slot::Witness(Some(_)) => Err(TraceError::WitnessAlreadyBound { wire }),
			Slot::Vacant => Err(TraceError::UnallocatedWire { wire }),
			Slot::Constant(_) | Slot::Internal(_) => Err(TraceError::NotAWitness { wire }),
		}
	}

	/// Appends an already computed value to the internal region.
	pub fn add_internal(&mut self, value: Word) -> Result<Wire, TraceError> {
		if self.n_internal == self.layout.n_internal {
			return Err(TraceError::CapacityExceeded {
				region: Region::Internal,
				capacity: self.layout.n_internal,
			});
		}
		let wire = Wire::new(self.layout.offset_internal + self.n_internal);
		self.slots[wire] = Slot::Internal(value);
		self.n_internal += 1;
		Ok(wire)
	}

	/// Reads the value of the given wire.
	pub fn get(&self, wire: Wire) -> Result<Word, TraceError> {
		if wire.index() >= self.layout.capacity {
			return Err(TraceError::UnallocatedWire { wire });
		}
		match self.slots[wire] {
			Slot::Constant(value) | Slot::Internal(value) | Slot::Witness(Some(value)) => Ok(value),
			Slot::Witness(None) => Err(TraceError::UnboundWitness { wire }),
			Slot::Vacant => Err(TraceError::UnallocatedWire { wire }),
		}
	}

	/// Iterates over the allocated constants in wire order.
	pub fn constants(&self) -> impl Iterator<Item = (Wire, Word)> + '_ {
		(0..self.const_pool.len()).filter_map(|index| {
			let wire = Wire::new(index);
			match self.slots[wire] {
				Slot::Constant(value) => Some((wire, value)),
				_ => None,
			}
		})
	}

	/// The number of distinct constants allocated.
	pub fn n_const(&self) -> usize {
		self.const_pool.len()
	}

	/// The number of witness wires allocated.
	pub fn n_witness(&self) -> usize {
		self.n_witness
	}

	/// The number of internal wires allocated.
	pub fn n_internal(&self) -> usize {
		self.n_internal
	}

	/// Returns every slot of the arena in wire order, padded with zeros up to the declared
	/// capacity.
	///
	/// Fails if a witness wire is still unbound.
	pub fn words(&self) -> Result<Vec<Word>, TraceError> {
		let mut words = vec![Word::ZERO; self.layout.capacity];
		for (index, word) in words.iter_mut().enumerate() {
			let wire = Wire::new(index);
			*word = match self.slots[wire] {
				Slot::Vacant => Word::ZERO,
				_ => self.get(wire)?,
			};
		}
		Ok(words)
	}
}
