// Copyright 2025 Irreducible Inc.
//! Region layout of the value arena.

use crate::error::LayoutError;

/// Describes where every region of the value arena lives and how many slots the arena declares.
///
/// The arena is laid out in the following order:
///
/// 1. constants, `n_const_slots` reserved slots,
/// 2. witness values supplied by the caller,
/// 3. internal values produced by gates,
/// 4. zero padding up to `capacity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaLayout {
	/// The number of slots reserved for constants. Might exceed the number of distinct
	/// constants, in which case the trailing slots stay zero.
	pub n_const_slots: usize,
	/// The number of witness values.
	pub n_witness: usize,
	/// The number of internal values.
	///
	/// Those are outputs created by the gates.
	pub n_internal: usize,
	/// The offset at which witness values start.
	pub offset_witness: usize,
	/// The offset at which internal values start.
	pub offset_internal: usize,
	/// The declared number of slots of the arena. This is a power of two.
	pub capacity: usize,
}

impl ArenaLayout {
	/// Computes the layout for the given region sizes. The capacity is the number of used slots
	/// rounded up to the next power of two.
	pub fn new(n_const_slots: usize, n_witness: usize, n_internal: usize) -> Self {
		let offset_witness = n_const_slots;
		let offset_internal = offset_witness + n_witness;
		let capacity = (offset_internal + n_internal).next_power_of_two();
		Self {
			n_const_slots,
			n_witness,
			n_internal,
			offset_witness,
			offset_internal,
			capacity,
		}
	}

	/// Validates that the layout has a correct shape.
	///
	/// Specifically checks that:
	///
	/// - the regions are contiguous and in order,
	/// - the capacity is a power of two,
	/// - the capacity fits every region.
	pub fn validate(&self) -> Result<(), LayoutError> {
		if self.offset_witness != self.n_const_slots {
			return Err(LayoutError::MisplacedWitnessRegion {
				expected: self.n_const_slots,
				actual: self.offset_witness,
			});
		}

		let expected_internal = self.offset_witness + self.n_witness;
		if self.offset_internal != expected_internal {
			return Err(LayoutError::MisplacedInternalRegion {
				expected: expected_internal,
				actual: self.offset_internal,
			});
		}

		if !self.capacity.is_power_of_two() {
			return Err(LayoutError::CapacityNotPowerOfTwo {
				capacity: self.capacity,
			});
		}

		let used = self.used();
		if used > self.capacity {
			return Err(LayoutError::CapacityTooSmall {
				used,
				capacity: self.capacity,
			});
		}

		Ok(())
	}

	/// Checks that `n_const` distinct constants fit into the constant region.
	pub fn check_constants(&self, n_const: usize) -> Result<(), LayoutError> {
		if n_const > self.n_const_slots {
			return Err(LayoutError::ConstantRegionTooSmall {
				n_const_slots: self.n_const_slots,
				n_const,
			});
		}
		Ok(())
	}

	/// The number of slots occupied by the regions, excluding the trailing padding.
	pub fn used(&self) -> usize {
		self.offset_internal + self.n_internal
	}
}
