// Copyright 2025 Irreducible Inc.
//! Hosts error definitions for the core crate.

/// Trace layout related error.
#[allow(missing_docs)] // errors are self-documenting
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
	#[error("the declared capacity must be a power of two, got: {capacity}")]
	CapacityNotPowerOfTwo { capacity: usize },
	#[error("the constant region holds {n_const_slots} slots but {n_const} constants are required")]
	ConstantRegionTooSmall { n_const_slots: usize, n_const: usize },
	#[error("the regions need {used} slots but the declared capacity is {capacity}")]
	CapacityTooSmall { used: usize, capacity: usize },
	#[error("the witness region must start at {expected}, got: {actual}")]
	MisplacedWitnessRegion { expected: usize, actual: usize },
	#[error("the internal region must start at {expected}, got: {actual}")]
	MisplacedInternalRegion { expected: usize, actual: usize },
}
