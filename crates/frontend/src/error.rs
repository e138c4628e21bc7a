// Copyright 2025 Irreducible Inc.
//! Hosts error definitions for the frontend crate.

use std::fmt;

use ktrace_core::LayoutError;

use crate::arena::Wire;

/// The arena region a wire belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
	/// Deduplicated constants.
	Constant,
	/// Values supplied by the caller.
	Witness,
	/// Values produced by gates.
	Internal,
}

impl fmt::Display for Region {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Region::Constant => "constant",
			Region::Witness => "witness",
			Region::Internal => "internal",
		};
		f.write_str(name)
	}
}

/// Trace construction error.
///
/// Every variant is fatal for the trace being built: the computation is deterministic, so
/// rerunning with the same input fails the same way.
#[allow(missing_docs)] // errors are self-documenting
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceError {
	#[error("the {region} region is full ({capacity} slots)")]
	CapacityExceeded { region: Region, capacity: usize },
	#[error("wire {wire} is read before it is allocated")]
	UnallocatedWire { wire: Wire },
	#[error("witness wire {wire} is read before its value is bound")]
	UnboundWitness { wire: Wire },
	#[error("witness wire {wire} is already bound")]
	WitnessAlreadyBound { wire: Wire },
	#[error("wire {wire} is not a witness wire")]
	NotAWitness { wire: Wire },
	#[error("invalid arena layout: {0}")]
	Layout(#[from] LayoutError),
}

/// Error parsing a trace dump.
#[allow(missing_docs)] // errors are self-documenting
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DumpError {
	#[error("line {line_no} is malformed: {line:?}")]
	MalformedLine { line_no: usize, line: String },
	#[error("line {line_no} holds slot {actual}, expected slot {expected}")]
	IndexOutOfOrder {
		line_no: usize,
		expected: usize,
		actual: usize,
	},
}
