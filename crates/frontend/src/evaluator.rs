// Copyright 2025 Irreducible Inc.
//! Concrete [`WireFactory`] implementations.

use ktrace_core::Word;

use crate::{
	arena::{ValueArena, Wire},
	error::TraceError,
	factory::{WireFactory, eval_gate},
	gate::Opcode,
	stat::GateCounts,
};

/// The silent evaluator used to produce traces.
pub struct Evaluator {
	arena: ValueArena,
	gate_counts: GateCounts,
}

impl Evaluator {
	/// Creates an evaluator appending to `arena`.
	pub fn new(arena: ValueArena) -> Self {
		Self {
			arena,
			gate_counts: GateCounts::default(),
		}
	}

	/// Consumes the evaluator, returning the arena.
	pub fn into_arena(self) -> ValueArena {
		self.arena
	}
}

impl WireFactory for Evaluator {
	fn arena(&self) -> &ValueArena {
		&self.arena
	}

	fn arena_mut(&mut self) -> &mut ValueArena {
		&mut self.arena
	}

	fn gate_counts(&self) -> &GateCounts {
		&self.gate_counts
	}

	fn emit_gate(
		&mut self,
		opcode: Opcode,
		inputs: &[Wire],
		imm: &[u32],
	) -> Result<Wire, TraceError> {
		let (wire, _) = eval_gate(&mut self.arena, opcode, inputs, imm)?;
		self.gate_counts.record(opcode);
		Ok(wire)
	}
}

/// An evaluator that reports every allocation as a `tracing` event at `TRACE` level.
///
/// It produces exactly the same arena as [`Evaluator`].
pub struct TracingEvaluator {
	inner: Evaluator,
}

impl TracingEvaluator {
	/// Creates an instrumented evaluator appending to `arena`.
	///
	/// The constants `arena` was seeded with are reported right away, one event each.
	pub fn new(arena: ValueArena) -> Self {
		for (wire, value) in arena.constants() {
			tracing::trace!(output = %wire, value = ?value, "constant");
		}
		Self {
			inner: Evaluator::new(arena),
		}
	}

	/// Consumes the evaluator, returning the arena.
	pub fn into_arena(self) -> ValueArena {
		self.inner.into_arena()
	}
}

impl WireFactory for TracingEvaluator {
	fn arena(&self) -> &ValueArena {
		self.inner.arena()
	}

	fn arena_mut(&mut self) -> &mut ValueArena {
		self.inner.arena_mut()
	}

	fn gate_counts(&self) -> &GateCounts {
		self.inner.gate_counts()
	}

	fn emit_gate(
		&mut self,
		opcode: Opcode,
		inputs: &[Wire],
		imm: &[u32],
	) -> Result<Wire, TraceError> {
		let (wire, value) = eval_gate(self.inner.arena_mut(), opcode, inputs, imm)?;
		self.inner.gate_counts.record(opcode);
		tracing::trace!(%opcode, ?inputs, ?imm, output = %wire, value = ?value, "gate");
		Ok(wire)
	}

	fn add_constant(&mut self, value: Word) -> Result<Wire, TraceError> {
		let known = self.arena().constant(value).is_some();
		let wire = self.inner.add_constant(value)?;
		if !known {
			tracing::trace!(output = %wire, value = ?value, "constant");
		}
		Ok(wire)
	}

	fn add_witness(&mut self) -> Result<Wire, TraceError> {
		let wire = self.inner.add_witness()?;
		tracing::trace!(output = %wire, "witness");
		Ok(wire)
	}
}
