// Copyright 2025 Irreducible Inc.
//! The gate interface shared by every evaluator.

use ktrace_core::Word;

use crate::{
	arena::{ValueArena, Wire},
	error::TraceError,
	gate::{self, Opcode},
	stat::GateCounts,
};

/// A capability to allocate wires and evaluate gates over a [`ValueArena`].
///
/// Every gate reads the values of its operand wires, computes its result immediately and appends
/// it to the internal region, so building the trace and computing it happen in lock-step.
///
/// Implementors decide what happens around each gate through [`Self::emit_gate`]. All gate
/// methods are provided on top of it.
pub trait WireFactory {
	/// The arena this factory appends to.
	fn arena(&self) -> &ValueArena;

	/// Mutable access to the arena.
	fn arena_mut(&mut self) -> &mut ValueArena;

	/// Per-opcode tally of the gates emitted so far.
	fn gate_counts(&self) -> &GateCounts;

	/// Evaluates one gate and appends its output to the internal region.
	fn emit_gate(&mut self, opcode: Opcode, inputs: &[Wire], imm: &[u32])
	-> Result<Wire, TraceError>;

	/// Returns the wire holding the constant `value`.
	fn add_constant(&mut self, value: Word) -> Result<Wire, TraceError> {
		self.arena_mut().add_constant(value)
	}

	/// Allocates a witness wire whose value is bound later.
	fn add_witness(&mut self) -> Result<Wire, TraceError> {
		self.arena_mut().add_witness()
	}

	/// Binds the value of a witness wire.
	fn bind_witness(&mut self, wire: Wire, value: Word) -> Result<(), TraceError> {
		self.arena_mut().bind_witness(wire, value)
	}

	/// Reads the value of a wire.
	fn value(&self, wire: Wire) -> Result<Word, TraceError> {
		self.arena().get(wire)
	}

	/// Bitwise AND.
	///
	/// Returns z = x & y
	fn band(&mut self, x: Wire, y: Wire) -> Result<Wire, TraceError> {
		self.emit_gate(Opcode::Band, &[x, y], &[])
	}

	/// Bitwise XOR.
	///
	/// Returns z = x ^ y
	fn bxor(&mut self, x: Wire, y: Wire) -> Result<Wire, TraceError> {
		self.emit_gate(Opcode::Bxor, &[x, y], &[])
	}

	/// Multi-way bitwise XOR operation.
	///
	/// Takes a variable-length slice of wires and XORs them all together.
	///
	/// Returns z = i ^ j ^ k ^ ...
	///
	/// A single wire is returned as-is and two wires become a [`Self::bxor`].
	fn bxor_multi(&mut self, wires: &[Wire]) -> Result<Wire, TraceError> {
		assert!(!wires.is_empty(), "bxor_multi requires at least one input");

		if wires.len() == 1 {
			return Ok(wires[0]);
		}

		if wires.len() == 2 {
			return self.bxor(wires[0], wires[1]);
		}

		self.emit_gate(Opcode::BxorMulti, wires, &[])
	}

	/// Bitwise NOT.
	///
	/// Returns z = !x
	fn bnot(&mut self, x: Wire) -> Result<Wire, TraceError> {
		self.emit_gate(Opcode::Bnot, &[x], &[])
	}

	/// Rotate left.
	///
	/// Returns z = x <<< n
	///
	/// # Panics
	///
	/// Panics if `n` >= 64.
	fn rotl(&mut self, x: Wire, n: u32) -> Result<Wire, TraceError> {
		assert!(n < 64, "rotate amount n={n} out of range");
		if n == 0 {
			return Ok(x);
		}
		self.emit_gate(Opcode::Rotl, &[x], &[n])
	}

	/// Fused AND-XOR.
	///
	/// Returns z = (x & y) ^ w
	fn fax(&mut self, x: Wire, y: Wire, w: Wire) -> Result<Wire, TraceError> {
		self.emit_gate(Opcode::Fax, &[x, y, w], &[])
	}
}

/// Evaluates a gate against `arena` and appends the result. Returns the output wire and value.
pub(crate) fn eval_gate(
	arena: &mut ValueArena,
	opcode: Opcode,
	inputs: &[Wire],
	imm: &[u32],
) -> Result<(Wire, Word), TraceError> {
	let shape = opcode.shape(inputs.len());
	for &value in shape.const_in {
		arena.add_constant(value)?;
	}
	let values = inputs
		.iter()
		.map(|&wire| arena.get(wire))
		.collect::<Result<Vec<_>, _>>()?;
	let value = gate::evaluate(opcode, &values, imm);
	let wire = arena.add_internal(value)?;
	Ok((wire, value))
}
