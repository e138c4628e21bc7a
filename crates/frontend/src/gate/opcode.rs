// Copyright 2025 Irreducible Inc.
use std::fmt;

use ktrace_core::Word;

use crate::gate;

/// The operation performed by a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Opcode {
	// Bitwise operations
	/// `x & y`
	Band,
	/// `x ^ y`
	Bxor,
	/// `x0 ^ x1 ^ ... ^ xn`
	BxorMulti,
	/// `!x`
	Bnot,
	/// `(x & y) ^ w`
	Fax,

	// Rotations
	/// `x <<< n`
	Rotl,
}

impl Opcode {
	/// Returns the shape of this opcode.
	///
	/// `n_inputs` is only consulted by opcodes with a dynamic number of inputs.
	pub fn shape(&self, n_inputs: usize) -> OpcodeShape {
		match self {
			Opcode::Band => gate::band::shape(),
			Opcode::Bxor => gate::bxor::shape(),
			Opcode::BxorMulti => gate::bxor_multi::shape(n_inputs),
			Opcode::Bnot => gate::bnot::shape(),
			Opcode::Fax => gate::fax::shape(),
			Opcode::Rotl => gate::rotl::shape(),
		}
	}

	/// The lowercase mnemonic used in logs and statistics.
	pub fn name(&self) -> &'static str {
		match self {
			Opcode::Band => "band",
			Opcode::Bxor => "bxor",
			Opcode::BxorMulti => "bxor_multi",
			Opcode::Bnot => "bnot",
			Opcode::Fax => "fax",
			Opcode::Rotl => "rotl",
		}
	}
}

impl fmt::Display for Opcode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// The shape of an opcode is a description of its operands. It allows treating a gate as a black
/// box.
///
/// Every gate produces exactly one output wire, so the output count is not part of the shape.
pub struct OpcodeShape {
	/// The constants the gate with this opcode expects to find in the constant pool.
	pub const_in: &'static [Word],
	/// The number of inputs this opcode expects.
	pub n_in: usize,
	/// The number of immediate operands.
	pub n_imm: usize,
}
