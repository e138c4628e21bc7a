// Copyright 2025 Irreducible Inc.
//! The gate layer.
//!
//! Every gate is a pure function of its operand values and immediates. Recording the result in
//! the arena is the job of the [`WireFactory`](crate::WireFactory).

use ktrace_core::Word;

pub mod opcode;

pub use opcode::{Opcode, OpcodeShape};

pub mod band;
pub mod bnot;
pub mod bxor;
pub mod bxor_multi;
pub mod fax;
pub mod rotl;

/// Computes the output of a gate with the given opcode.
///
/// # Panics
///
/// Panics if the number of inputs or immediates does not match the shape of `opcode`.
pub fn evaluate(opcode: Opcode, inputs: &[Word], imm: &[u32]) -> Word {
	let shape = opcode.shape(inputs.len());
	assert_eq!(inputs.len(), shape.n_in, "{opcode} expects {} inputs", shape.n_in);
	assert_eq!(imm.len(), shape.n_imm, "{opcode} expects {} immediates", shape.n_imm);
	match opcode {
		Opcode::Band => band::evaluate(inputs, imm),
		Opcode::Bxor => bxor::evaluate(inputs, imm),
		Opcode::BxorMulti => bxor_multi::evaluate(inputs, imm),
		Opcode::Bnot => bnot::evaluate(inputs, imm),
		Opcode::Fax => fax::evaluate(inputs, imm),
		Opcode::Rotl => rotl::evaluate(inputs, imm),
	}
}
