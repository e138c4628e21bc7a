// Copyright 2025 Irreducible Inc.
//! 64-bit rotate left.
//!
//! Returns `z = x <<< n`.
//!
//! The rotation amount is an immediate operand in `1..64`. Rotation by zero is the identity and
//! never reaches the gate layer.

use ktrace_core::Word;

use crate::gate::opcode::OpcodeShape;

pub fn shape() -> OpcodeShape {
	OpcodeShape {
		const_in: &[],
		n_in: 1,
		n_imm: 1,
	}
}

pub fn evaluate(inputs: &[Word], imm: &[u32]) -> Word {
	let [x] = inputs else { unreachable!() };
	let [n] = imm else { unreachable!() };
	x.rotl(*n)
}
