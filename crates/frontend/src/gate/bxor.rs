// Copyright 2025 Irreducible Inc.
//! Bitwise XOR operation.
//!
//! Returns `z = x ^ y`.

use ktrace_core::Word;

use crate::gate::opcode::OpcodeShape;

pub fn shape() -> OpcodeShape {
	OpcodeShape {
		const_in: &[],
		n_in: 2,
		n_imm: 0,
	}
}

pub fn evaluate(inputs: &[Word], _imm: &[u32]) -> Word {
	let [x, y] = inputs else { unreachable!() };
	*x ^ *y
}
