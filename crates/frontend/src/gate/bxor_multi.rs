// Copyright 2025 Irreducible Inc.
//! N-way bitwise XOR operation.
//!
//! Returns `z = x0 ^ x1 ^ ... ^ xn`.
//!
//! Keccak uses it for the 5-way column parities of theta. The inputs are folded left to right,
//! although the result does not depend on the order.

use ktrace_core::Word;

use crate::gate::opcode::OpcodeShape;

pub fn shape(n_inputs: usize) -> OpcodeShape {
	OpcodeShape {
		const_in: &[],
		n_in: n_inputs,
		n_imm: 0,
	}
}

pub fn evaluate(inputs: &[Word], _imm: &[u32]) -> Word {
	inputs.iter().fold(Word::ZERO, |acc, &x| acc ^ x)
}
