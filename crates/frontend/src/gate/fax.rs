// Copyright 2025 Irreducible Inc.
//! Fused AND-XOR operation.
//!
//! Returns `z = (x & y) ^ w`.
//!
//! # Algorithm
//!
//! Computes the bitwise AND of two words followed by XOR with a third word. With `x` being a
//! complemented lane this is exactly one output lane of Keccak's chi step, `(!a & b) ^ c`, in a
//! single wire.

use ktrace_core::Word;

use crate::gate::opcode::OpcodeShape;

pub fn shape() -> OpcodeShape {
	OpcodeShape {
		const_in: &[],
		n_in: 3,
		n_imm: 0,
	}
}

pub fn evaluate(inputs: &[Word], _imm: &[u32]) -> Word {
	let [x, y, w] = inputs else { unreachable!() };
	(*x & *y) ^ *w
}
