// Copyright 2025 Irreducible Inc.
//! Bitwise NOT operation.
//!
//! Returns `z = !x`.
//!
//! The complement is XOR with the all-ones word, so the gate registers that constant in the pool
//! even though it is not an operand.

use ktrace_core::Word;

use crate::gate::opcode::OpcodeShape;

pub fn shape() -> OpcodeShape {
	OpcodeShape {
		const_in: &[Word::ALL_ONE],
		n_in: 1,
		n_imm: 0,
	}
}

pub fn evaluate(inputs: &[Word], _imm: &[u32]) -> Word {
	let [x] = inputs else { unreachable!() };
	*x ^ Word::ALL_ONE
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	proptest! {
		#[test]
		fn test_bnot(x: u64) {
			prop_assert_eq!(evaluate(&[Word(x)], &[]), Word(!x));
		}
	}
}
