// Copyright 2025 Irreducible Inc.
use std::array;

use ktrace_core::{Word, consts::N_ROUNDS};
use ktrace_frontend::{TraceError, Wire, WireFactory};

// ι round constants
pub const RC: [u64; N_ROUNDS] = [
	0x0000_0000_0000_0001,
	0x0000_0000_0000_8082,
	0x8000_0000_0000_808A,
	0x8000_0000_8000_8000,
	0x0000_0000_0000_808B,
	0x0000_0000_8000_0001,
	0x8000_0000_8000_8081,
	0x8000_0000_0000_8009,
	0x0000_0000_0000_008A,
	0x0000_0000_0000_0088,
	0x0000_0000_8000_8009,
	0x0000_0000_8000_000A,
	0x0000_0000_8000_808B,
	0x8000_0000_0000_008B,
	0x8000_0000_0000_8089,
	0x8000_0000_0000_8003,
	0x8000_0000_0000_8002,
	0x8000_0000_0000_0080,
	0x0000_0000_0000_800A,
	0x8000_0000_8000_000A,
	0x8000_0000_8000_8081,
	0x8000_0000_0000_8080,
	0x0000_0000_8000_0001,
	0x8000_0000_8000_8008,
];

// ρ rotation offsets r[x,y] in lane order (i = x + 5*y)
#[rustfmt::skip]
pub const R: [u32; 25] =  [
	 0,  1, 62, 28, 27,
	36, 44,  6, 55, 20,
	 3, 10, 43, 25, 39,
	41, 45, 15, 21,  8,
	18,  2, 61, 56, 14,
];

/// Gates emitted by theta: 5 column parities, 5 rotations, 5 `D` words and 25 lane updates.
pub const THETA_GATES: usize = 5 + 10 + 25;

/// Gates emitted by the fused rho and pi steps: one rotation per nonzero offset.
pub const RHO_PI_GATES: usize = {
	let mut n = 0;
	let mut i = 0;
	while i < R.len() {
		if R[i] != 0 {
			n += 1;
		}
		i += 1;
	}
	n
};

/// Gates emitted by chi: a `bnot` and a `fax` per lane.
pub const CHI_GATES: usize = 2 * 25;

/// Gates emitted by iota.
pub const IOTA_GATES: usize = 1;

/// Gates emitted by one round of the permutation.
pub const GATES_PER_ROUND: usize = THETA_GATES + RHO_PI_GATES + CHI_GATES + IOTA_GATES;

/// Gates emitted by the full permutation.
pub const GATES_PER_PERMUTATION: usize = N_ROUNDS * GATES_PER_ROUND;

#[inline(always)]
pub const fn idx(x: usize, y: usize) -> usize {
	x + 5 * y
}

/// Keccak f\[1600\] permutation expressed in gates.
///
/// The state holds the wire currently naming each lane. Every step reassigns lanes to freshly
/// allocated wires and never touches the value of an existing wire.
pub struct Permutation;

impl Permutation {
	/// Perform the Keccak f\[1600\] permutation.
	///
	/// ## Arguments
	///
	/// * `f` - The wire factory to emit gates into.
	/// * `state` - The state to perform the permutation on.
	pub fn keccak_f1600<F: WireFactory>(
		f: &mut F,
		state: &mut [Wire; 25],
	) -> Result<(), TraceError> {
		let _span = tracing::debug_span!("keccak_f1600").entered();
		for round in 0..N_ROUNDS {
			Self::keccak_permutation_round(f, state, round)?;
		}
		Ok(())
	}

	pub fn keccak_permutation_round<F: WireFactory>(
		f: &mut F,
		state: &mut [Wire; 25],
		round: usize,
	) -> Result<(), TraceError> {
		Self::theta(f, state)?;
		Self::rho_pi(f, state)?;
		Self::chi(f, state)?;
		Self::iota(f, state, round)
	}

	fn theta<F: WireFactory>(f: &mut F, state: &mut [Wire; 25]) -> Result<(), TraceError> {
		let mut c = [state[0]; 5];
		for (x, c) in c.iter_mut().enumerate() {
			*c = f.bxor_multi(&array::from_fn::<_, 5, _>(|y| state[idx(x, y)]))?;
		}

		// D[x] = C[x-1] ^ rotl1(C[x+1])
		let mut d = [state[0]; 5];
		for (x, d) in d.iter_mut().enumerate() {
			let rotated = f.rotl(c[(x + 1) % 5], 1)?;
			*d = f.bxor(c[(x + 4) % 5], rotated)?;
		}

		// A'[x,y] = A[x,y] ^ D[x]
		for y in 0..5 {
			for x in 0..5 {
				state[idx(x, y)] = f.bxor(state[idx(x, y)], d[x])?;
			}
		}
		Ok(())
	}

	fn rho_pi<F: WireFactory>(f: &mut F, state: &mut [Wire; 25]) -> Result<(), TraceError> {
		// Every lane is read from the pre-step state.
		let mut temp = *state;
		for y in 0..5 {
			for x in 0..5 {
				let lane = state[idx(x, y)];
				// rotl by 0 reuses the lane without emitting a gate
				temp[idx(y, (2 * x + 3 * y) % 5)] = f.rotl(lane, R[idx(x, y)])?;
			}
		}
		*state = temp;
		Ok(())
	}

	fn chi<F: WireFactory>(f: &mut F, state: &mut [Wire; 25]) -> Result<(), TraceError> {
		for y in 0..5 {
			let row: [Wire; 5] = array::from_fn(|x| state[idx(x, y)]);
			for x in 0..5 {
				let not_next = f.bnot(row[(x + 1) % 5])?;
				state[idx(x, y)] = f.fax(not_next, row[(x + 2) % 5], row[x])?;
			}
		}
		Ok(())
	}

	fn iota<F: WireFactory>(
		f: &mut F,
		state: &mut [Wire; 25],
		round: usize,
	) -> Result<(), TraceError> {
		let rc_wire = f.add_constant(Word(RC[round]))?;
		state[0] = f.bxor(state[0], rc_wire)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use ktrace_core::ArenaLayout;
	use ktrace_frontend::{Evaluator, Opcode, ValueArena};
	use rand::{Rng, SeedableRng, rngs::StdRng};

	use super::*;

	mod reference {
		use super::{R, RC, idx};

		pub fn theta(state: &mut [u64; 25]) {
			let mut c = [0u64; 5];
			for x in 0..5 {
				c[x] =
					state[idx(x, 0)]
						^ state[idx(x, 1)] ^ state[idx(x, 2)]
						^ state[idx(x, 3)] ^ state[idx(x, 4)];
			}
			let d = [
				c[4] ^ c[1].rotate_left(1),
				c[0] ^ c[2].rotate_left(1),
				c[1] ^ c[3].rotate_left(1),
				c[2] ^ c[4].rotate_left(1),
				c[3] ^ c[0].rotate_left(1),
			];

			for y in 0..5 {
				for x in 0..5 {
					state[idx(x, y)] ^= d[x];
				}
			}
		}

		pub fn rho_pi(state: &mut [u64; 25]) {
			let mut temp = [0u64; 25];
			for y in 0..5 {
				for x in 0..5 {
					temp[idx(y, (2 * x + 3 * y) % 5)] = state[idx(x, y)].rotate_left(R[idx(x, y)]);
				}
			}
			*state = temp;
		}

		pub fn iota(state: &mut [u64; 25], round: usize) {
			state[0] ^= RC[round];
		}

		pub fn chi(state: &mut [u64; 25]) {
			for y in 0..5 {
				let a0 = state[idx(0, y)];
				let a1 = state[idx(1, y)];
				let a2 = state[idx(2, y)];
				let a3 = state[idx(3, y)];
				let a4 = state[idx(4, y)];
				state[idx(0, y)] = a0 ^ ((!a1) & a2);
				state[idx(1, y)] = a1 ^ ((!a2) & a3);
				state[idx(2, y)] = a2 ^ ((!a3) & a4);
				state[idx(3, y)] = a3 ^ ((!a4) & a0);
				state[idx(4, y)] = a4 ^ ((!a0) & a1);
			}
		}

		pub fn keccak_permutation_round(state: &mut [u64; 25], round: usize) {
			theta(state);
			rho_pi(state);
			chi(state);
			iota(state, round);
		}

		pub fn keccak_f1600(state: &mut [u64; 25]) {
			for round in 0..24 {
				keccak_permutation_round(state, round);
			}
		}
	}

	/// An evaluator with 25 bound witness lanes and room for `n_internal` gates.
	fn evaluator(input_state: [u64; 25], n_internal: usize) -> (Evaluator, [Wire; 25]) {
		let constants = [Word::ZERO, Word::ALL_ONE]
			.into_iter()
			.chain(RC.iter().copied().map(Word));
		let arena = ValueArena::new(ArenaLayout::new(25, 25, n_internal), constants).unwrap();
		let mut f = Evaluator::new(arena);
		let state: [Wire; 25] = array::from_fn(|_| f.add_witness().unwrap());
		for (&wire, &value) in state.iter().zip(&input_state) {
			f.bind_witness(wire, Word(value)).unwrap();
		}
		(f, state)
	}

	fn validate_circuit_component(
		circuit_fn: impl FnOnce(&mut Evaluator, &mut [Wire; 25]) -> Result<(), TraceError>,
		reference_fn: impl FnOnce(&mut [u64; 25]),
		input_state: [u64; 25],
		n_gates: usize,
	) {
		let (mut f, mut state_wires) = evaluator(input_state, n_gates);
		circuit_fn(&mut f, &mut state_wires).unwrap();

		let mut expected_output = input_state;
		reference_fn(&mut expected_output);

		for i in 0..25 {
			assert_eq!(
				f.value(state_wires[i]).unwrap(),
				Word(expected_output[i]),
				"Output mismatch at index {i}",
			);
		}
		assert_eq!(f.gate_counts().total(), n_gates);
		assert_eq!(f.arena().n_internal(), n_gates);
	}

	#[test]
	fn test_gate_budget() {
		assert_eq!(RHO_PI_GATES, 24);
		assert_eq!(GATES_PER_ROUND, 115);
		assert_eq!(GATES_PER_PERMUTATION, 2760);
	}

	#[test]
	fn test_keccak_f1600() {
		let mut rng = StdRng::seed_from_u64(0);
		let input_state = rng.random::<[u64; 25]>();

		validate_circuit_component(
			Permutation::keccak_f1600,
			reference::keccak_f1600,
			input_state,
			GATES_PER_PERMUTATION,
		);
	}

	#[test]
	fn test_keccak_f1600_zero_state() {
		// First lanes of Keccak-f[1600] applied to the all-zero state.
		let (mut f, mut state) = evaluator([0; 25], GATES_PER_PERMUTATION);
		Permutation::keccak_f1600(&mut f, &mut state).unwrap();
		assert_eq!(f.value(state[0]).unwrap(), Word(0xf1258f7940e1dde7));
		assert_eq!(f.value(state[1]).unwrap(), Word(0x84d5ccf933c0478a));
	}

	#[test]
	fn test_keccak_permutation_round() {
		let mut rng = StdRng::seed_from_u64(0);
		let input_state = rng.random::<[u64; 25]>();

		validate_circuit_component(
			|f, state| Permutation::keccak_permutation_round(f, state, 0),
			|state| reference::keccak_permutation_round(state, 0),
			input_state,
			GATES_PER_ROUND,
		);
	}

	#[test]
	fn test_theta() {
		let mut rng = StdRng::seed_from_u64(0);
		let input_state = rng.random::<[u64; 25]>();

		validate_circuit_component(Permutation::theta, reference::theta, input_state, THETA_GATES);
	}

	#[test]
	fn test_rho_pi() {
		let mut rng = StdRng::seed_from_u64(0);
		let input_state = rng.random::<[u64; 25]>();

		validate_circuit_component(
			Permutation::rho_pi,
			reference::rho_pi,
			input_state,
			RHO_PI_GATES,
		);
	}

	#[test]
	fn test_chi() {
		let mut rng = StdRng::seed_from_u64(0);
		let input_state = rng.random::<[u64; 25]>();

		validate_circuit_component(Permutation::chi, reference::chi, input_state, CHI_GATES);
	}

	#[test]
	fn test_iota() {
		let mut rng = StdRng::seed_from_u64(0);
		let input_state = rng.random::<[u64; 25]>();

		validate_circuit_component(
			|f, state| Permutation::iota(f, state, 0),
			|state| reference::iota(state, 0),
			input_state,
			IOTA_GATES,
		);
	}

	#[test]
	fn test_per_round_opcodes() {
		let mut rng = StdRng::seed_from_u64(1);
		let (mut f, mut state) = evaluator(rng.random(), GATES_PER_PERMUTATION);
		for round in 0..N_ROUNDS {
			let before = f.gate_counts().clone();
			Permutation::keccak_permutation_round(&mut f, &mut state, round).unwrap();
			let round_counts = f.gate_counts().since(&before);
			assert_eq!(round_counts.get(Opcode::BxorMulti), 5);
			assert_eq!(round_counts.get(Opcode::Rotl), 5 + RHO_PI_GATES);
			assert_eq!(round_counts.get(Opcode::Bxor), 5 + 25 + 1);
			assert_eq!(round_counts.get(Opcode::Bnot), 25);
			assert_eq!(round_counts.get(Opcode::Fax), 25);
			assert_eq!(round_counts.total(), GATES_PER_ROUND);
		}
	}

	#[test]
	fn test_zero_offset_lane_is_reused() {
		let mut rng = StdRng::seed_from_u64(2);
		let (mut f, mut state) = evaluator(rng.random(), RHO_PI_GATES);
		let lane0 = state[0];
		Permutation::rho_pi(&mut f, &mut state).unwrap();
		assert_eq!(state[0], lane0);
		for &wire in &state[1..] {
			assert_ne!(wire, lane0);
		}
	}

	#[test]
	fn test_gate_order_within_round() {
		// The first internal wires of a round are the 5 parities, then rotl/bxor pairs.
		let mut rng = StdRng::seed_from_u64(3);
		let input_state: [u64; 25] = rng.random();
		let (mut f, mut state) = evaluator(input_state, GATES_PER_ROUND);
		Permutation::keccak_permutation_round(&mut f, &mut state, 0).unwrap();

		let words = f.arena().words().unwrap();
		let internal = &words[f.arena().layout().offset_internal..];
		let c: [u64; 5] = array::from_fn(|x| (0..5).fold(0, |acc, y| acc ^ input_state[idx(x, y)]));
		for x in 0..5 {
			assert_eq!(internal[x], Word(c[x]));
			let rotated = c[(x + 1) % 5].rotate_left(1);
			assert_eq!(internal[5 + 2 * x], Word(rotated));
			assert_eq!(internal[5 + 2 * x + 1], Word(c[(x + 4) % 5] ^ rotated));
		}
	}
}
