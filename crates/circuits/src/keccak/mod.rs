// Copyright 2025 Irreducible Inc.

pub mod padding;
pub mod permutation;
pub mod trace;

use std::collections::BTreeSet;

use ktrace_core::{
	ArenaLayout, Word,
	consts::{MIN_CONSTANT_SLOTS, N_WORDS_PER_BLOCK, N_WORDS_PER_DIGEST, N_WORDS_PER_STATE},
};
use ktrace_frontend::{TraceError, Wire, WireFactory};
use permutation::{GATES_PER_PERMUTATION, Permutation, RC};

use self::padding::{FINAL_PAD_BIT, boundary_index, n_blocks};

/// Sizes of every region of the trace of one Keccak-256 digest.
///
/// Everything here follows from the message length, so the arena can be allocated exactly
/// before the first gate runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceShape {
	/// Message length in bytes.
	pub len_bytes: usize,
	/// Number of message witness words.
	pub n_message_limbs: usize,
	/// Number of absorbed rate blocks.
	pub n_blocks: usize,
	/// Gates spent on padding: the marker rotation and the boundary word, unless the message
	/// ends on a word boundary, and the final bit.
	pub n_padding_gates: usize,
	/// The constant table, deduplicated and sorted.
	pub constants: Vec<Word>,
	/// The resulting arena layout.
	pub layout: ArenaLayout,
}

impl TraceShape {
	/// Plans the trace of a message of `len_bytes` bytes.
	pub fn for_message_len(len_bytes: usize) -> Self {
		let n_message_limbs = len_bytes.div_ceil(8);
		let n_blocks = n_blocks(len_bytes);
		let n_padding_gates = if len_bytes % 8 == 0 { 1 } else { 3 };
		let n_internal = n_padding_gates + n_blocks * (N_WORDS_PER_BLOCK + GATES_PER_PERMUTATION);

		let constants = constant_table();
		let layout = ArenaLayout::new(
			MIN_CONSTANT_SLOTS,
			n_message_limbs + N_WORDS_PER_DIGEST,
			n_internal,
		);

		Self {
			len_bytes,
			n_message_limbs,
			n_blocks,
			n_padding_gates,
			constants,
			layout,
		}
	}
}

/// Every constant a trace refers to, in ascending order.
///
/// The padding marker `0x01` is the first round constant, so the table has 25 entries whatever
/// the message length.
pub fn constant_table() -> Vec<Word> {
	let mut constants = BTreeSet::from([Word::ZERO, Word::ALL_ONE, Word(FINAL_PAD_BIT)]);
	constants.extend(RC.iter().copied().map(Word));
	constants.into_iter().collect()
}

/// Keccak-256 over a message of known length.
///
/// The message wires hold the message packed into little-endian words, the last one
/// zero-padded. Their values must be bound before construction since every gate is evaluated on
/// the spot.
pub struct Keccak256 {
	pub len_bytes: usize,
	pub message: Vec<Wire>,
	pub digest: [Wire; N_WORDS_PER_DIGEST],
	padded_message: Vec<Wire>,
	n_blocks: usize,
}

impl Keccak256 {
	/// Pads the message, absorbs it block by block and squeezes the digest.
	///
	/// ## Preconditions
	/// * `message.len() == len_bytes.div_ceil(8)`
	pub fn new<F: WireFactory>(
		f: &mut F,
		len_bytes: usize,
		message: Vec<Wire>,
	) -> Result<Self, TraceError> {
		assert_eq!(message.len(), len_bytes.div_ceil(8), "message limb count mismatch");
		let n_blocks = n_blocks(len_bytes);
		let _span = tracing::info_span!("keccak256", len_bytes, n_blocks).entered();

		let padded_message = Self::pad(f, len_bytes, &message, n_blocks)?;

		// zero initialized keccak state
		let zero = f.add_constant(Word::ZERO)?;
		let mut state = [zero; N_WORDS_PER_STATE];

		// xor next message block into state and permute
		for block in 0..n_blocks {
			let _span = tracing::debug_span!("absorb", block).entered();
			let words = &padded_message[block * N_WORDS_PER_BLOCK..][..N_WORDS_PER_BLOCK];
			for (lane, &word) in state.iter_mut().zip(words) {
				*lane = f.bxor(*lane, word)?;
			}
			Permutation::keccak_f1600(f, &mut state)?;
		}

		let mut digest = [zero; N_WORDS_PER_DIGEST];
		digest.copy_from_slice(&state[..N_WORDS_PER_DIGEST]);

		Ok(Self {
			len_bytes,
			message,
			digest,
			padded_message,
			n_blocks,
		})
	}

	/// Builds the padded message out of message wires and constants.
	fn pad<F: WireFactory>(
		f: &mut F,
		len_bytes: usize,
		message: &[Wire],
		n_blocks: usize,
	) -> Result<Vec<Wire>, TraceError> {
		let zero = f.add_constant(Word::ZERO)?;
		let one = f.add_constant(Word::ONE)?;
		let final_bit = f.add_constant(Word(FINAL_PAD_BIT))?;

		let boundary = boundary_index(len_bytes);
		let mut padded = Vec::with_capacity(n_blocks * N_WORDS_PER_BLOCK);
		padded.extend_from_slice(&message[..boundary]);
		// A partial last word already holds zeros above the message bytes.
		let boundary_word = match message.get(boundary) {
			Some(&partial) => {
				let marker = f.rotl(one, 8 * (len_bytes % 8) as u32)?;
				f.bxor(partial, marker)?
			}
			None => one,
		};
		padded.push(boundary_word);
		padded.resize(n_blocks * N_WORDS_PER_BLOCK, zero);

		if let Some(last) = padded.last_mut() {
			*last = f.bxor(*last, final_bit)?;
		}
		Ok(padded)
	}

	/// The padded message, `17 * n_blocks` wires.
	pub fn padded_message(&self) -> &[Wire] {
		&self.padded_message
	}

	pub fn n_blocks(&self) -> usize {
		self.n_blocks
	}
}

#[cfg(test)]
mod tests {
	use ktrace_frontend::{Evaluator, Opcode, ValueArena};
	use rand::{RngCore, SeedableRng, rngs::StdRng};
	use rstest::rstest;
	use sha3::Digest;

	use super::{padding::pack_bytes_into_words, *};

	fn run(message: &[u8]) -> (Evaluator, Keccak256) {
		let shape = TraceShape::for_message_len(message.len());
		let arena = ValueArena::new(shape.layout.clone(), shape.constants.clone()).unwrap();
		let mut f = Evaluator::new(arena);
		let limbs = pack_bytes_into_words(message)
			.into_iter()
			.map(|value| {
				let wire = f.add_witness().unwrap();
				f.bind_witness(wire, Word(value)).unwrap();
				wire
			})
			.collect();
		let keccak = Keccak256::new(&mut f, message.len(), limbs).unwrap();
		(f, keccak)
	}

	#[rstest]
	#[case(0)]
	#[case(1)]
	#[case(7)]
	#[case(8)]
	#[case(135)]
	#[case(136)]
	#[case(137)]
	#[case(271)]
	#[case(272)]
	fn test_keccak_digest(#[case] len_bytes: usize) {
		let mut rng = StdRng::seed_from_u64(len_bytes as u64);
		let mut message = vec![0u8; len_bytes];
		rng.fill_bytes(&mut message);

		let expected: [u8; 32] = sha3::Keccak256::digest(&message).into();

		let (f, keccak) = run(&message);
		let mut computed = [0u8; 32];
		for (chunk, &wire) in computed.chunks_mut(8).zip(&keccak.digest) {
			chunk.copy_from_slice(&f.value(wire).unwrap().to_le_bytes());
		}
		assert_eq!(computed, expected);
	}

	#[rstest]
	#[case(0)]
	#[case(5)]
	#[case(8)]
	#[case(135)]
	#[case(136)]
	#[case(300)]
	fn test_internal_region_is_planned_exactly(#[case] len_bytes: usize) {
		let (f, keccak) = run(&vec![0x5a; len_bytes]);
		let shape = TraceShape::for_message_len(len_bytes);
		assert_eq!(keccak.n_blocks(), shape.n_blocks);
		assert_eq!(f.arena().n_internal(), shape.layout.n_internal);
		assert_eq!(f.arena().n_const(), shape.constants.len());
		assert_eq!(
			f.gate_counts().total(),
			shape.n_padding_gates + shape.n_blocks * (N_WORDS_PER_BLOCK + GATES_PER_PERMUTATION)
		);
	}

	#[test]
	fn test_shape_of_single_word_message() {
		let shape = TraceShape::for_message_len(8);
		assert_eq!(shape.n_message_limbs, 1);
		assert_eq!(shape.n_blocks, 1);
		assert_eq!(shape.n_padding_gates, 1);
		assert_eq!(shape.constants.len(), 25);
		assert_eq!(shape.layout.n_const_slots, 25);
		assert_eq!(shape.layout.n_witness, 5);
		assert_eq!(shape.layout.n_internal, 2778);
		assert_eq!(shape.layout.used(), 2808);
		assert_eq!(shape.layout.capacity, 4096);
	}

	#[test]
	fn test_constant_table() {
		// 22 distinct round constants, the marker 0x01 coincides with the first one.
		let constants = constant_table();
		assert_eq!(constants.len(), 25);
		assert!(constants.windows(2).all(|w| w[0] < w[1]));
		assert_eq!(constants[0], Word::ZERO);
		assert_eq!(constants[1], Word::ONE);
		assert_eq!(constants[24], Word::ALL_ONE);
	}

	#[test]
	fn test_constant_region_does_not_depend_on_length() {
		for len_bytes in 0..=17 {
			let shape = TraceShape::for_message_len(len_bytes);
			assert_eq!(shape.constants, constant_table());
			assert_eq!(shape.layout.n_const_slots, 25);
			assert_eq!(shape.layout.offset_witness, 25);

			let (f, _) = run(&vec![0x5a; len_bytes]);
			assert_eq!(f.arena().n_const(), 25);
		}
	}

	#[test]
	fn test_boundary_marker_is_rotated() {
		let message = [0xb2, 0x60, 0xb8];
		let (f, _) = run(&message);
		let words = f.arena().words().unwrap();
		let internal = &words[f.arena().layout().offset_internal..];
		assert_eq!(internal[0], Word(1 << 24));
		assert_eq!(internal[1], Word(0x01b860b2));
		assert_eq!(internal[2], Word(0x8000000000000000));
		let (aligned, _) = run(&[0xb2, 0x60, 0xb8, 0, 0, 0, 0, 0]);
		assert_eq!(
			f.gate_counts().get(Opcode::Rotl),
			aligned.gate_counts().get(Opcode::Rotl) + 1
		);
	}

	#[rstest]
	#[case(8, 1)]
	#[case(13, 3)]
	#[case(135, 3)]
	#[case(128, 1)]
	fn test_padding_gates(#[case] len_bytes: usize, #[case] n_padding_gates: usize) {
		let message = vec![0x33; len_bytes];
		let (f, _) = run(&message);
		assert_eq!(TraceShape::for_message_len(len_bytes).n_padding_gates, n_padding_gates);

		// The padding gates open the internal region and the last of them is the final word.
		let words = f.arena().words().unwrap();
		let internal = &words[f.arena().layout().offset_internal..];
		let padded = padding::pad_message(&message);
		assert_eq!(internal[n_padding_gates - 1], Word(padded[16]));
		// Absorption follows: lane 0 of the zero state xored with the first padded word.
		assert_eq!(internal[n_padding_gates], Word(padded[0]));
	}

	#[test]
	fn test_padded_message_values() {
		let mut rng = StdRng::seed_from_u64(7);
		for len_bytes in [0, 3, 8, 100, 135, 136, 200] {
			let mut message = vec![0u8; len_bytes];
			rng.fill_bytes(&mut message);
			let (f, keccak) = run(&message);
			let values: Vec<u64> = keccak
				.padded_message()
				.iter()
				.map(|&wire| f.value(wire).unwrap().as_u64())
				.collect();
			assert_eq!(values, padding::pad_message(&message));
		}
	}
}
