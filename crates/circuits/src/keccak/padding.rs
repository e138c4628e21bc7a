// Copyright 2025 Irreducible Inc.
//! Keccak-256 multi-rate padding over 64-bit words.
//!
//! The message is packed into little-endian words. The byte right after the message is `0x01`
//! and the top bit of the last word of the last block is set, so the padded length is the
//! smallest positive multiple of the rate that leaves room for both.

use ktrace_core::consts::{N_WORDS_PER_BLOCK, RATE_BYTES, WORD_SIZE_BYTES};

/// The final padding bit, in the last word of the last block.
pub const FINAL_PAD_BIT: u64 = 0x80 << 56;

/// Number of rate blocks the padded message occupies.
pub fn n_blocks(len_bytes: usize) -> usize {
	(len_bytes + 1).div_ceil(RATE_BYTES)
}

/// The index of the word holding the first padding byte.
pub fn boundary_index(len_bytes: usize) -> usize {
	len_bytes / WORD_SIZE_BYTES
}

/// The first padding byte placed right above the last message byte of its word.
///
/// For a message of a whole number of words this is `0x01` on its own.
pub fn boundary_marker(len_bytes: usize) -> u64 {
	1 << (8 * (len_bytes % WORD_SIZE_BYTES))
}

/// Packs bytes into little-endian words. The last word is zero-padded.
pub fn pack_bytes_into_words(bytes: &[u8]) -> Vec<u64> {
	bytes
		.chunks(WORD_SIZE_BYTES)
		.map(|chunk| {
			let mut word_bytes = [0u8; WORD_SIZE_BYTES];
			word_bytes[..chunk.len()].copy_from_slice(chunk);
			u64::from_le_bytes(word_bytes)
		})
		.collect()
}

/// Pads a message into `17 * n_blocks` words.
pub fn pad_message(message: &[u8]) -> Vec<u64> {
	let len_bytes = message.len();
	let mut words = pack_bytes_into_words(message);
	words.resize(n_blocks(len_bytes) * N_WORDS_PER_BLOCK, 0);

	words[boundary_index(len_bytes)] ^= boundary_marker(len_bytes);
	if let Some(last) = words.last_mut() {
		*last ^= FINAL_PAD_BIT;
	}
	words
}
