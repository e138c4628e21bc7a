// Copyright 2025 Irreducible Inc.
//! Fixed parameters of the Keccak-256 witness trace.

/// A trace slot holds one 64-bit word.
pub const WORD_SIZE_BYTES: usize = 8;

/// Number of 64-bit lanes in the Keccak-f\[1600\] state.
pub const N_WORDS_PER_STATE: usize = 25;

/// Keccak-256 rate in bytes (1088 bits).
pub const RATE_BYTES: usize = 136;

/// Keccak-256 rate in words.
pub const N_WORDS_PER_BLOCK: usize = RATE_BYTES / WORD_SIZE_BYTES;

/// Number of words in a Keccak-256 digest.
pub const N_WORDS_PER_DIGEST: usize = 4;

/// Number of bytes in a Keccak-256 digest.
pub const DIGEST_BYTES: usize = N_WORDS_PER_DIGEST * WORD_SIZE_BYTES;

/// Number of rounds of Keccak-f\[1600\].
pub const N_ROUNDS: usize = 24;

/// The constant region never occupies fewer slots than this, so that the witness region of
/// every trace starts at the same index as in the reference layout.
pub const MIN_CONSTANT_SLOTS: usize = 25;
