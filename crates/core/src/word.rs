// Copyright 2025 Irreducible Inc.
//! [`Word`] related definitions.

use std::{
	fmt,
	ops::{BitAnd, BitOr, BitXor, Not},
};

/// [`Word`] is a 64-bit value and the unit every trace slot holds. A Keccak lane is one word.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word(pub u64);

impl Word {
	/// All zero bit pattern.
	pub const ZERO: Word = Word(0);
	/// 1.
	pub const ONE: Word = Word(1);
	/// All bits set to one.
	pub const ALL_ONE: Word = Word(u64::MAX);
	/// Most Significant Bit is set to one, all other bits are zero.
	pub const MSB_ONE: Word = Word(0x8000000000000000);
}

impl fmt::Debug for Word {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Word({:#018x})", self.0)
	}
}

impl fmt::LowerHex for Word {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::LowerHex::fmt(&self.0, f)
	}
}

impl BitAnd for Word {
	type Output = Self;

	fn bitand(self, rhs: Self) -> Self::Output {
		Word(self.0 & rhs.0)
	}
}

impl BitOr for Word {
	type Output = Self;

	fn bitor(self, rhs: Self) -> Self::Output {
		Word(self.0 | rhs.0)
	}
}

impl BitXor for Word {
	type Output = Self;

	fn bitxor(self, rhs: Self) -> Self::Output {
		Word(self.0 ^ rhs.0)
	}
}

impl Not for Word {
	type Output = Self;

	fn not(self) -> Self::Output {
		Word(!self.0)
	}
}

impl From<u64> for Word {
	fn from(value: u64) -> Self {
		Word(value)
	}
}

impl Word {
	/// Creates a word from up to 8 little-endian bytes. Missing high bytes are zero.
	///
	/// # Panics
	///
	/// Panics if `bytes` is longer than 8.
	pub fn from_le_bytes_padded(bytes: &[u8]) -> Word {
		assert!(bytes.len() <= 8, "a word holds at most 8 bytes, got {}", bytes.len());
		let mut word_bytes = [0u8; 8];
		word_bytes[..bytes.len()].copy_from_slice(bytes);
		Word(u64::from_le_bytes(word_bytes))
	}

	/// Rotate Left by a given number of bits.
	pub fn rotl(self, n: u32) -> Word {
		let Word(value) = self;
		Word(value.rotate_left(n))
	}

	/// Returns the little-endian byte representation.
	pub fn to_le_bytes(self) -> [u8; 8] {
		self.0.to_le_bytes()
	}

	/// Returns the underlying `u64`.
	pub fn as_u64(self) -> u64 {
		self.0
	}
}
