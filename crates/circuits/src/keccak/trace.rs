// Copyright 2025 Irreducible Inc.
//! Witness generation for one Keccak-256 digest.

use std::io;

use ktrace_core::{
	Word,
	consts::{DIGEST_BYTES, N_WORDS_PER_DIGEST, WORD_SIZE_BYTES},
};
use ktrace_frontend::{Evaluator, TraceStat, ValueArena, Wire, WireFactory, dump};

use super::{Keccak256, TraceShape, padding::pack_bytes_into_words};
use crate::error::Error;

/// The caller-supplied inputs of a trace.
#[derive(Debug, Clone, Copy)]
pub struct TraceInput<'a> {
	/// The message to digest.
	pub message: &'a [u8],
	/// The length the caller claims for the message, if any.
	pub len_bytes: Option<usize>,
	/// The digest the caller expects. When absent the trace attests its own digest.
	pub expected_digest: Option<[u8; DIGEST_BYTES]>,
}

impl<'a> TraceInput<'a> {
	pub fn new(message: &'a [u8]) -> Self {
		Self {
			message,
			len_bytes: None,
			expected_digest: None,
		}
	}

	pub fn with_len_bytes(self, len_bytes: usize) -> Self {
		Self {
			len_bytes: Some(len_bytes),
			..self
		}
	}

	pub fn with_expected_digest(self, digest: [u8; DIGEST_BYTES]) -> Self {
		Self {
			expected_digest: Some(digest),
			..self
		}
	}

	/// Rejects a message whose length disagrees with the declared one.
	fn validate(&self) -> Result<(), Error> {
		match self.len_bytes {
			Some(declared) if declared != self.message.len() => Err(Error::MalformedInput {
				declared,
				actual: self.message.len(),
			}),
			_ => Ok(()),
		}
	}
}

/// A complete and verified trace of one Keccak-256 digest.
pub struct KeccakTrace {
	shape: TraceShape,
	words: Vec<Word>,
	digest: [u8; DIGEST_BYTES],
	stat: TraceStat,
}

impl KeccakTrace {
	/// Generates the trace with the silent [`Evaluator`].
	pub fn generate(input: &TraceInput<'_>) -> Result<Self, Error> {
		Self::generate_with(input, Evaluator::new)
	}

	/// Generates the trace with the factory built by `new_factory` around the planned arena.
	///
	/// Witness wires are allocated message limbs first, then the digest limbs. Fails with
	/// [`Error::DigestMismatch`] if an expected digest was supplied and differs from the computed
	/// one.
	pub fn generate_with<F: WireFactory>(
		input: &TraceInput<'_>,
		new_factory: impl FnOnce(ValueArena) -> F,
	) -> Result<Self, Error> {
		input.validate()?;

		let shape = TraceShape::for_message_len(input.message.len());
		let arena = ValueArena::new(shape.layout.clone(), shape.constants.iter().copied())?;
		let mut f = new_factory(arena);

		let message = (0..shape.n_message_limbs)
			.map(|_| f.add_witness())
			.collect::<Result<Vec<_>, _>>()?;
		let expected = (0..N_WORDS_PER_DIGEST)
			.map(|_| f.add_witness())
			.collect::<Result<Vec<_>, _>>()?;

		for (&wire, value) in message.iter().zip(pack_bytes_into_words(input.message)) {
			f.bind_witness(wire, Word(value))?;
		}
		if let Some(digest) = &input.expected_digest {
			for (&wire, limb) in expected.iter().zip(digest_limbs(digest)) {
				f.bind_witness(wire, limb)?;
			}
		}

		let keccak = Keccak256::new(&mut f, input.message.len(), message)?;
		let mut computed = [Word::ZERO; N_WORDS_PER_DIGEST];
		for (limb, &wire) in computed.iter_mut().zip(&keccak.digest) {
			*limb = f.value(wire)?;
		}

		if input.expected_digest.is_none() {
			for (&wire, &limb) in expected.iter().zip(&computed) {
				f.bind_witness(wire, limb)?;
			}
		}
		verify(&f, &expected, &computed)?;

		let words = f.arena().words()?;
		let stat = TraceStat::collect(&f);
		Ok(Self {
			shape,
			words,
			digest: digest_bytes(&computed),
			stat,
		})
	}

	/// The computed Keccak-256 digest.
	pub fn digest(&self) -> [u8; DIGEST_BYTES] {
		self.digest
	}

	/// Every slot of the trace, zero-padded to the declared capacity.
	pub fn words(&self) -> &[Word] {
		&self.words
	}

	pub fn shape(&self) -> &TraceShape {
		&self.shape
	}

	pub fn stat(&self) -> &TraceStat {
		&self.stat
	}

	/// Writes the trace dump.
	pub fn write_dump(&self, w: &mut impl io::Write) -> io::Result<()> {
		dump::write_dump(&self.words, w)
	}

	/// Renders the trace dump into a string.
	pub fn dump_to_string(&self) -> String {
		dump::dump_to_string(&self.words)
	}
}

/// Compares the computed digest limbs against the expected digest witnesses.
fn verify(
	f: &impl WireFactory,
	expected: &[Wire],
	computed: &[Word; N_WORDS_PER_DIGEST],
) -> Result<(), Error> {
	let mut expected_limbs = [Word::ZERO; N_WORDS_PER_DIGEST];
	for (limb, &wire) in expected_limbs.iter_mut().zip(expected) {
		*limb = f.value(wire)?;
	}
	if expected_limbs != *computed {
		tracing::warn!(expected = ?expected_limbs, computed = ?computed, "digest mismatch");
		return Err(Error::DigestMismatch {
			expected: expected_limbs,
			computed: *computed,
		});
	}
	tracing::info!(digest = ?computed, "digest verified");
	Ok(())
}

/// Splits a digest into little-endian limbs.
pub fn digest_limbs(digest: &[u8; DIGEST_BYTES]) -> [Word; N_WORDS_PER_DIGEST] {
	let mut limbs = [Word::ZERO; N_WORDS_PER_DIGEST];
	for (limb, bytes) in limbs.iter_mut().zip(digest.chunks(WORD_SIZE_BYTES)) {
		*limb = Word::from_le_bytes_padded(bytes);
	}
	limbs
}

/// Joins little-endian limbs into a digest.
pub fn digest_bytes(limbs: &[Word; N_WORDS_PER_DIGEST]) -> [u8; DIGEST_BYTES] {
	let mut digest = [0u8; DIGEST_BYTES];
	for (bytes, limb) in digest.chunks_mut(WORD_SIZE_BYTES).zip(limbs) {
		bytes.copy_from_slice(&limb.to_le_bytes());
	}
	digest
}
