// Copyright 2025 Irreducible Inc.
use ktrace_core::{Word, consts::N_WORDS_PER_DIGEST};
use ktrace_frontend::TraceError;

/// Keccak trace generation error.
#[allow(missing_docs)] // errors are self-documenting
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("the message is {actual} bytes long but {declared} bytes were declared")]
	MalformedInput { declared: usize, actual: usize },
	#[error("trace construction failed: {0}")]
	Trace(#[from] TraceError),
	#[error(
		"digest mismatch: expected {}, computed {}",
		fmt_digest(.expected),
		fmt_digest(.computed)
	)]
	DigestMismatch {
		expected: [Word; N_WORDS_PER_DIGEST],
		computed: [Word; N_WORDS_PER_DIGEST],
	},
}

/// Renders digest limbs as the 32 digest bytes in hex.
fn fmt_digest(limbs: &[Word; N_WORDS_PER_DIGEST]) -> String {
	limbs
		.iter()
		.flat_map(|limb| limb.to_le_bytes())
		.map(|byte| format!("{byte:02x}"))
		.collect()
}
