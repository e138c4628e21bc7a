// Copyright 2025 Irreducible Inc.
//! Keccak-256 expressed in trace-recording gates.
//!
//! [`keccak::trace::KeccakTrace`] is the entry point: it plans the arena for a message, runs the
//! sponge through a [`WireFactory`](ktrace_frontend::WireFactory), verifies the digest and keeps
//! the resulting trace ready to be dumped.

pub mod error;
pub mod keccak;

pub use error::Error;
pub use keccak::{
	Keccak256, TraceShape,
	trace::{KeccakTrace, TraceInput},
};
