// Copyright 2025 Irreducible Inc.

//! Trace-recording frontend for Keccak witness generation.
//!
//! This crate provides the [`ValueArena`], a flat store of 64-bit values addressed by
//! [`Wire`]s, and the [`WireFactory`] gate interface that appends to it. Every gate reads its
//! operands, computes its output on the spot and records it as a new wire, so once a computation
//! has been expressed in gates the arena holds its complete trace.
//!
//! # Usage Flow
//!
//! Plan an [`ArenaLayout`](ktrace_core::ArenaLayout) and create a [`ValueArena`] seeded with the
//! constants the computation uses. Wrap it in an [`Evaluator`], or in a [`TracingEvaluator`] to
//! get a `tracing` event per gate. Allocate witnesses with `add_witness()`, bind their values,
//! and build the computation with `bxor()`, `rotl()`, `fax()` and friends.
//!
//! Finally write [`ValueArena::words`] with [`dump::write_dump`] and inspect the run with
//! [`TraceStat`].

#![warn(missing_docs)]

mod arena;
pub mod dump;
mod error;
mod evaluator;
mod factory;
mod gate;
pub mod stat;

pub use arena::{ValueArena, Wire};
pub use error::{DumpError, Region, TraceError};
pub use evaluator::{Evaluator, TracingEvaluator};
pub use factory::WireFactory;
pub use gate::{Opcode, OpcodeShape};
pub use stat::{GateCounts, TraceStat};
