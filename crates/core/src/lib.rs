// Copyright 2025 Irreducible Inc.
//! Core datatypes of the Keccak witness trace.
//!
//! Hosts the [`Word`] every trace slot holds, the fixed Keccak-256 parameters and the
//! [`ArenaLayout`] describing the regions of a trace.

#![warn(missing_docs)]

pub mod consts;
pub mod error;
pub mod layout;
pub mod word;

pub use error::LayoutError;
pub use layout::ArenaLayout;
pub use word::Word;
