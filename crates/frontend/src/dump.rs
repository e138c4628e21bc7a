// Copyright 2025 Irreducible Inc.
//! The line-oriented text dump of a trace.
//!
//! Every arena slot is written as one line, in wire order:
//!
//! ```text
//! W[0000] = 0x0000000000000000
//! W[0001] = 0x0000000000000001
//! ```
//!
//! The format is byte-exact: two generators agree on a trace only if their dumps are identical.

use std::{fmt, io};

use ktrace_core::Word;

use crate::error::DumpError;

/// Writes `words` to `w`, one line per slot.
pub fn write_dump(words: &[Word], w: &mut impl io::Write) -> io::Result<()> {
	for (index, &word) in words.iter().enumerate() {
		writeln!(w, "{}", DumpLine { index, word })?;
	}
	Ok(())
}

/// Renders the dump of `words` into a string.
pub fn dump_to_string(words: &[Word]) -> String {
	words
		.iter()
		.enumerate()
		.map(|(index, &word)| format!("{}\n", DumpLine { index, word }))
		.collect()
}

struct DumpLine {
	index: usize,
	word: Word,
}

impl fmt::Display for DumpLine {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "W[{:04}] = 0x{:016x}", self.index, self.word.as_u64())
	}
}

/// Parses a dump back into the words it holds.
///
/// Indices must start at zero and increase by one per line. Blank lines are ignored.
pub fn parse_dump(text: &str) -> Result<Vec<Word>, DumpError> {
	let mut words = Vec::new();
	for (line_no, line) in text.lines().enumerate().map(|(i, line)| (i + 1, line.trim_end())) {
		if line.is_empty() {
			continue;
		}
		let malformed = || DumpError::MalformedLine {
			line_no,
			line: line.to_string(),
		};
		let (index, value) = parse_line(line).ok_or_else(malformed)?;
		if index != words.len() {
			return Err(DumpError::IndexOutOfOrder {
				line_no,
				expected: words.len(),
				actual: index,
			});
		}
		words.push(Word(value));
	}
	Ok(words)
}

fn parse_line(line: &str) -> Option<(usize, u64)> {
	let rest = line.strip_prefix("W[")?;
	let (index, rest) = rest.split_once(']')?;
	let hex = rest.strip_prefix(" = 0x")?;
	if hex.len() != 16
		|| !hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
		|| !index.bytes().all(|b| b.is_ascii_digit())
	{
		return None;
	}
	let index = index.parse().ok()?;
	let value = u64::from_str_radix(hex, 16).ok()?;
	Some((index, value))
}

/// The first slot where two dumps disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
	/// The slot index.
	pub index: usize,
	/// The value on the left side, if the left dump is long enough.
	pub left: Option<Word>,
	/// The value on the right side, if the right dump is long enough.
	pub right: Option<Word>,
}

/// Compares two dumps slot by slot. Returns `None` if they are identical.
pub fn first_mismatch(left: &[Word], right: &[Word]) -> Option<Mismatch> {
	let len = left.len().max(right.len());
	(0..len)
		.map(|index| Mismatch {
			index,
			left: left.get(index).copied(),
			right: right.get(index).copied(),
		})
		.find(|m| m.left != m.right)
}
