// Copyright 2025 Irreducible Inc.

//! Trace statistics: region usage and per-opcode gate counts.

use std::{collections::BTreeMap, fmt};

use crate::{factory::WireFactory, gate::Opcode};

/// Number of gates emitted per opcode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateCounts {
	counts: BTreeMap<Opcode, usize>,
}

impl GateCounts {
	/// Records one gate with the given opcode.
	pub fn record(&mut self, opcode: Opcode) {
		*self.counts.entry(opcode).or_default() += 1;
	}

	/// Number of gates emitted with `opcode`.
	pub fn get(&self, opcode: Opcode) -> usize {
		self.counts.get(&opcode).copied().unwrap_or(0)
	}

	/// Number of gates emitted in total.
	pub fn total(&self) -> usize {
		self.counts.values().sum()
	}

	/// The gates emitted since the `earlier` snapshot of the same tally.
	pub fn since(&self, earlier: &GateCounts) -> GateCounts {
		let counts = self
			.counts
			.iter()
			.map(|(&opcode, &n)| (opcode, n - earlier.get(opcode)))
			.filter(|&(_, n)| n > 0)
			.collect();
		GateCounts { counts }
	}

	/// Iterates over the opcodes with a nonzero count.
	pub fn iter(&self) -> impl Iterator<Item = (Opcode, usize)> + '_ {
		self.counts.iter().map(|(&opcode, &n)| (opcode, n))
	}
}

/// Various stats of a trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStat {
	/// Number of distinct constants in the trace.
	pub n_const: usize,
	/// Number of slots reserved for constants.
	pub n_const_slots: usize,
	/// Number of witness values.
	pub n_witness: usize,
	/// Number of internal values in the trace.
	///
	/// Internal values are values produced by gates.
	pub n_internal: usize,
	/// The declared capacity of the arena, i.e. the number of lines in the dump.
	pub capacity: usize,
	/// Gates per opcode.
	pub gate_counts: GateCounts,
}

impl TraceStat {
	/// Collects statistics from the given factory.
	pub fn collect(factory: &impl WireFactory) -> Self {
		let arena = factory.arena();
		let layout = arena.layout();
		Self {
			n_const: arena.n_const(),
			n_const_slots: layout.n_const_slots,
			n_witness: arena.n_witness(),
			n_internal: arena.n_internal(),
			capacity: layout.capacity,
			gate_counts: factory.gate_counts().clone(),
		}
	}

	/// Number of slots holding a value.
	pub fn used(&self) -> usize {
		self.n_const_slots + self.n_witness + self.n_internal
	}
}

impl fmt::Display for TraceStat {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		// Helper to format numbers with commas
		fn fmt_num(n: usize) -> String {
			let s = n.to_string();
			let mut result = String::new();
			for (i, c) in s.chars().rev().enumerate() {
				if i > 0 && i % 3 == 0 {
					result.push(',');
				}
				result.push(c);
			}
			result.chars().rev().collect()
		}

		fn progress_bar(used: usize, total: usize) -> String {
			let percent = (used as f64 / total as f64 * 100.0) as usize;
			let filled = percent / 10;
			let mut bar = String::from("[");
			for i in 0..10 {
				if i < filled {
					bar.push('▓');
				} else {
					bar.push('░');
				}
			}
			bar.push(']');
			bar
		}

		writeln!(f, "Gates")?;
		writeln!(f, "├─ Number of gates: {}", fmt_num(self.gate_counts.total()))?;
		let n_opcodes = self.gate_counts.iter().count();
		for (i, (opcode, n)) in self.gate_counts.iter().enumerate() {
			let branch = if i + 1 == n_opcodes { "└─" } else { "├─" };
			writeln!(f, "│  {branch} {opcode}: {}", fmt_num(n))?;
		}
		writeln!(f)?;

		let used = self.used();
		let percent = used as f64 / self.capacity as f64 * 100.0;
		writeln!(f, "Value Arena")?;
		writeln!(
			f,
			"├─ Used: {} ({:.1}% of 2^{})",
			fmt_num(used),
			percent,
			self.capacity.trailing_zeros()
		)?;
		writeln!(
			f,
			"│  {} spare: {}",
			progress_bar(used, self.capacity),
			fmt_num(self.capacity - used)
		)?;
		writeln!(
			f,
			"├─ Constants: {} of {} slots",
			fmt_num(self.n_const),
			fmt_num(self.n_const_slots)
		)?;
		writeln!(f, "├─ Witness: {}", fmt_num(self.n_witness))?;
		writeln!(f, "└─ Internal: {}", fmt_num(self.n_internal))?;

		Ok(())
	}
}
