// Copyright 2025 Irreducible Inc.
use std::{
	fs,
	io::{BufWriter, Write},
	path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Args as ClapArgs, Parser};
use ktrace_circuits::{KeccakTrace, TraceInput};
use ktrace_core::Word;
use ktrace_frontend::{TracingEvaluator, dump};
use tracing_subscriber::EnvFilter;

/// The message hashed when none is given on the command line.
const DEFAULT_MESSAGE_HEX: &str = "b260b8a10343bf5a";

/// Generates the Keccak-256 witness trace of a message and writes it as a text dump.
#[derive(Debug, Parser)]
#[command(name = "keccak-witness", about = "Generate the Keccak-256 witness trace of a message")]
struct Args {
	#[command(flatten)]
	message: MessageSource,

	/// Declared message length in bytes, checked against the actual message
	#[arg(long)]
	len_bytes: Option<usize>,

	/// Expected digest as 64 hex characters. When omitted the trace attests the computed digest
	#[arg(long)]
	expected_digest: Option<String>,

	/// Path of the trace dump
	#[arg(short, long, default_value = "keccak_witness_dump.txt")]
	output: PathBuf,

	/// Emit a TRACE-level event for every gate (enable with RUST_LOG=trace)
	#[arg(long)]
	instrumented: bool,

	/// Print trace statistics
	#[arg(long)]
	stat: bool,

	/// Compare the dump with a reference dump and fail on the first differing slot
	#[arg(long)]
	compare: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
#[group(multiple = false)]
struct MessageSource {
	/// Message as hex bytes (defaults to b260b8a10343bf5a)
	#[arg(long)]
	message_hex: Option<String>,

	/// UTF-8 string to hash
	#[arg(long)]
	message_string: Option<String>,

	/// File whose contents are hashed
	#[arg(long)]
	message_file: Option<PathBuf>,
}

impl MessageSource {
	fn read(&self) -> Result<Vec<u8>> {
		if let Some(s) = &self.message_string {
			return Ok(s.as_bytes().to_vec());
		}
		if let Some(path) = &self.message_file {
			return fs::read(path)
				.with_context(|| format!("Failed to read message from {}", path.display()));
		}
		let hex_str = self.message_hex.as_deref().unwrap_or(DEFAULT_MESSAGE_HEX);
		hex::decode(hex_str).context("Message is not valid hex")
	}
}

fn parse_digest(s: &str) -> Result<[u8; 32]> {
	let bytes = hex::decode(s).context("Expected digest is not valid hex")?;
	bytes
		.as_slice()
		.try_into()
		.with_context(|| format!("Expected digest must be 32 bytes, got {}", bytes.len()))
}

fn write_dump(trace: &KeccakTrace, path: &Path) -> Result<()> {
	if let Some(parent) = path.parent()
		&& !parent.as_os_str().is_empty()
	{
		fs::create_dir_all(parent)
			.with_context(|| format!("Failed to create directory {}", parent.display()))?;
	}
	let file = fs::File::create(path)
		.with_context(|| format!("Failed to create dump file {}", path.display()))?;
	let mut w = BufWriter::new(file);
	trace
		.write_dump(&mut w)
		.and_then(|()| w.flush())
		.with_context(|| format!("Failed to write dump to {}", path.display()))
}

fn compare(trace: &KeccakTrace, reference: &Path) -> Result<()> {
	let text = fs::read_to_string(reference)
		.with_context(|| format!("Failed to read reference dump {}", reference.display()))?;
	let expected = dump::parse_dump(&text)
		.with_context(|| format!("Failed to parse reference dump {}", reference.display()))?;
	match dump::first_mismatch(trace.words(), &expected) {
		None => {
			tracing::info!(slots = expected.len(), "dump matches the reference");
			Ok(())
		}
		Some(m) => {
			let show = |w: Option<Word>| match w {
				Some(w) => format!("0x{:016x}", w.as_u64()),
				None => "<missing>".to_string(),
			};
			bail!(
				"Dump differs from the reference at slot {}: computed {}, reference {}",
				m.index,
				show(m.left),
				show(m.right)
			)
		}
	}
}

fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.with_writer(std::io::stderr)
		.init();

	let args = Args::parse();

	let message = args.message.read()?;
	let mut input = TraceInput::new(&message);
	if let Some(len_bytes) = args.len_bytes {
		input = input.with_len_bytes(len_bytes);
	}
	if let Some(digest) = &args.expected_digest {
		input = input.with_expected_digest(parse_digest(digest)?);
	}

	let trace = if args.instrumented {
		KeccakTrace::generate_with(&input, TracingEvaluator::new)
	} else {
		KeccakTrace::generate(&input)
	}
	.context("Failed to generate the witness trace")?;

	write_dump(&trace, &args.output)?;
	tracing::info!(
		path = %args.output.display(),
		slots = trace.words().len(),
		"wrote witness dump"
	);
	println!("{}", hex::encode(trace.digest()));

	if args.stat {
		print!("{}", trace.stat());
	}
	if let Some(reference) = &args.compare {
		compare(&trace, reference)?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_digest() {
		let digest =
			parse_digest("f3a4331736e39b61b5ea9c4f076612e3bab7d4cf36ce5af18631d7adc5de69e3").unwrap();
		assert_eq!(digest[0], 0xf3);
		assert_eq!(digest[31], 0xe3);
		assert!(parse_digest("f3a4").is_err());
		assert!(parse_digest("not hex").is_err());
	}

	#[test]
	fn test_default_message() {
		let args = Args::parse_from(["keccak-witness"]);
		assert_eq!(args.message.read().unwrap(), hex::decode(DEFAULT_MESSAGE_HEX).unwrap());
		assert_eq!(args.output, PathBuf::from("keccak_witness_dump.txt"));
	}

	#[test]
	fn test_message_sources_conflict() {
		let result = Args::try_parse_from([
			"keccak-witness",
			"--message-hex",
			"00",
			"--message-string",
			"abc",
		]);
		assert!(result.is_err());
	}

	#[test]
	fn test_compare_reports_first_difference() {
		let trace = KeccakTrace::generate(&TraceInput::new(b"abc")).unwrap();
		let dir = std::env::temp_dir().join(format!("keccak-witness-{}", std::process::id()));
		let path = dir.join("dump.txt");
		write_dump(&trace, &path).unwrap();
		compare(&trace, &path).unwrap();

		let tampered = fs::read_to_string(&path)
			.unwrap()
			.replacen("W[0000] = 0x0000000000000000", "W[0000] = 0x0000000000000001", 1);
		fs::write(&path, tampered).unwrap();
		let err = compare(&trace, &path).unwrap_err();
		assert!(err.to_string().contains("slot 0"));
		fs::remove_dir_all(dir).unwrap();
	}
}
