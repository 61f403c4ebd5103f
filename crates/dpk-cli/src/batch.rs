//! # Batch Subcommand
//!
//! Derives keys for newline-delimited JSON events read from stdin, writing
//! one key per input line in the same order. Blank lines are absent events.
//! The first malformed line aborts the batch.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::Args;
use dpk_core::{Canonicalizer, KeyDeriver};

use crate::derive::parse_event;
use crate::output::{write_key, OutputFormat};

/// Arguments for the `dpk batch` subcommand.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute the batch subcommand.
pub fn run_batch<C, R, W>(
    args: &BatchArgs,
    deriver: &KeyDeriver<C>,
    input: R,
    out: &mut W,
) -> Result<u8>
where
    C: Canonicalizer,
    R: BufRead,
    W: Write,
{
    let mut count = 0usize;
    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("failed to read line {line_no}"))?;
        let event = parse_event(&line).with_context(|| format!("line {line_no}"))?;
        let key = deriver
            .derive(&event)
            .with_context(|| format!("line {line_no}"))?;
        write_key(out, &key, args.format).with_context(|| format!("line {line_no}"))?;
        count += 1;
    }
    tracing::info!(count, "derived partition keys");
    Ok(0)
}
