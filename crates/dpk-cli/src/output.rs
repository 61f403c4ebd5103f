//! Key output formatting shared by every subcommand.

use std::io::Write;

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use dpk_core::PartitionKey;

/// How derived keys are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The bare key, one per line. Keys containing a line break are
    /// rejected; use `json` for those.
    #[default]
    Text,
    /// `{"key":...,"source":...}`, one object per line.
    Json,
}

/// Write one key followed by a newline.
///
/// Every key occupies exactly one output line, so line N of the output
/// always belongs to event N.
pub fn write_key<W: Write>(out: &mut W, key: &PartitionKey, format: OutputFormat) -> Result<()> {
    let written = match format {
        OutputFormat::Text => {
            if key.as_str().contains(['\n', '\r']) {
                bail!("key contains a line break and cannot be printed as text; use --format json");
            }
            writeln!(out, "{key}")
        }
        OutputFormat::Json => {
            let line = serde_json::to_string(key).context("failed to encode key as JSON")?;
            writeln!(out, "{line}")
        }
    };
    written.context("failed to write key")
}
