//! # Derive Subcommand
//!
//! Derives the partition key for a single event given as JSON text on the
//! command line, or on stdin when the argument is `-`. Omitting the argument
//! derives the key for an absent event.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use clap::Args;
use dpk_core::{Canonicalizer, Event, KeyDeriver};
use serde_json::Value;

use crate::output::{write_key, OutputFormat};

/// Arguments for the `dpk derive` subcommand.
#[derive(Args, Debug)]
pub struct DeriveArgs {
    /// Event as JSON text, or `-` to read it from stdin. Omit for an absent event.
    #[arg(value_name = "EVENT")]
    pub event: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Parse JSON event text. Blank text is an absent event.
pub fn parse_event(text: &str) -> Result<Event> {
    if text.trim().is_empty() {
        return Ok(Event::Absent);
    }
    let value: Value = serde_json::from_str(text).context("failed to parse event JSON")?;
    Ok(Event::from(value))
}

/// Execute the derive subcommand.
pub fn run_derive<C, R, W>(
    args: &DeriveArgs,
    deriver: &KeyDeriver<C>,
    stdin: R,
    out: &mut W,
) -> Result<u8>
where
    C: Canonicalizer,
    R: Read,
    W: Write,
{
    let event = match args.event.as_deref() {
        None => Event::Absent,
        Some("-") => {
            let mut text = String::new();
            let mut stdin = stdin;
            stdin
                .read_to_string(&mut text)
                .context("failed to read event from stdin")?;
            parse_event(&text)?
        }
        Some(text) => parse_event(text)?,
    };

    let key = deriver.derive(&event)?;
    tracing::debug!(source = %key.source(), "derived partition key");
    write_key(out, &key, args.format)?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(event: Option<&str>, stdin: &str, format: OutputFormat) -> Result<String> {
        let args = DeriveArgs {
            event: event.map(str::to_string),
            format,
        };
        let mut out = Vec::new();
        let code = run_derive(&args, &KeyDeriver::new(), Cursor::new(stdin), &mut out)?;
        assert_eq!(code, 0);
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn no_argument_is_absent() {
        assert_eq!(run(None, "", OutputFormat::Text).unwrap(), "0\n");
    }

    #[test]
    fn explicit_key_argument() {
        assert_eq!(
            run(Some(r#"{"partitionKey":"my-key"}"#), "", OutputFormat::Text).unwrap(),
            "my-key\n"
        );
    }

    #[test]
    fn stdin_event() {
        let out = run(Some("-"), "{\"partitionKey\": 1}\n", OutputFormat::Json).unwrap();
        assert_eq!(out, "{\"key\":\"1\",\"source\":\"explicit\"}\n");
    }

    #[test]
    fn empty_stdin_is_absent() {
        assert_eq!(run(Some("-"), "  \n", OutputFormat::Text).unwrap(), "0\n");
    }

    #[test]
    fn null_argument_is_absent() {
        assert_eq!(run(Some("null"), "", OutputFormat::Text).unwrap(), "0\n");
    }

    #[test]
    fn keyless_event_is_hashed() {
        let out = run(Some("{}"), "", OutputFormat::Text).unwrap();
        assert_eq!(out.trim_end().len(), dpk_core::DIGEST_HEX_LEN);
    }

    #[test]
    fn invalid_json_is_an_error() {
        let err = run(Some("{not json"), "", OutputFormat::Text).unwrap_err();
        assert!(err.to_string().contains("failed to parse event JSON"));
    }
}
