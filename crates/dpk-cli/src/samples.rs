//! # Samples Subcommand
//!
//! Prints the key for each built-in sample event, one per line. The list
//! covers every derivation branch and is useful for eyeballing a build
//! against known output.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use dpk_core::{Canonicalizer, Event, KeyDeriver};
use serde_json::json;

use crate::output::{write_key, OutputFormat};

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
    Vestibulum ut tellus euismod, malesuada eros ac, bibendum nunc. Nullam sodales \
    nulla augue, a congue ante congue eu. Pellentesque ut massa eget libero bibendum \
    fermentum quis a nisl.";

/// Arguments for the `dpk samples` subcommand.
#[derive(Args, Debug)]
pub struct SamplesArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// The sample events, in print order.
pub fn sample_events() -> Vec<Event> {
    vec![
        Event::Absent,
        Event::from(json!({})),
        Event::from(json!({ "partitionKey": "my-key" })),
        Event::from(json!({ "foo": "bar" })),
        Event::from(json!("string")),
        Event::from(json!("string")),
        Event::from(json!(1)),
        Event::from(json!(1)),
        Event::from(json!({ "partitionKey": LOREM })),
        Event::from(json!({ "partitionKey": format!("{LOREM} Vestibulum rhoncus.") })),
    ]
}

/// Execute the samples subcommand.
pub fn run_samples<C, W>(args: &SamplesArgs, deriver: &KeyDeriver<C>, out: &mut W) -> Result<u8>
where
    C: Canonicalizer,
    W: Write,
{
    for event in sample_events() {
        let key = deriver.derive(&event)?;
        write_key(out, &key, args.format)?;
    }
    Ok(0)
}
