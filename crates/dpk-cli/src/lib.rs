//! # dpk-cli: Partition Key Command-Line Interface
//!
//! Exposes `dpk-core` from the shell.
//!
//! ## Subcommands
//!
//! - `derive`: key for a single event (argument or stdin)
//! - `batch`: keys for newline-delimited events on stdin
//! - `samples`: keys for the built-in sample events
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from derivation.
//! - Handlers write keys to a caller-supplied writer; logs go to stderr so
//!   stdout carries only keys.

pub mod batch;
pub mod config;
pub mod derive;
pub mod output;
pub mod samples;
