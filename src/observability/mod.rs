//! Structured logging to a rotating file.
//!
//! Log output never goes to the terminal: the interactive session and the
//! one-shot commands own stdout, so events are written to
//! `<data_dir>/journal-scout.log` instead.
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter → journal-scout.log
//! ```
//!
//! # Configuration
//!
//! The level filter is resolved from:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::{init_tracing, LOG_FILE};
