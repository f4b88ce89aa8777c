// src/errors/mod.rs
//! Error reporting for the `rill` driver.
//!
//! Runtime errors carry their own E4xxx diagnostics; the driver adds the
//! E5xxx block for problems that never reach the runtime.

pub mod cli;
pub mod report;

pub use cli::CliError;
pub use report::{render_to_stderr, render_to_string};
