// src/errors/cli.rs
//! Driver errors (E5xxx).

#![allow(unused_assignments)] // False positives from thiserror derive

use miette::Diagnostic;
use rill_runtime::RuntimeError;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("refusing to iterate the endless range {range} without a bound")]
    #[diagnostic(code(E5001), help("pass --take K to pull a bounded prefix"))]
    Unbounded { range: String },

    #[error("failed to write output")]
    #[diagnostic(code(E5002))]
    Io(#[from] std::io::Error),
}
