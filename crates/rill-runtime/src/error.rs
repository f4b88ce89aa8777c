// src/error.rs
//! Runtime errors (E4xxx).
//!
//! Error code ranges follow the compiler's numbering scheme, with the runtime
//! taking the E4xxx block. Messages mirror what the host language reports for
//! the same conditions.

#![allow(unused_assignments)] // False positives from thiserror derive

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("can't iterate from {class}")]
    #[diagnostic(
        code(E4001),
        help("the first value of a range must respond to 'succ'")
    )]
    TypeCannotIterate { class: String },

    #[error("comparison of {left} with {right} failed")]
    #[diagnostic(code(E4002))]
    ComparisonFailed { left: String, right: String },

    #[error("bad value for range")]
    #[diagnostic(
        code(E4003),
        help("both ends of a range must be comparable with each other")
    )]
    BadRange,

    #[error("wrong number of arguments (given {found}, expected {expected})")]
    #[diagnostic(code(E4004))]
    ArgumentCount {
        method: String,
        expected: usize,
        found: usize,
    },

    #[error("undefined method '{method}' for {class}")]
    #[diagnostic(code(E4005))]
    NoMethod { method: String, class: String },

    #[error("no implicit conversion of {found} into {expected}")]
    #[diagnostic(code(E4006))]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("iteration reached an end")]
    #[diagnostic(code(E4007), help("call 'rewind' to restart the enumerator"))]
    StopIteration,

    #[error("overflow computing successor of {value}")]
    #[diagnostic(code(E4008))]
    Overflow { value: String },

    #[error("{message}")]
    #[diagnostic(code(E4009))]
    Raised { message: String },
}

impl RuntimeError {
    /// Error raised from inside a host callback.
    pub fn raised(message: impl Into<String>) -> Self {
        RuntimeError::Raised {
            message: message.into(),
        }
    }

    pub(crate) fn check_arity(method: &str, args: &[crate::Value], expected: usize) -> Result<(), Self> {
        if args.len() == expected {
            return Ok(());
        }
        Err(RuntimeError::ArgumentCount {
            method: method.to_string(),
            expected,
            found: args.len(),
        })
    }
}
