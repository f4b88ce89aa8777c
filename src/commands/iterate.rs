// src/commands/iterate.rs
//! Drive one iteration call in eager, materializing, or lazy mode.

use std::io::Write;
use std::process::ExitCode;

use rill_runtime::{RangeValue, RuntimeError, Value, pack_args, parse_literal, send, to_a};

use crate::cli::{ColorMode, Mode};
use crate::errors::{CliError, render_to_stderr};

/// A method call assembled from command-line literals.
#[derive(Debug, Clone)]
pub struct Call {
    receiver: Value,
    method: &'static str,
    args: Vec<Value>,
}

impl Call {
    pub fn times(n: &str) -> Self {
        Call {
            receiver: parse_literal(n),
            method: "times",
            args: Vec::new(),
        }
    }

    pub fn upto(start: &str, end: &str) -> Self {
        Call {
            receiver: parse_literal(start),
            method: "upto",
            args: vec![parse_literal(end)],
        }
    }

    /// `FIRST..LAST`; a missing LAST makes the range endless.
    pub fn each(first: &str, last: Option<&str>, exclusive: bool) -> Result<Self, CliError> {
        let last = last.map_or(Value::Nil, parse_literal);
        let range = RangeValue::new(parse_literal(first), last, exclusive)?;
        Ok(Call {
            receiver: Value::Range(range),
            method: "each",
            args: Vec::new(),
        })
    }

    fn check_bounded(&self, mode: Mode) -> Result<(), CliError> {
        let Value::Range(range) = &self.receiver else {
            return Ok(());
        };
        if !range.is_endless() || matches!(mode, Mode::Lazy { take: Some(_) }) {
            return Ok(());
        }
        Err(CliError::Unbounded {
            range: range.to_string(),
        })
    }

    pub fn run(&self, mode: Mode, out: &mut dyn Write) -> Result<(), CliError> {
        self.check_bounded(mode)?;
        tracing::debug!(receiver = %self.receiver, method = self.method, ?mode, "run");
        match mode {
            Mode::Eager => self.run_eager(out),
            Mode::ToA => self.run_to_a(out),
            Mode::Lazy { take } => self.run_lazy(take, out),
        }
    }

    fn run_eager(&self, out: &mut dyn Write) -> Result<(), CliError> {
        // A failed write stops iteration; the io error is reported, not the marker.
        let mut write_error = None;
        let result = send(
            &self.receiver,
            self.method,
            &self.args,
            Some(&mut |yielded: &[Value]| {
                writeln!(out, "{}", pack_args(yielded).inspect()).map_err(|e| {
                    write_error = Some(e);
                    RuntimeError::raised("output closed")
                })
            }),
        );
        if let Some(err) = write_error {
            return Err(CliError::Io(err));
        }
        writeln!(out, "=> {}", result?.inspect())?;
        Ok(())
    }

    fn run_to_a(&self, out: &mut dyn Write) -> Result<(), CliError> {
        let enumerator = send(&self.receiver, self.method, &self.args, None)?;
        let items = to_a(&enumerator)?;
        writeln!(out, "{}", Value::array(items).inspect())?;
        Ok(())
    }

    fn run_lazy(&self, take: Option<usize>, out: &mut dyn Write) -> Result<(), CliError> {
        let e = match send(&self.receiver, self.method, &self.args, None)? {
            Value::Enumerator(e) => e,
            other => {
                return Err(RuntimeError::TypeMismatch {
                    expected: "Enumerator",
                    found: other.class().to_string(),
                }
                .into());
            }
        };
        let mut pulled = 0usize;
        while take.is_none_or(|k| pulled < k) {
            match e.next() {
                Ok(v) => writeln!(out, "{}", v.inspect())?,
                Err(RuntimeError::StopIteration) => break,
                Err(err) => return Err(err.into()),
            }
            pulled += 1;
        }
        tracing::debug!(pulled, "lazy iteration finished");
        Ok(())
    }
}

/// Run `call` against stdout; render any error and map it to the exit code.
pub fn run_iteration(call: Result<Call, CliError>, mode: Mode, color: ColorMode) -> ExitCode {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match call.and_then(|call| call.run(mode, &mut out)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = out.flush();
            render_to_stderr(&err, color);
            ExitCode::FAILURE
        }
    }
}
