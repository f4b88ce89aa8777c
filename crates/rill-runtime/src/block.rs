//! Callback-or-enumerator dispatch shared by every iteration entry point.

use std::rc::Rc;

use crate::enumerator::{Enumerator, to_enum};
use crate::error::RuntimeError;
use crate::value::Value;

/// A caller-supplied callback. Receives the arguments of one yield.
pub type Block<'a> = &'a mut dyn FnMut(&[Value]) -> Result<(), RuntimeError>;

/// Outcome of an iteration entry point.
#[derive(Debug, Clone)]
pub enum BlockResult<T> {
    /// A callback was supplied and iteration ran to completion. Holds the receiver.
    Completed(T),
    /// No callback was supplied; iteration is deferred to this enumerator.
    Deferred(Rc<Enumerator>),
}

impl<T> BlockResult<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            BlockResult::Completed(value) => Some(value),
            BlockResult::Deferred(_) => None,
        }
    }

    pub fn deferred(self) -> Option<Rc<Enumerator>> {
        match self {
            BlockResult::Completed(_) => None,
            BlockResult::Deferred(e) => Some(e),
        }
    }
}

impl<T: Into<Value>> From<BlockResult<T>> for Value {
    fn from(result: BlockResult<T>) -> Self {
        match result {
            BlockResult::Completed(receiver) => receiver.into(),
            BlockResult::Deferred(e) => Value::Enumerator(e),
        }
    }
}

/// Run `eager` with the callback when one is present, otherwise bind
/// `receiver.method(*args)` into an enumerator without running anything.
pub fn block_or_enum<T>(
    block: Option<Block<'_>>,
    receiver: impl FnOnce() -> Value,
    method: &str,
    args: &[Value],
    eager: impl FnOnce(Block<'_>) -> Result<T, RuntimeError>,
) -> Result<BlockResult<T>, RuntimeError> {
    match block {
        Some(block) => eager(block).map(BlockResult::Completed),
        None => {
            let receiver = receiver();
            tracing::debug!(%receiver, method, "no block given, deferring to enumerator");
            Ok(BlockResult::Deferred(to_enum(receiver, method, args.to_vec())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_present_runs_eagerly() {
        let mut seen = Vec::new();
        let mut block = |args: &[Value]| -> Result<(), RuntimeError> {
            seen.extend_from_slice(args);
            Ok(())
        };
        let result = block_or_enum(Some(&mut block), || Value::Int(7), "times", &[], |b| {
            b(&[Value::Int(1)])?;
            Ok(7)
        })
        .unwrap();
        assert_eq!(result.completed(), Some(7));
        assert_eq!(seen, vec![Value::Int(1)]);
    }

    #[test]
    fn block_absent_defers_without_running() {
        let mut ran = false;
        let result = block_or_enum(None, || Value::Int(3), "upto", &[Value::Int(5)], |_| {
            ran = true;
            Ok(3)
        })
        .unwrap();
        assert!(!ran);
        let e = result.deferred().expect("should defer");
        assert_eq!(e.method(), "upto");
        assert_eq!(e.args(), &[Value::Int(5)]);
    }

    #[test]
    fn into_value() {
        let v: Value = BlockResult::Completed(4_i64).into();
        assert_eq!(v, Value::Int(4));
    }
}
