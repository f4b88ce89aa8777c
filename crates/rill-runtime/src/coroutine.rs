//! Coroutine primitive via corosensei.
//!
//! `Cursor` wraps `corosensei::Coroutine` and powers external iteration on
//! enumerators: the bound call runs on its own stack and is suspended at every
//! yield, so a push-based `each` can be pulled one element at a time.

use corosensei::stack::DefaultStack;
use corosensei::{Coroutine, CoroutineResult, Yielder};
use smallvec::SmallVec;

use crate::error::RuntimeError;
use crate::value::Value;

/// Arguments of one yield.
pub type YieldArgs = SmallVec<[Value; 2]>;

/// Outcome of resuming a cursor.
#[derive(Debug)]
pub enum Resumed {
    Yielded(YieldArgs),
    Finished(Result<Value, RuntimeError>),
}

/// A suspended producer.
///
/// The body returns the bound call's result when it finishes. Dropping a cursor
/// that is still suspended unwinds its stack, so values held by the body are
/// released.
pub struct Cursor {
    inner: Coroutine<(), YieldArgs, Result<Value, RuntimeError>, DefaultStack>,
    finished: bool,
}

impl Cursor {
    /// Create a cursor from a closure.
    ///
    /// The closure receives a yielder for suspending with the arguments of each
    /// yield.
    pub fn new(
        f: impl FnOnce(&Yielder<(), YieldArgs>) -> Result<Value, RuntimeError> + 'static,
    ) -> Self {
        Self {
            inner: Coroutine::new(move |yielder, ()| f(yielder)),
            finished: false,
        }
    }

    /// Resume until the next yield or until the body returns.
    ///
    /// Resuming a finished cursor returns `Finished(Err(StopIteration))`.
    pub fn resume(&mut self) -> Resumed {
        if self.finished {
            return Resumed::Finished(Err(RuntimeError::StopIteration));
        }
        match self.inner.resume(()) {
            CoroutineResult::Yield(args) => Resumed::Yielded(args),
            CoroutineResult::Return(result) => {
                self.finished = true;
                Resumed::Finished(result)
            }
        }
    }
}

impl std::fmt::Debug for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
