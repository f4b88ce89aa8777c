//! Lazy, restartable enumerators bound to a (receiver, method, arguments) call.
//!
//! Driving an enumerator with a block replays the bound call through the method
//! table, so it reproduces exactly what the eager call would have done,
//! including its failures. External iteration (`next`/`peek`) runs the same call
//! inside a coroutine cursor that is suspended at every yield.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::block::Block;
use crate::coroutine::{Cursor, Resumed, YieldArgs};
use crate::error::RuntimeError;
use crate::method_table::{self, MethodTable};
use crate::value::{ClassId, Value};

#[derive(Debug, Default)]
struct ExternalState {
    cursor: Option<Cursor>,
    peeked: Option<Value>,
    /// Set once the cursor has finished; `next` keeps failing until `rewind`.
    done: bool,
}

pub struct Enumerator {
    receiver: Value,
    method: String,
    args: Vec<Value>,
    external: RefCell<ExternalState>,
}

/// Bind `receiver.method(*args)` into an enumerator. Nothing runs until it is
/// driven; an unknown method is reported then.
pub fn to_enum(receiver: Value, method: &str, args: Vec<Value>) -> Rc<Enumerator> {
    Rc::new(Enumerator {
        receiver,
        method: method.to_string(),
        args,
        external: RefCell::new(ExternalState::default()),
    })
}

/// Pack the arguments of one yield into a single value.
pub fn pack_args(args: &[Value]) -> Value {
    match args {
        [] => Value::Nil,
        [single] => single.clone(),
        many => Value::array(many.to_vec()),
    }
}

impl Enumerator {
    pub fn receiver(&self) -> &Value {
        &self.receiver
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Replay the bound call with `block`. Returns whatever the bound call
    /// returns, normally its receiver.
    pub fn replay(&self, block: Block<'_>) -> Result<Value, RuntimeError> {
        tracing::trace!(enumerator = %self, "replay");
        method_table::send(&self.receiver, &self.method, &self.args, Some(block))
    }

    /// `each` with or without a block. Without one, the enumerator itself is
    /// returned.
    pub fn each(self: &Rc<Self>, block: Option<Block<'_>>) -> Result<Value, RuntimeError> {
        match block {
            Some(block) => self.replay(block),
            None => Ok(Value::Enumerator(self.clone())),
        }
    }

    /// Next element of the external cursor.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) -> Result<Value, RuntimeError> {
        let mut state = self.external.borrow_mut();
        if let Some(value) = state.peeked.take() {
            return Ok(value);
        }
        self.advance(&mut state)
    }

    /// Next element of the external cursor without consuming it.
    pub fn peek(&self) -> Result<Value, RuntimeError> {
        let mut state = self.external.borrow_mut();
        if let Some(value) = &state.peeked {
            return Ok(value.clone());
        }
        let value = self.advance(&mut state)?;
        state.peeked = Some(value.clone());
        Ok(value)
    }

    /// Discard the external cursor so iteration restarts from the beginning.
    pub fn rewind(&self) {
        let cursor = {
            let mut state = self.external.borrow_mut();
            state.peeked = None;
            state.done = false;
            state.cursor.take()
        };
        // Unwinding a suspended cursor runs drops on its stack; keep the state
        // unborrowed while that happens.
        drop(cursor);
        tracing::debug!(enumerator = %self, "rewind");
    }

    fn advance(&self, state: &mut ExternalState) -> Result<Value, RuntimeError> {
        if state.done {
            return Err(RuntimeError::StopIteration);
        }
        let cursor = state.cursor.get_or_insert_with(|| {
            tracing::debug!(enumerator = %self, "starting external cursor");
            self.start_cursor()
        });
        match cursor.resume() {
            Resumed::Yielded(args) => Ok(pack_args(&args)),
            Resumed::Finished(result) => {
                tracing::debug!(enumerator = %self, "external cursor finished");
                state.done = true;
                state.cursor = None;
                result.and(Err(RuntimeError::StopIteration))
            }
        }
    }

    fn start_cursor(&self) -> Cursor {
        let receiver = self.receiver.clone();
        let method = self.method.clone();
        let args = self.args.clone();
        Cursor::new(move |yielder| {
            let mut block = |yielded: &[Value]| -> Result<(), RuntimeError> {
                yielder.suspend(YieldArgs::from(yielded));
                Ok(())
            };
            method_table::send(&receiver, &method, &args, Some(&mut block))
        })
    }
}

impl fmt::Debug for Enumerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enumerator")
            .field("receiver", &self.receiver)
            .field("method", &self.method)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Enumerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<Enumerator: {}:{}", self.receiver, self.method)?;
        if !self.args.is_empty() {
            f.write_str("(")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(")")?;
        }
        f.write_str(">")
    }
}

fn receiver(recv: &Value) -> Result<&Rc<Enumerator>, RuntimeError> {
    match recv {
        Value::Enumerator(e) => Ok(e),
        other => Err(RuntimeError::TypeMismatch {
            expected: "Enumerator",
            found: other.class().to_string(),
        }),
    }
}

fn enumerator_each(
    recv: &Value,
    args: &[Value],
    block: Option<Block<'_>>,
) -> Result<Value, RuntimeError> {
    RuntimeError::check_arity("each", args, 0)?;
    receiver(recv)?.each(block)
}

fn enumerator_next(
    recv: &Value,
    args: &[Value],
    _block: Option<Block<'_>>,
) -> Result<Value, RuntimeError> {
    RuntimeError::check_arity("next", args, 0)?;
    receiver(recv)?.next()
}

fn enumerator_peek(
    recv: &Value,
    args: &[Value],
    _block: Option<Block<'_>>,
) -> Result<Value, RuntimeError> {
    RuntimeError::check_arity("peek", args, 0)?;
    receiver(recv)?.peek()
}

fn enumerator_rewind(
    recv: &Value,
    args: &[Value],
    _block: Option<Block<'_>>,
) -> Result<Value, RuntimeError> {
    RuntimeError::check_arity("rewind", args, 0)?;
    receiver(recv)?.rewind();
    Ok(recv.clone())
}

pub(crate) fn register(table: &mut MethodTable) {
    table.define(ClassId::Enumerator, "each", enumerator_each);
    table.define(ClassId::Enumerator, "next", enumerator_next);
    table.define(ClassId::Enumerator, "peek", enumerator_peek);
    table.define(ClassId::Enumerator, "rewind", enumerator_rewind);
}
