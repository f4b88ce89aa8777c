//! rill runtime: values, method dispatch, steppers, and enumerators.
//!
//! Every iteration entry point runs in one of two modes. Given a block it
//! iterates eagerly and returns its receiver; without one it returns an
//! [`Enumerator`] that replays the same call when it is later driven. The
//! materializer [`to_a`] is written against the push-based [`Each`] contract
//! alone.
pub mod block;
pub mod coroutine;
pub mod enumerable;
pub mod enumerator;
pub mod error;
pub mod integer;
pub mod method_table;
pub mod range;
pub mod string;
pub mod value;

pub use block::{Block, BlockResult, block_or_enum};
pub use enumerable::{Each, to_a};
pub use enumerator::{Enumerator, pack_args, to_enum};
pub use error::RuntimeError;
pub use integer::{times, upto};
pub use method_table::{MethodTable, NativeMethod, define_method, respond_to, send};
pub use range::{RangeValue, Steppable, step_range};
pub use value::{ClassId, Value, parse_literal};
