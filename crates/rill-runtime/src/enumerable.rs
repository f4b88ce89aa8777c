//! The push-based `each` contract and the materializer built on it.

use std::rc::Rc;

use crate::block::{Block, BlockResult, block_or_enum};
use crate::enumerator::{Enumerator, pack_args};
use crate::error::RuntimeError;
use crate::method_table::{self, MethodTable};
use crate::range::RangeValue;
use crate::value::{ClassId, Value};

/// A push-based producer: calls `block` once per element, in order.
pub trait Each {
    fn each(&self, block: Block<'_>) -> Result<(), RuntimeError>;
}

impl Each for RangeValue {
    fn each(&self, block: Block<'_>) -> Result<(), RuntimeError> {
        self.step(block)
    }
}

impl Each for Enumerator {
    fn each(&self, block: Block<'_>) -> Result<(), RuntimeError> {
        self.replay(block).map(drop)
    }
}

impl Each for [Value] {
    fn each(&self, block: Block<'_>) -> Result<(), RuntimeError> {
        for item in self {
            block(std::slice::from_ref(item))?;
        }
        Ok(())
    }
}

/// Any value is driven through its class's `each` method.
impl Each for Value {
    fn each(&self, block: Block<'_>) -> Result<(), RuntimeError> {
        method_table::send(self, "each", &[], Some(block)).map(drop)
    }
}

/// Collect everything `source` yields, in call order.
///
/// A single-argument yield is stored as that value, a multi-argument yield as an
/// array of its arguments, and an argument-less yield as `nil`.
pub fn to_a<E: Each + ?Sized>(source: &E) -> Result<Vec<Value>, RuntimeError> {
    let mut acc = Vec::new();
    source.each(&mut |args: &[Value]| {
        acc.push(pack_args(args));
        Ok(())
    })?;
    tracing::trace!(len = acc.len(), "to_a");
    Ok(acc)
}

fn enumerable_to_a(
    recv: &Value,
    args: &[Value],
    _block: Option<Block<'_>>,
) -> Result<Value, RuntimeError> {
    RuntimeError::check_arity("to_a", args, 0)?;
    Ok(Value::Array(Rc::from(to_a(recv)?)))
}

fn array_each(recv: &Value, args: &[Value], block: Option<Block<'_>>) -> Result<Value, RuntimeError> {
    RuntimeError::check_arity("each", args, 0)?;
    let Value::Array(items) = recv else {
        return Err(RuntimeError::TypeMismatch {
            expected: "Array",
            found: recv.class().to_string(),
        });
    };
    let result = block_or_enum(block, || recv.clone(), "each", args, |block| items.each(block))?;
    Ok(match result {
        BlockResult::Completed(()) => recv.clone(),
        BlockResult::Deferred(e) => Value::Enumerator(e),
    })
}

pub(crate) fn register(table: &mut MethodTable) {
    table.define(ClassId::Array, "each", array_each);
    for class in [ClassId::Array, ClassId::Range, ClassId::Enumerator] {
        table.define(class, "to_a", enumerable_to_a);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerator::to_enum;
    use crate::integer::{times, upto};

    /// Yields `(i, i * i)` pairs, then one argument-less yield.
    struct Squares(i64);

    impl Each for Squares {
        fn each(&self, block: Block<'_>) -> Result<(), RuntimeError> {
            for i in 0..self.0 {
                block(&[Value::Int(i), Value::Int(i * i)])?;
            }
            block(&[])
        }
    }

    struct Failing;

    impl Each for Failing {
        fn each(&self, block: Block<'_>) -> Result<(), RuntimeError> {
            block(&[Value::Int(1)])?;
            Err(RuntimeError::raised("producer failed"))
        }
    }

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().copied().map(Value::Int).collect()
    }

    #[test]
    fn range_to_a() {
        let r = RangeValue::new(Value::Int(1), Value::Int(3), false).unwrap();
        assert_eq!(to_a(&*r), Ok(ints(&[1, 2, 3])));
    }

    #[test]
    fn multi_argument_yields_are_grouped() {
        let out = to_a(&Squares(3)).unwrap();
        assert_eq!(
            out,
            vec![
                Value::array(ints(&[0, 0])),
                Value::array(ints(&[1, 1])),
                Value::array(ints(&[2, 4])),
                Value::Nil,
            ]
        );
    }

    #[test]
    fn errors_propagate_unchanged() {
        assert_eq!(to_a(&Failing), Err(RuntimeError::raised("producer failed")));
    }

    #[test]
    fn enumerators_materialize_repeatedly() {
        let e = upto(2, 4, None).unwrap().deferred().unwrap();
        let first = to_a(&*e).unwrap();
        let second = to_a(&*e).unwrap();
        assert_eq!(first, ints(&[2, 3, 4]));
        assert_eq!(first, second);
    }

    #[test]
    fn to_a_through_dispatch() {
        let e = times(3, None).unwrap().deferred().unwrap();
        let out = method_table::send(&Value::Enumerator(e), "to_a", &[], None).unwrap();
        assert_eq!(out, Value::array(ints(&[0, 1, 2])));

        let arr = Value::array(ints(&[5, 6]));
        assert_eq!(method_table::send(&arr, "to_a", &[], None), Ok(arr.clone()));
        assert_eq!(to_a(&arr), Ok(ints(&[5, 6])));
    }

    #[test]
    fn array_each_returns_receiver_or_enumerator() {
        let arr = Value::array(ints(&[1, 2]));
        let mut seen = Vec::new();
        let ret = method_table::send(
            &arr,
            "each",
            &[],
            Some(&mut |args: &[Value]| {
                seen.extend_from_slice(args);
                Ok(())
            }),
        )
        .unwrap();
        assert_eq!(ret, arr);
        assert_eq!(seen, ints(&[1, 2]));

        let lazy = method_table::send(&arr, "each", &[], None).unwrap();
        assert!(matches!(lazy, Value::Enumerator(_)));
        assert_eq!(to_a(&lazy), Ok(ints(&[1, 2])));
    }

    #[test]
    fn to_a_on_unknown_each_fails() {
        let e = to_enum(Value::Float(1.5), "each", vec![]);
        assert!(matches!(to_a(&*e), Err(RuntimeError::NoMethod { .. })));
        assert!(matches!(
            to_a(&Value::Int(3)),
            Err(RuntimeError::NoMethod { .. })
        ));
    }
}
