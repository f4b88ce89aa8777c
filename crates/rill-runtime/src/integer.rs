//! Bounded integer steppers: `Integer#times` and `Integer#upto`.

use crate::block::{Block, BlockResult, block_or_enum};
use crate::error::RuntimeError;
use crate::method_table::MethodTable;
use crate::value::{ClassId, Value};

/// Yield `0, 1, ..., n - 1`. Nothing is yielded when `n <= 0`.
pub fn times(n: i64, block: Option<Block<'_>>) -> Result<BlockResult<i64>, RuntimeError> {
    block_or_enum(block, || Value::Int(n), "times", &[], |block| step_times(n, block))
}

/// Yield `start, start + 1, ..., bound`. Nothing is yielded when `start > bound`.
pub fn upto(
    start: i64,
    bound: i64,
    block: Option<Block<'_>>,
) -> Result<BlockResult<i64>, RuntimeError> {
    block_or_enum(
        block,
        || Value::Int(start),
        "upto",
        &[Value::Int(bound)],
        |block| step_upto(start, bound, block),
    )
}

fn step_times(n: i64, block: Block<'_>) -> Result<i64, RuntimeError> {
    let mut i = 0;
    while i < n {
        tracing::trace!(i, "times");
        block(&[Value::Int(i)])?;
        i += 1;
    }
    Ok(n)
}

fn step_upto(start: i64, bound: i64, block: Block<'_>) -> Result<i64, RuntimeError> {
    let mut i = start;
    while i <= bound {
        tracing::trace!(i, "upto");
        block(&[Value::Int(i)])?;
        // `bound` may be i64::MAX.
        if i == bound {
            break;
        }
        i += 1;
    }
    Ok(start)
}

fn integer_times(
    recv: &Value,
    args: &[Value],
    block: Option<Block<'_>>,
) -> Result<Value, RuntimeError> {
    let n = recv.as_int()?;
    let result = block_or_enum(block, || recv.clone(), "times", args, |block| {
        RuntimeError::check_arity("times", args, 0)?;
        step_times(n, block)
    })?;
    Ok(result.into())
}

fn integer_upto(
    recv: &Value,
    args: &[Value],
    block: Option<Block<'_>>,
) -> Result<Value, RuntimeError> {
    let start = recv.as_int()?;
    let result = block_or_enum(block, || recv.clone(), "upto", args, |block| {
        RuntimeError::check_arity("upto", args, 1)?;
        step_upto(start, args[0].as_int()?, block)
    })?;
    Ok(result.into())
}

fn integer_succ(
    recv: &Value,
    args: &[Value],
    _block: Option<Block<'_>>,
) -> Result<Value, RuntimeError> {
    RuntimeError::check_arity("succ", args, 0)?;
    let n = recv.as_int()?;
    n.checked_add(1)
        .map(Value::Int)
        .ok_or_else(|| RuntimeError::Overflow {
            value: n.to_string(),
        })
}

pub(crate) fn register(table: &mut MethodTable) {
    table.define(ClassId::Integer, "times", integer_times);
    table.define(ClassId::Integer, "upto", integer_upto);
    table.define(ClassId::Integer, "succ", integer_succ);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method_table::send;

    fn collect_ints(
        run: impl FnOnce(Block<'_>) -> Result<BlockResult<i64>, RuntimeError>,
    ) -> (Vec<i64>, Option<i64>) {
        let mut seen = Vec::new();
        let mut block = |args: &[Value]| -> Result<(), RuntimeError> {
            seen.push(args[0].as_int()?);
            Ok(())
        };
        let ret = run(&mut block).expect("iteration should succeed").completed();
        (seen, ret)
    }

    #[test]
    fn times_yields_indices() {
        assert_eq!(collect_ints(|b| times(4, Some(b))), (vec![0, 1, 2, 3], Some(4)));
        assert_eq!(collect_ints(|b| times(0, Some(b))), (vec![], Some(0)));
        assert_eq!(collect_ints(|b| times(-2, Some(b))), (vec![], Some(-2)));
    }

    #[test]
    fn upto_is_inclusive() {
        assert_eq!(collect_ints(|b| upto(3, 6, Some(b))), (vec![3, 4, 5, 6], Some(3)));
        assert_eq!(collect_ints(|b| upto(5, 5, Some(b))), (vec![5], Some(5)));
        assert_eq!(collect_ints(|b| upto(6, 3, Some(b))), (vec![], Some(6)));
    }

    #[test]
    fn upto_stops_at_max() {
        let (seen, _) = collect_ints(|b| upto(i64::MAX - 1, i64::MAX, Some(b)));
        assert_eq!(seen, vec![i64::MAX - 1, i64::MAX]);
    }

    #[test]
    fn block_error_stops_iteration() {
        let mut seen = Vec::new();
        let mut block = |args: &[Value]| -> Result<(), RuntimeError> {
            if args[0] == Value::Int(2) {
                return Err(RuntimeError::raised("stop at 2"));
            }
            seen.push(args[0].clone());
            Ok(())
        };
        let err = times(10, Some(&mut block)).unwrap_err();
        assert_eq!(err, RuntimeError::raised("stop at 2"));
        assert_eq!(seen, vec![Value::Int(0), Value::Int(1)]);
    }

    #[test]
    fn no_block_returns_enumerator() {
        let e = times(3, None).unwrap().deferred().expect("enumerator");
        assert_eq!(e.to_string(), "#<Enumerator: 3:times>");
        let e = upto(1, 4, None).unwrap().deferred().expect("enumerator");
        assert_eq!(e.to_string(), "#<Enumerator: 1:upto(4)>");
    }

    #[test]
    fn upto_argument_errors_surface_on_replay() {
        let deferred = send(&Value::Int(1), "upto", &[Value::str("x")], None)
            .expect("building the enumerator cannot fail");
        let Value::Enumerator(e) = deferred else {
            panic!("expected enumerator");
        };
        let err = e.each(Some(&mut |_: &[Value]| Ok(()))).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::TypeMismatch {
                expected: "Integer",
                found: "String".to_string(),
            }
        );

        let err = send(&Value::Int(1), "upto", &[], Some(&mut |_: &[Value]| Ok(()))).unwrap_err();
        assert!(matches!(err, RuntimeError::ArgumentCount { expected: 1, found: 0, .. }));
    }

    #[test]
    fn succ_overflow() {
        assert_eq!(send(&Value::Int(41), "succ", &[], None), Ok(Value::Int(42)));
        assert!(matches!(
            send(&Value::Int(i64::MAX), "succ", &[], None),
            Err(RuntimeError::Overflow { .. })
        ));
    }
}
