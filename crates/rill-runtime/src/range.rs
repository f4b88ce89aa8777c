//! Ordered ranges and the successor-driven stepper behind `Range#each`.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::block::{Block, BlockResult, block_or_enum};
use crate::error::RuntimeError;
use crate::method_table::{self, MethodTable};
use crate::value::{ClassId, Value};

/// Capabilities a range bound needs: a successor and an ordering.
///
/// For dynamic values the successor capability is a runtime query; for native
/// types it always holds.
pub trait Steppable: Clone {
    /// Class name used in error messages.
    fn class_name(&self) -> String;

    /// Human-readable form used in error messages.
    fn describe(&self) -> String;

    fn responds_to_succ(&self) -> bool;

    fn succ(&self) -> Result<Self, RuntimeError>;

    fn compare(&self, other: &Self) -> Option<Ordering>;
}

impl Steppable for Value {
    fn class_name(&self) -> String {
        self.class().to_string()
    }

    fn describe(&self) -> String {
        self.inspect()
    }

    fn responds_to_succ(&self) -> bool {
        method_table::respond_to(self, "succ")
    }

    fn succ(&self) -> Result<Self, RuntimeError> {
        method_table::send(self, "succ", &[], None)
    }

    fn compare(&self, other: &Self) -> Option<Ordering> {
        Value::compare(self, other)
    }
}

impl Steppable for i64 {
    fn class_name(&self) -> String {
        "Integer".to_string()
    }

    fn describe(&self) -> String {
        self.to_string()
    }

    fn responds_to_succ(&self) -> bool {
        true
    }

    fn succ(&self) -> Result<Self, RuntimeError> {
        self.checked_add(1).ok_or_else(|| RuntimeError::Overflow {
            value: self.to_string(),
        })
    }

    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Steppable for char {
    fn class_name(&self) -> String {
        "char".to_string()
    }

    fn describe(&self) -> String {
        format!("{self:?}")
    }

    fn responds_to_succ(&self) -> bool {
        true
    }

    fn succ(&self) -> Result<Self, RuntimeError> {
        // Skips the surrogate gap.
        (*self as u32 + 1..=char::MAX as u32)
            .find_map(char::from_u32)
            .ok_or_else(|| RuntimeError::Overflow {
                value: self.describe(),
            })
    }

    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn ordering<T: Steppable>(a: &T, b: &T) -> Result<Ordering, RuntimeError> {
    a.compare(b).ok_or_else(|| RuntimeError::ComparisonFailed {
        left: a.class_name(),
        right: b.describe(),
    })
}

/// Step from `first` towards `last` by successor, calling `f` per element.
///
/// The successor capability of `first` is checked before anything else, so a
/// non-iterable bound fails even when the range is empty. `last == None` steps
/// without end.
pub fn step_range<T: Steppable>(
    first: &T,
    last: Option<&T>,
    exclude_end: bool,
    mut f: impl FnMut(&T) -> Result<(), RuntimeError>,
) -> Result<(), RuntimeError> {
    if !first.responds_to_succ() {
        return Err(RuntimeError::TypeCannotIterate {
            class: first.class_name(),
        });
    }

    let Some(last) = last else {
        tracing::debug!(first = %first.describe(), "stepping endless range");
        let mut current = first.clone();
        loop {
            f(&current)?;
            current = current.succ()?;
        }
    };

    if ordering(first, last)? == Ordering::Greater {
        tracing::debug!(first = %first.describe(), last = %last.describe(), "empty range");
        return Ok(());
    }

    let mut current = first.clone();
    while ordering(&current, last)? == Ordering::Less {
        f(&current)?;
        current = current.succ()?;
    }
    if !exclude_end && ordering(&current, last)? == Ordering::Equal {
        f(&current)?;
    }
    Ok(())
}

/// A range value: `first..last` or `first...last`. A `nil` last is endless.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeValue {
    first: Value,
    last: Value,
    exclude_end: bool,
}

impl RangeValue {
    /// Build a range. Both ends must be comparable unless `last` is `nil`.
    pub fn new(first: Value, last: Value, exclude_end: bool) -> Result<Rc<Self>, RuntimeError> {
        if !last.is_nil() && first.compare(&last).is_none() {
            return Err(RuntimeError::BadRange);
        }
        Ok(Rc::new(Self {
            first,
            last,
            exclude_end,
        }))
    }

    pub fn first(&self) -> &Value {
        &self.first
    }

    pub fn last(&self) -> &Value {
        &self.last
    }

    pub fn exclude_end(&self) -> bool {
        self.exclude_end
    }

    pub fn is_endless(&self) -> bool {
        self.last.is_nil()
    }

    /// `each` with or without a block.
    pub fn each(self: &Rc<Self>, block: Option<Block<'_>>) -> Result<BlockResult<Rc<Self>>, RuntimeError> {
        block_or_enum(block, || Value::Range(self.clone()), "each", &[], |block| {
            self.step(block)?;
            Ok(self.clone())
        })
    }

    /// Eager iteration over the range.
    pub fn step(&self, block: Block<'_>) -> Result<(), RuntimeError> {
        let last = if self.is_endless() { None } else { Some(&self.last) };
        step_range(&self.first, last, self.exclude_end, |v| {
            tracing::trace!(value = %v, "range each");
            block(std::slice::from_ref(v))
        })
    }
}

impl fmt::Display for RangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dots = if self.exclude_end { "..." } else { ".." };
        if self.is_endless() {
            write!(f, "{}{dots}", self.first)
        } else {
            write!(f, "{}{dots}{}", self.first, self.last)
        }
    }
}

fn receiver(recv: &Value) -> Result<&Rc<RangeValue>, RuntimeError> {
    match recv {
        Value::Range(range) => Ok(range),
        other => Err(RuntimeError::TypeMismatch {
            expected: "Range",
            found: other.class().to_string(),
        }),
    }
}

fn range_each(recv: &Value, args: &[Value], block: Option<Block<'_>>) -> Result<Value, RuntimeError> {
    RuntimeError::check_arity("each", args, 0)?;
    Ok(receiver(recv)?.each(block)?.into())
}

fn range_first(recv: &Value, args: &[Value], _block: Option<Block<'_>>) -> Result<Value, RuntimeError> {
    RuntimeError::check_arity("first", args, 0)?;
    Ok(receiver(recv)?.first.clone())
}

fn range_last(recv: &Value, args: &[Value], _block: Option<Block<'_>>) -> Result<Value, RuntimeError> {
    RuntimeError::check_arity("last", args, 0)?;
    Ok(receiver(recv)?.last.clone())
}

fn range_exclude_end(
    recv: &Value,
    args: &[Value],
    _block: Option<Block<'_>>,
) -> Result<Value, RuntimeError> {
    RuntimeError::check_arity("exclude_end?", args, 0)?;
    Ok(Value::Bool(receiver(recv)?.exclude_end))
}

pub(crate) fn register(table: &mut MethodTable) {
    table.define(ClassId::Range, "each", range_each);
    table.define(ClassId::Range, "first", range_first);
    table.define(ClassId::Range, "last", range_last);
    table.define(ClassId::Range, "exclude_end?", range_exclude_end);
}
