// value.rs
//! Dynamic values handled by the runtime.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::enumerator::Enumerator;
use crate::error::RuntimeError;
use crate::range::RangeValue;

/// Class identity of a value, used for method lookup and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassId {
    NilClass,
    TrueClass,
    FalseClass,
    Integer,
    Float,
    String,
    Array,
    Range,
    Enumerator,
}

impl ClassId {
    pub fn name(self) -> &'static str {
        match self {
            ClassId::NilClass => "NilClass",
            ClassId::TrueClass => "TrueClass",
            ClassId::FalseClass => "FalseClass",
            ClassId::Integer => "Integer",
            ClassId::Float => "Float",
            ClassId::String => "String",
            ClassId::Array => "Array",
            ClassId::Range => "Range",
            ClassId::Enumerator => "Enumerator",
        }
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Array(Rc<[Value]>),
    Range(Rc<RangeValue>),
    Enumerator(Rc<Enumerator>),
}

impl Value {
    pub fn str(s: impl AsRef<str>) -> Self {
        Value::Str(Rc::from(s.as_ref()))
    }

    pub fn array(items: impl Into<Vec<Value>>) -> Self {
        Value::Array(Rc::from(items.into()))
    }

    pub fn class(&self) -> ClassId {
        match self {
            Value::Nil => ClassId::NilClass,
            Value::Bool(true) => ClassId::TrueClass,
            Value::Bool(false) => ClassId::FalseClass,
            Value::Int(_) => ClassId::Integer,
            Value::Float(_) => ClassId::Float,
            Value::Str(_) => ClassId::String,
            Value::Array(_) => ClassId::Array,
            Value::Range(_) => ClassId::Range,
            Value::Enumerator(_) => ClassId::Enumerator,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_int(&self) -> Result<i64, RuntimeError> {
        match self {
            Value::Int(n) => Ok(*n),
            other => Err(RuntimeError::TypeMismatch {
                expected: "Integer",
                found: other.class().to_string(),
            }),
        }
    }

    /// Three-way comparison. `None` when the two values are not comparable.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Float(b)) => compare_int_float(*a, *b),
            (Value::Float(a), Value::Int(b)) => compare_int_float(*b, *a).map(Ordering::reverse),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Str(a), Value::Str(b)) => Some(a.as_bytes().cmp(b.as_bytes())),
            (Value::Nil, Value::Nil) => Some(Ordering::Equal),
            _ => None,
        }
    }

    /// Host-style inspection, as printed by the CLI and used in messages.
    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

/// Exact `Integer <=> Float`. Casting the integer to `f64` would round above 2^53.
fn compare_int_float(a: i64, b: f64) -> Option<Ordering> {
    // 2^63, the first float past i64::MAX.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if b.is_nan() {
        return None;
    }
    if b >= LIMIT {
        return Some(Ordering::Less);
    }
    if b < -LIMIT {
        return Some(Ordering::Greater);
    }
    let floor = b.floor();
    // In range, so the cast is exact.
    match a.cmp(&(floor as i64)) {
        Ordering::Equal if b > floor => Some(Ordering::Less),
        ord => Some(ord),
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Range(a), Value::Range(b)) => a == b,
            (Value::Enumerator(a), Value::Enumerator(b)) => Rc::ptr_eq(a, b),
            _ => self.compare(other) == Some(Ordering::Equal),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

impl From<Rc<RangeValue>> for Value {
    fn from(range: Rc<RangeValue>) -> Self {
        Value::Range(range)
    }
}

impl From<Rc<Enumerator>> for Value {
    fn from(e: Rc<Enumerator>) -> Self {
        Value::Enumerator(e)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Value::Float(x) if x.is_nan() => f.write_str("NaN"),
            Value::Float(x) if x.is_infinite() => {
                f.write_str(if *x > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Range(range) => write!(f, "{range}"),
            Value::Enumerator(e) => write!(f, "{e}"),
        }
    }
}

/// Parse a command-line literal: integers, floats, `nil`, booleans, else a string.
pub fn parse_literal(text: &str) -> Value {
    match text {
        "nil" => return Value::Nil,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(n) = text.parse::<i64>() {
        return Value::Int(n);
    }
    if !text.contains(['.', 'e', 'E']) {
        return Value::str(text);
    }
    match text.parse::<f64>() {
        Ok(x) if x.is_finite() => Value::Float(x),
        _ => Value::str(text),
    }
}
