//! `String#succ`.

use crate::block::Block;
use crate::error::RuntimeError;
use crate::method_table::MethodTable;
use crate::value::{ClassId, Value};

/// Successor of a string: the rightmost alphanumeric is incremented and carries
/// leftward over other alphanumerics, skipping punctuation in between. A string
/// without alphanumerics has its last character incremented.
pub fn string_succ(s: &str) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    let Some(mut i) = chars.iter().rposition(|c| c.is_ascii_alphanumeric()) else {
        if let Some(last) = chars.last_mut() {
            *last = next_char(*last);
        }
        return chars.into_iter().collect();
    };

    loop {
        let (next, carry) = increment_alnum(chars[i]);
        chars[i] = next;
        let Some(carry) = carry else {
            break;
        };
        match chars[..i].iter().rposition(|c| c.is_ascii_alphanumeric()) {
            Some(j) => i = j,
            None => {
                chars.insert(i, carry);
                break;
            }
        }
    }
    chars.into_iter().collect()
}

/// Increment one alphanumeric, returning the digit to carry on wrap.
fn increment_alnum(c: char) -> (char, Option<char>) {
    match c {
        '9' => ('0', Some('1')),
        'z' => ('a', Some('a')),
        'Z' => ('A', Some('A')),
        c => (next_char(c), None),
    }
}

fn next_char(c: char) -> char {
    let mut code = c as u32 + 1;
    loop {
        if let Some(next) = char::from_u32(code) {
            return next;
        }
        // Surrogate gap.
        code += 1;
        if code > char::MAX as u32 {
            return '\0';
        }
    }
}

fn string_succ_method(
    recv: &Value,
    args: &[Value],
    _block: Option<Block<'_>>,
) -> Result<Value, RuntimeError> {
    RuntimeError::check_arity("succ", args, 0)?;
    match recv {
        Value::Str(s) => Ok(Value::str(string_succ(s))),
        other => Err(RuntimeError::TypeMismatch {
            expected: "String",
            found: other.class().to_string(),
        }),
    }
}

pub(crate) fn register(table: &mut MethodTable) {
    table.define(ClassId::String, "succ", string_succ_method);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succ_simple_and_carry() {
        assert_eq!(string_succ("a"), "b");
        assert_eq!(string_succ("az"), "ba");
        assert_eq!(string_succ("zz"), "aaa");
        assert_eq!(string_succ("a9"), "b0");
        assert_eq!(string_succ("Zz"), "AAa");
        assert_eq!(string_succ("99"), "100");
    }

    #[test]
    fn succ_skips_punctuation_between_alnums() {
        assert_eq!(string_succ("1.9.9"), "2.0.0");
        assert_eq!(string_succ("a-9"), "b-0");
    }

    #[test]
    fn succ_without_alnums() {
        assert_eq!(string_succ(""), "");
        assert_eq!(string_succ("***"), "**+");
    }
}
