// ABOUTME: String/Array built-ins: len, first, last, rest, push

use super::arity_error;
use crate::value::Value;

/// String -> byte length; Array -> element count; else an Error.
pub fn len(args: &[Value]) -> Value {
    if args.len() != 1 {
        return arity_error(args.len(), 1);
    }
    match &args[0] {
        Value::String(s) => Value::Integer(s.len() as i64),
        Value::Array(elements) => Value::Integer(elements.len() as i64),
        other => Value::Error(format!(
            "argument to 'len' not supported, got {}",
            other.type_name()
        )),
    }
}

/// Array -> first element or Null if empty; else an Error.
pub fn first(args: &[Value]) -> Value {
    if args.len() != 1 {
        return arity_error(args.len(), 1);
    }
    match &args[0] {
        Value::Array(elements) => elements.first().cloned().unwrap_or(Value::Null),
        other => Value::Error(format!(
            "argument to 'first' must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

/// Array -> last element or Null if empty; else an Error.
pub fn last(args: &[Value]) -> Value {
    if args.len() != 1 {
        return arity_error(args.len(), 1);
    }
    match &args[0] {
        Value::Array(elements) => elements.last().cloned().unwrap_or(Value::Null),
        other => Value::Error(format!(
            "argument to 'last' must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

/// Array -> new Array of all but the first element, or Null if empty; else
/// an Error. Non-mutating: builds a fresh Vec rather than aliasing.
pub fn rest(args: &[Value]) -> Value {
    if args.len() != 1 {
        return arity_error(args.len(), 1);
    }
    match &args[0] {
        Value::Array(elements) => {
            if elements.is_empty() {
                Value::Null
            } else {
                Value::Array(elements[1..].to_vec())
            }
        }
        other => Value::Error(format!(
            "argument to 'rest' must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

/// Array + value -> new Array with value appended; else an Error.
/// Non-mutating: the original array is left untouched.
pub fn push(args: &[Value]) -> Value {
    if args.len() != 2 {
        return arity_error(args.len(), 2);
    }
    match &args[0] {
        Value::Array(elements) => {
            let mut new_elements = elements.clone();
            new_elements.push(args[1].clone());
            Value::Array(new_elements)
        }
        other => Value::Error(format!(
            "argument to 'push' must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_of_string_and_array() {
        assert_eq!(len(&[Value::String("hello".to_string())]), Value::Integer(5));
        assert_eq!(
            len(&[Value::Array(vec![Value::Integer(1), Value::Integer(2)])]),
            Value::Integer(2)
        );
    }

    #[test]
    fn len_wrong_arity() {
        assert_eq!(
            len(&[Value::Integer(1), Value::Integer(2)]),
            Value::Error("wrong number of arguments. got=2, want=1".to_string())
        );
    }

    #[test]
    fn len_wrong_type() {
        assert_eq!(
            len(&[Value::Integer(5)]),
            Value::Error("argument to 'len' not supported, got INTEGER".to_string())
        );
    }

    #[test]
    fn first_last_rest_on_array() {
        let arr = Value::Array(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
        assert_eq!(first(&[arr.clone()]), Value::Integer(1));
        assert_eq!(last(&[arr.clone()]), Value::Integer(3));
        assert_eq!(
            rest(&[arr]),
            Value::Array(vec![Value::Integer(2), Value::Integer(3)])
        );
    }

    #[test]
    fn first_last_rest_on_empty_array() {
        let empty = Value::Array(vec![]);
        assert_eq!(first(&[empty.clone()]), Value::Null);
        assert_eq!(last(&[empty.clone()]), Value::Null);
        assert_eq!(rest(&[empty]), Value::Null);
    }

    #[test]
    fn push_is_non_mutating() {
        let arr = Value::Array(vec![Value::Integer(1)]);
        let result = push(&[arr.clone(), Value::Integer(2)]);
        assert_eq!(
            result,
            Value::Array(vec![Value::Integer(1), Value::Integer(2)])
        );
        assert_eq!(arr, Value::Array(vec![Value::Integer(1)]));
    }

    #[test]
    fn array_builtins_reject_non_array() {
        assert_eq!(
            first(&[Value::Integer(5)]),
            Value::Error("argument to 'first' must be ARRAY, got INTEGER".to_string())
        );
        assert_eq!(
            push(&[Value::Integer(5), Value::Integer(1)]),
            Value::Error("argument to 'push' must be ARRAY, got INTEGER".to_string())
        );
    }
}
