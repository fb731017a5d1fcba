// ABOUTME: Runtime Value types produced by evaluation, plus hashable keys

use crate::ast::{BlockStatement, Identifier};
use crate::env::Environment;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A value usable as a key in a `Value::Hash`. Derived only from Integer,
/// Boolean, and String values; equality is structural over a (kind tag,
/// content-derived hash) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(u64),
}

/// 64-bit FNV-1a, used to turn string content into a stable HashKey.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;
    let mut hash = OFFSET_BASIS;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

impl HashKey {
    /// Derives a HashKey from a Value, or None if the value is not hashable.
    pub fn from_value(value: &Value) -> Option<HashKey> {
        match value {
            Value::Integer(i) => Some(HashKey::Integer(*i)),
            Value::Boolean(b) => Some(HashKey::Boolean(*b)),
            Value::String(s) => Some(HashKey::String(fnv1a(s.as_bytes()))),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Null,
    String(String),
    Array(Vec<Value>),
    Hash(HashMap<HashKey, (Value, Value)>),
    Function {
        parameters: Vec<Identifier>,
        body: BlockStatement,
        env: Rc<Environment>,
    },
    Builtin(fn(&[Value]) -> Value),
    ReturnValue(Box<Value>),
    Error(String),
}

/// Structural equality for the data-like variants, used by tests and by
/// `==`/`!=` on non-Integer operands. Function and Builtin values are never
/// equal to anything, including themselves, since the language gives no
/// meaning to comparing closures or native handlers.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Hash(a), Value::Hash(b)) => a == b,
            (Value::ReturnValue(a), Value::ReturnValue(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    /// The type name used in error messages (`type mismatch: INTEGER + BOOLEAN`).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::Null => "NULL",
            Value::String(_) => "STRING",
            Value::Array(_) => "ARRAY",
            Value::Hash(_) => "HASH",
            Value::Function { .. } => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
            Value::ReturnValue(_) => "RETURN_VALUE",
            Value::Error(_) => "ERROR",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Boolean(false))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(elements) => {
                write!(f, "[")?;
                for (i, el) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", el)?;
                }
                write!(f, "]")
            }
            Value::Hash(pairs) => {
                write!(f, "{{")?;
                for (i, (_, (k, v))) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}:{}", k, v)?;
                }
                write!(f, "}}")
            }
            Value::Function { parameters, body, .. } => {
                let params: Vec<String> = parameters.iter().map(|p| p.name.clone()).collect();
                write!(f, "fn({}) {{ {} }}", params.join(", "), body)
            }
            Value::Builtin(_) => write!(f, "builtin function"),
            Value::ReturnValue(inner) => write!(f, "{}", inner),
            Value::Error(msg) => write!(f, "ERROR: {}", msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_and_boolean_display() {
        assert_eq!(Value::Integer(42).to_string(), "42");
        assert_eq!(Value::Integer(-5).to_string(), "-5");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::Boolean(false).to_string(), "false");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn string_display_has_no_quotes() {
        assert_eq!(Value::String("hello world".to_string()).to_string(), "hello world");
    }

    #[test]
    fn array_display_has_no_spaces() {
        let arr = Value::Array(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
        assert_eq!(arr.to_string(), "[1,2,3]");
    }

    #[test]
    fn error_display() {
        assert_eq!(
            Value::Error("type mismatch: INTEGER + BOOLEAN".to_string()).to_string(),
            "ERROR: type mismatch: INTEGER + BOOLEAN"
        );
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Boolean(false).is_truthy());
        assert!(Value::Boolean(true).is_truthy());
        assert!(Value::Integer(0).is_truthy());
        assert!(Value::String(String::new()).is_truthy());
    }

    #[test]
    fn hash_key_only_from_integer_bool_string() {
        assert!(HashKey::from_value(&Value::Integer(1)).is_some());
        assert!(HashKey::from_value(&Value::Boolean(true)).is_some());
        assert!(HashKey::from_value(&Value::String("x".to_string())).is_some());
        assert!(HashKey::from_value(&Value::Null).is_none());
        assert!(HashKey::from_value(&Value::Array(vec![])).is_none());
    }

    #[test]
    fn hash_key_string_equality_is_structural() {
        let a = HashKey::from_value(&Value::String("one".to_string())).unwrap();
        let b = HashKey::from_value(&Value::String("one".to_string())).unwrap();
        assert_eq!(a, b);
    }
}
