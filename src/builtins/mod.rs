// ABOUTME: Built-in function table, looked up by the evaluator on identifier miss

use crate::value::Value;

pub mod collections;
pub mod io;

/// Looks up a built-in by name. The evaluator calls this only after an
/// Environment lookup misses, per spec.md's Identifier dispatch.
pub fn lookup(name: &str) -> Option<Value> {
    let f: fn(&[Value]) -> Value = match name {
        "len" => collections::len,
        "first" => collections::first,
        "last" => collections::last,
        "rest" => collections::rest,
        "push" => collections::push,
        "put" => io::put,
        _ => return None,
    };
    Some(Value::Builtin(f))
}

/// Shared error format for arity mismatches across every built-in.
pub(crate) fn arity_error(got: usize, want: usize) -> Value {
    Value::Error(format!(
        "wrong number of arguments. got={}, want={}",
        got, want
    ))
}
