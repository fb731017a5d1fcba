// ABOUTME: Tree-walking evaluator mapping an AST node and Environment to a Value

use crate::ast::*;
use crate::env::Environment;
use crate::value::{HashKey, Value};
use std::collections::HashMap;
use std::rc::Rc;

/// Evaluates a whole program. Top-level ReturnValue is unwrapped so `return`
/// at the top level behaves like a plain expression result; Error surfaces
/// as-is.
pub fn eval_program(program: &Program, env: &Rc<Environment>) -> Value {
    let mut result = Value::Null;
    for stmt in &program.statements {
        result = eval_statement(stmt, env);
        match result {
            Value::ReturnValue(inner) => return *inner,
            Value::Error(_) => return result,
            _ => {}
        }
    }
    result
}

/// Evaluates a block's statements in order without unwrapping ReturnValue,
/// so an enclosing function call or nested block can still observe it.
fn eval_block_statement(block: &BlockStatement, env: &Rc<Environment>) -> Value {
    let mut result = Value::Null;
    for stmt in &block.statements {
        result = eval_statement(stmt, env);
        if matches!(result, Value::ReturnValue(_) | Value::Error(_)) {
            return result;
        }
    }
    result
}

fn eval_statement(stmt: &Statement, env: &Rc<Environment>) -> Value {
    match stmt {
        Statement::Let(s) => eval_let_statement(s, env),
        Statement::Return(s) => eval_return_statement(s, env),
        Statement::Expression(s) => eval_expression(&s.expression, env),
        Statement::Block(s) => eval_block_statement(s, env),
    }
}

fn eval_let_statement(stmt: &LetStatement, env: &Rc<Environment>) -> Value {
    let value = eval_expression(&stmt.value, env);
    if value.is_error() {
        return value;
    }
    env.define(stmt.name.name.clone(), value);
    Value::Null
}

fn eval_return_statement(stmt: &ReturnStatement, env: &Rc<Environment>) -> Value {
    let value = match &stmt.value {
        Some(expr) => eval_expression(expr, env),
        None => Value::Null,
    };
    if value.is_error() {
        return value;
    }
    Value::ReturnValue(Box::new(value))
}

fn eval_expression(expr: &Expression, env: &Rc<Environment>) -> Value {
    match expr {
        Expression::IntegerLiteral(e) => Value::Integer(e.value),
        Expression::BooleanLiteral(e) => Value::Boolean(e.value),
        Expression::StringLiteral(e) => Value::String(e.value.clone()),
        Expression::Identifier(e) => eval_identifier(e, env),
        Expression::Prefix(e) => eval_prefix_expression(e, env),
        Expression::Infix(e) => eval_infix_expression(e, env),
        Expression::If(e) => eval_if_expression(e, env),
        Expression::Function(e) => Value::Function {
            parameters: e.parameters.clone(),
            body: e.body.clone(),
            env: env.clone(),
        },
        Expression::Call(e) => eval_call_expression(e, env),
        Expression::ArrayLiteral(e) => eval_array_literal(e, env),
        Expression::HashLiteral(e) => eval_hash_literal(e, env),
        Expression::Index(e) => eval_index_expression(e, env),
    }
}

fn eval_identifier(ident: &Identifier, env: &Rc<Environment>) -> Value {
    if let Some(value) = env.get(&ident.name) {
        return value;
    }
    if let Some(builtin) = crate::builtins::lookup(&ident.name) {
        return builtin;
    }
    Value::Error(format!("identifier not found: {}", ident.name))
}

fn eval_prefix_expression(expr: &PrefixExpression, env: &Rc<Environment>) -> Value {
    let right = eval_expression(&expr.right, env);
    if right.is_error() {
        return right;
    }
    match expr.operator.as_str() {
        "!" => eval_bang_operator(right),
        "-" => eval_minus_prefix_operator(right),
        op => Value::Error(format!("unknown operator: {}{}", op, right.type_name())),
    }
}

fn eval_bang_operator(right: Value) -> Value {
    match right {
        Value::Boolean(true) => Value::Boolean(false),
        Value::Boolean(false) => Value::Boolean(true),
        Value::Null => Value::Boolean(true),
        _ => Value::Boolean(false),
    }
}

fn eval_minus_prefix_operator(right: Value) -> Value {
    match right {
        Value::Integer(i) => Value::Integer(-i),
        other => Value::Error(format!("unknown operator: -{}", other.type_name())),
    }
}

fn eval_infix_expression(expr: &InfixExpression, env: &Rc<Environment>) -> Value {
    let left = eval_expression(&expr.left, env);
    if left.is_error() {
        return left;
    }

    // && and || short-circuit: the right side must not be evaluated at all
    // when the left side already determines the result.
    match expr.operator.as_str() {
        "&&" => {
            if !left.is_truthy() {
                return left;
            }
            return eval_expression(&expr.right, env);
        }
        "||" => {
            if left.is_truthy() {
                return left;
            }
            return eval_expression(&expr.right, env);
        }
        _ => {}
    }

    let right = eval_expression(&expr.right, env);
    if right.is_error() {
        return right;
    }

    apply_infix_operator(&expr.operator, left, right)
}

fn apply_infix_operator(operator: &str, left: Value, right: Value) -> Value {
    match (&left, &right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(operator, *l, *r),
        _ if operator == "==" => Value::Boolean(value_identity_eq(&left, &right)),
        _ if operator == "!=" => Value::Boolean(!value_identity_eq(&left, &right)),
        (Value::String(l), Value::String(r)) => eval_string_infix(operator, l, r),
        _ if left.type_name() != right.type_name() => Value::Error(format!(
            "type mismatch: {} {} {}",
            left.type_name(),
            operator,
            right.type_name()
        )),
        _ => Value::Error(format!(
            "unknown operator: {} {} {}",
            left.type_name(),
            operator,
            right.type_name()
        )),
    }
}

/// `==`/`!=` on non-Integer operands compare by value identity. Boolean and
/// Null are canonical singletons in spirit, so structural equality on them
/// (and on Strings, for usability) stands in for identity here.
fn value_identity_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Boolean(l), Value::Boolean(r)) => l == r,
        (Value::Null, Value::Null) => true,
        (Value::String(l), Value::String(r)) => l == r,
        _ => false,
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Value {
    match operator {
        "+" => Value::Integer(left + right),
        "-" => Value::Integer(left - right),
        "*" => Value::Integer(left * right),
        "/" => {
            if right == 0 {
                Value::Error("division by zero".to_string())
            } else {
                Value::Integer(left / right)
            }
        }
        "<" => Value::Boolean(left < right),
        ">" => Value::Boolean(left > right),
        "==" => Value::Boolean(left == right),
        "!=" => Value::Boolean(left != right),
        op => Value::Error(format!("unknown operator: INTEGER {} INTEGER", op)),
    }
}

fn eval_string_infix(operator: &str, left: &str, right: &str) -> Value {
    match operator {
        "+" => Value::String(format!("{}{}", left, right)),
        op => Value::Error(format!("unknown operator: STRING {} STRING", op)),
    }
}

/// A clause is "matched" purely because its condition was truthy, not
/// because its body happens to be non-Null. See SPEC_FULL.md §9.5.
fn eval_if_expression(expr: &IfExpression, env: &Rc<Environment>) -> Value {
    let condition = eval_expression(&expr.condition, env);
    if condition.is_error() {
        return condition;
    }
    if condition.is_truthy() {
        return eval_block_statement(&expr.consequence, env);
    }

    for elif in &expr.elifs {
        let elif_condition = eval_expression(&elif.condition, env);
        if elif_condition.is_error() {
            return elif_condition;
        }
        if elif_condition.is_truthy() {
            return eval_block_statement(&elif.consequence, env);
        }
    }

    match &expr.alternative {
        Some(alt) => eval_block_statement(alt, env),
        None => Value::Null,
    }
}

fn eval_call_expression(expr: &CallExpression, env: &Rc<Environment>) -> Value {
    let function = eval_expression(&expr.function, env);
    if function.is_error() {
        return function;
    }

    let mut args = Vec::with_capacity(expr.arguments.len());
    for arg_expr in &expr.arguments {
        let arg = eval_expression(arg_expr, env);
        if arg.is_error() {
            return arg;
        }
        args.push(arg);
    }

    apply_function(function, &args)
}

fn apply_function(function: Value, args: &[Value]) -> Value {
    match function {
        Value::Function {
            parameters,
            body,
            env,
        } => {
            let call_env = Environment::with_parent(env);
            for (param, arg) in parameters.iter().zip(args.iter()) {
                call_env.define(param.name.clone(), arg.clone());
            }
            let evaluated = eval_block_statement(&body, &call_env);
            unwrap_return_value(evaluated)
        }
        Value::Builtin(f) => f(args),
        other => Value::Error(format!("not a function: {}", other.type_name())),
    }
}

fn unwrap_return_value(value: Value) -> Value {
    match value {
        Value::ReturnValue(inner) => *inner,
        other => other,
    }
}

fn eval_array_literal(expr: &ArrayLiteral, env: &Rc<Environment>) -> Value {
    let mut elements = Vec::with_capacity(expr.elements.len());
    for el_expr in &expr.elements {
        let el = eval_expression(el_expr, env);
        if el.is_error() {
            return el;
        }
        elements.push(el);
    }
    Value::Array(elements)
}

fn eval_hash_literal(expr: &HashLiteral, env: &Rc<Environment>) -> Value {
    let mut pairs = HashMap::new();
    for (key_expr, value_expr) in &expr.pairs {
        let key = eval_expression(key_expr, env);
        if key.is_error() {
            return key;
        }
        let value = eval_expression(value_expr, env);
        if value.is_error() {
            return value;
        }
        let hash_key = match HashKey::from_value(&key) {
            Some(k) => k,
            None => return Value::Error(format!("unusable as hash key: {}", key.type_name())),
        };
        pairs.insert(hash_key, (key, value));
    }
    Value::Hash(pairs)
}

fn eval_index_expression(expr: &IndexExpression, env: &Rc<Environment>) -> Value {
    let left = eval_expression(&expr.left, env);
    if left.is_error() {
        return left;
    }
    let index = eval_expression(&expr.index, env);
    if index.is_error() {
        return index;
    }

    match (&left, &index) {
        (Value::Array(elements), Value::Integer(i)) => {
            if *i < 0 || *i as usize >= elements.len() {
                Value::Null
            } else {
                elements[*i as usize].clone()
            }
        }
        (Value::Hash(pairs), _) => match HashKey::from_value(&index) {
            Some(key) => pairs
                .get(&key)
                .map(|(_, v)| v.clone())
                .unwrap_or(Value::Null),
            None => Value::Error(format!("unusable as hash key: {}", index.type_name())),
        },
        (Value::Array(_), _) => Value::Null,
        _ => Value::Error(format!("index operator not supported: {}", left.type_name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn eval_source(source: &str) -> Value {
        let (program, errors) = parse(source);
        assert!(errors.is_empty(), "parser errors: {:?}", errors);
        let env = Environment::new();
        eval_program(&program, &env)
    }

    #[test]
    fn let_and_arithmetic() {
        assert_eq!(eval_source("let x = 5; x + 10;").to_string(), "15");
    }

    #[test]
    fn if_else() {
        assert_eq!(eval_source("if (1 < 2) { 10 } else { 20 };").to_string(), "10");
    }

    #[test]
    fn function_call() {
        assert_eq!(
            eval_source("let add = fn(a,b){ a+b }; add(2,3);").to_string(),
            "5"
        );
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(
            eval_source(r#""hello " + "world""#).to_string(),
            "hello world"
        );
    }

    #[test]
    fn len_builtin_on_array() {
        assert_eq!(eval_source("len([1,2,3])").to_string(), "3");
    }

    #[test]
    fn nested_return_escapes_function_not_just_block() {
        assert_eq!(
            eval_source("if (10 > 1) { if (10 > 1) { return 10; } return 1; }").to_string(),
            "10"
        );
    }

    #[test]
    fn type_mismatch_error() {
        assert_eq!(
            eval_source("5 + true;").to_string(),
            "ERROR: type mismatch: INTEGER + BOOLEAN"
        );
    }

    #[test]
    fn identifier_not_found_error() {
        assert_eq!(
            eval_source("foobar").to_string(),
            "ERROR: identifier not found: foobar"
        );
    }

    #[test]
    fn recursive_closure_counter() {
        assert_eq!(
            eval_source(
                "let counter = fn(x){ if (x > 3) { return x; } counter(x+1); }; counter(0);"
            )
            .to_string(),
            "4"
        );
    }

    #[test]
    fn closure_captures_defining_environment() {
        assert_eq!(
            eval_source("let newAdder = fn(x){ fn(y){ x+y } }; let a = newAdder(2); a(3);")
                .to_string(),
            "5"
        );
    }

    #[test]
    fn double_bang_is_identity_on_booleans() {
        assert_eq!(eval_source("!!true").to_string(), "true");
        assert_eq!(eval_source("!!false").to_string(), "false");
    }

    #[test]
    fn short_circuit_and_does_not_evaluate_right() {
        // "foo" is undefined; if && failed to short-circuit, this would
        // evaluate to an identifier-not-found Error instead of false.
        assert_eq!(eval_source("false && foo").to_string(), "false");
    }

    #[test]
    fn short_circuit_or_does_not_evaluate_right() {
        assert_eq!(eval_source("true || foo").to_string(), "true");
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(eval_source("10 / 0").to_string(), "ERROR: division by zero");
    }

    #[test]
    fn elif_matched_even_when_body_is_null() {
        // The first elif's condition is true but its body is an empty block
        // (evaluates to Null). The fix treats this as matched, not as
        // falling through to the next clause or the else branch.
        assert_eq!(
            eval_source("if (false) { 1 } elif (true) { } else { 99 }").to_string(),
            "null"
        );
    }

    #[test]
    fn elif_chain_picks_first_truthy_condition() {
        assert_eq!(
            eval_source("let x = 2; if (x > 3) { 1 } elif (x > 1) { 2 } elif (x > 0) { 3 } else { 4 };")
                .to_string(),
            "2"
        );
    }

    #[test]
    fn array_literal_and_indexing() {
        assert_eq!(eval_source("[1,2,3][1]").to_string(), "2");
        assert_eq!(eval_source("[1,2,3][99]").to_string(), "null");
    }

    #[test]
    fn first_last_rest_push_builtins() {
        assert_eq!(eval_source("first([1,2,3])").to_string(), "1");
        assert_eq!(eval_source("last([1,2,3])").to_string(), "3");
        assert_eq!(eval_source("rest([1,2,3])").to_string(), "[2,3]");
        assert_eq!(eval_source("rest([])").to_string(), "null");
        assert_eq!(eval_source("push([1,2],3)").to_string(), "[1,2,3]");
    }

    #[test]
    fn builtin_wrong_arg_count() {
        assert_eq!(
            eval_source("len(1, 2)").to_string(),
            "ERROR: wrong number of arguments. got=2, want=1"
        );
    }

    #[test]
    fn builtin_wrong_arg_type() {
        assert_eq!(
            eval_source("len(5)").to_string(),
            "ERROR: argument to 'len' not supported, got INTEGER"
        );
        assert_eq!(
            eval_source("first(5)").to_string(),
            "ERROR: argument to 'first' must be ARRAY, got INTEGER"
        );
    }

    #[test]
    fn hash_literal_and_indexing() {
        assert_eq!(
            eval_source(r#"{"one": 1, "two": 2}["one"]"#).to_string(),
            "1"
        );
        assert_eq!(eval_source(r#"{"one": 1}["missing"]"#).to_string(), "null");
    }

    #[test]
    fn non_hashable_key_is_error() {
        assert_eq!(
            eval_source("{}[fn(x){x}]").to_string(),
            "ERROR: unusable as hash key: FUNCTION"
        );
    }

    #[test]
    fn function_display_form() {
        assert_eq!(
            eval_source("fn(x, y) { x + y }").to_string(),
            "fn(x, y) { (x + y) }"
        );
    }

    #[test]
    fn not_a_function_error() {
        assert_eq!(
            eval_source("let x = 5; x(1);").to_string(),
            "ERROR: not a function: INTEGER"
        );
    }
}
