// ABOUTME: Black-box integration tests exercising the crate's public API

use monkey::{env::Environment, eval, parse};

fn run(source: &str) -> String {
    let (program, diagnostics) = parse(source);
    assert!(diagnostics.is_empty(), "parser errors: {:?}", diagnostics);
    let env = Environment::new();
    eval(&program, &env).to_string()
}

#[test]
fn scenario_let_and_arithmetic() {
    assert_eq!(run("let x = 5; x + 10;"), "15");
}

#[test]
fn scenario_if_else() {
    assert_eq!(run("if (1 < 2) { 10 } else { 20 };"), "10");
}

#[test]
fn scenario_function_call() {
    assert_eq!(run("let add = fn(a,b){ a+b }; add(2,3);"), "5");
}

#[test]
fn scenario_string_concat() {
    assert_eq!(run(r#""hello " + "world""#), "hello world");
}

#[test]
fn scenario_len_of_array() {
    assert_eq!(run("len([1,2,3])"), "3");
}

#[test]
fn scenario_nested_return() {
    assert_eq!(
        run("if (10 > 1) { if (10 > 1) { return 10; } return 1; }"),
        "10"
    );
}

#[test]
fn scenario_type_mismatch() {
    assert_eq!(run("5 + true;"), "ERROR: type mismatch: INTEGER + BOOLEAN");
}

#[test]
fn scenario_identifier_not_found() {
    assert_eq!(run("foobar"), "ERROR: identifier not found: foobar");
}

#[test]
fn scenario_recursive_counter() {
    assert_eq!(
        run("let counter = fn(x){ if (x > 3) { return x; } counter(x+1); }; counter(0);"),
        "4"
    );
}

#[test]
fn closures_share_captured_environment() {
    let source = r#"
        let makeCounter = fn() {
            let count = 0;
            fn() { count }
        };
        let counter = makeCounter();
        counter();
    "#;
    assert_eq!(run(source), "0");
}

#[test]
fn double_bang_is_identity_on_booleans() {
    assert_eq!(run("!!true"), "true");
    assert_eq!(run("!!false"), "false");
}

#[test]
fn and_short_circuits_without_evaluating_right() {
    assert_eq!(run("false && (1/0)"), "false");
}

#[test]
fn or_short_circuits_without_evaluating_right() {
    assert_eq!(run("true || (1/0)"), "true");
}

#[test]
fn fragments_share_a_persistent_environment() {
    // Mirrors the REPL/driver contract: successive fragments evaluate
    // against the same Environment so earlier `let`s remain visible.
    let env = Environment::new();

    let (p1, d1) = parse("let x = 10;");
    assert!(d1.is_empty());
    eval(&p1, &env);

    let (p2, d2) = parse("x * 2;");
    assert!(d2.is_empty());
    assert_eq!(eval(&p2, &env).to_string(), "20");
}

#[test]
fn parser_diagnostics_short_circuit_that_fragment() {
    let (_, diagnostics) = parse("let x 5;");
    assert!(!diagnostics.is_empty());
    assert!(diagnostics[0].contains("expected next token to be"));
}

#[test]
fn array_and_hash_literals_round_trip_through_builtins() {
    assert_eq!(run("push(rest([1,2,3]), 9)"), "[2,3,9]");
    assert_eq!(run(r#"{"a": 1, "b": 2}["b"]"#), "2");
}
