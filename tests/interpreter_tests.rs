// Stack effect semantics of the interpreter backend.  Each case seeds the
// stack, runs a snippet, and checks the resulting stack.

use forth32::runtime::{interpreter::ForthInterpreter, value::Value};
use test_case::test_case;

/// Run a snippet against a fresh interpreter with a pre-seeded stack and
/// return the final stack as integers.
fn eval_and_stack(source: &str, init_stack: &[i32]) -> Vec<i32> {
    let mut interp = ForthInterpreter::new();

    for &value in init_stack {
        interp.push(Value::from(value));
    }

    interp.process_source("<test>", source);

    interp
        .stack()
        .iter()
        .map(|value| value.as_int().expect("expected an integer stack"))
        .collect()
}

#[test_case("42", &[], &[42]; "number")]
#[test_case("-7", &[], &[-7]; "negative number")]
#[test_case("3 4 +", &[], &[7]; "literals then add")]
#[test_case("+", &[2, 2], &[4]; "simple add")]
#[test_case("-", &[5, 2], &[3]; "simple sub")]
#[test_case("-", &[2, 5], &[-3]; "sub goes negative")]
#[test_case("*", &[3, 4], &[12]; "simple mul")]
#[test_case("mod", &[13, 5], &[3]; "simple mod")]
#[test_case("mod", &[5, 0], &[0]; "mod by zero pushes zero")]
#[test_case("neg", &[9], &[-9]; "negate positive number")]
#[test_case("neg", &[-9], &[9]; "negate negative number")]
#[test_case("dup", &[42], &[42, 42]; "dup")]
#[test_case("dup drop", &[5], &[5]; "dup then drop is a no-op")]
#[test_case("swap", &[1, 2], &[2, 1]; "swap")]
#[test_case("swap swap", &[1, 2], &[1, 2]; "swap is its own inverse")]
#[test_case("drop", &[1, 2], &[1]; "drop")]
#[test_case("over", &[1, 2], &[1, 2, 1]; "over")]
#[test_case("nip", &[1, 2], &[2]; "nip")]
#[test_case("tuck", &[1, 2], &[2, 1, 2]; "tuck")]
#[test_case("1 2 swap over nip tuck", &[], &[2, 2, 2]; "mixed manipulation")]
#[test_case(".s", &[1, 2], &[1, 2]; "stack dump is non destructive")]
#[test_case(".", &[5], &[]; "dot consumes the printed value")]
#[test_case("2 3 \\ push and add\n+", &[], &[5]; "comments are stripped")]
fn stack_effects(source: &str, init_stack: &[i32], expected: &[i32]) {
    assert_eq!(eval_and_stack(source, init_stack), expected);
}

// Underflow is a silent no-op.  The operation is skipped and execution
// continues with the next token.
#[test_case("+", &[], &[]; "add on empty stack")]
#[test_case("+", &[1], &[1]; "add with one value")]
#[test_case("-", &[1], &[1]; "sub with one value")]
#[test_case("mod", &[1], &[1]; "mod with one value")]
#[test_case("dup", &[], &[]; "dup on empty stack")]
#[test_case("swap", &[1], &[1]; "swap with one value")]
#[test_case("drop", &[], &[]; "drop on empty stack")]
#[test_case("over", &[1], &[1]; "over with one value")]
#[test_case("nip", &[1], &[1]; "nip with one value")]
#[test_case("tuck", &[1], &[1]; "tuck with one value")]
#[test_case("neg", &[], &[]; "neg on empty stack")]
#[test_case(".", &[], &[]; "dot on empty stack")]
#[test_case("+ 3 4 +", &[], &[7]; "execution continues after a skip")]
fn underflow_is_skipped(source: &str, init_stack: &[i32], expected: &[i32]) {
    assert_eq!(eval_and_stack(source, init_stack), expected);
}

#[test]
fn variables_store_and_fetch() {
    let mut interp = ForthInterpreter::new();

    interp.process_source("<test>", "variable x 5 x ! x @");

    assert_eq!(interp.stack(), &[Value::Int(5)]);
    assert_eq!(interp.variable("x"), Some(5));
}

#[test]
fn variables_start_at_zero() {
    let mut interp = ForthInterpreter::new();

    interp.process_source("<test>", "variable x x @");

    assert_eq!(interp.stack(), &[Value::Int(0)]);
}

#[test]
fn redeclaration_keeps_the_first_binding() {
    let mut interp = ForthInterpreter::new();

    interp.process_source("<test>", "variable x 7 x ! variable x x @");

    assert_eq!(interp.stack(), &[Value::Int(7)]);
    assert_eq!(interp.variable("x"), Some(7));
}

#[test]
fn unknown_tokens_are_pushed_as_names() {
    let mut interp = ForthInterpreter::new();

    interp.process_source("<test>", "bogus");

    assert_eq!(interp.stack(), &[Value::from("bogus")]);
}

#[test]
fn store_on_unknown_variable_is_a_no_op() {
    let mut interp = ForthInterpreter::new();

    interp.process_source("<test>", "5 y !");

    // Nothing was consumed and nothing was written.
    assert_eq!(interp.stack(), &[Value::from(5), Value::from("y")]);
    assert_eq!(interp.variable("y"), None);
}

#[test]
fn fetch_on_unknown_variable_is_a_no_op() {
    let mut interp = ForthInterpreter::new();

    interp.process_source("<test>", "y @");

    assert_eq!(interp.stack(), &[Value::from("y")]);
}

#[test]
fn store_needs_a_name_on_top() {
    let mut interp = ForthInterpreter::new();

    interp.process_source("<test>", "variable x x 5 !");

    // The name is under the value, so the store is refused and the stack is
    // left as it was.
    assert_eq!(interp.stack(), &[Value::from("x"), Value::from(5)]);
    assert_eq!(interp.variable("x"), Some(0));
}

#[test]
fn missing_declaration_name_is_recovered() {
    let mut interp = ForthInterpreter::new();

    interp.process_source("<test>", "1 2 variable");

    assert_eq!(interp.stack(), &[Value::Int(1), Value::Int(2)]);
}

#[test]
fn runs_do_not_share_state() {
    let mut first = ForthInterpreter::new();
    first.process_source("<test>", "variable x 9 x !");

    let mut second = ForthInterpreter::new();
    second.process_source("<test>", "x @");

    // The second interpreter never saw the declaration.
    assert_eq!(second.stack(), &[Value::from("x")]);
    assert_eq!(second.variable("x"), None);
}
