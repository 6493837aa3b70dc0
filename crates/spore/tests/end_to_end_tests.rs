//! End-to-end `Vm::evaluate` scenarios, one file per pipeline-spanning
//! behavior, covering what the per-module unit tests don't already reach.

use spore::{Number, Value, Vm, VmOptions};

fn eval(src: &str) -> Value {
    let mut vm = Vm::new(VmOptions::default());
    vm.evaluate(src.as_bytes()).unwrap()
}

#[test]
fn str_len_counts_bytes_of_an_evaluated_string() {
    assert_eq!(eval(r#"(str-len "hello")"#), Value::Int(5));
}

#[test]
fn nested_function_literals_do_not_leak_locals_to_the_outer_scope() {
    let mut vm = Vm::new(VmOptions::default());
    let src = "(def make-adder (function (a) (function (b) (+ a b))))";
    vm.evaluate(src.as_bytes()).unwrap();
    // Functions have no closures: the inner function can't see `a`, so
    // calling it errors rather than adding.
    let err = vm.evaluate(b"(((function (a) (function (b) a)) 1) 2)").unwrap_err();
    assert_eq!(err.kind, spore::ErrorKind::SymbolNotFound);
}

#[test]
fn function_bytecode_disassembles_an_if_expression() {
    let mut vm = Vm::new(VmOptions::default());
    vm.evaluate(b"(def f (function (n) (if (< n 0) 'neg 'pos)))").unwrap();
    let disasm = vm.evaluate(b"(function-bytecode f)").unwrap();
    let text = vm.print_value(disasm);
    assert!(text.starts_with('('));
    assert!(text.contains("get-local"));
    assert!(text.contains("jump-if"));
}

#[test]
fn to_host_number_accepts_either_int_or_float() {
    let mut vm = Vm::new(VmOptions::default());
    let i = vm.evaluate(b"1").unwrap();
    let f = vm.evaluate(b"1.5").unwrap();
    assert_eq!(vm.to_host::<Number>(i).unwrap(), Number::Int(1));
    assert_eq!(vm.to_host::<Number>(f).unwrap(), Number::Float(1.5));
}

#[test]
fn quote_strip_law_holds_for_one_two_and_three_quotes() {
    for (src, expected_quotes) in [("'x", 0u8), ("''x", 1), ("'''x", 2)] {
        let v = eval(src);
        let Value::Symbol(sym) = v else { panic!("expected a symbol") };
        assert_eq!(sym.quotes(), expected_quotes);
    }
}

#[test]
fn truthiness_matches_spec_exactly() {
    assert!(Value::Int(0).is_truthy());
    assert!(Value::Float(0.0).is_truthy());
    assert!(!Value::Void.is_truthy());
    assert!(!Value::Bool(false).is_truthy());
    assert!(Value::Bool(true).is_truthy());
}
