//! Common test utilities for rule-set tests.

use std::collections::HashMap;

use algebraic::fold;
use algebraic_ir::{Function, Literal, Opcode, ValueRef, parse_test_function};

/// Evaluate `func` with `args` bound to its parameters and return the
/// operand of every `store`, in layout order.
#[allow(dead_code)]
pub fn run(func: &Function, args: &[u64]) -> Vec<Literal> {
    assert_eq!(args.len(), func.params().len(), "run: argument count");
    let mut env: HashMap<ValueRef, Literal> = HashMap::new();
    for (&param, &arg) in func.params().iter().zip(args) {
        env.insert(param, Literal::new(arg, func.value_bit_size(param)));
    }

    let mut stored = Vec::new();
    for inst in func.insts() {
        let sources: Vec<Literal> = func
            .inst_operands(inst)
            .iter()
            .map(|&v| {
                func.literal_value(v)
                    .or_else(|| env.get(&v).copied())
                    .unwrap_or_else(|| panic!("run: {v} used before definition"))
            })
            .collect();
        let opcode = func.inst_opcode(inst);
        if opcode == Opcode::Store {
            stored.push(sources[0]);
            continue;
        }
        let bit_size = func.inst_bit_size(inst);
        let raw = fold::evaluate(opcode, bit_size, &sources)
            .unwrap_or_else(|| panic!("run: {opcode} produced no value"));
        let result = func
            .inst_result(inst)
            .expect("run: valued instructions have a result");
        env.insert(result, Literal::new(raw, bit_size));
    }
    stored
}

/// Two results are the same value: raw bits for integers, numeric
/// equality for floats with every NaN equal to every other.
#[allow(dead_code)]
pub fn same_value(a: Literal, b: Literal, float: bool) -> bool {
    if !float {
        return a == b;
    }
    let (x, y) = (a.as_f64(), b.as_f64());
    (x.is_nan() && y.is_nan()) || x == y
}

/// `outer(inner(%a))` with a parameter of type `param`, stored once.
#[allow(dead_code)]
pub fn chain(outer: Opcode, inner: Opcode, param: &str) -> String {
    let inner_bits = inner.info().output_size.expect("chain: sized inner");
    let outer_bits = outer.info().output_size.expect("chain: sized outer");
    format!(
        "fn @f(%a: {param}) {{\n  %n: {inner_bits} = {inner} %a\n  %w: {outer_bits} = {outer} %n\n  store %w\n}}\n"
    )
}

/// Parse `source` twice: once to keep and once to rewrite.
#[allow(dead_code)]
pub fn before_and_after(
    rules: &algebraic::RuleSet,
    source: &str,
) -> (Function, Function) {
    let before = parse_test_function(source);
    let mut after = parse_test_function(source);
    assert!(
        algebraic::optimize(rules, &mut after),
        "{}: no rule fired for\n{source}",
        rules.name()
    );
    assert!(
        algebraic_ir::validate_function(&after).is_ok(),
        "{}: invalid result for\n{source}",
        rules.name()
    );
    (before, after)
}
