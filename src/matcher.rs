//! Matching search patterns against live IR.
//!
//! A match walks the search slots and the concrete value graph together,
//! binding pattern variables to values. Commutative nodes are handled by
//! enumerating swap masks: with `n` commutative nodes in the pattern, up to
//! `2^n` attempts are made, each starting from the caller's bindings, and
//! the first successful attempt wins. A failure below a commutative node
//! can therefore be recovered by swapping a node visited earlier.

use algebraic_ir::bits::{float_to_bits, mask};
use algebraic_ir::{Function, InstRef, ValueRef};

use crate::rules::RuleSet;
use crate::table::{
    ConstKind, ConstantSlot, ExpressionSlot, MAX_VARIABLES, ValueSlot, VariableSlot, Width,
};

/// Values bound to pattern variables during a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bindings {
    values: [Option<ValueRef>; MAX_VARIABLES],
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: u8) -> Option<ValueRef> {
        self.values[index as usize]
    }

    pub fn bind(&mut self, index: u8, value: ValueRef) {
        self.values[index as usize] = Some(value);
    }

    pub fn clear(&mut self) {
        self.values = [None; MAX_VARIABLES];
    }

    /// Bound variables in index order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, ValueRef)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i as u8, v)))
    }
}

/// Match the pattern rooted at `slot` against `value`.
///
/// Variables already present in `bindings` must be bound to the same
/// values again. On success the new bindings are written back; on failure
/// `bindings` is left untouched.
pub fn match_value(
    rules: &RuleSet,
    func: &Function,
    slot: u16,
    value: ValueRef,
    bindings: &mut Bindings,
) -> bool {
    let count = rules.count_commutative(slot);
    search(rules, func, slot, value, count, bindings)
}

/// Match the search pattern of `transform` against the result of `inst`.
pub fn match_transform(
    rules: &RuleSet,
    func: &Function,
    transform: usize,
    inst: InstRef,
) -> Option<Bindings> {
    let result = func.inst_result(inst)?;
    let search_slot = rules.transform(transform).search;
    let mut bindings = Bindings::new();
    search(
        rules,
        func,
        search_slot,
        result,
        rules.commutative_count(transform),
        &mut bindings,
    )
    .then_some(bindings)
}

fn search(
    rules: &RuleSet,
    func: &Function,
    slot: u16,
    value: ValueRef,
    commutative: u32,
    bindings: &mut Bindings,
) -> bool {
    for swaps in 0..(1u32 << commutative) {
        let mut attempt = Attempt {
            rules,
            func,
            swaps,
            next_commutative: 0,
            bindings: *bindings,
        };
        if attempt.value(slot, value) {
            *bindings = attempt.bindings;
            return true;
        }
    }
    false
}

/// One walk of the pattern under a fixed swap mask. Commutative nodes are
/// numbered in visit order; bit `i` of `swaps` swaps the `i`-th one.
struct Attempt<'a> {
    rules: &'a RuleSet,
    func: &'a Function,
    swaps: u32,
    next_commutative: u32,
    bindings: Bindings,
}

impl Attempt<'_> {
    fn value(&mut self, slot: u16, value: ValueRef) -> bool {
        match self.rules.slot(slot) {
            ValueSlot::Variable(var) => self.variable(var, value),
            ValueSlot::Constant(constant) => self.constant(constant, value),
            ValueSlot::Expression(expr) => self.expression(expr, value),
        }
    }

    fn variable(&mut self, var: &VariableSlot, value: ValueRef) -> bool {
        if let Some(bound) = self.bindings.get(var.index) {
            return bound == value;
        }
        let func = self.func;
        if !var.widths.allows(func.value_bit_size(value)) {
            return false;
        }
        if var.is_constant && !func.is_literal(value) {
            return false;
        }
        if let Some(class) = var.class
            && func.value_type_class(value).is_some_and(|c| c != class)
        {
            return false;
        }
        if let Some(cond) = var.cond
            && !(self.rules.variable_predicate(cond))(func, value)
        {
            return false;
        }
        self.bindings.bind(var.index, value);
        true
    }

    fn constant(&self, constant: &ConstantSlot, value: ValueRef) -> bool {
        let Some(lit) = self.func.literal_value(value) else {
            return false;
        };
        if let Width::Bits(bits) = constant.width
            && bits != lit.bit_size
        {
            return false;
        }
        match constant.kind {
            ConstKind::Int => lit.bits == constant.bits & mask(lit.bit_size),
            ConstKind::Float => {
                lit.is_float_width()
                    && float_to_bits(f64::from_bits(constant.bits), lit.bit_size) == lit.bits
            }
            ConstKind::Bool => lit.as_bool() == (constant.bits != 0),
        }
    }

    fn expression(&mut self, expr: &ExpressionSlot, value: ValueRef) -> bool {
        let func = self.func;
        let Some(inst) = func.value_inst(value) else {
            return false;
        };
        if !expr.op.matches(func.inst_opcode(inst)) {
            return false;
        }
        if let Width::Bits(bits) = expr.width
            && bits != func.inst_bit_size(inst)
        {
            return false;
        }
        if expr.inexact && func.inst_is_exact(inst) {
            return false;
        }
        if let Some(cond) = expr.cond
            && !(self.rules.expression_predicate(cond))(func, inst)
        {
            return false;
        }

        let operands = func.inst_operands(inst);
        if operands.len() != expr.children.len() {
            return false;
        }
        let swapped = expr.commutative && {
            let bit = self.next_commutative;
            self.next_commutative += 1;
            self.swaps & (1 << bit) != 0
        };

        expr.children.iter().enumerate().all(|(i, &child)| {
            let operand = if swapped { operands[1 - i] } else { operands[i] };
            self.value(child, operand)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_tables::rules;
    use algebraic_ir::parse_test_function;

    /// The value stored by the `n`-th `store` of the function.
    fn stored(func: &Function, n: usize) -> ValueRef {
        func.insts()
            .filter(|&inst| func.inst_opcode(inst) == algebraic_ir::Opcode::Store)
            .map(|inst| func.inst_operands(inst)[0])
            .nth(n)
            .expect("no such store")
    }

    fn root(func: &Function, n: usize) -> InstRef {
        func.value_inst(stored(func, n)).expect("stored value is not an instruction")
    }

    #[test]
    fn binds_variable_through_conversion_chain() {
        let func = parse_test_function(
            r#"
            fn @f(%a: 16) {
              %n: 8 = u2u8 %a
              %w: 16 = u2u16 %n
              store %w
            }
            "#,
        );
        let bindings = match_transform(rules(), &func, 0, root(&func, 0)).unwrap();
        assert_eq!(bindings.get(0), Some(func.params()[0]));
        assert_eq!(bindings.iter().count(), 1);
    }

    #[test]
    fn width_mask_rejects_other_widths() {
        let func = parse_test_function(
            r#"
            fn @f(%a: 32) {
              %n: 8 = u2u8 %a
              %w: 16 = u2u16 %n
              store %w
            }
            "#,
        );
        assert!(match_transform(rules(), &func, 0, root(&func, 0)).is_none());
    }

    #[test]
    fn commutative_matches_both_orders() {
        let func = parse_test_function(
            r#"
            fn @f(%a: 32) {
              %x: 32 = iand %a, 0:32
              %y: 32 = iand 0:32, %a
              store %x
              store %y
            }
            "#,
        );
        assert!(match_transform(rules(), &func, 3, root(&func, 0)).is_some());
        assert!(match_transform(rules(), &func, 3, root(&func, 1)).is_some());
    }

    #[test]
    fn swap_of_outer_node_recovers_inner_failure() {
        // iand(ior(a, b), a) against iand(a, ior(b, a)): both nodes swap.
        let func = parse_test_function(
            r#"
            fn @f(%a: 32, %b: 32) {
              %o: 32 = ior %b, %a
              %r: 32 = iand %a, %o
              store %r
            }
            "#,
        );
        let bindings = match_transform(rules(), &func, 4, root(&func, 0)).unwrap();
        assert_eq!(bindings.get(0), Some(func.params()[0]));
        assert_eq!(bindings.get(1), Some(func.params()[1]));
    }

    #[test]
    fn repeated_variable_requires_same_value() {
        let func = parse_test_function(
            r#"
            fn @f(%a: 32, %b: 32) {
              %same: 32 = ixor %a, %a
              %diff: 32 = ixor %a, %b
              store %same
              store %diff
            }
            "#,
        );
        assert!(match_transform(rules(), &func, 6, root(&func, 0)).is_some());
        assert!(match_transform(rules(), &func, 6, root(&func, 1)).is_none());
    }

    #[test]
    fn inexact_pattern_skips_exact_instructions() {
        let func = parse_test_function(
            r#"
            fn @f(%a: f32) {
              %x: 32 = fadd %a, 0.0:f32
              %y: 32 = fadd! %a, 0.0:f32
              %z: 32 = fadd %a, -0.0:f32
              store %x
              store %y
              store %z
            }
            "#,
        );
        assert!(match_transform(rules(), &func, 10, root(&func, 0)).is_some());
        assert!(match_transform(rules(), &func, 10, root(&func, 1)).is_none());
        assert!(match_transform(rules(), &func, 10, root(&func, 2)).is_none());
    }

    #[test]
    fn predicates_filter_variables_and_expressions() {
        let func = parse_test_function(
            r#"
            fn @f(%a: 32) {
              %m: 32 = umod %a, 8:32
              %n: 32 = umod %a, 6:32
              %once: 32 = ineg %a
              %twice: 32 = ineg %a
              %x: 32 = ineg %once
              %y: 32 = ineg %twice
              store %m
              store %n
              store %x
              store %y
              store %twice
            }
            "#,
        );
        assert!(match_transform(rules(), &func, 11, root(&func, 0)).is_some());
        assert!(match_transform(rules(), &func, 11, root(&func, 1)).is_none());
        assert!(match_transform(rules(), &func, 12, root(&func, 2)).is_some());
        assert!(match_transform(rules(), &func, 12, root(&func, 3)).is_none());
    }

    #[test]
    fn constants_compare_by_kind() {
        let mut func = parse_test_function("fn @f(%x: f32) {\n  store %x\n}");
        let rules = rules();
        let zero_f32 = func.literal(32, 0);
        let neg_zero_f32 = func.literal(32, 0x8000_0000);
        let zero_f16 = func.literal(16, 0);
        let truthy = func.literal(1, 1);
        let falsy = func.literal(1, 0);

        let mut bindings = Bindings::new();
        // float 0.0 with inherited width
        assert!(match_value(rules, &func, 26, zero_f32, &mut bindings));
        assert!(match_value(rules, &func, 26, zero_f16, &mut bindings));
        assert!(!match_value(rules, &func, 26, neg_zero_f32, &mut bindings));
        // boolean true at 1 bit
        assert!(match_value(rules, &func, 39, truthy, &mut bindings));
        assert!(!match_value(rules, &func, 39, falsy, &mut bindings));
        // integer 0xff masked to the literal width
        let byte = func.literal(8, 0xff);
        assert!(match_value(rules, &func, 3, byte, &mut bindings));
        assert!(!match_value(rules, &func, 3, zero_f32, &mut bindings));
    }

    #[test]
    fn type_class_and_family_slots() {
        let func = parse_test_function(
            r#"
            fn @f(%x: f32, %i: i32, %plain: 32) {
              %w: 64 = u2u64 %i
              store %w
            }
            "#,
        );
        let rules = rules();
        let params = func.params();

        let mut bindings = Bindings::new();
        assert!(match_value(rules, &func, 38, params[0], &mut bindings));
        bindings.clear();
        assert!(!match_value(rules, &func, 38, params[1], &mut bindings));
        assert!(match_value(rules, &func, 38, params[2], &mut bindings));

        bindings.clear();
        assert!(match_value(rules, &func, 40, stored(&func, 0), &mut bindings));
        assert_eq!(bindings.get(0), Some(params[1]));
    }

    #[test]
    fn failed_match_leaves_bindings_untouched() {
        let func = parse_test_function(
            r#"
            fn @f(%a: 32, %b: 32) {
              %x: 32 = ixor %a, %b
              store %x
            }
            "#,
        );
        let mut bindings = Bindings::new();
        bindings.bind(3, func.params()[1]);
        let before = bindings;
        assert!(!match_value(rules(), &func, 19, stored(&func, 0), &mut bindings));
        assert_eq!(bindings, before);
    }
}
