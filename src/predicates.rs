//! Predicate hooks referenced by rule tables.
//!
//! Variable predicates inspect a candidate value before it is bound;
//! expression predicates inspect the instruction an expression slot
//! matched. Predicates on literals read the literal at its own width.

use algebraic_ir::{Function, InstRef, ValueRef};

pub fn is_pos_power_of_two(func: &Function, value: ValueRef) -> bool {
    func.literal_value(value)
        .is_some_and(|lit| lit.as_i64() > 0 && lit.as_i64().count_ones() == 1)
}

pub fn is_neg_power_of_two(func: &Function, value: ValueRef) -> bool {
    func.literal_value(value).is_some_and(|lit| {
        let v = lit.as_i64();
        v < 0 && v.unsigned_abs().is_power_of_two()
    })
}

pub fn is_zero(func: &Function, value: ValueRef) -> bool {
    func.literal_value(value).is_some_and(|lit| lit.bits == 0)
}

pub fn is_not_zero(func: &Function, value: ValueRef) -> bool {
    func.literal_value(value).is_some_and(|lit| lit.bits != 0)
}

/// A float literal with no fractional part.
pub fn is_integral(func: &Function, value: ValueRef) -> bool {
    func.literal_value(value)
        .filter(|lit| lit.is_float_width())
        .is_some_and(|lit| {
            let v = lit.as_f64();
            v.is_finite() && v.fract() == 0.0
        })
}

pub fn is_finite(func: &Function, value: ValueRef) -> bool {
    func.literal_value(value)
        .filter(|lit| lit.is_float_width())
        .is_some_and(|lit| lit.as_f64().is_finite())
}

pub fn is_not_const(func: &Function, value: ValueRef) -> bool {
    !func.is_literal(value)
}

pub fn is_used_once(func: &Function, inst: InstRef) -> bool {
    func.inst_result(inst).is_some_and(|v| func.use_count(v) == 1)
}

pub fn is_used_more_than_once(func: &Function, inst: InstRef) -> bool {
    func.inst_result(inst).is_some_and(|v| func.use_count(v) > 1)
}
