//! Boolean width normalization: 32-bit booleans become integers and
//! 1-bit booleans become an integer compare.
//!
//! This file is generated from the pattern list; regenerate it rather
//! than editing by hand.

use std::sync::LazyLock;

use algebraic::table::Width::Bits;
use algebraic::{PerOp, RuleSet, RuleTable, Run, SearchOp, Transform, ValueSlot, WidthMask};
use algebraic_ir::{OpFamily, Opcode};

static VALUES: [ValueSlot; 6] = [
    // b2b32(a) => b2i32(a)
    /* 0 */ ValueSlot::variable(0, WidthMask::ANY),
    /* 1 */ ValueSlot::op(Opcode::B2b32, Bits(32), &[0]),
    /* 2 */ ValueSlot::op(Opcode::B2i32, Bits(32), &[0]),

    // b2b1(a) => ine(b2i32(a), 0)
    /* 3 */ ValueSlot::op(Opcode::B2b1, Bits(1), &[0]),
    /* 4 */ ValueSlot::int(Bits(32), 0),
    /* 5 */ ValueSlot::op(Opcode::Ine, Bits(1), &[2, 4]).commutative(),
];

static TRANSFORMS: [Transform; 2] = [
    // b2b@32
    Transform::new(1, 2),
    // b2b@1
    Transform::new(3, 5),
];

static RUNS: [Run; 3] = [
    Run::EMPTY,
    Run::new(0, 1),
    Run::new(1, 1),
];

static DISPATCH: [PerOp; 1] = [
    PerOp {
        key: SearchOp::Family(OpFamily::B2b),
        filter: Some([1, 0, 0, 2, 0]),
        table: &[0, 2, 1],
    },
];

pub static TABLE: RuleTable = RuleTable {
    name: "algebraic",
    values: &VALUES,
    transforms: &TRANSFORMS,
    runs: &RUNS,
    dispatch: &DISPATCH,
    conditions: &[],
    variable_predicates: &[],
    expression_predicates: &[],
};

/// The validated rule set, loaded on first use.
pub fn rules() -> &'static RuleSet {
    static RULES: LazyLock<RuleSet> =
        LazyLock::new(|| RuleSet::load(&TABLE).unwrap_or_else(|err| panic!("{err}")));
    &RULES
}
