//! A small hand-compiled rule table shared by the unit tests.
//!
//! ```text
//!  0  u2u16(u2u8(a@16))         => iand(a, 0xff)
//!  1  u2u32(u2u8(a@32))         => iand(a, 0xff)
//!  2  i2i32(i2i8(a@32))         => ishr(ishl(a, 24), 24)
//!  3  iand(a, 0)                => 0
//!  4  iand(ior(a, b), a)        => a
//!  5  iadd(a, ineg(a))          => 0
//!  6  ixor(a, a)                => 0
//!  7  imul(a, 1)                => a
//!  8  imul(a, 4)                => iadd(ishl(a, 1), ishl(a, 1))
//!  9  isub(a, a)                => 0                 if allow_isub
//! 10  ~fadd(a, 0.0)             => a
//! 11  umod(a, #b(is_pos_power_of_two)) => iand(a, isub(b, 1))
//! 12  ineg(ineg(a)(is_used_once))      => a
//! ```
//!
//! Slots 38.. are not referenced by any transform; tests match them
//! directly.

use algebraic_ir::{OpFamily, Opcode, TypeClass};

use crate::predicates;
use crate::table::{PerOp, RuleTable, Run, SearchOp, Transform, ValueSlot, WidthMask};
use crate::table::Width::{Bits, Inherit};

static VALUES: [ValueSlot; 41] = [
    /* 0 */ ValueSlot::variable(0, WidthMask::B16),
    /* 1 */ ValueSlot::op(Opcode::U2u8, Bits(8), &[0]),
    /* 2 */ ValueSlot::op(Opcode::U2u16, Bits(16), &[1]),
    /* 3 */ ValueSlot::int(Inherit, 0xff),
    /* 4 */ ValueSlot::op(Opcode::Iand, Inherit, &[0, 3]),
    /* 5 */ ValueSlot::variable(0, WidthMask::B32),
    /* 6 */ ValueSlot::op(Opcode::U2u8, Bits(8), &[5]),
    /* 7 */ ValueSlot::op(Opcode::U2u32, Bits(32), &[6]),
    /* 8 */ ValueSlot::op(Opcode::Iand, Inherit, &[5, 3]),
    /* 9 */ ValueSlot::op(Opcode::I2i8, Bits(8), &[5]),
    /* 10 */ ValueSlot::op(Opcode::I2i32, Bits(32), &[9]),
    /* 11 */ ValueSlot::int(Inherit, 24),
    /* 12 */ ValueSlot::op(Opcode::Ishl, Inherit, &[5, 11]),
    /* 13 */ ValueSlot::op(Opcode::Ishr, Inherit, &[12, 11]),
    /* 14 */ ValueSlot::variable(0, WidthMask::ANY),
    /* 15 */ ValueSlot::int(Inherit, 0),
    /* 16 */ ValueSlot::op(Opcode::Iand, Inherit, &[14, 15]).commutative(),
    /* 17 */ ValueSlot::op(Opcode::Ineg, Inherit, &[14]),
    /* 18 */ ValueSlot::op(Opcode::Iadd, Inherit, &[14, 17]).commutative(),
    /* 19 */ ValueSlot::op(Opcode::Ixor, Inherit, &[14, 14]),
    /* 20 */ ValueSlot::int(Inherit, 1),
    /* 21 */ ValueSlot::op(Opcode::Imul, Inherit, &[14, 20]).commutative(),
    /* 22 */ ValueSlot::op(Opcode::Isub, Inherit, &[14, 14]),
    /* 23 */ ValueSlot::variable(1, WidthMask::ANY),
    /* 24 */ ValueSlot::op(Opcode::Ior, Inherit, &[14, 23]).commutative(),
    /* 25 */ ValueSlot::op(Opcode::Iand, Inherit, &[24, 14]).commutative(),
    /* 26 */ ValueSlot::float(Inherit, 0.0),
    /* 27 */ ValueSlot::op(Opcode::Fadd, Inherit, &[14, 26]).inexact(),
    /* 28 */ ValueSlot::variable(1, WidthMask::ANY).constant_only().with_cond(0),
    /* 29 */ ValueSlot::op(Opcode::Umod, Inherit, &[14, 28]),
    /* 30 */ ValueSlot::op(Opcode::Isub, Inherit, &[28, 20]),
    /* 31 */ ValueSlot::op(Opcode::Iand, Inherit, &[14, 30]),
    /* 32 */ ValueSlot::int(Inherit, 4),
    /* 33 */ ValueSlot::op(Opcode::Imul, Inherit, &[14, 32]).commutative(),
    /* 34 */ ValueSlot::op(Opcode::Ishl, Inherit, &[14, 20]),
    /* 35 */ ValueSlot::op(Opcode::Iadd, Inherit, &[34, 34]),
    /* 36 */ ValueSlot::op(Opcode::Ineg, Inherit, &[14]).with_cond(0),
    /* 37 */ ValueSlot::op(Opcode::Ineg, Inherit, &[36]),
    /* 38 */ ValueSlot::variable(0, WidthMask::ANY).of_class(TypeClass::Float),
    /* 39 */ ValueSlot::boolean(Bits(1), true),
    /* 40 */ ValueSlot::family(OpFamily::U2u, Inherit, &[14]),
];

static TRANSFORMS: [Transform; 13] = [
    Transform::new(2, 4),
    Transform::new(7, 8),
    Transform::new(10, 13),
    Transform::new(16, 15),
    Transform::new(25, 14),
    Transform::new(18, 15),
    Transform::new(19, 15),
    Transform::new(21, 14),
    Transform::new(33, 35),
    Transform::new(22, 15).when(0),
    Transform::new(27, 14),
    Transform::new(29, 31),
    Transform::new(37, 14),
];

static RUNS: [Run; 12] = [
    Run::EMPTY,
    Run::new(0, 1),
    Run::new(1, 1),
    Run::new(2, 1),
    Run::new(3, 2),
    Run::new(5, 1),
    Run::new(6, 1),
    Run::new(7, 2),
    Run::new(9, 1),
    Run::new(10, 1),
    Run::new(11, 1),
    Run::new(12, 1),
];

static DISPATCH: [PerOp; 10] = [
    PerOp {
        key: SearchOp::Family(OpFamily::U2u),
        filter: Some([0, 0, 1, 2, 0]),
        table: &[0, 1, 2],
    },
    PerOp {
        key: SearchOp::Family(OpFamily::I2i),
        filter: Some([0, 0, 0, 1, 0]),
        table: &[0, 3],
    },
    PerOp {
        key: SearchOp::Op(Opcode::Iand),
        filter: None,
        table: &[4],
    },
    PerOp {
        key: SearchOp::Op(Opcode::Iadd),
        filter: None,
        table: &[5],
    },
    PerOp {
        key: SearchOp::Op(Opcode::Ixor),
        filter: None,
        table: &[6],
    },
    PerOp {
        key: SearchOp::Op(Opcode::Imul),
        filter: None,
        table: &[7],
    },
    PerOp {
        key: SearchOp::Op(Opcode::Isub),
        filter: None,
        table: &[8],
    },
    PerOp {
        key: SearchOp::Op(Opcode::Fadd),
        filter: None,
        table: &[9],
    },
    PerOp {
        key: SearchOp::Op(Opcode::Umod),
        filter: None,
        table: &[10],
    },
    PerOp {
        key: SearchOp::Op(Opcode::Ineg),
        filter: None,
        table: &[11],
    },
];

pub static NARROWING: RuleTable = RuleTable {
    name: "narrowing",
    values: &VALUES,
    transforms: &TRANSFORMS,
    runs: &RUNS,
    dispatch: &DISPATCH,
    conditions: &["allow_isub"],
    variable_predicates: &[predicates::is_pos_power_of_two],
    expression_predicates: &[predicates::is_used_once],
};

pub fn rules() -> &'static crate::RuleSet {
    static RULES: std::sync::LazyLock<crate::RuleSet> = std::sync::LazyLock::new(|| {
        crate::RuleSet::load(&NARROWING).unwrap_or_else(|err| panic!("{err}"))
    });
    &RULES
}
