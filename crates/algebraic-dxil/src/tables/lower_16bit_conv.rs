//! Conversions through a 16-bit intermediate.
//!
//! Same shape as [`lower_8bit_conv`](super::lower_8bit_conv) with
//! 16-bit masks and shifts, plus half-float packing for
//! `f2f32(u2u16(a))` and `u2u32(f2f16_rtz(a))`.
//!
//! This file is generated from the pattern list; regenerate it rather
//! than editing by hand.

use std::sync::LazyLock;

use algebraic::table::Width::Bits;
use algebraic::{PerOp, RuleSet, RuleTable, Run, SearchOp, Transform, ValueSlot, WidthMask};
use algebraic_ir::{OpFamily, Opcode};

static VALUES: [ValueSlot; 137] = [
    // u2u32(u2u16(a@32)) => iand(a, 65535)
    /* 0 */ ValueSlot::variable(0, WidthMask::B32),
    /* 1 */ ValueSlot::op(Opcode::U2u16, Bits(16), &[0]),
    /* 2 */ ValueSlot::op(Opcode::U2u32, Bits(32), &[1]),
    /* 3 */ ValueSlot::int(Bits(32), 0xffff),
    /* 4 */ ValueSlot::op(Opcode::Iand, Bits(32), &[0, 3]).commutative(),

    // u2u32(u2u16(a@64)) => u2u32(iand(a, 65535))
    /* 5 */ ValueSlot::variable(0, WidthMask::B64),
    /* 6 */ ValueSlot::op(Opcode::U2u16, Bits(16), &[5]),
    /* 7 */ ValueSlot::op(Opcode::U2u32, Bits(32), &[6]),
    /* 8 */ ValueSlot::int(Bits(64), 0xffff),
    /* 9 */ ValueSlot::op(Opcode::Iand, Bits(64), &[5, 8]).commutative(),
    /* 10 */ ValueSlot::op(Opcode::U2u32, Bits(32), &[9]),

    // u2u32(i2i16(a@32)) => u2u32(iand(a, 65535))
    /* 11 */ ValueSlot::op(Opcode::I2i16, Bits(16), &[0]),
    /* 12 */ ValueSlot::op(Opcode::U2u32, Bits(32), &[11]),
    /* 13 */ ValueSlot::op(Opcode::U2u32, Bits(32), &[4]),

    // u2u32(i2i16(a@64)) => u2u32(iand(a, 65535))
    /* 14 */ ValueSlot::op(Opcode::I2i16, Bits(16), &[5]),
    /* 15 */ ValueSlot::op(Opcode::U2u32, Bits(32), &[14]),

    // u2u32(f2u16(a)) => iand(f2u32(a), 65535)
    /* 16 */ ValueSlot::variable(0, WidthMask::ANY),
    /* 17 */ ValueSlot::op(Opcode::F2u16, Bits(16), &[16]),
    /* 18 */ ValueSlot::op(Opcode::U2u32, Bits(32), &[17]),
    /* 19 */ ValueSlot::op(Opcode::F2u32, Bits(32), &[16]),
    /* 20 */ ValueSlot::op(Opcode::Iand, Bits(32), &[19, 3]).commutative(),

    // u2u32(f2i16(a)) => iand(f2i32(a), 65535)
    /* 21 */ ValueSlot::op(Opcode::F2i16, Bits(16), &[16]),
    /* 22 */ ValueSlot::op(Opcode::U2u32, Bits(32), &[21]),
    /* 23 */ ValueSlot::op(Opcode::F2i32, Bits(32), &[16]),
    /* 24 */ ValueSlot::op(Opcode::Iand, Bits(32), &[23, 3]).commutative(),

    // u2u64(u2u16(a@32)) => u2u64(iand(a, 65535))
    /* 25 */ ValueSlot::op(Opcode::U2u64, Bits(64), &[1]),
    /* 26 */ ValueSlot::op(Opcode::U2u64, Bits(64), &[4]),

    // u2u64(u2u16(a@64)) => iand(a, 65535)
    /* 27 */ ValueSlot::op(Opcode::U2u64, Bits(64), &[6]),

    // u2u64(i2i16(a@32)) => u2u64(iand(a, 65535))
    /* 28 */ ValueSlot::op(Opcode::U2u64, Bits(64), &[11]),

    // u2u64(i2i16(a@64)) => u2u64(iand(a, 65535))
    /* 29 */ ValueSlot::op(Opcode::U2u64, Bits(64), &[14]),
    /* 30 */ ValueSlot::op(Opcode::U2u64, Bits(64), &[9]),

    // u2u64(f2u16(a)) => iand(f2u64(a), 65535)
    /* 31 */ ValueSlot::op(Opcode::U2u64, Bits(64), &[17]),
    /* 32 */ ValueSlot::op(Opcode::F2u64, Bits(64), &[16]),
    /* 33 */ ValueSlot::op(Opcode::Iand, Bits(64), &[32, 8]).commutative(),

    // u2u64(f2i16(a)) => iand(f2i64(a), 65535)
    /* 34 */ ValueSlot::op(Opcode::U2u64, Bits(64), &[21]),
    /* 35 */ ValueSlot::op(Opcode::F2i64, Bits(64), &[16]),
    /* 36 */ ValueSlot::op(Opcode::Iand, Bits(64), &[35, 8]).commutative(),

    // i2i32(u2u16(a@32)) => i2i32(ishr(ishl(a, 16), 16))
    /* 37 */ ValueSlot::op(Opcode::I2i32, Bits(32), &[1]),
    /* 38 */ ValueSlot::int(Bits(32), 0x10),
    /* 39 */ ValueSlot::op(Opcode::Ishl, Bits(32), &[0, 38]),
    /* 40 */ ValueSlot::op(Opcode::Ishr, Bits(32), &[39, 38]),
    /* 41 */ ValueSlot::op(Opcode::I2i32, Bits(32), &[40]),

    // i2i32(u2u16(a@64)) => i2i32(ishr(ishl(a, 48), 48))
    /* 42 */ ValueSlot::op(Opcode::I2i32, Bits(32), &[6]),
    /* 43 */ ValueSlot::int(Bits(32), 0x30),
    /* 44 */ ValueSlot::op(Opcode::Ishl, Bits(64), &[5, 43]),
    /* 45 */ ValueSlot::op(Opcode::Ishr, Bits(64), &[44, 43]),
    /* 46 */ ValueSlot::op(Opcode::I2i32, Bits(32), &[45]),

    // i2i32(i2i16(a@32)) => ishr(ishl(a, 16), 16)
    /* 47 */ ValueSlot::op(Opcode::I2i32, Bits(32), &[11]),

    // i2i32(i2i16(a@64)) => i2i32(ishr(ishl(a, 48), 48))
    /* 48 */ ValueSlot::op(Opcode::I2i32, Bits(32), &[14]),

    // i2i32(f2u16(a)) => ishr(ishl(f2u32(a), 16), 16)
    /* 49 */ ValueSlot::op(Opcode::I2i32, Bits(32), &[17]),
    /* 50 */ ValueSlot::op(Opcode::Ishl, Bits(32), &[19, 38]),
    /* 51 */ ValueSlot::op(Opcode::Ishr, Bits(32), &[50, 38]),

    // i2i32(f2i16(a)) => ishr(ishl(f2i32(a), 16), 16)
    /* 52 */ ValueSlot::op(Opcode::I2i32, Bits(32), &[21]),
    /* 53 */ ValueSlot::op(Opcode::Ishl, Bits(32), &[23, 38]),
    /* 54 */ ValueSlot::op(Opcode::Ishr, Bits(32), &[53, 38]),

    // i2i64(u2u16(a@32)) => i2i64(ishr(ishl(a, 16), 16))
    /* 55 */ ValueSlot::op(Opcode::I2i64, Bits(64), &[1]),
    /* 56 */ ValueSlot::op(Opcode::I2i64, Bits(64), &[40]),

    // i2i64(u2u16(a@64)) => i2i64(ishr(ishl(a, 48), 48))
    /* 57 */ ValueSlot::op(Opcode::I2i64, Bits(64), &[6]),
    /* 58 */ ValueSlot::op(Opcode::I2i64, Bits(64), &[45]),

    // i2i64(i2i16(a@32)) => i2i64(ishr(ishl(a, 16), 16))
    /* 59 */ ValueSlot::op(Opcode::I2i64, Bits(64), &[11]),

    // i2i64(i2i16(a@64)) => ishr(ishl(a, 48), 48)
    /* 60 */ ValueSlot::op(Opcode::I2i64, Bits(64), &[14]),

    // i2i64(f2u16(a)) => ishr(ishl(f2u64(a), 48), 48)
    /* 61 */ ValueSlot::op(Opcode::I2i64, Bits(64), &[17]),
    /* 62 */ ValueSlot::op(Opcode::Ishl, Bits(64), &[32, 43]),
    /* 63 */ ValueSlot::op(Opcode::Ishr, Bits(64), &[62, 43]),

    // i2i64(f2i16(a)) => ishr(ishl(f2i64(a), 48), 48)
    /* 64 */ ValueSlot::op(Opcode::I2i64, Bits(64), &[21]),
    /* 65 */ ValueSlot::op(Opcode::Ishl, Bits(64), &[35, 43]),
    /* 66 */ ValueSlot::op(Opcode::Ishr, Bits(64), &[65, 43]),

    // u2f32(u2u16(a@32)) => u2f32(iand(a, 65535))
    /* 67 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[1]),
    /* 68 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[4]),

    // u2f32(u2u16(a@64)) => u2f32(iand(a, 65535))
    /* 69 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[6]),
    /* 70 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[9]),

    // u2f32(i2i16(a@32)) => u2f32(iand(a, 65535))
    /* 71 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[11]),

    // u2f32(i2i16(a@64)) => u2f32(iand(a, 65535))
    /* 72 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[14]),

    // u2f32(f2u16(a@32)) => fmin(fmax(a, 0.0), 65535.0)
    /* 73 */ ValueSlot::op(Opcode::F2u16, Bits(16), &[0]),
    /* 74 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[73]),
    /* 75 */ ValueSlot::float(Bits(32), 0.0),
    /* 76 */ ValueSlot::op(Opcode::Fmax, Bits(32), &[0, 75]).commutative(),
    /* 77 */ ValueSlot::float(Bits(32), 65535.0),
    /* 78 */ ValueSlot::op(Opcode::Fmin, Bits(32), &[76, 77]).commutative(),

    // u2f32(f2u16(a@64)) => f2f32(fmin(fmax(a, 0.0), 65535.0))
    /* 79 */ ValueSlot::op(Opcode::F2u16, Bits(16), &[5]),
    /* 80 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[79]),
    /* 81 */ ValueSlot::float(Bits(64), 0.0),
    /* 82 */ ValueSlot::op(Opcode::Fmax, Bits(64), &[5, 81]).commutative(),
    /* 83 */ ValueSlot::float(Bits(64), 65535.0),
    /* 84 */ ValueSlot::op(Opcode::Fmin, Bits(64), &[82, 83]).commutative(),
    /* 85 */ ValueSlot::op(Opcode::F2f32, Bits(32), &[84]),

    // u2f32(f2i16(a@32)) => fmin(fmax(a, 0.0), 65535.0)
    /* 86 */ ValueSlot::op(Opcode::F2i16, Bits(16), &[0]),
    /* 87 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[86]),

    // u2f32(f2i16(a@64)) => f2f32(fmin(fmax(a, 0.0), 65535.0))
    /* 88 */ ValueSlot::op(Opcode::F2i16, Bits(16), &[5]),
    /* 89 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[88]),

    // u2f64(u2u16(a@32)) => u2f64(iand(a, 65535))
    /* 90 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[1]),
    /* 91 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[4]),

    // u2f64(u2u16(a@64)) => u2f64(iand(a, 65535))
    /* 92 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[6]),
    /* 93 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[9]),

    // u2f64(i2i16(a@32)) => u2f64(iand(a, 65535))
    /* 94 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[11]),

    // u2f64(i2i16(a@64)) => u2f64(iand(a, 65535))
    /* 95 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[14]),

    // u2f64(f2u16(a@32)) => f2f64(fmin(fmax(a, 0.0), 65535.0))
    /* 96 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[73]),
    /* 97 */ ValueSlot::op(Opcode::F2f64, Bits(64), &[78]),

    // u2f64(f2u16(a@64)) => fmin(fmax(a, 0.0), 65535.0)
    /* 98 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[79]),

    // u2f64(f2i16(a@32)) => f2f64(fmin(fmax(a, 0.0), 65535.0))
    /* 99 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[86]),

    // u2f64(f2i16(a@64)) => fmin(fmax(a, 0.0), 65535.0)
    /* 100 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[88]),

    // i2f32(u2u16(a@32)) => i2f32(ishr(ishl(a, 16), 16))
    /* 101 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[1]),
    /* 102 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[40]),

    // i2f32(u2u16(a@64)) => i2f32(ishr(ishl(a, 48), 48))
    /* 103 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[6]),
    /* 104 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[45]),

    // i2f32(i2i16(a@32)) => i2f32(ishr(ishl(a, 16), 16))
    /* 105 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[11]),

    // i2f32(i2i16(a@64)) => i2f32(ishr(ishl(a, 48), 48))
    /* 106 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[14]),

    // i2f32(f2u16(a@32)) => fmin(fmax(a, -32768.0), 32767.0)
    /* 107 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[73]),
    /* 108 */ ValueSlot::float(Bits(32), -32768.0),
    /* 109 */ ValueSlot::op(Opcode::Fmax, Bits(32), &[0, 108]).commutative(),
    /* 110 */ ValueSlot::float(Bits(32), 32767.0),
    /* 111 */ ValueSlot::op(Opcode::Fmin, Bits(32), &[109, 110]).commutative(),

    // i2f32(f2u16(a@64)) => f2f32(fmin(fmax(a, -32768.0), 32767.0))
    /* 112 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[79]),
    /* 113 */ ValueSlot::float(Bits(64), -32768.0),
    /* 114 */ ValueSlot::op(Opcode::Fmax, Bits(64), &[5, 113]).commutative(),
    /* 115 */ ValueSlot::float(Bits(64), 32767.0),
    /* 116 */ ValueSlot::op(Opcode::Fmin, Bits(64), &[114, 115]).commutative(),
    /* 117 */ ValueSlot::op(Opcode::F2f32, Bits(32), &[116]),

    // i2f32(f2i16(a@32)) => fmin(fmax(a, -32768.0), 32767.0)
    /* 118 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[86]),

    // i2f32(f2i16(a@64)) => f2f32(fmin(fmax(a, -32768.0), 32767.0))
    /* 119 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[88]),

    // i2f64(u2u16(a@32)) => i2f64(ishr(ishl(a, 16), 16))
    /* 120 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[1]),
    /* 121 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[40]),

    // i2f64(u2u16(a@64)) => i2f64(ishr(ishl(a, 48), 48))
    /* 122 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[6]),
    /* 123 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[45]),

    // i2f64(i2i16(a@32)) => i2f64(ishr(ishl(a, 16), 16))
    /* 124 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[11]),

    // i2f64(i2i16(a@64)) => i2f64(ishr(ishl(a, 48), 48))
    /* 125 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[14]),

    // i2f64(f2u16(a@32)) => f2f64(fmin(fmax(a, -32768.0), 32767.0))
    /* 126 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[73]),
    /* 127 */ ValueSlot::op(Opcode::F2f64, Bits(64), &[111]),

    // i2f64(f2u16(a@64)) => fmin(fmax(a, -32768.0), 32767.0)
    /* 128 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[79]),

    // i2f64(f2i16(a@32)) => f2f64(fmin(fmax(a, -32768.0), 32767.0))
    /* 129 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[86]),

    // i2f64(f2i16(a@64)) => fmin(fmax(a, -32768.0), 32767.0)
    /* 130 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[88]),

    // f2f32(u2u16(a@32)) => unpack_half_2x16_split_x(a)
    /* 131 */ ValueSlot::op(Opcode::F2f32, Bits(32), &[1]),
    /* 132 */ ValueSlot::op(Opcode::UnpackHalf2x16SplitX, Bits(32), &[0]),

    // u2u32(f2f16_rtz(a@32)) => pack_half_2x16_split(a, 0)
    /* 133 */ ValueSlot::op(Opcode::F2f16Rtz, Bits(16), &[0]),
    /* 134 */ ValueSlot::op(Opcode::U2u32, Bits(32), &[133]),
    /* 135 */ ValueSlot::int(Bits(32), 0),
    /* 136 */ ValueSlot::op(Opcode::PackHalf2x16Split, Bits(32), &[0, 135]),
];

static TRANSFORMS: [Transform; 58] = [
    // u2u@32
    Transform::new(2, 4),
    Transform::new(7, 10),
    Transform::new(12, 13),
    Transform::new(15, 10),
    Transform::new(18, 20),
    Transform::new(22, 24),
    Transform::new(134, 136),
    // u2u@64
    Transform::new(25, 26),
    Transform::new(27, 9),
    Transform::new(28, 26),
    Transform::new(29, 30),
    Transform::new(31, 33),
    Transform::new(34, 36),
    // i2i@32
    Transform::new(37, 41),
    Transform::new(42, 46),
    Transform::new(47, 40),
    Transform::new(48, 46),
    Transform::new(49, 51),
    Transform::new(52, 54),
    // i2i@64
    Transform::new(55, 56),
    Transform::new(57, 58),
    Transform::new(59, 56),
    Transform::new(60, 45),
    Transform::new(61, 63),
    Transform::new(64, 66),
    // u2f@32
    Transform::new(67, 68),
    Transform::new(69, 70),
    Transform::new(71, 68),
    Transform::new(72, 70),
    Transform::new(74, 78),
    Transform::new(80, 85),
    Transform::new(87, 78),
    Transform::new(89, 85),
    // u2f@64
    Transform::new(90, 91),
    Transform::new(92, 93),
    Transform::new(94, 91),
    Transform::new(95, 93),
    Transform::new(96, 97),
    Transform::new(98, 84),
    Transform::new(99, 97),
    Transform::new(100, 84),
    // i2f@32
    Transform::new(101, 102),
    Transform::new(103, 104),
    Transform::new(105, 102),
    Transform::new(106, 104),
    Transform::new(107, 111),
    Transform::new(112, 117),
    Transform::new(118, 111),
    Transform::new(119, 117),
    // i2f@64
    Transform::new(120, 121),
    Transform::new(122, 123),
    Transform::new(124, 121),
    Transform::new(125, 123),
    Transform::new(126, 127),
    Transform::new(128, 116),
    Transform::new(129, 127),
    Transform::new(130, 116),
    // f2f@32
    Transform::new(131, 132),
];

static RUNS: [Run; 10] = [
    Run::EMPTY,
    Run::new(0, 7),
    Run::new(7, 6),
    Run::new(13, 6),
    Run::new(19, 6),
    Run::new(25, 8),
    Run::new(33, 8),
    Run::new(41, 8),
    Run::new(49, 8),
    Run::new(57, 1),
];

static DISPATCH: [PerOp; 5] = [
    PerOp {
        key: SearchOp::Family(OpFamily::U2u),
        filter: Some([0, 0, 0, 1, 2]),
        table: &[0, 1, 2],
    },
    PerOp {
        key: SearchOp::Family(OpFamily::I2i),
        filter: Some([0, 0, 0, 1, 2]),
        table: &[0, 3, 4],
    },
    PerOp {
        key: SearchOp::Family(OpFamily::U2f),
        filter: Some([0, 0, 0, 1, 2]),
        table: &[0, 5, 6],
    },
    PerOp {
        key: SearchOp::Family(OpFamily::I2f),
        filter: Some([0, 0, 0, 1, 2]),
        table: &[0, 7, 8],
    },
    PerOp {
        key: SearchOp::Family(OpFamily::F2f),
        filter: Some([0, 0, 0, 1, 0]),
        table: &[0, 9],
    },
];

pub static TABLE: RuleTable = RuleTable {
    name: "lower_16bit_conv",
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
