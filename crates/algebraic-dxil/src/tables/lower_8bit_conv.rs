//! Conversions through an 8-bit intermediate.
//!
//! Every `x2y(x2y8(a))` chain is rewritten on the width of `a`: integer
//! narrowing becomes a mask or a shift pair, float-to-int narrowing
//! feeding a float conversion becomes a clamp.
//!
//! This file is generated from the pattern list; regenerate it rather
//! than editing by hand.

use std::sync::LazyLock;

use algebraic::table::Width::Bits;
use algebraic::{PerOp, RuleSet, RuleTable, Run, SearchOp, Transform, ValueSlot, WidthMask};
use algebraic_ir::{OpFamily, Opcode};

static VALUES: [ValueSlot; 249] = [
    // u2u16(u2u8(a@16)) => iand(a, 255)
    /* 0 */ ValueSlot::variable(0, WidthMask::B16),
    /* 1 */ ValueSlot::op(Opcode::U2u8, Bits(8), &[0]),
    /* 2 */ ValueSlot::op(Opcode::U2u16, Bits(16), &[1]),
    /* 3 */ ValueSlot::int(Bits(16), 0xff),
    /* 4 */ ValueSlot::op(Opcode::Iand, Bits(16), &[0, 3]).commutative(),

    // u2u16(u2u8(a@32)) => u2u16(iand(a, 255))
    /* 5 */ ValueSlot::variable(0, WidthMask::B32),
    /* 6 */ ValueSlot::op(Opcode::U2u8, Bits(8), &[5]),
    /* 7 */ ValueSlot::op(Opcode::U2u16, Bits(16), &[6]),
    /* 8 */ ValueSlot::int(Bits(32), 0xff),
    /* 9 */ ValueSlot::op(Opcode::Iand, Bits(32), &[5, 8]).commutative(),
    /* 10 */ ValueSlot::op(Opcode::U2u16, Bits(16), &[9]),

    // u2u16(u2u8(a@64)) => u2u16(iand(a, 255))
    /* 11 */ ValueSlot::variable(0, WidthMask::B64),
    /* 12 */ ValueSlot::op(Opcode::U2u8, Bits(8), &[11]),
    /* 13 */ ValueSlot::op(Opcode::U2u16, Bits(16), &[12]),
    /* 14 */ ValueSlot::int(Bits(64), 0xff),
    /* 15 */ ValueSlot::op(Opcode::Iand, Bits(64), &[11, 14]).commutative(),
    /* 16 */ ValueSlot::op(Opcode::U2u16, Bits(16), &[15]),

    // u2u16(i2i8(a@16)) => u2u16(iand(a, 255))
    /* 17 */ ValueSlot::op(Opcode::I2i8, Bits(8), &[0]),
    /* 18 */ ValueSlot::op(Opcode::U2u16, Bits(16), &[17]),
    /* 19 */ ValueSlot::op(Opcode::U2u16, Bits(16), &[4]),

    // u2u16(i2i8(a@32)) => u2u16(iand(a, 255))
    /* 20 */ ValueSlot::op(Opcode::I2i8, Bits(8), &[5]),
    /* 21 */ ValueSlot::op(Opcode::U2u16, Bits(16), &[20]),

    // u2u16(i2i8(a@64)) => u2u16(iand(a, 255))
    /* 22 */ ValueSlot::op(Opcode::I2i8, Bits(8), &[11]),
    /* 23 */ ValueSlot::op(Opcode::U2u16, Bits(16), &[22]),

    // u2u16(f2u8(a)) => iand(f2u16(a), 255)
    /* 24 */ ValueSlot::variable(0, WidthMask::ANY),
    /* 25 */ ValueSlot::op(Opcode::F2u8, Bits(8), &[24]),
    /* 26 */ ValueSlot::op(Opcode::U2u16, Bits(16), &[25]),
    /* 27 */ ValueSlot::op(Opcode::F2u16, Bits(16), &[24]),
    /* 28 */ ValueSlot::op(Opcode::Iand, Bits(16), &[27, 3]).commutative(),

    // u2u16(f2i8(a)) => iand(f2i16(a), 255)
    /* 29 */ ValueSlot::op(Opcode::F2i8, Bits(8), &[24]),
    /* 30 */ ValueSlot::op(Opcode::U2u16, Bits(16), &[29]),
    /* 31 */ ValueSlot::op(Opcode::F2i16, Bits(16), &[24]),
    /* 32 */ ValueSlot::op(Opcode::Iand, Bits(16), &[31, 3]).commutative(),

    // u2u32(u2u8(a@16)) => u2u32(iand(a, 255))
    /* 33 */ ValueSlot::op(Opcode::U2u32, Bits(32), &[1]),
    /* 34 */ ValueSlot::op(Opcode::U2u32, Bits(32), &[4]),

    // u2u32(u2u8(a@32)) => iand(a, 255)
    /* 35 */ ValueSlot::op(Opcode::U2u32, Bits(32), &[6]),

    // u2u32(u2u8(a@64)) => u2u32(iand(a, 255))
    /* 36 */ ValueSlot::op(Opcode::U2u32, Bits(32), &[12]),
    /* 37 */ ValueSlot::op(Opcode::U2u32, Bits(32), &[15]),

    // u2u32(i2i8(a@16)) => u2u32(iand(a, 255))
    /* 38 */ ValueSlot::op(Opcode::U2u32, Bits(32), &[17]),

    // u2u32(i2i8(a@32)) => u2u32(iand(a, 255))
    /* 39 */ ValueSlot::op(Opcode::U2u32, Bits(32), &[20]),
    /* 40 */ ValueSlot::op(Opcode::U2u32, Bits(32), &[9]),

    // u2u32(i2i8(a@64)) => u2u32(iand(a, 255))
    /* 41 */ ValueSlot::op(Opcode::U2u32, Bits(32), &[22]),

    // u2u32(f2u8(a)) => iand(f2u32(a), 255)
    /* 42 */ ValueSlot::op(Opcode::U2u32, Bits(32), &[25]),
    /* 43 */ ValueSlot::op(Opcode::F2u32, Bits(32), &[24]),
    /* 44 */ ValueSlot::op(Opcode::Iand, Bits(32), &[43, 8]).commutative(),

    // u2u32(f2i8(a)) => iand(f2i32(a), 255)
    /* 45 */ ValueSlot::op(Opcode::U2u32, Bits(32), &[29]),
    /* 46 */ ValueSlot::op(Opcode::F2i32, Bits(32), &[24]),
    /* 47 */ ValueSlot::op(Opcode::Iand, Bits(32), &[46, 8]).commutative(),

    // u2u64(u2u8(a@16)) => u2u64(iand(a, 255))
    /* 48 */ ValueSlot::op(Opcode::U2u64, Bits(64), &[1]),
    /* 49 */ ValueSlot::op(Opcode::U2u64, Bits(64), &[4]),

    // u2u64(u2u8(a@32)) => u2u64(iand(a, 255))
    /* 50 */ ValueSlot::op(Opcode::U2u64, Bits(64), &[6]),
    /* 51 */ ValueSlot::op(Opcode::U2u64, Bits(64), &[9]),

    // u2u64(u2u8(a@64)) => iand(a, 255)
    /* 52 */ ValueSlot::op(Opcode::U2u64, Bits(64), &[12]),

    // u2u64(i2i8(a@16)) => u2u64(iand(a, 255))
    /* 53 */ ValueSlot::op(Opcode::U2u64, Bits(64), &[17]),

    // u2u64(i2i8(a@32)) => u2u64(iand(a, 255))
    /* 54 */ ValueSlot::op(Opcode::U2u64, Bits(64), &[20]),

    // u2u64(i2i8(a@64)) => u2u64(iand(a, 255))
    /* 55 */ ValueSlot::op(Opcode::U2u64, Bits(64), &[22]),
    /* 56 */ ValueSlot::op(Opcode::U2u64, Bits(64), &[15]),

    // u2u64(f2u8(a)) => iand(f2u64(a), 255)
    /* 57 */ ValueSlot::op(Opcode::U2u64, Bits(64), &[25]),
    /* 58 */ ValueSlot::op(Opcode::F2u64, Bits(64), &[24]),
    /* 59 */ ValueSlot::op(Opcode::Iand, Bits(64), &[58, 14]).commutative(),

    // u2u64(f2i8(a)) => iand(f2i64(a), 255)
    /* 60 */ ValueSlot::op(Opcode::U2u64, Bits(64), &[29]),
    /* 61 */ ValueSlot::op(Opcode::F2i64, Bits(64), &[24]),
    /* 62 */ ValueSlot::op(Opcode::Iand, Bits(64), &[61, 14]).commutative(),

    // i2i16(u2u8(a@16)) => i2i16(ishr(ishl(a, 8), 8))
    /* 63 */ ValueSlot::op(Opcode::I2i16, Bits(16), &[1]),
    /* 64 */ ValueSlot::int(Bits(32), 8),
    /* 65 */ ValueSlot::op(Opcode::Ishl, Bits(16), &[0, 64]),
    /* 66 */ ValueSlot::op(Opcode::Ishr, Bits(16), &[65, 64]),
    /* 67 */ ValueSlot::op(Opcode::I2i16, Bits(16), &[66]),

    // i2i16(u2u8(a@32)) => i2i16(ishr(ishl(a, 24), 24))
    /* 68 */ ValueSlot::op(Opcode::I2i16, Bits(16), &[6]),
    /* 69 */ ValueSlot::int(Bits(32), 0x18),
    /* 70 */ ValueSlot::op(Opcode::Ishl, Bits(32), &[5, 69]),
    /* 71 */ ValueSlot::op(Opcode::Ishr, Bits(32), &[70, 69]),
    /* 72 */ ValueSlot::op(Opcode::I2i16, Bits(16), &[71]),

    // i2i16(u2u8(a@64)) => i2i16(ishr(ishl(a, 56), 56))
    /* 73 */ ValueSlot::op(Opcode::I2i16, Bits(16), &[12]),
    /* 74 */ ValueSlot::int(Bits(32), 0x38),
    /* 75 */ ValueSlot::op(Opcode::Ishl, Bits(64), &[11, 74]),
    /* 76 */ ValueSlot::op(Opcode::Ishr, Bits(64), &[75, 74]),
    /* 77 */ ValueSlot::op(Opcode::I2i16, Bits(16), &[76]),

    // i2i16(i2i8(a@16)) => ishr(ishl(a, 8), 8)
    /* 78 */ ValueSlot::op(Opcode::I2i16, Bits(16), &[17]),

    // i2i16(i2i8(a@32)) => i2i16(ishr(ishl(a, 24), 24))
    /* 79 */ ValueSlot::op(Opcode::I2i16, Bits(16), &[20]),

    // i2i16(i2i8(a@64)) => i2i16(ishr(ishl(a, 56), 56))
    /* 80 */ ValueSlot::op(Opcode::I2i16, Bits(16), &[22]),

    // i2i16(f2u8(a)) => ishr(ishl(f2u16(a), 8), 8)
    /* 81 */ ValueSlot::op(Opcode::I2i16, Bits(16), &[25]),
    /* 82 */ ValueSlot::op(Opcode::Ishl, Bits(16), &[27, 64]),
    /* 83 */ ValueSlot::op(Opcode::Ishr, Bits(16), &[82, 64]),

    // i2i16(f2i8(a)) => ishr(ishl(f2i16(a), 8), 8)
    /* 84 */ ValueSlot::op(Opcode::I2i16, Bits(16), &[29]),
    /* 85 */ ValueSlot::op(Opcode::Ishl, Bits(16), &[31, 64]),
    /* 86 */ ValueSlot::op(Opcode::Ishr, Bits(16), &[85, 64]),

    // i2i32(u2u8(a@16)) => i2i32(ishr(ishl(a, 8), 8))
    /* 87 */ ValueSlot::op(Opcode::I2i32, Bits(32), &[1]),
    /* 88 */ ValueSlot::op(Opcode::I2i32, Bits(32), &[66]),

    // i2i32(u2u8(a@32)) => i2i32(ishr(ishl(a, 24), 24))
    /* 89 */ ValueSlot::op(Opcode::I2i32, Bits(32), &[6]),
    /* 90 */ ValueSlot::op(Opcode::I2i32, Bits(32), &[71]),

    // i2i32(u2u8(a@64)) => i2i32(ishr(ishl(a, 56), 56))
    /* 91 */ ValueSlot::op(Opcode::I2i32, Bits(32), &[12]),
    /* 92 */ ValueSlot::op(Opcode::I2i32, Bits(32), &[76]),

    // i2i32(i2i8(a@16)) => i2i32(ishr(ishl(a, 8), 8))
    /* 93 */ ValueSlot::op(Opcode::I2i32, Bits(32), &[17]),

    // i2i32(i2i8(a@32)) => ishr(ishl(a, 24), 24)
    /* 94 */ ValueSlot::op(Opcode::I2i32, Bits(32), &[20]),

    // i2i32(i2i8(a@64)) => i2i32(ishr(ishl(a, 56), 56))
    /* 95 */ ValueSlot::op(Opcode::I2i32, Bits(32), &[22]),

    // i2i32(f2u8(a)) => ishr(ishl(f2u32(a), 24), 24)
    /* 96 */ ValueSlot::op(Opcode::I2i32, Bits(32), &[25]),
    /* 97 */ ValueSlot::op(Opcode::Ishl, Bits(32), &[43, 69]),
    /* 98 */ ValueSlot::op(Opcode::Ishr, Bits(32), &[97, 69]),

    // i2i32(f2i8(a)) => ishr(ishl(f2i32(a), 24), 24)
    /* 99 */ ValueSlot::op(Opcode::I2i32, Bits(32), &[29]),
    /* 100 */ ValueSlot::op(Opcode::Ishl, Bits(32), &[46, 69]),
    /* 101 */ ValueSlot::op(Opcode::Ishr, Bits(32), &[100, 69]),

    // i2i64(u2u8(a@16)) => i2i64(ishr(ishl(a, 8), 8))
    /* 102 */ ValueSlot::op(Opcode::I2i64, Bits(64), &[1]),
    /* 103 */ ValueSlot::op(Opcode::I2i64, Bits(64), &[66]),

    // i2i64(u2u8(a@32)) => i2i64(ishr(ishl(a, 24), 24))
    /* 104 */ ValueSlot::op(Opcode::I2i64, Bits(64), &[6]),
    /* 105 */ ValueSlot::op(Opcode::I2i64, Bits(64), &[71]),

    // i2i64(u2u8(a@64)) => i2i64(ishr(ishl(a, 56), 56))
    /* 106 */ ValueSlot::op(Opcode::I2i64, Bits(64), &[12]),
    /* 107 */ ValueSlot::op(Opcode::I2i64, Bits(64), &[76]),

    // i2i64(i2i8(a@16)) => i2i64(ishr(ishl(a, 8), 8))
    /* 108 */ ValueSlot::op(Opcode::I2i64, Bits(64), &[17]),

    // i2i64(i2i8(a@32)) => i2i64(ishr(ishl(a, 24), 24))
    /* 109 */ ValueSlot::op(Opcode::I2i64, Bits(64), &[20]),

    // i2i64(i2i8(a@64)) => ishr(ishl(a, 56), 56)
    /* 110 */ ValueSlot::op(Opcode::I2i64, Bits(64), &[22]),

    // i2i64(f2u8(a)) => ishr(ishl(f2u64(a), 56), 56)
    /* 111 */ ValueSlot::op(Opcode::I2i64, Bits(64), &[25]),
    /* 112 */ ValueSlot::op(Opcode::Ishl, Bits(64), &[58, 74]),
    /* 113 */ ValueSlot::op(Opcode::Ishr, Bits(64), &[112, 74]),

    // i2i64(f2i8(a)) => ishr(ishl(f2i64(a), 56), 56)
    /* 114 */ ValueSlot::op(Opcode::I2i64, Bits(64), &[29]),
    /* 115 */ ValueSlot::op(Opcode::Ishl, Bits(64), &[61, 74]),
    /* 116 */ ValueSlot::op(Opcode::Ishr, Bits(64), &[115, 74]),

    // u2f16(u2u8(a@16)) => u2f16(iand(a, 255))
    /* 117 */ ValueSlot::op(Opcode::U2f16, Bits(16), &[1]),
    /* 118 */ ValueSlot::op(Opcode::U2f16, Bits(16), &[4]),

    // u2f16(u2u8(a@32)) => u2f16(iand(a, 255))
    /* 119 */ ValueSlot::op(Opcode::U2f16, Bits(16), &[6]),
    /* 120 */ ValueSlot::op(Opcode::U2f16, Bits(16), &[9]),

    // u2f16(u2u8(a@64)) => u2f16(iand(a, 255))
    /* 121 */ ValueSlot::op(Opcode::U2f16, Bits(16), &[12]),
    /* 122 */ ValueSlot::op(Opcode::U2f16, Bits(16), &[15]),

    // u2f16(i2i8(a@16)) => u2f16(iand(a, 255))
    /* 123 */ ValueSlot::op(Opcode::U2f16, Bits(16), &[17]),

    // u2f16(i2i8(a@32)) => u2f16(iand(a, 255))
    /* 124 */ ValueSlot::op(Opcode::U2f16, Bits(16), &[20]),

    // u2f16(i2i8(a@64)) => u2f16(iand(a, 255))
    /* 125 */ ValueSlot::op(Opcode::U2f16, Bits(16), &[22]),

    // u2f16(f2u8(a@16)) => fmin(fmax(a, 0.0), 255.0)
    /* 126 */ ValueSlot::op(Opcode::F2u8, Bits(8), &[0]),
    /* 127 */ ValueSlot::op(Opcode::U2f16, Bits(16), &[126]),
    /* 128 */ ValueSlot::float(Bits(16), 0.0),
    /* 129 */ ValueSlot::op(Opcode::Fmax, Bits(16), &[0, 128]).commutative(),
    /* 130 */ ValueSlot::float(Bits(16), 255.0),
    /* 131 */ ValueSlot::op(Opcode::Fmin, Bits(16), &[129, 130]).commutative(),

    // u2f16(f2u8(a@32)) => f2f16(fmin(fmax(a, 0.0), 255.0))
    /* 132 */ ValueSlot::op(Opcode::F2u8, Bits(8), &[5]),
    /* 133 */ ValueSlot::op(Opcode::U2f16, Bits(16), &[132]),
    /* 134 */ ValueSlot::float(Bits(32), 0.0),
    /* 135 */ ValueSlot::op(Opcode::Fmax, Bits(32), &[5, 134]).commutative(),
    /* 136 */ ValueSlot::float(Bits(32), 255.0),
    /* 137 */ ValueSlot::op(Opcode::Fmin, Bits(32), &[135, 136]).commutative(),
    /* 138 */ ValueSlot::op(Opcode::F2f16, Bits(16), &[137]),

    // u2f16(f2u8(a@64)) => f2f16(fmin(fmax(a, 0.0), 255.0))
    /* 139 */ ValueSlot::op(Opcode::F2u8, Bits(8), &[11]),
    /* 140 */ ValueSlot::op(Opcode::U2f16, Bits(16), &[139]),
    /* 141 */ ValueSlot::float(Bits(64), 0.0),
    /* 142 */ ValueSlot::op(Opcode::Fmax, Bits(64), &[11, 141]).commutative(),
    /* 143 */ ValueSlot::float(Bits(64), 255.0),
    /* 144 */ ValueSlot::op(Opcode::Fmin, Bits(64), &[142, 143]).commutative(),
    /* 145 */ ValueSlot::op(Opcode::F2f16, Bits(16), &[144]),

    // u2f16(f2i8(a@16)) => fmin(fmax(a, 0.0), 255.0)
    /* 146 */ ValueSlot::op(Opcode::F2i8, Bits(8), &[0]),
    /* 147 */ ValueSlot::op(Opcode::U2f16, Bits(16), &[146]),

    // u2f16(f2i8(a@32)) => f2f16(fmin(fmax(a, 0.0), 255.0))
    /* 148 */ ValueSlot::op(Opcode::F2i8, Bits(8), &[5]),
    /* 149 */ ValueSlot::op(Opcode::U2f16, Bits(16), &[148]),

    // u2f16(f2i8(a@64)) => f2f16(fmin(fmax(a, 0.0), 255.0))
    /* 150 */ ValueSlot::op(Opcode::F2i8, Bits(8), &[11]),
    /* 151 */ ValueSlot::op(Opcode::U2f16, Bits(16), &[150]),

    // u2f32(u2u8(a@16)) => u2f32(iand(a, 255))
    /* 152 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[1]),
    /* 153 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[4]),

    // u2f32(u2u8(a@32)) => u2f32(iand(a, 255))
    /* 154 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[6]),
    /* 155 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[9]),

    // u2f32(u2u8(a@64)) => u2f32(iand(a, 255))
    /* 156 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[12]),
    /* 157 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[15]),

    // u2f32(i2i8(a@16)) => u2f32(iand(a, 255))
    /* 158 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[17]),

    // u2f32(i2i8(a@32)) => u2f32(iand(a, 255))
    /* 159 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[20]),

    // u2f32(i2i8(a@64)) => u2f32(iand(a, 255))
    /* 160 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[22]),

    // u2f32(f2u8(a@16)) => f2f32(fmin(fmax(a, 0.0), 255.0))
    /* 161 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[126]),
    /* 162 */ ValueSlot::op(Opcode::F2f32, Bits(32), &[131]),

    // u2f32(f2u8(a@32)) => fmin(fmax(a, 0.0), 255.0)
    /* 163 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[132]),

    // u2f32(f2u8(a@64)) => f2f32(fmin(fmax(a, 0.0), 255.0))
    /* 164 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[139]),
    /* 165 */ ValueSlot::op(Opcode::F2f32, Bits(32), &[144]),

    // u2f32(f2i8(a@16)) => f2f32(fmin(fmax(a, 0.0), 255.0))
    /* 166 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[146]),

    // u2f32(f2i8(a@32)) => fmin(fmax(a, 0.0), 255.0)
    /* 167 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[148]),

    // u2f32(f2i8(a@64)) => f2f32(fmin(fmax(a, 0.0), 255.0))
    /* 168 */ ValueSlot::op(Opcode::U2f32, Bits(32), &[150]),

    // u2f64(u2u8(a@16)) => u2f64(iand(a, 255))
    /* 169 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[1]),
    /* 170 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[4]),

    // u2f64(u2u8(a@32)) => u2f64(iand(a, 255))
    /* 171 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[6]),
    /* 172 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[9]),

    // u2f64(u2u8(a@64)) => u2f64(iand(a, 255))
    /* 173 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[12]),
    /* 174 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[15]),

    // u2f64(i2i8(a@16)) => u2f64(iand(a, 255))
    /* 175 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[17]),

    // u2f64(i2i8(a@32)) => u2f64(iand(a, 255))
    /* 176 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[20]),

    // u2f64(i2i8(a@64)) => u2f64(iand(a, 255))
    /* 177 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[22]),

    // u2f64(f2u8(a@16)) => f2f64(fmin(fmax(a, 0.0), 255.0))
    /* 178 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[126]),
    /* 179 */ ValueSlot::op(Opcode::F2f64, Bits(64), &[131]),

    // u2f64(f2u8(a@32)) => f2f64(fmin(fmax(a, 0.0), 255.0))
    /* 180 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[132]),
    /* 181 */ ValueSlot::op(Opcode::F2f64, Bits(64), &[137]),

    // u2f64(f2u8(a@64)) => fmin(fmax(a, 0.0), 255.0)
    /* 182 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[139]),

    // u2f64(f2i8(a@16)) => f2f64(fmin(fmax(a, 0.0), 255.0))
    /* 183 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[146]),

    // u2f64(f2i8(a@32)) => f2f64(fmin(fmax(a, 0.0), 255.0))
    /* 184 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[148]),

    // u2f64(f2i8(a@64)) => fmin(fmax(a, 0.0), 255.0)
    /* 185 */ ValueSlot::op(Opcode::U2f64, Bits(64), &[150]),

    // i2f16(u2u8(a@16)) => i2f16(ishr(ishl(a, 8), 8))
    /* 186 */ ValueSlot::op(Opcode::I2f16, Bits(16), &[1]),
    /* 187 */ ValueSlot::op(Opcode::I2f16, Bits(16), &[66]),

    // i2f16(u2u8(a@32)) => i2f16(ishr(ishl(a, 24), 24))
    /* 188 */ ValueSlot::op(Opcode::I2f16, Bits(16), &[6]),
    /* 189 */ ValueSlot::op(Opcode::I2f16, Bits(16), &[71]),

    // i2f16(u2u8(a@64)) => i2f16(ishr(ishl(a, 56), 56))
    /* 190 */ ValueSlot::op(Opcode::I2f16, Bits(16), &[12]),
    /* 191 */ ValueSlot::op(Opcode::I2f16, Bits(16), &[76]),

    // i2f16(i2i8(a@16)) => i2f16(ishr(ishl(a, 8), 8))
    /* 192 */ ValueSlot::op(Opcode::I2f16, Bits(16), &[17]),

    // i2f16(i2i8(a@32)) => i2f16(ishr(ishl(a, 24), 24))
    /* 193 */ ValueSlot::op(Opcode::I2f16, Bits(16), &[20]),

    // i2f16(i2i8(a@64)) => i2f16(ishr(ishl(a, 56), 56))
    /* 194 */ ValueSlot::op(Opcode::I2f16, Bits(16), &[22]),

    // i2f16(f2u8(a@16)) => fmin(fmax(a, -128.0), 127.0)
    /* 195 */ ValueSlot::op(Opcode::I2f16, Bits(16), &[126]),
    /* 196 */ ValueSlot::float(Bits(16), -128.0),
    /* 197 */ ValueSlot::op(Opcode::Fmax, Bits(16), &[0, 196]).commutative(),
    /* 198 */ ValueSlot::float(Bits(16), 127.0),
    /* 199 */ ValueSlot::op(Opcode::Fmin, Bits(16), &[197, 198]).commutative(),

    // i2f16(f2u8(a@32)) => f2f16(fmin(fmax(a, -128.0), 127.0))
    /* 200 */ ValueSlot::op(Opcode::I2f16, Bits(16), &[132]),
    /* 201 */ ValueSlot::float(Bits(32), -128.0),
    /* 202 */ ValueSlot::op(Opcode::Fmax, Bits(32), &[5, 201]).commutative(),
    /* 203 */ ValueSlot::float(Bits(32), 127.0),
    /* 204 */ ValueSlot::op(Opcode::Fmin, Bits(32), &[202, 203]).commutative(),
    /* 205 */ ValueSlot::op(Opcode::F2f16, Bits(16), &[204]),

    // i2f16(f2u8(a@64)) => f2f16(fmin(fmax(a, -128.0), 127.0))
    /* 206 */ ValueSlot::op(Opcode::I2f16, Bits(16), &[139]),
    /* 207 */ ValueSlot::float(Bits(64), -128.0),
    /* 208 */ ValueSlot::op(Opcode::Fmax, Bits(64), &[11, 207]).commutative(),
    /* 209 */ ValueSlot::float(Bits(64), 127.0),
    /* 210 */ ValueSlot::op(Opcode::Fmin, Bits(64), &[208, 209]).commutative(),
    /* 211 */ ValueSlot::op(Opcode::F2f16, Bits(16), &[210]),

    // i2f16(f2i8(a@16)) => fmin(fmax(a, -128.0), 127.0)
    /* 212 */ ValueSlot::op(Opcode::I2f16, Bits(16), &[146]),

    // i2f16(f2i8(a@32)) => f2f16(fmin(fmax(a, -128.0), 127.0))
    /* 213 */ ValueSlot::op(Opcode::I2f16, Bits(16), &[148]),

    // i2f16(f2i8(a@64)) => f2f16(fmin(fmax(a, -128.0), 127.0))
    /* 214 */ ValueSlot::op(Opcode::I2f16, Bits(16), &[150]),

    // i2f32(u2u8(a@16)) => i2f32(ishr(ishl(a, 8), 8))
    /* 215 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[1]),
    /* 216 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[66]),

    // i2f32(u2u8(a@32)) => i2f32(ishr(ishl(a, 24), 24))
    /* 217 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[6]),
    /* 218 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[71]),

    // i2f32(u2u8(a@64)) => i2f32(ishr(ishl(a, 56), 56))
    /* 219 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[12]),
    /* 220 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[76]),

    // i2f32(i2i8(a@16)) => i2f32(ishr(ishl(a, 8), 8))
    /* 221 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[17]),

    // i2f32(i2i8(a@32)) => i2f32(ishr(ishl(a, 24), 24))
    /* 222 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[20]),

    // i2f32(i2i8(a@64)) => i2f32(ishr(ishl(a, 56), 56))
    /* 223 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[22]),

    // i2f32(f2u8(a@16)) => f2f32(fmin(fmax(a, -128.0), 127.0))
    /* 224 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[126]),
    /* 225 */ ValueSlot::op(Opcode::F2f32, Bits(32), &[199]),

    // i2f32(f2u8(a@32)) => fmin(fmax(a, -128.0), 127.0)
    /* 226 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[132]),

    // i2f32(f2u8(a@64)) => f2f32(fmin(fmax(a, -128.0), 127.0))
    /* 227 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[139]),
    /* 228 */ ValueSlot::op(Opcode::F2f32, Bits(32), &[210]),

    // i2f32(f2i8(a@16)) => f2f32(fmin(fmax(a, -128.0), 127.0))
    /* 229 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[146]),

    // i2f32(f2i8(a@32)) => fmin(fmax(a, -128.0), 127.0)
    /* 230 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[148]),

    // i2f32(f2i8(a@64)) => f2f32(fmin(fmax(a, -128.0), 127.0))
    /* 231 */ ValueSlot::op(Opcode::I2f32, Bits(32), &[150]),

    // i2f64(u2u8(a@16)) => i2f64(ishr(ishl(a, 8), 8))
    /* 232 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[1]),
    /* 233 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[66]),

    // i2f64(u2u8(a@32)) => i2f64(ishr(ishl(a, 24), 24))
    /* 234 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[6]),
    /* 235 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[71]),

    // i2f64(u2u8(a@64)) => i2f64(ishr(ishl(a, 56), 56))
    /* 236 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[12]),
    /* 237 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[76]),

    // i2f64(i2i8(a@16)) => i2f64(ishr(ishl(a, 8), 8))
    /* 238 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[17]),

    // i2f64(i2i8(a@32)) => i2f64(ishr(ishl(a, 24), 24))
    /* 239 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[20]),

    // i2f64(i2i8(a@64)) => i2f64(ishr(ishl(a, 56), 56))
    /* 240 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[22]),

    // i2f64(f2u8(a@16)) => f2f64(fmin(fmax(a, -128.0), 127.0))
    /* 241 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[126]),
    /* 242 */ ValueSlot::op(Opcode::F2f64, Bits(64), &[199]),

    // i2f64(f2u8(a@32)) => f2f64(fmin(fmax(a, -128.0), 127.0))
    /* 243 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[132]),
    /* 244 */ ValueSlot::op(Opcode::F2f64, Bits(64), &[204]),

    // i2f64(f2u8(a@64)) => fmin(fmax(a, -128.0), 127.0)
    /* 245 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[139]),

    // i2f64(f2i8(a@16)) => f2f64(fmin(fmax(a, -128.0), 127.0))
    /* 246 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[146]),

    // i2f64(f2i8(a@32)) => f2f64(fmin(fmax(a, -128.0), 127.0))
    /* 247 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[148]),

    // i2f64(f2i8(a@64)) => fmin(fmax(a, -128.0), 127.0)
    /* 248 */ ValueSlot::op(Opcode::I2f64, Bits(64), &[150]),
];

static TRANSFORMS: [Transform; 120] = [
    // u2u@16
    Transform::new(2, 4),
    Transform::new(7, 10),
    Transform::new(13, 16),
    Transform::new(18, 19),
    Transform::new(21, 10),
    Transform::new(23, 16),
    Transform::new(26, 28),
    Transform::new(30, 32),
    // u2u@32
    Transform::new(33, 34),
    Transform::new(35, 9),
    Transform::new(36, 37),
    Transform::new(38, 34),
    Transform::new(39, 40),
    Transform::new(41, 37),
    Transform::new(42, 44),
    Transform::new(45, 47),
    // u2u@64
    Transform::new(48, 49),
    Transform::new(50, 51),
    Transform::new(52, 15),
    Transform::new(53, 49),
    Transform::new(54, 51),
    Transform::new(55, 56),
    Transform::new(57, 59),
    Transform::new(60, 62),
    // i2i@16
    Transform::new(63, 67),
    Transform::new(68, 72),
    Transform::new(73, 77),
    Transform::new(78, 66),
    Transform::new(79, 72),
    Transform::new(80, 77),
    Transform::new(81, 83),
    Transform::new(84, 86),
    // i2i@32
    Transform::new(87, 88),
    Transform::new(89, 90),
    Transform::new(91, 92),
    Transform::new(93, 88),
    Transform::new(94, 71),
    Transform::new(95, 92),
    Transform::new(96, 98),
    Transform::new(99, 101),
    // i2i@64
    Transform::new(102, 103),
    Transform::new(104, 105),
    Transform::new(106, 107),
    Transform::new(108, 103),
    Transform::new(109, 105),
    Transform::new(110, 76),
    Transform::new(111, 113),
    Transform::new(114, 116),
    // u2f@16
    Transform::new(117, 118),
    Transform::new(119, 120),
    Transform::new(121, 122),
    Transform::new(123, 118),
    Transform::new(124, 120),
    Transform::new(125, 122),
    Transform::new(127, 131),
    Transform::new(133, 138),
    Transform::new(140, 145),
    Transform::new(147, 131),
    Transform::new(149, 138),
    Transform::new(151, 145),
    // u2f@32
    Transform::new(152, 153),
    Transform::new(154, 155),
    Transform::new(156, 157),
    Transform::new(158, 153),
    Transform::new(159, 155),
    Transform::new(160, 157),
    Transform::new(161, 162),
    Transform::new(163, 137),
    Transform::new(164, 165),
    Transform::new(166, 162),
    Transform::new(167, 137),
    Transform::new(168, 165),
    // u2f@64
    Transform::new(169, 170),
    Transform::new(171, 172),
    Transform::new(173, 174),
    Transform::new(175, 170),
    Transform::new(176, 172),
    Transform::new(177, 174),
    Transform::new(178, 179),
    Transform::new(180, 181),
    Transform::new(182, 144),
    Transform::new(183, 179),
    Transform::new(184, 181),
    Transform::new(185, 144),
    // i2f@16
    Transform::new(186, 187),
    Transform::new(188, 189),
    Transform::new(190, 191),
    Transform::new(192, 187),
    Transform::new(193, 189),
    Transform::new(194, 191),
    Transform::new(195, 199),
    Transform::new(200, 205),
    Transform::new(206, 211),
    Transform::new(212, 199),
    Transform::new(213, 205),
    Transform::new(214, 211),
    // i2f@32
    Transform::new(215, 216),
    Transform::new(217, 218),
    Transform::new(219, 220),
    Transform::new(221, 216),
    Transform::new(222, 218),
    Transform::new(223, 220),
    Transform::new(224, 225),
    Transform::new(226, 204),
    Transform::new(227, 228),
    Transform::new(229, 225),
    Transform::new(230, 204),
    Transform::new(231, 228),
    // i2f@64
    Transform::new(232, 233),
    Transform::new(234, 235),
    Transform::new(236, 237),
    Transform::new(238, 233),
    Transform::new(239, 235),
    Transform::new(240, 237),
    Transform::new(241, 242),
    Transform::new(243, 244),
    Transform::new(245, 210),
    Transform::new(246, 242),
    Transform::new(247, 244),
    Transform::new(248, 210),
];

static RUNS: [Run; 13] = [
    Run::EMPTY,
    Run::new(0, 8),
    Run::new(8, 8),
    Run::new(16, 8),
    Run::new(24, 8),
    Run::new(32, 8),
    Run::new(40, 8),
    Run::new(48, 12),
    Run::new(60, 12),
    Run::new(72, 12),
    Run::new(84, 12),
    Run::new(96, 12),
    Run::new(108, 12),
];

static DISPATCH: [PerOp; 4] = [
    PerOp {
        key: SearchOp::Family(OpFamily::U2u),
        filter: Some([0, 0, 1, 2, 3]),
        table: &[0, 1, 2, 3],
    },
    PerOp {
        key: SearchOp::Family(OpFamily::I2i),
        filter: Some([0, 0, 1, 2, 3]),
        table: &[0, 4, 5, 6],
    },
    PerOp {
        key: SearchOp::Family(OpFamily::U2f),
        filter: Some([0, 0, 1, 2, 3]),
        table: &[0, 7, 8, 9],
    },
    PerOp {
        key: SearchOp::Family(OpFamily::I2f),
        filter: Some([0, 0, 1, 2, 3]),
        table: &[0, 10, 11, 12],
    },
];

pub static TABLE: RuleTable = RuleTable {
    name: "lower_8bit_conv",
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
