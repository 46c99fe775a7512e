//! Constant folding.
//!
//! [`evaluate`] computes the exact result of an operation over literal
//! sources, bit-for-bit as the instruction would at run time:
//!
//! - integer arithmetic wraps at the destination width, shift amounts are
//!   masked to `width - 1`, division and remainder by zero yield 0;
//! - float arithmetic is correctly rounded to nearest-even at the
//!   destination width, `fmin`/`fmax` propagate NaN and order `-0.0`
//!   below `+0.0`;
//! - float to integer conversions saturate and map NaN to 0;
//! - `f2f16_rtz` and the half packing round toward zero.

use algebraic_ir::bits::{float_to_bits, is_float_bit_size, mask};
use algebraic_ir::{Literal, OpFamily, Opcode, TypeClass};
use half::f16;

/// Evaluate `opcode` with a `bit_size`-wide result. Returns the raw result
/// bits masked to `bit_size`, or `None` for operations without a result
/// and for float sources or results whose width has no float format.
///
/// # Panics
///
/// Panics if the number of sources does not match the opcode's arity.
pub fn evaluate(opcode: Opcode, bit_size: u8, sources: &[Literal]) -> Option<u64> {
    assert_eq!(
        sources.len(),
        opcode.num_inputs(),
        "evaluate: {opcode} takes {} source(s)",
        opcode.num_inputs()
    );
    let info = opcode.info();
    if !info.has_result() {
        return None;
    }
    let float_result = (info.output_type == TypeClass::Float).then_some(bit_size);
    let float_sources = sources
        .iter()
        .zip(info.input_types)
        .filter(|&(_, ty)| ty == TypeClass::Float)
        .map(|(src, _)| src.bit_size);
    if float_result
        .into_iter()
        .chain(float_sources)
        .any(|bits| !is_float_bit_size(bits))
    {
        return None;
    }
    let raw = match opcode.family() {
        Some(family) => convert(family, bit_size, sources[0]),
        None => operate(opcode, bit_size, sources),
    };
    Some(raw & mask(bit_size))
}

fn convert(family: OpFamily, bit_size: u8, src: Literal) -> u64 {
    match family {
        OpFamily::I2i => src.as_i64() as u64,
        OpFamily::U2u => src.bits,
        OpFamily::F2f => float_to_bits(src.as_f64(), bit_size),
        OpFamily::F2u => float_to_uint(src.as_f64(), bit_size),
        OpFamily::F2i => float_to_int(src.as_f64(), bit_size),
        OpFamily::U2f => match bit_size {
            32 => u64::from((src.bits as f32).to_bits()),
            _ => float_to_bits(src.bits as f64, bit_size),
        },
        OpFamily::I2f => match bit_size {
            32 => u64::from((src.as_i64() as f32).to_bits()),
            _ => float_to_bits(src.as_i64() as f64, bit_size),
        },
        OpFamily::B2b => {
            if src.as_bool() {
                u64::MAX
            } else {
                0
            }
        }
        OpFamily::B2i => u64::from(src.as_bool()),
        OpFamily::B2f => float_to_bits(if src.as_bool() { 1.0 } else { 0.0 }, bit_size),
    }
}

fn float_to_uint(v: f64, bit_size: u8) -> u64 {
    match bit_size {
        8 => u64::from(v as u8),
        16 => u64::from(v as u16),
        32 => u64::from(v as u32),
        _ => v as u64,
    }
}

fn float_to_int(v: f64, bit_size: u8) -> u64 {
    match bit_size {
        8 => i64::from(v as i8) as u64,
        16 => i64::from(v as i16) as u64,
        32 => i64::from(v as i32) as u64,
        _ => (v as i64) as u64,
    }
}

/// Round to binary16 toward zero. NaN and infinities pass through.
fn f16_toward_zero(v: f64) -> u16 {
    let h = f16::from_f64(v);
    if h.is_nan() || v.is_infinite() {
        return h.to_bits();
    }
    if h.to_f64().abs() > v.abs() {
        // sign-magnitude: one step down in magnitude
        h.to_bits() - 1
    } else {
        h.to_bits()
    }
}

fn sign_bit(bit_size: u8) -> u64 {
    1 << (bit_size - 1)
}

fn operate(opcode: Opcode, bit_size: u8, src: &[Literal]) -> u64 {
    let shift = |amount: Literal| (amount.bits as u32) & (u32::from(bit_size) - 1);
    let float = |op: fn(f64, f64) -> f64| {
        float_to_bits(op(src[0].as_f64(), src[1].as_f64()), bit_size)
    };

    match opcode {
        Opcode::Iadd => src[0].bits.wrapping_add(src[1].bits),
        Opcode::Isub => src[0].bits.wrapping_sub(src[1].bits),
        Opcode::Imul => src[0].bits.wrapping_mul(src[1].bits),
        Opcode::Ineg => src[0].bits.wrapping_neg(),
        Opcode::Iabs => src[0].as_i64().wrapping_abs() as u64,
        Opcode::Iand => src[0].bits & src[1].bits,
        Opcode::Ior => src[0].bits | src[1].bits,
        Opcode::Ixor => src[0].bits ^ src[1].bits,
        Opcode::Inot => !src[0].bits,
        Opcode::Ishl => src[0].bits << shift(src[1]),
        Opcode::Ishr => (src[0].as_i64() >> shift(src[1])) as u64,
        Opcode::Ushr => src[0].bits >> shift(src[1]),
        Opcode::Idiv => match src[1].as_i64() {
            0 => 0,
            d => src[0].as_i64().wrapping_div(d) as u64,
        },
        Opcode::Udiv => src[0].bits.checked_div(src[1].bits).unwrap_or(0),
        Opcode::Irem => match src[1].as_i64() {
            0 => 0,
            d => src[0].as_i64().wrapping_rem(d) as u64,
        },
        Opcode::Umod => src[0].bits.checked_rem(src[1].bits).unwrap_or(0),
        Opcode::Imin => src[0].as_i64().min(src[1].as_i64()) as u64,
        Opcode::Imax => src[0].as_i64().max(src[1].as_i64()) as u64,
        Opcode::Umin => src[0].bits.min(src[1].bits),
        Opcode::Umax => src[0].bits.max(src[1].bits),

        Opcode::Fadd => float(|a, b| a + b),
        Opcode::Fsub => float(|a, b| a - b),
        Opcode::Fmul => float(|a, b| a * b),
        Opcode::Fdiv => float(|a, b| a / b),
        Opcode::Fneg => src[0].bits ^ sign_bit(bit_size),
        Opcode::Fabs => src[0].bits & !sign_bit(bit_size),
        Opcode::Fmin => float_min_max(src[0], src[1], false),
        Opcode::Fmax => float_min_max(src[0], src[1], true),

        Opcode::Ieq => u64::from(src[0].bits == src[1].bits),
        Opcode::Ine => u64::from(src[0].bits != src[1].bits),
        Opcode::Ilt => u64::from(src[0].as_i64() < src[1].as_i64()),
        Opcode::Ige => u64::from(src[0].as_i64() >= src[1].as_i64()),
        Opcode::Ult => u64::from(src[0].bits < src[1].bits),
        Opcode::Uge => u64::from(src[0].bits >= src[1].bits),
        Opcode::Feq => u64::from(src[0].as_f64() == src[1].as_f64()),
        Opcode::Fneu => u64::from(src[0].as_f64() != src[1].as_f64()),
        Opcode::Flt => u64::from(src[0].as_f64() < src[1].as_f64()),
        Opcode::Fge => u64::from(src[0].as_f64() >= src[1].as_f64()),

        Opcode::Bcsel => {
            if src[0].as_bool() {
                src[1].bits
            } else {
                src[2].bits
            }
        }
        Opcode::PackHalf2x16Split => {
            let lo = f16_toward_zero(src[0].as_f64());
            let hi = f16_toward_zero(src[1].as_f64());
            u64::from(lo) | (u64::from(hi) << 16)
        }
        Opcode::UnpackHalf2x16SplitX => {
            float_to_bits(f16::from_bits(src[0].bits as u16).to_f64(), 32)
        }
        Opcode::UnpackHalf2x16SplitY => {
            float_to_bits(f16::from_bits((src[0].bits >> 16) as u16).to_f64(), 32)
        }
        Opcode::F2f16Rtz => u64::from(f16_toward_zero(src[0].as_f64())),

        Opcode::Store => unreachable!("evaluate: sinks have no value"),
        _ => unreachable!("evaluate: {opcode} is a conversion"),
    }
}

/// NaN-propagating minimum or maximum, returning the chosen source's bits.
fn float_min_max(a: Literal, b: Literal, max: bool) -> u64 {
    let (x, y) = (a.as_f64(), b.as_f64());
    if x.is_nan() {
        return a.bits;
    }
    if y.is_nan() {
        return b.bits;
    }
    let a_below = x < y || (x == y && x.is_sign_negative() && !y.is_sign_negative());
    if a_below != max { a.bits } else { b.bits }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(bits: u64, bit_size: u8) -> Literal {
        Literal::new(bits, bit_size)
    }

    fn f32_lit(v: f32) -> Literal {
        lit(v.to_bits().into(), 32)
    }

    fn eval(opcode: Opcode, bit_size: u8, sources: &[Literal]) -> u64 {
        evaluate(opcode, bit_size, sources).unwrap()
    }

    #[test]
    fn integer_conversions_truncate_and_extend() {
        assert_eq!(eval(Opcode::U2u8, 8, &[lit(0x1234, 16)]), 0x34);
        assert_eq!(eval(Opcode::U2u32, 32, &[lit(0xc8, 8)]), 0xc8);
        assert_eq!(eval(Opcode::I2i32, 32, &[lit(0xc8, 8)]), 0xffff_ffc8);
        assert_eq!(eval(Opcode::I2i8, 8, &[lit(0xffff_ffc8, 32)]), 0xc8);
    }

    #[test]
    fn wrapping_integer_arithmetic() {
        assert_eq!(eval(Opcode::Iand, 16, &[lit(0xff, 16), lit(0xff, 16)]), 0xff);
        assert_eq!(eval(Opcode::Iadd, 8, &[lit(0xff, 8), lit(2, 8)]), 1);
        assert_eq!(eval(Opcode::Ineg, 32, &[lit(1, 32)]), 0xffff_ffff);
        assert_eq!(eval(Opcode::Iabs, 8, &[lit(0x80, 8)]), 0x80);
        assert_eq!(eval(Opcode::Imin, 8, &[lit(0x80, 8), lit(1, 8)]), 0x80);
        assert_eq!(eval(Opcode::Umin, 8, &[lit(0x80, 8), lit(1, 8)]), 1);
    }

    #[test]
    fn shifts_mask_their_amount() {
        assert_eq!(eval(Opcode::Ishl, 32, &[lit(1, 32), lit(33, 32)]), 2);
        assert_eq!(eval(Opcode::Ishl, 32, &[lit(0xc8, 32), lit(24, 32)]), 0xc800_0000);
        assert_eq!(
            eval(Opcode::Ishr, 32, &[lit(0xc800_0000, 32), lit(24, 32)]),
            0xffff_ffc8
        );
        assert_eq!(eval(Opcode::Ushr, 32, &[lit(0xc800_0000, 32), lit(24, 32)]), 0xc8);
    }

    #[test]
    fn division_edge_cases() {
        assert_eq!(eval(Opcode::Udiv, 32, &[lit(7, 32), lit(0, 32)]), 0);
        assert_eq!(eval(Opcode::Irem, 32, &[lit(7, 32), lit(0, 32)]), 0);
        assert_eq!(eval(Opcode::Idiv, 8, &[lit(0x80, 8), lit(0xff, 8)]), 0x80);
        assert_eq!(eval(Opcode::Irem, 8, &[lit(0xf9, 8), lit(2, 8)]), 0xff);
        assert_eq!(eval(Opcode::Umod, 8, &[lit(0xf9, 8), lit(8, 8)]), 1);
    }

    #[test]
    fn float_to_integer_saturates() {
        assert_eq!(eval(Opcode::F2u8, 8, &[f32_lit(300.0)]), 0xff);
        assert_eq!(eval(Opcode::F2u8, 8, &[f32_lit(-5.0)]), 0);
        assert_eq!(eval(Opcode::F2u8, 8, &[f32_lit(f32::NAN)]), 0);
        assert_eq!(eval(Opcode::F2i8, 8, &[f32_lit(-200.0)]), 0x80);
        assert_eq!(eval(Opcode::F2i16, 16, &[f32_lit(-1.5)]), 0xffff);
    }

    #[test]
    fn integer_to_float() {
        assert_eq!(eval(Opcode::U2f16, 16, &[lit(255, 8)]), 0x5bf8);
        assert_eq!(eval(Opcode::U2f32, 32, &[lit(255, 8)]), 0x437f_0000);
        assert_eq!(eval(Opcode::I2f32, 32, &[lit(0xff, 8)]), 0xbf80_0000);
        assert_eq!(
            eval(Opcode::I2f64, 64, &[lit(0x80, 8)]),
            (-128.0f64).to_bits()
        );
    }

    #[test]
    fn half_rounding_modes() {
        let just_above_one = f32_lit(1.000_732_4);
        assert_eq!(eval(Opcode::F2f16, 16, &[just_above_one]), 0x3c01);
        assert_eq!(eval(Opcode::F2f16Rtz, 16, &[just_above_one]), 0x3c00);
        assert_eq!(eval(Opcode::F2f16, 16, &[f32_lit(70000.0)]), 0x7c00);
        assert_eq!(eval(Opcode::F2f16Rtz, 16, &[f32_lit(70000.0)]), 0x7bff);
        assert_eq!(eval(Opcode::F2f16Rtz, 16, &[f32_lit(-70000.0)]), 0xfbff);
        assert_eq!(eval(Opcode::F2f16Rtz, 16, &[f32_lit(f32::INFINITY)]), 0x7c00);
        assert_eq!(eval(Opcode::F2f32, 32, &[lit(0x3c00, 16)]), 0x3f80_0000);
    }

    #[test]
    fn half_packing() {
        let packed = eval(
            Opcode::PackHalf2x16Split,
            32,
            &[f32_lit(1.0), f32_lit(-2.0)],
        );
        assert_eq!(packed, 0xc000_3c00);
        assert_eq!(
            eval(Opcode::UnpackHalf2x16SplitX, 32, &[lit(packed, 32)]),
            0x3f80_0000
        );
        assert_eq!(
            eval(Opcode::UnpackHalf2x16SplitY, 32, &[lit(packed, 32)]),
            0xc000_0000
        );
    }

    #[test]
    fn float_min_max_order_zeros_and_propagate_nan() {
        let pos = f32_lit(0.0);
        let neg = f32_lit(-0.0);
        let nan = f32_lit(f32::NAN);
        assert_eq!(eval(Opcode::Fmin, 32, &[pos, neg]), neg.bits);
        assert_eq!(eval(Opcode::Fmax, 32, &[neg, pos]), pos.bits);
        assert_eq!(eval(Opcode::Fmin, 32, &[nan, pos]), nan.bits);
        assert_eq!(eval(Opcode::Fmax, 32, &[pos, nan]), nan.bits);
        assert_eq!(
            eval(Opcode::Fmin, 32, &[f32_lit(300.0), f32_lit(255.0)]),
            f32_lit(255.0).bits
        );
    }

    #[test]
    fn float_arithmetic_rounds_per_width() {
        assert_eq!(
            eval(Opcode::Fadd, 32, &[f32_lit(1.5), f32_lit(2.25)]),
            f32_lit(3.75).bits
        );
        assert_eq!(eval(Opcode::Fneg, 16, &[lit(0x3c00, 16)]), 0xbc00);
        assert_eq!(eval(Opcode::Fabs, 32, &[f32_lit(-2.0)]), f32_lit(2.0).bits);
        // 2048 + 1 is not representable in binary16; ties to even
        assert_eq!(
            eval(Opcode::Fadd, 16, &[lit(0x6800, 16), lit(0x3c00, 16)]),
            0x6800
        );
    }

    #[test]
    fn booleans_and_comparisons() {
        assert_eq!(eval(Opcode::B2b32, 32, &[lit(1, 1)]), 0xffff_ffff);
        assert_eq!(eval(Opcode::B2b1, 1, &[lit(0xffff_ffff, 32)]), 1);
        assert_eq!(eval(Opcode::B2i32, 32, &[lit(1, 1)]), 1);
        assert_eq!(eval(Opcode::B2f16, 16, &[lit(1, 1)]), 0x3c00);
        assert_eq!(eval(Opcode::Ine, 1, &[lit(1, 32), lit(0, 32)]), 1);
        assert_eq!(eval(Opcode::Ilt, 1, &[lit(0x80, 8), lit(1, 8)]), 1);
        assert_eq!(eval(Opcode::Ult, 1, &[lit(0x80, 8), lit(1, 8)]), 0);
        let nan = f32_lit(f32::NAN);
        assert_eq!(eval(Opcode::Fneu, 1, &[nan, nan]), 1);
        assert_eq!(eval(Opcode::Feq, 1, &[nan, nan]), 0);
        assert_eq!(
            eval(Opcode::Bcsel, 16, &[lit(0, 1), lit(7, 16), lit(9, 16)]),
            9
        );
    }

    #[test]
    fn sinks_have_no_value() {
        assert_eq!(evaluate(Opcode::Store, 0, &[lit(1, 32)]), None);
    }

    #[test]
    fn floats_without_a_format_do_not_fold() {
        assert_eq!(evaluate(Opcode::F2u16, 16, &[lit(5, 8)]), None);
        assert_eq!(evaluate(Opcode::F2i32, 32, &[lit(1, 1)]), None);
        assert_eq!(evaluate(Opcode::Fadd, 8, &[lit(1, 8), lit(2, 8)]), None);
        assert_eq!(evaluate(Opcode::F2u16, 16, &[lit(0x4500, 16)]), Some(5));
    }
}
