//! Bit-width classes and raw literal encoding.

use half::f16;

/// The supported value widths.
pub const BIT_SIZES: [u8; 5] = [1, 8, 16, 32, 64];

/// Width class of a value, used to pick width-specialized rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BitClass {
    B1,
    B8,
    B16,
    B32,
    B64,
}

impl BitClass {
    pub const ALL: [BitClass; 5] = [
        BitClass::B1,
        BitClass::B8,
        BitClass::B16,
        BitClass::B32,
        BitClass::B64,
    ];
    pub const COUNT: usize = Self::ALL.len();

    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            1 => Some(BitClass::B1),
            8 => Some(BitClass::B8),
            16 => Some(BitClass::B16),
            32 => Some(BitClass::B32),
            64 => Some(BitClass::B64),
            _ => None,
        }
    }

    pub fn bits(self) -> u8 {
        BIT_SIZES[self.index()]
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

pub fn is_valid_bit_size(bits: u8) -> bool {
    BitClass::from_bits(bits).is_some()
}

/// Widths with a float format: binary16, binary32 and binary64.
pub fn is_float_bit_size(bits: u8) -> bool {
    matches!(bits, 16 | 32 | 64)
}

/// All-ones mask covering `bit_size` bits.
pub fn mask(bit_size: u8) -> u64 {
    if bit_size >= 64 {
        u64::MAX
    } else {
        (1u64 << bit_size) - 1
    }
}

/// Interpret the low `bit_size` bits as a two's complement integer.
pub fn sign_extend(bits: u64, bit_size: u8) -> i64 {
    debug_assert!(bit_size > 0 && bit_size <= 64);
    let shift = 64 - u32::from(bit_size);
    ((bits << shift) as i64) >> shift
}

/// Encode `value` as a float of the given width, rounding to nearest-even.
///
/// # Panics
///
/// Panics if `bit_size` is not 16, 32 or 64.
pub fn float_to_bits(value: f64, bit_size: u8) -> u64 {
    match bit_size {
        16 => u64::from(f16::from_f64(value).to_bits()),
        32 => u64::from((value as f32).to_bits()),
        64 => value.to_bits(),
        _ => panic!("float_to_bits: no {bit_size}-bit float format"),
    }
}

/// Decode the low `bit_size` bits as a float. Widening is exact.
///
/// # Panics
///
/// Panics if `bit_size` is not 16, 32 or 64.
pub fn bits_to_float(bits: u64, bit_size: u8) -> f64 {
    match bit_size {
        16 => f16::from_bits(bits as u16).to_f64(),
        32 => f64::from(f32::from_bits(bits as u32)),
        64 => f64::from_bits(bits),
        _ => panic!("bits_to_float: no {bit_size}-bit float format"),
    }
}

/// A literal's raw bits together with its width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Literal {
    pub bits: u64,
    pub bit_size: u8,
}

impl Literal {
    pub fn new(bits: u64, bit_size: u8) -> Self {
        Self {
            bits: bits & mask(bit_size),
            bit_size,
        }
    }

    pub fn as_u64(self) -> u64 {
        self.bits
    }

    pub fn as_i64(self) -> i64 {
        sign_extend(self.bits, self.bit_size)
    }

    pub fn as_f64(self) -> f64 {
        bits_to_float(self.bits, self.bit_size)
    }

    pub fn as_bool(self) -> bool {
        self.bits != 0
    }

    pub fn is_float_width(self) -> bool {
        is_float_bit_size(self.bit_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_and_sign_extension() {
        assert_eq!(mask(1), 1);
        assert_eq!(mask(8), 0xff);
        assert_eq!(mask(64), u64::MAX);
        assert_eq!(sign_extend(0xc8, 8), -56);
        assert_eq!(sign_extend(0x7f, 8), 127);
        assert_eq!(sign_extend(1, 1), -1);
        assert_eq!(Literal::new(0x1ff, 8).bits, 0xff);
    }

    #[test]
    fn float_encodings() {
        assert_eq!(float_to_bits(1.0, 16), 0x3c00);
        assert_eq!(float_to_bits(1.0, 32), 0x3f80_0000);
        assert_eq!(float_to_bits(255.0, 64), 0x406f_e000_0000_0000);
        assert_eq!(bits_to_float(0xfbff, 16), -65504.0);
        assert!(bits_to_float(0x7fc0_0000, 32).is_nan());
        assert_eq!(float_to_bits(-0.0, 16), 0x8000);
    }

    #[test]
    fn bit_classes() {
        assert_eq!(BitClass::from_bits(16), Some(BitClass::B16));
        assert_eq!(BitClass::from_bits(12), None);
        assert_eq!(BitClass::B64.bits(), 64);
        assert_eq!(BitClass::B1.index(), 0);
    }
}
