//! Opcode catalogue.
//!
//! Every opcode carries static [`OpInfo`]: arity, destination width,
//! per-source width requirement, type classes, commutativity and purity.
//! Conversions that differ only in their destination width belong to an
//! [`OpFamily`], so a rule can be written once for `u2u8..u2u64`.

use std::fmt;

// ============================================================================
// Type classes and source widths
// ============================================================================

/// How an operation interprets the bits of a source or destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeClass {
    Int,
    Uint,
    Float,
    Bool,
}

impl TypeClass {
    /// Single-letter prefix used by the text format (`i16`, `f32`, ...).
    pub fn prefix(self) -> char {
        match self {
            TypeClass::Int => 'i',
            TypeClass::Uint => 'u',
            TypeClass::Float => 'f',
            TypeClass::Bool => 'b',
        }
    }

    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            'i' => Some(TypeClass::Int),
            'u' => Some(TypeClass::Uint),
            'f' => Some(TypeClass::Float),
            'b' => Some(TypeClass::Bool),
            _ => None,
        }
    }
}

/// Width an operation requires of one of its sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceWidth {
    /// Same width as the destination.
    Dest,
    /// Same width as every other `Paired` source of the instruction.
    Paired,
    /// Any supported width.
    Any,
    /// Exactly this width.
    Fixed(u8),
}

/// Static description of an opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpInfo {
    pub num_inputs: usize,
    /// Fixed destination width; `None` when the instruction chooses it.
    /// Sinks without a result use `Some(0)`.
    pub output_size: Option<u8>,
    pub input_sizes: [SourceWidth; 3],
    pub output_type: TypeClass,
    pub input_types: [TypeClass; 3],
    pub commutative: bool,
    pub pure: bool,
}

impl OpInfo {
    pub fn has_result(&self) -> bool {
        self.output_size != Some(0)
    }
}

const fn convert(from: TypeClass, to: TypeClass, bits: u8) -> OpInfo {
    OpInfo {
        num_inputs: 1,
        output_size: Some(bits),
        input_sizes: [SourceWidth::Any; 3],
        output_type: to,
        input_types: [from; 3],
        commutative: false,
        pure: true,
    }
}

const fn unary(ty: TypeClass) -> OpInfo {
    OpInfo {
        num_inputs: 1,
        output_size: None,
        input_sizes: [SourceWidth::Dest; 3],
        output_type: ty,
        input_types: [ty; 3],
        commutative: false,
        pure: true,
    }
}

const fn binary(ty: TypeClass, commutative: bool) -> OpInfo {
    OpInfo {
        num_inputs: 2,
        output_size: None,
        input_sizes: [SourceWidth::Dest; 3],
        output_type: ty,
        input_types: [ty; 3],
        commutative,
        pure: true,
    }
}

const fn shift(ty: TypeClass) -> OpInfo {
    OpInfo {
        num_inputs: 2,
        output_size: None,
        input_sizes: [SourceWidth::Dest, SourceWidth::Fixed(32), SourceWidth::Any],
        output_type: ty,
        input_types: [ty, TypeClass::Uint, TypeClass::Uint],
        commutative: false,
        pure: true,
    }
}

const fn compare(ty: TypeClass, commutative: bool) -> OpInfo {
    OpInfo {
        num_inputs: 2,
        output_size: Some(1),
        input_sizes: [SourceWidth::Paired; 3],
        output_type: TypeClass::Bool,
        input_types: [ty; 3],
        commutative,
        pure: true,
    }
}

const BCSEL: OpInfo = OpInfo {
    num_inputs: 3,
    output_size: None,
    input_sizes: [SourceWidth::Fixed(1), SourceWidth::Dest, SourceWidth::Dest],
    output_type: TypeClass::Uint,
    input_types: [TypeClass::Bool, TypeClass::Uint, TypeClass::Uint],
    commutative: false,
    pure: true,
};

const PACK_HALF: OpInfo = OpInfo {
    num_inputs: 2,
    output_size: Some(32),
    input_sizes: [SourceWidth::Fixed(32); 3],
    output_type: TypeClass::Uint,
    input_types: [TypeClass::Float; 3],
    commutative: false,
    pure: true,
};

const UNPACK_HALF: OpInfo = OpInfo {
    num_inputs: 1,
    output_size: Some(32),
    input_sizes: [SourceWidth::Fixed(32); 3],
    output_type: TypeClass::Float,
    input_types: [TypeClass::Uint; 3],
    commutative: false,
    pure: true,
};

const STORE: OpInfo = OpInfo {
    num_inputs: 1,
    output_size: Some(0),
    input_sizes: [SourceWidth::Any; 3],
    output_type: TypeClass::Uint,
    input_types: [TypeClass::Uint; 3],
    commutative: false,
    pure: false,
};

// ============================================================================
// Conversion families
// ============================================================================

/// Conversions that differ only in destination width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OpFamily {
    I2i,
    U2u,
    F2f,
    F2u,
    F2i,
    U2f,
    I2f,
    B2b,
    B2i,
    B2f,
}

impl OpFamily {
    pub const ALL: [OpFamily; 10] = [
        OpFamily::I2i,
        OpFamily::U2u,
        OpFamily::F2f,
        OpFamily::F2u,
        OpFamily::F2i,
        OpFamily::U2f,
        OpFamily::I2f,
        OpFamily::B2b,
        OpFamily::B2i,
        OpFamily::B2f,
    ];
    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            OpFamily::I2i => "i2i",
            OpFamily::U2u => "u2u",
            OpFamily::F2f => "f2f",
            OpFamily::F2u => "f2u",
            OpFamily::F2i => "f2i",
            OpFamily::U2f => "u2f",
            OpFamily::I2f => "i2f",
            OpFamily::B2b => "b2b",
            OpFamily::B2i => "b2i",
            OpFamily::B2f => "b2f",
        }
    }

    /// The member of this family producing `bits`-wide results, if any.
    pub fn with_bits(self, bits: u8) -> Option<Opcode> {
        Opcode::ALL
            .iter()
            .copied()
            .find(|op| op.family() == Some(self) && op.info().output_size == Some(bits))
    }
}

impl fmt::Display for OpFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Opcodes
// ============================================================================

macro_rules! family_of {
    () => {
        None
    };
    ($family:ident) => {
        Some(OpFamily::$family)
    };
}

macro_rules! opcodes {
    ($( $variant:ident => $name:literal, $info:expr $(, in $family:ident)?; )*) => {
        /// An IR operation.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Opcode {
            $($variant,)*
        }

        impl Opcode {
            pub const ALL: &'static [Opcode] = &[$(Opcode::$variant,)*];
            pub const COUNT: usize = Self::ALL.len();

            /// Text-format name (`u2u16`, `f2f16_rtz`, ...).
            pub fn name(self) -> &'static str {
                match self {
                    $(Opcode::$variant => $name,)*
                }
            }

            pub fn info(self) -> &'static OpInfo {
                match self {
                    $(Opcode::$variant => {
                        const INFO: OpInfo = $info;
                        &INFO
                    })*
                }
            }

            /// Conversion family this opcode belongs to, if any.
            pub fn family(self) -> Option<OpFamily> {
                match self {
                    $(Opcode::$variant => family_of!($($family)?),)*
                }
            }
        }
    };
}

use TypeClass::{Bool, Float, Int, Uint};

opcodes! {
    I2i8 => "i2i8", convert(Int, Int, 8), in I2i;
    I2i16 => "i2i16", convert(Int, Int, 16), in I2i;
    I2i32 => "i2i32", convert(Int, Int, 32), in I2i;
    I2i64 => "i2i64", convert(Int, Int, 64), in I2i;
    U2u8 => "u2u8", convert(Uint, Uint, 8), in U2u;
    U2u16 => "u2u16", convert(Uint, Uint, 16), in U2u;
    U2u32 => "u2u32", convert(Uint, Uint, 32), in U2u;
    U2u64 => "u2u64", convert(Uint, Uint, 64), in U2u;
    F2f16 => "f2f16", convert(Float, Float, 16), in F2f;
    F2f32 => "f2f32", convert(Float, Float, 32), in F2f;
    F2f64 => "f2f64", convert(Float, Float, 64), in F2f;
    F2f16Rtz => "f2f16_rtz", convert(Float, Float, 16);
    F2u8 => "f2u8", convert(Float, Uint, 8), in F2u;
    F2u16 => "f2u16", convert(Float, Uint, 16), in F2u;
    F2u32 => "f2u32", convert(Float, Uint, 32), in F2u;
    F2u64 => "f2u64", convert(Float, Uint, 64), in F2u;
    F2i8 => "f2i8", convert(Float, Int, 8), in F2i;
    F2i16 => "f2i16", convert(Float, Int, 16), in F2i;
    F2i32 => "f2i32", convert(Float, Int, 32), in F2i;
    F2i64 => "f2i64", convert(Float, Int, 64), in F2i;
    U2f16 => "u2f16", convert(Uint, Float, 16), in U2f;
    U2f32 => "u2f32", convert(Uint, Float, 32), in U2f;
    U2f64 => "u2f64", convert(Uint, Float, 64), in U2f;
    I2f16 => "i2f16", convert(Int, Float, 16), in I2f;
    I2f32 => "i2f32", convert(Int, Float, 32), in I2f;
    I2f64 => "i2f64", convert(Int, Float, 64), in I2f;
    B2b1 => "b2b1", convert(Bool, Bool, 1), in B2b;
    B2b32 => "b2b32", convert(Bool, Bool, 32), in B2b;
    B2i8 => "b2i8", convert(Bool, Int, 8), in B2i;
    B2i16 => "b2i16", convert(Bool, Int, 16), in B2i;
    B2i32 => "b2i32", convert(Bool, Int, 32), in B2i;
    B2i64 => "b2i64", convert(Bool, Int, 64), in B2i;
    B2f16 => "b2f16", convert(Bool, Float, 16), in B2f;
    B2f32 => "b2f32", convert(Bool, Float, 32), in B2f;
    B2f64 => "b2f64", convert(Bool, Float, 64), in B2f;

    Iadd => "iadd", binary(Int, true);
    Isub => "isub", binary(Int, false);
    Imul => "imul", binary(Int, true);
    Ineg => "ineg", unary(Int);
    Iabs => "iabs", unary(Int);
    Iand => "iand", binary(Uint, true);
    Ior => "ior", binary(Uint, true);
    Ixor => "ixor", binary(Uint, true);
    Inot => "inot", unary(Uint);
    Ishl => "ishl", shift(Int);
    Ishr => "ishr", shift(Int);
    Ushr => "ushr", shift(Uint);
    Idiv => "idiv", binary(Int, false);
    Udiv => "udiv", binary(Uint, false);
    Irem => "irem", binary(Int, false);
    Umod => "umod", binary(Uint, false);
    Imin => "imin", binary(Int, true);
    Imax => "imax", binary(Int, true);
    Umin => "umin", binary(Uint, true);
    Umax => "umax", binary(Uint, true);

    Fadd => "fadd", binary(Float, true);
    Fsub => "fsub", binary(Float, false);
    Fmul => "fmul", binary(Float, true);
    Fdiv => "fdiv", binary(Float, false);
    Fneg => "fneg", unary(Float);
    Fabs => "fabs", unary(Float);
    Fmin => "fmin", binary(Float, true);
    Fmax => "fmax", binary(Float, true);

    Ieq => "ieq", compare(Int, true);
    Ine => "ine", compare(Int, true);
    Ilt => "ilt", compare(Int, false);
    Ige => "ige", compare(Int, false);
    Ult => "ult", compare(Uint, false);
    Uge => "uge", compare(Uint, false);
    Feq => "feq", compare(Float, true);
    Fneu => "fneu", compare(Float, true);
    Flt => "flt", compare(Float, false);
    Fge => "fge", compare(Float, false);

    Bcsel => "bcsel", BCSEL;
    PackHalf2x16Split => "pack_half_2x16_split", PACK_HALF;
    UnpackHalf2x16SplitX => "unpack_half_2x16_split_x", UNPACK_HALF;
    UnpackHalf2x16SplitY => "unpack_half_2x16_split_y", UNPACK_HALF;

    Store => "store", STORE;
}

impl Opcode {
    pub fn from_name(name: &str) -> Option<Opcode> {
        Opcode::ALL.iter().copied().find(|op| op.name() == name)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn num_inputs(self) -> usize {
        self.info().num_inputs
    }

    pub fn is_pure(self) -> bool {
        self.info().pure
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for &op in Opcode::ALL {
            assert_eq!(Opcode::from_name(op.name()), Some(op));
        }
        assert_eq!(Opcode::from_name("u2u7"), None);
    }

    #[test]
    fn family_members_resolve_by_width() {
        assert_eq!(OpFamily::U2u.with_bits(16), Some(Opcode::U2u16));
        assert_eq!(OpFamily::B2b.with_bits(32), Some(Opcode::B2b32));
        assert_eq!(OpFamily::F2f.with_bits(8), None);
        assert_eq!(Opcode::F2f16Rtz.family(), None);
        assert_eq!(OpFamily::F2f.with_bits(16), Some(Opcode::F2f16));
        for &family in &OpFamily::ALL {
            for &op in Opcode::ALL.iter().filter(|op| op.family() == Some(family)) {
                let bits = op.info().output_size.expect("conversions have a fixed width");
                assert_eq!(family.with_bits(bits), Some(op));
            }
        }
    }

    #[test]
    fn static_info() {
        let iand = Opcode::Iand.info();
        assert!(iand.commutative);
        assert_eq!(iand.num_inputs, 2);
        assert_eq!(iand.output_size, None);

        let ishl = Opcode::Ishl.info();
        assert_eq!(ishl.input_sizes[1], SourceWidth::Fixed(32));

        let ine = Opcode::Ine.info();
        assert_eq!(ine.output_size, Some(1));
        assert_eq!(ine.output_type, TypeClass::Bool);

        assert!(!Opcode::Store.is_pure());
        assert!(!Opcode::Store.info().has_result());
    }
}
