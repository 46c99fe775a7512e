//! Compiled rule-table schema.
//!
//! A [`RuleTable`] is plain `static` data produced offline from a list of
//! `search => replace` patterns:
//!
//! - `values`: every pattern node as a [`ValueSlot`], addressed by index.
//!   Children always precede their parents, and slots are shared between
//!   the search and replace sides when they are identical.
//! - `transforms`: `(search, replace, condition)` triples, grouped so that
//!   each dispatch state owns one contiguous [`Run`] in authored order.
//! - `runs`: per dispatch state, the run of transforms to try. State 0 is
//!   always the empty run.
//! - `dispatch`: per root operation key, an optional width filter mapping
//!   a [`BitClass`] to a compact index, and a table mapping compact indices
//!   to states.
//!
//! Tables are validated once by [`RuleSet::load`](crate::RuleSet::load).

use std::fmt;

use algebraic_ir::{BitClass, Function, InstRef, OpFamily, Opcode, TypeClass, ValueRef};
use bitflags::bitflags;

/// Capacity of a match's variable bindings.
pub const MAX_VARIABLES: usize = 16;

/// Most commutative nodes a single search pattern may contain.
pub const MAX_COMMUTATIVE: u32 = 8;

// ============================================================================
// Operation keys
// ============================================================================

/// The operation of an expression slot: one opcode or a whole conversion
/// family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchOp {
    Op(Opcode),
    Family(OpFamily),
}

impl SearchOp {
    /// Number of distinct dispatch keys.
    pub const KEY_COUNT: usize = Opcode::COUNT + OpFamily::COUNT;

    /// Dispatch key of a concrete instruction: its family if it has one.
    pub fn key_of(opcode: Opcode) -> SearchOp {
        match opcode.family() {
            Some(family) => SearchOp::Family(family),
            None => SearchOp::Op(opcode),
        }
    }

    /// The key a pattern rooted at this operation is dispatched under.
    pub fn dispatch_key(self) -> SearchOp {
        match self {
            SearchOp::Op(op) => SearchOp::key_of(op),
            family => family,
        }
    }

    pub fn key_index(self) -> usize {
        match self {
            SearchOp::Op(op) => op.index(),
            SearchOp::Family(family) => Opcode::COUNT + family.index(),
        }
    }

    pub fn matches(self, opcode: Opcode) -> bool {
        match self {
            SearchOp::Op(op) => op == opcode,
            SearchOp::Family(family) => opcode.family() == Some(family),
        }
    }

    pub fn num_inputs(self) -> usize {
        match self {
            SearchOp::Op(op) => op.num_inputs(),
            SearchOp::Family(_) => 1,
        }
    }

    /// Destination width shared by every opcode this operation stands for.
    pub fn fixed_width(self) -> Option<u8> {
        match self {
            SearchOp::Op(op) => op.info().output_size,
            SearchOp::Family(_) => None,
        }
    }

    /// The concrete opcode producing `bits`-wide results.
    pub fn resolve(self, bits: u8) -> Option<Opcode> {
        match self {
            SearchOp::Op(op) => match op.info().output_size {
                Some(fixed) if fixed != bits => None,
                _ => Some(op),
            },
            SearchOp::Family(family) => family.with_bits(bits),
        }
    }
}

impl fmt::Display for SearchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOp::Op(op) => f.write_str(op.name()),
            SearchOp::Family(family) => f.write_str(family.name()),
        }
    }
}

// ============================================================================
// Widths
// ============================================================================

/// Declared width of a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Width {
    /// From the matched value (search) or the surrounding context (replace).
    Inherit,
    Bits(u8),
}

impl Width {
    pub fn bits(self) -> Option<u8> {
        match self {
            Width::Inherit => None,
            Width::Bits(bits) => Some(bits),
        }
    }
}

bitflags! {
    /// Widths a variable accepts.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct WidthMask: u8 {
        const B1 = 1 << 0;
        const B8 = 1 << 1;
        const B16 = 1 << 2;
        const B32 = 1 << 3;
        const B64 = 1 << 4;
    }
}

impl WidthMask {
    pub const ANY: WidthMask = WidthMask::all();

    /// The single-width mask for `bits`, empty for unsupported widths.
    pub fn of(bits: u8) -> WidthMask {
        match BitClass::from_bits(bits) {
            Some(class) => WidthMask::from_bits_retain(1 << class.index()),
            None => WidthMask::empty(),
        }
    }

    pub fn allows(self, bits: u8) -> bool {
        self.intersects(WidthMask::of(bits))
    }
}

// ============================================================================
// Value slots
// ============================================================================

/// A pattern variable. The same index always denotes the same value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariableSlot {
    pub index: u8,
    pub widths: WidthMask,
    /// Only literals may bind.
    pub is_constant: bool,
    pub class: Option<TypeClass>,
    /// Index into the table's variable predicates.
    pub cond: Option<u16>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConstKind {
    Int,
    /// `bits` holds an `f64`.
    Float,
    Bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConstantSlot {
    pub width: Width,
    pub kind: ConstKind,
    pub bits: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpressionSlot {
    pub op: SearchOp,
    pub width: Width,
    pub children: &'static [u16],
    /// The two sources may be matched in either order.
    pub commutative: bool,
    /// Only matches instructions that are not marked exact.
    pub inexact: bool,
    /// Built instructions are marked exact.
    pub exact: bool,
    /// Index into the table's expression predicates.
    pub cond: Option<u16>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueSlot {
    Variable(VariableSlot),
    Constant(ConstantSlot),
    Expression(ExpressionSlot),
}

impl ValueSlot {
    pub const fn variable(index: u8, widths: WidthMask) -> Self {
        ValueSlot::Variable(VariableSlot {
            index,
            widths,
            is_constant: false,
            class: None,
            cond: None,
        })
    }

    pub const fn int(width: Width, bits: u64) -> Self {
        ValueSlot::Constant(ConstantSlot {
            width,
            kind: ConstKind::Int,
            bits,
        })
    }

    pub const fn float(width: Width, value: f64) -> Self {
        ValueSlot::Constant(ConstantSlot {
            width,
            kind: ConstKind::Float,
            bits: value.to_bits(),
        })
    }

    pub const fn boolean(width: Width, value: bool) -> Self {
        ValueSlot::Constant(ConstantSlot {
            width,
            kind: ConstKind::Bool,
            bits: value as u64,
        })
    }

    pub const fn op(opcode: Opcode, width: Width, children: &'static [u16]) -> Self {
        Self::expression(SearchOp::Op(opcode), width, children)
    }

    pub const fn family(family: OpFamily, width: Width, children: &'static [u16]) -> Self {
        Self::expression(SearchOp::Family(family), width, children)
    }

    const fn expression(op: SearchOp, width: Width, children: &'static [u16]) -> Self {
        ValueSlot::Expression(ExpressionSlot {
            op,
            width,
            children,
            commutative: false,
            inexact: false,
            exact: false,
            cond: None,
        })
    }

    pub const fn commutative(self) -> Self {
        match self {
            ValueSlot::Expression(mut e) => {
                e.commutative = true;
                ValueSlot::Expression(e)
            }
            _ => panic!("only expressions can be commutative"),
        }
    }

    pub const fn inexact(self) -> Self {
        match self {
            ValueSlot::Expression(mut e) => {
                e.inexact = true;
                ValueSlot::Expression(e)
            }
            _ => panic!("only expressions can be inexact"),
        }
    }

    pub const fn exact(self) -> Self {
        match self {
            ValueSlot::Expression(mut e) => {
                e.exact = true;
                ValueSlot::Expression(e)
            }
            _ => panic!("only expressions can be exact"),
        }
    }

    /// Attach a predicate: a variable predicate for variables, an
    /// expression predicate for expressions.
    pub const fn with_cond(self, cond: u16) -> Self {
        match self {
            ValueSlot::Variable(mut v) => {
                v.cond = Some(cond);
                ValueSlot::Variable(v)
            }
            ValueSlot::Expression(mut e) => {
                e.cond = Some(cond);
                ValueSlot::Expression(e)
            }
            ValueSlot::Constant(_) => panic!("constants take no predicate"),
        }
    }

    pub const fn constant_only(self) -> Self {
        match self {
            ValueSlot::Variable(mut v) => {
                v.is_constant = true;
                ValueSlot::Variable(v)
            }
            _ => panic!("only variables can be constant-only"),
        }
    }

    pub const fn of_class(self, class: TypeClass) -> Self {
        match self {
            ValueSlot::Variable(mut v) => {
                v.class = Some(class);
                ValueSlot::Variable(v)
            }
            _ => panic!("only variables carry a type class"),
        }
    }
}

// ============================================================================
// Transforms, runs and dispatch
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transform {
    pub search: u16,
    pub replace: u16,
    /// Condition flag index, or [`Transform::ALWAYS`].
    pub condition: u16,
}

impl Transform {
    pub const ALWAYS: u16 = u16::MAX;

    pub const fn new(search: u16, replace: u16) -> Self {
        Self {
            search,
            replace,
            condition: Self::ALWAYS,
        }
    }

    pub const fn when(self, condition: u16) -> Self {
        Self { condition, ..self }
    }
}

/// The transforms of one dispatch state: `transforms[offset..offset + len]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    pub offset: u16,
    pub len: u16,
}

impl Run {
    pub const EMPTY: Run = Run { offset: 0, len: 0 };

    pub const fn new(offset: u16, len: u16) -> Self {
        Self { offset, len }
    }
}

/// Dispatch entry for one operation key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PerOp {
    pub key: SearchOp,
    /// Width class to compact index; without a filter the index is 0.
    pub filter: Option<[u16; BitClass::COUNT]>,
    /// Compact index to state.
    pub table: &'static [u16],
}

pub type VariablePredicate = fn(&Function, ValueRef) -> bool;
pub type ExpressionPredicate = fn(&Function, InstRef) -> bool;

/// A complete compiled rule table.
pub struct RuleTable {
    pub name: &'static str,
    pub values: &'static [ValueSlot],
    pub transforms: &'static [Transform],
    pub runs: &'static [Run],
    pub dispatch: &'static [PerOp],
    /// Names of the condition flags, by index.
    pub conditions: &'static [&'static str],
    pub variable_predicates: &'static [VariablePredicate],
    pub expression_predicates: &'static [ExpressionPredicate],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_keys_group_families() {
        assert_eq!(
            SearchOp::key_of(Opcode::U2u16),
            SearchOp::Family(OpFamily::U2u)
        );
        assert_eq!(
            SearchOp::key_of(Opcode::F2f16Rtz),
            SearchOp::Op(Opcode::F2f16Rtz)
        );
        assert_eq!(
            SearchOp::Op(Opcode::I2i8).dispatch_key(),
            SearchOp::Family(OpFamily::I2i)
        );
        assert_ne!(
            SearchOp::Op(Opcode::Store).key_index(),
            SearchOp::Family(OpFamily::I2i).key_index()
        );
        assert!(SearchOp::Family(OpFamily::B2b).matches(Opcode::B2b32));
        assert!(!SearchOp::Op(Opcode::B2b1).matches(Opcode::B2b32));
    }

    #[test]
    fn resolve_respects_fixed_widths() {
        assert_eq!(SearchOp::Op(Opcode::Iand).resolve(16), Some(Opcode::Iand));
        assert_eq!(SearchOp::Op(Opcode::U2u8).resolve(16), None);
        assert_eq!(
            SearchOp::Family(OpFamily::I2i).resolve(64),
            Some(Opcode::I2i64)
        );
    }

    #[test]
    fn width_masks() {
        let mask = WidthMask::B16 | WidthMask::B32;
        assert!(mask.allows(16));
        assert!(!mask.allows(8));
        assert!(!WidthMask::ANY.allows(12));
        assert_eq!(WidthMask::of(64), WidthMask::B64);
    }

    #[test]
    fn slot_modifiers() {
        const SLOT: ValueSlot = ValueSlot::op(Opcode::Iand, Width::Inherit, &[0, 1])
            .commutative()
            .with_cond(2);
        let ValueSlot::Expression(e) = SLOT else {
            panic!("expected an expression slot");
        };
        assert!(e.commutative);
        assert_eq!(e.cond, Some(2));

        let ValueSlot::Constant(c) = ValueSlot::float(Width::Bits(32), 255.0) else {
            panic!("expected a constant slot");
        };
        assert_eq!(c.bits, 0x406f_e000_0000_0000);
    }
}
