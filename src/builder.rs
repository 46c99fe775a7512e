//! Materializing replacement patterns.
//!
//! [`build`] instantiates a replacement slot in post-order immediately
//! before the instruction being replaced. Widths marked inherit are taken
//! from the operation's fixed destination width, or else from what the
//! parent operation requires of that source. Operations whose sources are
//! all literals are folded into a literal instead of being emitted, and
//! repeated references to the same slot at the same width share one value.

use algebraic_ir::bits::float_to_bits;
use algebraic_ir::{Function, InstRef, Literal, Opcode, SourceWidth, ValueRef};
use smallvec::SmallVec;
use tracing::trace;

use crate::fold;
use crate::matcher::Bindings;
use crate::rules::RuleSet;
use crate::table::{ConstKind, ConstantSlot, ExpressionSlot, ValueSlot};

/// Build the replacement rooted at `slot` for the result of `cursor`.
///
/// New instructions are inserted before `cursor` and marked exact when
/// their slot is exact or `cursor` is.
///
/// # Panics
///
/// Panics if a variable of the replacement is unbound, or a width cannot
/// be inferred.
pub fn build(
    rules: &RuleSet,
    func: &mut Function,
    slot: u16,
    bindings: &Bindings,
    cursor: InstRef,
) -> ValueRef {
    let mut builder = Builder {
        rules,
        bindings,
        cursor,
        exact: func.inst_is_exact(cursor),
        built: SmallVec::new(),
    };
    let width = func.inst_bit_size(cursor);
    builder.value(func, slot, Some(width))
}

struct Builder<'a> {
    rules: &'a RuleSet,
    bindings: &'a Bindings,
    cursor: InstRef,
    exact: bool,
    /// `(slot, width, value)` of every expression built so far.
    built: SmallVec<[(u16, u8, ValueRef); 8]>,
}

impl Builder<'_> {
    fn value(&mut self, func: &mut Function, slot: u16, expected: Option<u8>) -> ValueRef {
        match self.rules.slot(slot) {
            ValueSlot::Variable(var) => self
                .bindings
                .get(var.index)
                .unwrap_or_else(|| panic!("build: variable {} is unbound", var.index)),
            ValueSlot::Constant(constant) => {
                let bits = constant
                    .width
                    .bits()
                    .or(expected)
                    .unwrap_or_else(|| panic!("build: no width for constant slot {slot}"));
                func.literal(bits, encode_constant(constant, bits))
            }
            ValueSlot::Expression(expr) => self.expression(func, slot, expr, expected),
        }
    }

    fn expression(
        &mut self,
        func: &mut Function,
        slot: u16,
        expr: &ExpressionSlot,
        expected: Option<u8>,
    ) -> ValueRef {
        let bits = expr
            .width
            .bits()
            .or(expr.op.fixed_width())
            .or(expected)
            .unwrap_or_else(|| panic!("build: no width for `{}` at slot {slot}", expr.op));
        let seen = self.built.iter().find(|&&(s, b, _)| s == slot && b == bits);
        if let Some(&(_, _, value)) = seen {
            return value;
        }
        let opcode = expr
            .op
            .resolve(bits)
            .unwrap_or_else(|| panic!("build: `{}` has no {bits}-bit form", expr.op));

        let info = opcode.info();
        let mut operands: SmallVec<[ValueRef; 3]> = SmallVec::new();
        let mut paired: Option<u8> = None;
        for (i, &child) in expr.children.iter().enumerate() {
            let child_width = match info.input_sizes[i] {
                SourceWidth::Dest => Some(bits),
                SourceWidth::Fixed(fixed) => Some(fixed),
                SourceWidth::Paired => paired,
                SourceWidth::Any => None,
            };
            let operand = self.value(func, child, child_width);
            if info.input_sizes[i] == SourceWidth::Paired {
                paired.get_or_insert(func.value_bit_size(operand));
            }
            operands.push(operand);
        }

        let value = match fold_literals(func, opcode, bits, &operands) {
            Some(value) => value,
            None => {
                let inst = func.create_inst(opcode, bits, &operands);
                func.set_exact(inst, expr.exact || self.exact);
                func.insert_inst_before(self.cursor, inst);
                func.inst_result(inst)
                    .expect("build: replacement operations produce a value")
            }
        };
        self.built.push((slot, bits, value));
        value
    }
}

fn encode_constant(constant: &ConstantSlot, bits: u8) -> u64 {
    match constant.kind {
        ConstKind::Int => constant.bits,
        ConstKind::Float => float_to_bits(f64::from_bits(constant.bits), bits),
        ConstKind::Bool => {
            if constant.bits != 0 {
                u64::MAX
            } else {
                0
            }
        }
    }
}

/// The literal result of `opcode` when every operand is a literal.
fn fold_literals(
    func: &mut Function,
    opcode: Opcode,
    bits: u8,
    operands: &[ValueRef],
) -> Option<ValueRef> {
    if !opcode.is_pure() {
        return None;
    }
    let literals = operands
        .iter()
        .map(|&v| func.literal_value(v))
        .collect::<Option<SmallVec<[Literal; 3]>>>()?;
    let raw = fold::evaluate(opcode, bits, &literals)?;
    trace!("build: folded {} to {:#x}:{}", opcode, raw, bits);
    Some(func.literal(bits, raw))
}
