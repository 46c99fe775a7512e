//! Structural validation of a [`Function`].
//!
//! Three kinds of checks:
//!
//! 1. **Definition before use**: every operand is a parameter, a literal,
//!    or the result of an attached instruction placed earlier in layout
//!    order.
//! 2. **Use-chain consistency**: the use-chains stored in the function
//!    exactly match the operands of the attached instructions.
//! 3. **Operand widths**: each operand satisfies its opcode's
//!    [`SourceWidth`] requirement, and float-typed operands and results
//!    are 16, 32 or 64 bits.

use std::collections::HashSet;
use std::fmt;

use derive_more::Display;

use crate::bits::is_float_bit_size;
use crate::function::Function;
use crate::opcode::{SourceWidth, TypeClass};
use crate::refs::{InstRef, ValueDef, ValueRef};

// ============================================================================
// Error types
// ============================================================================

#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum ValidationError {
    #[display("operand #{operand_index} of {inst} ({opcode}) uses {value} before its definition")]
    UseBeforeDef {
        inst: InstRef,
        opcode: &'static str,
        operand_index: usize,
        value: ValueRef,
    },
    #[display("operand #{operand_index} of {inst} uses {value} but no use-chain entry exists")]
    MissingUse {
        inst: InstRef,
        operand_index: u32,
        value: ValueRef,
    },
    #[display("use-chain of {value} lists operand #{operand_index} of {inst}, which is not a live use")]
    StaleUse {
        inst: InstRef,
        operand_index: u32,
        value: ValueRef,
    },
    #[display("operand #{operand_index} of {inst} ({opcode}) is {found} bits, expected {expected}")]
    WidthMismatch {
        inst: InstRef,
        opcode: &'static str,
        operand_index: usize,
        expected: u8,
        found: u8,
    },
    #[display("{what} of {inst} ({opcode}) is {bits} bits, which has no float format")]
    FloatWidth {
        inst: InstRef,
        opcode: &'static str,
        what: FloatSite,
        bits: u8,
    },
}

/// Where an unsupported float width appears.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum FloatSite {
    #[display("operand #{_0}")]
    Operand(usize),
    #[display("result")]
    Result,
}

/// Result of validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ok() {
            return write!(f, "validation passed");
        }
        writeln!(f, "{} error(s) found:", self.errors.len())?;
        for err in &self.errors {
            writeln!(f, "  - {err}")?;
        }
        Ok(())
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Run every check over `func`.
pub fn validate_function(func: &Function) -> ValidationResult {
    let mut result = ValidationResult::default();
    check_definitions_and_widths(func, &mut result.errors);
    check_use_chains(func, &mut result.errors);
    result
}

fn check_definitions_and_widths(func: &Function, errors: &mut Vec<ValidationError>) {
    let mut defined: HashSet<ValueRef> = func.params().iter().copied().collect();

    for inst in func.insts() {
        let data = func.inst(inst);
        let info = data.opcode.info();
        let mut paired: Option<u8> = None;

        if data.result.is_some()
            && info.output_type == TypeClass::Float
            && !is_float_bit_size(data.bit_size)
        {
            errors.push(ValidationError::FloatWidth {
                inst,
                opcode: data.opcode.name(),
                what: FloatSite::Result,
                bits: data.bit_size,
            });
        }

        for (idx, &v) in func.inst_operands(inst).iter().enumerate() {
            let visible = match func.value_def(v) {
                ValueDef::Literal(_) => true,
                ValueDef::Param(_) | ValueDef::Inst(_) => defined.contains(&v),
            };
            if !visible {
                errors.push(ValidationError::UseBeforeDef {
                    inst,
                    opcode: data.opcode.name(),
                    operand_index: idx,
                    value: v,
                });
            }

            let found = func.value_bit_size(v);
            if info.input_types[idx] == TypeClass::Float && !is_float_bit_size(found) {
                errors.push(ValidationError::FloatWidth {
                    inst,
                    opcode: data.opcode.name(),
                    what: FloatSite::Operand(idx),
                    bits: found,
                });
            }
            let expected = match info.input_sizes[idx] {
                SourceWidth::Dest => data.bit_size,
                SourceWidth::Fixed(bits) => bits,
                SourceWidth::Paired => *paired.get_or_insert(found),
                SourceWidth::Any => continue,
            };
            if found != expected {
                errors.push(ValidationError::WidthMismatch {
                    inst,
                    opcode: data.opcode.name(),
                    operand_index: idx,
                    expected,
                    found,
                });
            }
        }

        if let Some(result) = data.result {
            defined.insert(result);
        }
    }
}

fn check_use_chains(func: &Function, errors: &mut Vec<ValidationError>) {
    let mut actual: HashSet<(ValueRef, InstRef, u32)> = HashSet::new();
    for inst in func.insts() {
        for (idx, &v) in func.inst_operands(inst).iter().enumerate() {
            actual.insert((v, inst, idx as u32));
        }
    }

    // Direction 1: live operand -> use-chain entry must exist
    for &(value, inst, operand_index) in &actual {
        let found = func
            .uses(value)
            .iter()
            .any(|u| u.user == inst && u.operand_index == operand_index);
        if !found {
            errors.push(ValidationError::MissingUse {
                inst,
                operand_index,
                value,
            });
        }
    }

    // Direction 2: use-chain entry -> live operand must exist
    for value in func.values() {
        for u in func.uses(value) {
            if !actual.contains(&(value, u.user, u.operand_index)) {
                errors.push(ValidationError::StaleUse {
                    inst: u.user,
                    operand_index: u.operand_index,
                    value,
                });
            }
        }
    }
}
