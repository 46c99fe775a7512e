//! Arena-based SSA function model for the algebraic rewriting engine.
//!
//! A [`Function`] owns its instructions, values and blocks in
//! `cranelift-entity` arenas and keeps use-chains up to date, so a
//! rewriter can replace all uses of a value, insert instructions before
//! a given one and erase instructions that became dead. Literals are
//! values rather than instructions and are interned per function.

pub mod bits;
pub mod function;
pub mod opcode;
pub mod parser;
pub mod printer;
pub mod refs;
pub mod validation;

pub use bits::{BitClass, Literal};
pub use function::{BlockData, Function, InstData, Module, Use, ValueData};
pub use opcode::{OpFamily, OpInfo, Opcode, SourceWidth, TypeClass};
pub use parser::{ParseError, parse_function, parse_module, parse_test_function};
pub use printer::{print_function, print_module};
pub use refs::{BlockRef, InstRef, ValueDef, ValueRef};
pub use validation::{FloatSite, ValidationError, ValidationResult, validate_function};
