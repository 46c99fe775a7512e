//! Table-driven algebraic rewriting for [`algebraic_ir`] functions.
//!
//! A rule set is a static [`RuleTable`] compiled offline from
//! `search => replace` patterns. [`RuleSet::load`] validates it once;
//! [`AlgebraicPass`] then rewrites functions to a fixpoint:
//!
//! ```text
//! u2u16(u2u8(a@16))  =>  iand(a, 0xff)
//! ```
//!
//! Instructions are dispatched by operation and destination width to a run
//! of candidate transforms, matched with commutative operand swapping, and
//! replaced by freshly built values. Replacement operations over literals
//! are folded instead of emitted.

// === Rule tables ===
pub mod errors;
pub mod predicates;
pub mod rules;
pub mod table;

// === Rewriting ===
pub mod builder;
pub mod config;
pub mod fold;
pub mod matcher;
pub mod pass;

#[cfg(test)]
mod test_tables;

pub use config::PassConfig;
pub use errors::{ConfigError, TableError, TableErrorKind, TableResult};
pub use matcher::{Bindings, match_transform, match_value};
pub use pass::{AlgebraicPass, PassResult, optimize};
pub use rules::RuleSet;
pub use table::{
    ConstKind, ConstantSlot, ExpressionSlot, PerOp, RuleTable, Run, SearchOp, Transform,
    ValueSlot, VariableSlot, Width, WidthMask,
};
