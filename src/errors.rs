//! Error types for rule-table loading and pass configuration.

use derive_more::{Display, Error};

use crate::table::SearchOp;

pub type TableResult<T> = Result<T, TableError>;

/// A rule table violated one of its structural invariants.
#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
#[display("rule table `{table}`: {kind}")]
pub struct TableError {
    pub table: &'static str,
    pub kind: TableErrorKind,
}

#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum TableErrorKind {
    #[display("slot {slot}: child {child} does not precede it")]
    ChildOrder { slot: usize, child: u16 },

    #[display("slot {slot}: `{op}` takes {expected} source(s), the pattern has {found}")]
    Arity {
        slot: usize,
        op: SearchOp,
        expected: usize,
        found: usize,
    },

    #[display("slot {slot}: unsupported width {bits}")]
    Width { slot: usize, bits: u8 },

    #[display("slot {slot}: `{op}` has no {bits}-bit form")]
    NoSuchWidth { slot: usize, op: SearchOp, bits: u8 },

    #[display("slot {slot}: variable index {index} exceeds the binding capacity")]
    VariableIndex { slot: usize, index: u8 },

    #[display("slot {slot}: variable accepts no width")]
    EmptyWidthMask { slot: usize },

    #[display("slot {slot}: predicate {index} out of range")]
    Predicate { slot: usize, index: u16 },

    #[display("slot {slot}: commutative flag on a {arity}-source operation")]
    Commutative { slot: usize, arity: usize },

    #[display("transform {transform}: slot {slot} out of range")]
    SlotIndex { transform: usize, slot: u16 },

    #[display("transform {transform}: search root {slot} is not an expression with a result")]
    SearchRoot { transform: usize, slot: u16 },

    #[display("transform {transform}: condition {condition} out of range")]
    Condition { transform: usize, condition: u16 },

    #[display("transform {transform}: replacement uses variable {index} the search never binds")]
    UnboundVariable { transform: usize, index: u8 },

    #[display("transform {transform}: replacement slot {slot} has no width to build at")]
    UnknownWidth { transform: usize, slot: u16 },

    #[display("transform {transform}: {count} commutative nodes, at most {limit} supported")]
    TooManyCommutative {
        transform: usize,
        count: u32,
        limit: u32,
    },

    #[display("state 0 must be the empty run")]
    NonEmptyStateZero,

    #[display("run {state} ends at {end}, past {len} transforms")]
    RunBounds { state: usize, end: usize, len: usize },

    #[display("dispatch key `{key}` appears twice")]
    DuplicateKey { key: SearchOp },

    #[display("dispatch `{key}`: state {state} out of range")]
    StateIndex { key: SearchOp, state: u16 },

    #[display("dispatch `{key}`: filter index {index} out of range")]
    FilterIndex { key: SearchOp, index: u16 },

    #[display("dispatch `{key}`: an unfiltered table needs exactly one state, found {len}")]
    UnfilteredTable { key: SearchOp, len: usize },

    #[display("dispatch `{key}`: transform {transform} is rooted at `{root}`")]
    MisroutedTransform {
        key: SearchOp,
        transform: usize,
        root: SearchOp,
    },

    #[display(
        "dispatch `{key}`: transform {transform} matches {expected}-bit roots but is routed {bits}-bit instructions"
    )]
    CrossWidth {
        key: SearchOp,
        transform: usize,
        expected: u8,
        bits: u8,
    },
}

/// A pass configuration does not fit its rule set.
#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[display("rule set `{table}` has no condition named `{name}`")]
    UnknownCondition { table: &'static str, name: String },
}
