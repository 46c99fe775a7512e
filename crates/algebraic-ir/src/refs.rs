//! Entity references into a [`Function`](crate::Function).
//!
//! Each ref type is a thin `u32` wrapper providing type-safe indexing
//! into the function's `PrimaryMap` storage.

use cranelift_entity::entity_impl;
use std::fmt;

/// Reference to an instruction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstRef(u32);
entity_impl!(InstRef, "inst");

/// Reference to an SSA value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueRef(u32);
entity_impl!(ValueRef, "v");

/// Reference to a basic block.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockRef(u32);
entity_impl!(BlockRef, "block");

/// Where a value comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueDef {
    /// Function parameter at the given index.
    Param(u32),
    /// Result of an instruction.
    Inst(InstRef),
    /// Interned literal holding raw bits masked to the value's width.
    Literal(u64),
}

impl fmt::Display for ValueDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueDef::Param(idx) => write!(f, "param#{idx}"),
            ValueDef::Inst(inst) => write!(f, "{inst}"),
            ValueDef::Literal(bits) => write!(f, "{bits:#x}"),
        }
    }
}
