//! Text format printer.
//!
//! ```text
//! fn @chain(%0: 16) {
//!   %1: 8 = u2u8 %0
//!   %2: 16 = u2u16 %1
//!   store %2
//! }
//! ```
//!
//! Parameters carrying a declared type class print it as a prefix
//! (`%0: f32`). Literals print inline as `0xff:16`, exact instructions
//! carry a `!` after the opcode, and functions with more than one block
//! label each block as `^bbN:`.

use std::collections::HashMap;
use std::fmt;
use std::fmt::Write;

use crate::function::{Function, Module};
use crate::refs::*;

/// Print state for value numbering.
struct PrintState<'a> {
    func: &'a Function,
    value_names: HashMap<ValueRef, String>,
    next_value_num: usize,
}

impl<'a> PrintState<'a> {
    fn new(func: &'a Function) -> Self {
        Self {
            func,
            value_names: HashMap::new(),
            next_value_num: 0,
        }
    }

    fn assign_value_name(&mut self, v: ValueRef) -> String {
        let name = format!("%{}", self.next_value_num);
        self.next_value_num += 1;
        self.value_names.insert(v, name.clone());
        name
    }

    fn write_value(&self, f: &mut impl Write, v: ValueRef) -> fmt::Result {
        if let Some(lit) = self.func.literal_value(v) {
            return write!(f, "{:#x}:{}", lit.bits, lit.bit_size);
        }
        f.write_str(self.value_names.get(&v).map(|s| s.as_str()).unwrap_or("%?"))
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Print a function as IR text.
pub fn print_function(func: &Function) -> String {
    let mut out = String::new();
    write_function(&mut out, func).expect("fmt::Write to String never fails");
    out
}

/// Print every function of a module, separated by blank lines.
pub fn print_module(module: &Module) -> String {
    let mut out = String::new();
    for (i, func) in module.functions.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_function(&mut out, func).expect("fmt::Write to String never fails");
    }
    out
}

// ============================================================================
// Function printing
// ============================================================================

fn write_function(f: &mut impl Write, func: &Function) -> fmt::Result {
    let mut state = PrintState::new(func);

    write!(f, "fn @{}(", func.name())?;
    for (i, &param) in func.params().iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        let name = state.assign_value_name(param);
        let data = func.value(param);
        match data.class {
            Some(class) => write!(f, "{name}: {}{}", class.prefix(), data.bit_size)?,
            None => write!(f, "{name}: {}", data.bit_size)?,
        }
    }
    f.write_str(") {\n")?;

    let labelled = func.blocks().len() > 1;
    for (num, &block) in func.blocks().iter().enumerate() {
        if labelled {
            writeln!(f, "^bb{num}:")?;
        }
        for &inst in func.block_insts(block) {
            write_inst(&mut state, f, inst)?;
        }
    }

    f.write_str("}\n")
}

fn write_inst(state: &mut PrintState<'_>, f: &mut impl Write, inst: InstRef) -> fmt::Result {
    let func = state.func;
    let data = func.inst(inst);
    f.write_str("  ")?;

    if let Some(result) = data.result {
        let name = state.assign_value_name(result);
        write!(f, "{name}: {} = ", data.bit_size)?;
    }

    f.write_str(data.opcode.name())?;
    if data.exact {
        f.write_char('!')?;
    }

    for (i, &v) in func.inst_operands(inst).iter().enumerate() {
        f.write_str(if i == 0 { " " } else { ", " })?;
        state.write_value(f, v)?;
    }

    f.write_char('\n')
}
