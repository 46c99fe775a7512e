//! The rewrite driver.
//!
//! [`AlgebraicPass`] sweeps every block of a function, dispatches each
//! instruction to the run of transforms for its operation and width, and
//! commits the first rule that matches. Each block is walked over a
//! snapshot of its instructions; instructions detached by an earlier
//! rewrite in the same sweep are skipped, and each instruction is rewritten
//! at most once per sweep. Sweeps repeat until one makes no change or the
//! iteration cap is reached.

use algebraic_ir::{BlockRef, Function, InstRef, Module};
use smallvec::{SmallVec, smallvec};
use tracing::{debug, trace, warn};

use crate::builder;
use crate::config::PassConfig;
use crate::errors::ConfigError;
use crate::matcher;
use crate::rules::RuleSet;
use crate::table::Transform;

/// Outcome of [`AlgebraicPass::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassResult {
    /// Number of sweeps performed.
    pub iterations: usize,
    /// Number of committed rewrites across all sweeps.
    pub rewrites: usize,
    /// Whether the last sweep made no change.
    pub reached_fixpoint: bool,
}

impl PassResult {
    pub fn changed(&self) -> bool {
        self.rewrites > 0
    }
}

/// A rule set together with condition flags and an iteration cap.
#[derive(Clone, Debug)]
pub struct AlgebraicPass<'r> {
    rules: &'r RuleSet,
    conditions: SmallVec<[bool; 8]>,
    max_iterations: usize,
}

impl<'r> AlgebraicPass<'r> {
    pub const DEFAULT_MAX_ITERATIONS: usize = 64;

    /// A pass with every condition flag off.
    pub fn new(rules: &'r RuleSet) -> Self {
        Self {
            rules,
            conditions: smallvec![false; rules.conditions().len()],
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn from_config(rules: &'r RuleSet, config: &PassConfig) -> Result<Self, ConfigError> {
        let mut pass = Self::new(rules).with_max_iterations(config.max_iterations);
        for (name, &enabled) in &config.conditions {
            pass = pass.with_condition(name, enabled)?;
        }
        Ok(pass)
    }

    /// Set the sweep cap; 0 restores the default.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = match max_iterations {
            0 => Self::DEFAULT_MAX_ITERATIONS,
            n => n,
        };
        self
    }

    pub fn with_condition(mut self, name: &str, enabled: bool) -> Result<Self, ConfigError> {
        let index =
            self.rules
                .condition_index(name)
                .ok_or_else(|| ConfigError::UnknownCondition {
                    table: self.rules.name(),
                    name: name.to_owned(),
                })?;
        self.conditions[index] = enabled;
        Ok(self)
    }

    /// # Panics
    ///
    /// Panics if `index` is not a condition of the rule set.
    pub fn set_condition(&mut self, index: usize, enabled: bool) {
        self.conditions[index] = enabled;
    }

    pub fn condition(&self, index: usize) -> bool {
        self.conditions[index]
    }

    pub fn rules(&self) -> &'r RuleSet {
        self.rules
    }

    /// Rewrite `func` until a sweep makes no change or the cap is hit.
    pub fn run(&self, func: &mut Function) -> PassResult {
        let mut iterations = 0;
        let mut rewrites = 0;

        for _ in 0..self.max_iterations {
            iterations += 1;
            let changes = self.sweep(func);
            rewrites += changes;
            if changes == 0 {
                return PassResult {
                    iterations,
                    rewrites,
                    reached_fixpoint: true,
                };
            }
        }

        warn!(
            "{}: @{} still changing after {} iterations",
            self.rules.name(),
            func.name(),
            self.max_iterations
        );
        PassResult {
            iterations,
            rewrites,
            reached_fixpoint: false,
        }
    }

    /// Run over every function of `module`. Returns whether any changed.
    pub fn run_module(&self, module: &mut Module) -> bool {
        let mut changed = false;
        for func in &mut module.functions {
            changed |= self.run(func).changed();
        }
        changed
    }

    fn sweep(&self, func: &mut Function) -> usize {
        let mut changes = 0;
        let blocks: SmallVec<[BlockRef; 4]> = func.blocks().into();
        for block in blocks {
            // Snapshot the instructions of this block
            let insts: Vec<InstRef> = func.block_insts(block).to_vec();
            for inst in insts {
                if !func.is_attached(inst) {
                    continue;
                }
                if self.rewrite(func, inst) {
                    changes += 1;
                }
            }
        }
        changes
    }

    /// Try the candidate transforms of `inst` in order; commit the first
    /// that matches.
    fn rewrite(&self, func: &mut Function, inst: InstRef) -> bool {
        let Some(result) = func.inst_result(inst) else {
            return false;
        };
        let opcode = func.inst_opcode(inst);
        let candidates = self.rules.candidates(opcode, func.inst_bit_size(inst));
        if candidates.is_empty() {
            trace!("{}: no rules for {} ({})", self.rules.name(), opcode, inst);
            return false;
        }

        for index in candidates {
            let transform = self.rules.transform(index);
            if transform.condition != Transform::ALWAYS
                && !self.conditions[transform.condition as usize]
            {
                continue;
            }
            let Some(bindings) = matcher::match_transform(self.rules, func, index, inst) else {
                continue;
            };

            let replacement = builder::build(self.rules, func, transform.replace, &bindings, inst);
            debug!(
                "{}: rule {} rewrote {} ({})",
                self.rules.name(),
                index,
                opcode,
                inst
            );
            func.replace_all_uses(result, replacement);
            func.erase_dead(inst);
            if let Some(built) = func.value_inst(replacement) {
                func.erase_dead(built);
            }
            return true;
        }
        false
    }
}

/// Run `rules` over `func` to a fixpoint with every condition off.
/// Returns whether anything changed.
pub fn optimize(rules: &RuleSet, func: &mut Function) -> bool {
    AlgebraicPass::new(rules).run(func).changed()
}
