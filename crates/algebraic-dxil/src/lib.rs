//! DXIL legalization passes built on [`algebraic`].
//!
//! DXIL has no 8-bit integers and only 1-bit booleans, so conversions
//! through those widths are rewritten into masks, shifts, clamps and
//! integer compares on widths DXIL does support:
//!
//! | Pass                 | Rewrites                                        |
//! |----------------------|-------------------------------------------------|
//! | [`lower_8bit_conv`]  | `x2y(x2y8(a))` chains                           |
//! | [`lower_16bit_conv`] | `x2y(x2y16(a))` chains, half-float packing      |
//! | [`algebraic`]        | `b2b32` and `b2b1`                              |
//!
//! Each pass owns one process-wide [`RuleSet`], validated on first use and
//! shared read-only across threads.

use algebraic::{AlgebraicPass, RuleSet};
use algebraic_ir::Module;
use tracing::debug;

pub mod tables;

/// Lower conversions through 8-bit intermediates. Returns whether any
/// function changed.
pub fn lower_8bit_conv(module: &mut Module) -> bool {
    run(tables::lower_8bit_conv::rules(), module)
}

/// Lower conversions through 16-bit intermediates. Returns whether any
/// function changed.
pub fn lower_16bit_conv(module: &mut Module) -> bool {
    run(tables::lower_16bit_conv::rules(), module)
}

/// Replace 32-bit and 1-bit boolean conversions. Returns whether any
/// function changed.
pub fn algebraic(module: &mut Module) -> bool {
    run(tables::algebraic::rules(), module)
}

/// Every rule set of this crate, in pass order.
pub fn rule_sets() -> [&'static RuleSet; 3] {
    [
        tables::lower_8bit_conv::rules(),
        tables::lower_16bit_conv::rules(),
        tables::algebraic::rules(),
    ]
}

fn run(rules: &'static RuleSet, module: &mut Module) -> bool {
    let changed = AlgebraicPass::new(rules).run_module(module);
    debug!("{}: module {} changed = {}", rules.name(), module.name, changed);
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use algebraic::SearchOp;
    use algebraic_ir::{OpFamily, Opcode};

    #[test]
    fn every_table_loads() {
        let names: Vec<_> = rule_sets().iter().map(|rules| rules.name()).collect();
        assert_eq!(names, ["lower_8bit_conv", "lower_16bit_conv", "algebraic"]);
        assert_eq!(tables::lower_8bit_conv::TABLE.transforms.len(), 120);
        assert_eq!(tables::lower_16bit_conv::TABLE.transforms.len(), 58);
        assert_eq!(tables::algebraic::TABLE.transforms.len(), 2);
    }

    #[test]
    fn narrowing_tables_dispatch_per_width() {
        let rules = tables::lower_8bit_conv::rules();
        for opcode in [Opcode::U2u16, Opcode::U2u32, Opcode::U2u64] {
            let bits = opcode.info().output_size.unwrap();
            assert_eq!(rules.candidates(opcode, bits).len(), 8, "{opcode}");
        }
        assert!(rules.candidates(Opcode::U2u8, 8).is_empty());
        assert!(rules.candidates(Opcode::Iand, 32).is_empty());
        assert_ne!(
            rules.candidates(Opcode::I2f16, 16),
            rules.candidates(Opcode::I2f32, 32)
        );

        let rules = tables::lower_16bit_conv::rules();
        assert!(rules.candidates(Opcode::U2u16, 16).is_empty());
        assert_eq!(rules.candidates(Opcode::U2u32, 32).len(), 7);
        assert_eq!(rules.candidates(Opcode::F2f32, 32).len(), 1);
        assert!(rules.candidates(Opcode::F2f16, 16).is_empty());
    }

    #[test]
    fn every_run_stays_within_its_key() {
        for rules in rule_sets() {
            for &opcode in Opcode::ALL {
                let Some(bits) = opcode.info().output_size else {
                    continue;
                };
                for index in rules.candidates(opcode, bits) {
                    let search = rules.transform(index).search;
                    let algebraic::ValueSlot::Expression(root) = rules.slot(search) else {
                        panic!("{}: transform {index} has no expression root", rules.name());
                    };
                    assert_eq!(root.op.dispatch_key(), SearchOp::key_of(opcode));
                    assert!(root.op.matches(opcode), "{} vs {opcode}", root.op);
                }
            }
        }
    }

    #[test]
    fn booleans_dispatch_by_width() {
        let rules = tables::algebraic::rules();
        assert_eq!(rules.candidates(Opcode::B2b1, 1).len(), 1);
        assert_eq!(rules.candidates(Opcode::B2b32, 32).len(), 1);
        assert_eq!(
            SearchOp::key_of(Opcode::B2b1),
            SearchOp::Family(OpFamily::B2b)
        );
    }
}
