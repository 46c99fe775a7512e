//! Validated rule sets.
//!
//! [`RuleSet::load`] checks every invariant the matcher and builder rely on,
//! so they can index the table without further checks, and precomputes a
//! dense dispatch array plus the number of commutative nodes per search
//! pattern.

use std::ops::Range;

use algebraic_ir::{BitClass, Opcode, SourceWidth};

use crate::errors::{TableError, TableErrorKind, TableResult};
use crate::table::{
    ConstKind, ExpressionPredicate, MAX_COMMUTATIVE, MAX_VARIABLES, PerOp, RuleTable, Run,
    SearchOp, Transform, ValueSlot, VariablePredicate, Width,
};

/// A rule table that passed validation, ready for matching.
pub struct RuleSet {
    table: &'static RuleTable,
    dispatch: Box<[Option<&'static PerOp>]>,
    commutative_counts: Box<[u32]>,
}

impl RuleSet {
    pub fn load(table: &'static RuleTable) -> TableResult<RuleSet> {
        let error = |kind| TableError {
            table: table.name,
            kind,
        };
        validate_slots(table).map_err(error)?;
        let commutative_counts = validate_transforms(table).map_err(error)?;
        let dispatch = validate_dispatch(table).map_err(error)?;
        Ok(RuleSet {
            table,
            dispatch,
            commutative_counts,
        })
    }

    pub fn name(&self) -> &'static str {
        self.table.name
    }

    pub fn table(&self) -> &'static RuleTable {
        self.table
    }

    pub fn slot(&self, index: u16) -> &'static ValueSlot {
        &self.table.values[index as usize]
    }

    pub fn transform(&self, index: usize) -> &'static Transform {
        &self.table.transforms[index]
    }

    /// Number of commutative nodes in the search pattern of `transform`.
    pub fn commutative_count(&self, transform: usize) -> u32 {
        self.commutative_counts[transform]
    }

    pub fn conditions(&self) -> &'static [&'static str] {
        self.table.conditions
    }

    pub fn condition_index(&self, name: &str) -> Option<usize> {
        self.table.conditions.iter().position(|&c| c == name)
    }

    pub fn variable_predicate(&self, index: u16) -> VariablePredicate {
        self.table.variable_predicates[index as usize]
    }

    pub fn expression_predicate(&self, index: u16) -> ExpressionPredicate {
        self.table.expression_predicates[index as usize]
    }

    /// Indices of the transforms to try for an instruction, in authored
    /// order. Empty when the dispatch has no state for it.
    pub fn candidates(&self, opcode: Opcode, bit_size: u8) -> Range<usize> {
        let Some(entry) = self.dispatch[SearchOp::key_of(opcode).key_index()] else {
            return 0..0;
        };
        let compact = match &entry.filter {
            Some(filter) => match BitClass::from_bits(bit_size) {
                Some(class) => filter[class.index()],
                None => return 0..0,
            },
            None => 0,
        };
        let state = entry.table[compact as usize];
        run_range(self.table.runs[state as usize])
    }

    /// Commutative nodes in the pattern rooted at `slot`, counted per
    /// occurrence.
    pub fn count_commutative(&self, slot: u16) -> u32 {
        count_commutative(self.table, slot)
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field("name", &self.table.name)
            .field("values", &self.table.values.len())
            .field("transforms", &self.table.transforms.len())
            .finish()
    }
}

fn run_range(run: Run) -> Range<usize> {
    let start = run.offset as usize;
    start..start + run.len as usize
}

fn count_commutative(table: &RuleTable, slot: u16) -> u32 {
    match &table.values[slot as usize] {
        ValueSlot::Expression(e) => {
            let own = u32::from(e.commutative);
            own + e
                .children
                .iter()
                .map(|&child| count_commutative(table, child))
                .sum::<u32>()
        }
        ValueSlot::Variable(_) | ValueSlot::Constant(_) => 0,
    }
}

/// Set bit `i` for every variable index `i` reachable from `slot`.
fn collect_variables(table: &RuleTable, slot: u16, seen: &mut u32) {
    match &table.values[slot as usize] {
        ValueSlot::Variable(v) => *seen |= 1 << v.index,
        ValueSlot::Expression(e) => {
            for &child in e.children {
                collect_variables(table, child, seen);
            }
        }
        ValueSlot::Constant(_) => {}
    }
}

// ============================================================================
// Validation
// ============================================================================

fn check_width(slot: usize, width: Width) -> Result<(), TableErrorKind> {
    match width {
        Width::Bits(bits) if BitClass::from_bits(bits).is_none() => {
            Err(TableErrorKind::Width { slot, bits })
        }
        _ => Ok(()),
    }
}

fn validate_slots(table: &RuleTable) -> Result<(), TableErrorKind> {
    for (slot, value) in table.values.iter().enumerate() {
        match value {
            ValueSlot::Variable(v) => {
                if v.index as usize >= MAX_VARIABLES {
                    return Err(TableErrorKind::VariableIndex {
                        slot,
                        index: v.index,
                    });
                }
                if v.widths.is_empty() {
                    return Err(TableErrorKind::EmptyWidthMask { slot });
                }
                if let Some(index) = v.cond
                    && index as usize >= table.variable_predicates.len()
                {
                    return Err(TableErrorKind::Predicate { slot, index });
                }
            }
            ValueSlot::Constant(c) => {
                check_width(slot, c.width)?;
                if c.kind == ConstKind::Float
                    && let Width::Bits(bits) = c.width
                    && !matches!(bits, 16 | 32 | 64)
                {
                    return Err(TableErrorKind::Width { slot, bits });
                }
            }
            ValueSlot::Expression(e) => {
                check_width(slot, e.width)?;
                if let Width::Bits(bits) = e.width
                    && e.op.resolve(bits).is_none()
                {
                    return Err(TableErrorKind::NoSuchWidth {
                        slot,
                        op: e.op,
                        bits,
                    });
                }
                let expected = e.op.num_inputs();
                if e.children.len() != expected {
                    return Err(TableErrorKind::Arity {
                        slot,
                        op: e.op,
                        expected,
                        found: e.children.len(),
                    });
                }
                if let Some(&child) = e.children.iter().find(|&&c| c as usize >= slot) {
                    return Err(TableErrorKind::ChildOrder { slot, child });
                }
                if e.commutative && e.children.len() != 2 {
                    return Err(TableErrorKind::Commutative {
                        slot,
                        arity: e.children.len(),
                    });
                }
                if let Some(index) = e.cond
                    && index as usize >= table.expression_predicates.len()
                {
                    return Err(TableErrorKind::Predicate { slot, index });
                }
            }
        }
    }
    Ok(())
}

fn validate_transforms(table: &RuleTable) -> Result<Box<[u32]>, TableErrorKind> {
    let mut counts = Vec::with_capacity(table.transforms.len());

    for (transform, t) in table.transforms.iter().enumerate() {
        for slot in [t.search, t.replace] {
            if slot as usize >= table.values.len() {
                return Err(TableErrorKind::SlotIndex { transform, slot });
            }
        }
        match &table.values[t.search as usize] {
            ValueSlot::Expression(e) if e.op.fixed_width() != Some(0) => {}
            _ => {
                return Err(TableErrorKind::SearchRoot {
                    transform,
                    slot: t.search,
                });
            }
        }
        if t.condition != Transform::ALWAYS && t.condition as usize >= table.conditions.len() {
            return Err(TableErrorKind::Condition {
                transform,
                condition: t.condition,
            });
        }

        let mut bound = 0u32;
        collect_variables(table, t.search, &mut bound);
        let mut used = 0u32;
        collect_variables(table, t.replace, &mut used);
        let unbound = used & !bound;
        if unbound != 0 {
            return Err(TableErrorKind::UnboundVariable {
                transform,
                index: unbound.trailing_zeros() as u8,
            });
        }

        if let Some(slot) = unsized_replacement(table, t.replace, true) {
            return Err(TableErrorKind::UnknownWidth { transform, slot });
        }

        let count = count_commutative(table, t.search);
        if count > MAX_COMMUTATIVE {
            return Err(TableErrorKind::TooManyCommutative {
                transform,
                count,
                limit: MAX_COMMUTATIVE,
            });
        }
        counts.push(count);
    }

    Ok(counts.into_boxed_slice())
}

/// First slot of a replacement tree the builder could not give a width,
/// following the same inheritance: destination and fixed sources pass a
/// width down, the first `Paired` source and `Any` sources do not.
fn unsized_replacement(table: &RuleTable, slot: u16, inherited: bool) -> Option<u16> {
    match &table.values[slot as usize] {
        ValueSlot::Variable(_) => None,
        ValueSlot::Constant(c) => (c.width.bits().is_none() && !inherited).then_some(slot),
        ValueSlot::Expression(e) => {
            if e.width.bits().or(e.op.fixed_width()).is_none() && !inherited {
                return Some(slot);
            }
            let sizes = match e.op {
                SearchOp::Op(op) => op.info().input_sizes,
                SearchOp::Family(_) => [SourceWidth::Any; 3],
            };
            let mut paired = false;
            for (&child, size) in e.children.iter().zip(sizes) {
                let known = match size {
                    SourceWidth::Dest | SourceWidth::Fixed(_) => true,
                    SourceWidth::Paired => paired,
                    SourceWidth::Any => false,
                };
                if let Some(slot) = unsized_replacement(table, child, known) {
                    return Some(slot);
                }
                paired |= size == SourceWidth::Paired;
            }
            None
        }
    }
}

fn search_root(table: &RuleTable, transform: usize) -> (SearchOp, Option<u8>) {
    match &table.values[table.transforms[transform].search as usize] {
        ValueSlot::Expression(e) => (e.op, e.width.bits().or(e.op.fixed_width())),
        ValueSlot::Variable(_) | ValueSlot::Constant(_) => {
            unreachable!("search roots are checked before dispatch")
        }
    }
}

fn validate_dispatch(
    table: &'static RuleTable,
) -> Result<Box<[Option<&'static PerOp>]>, TableErrorKind> {
    if table.runs.first() != Some(&Run::EMPTY) {
        return Err(TableErrorKind::NonEmptyStateZero);
    }
    for (state, &run) in table.runs.iter().enumerate() {
        let end = run_range(run).end;
        if end > table.transforms.len() {
            return Err(TableErrorKind::RunBounds {
                state,
                end,
                len: table.transforms.len(),
            });
        }
    }

    let mut dense: Vec<Option<&'static PerOp>> = vec![None; SearchOp::KEY_COUNT];
    for entry in table.dispatch {
        let key = entry.key;
        let slot = &mut dense[key.key_index()];
        if slot.is_some() {
            return Err(TableErrorKind::DuplicateKey { key });
        }
        *slot = Some(entry);

        match &entry.filter {
            None if entry.table.len() != 1 => {
                return Err(TableErrorKind::UnfilteredTable {
                    key,
                    len: entry.table.len(),
                });
            }
            None => {}
            Some(filter) => {
                if let Some(&index) = filter
                    .iter()
                    .find(|&&index| index as usize >= entry.table.len())
                {
                    return Err(TableErrorKind::FilterIndex { key, index });
                }
            }
        }

        for &state in entry.table {
            let Some(&run) = table.runs.get(state as usize) else {
                return Err(TableErrorKind::StateIndex { key, state });
            };
            for transform in run_range(run) {
                let (root, _) = search_root(table, transform);
                if root.dispatch_key() != key {
                    return Err(TableErrorKind::MisroutedTransform {
                        key,
                        transform,
                        root,
                    });
                }
            }
        }

        if let Some(filter) = &entry.filter {
            for class in BitClass::ALL {
                let state = entry.table[filter[class.index()] as usize];
                for transform in run_range(table.runs[state as usize]) {
                    if let (_, Some(expected)) = search_root(table, transform)
                        && expected != class.bits()
                    {
                        return Err(TableErrorKind::CrossWidth {
                            key,
                            transform,
                            expected,
                            bits: class.bits(),
                        });
                    }
                }
            }
        }
    }

    Ok(dense.into_boxed_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{PerOp, ValueSlot, WidthMask};
    use crate::test_tables::NARROWING;
    use algebraic_ir::OpFamily;
    use Width::{Bits, Inherit};

    fn load_error(table: &'static RuleTable) -> TableErrorKind {
        RuleSet::load(table).expect_err("table should be rejected").kind
    }

    const fn table(
        values: &'static [ValueSlot],
        transforms: &'static [Transform],
        runs: &'static [Run],
        dispatch: &'static [PerOp],
    ) -> RuleTable {
        RuleTable {
            name: "broken",
            values,
            transforms,
            runs,
            dispatch,
            conditions: &[],
            variable_predicates: &[],
            expression_predicates: &[],
        }
    }

    static U2U16_OF_U2U8: [ValueSlot; 3] = [
        ValueSlot::variable(0, WidthMask::B16),
        ValueSlot::op(Opcode::U2u8, Bits(8), &[0]),
        ValueSlot::op(Opcode::U2u16, Bits(16), &[1]),
    ];

    #[test]
    fn fixture_table_loads() {
        let rules = RuleSet::load(&NARROWING).unwrap();
        assert_eq!(rules.name(), "narrowing");
        assert!(!rules.candidates(Opcode::U2u16, 16).is_empty());
        assert!(rules.candidates(Opcode::U2u64, 64).is_empty());
        assert!(!rules.candidates(Opcode::Fadd, 32).is_empty());
        assert!(rules.candidates(Opcode::Fmul, 32).is_empty());
    }

    #[test]
    fn candidates_follow_width_filter() {
        let rules = RuleSet::load(&NARROWING).unwrap();
        let for_16 = rules.candidates(Opcode::U2u16, 16);
        let for_32 = rules.candidates(Opcode::U2u32, 32);
        assert!(!for_16.is_empty() && !for_32.is_empty());
        assert_ne!(for_16, for_32);
    }

    #[test]
    fn rejects_child_after_parent() {
        static VALUES: [ValueSlot; 2] = [
            ValueSlot::op(Opcode::U2u8, Bits(8), &[1]),
            ValueSlot::variable(0, WidthMask::ANY),
        ];
        static TABLE: RuleTable = table(&VALUES, &[], &[Run::EMPTY], &[]);
        assert_eq!(
            load_error(&TABLE),
            TableErrorKind::ChildOrder { slot: 0, child: 1 }
        );
    }

    #[test]
    fn rejects_wrong_arity_and_width() {
        static ARITY: [ValueSlot; 2] = [
            ValueSlot::variable(0, WidthMask::ANY),
            ValueSlot::op(Opcode::Iand, Inherit, &[0]),
        ];
        static ARITY_TABLE: RuleTable = table(&ARITY, &[], &[Run::EMPTY], &[]);
        assert!(matches!(
            load_error(&ARITY_TABLE),
            TableErrorKind::Arity {
                expected: 2,
                found: 1,
                ..
            }
        ));

        static WIDTH: [ValueSlot; 2] = [
            ValueSlot::variable(0, WidthMask::ANY),
            ValueSlot::family(OpFamily::F2f, Bits(8), &[0]),
        ];
        static WIDTH_TABLE: RuleTable = table(&WIDTH, &[], &[Run::EMPTY], &[]);
        assert_eq!(
            load_error(&WIDTH_TABLE),
            TableErrorKind::NoSuchWidth {
                slot: 1,
                op: SearchOp::Family(OpFamily::F2f),
                bits: 8
            }
        );
    }

    #[test]
    fn rejects_unbound_replacement_variable() {
        static VALUES: [ValueSlot; 4] = [
            ValueSlot::variable(0, WidthMask::B16),
            ValueSlot::op(Opcode::U2u8, Bits(8), &[0]),
            ValueSlot::op(Opcode::U2u16, Bits(16), &[1]),
            ValueSlot::variable(1, WidthMask::B16),
        ];
        static TABLE: RuleTable = table(
            &VALUES,
            &[Transform::new(2, 3)],
            &[Run::EMPTY],
            &[],
        );
        assert_eq!(
            load_error(&TABLE),
            TableErrorKind::UnboundVariable {
                transform: 0,
                index: 1
            }
        );
    }

    #[test]
    fn rejects_replacement_constant_without_width() {
        // u2u16(u2u8(a)) => u2u16(7), the 7 sits under a conversion source
        static UNDER_CONVERSION: [ValueSlot; 5] = [
            ValueSlot::variable(0, WidthMask::B16),
            ValueSlot::op(Opcode::U2u8, Bits(8), &[0]),
            ValueSlot::op(Opcode::U2u16, Bits(16), &[1]),
            ValueSlot::int(Inherit, 7),
            ValueSlot::op(Opcode::U2u16, Bits(16), &[3]),
        ];
        static UNDER_CONVERSION_TABLE: RuleTable = table(
            &UNDER_CONVERSION,
            &[Transform::new(2, 4)],
            &[Run::EMPTY],
            &[],
        );
        assert_eq!(
            load_error(&UNDER_CONVERSION_TABLE),
            TableErrorKind::UnknownWidth {
                transform: 0,
                slot: 3
            }
        );

        // the first paired source decides the width of the second
        static PAIRED: [ValueSlot; 6] = [
            ValueSlot::variable(0, WidthMask::B16),
            ValueSlot::op(Opcode::U2u8, Bits(8), &[0]),
            ValueSlot::op(Opcode::U2u16, Bits(16), &[1]),
            ValueSlot::int(Inherit, 0),
            ValueSlot::op(Opcode::Ine, Bits(1), &[3, 0]),
            ValueSlot::op(Opcode::Ine, Bits(1), &[0, 3]),
        ];
        static CONSTANT_FIRST: RuleTable =
            table(&PAIRED, &[Transform::new(2, 4)], &[Run::EMPTY], &[]);
        static VARIABLE_FIRST: RuleTable =
            table(&PAIRED, &[Transform::new(2, 5)], &[Run::EMPTY], &[]);
        assert_eq!(
            load_error(&CONSTANT_FIRST),
            TableErrorKind::UnknownWidth {
                transform: 0,
                slot: 3
            }
        );
        assert!(RuleSet::load(&VARIABLE_FIRST).is_ok());
    }

    #[test]
    fn rejects_out_of_range_condition() {
        static TABLE: RuleTable = table(
            &U2U16_OF_U2U8,
            &[Transform::new(2, 0).when(0)],
            &[Run::EMPTY],
            &[],
        );
        assert_eq!(
            load_error(&TABLE),
            TableErrorKind::Condition {
                transform: 0,
                condition: 0
            }
        );
    }

    #[test]
    fn rejects_non_empty_state_zero() {
        static TABLE: RuleTable = table(
            &U2U16_OF_U2U8,
            &[Transform::new(2, 0)],
            &[Run::new(0, 1)],
            &[],
        );
        assert_eq!(load_error(&TABLE), TableErrorKind::NonEmptyStateZero);
    }

    #[test]
    fn rejects_misrouted_transform() {
        static TABLE: RuleTable = table(
            &U2U16_OF_U2U8,
            &[Transform::new(2, 0)],
            &[Run::EMPTY, Run::new(0, 1)],
            &[PerOp {
                key: SearchOp::Family(OpFamily::I2i),
                filter: None,
                table: &[1],
            }],
        );
        assert_eq!(
            load_error(&TABLE),
            TableErrorKind::MisroutedTransform {
                key: SearchOp::Family(OpFamily::I2i),
                transform: 0,
                root: SearchOp::Op(Opcode::U2u16),
            }
        );
    }

    #[test]
    fn rejects_cross_width_routing() {
        static TABLE: RuleTable = table(
            &U2U16_OF_U2U8,
            &[Transform::new(2, 0)],
            &[Run::EMPTY, Run::new(0, 1)],
            &[PerOp {
                key: SearchOp::Family(OpFamily::U2u),
                // 32-bit instructions routed to the 16-bit rule
                filter: Some([0, 0, 1, 1, 0]),
                table: &[0, 1],
            }],
        );
        assert_eq!(
            load_error(&TABLE),
            TableErrorKind::CrossWidth {
                key: SearchOp::Family(OpFamily::U2u),
                transform: 0,
                expected: 16,
                bits: 32,
            }
        );
    }

    #[test]
    fn rejects_bad_state_and_filter_indices() {
        static STATE: RuleTable = table(
            &U2U16_OF_U2U8,
            &[Transform::new(2, 0)],
            &[Run::EMPTY, Run::new(0, 1)],
            &[PerOp {
                key: SearchOp::Family(OpFamily::U2u),
                filter: None,
                table: &[7],
            }],
        );
        assert!(matches!(
            load_error(&STATE),
            TableErrorKind::StateIndex { state: 7, .. }
        ));

        static FILTER: RuleTable = table(
            &U2U16_OF_U2U8,
            &[Transform::new(2, 0)],
            &[Run::EMPTY, Run::new(0, 1)],
            &[PerOp {
                key: SearchOp::Family(OpFamily::U2u),
                filter: Some([0, 0, 2, 0, 0]),
                table: &[0, 1],
            }],
        );
        assert!(matches!(
            load_error(&FILTER),
            TableErrorKind::FilterIndex { index: 2, .. }
        ));
    }

    #[test]
    fn error_message_names_table() {
        static TABLE: RuleTable = table(&U2U16_OF_U2U8, &[], &[], &[]);
        let err = RuleSet::load(&TABLE).unwrap_err();
        assert_eq!(
            err.to_string(),
            "rule table `broken`: state 0 must be the empty run"
        );
    }
}
