//! Function: arena-based mutable SSA storage.
//!
//! All entities of a function (instructions, values, blocks) live in
//! `PrimaryMap`s owned by the [`Function`]. Operand lists use
//! `EntityList + ListPool` for compact storage, and every operand is
//! mirrored in a per-value use-chain so that replacing a value is a
//! walk over its uses rather than a scan of the function.

use std::collections::HashMap;

use cranelift_entity::{EntityList, ListPool, PrimaryMap, SecondaryMap};
use smallvec::SmallVec;

use crate::bits::{self, Literal};
use crate::opcode::{Opcode, TypeClass};
use crate::refs::*;

// ============================================================================
// Use-chain
// ============================================================================

/// A single use of a value: which instruction uses it, at which operand index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Use {
    pub user: InstRef,
    pub operand_index: u32,
}

// ============================================================================
// Entity data types
// ============================================================================

/// Data for a single instruction.
pub struct InstData {
    pub opcode: Opcode,
    /// Destination width; 0 for sinks.
    pub bit_size: u8,
    pub exact: bool,
    pub operands: EntityList<ValueRef>,
    pub result: Option<ValueRef>,
    pub parent_block: Option<BlockRef>,
}

/// Data for a single SSA value.
pub struct ValueData {
    pub def: ValueDef,
    pub bit_size: u8,
    /// Declared type class; only parameters carry one.
    pub class: Option<TypeClass>,
}

/// Data for a basic block.
#[derive(Default)]
pub struct BlockData {
    pub insts: SmallVec<[InstRef; 8]>,
}

// ============================================================================
// Function
// ============================================================================

/// An SSA function body.
///
/// Owns all IR entities and provides methods for creating, querying and
/// mutating them. Use-chains are maintained automatically, and literals
/// are interned by `(width, bits)`.
pub struct Function {
    name: String,
    params: Vec<ValueRef>,
    layout: Vec<BlockRef>,

    insts: PrimaryMap<InstRef, InstData>,
    values: PrimaryMap<ValueRef, ValueData>,
    blocks: PrimaryMap<BlockRef, BlockData>,

    /// Use-chain: for each value, the list of instructions that use it.
    uses: SecondaryMap<ValueRef, SmallVec<[Use; 2]>>,
    literals: HashMap<(u8, u64), ValueRef>,
    value_pool: ListPool<ValueRef>,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            layout: Vec::new(),
            insts: PrimaryMap::new(),
            values: PrimaryMap::new(),
            blocks: PrimaryMap::new(),
            uses: SecondaryMap::new(),
            literals: HashMap::new(),
            value_pool: ListPool::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ========================================================================
    // Parameters and literals
    // ========================================================================

    /// Append a parameter of the given width.
    ///
    /// # Panics
    ///
    /// Panics if `bit_size` is not a supported width.
    pub fn add_param(&mut self, bit_size: u8, class: Option<TypeClass>) -> ValueRef {
        assert!(
            bits::is_valid_bit_size(bit_size),
            "add_param: unsupported width {bit_size}"
        );
        let index = self.params.len() as u32;
        let v = self.values.push(ValueData {
            def: ValueDef::Param(index),
            bit_size,
            class,
        });
        self.params.push(v);
        v
    }

    pub fn params(&self) -> &[ValueRef] {
        &self.params
    }

    /// Get the literal value `bits` (masked to `bit_size`), creating it on
    /// first request.
    ///
    /// # Panics
    ///
    /// Panics if `bit_size` is not a supported width.
    pub fn literal(&mut self, bit_size: u8, bits: u64) -> ValueRef {
        assert!(
            bits::is_valid_bit_size(bit_size),
            "literal: unsupported width {bit_size}"
        );
        let bits = bits & bits::mask(bit_size);
        if let Some(&v) = self.literals.get(&(bit_size, bits)) {
            return v;
        }
        let v = self.values.push(ValueData {
            def: ValueDef::Literal(bits),
            bit_size,
            class: None,
        });
        self.literals.insert((bit_size, bits), v);
        v
    }

    // ========================================================================
    // Instruction
    // ========================================================================

    /// Create a detached instruction and allocate its result value.
    ///
    /// The operands are registered in the use-chain. Use [`push_inst`] or
    /// [`insert_inst_before`] to place it in a block.
    ///
    /// [`push_inst`]: Function::push_inst
    /// [`insert_inst_before`]: Function::insert_inst_before
    ///
    /// # Panics
    ///
    /// Panics if the operand count does not match the opcode's arity, or if
    /// `bit_size` contradicts the opcode's fixed destination width.
    pub fn create_inst(&mut self, opcode: Opcode, bit_size: u8, operands: &[ValueRef]) -> InstRef {
        let info = opcode.info();
        assert_eq!(
            operands.len(),
            info.num_inputs,
            "create_inst: {opcode} takes {} operand(s), got {}",
            info.num_inputs,
            operands.len(),
        );
        match info.output_size {
            Some(fixed) => assert_eq!(
                bit_size, fixed,
                "create_inst: {opcode} always produces {fixed} bits"
            ),
            None => assert!(
                bits::is_valid_bit_size(bit_size),
                "create_inst: unsupported width {bit_size} for {opcode}"
            ),
        }

        let operand_list = EntityList::from_slice(operands, &mut self.value_pool);
        let inst = self.insts.push(InstData {
            opcode,
            bit_size,
            exact: false,
            operands: operand_list,
            result: None,
            parent_block: None,
        });

        for (idx, &val) in operands.iter().enumerate() {
            self.uses[val].push(Use {
                user: inst,
                operand_index: idx as u32,
            });
        }

        if info.has_result() {
            let v = self.values.push(ValueData {
                def: ValueDef::Inst(inst),
                bit_size,
                class: None,
            });
            self.insts[inst].result = Some(v);
        }

        inst
    }

    /// Create an instruction and append it to `block`.
    pub fn append(
        &mut self,
        block: BlockRef,
        opcode: Opcode,
        bit_size: u8,
        operands: &[ValueRef],
    ) -> InstRef {
        let inst = self.create_inst(opcode, bit_size, operands);
        self.push_inst(block, inst);
        inst
    }

    pub fn inst(&self, inst: InstRef) -> &InstData {
        &self.insts[inst]
    }

    pub fn inst_opcode(&self, inst: InstRef) -> Opcode {
        self.insts[inst].opcode
    }

    pub fn inst_bit_size(&self, inst: InstRef) -> u8 {
        self.insts[inst].bit_size
    }

    pub fn inst_is_exact(&self, inst: InstRef) -> bool {
        self.insts[inst].exact
    }

    pub fn set_exact(&mut self, inst: InstRef, exact: bool) {
        self.insts[inst].exact = exact;
    }

    pub fn inst_operands(&self, inst: InstRef) -> &[ValueRef] {
        self.insts[inst].operands.as_slice(&self.value_pool)
    }

    pub fn inst_result(&self, inst: InstRef) -> Option<ValueRef> {
        self.insts[inst].result
    }

    pub fn is_attached(&self, inst: InstRef) -> bool {
        self.insts[inst].parent_block.is_some()
    }

    /// Remove an instruction, clearing its use-chain entries.
    ///
    /// Does NOT remove it from its block. Use `remove_inst_from_block` first.
    ///
    /// # Panics
    ///
    /// Panics if the instruction is still attached or its result still has
    /// uses, as that would leave dangling references.
    pub fn remove_inst(&mut self, inst: InstRef) {
        assert!(
            self.insts[inst].parent_block.is_none(),
            "remove_inst: {inst} is still attached to a block; \
             call remove_inst_from_block first",
        );
        if let Some(result) = self.insts[inst].result {
            assert!(
                self.uses[result].is_empty(),
                "remove_inst: result {result} still has {} use(s); \
                 replace all uses before removing the instruction",
                self.uses[result].len()
            );
        }

        let operands: SmallVec<[ValueRef; 4]> = self.inst_operands(inst).into();
        for (idx, &val) in operands.iter().enumerate() {
            self.uses[val].retain(|u| !(u.user == inst && u.operand_index == idx as u32));
        }
    }

    /// True if `inst` is pure and its result is unused.
    pub fn is_dead(&self, inst: InstRef) -> bool {
        let data = &self.insts[inst];
        data.opcode.is_pure() && data.result.is_some_and(|v| self.uses[v].is_empty())
    }

    /// Detach and remove `inst` if it is dead, then do the same for every
    /// operand-defining instruction that became dead as a consequence.
    ///
    /// Returns the number of removed instructions.
    pub fn erase_dead(&mut self, inst: InstRef) -> usize {
        let mut worklist: SmallVec<[InstRef; 8]> = SmallVec::new();
        worklist.push(inst);
        let mut erased = 0;

        while let Some(inst) = worklist.pop() {
            if !self.is_attached(inst) || !self.is_dead(inst) {
                continue;
            }
            let operands: SmallVec<[ValueRef; 4]> = self.inst_operands(inst).into();
            self.remove_inst_from_block(inst);
            self.remove_inst(inst);
            erased += 1;

            for v in operands {
                if let Some(def) = self.value_inst(v)
                    && self.is_dead(def)
                {
                    worklist.push(def);
                }
            }
        }

        erased
    }

    // ========================================================================
    // Value
    // ========================================================================

    /// Every value ever created, including literals and dead results.
    pub fn values(&self) -> impl Iterator<Item = ValueRef> + '_ {
        self.values.keys()
    }

    pub fn value(&self, v: ValueRef) -> &ValueData {
        &self.values[v]
    }

    pub fn value_def(&self, v: ValueRef) -> ValueDef {
        self.values[v].def
    }

    pub fn value_bit_size(&self, v: ValueRef) -> u8 {
        self.values[v].bit_size
    }

    /// The instruction defining `v`, if it is an instruction result.
    pub fn value_inst(&self, v: ValueRef) -> Option<InstRef> {
        match self.values[v].def {
            ValueDef::Inst(inst) => Some(inst),
            ValueDef::Param(_) | ValueDef::Literal(_) => None,
        }
    }

    pub fn is_literal(&self, v: ValueRef) -> bool {
        matches!(self.values[v].def, ValueDef::Literal(_))
    }

    pub fn literal_value(&self, v: ValueRef) -> Option<Literal> {
        let data = &self.values[v];
        match data.def {
            ValueDef::Literal(bits) => Some(Literal::new(bits, data.bit_size)),
            ValueDef::Param(_) | ValueDef::Inst(_) => None,
        }
    }

    /// Type class of a value: the defining opcode's output type, a
    /// parameter's declared class, or `None` for literals.
    pub fn value_type_class(&self, v: ValueRef) -> Option<TypeClass> {
        let data = &self.values[v];
        match data.def {
            ValueDef::Inst(inst) => Some(self.insts[inst].opcode.info().output_type),
            ValueDef::Param(_) => data.class,
            ValueDef::Literal(_) => None,
        }
    }

    // ========================================================================
    // Block
    // ========================================================================

    /// Create a new empty block at the end of the layout.
    pub fn create_block(&mut self) -> BlockRef {
        let block = self.blocks.push(BlockData::default());
        self.layout.push(block);
        block
    }

    /// Blocks in layout order.
    pub fn blocks(&self) -> &[BlockRef] {
        &self.layout
    }

    pub fn block_insts(&self, block: BlockRef) -> &[InstRef] {
        &self.blocks[block].insts
    }

    /// Attached instructions in layout order.
    pub fn insts(&self) -> impl Iterator<Item = InstRef> + '_ {
        self.layout
            .iter()
            .flat_map(|&b| self.blocks[b].insts.iter().copied())
    }

    /// Append an instruction to the end of a block.
    ///
    /// # Panics
    ///
    /// Panics if the instruction already belongs to a block.
    pub fn push_inst(&mut self, block: BlockRef, inst: InstRef) {
        assert!(
            self.insts[inst].parent_block.is_none(),
            "push_inst: {inst} already belongs to a block; remove it first",
        );
        self.insts[inst].parent_block = Some(block);
        self.blocks[block].insts.push(inst);
    }

    /// Insert an instruction immediately before `before`, in `before`'s block.
    ///
    /// # Panics
    ///
    /// Panics if the instruction already belongs to a block, or if `before`
    /// is not attached.
    pub fn insert_inst_before(&mut self, before: InstRef, inst: InstRef) {
        assert!(
            self.insts[inst].parent_block.is_none(),
            "insert_inst_before: {inst} already belongs to a block; remove it first",
        );
        let block = self.insts[before]
            .parent_block
            .expect("insert_inst_before: `before` is not attached to a block");
        let insts = &mut self.blocks[block].insts;
        let pos = insts
            .iter()
            .position(|&i| i == before)
            .expect("insert_inst_before: `before` not found in its block");
        insts.insert(pos, inst);
        self.insts[inst].parent_block = Some(block);
    }

    /// Detach an instruction from its block (does not destroy it).
    pub fn remove_inst_from_block(&mut self, inst: InstRef) {
        if let Some(block) = self.insts[inst].parent_block.take() {
            self.blocks[block].insts.retain(|i| *i != inst);
        }
    }

    // ========================================================================
    // Use-chain
    // ========================================================================

    pub fn uses(&self, v: ValueRef) -> &[Use] {
        &self.uses[v]
    }

    pub fn has_uses(&self, v: ValueRef) -> bool {
        !self.uses[v].is_empty()
    }

    pub fn use_count(&self, v: ValueRef) -> usize {
        self.uses[v].len()
    }

    /// Replace all uses of `old` with `new` in all instructions.
    ///
    /// Updates both operand lists and the use-chain.
    pub fn replace_all_uses(&mut self, old: ValueRef, new: ValueRef) {
        if old == new {
            return;
        }
        let old_uses = std::mem::take(&mut self.uses[old]);

        for u in &old_uses {
            let operands = &mut self.insts[u.user].operands;
            let slice = operands.as_mut_slice(&mut self.value_pool);
            debug_assert_eq!(slice[u.operand_index as usize], old);
            slice[u.operand_index as usize] = new;

            self.uses[new].push(*u);
        }
    }
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("params", &self.params.len())
            .field("insts", &self.insts().count())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Module
// ============================================================================

/// A named collection of functions.
#[derive(Debug, Default)]
pub struct Module {
    pub name: String,
    pub functions: Vec<Function>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: Vec::new(),
        }
    }

    pub fn push(&mut self, func: Function) {
        self.functions.push(func);
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `%1 = u2u8 %0; %2 = u2u16 %1; store %2`
    fn conversion_chain() -> (Function, [InstRef; 3]) {
        let mut func = Function::new("chain");
        let a = func.add_param(16, None);
        let block = func.create_block();
        let narrow = func.append(block, Opcode::U2u8, 8, &[a]);
        let narrow_v = func.inst_result(narrow).unwrap();
        let widen = func.append(block, Opcode::U2u16, 16, &[narrow_v]);
        let widen_v = func.inst_result(widen).unwrap();
        let store = func.append(block, Opcode::Store, 0, &[widen_v]);
        (func, [narrow, widen, store])
    }

    #[test]
    fn create_inst_and_read_back() {
        let (func, [narrow, _, store]) = conversion_chain();
        let a = func.params()[0];

        assert_eq!(func.inst_opcode(narrow), Opcode::U2u8);
        assert_eq!(func.inst_bit_size(narrow), 8);
        assert_eq!(func.inst_operands(narrow), &[a]);
        assert!(!func.inst_is_exact(narrow));
        let result = func.inst_result(narrow).unwrap();
        assert_eq!(func.value_def(result), ValueDef::Inst(narrow));
        assert_eq!(func.value_bit_size(result), 8);
        assert_eq!(func.value_type_class(result), Some(TypeClass::Uint));

        assert_eq!(func.inst_result(store), None);
        assert_eq!(func.insts().count(), 3);
    }

    #[test]
    fn use_chain_tracking() {
        let (func, [narrow, widen, _]) = conversion_chain();
        let a = func.params()[0];
        let narrow_v = func.inst_result(narrow).unwrap();

        assert_eq!(
            func.uses(a),
            &[Use {
                user: narrow,
                operand_index: 0
            }]
        );
        assert_eq!(
            func.uses(narrow_v),
            &[Use {
                user: widen,
                operand_index: 0
            }]
        );
    }

    #[test]
    #[should_panic(expected = "takes 2 operand(s)")]
    fn create_inst_checks_arity() {
        let mut func = Function::new("f");
        let a = func.add_param(32, None);
        func.create_inst(Opcode::Iand, 32, &[a]);
    }

    #[test]
    #[should_panic(expected = "always produces 8 bits")]
    fn create_inst_checks_fixed_width() {
        let mut func = Function::new("f");
        let a = func.add_param(32, None);
        func.create_inst(Opcode::U2u8, 16, &[a]);
    }

    #[test]
    fn debug_summarizes_the_body() {
        let (func, _) = conversion_chain();
        assert_eq!(
            format!("{func:?}"),
            r#"Function { name: "chain", params: 1, insts: 3, .. }"#
        );
    }

    #[test]
    fn literals_are_interned_and_masked() {
        let mut func = Function::new("f");
        let a = func.literal(8, 0x1ff);
        let b = func.literal(8, 0xff);
        let c = func.literal(16, 0xff);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(func.is_literal(a));
        assert_eq!(func.literal_value(a), Some(Literal::new(0xff, 8)));
        assert_eq!(func.value_type_class(a), None);
    }

    #[test]
    fn replace_all_uses_rewires_operands() {
        let (mut func, [narrow, widen, store]) = conversion_chain();
        let a = func.params()[0];
        let widen_v = func.inst_result(widen).unwrap();

        let masked = func.create_inst(Opcode::Iand, 16, &[a, a]);
        func.insert_inst_before(widen, masked);
        let masked_v = func.inst_result(masked).unwrap();

        func.replace_all_uses(widen_v, masked_v);
        assert!(!func.has_uses(widen_v));
        assert_eq!(func.inst_operands(store), &[masked_v]);
        assert_eq!(func.use_count(masked_v), 1);
        assert_eq!(func.block_insts(func.blocks()[0]), &[narrow, masked, widen, store]);
    }

    #[test]
    fn erase_dead_cascades_through_pure_operands() {
        let (mut func, [narrow, widen, store]) = conversion_chain();
        let a = func.params()[0];
        let widen_v = func.inst_result(widen).unwrap();

        let masked = func.create_inst(Opcode::Iand, 16, &[a, a]);
        func.insert_inst_before(widen, masked);
        let masked_v = func.inst_result(masked).unwrap();
        func.replace_all_uses(widen_v, masked_v);

        assert_eq!(func.erase_dead(widen), 2);
        assert!(!func.is_attached(widen));
        assert!(!func.is_attached(narrow));
        assert_eq!(func.block_insts(func.blocks()[0]), &[masked, store]);
        assert_eq!(func.use_count(a), 2);
    }

    #[test]
    fn erase_dead_keeps_live_and_impure_instructions() {
        let (mut func, [narrow, widen, store]) = conversion_chain();
        assert_eq!(func.erase_dead(narrow), 0);
        assert_eq!(func.erase_dead(widen), 0);
        assert_eq!(func.erase_dead(store), 0);
        assert_eq!(func.insts().count(), 3);
    }

    #[test]
    #[should_panic(expected = "still has 1 use(s)")]
    fn remove_inst_refuses_used_results() {
        let (mut func, [narrow, _, _]) = conversion_chain();
        func.remove_inst_from_block(narrow);
        func.remove_inst(narrow);
    }
}
