//! Computations: arenas of instructions forming one dataflow graph.

use std::collections::{HashMap, HashSet};

use crate::error::{self, Result};
use crate::instruction::{Instruction, InstructionId};
use crate::op::Op;
use crate::shape::Shape;

/// A named, single-rooted dataflow graph. Instructions live in an id-keyed
/// arena; insertion order is tracked separately so traversals can snapshot
/// it and stay valid while the arena mutates underneath.
#[derive(Debug, Clone, Default)]
pub struct Computation {
    name: String,
    instructions: HashMap<InstructionId, Instruction>,
    order: Vec<InstructionId>,
    root: Option<InstructionId>,
}

impl Computation {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert a new instruction and return its freshly minted id.
    ///
    /// Operand references inside `op` must already resolve in this
    /// computation, which keeps the graph acyclic by construction.
    pub fn add(&mut self, op: Op, shape: Shape) -> InstructionId {
        debug_assert!(op.operands().iter().all(|id| self.instructions.contains_key(id)));
        let id = InstructionId::fresh();
        self.instructions.insert(id, Instruction::new(id, op, shape));
        self.order.push(id);
        id
    }

    pub fn instruction(&self, id: InstructionId) -> Result<&Instruction> {
        self.instructions
            .get(&id)
            .ok_or_else(|| error::UnknownInstructionSnafu { id, computation: self.name.clone() }.build())
    }

    pub fn get(&self, id: InstructionId) -> Option<&Instruction> {
        self.instructions.get(&id)
    }

    pub fn contains(&self, id: InstructionId) -> bool {
        self.instructions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn root(&self) -> Option<InstructionId> {
        self.root
    }

    pub fn root_instruction(&self) -> Result<&Instruction> {
        let id = self.root.ok_or_else(|| error::MissingRootSnafu { computation: self.name.clone() }.build())?;
        self.instruction(id)
    }

    pub fn set_root(&mut self, id: InstructionId) {
        debug_assert!(self.instructions.contains_key(&id));
        self.root = Some(id);
    }

    /// Insertion-ordered id snapshot, detached from the arena so callers can
    /// keep iterating while instructions are added or removed.
    pub fn snapshot_ids(&self) -> Vec<InstructionId> {
        self.order.clone()
    }

    /// Redirect every use of `old` to `new`, including the root. Returns the
    /// number of operand slots respliced.
    pub fn replace_all_uses(&mut self, old: InstructionId, new: InstructionId) -> usize {
        debug_assert_ne!(old, new);
        let mut spliced = 0;
        for instruction in self.instructions.values_mut() {
            instruction.op_mut().for_each_operand_mut(|slot| {
                if *slot == old {
                    *slot = new;
                    spliced += 1;
                }
            });
        }
        if self.root == Some(old) {
            self.root = Some(new);
        }
        spliced
    }

    /// Remove every instruction unreachable from the root. Parameters always
    /// survive. Returns the number of instructions removed; surviving ids
    /// are untouched.
    pub fn remove_unreachable(&mut self) -> usize {
        let Some(root) = self.root else { return 0 };
        let mut live: HashSet<InstructionId> = HashSet::with_capacity(self.instructions.len());
        let mut stack: Vec<InstructionId> =
            self.instructions.values().filter(|i| i.is_parameter()).map(|i| i.id()).collect();
        stack.push(root);
        while let Some(id) = stack.pop() {
            if !live.insert(id) {
                continue;
            }
            if let Some(instruction) = self.instructions.get(&id) {
                instruction.op().for_each_operand(|operand| {
                    if !live.contains(&operand) {
                        stack.push(operand);
                    }
                });
            }
        }
        let before = self.instructions.len();
        self.instructions.retain(|id, _| live.contains(id));
        self.order.retain(|id| live.contains(id));
        let removed = before - self.instructions.len();
        if removed > 0 {
            tracing::trace!(computation = %self.name, removed, "swept unreachable instructions");
        }
        removed
    }
}
