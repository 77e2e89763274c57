//! Instructions and their identities.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::op::Op;
use crate::shape::Shape;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Stable identity of an instruction. Ids are minted from a process-global
/// counter and never reused, including after the instruction is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstructionId(u64);

impl InstructionId {
    pub(crate) fn fresh() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstructionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// One node of the dataflow graph. The shape is fixed at construction; the
/// opcode's operand slots may be respliced by use replacement, but the
/// opcode itself never changes.
#[derive(Debug, Clone)]
pub struct Instruction {
    id: InstructionId,
    op: Op,
    shape: Shape,
}

impl Instruction {
    pub(crate) fn new(id: InstructionId, op: Op, shape: Shape) -> Self {
        Self { id, op, shape }
    }

    pub fn id(&self) -> InstructionId {
        self.id
    }

    pub fn op(&self) -> &Op {
        &self.op
    }

    pub(crate) fn op_mut(&mut self) -> &mut Op {
        &mut self.op
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self.op, Op::Parameter { .. })
    }
}
