use smallvec::SmallVec;
use snafu::Snafu;

use crate::element::ElementType;
use crate::instruction::InstructionId;
use crate::module::ComputationId;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Layout is not a permutation of the shape's dimension indices.
    #[snafu(display("invalid layout {minor_to_major:?}: expected a permutation of 0..{rank}"))]
    InvalidLayout { minor_to_major: SmallVec<[usize; 4]>, rank: usize },

    /// Layout rank does not match the shape it is attached to.
    #[snafu(display("layout has {layout_rank} dimensions but shape {dims:?} has rank {shape_rank}"))]
    LayoutRankMismatch { layout_rank: usize, shape_rank: usize, dims: SmallVec<[usize; 4]> },

    /// Literal element count does not match its dimensions.
    #[snafu(display("literal holds {values} values but shape {dims:?} has {expected} elements"))]
    LiteralShape { values: usize, expected: usize, dims: SmallVec<[usize; 4]> },

    /// Literal mixes element types.
    #[snafu(display("literal element type mismatch: expected {expected:?}, got {actual:?}"))]
    LiteralElementType { expected: ElementType, actual: ElementType },

    /// Operand reference does not resolve in the owning computation.
    #[snafu(display("unknown instruction {id} in computation `{computation}`"))]
    UnknownInstruction { id: InstructionId, computation: String },

    /// Computation reference does not resolve in the owning module.
    #[snafu(display("unknown computation {id:?} in module `{module}`"))]
    UnknownComputation { id: ComputationId, module: String },

    /// Computation has no root instruction.
    #[snafu(display("computation `{computation}` has no root instruction"))]
    MissingRoot { computation: String },
}
