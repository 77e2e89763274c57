//! Intermediate representation for the tessera tensor pipeline.
//!
//! The IR is an SSA dataflow graph: a [`Module`] owns computations, each
//! [`Computation`] owns an arena of [`Instruction`]s addressed by stable,
//! never-reused [`InstructionId`]s, and operands are non-owning id
//! references into the same arena. Transformation passes mutate
//! computations in place — splicing uses, adding replacement instructions,
//! and sweeping whatever becomes unreachable.
//!
//! # Module Organization
//!
//! - [`element`] - Element types and typed scalar values
//! - [`shape`] - Shapes and physical layouts
//! - [`literal`] - Constants
//! - [`op`] - The opcode enum and its attribute payloads
//! - [`instruction`], [`computation`], [`module`] - The arena graph
//! - [`error`] - Error types and result handling

pub mod computation;
pub mod element;
pub mod error;
pub mod instruction;
pub mod literal;
pub mod module;
pub mod op;
pub mod prelude;
pub mod shape;


pub use computation::Computation;
pub use element::{ElemValue, ElementType};
pub use error::{Error, Result};
pub use instruction::{Instruction, InstructionId};
pub use literal::Literal;
pub use module::{ComputationId, Module};
pub use op::{
    BinaryOp, ConvDimensionNumbers, Op, OperandVec, PadDimension, PaddingConfig, UnaryOp, Window,
    WindowDimension,
};
pub use shape::{Dims, Layout, Shape};
