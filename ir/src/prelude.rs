//! Common imports for working with tessera graphs.
//!
//! ```rust,ignore
//! use tessera_ir::prelude::*;
//! ```

pub use crate::computation::Computation;
pub use crate::element::{ElemValue, ElementType};
pub use crate::error::{Error, Result};
pub use crate::instruction::{Instruction, InstructionId};
pub use crate::literal::Literal;
pub use crate::module::{ComputationId, Module};
pub use crate::op::{
    BinaryOp, ConvDimensionNumbers, Op, OperandVec, PadDimension, PaddingConfig, UnaryOp, Window,
    WindowDimension,
};
pub use crate::shape::{Dims, Layout, Shape};
