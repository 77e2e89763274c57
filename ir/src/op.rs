//! Instruction opcodes and their attribute payloads.
//!
//! Operands are stored as [`InstructionId`] indices into the owning
//! computation's arena; `Op` itself owns only attributes (literals, padding
//! and window configs, dimension-index lists).

use smallvec::SmallVec;

use crate::instruction::InstructionId;
use crate::literal::Literal;
use crate::module::ComputationId;
use crate::shape::Dims;

/// Inline-capacity vector for operand id lists.
pub type OperandVec = SmallVec<[InstructionId; 2]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Negate,
    Exp,
    Log,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Maximum,
    Minimum,
}

/// Per-dimension edge padding. Low/high may be negative (trimming); interior
/// padding is inserted between elements and is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PadDimension {
    pub low: i64,
    pub high: i64,
    pub interior: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaddingConfig {
    pub dims: SmallVec<[PadDimension; 4]>,
}

impl PaddingConfig {
    pub fn no_padding(rank: usize) -> Self {
        Self { dims: SmallVec::from_elem(PadDimension::default(), rank) }
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn is_zero(&self) -> bool {
        self.dims.iter().all(|d| d.low == 0 && d.high == 0 && d.interior == 0)
    }

    pub fn has_negative(&self) -> bool {
        self.dims.iter().any(|d| d.low < 0 || d.high < 0)
    }
}

/// Per-dimension window description for windowed reductions and convolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDimension {
    pub size: usize,
    pub stride: usize,
    pub padding_low: i64,
    pub padding_high: i64,
    pub window_dilation: usize,
    pub base_dilation: usize,
}

impl WindowDimension {
    /// Unit window: size 1, stride 1, no padding, no dilation.
    pub fn trivial() -> Self {
        Self { size: 1, stride: 1, padding_low: 0, padding_high: 0, window_dilation: 1, base_dilation: 1 }
    }

    pub fn is_trivial(&self) -> bool {
        self.size == 1
            && self.stride == 1
            && self.padding_low == 0
            && self.padding_high == 0
            && self.window_dilation == 1
            && self.base_dilation == 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Window {
    pub dims: SmallVec<[WindowDimension; 4]>,
}

/// Maps logical roles (batch, feature, spatial) onto the dimension indices of
/// a convolution's input and filter shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvDimensionNumbers {
    pub input_batch: usize,
    pub input_feature: usize,
    pub input_spatial: SmallVec<[usize; 2]>,
    pub kernel_input_feature: usize,
    pub kernel_output_feature: usize,
    pub kernel_spatial: SmallVec<[usize; 2]>,
}

/// Tagged-variant opcode. Operand order within a variant is significant.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Parameter { index: usize, name: String },
    Constant(Literal),
    Unary(UnaryOp, InstructionId),
    Binary(BinaryOp, InstructionId, InstructionId),
    Convert(InstructionId),
    Copy(InstructionId),
    Bitcast(InstructionId),
    Broadcast { operand: InstructionId, dimensions: Dims },
    Reshape(InstructionId),
    Transpose { operand: InstructionId, permutation: Dims },
    Reverse { operand: InstructionId, dimensions: Dims },
    Slice { operand: InstructionId, starts: Dims, limits: Dims, strides: Dims },
    Pad { operand: InstructionId, value: InstructionId, config: PaddingConfig },
    Concatenate { operands: OperandVec, dimension: usize },
    Clamp { min: InstructionId, operand: InstructionId, max: InstructionId },
    Tuple(OperandVec),
    GetTupleElement { operand: InstructionId, index: usize },
    Dot { lhs: InstructionId, rhs: InstructionId },
    Convolution {
        input: InstructionId,
        filter: InstructionId,
        window: Window,
        dim_numbers: ConvDimensionNumbers,
    },
    ReduceWindow {
        operand: InstructionId,
        init: InstructionId,
        window: Window,
        reducer: ComputationId,
    },
    Call { operands: OperandVec, target: ComputationId },
}

impl Op {
    /// Operand ids in positional order.
    pub fn operands(&self) -> OperandVec {
        let mut out = OperandVec::new();
        self.for_each_operand(|id| out.push(id));
        out
    }

    pub fn for_each_operand(&self, mut f: impl FnMut(InstructionId)) {
        match self {
            Self::Parameter { .. } | Self::Constant(_) => {}
            Self::Unary(_, a)
            | Self::Convert(a)
            | Self::Copy(a)
            | Self::Bitcast(a)
            | Self::Reshape(a)
            | Self::Broadcast { operand: a, .. }
            | Self::Transpose { operand: a, .. }
            | Self::Reverse { operand: a, .. }
            | Self::Slice { operand: a, .. }
            | Self::GetTupleElement { operand: a, .. } => f(*a),
            Self::Binary(_, a, b) | Self::Dot { lhs: a, rhs: b } => {
                f(*a);
                f(*b);
            }
            Self::Pad { operand, value, .. } => {
                f(*operand);
                f(*value);
            }
            Self::Clamp { min, operand, max } => {
                f(*min);
                f(*operand);
                f(*max);
            }
            Self::Convolution { input, filter, .. } => {
                f(*input);
                f(*filter);
            }
            Self::ReduceWindow { operand, init, .. } => {
                f(*operand);
                f(*init);
            }
            Self::Concatenate { operands, .. } | Self::Tuple(operands) | Self::Call { operands, .. } => {
                for &id in operands {
                    f(id);
                }
            }
        }
    }

    /// Visit every operand slot mutably. Used by the driver to splice uses.
    pub fn for_each_operand_mut(&mut self, mut f: impl FnMut(&mut InstructionId)) {
        match self {
            Self::Parameter { .. } | Self::Constant(_) => {}
            Self::Unary(_, a)
            | Self::Convert(a)
            | Self::Copy(a)
            | Self::Bitcast(a)
            | Self::Reshape(a)
            | Self::Broadcast { operand: a, .. }
            | Self::Transpose { operand: a, .. }
            | Self::Reverse { operand: a, .. }
            | Self::Slice { operand: a, .. }
            | Self::GetTupleElement { operand: a, .. } => f(a),
            Self::Binary(_, a, b) | Self::Dot { lhs: a, rhs: b } => {
                f(a);
                f(b);
            }
            Self::Pad { operand, value, .. } => {
                f(operand);
                f(value);
            }
            Self::Clamp { min, operand, max } => {
                f(min);
                f(operand);
                f(max);
            }
            Self::Convolution { input, filter, .. } => {
                f(input);
                f(filter);
            }
            Self::ReduceWindow { operand, init, .. } => {
                f(operand);
                f(init);
            }
            Self::Concatenate { operands, .. } | Self::Tuple(operands) | Self::Call { operands, .. } => {
                for id in operands.iter_mut() {
                    f(id);
                }
            }
        }
    }

    /// Static name for logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parameter { .. } => "parameter",
            Self::Constant(_) => "constant",
            Self::Unary(UnaryOp::Negate, _) => "negate",
            Self::Unary(UnaryOp::Exp, _) => "exp",
            Self::Unary(UnaryOp::Log, _) => "log",
            Self::Binary(BinaryOp::Add, ..) => "add",
            Self::Binary(BinaryOp::Subtract, ..) => "subtract",
            Self::Binary(BinaryOp::Multiply, ..) => "multiply",
            Self::Binary(BinaryOp::Divide, ..) => "divide",
            Self::Binary(BinaryOp::Power, ..) => "power",
            Self::Binary(BinaryOp::Maximum, ..) => "maximum",
            Self::Binary(BinaryOp::Minimum, ..) => "minimum",
            Self::Convert(_) => "convert",
            Self::Copy(_) => "copy",
            Self::Bitcast(_) => "bitcast",
            Self::Broadcast { .. } => "broadcast",
            Self::Reshape(_) => "reshape",
            Self::Transpose { .. } => "transpose",
            Self::Reverse { .. } => "reverse",
            Self::Slice { .. } => "slice",
            Self::Pad { .. } => "pad",
            Self::Concatenate { .. } => "concatenate",
            Self::Clamp { .. } => "clamp",
            Self::Tuple(_) => "tuple",
            Self::GetTupleElement { .. } => "get-tuple-element",
            Self::Dot { .. } => "dot",
            Self::Convolution { .. } => "convolution",
            Self::ReduceWindow { .. } => "reduce-window",
            Self::Call { .. } => "call",
        }
    }
}
