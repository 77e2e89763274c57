//! The rewrite-rule catalog.
//!
//! One module per rule family. Each rule inspects an instruction in its
//! owning computation and, on a match, inserts whatever replacement nodes it
//! needs and returns the id the original's uses should be respliced to.
//! Rules never splice uses themselves and never remove instructions; the
//! driver owns both.

pub(crate) mod algebra;
pub(crate) mod clamp;
pub(crate) mod convolution;
pub(crate) mod identity;
pub(crate) mod padding;
pub(crate) mod structural;
pub(crate) mod window;

use tessera_ir::{
    BinaryOp, Computation, Dims, ElemValue, InstructionId, Literal, Op, Shape, UnaryOp,
};

use crate::options::SimplifierOptions;

pub(crate) struct RewriteContext<'a> {
    pub options: &'a SimplifierOptions,
}

impl RewriteContext<'_> {
    pub fn layout_sensitive(&self) -> bool {
        self.options.is_layout_sensitive
    }
}

/// Try the catalog on one instruction. Returns the replacement id, if any.
pub(crate) fn simplify_instruction(
    comp: &mut Computation,
    id: InstructionId,
    cx: &RewriteContext,
) -> Option<InstructionId> {
    let op = comp.get(id)?.op().clone();
    match op {
        Op::Binary(binary, lhs, rhs) => {
            let family = match binary {
                BinaryOp::Maximum | BinaryOp::Minimum => clamp::simplify(comp, id, binary, lhs, rhs),
                _ => identity::simplify_binary(comp, id, binary, lhs, rhs, cx)
                    .or_else(|| algebra::simplify_binary(comp, id, binary, lhs, rhs)),
            };
            family.or_else(|| structural::commute_effectively_unary(comp, id, binary, lhs, rhs))
        }
        Op::Unary(unary, operand) => algebra::simplify_unary(comp, id, unary, operand),
        Op::Convert(operand) => identity::simplify_convert(comp, id, operand),
        Op::GetTupleElement { operand, index } => {
            identity::simplify_get_tuple_element(comp, operand, index)
        }
        Op::Copy(operand) => structural::simplify_copy(comp, id, operand, cx),
        Op::Reshape(operand) => structural::simplify_reshape(comp, id, operand, cx),
        Op::Transpose { operand, permutation } => {
            structural::simplify_transpose(comp, id, operand, &permutation, cx)
        }
        Op::Broadcast { operand, dimensions } => {
            structural::simplify_broadcast(comp, id, operand, &dimensions)
        }
        Op::Reverse { operand, dimensions } => {
            structural::simplify_reverse(comp, id, operand, &dimensions, cx)
        }
        Op::Slice { operand, starts, limits, strides } => {
            structural::simplify_slice(comp, id, operand, &starts, &limits, &strides, cx)
        }
        Op::Concatenate { operands, dimension } => {
            structural::simplify_concatenate(comp, id, &operands, dimension, cx)
        }
        Op::Pad { operand, value, config } => padding::simplify(comp, id, operand, value, &config, cx),
        Op::ReduceWindow { operand, init, window, reducer } => {
            window::fold_pad(comp, id, operand, init, &window, reducer)
        }
        Op::Convolution { input, filter, window, dim_numbers } => {
            convolution::to_dot(comp, id, input, filter, &window, &dim_numbers, cx)
        }
        _ => None,
    }
}

// =========================================================================
// Shared node builders
// =========================================================================

/// Shape of the instruction a rule is rewriting.
pub(crate) fn result_shape(comp: &Computation, id: InstructionId) -> Option<Shape> {
    Some(comp.get(id)?.shape().clone())
}

/// Shape of an elementwise op over the two operands: a scalar operand
/// assumes the other side's shape (implicit scalar broadcast).
pub(crate) fn elementwise_shape(
    comp: &Computation,
    lhs: InstructionId,
    rhs: InstructionId,
) -> Option<Shape> {
    let lhs_shape = comp.get(lhs)?.shape();
    if lhs_shape.is_scalar() {
        return Some(comp.get(rhs)?.shape().clone());
    }
    Some(lhs_shape.clone())
}

pub(crate) fn binary(
    comp: &mut Computation,
    op: BinaryOp,
    lhs: InstructionId,
    rhs: InstructionId,
) -> Option<InstructionId> {
    let shape = elementwise_shape(comp, lhs, rhs)?;
    Some(comp.add(Op::Binary(op, lhs, rhs), shape))
}

pub(crate) fn unary(comp: &mut Computation, op: UnaryOp, operand: InstructionId) -> Option<InstructionId> {
    let shape = comp.get(operand)?.shape().clone();
    Some(comp.add(Op::Unary(op, operand), shape))
}

/// The constant `k`, shaped like `shape`: a scalar literal, broadcast when
/// the target shape is not rank 0.
pub(crate) fn integer_constant_like(comp: &mut Computation, shape: &Shape, k: i64) -> InstructionId {
    let element_type = shape.element_type();
    let literal = Literal::scalar(ElemValue::from_integer(element_type, k));
    let scalar = comp.add(Op::Constant(literal), Shape::scalar(element_type));
    if shape.is_scalar() {
        return scalar;
    }
    comp.add(Op::Broadcast { operand: scalar, dimensions: Dims::new() }, shape.clone())
}
