//! Identity-element elimination and trivially removable ops.

use tessera_ir::{BinaryOp, Computation, InstructionId, Op};

use crate::reasoner::{is_all, shapes_match};

use super::RewriteContext;

/// `A + 0`, `A - 0`, `A * 1`, `A / 1`, `A ^ 1`. The identity element is
/// recognized as a literal or as a broadcast of one; the surviving operand
/// must already have the result's shape.
pub(crate) fn simplify_binary(
    comp: &mut Computation,
    id: InstructionId,
    binary: BinaryOp,
    lhs: InstructionId,
    rhs: InstructionId,
    cx: &RewriteContext,
) -> Option<InstructionId> {
    let shape = comp.get(id)?.shape().clone();
    let keep = |comp: &Computation, survivor: InstructionId| -> Option<InstructionId> {
        shapes_match(comp.get(survivor)?.shape(), &shape, cx.layout_sensitive()).then_some(survivor)
    };
    match binary {
        BinaryOp::Add => {
            if is_all(comp, rhs, 0) {
                return keep(comp, lhs);
            }
            if is_all(comp, lhs, 0) {
                return keep(comp, rhs);
            }
        }
        BinaryOp::Subtract => {
            if is_all(comp, rhs, 0) {
                return keep(comp, lhs);
            }
        }
        BinaryOp::Multiply => {
            if is_all(comp, rhs, 1) {
                return keep(comp, lhs);
            }
            if is_all(comp, lhs, 1) {
                return keep(comp, rhs);
            }
        }
        BinaryOp::Divide | BinaryOp::Power => {
            if is_all(comp, rhs, 1) {
                return keep(comp, lhs);
            }
        }
        _ => {}
    }
    None
}

/// `Convert` to the element type the operand already has.
pub(crate) fn simplify_convert(
    comp: &mut Computation,
    id: InstructionId,
    operand: InstructionId,
) -> Option<InstructionId> {
    let target = comp.get(id)?.shape().element_type();
    (comp.get(operand)?.shape().element_type() == target).then_some(operand)
}

/// `GetTupleElement(Tuple(...), i)` selects the i-th element directly.
pub(crate) fn simplify_get_tuple_element(
    comp: &mut Computation,
    operand: InstructionId,
    index: usize,
) -> Option<InstructionId> {
    match comp.get(operand)?.op() {
        Op::Tuple(elements) => elements.get(index).copied(),
        _ => None,
    }
}
