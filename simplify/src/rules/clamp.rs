//! Min/max chain recognition into `Clamp`.

use tessera_ir::{BinaryOp, Computation, InstructionId, Op};

use crate::reasoner::effective_constant;

/// `max(min(A, hi), lo) -> clamp(lo, A, hi)` and
/// `min(max(A, lo), hi) -> clamp(lo, A, hi)`.
///
/// Both bounds must be effective constants and `A` must not be one; a
/// non-constant bound, or anything between the min and the max, leaves the
/// chain alone.
pub(crate) fn simplify(
    comp: &mut Computation,
    id: InstructionId,
    outer: BinaryOp,
    lhs: InstructionId,
    rhs: InstructionId,
) -> Option<InstructionId> {
    let inner_kind = match outer {
        BinaryOp::Maximum => BinaryOp::Minimum,
        BinaryOp::Minimum => BinaryOp::Maximum,
        _ => return None,
    };
    let shape = comp.get(id)?.shape().clone();

    for (candidate, outer_bound) in [(lhs, rhs), (rhs, lhs)] {
        let (a, b) = match comp.get(candidate)?.op() {
            Op::Binary(kind, a, b) if *kind == inner_kind => (*a, *b),
            _ => continue,
        };
        if effective_constant(comp, outer_bound).is_none() {
            continue;
        }
        let (value, inner_bound) = match (
            effective_constant(comp, a).is_some(),
            effective_constant(comp, b).is_some(),
        ) {
            (false, true) => (a, b),
            (true, false) => (b, a),
            _ => continue,
        };
        let (min, max) = match outer {
            BinaryOp::Maximum => (outer_bound, inner_bound),
            _ => (inner_bound, outer_bound),
        };
        return Some(comp.add(Op::Clamp { min, operand: value, max }, shape));
    }
    None
}
