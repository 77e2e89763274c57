//! Windowed-reduction rules.

use tessera_ir::{Computation, ComputationId, InstructionId, Literal, Op, Window};

use crate::reasoner::effective_constant;

/// `reduce-window(pad(x, v), init)` absorbs the pad into the window's edge
/// padding when the pad has no interior padding, trims nothing, and pads
/// with exactly the reduction's init value.
pub(crate) fn fold_pad(
    comp: &mut Computation,
    id: InstructionId,
    operand: InstructionId,
    init: InstructionId,
    window: &Window,
    reducer: ComputationId,
) -> Option<InstructionId> {
    let shape = comp.get(id)?.shape().clone();
    let (padded, value, config) = match comp.get(operand)?.op() {
        Op::Pad { operand, value, config } => (*operand, *value, config.clone()),
        _ => return None,
    };
    if config.dims.iter().any(|d| d.interior != 0 || d.low < 0 || d.high < 0) {
        return None;
    }

    let pad_value = effective_constant(comp, value)?;
    let init_value: Literal = match comp.get(init)?.op() {
        Op::Constant(literal) => literal.clone(),
        _ => return None,
    };
    if pad_value != init_value {
        return None;
    }

    let mut folded = window.clone();
    for (wd, pd) in folded.dims.iter_mut().zip(&config.dims) {
        wd.padding_low += pd.low;
        wd.padding_high += pd.high;
    }
    Some(comp.add(Op::ReduceWindow { operand: padded, init, window: folded, reducer }, shape))
}
