//! Pad elimination and negative-padding normalization.

use smallvec::smallvec;
use tessera_ir::{Computation, Dims, InstructionId, Op, PadDimension, PaddingConfig, Shape};

use crate::reasoner::shapes_match;

use super::RewriteContext;

pub(crate) fn simplify(
    comp: &mut Computation,
    id: InstructionId,
    operand: InstructionId,
    value: InstructionId,
    config: &PaddingConfig,
    cx: &RewriteContext,
) -> Option<InstructionId> {
    let shape = comp.get(id)?.shape().clone();

    // A pad that pads nothing is the operand.
    if config.is_zero() {
        let operand_shape = comp.get(operand)?.shape();
        return shapes_match(operand_shape, &shape, cx.layout_sensitive()).then_some(operand);
    }

    if !config.has_negative() {
        return None;
    }

    // Negative edge padding trims the input. Normalize to a non-negative
    // pad followed by a slice selecting the surviving region; interior
    // padding stays on the pad.
    let operand_shape = comp.get(operand)?.shape().clone();
    let mut pad_config = PaddingConfig::default();
    let mut padded_dims = Dims::new();
    let mut starts = Dims::new();
    let mut limits = Dims::new();
    let strides: Dims = smallvec![1; shape.rank()];
    for (dim, pd) in config.dims.iter().enumerate() {
        let low = pd.low.max(0);
        let high = pd.high.max(0);
        pad_config.dims.push(PadDimension { low, high, interior: pd.interior });

        let base = operand_shape.dim(dim) as i64;
        let interior_span = if base == 0 { 0 } else { (base - 1) * pd.interior };
        padded_dims.push((low + high + base + interior_span) as usize);

        let start = low - pd.low;
        starts.push(start as usize);
        limits.push((start + shape.dim(dim) as i64) as usize);
    }

    let mut pad_shape = Shape::array(shape.element_type(), padded_dims);
    if let Some(layout) = operand_shape.layout() {
        pad_shape = pad_shape.with_layout(layout.clone()).ok()?;
    }
    let pad = comp.add(Op::Pad { operand, value, config: pad_config }, pad_shape);
    Some(comp.add(Op::Slice { operand: pad, starts, limits, strides }, shape))
}
