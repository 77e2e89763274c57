//! Structural folding: copy/reshape/transpose/broadcast chains, slices,
//! concatenations, and the layout-aware bitcast replacements.

use tessera_ir::{
    BinaryOp, Computation, Dims, InstructionId, Op, OperandVec, PaddingConfig, Shape,
};

use crate::reasoner::{
    is_identity_permutation, merge_permutations, only_degenerate_dims_differ, reshape_is_bitcast,
    scalar_broadcast_operand, scalar_like, shapes_match, transpose_is_bitcast, unmodified_dims,
};

use super::RewriteContext;

/// `Copy` is pure data movement: gone when layouts are irrelevant or
/// already agree, and `copy(copy(x))` collapses to one copy.
pub(crate) fn simplify_copy(
    comp: &mut Computation,
    id: InstructionId,
    operand: InstructionId,
    cx: &RewriteContext,
) -> Option<InstructionId> {
    let shape = comp.get(id)?.shape().clone();
    let operand_shape = comp.get(operand)?.shape().clone();
    if !cx.layout_sensitive() || shape == operand_shape {
        return Some(operand);
    }
    if let Op::Copy(inner) = comp.get(operand)?.op() {
        let inner = *inner;
        return Some(comp.add(Op::Copy(inner), shape));
    }
    None
}

pub(crate) fn simplify_reshape(
    comp: &mut Computation,
    id: InstructionId,
    operand: InstructionId,
    cx: &RewriteContext,
) -> Option<InstructionId> {
    let shape = comp.get(id)?.shape().clone();
    let operand_shape = comp.get(operand)?.shape().clone();

    if shapes_match(&operand_shape, &shape, cx.layout_sensitive()) {
        return Some(operand);
    }

    // reshape(reshape(x)) -> reshape(x)
    if let Op::Reshape(inner) = comp.get(operand)?.op() {
        let inner = *inner;
        return Some(comp.add(Op::Reshape(inner), shape));
    }

    // reshape of a broadcast scalar is just a differently shaped broadcast
    if let Some(scalar) = scalar_broadcast_operand(comp, operand) {
        return Some(comp.add(Op::Broadcast { operand: scalar, dimensions: Dims::new() }, shape));
    }

    if let Some(replacement) = fuse_reshape_of_broadcast(comp, &shape, operand) {
        return Some(replacement);
    }

    // A reshape that only inserts/removes unit dimensions without moving
    // data is free, when the backend agrees.
    if cx.layout_sensitive()
        && reshape_is_bitcast(&operand_shape, &shape)
        && (cx.options.valid_bitcast_callback)(&operand_shape, &shape)
    {
        return Some(comp.add(Op::Bitcast(operand), shape));
    }

    None
}

/// `reshape(broadcast(x))` becomes a broadcast straight to the reshaped
/// shape when every non-degenerate broadcast dimension is left intact by
/// the reshape. Degenerate source dimensions may land on any unused unit
/// dimension of the output.
fn fuse_reshape_of_broadcast(
    comp: &mut Computation,
    reshape_shape: &Shape,
    operand: InstructionId,
) -> Option<InstructionId> {
    let (source, bcast_dims) = match comp.get(operand)?.op() {
        Op::Broadcast { operand: source, dimensions } => (*source, dimensions.clone()),
        _ => return None,
    };
    let bcast_shape = comp.get(operand)?.shape().clone();
    let source_shape = comp.get(source)?.shape().clone();
    if source_shape.is_scalar() {
        return None;
    }

    let intact = unmodified_dims(bcast_shape.dims(), reshape_shape.dims());
    let mut mapping: Vec<Option<usize>> = vec![None; source_shape.rank()];
    let mut used = vec![false; reshape_shape.rank()];
    for (i, &bcast_dim) in bcast_dims.iter().enumerate() {
        if source_shape.dim(i) == 1 {
            continue;
        }
        let (_, to) = *intact.iter().find(|(from, _)| *from == bcast_dim)?;
        mapping[i] = Some(to);
        used[to] = true;
    }
    for slot in mapping.iter_mut().filter(|m| m.is_none()) {
        let free = (0..reshape_shape.rank()).find(|&d| reshape_shape.dim(d) == 1 && !used[d])?;
        *slot = Some(free);
        used[free] = true;
    }
    let dimensions: Dims = mapping.into_iter().flatten().collect();
    if !dimensions.windows(2).all(|w| w[0] < w[1]) {
        return None;
    }
    Some(comp.add(Op::Broadcast { operand: source, dimensions }, reshape_shape.clone()))
}

/// `broadcast(reshape(x))` where the reshape only shuffles unit dimensions
/// becomes a broadcast of `x` itself.
pub(crate) fn simplify_broadcast(
    comp: &mut Computation,
    id: InstructionId,
    operand: InstructionId,
    dimensions: &[usize],
) -> Option<InstructionId> {
    let shape = comp.get(id)?.shape().clone();
    let Op::Reshape(source) = comp.get(operand)?.op() else {
        return None;
    };
    let source = *source;
    let source_shape = comp.get(source)?.shape().clone();
    let reshaped = comp.get(operand)?.shape().clone();
    if source_shape.dims().contains(&1)
        || !only_degenerate_dims_differ(source_shape.dims(), reshaped.dims())
    {
        return None;
    }
    // Pair each source dimension with the matching non-unit reshaped
    // dimension, then read off where the broadcast sends it.
    let mut new_dims = Dims::new();
    let mut j = 0;
    for _ in 0..source_shape.rank() {
        while reshaped.dim(j) == 1 {
            j += 1;
        }
        new_dims.push(dimensions[j]);
        j += 1;
    }
    Some(comp.add(Op::Broadcast { operand: source, dimensions: new_dims }, shape))
}

pub(crate) fn simplify_transpose(
    comp: &mut Computation,
    id: InstructionId,
    operand: InstructionId,
    permutation: &[usize],
    cx: &RewriteContext,
) -> Option<InstructionId> {
    let shape = comp.get(id)?.shape().clone();
    let operand_shape = comp.get(operand)?.shape().clone();

    if is_identity_permutation(permutation)
        && shapes_match(&operand_shape, &shape, cx.layout_sensitive())
    {
        return Some(operand);
    }

    // transpose(transpose(x)) composes into one transpose
    if let Op::Transpose { operand: inner, permutation: inner_perm } = comp.get(operand)?.op() {
        let inner = *inner;
        let merged = merge_permutations(inner_perm, permutation);
        return Some(comp.add(Op::Transpose { operand: inner, permutation: merged }, shape));
    }

    // transposing a broadcast scalar permutes nothing observable
    if let Some(scalar) = scalar_broadcast_operand(comp, operand) {
        return Some(comp.add(Op::Broadcast { operand: scalar, dimensions: Dims::new() }, shape));
    }

    if cx.layout_sensitive()
        && transpose_is_bitcast(&operand_shape, &shape, permutation)
        && (cx.options.valid_bitcast_callback)(&operand_shape, &shape)
    {
        return Some(comp.add(Op::Bitcast(operand), shape));
    }

    None
}

/// Reversing dimensions of size 1 reorders nothing.
pub(crate) fn simplify_reverse(
    comp: &mut Computation,
    id: InstructionId,
    operand: InstructionId,
    dimensions: &[usize],
    cx: &RewriteContext,
) -> Option<InstructionId> {
    let shape = comp.get(id)?.shape().clone();
    if !dimensions.iter().all(|&d| shape.dim(d) == 1) {
        return None;
    }
    let operand_shape = comp.get(operand)?.shape().clone();
    if shapes_match(&operand_shape, &shape, cx.layout_sensitive()) {
        return Some(operand);
    }
    if cx.layout_sensitive() && (cx.options.valid_bitcast_callback)(&operand_shape, &shape) {
        return Some(comp.add(Op::Bitcast(operand), shape));
    }
    None
}

pub(crate) fn simplify_slice(
    comp: &mut Computation,
    id: InstructionId,
    operand: InstructionId,
    starts: &[usize],
    limits: &[usize],
    strides: &[usize],
    cx: &RewriteContext,
) -> Option<InstructionId> {
    let shape = comp.get(id)?.shape().clone();
    let operand_shape = comp.get(operand)?.shape().clone();

    let covers_everything = starts.iter().all(|&s| s == 0)
        && limits == operand_shape.dims()
        && strides.iter().all(|&s| s == 1);
    if covers_everything && shapes_match(&operand_shape, &shape, cx.layout_sensitive()) {
        return Some(operand);
    }

    // slicing a broadcast scalar is a smaller broadcast of the same scalar
    if let Some(scalar) = scalar_broadcast_operand(comp, operand) {
        return Some(comp.add(Op::Broadcast { operand: scalar, dimensions: Dims::new() }, shape));
    }

    None
}

pub(crate) fn simplify_concatenate(
    comp: &mut Computation,
    id: InstructionId,
    operands: &[InstructionId],
    dimension: usize,
    cx: &RewriteContext,
) -> Option<InstructionId> {
    let shape = comp.get(id)?.shape().clone();
    let matches_result = |comp: &Computation, candidate: InstructionId| -> Option<bool> {
        Some(shapes_match(comp.get(candidate)?.shape(), &shape, cx.layout_sensitive()))
    };

    if let [only] = operands {
        return matches_result(comp, *only)?.then_some(*only);
    }

    // Zero-element operands contribute nothing.
    let mut filtered = OperandVec::new();
    for &operand in operands {
        if !comp.get(operand)?.shape().is_empty() {
            filtered.push(operand);
        }
    }
    if filtered.len() < operands.len() {
        return match filtered.as_slice() {
            // Everything is empty, so the result is too; any operand with
            // the result's shape stands in for it.
            [] => matches_result(comp, operands[0])?.then_some(operands[0]),
            [survivor] => matches_result(comp, *survivor)?.then_some(*survivor),
            _ => Some(comp.add(Op::Concatenate { operands: filtered, dimension }, shape)),
        };
    }

    // concat(broadcast(scalar), x) pads x at the front; mirrored at the back.
    if let [first, second] = operands {
        for (&bcast, &other, at_front) in [(first, second, true), (second, first, false)] {
            let Some(scalar) = scalar_broadcast_operand(comp, bcast) else {
                continue;
            };
            let extent = comp.get(bcast)?.shape().dim(dimension) as i64;
            let mut config = PaddingConfig::no_padding(shape.rank());
            if at_front {
                config.dims[dimension].low = extent;
            } else {
                config.dims[dimension].high = extent;
            }
            return Some(comp.add(Op::Pad { operand: other, value: scalar, config }, shape));
        }
    }

    None
}

/// A binary op that is effectively unary (its other side is a scalar or a
/// scalar broadcast) commutes with a `Reshape` on the data side, moving the
/// reshape outward where it can meet further structural rules.
pub(crate) fn commute_effectively_unary(
    comp: &mut Computation,
    id: InstructionId,
    binary: BinaryOp,
    lhs: InstructionId,
    rhs: InstructionId,
) -> Option<InstructionId> {
    let shape = comp.get(id)?.shape().clone();
    if shape.is_scalar() {
        return None;
    }
    for (reshape_side, scalar_side, reshape_on_lhs) in [(lhs, rhs, true), (rhs, lhs, false)] {
        let Op::Reshape(data) = comp.get(reshape_side)?.op() else {
            continue;
        };
        let data = *data;
        let Some(scalar) = scalar_like(comp, scalar_side) else {
            continue;
        };
        let data_shape = comp.get(data)?.shape().clone();
        let scalar_operand = if scalar == scalar_side {
            scalar_side
        } else {
            // re-broadcast the scalar to the reshape input's dimensions
            let target = Shape::array(shape.element_type(), data_shape.dims().iter().copied());
            comp.add(Op::Broadcast { operand: scalar, dimensions: Dims::new() }, target)
        };
        let (a, b) = if reshape_on_lhs { (data, scalar_operand) } else { (scalar_operand, data) };
        let inner_shape = Shape::array(shape.element_type(), data_shape.dims().iter().copied());
        let inner = comp.add(Op::Binary(binary, a, b), inner_shape);
        return Some(comp.add(Op::Reshape(inner), shape));
    }
    None
}
