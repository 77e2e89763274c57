//! Shape and layout reasoning used by the rewrite rules.
//!
//! Pure queries over a computation: effective-constant matching, reshape
//! factor analysis, and the structural prechecks for bitcast introduction.
//! The final word on bitcast legality always belongs to the injected
//! oracle; these checks only rule out reinterpretations that provably move
//! data.

use tessera_ir::{Computation, Dims, InstructionId, Literal, Op, Shape};

/// The literal behind `id` when it is a `Constant`, or a `Broadcast` whose
/// operand is a `Constant`.
pub fn effective_constant(comp: &Computation, id: InstructionId) -> Option<Literal> {
    match comp.get(id)?.op() {
        Op::Constant(literal) => Some(literal.clone()),
        Op::Broadcast { operand, .. } => match comp.get(*operand)?.op() {
            Op::Constant(literal) => Some(literal.clone()),
            _ => None,
        },
        _ => None,
    }
}

/// True when `id` is an effective constant whose every element is `k`.
pub fn is_all(comp: &Computation, id: InstructionId, k: i64) -> bool {
    effective_constant(comp, id).is_some_and(|literal| literal.is_all(k))
}

/// For a `Broadcast` of a rank-0 operand, the scalar operand id.
pub fn scalar_broadcast_operand(comp: &Computation, id: InstructionId) -> Option<InstructionId> {
    if let Op::Broadcast { operand, .. } = comp.get(id)?.op() {
        if comp.get(*operand)?.shape().is_scalar() {
            return Some(*operand);
        }
    }
    None
}

/// True when `id` produces a rank-0 value.
pub fn is_scalar(comp: &Computation, id: InstructionId) -> bool {
    comp.get(id).is_some_and(|i| i.shape().is_scalar())
}

/// A scalar-valued operand usable on either side of a binary op against an
/// array: either rank-0 itself, or a broadcast of a rank-0 value.
pub fn scalar_like(comp: &Computation, id: InstructionId) -> Option<InstructionId> {
    if is_scalar(comp, id) {
        return Some(id);
    }
    scalar_broadcast_operand(comp, id)
}

/// Shape equality at the strength the pass runs with: dims and element type
/// always, layouts too when layout-sensitive.
pub fn shapes_match(a: &Shape, b: &Shape, layout_sensitive: bool) -> bool {
    if layout_sensitive { a == b } else { a.compatible(b) }
}

pub fn is_identity_permutation(permutation: &[usize]) -> bool {
    permutation.iter().enumerate().all(|(i, &d)| i == d)
}

/// Compose two transpose permutations: applying `inner` then `outer` is the
/// same as applying the returned permutation once.
pub fn merge_permutations(inner: &[usize], outer: &[usize]) -> Dims {
    outer.iter().map(|&d| inner[d]).collect()
}

/// Pairs `(from_dim, to_dim)` of logical dimensions a reshape between the
/// two size vectors leaves intact, computed by aligning common-factor
/// boundaries of the two vectors.
pub fn unmodified_dims(from: &[usize], to: &[usize]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);
    // Products of the sizes consumed so far on each side; a dimension pair
    // is unmodified exactly when both prefixes agree and the sizes match.
    let (mut from_prefix, mut to_prefix) = (1u64, 1u64);
    while i < from.len() && j < to.len() {
        if from_prefix == to_prefix && from[i] == to[j] {
            pairs.push((i, j));
            from_prefix *= from[i] as u64;
            to_prefix *= to[j] as u64;
            i += 1;
            j += 1;
        } else if from_prefix * from[i] as u64 <= to_prefix * to[j] as u64 {
            from_prefix *= from[i] as u64;
            i += 1;
        } else {
            to_prefix *= to[j] as u64;
            j += 1;
        }
    }
    pairs
}

/// True when the reshape between the two size vectors only inserts or
/// removes size-1 dimensions.
pub fn only_degenerate_dims_differ(from: &[usize], to: &[usize]) -> bool {
    let significant = |dims: &[usize]| dims.iter().copied().filter(|&d| d != 1).collect::<Dims>();
    significant(from) == significant(to)
}

/// Structural precheck for `Reshape → Bitcast`: both shapes are laid out
/// and the reshape only inserts/removes size-1 dimensions without touching
/// the physical placement of the rest. Per non-degenerate logical
/// dimension, the `(size, stride)` pairs must agree in order.
pub fn reshape_is_bitcast(from: &Shape, to: &Shape) -> bool {
    if from.element_type() != to.element_type() || from.element_count() != to.element_count() {
        return false;
    }
    let (Some(from_strides), Some(to_strides)) = (from.strides(), to.strides()) else {
        return false;
    };
    let significant = |dims: &[usize], strides: &Dims| {
        dims.iter()
            .zip(strides)
            .filter(|(&size, _)| size != 1)
            .map(|(&size, &stride)| (size, stride))
            .collect::<Vec<_>>()
    };
    significant(from.dims(), &from_strides) == significant(to.dims(), &to_strides)
}

/// Structural precheck for `Transpose → Bitcast`: both shapes are laid out
/// and the permutation composed with the output's minor-to-major order
/// reproduces the input's, i.e. the physical order is untouched.
pub fn transpose_is_bitcast(from: &Shape, to: &Shape, permutation: &[usize]) -> bool {
    if from.element_type() != to.element_type() {
        return false;
    }
    let (Some(from_layout), Some(to_layout)) = (from.layout(), to.layout()) else {
        return false;
    };
    let composed: Dims = to_layout.minor_to_major().iter().map(|&d| permutation[d]).collect();
    composed.as_slice() == from_layout.minor_to_major()
}
