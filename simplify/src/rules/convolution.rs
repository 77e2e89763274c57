//! Degenerate-convolution recognition.

use tessera_ir::{
    Computation, ConvDimensionNumbers, InstructionId, Layout, Op, Shape, Window, WindowDimension,
};

use super::RewriteContext;

/// A 1x1-filter, unit-stride, unpadded, undilated convolution is a matrix
/// multiply over (pixels x input channels) by (input channels x output
/// channels). Rewrites to `bitcast(dot(bitcast(input), bitcast(filter)))`
/// when the layouts line up and the oracle approves every reinterpretation:
///
/// - input and output layouts are identical, with the feature dimension
///   most minor, so the pixels-by-channels matrix is a pure reinterpretation;
/// - the backend accepts all three bitcasts.
///
/// Only runs layout-sensitive; any violation leaves the convolution alone.
pub(crate) fn to_dot(
    comp: &mut Computation,
    id: InstructionId,
    input: InstructionId,
    filter: InstructionId,
    window: &Window,
    dim_numbers: &ConvDimensionNumbers,
    cx: &RewriteContext,
) -> Option<InstructionId> {
    if !cx.layout_sensitive() {
        return None;
    }
    if !window.dims.iter().all(WindowDimension::is_trivial) {
        return None;
    }

    let conv_shape = comp.get(id)?.shape().clone();
    let input_shape = comp.get(input)?.shape().clone();
    let filter_shape = comp.get(filter)?.shape().clone();
    let (input_layout, conv_layout) = (input_shape.layout()?, conv_shape.layout()?);
    if !filter_shape.has_layout() {
        return None;
    }

    if input_layout != conv_layout {
        return None;
    }
    if *input_layout.minor_to_major().first()? != dim_numbers.input_feature {
        return None;
    }

    let in_channels = filter_shape.dim(dim_numbers.kernel_input_feature);
    let out_channels = filter_shape.dim(dim_numbers.kernel_output_feature);
    let pixels = input_shape.element_count().checked_div(in_channels)?;

    let element_type = conv_shape.element_type();
    let matrix = |rows: usize, cols: usize| -> Option<Shape> {
        Shape::array(element_type, [rows, cols]).with_layout(Layout::descending(2)).ok()
    };
    let lhs_shape = matrix(pixels, in_channels)?;
    let rhs_shape = matrix(in_channels, out_channels)?;
    let dot_shape = matrix(pixels, out_channels)?;

    let oracle = &cx.options.valid_bitcast_callback;
    if !oracle(&input_shape, &lhs_shape)
        || !oracle(&filter_shape, &rhs_shape)
        || !oracle(&dot_shape, &conv_shape)
    {
        return None;
    }

    let lhs = comp.add(Op::Bitcast(input), lhs_shape);
    let rhs = comp.add(Op::Bitcast(filter), rhs_shape);
    let dot = comp.add(Op::Dot { lhs, rhs }, dot_shape);
    Some(comp.add(Op::Bitcast(dot), conv_shape))
}
