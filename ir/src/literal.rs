//! Constant values carried by `Op::Constant`.

use smallvec::smallvec;
use snafu::ensure;

use crate::element::{ElemValue, ElementType};
use crate::error::{self, Result};
use crate::shape::{Dims, Shape};

/// A typed constant: element type, logical dimensions, and the elements in
/// row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    element_type: ElementType,
    dims: Dims,
    values: Vec<ElemValue>,
}

impl Literal {
    /// Build a literal, checking element count and type uniformity.
    pub fn new(
        element_type: ElementType,
        dims: impl IntoIterator<Item = usize>,
        values: Vec<ElemValue>,
    ) -> Result<Self> {
        let dims: Dims = dims.into_iter().collect();
        let expected: usize = dims.iter().product();
        ensure!(
            values.len() == expected,
            error::LiteralShapeSnafu { values: values.len(), expected, dims: dims.clone() }
        );
        for value in &values {
            ensure!(
                value.element_type() == element_type,
                error::LiteralElementTypeSnafu { expected: element_type, actual: value.element_type() }
            );
        }
        Ok(Self { element_type, dims, values })
    }

    pub fn scalar(value: ElemValue) -> Self {
        Self { element_type: value.element_type(), dims: Dims::new(), values: vec![value] }
    }

    pub fn scalar_f32(value: f32) -> Self {
        Self::scalar(ElemValue::F32(value))
    }

    pub fn scalar_s32(value: i32) -> Self {
        Self::scalar(ElemValue::S32(value))
    }

    /// Rank-1 literal over `f32` values.
    pub fn vector_f32(values: impl IntoIterator<Item = f32>) -> Self {
        let values: Vec<ElemValue> = values.into_iter().map(ElemValue::F32).collect();
        Self { element_type: ElementType::F32, dims: smallvec![values.len()], values }
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn values(&self) -> &[ElemValue] {
        &self.values
    }

    pub fn element_count(&self) -> usize {
        self.values.len()
    }

    pub fn is_scalar(&self) -> bool {
        self.dims.is_empty()
    }

    /// The layout-less array shape this literal populates.
    pub fn shape(&self) -> Shape {
        Shape::array(self.element_type, self.dims.iter().copied())
    }

    /// True when every element exactly represents the integer `k`.
    /// False for the empty literal.
    pub fn is_all(&self, k: i64) -> bool {
        !self.values.is_empty() && self.values.iter().all(|v| v.represents_integer(k))
    }
}
