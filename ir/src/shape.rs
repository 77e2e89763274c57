//! Array shapes and physical layouts.
//!
//! A [`Shape`] is an element type plus an ordered list of logical dimension
//! sizes, optionally annotated with a [`Layout`]: a permutation of the
//! dimension indices from most-minor to most-major physical order. Shape
//! equality comes in two strengths — [`Shape::compatible`] ignores layout,
//! `==` includes it.

use smallvec::SmallVec;
use snafu::ensure;

use crate::element::ElementType;
use crate::error::{self, Result};

/// Inline-capacity vector for dimension sizes and dimension indices.
pub type Dims = SmallVec<[usize; 4]>;

/// Physical layout: dimension indices ordered from most-minor to most-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    minor_to_major: Dims,
}

impl Layout {
    /// Build a layout, validating that it permutes `0..rank`.
    pub fn new(minor_to_major: impl IntoIterator<Item = usize>) -> Result<Self> {
        let minor_to_major: Dims = minor_to_major.into_iter().collect();
        let rank = minor_to_major.len();
        let mut seen = vec![false; rank];
        for &dim in &minor_to_major {
            ensure!(
                dim < rank && !seen[dim],
                error::InvalidLayoutSnafu { minor_to_major: minor_to_major.clone(), rank }
            );
            seen[dim] = true;
        }
        Ok(Self { minor_to_major })
    }

    /// Default row-major layout: the last logical dimension is most minor.
    pub fn descending(rank: usize) -> Self {
        Self { minor_to_major: (0..rank).rev().collect() }
    }

    pub fn minor_to_major(&self) -> &[usize] {
        &self.minor_to_major
    }

    pub fn rank(&self) -> usize {
        self.minor_to_major.len()
    }
}

/// Element type + logical dimensions + optional physical layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    element_type: ElementType,
    dims: Dims,
    layout: Option<Layout>,
}

impl Shape {
    /// Rank-0 shape holding a single element.
    pub fn scalar(element_type: ElementType) -> Self {
        Self { element_type, dims: Dims::new(), layout: None }
    }

    /// Array shape without a layout.
    pub fn array(element_type: ElementType, dims: impl IntoIterator<Item = usize>) -> Self {
        Self { element_type, dims: dims.into_iter().collect(), layout: None }
    }

    /// Attach a layout; its rank must match the shape's.
    pub fn with_layout(mut self, layout: Layout) -> Result<Self> {
        ensure!(
            layout.rank() == self.dims.len(),
            error::LayoutRankMismatchSnafu {
                layout_rank: layout.rank(),
                shape_rank: self.dims.len(),
                dims: self.dims.clone(),
            }
        );
        self.layout = Some(layout);
        Ok(self)
    }

    /// Attach the default row-major layout.
    pub fn with_default_layout(mut self) -> Self {
        self.layout = Some(Layout::descending(self.dims.len()));
        self
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn dim(&self, index: usize) -> usize {
        self.dims[index]
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn is_scalar(&self) -> bool {
        self.dims.is_empty()
    }

    /// Total number of elements (1 for scalars, 0 if any dimension is 0).
    pub fn element_count(&self) -> usize {
        self.dims.iter().product()
    }

    /// True when the shape holds no elements at all.
    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn has_layout(&self) -> bool {
        self.layout.is_some()
    }

    /// Layout-insensitive equality: element type and dimension sizes only.
    pub fn compatible(&self, other: &Shape) -> bool {
        self.element_type == other.element_type && self.dims == other.dims
    }

    /// Per-logical-dimension physical strides, derived from the layout.
    /// The most-minor dimension has stride 1. `None` without a layout.
    pub fn strides(&self) -> Option<Dims> {
        let layout = self.layout.as_ref()?;
        let mut strides: Dims = SmallVec::from_elem(0, self.dims.len());
        let mut running = 1usize;
        for &dim in layout.minor_to_major() {
            strides[dim] = running;
            running *= self.dims[dim];
        }
        Some(strides)
    }
}
