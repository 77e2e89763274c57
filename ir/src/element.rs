//! Scalar element types and element values.

/// Primitive element type of an array shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Pred,
    S32,
    S64,
    U32,
    U64,
    F32,
    F64,
}

impl ElementType {
    pub fn is_floating(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    pub fn is_integral(self) -> bool {
        matches!(self, Self::S32 | Self::S64 | Self::U32 | Self::U64)
    }

    pub fn is_signed(self) -> bool {
        matches!(self, Self::S32 | Self::S64 | Self::F32 | Self::F64)
    }
}

/// A single typed scalar value, one variant per [`ElementType`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElemValue {
    Pred(bool),
    S32(i32),
    S64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl ElemValue {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Pred(_) => ElementType::Pred,
            Self::S32(_) => ElementType::S32,
            Self::S64(_) => ElementType::S64,
            Self::U32(_) => ElementType::U32,
            Self::U64(_) => ElementType::U64,
            Self::F32(_) => ElementType::F32,
            Self::F64(_) => ElementType::F64,
        }
    }

    /// The value of `element_type` representing the small integer `k`.
    /// Unsigned types clamp negative `k` to zero.
    pub fn from_integer(element_type: ElementType, k: i64) -> Self {
        match element_type {
            ElementType::Pred => Self::Pred(k != 0),
            ElementType::S32 => Self::S32(k as i32),
            ElementType::S64 => Self::S64(k),
            ElementType::U32 => Self::U32(k.max(0) as u32),
            ElementType::U64 => Self::U64(k.max(0) as u64),
            ElementType::F32 => Self::F32(k as f32),
            ElementType::F64 => Self::F64(k as f64),
        }
    }

    /// Exact match against a small integer, used for identity-element
    /// recognition. Always false when the stored type cannot represent `k`
    /// (e.g. `-1` for unsigned types).
    pub fn represents_integer(&self, k: i64) -> bool {
        match *self {
            Self::Pred(b) => (k != 0) == b && (k == 0 || k == 1),
            Self::S32(v) => i64::from(v) == k,
            Self::S64(v) => v == k,
            Self::U32(v) => k >= 0 && u64::from(v) == k as u64,
            Self::U64(v) => k >= 0 && v == k as u64,
            Self::F32(v) => v == k as f32,
            Self::F64(v) => v == k as f64,
        }
    }
}
