//! Algebraic simplification for tessera IR graphs.
//!
//! The pass walks every computation of a [`Module`](tessera_ir::Module) and
//! applies a catalog of algebraic rewrite rules until a fixed point is
//! reached: identity elimination, exp/log/power/divide algebra, clamp
//! recognition, padding normalization, structural folding of
//! copy/reshape/transpose/broadcast chains, and layout-aware replacements
//! with `Bitcast` when an externally supplied oracle confirms the
//! reinterpretation is free.
//!
//! Every rewrite preserves the replaced instruction's shape — element type
//! and dimensions always, layout too when the pass runs layout-sensitive.
//! The driver enforces this and panics on violation; a rule that changes
//! observable shape is a bug, not an input condition.

pub mod driver;
pub mod options;
pub mod reasoner;
pub mod rules;


pub use driver::AlgebraicSimplifier;
pub use options::{BitcastOracle, SimplifierOptions};
