//! Pass configuration and the injected bitcast-legality oracle.

use std::fmt;
use std::sync::Arc;

use tessera_ir::Shape;

/// Backend-supplied authority on whether reinterpreting `from` as `to` is a
/// free bitcast. The simplifier never guesses this on its own.
pub type BitcastOracle = Arc<dyn Fn(&Shape, &Shape) -> bool + Send + Sync>;

#[derive(Clone)]
pub struct SimplifierOptions {
    /// Enables layout-aware rules (bitcast introduction, convolution
    /// degeneration) and makes identity rules respect layouts.
    pub is_layout_sensitive: bool,
    /// Run exactly one pass instead of iterating to a fixed point.
    pub single_pass: bool,
    /// Consulted by every bitcast-introducing rule, after the structural
    /// prechecks. Only reachable in layout-sensitive mode.
    pub valid_bitcast_callback: BitcastOracle,
}

impl SimplifierOptions {
    /// Layout-insensitive fixed-point simplification; the oracle rejects
    /// everything (and is unreachable anyway).
    pub fn new() -> Self {
        Self {
            is_layout_sensitive: false,
            single_pass: false,
            valid_bitcast_callback: Arc::new(|_, _| false),
        }
    }

    /// Layout-sensitive simplification with the given oracle.
    pub fn layout_sensitive(valid_bitcast_callback: BitcastOracle) -> Self {
        Self { is_layout_sensitive: true, single_pass: false, valid_bitcast_callback }
    }

    pub fn with_single_pass(mut self, single_pass: bool) -> Self {
        self.single_pass = single_pass;
        self
    }
}

impl Default for SimplifierOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SimplifierOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimplifierOptions")
            .field("is_layout_sensitive", &self.is_layout_sensitive)
            .field("single_pass", &self.single_pass)
            .finish_non_exhaustive()
    }
}
