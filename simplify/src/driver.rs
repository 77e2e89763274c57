//! Fixed-point driver.
//!
//! A pass snapshots the module's computation ids and each computation's
//! instruction ids before touching anything, so rewrites that add
//! instructions (or whole computations) mid-run never invalidate the
//! traversal; ids removed by an earlier rewrite's sweep are simply skipped.
//! Passes repeat until one produces no rewrite, or exactly once in
//! single-pass mode.

use tracing::{debug, trace};

use tessera_ir::{Computation, InstructionId, Module};

use crate::options::SimplifierOptions;
use crate::reasoner::shapes_match;
use crate::rules::{self, RewriteContext};

/// A converging rule catalog needs a handful of passes; running this long
/// means two rules are undoing each other.
const MAX_PASSES: usize = 64;

pub struct AlgebraicSimplifier {
    options: SimplifierOptions,
}

impl AlgebraicSimplifier {
    pub fn new(options: SimplifierOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SimplifierOptions {
        &self.options
    }

    /// Simplify the module. Returns whether anything changed.
    pub fn run(&self, module: &mut Module) -> bool {
        let mut changed = false;
        for pass in 0.. {
            assert!(
                pass < MAX_PASSES,
                "algebraic simplifier failed to reach a fixed point after {MAX_PASSES} passes"
            );
            let pass_changed = self.run_pass(module, pass);
            changed |= pass_changed;
            if !pass_changed || self.options.single_pass {
                break;
            }
        }
        changed
    }

    fn run_pass(&self, module: &mut Module, pass: usize) -> bool {
        let cx = RewriteContext { options: &self.options };
        let mut total_rewrites = 0usize;
        for comp_id in module.computation_ids() {
            let Some(comp) = module.get_mut(comp_id) else {
                continue;
            };
            let mut rewrites = 0usize;
            for id in comp.snapshot_ids() {
                if !comp.contains(id) {
                    continue;
                }
                let Some(replacement) = rules::simplify_instruction(comp, id, &cx) else {
                    continue;
                };
                self.check_shape_preserved(comp, id, replacement);
                let kind = comp.get(id).map(|i| i.op().kind()).unwrap_or("?");
                comp.replace_all_uses(id, replacement);
                debug!(instruction = %id, kind, replacement = %replacement, "rewrote instruction");
                rewrites += 1;
            }
            if rewrites > 0 {
                comp.remove_unreachable();
            }
            total_rewrites += rewrites;
        }
        trace!(pass, rewrites = total_rewrites, "simplification pass finished");
        total_rewrites > 0
    }

    /// A rule producing a replacement with a different observable shape is a
    /// bug in the catalog, not an input condition.
    fn check_shape_preserved(&self, comp: &Computation, old: InstructionId, new: InstructionId) {
        let (Some(old_instr), Some(new_instr)) = (comp.get(old), comp.get(new)) else {
            panic!("rewrite produced a dangling replacement {new} for {old}");
        };
        assert!(
            shapes_match(old_instr.shape(), new_instr.shape(), self.options.is_layout_sensitive),
            "rewrite of {} changed shape: {:?} -> {:?}",
            old_instr.op().kind(),
            old_instr.shape(),
            new_instr.shape(),
        );
    }
}
