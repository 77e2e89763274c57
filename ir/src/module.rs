//! Modules: collections of computations with a designated entry.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::computation::Computation;
use crate::error::{self, Result};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Stable identity of a computation within a process. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComputationId(u64);

impl ComputationId {
    fn fresh() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// A named set of computations. One is the entry point; the rest are
/// embedded computations referenced by `ReduceWindow` reducers and `Call`
/// targets. Computations may be added while a pass is running; traversals
/// snapshot the id list first.
#[derive(Debug, Clone)]
pub struct Module {
    name: String,
    entry: ComputationId,
    computations: HashMap<ComputationId, Computation>,
    order: Vec<ComputationId>,
}

impl Module {
    pub fn new(name: impl Into<String>, entry: Computation) -> Self {
        let id = ComputationId::fresh();
        Self {
            name: name.into(),
            entry: id,
            computations: HashMap::from([(id, entry)]),
            order: vec![id],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entry_id(&self) -> ComputationId {
        self.entry
    }

    pub fn entry(&self) -> &Computation {
        &self.computations[&self.entry]
    }

    pub fn entry_mut(&mut self) -> &mut Computation {
        self.computations.get_mut(&self.entry).unwrap()
    }

    pub fn add_computation(&mut self, computation: Computation) -> ComputationId {
        let id = ComputationId::fresh();
        self.computations.insert(id, computation);
        self.order.push(id);
        id
    }

    pub fn computation(&self, id: ComputationId) -> Result<&Computation> {
        self.computations
            .get(&id)
            .ok_or_else(|| error::UnknownComputationSnafu { id, module: self.name.clone() }.build())
    }

    pub fn get(&self, id: ComputationId) -> Option<&Computation> {
        self.computations.get(&id)
    }

    pub fn get_mut(&mut self, id: ComputationId) -> Option<&mut Computation> {
        self.computations.get_mut(&id)
    }

    /// Insertion-ordered snapshot of computation ids, robust to additions
    /// made while iterating.
    pub fn computation_ids(&self) -> Vec<ComputationId> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.computations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.computations.is_empty()
    }
}
