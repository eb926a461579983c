//! Component usage scanning
//!
//! The scan walks a scoped subtree, resolves every instance to its
//! canonical component (collapsing variant sets), and accumulates a usage
//! aggregate: one record per component with an occurrence count and the
//! set of components its instance trees embed.

mod engine;
mod filter;
mod resolve;

pub use engine::scan;
pub use filter::is_excluded;
pub use resolve::{display_name, resolve};

use crate::document::NodeId;
use rustc_hash::FxHashMap;

/// Usage record for one canonical component entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentUsage {
    /// Canonical entity id (a component, or the component-set collapsing
    /// its variants)
    pub entity: NodeId,
    /// Instances in the scanned scope resolving to this entity
    pub count: u32,
    /// Entities whose instances appear nested inside this entity's
    /// instances. First-seen order, no duplicates, never self.
    pub depends_on: Vec<NodeId>,
}

/// Per-scan arena of usage records, indexed by entity id
///
/// Records keep discovery order; the index makes entity lookup O(1).
/// Built fresh for every scan and discarded after shaping.
#[derive(Debug, Default)]
pub struct UsageAggregate {
    records: Vec<ComponentUsage>,
    index: FxHashMap<NodeId, usize>,
}

impl UsageAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, entity: &str) -> usize {
        if let Some(&i) = self.index.get(entity) {
            return i;
        }
        self.records.push(ComponentUsage {
            entity: entity.to_string(),
            count: 0,
            depends_on: Vec::new(),
        });
        let i = self.records.len() - 1;
        self.index.insert(entity.to_string(), i);
        i
    }

    /// Count one resolved instance of `entity`, creating its record at
    /// zero first if needed.
    pub fn record_use(&mut self, entity: &str) {
        let i = self.slot(entity);
        self.records[i].count += 1;
    }

    /// Mark `dep` as a dependency of `owner`. Creates the owner record
    /// (count 0) when missing. Self-edges and duplicates are refused.
    pub fn add_dependency(&mut self, owner: &str, dep: &str) {
        if owner == dep {
            return;
        }
        let i = self.slot(owner);
        let deps = &mut self.records[i].depends_on;
        if !deps.iter().any(|d| d == dep) {
            deps.push(dep.to_string());
        }
    }

    /// Records in discovery order
    pub fn records(&self) -> &[ComponentUsage] {
        &self.records
    }

    pub fn get(&self, entity: &str) -> Option<&ComponentUsage> {
        self.index.get(entity).map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
