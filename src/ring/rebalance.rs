//! Rebalance Module
//!
//! Measures how a membership change moves keys between nodes.

use std::collections::BTreeMap;

use crate::ring::HashRing;

/// Names of the synthetic keys `key0..key{count-1}`.
pub fn synthetic_keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("key{}", i)).collect()
}

// == Rebalance ==
/// Key distribution over a ring before and after one membership change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rebalance {
    /// Number of keys distributed
    pub keys: usize,
    /// Keys per node before the change
    pub before: BTreeMap<String, usize>,
    /// Keys per node after the change
    pub after: BTreeMap<String, usize>,
    /// Keys whose owner changed
    pub moved: usize,
}

impl Rebalance {
    /// Builds a ring of `nodes`, then applies `add` and `remove` in that
    /// order and compares ownership of `keys` synthetic keys.
    ///
    /// Adding a live node or removing an unknown one changes nothing.
    pub fn run(
        nodes: &[String],
        replicas: usize,
        keys: usize,
        add: Option<&str>,
        remove: Option<&str>,
    ) -> Self {
        let ring = HashRing::new(replicas);
        for node in nodes {
            ring.add_node(node);
        }

        let names = synthetic_keys(keys);
        let owners: Vec<Option<String>> = names.iter().map(|k| ring.lookup(k)).collect();
        let before = ring.distribution(&names);

        if let Some(node) = add {
            ring.add_node(node);
        }
        if let Some(node) = remove {
            ring.remove_node(node);
        }

        let after = ring.distribution(&names);
        let moved = names
            .iter()
            .zip(&owners)
            .filter(|(key, owner)| ring.lookup(key) != **owner)
            .count();

        Self {
            keys,
            before,
            after,
            moved,
        }
    }

    /// Returns true if no key changed owner.
    pub fn is_stable(&self) -> bool {
        self.moved == 0
    }
}
