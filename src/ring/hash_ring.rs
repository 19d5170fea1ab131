//! Hash Ring Module
//!
//! Sorted ring of virtual points with clockwise owner lookup.

use std::collections::{BTreeMap, HashSet};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::ring::{hash_key, VIRTUAL_POINT_SEPARATOR};

// == Virtual Point ==
/// One position on the ring, owned by a single node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VirtualPoint {
    /// Ring position
    pub hash: u32,
    /// Owning node id
    pub node: String,
}

#[derive(Debug, Default)]
struct RingState {
    /// Live node ids
    nodes: HashSet<String>,
    /// Virtual points, sorted ascending by (hash, node)
    points: Vec<VirtualPoint>,
}

// == Hash Ring ==
/// Consistent-hash ring mapping keys to node ids.
///
/// Each node is represented by `replicas` virtual points named
/// `"<id>#<i>"`. A key belongs to the node owning the first point at or
/// after the key's hash, wrapping around to the first point.
///
/// Lookups share a read lock; membership changes take the write lock and
/// leave the ring sorted before releasing it.
#[derive(Debug)]
pub struct HashRing {
    /// Virtual points per node
    replicas: usize,
    state: RwLock<RingState>,
}

impl HashRing {
    // == Constructor ==
    /// Creates an empty ring with `replicas` virtual points per node.
    ///
    /// A replica count of zero is raised to one so every live node owns at
    /// least one point.
    pub fn new(replicas: usize) -> Self {
        Self {
            replicas: replicas.max(1),
            state: RwLock::new(RingState::default()),
        }
    }

    // == Add Node ==
    /// Adds a node and its virtual points. No-op if the node is already live.
    pub fn add_node(&self, id: &str) {
        let mut state = self.write();
        if !state.nodes.insert(id.to_string()) {
            return;
        }

        state
            .points
            .extend((0..self.replicas).map(|i| VirtualPoint {
                hash: hash_key(&virtual_point_name(id, i)),
                node: id.to_string(),
            }));
        state.points.sort_unstable();

        debug!(node = id, points = state.points.len(), "Node added to ring");
    }

    // == Remove Node ==
    /// Removes a node and all of its virtual points. No-op if absent.
    pub fn remove_node(&self, id: &str) {
        let mut state = self.write();
        if !state.nodes.remove(id) {
            return;
        }

        state.points.retain(|point| point.node != id);

        debug!(node = id, points = state.points.len(), "Node removed from ring");
    }

    // == Lookup ==
    /// Returns the id of the node owning `key`, or None if the ring is empty.
    pub fn lookup(&self, key: &str) -> Option<String> {
        let state = self.read();
        owner_of(&state.points, hash_key(key)).map(str::to_string)
    }

    // == Nodes ==
    /// Returns the live node ids, sorted.
    pub fn nodes(&self) -> Vec<String> {
        let state = self.read();
        let mut nodes: Vec<String> = state.nodes.iter().cloned().collect();
        nodes.sort();
        nodes
    }

    // == Contains ==
    /// Checks if a node is live on the ring.
    pub fn contains(&self, id: &str) -> bool {
        self.read().nodes.contains(id)
    }

    // == Distribution ==
    /// Tallies how many of `keys` each live node owns.
    ///
    /// Every live node appears in the result, possibly with a zero count.
    /// All keys are resolved against a single ring snapshot.
    pub fn distribution<I, K>(&self, keys: I) -> BTreeMap<String, usize>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let state = self.read();
        let mut counts: BTreeMap<String, usize> =
            state.nodes.iter().map(|node| (node.clone(), 0)).collect();

        for key in keys {
            if let Some(owner) = owner_of(&state.points, hash_key(key.as_ref())) {
                *counts.entry(owner.to_string()).or_default() += 1;
            }
        }

        counts
    }

    // == Points ==
    /// Returns a snapshot of the ring's virtual points in ring order.
    pub fn points(&self) -> Vec<VirtualPoint> {
        self.read().points.clone()
    }

    /// Returns the configured number of virtual points per node.
    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Returns the number of virtual points on the ring.
    pub fn len(&self) -> usize {
        self.read().points.len()
    }

    /// Returns true if no node is live.
    pub fn is_empty(&self) -> bool {
        self.read().points.is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, RingState> {
        self.state.read()
    }

    fn write(&self) -> RwLockWriteGuard<'_, RingState> {
        self.state.write()
    }
}

/// Builds the name hashed for the `index`-th virtual point of `id`.
fn virtual_point_name(id: &str, index: usize) -> String {
    format!("{id}{VIRTUAL_POINT_SEPARATOR}{index}")
}

/// Finds the owner of the first point at or after `hash`, wrapping around.
fn owner_of(points: &[VirtualPoint], hash: u32) -> Option<&str> {
    if points.is_empty() {
        return None;
    }
    let idx = points.partition_point(|point| point.hash < hash);
    let idx = if idx == points.len() { 0 } else { idx };
    Some(points[idx].node.as_str())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn ring_with(nodes: &[&str], replicas: usize) -> HashRing {
        let ring = HashRing::new(replicas);
        for node in nodes {
            ring.add_node(node);
        }
        ring
    }

    #[test]
    fn test_ring_new_is_empty() {
        let ring = HashRing::new(10);
        assert!(ring.is_empty());
        assert_eq!(ring.len(), 0);
        assert_eq!(ring.replicas(), 10);
        assert!(ring.nodes().is_empty());
    }

    #[test]
    fn test_lookup_empty_ring() {
        let ring = HashRing::new(10);
        assert_eq!(ring.lookup("anything"), None);
    }

    #[test]
    fn test_zero_replicas_raised_to_one() {
        let ring = ring_with(&["a"], 0);
        assert_eq!(ring.replicas(), 1);
        assert_eq!(ring.len(), 1);
        assert_eq!(ring.lookup("key").as_deref(), Some("a"));
    }

    #[test]
    fn test_add_node_creates_replica_points() {
        let ring = ring_with(&["node-a", "node-b"], 50);

        assert_eq!(ring.len(), 100);
        let points = ring.points();
        assert_eq!(points.iter().filter(|p| p.node == "node-a").count(), 50);
        assert_eq!(points.iter().filter(|p| p.node == "node-b").count(), 50);
        assert!(points.windows(2).all(|w| w[0].hash <= w[1].hash));
    }

    #[test]
    fn test_virtual_point_hashes_follow_naming_scheme() {
        let ring = ring_with(&["node-a"], 3);

        let mut expected: Vec<u32> = (0..3).map(|i| hash_key(&format!("node-a#{i}"))).collect();
        expected.sort_unstable();
        let actual: Vec<u32> = ring.points().iter().map(|p| p.hash).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_add_node_idempotent() {
        let ring = ring_with(&["node-a"], 20);
        let before = ring.points();

        ring.add_node("node-a");

        assert_eq!(ring.points(), before);
        assert_eq!(ring.nodes(), vec!["node-a".to_string()]);
    }

    #[test]
    fn test_remove_node_idempotent() {
        let ring = ring_with(&["node-a", "node-b"], 20);

        ring.remove_node("node-a");
        ring.remove_node("node-a");
        ring.remove_node("never-added");

        assert_eq!(ring.len(), 20);
        assert_eq!(ring.nodes(), vec!["node-b".to_string()]);
        assert!(ring.points().iter().all(|p| p.node == "node-b"));
    }

    #[test]
    fn test_single_node_owns_everything() {
        let ring = ring_with(&["only"], 5);
        for i in 0..100 {
            assert_eq!(ring.lookup(&format!("key{i}")).as_deref(), Some("only"));
        }
    }

    #[test]
    fn test_lookup_is_stable() {
        let ring = ring_with(&["node-a", "node-b", "node-c"], 100);
        for i in 0..200 {
            let key = format!("key{i}");
            assert_eq!(ring.lookup(&key), ring.lookup(&key));
        }
    }

    #[test]
    fn test_lookup_picks_first_point_at_or_after_hash() {
        let ring = ring_with(&["node-a", "node-b", "node-c"], 10);
        let points = ring.points();

        for i in 0..200 {
            let key = format!("key{i}");
            let hash = hash_key(&key);
            let expected = points
                .iter()
                .find(|p| p.hash >= hash)
                .unwrap_or(&points[0])
                .node
                .clone();
            assert_eq!(ring.lookup(&key), Some(expected));
        }
    }

    #[test]
    fn test_lookup_wraps_past_last_point() {
        let ring = ring_with(&["node-a", "node-b"], 10);
        let points = ring.points();
        let first = points[0].node.clone();

        let last = points.last().map(|p| p.hash).unwrap_or(0);
        if let Some(key) = (0..100_000)
            .map(|i| format!("wrap{i}"))
            .find(|k| hash_key(k) > last)
        {
            assert_eq!(ring.lookup(&key), Some(first));
        }
    }

    #[test]
    fn test_remove_only_moves_removed_nodes_keys() {
        let ring = ring_with(&["node-a", "node-b", "node-c"], 100);
        let keys: Vec<String> = (0..1000).map(|i| format!("key{i}")).collect();
        let before: Vec<Option<String>> = keys.iter().map(|k| ring.lookup(k)).collect();

        ring.remove_node("node-b");

        for (key, owner) in keys.iter().zip(before) {
            let owner = owner.unwrap();
            let now = ring.lookup(key).unwrap();
            if owner == "node-b" {
                assert_ne!(now, "node-b");
            } else {
                assert_eq!(now, owner, "key {key} moved off a surviving node");
            }
        }
    }

    #[test]
    fn test_distribution_sums_to_key_count() {
        let ring = ring_with(&["node-a", "node-b", "node-c", "node-d"], 100);
        let keys = (0..1000).map(|i| format!("bench{i}"));

        let dist = ring.distribution(keys);

        assert_eq!(dist.len(), 4);
        assert_eq!(dist.values().sum::<usize>(), 1000);
    }

    #[test]
    fn test_distribution_lists_idle_nodes() {
        let ring = ring_with(&["node-a", "node-b"], 100);

        let dist = ring.distribution(std::iter::empty::<&str>());

        assert_eq!(dist.get("node-a"), Some(&0));
        assert_eq!(dist.get("node-b"), Some(&0));
    }

    #[test]
    fn test_shared_hash_position_goes_to_smaller_node_id() {
        let point = |node: &str| VirtualPoint {
            hash: 100,
            node: node.to_string(),
        };
        for mut points in [vec![point("b"), point("a")], vec![point("a"), point("b")]] {
            points.sort_unstable();
            assert_eq!(owner_of(&points, 100), Some("a"));
            assert_eq!(owner_of(&points, 50), Some("a"));
        }
    }

    #[test]
    fn test_contains() {
        let ring = ring_with(&["node-a"], 5);
        assert!(ring.contains("node-a"));
        assert!(!ring.contains("node-b"));
    }

    #[test]
    fn test_concurrent_lookups_during_membership_changes() {
        use std::sync::Arc;
        use std::thread;

        let ring = Arc::new(ring_with(&["node-a", "node-b"], 50));
        let readers: Vec<_> = (0..4)
            .map(|t| {
                let ring = Arc::clone(&ring);
                thread::spawn(move || {
                    for i in 0..500 {
                        assert!(ring.lookup(&format!("t{t}-key{i}")).is_some());
                    }
                })
            })
            .collect();

        for i in 0..20 {
            let id = format!("extra-{i}");
            ring.add_node(&id);
            ring.remove_node(&id);
        }

        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(ring.len(), 100);
    }
}
