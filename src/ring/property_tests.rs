//! Property-Based Tests for Ring Module
//!
//! Uses proptest to check ring ordering and ownership under arbitrary
//! membership changes.

use proptest::prelude::*;
use std::collections::{BTreeMap, HashSet};

use crate::ring::HashRing;

// == Strategies ==
fn node_id_strategy() -> impl Strategy<Value = String> {
    "node-[a-h]".prop_map(|s| s)
}

fn replicas_strategy() -> impl Strategy<Value = usize> {
    1usize..40
}

#[derive(Debug, Clone)]
enum RingOp {
    Add(String),
    Remove(String),
}

fn ring_op_strategy() -> impl Strategy<Value = RingOp> {
    prop_oneof![
        node_id_strategy().prop_map(RingOp::Add),
        node_id_strategy().prop_map(RingOp::Remove),
    ]
}

fn points_per_node(ring: &HashRing) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for point in ring.points() {
        *counts.entry(point.node).or_insert(0) += 1;
    }
    counts
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // After every add/remove the ring is sorted and each live node owns
    // exactly `replicas` points.
    #[test]
    fn prop_ring_sorted_with_full_replica_sets(
        replicas in replicas_strategy(),
        ops in prop::collection::vec(ring_op_strategy(), 1..40),
    ) {
        let ring = HashRing::new(replicas);
        let mut live: HashSet<String> = HashSet::new();

        for op in ops {
            match op {
                RingOp::Add(id) => {
                    ring.add_node(&id);
                    live.insert(id);
                }
                RingOp::Remove(id) => {
                    ring.remove_node(&id);
                    live.remove(&id);
                }
            }

            let points = ring.points();
            prop_assert!(points.windows(2).all(|w| w[0].hash <= w[1].hash), "Ring not sorted");
            prop_assert_eq!(points.len(), live.len() * replicas);

            let counts = points_per_node(&ring);
            prop_assert_eq!(counts.len(), live.len());
            for id in &live {
                prop_assert_eq!(counts.get(id).copied(), Some(replicas));
            }
        }
    }

    // Lookup is a pure function of ring state and key.
    #[test]
    fn prop_lookup_deterministic(
        nodes in prop::collection::hash_set(node_id_strategy(), 1..6),
        key in "[a-zA-Z0-9:_]{0,32}",
    ) {
        let ring = HashRing::new(16);
        let other = HashRing::new(16);
        for id in &nodes {
            ring.add_node(id);
        }
        // Insertion order must not matter
        let mut reversed: Vec<&String> = nodes.iter().collect();
        reversed.reverse();
        for id in reversed {
            other.add_node(id);
        }

        let owner = ring.lookup(&key);
        prop_assert!(owner.is_some());
        prop_assert_eq!(ring.lookup(&key), owner.clone());
        prop_assert_eq!(other.lookup(&key), owner);
    }

    // Adding then removing a fresh node restores the previous ring.
    #[test]
    fn prop_add_then_remove_restores_ring(
        nodes in prop::collection::hash_set(node_id_strategy(), 0..6),
        extra in "extra-[0-9]{1,3}",
        replicas in replicas_strategy(),
    ) {
        let ring = HashRing::new(replicas);
        for id in &nodes {
            ring.add_node(id);
        }
        let points_before = ring.points();
        let nodes_before = ring.nodes();

        ring.add_node(&extra);
        ring.remove_node(&extra);

        prop_assert_eq!(ring.points(), points_before);
        prop_assert_eq!(ring.nodes(), nodes_before);
    }

    // Distribution over N distinct keys sums to N.
    #[test]
    fn prop_distribution_sums_to_n(
        nodes in prop::collection::hash_set(node_id_strategy(), 1..8),
        n in 0usize..2000,
    ) {
        let ring = HashRing::new(32);
        for id in &nodes {
            ring.add_node(id);
        }

        let dist = ring.distribution((0..n).map(|i| format!("bench{i}")));

        prop_assert_eq!(dist.values().sum::<usize>(), n);
        prop_assert_eq!(dist.len(), nodes.len());
    }
}
