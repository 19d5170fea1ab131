//! Ring Module
//!
//! Consistent hashing over a dynamic set of cache nodes.

mod hash;
mod hash_ring;
mod rebalance;

#[cfg(test)]
mod property_tests;

pub use hash::hash_key;
pub use hash_ring::{HashRing, VirtualPoint};
pub use rebalance::{synthetic_keys, Rebalance};

// == Public Constants ==
/// Separator between a node id and its replica index in virtual point names
pub const VIRTUAL_POINT_SEPARATOR: char = '#';
