//! Ring Hash Function
//!
//! 32-bit ring positions derived from a SHA-1 digest.

use sha1::{Digest, Sha1};

// == Hash Key ==
/// Maps a key (or virtual point name) to its position on the ring.
///
/// Takes bytes 16, 13, 7 and 3 of the SHA-1 digest and packs them
/// big-endian. Existing deployments place keys with this exact byte
/// selection, so it must not change.
pub fn hash_key(key: &str) -> u32 {
    let digest = Sha1::digest(key.as_bytes());
    u32::from_be_bytes([digest[16], digest[13], digest[7], digest[3]])
}
