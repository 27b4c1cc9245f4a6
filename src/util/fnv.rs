// Basic FNV-1a hash as described:
// https://en.wikipedia.org/wiki/Fowler%E2%80%93Noll%E2%80%93Vo_hash_function
//
// This is the default hasher for the open addressing tables in this crate.
// Keys are node IDs and small tuples of them, for which SipHash is overkill.

use core::hash::{self, BuildHasherDefault};

const PRIME: u64 = 1099511628211;
const INIT: u64 = 14695981039346656037;

/// The default `BuildHasher` for [`Map`](crate::util::map::Map) and
/// [`Set`](crate::util::set::Set).
pub type BuildHasher = BuildHasherDefault<Hasher>;

/// An FNV-1a hasher.
#[derive(Clone, Debug)]
pub struct Hasher(u64);

impl Default for Hasher {
    fn default() -> Hasher {
        Hasher(INIT)
    }
}

impl hash::Hasher for Hasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        self.0 = bytes
            .iter()
            .fold(self.0, |h, &b| (h ^ u64::from(b)).wrapping_mul(PRIME));
    }
}
