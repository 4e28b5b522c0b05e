use fnv::FnvHasher;
use std::{
    collections::{HashMap, HashSet},
    hash::{BuildHasherDefault, Hash}
};

pub type FnvHashSet<T> = HashSet<T, BuildHasherDefault<FnvHasher>>;
pub type FnvHashMap<K, V> = HashMap<K, V, BuildHasherDefault<FnvHasher>>;

/// Hash set keyed with FNV, which beats the default hasher on small keys such as grid
/// coordinates. Not resistant to collision attacks, so keep it away from untrusted keys.
pub fn fnv_hashset<T: Hash + Eq>(capacity: usize) -> FnvHashSet<T> {
    HashSet::with_capacity_and_hasher(capacity, BuildHasherDefault::<FnvHasher>::default())
}

/// Hash map counterpart of `fnv_hashset`.
pub fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    HashMap::with_capacity_and_hasher(capacity, BuildHasherDefault::<FnvHasher>::default())
}

/// Clamp an animation delay in milliseconds to the range playback supports.
pub fn clamp_frame_delay(delay_ms: i64) -> u64 {
    delay_ms.clamp(0, MAX_FRAME_DELAY_MS as i64) as u64
}

pub const MAX_FRAME_DELAY_MS: u64 = 2000;
