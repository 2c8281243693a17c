use std::hash::Hash;

use fnv::{FnvHashMap, FnvHashSet};

/// Hash set sized for `capacity` cells. FNV is much faster than the default hasher on small keys
/// like coordinates, though weaker against deliberate collisions.
pub fn fnv_hashset<T: Hash + Eq>(capacity: usize) -> FnvHashSet<T> {
    FnvHashSet::with_capacity_and_hasher(capacity, Default::default())
}

/// Hash map sized for `capacity` cells, see `fnv_hashset`.
pub fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    FnvHashMap::with_capacity_and_hasher(capacity, Default::default())
}
