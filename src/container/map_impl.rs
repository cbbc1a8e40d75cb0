use alloc::{collections::BTreeMap, vec::Vec};
use super::{BranchContainer, Node};

impl<K, V> BranchContainer<K, V> for BTreeMap<K, Node<K, V>>
where K: Ord + Clone,
{
    #[inline(always)]
    fn get(&self, key: &K) -> Option<&Node<K, V>> {
        self.get(key)
    }
    #[inline(always)]
    fn get_mut(&mut self, key: &K) -> Option<&mut Node<K, V>> {
        self.get_mut(key)
    }
    #[inline(always)]
    fn set(&mut self, key: K, node: Node<K, V>) {
        self.insert(key, node);
    }
    #[inline(always)]
    fn delete(&mut self, key: &K) -> Option<Node<K, V>> {
        self.remove(key)
    }
    #[inline]
    fn keys(&self) -> Vec<K> {
        self.keys().cloned().collect()
    }
    #[inline(always)]
    fn len(&self) -> usize {
        self.len()
    }
}

#[cfg(feature = "std")]
mod hash_map {
    use core::hash::{Hash, BuildHasher};
    use std::collections::HashMap;
    use super::super::{BranchContainer, Node};

    // Enumeration order is whatever the hasher makes of it, which is fine for lookups but means
    // that aggregation order is unspecified.
    impl<K, V, S> BranchContainer<K, V> for HashMap<K, Node<K, V>, S>
    where
        K: Hash + Eq + Clone,
        S: BuildHasher,
    {
        #[inline(always)]
        fn get(&self, key: &K) -> Option<&Node<K, V>> {
            self.get(key)
        }
        #[inline(always)]
        fn get_mut(&mut self, key: &K) -> Option<&mut Node<K, V>> {
            self.get_mut(key)
        }
        #[inline(always)]
        fn set(&mut self, key: K, node: Node<K, V>) {
            self.insert(key, node);
        }
        #[inline(always)]
        fn delete(&mut self, key: &K) -> Option<Node<K, V>> {
            self.remove(key)
        }
        #[inline]
        fn keys(&self) -> Vec<K> {
            self.keys().cloned().collect()
        }
        #[inline(always)]
        fn len(&self) -> usize {
            self.len()
        }
    }
}
