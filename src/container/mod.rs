//! The capability traits for the per-level containers of key trees.
//!
//! This module is home for the following items:
//! - [`BranchContainer`], the trait for keyed collections which hold the nodes one level deeper
//! - [`LeafContainer`], the trait for ordered collections which hold the items themselves
//! - [`Node`], the type of a node in a key tree, tagged with the shape of its container
//!
//! Implementations for common collections are provided out of the box: [`BTreeMap`] and [`HashMap`] for branches, [`Vec`], [`VecDeque`], [`ArrayVec`] and [`SmallVec`] for leaves.
//!
//! [`BranchContainer`]: trait.BranchContainer.html " "
//! [`LeafContainer`]: trait.LeafContainer.html " "
//! [`Node`]: type.Node.html " "
//! [`BTreeMap`]: https://doc.rust-lang.org/std/collections/struct.BTreeMap.html " "
//! [`HashMap`]: https://doc.rust-lang.org/std/collections/struct.HashMap.html " "
//! [`Vec`]: https://doc.rust-lang.org/std/vec/struct.Vec.html " "
//! [`VecDeque`]: https://doc.rust-lang.org/std/collections/struct.VecDeque.html " "
//! [`ArrayVec`]: https://docs.rs/arrayvec/*/arrayvec/struct.ArrayVec.html " "
//! [`SmallVec`]: https://docs.rs/smallvec/*/smallvec/struct.SmallVec.html " "

mod map_impl;
mod list_impl;
mod arrayvec_impl;
#[cfg(feature = "smallvec")]
mod smallvec_impl;

use core::fmt::{self, Formatter, Debug};
use alloc::{boxed::Box, vec::Vec};
use crate::NodeValue;

/// A node of a key tree: either a branch container or a leaf container.
///
/// The shape of the container is an explicit tag rather than something the tree figures out at runtime, which means that a node can never be ambiguously both.
pub type Node<K, V> = NodeValue<Box<dyn BranchContainer<K, V>>, Box<dyn LeafContainer<V>>>;

impl<K, V> NodeValue<Box<dyn BranchContainer<K, V>>, Box<dyn LeafContainer<V>>> {
    /// Wraps a branch container into a node.
    #[inline(always)]
    pub fn from_branch(container: impl BranchContainer<K, V> + 'static) -> Self {
        Self::Branch(Box::new(container))
    }
    /// Wraps a leaf container into a node.
    #[inline(always)]
    pub fn from_leaf(container: impl LeafContainer<V> + 'static) -> Self {
        Self::Leaf(Box::new(container))
    }
    /// Returns the immediate size of the node's container: the number of branch keys for branch containers, the number of items for leaf containers.
    ///
    /// This is *not* the number of items reachable from the node, which is what [`KeyTree::size`] returns.
    ///
    /// [`KeyTree::size`]: ../tree/struct.KeyTree.html#method.size " "
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::Branch(x) => x.len(),
            Self::Leaf(x) => x.len(),
        }
    }
    /// Returns `true` if the node's container holds nothing, `false` otherwise.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trait for keyed collections which can be the branch containers of key trees.
///
/// Every method maps directly onto a map-like operation. The order in which [`keys`] enumerates the keys defines the order in which the tree aggregates, clears and reports items, so collections with an unspecified iteration order produce an unspecified item order.
///
/// Implementations are free to perform side effects in [`set`] and [`delete`]: the tree calls `set` exactly once when a key first gets a node and `delete` exactly once when that node is pruned or removed, after everything beneath it has already been cleared.
///
/// [`keys`]: #tymethod.keys " "
/// [`set`]: #tymethod.set " "
/// [`delete`]: #tymethod.delete " "
pub trait BranchContainer<K, V> {
    /// Returns a reference to the node stored under `key`, or `None` if there is none.
    fn get(&self, key: &K) -> Option<&Node<K, V>>;
    /// Returns a *mutable* reference to the node stored under `key`, or `None` if there is none.
    fn get_mut(&mut self, key: &K) -> Option<&mut Node<K, V>>;
    /// Stores `node` under `key`, replacing the previous node if there was one.
    fn set(&mut self, key: K, node: Node<K, V>);
    /// Removes and returns the node stored under `key`, or `None` if there was none.
    fn delete(&mut self, key: &K) -> Option<Node<K, V>>;
    /// Returns all keys of the container, in enumeration order.
    fn keys(&self) -> Vec<K>;
    /// Returns the number of keys in the container.
    fn len(&self) -> usize;

    /// Returns `true` if the container holds no keys, `false` otherwise.
    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trait for ordered collections which can be the leaf containers of key trees.
///
/// The order of [`values`] is expected to be insertion order.
///
/// [`values`]: #tymethod.values " "
pub trait LeafContainer<V> {
    /// Appends an item to the back of the collection.
    ///
    /// # Panics
    /// Collections with a fixed capacity may panic if they are full.
    fn insert(&mut self, value: V);
    /// Removes the first item equal to `value`, returning `true` if there was one.
    fn remove(&mut self, value: &V) -> bool;
    /// Returns an iterator over the items of the collection, in order.
    fn values(&self) -> Box<dyn Iterator<Item = &V> + '_>;
    /// Returns the number of items in the collection.
    fn len(&self) -> usize;

    /// Returns `true` if the collection holds no items, `false` otherwise.
    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Returns the maximum number of items the collection can ever hold, or `None` if it grows as needed.
    ///
    /// Collections which panic in [`insert`] once full must report their capacity here.
    ///
    /// [`insert`]: #tymethod.insert " "
    #[inline(always)]
    fn fixed_capacity(&self) -> Option<usize> {
        None
    }
    /// Appends every item produced by the iterator, in order.
    #[inline]
    fn insert_all(&mut self, values: &mut dyn Iterator<Item = V>) {
        for value in values {
            self.insert(value);
        }
    }
    /// Removes the first equal item for each of the specified values, returning how many were actually removed.
    #[inline]
    fn remove_all(&mut self, values: &[V]) -> usize {
        values.iter().filter(|&value| self.remove(value)).count()
    }
    /// Clones the items into a `Vec`, in order.
    #[inline]
    fn to_vec(&self) -> Vec<V>
    where V: Clone,
    {
        self.values().cloned().collect()
    }
}

impl<K: Debug, V: Debug> Debug for dyn BranchContainer<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for key in self.keys() {
            if let Some(node) = self.get(&key) {
                map.entry(&key, node);
            }
        }
        map.finish()
    }
}
impl<V: Debug> Debug for dyn LeafContainer<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values()).finish()
    }
}
