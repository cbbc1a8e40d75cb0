//! The key tree itself.
//!
//! See [`KeyTree`] for the operations and the [crate-level documentation] for an overview.
//!
//! [`KeyTree`]: struct.KeyTree.html " "
//! [crate-level documentation]: ../index.html " "

mod walk;

use core::fmt::{self, Formatter, Debug};
use alloc::{boxed::Box, vec::Vec};
use crate::{
    container::{LeafContainer, Node},
    structure::{Level, Factory},
    lifecycle::{self, Callbacks, Transition},
    KeyTreeError,
    NodeValue,
};

/// A depth-bounded tree which stores items under sequences of branch keys.
///
/// A tree of depth D has D levels: every level but the last one consists of branch containers, and the last one consists of leaf containers which hold the items. An item is therefore always stored under exactly D - 1 branch keys.
///
/// The tree upholds the following at all times:
/// - the root node is never replaced, only its contents change;
/// - every branch has at least one item beneath it, since branches are pruned as soon as a delete empties them;
/// - [`size`] is the exact number of items in the tree.
///
/// [`size`]: #method.size " "
pub struct KeyTree<K, V> {
    root: Node<K, V>,
    /// Descriptors for depths 1 through D - 1.
    levels: Vec<Level<K, V>>,
    /// The root factory of a depth 1 tree, kept around to build containers for `get`.
    root_factory: Option<Factory<K, Box<dyn LeafContainer<V>>>>,
    callbacks: Callbacks<K, V>,
}
impl<K, V> KeyTree<K, V>
where
    K: Clone,
    V: Clone + PartialEq + 'static,
{
    /// Creates a tree with the specified structure, one descriptor per level, and no lifecycle callbacks.
    ///
    /// # Errors
    /// See [`with_callbacks`].
    ///
    /// [`with_callbacks`]: #method.with_callbacks " "
    #[inline]
    pub fn new(structure: impl IntoIterator<Item = Level<K, V>>) -> Result<Self, KeyTreeError> {
        Self::with_callbacks(structure, Callbacks::new())
    }
    /// Creates a tree with the specified structure, one descriptor per level, and lifecycle callbacks.
    ///
    /// The root is built right away, or taken as-is if the first level is [`Level::Instance`].
    ///
    /// # Errors
    /// - `EmptyStructure` if there are no levels
    /// - `KeyedRoot` if the first level uses a factory which needs a parent key
    /// - `MisplacedInstance` if a level other than the first one is a pre-built instance
    /// - `UnsupportedBranchContainer` if a level other than the last one describes leaf containers
    /// - `UnsupportedLeafContainer` if the last level describes branch containers
    ///
    /// [`Level::Instance`]: ../structure/enum.Level.html#variant.Instance " "
    pub fn with_callbacks(
        structure: impl IntoIterator<Item = Level<K, V>>,
        callbacks: Callbacks<K, V>,
    ) -> Result<Self, KeyTreeError> {
        let mut structure = structure.into_iter();
        let first = structure.next().ok_or(KeyTreeError::EmptyStructure)?;
        let levels = structure.collect::<Vec<_>>();
        let depth = levels.len() + 1;

        let mut root_factory = None;
        let root = match first {
            Level::Instance(node) => node,
            Level::Branch(factory) => {
                NodeValue::Branch(factory.build_plain().ok_or(KeyTreeError::KeyedRoot)?)
            }
            Level::Leaf(factory) => {
                let node = NodeValue::Leaf(factory.build_plain().ok_or(KeyTreeError::KeyedRoot)?);
                root_factory = Some(factory);
                node
            }
        };
        if depth == 1 && root.is_branch() {
            return Err(KeyTreeError::UnsupportedLeafContainer { depth: 0 });
        } else if depth > 1 && root.is_leaf() {
            return Err(KeyTreeError::UnsupportedBranchContainer { depth: 0 });
        }
        for (i, level) in levels.iter().enumerate() {
            let level_depth = i + 1;
            if let Level::Instance(..) = level {
                return Err(KeyTreeError::MisplacedInstance { depth: level_depth });
            }
            if level_depth == depth - 1 {
                if level.is_branch() {
                    return Err(KeyTreeError::UnsupportedLeafContainer { depth: level_depth });
                }
            } else if level.is_leaf() {
                return Err(KeyTreeError::UnsupportedBranchContainer { depth: level_depth });
            }
        }
        debug_log!(depth, "created key tree");
        Ok(Self { root, levels, root_factory, callbacks })
    }

    /// Adds an item under the specified branch keys, creating the missing branches on the way. Returns the tree for chaining.
    ///
    /// `keys` must contain exactly D - 1 branch keys, so that together with the item the key path spans the whole depth of the tree. If the tree was empty, the `on_first` callback is fired once the item is in place.
    ///
    /// # Errors
    /// - `InvalidPath` if the key path is longer than the tree is deep
    /// - `UnsupportedLeafContainer` if the key path is shorter, which would mean inserting the item into a branch container, or if a pre-built root contains a branch container where a leaf container should be
    /// - `UnsupportedBranchContainer` if a pre-built root contains a leaf container where a branch container should be
    ///
    /// The tree is left untouched on error.
    ///
    /// # Example
    /// ```rust
    /// # use keytree::{KeyTree, KeyTreeError, Level};
    /// let mut tree = KeyTree::<&str, char>::new(vec![Level::btree_map(), Level::vec()])?;
    /// tree.add(&["vowels"], 'a')?.add(&["vowels"], 'e')?;
    /// assert_eq!(tree.size(), 2);
    ///
    /// assert_eq!(
    ///     tree.add(&["too", "deep"], 'x').err(),
    ///     Some(KeyTreeError::InvalidPath { len: 3, depth: 2 }),
    /// );
    /// # Ok::<(), KeyTreeError>(())
    /// ```
    pub fn add(&mut self, keys: &[K], item: V) -> Result<&mut Self, KeyTreeError> {
        let depth = self.depth();
        let len = keys.len() + 1;
        if len > depth {
            return Err(KeyTreeError::InvalidPath { len, depth });
        }
        if len < depth {
            return Err(KeyTreeError::UnsupportedLeafContainer { depth: keys.len() });
        }
        let was_empty = self.is_empty();
        walk::reach_leaf(&mut self.root, &self.levels, keys)?.insert(item);
        self.notify(was_empty);
        Ok(self)
    }

    /// Returns a new leaf container holding every item under the specified branch keys.
    ///
    /// Items are gathered depth-first, in the enumeration order of the branch containers and then in the order of each leaf container. If the keys don't lead anywhere, the container is empty. The container is built by the factory of the leaf level if that factory doesn't need a parent key and the container it builds can fit all the items, and is a `Vec` otherwise.
    ///
    /// # Example
    /// ```rust
    /// # use keytree::{KeyTree, Level};
    /// let mut tree = KeyTree::<&str, u8>::new(vec![Level::btree_map(), Level::btree_map(), Level::vec()])?;
    /// tree.add(&["click", "li"], 1)?
    ///     .add(&["click", "li"], 2)?
    ///     .add(&["click", "span"], 3)?;
    ///
    /// assert_eq!(tree.get(&["click", "li"]).to_vec(), [1, 2]);
    /// assert_eq!(tree.get(&["click"]).to_vec(), [1, 2, 3]);
    /// assert!(tree.get(&["keydown"]).is_empty());
    /// # Ok::<(), keytree::KeyTreeError>(())
    /// ```
    pub fn get(&self, keys: &[K]) -> Box<dyn LeafContainer<V>> {
        let node = match self.get_node(keys) {
            Some(node) => node,
            None => return self.new_leaf_container(0),
        };
        let mut items = self.new_leaf_container(walk::count(node));
        walk::collect(node, &mut items);
        items
    }
    /// Returns the item equal to `item` stored under the specified branch keys, or `None` if there is no such item.
    #[inline]
    pub fn get_item(&self, keys: &[K], item: &V) -> Option<&V> {
        self.get_node(keys)?
            .as_ref()
            .leaf()?
            .values()
            .find(|stored| *stored == item)
    }

    /// Removes the node addressed by the specified branch keys along with everything beneath it. An empty slice clears the whole tree.
    ///
    /// Same as [`delete_with`] with a callback which does nothing.
    ///
    /// [`delete_with`]: #method.delete_with " "
    #[inline]
    pub fn delete(&mut self, keys: &[K]) -> bool {
        self.delete_with(keys, |_, _| {})
    }
    /// Removes the node addressed by the specified branch keys along with everything beneath it, calling `on_removed` for every item removed. An empty slice clears the whole tree, though the root itself always stays.
    ///
    /// `on_removed` receives the branch keys under which the item was stored, all D - 1 of them, followed by the item itself. Items are reported in the same order as [`get`] would return them. Branch containers get their keys deleted only after everything beneath them has been cleared, and ancestors which become empty as a result are pruned.
    ///
    /// Returns `false` without touching the tree if any of the keys don't exist, `true` otherwise. If the tree became empty, the `on_empty` callback is fired.
    ///
    /// # Example
    /// ```rust
    /// # use keytree::{KeyTree, Level};
    /// let mut tree = KeyTree::<&str, &str>::new(vec![Level::btree_map(), Level::btree_map(), Level::vec()])?;
    /// tree.add(&["first", "mutate"], "abc")?.add(&["first", "notify"], "def")?;
    ///
    /// let mut removed = Vec::new();
    /// assert!(tree.delete_with(&["first"], |keys, item| removed.push((keys.to_vec(), *item))));
    /// assert_eq!(removed, [
    ///     (vec!["first", "mutate"], "abc"),
    ///     (vec!["first", "notify"], "def"),
    /// ]);
    /// assert!(tree.is_empty());
    /// assert!(!tree.delete(&["first"]));
    /// # Ok::<(), keytree::KeyTreeError>(())
    /// ```
    ///
    /// [`get`]: #method.get " "
    pub fn delete_with(&mut self, keys: &[K], mut on_removed: impl FnMut(&[K], &V)) -> bool {
        let was_empty = self.is_empty();
        let mut path = Vec::with_capacity(self.depth());
        let deleted = walk::delete_subtree(&mut self.root, keys, &mut path, &mut on_removed);
        if deleted {
            debug_log!(keys = keys.len(), "deleted subtree");
            self.notify(was_empty);
        }
        deleted
    }
    /// Removes one item equal to `item` from the leaf container addressed by the specified branch keys.
    ///
    /// Same as [`delete_item_with`] with a callback which does nothing.
    ///
    /// [`delete_item_with`]: #method.delete_item_with " "
    #[inline]
    pub fn delete_item(&mut self, keys: &[K], item: &V) -> bool {
        self.delete_item_with(keys, item, |_, _| {})
    }
    /// Removes one item equal to `item` from the leaf container addressed by the specified branch keys, calling `on_removed` with the keys and the item if it was actually there.
    ///
    /// Returns `false` if `keys` does not address an existing leaf container, `true` otherwise. Removing an item which isn't in the container is a no-op rather than an error. Branches which become empty are pruned, and the `on_empty` callback is fired if the tree became empty.
    pub fn delete_item_with(
        &mut self,
        keys: &[K],
        item: &V,
        mut on_removed: impl FnMut(&[K], &V),
    ) -> bool {
        if keys.len() + 1 != self.depth() {
            return false;
        }
        let was_empty = self.is_empty();
        let deleted = walk::delete_item(&mut self.root, keys, keys, item, &mut on_removed);
        if deleted {
            self.notify(was_empty);
        }
        deleted
    }

    /// Builds an empty leaf container able to take `len` items.
    fn new_leaf_container(&self, len: usize) -> Box<dyn LeafContainer<V>> {
        let factory = match self.levels.last() {
            Some(Level::Leaf(factory)) => Some(factory),
            _ => self.root_factory.as_ref(),
        };
        factory
            .and_then(Factory::build_plain)
            .filter(|items| items.fixed_capacity().map_or(true, |capacity| capacity >= len))
            .unwrap_or_else(|| Box::new(Vec::<V>::with_capacity(len)) as Box<dyn LeafContainer<V>>)
    }
    #[inline]
    fn notify(&mut self, was_empty: bool) {
        if self.callbacks.is_empty() {
            return;
        }
        if let Some(transition) = Transition::between(was_empty, self.is_empty()) {
            lifecycle::dispatch(self, transition);
        }
    }
}
impl<K, V> KeyTree<K, V> {
    /// Returns the node found by following the specified branch keys from the root, or `None` as soon as one of them is missing. An empty slice yields the root.
    pub fn get_node(&self, keys: &[K]) -> Option<&Node<K, V>> {
        let mut node = &self.root;
        for key in keys {
            node = node.as_ref().branch()?.get(key)?;
        }
        Some(node)
    }
    /// Returns the total number of items in the tree.
    #[inline]
    pub fn size(&self) -> usize {
        walk::count(&self.root)
    }
    /// Returns `true` if the tree holds no items, `false` otherwise.
    ///
    /// Since empty branches never outlive a delete, an empty root is enough to tell that the tree is empty, and a non-empty leaf root is enough to tell that it isn't.
    #[inline]
    pub fn is_empty(&self) -> bool {
        if self.root.is_empty() {
            return true;
        }
        if self.root.is_leaf() {
            return false;
        }
        self.size() == 0
    }
    /// Returns the depth of the tree, i.e. the number of levels it was created with.
    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.levels.len() + 1
    }
    /// Returns a reference to the root node of the tree.
    #[inline(always)]
    pub const fn root(&self) -> &Node<K, V> {
        &self.root
    }
    /// Consumes the tree, returning the root node. This is how a pre-built root passed with [`Level::Instance`] is taken back.
    ///
    /// [`Level::Instance`]: ../structure/enum.Level.html#variant.Instance " "
    #[inline]
    #[allow(clippy::missing_const_for_fn)]
    pub fn into_root(self) -> Node<K, V> {
        self.root
    }

    #[inline(always)]
    pub(crate) fn callbacks_mut(&mut self) -> &mut Callbacks<K, V> {
        &mut self.callbacks
    }
}
impl<K: Debug, V: Debug> Debug for KeyTree<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyTree")
            .field("root", &self.root)
            .field("levels", &self.levels)
            .field("callbacks", &self.callbacks)
            .finish()
    }
}

#[cfg(test)]
mod tests;
