//! Descriptors for the levels of a key tree.
//!
//! A tree of depth D is described by exactly D [`Level`]s: the first one describes the root, the last one describes the leaf containers, and all the ones in between describe branch containers. Each level declares both the shape of its containers and whether their constructor needs to know the branch key under which they are created, through [`Factory`].
//!
//! # Example
//! ```rust
//! use std::collections::BTreeMap;
//! use keytree::{KeyTree, Level, Node};
//!
//! // A container which remembers which key it was created for.
//! #[derive(Default)]
//! struct Scoped {
//!     scope: String,
//!     children: BTreeMap<String, Node<String, u8>>,
//! }
//! impl keytree::BranchContainer<String, u8> for Scoped {
//!     fn get(&self, key: &String) -> Option<&Node<String, u8>> { self.children.get(key) }
//!     fn get_mut(&mut self, key: &String) -> Option<&mut Node<String, u8>> { self.children.get_mut(key) }
//!     fn set(&mut self, key: String, node: Node<String, u8>) { self.children.insert(key, node); }
//!     fn delete(&mut self, key: &String) -> Option<Node<String, u8>> { self.children.remove(key) }
//!     fn keys(&self) -> Vec<String> { self.children.keys().cloned().collect() }
//!     fn len(&self) -> usize { self.children.len() }
//! }
//!
//! let mut tree = KeyTree::new(vec![
//!     Level::btree_map(),
//!     Level::branch_with_key(|scope: &String| Scoped { scope: scope.clone(), ..Scoped::default() }),
//!     Level::vec(),
//! ])?;
//! tree.add(&["outer".to_string(), "inner".to_string()], 7)?;
//! assert_eq!(tree.size(), 1);
//! # Ok::<(), keytree::KeyTreeError>(())
//! ```
//!
//! [`Level`]: enum.Level.html " "
//! [`Factory`]: enum.Factory.html " "

use core::fmt::{self, Formatter, Debug};
use alloc::{boxed::Box, collections::BTreeMap, vec::Vec};
use crate::{
    container::{BranchContainer, LeafContainer, Node},
    NodeValue,
};

/// A constructor for the containers of one level of a key tree.
///
/// Whether the constructor receives the branch key under which the new container is created is declared up front rather than guessed from the container type.
pub enum Factory<K, T> {
    /// A constructor which does not need to know where in the tree the container lives.
    Plain(Box<dyn Fn() -> T>),
    /// A constructor which receives the branch key under which the container is about to be stored in its parent.
    WithKey(Box<dyn Fn(&K) -> T>),
}
impl<K, T> Factory<K, T> {
    /// Creates a factory from a constructor which takes no arguments.
    #[inline(always)]
    pub fn plain(f: impl Fn() -> T + 'static) -> Self {
        Self::Plain(Box::new(f))
    }
    /// Creates a factory from a constructor which takes the parent branch key.
    #[inline(always)]
    pub fn with_key(f: impl Fn(&K) -> T + 'static) -> Self {
        Self::WithKey(Box::new(f))
    }
    /// Returns `true` if the factory needs the parent branch key, `false` otherwise.
    #[inline(always)]
    pub const fn needs_key(&self) -> bool {
        matches!(self, Self::WithKey(..))
    }
    /// Builds a container for the specified parent branch key, which is ignored by plain factories.
    #[inline]
    pub fn build(&self, key: &K) -> T {
        match self {
            Self::Plain(f) => f(),
            Self::WithKey(f) => f(key),
        }
    }
    /// Builds a container without a parent branch key, returning `None` if the factory needs one.
    #[inline]
    pub fn build_plain(&self) -> Option<T> {
        match self {
            Self::Plain(f) => Some(f()),
            Self::WithKey(..) => None,
        }
    }
}
impl<K, T> Debug for Factory<K, T> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Plain(..) => "Factory::Plain(..)",
            Self::WithKey(..) => "Factory::WithKey(..)",
        })
    }
}

/// The descriptor of one level of a key tree.
pub enum Level<K, V> {
    /// A level of keyed branch containers.
    Branch(Factory<K, Box<dyn BranchContainer<K, V>>>),
    /// A level of ordered leaf containers.
    Leaf(Factory<K, Box<dyn LeafContainer<V>>>),
    /// A pre-built node to be used as the root as-is. Only valid for the first level.
    Instance(Node<K, V>),
}
impl<K: 'static, V: 'static> Level<K, V> {
    /// A level of branch containers created with `Default::default()`.
    #[inline]
    pub fn branch<C>() -> Self
    where C: BranchContainer<K, V> + Default + 'static,
    {
        Self::Branch(Factory::plain(|| Box::new(C::default()) as Box<dyn BranchContainer<K, V>>))
    }
    /// A level of branch containers created by a constructor which receives the parent branch key.
    #[inline]
    pub fn branch_with_key<C>(f: impl Fn(&K) -> C + 'static) -> Self
    where C: BranchContainer<K, V> + 'static,
    {
        Self::Branch(Factory::with_key(move |key: &K| {
            Box::new(f(key)) as Box<dyn BranchContainer<K, V>>
        }))
    }
    /// A level of leaf containers created with `Default::default()`.
    #[inline]
    pub fn leaf<C>() -> Self
    where C: LeafContainer<V> + Default + 'static,
    {
        Self::Leaf(Factory::plain(|| Box::new(C::default()) as Box<dyn LeafContainer<V>>))
    }
    /// A level of leaf containers created by a constructor which receives the parent branch key.
    #[inline]
    pub fn leaf_with_key<C>(f: impl Fn(&K) -> C + 'static) -> Self
    where C: LeafContainer<V> + 'static,
    {
        Self::Leaf(Factory::with_key(move |key: &K| {
            Box::new(f(key)) as Box<dyn LeafContainer<V>>
        }))
    }
    /// Uses the specified branch container as the root of the tree.
    #[inline(always)]
    pub fn root_branch(container: impl BranchContainer<K, V> + 'static) -> Self {
        Self::Instance(NodeValue::from_branch(container))
    }
    /// Uses the specified leaf container as the root of the tree, which only makes sense for trees of depth 1.
    #[inline(always)]
    pub fn root_leaf(container: impl LeafContainer<V> + 'static) -> Self {
        Self::Instance(NodeValue::from_leaf(container))
    }
    /// A level of [`BTreeMap`] branch containers, which enumerate their keys in sorted order.
    ///
    /// [`BTreeMap`]: https://doc.rust-lang.org/std/collections/struct.BTreeMap.html " "
    #[inline(always)]
    pub fn btree_map() -> Self
    where K: Ord + Clone,
    {
        Self::branch::<BTreeMap<K, Node<K, V>>>()
    }
    /// A level of [`HashMap`] branch containers, which enumerate their keys in an unspecified order.
    ///
    /// [`HashMap`]: https://doc.rust-lang.org/std/collections/struct.HashMap.html " "
    #[cfg(feature = "std")]
    #[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
    #[inline(always)]
    pub fn hash_map() -> Self
    where
        K: core::hash::Hash + Eq + Clone,
    {
        Self::branch::<std::collections::HashMap<K, Node<K, V>>>()
    }
    /// A level of [`Vec`] leaf containers.
    ///
    /// [`Vec`]: https://doc.rust-lang.org/std/vec/struct.Vec.html " "
    #[inline(always)]
    pub fn vec() -> Self
    where V: PartialEq,
    {
        Self::leaf::<Vec<V>>()
    }
}
impl<K, V> Level<K, V> {
    /// Returns `true` if the level describes branch containers, `false` otherwise.
    #[inline]
    pub fn is_branch(&self) -> bool {
        match self {
            Self::Branch(..) => true,
            Self::Leaf(..) => false,
            Self::Instance(node) => node.is_branch(),
        }
    }
    /// Returns `true` if the level describes leaf containers, `false` otherwise.
    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        !self.is_branch()
    }
    /// Builds a node for this level under the specified parent branch key.
    ///
    /// Returns `None` for `Instance` levels, which can't be built more than once.
    #[inline]
    pub fn build(&self, key: &K) -> Option<Node<K, V>> {
        match self {
            Self::Branch(factory) => Some(NodeValue::Branch(factory.build(key))),
            Self::Leaf(factory) => Some(NodeValue::Leaf(factory.build(key))),
            Self::Instance(..) => None,
        }
    }
}
impl<K, V> Debug for Level<K, V> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Branch(factory) => f.debug_tuple("Branch").field(factory).finish(),
            Self::Leaf(factory) => f.debug_tuple("Leaf").field(factory).finish(),
            Self::Instance(node) => f.debug_tuple("Instance")
                .field(&if node.is_branch() { "branch" } else { "leaf" })
                .finish(),
        }
    }
}
