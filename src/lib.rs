//! A depth-bounded, key-addressed tree which stores leaf items under ordered sequences of keys, using a different, pluggable container at every level.
//!
//! ------------------------
//!
//! # Overview
//! A [`KeyTree`] is configured once with a fixed number of levels, its *depth*. Every level but the last one holds *branch containers*, keyed collections mapping branch keys to the nodes one level deeper. The last level holds *leaf containers*, ordered collections of the items themselves. A *key path* is a slice of branch keys optionally followed by one item:
//! ```rust
//! use keytree::{KeyTree, Level};
//!
//! // Event name, then selector, then the handlers themselves.
//! let mut tree = KeyTree::<&str, u32>::new(vec![
//!     Level::btree_map(),
//!     Level::btree_map(),
//!     Level::vec(),
//! ])?;
//!
//! tree.add(&["click", "li"], 1)?
//!     .add(&["click", "li"], 2)?
//!     .add(&["click", "span"], 3)?;
//!
//! assert_eq!(tree.size(), 3);
//! assert_eq!(tree.get(&["click", "li"]).to_vec(), [1, 2]);
//! assert_eq!(tree.get(&["click"]).to_vec(), [1, 2, 3]);
//!
//! // Removing the last item of a branch prunes the branch.
//! tree.delete_item(&["click", "span"], &3);
//! assert!(tree.get_node(&["click", "span"]).is_none());
//! # Ok::<(), keytree::KeyTreeError>(())
//! ```
//!
//! # Containers
//! The engine only ever talks to the containers through two traits: [`BranchContainer`] for the keyed shape and [`LeafContainer`] for the ordered-collection shape. Several types from both the standard library and external crates already implement them out of the box:
//! - [`BTreeMap`] and [`HashMap`] — `BranchContainer`
//! - [`Vec`], [`VecDeque`], [`ArrayVec`] and [`SmallVec`] — `LeafContainer`
//!
//! Implementing the traits for your own types is the intended extension point. A branch container can, for example, register an external listener when a key first gets a node and release it when the key is deleted. Levels whose containers need to know where they live in the tree can be declared with [`Factory::WithKey`], which passes the parent's branch key to the constructor.
//!
//! # Lifecycle callbacks
//! [`Callbacks`] lets you react to the whole tree becoming occupied or vacated: `on_first` fires when an `add` takes the tree from zero items to one, `on_empty` fires when a delete takes it back to zero.
//!
//! # Feature flags
//! - `std` (**enabled by default**) — enables the full standard library, disabling `no_std` for the crate. Adds the [`HashMap`] adapter and [`Error`] trait implementations.
//! - `smallvec` — adds a `LeafContainer` implementation for [`SmallVec`].
//! - `tracing` — emits `trace`/`debug` events through the [`tracing`] crate for node creation, pruning and lifecycle dispatch. Without it, the logging calls compile to nothing.
//!
//! # Public dependencies
//! - `arrayvec` (**required**) — `^0.5`
//! - `smallvec` (*optional*) — `^1.4`
//!
//! [`Error`]: https://doc.rust-lang.org/std/error/trait.Error.html " "
//! [`Vec`]: https://doc.rust-lang.org/std/vec/struct.Vec.html " "
//! [`VecDeque`]: https://doc.rust-lang.org/std/collections/struct.VecDeque.html " "
//! [`BTreeMap`]: https://doc.rust-lang.org/std/collections/struct.BTreeMap.html " "
//! [`HashMap`]: https://doc.rust-lang.org/std/collections/struct.HashMap.html " "
//! [`SmallVec`]: https://docs.rs/smallvec/*/smallvec/struct.SmallVec.html " "
//! [`ArrayVec`]: https://docs.rs/arrayvec/*/arrayvec/struct.ArrayVec.html " "
//! [`tracing`]: https://docs.rs/tracing " "

#![warn(
    rust_2018_idioms,
    clippy::nursery,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    clippy::cast_lossless,
    clippy::checked_conversions,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
    clippy::map_flatten,
    clippy::map_unwrap_or,
    clippy::implicit_hasher,
    clippy::implicit_saturating_sub,
    clippy::inefficient_to_string,
    clippy::items_after_statements,
    clippy::let_unit_value,
    clippy::match_same_arms,
    clippy::match_wildcard_for_single_variants,
    clippy::mut_mut,
    clippy::needless_continue,
    clippy::needless_pass_by_value,
    clippy::option_option,
    clippy::redundant_closure_for_method_calls,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::too_many_lines,
    clippy::type_repetition_in_bounds,
    clippy::trivially_copy_pass_by_ref,
    clippy::unnested_or_patterns,
    clippy::unused_self,
    clippy::used_underscore_binding,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::get_unwrap,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unneeded_field_pattern,
    clippy::unwrap_used, // Only .expect() allowed
    clippy::use_debug,
)]
#![deny(
    anonymous_parameters,
    bare_trait_objects,
    clippy::exit,
)]
#![allow(clippy::use_self)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]

extern crate alloc;

#[macro_use]
mod tracing_helpers;

pub mod container;
#[doc(no_inline)]
pub use container::{BranchContainer, LeafContainer, Node};

pub mod structure;
#[doc(no_inline)]
pub use structure::{Level, Factory};

pub mod lifecycle;
#[doc(no_inline)]
pub use lifecycle::Callbacks;

pub mod tree;
pub use tree::KeyTree;

/// A prelude for using the crate, containing the most used types in a renamed form for safe glob-importing.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::{
        container::{
            BranchContainer as KeyTreeBranchContainer,
            LeafContainer as KeyTreeLeafContainer,
            Node as KeyTreeNode,
        },
        structure::{Level as KeyTreeLevel, Factory as KeyTreeFactory},
        lifecycle::Callbacks as KeyTreeCallbacks,
        tree::KeyTree,
        KeyTreeError,
    };
}

use core::fmt::{self, Formatter, Display};

/// The payload of a node of a tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeValue<B, L = B> {
    /// The payload of a branch node, i.e. a node with children. Those are also sometimes referred to as internal nodes or inodes.
    Branch(B),
    /// The payload of a leaf node, i.e. a node without any children.
    Leaf(L),
}
impl<B, L> NodeValue<B, L> {
    /// Converts from `&NodeValue<B, L>` to `NodeValue<&B, &L>`.
    #[inline]
    pub const fn as_ref(&self) -> NodeValue<&B, &L> {
        match self {
            Self::Branch(x) => NodeValue::Branch(x),
            Self::Leaf(x) => NodeValue::Leaf(x),
        }
    }
    /// Converts from `&mut NodeValue<B, L>` to `NodeValue<&mut B, &mut L>`.
    #[inline]
    pub fn as_mut(&mut self) -> NodeValue<&mut B, &mut L> {
        match self {
            Self::Branch(x) => NodeValue::Branch(x),
            Self::Leaf(x) => NodeValue::Leaf(x),
        }
    }
    /// Returns `true` if the value is a branch payload, `false` otherwise.
    #[inline(always)]
    pub const fn is_branch(&self) -> bool {
        matches!(self, Self::Branch(..))
    }
    /// Returns `true` if the value is a leaf payload, `false` otherwise.
    #[inline(always)]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(..))
    }
    /// Returns the branch payload, or `None` if the value is a leaf payload.
    #[inline]
    #[allow(clippy::missing_const_for_fn)]
    pub fn branch(self) -> Option<B> {
        match self {
            Self::Branch(x) => Some(x),
            Self::Leaf(..) => None,
        }
    }
    /// Returns the leaf payload, or `None` if the value is a branch payload.
    #[inline]
    #[allow(clippy::missing_const_for_fn)]
    pub fn leaf(self) -> Option<L> {
        match self {
            Self::Branch(..) => None,
            Self::Leaf(x) => Some(x),
        }
    }
}

/// The error type returned by fallible operations on key trees and by tree construction.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum KeyTreeError {
    /// A key path longer than the depth of the tree was used to add an item.
    InvalidPath {
        /// The length of the offending key path, including the item.
        len: usize,
        /// The depth of the tree.
        depth: usize,
    },
    /// The node or level at the specified depth was expected to be a leaf container but was a branch container.
    UnsupportedLeafContainer {
        /// The depth at which the branch container was found.
        depth: usize,
    },
    /// The node or level at the specified depth was expected to be a branch container but was a leaf container.
    UnsupportedBranchContainer {
        /// The depth at which the leaf container was found.
        depth: usize,
    },
    /// The tree structure did not contain any levels.
    EmptyStructure,
    /// The root level was declared with a factory which requires a parent key, which the root does not have.
    KeyedRoot,
    /// A pre-built instance was used to describe a level other than the root.
    MisplacedInstance {
        /// The depth of the offending level.
        depth: usize,
    },
}
impl Display for KeyTreeError {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPath { len, depth } => write!(
                f,
                "cannot add a path of length {} to a tree of depth {}",
                len, depth,
            ),
            Self::UnsupportedLeafContainer { depth } => write!(
                f,
                "expected a leaf container at depth {}, found a branch container",
                depth,
            ),
            Self::UnsupportedBranchContainer { depth } => write!(
                f,
                "expected a branch container at depth {}, found a leaf container",
                depth,
            ),
            Self::EmptyStructure => f.pad("the tree structure must describe at least one level"),
            Self::KeyedRoot => f.pad("the root level cannot use a factory which requires a parent key"),
            Self::MisplacedInstance { depth } => write!(
                f,
                "only the root level can be a pre-built instance, found one at depth {}",
                depth,
            ),
        }
    }
}
#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for KeyTreeError {}
