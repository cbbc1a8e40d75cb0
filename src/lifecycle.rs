//! Callbacks fired when a key tree as a whole becomes occupied or vacated.
//!
//! `on_first` fires after an `add` which took the total item count of the tree from zero to one; `on_empty` fires after a delete which took it from non-zero back to zero. Operations which don't cross zero never fire anything, and failed or no-op operations don't either.
//!
//! The callbacks receive a shared reference to the tree, which means that they can inspect it but cannot mutate it: re-entering `add` or a delete from inside a callback is rejected at compile time, and at runtime with the usual borrow panic if the tree is shared through a `RefCell`.

use core::fmt::{self, Formatter, Debug};
use alloc::boxed::Box;
use crate::tree::KeyTree;

type Hook<K, V> = Box<dyn FnMut(&KeyTree<K, V>)>;

/// The lifecycle callbacks of a key tree.
///
/// # Example
/// ```rust
/// use std::{cell::Cell, rc::Rc};
/// use keytree::{Callbacks, KeyTree, Level};
///
/// let occupied = Rc::new(Cell::new(false));
/// let (on_first, on_empty) = (Rc::clone(&occupied), Rc::clone(&occupied));
/// let callbacks = Callbacks::new()
///     .on_first(move |_| on_first.set(true))
///     .on_empty(move |_| on_empty.set(false));
///
/// let mut tree = KeyTree::<&str, u8>::with_callbacks(vec![Level::btree_map(), Level::vec()], callbacks)?;
/// tree.add(&["a"], 1)?;
/// assert!(occupied.get());
/// tree.delete(&[]);
/// assert!(!occupied.get());
/// # Ok::<(), keytree::KeyTreeError>(())
/// ```
pub struct Callbacks<K, V> {
    first: Option<Hook<K, V>>,
    empty: Option<Hook<K, V>>,
}
impl<K, V> Callbacks<K, V> {
    /// Creates an empty set of callbacks.
    #[inline(always)]
    pub const fn new() -> Self {
        Self { first: None, empty: None }
    }
    /// Sets the callback fired when the tree goes from empty to non-empty.
    #[inline]
    pub fn on_first(mut self, f: impl FnMut(&KeyTree<K, V>) + 'static) -> Self {
        self.first = Some(Box::new(f));
        self
    }
    /// Sets the callback fired when the tree goes from non-empty to empty.
    #[inline]
    pub fn on_empty(mut self, f: impl FnMut(&KeyTree<K, V>) + 'static) -> Self {
        self.empty = Some(Box::new(f));
        self
    }
    #[inline(always)]
    fn hook_mut(&mut self, transition: Transition) -> &mut Option<Hook<K, V>> {
        match transition {
            Transition::First => &mut self.first,
            Transition::Empty => &mut self.empty,
        }
    }
    /// Returns `true` if neither callback is set.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.first.is_none() && self.empty.is_none()
    }
}
impl<K, V> Default for Callbacks<K, V> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}
impl<K, V> Debug for Callbacks<K, V> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_first", &self.first.is_some())
            .field("on_empty", &self.empty.is_some())
            .finish()
    }
}

/// Which zero-crossing a tree operation caused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Transition {
    First,
    Empty,
}
impl Transition {
    /// Works out the transition from the occupancy before and after an operation, if there was one.
    #[inline]
    pub(crate) const fn between(was_empty: bool, is_empty: bool) -> Option<Self> {
        match (was_empty, is_empty) {
            (true, false) => Some(Self::First),
            (false, true) => Some(Self::Empty),
            _ => None,
        }
    }
}

/// Fires the callback for the specified transition on the tree.
///
/// The callback is taken out of the tree for the duration of the call so that it can be handed a shared reference to the tree itself. It is put back even if it panics.
pub(crate) fn dispatch<K, V>(tree: &mut KeyTree<K, V>, transition: Transition) {
    let hook = tree.callbacks_mut().hook_mut(transition).take();
    if hook.is_none() {
        return;
    }
    debug_log!(?transition, "firing lifecycle callback");
    let mut lent = LentHook { tree, transition, hook };
    if let Some(hook) = lent.hook.as_mut() {
        hook(&*lent.tree);
    }
}

/// A callback taken out of its tree, returned to it on drop.
struct LentHook<'a, K, V> {
    tree: &'a mut KeyTree<K, V>,
    transition: Transition,
    hook: Option<Hook<K, V>>,
}
impl<K, V> Drop for LentHook<'_, K, V> {
    #[inline]
    fn drop(&mut self) {
        if let Some(hook) = self.hook.take() {
            *self.tree.callbacks_mut().hook_mut(self.transition) = Some(hook);
        }
    }
}
