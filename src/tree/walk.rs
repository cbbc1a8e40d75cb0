//! The recursive algorithms behind the key tree operations.
//!
//! Recursion depth is bounded by the depth of the tree, which is fixed at construction and usually tiny.

use alloc::{boxed::Box, vec::Vec};
use crate::{
    container::{BranchContainer, LeafContainer, Node},
    structure::Level,
    KeyTreeError,
    NodeValue,
};

/// Walks down to the leaf container addressed by `keys`, creating the missing nodes on the way.
///
/// Shape mismatches can only be found on nodes which already existed, so an error means that nothing was created.
pub(super) fn reach_leaf<'a, K, V>(
    mut node: &'a mut Node<K, V>,
    levels: &[Level<K, V>],
    keys: &[K],
) -> Result<&'a mut Box<dyn LeafContainer<V>>, KeyTreeError>
where K: Clone,
{
    for (depth, key) in keys.iter().enumerate() {
        let branch = match node {
            NodeValue::Branch(branch) => branch,
            NodeValue::Leaf(..) => return Err(KeyTreeError::UnsupportedBranchContainer { depth }),
        };
        if branch.get(key).is_none() {
            let child = levels[depth]
                .build(key)
                .expect("instance levels below the root are rejected at construction");
            trace_log!(depth = depth + 1, "creating node");
            branch.set(key.clone(), child);
        }
        node = branch
            .get_mut(key)
            .expect("branch container lost a node right after it was set");
    }
    match node {
        NodeValue::Leaf(leaf) => Ok(leaf),
        NodeValue::Branch(..) => Err(KeyTreeError::UnsupportedLeafContainer { depth: keys.len() }),
    }
}

/// Appends every item beneath `node` to `out`: branches in key enumeration order, items in container order.
pub(super) fn collect<K, V: Clone>(node: &Node<K, V>, out: &mut Box<dyn LeafContainer<V>>) {
    match node {
        NodeValue::Leaf(leaf) => out.insert_all(&mut leaf.values().cloned()),
        NodeValue::Branch(branch) => {
            for key in branch.keys() {
                if let Some(child) = branch.get(&key) {
                    collect(child, out);
                }
            }
        }
    }
}

/// Counts the items beneath `node`, skipping empty branches without descending into them.
pub(super) fn count<K, V>(node: &Node<K, V>) -> usize {
    match node {
        NodeValue::Leaf(leaf) => leaf.len(),
        NodeValue::Branch(branch) if branch.is_empty() => 0,
        NodeValue::Branch(branch) => branch
            .keys()
            .iter()
            .filter_map(|key| branch.get(key))
            .map(count)
            .sum(),
    }
}

/// Removes every item beneath `node` and deletes every branch key beneath it, leaving `node` itself in place.
///
/// `path` holds the branch keys leading to `node` and is restored to that state on return. Each child is cleared before its key is deleted from its parent.
pub(super) fn clear<K, V>(
    node: &mut Node<K, V>,
    path: &mut Vec<K>,
    on_removed: &mut dyn FnMut(&[K], &V),
)
where
    K: Clone,
    V: Clone,
{
    match node {
        NodeValue::Leaf(leaf) => {
            for item in leaf.to_vec() {
                if leaf.remove(&item) {
                    on_removed(path.as_slice(), &item);
                }
            }
        }
        NodeValue::Branch(branch) => {
            for key in branch.keys() {
                if let Some(child) = branch.get_mut(&key) {
                    path.push(key.clone());
                    clear(child, path, on_removed);
                    path.pop();
                }
                branch.delete(&key);
            }
        }
    }
}

/// Removes the node addressed by the non-empty `keys` along with everything beneath it, pruning the ancestors which became empty.
///
/// Returns `false` without touching anything if the path does not exist.
pub(super) fn delete_subtree<K, V>(
    node: &mut Node<K, V>,
    keys: &[K],
    path: &mut Vec<K>,
    on_removed: &mut dyn FnMut(&[K], &V),
) -> bool
where
    K: Clone,
    V: Clone,
{
    let (key, rest) = match keys.split_first() {
        Some(split) => split,
        None => {
            clear(node, path, on_removed);
            return true;
        }
    };
    let branch = match node {
        NodeValue::Branch(branch) => branch,
        NodeValue::Leaf(..) => return false,
    };
    let child = match branch.get_mut(key) {
        Some(child) => child,
        None => return false,
    };
    path.push(key.clone());
    let deleted = if rest.is_empty() {
        clear(child, path, on_removed);
        branch.delete(key);
        true
    } else {
        delete_subtree(child, rest, path, on_removed)
    };
    path.pop();
    if deleted {
        prune(branch, key);
    }
    deleted
}

/// Removes one item from the leaf container addressed by `keys`, pruning the ancestors which became empty.
///
/// Returns `false` if the container does not exist. Removing an item which isn't in an existing container is a no-op which still returns `true`.
pub(super) fn delete_item<K, V>(
    node: &mut Node<K, V>,
    keys: &[K],
    full_path: &[K],
    item: &V,
    on_removed: &mut dyn FnMut(&[K], &V),
) -> bool {
    let (key, rest) = match keys.split_first() {
        Some(split) => split,
        None => {
            return match node {
                NodeValue::Leaf(leaf) => {
                    if leaf.remove(item) {
                        on_removed(full_path, item);
                    }
                    true
                }
                NodeValue::Branch(..) => false,
            };
        }
    };
    let branch = match node {
        NodeValue::Branch(branch) => branch,
        NodeValue::Leaf(..) => return false,
    };
    let child = match branch.get_mut(key) {
        Some(child) => child,
        None => return false,
    };
    let deleted = delete_item(child, rest, full_path, item, on_removed);
    if deleted {
        prune(branch, key);
    }
    deleted
}

/// Deletes `key` from `branch` if the node under it is empty.
#[inline]
fn prune<K, V>(branch: &mut Box<dyn BranchContainer<K, V>>, key: &K) {
    if branch.get(key).map_or(false, |child| child.is_empty()) {
        trace_log!("pruning empty node");
        branch.delete(key);
    }
}
