use super::*;
use alloc::{collections::{BTreeMap, VecDeque}, rc::Rc, vec, vec::Vec};
use core::cell::Cell;

type EventTree = KeyTree<&'static str, u32>;

fn event_tree() -> EventTree {
    KeyTree::new(vec![Level::btree_map(), Level::btree_map(), Level::vec()])
        .expect("three-level structure is valid")
}

fn counters() -> (Rc<Cell<u32>>, Rc<Cell<u32>>, Callbacks<&'static str, u32>) {
    let (first, empty) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
    let callbacks = Callbacks::new()
        .on_first({
            let first = Rc::clone(&first);
            move |_| first.set(first.get() + 1)
        })
        .on_empty({
            let empty = Rc::clone(&empty);
            move |_| empty.set(empty.get() + 1)
        });
    (first, empty, callbacks)
}

#[test]
fn basic() {
    let mut tree = event_tree();
    assert_eq!(tree.size(), 0);
    assert_eq!(tree.depth(), 3);

    tree.add(&["click", "li"], 1).expect("path spans the tree");
    tree.add(&["click", "li"], 2).expect("path spans the tree");
    assert_eq!(tree.size(), 2);
    assert_eq!(tree.get(&["click", "li"]).to_vec(), [1, 2]);

    assert!(tree.delete_item(&["click", "li"], &1));
    assert_eq!(tree.size(), 1);

    // Removing an item which is already gone is a no-op
    assert!(tree.delete_item(&["click", "li"], &1));
    assert_eq!(tree.size(), 1);

    assert!(tree.delete_item(&["click", "li"], &2));
    assert_eq!(tree.size(), 0);
    assert!(tree.root().is_empty());
}

#[test]
fn prebuilt_root() {
    let root: BTreeMap<&'static str, Node<&'static str, u32>> = BTreeMap::new();
    let mut tree = KeyTree::new(vec![Level::root_branch(root), Level::btree_map(), Level::vec()])
        .expect("pre-built root is allowed at the first level");

    tree.add(&["click", "li"], 1).expect("path spans the tree");
    tree.add(&["click", "li"], 2).expect("path spans the tree");
    assert_eq!(tree.root().len(), 1);
    assert_eq!(tree.get(&["click", "li"]).to_vec(), [1, 2]);

    assert!(tree.delete_item(&["click", "li"], &1));
    assert!(tree.delete_item(&["click", "li"], &2));
    assert_eq!(tree.size(), 0);

    let root = tree.into_root();
    assert!(root.is_branch());
    assert!(root.is_empty());
}

#[test]
fn get_node_and_get() {
    let mut tree = event_tree();
    tree.add(&["click", "li"], 1)
        .and_then(|tree| tree.add(&["click", "li"], 2))
        .and_then(|tree| tree.add(&["click", "span"], 2))
        .expect("paths span the tree");

    let click = tree
        .get_node(&["click"])
        .and_then(|node| node.as_ref().branch())
        .expect("click branch exists");
    assert_eq!(click.keys(), ["li", "span"]);
    let span = click
        .get(&"span")
        .and_then(|node| node.as_ref().leaf())
        .expect("span leaf exists");
    assert_eq!(span.to_vec(), [2]);

    assert_eq!(tree.get(&["click"]).to_vec(), [1, 2, 2]);
    assert_eq!(tree.get(&[]).to_vec(), [1, 2, 2]);
    assert!(tree.get_node(&["keydown"]).is_none());
    assert!(tree.get_node(&["click", "li", "too deep"]).is_none());
}

#[test]
fn get_on_missing_deep_prefix_is_empty() {
    let tree: EventTree = KeyTree::new(vec![
        Level::btree_map(),
        Level::btree_map(),
        Level::btree_map(),
        Level::vec(),
    ])
    .expect("four-level structure is valid");
    let items = tree.get(&["foo"]);
    assert!(items.is_empty());
    assert_eq!(items.to_vec(), Vec::<u32>::new());
}

#[test]
fn get_item() {
    let mut tree = event_tree();
    tree.add(&["click", "li"], 7).expect("path spans the tree");
    assert_eq!(tree.get_item(&["click", "li"], &7), Some(&7));
    assert_eq!(tree.get_item(&["click", "li"], &8), None);
    assert_eq!(tree.get_item(&["click"], &7), None);
    assert_eq!(tree.get_item(&["keydown", "li"], &7), None);
}

#[test]
fn lifecycle_callbacks() {
    let (first, empty, callbacks) = counters();
    let mut tree: EventTree = KeyTree::with_callbacks(
        vec![Level::btree_map(), Level::btree_map(), Level::vec()],
        callbacks,
    )
    .expect("three-level structure is valid");

    tree.add(&["click", "li"], 1).expect("path spans the tree");
    assert_eq!((first.get(), empty.get()), (1, 0));

    tree.add(&["click", "li"], 2).expect("path spans the tree");
    assert_eq!((first.get(), empty.get()), (1, 0));

    assert!(tree.delete(&[]));
    assert_eq!((first.get(), empty.get()), (1, 1));

    // Clearing a tree which already is empty does not cross zero
    assert!(tree.delete(&[]));
    assert_eq!((first.get(), empty.get()), (1, 1));

    tree.add(&["keydown", "input"], 3).expect("path spans the tree");
    assert_eq!((first.get(), empty.get()), (2, 1));
    assert!(tree.delete_item(&["keydown", "input"], &3));
    assert_eq!((first.get(), empty.get()), (2, 2));
}

#[test]
fn callbacks_observe_the_tree() {
    let seen = Rc::new(Cell::new(usize::MAX));
    let callbacks = Callbacks::new().on_first({
        let seen = Rc::clone(&seen);
        move |tree: &EventTree| seen.set(tree.size())
    });
    let mut tree = KeyTree::with_callbacks(
        vec![Level::btree_map(), Level::btree_map(), Level::vec()],
        callbacks,
    )
    .expect("three-level structure is valid");
    tree.add(&["click", "li"], 1).expect("path spans the tree");
    // The item is already in place by the time the callback runs
    assert_eq!(seen.get(), 1);
}

#[test]
fn missing_keys() {
    let mut tree: EventTree = KeyTree::new(vec![Level::btree_map(), Level::vec()])
        .expect("two-level structure is valid");
    assert!(!tree.delete(&["abc"]));
    assert!(!tree.delete_item(&["abc"], &1));
    assert!(tree.is_empty());
}

#[test]
fn add_too_deep() {
    let mut tree: EventTree = KeyTree::new(vec![Level::btree_map(), Level::vec()])
        .expect("two-level structure is valid");
    assert_eq!(
        tree.add(&["a", "b", "c", "d"], 5).err(),
        Some(KeyTreeError::InvalidPath { len: 5, depth: 2 }),
    );
    assert!(tree.root().is_empty());
}

#[test]
fn add_too_shallow() {
    let mut tree = event_tree();
    assert_eq!(
        tree.add(&["click"], 5).err(),
        Some(KeyTreeError::UnsupportedLeafContainer { depth: 1 }),
    );
    // Nothing was created on the way
    assert!(tree.get_node(&["click"]).is_none());
    assert!(tree.is_empty());
}

#[test]
fn mismatched_prebuilt_nodes() {
    let mut root: BTreeMap<&'static str, Node<&'static str, u32>> = BTreeMap::new();
    root.insert("click", Node::from_leaf(vec![1_u32]));
    let mut tree = KeyTree::new(vec![Level::root_branch(root), Level::btree_map(), Level::vec()])
        .expect("shapes of pre-built children are only checked when walking");
    assert_eq!(
        tree.add(&["click", "li"], 2).err(),
        Some(KeyTreeError::UnsupportedBranchContainer { depth: 1 }),
    );
    assert_eq!(tree.size(), 1);
}

#[test]
fn invalid_structures() {
    assert_eq!(
        EventTree::new(vec![]).err(),
        Some(KeyTreeError::EmptyStructure),
    );
    assert_eq!(
        EventTree::new(vec![
            Level::branch_with_key(|_| BTreeMap::<&'static str, Node<&'static str, u32>>::new()),
            Level::vec(),
        ])
        .err(),
        Some(KeyTreeError::KeyedRoot),
    );
    assert_eq!(
        EventTree::new(vec![
            Level::btree_map(),
            Level::root_branch(BTreeMap::<&'static str, Node<&'static str, u32>>::new()),
            Level::vec(),
        ])
        .err(),
        Some(KeyTreeError::MisplacedInstance { depth: 1 }),
    );
    assert_eq!(
        EventTree::new(vec![Level::btree_map(), Level::vec(), Level::vec()]).err(),
        Some(KeyTreeError::UnsupportedBranchContainer { depth: 1 }),
    );
    assert_eq!(
        EventTree::new(vec![Level::btree_map(), Level::btree_map()]).err(),
        Some(KeyTreeError::UnsupportedLeafContainer { depth: 1 }),
    );
    assert_eq!(
        EventTree::new(vec![Level::btree_map()]).err(),
        Some(KeyTreeError::UnsupportedLeafContainer { depth: 0 }),
    );
    assert_eq!(
        EventTree::new(vec![Level::vec(), Level::vec()]).err(),
        Some(KeyTreeError::UnsupportedBranchContainer { depth: 0 }),
    );
}

#[test]
fn delete_reports_removed_items() {
    let keys = [
        (["first", "mutate"], "abc"),
        (["first", "notify"], "def"),
    ];
    let expected = keys
        .iter()
        .map(|(path, item)| (path.to_vec(), *item))
        .collect::<Vec<_>>();
    let mut tree: KeyTree<&'static str, &'static str> =
        KeyTree::new(vec![Level::btree_map(), Level::btree_map(), Level::vec()])
            .expect("three-level structure is valid");
    let populate = |tree: &mut KeyTree<&'static str, &'static str>| {
        for (path, item) in keys.iter() {
            tree.add(path, *item).expect("path spans the tree");
        }
    };

    populate(&mut tree);
    let mut removed = Vec::new();
    assert!(tree.delete_with(&[], |path, item| removed.push((path.to_vec(), *item))));
    assert_eq!(removed, expected);
    assert!(tree.is_empty());

    populate(&mut tree);
    let mut removed = Vec::new();
    assert!(tree.delete_with(&["first"], |path, item| removed.push((path.to_vec(), *item))));
    assert_eq!(removed, expected);
    assert!(tree.is_empty());

    populate(&mut tree);
    let mut removed = Vec::new();
    assert!(tree.delete_item_with(&["first", "mutate"], &"abc", |path, item| {
        removed.push((path.to_vec(), *item))
    }));
    assert_eq!(removed, expected[..1].to_vec());
    assert_eq!(tree.size(), 1);

    // Nothing to report for an item which isn't there
    let mut removed = Vec::new();
    assert!(tree.delete_item_with(&["first", "notify"], &"xyz", |path, item| {
        removed.push((path.to_vec(), *item))
    }));
    assert!(removed.is_empty());
}

#[test]
fn is_empty() {
    let mut tree = event_tree();
    assert!(tree.is_empty());

    tree.add(&["click", "li"], 1).expect("path spans the tree");
    tree.add(&["click", "li"], 2).expect("path spans the tree");
    assert!(!tree.is_empty());

    tree.delete_item(&["click", "li"], &1);
    assert!(!tree.is_empty());
    tree.delete_item(&["click", "li"], &1);
    assert!(!tree.is_empty());
    tree.delete_item(&["click", "li"], &2);
    assert!(tree.is_empty());
}

#[test]
fn pruning_propagates_up_to_the_root() {
    let mut tree: EventTree = KeyTree::new(vec![
        Level::btree_map(),
        Level::btree_map(),
        Level::btree_map(),
        Level::vec(),
    ])
    .expect("four-level structure is valid");
    tree.add(&["a", "b", "c"], 1).expect("path spans the tree");
    tree.add(&["a", "d", "e"], 2).expect("path spans the tree");

    assert!(tree.delete_item(&["a", "b", "c"], &1));
    assert!(tree.get_node(&["a", "b", "c"]).is_none());
    assert!(tree.get_node(&["a", "b"]).is_none());
    assert!(tree.get_node(&["a"]).is_some());

    assert!(tree.delete_item(&["a", "d", "e"], &2));
    assert!(tree.get_node(&["a"]).is_none());
    assert!(tree.root().is_branch());
    assert!(tree.root().is_empty());
}

#[test]
fn subtree_delete_prunes_parents() {
    let mut tree = event_tree();
    tree.add(&["click", "li"], 1).expect("path spans the tree");
    tree.add(&["keydown", "input"], 2).expect("path spans the tree");

    assert!(tree.delete(&["click", "li"]));
    assert!(tree.get_node(&["click"]).is_none());
    assert_eq!(tree.size(), 1);
    assert!(!tree.delete(&["click", "li"]));
    assert!(!tree.delete(&["keydown", "input", "too deep"]));
    assert_eq!(tree.size(), 1);
}

#[test]
fn duplicate_items() {
    let mut tree = event_tree();
    tree.add(&["click", "li"], 1).expect("path spans the tree");
    tree.add(&["click", "li"], 1).expect("path spans the tree");
    assert_eq!(tree.size(), 2);
    assert!(tree.delete_item(&["click", "li"], &1));
    assert_eq!(tree.get(&["click", "li"]).to_vec(), [1]);
}

#[test]
fn single_level() {
    let (first, empty, callbacks) = counters();
    let mut tree: EventTree = KeyTree::with_callbacks(vec![Level::vec()], callbacks)
        .expect("a lone leaf level is valid");
    tree.add(&[], 1)
        .and_then(|tree| tree.add(&[], 2))
        .expect("empty key path spans a single-level tree");
    assert_eq!(tree.size(), 2);
    assert!(!tree.is_empty());
    assert_eq!(tree.get(&[]).to_vec(), [1, 2]);
    assert_eq!(
        tree.add(&["x"], 3).err(),
        Some(KeyTreeError::InvalidPath { len: 2, depth: 1 }),
    );

    assert!(tree.delete_item(&[], &1));
    assert!(tree.delete(&[]));
    assert!(tree.is_empty());
    assert_eq!((first.get(), empty.get()), (1, 1));
}

#[test]
fn aggregate_uses_leaf_factory() {
    let tree: EventTree = KeyTree::new(vec![
        Level::btree_map(),
        Level::leaf::<VecDeque<u32>>(),
    ])
    .expect("two-level structure is valid");
    assert!(tree.get(&["anything"]).is_empty());

    let keyed: EventTree = KeyTree::new(vec![
        Level::btree_map(),
        Level::leaf_with_key(|_| Vec::<u32>::with_capacity(4)),
    ])
    .expect("two-level structure is valid");
    assert!(keyed.get(&[]).is_empty());
}

#[test]
fn aggregate_outgrows_fixed_capacity_leaves() {
    use arrayvec::ArrayVec;

    let mut tree: EventTree = KeyTree::new(vec![
        Level::btree_map(),
        Level::leaf::<ArrayVec<[u32; 2]>>(),
    ])
    .expect("two-level structure is valid");
    tree.add(&["a"], 1)
        .and_then(|tree| tree.add(&["a"], 2))
        .and_then(|tree| tree.add(&["b"], 3))
        .and_then(|tree| tree.add(&["b"], 4))
        .expect("paths span the tree");
    assert_eq!(tree.size(), 4);

    let all = tree.get(&[]);
    assert_eq!(all.fixed_capacity(), None);
    assert_eq!(all.to_vec(), [1, 2, 3, 4]);

    // Few enough items still go into the leaf level's own container
    let some = tree.get(&["b"]);
    assert_eq!(some.fixed_capacity(), Some(2));
    assert_eq!(some.to_vec(), [3, 4]);
}

#[test]
fn factory_declares_key_use() {
    let plain: Factory<&'static str, u32> = Factory::plain(|| 1);
    let keyed: Factory<&'static str, u32> = Factory::with_key(|key: &&'static str| key.len() as u32);
    assert!(!plain.needs_key());
    assert!(keyed.needs_key());
    assert_eq!(plain.build(&"abc"), 1);
    assert_eq!(keyed.build(&"abc"), 3);
    assert_eq!(keyed.build_plain(), None);

    assert!(Callbacks::<&'static str, u32>::new().is_empty());
    assert!(!Callbacks::<&'static str, u32>::new().on_empty(|_| {}).is_empty());
}

#[cfg(feature = "std")]
#[test]
fn panicking_callback_is_kept() {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    let calls = Rc::new(Cell::new(0));
    let callbacks = Callbacks::new().on_first({
        let calls = Rc::clone(&calls);
        move |_: &EventTree| {
            calls.set(calls.get() + 1);
            if calls.get() == 1 {
                panic!("first notification fails");
            }
        }
    });
    let mut tree = KeyTree::with_callbacks(
        vec![Level::btree_map(), Level::btree_map(), Level::vec()],
        callbacks,
    )
    .expect("three-level structure is valid");

    let result = catch_unwind(AssertUnwindSafe(|| {
        let _ = tree.add(&["click", "li"], 1);
    }));
    assert!(result.is_err());
    // The item went in before the callback ran
    assert_eq!(tree.size(), 1);

    assert!(tree.delete(&[]));
    tree.add(&["click", "li"], 2).expect("path spans the tree");
    assert_eq!(calls.get(), 2);
}
