//! Suspension and resumption across virtual-list scrolls.

use std::cell::Cell;
use std::rc::Rc;

use prowl_core::{HierarchyExplorer, NodeId, WalkStatus};
use prowl_testing::{pump, FakeTree, Recorder};

/// 5 clickable items, 3 realized at a time. Indices 3 and 4 start off-screen.
fn five_item_feed(tree: &FakeTree) -> (NodeId, NodeId, Vec<NodeId>) {
    let items: Vec<NodeId> = (0..5)
        .map(|i| tree.clickable_leaf(&format!("item{i}")))
        .collect();
    let list = tree.virtual_list("feed", items.clone(), 3);
    let root = tree.container("screen", vec![list]);
    (root, list, items)
}

#[test]
fn unrealized_item_scrolls_and_suspends() {
    let tree = FakeTree::new();
    let (root, list, items) = five_item_feed(&tree);
    let tree = Rc::new(tree);

    let recorder = Recorder::new();
    let explorer = HierarchyExplorer::new(Rc::clone(&tree), root, recorder.callbacks(), || {});

    assert_eq!(explorer.start().unwrap(), WalkStatus::Suspended);

    // One scroll request, for exactly the first off-screen index.
    assert_eq!(tree.scroll_requests(), vec![(list, 3)]);
    // Items 0..=2 were acted on; item 3 was not.
    for item in &items[..3] {
        assert_eq!(recorder.count(*item, "on_view"), 1);
    }
    assert_eq!(recorder.count(items[3], "on_view"), 0);
    // The branch chain pins the suspension point.
    assert_eq!(explorer.branch_chain(), vec![0, 3]);
    assert_eq!(explorer.ancestor_chain(), vec![root, list]);
}

#[test]
fn settle_resumes_exactly_where_the_walk_left_off() {
    let tree = FakeTree::new();
    let (root, _list, items) = five_item_feed(&tree);
    let tree = Rc::new(tree);

    let recorder = Recorder::new();
    let ended = Rc::new(Cell::new(0));
    let ended_clone = Rc::clone(&ended);
    let explorer = HierarchyExplorer::new(
        Rc::clone(&tree),
        root,
        recorder.callbacks(),
        move || ended_clone.set(ended_clone.get() + 1),
    );

    explorer.start().unwrap();
    let visits_before = recorder.visits().len();

    tree.settle_layout();

    // The first action after the settle is on the item the walk suspended
    // for; nothing earlier in the path is re-invoked.
    let visits = recorder.visits();
    assert_eq!(visits[visits_before].0, items[3]);
    for (index, item) in items.iter().enumerate() {
        assert_eq!(recorder.count(*item, "on_view"), 1, "item {index}");
        assert_eq!(recorder.count(*item, "on_clickable_view"), 1, "item {index}");
    }
    assert!(explorer.is_complete());
    assert_eq!(ended.get(), 1);
    assert!(!tree.has_pending_settles());
}

#[test]
fn repeated_suspensions_keep_actions_exactly_once() {
    let tree = FakeTree::new();
    let items: Vec<NodeId> = (0..9)
        .map(|i| tree.clickable_leaf(&format!("item{i}")))
        .collect();
    let list = tree.virtual_list("feed", items.clone(), 3);
    let root = tree.container("screen", vec![list]);
    let tree = Rc::new(tree);

    let recorder = Recorder::new();
    let explorer = HierarchyExplorer::new(Rc::clone(&tree), root, recorder.callbacks(), || {});

    assert_eq!(explorer.start().unwrap(), WalkStatus::Suspended);
    let passes = pump(&tree, 10);

    // One settle per window jump: 3..5 and 6..8.
    assert_eq!(passes, 2);
    assert_eq!(tree.scroll_requests(), vec![(list, 3), (list, 6)]);
    for item in &items {
        assert_eq!(recorder.count(*item, "on_view"), 1);
    }
    assert_eq!(recorder.count(root, "on_view"), 1);
    assert_eq!(recorder.count(list, "on_view"), 1);
    assert!(explorer.is_complete());
}

#[test]
fn visit_order_is_stable_regardless_of_starting_window() {
    let tree = FakeTree::new();
    let items: Vec<NodeId> = (0..6).map(|i| tree.leaf(&format!("item{i}"))).collect();
    let list = tree.virtual_list("feed", items, 2);
    let root = tree.container("screen", vec![list]);
    let tree = Rc::new(tree);

    let first = Recorder::new();
    let walk = HierarchyExplorer::new(Rc::clone(&tree), root, first.callbacks(), || {});
    walk.start().unwrap();
    pump(&tree, 10);
    assert!(walk.is_complete());

    // The first walk left the window parked at the end of the list; a
    // second walk scrolls back and still produces the same order.
    let second = Recorder::new();
    let walk = HierarchyExplorer::new(Rc::clone(&tree), root, second.callbacks(), || {});
    walk.start().unwrap();
    pump(&tree, 10);
    assert!(walk.is_complete());

    assert_eq!(first.visits(), second.visits());
}

#[test]
fn nested_virtual_lists_resume_at_depth() {
    let tree = FakeTree::new();
    let mut all_nodes = Vec::new();
    let mut cards = Vec::new();
    for outer in 0..2 {
        let inner_items: Vec<NodeId> = (0..2)
            .map(|i| tree.clickable_leaf(&format!("card{outer}.photo{i}")))
            .collect();
        all_nodes.extend(inner_items.iter().copied());
        let gallery = tree.virtual_list(&format!("card{outer}.gallery"), inner_items, 1);
        let card = tree.container(&format!("card{outer}"), vec![gallery]);
        all_nodes.push(gallery);
        all_nodes.push(card);
        cards.push(card);
    }
    let feed = tree.virtual_list("feed", cards, 1);
    all_nodes.push(feed);
    let tree = Rc::new(tree);

    let recorder = Recorder::new();
    let explorer = HierarchyExplorer::new(Rc::clone(&tree), feed, recorder.callbacks(), || {});

    assert_eq!(explorer.start().unwrap(), WalkStatus::Suspended);
    pump(&tree, 16);

    assert!(explorer.is_complete());
    for node in &all_nodes {
        assert_eq!(recorder.count(*node, "on_view"), 1);
    }
}

#[test]
fn shrunk_list_resumes_past_the_missing_range() {
    let tree = FakeTree::new();
    let (root, list, items) = five_item_feed(&tree);
    let tree = Rc::new(tree);

    let recorder = Recorder::new();
    let ended = Rc::new(Cell::new(0));
    let ended_clone = Rc::clone(&ended);
    let explorer = HierarchyExplorer::new(
        Rc::clone(&tree),
        root,
        recorder.callbacks(),
        move || ended_clone.set(ended_clone.get() + 1),
    );

    assert_eq!(explorer.start().unwrap(), WalkStatus::Suspended);

    // The data source shrinks behind the suspended walk.
    tree.truncate_items(list, 2);
    tree.settle_layout();

    assert!(explorer.is_complete());
    assert_eq!(ended.get(), 1);
    assert_eq!(recorder.count(items[3], "on_view"), 0);
    assert_eq!(recorder.count(items[4], "on_view"), 0);
}

#[test]
fn suspension_is_not_an_abort() {
    let tree = FakeTree::new();
    let (root, _list, _items) = five_item_feed(&tree);
    let tree = Rc::new(tree);

    let explorer = HierarchyExplorer::new(
        Rc::clone(&tree),
        root,
        Recorder::new().callbacks(),
        || {},
    );

    assert_eq!(explorer.start().unwrap(), WalkStatus::Suspended);
    assert!(!explorer.is_aborted());
    assert!(!explorer.is_complete());
}
