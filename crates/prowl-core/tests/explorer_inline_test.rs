//! Unit-level walks relocated out of `explorer.rs` so they can use the
//! `prowl-testing` scripted tree without the cyclic dev-dependency pulling in
//! a second copy of `prowl-core`.

use std::cell::RefCell;
use std::rc::Rc;

use prowl_testing::FakeTree;

use prowl_core::action::{Action, Verdict, ViewCallbacks};
use prowl_core::explorer::{HierarchyExplorer, WalkStatus};
use prowl_core::tree::{HostTree, NodeId};

fn recording_callbacks(
    visits: &Rc<RefCell<Vec<NodeId>>>,
) -> ViewCallbacks<FakeTree> {
    let visits = Rc::clone(visits);
    ViewCallbacks::new().on_view(move |_tree, details| {
        visits.borrow_mut().push(details.node);
        Ok(Verdict::Continue)
    })
}

#[test]
fn static_tree_walks_preorder() {
    let tree = FakeTree::new();
    let a = tree.leaf("a");
    let b = tree.leaf("b");
    let inner = tree.container("inner", vec![b]);
    let root = tree.container("root", vec![a, inner]);
    let tree = Rc::new(tree);

    let visits = Rc::new(RefCell::new(Vec::new()));
    let explorer = HierarchyExplorer::new(
        Rc::clone(&tree),
        root,
        recording_callbacks(&visits),
        || {},
    );

    assert_eq!(explorer.start().unwrap(), WalkStatus::Completed);
    assert_eq!(*visits.borrow(), vec![root, a, inner, b]);
}

#[test]
fn adapterless_list_is_a_leaf() {
    let tree = FakeTree::new();
    let list = tree.adapterless_list("list");
    let root = tree.container("root", vec![list]);
    let tree = Rc::new(tree);

    let visits = Rc::new(RefCell::new(Vec::new()));
    let explorer = HierarchyExplorer::new(
        Rc::clone(&tree),
        root,
        recording_callbacks(&visits),
        || {},
    );

    assert_eq!(explorer.start().unwrap(), WalkStatus::Completed);
    assert_eq!(*visits.borrow(), vec![root, list]);
    assert!(tree.scroll_requests().is_empty());
}

#[test]
fn custom_actions_run_in_declared_order() {
    let tree = FakeTree::new();
    let target = tree.clickable_leaf("target");
    let root = tree.container("root", vec![target]);
    let tree = Rc::new(tree);

    let log = Rc::new(RefCell::new(Vec::new()));
    let probe_log = Rc::clone(&log);
    let tap_log = Rc::clone(&log);
    let actions = vec![
        Action::new(
            "probe",
            |_: &FakeTree, _| true,
            move |_, details| {
                probe_log.borrow_mut().push(("probe", details.node));
                Ok(Verdict::Continue)
            },
        ),
        Action::new(
            "tap",
            |tree: &FakeTree, node| tree.is_clickable(node),
            move |tree, details| {
                tree.perform_click(details.node);
                tap_log.borrow_mut().push(("tap", details.node));
                Ok(Verdict::Continue)
            },
        ),
    ];

    let explorer =
        HierarchyExplorer::with_actions(Rc::clone(&tree), root, actions, || {});
    explorer.start().unwrap();

    assert_eq!(
        *log.borrow(),
        vec![("probe", root), ("probe", target), ("tap", target)]
    );
    assert_eq!(tree.clicks().len(), 1);
}

#[test]
fn empty_list_walks_without_suspending() {
    let tree = FakeTree::new();
    let list = tree.virtual_list("list", vec![], 4);
    let root = tree.container("root", vec![list]);
    let tree = Rc::new(tree);

    let explorer = HierarchyExplorer::new(
        Rc::clone(&tree),
        root,
        ViewCallbacks::new(),
        || {},
    );

    assert_eq!(explorer.start().unwrap(), WalkStatus::Completed);
    assert!(tree.scroll_requests().is_empty());
}
