//! Headless exploration demo: fuzz-click a scripted feed screen.
//!
//! Run with `RUST_LOG=debug` to watch individual clicks, scrolls and
//! suspensions go by.

use std::rc::Rc;

use anyhow::ensure;
use prowl_core::{
    monitor_scopes, HierarchyExplorer, HostTree, LifecycleEvent, NodeId, Verdict,
    ViewCallbacks, WalkStatus,
};
use prowl_testing::{pump, FakeScopes, FakeTree};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let scopes = FakeScopes::new();
    monitor_scopes(&scopes);
    scopes.emit("FeedScreen", LifecycleEvent::Attached, false);
    scopes.emit("FeedScreen", LifecycleEvent::Created, false);
    scopes.emit("FeedScreen", LifecycleEvent::Started, false);
    scopes.emit("FeedScreen", LifecycleEvent::Resumed, false);
    scopes.emit("ComposerSheet", LifecycleEvent::Attached, true);

    let tree = Rc::new(FakeTree::new());
    let root = build_feed_screen(&tree);

    let callbacks = ViewCallbacks::clicking().on_view(|tree: &FakeTree, details| {
        log::debug!(
            "visiting {} at depth {}",
            tree.node_label(details.node),
            details.ancestors.len()
        );
        Ok(Verdict::Continue)
    });

    let explorer = HierarchyExplorer::new(Rc::clone(&tree), root, callbacks, || {
        log::info!("walk complete")
    });

    match explorer.start()? {
        WalkStatus::Suspended => {
            let passes = pump(&tree, 64);
            log::info!("layout settled {passes} times to finish the walk");
        }
        status => log::info!("first pass finished with {status:?}"),
    }

    scopes.emit("FeedScreen", LifecycleEvent::Paused, false);

    ensure!(explorer.is_complete(), "walk did not complete");
    log::info!(
        "fuzzed {} clicks across the screen ({} scroll requests)",
        tree.clicks().len(),
        tree.scroll_requests().len()
    );
    Ok(())
}

/// A toolbar plus a virtualized feed of cards, six cards realized at a time.
fn build_feed_screen(tree: &FakeTree) -> NodeId {
    let back = tree.clickable_leaf("toolbar.back");
    let title = tree.leaf("toolbar.title");
    let overflow = tree.interactive_leaf("toolbar.overflow", true, true);
    let toolbar = tree.container("toolbar", vec![back, title, overflow]);

    let cards: Vec<NodeId> = (0..24)
        .map(|i| {
            let avatar = tree.clickable_leaf(&format!("card{i}.avatar"));
            let body = tree.leaf(&format!("card{i}.body"));
            let like = tree.interactive_leaf(&format!("card{i}.like"), true, true);
            tree.container(&format!("card{i}"), vec![avatar, body, like])
        })
        .collect();
    let feed = tree.virtual_list("feed", cards, 6);

    tree.container("screen", vec![toolbar, feed])
}
