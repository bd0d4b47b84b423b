//! Tree-level scenarios spanning several submodules.

use super::*;

use crate::browser::favicon::DEFAULT_FAVICON;
use crate::context::MemoryContextFactory;
use crate::identifiers::TabId;

fn empty_tree(factory: &MemoryContextFactory) -> TabTree {
    TabTree::builder()
        .context_factory(factory.clone())
        .empty()
        .build()
        .expect("build")
}

fn add(tree: &mut TabTree, url: &str, parent: Option<TabId>, selected: bool) -> TabId {
    let mut request = AddTab::new().url(url).selected(selected);
    if let Some(parent) = parent {
        request = request.parent(parent);
    }
    tree.add_tab(request).expect("add tab")
}

fn drain(events: &mut tokio::sync::mpsc::UnboundedReceiver<TreeEvent>) -> Vec<TreeEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

fn count(events: &[TreeEvent], kind: TreeEvent) -> usize {
    events.iter().filter(|&&event| event == kind).count()
}

#[test]
fn test_fixture_scenario() {
    let factory = MemoryContextFactory::new();
    let mut tree = empty_tree(&factory);
    let mut events = tree.subscribe();

    let a = add(&mut tree, "http://google.com", None, false);
    let b = add(&mut tree, "http://yahoo.com", None, true);
    let c = add(&mut tree, "http://amazon.com", None, false);

    let s: Vec<TabId> = (1..=5)
        .map(|i| add(&mut tree, &format!("http://s{i}.com"), Some(a), i == 3))
        .collect();
    let s2: Vec<TabId> = (1..=5)
        .map(|i| add(&mut tree, &format!("http://s2{i}.com"), Some(s[1]), i == 3))
        .collect();

    assert_eq!(tree.selected_tab(), Some(s2[2]));
    assert_eq!(
        count(&drain(&mut events), TreeEvent::TreeLayoutChanged),
        13
    );

    let mut expected = vec![a, s[0], s[1]];
    expected.extend(&s2);
    expected.extend([s[2], s[3], s[4], b, c]);
    assert_eq!(tree.tab_ids(), expected);

    tree.drop_tab_and_children(s[1]).expect("drop");
    assert_eq!(tree.selected_tab(), Some(s[2]));
    assert_eq!(tree.tab_ids(), vec![a, s[0], s[2], s[3], s[4], b, c]);
    for id in &s2 {
        assert!(!tree.contains(*id));
    }

    let after_drop = drain(&mut events);
    assert_eq!(count(&after_drop, TreeEvent::TreeLayoutChanged), 1);
    assert_eq!(count(&after_drop, TreeEvent::SelectedTabChanged), 1);
}

#[test]
fn test_display_dump() {
    let factory = MemoryContextFactory::new();
    let mut tree = empty_tree(&factory);
    let a = add(&mut tree, "a", None, false);
    add(&mut tree, "a1", Some(a), false);
    add(&mut tree, "b", None, false);

    assert_eq!(
        tree.to_string(),
        "[*]   Tab: a\n[ ]      Tab: a1\n[ ]   Tab: b\n"
    );
}

#[test]
fn test_rows() {
    let factory = MemoryContextFactory::new();
    let mut tree = empty_tree(&factory);
    let a = add(&mut tree, "https://a.com/", None, false);
    let a1 = add(&mut tree, "https://a1.com/", Some(a), false);
    tree.add_tab(AddTab::new()).expect("empty tab");
    tree.process_pending_events();
    tree.handle_resource_event(a1, crate::context::ResourceEvent::TitleChange("A1".into()))
        .expect("title");

    let rows = tree.rows();
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].tab_id, a);
    assert_eq!(rows[0].depth, 0);
    assert!(rows[0].selected);
    assert_eq!(rows[0].title, "https://a.com/");
    assert_eq!(rows[0].favicon, "https://a.com/favicon.ico");

    assert_eq!(rows[1].depth, 1);
    assert_eq!(rows[1].title, "A1");
    assert!(!rows[1].loading);

    assert_eq!(rows[2].title, "New tab");
    assert_eq!(rows[2].favicon, DEFAULT_FAVICON);
}

#[test]
fn test_tab_update_reaches_listener() {
    let factory = MemoryContextFactory::new();
    let mut tree = empty_tree(&factory);
    let a = add(&mut tree, "https://a.com/", None, false);
    let mut events = tree.subscribe();

    factory
        .last()
        .expect("context")
        .emit(crate::context::ResourceEvent::TitleChange("A".into()));
    tree.process_pending_events();

    assert!(drain(&mut events).contains(&TreeEvent::TabUpdate(a)));
}

#[test]
fn test_dropped_listener_is_pruned() {
    let factory = MemoryContextFactory::new();
    let mut tree = empty_tree(&factory);
    let events = tree.subscribe();
    drop(events);

    add(&mut tree, "a", None, false);
    assert!(tree.listeners.is_empty());
}

#[test]
fn test_close_releases_contexts() {
    let factory = MemoryContextFactory::new();
    let mut tree = empty_tree(&factory);
    let a = add(&mut tree, "a", None, false);
    add(&mut tree, "a1", Some(a), false);
    add(&mut tree, "b", None, false);

    tree.close();
    assert_eq!(factory.contexts().len(), 3);
    for context in factory.contexts() {
        assert_eq!(context.subscriber_count(), 0);
    }
}

#[test]
fn test_previous_walk_mirrors_pre_order() {
    let factory = MemoryContextFactory::new();
    let mut tree = empty_tree(&factory);
    let a = add(&mut tree, "a", None, false);
    let a1 = add(&mut tree, "a1", Some(a), false);
    add(&mut tree, "a1x", Some(a1), false);
    add(&mut tree, "b", None, false);

    let mut backwards = Vec::new();
    let mut cursor = tree.last_tab();
    while let Some(id) = cursor {
        backwards.push(id);
        cursor = tree.previous_tab(id).expect("previous");
    }
    backwards.reverse();
    assert_eq!(backwards, tree.tab_ids());
    assert_eq!(backwards.first().copied(), tree.first_tab());
}
