//! End-to-end lifecycle behaviour through the application root.
//!
//! Covers exactly-once cleanup on removal, replacement on re-registration,
//! unregistered removals, and cleanup of descendants when only an ancestor
//! is detached.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_nav::primitives::{component, el, Component};
use spark_nav::{Error, NodeId, Ui};

fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
    let count = Rc::new(Cell::new(0));
    let count_clone = count.clone();
    (count, move || count_clone.set(count_clone.get() + 1))
}

fn attached(ui: &Ui) -> NodeId {
    el("div").parent(ui.document().body()).build(ui).unwrap()
}

#[test]
fn cleanup_fires_once_after_delivery() {
    let ui = Ui::new();
    let node = attached(&ui);
    let (count, cleanup) = counter();
    ui.on_removed(node, cleanup).unwrap();

    ui.document().detach(node).unwrap();
    assert_eq!(count.get(), 0, "cleanup must not run synchronously");

    ui.flush();
    assert_eq!(count.get(), 1);

    ui.flush();
    assert_eq!(count.get(), 1);
}

#[test]
fn second_registration_wins() {
    let ui = Ui::new();
    let node = attached(&ui);
    let (first, first_cleanup) = counter();
    let (second, second_cleanup) = counter();

    ui.on_removed(node, first_cleanup).unwrap();
    ui.on_removed(node, second_cleanup).unwrap();

    ui.document().detach(node).unwrap();
    ui.flush();

    assert_eq!(first.get(), 0);
    assert_eq!(second.get(), 1);
}

#[test]
fn removing_untracked_node_is_quiet() {
    let ui = Ui::new();
    let tracked = attached(&ui);
    let untracked = attached(&ui);
    let (count, cleanup) = counter();
    ui.on_removed(tracked, cleanup).unwrap();

    ui.document().detach(untracked).unwrap();
    ui.flush();

    assert_eq!(count.get(), 0);
    assert!(ui.lifecycle().is_registered(tracked));
}

#[test]
fn ancestor_detach_cleans_descendants() {
    let ui = Ui::new();
    let doc = ui.document();
    let order = Rc::new(RefCell::new(Vec::new()));

    let leaf = el("button").build(&ui).unwrap();
    let middle = el("div").child(leaf).build(&ui).unwrap();
    let outer = el("section").parent(doc.body()).child(middle).build(&ui).unwrap();

    for (name, node) in [("leaf", leaf), ("middle", middle)] {
        let order = order.clone();
        ui.on_removed(node, move || order.borrow_mut().push(name)).unwrap();
    }

    doc.detach(outer).unwrap();
    ui.flush();

    // Document order: middle before leaf.
    assert_eq!(*order.borrow(), vec!["middle", "leaf"]);
    assert!(ui.lifecycle().is_empty());
}

#[test]
fn text_nodes_cannot_be_tracked() {
    let ui = Ui::new();
    let text = ui.document().create_text("label");
    assert!(matches!(
        ui.on_removed(text, || {}),
        Err(Error::InvalidArgument { .. })
    ));
}

#[test]
fn component_unmounts_with_its_parent() {
    let ui = Ui::new();
    let doc = ui.document();
    let screen = el("main").parent(doc.body()).build(&ui).unwrap();
    let (count, cleanup) = counter();

    component(&ui, Some(screen), move |ui| {
        let root = el("div")
            .child(el("button").selectable(true).child("Play").build(ui)?)
            .build(ui)?;
        Ok(Component::new(root, cleanup))
    })
    .unwrap();

    doc.remove_child(doc.body(), screen).unwrap();
    assert_eq!(count.get(), 0);
    ui.flush();
    assert_eq!(count.get(), 1);
}

#[test]
fn cleanup_may_mutate_the_tree() {
    let ui = Ui::new();
    let doc = ui.document().clone();
    let first = attached(&ui);
    let second = attached(&ui);
    let (count, cleanup) = counter();

    ui.on_removed(second, cleanup).unwrap();
    let doc_clone = doc.clone();
    ui.on_removed(first, move || {
        doc_clone.detach(second).unwrap();
    })
    .unwrap();

    doc.detach(first).unwrap();
    ui.flush();

    assert_eq!(count.get(), 1);
    assert_eq!(doc.parent(second), None);
}
