//! Directional navigation scenarios against a laid-out document.

use spark_nav::state::{set_nav_scope, JUMP_THRESHOLD_ATTR};
use spark_nav::{el, find_closest_focus_target, Direction, NodeId, Rect, Ui};

fn scoped_ui() -> Ui {
    let ui = Ui::new();
    let doc = ui.document();
    set_nav_scope(doc, doc.body(), true).unwrap();
    ui
}

fn button(ui: &Ui, parent: NodeId, rect: Rect) -> NodeId {
    let node = el("button")
        .selectable(true)
        .parent(parent)
        .build(ui)
        .unwrap();
    ui.document().set_rect(node, rect).unwrap();
    node
}

#[test]
fn weighted_metric_prefers_same_row() {
    let ui = scoped_ui();
    let doc = ui.document();
    let origin = button(&ui, doc.body(), Rect::new(0.0, 0.0, 10.0, 10.0));
    let a = button(&ui, doc.body(), Rect::new(0.0, 15.0, 25.0, 10.0));
    let _b = button(&ui, doc.body(), Rect::new(8.0, 12.0, 22.0, 18.0));
    doc.focus(origin).unwrap();

    assert_eq!(ui.find_next(Direction::Right, None), Some(a));
}

#[test]
fn equal_metrics_pick_first_in_document_order() {
    let ui = scoped_ui();
    let doc = ui.document();
    let origin = button(&ui, doc.body(), Rect::new(50.0, 50.0, 60.0, 60.0));
    let above_left = button(&ui, doc.body(), Rect::new(30.0, 46.0, 56.0, 40.0));
    let _above_right = button(&ui, doc.body(), Rect::new(30.0, 54.0, 64.0, 40.0));
    doc.focus(origin).unwrap();

    let results: Vec<_> = (0..5).map(|_| ui.find_next(Direction::Up, None)).collect();
    assert!(results.iter().all(|r| *r == Some(above_left)));
}

#[test]
fn inclusive_boundary_on_travel_axis() {
    let ui = scoped_ui();
    let doc = ui.document();
    let origin = button(&ui, doc.body(), Rect::new(0.0, 0.0, 10.0, 10.0));
    let below = button(&ui, doc.body(), Rect::new(10.0, 0.0, 10.0, 20.0));
    doc.focus(origin).unwrap();

    assert_eq!(ui.find_next(Direction::Down, None), Some(below));
}

#[test]
fn origin_outside_declared_scope_goes_nowhere() {
    let ui = scoped_ui();
    let doc = ui.document();
    let sidebar = el("aside").parent(doc.body()).build(&ui).unwrap();
    set_nav_scope(doc, sidebar, true).unwrap();

    let origin = button(&ui, doc.body(), Rect::new(0.0, 0.0, 10.0, 10.0));
    button(&ui, sidebar, Rect::new(0.0, 20.0, 30.0, 10.0));
    doc.focus(origin).unwrap();

    assert_eq!(ui.find_next(Direction::Right, Some(sidebar)), None);
}

#[test]
fn missing_threshold_never_matches() {
    let ui = scoped_ui();
    let doc = ui.document();
    let origin = button(&ui, doc.body(), Rect::new(0.0, 0.0, 10.0, 10.0));
    for direction in Direction::ALL {
        let offset = match direction {
            Direction::Up => Rect::new(-20.0, 0.0, 10.0, -10.0),
            Direction::Right => Rect::new(0.0, 20.0, 30.0, 10.0),
            Direction::Down => Rect::new(20.0, 0.0, 10.0, 30.0),
            Direction::Left => Rect::new(0.0, -20.0, -10.0, 10.0),
        };
        button(&ui, doc.body(), offset);
    }
    doc.focus(origin).unwrap();
    assert!(ui.find_next(Direction::Right, None).is_some());

    doc.remove_attribute(origin, JUMP_THRESHOLD_ATTR);
    for direction in Direction::ALL {
        assert_eq!(ui.find_next(direction, None), None);
    }

    doc.set_attribute(origin, JUMP_THRESHOLD_ATTR, "thirty").unwrap();
    for direction in Direction::ALL {
        assert_eq!(find_closest_focus_target(doc, direction, None), None);
    }
}

#[test]
fn grid_walk() {
    let ui = scoped_ui();
    let doc = ui.document();
    let mut grid = Vec::new();
    for row in 0..3 {
        for col in 0..3 {
            let rect = Rect::from_xywh(col as f64 * 20.0, row as f64 * 20.0, 16.0, 16.0);
            grid.push(button(&ui, doc.body(), rect));
        }
    }
    let at = |row: usize, col: usize| grid[row * 3 + col];

    doc.focus(at(0, 0)).unwrap();
    assert_eq!(ui.navigate(Direction::Right, None).unwrap(), Some(at(0, 1)));
    assert_eq!(ui.navigate(Direction::Down, None).unwrap(), Some(at(1, 1)));
    assert_eq!(ui.navigate(Direction::Down, None).unwrap(), Some(at(2, 1)));
    assert_eq!(ui.navigate(Direction::Down, None).unwrap(), None);
    assert_eq!(ui.navigate(Direction::Left, None).unwrap(), Some(at(2, 0)));
    assert_eq!(ui.navigate(Direction::Left, None).unwrap(), None);
    assert_eq!(doc.focused(), Some(at(2, 0)));
}

#[test]
fn navigation_stays_inside_modal_scope() {
    let ui = scoped_ui();
    let doc = ui.document();
    let behind = button(&ui, doc.body(), Rect::new(0.0, 100.0, 110.0, 10.0));
    let modal = el("dialog").parent(doc.body()).build(&ui).unwrap();
    set_nav_scope(doc, modal, true).unwrap();
    let ok = button(&ui, modal, Rect::new(0.0, 0.0, 10.0, 10.0));
    let cancel = button(&ui, modal, Rect::new(0.0, 20.0, 30.0, 10.0));

    doc.focus(ok).unwrap();
    assert_eq!(ui.find_next(Direction::Right, Some(modal)), Some(cancel));

    doc.focus(cancel).unwrap();
    assert_eq!(ui.find_next(Direction::Right, Some(modal)), None);
    assert_eq!(ui.find_next(Direction::Right, None), None);
    assert_ne!(ui.find_next(Direction::Right, Some(modal)), Some(behind));
}
