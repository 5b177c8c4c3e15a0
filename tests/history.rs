use mindgraph::geometry::rectangle::Rectangle;
use mindgraph::geometry::vector::Vector2;
use mindgraph::Graph;

fn rect(x: f64, y: f64) -> Rectangle {
    Rectangle::new(Vector2::new(x, y), 10.0, 10.0)
}

fn uuids(g: &Graph) -> Vec<String> {
    g.iter_nodes().map(|(_, n)| n.uuid.clone()).collect()
}

#[test]
fn undo_and_redo_walk_the_steps() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0));
    let b = g.add_node_with_body(rect(100.0, 0.0));
    g.connect_node(a, b);
    let before = uuids(&g);

    assert!(g.undo());
    assert_eq!(g.link_count(), 0);
    assert_eq!(g.node_count(), 2);
    assert!(g.undo());
    assert_eq!(g.node_count(), 1);
    assert!(g.undo());
    assert_eq!(g.node_count(), 0);
    assert!(!g.undo());

    assert!(g.redo());
    assert!(g.redo());
    assert!(g.redo());
    assert!(!g.redo());
    assert_eq!(uuids(&g), before);
    assert_eq!(g.link_count(), 1);
    assert!(g.is_consistent());
}

#[test]
fn failed_operations_do_not_record() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0));
    let len = g.history().len();
    assert!(!g.connect_node(a, a));
    assert!(!g.delete_node(42));
    assert!(!g.edit_node_inner_text(42, "x"));
    assert!(!g.rotate_node(42, 10.0));
    assert_eq!(g.history().len(), len);
}

#[test]
fn drags_record_once_when_finished() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0));
    let len = g.history().len();
    for _ in 0..10 {
        g.move_node(a, Vector2::new(1.0, 0.0));
    }
    assert_eq!(g.history().len(), len);
    g.move_finished();
    assert_eq!(g.history().len(), len + 1);
    assert!(g.undo());
    assert_eq!(g.node(a).unwrap().body_shape.location_left_top, Vector2::ZERO);
}

#[test]
fn history_is_bounded() {
    let mut g = Graph::new();
    let mut settings = g.settings().clone();
    settings.history_max_size = 3;
    g.set_settings(settings).unwrap();
    for i in 0..10 {
        g.add_node_with_body(rect(i as f64 * 100.0, 0.0));
    }
    assert_eq!(g.history().len(), 3);
    assert!(g.undo());
    assert!(g.undo());
    assert!(!g.undo());
    assert_eq!(g.node_count(), 8);
}

#[test]
fn record_after_undo_discards_redo() {
    let mut g = Graph::new();
    g.add_node_with_body(rect(0.0, 0.0));
    g.add_node_with_body(rect(100.0, 0.0));
    g.undo();
    g.add_node_with_body(rect(200.0, 0.0));
    assert!(!g.redo());
    assert_eq!(g.node_count(), 2);
}

#[test]
fn selection_and_cursor_survive_undo() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0));
    g.set_selected(a, true);
    g.set_cursor_node(Some(a));
    g.add_node_with_body(rect(100.0, 0.0));
    assert!(g.undo());
    let id = g.node_ids()[0];
    assert!(g.node(id).unwrap().is_selected);
    assert_eq!(g.cursor_node(), Some(id));
    assert!(g.undo());
    assert_eq!(g.cursor_node(), None);
}

#[test]
fn stringify_marks_current() {
    let mut g = Graph::new();
    g.add_node_with_body(rect(0.0, 0.0));
    g.add_node_with_body(rect(100.0, 0.0));
    g.undo();
    assert_eq!(g.history().stringify(), "0 > [1] > 2 > ");
}
