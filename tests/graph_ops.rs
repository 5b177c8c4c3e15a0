use mindgraph::geometry::line::Line;
use mindgraph::geometry::rectangle::Rectangle;
use mindgraph::geometry::shape::Shape;
use mindgraph::geometry::vector::Vector2;
use mindgraph::model::{Direction, LinkKey, NodeId};
use mindgraph::{Graph, GROW_NODE_TEXT};

fn rect(x: f64, y: f64, w: f64, h: f64) -> Rectangle {
    Rectangle::new(Vector2::new(x, y), w, h)
}

fn body(g: &Graph, id: NodeId) -> Rectangle {
    g.node(id).unwrap().body_shape
}

#[test]
fn connect_rejects_self_duplicate_and_unknown() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0, 10.0, 10.0));
    let b = g.add_node_with_body(rect(100.0, 0.0, 10.0, 10.0));
    assert!(g.connect_node(a, b));
    assert!(!g.connect_node(a, b));
    assert!(!g.connect_node(a, a));
    assert!(!g.connect_node(a, 99));
    assert!(!g.connect_node(99, a));
    assert_eq!(g.link_count(), 1);
    assert_eq!(g.node(a).unwrap().children, vec![b]);
    assert!(g.is_consistent());
}

#[test]
fn delete_node_drops_every_touching_edge() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0, 10.0, 10.0));
    let b = g.add_node_with_body(rect(100.0, 0.0, 10.0, 10.0));
    let c = g.add_node_with_body(rect(200.0, 0.0, 10.0, 10.0));
    g.connect_node(a, b);
    g.connect_node(b, c);
    g.connect_node(c, a);
    assert!(g.delete_node(b));
    assert!(!g.delete_node(b));
    assert_eq!(g.node_count(), 2);
    assert_eq!(g.link_count(), 1);
    assert!(g.node(a).unwrap().children.is_empty());
    assert!(g.link(c, a).is_some());
    assert!(g.is_consistent());
}

#[test]
fn reverse_pair_is_shifting() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0, 10.0, 10.0));
    let b = g.add_node_with_body(rect(100.0, 0.0, 10.0, 10.0));
    g.connect_node(a, b);
    assert!(!g.link(a, b).unwrap().is_shifting);
    g.connect_node(b, a);
    assert!(g.link(a, b).unwrap().is_shifting);
    assert!(g.link(b, a).unwrap().is_shifting);
    g.disconnect_node(b, a);
    assert!(!g.link(a, b).unwrap().is_shifting);
}

#[test]
fn shifted_link_body_is_offset_centre_line() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0, 100.0, 100.0));
    let b = g.add_node_with_body(rect(300.0, 0.0, 100.0, 100.0));
    g.connect_node(a, b);
    g.connect_node(b, a);
    match g.link_body_shape(LinkKey::new(a, b)) {
        Some(Shape::Line(line)) => {
            assert!((line.start.y - 100.0).abs() < 1e-9);
            assert!((line.end.y - 100.0).abs() < 1e-9);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn reverse_links_keeps_label() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0, 10.0, 10.0));
    let b = g.add_node_with_body(rect(100.0, 0.0, 10.0, 10.0));
    g.connect_node(a, b);
    g.edit_links_inner_text(&[LinkKey::new(a, b)], "likes");
    assert_eq!(g.reverse_links(&[LinkKey::new(a, b)]), 1);
    assert!(g.link(a, b).is_none());
    assert_eq!(g.link(b, a).unwrap().inner_text, "likes");
    assert_eq!(g.node(b).unwrap().children, vec![a]);
    assert!(g.node(a).unwrap().children.is_empty());
    assert!(g.is_consistent());
}

#[test]
fn cut_stroke_deletes_crossed_links() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0, 10.0, 10.0));
    let b = g.add_node_with_body(rect(100.0, 0.0, 10.0, 10.0));
    let c = g.add_node_with_body(rect(0.0, 100.0, 10.0, 10.0));
    g.connect_node(a, b);
    g.connect_node(a, c);
    let cut = Line::new(Vector2::new(50.0, -20.0), Vector2::new(50.0, 20.0));
    let hits = g.links_intersecting_line(&cut);
    assert_eq!(hits, vec![LinkKey::new(a, b)]);
    assert_eq!(g.delete_links(&hits), 1);
    assert_eq!(g.node(a).unwrap().children, vec![c]);
    assert!(g.is_consistent());
}

#[test]
fn moved_node_shoves_a_chain() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0, 100.0, 100.0));
    let b = g.add_node_with_body(rect(150.0, 0.0, 100.0, 100.0));
    let c = g.add_node_with_body(rect(260.0, 0.0, 100.0, 100.0));
    assert!(g.move_node(a, Vector2::new(100.0, 0.0)));
    assert_eq!(body(&g, a).left(), 100.0);
    assert_eq!(body(&g, b).left(), 200.0);
    assert_eq!(body(&g, c).left(), 300.0);
}

#[test]
fn collision_can_be_disabled() {
    let mut g = Graph::new();
    let mut settings = g.settings().clone();
    settings.is_enable_node_collision = false;
    g.set_settings(settings).unwrap();
    let a = g.add_node_with_body(rect(0.0, 0.0, 100.0, 100.0));
    let b = g.add_node_with_body(rect(150.0, 0.0, 100.0, 100.0));
    g.move_node(a, Vector2::new(100.0, 0.0));
    assert_eq!(body(&g, b).left(), 150.0);
}

#[test]
fn subtree_moves_once_on_cycles() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0, 10.0, 10.0));
    let b = g.add_node_with_body(rect(100.0, 0.0, 10.0, 10.0));
    let other = g.add_node_with_body(rect(500.0, 500.0, 10.0, 10.0));
    g.connect_node(a, b);
    g.connect_node(b, a);
    assert!(g.move_node_with_children(a, Vector2::new(5.0, 5.0)));
    assert_eq!(body(&g, a).location_left_top, Vector2::new(5.0, 5.0));
    assert_eq!(body(&g, b).location_left_top, Vector2::new(105.0, 5.0));
    assert_eq!(body(&g, other).location_left_top, Vector2::new(500.0, 500.0));
}

#[test]
fn rotate_keeps_distance_to_centre() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0, 10.0, 10.0));
    let b = g.add_node_with_body(rect(100.0, 0.0, 10.0, 10.0));
    g.connect_node(a, b);
    assert!(g.rotate_node(a, 90.0));
    let c = body(&g, b).center();
    assert!((c.x - 5.0).abs() < 1e-6);
    assert!((c.y - 105.0).abs() < 1e-6);
    assert_eq!(body(&g, a).location_left_top, Vector2::ZERO);
}

fn link_keys(g: &Graph) -> Vec<LinkKey> {
    g.get_all_links().iter().map(|l| l.key()).collect()
}

fn children_of(g: &Graph) -> Vec<(NodeId, Vec<NodeId>)> {
    g.iter_nodes().map(|(id, n)| (id, n.children.clone())).collect()
}

#[test]
fn connect_then_disconnect_restores_the_graph() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0, 10.0, 10.0));
    let b = g.add_node_with_body(rect(100.0, 0.0, 10.0, 10.0));
    let c = g.add_node_with_body(rect(200.0, 0.0, 10.0, 10.0));
    assert!(g.connect_node(b, c));
    let (children, links) = (children_of(&g), link_keys(&g));

    assert!(g.connect_node(a, b));
    assert_eq!(g.node(a).unwrap().children, vec![b]);
    assert!(g.link(a, b).is_some());
    assert!(g.disconnect_node(a, b));
    assert_eq!(children_of(&g), children);
    assert_eq!(link_keys(&g), links);
    assert!(g.is_consistent());
}

#[test]
fn single_edge_round_trip_leaves_no_links() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0, 10.0, 10.0));
    let b = g.add_node_with_body(rect(100.0, 0.0, 10.0, 10.0));
    assert!(g.connect_node(a, b));
    assert!(g.disconnect_node(a, b));
    assert!(g.node(a).unwrap().children.is_empty());
    assert_eq!(g.link_count(), 0);
}

#[test]
fn disconnect_missing_edge_is_rejected() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0, 10.0, 10.0));
    let b = g.add_node_with_body(rect(100.0, 0.0, 10.0, 10.0));
    g.connect_node(a, b);
    let steps = g.history().len();
    assert!(!g.disconnect_node(b, a));
    assert!(!g.disconnect_node(a, 99));
    assert!(!g.disconnect_node(99, a));
    assert_eq!(g.link_count(), 1);
    assert_eq!(g.history().len(), steps);
}

#[test]
fn rotate_visits_a_two_cycle_once() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0, 10.0, 10.0));
    let b = g.add_node_with_body(rect(100.0, 0.0, 10.0, 10.0));
    g.connect_node(a, b);
    g.connect_node(b, a);
    assert!(g.rotate_node(a, 90.0));
    // Rotated twice would land at (-95, 5).
    let c = body(&g, b).center();
    assert!((c.x - 5.0).abs() < 1e-6);
    assert!((c.y - 105.0).abs() < 1e-6);
    assert_eq!(body(&g, a).location_left_top, Vector2::ZERO);
}

#[test]
fn rotate_visits_a_three_cycle_once() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0, 10.0, 10.0));
    let b = g.add_node_with_body(rect(100.0, 0.0, 10.0, 10.0));
    let c = g.add_node_with_body(rect(200.0, 0.0, 10.0, 10.0));
    g.connect_node(a, b);
    g.connect_node(b, c);
    g.connect_node(c, a);
    assert!(g.rotate_node(a, 90.0));
    let pb = body(&g, b).center();
    let pc = body(&g, c).center();
    assert!((pb.x - 5.0).abs() < 1e-6 && (pb.y - 105.0).abs() < 1e-6);
    assert!((pc.x - 5.0).abs() < 1e-6 && (pc.y - 205.0).abs() < 1e-6);
    assert_eq!(body(&g, a).location_left_top, Vector2::ZERO);
}

#[test]
fn collapse_hides_reachable_nodes_on_cycles() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0, 10.0, 10.0));
    let b = g.add_node_with_body(rect(100.0, 0.0, 10.0, 10.0));
    let c = g.add_node_with_body(rect(200.0, 0.0, 10.0, 10.0));
    g.connect_node(a, b);
    g.connect_node(b, c);
    g.connect_node(c, a);
    assert!(g.set_collapsed(a, true));
    assert!(!g.node(a).unwrap().is_hidden_by_collapse);
    assert!(g.node(b).unwrap().is_hidden_by_collapse);
    assert!(g.node(c).unwrap().is_hidden_by_collapse);
    assert_eq!(g.node_at(Vector2::new(105.0, 5.0)), None);
    assert!(g.links_intersecting_line(&Line::new(Vector2::new(150.0, -5.0), Vector2::new(150.0, 15.0))).is_empty());
    g.set_collapsed(a, false);
    assert_eq!(g.node_at(Vector2::new(105.0, 5.0)), Some(b));
}

#[test]
fn edit_text_resizes_body_keeping_corner() {
    let mut g = Graph::new();
    let a = g.add_node(Vector2::new(100.0, 100.0));
    assert_eq!(g.node(a).unwrap().inner_text, "...");
    let corner = body(&g, a).location_left_top;
    assert!(g.edit_node_inner_text(a, "Hello world"));
    let r = body(&g, a);
    assert_eq!(r.location_left_top, corner);
    // 11 columns at half a 20px em, plus 20px padding each side
    assert_eq!(r.width, 150.0);
    assert!(g.edit_node_details(a, "more"));
    assert_eq!(g.node(a).unwrap().details, "more");
}

#[test]
fn selection_and_alignment() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0, 10.0, 10.0));
    let b = g.add_node_with_body(rect(50.0, 200.0, 20.0, 10.0));
    let far = g.add_node_with_body(rect(1000.0, 0.0, 10.0, 10.0));
    assert_eq!(g.select_nodes_in_rect(&Rectangle::from_two_points(Vector2::new(-5.0, -5.0), Vector2::new(100.0, 300.0))), 2);
    assert_eq!(g.selected_nodes(), vec![a, b]);
    assert!(g.align_nodes_col_left());
    assert_eq!(body(&g, b).left(), 0.0);
    assert!(g.align_nodes_col_right());
    assert_eq!(body(&g, a).right(), 20.0);
    assert_eq!(body(&g, b).right(), 20.0);
    assert!(g.align_nodes_row_center());
    assert_eq!(body(&g, a).top(), 100.0);
    assert_eq!(body(&g, b).top(), 100.0);
    assert_eq!(body(&g, far).location_left_top, Vector2::new(1000.0, 0.0));
    g.clear_selection();
    assert!(!g.align_nodes_col_center());
}

#[test]
fn cursor_walks_and_grows() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0, 100.0, 100.0));
    let b = g.add_node_with_body(rect(300.0, 0.0, 100.0, 100.0));
    assert_eq!(g.move_cursor(Direction::Right), Some(a));
    assert_eq!(g.move_cursor(Direction::Right), Some(b));
    assert_eq!(g.move_cursor(Direction::Right), Some(b));
    assert_eq!(g.move_cursor(Direction::Left), Some(a));

    assert!(g.grow_node());
    assert_eq!(g.grow_node_location(), Some(Vector2::new(450.0, 50.0)));
    g.rotate_grow_direction(true);
    let p = g.grow_node_location().unwrap();
    assert!((p.x - (50.0 + 400.0 * 30f64.to_radians().cos())).abs() < 1e-6);
    g.rotate_grow_direction(false);
    let child = g.grow_node_confirm().unwrap();
    assert_eq!(g.node(child).unwrap().inner_text, GROW_NODE_TEXT);
    assert!((body(&g, child).center().x - 450.0).abs() < 1e-6);
    assert!(g.link(a, child).is_some());
    assert!(!g.is_grow_node_prepared());
    assert_eq!(g.grow_node_confirm(), None);
}

#[test]
fn grow_needs_a_cursor() {
    let mut g = Graph::new();
    assert!(!g.grow_node());
    let a = g.add_node_with_body(rect(0.0, 0.0, 10.0, 10.0));
    g.set_cursor_node(Some(a));
    assert!(g.grow_node());
    g.grow_node_cancel();
    assert_eq!(g.grow_node_location(), None);
}

#[test]
fn paste_twice_gives_independent_copies() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0, 10.0, 10.0));
    let b = g.add_node_with_body(rect(100.0, 0.0, 10.0, 10.0));
    g.connect_node(a, b);
    g.copy_part(&[a, b]);
    assert!(g.has_clipboard());
    let first = g.paste(Vector2::new(0.0, 500.0));
    let second = g.paste(Vector2::new(0.0, 1000.0));
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert_eq!(g.node_count(), 6);
    assert_eq!(g.link_count(), 3);
    assert!(g.link(first[0], first[1]).is_some());
    assert_eq!(body(&g, second[1]).location_left_top, Vector2::new(100.0, 1000.0));
    assert_ne!(g.node(first[0]).unwrap().uuid, g.node(second[0]).unwrap().uuid);
    assert!(g.is_consistent());
}

#[test]
fn copy_keeps_only_internal_links() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0, 10.0, 10.0));
    let b = g.add_node_with_body(rect(100.0, 0.0, 10.0, 10.0));
    g.connect_node(a, b);
    g.copy_part(&[a]);
    assert_eq!(g.clipboard().nodes.len(), 1);
    assert!(g.clipboard().links.is_empty());
    assert!(g.clipboard().nodes[0].children.is_empty());
}

#[test]
fn root_nodes_ignore_self_reference() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0, 10.0, 10.0));
    let b = g.add_node_with_body(rect(100.0, 0.0, 10.0, 10.0));
    let c = g.add_node_with_body(rect(200.0, 0.0, 10.0, 10.0));
    g.connect_node(a, b);
    assert_eq!(g.get_all_root_nodes(), vec![a, c]);
}

#[test]
fn indented_text_replaces_graph() {
    let mut g = Graph::new();
    g.add_node_with_body(rect(0.0, 0.0, 10.0, 10.0));
    g.import_indented_text("Fruit\n    Apple\n    Pear\nVeg\n").unwrap();
    assert_eq!(g.node_count(), 5);
    assert_eq!(g.link_count(), 4);
    let roots = g.get_all_root_nodes();
    assert_eq!(roots.len(), 1);
    assert_eq!(g.node(roots[0]).unwrap().inner_text, "Root");
    assert!(g.is_consistent());
}

#[test]
fn rebuild_links_from_children_keeps_labels() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0, 10.0, 10.0));
    let b = g.add_node_with_body(rect(100.0, 0.0, 10.0, 10.0));
    g.connect_node(a, b);
    g.edit_links_inner_text(&[LinkKey::new(a, b)], "x");
    g.update_links_by_child_map();
    assert_eq!(g.link(a, b).unwrap().inner_text, "x");
    g.update_child_map_by_links();
    assert_eq!(g.node(a).unwrap().children, vec![b]);
    assert!(g.is_consistent());
}

#[test]
fn clear_all_empties_everything() {
    let mut g = Graph::new();
    let a = g.add_node_with_body(rect(0.0, 0.0, 10.0, 10.0));
    g.set_cursor_node(Some(a));
    g.clear_all();
    assert_eq!(g.node_count(), 0);
    assert_eq!(g.cursor_node(), None);
    assert!(!g.history().can_undo());
}
