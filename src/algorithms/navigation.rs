use crate::model::{Direction, NodeId};
use crate::Graph;

/// Nearest visible node strictly on the `direction` side of `from`'s centre.
///
/// Distance is measured between facing edge midpoints (the candidate's bottom
/// edge to `from`'s top edge when going up, and so on), which prefers
/// neighbours lined up with `from` over diagonal ones.
pub fn neighbor_in_direction_impl(g: &Graph, from: NodeId, direction: Direction) -> Option<NodeId> {
    let origin = g.node(from)?.body_shape;
    let oc = origin.center();
    let mut best: Option<(NodeId, f64)> = None;
    for (id, n) in g.iter_nodes() {
        if id == from || n.is_hidden_by_collapse {
            continue;
        }
        let r = &n.body_shape;
        let c = r.center();
        let dist = match direction {
            Direction::Up if c.y < oc.y => r.bottom_center().distance_to(origin.top_center()),
            Direction::Down if c.y > oc.y => r.top_center().distance_to(origin.bottom_center()),
            Direction::Left if c.x < oc.x => r.right_center().distance_to(origin.left_center()),
            Direction::Right if c.x > oc.x => r.left_center().distance_to(origin.right_center()),
            _ => continue,
        };
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((id, dist));
        }
    }
    best.map(|(id, _)| id)
}

/// Move the cursor; with no cursor yet, the first node becomes the cursor.
/// The cursor stays where it is when nothing lies in that direction.
pub fn move_cursor_impl(g: &Graph, cursor: Option<NodeId>, direction: Direction) -> Option<NodeId> {
    match cursor.filter(|&c| g.contains(c)) {
        None => g.iter_nodes().find(|(_, n)| !n.is_hidden_by_collapse).map(|(id, _)| id),
        Some(c) => Some(neighbor_in_direction_impl(g, c, direction).unwrap_or(c)),
    }
}
