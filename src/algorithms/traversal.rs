use crate::geometry::vector::Vector2;
use crate::model::NodeId;
use crate::Graph;
use std::collections::HashSet;

/// Every node reachable from `start` through `children`, `start` first,
/// each exactly once, in depth-first pre-order. Cycles are fine.
pub fn reachable_impl(g: &Graph, start: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    if !g.contains(start) {
        return out;
    }
    let mut visited = HashSet::new();
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        out.push(id);
        if let Some(n) = g.node(id) {
            stack.extend(n.children.iter().rev().copied().filter(|c| !visited.contains(c)));
        }
    }
    out
}

/// Translate `start` and its whole reachable subtree by `delta`, then let the
/// subtree shove everything else out of the way.
pub fn move_with_children_impl(g: &mut Graph, start: NodeId, delta: Vector2) -> bool {
    let subtree = reachable_impl(g, start);
    if subtree.is_empty() {
        return false;
    }
    for &id in &subtree {
        if let Some(n) = g.node_mut(id) {
            n.move_by(delta);
        }
    }
    crate::algorithms::collision::resolve_collisions_impl(g, &subtree);
    true
}

/// Rotate the subtree of `center` around the centre of `center`'s body,
/// keeping each node's distance to it. The centre node itself stays put.
pub fn rotate_impl(g: &mut Graph, center: NodeId, degrees: f64) -> bool {
    let Some(pivot) = g.node(center).map(|n| n.body_shape.center()) else { return false };
    for id in reachable_impl(g, center) {
        let Some(n) = g.node_mut(id) else { continue };
        let c = n.body_shape.center();
        let radius = c.distance_to(pivot);
        let new_center = pivot + (c - pivot).normalize().rotate(degrees) * radius;
        if new_center.is_finite() {
            let half = Vector2::new(n.body_shape.width / 2.0, n.body_shape.height / 2.0);
            n.move_to(new_center - half);
        }
    }
    true
}

/// Nodes nobody points at.
pub fn root_nodes_impl(g: &Graph) -> Vec<NodeId> {
    let mut has_parent = HashSet::new();
    for (id, n) in g.iter_nodes() {
        for &c in &n.children {
            if c != id {
                has_parent.insert(c);
            }
        }
    }
    g.iter_nodes().map(|(id, _)| id).filter(|id| !has_parent.contains(id)).collect()
}

/// Recompute `is_hidden_by_collapse`: a node is hidden when it is reachable
/// from a collapsed node other than itself.
pub fn refresh_collapse_impl(g: &mut Graph) {
    let collapsed: Vec<NodeId> = g.iter_nodes().filter(|(_, n)| n.is_collapsed).map(|(id, _)| id).collect();
    let mut hidden = HashSet::new();
    for root in collapsed {
        hidden.extend(reachable_impl(g, root).into_iter().filter(|&id| id != root));
    }
    for id in g.node_ids() {
        if let Some(n) = g.node_mut(id) {
            n.is_hidden_by_collapse = hidden.contains(&id);
        }
    }
}
