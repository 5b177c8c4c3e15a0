// Shove resolution: a moved node pushes whatever it overlaps, and the pushed
// nodes pass the push on. A node may be pushed several times in one move.
// The nodes that started the move are never pushed; a node shoved into one
// of them is pushed back out instead. Work is capped per move, so
// propagation terminates on any layout.

use crate::geometry::rectangle::Rectangle;
use crate::geometry::vector::Vector2;
use crate::model::NodeId;
use crate::Graph;
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Negative,
    Zero,
    Positive,
}

fn side(x: f64) -> Side {
    if x < 0.0 {
        Side::Negative
    } else if x == 0.0 {
        Side::Zero
    } else {
        Side::Positive
    }
}

/// Displacement that moves `other` out of `mover`, leaving a gap of
/// `margin`.
///
/// The direction bucket comes from the signs of the centre-to-centre vector.
/// Diagonal buckets push along the axis with the thinner overlap band. Equal
/// centres, and the exactly horizontal bucket with no x offset, push down.
pub fn shove_vector(mover: &Rectangle, other: &Rectangle, margin: f64) -> Vector2 {
    let right = || Vector2::new(mover.right() - other.left() + margin, 0.0);
    let left = || Vector2::new(mover.left() - other.right() - margin, 0.0);
    let up = || Vector2::new(0.0, mover.top() - other.bottom() - margin);
    let down = || Vector2::new(0.0, mover.bottom() - other.top() + margin);

    let d = other.center() - mover.center();
    match (side(d.y), side(d.x)) {
        (Side::Negative, Side::Zero) => up(),
        (Side::Zero, Side::Negative) => left(),
        (Side::Zero, Side::Positive) => right(),
        (_, Side::Zero) => down(),
        (vy, vx) => {
            let w = (if vx == Side::Negative { mover.left() - other.right() } else { mover.right() - other.left() }).abs();
            let h = (if vy == Side::Negative { mover.top() - other.bottom() } else { mover.bottom() - other.top() }).abs();
            match (w > h, vy, vx) {
                (true, Side::Negative, _) => up(),
                (true, _, _) => down(),
                (false, _, Side::Negative) => left(),
                (false, _, _) => right(),
            }
        }
    }
}

/// Propagate pushes outward from `origins`, which stay where they are.
///
/// Depth first. Every node that moves goes back on the stack, so when the
/// stack drains no moved node overlaps anything. Each round handles one
/// mover; rounds are capped at `n * n` (at least 64) for `n` nodes.
pub fn resolve_collisions_impl(g: &mut Graph, origins: &[NodeId]) {
    if !g.settings.is_enable_node_collision {
        return;
    }
    let margin = g.settings.collision_margin;
    let ids = g.node_ids();
    let fixed: HashSet<NodeId> = origins.iter().copied().collect();
    let mut stack: Vec<NodeId> = origins.iter().rev().copied().collect();
    let mut pending: HashSet<NodeId> = fixed.clone();
    let cap = (ids.len() * ids.len()).max(64);
    let mut rounds = 0;

    while let Some(mover) = stack.pop() {
        pending.remove(&mover);
        rounds += 1;
        if rounds > cap {
            log::warn!("collision resolution stopped after {} rounds", cap);
            break;
        }
        let Some(mover_rect) = g.node(mover).map(|n| n.body_shape) else { continue };

        if !fixed.contains(&mover) {
            // Pushed into a node that started the move: back out first.
            let blocker = origins
                .iter()
                .filter_map(|&o| g.node(o).map(|n| n.body_shape))
                .find(|r| r.is_collision(&mover_rect, margin));
            if let Some(blocker) = blocker {
                if let Some(n) = g.node_mut(mover) {
                    n.move_by(shove_vector(&blocker, &mover_rect, margin));
                }
                if pending.insert(mover) {
                    stack.push(mover);
                }
                continue;
            }
        }

        let mut pushed = Vec::new();
        for &id in &ids {
            if id == mover || fixed.contains(&id) {
                continue;
            }
            let Some(node) = g.node_mut(id) else { continue };
            if mover_rect.is_collision(&node.body_shape, margin) {
                let d = shove_vector(&mover_rect, &node.body_shape, margin);
                node.move_by(d);
                if pending.insert(id) {
                    pushed.push(id);
                }
            }
        }
        // The first pushed node is resolved next.
        stack.extend(pushed.into_iter().rev());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rectangle {
        Rectangle::new(Vector2::new(x, y), w, h)
    }

    #[test]
    fn cardinal_push_by_overlap() {
        let a = rect(50.0, 0.0, 100.0, 100.0);
        let b = rect(110.0, 0.0, 100.0, 100.0);
        assert_eq!(shove_vector(&a, &b, 0.0), Vector2::new(40.0, 0.0));
        assert_eq!(shove_vector(&b, &a, 0.0), Vector2::new(-40.0, 0.0));
    }

    #[test]
    fn diagonal_picks_thinner_overlap() {
        let a = rect(0.0, 0.0, 100.0, 100.0);
        // Overlap band is 10 wide and 80 tall: push sideways.
        let b = rect(90.0, 20.0, 100.0, 100.0);
        assert_eq!(shove_vector(&a, &b, 0.0), Vector2::new(10.0, 0.0));
        // 80 wide and 10 tall: push up.
        let c = rect(-20.0, -90.0, 100.0, 100.0);
        assert_eq!(shove_vector(&a, &c, 0.0), Vector2::new(0.0, -10.0));
    }

    #[test]
    fn same_center_pushes_down() {
        let a = rect(0.0, 0.0, 100.0, 100.0);
        assert_eq!(shove_vector(&a, &a, 0.0), Vector2::new(0.0, 100.0));
    }

    #[test]
    fn margin_leaves_a_gap() {
        let a = rect(0.0, 0.0, 100.0, 100.0);
        let b = rect(95.0, 0.0, 100.0, 100.0);
        let moved = b.translate(shove_vector(&a, &b, 5.0));
        assert_eq!(moved.left(), 105.0);
        assert!(!a.is_collision(&moved, 5.0));
    }

    #[test]
    fn nodes_pushed_by_one_mover_separate() {
        let mut g = Graph::new();
        let a = g.add_node_with_body(rect(0.0, 0.0, 100.0, 100.0));
        let b = g.add_node_with_body(rect(0.0, 105.0, 100.0, 20.0));
        let c = g.add_node_with_body(rect(0.0, 130.0, 100.0, 20.0));
        assert!(g.move_node(a, Vector2::new(0.0, 60.0)));
        let (ra, rb, rc) = (
            g.node(a).unwrap().body_shape,
            g.node(b).unwrap().body_shape,
            g.node(c).unwrap().body_shape,
        );
        assert_eq!(ra.top(), 60.0);
        assert!(!ra.is_collision(&rb, 0.0));
        assert!(!ra.is_collision(&rc, 0.0));
        assert!(!rb.is_collision(&rc, 0.0));
    }
}
