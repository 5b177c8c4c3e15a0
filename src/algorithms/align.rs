use crate::geometry::vector::Vector2;
use crate::model::NodeId;
use crate::Graph;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    /// Tops moved to the mean top.
    RowCenter,
    ColLeft,
    ColRight,
    /// Centres moved to the mean centre x.
    ColCenter,
}

/// Align the given nodes; returns false when there is nothing to align.
pub fn align_impl(g: &mut Graph, ids: &[NodeId], alignment: Alignment) -> bool {
    let rects: Vec<(NodeId, crate::geometry::rectangle::Rectangle)> =
        ids.iter().filter_map(|&id| g.node(id).map(|n| (id, n.body_shape))).collect();
    if rects.is_empty() {
        return false;
    }
    let count = rects.len() as f64;
    let target = match alignment {
        Alignment::RowCenter => rects.iter().map(|(_, r)| r.top()).sum::<f64>() / count,
        Alignment::ColLeft => rects.iter().map(|(_, r)| r.left()).fold(f64::INFINITY, f64::min),
        Alignment::ColRight => rects.iter().map(|(_, r)| r.right()).fold(f64::NEG_INFINITY, f64::max),
        Alignment::ColCenter => rects.iter().map(|(_, r)| r.center().x).sum::<f64>() / count,
    };
    for (id, r) in rects {
        let location = match alignment {
            Alignment::RowCenter => Vector2::new(r.left(), target),
            Alignment::ColLeft => Vector2::new(target, r.top()),
            Alignment::ColRight => Vector2::new(target - r.width, r.top()),
            Alignment::ColCenter => Vector2::new(target - r.width / 2.0, r.top()),
        };
        if let Some(n) = g.node_mut(id) {
            n.move_to(location);
        }
    }
    true
}
