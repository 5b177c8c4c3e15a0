use crate::geometry::rectangle::Rectangle;
use crate::geometry::vector::Vector2;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Arena index of a node inside one [`crate::Graph`]. Not stable across
/// loads; use the node's `uuid` for identity that survives serialization.
pub type NodeId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// A graph vertex. `children` holds arena ids of the targets of this node's
/// outgoing links; it never owns them and may form cycles.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityNode {
    pub uuid: String,
    pub body_shape: Rectangle,
    pub inner_text: String,
    pub details: String,
    pub children: Vec<NodeId>,
    pub is_selected: bool,
    pub is_detail_show: bool,
    pub is_collapsed: bool,
    pub is_hidden_by_collapse: bool,
    pub color: Option<Color>,
}

impl EntityNode {
    pub fn new(uuid: String, body_shape: Rectangle) -> Self {
        Self {
            uuid,
            body_shape,
            inner_text: String::new(),
            details: String::new(),
            children: Vec::new(),
            is_selected: false,
            is_detail_show: false,
            is_collapsed: false,
            is_hidden_by_collapse: false,
            color: None,
        }
    }

    pub fn has_child(&self, id: NodeId) -> bool {
        self.children.contains(&id)
    }

    // Rejects `self_id` and duplicates.
    pub(crate) fn add_child(&mut self, self_id: NodeId, child: NodeId) -> bool {
        if child == self_id || self.has_child(child) {
            return false;
        }
        self.children.push(child);
        true
    }

    pub(crate) fn remove_child(&mut self, child: NodeId) -> bool {
        match self.children.iter().position(|&c| c == child) {
            Some(i) => {
                self.children.remove(i);
                true
            }
            None => false,
        }
    }

    pub(crate) fn move_by(&mut self, delta: Vector2) {
        self.body_shape.location_left_top += delta;
    }

    pub(crate) fn move_to(&mut self, location_left_top: Vector2) {
        self.body_shape.location_left_top = location_left_top;
    }
}

/// Ordered endpoint pair; the key of the link set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkKey {
    pub source: NodeId,
    pub target: NodeId,
}

impl LinkKey {
    pub const fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }

    pub fn reversed(self) -> Self {
        Self { source: self.target, target: self.source }
    }

    pub fn is_self_loop(self) -> bool {
        self.source == self.target
    }
}

/// Directed edge. Equality and hashing look only at the endpoints, so the
/// label and shifting flag never make two links to the same pair distinct.
#[derive(Clone, Debug)]
pub struct NodeLink {
    pub source_node: NodeId,
    pub target_node: NodeId,
    pub inner_text: String,
    /// Set while the reverse link also exists; the pair is drawn apart.
    pub is_shifting: bool,
}

impl NodeLink {
    pub fn new(source_node: NodeId, target_node: NodeId) -> Self {
        Self { source_node, target_node, inner_text: String::new(), is_shifting: false }
    }

    pub fn key(&self) -> LinkKey {
        LinkKey::new(self.source_node, self.target_node)
    }

    pub fn is_self_loop(&self) -> bool {
        self.source_node == self.target_node
    }
}

impl PartialEq for NodeLink {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for NodeLink {}

impl Hash for NodeLink {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_child_rejects_self_and_duplicates() {
        let mut n = EntityNode::new("a".into(), Rectangle::new(Vector2::ZERO, 1.0, 1.0));
        assert!(!n.add_child(0, 0));
        assert!(n.add_child(0, 1));
        assert!(!n.add_child(0, 1));
        assert!(n.remove_child(1));
        assert!(!n.remove_child(1));
    }

    #[test]
    fn link_equality_ignores_label() {
        let mut a = NodeLink::new(1, 2);
        a.inner_text = "x".into();
        assert_eq!(a, NodeLink::new(1, 2));
        assert_ne!(a, NodeLink::new(2, 1));
    }
}
