use crate::error::{Error, Result};
use crate::geometry::limits;
use crate::geometry::rectangle::Rectangle;
use crate::geometry::vector::Vector2;
use crate::model::{Color, EntityNode, LinkKey, NodeId, NodeLink};
use crate::Graph;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BodyShapeDocument {
    Rectangle { location_left_top: [f64; 2], width: f64, height: f64 },
}

impl BodyShapeDocument {
    pub fn from_rectangle(r: &Rectangle) -> Self {
        BodyShapeDocument::Rectangle {
            location_left_top: [r.location_left_top.x, r.location_left_top.y],
            width: r.width,
            height: r.height,
        }
    }

    pub fn to_rectangle(&self) -> Rectangle {
        match *self {
            BodyShapeDocument::Rectangle { location_left_top: [x, y], width, height } => {
                Rectangle::new(Vector2::new(x, y), width, height)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeDocument {
    pub body_shape: BodyShapeDocument,
    pub inner_text: String,
    pub details: String,
    pub uuid: String,
    pub children: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_collapsed: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkDocument {
    pub source_node: String,
    pub target_node: String,
    pub inner_text: String,
}

/// Serialized `{nodes, links}` form: files on disk, history snapshots and the
/// clipboard all use it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<NodeDocument>,
    pub links: Vec<LinkDocument>,
}

impl GraphDocument {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn to_json_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Box around every node body in the document.
    pub fn bounding_rectangle(&self) -> Option<Rectangle> {
        let rects: Vec<Rectangle> = self.nodes.iter().map(|n| n.body_shape.to_rectangle()).collect();
        Rectangle::get_bounding_rectangle(&rects)
    }

    /// Copy with every node uuid replaced by a fresh v4 uuid. References in
    /// `children` and link endpoints follow the substitution; references to
    /// nodes outside the document are left untouched.
    pub fn with_fresh_uuids(&self) -> GraphDocument {
        let mapping: HashMap<&str, String> = self
            .nodes
            .iter()
            .map(|n| (n.uuid.as_str(), uuid::Uuid::new_v4().to_string()))
            .collect();
        let rekey = |old: &String| mapping.get(old.as_str()).cloned().unwrap_or_else(|| old.clone());
        GraphDocument {
            nodes: self
                .nodes
                .iter()
                .map(|n| NodeDocument {
                    uuid: rekey(&n.uuid),
                    children: n.children.iter().map(rekey).collect(),
                    ..n.clone()
                })
                .collect(),
            links: self
                .links
                .iter()
                .map(|l| LinkDocument {
                    source_node: rekey(&l.source_node),
                    target_node: rekey(&l.target_node),
                    inner_text: l.inner_text.clone(),
                })
                .collect(),
        }
    }
}

fn node_document(g: &Graph, node: &EntityNode, keep: impl Fn(NodeId) -> bool) -> NodeDocument {
    NodeDocument {
        body_shape: BodyShapeDocument::from_rectangle(&node.body_shape),
        inner_text: node.inner_text.clone(),
        details: node.details.clone(),
        uuid: node.uuid.clone(),
        children: node
            .children
            .iter()
            .filter(|&&c| keep(c))
            .filter_map(|&c| g.node(c).map(|n| n.uuid.clone()))
            .collect(),
        color: node.color,
        is_collapsed: node.is_collapsed,
    }
}

fn link_document(g: &Graph, link: &NodeLink) -> Option<LinkDocument> {
    Some(LinkDocument {
        source_node: g.node(link.source_node)?.uuid.clone(),
        target_node: g.node(link.target_node)?.uuid.clone(),
        inner_text: link.inner_text.clone(),
    })
}

pub fn dump_impl(g: &Graph) -> GraphDocument {
    GraphDocument {
        nodes: g.iter_nodes().map(|(_, n)| node_document(g, n, |_| true)).collect(),
        links: g.links.values().filter_map(|l| link_document(g, l)).collect(),
    }
}

/// The given nodes plus the links running between them.
pub fn dump_part_impl(g: &Graph, ids: &[NodeId]) -> GraphDocument {
    let set: HashSet<NodeId> = ids.iter().copied().filter(|&id| g.contains(id)).collect();
    let mut nodes = Vec::new();
    let mut seen = HashSet::new();
    for &id in ids {
        if !set.contains(&id) || !seen.insert(id) {
            continue;
        }
        if let Some(n) = g.node(id) {
            nodes.push(node_document(g, n, |c| set.contains(&c)));
        }
    }
    let links = g
        .links
        .values()
        .filter(|l| set.contains(&l.source_node) && set.contains(&l.target_node))
        .filter_map(|l| link_document(g, l))
        .collect();
    GraphDocument { nodes, links }
}

fn check_text(s: &str, what: &str) -> Result<()> {
    if s.len() > limits::MAX_TEXT_LEN {
        return Err(Error::CapsExceeded { what: format!("{}>{} bytes", what, limits::MAX_TEXT_LEN) });
    }
    Ok(())
}

pub fn check_limits(doc: &GraphDocument) -> Result<()> {
    if doc.nodes.len() > limits::MAX_NODES {
        return Err(Error::CapsExceeded { what: format!("nodes>{}", limits::MAX_NODES) });
    }
    if doc.links.len() > limits::MAX_LINKS {
        return Err(Error::CapsExceeded { what: format!("links>{}", limits::MAX_LINKS) });
    }
    for n in &doc.nodes {
        let BodyShapeDocument::Rectangle { location_left_top: [x, y], width, height } = n.body_shape;
        if !limits::in_coord_bounds(x) || !limits::in_coord_bounds(y) {
            return Err(Error::OutOfBounds { what: format!("node {} location", n.uuid) });
        }
        if !limits::in_size_bounds(width) || !limits::in_size_bounds(height) {
            return Err(Error::OutOfBounds { what: format!("node {} size", n.uuid) });
        }
        if n.children.len() > limits::MAX_CHILDREN_PER_NODE {
            return Err(Error::CapsExceeded { what: format!("children>{}", limits::MAX_CHILDREN_PER_NODE) });
        }
        check_text(&n.inner_text, "inner_text")?;
        check_text(&n.details, "details")?;
    }
    for l in &doc.links {
        check_text(&l.inner_text, "link inner_text")?;
    }
    Ok(())
}

/// Raw JSON to a checked document: compatibility upgrade, typed parse, limits.
pub fn parse_document(v: &Value) -> Result<GraphDocument> {
    let upgraded = crate::compat::upgrade(v)?;
    let doc: GraphDocument = serde_json::from_value(upgraded)?;
    check_limits(&doc)?;
    Ok(doc)
}

/// Append a document to the graph, translated by `offset`. Nothing is changed
/// unless the whole document can be inserted. Returns the new node ids in
/// document order.
pub fn insert_document_impl(g: &mut Graph, doc: &GraphDocument, offset: Vector2) -> Result<Vec<NodeId>> {
    if g.node_count() + doc.nodes.len() > limits::MAX_NODES {
        return Err(Error::CapsExceeded { what: format!("nodes>{}", limits::MAX_NODES) });
    }
    let mut seen: HashSet<&str> = HashSet::with_capacity(doc.nodes.len());
    for n in &doc.nodes {
        if !seen.insert(n.uuid.as_str()) || g.uuid_index.contains_key(&n.uuid) {
            return Err(Error::DuplicateUuid { uuid: n.uuid.clone() });
        }
    }

    let base = g.nodes.len() as NodeId;
    let local: HashMap<&str, NodeId> =
        doc.nodes.iter().enumerate().map(|(i, n)| (n.uuid.as_str(), base + i as NodeId)).collect();
    let resolve = |uuid: &str| local.get(uuid).copied().or_else(|| g.uuid_index.get(uuid).copied());

    let mut new_nodes = Vec::with_capacity(doc.nodes.len());
    let mut new_links = Vec::new();
    for (i, n) in doc.nodes.iter().enumerate() {
        let id = base + i as NodeId;
        let mut node = EntityNode::new(n.uuid.clone(), n.body_shape.to_rectangle().translate(offset));
        node.inner_text = n.inner_text.clone();
        node.details = n.details.clone();
        node.color = n.color;
        node.is_collapsed = n.is_collapsed;
        for child_uuid in &n.children {
            match resolve(child_uuid) {
                // Self references are kept: they are the self-loops.
                Some(child) if !node.has_child(child) => {
                    node.children.push(child);
                    new_links.push(NodeLink::new(id, child));
                }
                Some(_) => {}
                None => log::debug!("node {} references unknown child {}", n.uuid, child_uuid),
            }
        }
        new_nodes.push(node);
    }

    let mut labels: Vec<(LinkKey, String)> = Vec::new();
    for l in &doc.links {
        if let (Some(s), Some(t)) = (resolve(&l.source_node), resolve(&l.target_node)) {
            labels.push((LinkKey::new(s, t), l.inner_text.clone()));
        }
    }

    let ids: Vec<NodeId> = (0..new_nodes.len()).map(|i| base + i as NodeId).collect();
    for (id, node) in ids.iter().zip(new_nodes) {
        g.uuid_index.insert(node.uuid.clone(), *id);
        g.nodes.push(Some(node));
    }
    for link in new_links {
        g.links.insert(link.key(), link);
    }
    for (key, text) in labels {
        if let Some(link) = g.links.get_mut(&key) {
            link.inner_text = text;
        }
    }
    g.refresh_shifting();
    Ok(ids)
}
