pub mod camera;
pub mod compat;
pub mod effect;
pub mod error;
pub mod history;
pub mod json;
pub mod model;
pub mod render;
pub mod settings;
pub mod svg;
pub mod text;
pub mod geometry {
    pub mod circle;
    pub mod curve;
    pub mod limits;
    pub mod line;
    pub mod rectangle;
    pub mod shape;
    pub mod tolerance;
    pub mod vector;
}
pub mod algorithms {
    pub mod align;
    pub mod clipboard;
    pub mod collision;
    pub mod navigation;
    pub mod picking;
    pub mod text_import;
    pub mod traversal;
}

pub use error::{Error, Result};

use algorithms::align::Alignment;
use geometry::line::Line;
use geometry::rectangle::Rectangle;
use geometry::shape::Shape;
use geometry::vector::Vector2;
use history::ProgressRecorder;
use json::GraphDocument;
use model::{Color, Direction, EntityNode, LinkKey, NodeId, NodeLink};
use serde_json::Value;
use settings::Settings;
use std::collections::{BTreeMap, HashMap, HashSet};
use text::{node_size_for_text, GlyphAdvanceMeasure, TextMeasure};

/// Text a freshly added node starts with.
pub const PLACEHOLDER_TEXT: &str = "...";
/// Text of the node created by the grow-node gesture.
pub const GROW_NODE_TEXT: &str = "New Node";
/// Initial offset of the pending grown node from the cursor node's centre.
pub const GROW_NODE_OFFSET: Vector2 = Vector2::new(400.0, 0.0);
pub const GROW_ROTATE_DEGREES: f64 = 30.0;

/// The node/link graph and everything that edits it.
///
/// Edges are stored twice: as each node's `children` list and as the link
/// set keyed by `(source, target)`. Every public operation leaves the two in
/// agreement. Operations that change the document record exactly one history
/// step when they succeed; live drag moves record nothing until
/// [`Graph::move_finished`].
pub struct Graph {
    pub(crate) nodes: Vec<Option<EntityNode>>, // id is index
    pub(crate) links: BTreeMap<LinkKey, NodeLink>,
    pub(crate) uuid_index: HashMap<String, NodeId>,
    pub(crate) settings: Settings,
    pub(crate) history: ProgressRecorder,
    pub(crate) measurer: Box<dyn TextMeasure>,
    pub(crate) cursor_node: Option<NodeId>,
    // Pending grown node, relative to the cursor node's centre.
    pub(crate) grow_node_location: Option<Vector2>,
    pub(crate) clipboard: GraphDocument,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::with_measurer(Box::new(GlyphAdvanceMeasure::default()))
    }

    pub fn with_measurer(measurer: Box<dyn TextMeasure>) -> Self {
        let settings = Settings::default();
        Self {
            nodes: Vec::new(),
            links: BTreeMap::new(),
            uuid_index: HashMap::new(),
            history: ProgressRecorder::new(settings.history_max_size),
            settings,
            measurer,
            cursor_node: None,
            grow_node_location: None,
            clipboard: GraphDocument::default(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) -> Result<()> {
        settings.validate()?;
        self.history.set_max_size(settings.history_max_size);
        self.settings = settings;
        Ok(())
    }

    pub fn measurer(&self) -> &dyn TextMeasure {
        self.measurer.as_ref()
    }

    pub fn history(&self) -> &ProgressRecorder {
        &self.history
    }

    fn record(&mut self) {
        let snapshot = self.dump_all();
        self.history.record(snapshot);
    }

    // ---- queries ----

    pub fn node(&self, id: NodeId) -> Option<&EntityNode> {
        self.nodes.get(id as usize).and_then(|n| n.as_ref())
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut EntityNode> {
        self.nodes.get_mut(id as usize).and_then(|n| n.as_mut())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn node_count(&self) -> usize {
        self.uuid_index.len()
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.iter_nodes().map(|(id, _)| id).collect()
    }

    pub fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &EntityNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_ref().map(|n| (i as NodeId, n)))
    }

    pub fn node_by_uuid(&self, uuid: &str) -> Option<NodeId> {
        self.uuid_index.get(uuid).copied()
    }

    pub fn link(&self, source: NodeId, target: NodeId) -> Option<&NodeLink> {
        self.links.get(&LinkKey::new(source, target))
    }

    pub fn get_all_links(&self) -> Vec<&NodeLink> {
        self.links.values().collect()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn cursor_node(&self) -> Option<NodeId> {
        self.cursor_node
    }

    pub fn set_cursor_node(&mut self, id: Option<NodeId>) -> bool {
        if id.map_or(false, |id| !self.contains(id)) {
            return false;
        }
        self.cursor_node = id;
        if id.is_none() {
            self.grow_node_location = None;
        }
        true
    }

    // ---- node lifecycle ----

    fn insert_node(&mut self, body: Rectangle, text: &str) -> NodeId {
        let id = self.nodes.len() as NodeId;
        let uuid = uuid::Uuid::new_v4().to_string();
        let mut node = EntityNode::new(uuid.clone(), body);
        node.inner_text = text.to_string();
        self.uuid_index.insert(uuid, id);
        self.nodes.push(Some(node));
        id
    }

    fn add_node_inner(&mut self, location: Vector2, text: &str) -> NodeId {
        let size = node_size_for_text(self.measurer(), text);
        self.insert_node(Rectangle::from_center(location, size.width, size.height), text)
    }

    /// New placeholder node centred on `location` (world).
    pub fn add_node(&mut self, location: Vector2) -> NodeId {
        let id = self.add_node_inner(location, PLACEHOLDER_TEXT);
        self.record();
        id
    }

    /// New empty node with exactly the given body; its size is not derived
    /// from text.
    pub fn add_node_with_body(&mut self, body: Rectangle) -> NodeId {
        let id = self.insert_node(body, "");
        self.record();
        id
    }

    fn delete_node_inner(&mut self, id: NodeId) -> bool {
        let Some(node) = self.nodes.get_mut(id as usize).and_then(Option::take) else { return false };
        self.uuid_index.remove(&node.uuid);
        for n in self.nodes.iter_mut().flatten() {
            n.remove_child(id);
        }
        self.links.retain(|k, _| k.source != id && k.target != id);
        if self.cursor_node == Some(id) {
            self.cursor_node = None;
            self.grow_node_location = None;
        }
        true
    }

    /// Remove a node with every edge touching it. Returns false when `id` is
    /// not in the graph.
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        if !self.delete_node_inner(id) {
            return false;
        }
        self.refresh_derived();
        self.record();
        true
    }

    /// Delete several nodes as one history step; unknown ids are skipped.
    pub fn delete_nodes(&mut self, ids: &[NodeId]) -> usize {
        let deleted = ids.iter().filter(|&&id| self.delete_node_inner(id)).count();
        if deleted > 0 {
            self.refresh_derived();
            self.record();
        }
        deleted
    }

    // ---- edges ----

    fn connect_inner(&mut self, from: NodeId, to: NodeId) -> bool {
        if from == to {
            log::debug!("connect rejected: node {} to itself", from);
            return false;
        }
        if !self.contains(to) {
            log::debug!("connect rejected: unknown node {}", to);
            return false;
        }
        let Some(node) = self.node_mut(from) else {
            log::debug!("connect rejected: unknown node {}", from);
            return false;
        };
        if !node.add_child(from, to) {
            log::debug!("connect rejected: {} -> {} already exists", from, to);
            return false;
        }
        self.links.insert(LinkKey::new(from, to), NodeLink::new(from, to));
        self.refresh_shifting();
        true
    }

    /// Add the edge `from -> to`. Fails without side effects for a
    /// self-connection, an existing edge or an unknown endpoint.
    pub fn connect_node(&mut self, from: NodeId, to: NodeId) -> bool {
        if !self.connect_inner(from, to) {
            return false;
        }
        self.record();
        true
    }

    fn disconnect_inner(&mut self, from: NodeId, to: NodeId) -> bool {
        if !self.contains(to) {
            return false;
        }
        let Some(node) = self.node_mut(from) else { return false };
        if !node.remove_child(to) {
            log::debug!("disconnect rejected: no edge {} -> {}", from, to);
            return false;
        }
        self.links.remove(&LinkKey::new(from, to));
        self.refresh_shifting();
        true
    }

    pub fn disconnect_node(&mut self, from: NodeId, to: NodeId) -> bool {
        if !self.disconnect_inner(from, to) {
            return false;
        }
        self.record();
        true
    }

    /// Remove the given links (the cut gesture).
    pub fn delete_links(&mut self, keys: &[LinkKey]) -> usize {
        let removed = keys.iter().filter(|k| self.disconnect_inner(k.source, k.target)).count();
        if removed > 0 {
            self.record();
        }
        removed
    }

    /// Flip each link's direction, keeping its label. Links whose reverse
    /// already exists are left alone.
    pub fn reverse_links(&mut self, keys: &[LinkKey]) -> usize {
        let mut reversed = 0;
        for &key in keys {
            if key.is_self_loop() || self.links.contains_key(&key.reversed()) {
                continue;
            }
            let Some(mut link) = self.links.remove(&key) else { continue };
            if let Some(n) = self.node_mut(key.source) {
                n.remove_child(key.target);
            }
            if let Some(n) = self.node_mut(key.target) {
                n.children.push(key.source);
            }
            std::mem::swap(&mut link.source_node, &mut link.target_node);
            self.links.insert(link.key(), link);
            reversed += 1;
        }
        if reversed > 0 {
            self.refresh_shifting();
            self.record();
        }
        reversed
    }

    /// Set `is_shifting` on every link whose reverse also exists.
    pub(crate) fn refresh_shifting(&mut self) {
        let keys: HashSet<LinkKey> = self.links.keys().copied().collect();
        for (key, link) in self.links.iter_mut() {
            link.is_shifting = !key.is_self_loop() && keys.contains(&key.reversed());
        }
    }

    fn refresh_derived(&mut self) {
        self.refresh_shifting();
        algorithms::traversal::refresh_collapse_impl(self);
    }

    /// Rebuild the link set from the children lists. Labels of edges that
    /// survive are kept.
    pub fn update_links_by_child_map(&mut self) {
        let mut links = BTreeMap::new();
        for (id, n) in self.iter_nodes() {
            for &child in &n.children {
                let key = LinkKey::new(id, child);
                let link = self.links.get(&key).cloned().unwrap_or_else(|| NodeLink::new(id, child));
                links.insert(key, link);
            }
        }
        self.links = links;
        self.refresh_shifting();
    }

    /// Rebuild every children list from the link set.
    pub fn update_child_map_by_links(&mut self) {
        for n in self.nodes.iter_mut().flatten() {
            n.children.clear();
        }
        let keys: Vec<LinkKey> = self.links.keys().copied().collect();
        for key in keys {
            if !self.contains(key.source) || !self.contains(key.target) {
                self.links.remove(&key);
                continue;
            }
            if let Some(n) = self.node_mut(key.source) {
                n.children.push(key.target);
            }
        }
        self.refresh_shifting();
    }

    /// Adjacency lists and link set describe the same edges.
    pub fn is_consistent(&self) -> bool {
        let mut from_children = HashSet::new();
        for (id, n) in self.iter_nodes() {
            for &c in &n.children {
                if !self.contains(c) || !from_children.insert(LinkKey::new(id, c)) {
                    return false;
                }
            }
        }
        from_children.len() == self.links.len() && self.links.keys().all(|k| from_children.contains(k))
    }

    // ---- movement ----

    /// Translate one node and shove overlapping nodes away. Live gesture
    /// primitive: no history step.
    pub fn move_node(&mut self, id: NodeId, delta: Vector2) -> bool {
        let Some(n) = self.node_mut(id) else { return false };
        n.move_by(delta);
        algorithms::collision::resolve_collisions_impl(self, &[id]);
        true
    }

    /// Translate a node and everything reachable from it, each node once even
    /// on cyclic graphs. No history step.
    pub fn move_node_with_children(&mut self, id: NodeId, delta: Vector2) -> bool {
        algorithms::traversal::move_with_children_impl(self, id, delta)
    }

    /// Drag the selection; no history step.
    pub fn move_nodes(&mut self, delta: Vector2) {
        for id in self.selected_nodes() {
            self.move_node(id, delta);
        }
    }

    /// Drag the selection with subtrees; no history step.
    pub fn move_nodes_with_children(&mut self, delta: Vector2) {
        let mut moved = HashSet::new();
        let mut subtree = Vec::new();
        for id in self.selected_nodes() {
            for n in algorithms::traversal::reachable_impl(self, id) {
                if moved.insert(n) {
                    subtree.push(n);
                }
            }
        }
        for &id in &subtree {
            if let Some(n) = self.node_mut(id) {
                n.move_by(delta);
            }
        }
        algorithms::collision::resolve_collisions_impl(self, &subtree);
    }

    /// End of a drag gesture: one history step.
    pub fn move_finished(&mut self) {
        self.record();
    }

    /// Record the current state as one step (for edits made by callers).
    pub fn save_a_step(&mut self) {
        self.record();
    }

    /// Rotate the subtree hanging off `center` around it.
    pub fn rotate_node(&mut self, center: NodeId, degrees: f64) -> bool {
        if !algorithms::traversal::rotate_impl(self, center, degrees) {
            return false;
        }
        self.record();
        true
    }

    fn align(&mut self, alignment: Alignment) -> bool {
        let ids = self.selected_nodes();
        if !algorithms::align::align_impl(self, &ids, alignment) {
            return false;
        }
        self.record();
        true
    }

    pub fn align_nodes_row_center(&mut self) -> bool {
        self.align(Alignment::RowCenter)
    }

    pub fn align_nodes_col_left(&mut self) -> bool {
        self.align(Alignment::ColLeft)
    }

    pub fn align_nodes_col_right(&mut self) -> bool {
        self.align(Alignment::ColRight)
    }

    pub fn align_nodes_col_center(&mut self) -> bool {
        self.align(Alignment::ColCenter)
    }

    // ---- editing ----

    /// Replace a node's text; the body is resized around the new text and
    /// keeps its top-left corner.
    pub fn edit_node_inner_text(&mut self, id: NodeId, text: &str) -> bool {
        let size = node_size_for_text(self.measurer(), text);
        let Some(n) = self.node_mut(id) else { return false };
        n.inner_text = text.to_string();
        n.body_shape = Rectangle::new(n.body_shape.location_left_top, size.width, size.height);
        self.record();
        true
    }

    pub fn edit_node_details(&mut self, id: NodeId, details: &str) -> bool {
        let Some(n) = self.node_mut(id) else { return false };
        n.details = details.to_string();
        self.record();
        true
    }

    pub fn set_node_detail_show(&mut self, id: NodeId, show: bool) -> bool {
        match self.node_mut(id) {
            Some(n) => {
                n.is_detail_show = show;
                true
            }
            None => false,
        }
    }

    pub fn set_node_color(&mut self, id: NodeId, color: Option<Color>) -> bool {
        let Some(n) = self.node_mut(id) else { return false };
        n.color = color;
        self.record();
        true
    }

    pub fn edit_links_inner_text(&mut self, keys: &[LinkKey], text: &str) -> usize {
        let mut edited = 0;
        for key in keys {
            if let Some(link) = self.links.get_mut(key) {
                link.inner_text = text.to_string();
                edited += 1;
            }
        }
        if edited > 0 {
            self.record();
        }
        edited
    }

    /// Collapse hides everything reachable from the node; expanding shows it
    /// again unless another collapsed node still hides it.
    pub fn set_collapsed(&mut self, id: NodeId, collapsed: bool) -> bool {
        let Some(n) = self.node_mut(id) else { return false };
        n.is_collapsed = collapsed;
        algorithms::traversal::refresh_collapse_impl(self);
        self.record();
        true
    }

    pub fn get_all_root_nodes(&self) -> Vec<NodeId> {
        algorithms::traversal::root_nodes_impl(self)
    }

    // ---- selection and picking ----

    pub fn set_selected(&mut self, id: NodeId, selected: bool) -> bool {
        match self.node_mut(id) {
            Some(n) => {
                n.is_selected = selected;
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        for n in self.nodes.iter_mut().flatten() {
            n.is_selected = false;
        }
    }

    /// Replace the selection with the visible nodes touched by `rect`.
    pub fn select_nodes_in_rect(&mut self, rect: &Rectangle) -> usize {
        let hits = algorithms::picking::nodes_in_rect_impl(self, rect);
        self.clear_selection();
        for &id in &hits {
            self.set_selected(id, true);
        }
        hits.len()
    }

    pub fn selected_nodes(&self) -> Vec<NodeId> {
        self.iter_nodes().filter(|(_, n)| n.is_selected).map(|(id, _)| id).collect()
    }

    pub fn node_at(&self, point: Vector2) -> Option<NodeId> {
        algorithms::picking::node_at_impl(self, point)
    }

    pub fn links_intersecting_line(&self, line: &Line) -> Vec<LinkKey> {
        algorithms::picking::links_intersecting_line_impl(self, line)
    }

    pub fn link_body_shape(&self, key: LinkKey) -> Option<Shape> {
        algorithms::picking::link_body_shape_impl(self, key)
    }

    pub fn link_text_rect(&self, key: LinkKey) -> Option<Rectangle> {
        algorithms::picking::link_text_rect_impl(self, key)
    }

    // ---- cursor and grow ----

    pub fn move_cursor(&mut self, direction: Direction) -> Option<NodeId> {
        self.cursor_node = algorithms::navigation::move_cursor_impl(self, self.cursor_node, direction);
        self.cursor_node
    }

    /// Start the grow gesture from the cursor node.
    pub fn grow_node(&mut self) -> bool {
        if self.cursor_node.is_none() {
            return false;
        }
        self.grow_node_location = Some(GROW_NODE_OFFSET);
        true
    }

    pub fn is_grow_node_prepared(&self) -> bool {
        self.grow_node_location.is_some()
    }

    /// World position of the pending grown node.
    pub fn grow_node_location(&self) -> Option<Vector2> {
        let offset = self.grow_node_location?;
        Some(self.node(self.cursor_node?)?.body_shape.center() + offset)
    }

    pub fn rotate_grow_direction(&mut self, clockwise: bool) {
        let degrees = if clockwise { GROW_ROTATE_DEGREES } else { -GROW_ROTATE_DEGREES };
        if let Some(offset) = self.grow_node_location.as_mut() {
            *offset = offset.rotate(degrees);
        }
    }

    pub fn grow_node_cancel(&mut self) {
        self.grow_node_location = None;
    }

    /// Create the pending node, connect the cursor node to it and record one
    /// step.
    pub fn grow_node_confirm(&mut self) -> Option<NodeId> {
        let location = self.grow_node_location()?;
        let parent = self.cursor_node?;
        let id = self.add_node_inner(location, GROW_NODE_TEXT);
        self.connect_inner(parent, id);
        self.grow_node_location = None;
        self.record();
        Some(id)
    }

    // ---- clipboard ----

    /// Copy nodes and the links between them; uuids are kept until paste.
    pub fn copy_part(&mut self, ids: &[NodeId]) {
        self.clipboard = algorithms::clipboard::copy_part_impl(self, ids);
    }

    pub fn clipboard(&self) -> &GraphDocument {
        &self.clipboard
    }

    pub fn has_clipboard(&self) -> bool {
        !self.clipboard.is_empty()
    }

    /// Insert the clipboard with fresh uuids, translated by `offset`. The
    /// clipboard is kept, so pasting again yields another independent copy.
    pub fn paste(&mut self, offset: Vector2) -> Vec<NodeId> {
        if !self.has_clipboard() {
            return Vec::new();
        }
        let buffer = self.clipboard.clone();
        match algorithms::clipboard::paste_impl(self, &buffer, offset) {
            Ok(ids) => {
                algorithms::traversal::refresh_collapse_impl(self);
                self.record();
                ids
            }
            Err(e) => {
                log::warn!("paste failed: {}", e);
                Vec::new()
            }
        }
    }

    // ---- persistence ----

    pub fn dump_all(&self) -> GraphDocument {
        json::dump_impl(self)
    }

    pub fn to_json_value(&self) -> Value {
        self.dump_all().to_json_value()
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string(&self.dump_all()).unwrap_or_default()
    }

    // Swap in `doc`, keeping cursor and selection by uuid when they survive.
    fn replace_with(&mut self, doc: &GraphDocument) -> Result<()> {
        let cursor_uuid = self.cursor_node.and_then(|id| self.node(id)).map(|n| n.uuid.clone());
        let selected: HashSet<String> = self.iter_nodes().filter(|(_, n)| n.is_selected).map(|(_, n)| n.uuid.clone()).collect();

        let mut fresh = Graph::with_measurer(Box::new(GlyphAdvanceMeasure::default()));
        json::insert_document_impl(&mut fresh, doc, Vector2::ZERO)?;
        self.nodes = fresh.nodes;
        self.links = fresh.links;
        self.uuid_index = fresh.uuid_index;

        self.cursor_node = cursor_uuid.and_then(|u| self.node_by_uuid(&u));
        if self.cursor_node.is_none() {
            self.grow_node_location = None;
        }
        for n in self.nodes.iter_mut().flatten() {
            n.is_selected = selected.contains(&n.uuid);
        }
        algorithms::traversal::refresh_collapse_impl(self);
        Ok(())
    }

    /// Replace the whole graph with a serialized document. Legacy documents
    /// are upgraded first; on any error the graph is left untouched. History
    /// restarts with the loaded state as its base.
    pub fn load_from_dict(&mut self, v: &Value) -> Result<()> {
        let doc = json::parse_document(v)?;
        self.replace_with(&doc)?;
        self.history.reset_to(self.dump_all());
        Ok(())
    }

    pub fn load_from_str(&mut self, s: &str) -> Result<()> {
        let v: Value = serde_json::from_str(s)?;
        self.load_from_dict(&v)
    }

    /// Merge a serialized document into the graph at `offset`, optionally
    /// giving every node a fresh uuid first. One history step.
    pub fn add_from_dict(&mut self, v: &Value, offset: Vector2, refresh_uuid: bool) -> Result<Vec<NodeId>> {
        let mut doc = json::parse_document(v)?;
        if refresh_uuid {
            doc = doc.with_fresh_uuids();
        }
        let ids = json::insert_document_impl(self, &doc, offset)?;
        algorithms::traversal::refresh_collapse_impl(self);
        self.record();
        Ok(ids)
    }

    /// Replace the graph with a tree built from indented outline text.
    pub fn import_indented_text(&mut self, text: &str) -> Result<()> {
        let doc = algorithms::text_import::import_indented_text_impl(self.measurer(), text);
        json::check_limits(&doc)?;
        self.replace_with(&doc)?;
        self.record();
        Ok(())
    }

    /// Empty the graph and forget all history.
    pub fn clear_all(&mut self) {
        self.nodes.clear();
        self.links.clear();
        self.uuid_index.clear();
        self.cursor_node = None;
        self.grow_node_location = None;
        self.history.reset();
    }

    // ---- history ----

    pub fn undo(&mut self) -> bool {
        let Some(doc) = self.history.undo().cloned() else { return false };
        self.restore(&doc)
    }

    pub fn redo(&mut self) -> bool {
        let Some(doc) = self.history.redo().cloned() else { return false };
        self.restore(&doc)
    }

    fn restore(&mut self, doc: &GraphDocument) -> bool {
        match self.replace_with(doc) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("history snapshot could not be restored: {}", e);
                false
            }
        }
    }
}
