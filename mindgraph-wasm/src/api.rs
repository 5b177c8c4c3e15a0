use crate::interop::{arr_u32, to_js, warn};
use crate::Editor;
use js_sys::Uint32Array;
use mindgraph::effect::{Effect, EffectKind};
use mindgraph::geometry::line::Line;
use mindgraph::geometry::rectangle::Rectangle;
use mindgraph::geometry::vector::Vector2;
use mindgraph::model::Direction;
use mindgraph::render::paint_scene;
use mindgraph::settings::Settings;
use serde::Serialize;
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;
use crate::error;

/// Frames a cut stroke stays visible.
const CUTTING_FLASH_FRAMES: u32 = 20;
const PASTE_FLASH_FRAMES: u32 = 30;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[derive(Serialize)]
struct NodeView<'a> {
    uuid: &'a str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    inner_text: &'a str,
    details: &'a str,
    children: &'a [u32],
    is_selected: bool,
    is_collapsed: bool,
    is_hidden_by_collapse: bool,
}

fn parse_direction(s: &str) -> Option<Direction> {
    match s {
        "up" => Some(Direction::Up),
        "down" => Some(Direction::Down),
        "left" => Some(Direction::Left),
        "right" => Some(Direction::Right),
        _ => None,
    }
}

fn finite(params: &[(&str, f64)]) -> Result<(), JsValue> {
    match params.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, _)) => Err(error::non_finite(name)),
        None => Ok(()),
    }
}

#[wasm_bindgen]
impl Editor {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Editor {
        crate::Editor::rs_new(width, height)
    }

    /// One animation frame: camera physics, then effect ageing.
    pub fn tick(&mut self) {
        self.camera.tick(self.graph.settings());
        self.effects.extend(self.camera.drain_effects());
        self.effects.tick();
    }
    pub fn resize(&mut self, width: f64, height: f64) {
        self.camera.reset_view_size(width, height);
    }

    // Nodes
    pub fn add_node(&mut self, x: f64, y: f64) -> u32 {
        self.graph.add_node(Vector2::new(x, y))
    }
    pub fn add_node_res(&mut self, x: f64, y: f64) -> JsValue {
        if let Err(e) = finite(&[("x", x), ("y", y)]) {
            return e;
        }
        error::ok(JsValue::from_f64(self.graph.add_node(Vector2::new(x, y)) as f64))
    }
    pub fn delete_node(&mut self, id: u32) -> bool {
        self.graph.delete_node(id)
    }
    pub fn delete_node_res(&mut self, id: u32) -> JsValue {
        if !self.graph.contains(id) {
            return error::invalid_id("node", id);
        }
        error::ok(JsValue::from_bool(self.graph.delete_node(id)))
    }
    pub fn delete_selected(&mut self) -> u32 {
        let ids = self.graph.selected_nodes();
        self.graph.delete_nodes(&ids) as u32
    }
    pub fn get_node(&self, id: u32) -> JsValue {
        match self.graph.node(id) {
            Some(n) => to_js(&NodeView {
                uuid: &n.uuid,
                x: n.body_shape.location_left_top.x,
                y: n.body_shape.location_left_top.y,
                width: n.body_shape.width,
                height: n.body_shape.height,
                inner_text: &n.inner_text,
                details: &n.details,
                children: &n.children,
                is_selected: n.is_selected,
                is_collapsed: n.is_collapsed,
                is_hidden_by_collapse: n.is_hidden_by_collapse,
            }),
            None => JsValue::NULL,
        }
    }
    pub fn get_node_res(&self, id: u32) -> JsValue {
        if !self.graph.contains(id) {
            return error::invalid_id("node", id);
        }
        error::ok(self.get_node(id))
    }
    pub fn node_ids(&self) -> Uint32Array {
        arr_u32(&self.graph.node_ids())
    }
    pub fn node_count(&self) -> u32 {
        self.graph.node_count() as u32
    }
    pub fn link_count(&self) -> u32 {
        self.graph.link_count() as u32
    }
    pub fn edit_node_text(&mut self, id: u32, text: &str) -> bool {
        self.graph.edit_node_inner_text(id, text)
    }
    pub fn edit_node_text_res(&mut self, id: u32, text: &str) -> JsValue {
        if !self.graph.contains(id) {
            return error::invalid_id("node", id);
        }
        error::ok(JsValue::from_bool(self.graph.edit_node_inner_text(id, text)))
    }
    pub fn edit_node_details(&mut self, id: u32, details: &str) -> bool {
        self.graph.edit_node_details(id, details)
    }
    pub fn set_collapsed(&mut self, id: u32, collapsed: bool) -> bool {
        self.graph.set_collapsed(id, collapsed)
    }

    // Links
    pub fn connect_node(&mut self, from: u32, to: u32) -> bool {
        self.graph.connect_node(from, to)
    }
    pub fn connect_node_res(&mut self, from: u32, to: u32) -> JsValue {
        for id in [from, to] {
            if !self.graph.contains(id) {
                return error::invalid_id("node", id);
            }
        }
        if !self.graph.connect_node(from, to) {
            return error::rejected("nodes are the same or already connected");
        }
        error::ok(JsValue::from_bool(true))
    }
    pub fn disconnect_node(&mut self, from: u32, to: u32) -> bool {
        self.graph.disconnect_node(from, to)
    }
    pub fn disconnect_node_res(&mut self, from: u32, to: u32) -> JsValue {
        for id in [from, to] {
            if !self.graph.contains(id) {
                return error::invalid_id("node", id);
            }
        }
        if !self.graph.disconnect_node(from, to) {
            return error::rejected("no such link");
        }
        error::ok(JsValue::from_bool(true))
    }
    /// Delete every link the stroke crosses (world coordinates).
    pub fn cut(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> u32 {
        let line = Line::new(Vector2::new(x1, y1), Vector2::new(x2, y2));
        let keys = self.graph.links_intersecting_line(&line);
        self.effects.push(Effect::new(EffectKind::CuttingFlash { line }, CUTTING_FLASH_FRAMES));
        self.graph.delete_links(&keys) as u32
    }
    pub fn cut_res(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> JsValue {
        if let Err(e) = finite(&[("x1", x1), ("y1", y1), ("x2", x2), ("y2", y2)]) {
            return e;
        }
        error::ok(JsValue::from_f64(self.cut(x1, y1, x2, y2) as f64))
    }

    // Movement
    pub fn move_node(&mut self, id: u32, dx: f64, dy: f64) -> bool {
        self.graph.move_node(id, Vector2::new(dx, dy))
    }
    pub fn move_node_res(&mut self, id: u32, dx: f64, dy: f64) -> JsValue {
        if let Err(e) = finite(&[("dx", dx), ("dy", dy)]) {
            return e;
        }
        if !self.graph.contains(id) {
            return error::invalid_id("node", id);
        }
        error::ok(JsValue::from_bool(self.graph.move_node(id, Vector2::new(dx, dy))))
    }
    pub fn move_node_with_children(&mut self, id: u32, dx: f64, dy: f64) -> bool {
        self.graph.move_node_with_children(id, Vector2::new(dx, dy))
    }
    pub fn move_selected(&mut self, dx: f64, dy: f64, with_children: bool) {
        if with_children {
            self.graph.move_nodes_with_children(Vector2::new(dx, dy));
        } else {
            self.graph.move_nodes(Vector2::new(dx, dy));
        }
    }
    pub fn move_finished(&mut self) {
        self.graph.move_finished();
    }
    pub fn rotate_node(&mut self, id: u32, degrees: f64) -> bool {
        self.graph.rotate_node(id, degrees)
    }

    // Selection and picking (world coordinates)
    pub fn node_at(&self, x: f64, y: f64) -> Option<u32> {
        self.graph.node_at(Vector2::new(x, y))
    }
    pub fn select_in_rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> u32 {
        let rect = Rectangle::from_two_points(Vector2::new(x1, y1), Vector2::new(x2, y2));
        self.graph.select_nodes_in_rect(&rect) as u32
    }
    pub fn set_selected(&mut self, id: u32, selected: bool) -> bool {
        self.graph.set_selected(id, selected)
    }
    pub fn selected_nodes(&self) -> Uint32Array {
        arr_u32(&self.graph.selected_nodes())
    }

    // Cursor and grow
    pub fn move_cursor(&mut self, direction: &str) -> Option<u32> {
        parse_direction(direction).and_then(|d| self.graph.move_cursor(d))
    }
    pub fn move_cursor_res(&mut self, direction: &str) -> JsValue {
        match parse_direction(direction) {
            Some(d) => error::ok(self.graph.move_cursor(d).map_or(JsValue::NULL, |id| JsValue::from_f64(id as f64))),
            None => error::invalid_direction(direction),
        }
    }
    pub fn grow_node(&mut self) -> bool {
        self.graph.grow_node()
    }
    pub fn rotate_grow_direction(&mut self, clockwise: bool) {
        self.graph.rotate_grow_direction(clockwise);
    }
    pub fn grow_node_confirm(&mut self) -> Option<u32> {
        self.graph.grow_node_confirm()
    }
    pub fn grow_node_confirm_res(&mut self) -> JsValue {
        match self.graph.grow_node_confirm() {
            Some(id) => error::ok(JsValue::from_f64(id as f64)),
            None => error::rejected("no grow in progress"),
        }
    }
    pub fn grow_node_cancel(&mut self) {
        self.graph.grow_node_cancel();
    }

    // Clipboard
    pub fn copy_selected(&mut self) -> u32 {
        let ids = self.graph.selected_nodes();
        self.graph.copy_part(&ids);
        self.graph.clipboard().nodes.len() as u32
    }
    pub fn paste(&mut self, dx: f64, dy: f64) -> Uint32Array {
        let ids = self.graph.paste(Vector2::new(dx, dy));
        for &id in &ids {
            if let Some(n) = self.graph.node(id) {
                self.effects.push(Effect::new(EffectKind::RectangleFlash { rect: n.body_shape }, PASTE_FLASH_FRAMES));
            }
        }
        arr_u32(&ids)
    }

    /// Current id of the node with this uuid.
    pub fn node_id_by_uuid(&self, uuid: &str) -> Option<u32> {
        self.graph.node_by_uuid(uuid)
    }

    // History
    /// Node ids are reassigned when a snapshot is restored. Ids held from
    /// before the call may name a different node afterwards; keep uuids and
    /// look them up again with `node_id_by_uuid`.
    pub fn undo(&mut self) -> bool {
        self.graph.undo()
    }
    /// Same id caveat as `undo`.
    pub fn redo(&mut self) -> bool {
        self.graph.redo()
    }
    pub fn history_string(&self) -> String {
        self.graph.history().stringify()
    }

    // Camera
    pub fn press_move(&mut self, dx: f64, dy: f64) {
        self.camera.press_move(Vector2::new(dx, dy));
    }
    pub fn release_move(&mut self, dx: f64, dy: f64) {
        self.camera.release_move(Vector2::new(dx, dy));
    }
    pub fn zoom_in(&mut self) {
        self.camera.zoom_in(self.graph.settings());
    }
    pub fn zoom_out(&mut self) {
        self.camera.zoom_out(self.graph.settings());
    }
    pub fn reset_camera(&mut self) {
        self.camera.reset();
    }
    pub fn current_scale(&self) -> f64 {
        self.camera.current_scale
    }
    pub fn view_to_world(&self, x: f64, y: f64) -> JsValue {
        let p = self.camera.location_view2world(Vector2::new(x, y));
        to_js(&[p.x, p.y])
    }
    pub fn world_to_view(&self, x: f64, y: f64) -> JsValue {
        let p = self.camera.location_world2view(Vector2::new(x, y));
        to_js(&[p.x, p.y])
    }

    // Output
    pub fn paint(&self) -> JsValue {
        to_js(&paint_scene(&self.graph, &self.camera, self.graph.settings(), &self.style, self.effects.effects()))
    }
    pub fn to_svg(&self) -> String {
        let cmds = paint_scene(&self.graph, &self.camera, self.graph.settings(), &self.style, self.effects.effects());
        mindgraph::svg::to_svg(&cmds, self.camera.view_width, self.camera.view_height)
    }

    // Persistence
    pub fn to_json(&self) -> JsValue {
        to_js(&self.graph.dump_all())
    }
    /// Replaces the graph; previously returned node ids are invalidated.
    pub fn from_json(&mut self, v: JsValue) -> bool {
        let ok = matches!(self.from_json_inner(v), Ok(()));
        if !ok {
            warn("from_json: document rejected");
        }
        ok
    }
    pub fn from_json_res(&mut self, v: JsValue) -> JsValue {
        match self.from_json_inner(v) {
            Ok(()) => error::ok(JsValue::from_bool(true)),
            Err(e) => e,
        }
    }
    pub fn import_text_res(&mut self, text: &str) -> JsValue {
        match self.graph.import_indented_text(text) {
            Ok(()) => error::ok(JsValue::from_f64(self.graph.node_count() as f64)),
            Err(e) => error::from_core(&e),
        }
    }
    pub fn clear(&mut self) {
        self.graph.clear_all();
        self.effects.clear();
    }

    // Settings
    pub fn settings(&self) -> JsValue {
        to_js(self.graph.settings())
    }
    pub fn set_settings_res(&mut self, v: JsValue) -> JsValue {
        let settings: Settings = match serde_wasm_bindgen::from_value(v) {
            Ok(s) => s,
            Err(e) => return error::err("json_parse", format!("{}", e), None),
        };
        let animate = settings.is_scale_animation_open;
        match self.graph.set_settings(settings) {
            Ok(()) => {
                self.camera.set_scale_animation(animate);
                error::ok(JsValue::from_bool(true))
            }
            Err(e) => error::from_core(&e),
        }
    }
}

impl Editor {
    fn from_json_inner(&mut self, v: JsValue) -> Result<(), JsValue> {
        let value: serde_json::Value =
            serde_wasm_bindgen::from_value(v).map_err(|e| error::err("json_parse", format!("{}", e), None))?;
        self.graph.load_from_dict(&value).map_err(|e| error::from_core(&e))
    }
}
