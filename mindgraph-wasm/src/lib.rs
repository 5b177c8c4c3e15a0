use mindgraph::camera::Camera;
use mindgraph::effect::EffectManager;
use mindgraph::geometry::vector::Vector2;
use mindgraph::render::RenderStyle;
use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;

/// Graph, camera and running effects of one editor canvas.
#[wasm_bindgen]
pub struct Editor {
    pub(crate) graph: mindgraph::Graph,
    pub(crate) camera: Camera,
    pub(crate) effects: EffectManager,
    pub(crate) style: RenderStyle,
}

impl Editor {
    pub fn rs_new(width: f64, height: f64) -> Editor {
        Editor {
            graph: mindgraph::Graph::new(),
            camera: Camera::new(Vector2::ZERO, width, height),
            effects: EffectManager::new(),
            style: RenderStyle::default(),
        }
    }

    pub fn graph(&self) -> &mindgraph::Graph {
        &self.graph
    }
}
