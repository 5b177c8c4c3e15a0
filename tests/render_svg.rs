use mindgraph::camera::Camera;
use mindgraph::effect::{Effect, EffectKind, EffectManager};
use mindgraph::geometry::curve::PathSegment;
use mindgraph::geometry::rectangle::Rectangle;
use mindgraph::geometry::vector::Vector2;
use mindgraph::model::LinkKey;
use mindgraph::render::{paint_scene, PaintCommand, RenderStyle};
use mindgraph::settings::{LineStyle, Settings};
use mindgraph::svg::to_svg;
use mindgraph::Graph;
use serde_json::json;

fn scene(g: &Graph, settings: &Settings) -> Vec<PaintCommand> {
    let camera = Camera::new(Vector2::new(200.0, 50.0), 800.0, 600.0);
    paint_scene(g, &camera, settings, &RenderStyle::default(), &[])
}

fn two_linked() -> Graph {
    let mut g = Graph::new();
    let a = g.add_node_with_body(Rectangle::new(Vector2::ZERO, 100.0, 100.0));
    let b = g.add_node_with_body(Rectangle::new(Vector2::new(300.0, 0.0), 100.0, 100.0));
    g.connect_node(a, b);
    g
}

#[test]
fn curve_style_paints_cubic_and_arrow() {
    let cmds = scene(&two_linked(), &Settings::default());
    let path = cmds.iter().find_map(|c| match c {
        PaintCommand::Path { segments, .. } => Some(segments.clone()),
        _ => None,
    });
    let segments = path.expect("link path");
    assert!(matches!(segments[1], PathSegment::CubicTo { .. }));
    assert!(cmds.iter().any(|c| matches!(c, PaintCommand::Polygon { .. })));
}

#[test]
fn straight_style_with_label_breaks_line() {
    let mut g = two_linked();
    g.edit_links_inner_text(&[LinkKey::new(0, 1)], "uses");
    let settings = Settings { line_style: LineStyle::Straight, ..Settings::default() };
    let cmds = scene(&g, &settings);
    let segments = cmds
        .iter()
        .find_map(|c| match c {
            PaintCommand::Path { segments, .. } => Some(segments.clone()),
            _ => None,
        })
        .expect("link path");
    assert_eq!(segments.len(), 4);
    assert!(cmds.iter().any(|c| matches!(c, PaintCommand::Text { text, .. } if text == "uses")));
}

#[test]
fn collapsed_subtree_is_not_painted() {
    let mut g = two_linked();
    g.set_collapsed(0, true);
    let cmds = scene(&g, &Settings::default());
    assert!(!cmds.iter().any(|c| matches!(c, PaintCommand::Path { .. })));
    let node_rects = cmds.iter().filter(|c| matches!(c, PaintCommand::Rect { .. })).count();
    assert_eq!(node_rects, 2);
}

#[test]
fn effects_age_and_expire() {
    let mut effects = EffectManager::new();
    effects.push(Effect::new(EffectKind::RectangleFlash { rect: Rectangle::new(Vector2::ZERO, 10.0, 10.0) }, 2));
    effects.tick();
    match &effects.effects()[0].kind {
        EffectKind::RectangleFlash { rect } => assert_eq!(rect.width, 12.0),
        other => panic!("unexpected {:?}", other),
    }
    effects.tick();
    assert!(effects.is_empty());
}

#[test]
fn svg_document_contains_every_primitive() {
    let mut g = Graph::new();
    let node = |uuid: &str, x: f64, children: &[&str]| {
        json!({
            "body_shape": {"type": "Rectangle", "location_left_top": [x, 0.0], "width": 100.0, "height": 100.0},
            "inner_text": uuid, "details": "", "uuid": uuid, "children": children,
        })
    };
    g.load_from_dict(&json!({"nodes": [node("a", 0.0, &["b"]), node("b", 300.0, &["b"])], "links": []}))
        .unwrap();
    let cmds = scene(&g, &Settings::default());
    let svg = to_svg(&cmds, 800.0, 600.0);
    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains("<path"));
    assert!(svg.contains(" A "));
    assert!(svg.contains("<polygon"));
    assert!(svg.contains("<rect"));
}
