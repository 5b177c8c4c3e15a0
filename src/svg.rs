use crate::geometry::curve::PathSegment;
use crate::geometry::vector::Vector2;
use crate::model::Color;
use crate::render::PaintCommand;

fn color(c: Color) -> String {
    format!("rgba({},{},{},{})", c.r, c.g, c.b, c.a as f64 / 255.0)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn arc_to(d: &mut String, center: Vector2, radius: f64, from_deg: f64, sweep_deg: f64) {
    let end = {
        let (sin, cos) = (from_deg + sweep_deg).to_radians().sin_cos();
        center + Vector2::new(cos, sin) * radius
    };
    let large = if sweep_deg.abs() > 180.0 { 1 } else { 0 };
    // y points down, so a positive sweep is clockwise on screen
    let sweep = if sweep_deg >= 0.0 { 1 } else { 0 };
    d.push_str(&format!(" A {} {} 0 {} {} {} {}", radius, radius, large, sweep, end.x, end.y));
}

/// SVG path data for a segment list. Arcs start from their own start angle;
/// sweeps of a full turn or more are split in two since a single SVG arc
/// cannot close on itself.
pub fn path_data(segments: &[PathSegment]) -> String {
    let mut d = String::new();
    for seg in segments {
        match *seg {
            PathSegment::MoveTo { to } => d.push_str(&format!(" M {} {}", to.x, to.y)),
            PathSegment::LineTo { to } => d.push_str(&format!(" L {} {}", to.x, to.y)),
            PathSegment::CubicTo { ctrl1, ctrl2, to } => d.push_str(&format!(
                " C {} {}, {} {}, {} {}",
                ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
            )),
            PathSegment::Arc { center, radius, start_angle, sweep_angle } => {
                let sweep = sweep_angle.clamp(-359.99, 359.99);
                let (sin, cos) = start_angle.to_radians().sin_cos();
                let start = center + Vector2::new(cos, sin) * radius;
                d.push_str(&format!(" L {} {}", start.x, start.y));
                if sweep.abs() > 180.0 {
                    arc_to(&mut d, center, radius, start_angle, sweep / 2.0);
                    arc_to(&mut d, center, radius, start_angle + sweep / 2.0, sweep / 2.0);
                } else {
                    arc_to(&mut d, center, radius, start_angle, sweep);
                }
            }
        }
    }
    d.trim_start().to_string()
}

/// Standalone SVG document for one frame of paint commands.
pub fn to_svg(commands: &[PaintCommand], width: f64, height: f64) -> String {
    let mut out = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = width,
        h = height
    );
    for cmd in commands {
        let line = match cmd {
            PaintCommand::Rect { rect, fill, stroke, stroke_width, radius } => format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
                rect.location_left_top.x,
                rect.location_left_top.y,
                rect.width,
                rect.height,
                radius,
                color(*fill),
                color(*stroke),
                stroke_width
            ),
            PaintCommand::Line { from, to, color: c, width } => format!(
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
                from.x,
                from.y,
                to.x,
                to.y,
                color(*c),
                width
            ),
            PaintCommand::Circle { center, radius, fill, stroke, stroke_width } => format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
                center.x,
                center.y,
                radius,
                color(*fill),
                color(*stroke),
                stroke_width
            ),
            PaintCommand::Path { segments, color: c, width } => format!(
                "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
                path_data(segments),
                color(*c),
                width
            ),
            PaintCommand::Polygon { points, fill } => {
                let pts: Vec<String> = points.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
                format!("<polygon points=\"{}\" fill=\"{}\"/>", pts.join(" "), color(*fill))
            }
            PaintCommand::Text { location, text, size, color: c } => {
                let mut t = format!("<text font-size=\"{}\" fill=\"{}\">", size, color(*c));
                for (i, line) in text.split('\n').enumerate() {
                    // baseline of line i sits one font size below its top
                    let y = location.y + size * (i as f64 + 1.0);
                    t.push_str(&format!("<tspan x=\"{}\" y=\"{}\">{}</tspan>", location.x, y, escape(line)));
                }
                t.push_str("</text>");
                t
            }
        };
        out.push_str("  ");
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str("</svg>\n");
    out
}
