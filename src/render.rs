use crate::layout::{PlacedNode, Scene};
use crate::shape::ShapePrimitive;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Serializes a scene into a standalone SVG document: explicit
/// width/height/viewBox, one arrowhead marker definition referenced by every
/// connector, and per node one shape element plus one text element with a
/// tspan per wrapped line.
pub fn render_svg(scene: &Scene, theme: &Theme) -> String {
    let mut svg = String::new();
    let width = scene.width;
    let height = scene.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.0}\" height=\"{height:.0}\" viewBox=\"0 0 {width:.0} {height:.0}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{}\"/></marker>",
        theme.line_color
    ));
    svg.push_str("</defs>");

    for connector in &scene.connectors {
        svg.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"2\" marker-end=\"url(#arrow)\"/>",
            connector.x1, connector.y1, connector.x2, connector.y2, theme.line_color
        ));
    }

    for node in &scene.nodes {
        svg.push_str(&shape_svg(node, theme));
        svg.push_str(&label_svg(node, theme));
    }

    svg.push_str("</svg>");
    svg
}

fn shape_svg(node: &PlacedNode, theme: &Theme) -> String {
    let fill = theme.fill(node.kind);
    let stroke = theme.stroke(node.kind);
    match &node.shape {
        ShapePrimitive::Circle { cx, cy, r } => format!(
            "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r:.2}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"2\"/>"
        ),
        ShapePrimitive::Diamond { points } => {
            let points = points
                .iter()
                .map(|(x, y)| format!("{x:.2},{y:.2}"))
                .collect::<Vec<_>>()
                .join(" ");
            format!(
                "<polygon points=\"{points}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"2\"/>"
            )
        }
        ShapePrimitive::RoundedRect {
            x,
            y,
            width,
            height,
            radius,
        } => format!(
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" rx=\"{radius}\" ry=\"{radius}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"2\"/>"
        ),
    }
}

fn label_svg(node: &PlacedNode, theme: &Theme) -> String {
    let (cx, _) = node.center();
    let start_y = node.first_baseline();
    let line_height = node.fit.line_height();

    let mut text = format!(
        "<text x=\"{cx:.2}\" y=\"{start_y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">",
        escape_xml(&theme.font_family),
        node.fit.font_size,
        theme.text_color
    );
    for (idx, line) in node.fit.lines.iter().enumerate() {
        if idx == 0 {
            text.push_str(&format!("<tspan x=\"{cx:.2}\" dy=\"0\">{}", escape_xml(line)));
        } else {
            text.push_str(&format!(
                "<tspan x=\"{cx:.2}\" dy=\"{line_height:.2}\">{}",
                escape_xml(line)
            ));
        }
        text.push_str("</tspan>");
    }
    text.push_str("</text>");
    text
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path) -> Result<()> {
    let opt = usvg::Options {
        font_family: "Inter".to_string(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
