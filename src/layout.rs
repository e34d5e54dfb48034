use crate::config::RenderOptions;
use crate::error::Error;
use crate::fit::{FitResult, fit_text};
use crate::graph::{Graph, NodeKind};
use crate::shape::{ShapePrimitive, resolve_shape};
use crate::text_metrics::TextMetrics;
use std::collections::HashMap;

/// A node placed in normalized viewport coordinates, with its drawable shape
/// and fitted label.
#[derive(Debug, Clone)]
pub struct PlacedNode {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub shape: ShapePrimitive,
    pub fit: FitResult,
}

impl PlacedNode {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Baseline of the first wrapped line. The stacked lines are centered
    /// around the shape's vertical midpoint; each following line sits one
    /// line height lower.
    pub fn first_baseline(&self) -> f32 {
        let (_, cy) = self.center();
        let block_height = self.fit.lines.len() as f32 * self.fit.line_height();
        cy - block_height / 2.0 + self.fit.font_size
    }
}

/// A straight connector between two node centers. Endpoints are deliberately
/// not clipped to the shape boundary; arrowheads overlap the target shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// The shared per-node/per-connection computation both serializations draw
/// from, so SVG and clipboard output can never disagree about which nodes
/// and connections are included.
#[derive(Debug, Clone)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<PlacedNode>,
    pub connectors: Vec<Connector>,
}

/// Normalizes the graph into a margin-padded viewport, fits every label and
/// routes every resolvable connection. Connections with a missing endpoint
/// are skipped; they are stale references from concurrent edits, not errors.
/// Non-positive node dimensions are a contract violation and fail fast.
pub fn build_scene(
    graph: &Graph,
    options: &RenderOptions,
    metrics: &dyn TextMetrics,
) -> Result<Scene, Error> {
    for node in &graph.nodes {
        if node.width <= 0.0 || node.height <= 0.0 {
            return Err(Error::InvalidNode {
                id: node.id.clone(),
                width: node.width,
                height: node.height,
            });
        }
    }

    let margin = options.margin;
    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for node in &graph.nodes {
        min_x = min_x.min(node.x);
        min_y = min_y.min(node.y);
        max_x = max_x.max(node.x + node.width);
        max_y = max_y.max(node.y + node.height);
    }
    if !min_x.is_finite() {
        min_x = 0.0;
        min_y = 0.0;
        max_x = 0.0;
        max_y = 0.0;
    }
    let offset_x = margin - min_x;
    let offset_y = margin - min_y;
    let width = (max_x - min_x) + 2.0 * margin;
    let height = (max_y - min_y) + 2.0 * margin;

    let mut nodes = Vec::with_capacity(graph.nodes.len());
    let mut centers: HashMap<&str, (f32, f32)> = HashMap::with_capacity(graph.nodes.len());
    for node in &graph.nodes {
        let x = node.x + offset_x;
        let y = node.y + offset_y;
        let geometry = resolve_shape(node.kind, x, y, node.width, node.height);
        let fit = fit_text(
            &node.text,
            geometry.text_box_width,
            geometry.text_box_height,
            options.base_font_size,
            metrics,
        );
        centers.insert(
            node.id.as_str(),
            (x + node.width / 2.0, y + node.height / 2.0),
        );
        nodes.push(PlacedNode {
            id: node.id.clone(),
            kind: node.kind,
            label: node.text.clone(),
            x,
            y,
            width: node.width,
            height: node.height,
            shape: geometry.primitive,
            fit,
        });
    }

    let mut connectors = Vec::new();
    for connection in &graph.connections {
        let (Some(&(x1, y1)), Some(&(x2, y2))) = (
            centers.get(connection.from.as_str()),
            centers.get(connection.to.as_str()),
        ) else {
            continue;
        };
        connectors.push(Connector { x1, y1, x2, y2 });
    }

    Ok(Scene {
        width,
        height,
        nodes,
        connectors,
    })
}
