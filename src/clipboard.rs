use crate::graph::NodeKind;
use crate::layout::Scene;
use crate::shape::{CORNER_RADIUS, TEXT_PADDING};
use crate::theme::Theme;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// Version tag of the clipboard payload format.
pub const CLIPBOARD_VERSION: &str = "1.0";

/// Constant source tag carried in the payload metadata.
pub const CLIPBOARD_SOURCE: &str = "flowrender";

/// Design-tool clipboard payload: a flat, ordered node tree plus metadata.
/// Produced fresh per export call, never reused.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipboardTree {
    pub version: String,
    pub nodes: Vec<ClipboardNode>,
    pub meta: ClipboardMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipboardMeta {
    pub source: String,
    pub generated_at: u64,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ClipboardNode {
    Frame(FrameRecord),
    Line(LineRecord),
}

/// Container record for one flow node. Auto-layout metadata pins both axes
/// to fixed sizing with centered alignment so the pasted frame keeps the
/// rendered geometry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    pub corner_radius: f32,
    pub layout_mode: &'static str,
    pub primary_axis_sizing_mode: &'static str,
    pub counter_axis_sizing_mode: &'static str,
    pub primary_axis_align_items: &'static str,
    pub counter_axis_align_items: &'static str,
    pub padding_left: f32,
    pub padding_right: f32,
    pub padding_top: f32,
    pub padding_bottom: f32,
    pub children: Vec<TextRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub characters: String,
    pub font_family: String,
    pub font_weight: u32,
    pub font_size: f32,
    pub text_align_horizontal: &'static str,
    pub text_align_vertical: &'static str,
    pub letter_spacing: f32,
    pub line_height: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub strokes: Vec<Paint>,
    pub stroke_weight: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub color: String,
}

impl Paint {
    fn solid(color: &str) -> Self {
        Self {
            kind: "SOLID",
            color: color.to_string(),
        }
    }
}

/// Builds the clipboard node tree from an already-computed scene. Frames are
/// numbered first; line records continue the same id sequence, so ids stay
/// collision-free within one payload.
pub fn clipboard_tree(scene: &Scene, theme: &Theme, generated_at: u64) -> ClipboardTree {
    let mut nodes = Vec::with_capacity(scene.nodes.len() + scene.connectors.len());
    let mut next_id = 1usize;

    for placed in &scene.nodes {
        let corner_radius = match placed.kind {
            NodeKind::Start | NodeKind::End => placed.width.min(placed.height) / 2.0,
            NodeKind::Decision => 0.0,
            NodeKind::Process => CORNER_RADIUS,
        };
        let text = TextRecord {
            id: format!("{next_id}:text"),
            name: placed.label.clone(),
            kind: "TEXT",
            characters: placed.fit.lines.join("\n"),
            font_family: theme.font_family.clone(),
            font_weight: 400,
            font_size: placed.fit.font_size,
            text_align_horizontal: "CENTER",
            text_align_vertical: "CENTER",
            letter_spacing: 0.0,
            line_height: placed.fit.line_height(),
        };
        nodes.push(ClipboardNode::Frame(FrameRecord {
            id: next_id.to_string(),
            name: format!("{} / {}", placed.kind.display_name(), placed.label),
            kind: "FRAME",
            x: placed.x,
            y: placed.y,
            width: placed.width,
            height: placed.height,
            fills: vec![Paint::solid(theme.fill(placed.kind))],
            strokes: vec![Paint::solid(theme.stroke(placed.kind))],
            corner_radius,
            layout_mode: "VERTICAL",
            primary_axis_sizing_mode: "FIXED",
            counter_axis_sizing_mode: "FIXED",
            primary_axis_align_items: "CENTER",
            counter_axis_align_items: "CENTER",
            padding_left: TEXT_PADDING,
            padding_right: TEXT_PADDING,
            padding_top: TEXT_PADDING,
            padding_bottom: TEXT_PADDING,
            children: vec![text],
        }));
        next_id += 1;
    }

    for connector in &scene.connectors {
        nodes.push(ClipboardNode::Line(LineRecord {
            id: next_id.to_string(),
            name: "Connector".to_string(),
            kind: "LINE",
            x: connector.x1.min(connector.x2),
            y: connector.y1.min(connector.y2),
            width: (connector.x2 - connector.x1).abs(),
            height: (connector.y2 - connector.y1).abs(),
            strokes: vec![Paint::solid(&theme.line_color)],
            stroke_weight: 2.0,
        }));
        next_id += 1;
    }

    ClipboardTree {
        version: CLIPBOARD_VERSION.to_string(),
        nodes,
        meta: ClipboardMeta {
            source: CLIPBOARD_SOURCE.to_string(),
            generated_at,
        },
    }
}

/// Serializes the clipboard tree to JSON with a wall-clock generation
/// timestamp (milliseconds since the epoch).
pub fn clipboard_json(scene: &Scene, theme: &Theme) -> String {
    let generated_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0);
    let tree = clipboard_tree(scene, theme, generated_at);
    // Derive-only records with string/number fields cannot fail to
    // serialize; a substituted placeholder here would deliver an empty
    // payload as a successful export.
    serde_json::to_string(&tree).expect("clipboard tree serialization is infallible")
}
