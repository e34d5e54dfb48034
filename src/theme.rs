use crate::graph::NodeKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub text_color: String,
    pub line_color: String,
    pub background: String,
    pub start_fill: String,
    pub start_stroke: String,
    pub process_fill: String,
    pub process_stroke: String,
    pub decision_fill: String,
    pub decision_stroke: String,
    pub end_fill: String,
    pub end_stroke: String,
}

impl Theme {
    /// Fixed palette keyed by node kind: start green, process blue, decision
    /// yellow, end red. Both output formats read from the same mapping.
    pub fn flowchart_default() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            text_color: "#1C2430".to_string(),
            line_color: "#555555".to_string(),
            background: "#FFFFFF".to_string(),
            start_fill: "#4CAF50".to_string(),
            start_stroke: "#2E7D32".to_string(),
            process_fill: "#2196F3".to_string(),
            process_stroke: "#1565C0".to_string(),
            decision_fill: "#FFC107".to_string(),
            decision_stroke: "#F57F17".to_string(),
            end_fill: "#F44336".to_string(),
            end_stroke: "#B71C1C".to_string(),
        }
    }

    pub fn fill(&self, kind: NodeKind) -> &str {
        match kind {
            NodeKind::Start => &self.start_fill,
            NodeKind::Process => &self.process_fill,
            NodeKind::Decision => &self.decision_fill,
            NodeKind::End => &self.end_fill,
        }
    }

    pub fn stroke(&self, kind: NodeKind) -> &str {
        match kind {
            NodeKind::Start => &self.start_stroke,
            NodeKind::Process => &self.process_stroke,
            NodeKind::Decision => &self.decision_stroke,
            NodeKind::End => &self.end_stroke,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::flowchart_default()
    }
}
