use serde::{Deserialize, Serialize};

/// Flowchart node kinds. The kind decides both the drawn shape and the
/// effective text box the label is fitted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Start,
    Process,
    Decision,
    End,
}

impl NodeKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeKind::Start => "Start",
            NodeKind::Process => "Process",
            NodeKind::Decision => "Decision",
            NodeKind::End => "End",
        }
    }
}

/// A positioned, sized flowchart node. Coordinates are top-left in canvas
/// units; width and height must be positive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A directed edge between two nodes by id. Endpoints referencing absent
/// nodes are dropped during layout, never reported as errors; they are
/// expected leftovers from concurrent graph edits upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    #[serde(rename = "fromNodeId")]
    pub from: String,
    #[serde(rename = "toNodeId")]
    pub to: String,
}

/// An immutable graph snapshot as handed over by the authoring layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<FlowNode>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_kind_round_trips_through_serde() {
        let json = "\"decision\"";
        let kind: NodeKind = serde_json::from_str(json).unwrap();
        assert_eq!(kind, NodeKind::Decision);
        assert_eq!(serde_json::to_string(&kind).unwrap(), json);
    }

    #[test]
    fn graph_deserializes_snapshot_json() {
        let input = r#"{
            "nodes": [
                {"id": "a", "type": "start", "text": "Begin", "x": 0, "y": 0, "width": 120, "height": 60}
            ],
            "connections": [
                {"fromNodeId": "a", "toNodeId": "b"}
            ]
        }"#;
        let graph: Graph = serde_json::from_str(input).unwrap();
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes[0].id, "a");
        assert_eq!(graph.connections[0].to, "b");
    }
}
