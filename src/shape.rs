use crate::graph::NodeKind;

/// Inset between a node's bounding box and its effective text box.
pub const TEXT_PADDING: f32 = 12.0;

/// Corner radius for process nodes.
pub const CORNER_RADIUS: f32 = 8.0;

/// Shrink applied to a decision node's padded box so labels stay clear of
/// the diamond's sloped edges. Empirical constant, not derived.
pub const DECISION_SHRINK: f32 = 0.7;

/// Drawing primitive for a node, in absolute (already translated) canvas
/// coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapePrimitive {
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
    },
    Diamond {
        points: [(f32, f32); 4],
    },
    RoundedRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius: f32,
    },
}

/// A node's drawable shape plus the effective text box its label is fitted
/// into. The text box differs from the bounding box per shape: a circle's
/// usable width shrinks away from its vertical center, a diamond's away from
/// its horizontal one.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeGeometry {
    pub primitive: ShapePrimitive,
    pub text_box_width: f32,
    pub text_box_height: f32,
}

pub fn resolve_shape(kind: NodeKind, x: f32, y: f32, width: f32, height: f32) -> ShapeGeometry {
    let cx = x + width / 2.0;
    let cy = y + height / 2.0;
    match kind {
        NodeKind::Start | NodeKind::End => {
            let r = width.min(height) / 2.0;
            let side = (2.0 * r - 2.0 * TEXT_PADDING).max(0.0);
            ShapeGeometry {
                primitive: ShapePrimitive::Circle { cx, cy, r },
                text_box_width: side,
                text_box_height: side,
            }
        }
        NodeKind::Decision => {
            let points = [
                (cx, y),
                (x + width, cy),
                (cx, y + height),
                (x, cy),
            ];
            ShapeGeometry {
                primitive: ShapePrimitive::Diamond { points },
                text_box_width: (width - 2.0 * TEXT_PADDING).max(0.0) * DECISION_SHRINK,
                text_box_height: (height - 2.0 * TEXT_PADDING).max(0.0) * DECISION_SHRINK,
            }
        }
        NodeKind::Process => ShapeGeometry {
            primitive: ShapePrimitive::RoundedRect {
                x,
                y,
                width,
                height,
                radius: CORNER_RADIUS,
            },
            text_box_width: (width - 2.0 * TEXT_PADDING).max(0.0),
            text_box_height: (height - 2.0 * TEXT_PADDING).max(0.0),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_and_end_resolve_to_centered_circles() {
        for kind in [NodeKind::Start, NodeKind::End] {
            let geometry = resolve_shape(kind, 10.0, 20.0, 100.0, 60.0);
            let ShapePrimitive::Circle { cx, cy, r } = geometry.primitive else {
                panic!("expected circle for {kind:?}");
            };
            assert_eq!(cx, 60.0);
            assert_eq!(cy, 50.0);
            assert_eq!(r, 30.0);
            // Text square: 2r - 2*padding on each side.
            assert_eq!(geometry.text_box_width, 36.0);
            assert_eq!(geometry.text_box_height, 36.0);
        }
    }

    #[test]
    fn decision_resolves_to_midpoint_diamond() {
        let geometry = resolve_shape(NodeKind::Decision, 0.0, 0.0, 120.0, 80.0);
        let ShapePrimitive::Diamond { points } = geometry.primitive else {
            panic!("expected diamond");
        };
        assert_eq!(points, [(60.0, 0.0), (120.0, 40.0), (60.0, 80.0), (0.0, 40.0)]);
    }

    #[test]
    fn decision_text_box_area_is_shrunk_padded_box() {
        let geometry = resolve_shape(NodeKind::Decision, 0.0, 0.0, 120.0, 80.0);
        let expected_area = 0.49 * (120.0 - 24.0) * (80.0 - 24.0);
        let area = geometry.text_box_width * geometry.text_box_height;
        assert!((area - expected_area).abs() < 1e-3);
    }

    #[test]
    fn process_resolves_to_rounded_rect_with_padded_text_box() {
        let geometry = resolve_shape(NodeKind::Process, 5.0, 5.0, 140.0, 70.0);
        let ShapePrimitive::RoundedRect { radius, width, .. } = geometry.primitive else {
            panic!("expected rounded rect");
        };
        assert_eq!(radius, CORNER_RADIUS);
        assert_eq!(width, 140.0);
        assert_eq!(geometry.text_box_width, 116.0);
        assert_eq!(geometry.text_box_height, 46.0);
    }

    #[test]
    fn tiny_boxes_clamp_text_box_to_zero() {
        let geometry = resolve_shape(NodeKind::Process, 0.0, 0.0, 10.0, 10.0);
        assert_eq!(geometry.text_box_width, 0.0);
        assert_eq!(geometry.text_box_height, 0.0);
    }
}
