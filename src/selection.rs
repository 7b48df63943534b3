//! Axis selection state and the clickable axis labels that mirror it.

use crate::models::{Dimension, XDimension, YDimension};
use crate::surface::{DrawingSurface, NodeId, NodeKind};
use serde::{Deserialize, Serialize};

/// The dimension pair currently driving the axes. Starts at `(poverty, age)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisSelectionState {
    pub x: XDimension,
    pub y: YDimension,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Axis {
    X,
    Y,
}

/// A clickable label bound to one dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLabel {
    pub dimension: Dimension,
    pub node: NodeId,
    pub active: bool,
}

/// Labels of one axis, stacked `spacing` px apart in enumeration order.
#[derive(Debug, Clone, Serialize)]
pub struct LabelGroup {
    pub axis: Axis,
    pub node: NodeId,
    pub labels: Vec<AxisLabel>,
}

/// Placement of a label group relative to the plot area.
#[derive(Debug, Clone, Copy)]
pub struct LabelLayout {
    pub origin: (f64, f64),
    pub spacing: f64,
    pub font_px: f64,
}

impl LabelGroup {
    pub fn build<S: DrawingSurface>(
        surface: &mut S,
        parent: NodeId,
        axis: Axis,
        dimensions: &[Dimension],
        selected: Dimension,
        layout: &LabelLayout,
    ) -> Self {
        let node = surface.append(parent, NodeKind::Group);
        surface.set_attr(node, "tx", layout.origin.0.into());
        surface.set_attr(node, "ty", layout.origin.1.into());
        let class = match axis {
            Axis::X => "x-axis-text",
            Axis::Y => "y-axis-text",
        };
        let labels = dimensions
            .iter()
            .enumerate()
            .map(|(i, &dimension)| {
                let text = surface.append(node, NodeKind::Text);
                if axis == Axis::Y {
                    surface.set_attr(text, "rotate", (-90.0).into());
                }
                surface.set_attr(text, "dy", (i as f64 * layout.spacing).into());
                surface.set_attr(text, "value", dimension.key().into());
                surface.set_attr(text, "anchor", "middle".into());
                surface.set_attr(text, "font-size", layout.font_px.into());
                surface.set_class(text, class, true);
                surface.set_text(text, dimension.label());
                AxisLabel {
                    dimension,
                    node: text,
                    active: false,
                }
            })
            .collect();
        let mut group = Self { axis, node, labels };
        group.activate(surface, selected);
        group
    }

    /// Make `selected` the only active label of this group.
    pub fn activate<S: DrawingSurface>(&mut self, surface: &mut S, selected: Dimension) {
        for label in &mut self.labels {
            label.active = label.dimension == selected;
            surface.set_class(label.node, "active", label.active);
            surface.set_class(label.node, "inactive", !label.active);
        }
    }

    pub fn active(&self) -> Option<Dimension> {
        self.labels.iter().find(|l| l.active).map(|l| l.dimension)
    }

    pub fn active_count(&self) -> usize {
        self.labels.iter().filter(|l| l.active).count()
    }

    pub fn label_for(&self, node: NodeId) -> Option<&AxisLabel> {
        self.labels.iter().find(|l| l.node == node)
    }
}
