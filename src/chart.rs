//! One chart instance: everything a built chart needs to react to clicks.
//!
//! A session is built in one step against a surface and torn down in one step;
//! there is no partially built or partially torn down state.

use crate::config::{ChartConfig, Viewport};
use crate::error::ChartError;
use crate::models::{Dimension, Record, XDimension, YDimension};
use crate::render::{AxisKind, AxisNode, AxisStyle, bind_tooltip, render_axis};
use crate::scale::{LinearScale, compute_scale_padded};
use crate::selection::{Axis, AxisSelectionState, LabelGroup, LabelLayout};
use crate::surface::{DrawingSurface, NodeId, NodeKind};
use log::debug;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug)]
pub struct ChartSession {
    pub(crate) records: Rc<[Record]>,
    pub(crate) config: ChartConfig,
    viewport: Viewport,
    pub(crate) plot: (f64, f64),
    pub(crate) selection: AxisSelectionState,
    pub(crate) x_scale: LinearScale,
    pub(crate) y_scale: LinearScale,
    root: NodeId,
    pub(crate) x_axis: AxisNode,
    pub(crate) y_axis: AxisNode,
    pub(crate) marks: Vec<NodeId>,
    pub(crate) mark_labels: Vec<NodeId>,
    pub(crate) x_labels: LabelGroup,
    pub(crate) y_labels: LabelGroup,
    pub(crate) scale_computations: usize,
}

impl ChartSession {
    /// Build a chart with the default `(poverty, age)` selection.
    ///
    /// Fails before touching the surface when the config is invalid, the dataset
    /// is empty or the viewport cannot fit the margins.
    pub fn build<S: DrawingSurface>(
        surface: &mut S,
        records: Rc<[Record]>,
        config: ChartConfig,
        viewport: Viewport,
    ) -> Result<Self, ChartError> {
        config.validate()?;
        let (width, height) = viewport.plot_area(&config.margins)?;
        let selection = AxisSelectionState::default();
        let pad = (config.domain_pad_low, config.domain_pad_high);
        let x_scale = compute_scale_padded(&records, selection.x, (0.0, width), pad)?;
        let y_scale = compute_scale_padded(&records, selection.y, (height, 0.0), pad)?;

        let host = surface.root();
        let root = surface.append(host, NodeKind::Group);
        surface.set_attr(root, "width", viewport.width.into());
        surface.set_attr(root, "height", viewport.height.into());
        let chart = surface.append(root, NodeKind::Group);
        surface.set_attr(chart, "tx", config.margins.left.into());
        surface.set_attr(chart, "ty", config.margins.top.into());

        let axis_style = AxisStyle {
            tick_count: config.tick_count,
            font_px: config.axis_font_px,
        };
        let mut x_axis = AxisNode::new(surface, chart, AxisKind::Bottom, height);
        let mut y_axis = AxisNode::new(surface, chart, AxisKind::Left, 0.0);
        render_axis(surface, &mut x_axis, &x_scale, &axis_style, Duration::ZERO);
        render_axis(surface, &mut y_axis, &y_scale, &axis_style, Duration::ZERO);

        let (x_dim, y_dim) = (selection.x.dimension(), selection.y.dimension());
        let marks: Vec<NodeId> = records
            .iter()
            .map(|r| {
                let c = surface.append(chart, NodeKind::Circle);
                surface.set_attr(c, "cx", x_scale.map(r.value(x_dim)).into());
                surface.set_attr(c, "cy", y_scale.map(r.value(y_dim)).into());
                surface.set_attr(c, "r", config.mark_radius.into());
                surface.set_attr(c, "fill", config.mark_fill.as_str().into());
                surface.set_attr(c, "opacity", config.mark_opacity.into());
                c
            })
            .collect();

        let (dx, dy) = config.point_label_offset;
        let mark_labels: Vec<NodeId> = records
            .iter()
            .map(|r| {
                let t = surface.append(chart, NodeKind::Text);
                surface.set_attr(t, "fill", config.point_label_fill.as_str().into());
                surface.set_attr(t, "font-size", config.point_label_font_px.into());
                surface.set_attr(t, "x", (x_scale.map(r.value(x_dim)) + dx).into());
                surface.set_attr(t, "y", (y_scale.map(r.value(y_dim)) + dy).into());
                surface.set_text(t, &r.abbreviation);
                t
            })
            .collect();

        let x_dims: Vec<Dimension> = XDimension::ALL.iter().map(|d| d.dimension()).collect();
        let y_dims: Vec<Dimension> = YDimension::ALL.iter().map(|d| d.dimension()).collect();
        let x_labels = LabelGroup::build(
            surface,
            chart,
            Axis::X,
            &x_dims,
            x_dim,
            &LabelLayout {
                origin: (width / 2.0, height + config.x_label_gap),
                spacing: config.axis_label_spacing,
                font_px: config.axis_label_font_px,
            },
        );
        let y_labels = LabelGroup::build(
            surface,
            chart,
            Axis::Y,
            &y_dims,
            y_dim,
            &LabelLayout {
                origin: (config.y_label_offset, height / 2.0),
                spacing: config.axis_label_spacing,
                font_px: config.axis_label_font_px,
            },
        );

        bind_tooltip(
            surface,
            &marks,
            &records,
            selection.x,
            selection.y,
            config.tooltip_offset,
        );

        debug!(
            "built chart for {} records in a {}x{} plot area",
            records.len(),
            width,
            height
        );

        Ok(Self {
            records,
            config,
            viewport,
            plot: (width, height),
            selection,
            x_scale,
            y_scale,
            root,
            x_axis,
            y_axis,
            marks,
            mark_labels,
            x_labels,
            y_labels,
            scale_computations: 2,
        })
    }

    /// Detach everything this session drew. Consumes the session.
    pub fn teardown<S: DrawingSurface>(self, surface: &mut S) {
        surface.detach(self.root);
    }

    pub fn selection(&self) -> AxisSelectionState {
        self.selection
    }

    pub fn x_scale(&self) -> &LinearScale {
        &self.x_scale
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// `(width, height)` of the plot area inside the margins.
    pub fn plot_area(&self) -> (f64, f64) {
        self.plot
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn marks(&self) -> &[NodeId] {
        &self.marks
    }

    pub fn mark_labels(&self) -> &[NodeId] {
        &self.mark_labels
    }

    pub fn x_axis(&self) -> &AxisNode {
        &self.x_axis
    }

    pub fn y_axis(&self) -> &AxisNode {
        &self.y_axis
    }

    pub fn x_labels(&self) -> &LabelGroup {
        &self.x_labels
    }

    pub fn y_labels(&self) -> &LabelGroup {
        &self.y_labels
    }

    /// How many scales this session has computed, construction included.
    pub fn scale_computations(&self) -> usize {
        self.scale_computations
    }

    /// Data values under a point in viewport coordinates, or `None` outside the plot area.
    pub fn data_at(&self, point: (f64, f64)) -> Option<(f64, f64)> {
        let margins = &self.config.margins;
        let (px, py) = (point.0 - margins.left, point.1 - margins.top);
        let (width, height) = self.plot;
        if !((0.0..=width).contains(&px) && (0.0..=height).contains(&py)) {
            return None;
        }
        Some((self.x_scale.invert(px), self.y_scale.invert(py)))
    }

    /// Dimension key of an axis label node, if `node` is one.
    pub fn label_key(&self, node: NodeId) -> Option<&'static str> {
        self.x_labels
            .label_for(node)
            .or_else(|| self.y_labels.label_for(node))
            .map(|l| l.dimension.key())
    }

    /// Record drawn by a mark node.
    pub fn record_for_mark(&self, node: NodeId) -> Option<&Record> {
        let idx = self.marks.iter().position(|m| *m == node)?;
        self.records.get(idx)
    }
}
