//! Render pipeline: axes, marks, point labels and tooltips for the current scales.
//!
//! Every call describes an end state; the surface animates towards it. Marks and
//! their labels are created once per session and only ever move.

use crate::models::{Record, XDimension, YDimension};
use crate::scale::{LinearScale, format_tick};
use crate::surface::{DrawingSurface, NodeId, NodeKind, Tooltip};
use std::collections::BTreeMap;
use std::time::Duration;

/// Length of the tick lines.
const TICK_SIZE: f64 = 6.0;
/// Gap between tick line start and tick text.
const TICK_PADDING: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    /// Horizontal axis below the plot, labels under the ticks.
    Bottom,
    /// Vertical axis left of the plot, labels left of the ticks.
    Left,
}

impl AxisKind {
    fn position_attr(self) -> &'static str {
        match self {
            AxisKind::Bottom => "tx",
            AxisKind::Left => "ty",
        }
    }
}

/// Tick appearance shared by both axes.
#[derive(Debug, Clone, Copy)]
pub struct AxisStyle {
    pub tick_count: usize,
    pub font_px: f64,
}

#[derive(Debug, Clone, Copy)]
struct Tick {
    value: f64,
    group: NodeId,
}

/// Render state of one axis: its group node and the ticks currently shown, keyed by label.
#[derive(Debug, Clone)]
pub struct AxisNode {
    pub kind: AxisKind,
    pub group: NodeId,
    domain_line: NodeId,
    ticks: BTreeMap<String, Tick>,
    prior: Option<LinearScale>,
}

impl AxisNode {
    /// Append an empty axis group under `parent`. A bottom axis sits `offset` px down.
    pub fn new<S: DrawingSurface>(
        surface: &mut S,
        parent: NodeId,
        kind: AxisKind,
        offset: f64,
    ) -> Self {
        let group = surface.append(parent, NodeKind::Group);
        match kind {
            AxisKind::Bottom => {
                surface.set_class(group, "x-axis", true);
                surface.set_attr(group, "ty", offset.into());
            }
            AxisKind::Left => {
                surface.set_class(group, "y-axis", true);
                surface.set_attr(group, "tx", offset.into());
            }
        }
        let domain_line = surface.append(group, NodeKind::Line);
        surface.set_class(domain_line, "domain", true);
        surface.set_attr(domain_line, "stroke", "black".into());
        Self {
            kind,
            group,
            domain_line,
            ticks: BTreeMap::new(),
            prior: None,
        }
    }

    /// Labels of the ticks currently on the axis, in value order.
    pub fn tick_labels(&self) -> Vec<&str> {
        let mut ticks: Vec<(&String, &Tick)> = self.ticks.iter().collect();
        ticks.sort_by(|a, b| a.1.value.total_cmp(&b.1.value));
        ticks.into_iter().map(|(label, _)| label.as_str()).collect()
    }

    pub fn tick_node(&self, label: &str) -> Option<NodeId> {
        self.ticks.get(label).map(|t| t.group)
    }

    /// The scale this axis was last rendered with.
    pub fn scale(&self) -> Option<&LinearScale> {
        self.prior.as_ref()
    }

    fn append_tick<S: DrawingSurface>(
        &self,
        surface: &mut S,
        label: &str,
        style: &AxisStyle,
    ) -> NodeId {
        let g = surface.append(self.group, NodeKind::Group);
        surface.set_class(g, "tick", true);
        let line = surface.append(g, NodeKind::Line);
        surface.set_attr(line, "stroke", "black".into());
        let text = surface.append(g, NodeKind::Text);
        surface.set_text(text, label);
        surface.set_attr(text, "font-size", style.font_px.into());
        surface.set_attr(text, "fill", "black".into());
        match self.kind {
            AxisKind::Bottom => {
                surface.set_attr(line, "y2", TICK_SIZE.into());
                surface.set_attr(text, "y", (TICK_SIZE + TICK_PADDING).into());
                surface.set_attr(text, "dy", (0.71 * style.font_px).into());
                surface.set_attr(text, "anchor", "middle".into());
            }
            AxisKind::Left => {
                surface.set_attr(line, "x2", (-TICK_SIZE).into());
                surface.set_attr(text, "x", (-(TICK_SIZE + TICK_PADDING)).into());
                surface.set_attr(text, "dy", (0.32 * style.font_px).into());
                surface.set_attr(text, "anchor", "end".into());
            }
        }
        g
    }
}

/// Redraw an axis for `scale`, animating from the previous layout over `duration`.
///
/// Ticks that survive move; new ticks enter at the old scale's position and fade in;
/// dropped ticks slide to where the new scale puts them, fade out and are removed.
/// The first render places everything immediately.
pub fn render_axis<S: DrawingSurface>(
    surface: &mut S,
    axis: &mut AxisNode,
    scale: &LinearScale,
    style: &AxisStyle,
    duration: Duration,
) {
    let duration = if axis.prior.is_some() { duration } else { Duration::ZERO };
    let attr = axis.kind.position_attr();
    let (values, step) = scale.ticks(style.tick_count);

    let mut previous = std::mem::take(&mut axis.ticks);
    let mut next = BTreeMap::new();
    for value in values {
        let label = format_tick(value, step);
        let target = scale.map(value);
        let tick = match previous.remove(&label) {
            Some(tick) => tick,
            None => {
                let group = axis.append_tick(surface, &label, style);
                let start = axis
                    .prior
                    .map(|p| p.map(value))
                    .filter(|p| p.is_finite())
                    .unwrap_or(target);
                surface.set_attr(group, attr, start.into());
                if !duration.is_zero() {
                    surface.set_attr(group, "opacity", 0.0.into());
                }
                Tick { value, group }
            }
        };
        surface.transition(tick.group, attr, target, duration);
        surface.transition(tick.group, "opacity", 1.0, duration);
        next.insert(label, Tick { value, group: tick.group });
    }

    for (_, exiting) in previous {
        let target = scale.map(exiting.value);
        if target.is_finite() {
            surface.transition(exiting.group, attr, target, duration);
        }
        surface.transition(exiting.group, "opacity", 0.0, duration);
        surface.remove_after(exiting.group, duration);
    }

    let (r0, r1) = scale.range;
    let (from, to) = match axis.kind {
        AxisKind::Bottom => (("x1", r0), ("x2", r1)),
        AxisKind::Left => (("y1", r0), ("y2", r1)),
    };
    surface.transition(axis.domain_line, from.0, from.1, duration);
    surface.transition(axis.domain_line, to.0, to.1, duration);

    axis.ticks = next;
    axis.prior = Some(*scale);
}

/// Move every mark to `(x_scale(record[x]), y_scale(record[y]))`.
#[allow(clippy::too_many_arguments)]
pub fn render_marks<S: DrawingSurface>(
    surface: &mut S,
    marks: &[NodeId],
    records: &[Record],
    x_scale: &LinearScale,
    x_dim: XDimension,
    y_scale: &LinearScale,
    y_dim: YDimension,
    duration: Duration,
) {
    for (&mark, record) in marks.iter().zip(records) {
        surface.transition(mark, "cx", x_scale.map(record.value(x_dim.dimension())), duration);
        surface.transition(mark, "cy", y_scale.map(record.value(y_dim.dimension())), duration);
    }
}

/// Same motion as [`render_marks`] for the abbreviation text, shifted by `offset`.
#[allow(clippy::too_many_arguments)]
pub fn render_labels<S: DrawingSurface>(
    surface: &mut S,
    labels: &[NodeId],
    records: &[Record],
    x_scale: &LinearScale,
    x_dim: XDimension,
    y_scale: &LinearScale,
    y_dim: YDimension,
    offset: (f64, f64),
    duration: Duration,
) {
    for (&label, record) in labels.iter().zip(records) {
        let x = x_scale.map(record.value(x_dim.dimension())) + offset.0;
        let y = y_scale.map(record.value(y_dim.dimension())) + offset.1;
        surface.transition(label, "x", x, duration);
        surface.transition(label, "y", y, duration);
    }
}

/// `"{abbr}<br>{X label}: {x}<br>{Y label}: {y}"`
pub fn tooltip_text(record: &Record, x_dim: XDimension, y_dim: YDimension) -> String {
    let (x, y) = (x_dim.dimension(), y_dim.dimension());
    format!(
        "{}<br>{}: {}<br>{}: {}",
        record.abbreviation,
        x.label(),
        record.value(x),
        y.label(),
        record.value(y)
    )
}

/// (Re)attach hover tooltips for the current dimension pair.
pub fn bind_tooltip<S: DrawingSurface>(
    surface: &mut S,
    marks: &[NodeId],
    records: &[Record],
    x_dim: XDimension,
    y_dim: YDimension,
    offset: (f64, f64),
) {
    for (&mark, record) in marks.iter().zip(records) {
        surface.bind_tooltip(
            mark,
            Tooltip {
                html: tooltip_text(record, x_dim, y_dim),
                offset,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::RetainedScene;

    fn alabama() -> Record {
        Record {
            abbreviation: "AL".into(),
            poverty: 18.1,
            age: 38.1,
            income: 43000.0,
            healthcare: 11.1,
            obesity: 32.4,
            smokes: 21.1,
        }
    }

    #[test]
    fn tooltip_uses_display_names() {
        let r = alabama();
        assert_eq!(
            tooltip_text(&r, XDimension::Poverty, YDimension::Age),
            "AL<br>Poverty: 18.1<br>Age: 38.1"
        );
        assert_eq!(
            tooltip_text(&r, XDimension::Smokes, YDimension::Healthcare),
            "AL<br>Smokes: 21.1<br>Health Care: 11.1"
        );
        assert_eq!(
            tooltip_text(&r, XDimension::Obesity, YDimension::Income),
            "AL<br>Obesity: 32.4<br>Income: 43000"
        );
    }

    #[test]
    fn first_axis_render_is_immediate() {
        let mut scene = RetainedScene::new();
        let root = scene.root();
        let mut axis = AxisNode::new(&mut scene, root, AxisKind::Bottom, 500.0);
        let style = AxisStyle { tick_count: 10, font_px: 10.0 };
        let scale = LinearScale::new((10.0, 20.0), (0.0, 100.0));
        render_axis(&mut scene, &mut axis, &scale, &style, Duration::from_millis(1000));
        assert!(!scene.is_animating());
        assert_eq!(axis.tick_labels().first().copied(), Some("10"));
        let t15 = axis.tick_node("15").unwrap();
        assert_eq!(scene.value(t15, "tx"), Some(50.0));
    }

    #[test]
    fn dropped_ticks_fade_out_and_are_removed() {
        let mut scene = RetainedScene::new();
        let root = scene.root();
        let mut axis = AxisNode::new(&mut scene, root, AxisKind::Left, 0.0);
        let style = AxisStyle { tick_count: 10, font_px: 10.0 };
        let first = LinearScale::new((10.0, 20.0), (100.0, 0.0));
        render_axis(&mut scene, &mut axis, &first, &style, Duration::from_millis(1000));
        let t11 = axis.tick_node("11").unwrap();

        let second = LinearScale::new((0.0, 100.0), (100.0, 0.0));
        render_axis(&mut scene, &mut axis, &second, &style, Duration::from_millis(1000));
        assert!(axis.tick_node("11").is_none());
        assert!(axis.tick_node("50").is_some());
        assert!(scene.is_attached(t11));

        scene.advance(Duration::from_millis(1000));
        assert!(!scene.is_attached(t11));
        assert_eq!(scene.value(axis.tick_node("50").unwrap(), "opacity"), Some(1.0));
    }
}
