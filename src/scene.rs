//! In-memory retained scene: the drawing surface used by the CLI, the GUI and the tests.
//!
//! Attributes always hold their end state; [`RetainedScene::value`] interpolates
//! an in-flight transition at the current clock.

use crate::surface::{AttrValue, DrawingSurface, NodeId, NodeKind, Tooltip};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

/// Width estimate for text, there is no font metrics source at this layer.
pub fn text_width_px(text: &str, font_px: f64) -> f64 {
    text.chars().count() as f64 * font_px * 0.60
}

/// d3's default easing.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub attrs: BTreeMap<&'static str, AttrValue>,
    pub classes: BTreeSet<&'static str>,
    pub text: Option<String>,
    pub tooltip: Option<Tooltip>,
}

impl Node {
    fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            attrs: BTreeMap::new(),
            classes: BTreeSet::new(),
            text: None,
            tooltip: None,
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

#[derive(Serialize)]
struct LiveNode<'a> {
    id: NodeId,
    #[serde(flatten)]
    node: &'a Node,
}

/// Snapshots list live nodes only.
fn live_nodes<S: Serializer>(slots: &[Slot], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(slots.iter().enumerate().filter_map(|(index, slot)| {
        slot.node.as_ref().map(|node| LiveNode {
            id: NodeId {
                index,
                generation: slot.generation,
            },
            node,
        })
    }))
}

const ROOT: NodeId = NodeId {
    index: 0,
    generation: 0,
};

#[derive(Debug, Clone, Serialize)]
struct Transition {
    node: NodeId,
    attr: &'static str,
    from: f64,
    to: f64,
    start: Duration,
    duration: Duration,
}

impl Transition {
    fn value_at(&self, now: Duration) -> f64 {
        let elapsed = now.saturating_sub(self.start).as_secs_f64();
        let t = (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * ease_cubic_in_out(t)
    }

    fn end(&self) -> Duration {
        self.start + self.duration
    }
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAlign {
    Start,
    Middle,
    End,
}

/// A node resolved to absolute coordinates, ready to paint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Primitive {
    Circle {
        node: NodeId,
        center: (f64, f64),
        radius: f64,
        fill: String,
        opacity: f64,
    },
    Text {
        node: NodeId,
        pos: (f64, f64),
        text: String,
        font_px: f64,
        fill: String,
        opacity: f64,
        bold: bool,
        rotate: f64,
        align: TextAlign,
    },
    Line {
        node: NodeId,
        from: (f64, f64),
        to: (f64, f64),
        stroke: String,
        opacity: f64,
    },
}

impl Primitive {
    pub fn node(&self) -> NodeId {
        match self {
            Primitive::Circle { node, .. }
            | Primitive::Text { node, .. }
            | Primitive::Line { node, .. } => *node,
        }
    }

    fn contains(&self, p: (f64, f64)) -> bool {
        match self {
            Primitive::Circle { center, radius, .. } => {
                let (dx, dy) = (p.0 - center.0, p.1 - center.1);
                dx * dx + dy * dy <= radius * radius
            }
            Primitive::Text {
                pos,
                text,
                font_px,
                rotate,
                align,
                ..
            } => {
                let w = text_width_px(text, *font_px);
                let along_start = match align {
                    TextAlign::Start => 0.0,
                    TextAlign::Middle => -w / 2.0,
                    TextAlign::End => -w,
                };
                // Bring the point into the text's own frame (baseline along +x).
                let (rx, ry) = rotate_point((p.0 - pos.0, p.1 - pos.1), -rotate);
                rx >= along_start
                    && rx <= along_start + w
                    && ry <= font_px * 0.25
                    && ry >= -*font_px
            }
            Primitive::Line { .. } => false,
        }
    }
}

/// Placed tooltip, in scene coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipBox {
    /// Top-left corner.
    pub origin: (f64, f64),
    pub size: (f64, f64),
    pub lines: Vec<String>,
    pub line_height: f64,
    pub padding: f64,
}

fn rotate_point(p: (f64, f64), degrees: f64) -> (f64, f64) {
    if degrees == 0.0 {
        return p;
    }
    let (s, c) = degrees.to_radians().sin_cos();
    (p.0 * c - p.1 * s, p.0 * s + p.1 * c)
}

#[derive(Debug, Clone, Serialize)]
pub struct RetainedScene {
    #[serde(serialize_with = "live_nodes")]
    nodes: Vec<Slot>,
    /// Slots of removed nodes, reused by `append`.
    #[serde(skip)]
    free: Vec<usize>,
    transitions: Vec<Transition>,
    removals: Vec<(NodeId, Duration)>,
    now: Duration,
    hovered: Option<NodeId>,
    transitions_started: usize,
}

impl Default for RetainedScene {
    fn default() -> Self {
        Self::new()
    }
}

impl RetainedScene {
    pub fn new() -> Self {
        Self {
            nodes: vec![Slot {
                generation: 0,
                node: Some(Node::new(NodeKind::Group, None)),
            }],
            free: Vec::new(),
            transitions: Vec::new(),
            removals: Vec::new(),
            now: Duration::ZERO,
            hovered: None,
            transitions_started: 0,
        }
    }

    /// The live node behind `id`; `None` once it has been removed.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Nodes currently in the tree, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.node.is_some()).count()
    }

    /// Storage slots allocated so far, live or waiting for reuse.
    pub fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.nodes[index];
                slot.generation = slot.generation.wrapping_add(1);
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.nodes.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index: self.nodes.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    fn release(&mut self, id: NodeId) {
        if let Some(slot) = self.nodes.get_mut(id.index)
            && slot.generation == id.generation
            && slot.node.take().is_some()
        {
            self.free.push(id.index);
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// End-state value of an attribute.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&AttrValue> {
        self.node(id)?.attrs.get(name)
    }

    /// Current value of a numeric attribute, interpolated if a transition is in flight.
    pub fn value(&self, id: NodeId, name: &str) -> Option<f64> {
        if let Some(t) = self
            .transitions
            .iter()
            .find(|t| t.node == id && t.attr == name)
        {
            return Some(t.value_at(self.now));
        }
        self.attr(id, name).and_then(AttrValue::as_number)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).is_some_and(|n| n.classes.contains(class))
    }

    pub fn is_animating(&self) -> bool {
        !self.transitions.is_empty()
    }

    /// Total transitions ever scheduled on this scene.
    pub fn transitions_started(&self) -> usize {
        self.transitions_started
    }

    /// `true` while the node is part of the tree. Removal frees whole subtrees,
    /// so a live node always has live ancestors.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Tooltip currently shown, if the pointer is over a mark that has one.
    pub fn visible_tooltip(&self) -> Option<(NodeId, &Tooltip)> {
        let id = self.hovered?;
        self.node(id)?.tooltip.as_ref().map(|t| (id, t))
    }

    fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = vec![id];
        let mut i = 0;
        while i < out.len() {
            let id = out[i];
            out.extend_from_slice(self.children(id));
            i += 1;
        }
        out
    }

    /// Flatten the attached tree into absolute paint primitives, in paint order.
    pub fn draw_list(&self) -> Vec<Primitive> {
        let mut out = Vec::new();
        self.collect(ROOT, (0.0, 0.0), 1.0, &mut out);
        out
    }

    fn num(&self, id: NodeId, name: &str, default: f64) -> f64 {
        self.value(id, name).unwrap_or(default)
    }

    fn text_attr(&self, id: NodeId, name: &str, default: &str) -> String {
        self.attr(id, name)
            .and_then(AttrValue::as_text)
            .unwrap_or(default)
            .to_string()
    }

    fn collect(&self, id: NodeId, origin: (f64, f64), opacity: f64, out: &mut Vec<Primitive>) {
        let Some(node) = self.node(id) else {
            return;
        };
        let opacity = opacity * self.num(id, "opacity", 1.0);
        match node.kind {
            NodeKind::Group => {
                let origin = (
                    origin.0 + self.num(id, "tx", 0.0),
                    origin.1 + self.num(id, "ty", 0.0),
                );
                for &child in &node.children {
                    self.collect(child, origin, opacity, out);
                }
            }
            NodeKind::Circle => out.push(Primitive::Circle {
                node: id,
                center: (
                    origin.0 + self.num(id, "cx", 0.0),
                    origin.1 + self.num(id, "cy", 0.0),
                ),
                radius: self.num(id, "r", 0.0),
                fill: self.text_attr(id, "fill", "black"),
                opacity,
            }),
            NodeKind::Line => out.push(Primitive::Line {
                node: id,
                from: (
                    origin.0 + self.num(id, "x1", 0.0),
                    origin.1 + self.num(id, "y1", 0.0),
                ),
                to: (
                    origin.0 + self.num(id, "x2", 0.0),
                    origin.1 + self.num(id, "y2", 0.0),
                ),
                stroke: self.text_attr(id, "stroke", "black"),
                opacity,
            }),
            NodeKind::Text => {
                let rotate = self.num(id, "rotate", 0.0);
                let local = (
                    self.num(id, "x", 0.0),
                    self.num(id, "y", 0.0) + self.num(id, "dy", 0.0),
                );
                let (lx, ly) = rotate_point(local, rotate);
                // Minimal stylesheet for axis-label emphasis.
                let (bold, fill) = if node.classes.contains("active") {
                    (true, "black".to_string())
                } else if node.classes.contains("inactive") {
                    (false, "#c9c9c9".to_string())
                } else {
                    (false, self.text_attr(id, "fill", "black"))
                };
                let align = match self.attr(id, "anchor").and_then(AttrValue::as_text) {
                    Some("middle") => TextAlign::Middle,
                    Some("end") => TextAlign::End,
                    _ => TextAlign::Start,
                };
                out.push(Primitive::Text {
                    node: id,
                    pos: (origin.0 + lx, origin.1 + ly),
                    text: node.text.clone().unwrap_or_default(),
                    font_px: self.num(id, "font-size", 12.0),
                    fill,
                    opacity,
                    bold,
                    rotate,
                    align,
                });
            }
        }
    }

    /// Where the visible tooltip is painted: above its mark, shifted by the tooltip offset.
    pub fn tooltip_box(&self, font_px: f64) -> Option<TooltipBox> {
        let (node, tooltip) = self.visible_tooltip()?;
        let (center, radius) = self.draw_list().into_iter().find_map(|p| match p {
            Primitive::Circle {
                node: n,
                center,
                radius,
                ..
            } if n == node => Some((center, radius)),
            _ => None,
        })?;
        let lines: Vec<String> = tooltip.lines().map(str::to_string).collect();
        let pad = 6.0;
        let line_height = font_px * 1.3;
        let width = lines
            .iter()
            .map(|l| text_width_px(l, font_px))
            .fold(0.0, f64::max)
            + 2.0 * pad;
        let height = lines.len() as f64 * line_height + 2.0 * pad;
        let (top, left) = tooltip.offset;
        Some(TooltipBox {
            origin: (
                center.0 - width / 2.0 + left,
                center.1 - radius - height + top,
            ),
            size: (width, height),
            lines,
            line_height,
            padding: pad,
        })
    }

    /// Nodes under `point`, topmost first.
    pub fn hit_test(&self, point: (f64, f64)) -> Vec<NodeId> {
        self.draw_list()
            .iter()
            .rev()
            .filter(|p| p.contains(point))
            .map(Primitive::node)
            .collect()
    }
}

impl DrawingSurface for RetainedScene {
    fn root(&self) -> NodeId {
        ROOT
    }

    fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.alloc(Node::new(kind, Some(parent)));
        if let Some(p) = self.node_mut(parent) {
            p.children.push(id);
        } else {
            // A removed parent takes its new child with it.
            self.release(id);
        }
        id
    }

    fn set_attr(&mut self, node: NodeId, name: &'static str, value: AttrValue) {
        self.transitions.retain(|t| !(t.node == node && t.attr == name));
        if let Some(n) = self.node_mut(node) {
            n.attrs.insert(name, value);
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(n) = self.node_mut(node) {
            n.text = Some(text.to_string());
        }
    }

    fn set_class(&mut self, node: NodeId, class: &'static str, enabled: bool) {
        let Some(n) = self.node_mut(node) else {
            return;
        };
        if enabled {
            n.classes.insert(class);
        } else {
            n.classes.remove(class);
        }
    }

    fn transition(&mut self, node: NodeId, name: &'static str, target: f64, duration: Duration) {
        if duration.is_zero() {
            self.set_attr(node, name, AttrValue::Number(target));
            return;
        }
        if !self.is_attached(node) {
            return;
        }
        // Retargeting starts from wherever the attribute currently is.
        let from = self.value(node, name).unwrap_or(target);
        self.transitions.retain(|t| !(t.node == node && t.attr == name));
        self.transitions.push(Transition {
            node,
            attr: name,
            from,
            to: target,
            start: self.now,
            duration,
        });
        if let Some(n) = self.node_mut(node) {
            n.attrs.insert(name, AttrValue::Number(target));
        }
        self.transitions_started += 1;
    }

    fn remove_after(&mut self, node: NodeId, delay: Duration) {
        if delay.is_zero() {
            self.detach(node);
        } else {
            self.removals.retain(|(n, _)| *n != node);
            self.removals.push((node, self.now + delay));
        }
    }

    fn bind_tooltip(&mut self, node: NodeId, tooltip: Tooltip) {
        if let Some(n) = self.node_mut(node) {
            n.tooltip = Some(tooltip);
        }
    }

    fn detach(&mut self, node: NodeId) {
        if node == ROOT {
            return;
        }
        let Some(parent) = self.node(node).map(|n| n.parent) else {
            return;
        };
        let gone: BTreeSet<NodeId> = self.subtree(node).into_iter().collect();
        self.transitions.retain(|t| !gone.contains(&t.node));
        self.removals.retain(|(n, _)| !gone.contains(n));
        if self.hovered.is_some_and(|h| gone.contains(&h)) {
            self.hovered = None;
        }
        if let Some(p) = parent.and_then(|p| self.node_mut(p)) {
            p.children.retain(|c| *c != node);
        }
        for id in gone {
            self.release(id);
        }
    }

    fn advance(&mut self, dt: Duration) {
        self.now += dt;
        let now = self.now;
        self.transitions.retain(|t| t.end() > now);
        let (due, pending): (Vec<_>, Vec<_>) =
            self.removals.drain(..).partition(|(_, at)| *at <= now);
        self.removals = pending;
        for (node, _) in due {
            self.detach(node);
        }
    }

    fn pointer_over(&mut self, node: Option<NodeId>) {
        self.hovered = node.filter(|n| self.node(*n).is_some_and(|n| n.tooltip.is_some()));
    }
}
