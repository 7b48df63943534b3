//! The retained-mode drawing surface the chart renders into.
//!
//! The chart only appends nodes, sets attributes and schedules transitions;
//! interpolation, hover handling and painting belong to the surface.

use serde::Serialize;
use std::time::Duration;

/// Handle to a surface node. Storage slots are reused once a node is removed;
/// the generation tells a stale handle apart from the slot's new occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId {
    pub index: usize,
    pub generation: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    /// Translates (`tx`, `ty`) and fades (`opacity`) its children.
    Group,
    Circle,
    Text,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Number(f64),
    Text(String),
}

impl AttrValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(n) => Some(*n),
            AttrValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            AttrValue::Number(_) => None,
        }
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Number(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Text(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Text(v)
    }
}

/// Hover content bound to a mark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    /// Markup with `<br>` line breaks.
    pub html: String,
    /// `[top, left]` offset of the box relative to the pointer.
    pub offset: (f64, f64),
}

impl Tooltip {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.html.split("<br>")
    }
}

pub trait DrawingSurface {
    /// Container every chart attaches its own root under.
    fn root(&self) -> NodeId;

    fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId;

    /// Set an attribute immediately, cancelling any transition on it.
    fn set_attr(&mut self, node: NodeId, name: &'static str, value: AttrValue);

    fn set_text(&mut self, node: NodeId, text: &str);

    fn set_class(&mut self, node: NodeId, class: &'static str, enabled: bool);

    /// Animate a numeric attribute from its current value to `target`.
    fn transition(&mut self, node: NodeId, name: &'static str, target: f64, duration: Duration);

    /// Detach `node` once `delay` has elapsed on the surface clock.
    fn remove_after(&mut self, node: NodeId, delay: Duration);

    fn bind_tooltip(&mut self, node: NodeId, tooltip: Tooltip);

    /// Remove `node` and its subtree; their handles go stale.
    fn detach(&mut self, node: NodeId);

    /// Advance the animation clock.
    fn advance(&mut self, dt: Duration);

    /// Pointer entered `Some(node)` (show its tooltip) or left every mark (`None`).
    fn pointer_over(&mut self, node: Option<NodeId>);
}
