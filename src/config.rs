//! Chart geometry and styling knobs.
//!
//! The numeric defaults were tuned by eye against the census dataset's value
//! ranges; they are kept as named constants rather than derived.

use crate::error::ChartError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Lower domain bound = `DOMAIN_PAD_LOW × min`.
pub const DOMAIN_PAD_LOW: f64 = 0.8;
/// Upper domain bound = `DOMAIN_PAD_HIGH × max`.
pub const DOMAIN_PAD_HIGH: f64 = 1.2;
pub const TRANSITION_MS: u64 = 1000;
/// Point label offset from the mark center, in pixels.
pub const POINT_LABEL_OFFSET: (f64, f64) = (-12.0, 5.0);
pub const MARK_RADIUS: f64 = 15.0;
pub const MARK_FILL: &str = "#2E9AFE";
pub const MARK_OPACITY: f64 = 0.5;
pub const POINT_LABEL_FILL: &str = "white";
/// d3-tip style `[top, left]` offset of the tooltip box.
pub const TOOLTIP_OFFSET: (f64, f64) = (80.0, -60.0);
pub const TICK_COUNT: usize = 10;
/// Upper bound on requested ticks per axis.
pub const MAX_TICK_COUNT: usize = 1000;
/// Vertical spacing between stacked axis labels.
pub const AXIS_LABEL_SPACING: f64 = 20.0;
/// Distance of the X label group below the plot area.
pub const X_LABEL_GAP: f64 = 40.0;
/// Horizontal position of the Y label group relative to the plot area.
pub const Y_LABEL_OFFSET: f64 = -80.0;

/// Fixed margins around the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 80.0,
            left: 100.0,
        }
    }
}

/// Window inner size the chart is built against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Plot area left after subtracting the margins.
    pub fn plot_area(&self, margins: &Margins) -> Result<(f64, f64), ChartError> {
        let w = self.width - margins.left - margins.right;
        let h = self.height - margins.top - margins.bottom;
        if !(w > 0.0 && h > 0.0) {
            return Err(ChartError::Viewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok((w, h))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub margins: Margins,
    pub domain_pad_low: f64,
    pub domain_pad_high: f64,
    pub transition_ms: u64,
    pub point_label_offset: (f64, f64),
    pub point_label_font_px: f64,
    pub mark_radius: f64,
    pub mark_fill: String,
    pub mark_opacity: f64,
    pub point_label_fill: String,
    pub tooltip_offset: (f64, f64),
    pub tick_count: usize,
    pub axis_font_px: f64,
    pub axis_label_font_px: f64,
    pub axis_label_spacing: f64,
    pub x_label_gap: f64,
    pub y_label_offset: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            domain_pad_low: DOMAIN_PAD_LOW,
            domain_pad_high: DOMAIN_PAD_HIGH,
            transition_ms: TRANSITION_MS,
            point_label_offset: POINT_LABEL_OFFSET,
            point_label_font_px: 12.0,
            mark_radius: MARK_RADIUS,
            mark_fill: MARK_FILL.to_string(),
            mark_opacity: MARK_OPACITY,
            point_label_fill: POINT_LABEL_FILL.to_string(),
            tooltip_offset: TOOLTIP_OFFSET,
            tick_count: TICK_COUNT,
            axis_font_px: 10.0,
            axis_label_font_px: 16.0,
            axis_label_spacing: AXIS_LABEL_SPACING,
            x_label_gap: X_LABEL_GAP,
            y_label_offset: Y_LABEL_OFFSET,
        }
    }
}

impl ChartConfig {
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Load a JSON config; absent fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ChartError> {
        let text = std::fs::read_to_string(path)?;
        let cfg: ChartConfig =
            serde_json::from_str(&text).map_err(|e| ChartError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        if !(self.domain_pad_low > 0.0 && self.domain_pad_high > 0.0) {
            return Err(ChartError::Config("domain padding factors must be positive".into()));
        }
        if !(1..=MAX_TICK_COUNT).contains(&self.tick_count) {
            return Err(ChartError::Config(format!(
                "tick_count must be within 1..={MAX_TICK_COUNT}, got {}",
                self.tick_count
            )));
        }
        if !(0.0..=1.0).contains(&self.mark_opacity) {
            return Err(ChartError::Config("mark_opacity must be within 0..=1".into()));
        }
        Ok(())
    }
}
