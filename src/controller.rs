//! Label clicks: the only path that changes a session's axis selection.

use crate::chart::ChartSession;
use crate::error::ChartError;
use crate::models::AxisPick;
use crate::render::{AxisStyle, bind_tooltip, render_axis, render_labels, render_marks};
use crate::scale::compute_scale_padded;
use crate::selection::AxisSelectionState;
use crate::surface::DrawingSurface;
use log::{debug, warn};

/// What a label click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The key is not a selectable dimension; logged and dropped.
    Ignored,
    /// The label was already active; nothing recomputed.
    Unchanged,
    /// The selection moved to this state and the chart is transitioning to it.
    Updated(AxisSelectionState),
}

impl ChartSession {
    /// React to a click on the axis label carrying `key`.
    pub fn on_label_click<S: DrawingSurface>(
        &mut self,
        surface: &mut S,
        key: &str,
    ) -> Result<ClickOutcome, ChartError> {
        let pick = match key.parse::<AxisPick>() {
            Ok(pick) => pick,
            Err(e) => {
                warn!("ignoring label click: {e}");
                return Ok(ClickOutcome::Ignored);
            }
        };

        let pad = (self.config.domain_pad_low, self.config.domain_pad_high);
        match pick {
            AxisPick::X(x) if x == self.selection.x => {
                debug!("x axis already shows {}", x.dimension());
                return Ok(ClickOutcome::Unchanged);
            }
            AxisPick::Y(y) if y == self.selection.y => {
                debug!("y axis already shows {}", y.dimension());
                return Ok(ClickOutcome::Unchanged);
            }
            AxisPick::X(x) => {
                self.x_scale = compute_scale_padded(&self.records, x, self.x_scale.range, pad)?;
                self.selection.x = x;
            }
            AxisPick::Y(y) => {
                self.y_scale = compute_scale_padded(&self.records, y, self.y_scale.range, pad)?;
                self.selection.y = y;
            }
        }
        self.scale_computations += 1;

        self.rerender(surface);
        match pick {
            AxisPick::X(x) => self.x_labels.activate(surface, x.dimension()),
            AxisPick::Y(y) => self.y_labels.activate(surface, y.dimension()),
        }
        debug!(
            "selection is now ({}, {})",
            self.selection.x.dimension(),
            self.selection.y.dimension()
        );
        Ok(ClickOutcome::Updated(self.selection))
    }

    /// Both axes are redrawn together so their transitions stay in step.
    fn rerender<S: DrawingSurface>(&mut self, surface: &mut S) {
        let duration = self.config.transition();
        let style = AxisStyle {
            tick_count: self.config.tick_count,
            font_px: self.config.axis_font_px,
        };
        let AxisSelectionState { x, y } = self.selection;
        render_axis(surface, &mut self.x_axis, &self.x_scale, &style, duration);
        render_axis(surface, &mut self.y_axis, &self.y_scale, &style, duration);
        render_marks(
            surface,
            &self.marks,
            &self.records,
            &self.x_scale,
            x,
            &self.y_scale,
            y,
            duration,
        );
        bind_tooltip(
            surface,
            &self.marks,
            &self.records,
            x,
            y,
            self.config.tooltip_offset,
        );
        render_labels(
            surface,
            &self.mark_labels,
            &self.records,
            &self.x_scale,
            x,
            &self.y_scale,
            y,
            self.config.point_label_offset,
            duration,
        );
    }
}
