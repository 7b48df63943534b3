//! Chart session lifecycle: load once, build, handle events, rebuild on resize.

use crate::chart::ChartSession;
use crate::config::{ChartConfig, Viewport};
use crate::controller::ClickOutcome;
use crate::error::ChartError;
use crate::models::Record;
use crate::storage::DataSource;
use crate::surface::{DrawingSurface, NodeId};
use log::{debug, error};
use std::rc::Rc;
use std::time::Duration;

/// Input the chart reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    /// A label carrying this dimension key was clicked.
    LabelClick(String),
    /// The window changed size: tear down and rebuild.
    Resize(Viewport),
    /// Pointer entered a mark (`Some`) or left all marks (`None`).
    PointerOver(Option<NodeId>),
    /// Animation time passed.
    Frame(Duration),
}

/// Owns the surface, the in-memory dataset and the live session.
pub struct ChartHost<S: DrawingSurface> {
    surface: S,
    records: Rc<[Record]>,
    config: ChartConfig,
    session: ChartSession,
}

impl<S: DrawingSurface> ChartHost<S> {
    /// Load the data and build the first chart. On failure the error is logged
    /// and nothing is drawn.
    pub fn launch<D: DataSource + ?Sized>(
        mut surface: S,
        config: ChartConfig,
        viewport: Viewport,
        source: &D,
    ) -> Result<Self, ChartError> {
        let records: Rc<[Record]> = match source.load() {
            Ok(rows) => rows.into(),
            Err(e) => {
                error!("{e}");
                return Err(e);
            }
        };
        let built = ChartSession::build(&mut surface, records.clone(), config.clone(), viewport);
        let session = match built {
            Ok(s) => s,
            Err(e) => {
                error!("{e}");
                return Err(e);
            }
        };
        Ok(Self {
            surface,
            records,
            config,
            session,
        })
    }

    pub fn dispatch(&mut self, event: ChartEvent) -> Result<Option<ClickOutcome>, ChartError> {
        match event {
            ChartEvent::LabelClick(key) => self
                .session
                .on_label_click(&mut self.surface, &key)
                .map(Some),
            ChartEvent::Resize(viewport) => {
                self.resize(viewport)?;
                Ok(None)
            }
            ChartEvent::PointerOver(node) => {
                self.surface.pointer_over(node);
                Ok(None)
            }
            ChartEvent::Frame(dt) => {
                self.surface.advance(dt);
                Ok(None)
            }
        }
    }

    /// Click whatever label `node` is; other nodes are not clickable.
    pub fn click_node(&mut self, node: NodeId) -> Result<Option<ClickOutcome>, ChartError> {
        match self.session.label_key(node) {
            Some(key) => self.dispatch(ChartEvent::LabelClick(key.to_string())),
            None => Ok(None),
        }
    }

    /// Replace the session with a fresh one for `viewport`; the selection resets.
    ///
    /// The new chart is built before the old one is detached, so a viewport that
    /// is too small leaves the current chart untouched.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), ChartError> {
        let fresh = ChartSession::build(
            &mut self.surface,
            self.records.clone(),
            self.config.clone(),
            viewport,
        )?;
        let old = std::mem::replace(&mut self.session, fresh);
        old.teardown(&mut self.surface);
        debug!("rebuilt chart for {}x{}", viewport.width, viewport.height);
        Ok(())
    }

    pub fn session(&self) -> &ChartSession {
        &self.session
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}
