//! census_scatter
//!
//! An interactive scatter chart of US Census demographics. Click an axis label to
//! switch which metric drives that axis; the scale is recomputed, axes, circles and
//! their labels animate to the new positions, and tooltips follow the selection.
//! Pairs with the `census-scatter` CLI and the `census-scatter-gui` viewer.
//!
//! ### Features
//! - Load the census CSV (`abbr, poverty, age, income, healthcare, obesity, smokes`)
//! - Linear scales padded to `0.8 × min .. 1.2 × max`, d3-style nice ticks
//! - Retained scene with eased 1000 ms transitions that can be retargeted mid-flight
//! - Exactly one active label per axis, resize rebuilds the chart from scratch
//! - SVG export of any animation frame
//!
//! ### Example
//! ```no_run
//! use census_scatter::{ChartConfig, ChartEvent, ChartHost, CsvFile, RetainedScene, Viewport};
//!
//! let mut host = ChartHost::launch(
//!     RetainedScene::new(),
//!     ChartConfig::default(),
//!     Viewport::new(960.0, 600.0),
//!     &CsvFile("assets/data/data.csv".into()),
//! )?;
//! host.dispatch(ChartEvent::LabelClick("smokes".into()))?;
//! host.dispatch(ChartEvent::Frame(std::time::Duration::from_millis(1000)))?;
//! census_scatter::viz::write_svg(host.surface(), "chart.svg", 960, 600)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod chart;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod models;
pub mod render;
pub mod scale;
pub mod scene;
pub mod selection;
pub mod stats;
pub mod storage;
pub mod surface;
pub mod viz;

pub use chart::ChartSession;
pub use config::{ChartConfig, Viewport};
pub use controller::ClickOutcome;
pub use error::ChartError;
pub use host::{ChartEvent, ChartHost};
pub use models::{Dimension, Record, XDimension, YDimension};
pub use scale::{LinearScale, compute_scale};
pub use scene::RetainedScene;
pub use selection::AxisSelectionState;
pub use storage::CsvFile;
