//! candle-chart: candlestick series rendering for financial charts.
//!
//! The crate keeps a strict split between data (`core`), drawing passes
//! (`series`), backend-agnostic draw commands (`render`) and the host-facing
//! chart object (`api`). Backends replay a recorded [`render::RenderFrame`];
//! the Cairo backend ships behind the `cairo-backend` feature.

pub mod accessibility;
pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod series;
pub mod telemetry;

pub use api::{CandleChart, ChartConfig, FrameReport};
pub use error::{ChartError, ChartResult};
