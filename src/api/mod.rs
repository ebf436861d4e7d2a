//! Host-facing chart API: configuration, the chart object and touch lookup.

mod chart;
mod config;
mod highlighter;

pub use chart::{CandleChart, FrameReport};
pub use config::ChartConfig;
pub use highlighter::highlight_at_pixel;
