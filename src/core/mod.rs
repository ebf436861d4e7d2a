pub mod animator;
pub mod axis;
pub mod bounds;
pub mod data;
pub mod data_set;
pub mod entry;
pub mod formatter;
pub mod highlight;
pub mod transformer;
pub mod types;
pub mod viewport;
pub mod y_axis_area;

pub use animator::{Animator, Easing};
pub use axis::{XAxis, YAxis};
pub use bounds::XBounds;
pub use data::CandleData;
pub use data_set::{
    AxisDependency, CandleDataSet, CandleStyle, HighlightStyle, Rounding, ValueFont,
};
pub use entry::{CandleDirection, CandleEntry, Icon};
pub use formatter::{DefaultValueFormatter, ValueFormatter};
pub use highlight::Highlight;
pub use transformer::Transformer;
pub use types::{Point, Rect, Viewport};
pub use viewport::{ContentOffsets, ViewportHandler, ZoomLimits};
pub use y_axis_area::YAxisArea;
