// File: crates/candlestick-core/src/lib.rs
// Summary: Core library entry point; exports the candlestick pipeline from host rows to draw commands.

pub mod axis;
pub mod candle;
pub mod chart;
pub mod data;
pub mod domain;
pub mod error;
pub mod format;
pub mod geometry;
pub mod model;
pub mod palette;
pub mod property;
pub mod render;
pub mod scale;
pub mod scene;
pub mod selection;
pub mod settings;
pub mod svg;
pub mod text;
pub mod transform;
pub mod trend;
pub mod types;

pub use chart::{CandlestickChart, ObjectInstance};
pub use data::{CategoryColumn, CategoryValue, DataTable, MeasureColumn, MeasureRole};
pub use domain::Domain;
pub use error::{ChartError, Result};
pub use model::{ChartModel, DataPoint, TrendSeries};
pub use palette::{DefaultPalette, Palette};
pub use property::PropertyBag;
pub use render::render;
pub use scene::{DrawCommand, Scene};
pub use selection::{Selection, SelectionId};
pub use settings::{Interpolation, Settings, VisionMode, XAxisType};
pub use text::{ApproxTextMeasurer, TextExtent, TextMeasurer};
pub use transform::transform;
pub use types::{Color, Viewport};
