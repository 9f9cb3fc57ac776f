//! Configuration of the map source and the figure style.
//!
//! - [`Config`]: top-level configuration loader and YAML parser
//! - [`SourceConfig`]: map image API endpoint, timeouts and zoom retry behaviour
//! - [`FigureStyle`]: figure size, resolution, labels, ticks, grid and caption
//!
//! All sections are deserialized from a YAML file with serde and can be overridden
//! from the command line.

mod figure;
mod main;
mod source;

pub use figure::{AxisStyle, DEFAULT_CAPTION, FONT_SIZE_RANGE, FigureStyle, FontWeight, GridStyle, MAX_CANVAS_PIXELS};
pub use main::Config;
pub use source::{DEFAULT_SOURCE_URL, SourceConfig};
