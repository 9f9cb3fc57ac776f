//! Turns a fetched map image into a finished figure and encodes it for export.
//!
//! - [`Figure`] composes the map with axes, coordinate ticks, dashed gridlines, axis
//!   labels and the attribution caption.
//! - [`format`] encodes figures as PNG or PDF.

mod figure;
pub mod format;

pub use figure::*;
