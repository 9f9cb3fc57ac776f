mod blob;
mod geo_bbox;
mod output_format;
mod zoom;

pub use blob::*;
pub use geo_bbox::*;
pub use output_format::*;
pub use zoom::*;
