//! Domain types shared by the geomap crates: the region to draw ([`GeoBBox`]), the
//! zoom level lookup of the seamless map API ([`ZoomLevel`]), byte buffers ([`Blob`]),
//! export formats ([`OutputFormat`]) and the YAML [`config`].

pub mod config;
pub mod types;

pub use types::*;
