//! Geological map figures from the Seamless Digital Geological Map of Japan V2.
//!
//! A region is given as a [`GeoBBox`](geomap_core::GeoBBox), either typed in or read
//! from a drawing export ([`selection`]). [`fetch`] downloads the rendered map with
//! automatic zoom fallback and [`generate`] turns it into PNG and PDF figures.

pub mod fetch;
pub mod generate;
pub mod selection;

pub use generate::{GeneratedMap, MapRequest, generate_map};

/// Data credit to print whenever a figure is produced.
pub const ATTRIBUTION: &str = "地図データ出典：産総研地質調査総合センター「シームレス地質図v2」";
