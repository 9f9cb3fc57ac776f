//! Regions drawn on a web map and exported as GeoJSON.
//!
//! Drawing tools export either a `FeatureCollection` of everything drawn, a single
//! `Feature`, or a bare geometry. The last polygon wins, matching "last active
//! drawing" semantics; only its outer ring is used.

use anyhow::{Context, Result, bail};
use geomap_core::GeoBBox;
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize)]
#[serde(tag = "type")]
enum GeoJson {
	FeatureCollection { features: Vec<Feature> },
	Feature(Feature),
	Polygon { coordinates: Vec<Vec<Vec<f64>>> },
	#[serde(other)]
	Other,
}

#[derive(Deserialize)]
struct Feature {
	geometry: Option<Geometry>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum Geometry {
	Polygon { coordinates: Vec<Vec<Vec<f64>>> },
	#[serde(other)]
	Other,
}

/// Bounding box of the last polygon in a GeoJSON document.
///
/// ```
/// let text = r#"{"type":"Polygon","coordinates":[[[133.2,33.7],[133.6,33.7],[133.6,34.1],[133.2,33.7]]]}"#;
/// let bbox = geomap::selection::bbox_from_geojson(text).unwrap();
/// assert_eq!(bbox.as_array(), [133.2, 33.7, 133.6, 34.1]);
/// ```
pub fn bbox_from_geojson(text: &str) -> Result<GeoBBox> {
	let document: GeoJson = serde_json::from_str(text).context("parsing GeoJSON")?;

	let rings = match document {
		GeoJson::FeatureCollection { features } => features
			.into_iter()
			.rev()
			.find_map(|f| match f.geometry {
				Some(Geometry::Polygon { coordinates }) => Some(coordinates),
				_ => None,
			}),
		GeoJson::Feature(Feature {
			geometry: Some(Geometry::Polygon { coordinates }),
		})
		| GeoJson::Polygon { coordinates } => Some(coordinates),
		GeoJson::Feature(_) | GeoJson::Other => None,
	};

	let Some(outer) = rings.and_then(|rings| rings.into_iter().next()) else {
		bail!("GeoJSON contains no polygon, draw a rectangle or polygon first")
	};
	bbox_of_ring(&outer)
}

pub fn bbox_from_geojson_file(path: &Path) -> Result<GeoBBox> {
	let text = std::fs::read_to_string(path).with_context(|| format!("reading {path:?}"))?;
	bbox_from_geojson(&text).with_context(|| format!("reading region from {path:?}"))
}

fn bbox_of_ring(ring: &[Vec<f64>]) -> Result<GeoBBox> {
	let mut lon = (f64::INFINITY, f64::NEG_INFINITY);
	let mut lat = (f64::INFINITY, f64::NEG_INFINITY);
	for position in ring {
		let [x, y, ..] = position.as_slice() else {
			bail!("polygon position {position:?} needs at least two values");
		};
		lon = (lon.0.min(*x), lon.1.max(*x));
		lat = (lat.0.min(*y), lat.1.max(*y));
	}
	if ring.is_empty() {
		bail!("polygon has no positions");
	}
	GeoBBox::new(lon.0, lat.0, lon.1, lat.1)
}
