use anyhow::{Context, Result, bail, ensure};
use std::{fmt::Debug, str::FromStr};

/// A geographical bounding box (`GeoBBox`) describes the rectangular region a map
/// figure is rendered for, in WGS84 degrees.
///
/// The bounding box is defined by four `f64` values:
/// - `lon_min` (west): Minimum longitude.
/// - `lat_min` (south): Minimum latitude.
/// - `lon_max` (east): Maximum longitude.
/// - `lat_max` (north): Maximum latitude.
///
/// # Examples
///
/// ## Creating a new `GeoBBox`
/// ```
/// use geomap_core::GeoBBox;
///
/// let bbox = GeoBBox::new(133.25, 33.75, 133.7, 34.0).unwrap();
/// assert_eq!(bbox.as_tuple(), (133.25, 33.75, 133.7, 34.0));
/// ```
///
/// ## Padding a region with a margin
/// ```
/// use geomap_core::GeoBBox;
///
/// let bbox = GeoBBox::new(133.0, 33.5, 134.0, 34.0).unwrap();
/// let padded = bbox.with_margin(0.5).unwrap();
/// assert_eq!(padded.as_box_param(), "33,132.5,34.5,134.5");
/// ```
#[derive(Clone, Copy, PartialEq)]
#[allow(clippy::manual_non_exhaustive)]
pub struct GeoBBox {
	pub lon_min: f64,
	pub lat_min: f64,
	pub lon_max: f64,
	pub lat_max: f64,
	phantom: (),
}

impl GeoBBox {
	/// Creates a new `GeoBBox` from `west, south, east, north`.
	///
	/// Fails if a value is not finite, outside the WGS84 range, or if a minimum
	/// exceeds its maximum.
	pub fn new(lon_min: f64, lat_min: f64, lon_max: f64, lat_max: f64) -> Result<GeoBBox> {
		GeoBBox {
			lon_min,
			lat_min,
			lon_max,
			lat_max,
			phantom: (),
		}
		.checked()
	}

	/// Builds a `GeoBBox` from two opposite corners given in any order.
	///
	/// This is what a rectangle drawn on a map delivers: the corners are known,
	/// but not which one is the south-west corner.
	///
	/// ```
	/// use geomap_core::GeoBBox;
	///
	/// let bbox = GeoBBox::from_corners(34.0, 33.75, 133.7, 133.25).unwrap();
	/// assert_eq!(bbox.as_tuple(), (133.25, 33.75, 133.7, 34.0));
	/// ```
	pub fn from_corners(lat_a: f64, lat_b: f64, lon_a: f64, lon_b: f64) -> Result<GeoBBox> {
		GeoBBox::new(lon_a.min(lon_b), lat_a.min(lat_b), lon_a.max(lon_b), lat_a.max(lat_b))
	}

	/// Absolute latitude extent in degrees.
	#[must_use]
	pub fn lat_span(&self) -> f64 {
		(self.lat_max - self.lat_min).abs()
	}

	/// Absolute longitude extent in degrees.
	#[must_use]
	pub fn lon_span(&self) -> f64 {
		(self.lon_max - self.lon_min).abs()
	}

	/// The larger of the latitude and longitude extents. This is what the zoom
	/// level is derived from.
	#[must_use]
	pub fn span(&self) -> f64 {
		self.lat_span().max(self.lon_span())
	}

	/// Mean of the southern and northern latitude.
	#[must_use]
	pub fn center_lat(&self) -> f64 {
		(self.lat_min + self.lat_max) / 2.0
	}

	/// Vertical stretch that makes one degree of latitude look as long as one degree of
	/// longitude at the centre of the box: `1 / |cos(center_lat)|`.
	///
	/// ```
	/// use geomap_core::GeoBBox;
	///
	/// let bbox = GeoBBox::new(0.0, -1.0, 1.0, 1.0).unwrap();
	/// assert_eq!(bbox.aspect_ratio(), 1.0);
	/// ```
	#[must_use]
	pub fn aspect_ratio(&self) -> f64 {
		1.0 / self.center_lat().to_radians().cos().abs()
	}

	/// Returns a copy expanded by `margin` degrees on every side.
	///
	/// The result is not clamped to WGS84: the remote API receives exactly
	/// `min - margin` and `max + margin`.
	pub fn with_margin(&self, margin: f64) -> Result<GeoBBox> {
		ensure!(margin.is_finite(), "margin ({margin}) must be a finite number");
		ensure!(margin >= 0.0, "margin ({margin}) must not be negative");
		Ok(GeoBBox {
			lon_min: self.lon_min - margin,
			lat_min: self.lat_min - margin,
			lon_max: self.lon_max + margin,
			lat_max: self.lat_max + margin,
			phantom: (),
		})
	}

	/// Formats the box the way the seamless map API expects its `box` parameter:
	/// `lat_min,lon_min,lat_max,lon_max`.
	#[must_use]
	pub fn as_box_param(&self) -> String {
		format!("{},{},{},{}", self.lat_min, self.lon_min, self.lat_max, self.lon_max)
	}

	/// Image extent in plotting order `[left, right, bottom, top]`.
	#[must_use]
	pub fn as_extent(&self) -> [f64; 4] {
		[self.lon_min, self.lon_max, self.lat_min, self.lat_max]
	}

	/// Returns the bounding box as a fixed‑size array `[west, south, east, north]`.
	#[must_use]
	pub fn as_array(&self) -> [f64; 4] {
		[self.lon_min, self.lat_min, self.lon_max, self.lat_max]
	}

	/// Returns the bounding box as a tuple `(west, south, east, north)`.
	#[must_use]
	pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
		(self.lon_min, self.lat_min, self.lon_max, self.lat_max)
	}

	fn checked(self) -> Result<Self> {
		for (name, value) in [
			("lon_min", self.lon_min),
			("lat_min", self.lat_min),
			("lon_max", self.lon_max),
			("lat_max", self.lat_max),
		] {
			ensure!(value.is_finite(), "{name} ({value}) must be a finite number");
		}
		ensure!(self.lon_min >= -180., "lon_min ({}) must be >= -180", self.lon_min);
		ensure!(self.lat_min >= -90., "lat_min ({}) must be >= -90", self.lat_min);
		ensure!(self.lon_max <= 180., "lon_max ({}) must be <= 180", self.lon_max);
		ensure!(self.lat_max <= 90., "lat_max ({}) must be <= 90", self.lat_max);
		ensure!(
			self.lon_min <= self.lon_max,
			"lon_min ({}) must be <= lon_max ({})",
			self.lon_min,
			self.lon_max
		);
		ensure!(
			self.lat_min <= self.lat_max,
			"lat_min ({}) must be <= lat_max ({})",
			self.lat_min,
			self.lat_max
		);
		Ok(self)
	}
}

impl Debug for GeoBBox {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"GeoBBox({}, {}, {}, {})",
			self.lon_min, self.lat_min, self.lon_max, self.lat_max
		)
	}
}

impl TryFrom<Vec<f64>> for GeoBBox {
	type Error = anyhow::Error;

	/// Builds a `GeoBBox` from exactly four values `[west, south, east, north]`.
	fn try_from(input: Vec<f64>) -> Result<Self> {
		ensure!(
			input.len() == 4,
			"GeoBBox must have 4 elements (lon_min, lat_min, lon_max, lat_max), got {}",
			input.len()
		);
		GeoBBox::new(input[0], input[1], input[2], input[3]).with_context(|| format!("Failed to convert {input:?} to GeoBBox"))
	}
}

impl TryFrom<[f64; 4]> for GeoBBox {
	type Error = anyhow::Error;

	fn try_from(input: [f64; 4]) -> Result<Self> {
		GeoBBox::new(input[0], input[1], input[2], input[3])
	}
}

impl FromStr for GeoBBox {
	type Err = anyhow::Error;

	/// Parses `west,south,east,north`. Commas, semicolons and spaces all work as separators.
	fn from_str(text: &str) -> Result<Self> {
		log::trace!("parsing bbox argument: {text:?}");
		let values = text
			.split(&[' ', ',', ';'])
			.filter(|s| !s.is_empty())
			.map(|s| {
				s.parse::<f64>()
					.with_context(|| format!("bbox value {s:?} is not a number"))
			})
			.collect::<Result<Vec<f64>>>()?;

		if values.len() != 4 {
			bail!("bbox must contain exactly 4 numbers, but got: {text:?}");
		}

		GeoBBox::try_from(values)
	}
}
