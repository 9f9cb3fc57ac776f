//! Zoom levels of the seamless map image API.
//!
//! The API renders a requested box at a given zoom level; the larger the box, the
//! coarser the zoom has to be, or the server refuses the request with HTTP 400.
//! [`ZoomLevel::from_span`] picks a starting level from a fixed threshold table.

use super::GeoBBox;
use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Lowest zoom level that is ever requested. Retrying stops below this level.
pub const MIN_ZOOM: u8 = 5;

/// Highest zoom level accepted as a manual override.
pub const MAX_ZOOM: u8 = 18;

/// Zoom level suggested when the user opts into a manual zoom without picking one.
pub const DEFAULT_OVERRIDE_ZOOM: u8 = 12;

/// Span thresholds (degrees, exclusive) and the zoom level used above them.
/// Anything not larger than the last threshold gets [`FINEST_AUTO_ZOOM`].
const SPAN_TABLE: [(f64, u8); 7] = [
	(5.0, 8),
	(2.5, 9),
	(1.2, 10),
	(0.6, 11),
	(0.3, 12),
	(0.15, 13),
	(0.07, 14),
];

const FINEST_AUTO_ZOOM: u8 = 15;

/// A zoom level as understood by the map image API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoomLevel(u8);

impl ZoomLevel {
	/// Wraps a raw zoom value without range checks. Use this for values coming from
	/// the retry loop, which may legitimately step below [`MIN_ZOOM`].
	#[must_use]
	pub const fn new(value: u8) -> Self {
		Self(value)
	}

	/// Validates a user supplied override against `MIN_ZOOM..=MAX_ZOOM`.
	///
	/// ```
	/// use geomap_core::ZoomLevel;
	///
	/// assert_eq!(ZoomLevel::new_override(12).unwrap().value(), 12);
	/// assert!(ZoomLevel::new_override(4).is_err());
	/// assert!(ZoomLevel::new_override(19).is_err());
	/// ```
	pub fn new_override(value: u8) -> Result<Self> {
		ensure!(
			(MIN_ZOOM..=MAX_ZOOM).contains(&value),
			"zoom level {value} is out of range, it must be between {MIN_ZOOM} and {MAX_ZOOM}"
		);
		Ok(Self(value))
	}

	/// Looks up the zoom level for a region whose larger extent is `span` degrees.
	///
	/// ```
	/// use geomap_core::ZoomLevel;
	///
	/// assert_eq!(ZoomLevel::from_span(0.45).value(), 12);
	/// assert_eq!(ZoomLevel::from_span(10.0).value(), 8);
	/// assert_eq!(ZoomLevel::from_span(0.01).value(), 15);
	/// ```
	#[must_use]
	pub fn from_span(span: f64) -> Self {
		let zoom = SPAN_TABLE
			.iter()
			.find(|(threshold, _)| span > *threshold)
			.map_or(FINEST_AUTO_ZOOM, |(_, zoom)| *zoom);
		Self(zoom)
	}

	/// Zoom level for a region, based on [`GeoBBox::span`].
	#[must_use]
	pub fn for_bbox(bbox: &GeoBBox) -> Self {
		Self::from_span(bbox.span())
	}

	/// Picks the zoom level to start with: an explicit override always wins over the
	/// computed level.
	#[must_use]
	pub fn resolve(bbox: &GeoBBox, override_zoom: Option<ZoomLevel>) -> Self {
		override_zoom.unwrap_or_else(|| Self::for_bbox(bbox))
	}

	/// The next coarser level.
	#[must_use]
	pub fn coarser(self) -> Self {
		Self(self.0.saturating_sub(1))
	}

	/// `true` while the level has not dropped below `floor`.
	#[must_use]
	pub fn is_at_least(self, floor: u8) -> bool {
		self.0 >= floor
	}

	#[must_use]
	pub fn value(self) -> u8 {
		self.0
	}
}

impl Display for ZoomLevel {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<ZoomLevel> for u8 {
	fn from(zoom: ZoomLevel) -> Self {
		zoom.0
	}
}
