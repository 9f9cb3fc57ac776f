use anyhow::Result;
use async_trait::async_trait;
use geomap_core::{Blob, GeoBBox, ZoomLevel};
use std::fmt::Debug;

/// One request to the map image API: the box to draw and the zoom level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapQuery {
	pub bbox: GeoBBox,
	pub zoom: ZoomLevel,
}

impl MapQuery {
	pub fn new(bbox: GeoBBox, zoom: ZoomLevel) -> Self {
		Self { bbox, zoom }
	}

	/// Query parameters: `box=lat_min,lon_min,lat_max,lon_max` and `z=<zoom>`.
	pub fn as_params(&self) -> [(&'static str, String); 2] {
		[("box", self.bbox.as_box_param()), ("z", self.zoom.to_string())]
	}
}

/// Status and body of an answered request.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceResponse {
	pub status: u16,
	pub body: Blob,
}

impl SourceResponse {
	pub fn new(status: u16, body: Blob) -> Self {
		Self { status, body }
	}

	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// HTTP 400, which the map API uses for boxes too large to render at the requested zoom.
	pub fn is_bad_request(&self) -> bool {
		self.status == 400
	}
}

/// Something that renders map images for a [`MapQuery`].
///
/// `Err` means the request could not be made or answered at all; any HTTP answer,
/// including error statuses, is an `Ok(SourceResponse)`.
#[async_trait]
pub trait MapImageSource: Debug + Send + Sync {
	async fn request(&self, query: &MapQuery) -> Result<SourceResponse>;

	fn get_name(&self) -> &str;
}
