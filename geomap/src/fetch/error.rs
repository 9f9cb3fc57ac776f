use geomap_core::ZoomLevel;
use std::fmt::{self, Display, Formatter};

/// Failures of [`MapFetcher::fetch`](super::MapFetcher::fetch) that callers may want
/// to tell apart. Network errors are plain [`anyhow::Error`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchError {
	/// Every zoom level down to the floor was rejected with HTTP 400.
	RegionTooLarge { min_zoom: u8 },
	/// The server answered with an error status other than a retryable 400.
	HttpStatus { status: u16, zoom: ZoomLevel },
	/// The server answered successfully, but not with an image.
	UndecodableImage { zoom: ZoomLevel, detail: String },
}

impl Display for FetchError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			FetchError::RegionTooLarge { min_zoom } => write!(
				f,
				"region too large: the map server rejected every zoom level down to {min_zoom}, select a smaller region"
			),
			FetchError::HttpStatus { status, zoom } => {
				write!(f, "map server answered with HTTP status {status} at zoom {zoom}")
			}
			FetchError::UndecodableImage { zoom, detail } => {
				write!(f, "map server response at zoom {zoom} is not an image: {detail}")
			}
		}
	}
}

impl std::error::Error for FetchError {}
