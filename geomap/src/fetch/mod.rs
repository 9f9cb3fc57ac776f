//! Fetching the geological map image for a region.
//!
//! [`MapFetcher`] asks a [`MapImageSource`] for the margin-expanded region, starting at
//! the zoom level picked from the region's span. The API answers HTTP 400 when the
//! requested image would be too large; the fetcher then steps down one zoom level at a
//! time until the server accepts or the zoom floor is passed.

mod error;
mod fetcher;
mod source;
mod source_http;

pub use error::FetchError;
pub use fetcher::{FetchedMap, MapFetcher};
pub use source::{MapImageSource, MapQuery, SourceResponse};
pub use source_http::HttpMapImageSource;
