//! [`Blob`] wraps the raw bytes that move through the tool: HTTP payloads from the map
//! API on the way in, encoded PNG/PDF figures on the way out.

use anyhow::{Context, Result};
use std::{fmt::Debug, path::Path};

/// An owned byte buffer.
///
/// ```rust
/// use geomap_core::Blob;
///
/// let blob = Blob::from("not an image");
/// assert_eq!(blob.len(), 12);
/// assert_eq!(blob.snippet(6), "not an…");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Blob(Vec<u8>);

impl Blob {
	#[must_use]
	pub fn new_empty() -> Blob {
		Blob(Vec::new())
	}

	#[must_use]
	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}

	#[must_use]
	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns `true` if the buffer begins with `prefix`. Used to sniff file signatures.
	#[must_use]
	pub fn starts_with(&self, prefix: &[u8]) -> bool {
		self.0.starts_with(prefix)
	}

	/// Lossy UTF-8 view of the first `max_chars` characters, trimmed, with an ellipsis
	/// if anything was cut. Servers answer failed image requests with HTML or JSON, and
	/// this is how such a body ends up in an error message.
	#[must_use]
	pub fn snippet(&self, max_chars: usize) -> String {
		let text = String::from_utf8_lossy(&self.0);
		let text = text.trim();
		let mut chars = text.chars();
		let head: String = chars.by_ref().take(max_chars).collect();
		if chars.next().is_some() {
			format!("{}…", head.trim_end())
		} else {
			head
		}
	}

	/// Writes the bytes to `path`, replacing an existing file.
	pub fn save_to_file(&self, path: &Path) -> Result<()> {
		std::fs::write(path, &self.0).with_context(|| format!("writing {} bytes to {path:?}", self.0.len()))
	}

	pub fn load_from_file(path: &Path) -> Result<Self> {
		let data = std::fs::read(path).with_context(|| format!("reading {path:?}"))?;
		Ok(Blob(data))
	}
}

impl From<Vec<u8>> for Blob {
	fn from(item: Vec<u8>) -> Self {
		Blob(item)
	}
}

impl From<&[u8]> for Blob {
	fn from(item: &[u8]) -> Self {
		Blob(item.to_vec())
	}
}

impl<const N: usize> From<&[u8; N]> for Blob {
	fn from(item: &[u8; N]) -> Self {
		Blob(item.to_vec())
	}
}

impl From<&str> for Blob {
	fn from(item: &str) -> Self {
		Blob(item.as_bytes().to_vec())
	}
}

impl Debug for Blob {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Blob({} bytes)", self.0.len())
	}
}
