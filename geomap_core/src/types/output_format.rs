//! Export formats for rendered map figures.

use anyhow::{Result, bail};
#[cfg(feature = "cli")]
use clap::ValueEnum;
use std::{
	fmt::{Display, Formatter},
	path::Path,
	str::FromStr,
};

/// A file format a figure can be exported to.
#[cfg_attr(feature = "cli", derive(ValueEnum))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutputFormat {
	Png,
	Pdf,
}

impl OutputFormat {
	/// File extension including the dot.
	#[must_use]
	pub fn extension(&self) -> &'static str {
		match self {
			OutputFormat::Png => ".png",
			OutputFormat::Pdf => ".pdf",
		}
	}

	#[must_use]
	pub fn mime_type(&self) -> &'static str {
		match self {
			OutputFormat::Png => "image/png",
			OutputFormat::Pdf => "application/pdf",
		}
	}

	/// Detects the format from the extension of `path`, case-insensitive.
	///
	/// ```
	/// use geomap_core::OutputFormat;
	/// use std::path::Path;
	///
	/// assert_eq!(OutputFormat::from_path(Path::new("map.PDF")).unwrap(), OutputFormat::Pdf);
	/// assert!(OutputFormat::from_path(Path::new("map.tiff")).is_err());
	/// ```
	pub fn from_path(path: &Path) -> Result<Self> {
		let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
			bail!("can not detect output format of {path:?}: the file name has no extension")
		};
		extension.parse()
	}
}

impl FromStr for OutputFormat {
	type Err = anyhow::Error;

	fn from_str(text: &str) -> Result<Self> {
		Ok(match text.trim_start_matches('.').to_lowercase().as_str() {
			"png" => OutputFormat::Png,
			"pdf" => OutputFormat::Pdf,
			_ => bail!("unknown output format {text:?}, expected \"png\" or \"pdf\""),
		})
	}
}

impl Display for OutputFormat {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			OutputFormat::Png => "png",
			OutputFormat::Pdf => "pdf",
		})
	}
}
