use super::{FigureStyle, SourceConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
	fs::File,
	io::{BufReader, Read},
	path::Path,
};

/// Top-level configuration, usually read from a YAML file.
///
/// Every section is optional; missing values fall back to the defaults
/// (8×10 in figure at 300 dpi, labels on, grid on).
#[derive(Default, Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
	/// Map image API settings
	#[serde(default)]
	pub source: SourceConfig,

	/// Figure styling
	#[serde(default)]
	pub figure: FigureStyle,
}

impl Config {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		Ok(serde_yaml_ng::from_reader(reader)?)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		Ok(serde_yaml_ng::from_str(text)?)
	}

	/// Parses and validates a YAML file.
	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("opening config file {path:?}"))?;
		let config =
			Config::from_reader(BufReader::new(file)).with_context(|| format!("parsing config file {path:?}"))?;
		config.validate().with_context(|| format!("validating config file {path:?}"))?;
		Ok(config)
	}

	pub fn to_yaml(&self) -> Result<String> {
		Ok(serde_yaml_ng::to_string(self)?)
	}

	pub fn validate(&self) -> Result<()> {
		self.source.validate()?;
		self.figure.validate()?;
		Ok(())
	}
}
