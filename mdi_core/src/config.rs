use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::MdiError;
use crate::MdiResult;

/// Default maximum fragment size in bytes (10 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["mdi.toml", ".mdi.toml", ".config/mdi.toml"];

/// The generator's own config file; its presence marks a book root.
pub const BOOK_CONFIG_FILE: &str = "book.toml";

pub const DEFAULT_SOURCE_DIR: &str = "src";
pub const DEFAULT_TEMPLATE: &str = "SUMMARY.tpl.md";
pub const DEFAULT_OUTPUT: &str = "SUMMARY.md";
pub const DEFAULT_GENERATOR: &str = "mdbook";

/// Configuration loaded from an `mdi.toml` file in the book root.
///
/// ```toml
/// source_dir = "src"
/// template = "SUMMARY.tpl.md"
/// output = "SUMMARY.md"
/// max_file_size = 10485760
///
/// [generator]
/// program = "mdbook"
/// clean = false
/// ```
///
/// Every field is optional.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MdiConfig {
	/// Directory holding the template, relative to the book root.
	#[serde(default = "default_source_dir")]
	pub source_dir: PathBuf,
	/// File name of the summary template inside `source_dir`.
	#[serde(default = "default_template")]
	pub template: String,
	/// File name the expanded summary is written to, next to the template.
	#[serde(default = "default_output")]
	pub output: String,
	/// Fragments larger than this are refused. Defaults to 10 MB.
	#[serde(default = "default_max_file_size")]
	pub max_file_size: u64,
	/// How the static-site generator is invoked.
	#[serde(default)]
	pub generator: GeneratorConfig,
}

impl Default for MdiConfig {
	fn default() -> Self {
		Self {
			source_dir: default_source_dir(),
			template: default_template(),
			output: default_output(),
			max_file_size: DEFAULT_MAX_FILE_SIZE,
			generator: GeneratorConfig::default(),
		}
	}
}

/// The `[generator]` section.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GeneratorConfig {
	/// Program run after expansion. Resolved through `PATH`.
	#[serde(default = "default_generator")]
	pub program: String,
	/// Delete the generated summary once the generator exits.
	#[serde(default)]
	pub clean: bool,
}

impl Default for GeneratorConfig {
	fn default() -> Self {
		Self {
			program: default_generator(),
			clean: false,
		}
	}
}

fn default_source_dir() -> PathBuf {
	PathBuf::from(DEFAULT_SOURCE_DIR)
}

fn default_template() -> String {
	DEFAULT_TEMPLATE.to_string()
}

fn default_output() -> String {
	DEFAULT_OUTPUT.to_string()
}

fn default_max_file_size() -> u64 {
	DEFAULT_MAX_FILE_SIZE
}

fn default_generator() -> String {
	DEFAULT_GENERATOR.to_string()
}

impl MdiConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if there is none.
	pub fn load(root: &Path) -> MdiResult<Option<MdiConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: MdiConfig =
			toml::from_str(&content).map_err(|e| MdiError::ConfigParse(e.to_string()))?;
		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	/// Like [`MdiConfig::load`] but falls back to the defaults.
	pub fn load_or_default(root: &Path) -> MdiResult<MdiConfig> {
		Ok(Self::load(root)?.unwrap_or_default())
	}
}
