//! Book projects: where the template lives, where the expanded summary goes,
//! and how to keep the two in step.

use std::path::Path;
use std::path::PathBuf;

use crate::MdiError;
use crate::MdiResult;
use crate::config::BOOK_CONFIG_FILE;
use crate::config::MdiConfig;
use crate::engine::ExpandOptions;
use crate::engine::Expansion;
use crate::engine::expand_file;

/// A book root together with its loaded configuration.
#[derive(Debug, Clone)]
pub struct BookProject {
	root: PathBuf,
	config: MdiConfig,
}

/// Result of comparing the generated summary on disk with a fresh expansion.
#[derive(Debug)]
pub struct CheckResult {
	/// Where the generated summary lives.
	pub output_path: PathBuf,
	/// What is on disk now. `None` when the summary has not been generated.
	pub current: Option<Vec<u8>>,
	/// What expansion produces today.
	pub expected: Expansion,
}

impl CheckResult {
	/// Returns true if the generated summary matches the template.
	pub fn is_ok(&self) -> bool {
		self.current.as_deref() == Some(self.expected.content.as_slice())
	}

	/// Returns true if the summary has never been generated.
	pub fn is_missing(&self) -> bool {
		self.current.is_none()
	}
}

impl BookProject {
	/// Open `root` as a book. Returns `None` when it is not a book root: a
	/// directory with `book.toml`, the source directory, and the summary
	/// template inside it.
	pub fn open(root: &Path) -> MdiResult<Option<Self>> {
		if !root.is_dir() {
			return Ok(None);
		}

		let root = std::path::absolute(root)?;
		let config = MdiConfig::load_or_default(&root)?;
		let project = Self { root, config };

		Ok(project.is_complete().then_some(project))
	}

	/// Open the first candidate that is a book root.
	pub fn discover<I, P>(candidates: I) -> MdiResult<Self>
	where
		I: IntoIterator<Item = P>,
		P: AsRef<Path>,
	{
		let mut tried = Vec::new();

		for candidate in candidates {
			let candidate = candidate.as_ref();
			if let Some(project) = Self::open(candidate)? {
				tracing::debug!(root = %project.root.display(), "found book root");
				return Ok(project);
			}

			tried.push(candidate.display().to_string());
		}

		Err(MdiError::ProjectNotFound {
			path: tried.join(", "),
		})
	}

	fn is_complete(&self) -> bool {
		self.root.join(BOOK_CONFIG_FILE).is_file()
			&& self.source_dir().is_dir()
			&& self.template_path().is_file()
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	pub fn config(&self) -> &MdiConfig {
		&self.config
	}

	pub fn source_dir(&self) -> PathBuf {
		self.root.join(&self.config.source_dir)
	}

	pub fn template_path(&self) -> PathBuf {
		self.source_dir().join(&self.config.template)
	}

	pub fn output_path(&self) -> PathBuf {
		self.source_dir().join(&self.config.output)
	}

	/// Expand the summary template without touching the output file.
	pub fn expand(&self) -> MdiResult<Expansion> {
		let options = ExpandOptions {
			max_file_size: self.config.max_file_size,
		};

		expand_file(&self.template_path(), &options)
	}

	/// Expand the template and write the result next to it.
	pub fn write_output(&self) -> MdiResult<Expansion> {
		let expansion = self.expand()?;
		let output_path = self.output_path();
		std::fs::write(&output_path, &expansion.content)?;
		tracing::info!(
			path = %output_path.display(),
			passes = expansion.passes,
			fragments = expansion.included.len(),
			"wrote expanded summary"
		);

		Ok(expansion)
	}

	/// Compare the generated summary with a fresh expansion.
	pub fn check(&self) -> MdiResult<CheckResult> {
		let expected = self.expand()?;
		let output_path = self.output_path();
		let current = match std::fs::read(&output_path) {
			Ok(content) => Some(content),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
			Err(e) => return Err(e.into()),
		};

		Ok(CheckResult {
			output_path,
			current,
			expected,
		})
	}

	/// Delete the generated summary. Returns whether a file was removed.
	pub fn clean(&self) -> MdiResult<bool> {
		let output_path = self.output_path();

		match std::fs::remove_file(&output_path) {
			Ok(()) => {
				tracing::info!(path = %output_path.display(), "removed generated summary");
				Ok(true)
			}
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
			Err(e) => Err(e.into()),
		}
	}
}
