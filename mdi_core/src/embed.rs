use std::borrow::Cow;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

use crate::MdiError;
use crate::MdiResult;
use crate::config::DEFAULT_MAX_FILE_SIZE;
use crate::matcher::split_link;
use crate::matcher::split_terminator;
use crate::paths::encode_for_output;
use crate::paths::relativize;
use crate::paths::resolve;

/// Destination for embedded lines. Every line handed over already carries
/// its terminator.
pub trait LineWriter {
	fn write_line(&mut self, line: Vec<u8>);
}

impl LineWriter for Vec<u8> {
	fn write_line(&mut self, line: Vec<u8>) {
		self.extend_from_slice(&line);
	}
}

impl LineWriter for Vec<Vec<u8>> {
	fn write_line(&mut self, line: Vec<u8>) {
		self.push(line);
	}
}

/// Copies fragments into an output, re-anchoring their links on a single
/// base directory.
#[derive(Debug, Clone)]
pub struct Embedder {
	base_dir: PathBuf,
	max_file_size: u64,
}

impl Embedder {
	pub fn new(base_dir: impl Into<PathBuf>) -> Self {
		Self {
			base_dir: base_dir.into(),
			max_file_size: DEFAULT_MAX_FILE_SIZE,
		}
	}

	/// Refuse fragments larger than `limit` bytes.
	#[must_use]
	pub fn with_max_file_size(mut self, limit: u64) -> Self {
		self.max_file_size = limit;
		self
	}

	/// The directory every rewritten link is relative to.
	pub fn base_dir(&self) -> &Path {
		&self.base_dir
	}

	/// Stream `fragment` into `writer`, prefixing each line with `prefix`.
	///
	/// Bullet links inside the fragment (its own include directives among
	/// them) are rewritten relative to the base directory, no matter how deep
	/// the fragment sits. Bytes are copied as they are, whatever the
	/// fragment's encoding. An unterminated last line gets the fragment's
	/// line terminator, and a single blank line closes the block. Include
	/// directives are copied, not expanded.
	///
	/// The block is handed to `writer` only once the whole fragment has been
	/// read and rewritten: on error nothing is written.
	pub fn embed<W>(&self, prefix: &[u8], fragment: &Path, writer: &mut W) -> MdiResult<()>
	where
		W: LineWriter + ?Sized,
	{
		let not_found = |source| {
			MdiError::NotFound {
				path: fragment.display().to_string(),
				source,
			}
		};
		let read_failed = |source| {
			MdiError::ReadFailed {
				path: fragment.display().to_string(),
				source,
			}
		};
		let file = File::open(fragment).map_err(not_found)?;
		let metadata = file.metadata().map_err(read_failed)?;

		if metadata.is_dir() {
			return Err(not_found(std::io::ErrorKind::IsADirectory.into()));
		}

		if metadata.len() > self.max_file_size {
			return Err(MdiError::FileTooLarge {
				path: fragment.display().to_string(),
				size: metadata.len(),
				limit: self.max_file_size,
			});
		}

		let fragment_dir = fragment.parent().unwrap_or(&self.base_dir);
		let mut reader = BufReader::new(file);
		let mut line = Vec::new();
		let mut block = Vec::new();
		let mut terminator: &'static [u8] = b"\n";

		loop {
			line.clear();
			if reader.read_until(b'\n', &mut line).map_err(read_failed)? == 0 {
				break;
			}

			let (content, ending) = split_terminator(&line);
			if !ending.is_empty() {
				terminator = ending;
			}

			let content = self.rewrite(content, fragment_dir)?;
			let mut embedded = Vec::with_capacity(prefix.len() + content.len() + terminator.len());
			embedded.extend_from_slice(prefix);
			embedded.extend_from_slice(&content);
			embedded.extend_from_slice(terminator);
			block.push(embedded);
		}

		let lines = block.len();
		for embedded in block {
			writer.write_line(embedded);
		}
		writer.write_line(terminator.to_vec());
		tracing::debug!(fragment = %fragment.display(), lines, "embedded fragment");

		Ok(())
	}

	/// Re-express the target of a bullet link found in `from_dir` relative to
	/// the base directory. Other lines are returned untouched.
	pub fn rewrite<'a>(&self, content: &'a [u8], from_dir: &Path) -> MdiResult<Cow<'a, [u8]>> {
		let Some(link) = split_link(content) else {
			return Ok(Cow::Borrowed(content));
		};

		let absolute = resolve(link.target, from_dir)?;
		let relative = relativize(&absolute, &self.base_dir)?;
		let target = encode_for_output(&relative);
		tracing::trace!(
			from = %String::from_utf8_lossy(link.target),
			to = %target,
			"rewrote link"
		);

		Ok(Cow::Owned(
			[link.prefix, target.as_bytes(), link.suffix].concat(),
		))
	}
}
