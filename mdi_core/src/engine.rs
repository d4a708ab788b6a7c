use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::rc::Rc;

use crate::MdiError;
use crate::MdiResult;
use crate::config::DEFAULT_MAX_FILE_SIZE;
use crate::embed::Embedder;
use crate::embed::LineWriter;
use crate::matcher::LineShape;
use crate::matcher::classify;
use crate::matcher::split_terminator;
use crate::paths::normalize;
use crate::paths::resolve;

/// Options for a single expansion run.
#[derive(Debug, Clone, Copy)]
pub struct ExpandOptions {
	/// Maximum size in bytes of any included fragment.
	pub max_file_size: u64,
}

impl Default for ExpandOptions {
	fn default() -> Self {
		Self {
			max_file_size: DEFAULT_MAX_FILE_SIZE,
		}
	}
}

/// Result of expanding a summary template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
	/// The flattened document, byte for byte.
	pub content: Vec<u8>,
	/// Number of passes run, including the final pass that found nothing to
	/// substitute.
	pub passes: usize,
	/// Every embedded fragment, in the order it was embedded.
	pub included: Vec<PathBuf>,
}

impl Expansion {
	/// The flattened document as text. Bytes that are not UTF-8 are shown as
	/// replacement characters.
	pub fn text(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.content)
	}
}

/// Files that led to a buffered line, outermost first.
type IncludeChain = Rc<[PathBuf]>;

#[derive(Debug, Clone)]
struct BufferedLine {
	text: Vec<u8>,
	chain: IncludeChain,
}

struct ChainWriter<'a> {
	buffer: &'a mut Vec<BufferedLine>,
	chain: &'a IncludeChain,
}

impl LineWriter for ChainWriter<'_> {
	fn write_line(&mut self, line: Vec<u8>) {
		self.buffer.push(BufferedLine {
			text: line,
			chain: Rc::clone(self.chain),
		});
	}
}

/// Expands include directives until a pass finds none.
///
/// Each pass reads one buffer and writes the other. Include lines are
/// replaced by the fragment they name, everything else is copied. When a
/// pass substitutes anything the buffers swap and the next pass picks up any
/// directives the fragments brought in, so nesting depth needs no tracking.
///
/// Every line remembers which files it came through. Including a file that
/// is already in that chain fails with [`MdiError::IncludeCycle`] instead of
/// growing the buffer forever.
pub struct Expander {
	embedder: Embedder,
	read: Vec<BufferedLine>,
	write: Vec<BufferedLine>,
	passes: usize,
	included: Vec<PathBuf>,
}

impl Expander {
	/// Start from the template at `path`. Its directory becomes the base
	/// directory.
	pub fn from_file(path: &Path, options: &ExpandOptions) -> MdiResult<Self> {
		let path = normalize(&std::path::absolute(path)?);
		let mut file = File::open(&path).map_err(|source| {
			MdiError::NotFound {
				path: path.display().to_string(),
				source,
			}
		})?;
		let mut content = Vec::new();
		file.read_to_end(&mut content).map_err(|source| {
			MdiError::ReadFailed {
				path: path.display().to_string(),
				source,
			}
		})?;
		let base_dir = path
			.parent()
			.map_or_else(|| PathBuf::from("/"), Path::to_path_buf);

		Ok(Self::with_chain(&content, base_dir, Rc::from([path]), options))
	}

	/// Start from in-memory `content` whose links are relative to `base_dir`.
	pub fn from_content(content: &[u8], base_dir: &Path, options: &ExpandOptions) -> MdiResult<Self> {
		let base_dir = normalize(&std::path::absolute(base_dir)?);

		Ok(Self::with_chain(content, base_dir, Rc::from([]), options))
	}

	fn with_chain(
		content: &[u8],
		base_dir: PathBuf,
		chain: IncludeChain,
		options: &ExpandOptions,
	) -> Self {
		let read = content
			.split_inclusive(|&byte| byte == b'\n')
			.map(|line| {
				BufferedLine {
					text: line.to_vec(),
					chain: Rc::clone(&chain),
				}
			})
			.collect();

		Self {
			embedder: Embedder::new(base_dir).with_max_file_size(options.max_file_size),
			read,
			write: Vec::new(),
			passes: 0,
			included: Vec::new(),
		}
	}

	pub fn base_dir(&self) -> &Path {
		self.embedder.base_dir()
	}

	/// Run passes until the fixpoint.
	pub fn run(mut self) -> MdiResult<Expansion> {
		loop {
			self.passes += 1;
			let found = self.pass()?;
			tracing::debug!(pass = self.passes, found, "finished expansion pass");

			if !found {
				break;
			}

			self.swap();
		}

		Ok(Expansion {
			content: self.read.into_iter().flat_map(|line| line.text).collect(),
			passes: self.passes,
			included: self.included,
		})
	}

	/// One sweep over the read buffer. Returns whether any include was
	/// substituted.
	fn pass(&mut self) -> MdiResult<bool> {
		let Self {
			embedder,
			read,
			write,
			included,
			..
		} = self;
		let mut found = false;

		for line in read.iter() {
			let (content, _) = split_terminator(&line.text);
			let LineShape::Include { indent, target } = classify(content) else {
				write.push(line.clone());
				continue;
			};

			let fragment = resolve(target, embedder.base_dir())?;
			if line.chain.contains(&fragment) {
				return Err(MdiError::IncludeCycle {
					chain: describe_cycle(&line.chain, &fragment),
				});
			}

			let chain: IncludeChain = line
				.chain
				.iter()
				.cloned()
				.chain(std::iter::once(fragment.clone()))
				.collect();
			let mut writer = ChainWriter {
				buffer: &mut *write,
				chain: &chain,
			};

			embedder.embed(indent, &fragment, &mut writer)?;
			included.push(fragment);
			found = true;
		}

		Ok(found)
	}

	fn swap(&mut self) {
		std::mem::swap(&mut self.read, &mut self.write);
		self.write.clear();
	}
}

fn describe_cycle(chain: &[PathBuf], repeated: &Path) -> String {
	chain
		.iter()
		.map(|path| path.as_path())
		.chain(std::iter::once(repeated))
		.map(|path| format!("`{}`", path.display()))
		.collect::<Vec<_>>()
		.join(" -> ")
}

/// Expand the template at `path`.
pub fn expand_file(path: &Path, options: &ExpandOptions) -> MdiResult<Expansion> {
	Expander::from_file(path, options)?.run()
}

/// Expand `content` as if it were a template living in `base_dir`.
pub fn expand_content(content: &[u8], base_dir: &Path, options: &ExpandOptions) -> MdiResult<Expansion> {
	Expander::from_content(content, base_dir, options)?.run()
}
