//! Path arithmetic for link targets.
//!
//! Link targets are read percent-decoded and joined onto the directory of the
//! file they appear in. When a link is written back out it is expressed
//! relative to the summary directory and only whitespace is re-encoded, so
//! separators and non-ASCII names stay readable.
//!
//! Everything here is lexical: no symlinks are followed and the filesystem is
//! never touched apart from reading the current directory for relative
//! inputs.

use std::borrow::Cow;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::MdiError;
use crate::MdiResult;

/// Percent-decode a link target. The decoded bytes must be UTF-8.
pub fn decode_target<T>(target: &T) -> MdiResult<Cow<'_, str>>
where
	T: AsRef<[u8]> + ?Sized,
{
	let target = target.as_ref();
	let invalid = || {
		MdiError::InvalidEncoding {
			target: String::from_utf8_lossy(target).into_owned(),
		}
	};

	match urlencoding::decode_binary(target) {
		Cow::Borrowed(bytes) => std::str::from_utf8(bytes).map(Cow::Borrowed).map_err(|_| invalid()),
		Cow::Owned(bytes) => String::from_utf8(bytes).map(Cow::Owned).map_err(|_| invalid()),
	}
}

/// Resolve `target` as written in a file living in `from_dir` to an absolute,
/// normalized path.
///
/// A leading separator does not make the target absolute: it is still joined
/// onto `from_dir`.
pub fn resolve<T>(target: &T, from_dir: &Path) -> MdiResult<PathBuf>
where
	T: AsRef<[u8]> + ?Sized,
{
	let decoded = decode_target(target)?;
	let relative: PathBuf = Path::new(decoded.as_ref())
		.components()
		.filter(|component| !matches!(component, Component::Prefix(_) | Component::RootDir))
		.collect();

	Ok(normalize(&std::path::absolute(from_dir)?.join(relative)))
}

/// Lexically clean a path: drop `.` segments and fold `..` into the
/// preceding segment. `..` directly under the root is discarded.
pub fn normalize(path: &Path) -> PathBuf {
	let mut parts: Vec<Component<'_>> = Vec::new();

	for component in path.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => {
				match parts.last().copied() {
					Some(Component::Normal(_)) => {
						parts.pop();
					}
					Some(Component::RootDir) => {}
					_ => parts.push(component),
				}
			}
			other => parts.push(other),
		}
	}

	if parts.is_empty() {
		PathBuf::from(".")
	} else {
		parts.iter().collect()
	}
}

/// Express `path` relative to `base`.
///
/// Both paths are normalized first. Fails when they have different roots
/// (one absolute and one relative, or different drive prefixes) or when
/// `base` climbs above the point where the two paths diverge.
pub fn relativize(path: &Path, base: &Path) -> MdiResult<PathBuf> {
	let path = normalize(path);
	let base = normalize(base);
	let unrelated = || {
		MdiError::PathError {
			path: path.display().to_string(),
			base: base.display().to_string(),
		}
	};

	if anchor(&path) != anchor(&base) {
		return Err(unrelated());
	}

	let path_parts = segments(&path);
	let base_parts = segments(&base);
	let common = path_parts
		.iter()
		.zip(&base_parts)
		.take_while(|(left, right)| left == right)
		.count();

	if base_parts[common..]
		.iter()
		.any(|component| matches!(component, Component::ParentDir))
	{
		return Err(unrelated());
	}

	let mut relative = PathBuf::new();
	for _ in common..base_parts.len() {
		relative.push("..");
	}
	for part in &path_parts[common..] {
		relative.push(part);
	}

	if relative.as_os_str().is_empty() {
		relative.push(".");
	}

	Ok(relative)
}

/// Render a relative path as a link target: segments joined with `/`, each
/// whitespace character percent-encoded, everything else left as is.
pub fn encode_for_output(path: &Path) -> String {
	let joined = path
		.components()
		.map(|component| component.as_os_str().to_string_lossy())
		.collect::<Vec<_>>()
		.join("/");
	let mut encoded = String::with_capacity(joined.len());
	let mut scratch = [0; 4];

	for ch in joined.chars() {
		if ch.is_whitespace() {
			encoded.push_str(&urlencoding::encode(ch.encode_utf8(&mut scratch)));
		} else {
			encoded.push(ch);
		}
	}

	encoded
}

fn anchor(path: &Path) -> Vec<Component<'_>> {
	path.components()
		.take_while(|component| matches!(component, Component::Prefix(_) | Component::RootDir))
		.collect()
}

fn segments(path: &Path) -> Vec<Component<'_>> {
	path.components()
		.filter(|component| matches!(component, Component::Normal(_) | Component::ParentDir))
		.collect()
}
