use std::path::Path;

use tempfile::TempDir;

pub(crate) const BOOK_TOML: &str = "[book]\ntitle = \"Fixture\"\n";

/// Write `files` (relative path, content) under `root`, creating parent
/// directories as needed.
pub(crate) fn write_files(root: &Path, files: &[(&str, &str)]) -> std::io::Result<()> {
	for (relative, content) in files {
		let path = root.join(relative);
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(path, content)?;
	}

	Ok(())
}

/// A temporary directory holding `files`.
pub(crate) fn tree(files: &[(&str, &str)]) -> std::io::Result<TempDir> {
	let tmp = tempfile::tempdir()?;
	write_files(tmp.path(), files)?;

	Ok(tmp)
}

/// A temporary book root: `book.toml` plus `files`.
pub(crate) fn book(files: &[(&str, &str)]) -> std::io::Result<TempDir> {
	let tmp = tree(&[("book.toml", BOOK_TOML)])?;
	write_files(tmp.path(), files)?;

	Ok(tmp)
}

/// The nested book used across the expansion tests: a root summary that
/// includes a chapter, which in turn includes a section from a deeper
/// directory.
pub(crate) fn nested_book() -> std::io::Result<TempDir> {
	book(&[
		(
			"src/SUMMARY.tpl.md",
			"# Summary\n\n- [Intro](intro.md)\n- [INCLUDE](chapters/ch1.tpl.md)\n",
		),
		(
			"src/chapters/ch1.tpl.md",
			"- [Chapter 1](./ch1.md)\n  - [INCLUDE](sections/s1.tpl.md)\n",
		),
		("src/chapters/sections/s1.tpl.md", "- [Section 1](s1.md)\n"),
	])
}

pub(crate) const NESTED_BOOK_SUMMARY: &str = "# Summary\n\n- [Intro](intro.md)\n- [Chapter \
                                              1](chapters/ch1.md)\n  - [Section \
                                              1](chapters/sections/s1.md)\n\n\n";
