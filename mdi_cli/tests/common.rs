use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

pub fn mdi_cmd() -> Command {
	let mut cmd = Command::cargo_bin("mdi").expect("mdi binary is built");
	cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
	cmd
}

pub fn write_files(root: &Path, files: &[(&str, &str)]) -> std::io::Result<()> {
	for (relative, content) in files {
		let path = root.join(relative);
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(path, content)?;
	}

	Ok(())
}

/// A book whose summary includes a chapter from a subdirectory.
pub fn book() -> std::io::Result<TempDir> {
	let tmp = tempfile::tempdir()?;
	write_files(
		tmp.path(),
		&[
			("book.toml", "[book]\ntitle = \"Demo\"\n"),
			(
				"src/SUMMARY.tpl.md",
				"# Summary\n\n- [Intro](intro.md)\n- [INCLUDE](chapters/ch1.tpl.md)\n",
			),
			(
				"src/chapters/ch1.tpl.md",
				"- [Chapter 1](./ch1.md)\n  - [Page one](page one.md)\n",
			),
		],
	)?;

	Ok(tmp)
}

pub const BOOK_SUMMARY: &str = "# Summary\n\n- [Intro](intro.md)\n- [Chapter 1](chapters/ch1.md)\n  \
                                - [Page one](chapters/page%20one.md)\n\n";
