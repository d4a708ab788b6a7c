use std::ffi::OsString;
use std::path::PathBuf;

use clap::ArgAction;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Expand include directives in an mdBook summary template, then run mdbook.",
	long_about = "mdi (markdown include) flattens `src/SUMMARY.tpl.md` into `src/SUMMARY.md`.\n\nAny \
	              line of the form `- [INCLUDE](path/to/part.tpl.md)` is replaced by the lines of \
	              that file, indented like the directive, with every link rewritten so it still \
	              points at the right page from `src/`.\n\nUnknown subcommands are forwarded to the \
	              generator after expansion:\n  mdi build   Expand, then `mdbook build`\n  mdi serve   \
	              Expand, then `mdbook serve`\n  mdi check   Verify SUMMARY.md is up to date"
)]
pub struct MdiCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the book root (the directory holding `book.toml`).
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Verbosity (-v, -vv, -vvv).
	#[arg(long, short, action = ArgAction::Count, global = true)]
	pub verbose: u8,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Expand the summary template and write the generated summary.
	Expand {
		/// Print the expanded summary instead of writing it.
		#[arg(long, default_value_t = false)]
		dry_run: bool,
	},
	/// Check that the generated summary matches the template.
	///
	/// Exits with a non-zero status code when the summary is missing or out
	/// of date. Useful in CI when the generated summary is committed.
	Check {
		/// Show a line diff between the current and expected summary.
		#[arg(long, default_value_t = false)]
		diff: bool,

		/// Output format for check results.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Delete the generated summary.
	Clean,
	/// Expand, then run the generator with these arguments (`mdi build`,
	/// `mdi serve --open`, ...).
	#[command(external_subcommand)]
	Generator(Vec<OsString>),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
