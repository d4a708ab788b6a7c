use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use mdi_cli::Commands;
use mdi_cli::MdiCli;
use mdi_cli::OutputFormat;
use mdi_core::MdiError;
use mdi_core::project::BookProject;
use mdi_core::project::CheckResult;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
}

type CliResult = Result<i32, Box<dyn std::error::Error>>;

fn main() {
	let args = MdiCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	setup_logging(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Expand { dry_run }) => run_expand(&args, *dry_run),
		Some(Commands::Check { diff, format }) => run_check(&args, *diff, *format),
		Some(Commands::Clean) => run_clean(&args),
		Some(Commands::Generator(forwarded)) => run_generator(&args, forwarded),
		None => {
			eprintln!("No subcommand specified. Run `mdi --help` for usage.");
			process::exit(1);
		}
	};

	match result {
		Ok(code) => process::exit(code),
		Err(e) => {
			// Try to render through miette for rich diagnostics with help text
			// and error codes.
			match e.downcast::<MdiError>() {
				Ok(mdi_err) => {
					let report: miette::Report = (*mdi_err).into();
					eprintln!("{report:?}");
				}
				Err(e) => {
					eprintln!("{} {e}", colored!("error:", red));
				}
			}
			process::exit(2);
		}
	}
}

fn setup_logging(verbosity: u8, use_color: bool) {
	use tracing_subscriber::layer::SubscriberExt;
	use tracing_subscriber::util::SubscriberInitExt;

	let level = match verbosity {
		0 => tracing::Level::WARN,
		1 => tracing::Level::INFO,
		2 => tracing::Level::DEBUG,
		_ => tracing::Level::TRACE,
	};

	let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());
	let fmt_layer = tracing_subscriber::fmt::layer()
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false);

	tracing_subscriber::registry()
		.with(filter)
		.with(fmt_layer)
		.init();
}

/// Candidate book roots in precedence order. An explicit `--path` is the only
/// candidate when given. Otherwise the generator's last argument is tried
/// first, since `mdbook build <dir>` names the book directory there, then the
/// current directory.
fn root_candidates(args: &MdiCli, forwarded: &[OsString]) -> Vec<PathBuf> {
	if let Some(path) = &args.path {
		return vec![path.clone()];
	}

	let mut candidates = Vec::new();
	if let [_, .., last] = forwarded {
		let last = PathBuf::from(last);
		if last.is_dir() {
			candidates.push(last);
		}
	}
	candidates.push(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

	candidates
}

fn discover(args: &MdiCli, forwarded: &[OsString]) -> Result<BookProject, MdiError> {
	BookProject::discover(root_candidates(args, forwarded))
}

fn run_expand(args: &MdiCli, dry_run: bool) -> CliResult {
	let project = discover(args, &[])?;
	let output = make_relative(&project.output_path(), project.root());

	if dry_run {
		let expansion = project.expand()?;
		std::io::stdout().write_all(&expansion.content)?;
		eprintln!("Dry run: would write {output}");
	} else {
		let expansion = project.write_output()?;
		println!(
			"Wrote {output} ({} fragment(s), {} pass(es)).",
			expansion.included.len(),
			expansion.passes
		);

		if args.verbose > 0 {
			for fragment in &expansion.included {
				println!("  {}", make_relative(fragment, project.root()));
			}
		}
	}

	Ok(0)
}

fn run_check(args: &MdiCli, show_diff: bool, format: OutputFormat) -> CliResult {
	let project = discover(args, &[])?;
	let result = project.check()?;
	let output = make_relative(&result.output_path, project.root());

	match format {
		OutputFormat::Json => {
			let report = serde_json::json!({
				"ok": result.is_ok(),
				"output": output,
				"missing": result.is_missing(),
				"passes": result.expected.passes,
			});
			println!("{report}");
		}
		OutputFormat::Text => {
			if result.is_ok() {
				println!(
					"{} {output} is up to date.",
					colored!("Check passed:", green)
				);
			} else if result.is_missing() {
				eprintln!("Check failed: {output} has not been generated.");
				eprintln!("Run `mdi expand` to fix.");
			} else {
				eprintln!("Check failed: {output} is out of date.");
				if show_diff {
					print_diff(&result);
				}
				eprintln!("Run `mdi expand` to fix.");
			}
		}
	}

	Ok(i32::from(!result.is_ok()))
}

fn run_clean(args: &MdiCli) -> CliResult {
	let project = discover(args, &[])?;
	let output = make_relative(&project.output_path(), project.root());

	if project.clean()? {
		println!("Removed {output}.");
	} else {
		println!("Nothing to clean: {output} does not exist.");
	}

	Ok(0)
}

fn run_generator(args: &MdiCli, forwarded: &[OsString]) -> CliResult {
	let project = discover(args, forwarded)?;
	project.write_output()?;

	let program = project.config().generator.program.clone();
	tracing::info!(program = %program, "running generator");
	let status = process::Command::new(&program)
		.args(forwarded)
		.status()
		.map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				MdiError::GeneratorNotFound {
					program: program.clone(),
				}
			} else {
				MdiError::Io(e)
			}
		})?;

	if project.config().generator.clean {
		project.clean()?;
	}

	match status.code() {
		Some(code) => Ok(code),
		None => {
			Err(MdiError::GeneratorFailed {
				program,
				status: status.to_string(),
			}
			.into())
		}
	}
}

fn print_diff(result: &CheckResult) {
	let current = String::from_utf8_lossy(result.current.as_deref().unwrap_or_default());
	let expected = result.expected.text();
	let diff = TextDiff::from_lines(current.as_ref(), expected.as_ref());
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
