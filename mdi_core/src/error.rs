use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum MdiError {
	#[error(transparent)]
	#[diagnostic(code(mdi::io_error))]
	Io(#[from] std::io::Error),

	#[error("cannot open `{path}`: {source}")]
	#[diagnostic(
		code(mdi::not_found),
		help("include targets are resolved relative to the file containing the directive")
	)]
	NotFound {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("cannot read `{path}`: {source}")]
	#[diagnostic(code(mdi::read_error))]
	ReadFailed {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("cannot express `{path}` relative to `{base}`")]
	#[diagnostic(
		code(mdi::path_error),
		help("the link and the summary directory must share a common root")
	)]
	PathError { path: String, base: String },

	#[error("link target `{target}` does not decode to valid UTF-8")]
	#[diagnostic(
		code(mdi::invalid_encoding),
		help("only percent-encode UTF-8 sequences in link targets")
	)]
	InvalidEncoding { target: String },

	#[error("include cycle detected: {chain}")]
	#[diagnostic(
		code(mdi::include_cycle),
		help("remove one of the `[INCLUDE]` directives that form the loop")
	)]
	IncludeCycle { chain: String },

	#[error("file too large: `{path}` is {size} bytes (limit: {limit} bytes)")]
	#[diagnostic(
		code(mdi::file_too_large),
		help("increase `max_file_size` in mdi.toml")
	)]
	FileTooLarge { path: String, size: u64, limit: u64 },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(mdi::config_parse),
		help("check that mdi.toml is valid TOML")
	)]
	ConfigParse(String),

	#[error("no book found at `{path}`")]
	#[diagnostic(
		code(mdi::project_not_found),
		help("a book root needs `book.toml` and a summary template such as `src/SUMMARY.tpl.md`")
	)]
	ProjectNotFound { path: String },

	#[error("generator `{program}` was not found")]
	#[diagnostic(
		code(mdi::generator_not_found),
		help("install it or set `generator.program` in mdi.toml")
	)]
	GeneratorNotFound { program: String },

	#[error("generator `{program}` exited with {status}")]
	#[diagnostic(code(mdi::generator_failed))]
	GeneratorFailed { program: String, status: String },
}

pub type MdiResult<T> = Result<T, MdiError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
