//! `mdi_core` flattens mdBook summary templates. A template is an ordinary
//! `SUMMARY.md` that may contain include directives:
//!
//! ```markdown
//! # Summary
//!
//! - [Introduction](intro.md)
//!   - [INCLUDE](chapters/ch1.tpl.md)
//! ```
//!
//! Each directive is replaced by the lines of the file it names, indented
//! like the directive. Bullet links inside an included file are rewritten so
//! they still point at the right page once they sit in the top-level summary.
//!
//! ## Processing Pipeline
//!
//! ```text
//! SUMMARY.tpl.md
//!   → Matcher (include directive / bullet link / plain text, per line)
//!   → Embedder (copies fragments, re-anchors links on the summary directory)
//!   → Expander (repeats passes until no directive is left)
//!   → SUMMARY.md
//! ```
//!
//! ## Modules
//!
//! - [`config`]: `mdi.toml` loading.
//! - [`paths`]: percent-decoding, lexical normalization, relative paths and
//!   whitespace-only re-encoding of link targets.
//! - [`project`]: book root discovery, writing, checking and cleaning the
//!   generated summary.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mdi_core::project::BookProject;
//!
//! let project = BookProject::discover(["."]).unwrap();
//! let expansion = project.write_output().unwrap();
//! println!("expanded in {} pass(es)", expansion.passes);
//! ```

pub use embed::*;
pub use engine::*;
pub use error::*;
pub use matcher::*;

pub mod config;
mod embed;
mod engine;
#[allow(unused_assignments)]
mod error;
mod matcher;
pub mod paths;
pub mod project;

#[cfg(test)]
mod __fixtures;
