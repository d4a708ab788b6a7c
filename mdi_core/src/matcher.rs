use std::sync::LazyLock;

use regex::bytes::Regex;

static INCLUDE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?-u)^(\s*)-\s+\[INCLUDE\]\s*\((.+)\)$").expect("include pattern is valid")
});

static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?-u)^(\s*-\s+\[.+\]\s*\()(.+)(\).*)$").expect("link pattern is valid")
});

/// The shape of a single summary line.
///
/// Lines are raw bytes: matching works on any encoding, and only a link
/// target has to be UTF-8 once it is resolved. Matching is anchored to one
/// line with its terminator already removed. Both link targets are captured
/// greedily, so a line holding several parenthesized groups yields everything
/// between the first `(` after the label and the last `)` on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineShape<'a> {
	/// Anything that is neither an include directive nor a bullet link.
	Plain,
	/// `<indent>- [INCLUDE](<target>)`
	Include { indent: &'a [u8], target: &'a [u8] },
	/// `<indent>- [<label>](<target>)<suffix>`
	Link(LinkParts<'a>),
}

/// A bullet link split around its target. `prefix + target + suffix`
/// reproduces the original line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkParts<'a> {
	/// Everything up to and including the opening `(`.
	pub prefix: &'a [u8],
	pub target: &'a [u8],
	/// The closing `)` and anything after it.
	pub suffix: &'a [u8],
}

/// Classify a line. The include shape is checked first.
pub fn classify(line: &[u8]) -> LineShape<'_> {
	if let Some(captures) = INCLUDE_PATTERN.captures(line) {
		let (Some(indent), Some(target)) = (captures.get(1), captures.get(2)) else {
			return LineShape::Plain;
		};

		return LineShape::Include {
			indent: indent.as_bytes(),
			target: target.as_bytes(),
		};
	}

	split_link(line).map_or(LineShape::Plain, LineShape::Link)
}

/// Split a bullet link line around its target.
///
/// Include directives have the bullet link shape too (`INCLUDE` is just a
/// label here), which is what lets an embedded fragment's own directives be
/// re-anchored like any other link.
pub fn split_link(line: &[u8]) -> Option<LinkParts<'_>> {
	let captures = LINK_PATTERN.captures(line)?;

	Some(LinkParts {
		prefix: captures.get(1)?.as_bytes(),
		target: captures.get(2)?.as_bytes(),
		suffix: captures.get(3)?.as_bytes(),
	})
}

/// Separate a line from its terminator (`\r\n`, `\n` or nothing).
pub fn split_terminator(line: &[u8]) -> (&[u8], &'static [u8]) {
	if let Some(content) = line.strip_suffix(b"\r\n") {
		(content, b"\r\n")
	} else if let Some(content) = line.strip_suffix(b"\n") {
		(content, b"\n")
	} else {
		(line, b"")
	}
}
