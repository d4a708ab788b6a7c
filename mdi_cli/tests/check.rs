use mdi_core::AnyEmptyResult;
use predicates::prelude::*;
use rstest::rstest;

mod common;

use common::*;

#[test]
fn check_fails_when_summary_missing() -> AnyEmptyResult {
	let tmp = book()?;

	mdi_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicate::str::contains("has not been generated"));

	Ok(())
}

#[test]
fn check_passes_after_expand() -> AnyEmptyResult {
	let tmp = book()?;

	mdi_cmd()
		.arg("expand")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	mdi_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("up to date"));

	Ok(())
}

#[test]
fn check_diff_shows_expected_lines() -> AnyEmptyResult {
	let tmp = book()?;
	write_files(
		tmp.path(),
		&[("src/SUMMARY.md", "# Summary\n\n- [Intro](intro.md)\n")],
	)?;

	mdi_cmd()
		.arg("check")
		.arg("--diff")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicate::str::contains("out of date"))
		.stderr(predicate::str::contains("+- [Chapter 1](chapters/ch1.md)"));

	Ok(())
}

#[rstest]
#[case::missing(false, "\"ok\":false")]
#[case::fresh(true, "\"ok\":true")]
fn check_json_output(#[case] generate: bool, #[case] expected: &str) -> AnyEmptyResult {
	let tmp = book()?;
	if generate {
		write_files(tmp.path(), &[("src/SUMMARY.md", BOOK_SUMMARY)])?;
	}

	let assert = mdi_cmd()
		.arg("check")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.stdout(predicate::str::contains(expected));

	if generate {
		assert.success();
	} else {
		assert.code(1);
	}

	Ok(())
}
