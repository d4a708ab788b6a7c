use mdi_core::AnyEmptyResult;
use predicates::prelude::*;

mod common;

use common::*;

#[test]
fn clean_removes_generated_summary() -> AnyEmptyResult {
	let tmp = book()?;
	write_files(tmp.path(), &[("src/SUMMARY.md", BOOK_SUMMARY)])?;

	mdi_cmd()
		.arg("clean")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("Removed"));

	assert!(!tmp.path().join("src/SUMMARY.md").exists());
	assert!(tmp.path().join("src/SUMMARY.tpl.md").exists());

	Ok(())
}

#[test]
fn clean_without_summary_is_noop() -> AnyEmptyResult {
	let tmp = book()?;

	mdi_cmd()
		.arg("clean")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("Nothing to clean"));

	Ok(())
}
