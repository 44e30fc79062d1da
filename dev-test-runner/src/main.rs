//! Golden fixture runner: `fixtures/<case>/input.json` is compiled and the
//! result compared against `fixtures/<case>/expected.json`.
//!
//! Pass `--bless` to overwrite the expected files with current output.
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use serde_json::Value;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("fixtures")
}

fn run_case(input: &Path, bless: bool) -> Result<bool> {
    let source = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let document = gql_modelgen::path_de::document_from_str(&source)?;
    let compiled = gql_modelgen::compile_document(&document)?;
    let actual = serde_json::to_value(&compiled)?;

    let expected_path = input.with_file_name("expected.json");
    if bless {
        std::fs::write(&expected_path, serde_json::to_string_pretty(&actual)?)?;
        return Ok(true);
    }
    let expected: Value = serde_json::from_str(
        &std::fs::read_to_string(&expected_path)
            .with_context(|| format!("failed to read {}", expected_path.display()))?,
    )?;
    Ok(actual == expected)
}

fn main() -> Result<()> {
    let bless = std::env::args().any(|a| a == "--bless");
    let pattern = fixtures_dir().join("*").join("input.json");
    let pattern = pattern.to_string_lossy();

    let mut failed = Vec::new();
    let mut total = 0usize;
    for entry in glob::glob(&pattern)? {
        let input = entry?;
        total += 1;
        let case = input
            .parent()
            .and_then(Path::file_name)
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        match run_case(&input, bless) {
            Ok(true) => eprintln!("{} {case}", "✅".green()),
            Ok(false) => {
                eprintln!("{} {case}: output differs from expected.json", "❌".red());
                failed.push(case);
            }
            Err(error) => {
                eprintln!("{} {case}: {error:#}", "❌".red());
                failed.push(case);
            }
        }
    }

    if total == 0 {
        bail!("no fixtures found under {pattern}");
    }
    if !failed.is_empty() {
        bail!("{} of {total} fixture(s) failed: {}", failed.len(), failed.join(", "));
    }
    eprintln!("{total} fixture(s) passed");
    Ok(())
}
