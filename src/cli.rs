//! Minimal CLI: IR documents → (models | scalars | check)
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, Args};
use colored::Colorize;
use serde::Serialize;

use crate::compile::{compile_document, CompiledDocument, CustomScalarRegistry};
use crate::ir::IrDocument;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// compile GraphQL selection-set IR into model declaration trees
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// compile every operation and fragment and print the declaration tree as JSON
    Models(ModelsOut),
    /// print only the custom scalar registry
    Scalars(ScalarsOut),
    /// run the IR precondition checks and report per file
    Check(CheckOnly),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more IR documents (JSON). May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct OutputSettings {
    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// single-line JSON instead of pretty-printed
    #[arg(long, default_value_t = false)]
    compact: bool,
}

#[derive(clap::Parser, Debug)]
struct ModelsOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    output_settings: OutputSettings,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct ScalarsOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    output_settings: OutputSettings,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct CheckOnly {
    #[command(flatten)]
    input_settings: InputSettings,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_documents(&self) -> Result<Vec<(PathBuf, IrDocument)>> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        source_paths
            .into_iter()
            .map(|source_path| {
                let document = load_document(&source_path)?;
                Ok((source_path, document))
            })
            .collect()
    }
}

impl OutputSettings {
    fn write<T: Serialize>(&self, value: &T) -> Result<()> {
        let src = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        match self.out.as_ref() {
            Some(out) => {
                if let Some(parent) = out.parent() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create {}", parent.display()))?;
                }
                std::fs::write(out, &src)
                    .with_context(|| format!("failed to write {}", out.display()))?;
            }
            None => println!("{src}"),
        }
        Ok(())
    }

    /// One document prints as an object, several as an array.
    fn write_all<T: Serialize>(&self, values: &[T]) -> Result<()> {
        match values {
            [single] => self.write(single),
            many => self.write(&many),
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Models(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }
                let mut compiled = Vec::<CompiledDocument>::new();
                for (source_path, document) in target.input_settings.load_documents()? {
                    let out = compile_document(&document)
                        .with_context(|| format!("failed to compile {}", source_path.display()))?;
                    eprintln!(
                        "{} {}: {} declarations, {} custom scalars",
                        "compiled".green().bold(),
                        source_path.display(),
                        out.declaration_count(),
                        out.registry.constants.len(),
                    );
                    compiled.push(out);
                }
                target.output_settings.write_all(&compiled)
            }
            Command::Scalars(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }
                let mut registries = Vec::new();
                for (source_path, document) in target.input_settings.load_documents()? {
                    let registry =
                        CustomScalarRegistry::new(&document.namespace, &document.custom_scalars)
                            .with_context(|| {
                                format!("invalid custom scalars in {}", source_path.display())
                            })?
                            .build();
                    let unmapped = registry.constants.iter().filter(|c| c.is_unmapped()).count();
                    if unmapped > 0 {
                        eprintln!(
                            "{} {}: {unmapped} custom scalar(s) have no mapping",
                            "warning".yellow().bold(),
                            source_path.display(),
                        );
                    }
                    registries.push(registry);
                }
                target.output_settings.write_all(&registries)
            }
            Command::Check(target) => {
                let mut failures = 0usize;
                for (source_path, document) in target.input_settings.load_documents()? {
                    match crate::validate::check_document(&document) {
                        Ok(()) => eprintln!("{} {}", "ok".green().bold(), source_path.display()),
                        Err(error) => {
                            failures += 1;
                            let status = "error".red().bold();
                            eprintln!("{status} {}: {error}", source_path.display());
                        }
                    }
                }
                if failures > 0 {
                    bail!("{failures} document(s) violate IR preconditions");
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn load_document(source_path: &Path) -> Result<IrDocument> {
    let source = std::fs::read(source_path)
        .with_context(|| format!("failed to read source file {}", source_path.display()))?;
    let document = crate::path_de::from_slice_with_path::<IrDocument>(&source)
        .with_context(|| format!("failed to parse IR document {}", source_path.display()))?;
    tracing::debug!(
        path = %source_path.display(),
        operations = document.operations.len(),
        fragments = document.fragments.len(),
        "loaded IR document"
    );
    Ok(document)
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
