//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::backend::{GeneratedFile, Generator};
use crate::config::GeneratorConfig;
use crate::frontend::DescriptorSet;

use super::{CliError, CliResult, ExitCode};

/// Where `generate` sends its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    Dir(PathBuf),
}

/// Load descriptors and options, then run the generator over every file.
fn run_generator(descriptors: &Path, param: Option<&str>) -> CliResult<Vec<GeneratedFile>> {
    let config = match param {
        Some(param) => GeneratorConfig::from_parameter(param).map_err(CliError::diagnostic)?,
        None => GeneratorConfig::default(),
    };
    let set = DescriptorSet::load(descriptors).map_err(CliError::diagnostic)?;
    tracing::debug!(
        files = set.files.len(),
        types = set.types.len(),
        plugin = %config.plugin,
        "loaded descriptor set"
    );
    Generator::new(config).generate(&set).map_err(CliError::diagnostic)
}

/// Generate stubs and write (or print) them.
pub fn generate(descriptors: &Path, param: Option<&str>, output: &Output) -> CliResult<ExitCode> {
    let files = run_generator(descriptors, param)?;
    if files.is_empty() {
        tracing::warn!(descriptors = %descriptors.display(), "no services found, nothing generated");
        return Ok(ExitCode::SUCCESS);
    }

    match output {
        Output::Stdout => {
            for file in &files {
                println!("// ---- {} ----", file.path);
                print!("{}", file.content);
            }
        }
        Output::Dir(dir) => {
            for file in &files {
                let path = output_file_path(dir, &file.path)?;
                write_file(&path, &file.content)?;
                tracing::info!(path = %path.display(), "wrote stubs");
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Resolve everything, write nothing.
pub fn check(descriptors: &Path, param: Option<&str>) -> CliResult<ExitCode> {
    let files = run_generator(descriptors, param)?;
    tracing::info!(files = files.len(), "all method types resolved");
    println!("ok: {} file(s) with services", files.len());
    Ok(ExitCode::SUCCESS)
}

/// Join a generated relative path onto the output directory.
///
/// ## Errors
///
/// Returns an error if the generated path is absolute or contains path traversal (`..`).
pub fn output_file_path(out_dir: &Path, relative: &str) -> CliResult<PathBuf> {
    let rel = Path::new(relative);
    for component in rel.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => {
                return Err(CliError::failure(format!(
                    "Generated path '{}' escapes the output directory",
                    relative
                )));
            }
        }
    }
    Ok(out_dir.join(rel))
}

fn write_file(path: &Path, content: &str) -> CliResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| CliError::failure(format!("Error creating directory {}: {}", parent.display(), e)))?;
    }
    fs::write(path, content).map_err(|e| CliError::failure(format!("Error writing {}: {}", path.display(), e)))
}
