//! Errors surfaced by the `fob-models` binary.

use std::path::PathBuf;

use fob_models::ModelsError;
use miette::Report;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Introspection, configuration or rendering failed inside the library.
    #[error(transparent)]
    Models(#[from] ModelsError),

    /// None of the given paths contained a TypeScript source.
    #[error("no TypeScript sources found under {}", display_paths(.0))]
    NoSources(Vec<PathBuf>),

    /// A path given on the command line does not exist.
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// An explicitly requested config file does not exist.
    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Walking a source directory failed.
    #[error("failed to scan {}: {error}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        error: walkdir::Error,
    },

    /// Writing the rendered graph failed.
    #[error("failed to write {}: {error}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convert a CLI error into a miette report for terminal display.
pub fn cli_error_to_miette(error: CliError) -> Report {
    match error {
        CliError::Models(ModelsError::Parse { path, message }) => miette::miette!(
            "Failed to parse {}: {}\n\nHint: only syntactically valid TypeScript can be modelled",
            path.display(),
            message
        ),
        CliError::Models(ModelsError::Config { message }) => {
            miette::miette!("Configuration error: {}", message)
        }
        CliError::NoSources(paths) => miette::miette!(
            "No TypeScript sources found under {}\n\n\
             Hint: sources need a .ts, .tsx, .mts or .cts extension",
            display_paths(&paths)
        ),
        other => miette::miette!("{}", other),
    }
}
