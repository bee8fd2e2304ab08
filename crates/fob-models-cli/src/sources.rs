//! Source discovery.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::error::{CliError, Result};

/// File extensions treated as TypeScript. `.d.ts` files match through `ts`.
pub const EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts"];

const SKIPPED_DIRS: &[&str] = &["node_modules"];

/// Expand `paths` into the list of TypeScript sources to introspect.
///
/// Files are taken as given, whatever their extension. Directories are
/// walked recursively in file-name order, skipping `node_modules`. The
/// result keeps the command-line order and drops repeated files.
pub fn collect_sources(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut sources: Vec<PathBuf> = Vec::new();

    for path in paths {
        if path.is_file() {
            push_unique(&mut sources, path.clone());
        } else if path.is_dir() {
            let walker = WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| !is_skipped_dir(entry));
            for entry in walker {
                let entry = entry.map_err(|error| CliError::Walk {
                    path: path.clone(),
                    error,
                })?;
                if entry.file_type().is_file() && is_typescript(entry.path()) {
                    trace!(path = %entry.path().display(), "found source");
                    push_unique(&mut sources, entry.into_path());
                }
            }
        } else {
            return Err(CliError::PathNotFound(path.clone()));
        }
    }

    debug!(count = sources.len(), "collected sources");
    Ok(sources)
}

pub fn is_typescript(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|extension| EXTENSIONS.contains(&extension))
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

fn push_unique(sources: &mut Vec<PathBuf>, path: PathBuf) {
    if !sources.contains(&path) {
        sources.push(path);
    }
}
