use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for model-graph operations.
pub type Result<T> = std::result::Result<T, ModelsError>;

/// Error variants surfaced while introspecting sources or loading configuration.
///
/// Graph construction itself never fails: unresolved references degrade to
/// their textual names instead.
#[derive(Debug, Error)]
pub enum ModelsError {
    /// A source handed to the introspector could not be read.
    #[error("failed to read source '{path}': {error}")]
    Io {
        /// The unreadable source.
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// oxc rejected a source file.
    #[error("failed to parse source '{path}': {message}")]
    Parse {
        path: PathBuf,
        /// Parser diagnostics joined with `; `.
        message: String,
    },

    /// Build options could not be loaded or contained invalid values.
    #[error("invalid configuration: {message}")]
    Config {
        /// Human-readable description of the offending value.
        message: String,
    },

    /// Rendering the graph failed.
    #[error("{message}")]
    Other {
        message: String,
    },
}

impl ModelsError {
    /// Builds a parse error from the parser's diagnostics for `path`.
    pub fn parse_error(path: PathBuf, diagnostics: &[String]) -> Self {
        let message = diagnostics.join("; ");
        Self::Parse { path, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_joins_diagnostics() {
        let error = ModelsError::parse_error(
            PathBuf::from("src/a.ts"),
            &["Unexpected token".to_string(), "Expected `}`".to_string()],
        );
        assert_eq!(
            error.to_string(),
            "failed to parse source 'src/a.ts': Unexpected token; Expected `}`"
        );
    }
}
