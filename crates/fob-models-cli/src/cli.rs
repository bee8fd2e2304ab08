//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use fob_models::{BuildOptions, RegistrationOrder};

/// Build a cross-referenced model graph from TypeScript declarations.
#[derive(Parser, Debug, Clone)]
#[command(name = "fob-models", version, about, long_about = None)]
pub struct Cli {
    /// Source files or directories (searched recursively for .ts, .tsx, .mts and .cts)
    #[arg(required = true, value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Write the JSON graph to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Options file (defaults to ./fob-models.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Register every declaration before resolving inheritance clauses
    #[arg(long)]
    pub unified_registration: bool,

    /// Classify declarations on the current thread
    #[arg(long)]
    pub sequential: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Layer the command-line switches over loaded options. Switches only
    /// ever turn a behavior on, so an absent flag keeps the loaded value.
    pub fn apply(&self, mut options: BuildOptions) -> BuildOptions {
        if self.unified_registration {
            options = options.with_registration_order(RegistrationOrder::Unified);
        }
        if self.sequential {
            options = options.with_parallel(false);
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_loaded_options() {
        let cli = Cli::parse_from(["fob-models", "src", "--unified-registration", "--sequential"]);
        let options = cli.apply(BuildOptions::default());
        assert_eq!(options.registration_order, RegistrationOrder::Unified);
        assert!(!options.parallel);
    }

    #[test]
    fn absent_flags_keep_loaded_options() {
        let cli = Cli::parse_from(["fob-models", "a.ts", "b.ts"]);
        let loaded = BuildOptions::default().with_parallel(false);
        assert_eq!(cli.apply(loaded.clone()), loaded);
        assert_eq!(cli.paths, vec![PathBuf::from("a.ts"), PathBuf::from("b.ts")]);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["fob-models", "src", "-v", "-q"]).is_err());
    }

    #[test]
    fn paths_are_required() {
        assert!(Cli::try_parse_from(["fob-models"]).is_err());
    }
}
