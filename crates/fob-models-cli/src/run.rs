//! The single `fob-models` command: scan, introspect, build, render.

use std::fs;

use fob_models::{BuildOptions, ModelBuilder, ModelGraph, OxcIntrospector, render_json};
use tracing::{debug, info};

use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::sources::collect_sources;

/// Run the command and write the JSON graph to `--out` or stdout.
pub fn execute(cli: &Cli) -> Result<()> {
    let json = render_json(&build_graph(cli)?)?;

    match &cli.out {
        Some(path) => {
            fs::write(path, json).map_err(|error| CliError::Write {
                path: path.clone(),
                error,
            })?;
            info!(path = %path.display(), "wrote model graph");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Resolve options and sources, then build the graph.
pub fn build_graph(cli: &Cli) -> Result<ModelGraph> {
    let options = load_options(cli)?;
    debug!(?options, "resolved build options");

    let sources = collect_sources(&cli.paths)?;
    if sources.is_empty() {
        return Err(CliError::NoSources(cli.paths.clone()));
    }

    let mut introspector = OxcIntrospector::new();
    for source in &sources {
        introspector.add_path(source)?;
    }

    let graph = ModelBuilder::new(options).build_from(&introspector)?;
    info!(
        sources = sources.len(),
        models = graph.len(),
        edges = graph.edge_count(),
        "built model graph"
    );
    Ok(graph)
}

fn load_options(cli: &Cli) -> Result<BuildOptions> {
    if let Some(path) = &cli.config {
        if !path.is_file() {
            return Err(CliError::ConfigNotFound(path.clone()));
        }
    }
    let options = BuildOptions::load(cli.config.as_deref())?;
    Ok(cli.apply(options))
}
