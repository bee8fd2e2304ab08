//! Orchestrates the three passes into a [`ModelGraph`].

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use tracing::{debug, info_span};

use crate::classify::{Classification, classify_all};
use crate::config::BuildOptions;
use crate::error::Result;
use crate::fields::DependencySet;
use crate::introspect::{Declaration, DeclarationSet, TypeIntrospector};
use crate::link::link_dependencies;
use crate::model::{ModelGraph, ModelId};
use crate::registry::register_declarations;

/// Build a graph from `declarations` with default options.
pub fn build_models(declarations: &DeclarationSet) -> ModelGraph {
    ModelBuilder::default().build(declarations)
}

/// Builds model graphs with a fixed set of [`BuildOptions`].
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    options: BuildOptions,
}

impl ModelBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Introspect and build in one step.
    pub fn build_from(&self, introspector: &impl TypeIntrospector) -> Result<ModelGraph> {
        let declarations = introspector.declarations()?;
        Ok(self.build(&declarations))
    }

    /// Run registration, classification and linking over `declarations`.
    pub fn build(&self, declarations: &DeclarationSet) -> ModelGraph {
        let registry = {
            let _span = info_span!("register").entered();
            register_declarations(declarations, self.options.registration_order).seal()
        };

        let classifications = {
            let _span = info_span!("classify").entered();
            let work: Vec<(&Declaration, ModelId)> = declarations
                .iter()
                .zip(registry.assignments())
                .filter_map(|(declaration, slot)| slot.map(|id| (declaration, id)))
                .collect();
            classify_all(&registry, &work, self.options.parallel)
        };

        let mut graph = registry.into_graph();
        let dependencies = install(&mut graph, classifications);

        {
            let _span = info_span!("link").entered();
            link_dependencies(&mut graph, &dependencies);
        }

        debug!(
            models = graph.len(),
            edges = graph.edge_count(),
            "model graph built"
        );
        graph
    }
}

/// Moves classified schemas into their models and folds the dependency sets
/// of merged declarations together.
fn install(
    graph: &mut ModelGraph,
    classifications: Vec<Classification>,
) -> Vec<(ModelId, DependencySet)> {
    let mut dependencies: IndexMap<ModelId, DependencySet, FxBuildHasher> = IndexMap::default();

    for classification in classifications {
        graph.models[classification.model.index()]
            .schema
            .extend(classification.schema);
        dependencies
            .entry(classification.model)
            .or_default()
            .extend(&classification.dependencies);
    }

    dependencies.into_iter().collect()
}
