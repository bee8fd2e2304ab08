//! Dependency linker (pass 3).

use tracing::debug;

use crate::fields::DependencySet;
use crate::model::{ModelGraph, ModelId};

/// Materialize every `(declarer, dependency)` pair as a pair of edges:
/// `dependency` joins `declarer.dependencies` and `declarer` joins
/// `dependency.dependants`.
///
/// Dependency sets are already duplicate-free per declarer, so edges are
/// appended as-is. Returns the number of edges created.
pub fn link_dependencies(
    graph: &mut ModelGraph,
    dependencies: &[(ModelId, DependencySet)],
) -> usize {
    let mut edges = 0;
    for (declarer, set) in dependencies {
        for dependency in set.iter() {
            graph.models[declarer.index()].dependencies.push(dependency);
            graph.models[dependency.index()].dependants.push(*declarer);
            edges += 1;
        }
    }
    debug!(edges, "linked dependencies");
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistrationOrder;
    use crate::introspect::{Declaration, DeclarationSet};
    use crate::registry::register_declarations;

    fn graph_of(names: &[&str]) -> ModelGraph {
        let set = names
            .iter()
            .fold(DeclarationSet::new(), |set, name| set.with(Declaration::interface(*name)));
        register_declarations(&set, RegistrationOrder::Categorical)
            .seal()
            .into_graph()
    }

    #[test]
    fn links_both_directions() {
        let mut graph = graph_of(&["A", "B", "C"]);
        let [a, b, c] = ["A", "B", "C"].map(|name| graph.by_name(name).unwrap().id());

        let mut from_a = DependencySet::new();
        from_a.insert(b);
        from_a.insert(c);
        let mut from_b = DependencySet::new();
        from_b.insert(c);

        let edges = link_dependencies(&mut graph, &[(a, from_a), (b, from_b)]);

        assert_eq!(edges, 3);
        assert_eq!(graph.get(a).unwrap().dependencies(), &[b, c]);
        assert_eq!(graph.get(c).unwrap().dependants(), &[a, b]);
        assert!(graph.get(a).unwrap().dependants().is_empty());
    }

    #[test]
    fn self_reference_appears_once_on_each_side() {
        let mut graph = graph_of(&["Node"]);
        let node = graph.by_name("Node").unwrap().id();
        let mut set = DependencySet::new();
        set.insert(node);
        set.insert(node);

        link_dependencies(&mut graph, &[(node, set)]);

        let model = graph.get(node).unwrap();
        assert_eq!(model.dependencies(), &[node]);
        assert_eq!(model.dependants(), &[node]);
    }
}
