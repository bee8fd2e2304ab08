//! Property-based tests over randomly generated declaration sets.
//!
//! Declarations reference each other by index, so every generated set has
//! forward references, self references and duplicate references.

use proptest::prelude::*;
use rustc_hash::FxHashSet;

use super::fixtures::{array_of, function, generic, string};
use crate::config::{BuildOptions, RegistrationOrder};
use crate::introspect::{Declaration, DeclarationSet, Member, TypeExpr};
use crate::{ModelBuilder, build_models};

#[derive(Debug, Clone)]
enum Shape {
    Plain(usize),
    Array(usize),
    Generic(usize, usize),
    Function(usize, usize),
    Primitive,
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    prop_oneof![
        (0..12usize).prop_map(Shape::Plain),
        (0..12usize).prop_map(Shape::Array),
        (0..12usize, 0..12usize).prop_map(|(a, b)| Shape::Generic(a, b)),
        (0..12usize, 0..12usize).prop_map(|(a, b)| Shape::Function(a, b)),
        Just(Shape::Primitive),
    ]
}

/// `(kind, extends, members)` per declaration; the name is `M<index>`.
fn declarations_strategy() -> impl Strategy<Value = Vec<(u8, Option<usize>, Vec<Shape>)>> {
    prop::collection::vec(
        (
            0..3u8,
            prop::option::of(0..12usize),
            prop::collection::vec(shape_strategy(), 0..6),
        ),
        1..12,
    )
}

fn name(index: usize) -> String {
    format!("M{index}")
}

fn member_type(shape: &Shape) -> TypeExpr {
    match shape {
        Shape::Plain(target) => TypeExpr::named(name(*target)),
        Shape::Array(target) => array_of(&name(*target)),
        Shape::Generic(symbol, argument) => generic(&name(*symbol), &[&name(*argument)]),
        Shape::Function(parameter, returns) => function(
            &[("value", TypeExpr::named(name(*parameter)))],
            TypeExpr::named(name(*returns)),
        ),
        Shape::Primitive => string(),
    }
}

fn build_set(layout: &[(u8, Option<usize>, Vec<Shape>)]) -> DeclarationSet {
    let mut set = DeclarationSet::new();
    for (index, (kind, extends, shapes)) in layout.iter().enumerate() {
        let mut declaration = match kind {
            0 => Declaration::interface(name(index)),
            1 => Declaration::type_alias(name(index), TypeExpr::named("{}")),
            _ => Declaration::class(name(index)),
        };
        if let (Some(target), 0 | 2) = (extends, kind) {
            declaration = declaration.with_extends(name(*target).as_str());
        }
        for (position, shape) in shapes.iter().enumerate() {
            let member = Member::property(format!("f{position}"), member_type(shape));
            declaration = declaration.with_member(member);
        }
        set.push(declaration);
    }
    set
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// B ∈ A.dependencies ⟺ A ∈ B.dependants
    #[test]
    fn prop_edge_symmetry(layout in declarations_strategy()) {
        let graph = build_models(&build_set(&layout));
        for model in graph.iter() {
            for dependency in model.dependencies() {
                let target = graph.get(*dependency).unwrap();
                prop_assert!(target.dependants().contains(&model.id()));
            }
            for dependant in model.dependants() {
                let source = graph.get(*dependant).unwrap();
                prop_assert!(source.dependencies().contains(&model.id()));
            }
        }
    }

    /// Each model lists a dependency at most once.
    #[test]
    fn prop_dependencies_are_unique(layout in declarations_strategy()) {
        let graph = build_models(&build_set(&layout));
        for model in graph.iter() {
            let distinct: FxHashSet<_> = model.dependencies().iter().collect();
            prop_assert_eq!(distinct.len(), model.dependencies().len());
        }
    }

    #[test]
    fn prop_one_model_per_name(layout in declarations_strategy()) {
        let set = build_set(&layout);
        let graph = build_models(&set);
        prop_assert_eq!(graph.len(), layout.len());
        for declaration in set.iter() {
            prop_assert_eq!(
                graph.by_name(&declaration.name).map(|model| model.name()),
                Some(declaration.name.as_str())
            );
        }
        for (model, declaration) in graph.iter().zip(set.iter()) {
            prop_assert_eq!(model.schema().len(), declaration.members.len());
        }
    }

    #[test]
    fn prop_parallel_matches_sequential(
        layout in declarations_strategy(),
        unified in any::<bool>(),
    ) {
        let set = build_set(&layout);
        let order = if unified {
            RegistrationOrder::Unified
        } else {
            RegistrationOrder::Categorical
        };
        let options = BuildOptions::default().with_registration_order(order);

        let parallel = ModelBuilder::new(options.clone().with_parallel(true)).build(&set);
        let sequential = ModelBuilder::new(options.with_parallel(false)).build(&set);
        prop_assert_eq!(parallel.models(), sequential.models());
    }
}
