//! Declaration registry (pass 1).
//!
//! Creates one model stub per declaration name and resolves inheritance
//! clauses against the models registered so far. The registry is writable
//! only until [`Registry::seal`]; every later pass reads the
//! [`SealedRegistry`].

use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::config::RegistrationOrder;
use crate::introspect::{Declaration, DeclarationKind, DeclarationSet, HeritageClause};
use crate::model::{GenericArgument, Heritage, Model, ModelGraph, ModelId, ModelKind, TypeRef};

/// Register every declaration of `set` in the given order.
///
/// With [`RegistrationOrder::Categorical`] each declaration resolves its
/// inheritance clauses right after it is registered, so only models that
/// precede it are visible. [`RegistrationOrder::Unified`] registers every
/// stub before resolving any clause.
pub fn register_declarations(set: &DeclarationSet, order: RegistrationOrder) -> Registry {
    let mut registry = Registry::with_capacity(set.len());

    match order {
        RegistrationOrder::Categorical => {
            for declaration in set.iter() {
                let slot = registry.register(declaration);
                if let Some(id) = slot {
                    registry.resolve_heritage(id, declaration);
                }
                registry.assignments.push(slot);
            }
        }
        RegistrationOrder::Unified => {
            let slots: Vec<Option<ModelId>> = set
                .iter()
                .map(|declaration| registry.register(declaration))
                .collect();
            for (declaration, slot) in set.iter().zip(&slots) {
                if let Some(id) = slot {
                    registry.resolve_heritage(*id, declaration);
                }
            }
            registry.assignments = slots;
        }
    }

    debug!(
        declarations = set.len(),
        models = registry.models.len(),
        ?order,
        "registered declarations"
    );
    registry
}

/// Mutable name → model map used while registering declarations.
#[derive(Debug, Default)]
pub struct Registry {
    models: Vec<Model>,
    index: FxHashMap<String, ModelId>,
    assignments: Vec<Option<ModelId>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            models: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            assignments: Vec::with_capacity(capacity),
        }
    }

    /// Creates the stub for `declaration`, or returns the model it merges into.
    ///
    /// A repeated name of the same kind merges into the first declaration.
    /// A repeated name of another kind is skipped and yields `None`.
    pub fn register(&mut self, declaration: &Declaration) -> Option<ModelId> {
        let kind = ModelKind::from(declaration.kind);

        if let Some(&existing) = self.index.get(&declaration.name) {
            let existing_kind = self.models[existing.index()].kind;
            if existing_kind == kind {
                debug!(name = %declaration.name, "merging repeated declaration");
                return Some(existing);
            }
            warn!(
                name = %declaration.name,
                registered = ?existing_kind,
                skipped = ?kind,
                "declaration name already registered with another kind; skipping"
            );
            return None;
        }

        let id = ModelId::new(self.models.len());
        let mut model = Model::stub(id, declaration.name.clone(), kind);
        model.arguments = declaration
            .type_parameters
            .iter()
            .map(|parameter| GenericArgument {
                name: parameter.name.clone(),
                bound: parameter.constraint.clone(),
            })
            .collect();

        self.models.push(model);
        self.index.insert(declaration.name.clone(), id);
        Some(id)
    }

    /// Resolves the `extends` / `implements` clauses of `declaration` onto `id`.
    pub fn resolve_heritage(&mut self, id: ModelId, declaration: &Declaration) {
        match declaration.kind {
            DeclarationKind::Interface => {
                let resolved: Vec<TypeRef> = declaration
                    .extends
                    .iter()
                    .map(|clause| self.resolve_clause(clause))
                    .collect();
                if let Heritage::Interface { extends } = &mut self.models[id.index()].heritage {
                    extends.extend(resolved);
                }
            }
            DeclarationKind::Class => {
                let superclass = declaration
                    .extends
                    .first()
                    .map(|clause| self.resolve_clause(clause));
                let resolved: Vec<TypeRef> = declaration
                    .implements
                    .iter()
                    .map(|clause| self.resolve_clause(clause))
                    .collect();
                if let Heritage::Class {
                    extends,
                    implements,
                } = &mut self.models[id.index()].heritage
                {
                    if extends.is_none() {
                        *extends = superclass;
                    }
                    implements.extend(resolved);
                }
            }
            DeclarationKind::TypeAlias => {}
        }
    }

    pub fn lookup(&self, name: &str) -> Option<ModelId> {
        self.index.get(name).copied()
    }

    fn resolve_clause(&self, clause: &HeritageClause) -> TypeRef {
        match self.lookup(&clause.name) {
            Some(id) => TypeRef::Model(id),
            None => {
                trace!(clause = %clause.text, "inheritance clause not registered yet");
                TypeRef::Named(clause.text.clone())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Ends registration. The returned registry is read-only.
    pub fn seal(self) -> SealedRegistry {
        SealedRegistry {
            models: self.models,
            index: self.index,
            assignments: self.assignments,
        }
    }
}

/// Read-only registry shared by the classifier.
#[derive(Debug)]
pub struct SealedRegistry {
    models: Vec<Model>,
    index: FxHashMap<String, ModelId>,
    assignments: Vec<Option<ModelId>>,
}

impl SealedRegistry {
    pub fn lookup(&self, name: &str) -> Option<ModelId> {
        self.index.get(name).copied()
    }

    /// A model reference for `name`, or the raw name when it is unknown.
    pub fn resolve(&self, name: &str) -> TypeRef {
        match self.lookup(name) {
            Some(id) => TypeRef::Model(id),
            None => TypeRef::Named(name.to_string()),
        }
    }

    pub fn model(&self, id: ModelId) -> Option<&Model> {
        self.models.get(id.index())
    }

    /// Target model per declaration, aligned with [`DeclarationSet::iter`].
    /// `None` marks a skipped declaration.
    pub fn assignments(&self) -> &[Option<ModelId>] {
        &self.assignments
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub(crate) fn into_graph(self) -> ModelGraph {
        ModelGraph {
            models: self.models,
            index: self.index,
        }
    }
}
