#![deny(clippy::all)]

//! # fob-models
//!
//! Cross-referenced structural models built from TypeScript declarations.
//!
//! Every class, interface and type alias becomes one [`Model`] whose members
//! are classified into [`SchemaField`]s, and whose references to other
//! declarations become bidirectional dependency edges.
//!
//! ## Passes
//!
//! ```text
//!  TypeIntrospector ──▶ DeclarationSet
//!                            │
//!        1. register  ───────┤  stubs + inheritance (registry)
//!        2. classify  ───────┤  schema fields + dependency sets (classify)
//!        3. link      ───────┘  dependencies / dependants (link)
//!                            │
//!                            ▼
//!                        ModelGraph
//! ```
//!
//! Pass 1 is sequential and ends by sealing the registry. Pass 2 only reads
//! the sealed registry and runs on the rayon pool unless disabled through
//! [`BuildOptions::parallel`]. Pass 3 is sequential.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fob_models::{ModelBuilder, BuildOptions, OxcIntrospector};
//!
//! # fn main() -> fob_models::Result<()> {
//! let introspector = OxcIntrospector::new().with_source(
//!     "user.ts",
//!     "interface User { id: string; friends: User[]; }",
//! );
//! let graph = ModelBuilder::new(BuildOptions::load(None)?).build_from(&introspector)?;
//!
//! let user = graph.by_name("User").expect("declared above");
//! assert_eq!(user.schema().len(), 2);
//! assert_eq!(user.dependencies(), &[user.id()]);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod classify;
pub mod config;
pub mod error;
pub mod fields;
pub mod generators;
pub mod introspect;
pub mod link;
pub mod model;
pub mod registry;

pub use builder::{ModelBuilder, build_models};
pub use config::{BuildOptions, RegistrationOrder};
pub use error::{ModelsError, Result};
pub use fields::{ALIAS_SENTINEL, DependencySet};
pub use introspect::oxc::OxcIntrospector;
pub use introspect::{
    Declaration, DeclarationKind, DeclarationSet, HeritageClause, Member, MemberKind, Parameter,
    Signature, TypeArgument, TypeAtom, TypeExpr, TypeIntrospector, TypeParameter,
};
pub use model::{
    FunctionArgument, GenericArgument, Heritage, Model, ModelGraph, ModelId, ModelKind,
    ReturnType, SchemaField, TypeRef,
};

#[cfg(feature = "json")]
pub use generators::json::render_json;

#[cfg(test)]
mod tests;
