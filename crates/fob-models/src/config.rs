//! Build options and their layered loading.
//!
//! Options resolve from, lowest to highest priority: defaults, a TOML file
//! (`fob-models.toml` unless another path is given) and `FOB_MODELS_*`
//! environment variables.

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::{ModelsError, Result};

/// Default configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "fob-models.toml";

/// Prefix for environment overrides, e.g. `FOB_MODELS_PARALLEL=false`.
pub const ENV_PREFIX: &str = "FOB_MODELS_";

/// When inheritance clauses are resolved relative to registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationOrder {
    /// Interfaces, then type aliases, then classes; each declaration only
    /// sees the models registered before it.
    #[default]
    Categorical,
    /// Every declaration is registered before any clause is resolved.
    Unified,
}

/// Options controlling a model-graph build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    pub registration_order: RegistrationOrder,
    /// Classify declarations on the rayon thread pool.
    pub parallel: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            registration_order: RegistrationOrder::Categorical,
            parallel: true,
        }
    }
}

impl BuildOptions {
    /// Load options from defaults, the config file and the environment.
    ///
    /// A missing config file is not an error; `path` overrides the default
    /// file name.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = path.unwrap_or_else(|| Path::new(CONFIG_FILE));

        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|error| ModelsError::Config {
                message: error.to_string(),
            })
    }

    pub fn with_registration_order(mut self, order: RegistrationOrder) -> Self {
        self.registration_order = order;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
