use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pass::AlgebraicPass;

/// Settings for one [`AlgebraicPass`].
///
/// ```toml
/// max_iterations = 16
///
/// [conditions]
/// allow_isub = true
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassConfig {
    /// Fixpoint sweep cap; 0 selects the default.
    pub max_iterations: usize,
    /// Condition flags by name. Unlisted flags stay off.
    pub conditions: BTreeMap<String, bool>,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            max_iterations: AlgebraicPass::DEFAULT_MAX_ITERATIONS,
            conditions: BTreeMap::new(),
        }
    }
}
