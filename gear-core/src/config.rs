//! Configuration for simplification and transformation.

use gear_math::{LpConfig, ReducerConfig};
use num_rational::BigRational;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// What the transform engine does when a term's eliminable variables
/// outnumber the helpers chosen for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HelperPolicy {
    /// Keep the term unchanged (abduction) or drop it (deduction)
    #[default]
    Retain,
    /// Abort the whole transformation with `InsufficientHelpers`
    Fail,
}

/// Configuration for the transform engine.
#[derive(Debug, Clone, Default)]
pub struct TransformConfig {
    /// Handling of insufficient helper sets
    pub insufficient_helpers: HelperPolicy,
    /// Redundancy reduction settings
    pub reducer: ReducerConfig,
}

/// User-facing configuration bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Slack allowed when deciding that a row is redundant
    pub tolerance: BigRational,
    /// Pivot budget for each LP solve
    pub max_lp_iterations: usize,
    /// Handling of insufficient helper sets
    pub insufficient_helpers: HelperPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance: BigRational::zero(),
            max_lp_iterations: LpConfig::default().max_iterations,
            insufficient_helpers: HelperPolicy::default(),
        }
    }
}

impl Config {
    /// Reducer settings derived from this configuration.
    pub fn reducer_config(&self) -> ReducerConfig {
        ReducerConfig {
            tolerance: self.tolerance.clone(),
            max_lp_iterations: self.max_lp_iterations,
        }
    }

    /// Transform engine settings derived from this configuration.
    pub fn transform_config(&self) -> TransformConfig {
        TransformConfig {
            insufficient_helpers: self.insufficient_helpers,
            reducer: self.reducer_config(),
        }
    }
}
