//! Configuration for the cacao pod classifier.
//!
//! Every field is optional; anything left out keeps the stock value.
//!
//! ```toml
//! [length]
//! lo = 10.0
//! hi = 30.0
//! step = 1.0
//!
//! [grade]
//! step = 0.1
//!
//! [operators]
//! and = "min"
//! or = "max"
//! defuzzification = "centroid"
//! ```
//!
//! `CACAO_DEFUZZ` overrides the defuzzification method.

use std::env;
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::ops::{AndOp, DefuzzificationOp, OrOp};

/// A variable's universe and sampling step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UniverseConfig {
    pub lo: f64,
    pub hi: f64,
    pub step: f64,
}

impl UniverseConfig {
    pub const fn new(lo: f64, hi: f64, step: f64) -> Self {
        Self { lo, hi, step }
    }

    pub fn range(&self) -> RangeInclusive<f64> {
        self.lo..=self.hi
    }
}

/// Partial universe as written in a config file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct UniverseOverride {
    lo: Option<f64>,
    hi: Option<f64>,
    step: Option<f64>,
}

impl UniverseOverride {
    fn apply(self, base: UniverseConfig) -> UniverseConfig {
        UniverseConfig {
            lo: self.lo.unwrap_or(base.lo),
            hi: self.hi.unwrap_or(base.hi),
            step: self.step.unwrap_or(base.step),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorConfig {
    pub and: AndOp,
    pub or: OrOp,
    pub defuzzification: DefuzzificationOp,
}

/// Universes and operators for the pod classifier. The rule base is fixed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PodConfig {
    /// Pod length in cm
    pub length: UniverseConfig,
    /// Pod width in cm
    pub width: UniverseConfig,
    /// Pod weight in grams
    pub weight: UniverseConfig,
    pub seed_count: UniverseConfig,
    /// Quality score
    pub grade: UniverseConfig,
    pub operators: OperatorConfig,
}

impl Default for PodConfig {
    fn default() -> Self {
        Self {
            length: UniverseConfig::new(10., 30., 1.),
            width: UniverseConfig::new(5., 15., 1.),
            weight: UniverseConfig::new(200., 1000., 10.),
            seed_count: UniverseConfig::new(20., 60., 1.),
            grade: UniverseConfig::new(0., 10., 1.),
            operators: OperatorConfig::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    length: UniverseOverride,
    width: UniverseOverride,
    weight: UniverseOverride,
    seed_count: UniverseOverride,
    grade: UniverseOverride,
    operators: OperatorConfig,
}

impl From<RawConfig> for PodConfig {
    fn from(raw: RawConfig) -> Self {
        let base = PodConfig::default();

        Self {
            length: raw.length.apply(base.length),
            width: raw.width.apply(base.width),
            weight: raw.weight.apply(base.weight),
            seed_count: raw.seed_count.apply(base.seed_count),
            grade: raw.grade.apply(base.grade),
            operators: raw.operators,
        }
    }
}

impl PodConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        debug!(path = %path.display(), "loading config");

        Self::load_from_str(&content)
    }

    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;

        Ok(raw.into())
    }

    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = env::var("CACAO_DEFUZZ") {
            self.operators.defuzzification = parse_defuzz(&val)?;
        }

        Ok(())
    }
}

fn parse_defuzz(val: &str) -> Result<DefuzzificationOp, ConfigError> {
    match val.trim().to_ascii_lowercase().as_str() {
        "centroid" => Ok(DefuzzificationOp::Centroid),
        "bisector" => Ok(DefuzzificationOp::Bisector),
        "mom" => Ok(DefuzzificationOp::Mom),
        "som" => Ok(DefuzzificationOp::Som),
        "lom" => Ok(DefuzzificationOp::Lom),
        _ => Err(ConfigError::InvalidOverride {
            key: "CACAO_DEFUZZ",
            value: val.to_owned(),
        }),
    }
}
