//! Error types for the fuzzy engine.

use thiserror::Error;

/// Errors raised while building a control system or running an inference.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// A crisp input fell outside its variable's universe
    #[error("{variable} must be between {lo} and {hi}, got {value}")]
    OutOfRangeInput {
        variable: String,
        value: f64,
        lo: f64,
        hi: f64,
    },

    /// An inference was attempted before every required input was set
    #[error("missing input for {0}")]
    MissingInput(String),

    /// The aggregated output curve is zero everywhere
    #[error("no rule fired for {0}; the output is undefined")]
    NoRuleFired(String),

    /// Inverted bounds, a non-positive step, or more sample points than one universe allows
    #[error("invalid universe for {variable}: [{lo}, {hi}] with step {step}")]
    InvalidUniverse {
        variable: String,
        lo: f64,
        hi: f64,
        step: f64,
    },

    #[error("invalid membership for term {term}: ({a}, {b}, {c}) {reason}")]
    InvalidMembership {
        term: String,
        a: f64,
        b: f64,
        c: f64,
        reason: &'static str,
    },

    #[error("a variable needs at least one term")]
    EmptyTerms,

    #[error("term {0} is defined more than once")]
    DuplicateTerm(String),

    #[error("variable {0} is already registered")]
    DuplicateVariable(String),

    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    /// A rule references a variable key the registry does not hold
    #[error("rule {0} references an unregistered variable")]
    UnregisteredVariable(usize),

    #[error("term {term} is not defined on variable {variable}")]
    UnknownTerm { variable: String, term: String },

    #[error("a consequent must be a single `variable is term` proposition")]
    InvalidConsequent,

    #[error("rule {rule} concludes on {found}, expected the output variable {expected}")]
    OutputMismatch {
        rule: usize,
        expected: String,
        found: String,
    },

    #[error("{0} is the output variable and cannot be set as an input")]
    NotAnInput(String),

    #[error("the rule base is empty")]
    EmptyRuleBase,

    /// Sessions are single use; a computed one rejects new inputs
    #[error("the simulation has already been computed")]
    SessionComputed,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading a [`PodConfig`](crate::config::PodConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {key}: {value}")]
    InvalidOverride { key: &'static str, value: String },

    #[error(transparent)]
    Engine(#[from] Error),
}
