//! A small Mamdani fuzzy inference engine and the cacao pod classifier
//! built on top of it.
//!
//! ```
//! let pod = cacao_fuzzy::configure()?;
//! let grade = cacao_fuzzy::classify(&pod, 20., 10., 600., 40.)?;
//!
//! assert!((grade - 5.).abs() < 1e-6);
//! # Ok::<(), cacao_fuzzy::Error>(())
//! ```

mod dsl;
mod inference;
mod inputs;
mod linspace;
mod math;
mod membership;
mod ops;
mod outputs;
mod rules;
mod session;
mod terms;
mod variable;

pub mod cacao;
pub mod config;
pub mod error;

pub use cacao::{classify, configure, configure_with, PodClassifier, PodTerm};
pub use dsl::Expr;
pub use error::{ConfigError, Error, Result};
pub use inference::ControlSystem;
pub use inputs::Inputs;
pub use membership::{Shoulder, Triangular};
pub use ops::{AndOp, DefuzzificationOp, OrOp};
pub use outputs::Outputs;
pub use rules::{Consequent, Rule, Rules};
pub use session::{SessionState, Simulation};
pub use terms::{Key, Term, TermSet, Terms};
pub use variable::{Variable, VariableConstraints, VariableKey, Variables};
