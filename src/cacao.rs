//! The cacao pod classifier: four measured attributes, one quality grade.

use std::fmt::Debug;

use tracing::debug;

use crate::config::{PodConfig, UniverseConfig};
use crate::dsl::Expr;
use crate::error::Result;
use crate::inference::ControlSystem;
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::terms::{Key, Term, Terms};
use crate::variable::{Variable, Variables};

/// Declares each variable's term enum and the wrapping [`PodTerm`].
macro_rules! pod_terms {
    ($($var:ident { $($term:ident),+ $(,)? })+) => {
        $(
            #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
            pub enum $var {
                $($term),+
            }

            impl $var {
                /// Every term, low to high
                pub const ALL: &'static [$var] = &[$($var::$term),+];
            }

            impl From<$var> for PodTerm {
                fn from(t: $var) -> Self {
                    PodTerm::$var(t)
                }
            }
        )+

        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        pub enum PodTerm {
            $($var($var)),+
        }
    };
}

pod_terms! {
    Length { Short, Medium, Long }
    Width { Narrow, Medium, Wide }
    Weight { Light, Medium, Heavy }
    SeedCount { Few, Medium, Many }
    Grade { Low, Medium, High }
}

/// The configured pod control system and handles to its variables.
pub struct PodClassifier {
    system: ControlSystem<PodTerm>,
    length: Variable<Length>,
    width: Variable<Width>,
    weight: Variable<Weight>,
    seed_count: Variable<SeedCount>,
    grade: Variable<Grade>,
}

/// Builds the classifier with the stock universes.
pub fn configure() -> Result<PodClassifier> {
    configure_with(&PodConfig::default())
}

fn add_auto<I>(vars: &mut Variables<PodTerm>, name: &str, universe: UniverseConfig, terms: &[I]) -> Result<Variable<I>>
where
    I: Into<PodTerm> + Term + Copy + Debug,
{
    let terms = Terms::auto_partition(universe.range(), terms.iter().copied())?;

    vars.add(name, universe.range(), terms, Some(universe.step))
}

pub fn configure_with(config: &PodConfig) -> Result<PodClassifier> {
    let mut vars = Variables::new();
    let length = add_auto(&mut vars, "length", config.length, Length::ALL)?;
    let width = add_auto(&mut vars, "width", config.width, Width::ALL)?;
    let weight = add_auto(&mut vars, "weight", config.weight, Weight::ALL)?;
    let seed_count = add_auto(&mut vars, "seed_count", config.seed_count, SeedCount::ALL)?;
    let grade = add_auto(&mut vars, "grade", config.grade, Grade::ALL)?;
    let mut rules = Rules::<PodTerm>::with_capacity(5);

    // Overlaps with "any small"; both are part of the rule base
    rules.add_labeled(
        "all small",
        Expr::all([
            length.is(Length::Short),
            width.is(Width::Narrow),
            weight.is(Weight::Light),
            seed_count.is(SeedCount::Few),
        ]),
        grade.is(Grade::Low),
    )?;
    rules.add_labeled(
        "all medium",
        Expr::all([
            length.is(Length::Medium),
            width.is(Width::Medium),
            weight.is(Weight::Medium),
            seed_count.is(SeedCount::Medium),
        ]),
        grade.is(Grade::Medium),
    )?;
    rules.add_labeled(
        "all large",
        Expr::all([
            length.is(Length::Long),
            width.is(Width::Wide),
            weight.is(Weight::Heavy),
            seed_count.is(SeedCount::Many),
        ]),
        grade.is(Grade::High),
    )?;
    rules.add_labeled(
        "any large",
        Expr::any([
            length.is(Length::Long),
            width.is(Width::Wide),
            weight.is(Weight::Heavy),
            seed_count.is(SeedCount::Many),
        ]),
        grade.is(Grade::High),
    )?;
    rules.add_labeled(
        "any small",
        Expr::any([
            length.is(Length::Short),
            width.is(Width::Narrow),
            weight.is(Weight::Light),
            seed_count.is(SeedCount::Few),
        ]),
        grade.is(Grade::Low),
    )?;

    let ops = config.operators;
    let system = ControlSystem::new(vars, rules, grade)?.with_ops(ops.and, ops.or, ops.defuzzification);

    debug!(?ops, "pod classifier configured");

    Ok(PodClassifier {
        system,
        length,
        width,
        weight,
        seed_count,
        grade,
    })
}

impl PodClassifier {
    /// Grades one pod. Inputs are checked against their universes first.
    pub fn classify(&self, length: f64, width: f64, weight: f64, seed_count: f64) -> Result<f64> {
        self.assess(length, width, weight, seed_count).map(|outputs| outputs.crisp())
    }

    /// Like [`PodClassifier::classify`], keeping the rule strengths and
    /// term activations behind the grade.
    pub fn assess(&self, length: f64, width: f64, weight: f64, seed_count: f64) -> Result<Outputs<PodTerm>> {
        let mut sim = self.system.simulation();

        sim.input(self.length, length)?;
        sim.input(self.width, width)?;
        sim.input(self.weight, weight)?;
        sim.input(self.seed_count, seed_count)?;

        sim.compute_outputs()
    }

    pub fn system(&self) -> &ControlSystem<PodTerm> {
        &self.system
    }

    pub fn length(&self) -> Variable<Length> {
        self.length
    }

    pub fn width(&self) -> Variable<Width> {
        self.width
    }

    pub fn weight(&self) -> Variable<Weight> {
        self.weight
    }

    pub fn seed_count(&self) -> Variable<SeedCount> {
        self.seed_count
    }

    pub fn grade(&self) -> Variable<Grade> {
        self.grade
    }
}

/// Grades one pod against a configured classifier.
pub fn classify(engine: &PodClassifier, length: f64, width: f64, weight: f64, seed_count: f64) -> Result<f64> {
    engine.classify(length, width, weight, seed_count)
}
