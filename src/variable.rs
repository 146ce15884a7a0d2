use std::fmt::Debug;
use std::marker::PhantomData;
use std::ops::RangeInclusive;

use slotmap::{new_key_type, SlotMap};
use tracing::trace;

use crate::error::{Error, Result};
use crate::linspace::Linspace;
use crate::membership::Triangular;
use crate::terms::{Term, TermSet, Terms};

/// Upper bound on the sample points of one universe.
pub(crate) const MAX_SAMPLES: f64 = 1_000_000.;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// A typed handle to a registered variable; `I` is the variable's own term enum.
///
/// Handles are only meaningful against the [`Variables`] that issued them. A
/// key from another registry may name an unrelated variable there.
pub struct Variable<I>(pub(crate) VariableKey, PhantomData<I>);

impl<I> Clone for Variable<I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for Variable<I> {}

impl<I> Variable<I> {
    pub fn key(self) -> VariableKey {
        self.0
    }
}

#[derive(Default)]
pub struct Variables<T>(pub(crate) SlotMap<VariableKey, VariableConstraints<T>>);

impl<T: TermSet> Variables<T> {
    pub fn new() -> Self {
        Self(SlotMap::with_key())
    }

    /// Registers a variable. If the step value is not provided, it defaults to 0.1
    pub fn add<I: Into<T> + Term + Debug>(
        &mut self,
        name: &str,
        universe_range: RangeInclusive<f64>,
        terms: Terms<I>,
        step: Option<f64>,
    ) -> Result<Variable<I>> {
        if self.find(name).is_some() {
            return Err(Error::DuplicateVariable(name.to_owned()));
        }

        let constraints = VariableConstraints::new(name, universe_range, terms, step.unwrap_or(0.1))?;
        let key = self.0.insert(constraints);

        Ok(Variable(key, PhantomData))
    }

    pub fn find(&self, name: &str) -> Option<VariableKey> {
        self.0.iter().find(|(_, var)| var.name == name).map(|(key, _)| key)
    }

    pub fn get(&self, key: VariableKey) -> Option<&VariableConstraints<T>> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableKey, &VariableConstraints<T>)> {
        self.0.iter()
    }
}

/// A bounded universe, its sample points, and the membership functions
/// defined over it.
pub struct VariableConstraints<T> {
    pub(crate) name: String,
    pub(crate) min_u: f64,
    pub(crate) max_u: f64,
    pub(crate) step: f64,
    pub(crate) universe: Vec<f64>,
    pub(crate) terms: Vec<(T, Triangular)>,
}

impl<T: TermSet> VariableConstraints<T> {
    fn new<I: Into<T> + Term + Debug>(
        name: &str,
        universe_range: RangeInclusive<f64>,
        terms: Terms<I>,
        step: f64,
    ) -> Result<Self> {
        let min_u = *universe_range.start();
        let max_u = *universe_range.end();

        let valid = min_u.is_finite() && max_u.is_finite() && min_u < max_u && step > 0. && step.is_finite();

        if !valid || (max_u - min_u) / step > MAX_SAMPLES {
            return Err(Error::InvalidUniverse {
                variable: name.to_owned(),
                lo: min_u,
                hi: max_u,
                step,
            });
        }
        if terms.is_empty() {
            return Err(Error::EmptyTerms);
        }

        let mut ordered = Vec::with_capacity(terms.len());

        for (term, tri) in terms.0.iter() {
            let (a, b, c) = tri.breakpoints();

            if a < min_u || c > max_u {
                return Err(Error::InvalidMembership {
                    term: format!("{term:?}"),
                    a,
                    b,
                    c,
                    reason: "support must lie within the universe",
                });
            }

            ordered.push((term.into(), *tri));
        }

        Ok(Self {
            name: name.to_owned(),
            min_u,
            max_u,
            step,
            universe: Linspace::closed(min_u, max_u, step),
            terms: ordered,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn range(&self) -> RangeInclusive<f64> {
        self.min_u..=self.max_u
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// The sample points used when integrating over this universe.
    pub fn universe(&self) -> &[f64] {
        &self.universe
    }

    pub fn terms(&self) -> impl Iterator<Item = T> + '_ {
        self.terms.iter().map(|(term, _)| *term)
    }

    pub fn membership(&self, term: T) -> Option<&Triangular> {
        self.terms.iter().find(|(t, _)| *t == term).map(|(_, tri)| tri)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.range().contains(&value)
    }

    pub(crate) fn check_range(&self, value: f64) -> Result<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(Error::OutOfRangeInput {
                variable: self.name.clone(),
                value,
                lo: self.min_u,
                hi: self.max_u,
            })
        }
    }

    /// Degree of membership of `value` in every term, in term order.
    pub fn fuzzify(&self, value: f64) -> Vec<(T, f64)> {
        let degrees: Vec<_> = self
            .terms
            .iter()
            .map(|(term, tri)| (*term, tri.degree(value)))
            .collect();

        trace!(variable = %self.name, value, ?degrees, "fuzzified");

        degrees
    }
}
