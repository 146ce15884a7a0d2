use std::iter::Sum;

use num::Float;
use serde::{Deserialize, Serialize};

use crate::math::interp;

/// And operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
}

impl AndOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
        }
    }
}

/// Or operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
}

impl OrOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
        }
    }
}

/// Method for defuzzifcating the resulting membership function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefuzzificationOp {
    /// Center of area over the sample points
    #[default]
    Centroid,
    /// Point splitting the area under the curve in half
    Bisector,
    /// Mean of the values for which the membership function is maximum
    Mom,
    /// Smallest value for which the membership function is maximum
    Som,
    /// Largest value for which the membership function is maximum
    Lom,
}

impl DefuzzificationOp {
    /// Collapses `membership`, sampled at `universe`, into a crisp value.
    /// `None` when the curve is zero everywhere.
    pub fn call<F: Float + Sum>(self, universe: &[F], membership: &[F]) -> Option<F> {
        debug_assert_eq!(universe.len(), membership.len());

        let total = membership.iter().copied().sum::<F>();

        if universe.is_empty() || total <= F::zero() {
            return None;
        }

        match self {
            Self::Centroid => {
                let num = universe
                    .iter()
                    .zip(membership)
                    .map(|(&x, &mu)| x * mu)
                    .sum::<F>();

                Some(num / total)
            }
            Self::Bisector => {
                if universe.len() == 1 {
                    return Some(universe[0]);
                }

                let two = F::one() + F::one();
                let areas: Vec<F> = universe
                    .windows(2)
                    .zip(membership.windows(2))
                    .map(|(u, m)| (m[0] + m[1]) * (u[1] - u[0]) / two)
                    .collect();
                let target = areas.iter().copied().sum::<F>() / two;
                let mut cum_area = F::zero();

                for (i, area) in areas.iter().copied().enumerate() {
                    let prev = cum_area;

                    cum_area = cum_area + area;

                    if cum_area >= target && area > F::zero() {
                        return interp(target, &[(prev, universe[i]), (cum_area, universe[i + 1])]);
                    }
                }

                // Only reachable through rounding; the area is all at the end
                universe.last().copied()
            }
            Self::Mom | Self::Som | Self::Lom => {
                let maximum = membership.iter().copied().fold(F::zero(), F::max);
                let peaks = universe
                    .iter()
                    .zip(membership)
                    .filter_map(|(&u, &m)| if m == maximum { Some(u) } else { None });

                match self {
                    Self::Som => peaks.reduce(F::min),
                    Self::Lom => peaks.reduce(F::max),
                    _ => {
                        let (len, sum) = peaks.fold((0usize, F::zero()), |(n, sum), u| (n + 1, sum + u));

                        F::from(len).map(|len| sum / len)
                    }
                }
            }
        }
    }
}
