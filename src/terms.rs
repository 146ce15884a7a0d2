use std::fmt::Debug;
use std::hash::Hash;
use std::ops::RangeInclusive;

pub use fixed_map::Key as Term;
pub use fixed_map::Key;
use fixed_map::Map as FixedMap;

use crate::error::{Error, Result};
use crate::membership::{Shoulder, Triangular};

/// The crate-wide term type a control system is generic over; usually an
/// enum wrapping each variable's own term enum.
pub trait TermSet: Copy + Debug + Eq + Hash {}

impl<T: Copy + Debug + Eq + Hash> TermSet for T {}

/// The membership functions of a single variable, keyed by its term enum.
/// Iteration follows the enum's declaration order.
pub struct Terms<K: Term>(pub(crate) FixedMap<K, Triangular>);

impl<K: Term> Default for Terms<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Term> Terms<K> {
    pub fn new() -> Self {
        Self(FixedMap::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: K) -> Option<&Triangular> {
        self.0.get(key)
    }
}

impl<K: Term + Debug> Terms<K> {
    pub fn insert(&mut self, key: K, value: Triangular) -> Result<()> {
        if self.0.contains_key(key) {
            return Err(Error::DuplicateTerm(format!("{key:?}")));
        }

        self.0.insert(key, value);

        Ok(())
    }

    /// Splits `universe` into one equal-width band per name and places a
    /// triangle on each band's midpoint, reaching zero at the neighbouring
    /// midpoints. The first and last terms are flattened to 1 out to the
    /// edges of the universe, so neighbouring terms always sum to 1.
    pub fn auto_partition(universe: RangeInclusive<f64>, names: impl IntoIterator<Item = K>) -> Result<Self> {
        let names: Vec<K> = names.into_iter().collect();
        let (lo, hi) = (*universe.start(), *universe.end());

        if names.is_empty() {
            return Err(Error::EmptyTerms);
        }

        let n = names.len();
        let width = (hi - lo) / n as f64;
        let mut terms = Self::new();

        for (i, name) in names.into_iter().enumerate() {
            let peak = lo + width * (i as f64 + 0.5);
            let a = if i == 0 { lo } else { peak - width };
            let c = if i == n - 1 { hi } else { peak + width };
            let shoulder = match (i == 0, i == n - 1) {
                (true, true) => Shoulder::Both,
                (true, false) => Shoulder::Left,
                (false, true) => Shoulder::Right,
                (false, false) => Shoulder::None,
            };
            let tri = Triangular::new(&format!("{name:?}"), a, peak, c)?.with_shoulder(shoulder);

            terms.insert(name, tri)?;
        }

        Ok(terms)
    }
}
