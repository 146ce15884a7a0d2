use num::Float;

use crate::error::{Error, Result};

/// Which side of a triangle, if any, is flattened into a plateau of 1
/// running out to the edge of the universe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Shoulder {
    #[default]
    None,
    Left,
    Right,
    Both,
}

/// A triangular membership function with breakpoints `a <= b <= c`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangular {
    a: f64,
    b: f64,
    c: f64,
    shoulder: Shoulder,
}

impl Triangular {
    /// `name` is only used to label the error.
    pub fn new(name: &str, a: f64, b: f64, c: f64) -> Result<Self> {
        let invalid = |reason| Error::InvalidMembership {
            term: name.to_owned(),
            a,
            b,
            c,
            reason,
        };

        if !(a.is_finite() && b.is_finite() && c.is_finite()) {
            return Err(invalid("breakpoints must be finite"));
        }
        if !(a <= b && b <= c) {
            return Err(invalid("breakpoints must satisfy a <= b <= c"));
        }

        Ok(Self {
            a,
            b,
            c,
            shoulder: Shoulder::None,
        })
    }

    pub fn with_shoulder(mut self, shoulder: Shoulder) -> Self {
        self.shoulder = shoulder;
        self
    }

    pub fn breakpoints(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    pub fn shoulder(&self) -> Shoulder {
        self.shoulder
    }

    /// Degree of membership of `x`, always within `[0, 1]`.
    pub fn degree(&self, x: f64) -> f64 {
        let flat_left = matches!(self.shoulder, Shoulder::Left | Shoulder::Both);
        let flat_right = matches!(self.shoulder, Shoulder::Right | Shoulder::Both);

        if (flat_left && x <= self.b) || (flat_right && x >= self.b) {
            return 1.;
        }

        triangle(x, self.a, self.b, self.c)
    }
}

/// Plain triangle evaluation. A degenerate side (`a == b` or `b == c`) is a
/// vertical edge, so the peak itself still scores 1.
pub(crate) fn triangle<F: Float>(x: F, a: F, b: F, c: F) -> F {
    if x == b {
        F::one()
    } else if x <= a || x >= c {
        F::zero()
    } else if x < b {
        (x - a) / (b - a)
    } else {
        (c - x) / (c - b)
    }
}

#[test]
fn test_triangle_degrees() {
    let tri = Triangular::new("mid", 0., 5., 10.).unwrap();

    assert_eq!(tri.degree(-1.), 0.);
    assert_eq!(tri.degree(0.), 0.);
    assert_eq!(tri.degree(2.5), 0.5);
    assert_eq!(tri.degree(5.), 1.);
    assert_eq!(tri.degree(7.5), 0.5);
    assert_eq!(tri.degree(10.), 0.);
    assert_eq!(tri.degree(11.), 0.);
}

#[test]
fn test_degenerate_sides() {
    let left = Triangular::new("ramp", 0., 0., 10.).unwrap();
    let right = Triangular::new("ramp", 0., 10., 10.).unwrap();

    assert_eq!(left.degree(0.), 1.);
    assert_eq!(left.degree(5.), 0.5);
    assert_eq!(right.degree(10.), 1.);
    assert_eq!(right.degree(5.), 0.5);

    let spike = Triangular::new("spike", 3., 3., 3.).unwrap();

    assert_eq!(spike.degree(3.), 1.);
    assert_eq!(spike.degree(3.1), 0.);
}

#[test]
fn test_shoulders() {
    let low = Triangular::new("low", 10., 13., 20.)
        .unwrap()
        .with_shoulder(Shoulder::Left);
    let high = Triangular::new("high", 20., 27., 30.)
        .unwrap()
        .with_shoulder(Shoulder::Right);

    assert_eq!(low.degree(10.), 1.);
    assert_eq!(low.degree(12.), 1.);
    assert_eq!(low.degree(20.), 0.);
    assert_eq!(high.degree(28.), 1.);
    assert_eq!(high.degree(30.), 1.);
    assert_eq!(high.degree(20.), 0.);
}

#[test]
fn test_rejects_unordered_breakpoints() {
    assert!(matches!(
        Triangular::new("bad", 5., 1., 10.),
        Err(Error::InvalidMembership { .. })
    ));
    assert!(Triangular::new("nan", f64::NAN, 1., 10.).is_err());
}
