/// Evenly spaced points, the way numpy.arange lays them out.
pub struct Linspace {
    start: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    /// `n` points starting at `start`, `step` apart.
    pub fn new(start: f64, step: f64, n: usize) -> Self {
        Linspace {
            start,
            step,
            index: 0,
            len: n,
        }
    }

    /// Points from `min` towards `max` at `step`. Unlike arange the upper
    /// bound is always part of the result, even when `step` doesn't divide
    /// the range evenly.
    pub fn closed(min: f64, max: f64, step: f64) -> Vec<f64> {
        // Slack so that e.g. (1.0 - 0.0) / 0.1 lands on 10 rather than 9.999..
        let num = (((max - min) / step + 1e-9).floor() as usize).saturating_add(1);
        let mut points: Vec<f64> = Linspace::new(min, step, num).map(|p| p.min(max)).collect();

        match points.last() {
            Some(last) if max - last > step * 1e-9 => points.push(max),
            _ => {}
        }

        points
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            None
        } else {
            let i = self.index;
            self.index += 1;
            // Multiply rather than accumulate to avoid drift
            Some(self.start + self.step * i as f64)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Linspace {}

#[test]
fn test_closed_even_step() {
    assert_eq!(Linspace::closed(0., 10., 1.), (0..=10).map(f64::from).collect::<Vec<_>>());
    assert_eq!(Linspace::closed(200., 1000., 10.).len(), 81);
}

#[test]
fn test_closed_uneven_step() {
    let points = Linspace::closed(0., 1., 0.3);
    let expected = [0., 0.3, 0.6, 0.9, 1.];

    assert_eq!(points.len(), expected.len());
    for (p, e) in points.iter().zip(expected) {
        assert!((p - e).abs() < 1e-12);
    }
}

#[test]
fn test_closed_fine_step() {
    let points = Linspace::closed(0., 1., 0.1);

    assert_eq!(points.len(), 11);
    assert_eq!(points.last(), Some(&1.));
}
