use num::Float;

/// Piecewise linear interpolation of `x` through `coords`, which must be
/// sorted by their first element. Values outside the covered range take the
/// nearest endpoint, like numpy.interp.
pub(crate) fn interp<F: Float>(x: F, coords: &[(F, F)]) -> Option<F> {
    let (first, last) = (coords.first()?, coords.last()?);

    if x <= first.0 {
        return Some(first.1);
    }
    if x >= last.0 {
        return Some(last.1);
    }

    coords.windows(2).find_map(|pair| {
        let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);

        if x1 <= x && x <= x2 {
            if x2 == x1 {
                Some(y1)
            } else {
                Some(y1 + (x - x1) * (y2 - y1) / (x2 - x1))
            }
        } else {
            None
        }
    })
}

#[test]
fn test_interp() {
    let coords = [(1., 3.), (2., 2.), (3., 0.)];

    assert_eq!(interp(0., &coords), Some(3.));
    assert_eq!(interp(1.5, &coords), Some(2.5));
    assert_eq!(interp(2.5, &coords), Some(1.));
    assert_eq!(interp(4., &coords), Some(0.));
    assert_eq!(interp::<f64>(1., &[]), None);
}
