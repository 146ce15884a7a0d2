use cacao_fuzzy::cacao::{Grade, Length};
use cacao_fuzzy::config::PodConfig;
use cacao_fuzzy::{classify, configure, configure_with, DefuzzificationOp, Error, PodTerm};

const RANGES: [(f64, f64); 4] = [(10., 30.), (5., 15.), (200., 1000.), (20., 60.)];

fn at(t: f64) -> [f64; 4] {
    RANGES.map(|(lo, hi)| lo + t * (hi - lo))
}

#[test]
fn memberships_stay_within_unit_interval() {
    let pod = configure().unwrap();

    for (_, var) in pod.system().variables().iter() {
        for &x in var.universe() {
            for term in var.terms() {
                let degree = var.membership(term).unwrap().degree(x);

                assert!((0. ..=1.).contains(&degree), "{}: {term:?}({x}) = {degree}", var.name());
            }
        }
    }
}

#[test]
fn neighbouring_terms_sum_to_one_at_band_boundaries() {
    let pod = configure().unwrap();

    for (_, var) in pod.system().variables().iter() {
        let terms: Vec<_> = var.terms().collect();
        let (lo, hi) = (*var.range().start(), *var.range().end());
        let width = (hi - lo) / terms.len() as f64;

        for k in 1..terms.len() {
            let boundary = lo + width * k as f64;
            let falling = var.membership(terms[k - 1]).unwrap().degree(boundary);
            let rising = var.membership(terms[k]).unwrap().degree(boundary);

            assert!(
                (falling + rising - 1.).abs() < 1e-12,
                "{} at {boundary}: {falling} + {rising}",
                var.name()
            );
        }
    }
}

#[test]
fn grade_never_drops_as_the_pod_grows() {
    let pod = configure().unwrap();
    let mut previous = f64::NEG_INFINITY;

    for step in 0..=60 {
        let [length, width, weight, seeds] = at(step as f64 / 60.);
        let grade = classify(&pod, length, width, weight, seeds).unwrap();

        assert!(grade >= previous - 1e-9, "grade fell to {grade} from {previous} at step {step}");

        previous = grade;
    }
}

#[test]
fn repeated_classification_is_bit_identical() {
    let pod = configure().unwrap();
    let first = classify(&pod, 17.3, 8.2, 455., 33.).unwrap();
    let second = classify(&pod, 17.3, 8.2, 455., 33.).unwrap();

    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn short_pod_is_rejected() {
    let pod = configure().unwrap();

    assert_eq!(
        classify(&pod, 9., 10., 600., 40.),
        Err(Error::OutOfRangeInput {
            variable: "length".into(),
            value: 9.,
            lo: 10.,
            hi: 30.,
        })
    );
    assert!(matches!(
        classify(&pod, 20., 10., 600., f64::NAN),
        Err(Error::OutOfRangeInput { ref variable, .. }) if variable == "seed_count"
    ));
    assert!(matches!(
        classify(&pod, 20., 10., 1000.5, 40.),
        Err(Error::OutOfRangeInput { ref variable, .. }) if variable == "weight"
    ));
}

#[test]
fn bounds_are_inclusive() {
    let pod = configure().unwrap();

    assert!(classify(&pod, 10., 5., 200., 20.).is_ok());
    assert!(classify(&pod, 30., 15., 1000., 60.).is_ok());
}

#[test]
fn midpoint_pod_grades_medium() {
    let pod = configure().unwrap();
    let [length, width, weight, seeds] = at(0.5);
    let outputs = pod.assess(length, width, weight, seeds).unwrap();
    let strengths = outputs.firing_strengths();

    let length_var = pod.system().variables().get(pod.length().key()).unwrap();
    let medium = length_var.membership(PodTerm::Length(Length::Medium)).unwrap();

    assert!((medium.degree(length) - 1.).abs() < 1e-9);
    assert!((strengths[1] - 1.).abs() < 1e-9);
    assert!(strengths[3].abs() < 1e-9);
    assert!(strengths[4].abs() < 1e-9);
    assert_eq!(outputs.dominant_term(), Some(PodTerm::Grade(Grade::Medium)));
    assert!((outputs.crisp() - 5.).abs() < 1e-6, "grade was {}", outputs.crisp());
}

#[test]
fn largest_pod_grades_high() {
    let pod = configure().unwrap();
    let outputs = pod.assess(30., 15., 1000., 60.).unwrap();
    let strengths = outputs.firing_strengths();

    assert_eq!(strengths[2], 1.);
    assert_eq!(strengths[3], 1.);
    assert_eq!(strengths[4], 0.);
    assert_eq!(outputs.activation(PodTerm::Grade(Grade::High)), Some(1.));
    assert!(outputs.crisp() > 20. / 3., "grade was {}", outputs.crisp());
}

#[test]
fn smallest_pod_grades_low() {
    let pod = configure().unwrap();
    let grade = classify(&pod, 10., 5., 200., 20.).unwrap();

    assert!(grade < 10. / 3.);
}

#[test]
fn alternative_defuzzifiers_agree_on_symmetric_output() {
    let mut config = PodConfig::default();
    let [length, width, weight, seeds] = at(0.5);

    for op in [
        DefuzzificationOp::Bisector,
        DefuzzificationOp::Mom,
        DefuzzificationOp::Som,
        DefuzzificationOp::Lom,
    ] {
        config.operators.defuzzification = op;

        let pod = configure_with(&config).unwrap();
        let grade = classify(&pod, length, width, weight, seeds).unwrap();

        assert!((grade - 5.).abs() < 1e-6, "{op:?} gave {grade}");
    }
}

#[test]
fn finer_output_sampling_keeps_midpoint() {
    let config = PodConfig::load_from_str("[grade]\nstep = 0.01\n").unwrap();
    let pod = configure_with(&config).unwrap();
    let [length, width, weight, seeds] = at(0.5);

    assert!((classify(&pod, length, width, weight, seeds).unwrap() - 5.).abs() < 1e-6);
}

#[test]
fn one_engine_serves_many_threads() {
    let pod = configure().unwrap();
    let expected: Vec<f64> = (0..8)
        .map(|i| {
            let [length, width, weight, seeds] = at(i as f64 / 7.);
            classify(&pod, length, width, weight, seeds).unwrap()
        })
        .collect();

    std::thread::scope(|scope| {
        for (i, want) in expected.iter().enumerate() {
            let pod = &pod;

            scope.spawn(move || {
                let [length, width, weight, seeds] = at(i as f64 / 7.);

                assert_eq!(classify(pod, length, width, weight, seeds).unwrap(), *want);
            });
        }
    });
}
