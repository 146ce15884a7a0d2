use crate::terms::TermSet;

/// The result of one inference: the crisp value and the intermediate
/// strengths that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Outputs<T> {
    crisp: f64,
    firing_strengths: Vec<f64>,
    activations: Vec<(T, f64)>,
}

impl<T: TermSet> Outputs<T> {
    pub(crate) fn new(crisp: f64, firing_strengths: Vec<f64>, activations: Vec<(T, f64)>) -> Self {
        Self {
            crisp,
            firing_strengths,
            activations,
        }
    }

    /// The defuzzified output value
    pub fn crisp(&self) -> f64 {
        self.crisp
    }

    /// Firing strength of each rule, in rule order.
    pub fn firing_strengths(&self) -> &[f64] {
        &self.firing_strengths
    }

    /// Activation level of each output term, in term order.
    pub fn activations(&self) -> &[(T, f64)] {
        &self.activations
    }

    pub fn activation(&self, term: T) -> Option<f64> {
        self.activations.iter().find(|(t, _)| *t == term).map(|(_, level)| *level)
    }

    /// The most strongly activated output term; ties go to the earlier term.
    pub fn dominant_term(&self) -> Option<T> {
        self.activations
            .iter()
            .fold(None, |best: Option<(T, f64)>, &(term, level)| match best {
                Some((_, best_level)) if best_level >= level => best,
                _ => Some((term, level)),
            })
            .map(|(term, _)| term)
    }
}

#[test]
fn test_dominant_term() {
    let outputs = Outputs::new(5., vec![1.], vec![('l', 0.2), ('m', 0.9), ('h', 0.9)]);

    assert_eq!(outputs.dominant_term(), Some('m'));
    assert_eq!(outputs.activation('h'), Some(0.9));
    assert_eq!(outputs.activation('x'), None);
}
