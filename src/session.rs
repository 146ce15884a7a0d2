use crate::error::{Error, Result};
use crate::inference::ControlSystem;
use crate::inputs::Inputs;
use crate::outputs::Outputs;
use crate::terms::TermSet;
use crate::variable::{Variable, VariableKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    PartiallyFilled,
    Ready,
    Computed,
}

/// One classification request against a shared [`ControlSystem`].
///
/// Inputs are range checked as they are set; a rejected value leaves the
/// session untouched. Once computed the session only replays its outcome.
pub struct Simulation<'s, T> {
    system: &'s ControlSystem<T>,
    inputs: Inputs,
    outcome: Option<Result<Outputs<T>>>,
}

impl<'s, T: TermSet> Simulation<'s, T> {
    pub(crate) fn new(system: &'s ControlSystem<T>) -> Self {
        Self {
            system,
            inputs: Inputs::new(),
            outcome: None,
        }
    }

    pub fn input<I>(&mut self, var: Variable<I>, value: f64) -> Result<()> {
        self.set(var.0, value)
    }

    pub fn input_by_name(&mut self, name: &str, value: f64) -> Result<()> {
        let key = self
            .system
            .variables()
            .find(name)
            .ok_or_else(|| Error::UnknownVariable(name.to_owned()))?;

        self.set(key, value)
    }

    fn set(&mut self, key: VariableKey, value: f64) -> Result<()> {
        if self.outcome.is_some() {
            return Err(Error::SessionComputed);
        }

        let var = self
            .system
            .variables()
            .get(key)
            .ok_or_else(|| Error::UnknownVariable(format!("{key:?}")))?;

        if key == self.system.output_key() {
            return Err(Error::NotAnInput(var.name().to_owned()));
        }

        var.check_range(value)?;
        self.inputs.0.insert(key, value);

        Ok(())
    }

    fn first_missing(&self) -> Option<VariableKey> {
        self.system
            .input_keys()
            .iter()
            .copied()
            .find(|key| !self.inputs.0.contains_key(key))
    }

    pub fn state(&self) -> SessionState {
        if self.outcome.is_some() {
            SessionState::Computed
        } else if self.first_missing().is_none() {
            SessionState::Ready
        } else if self.inputs.is_empty() {
            SessionState::Empty
        } else {
            SessionState::PartiallyFilled
        }
    }

    /// Runs the inference once every required input is set. Further calls
    /// return the stored outcome without recomputing.
    pub fn compute(&mut self) -> Result<f64> {
        self.run().map(Outputs::crisp)
    }

    /// Like [`Simulation::compute`], returning the full inference result.
    pub fn compute_outputs(&mut self) -> Result<Outputs<T>> {
        self.run().cloned()
    }

    fn run(&mut self) -> Result<&Outputs<T>> {
        if self.outcome.is_none() {
            if let Some(key) = self.first_missing() {
                let name = self.system.variables().0[key].name().to_owned();

                return Err(Error::MissingInput(name));
            }
        }

        let (system, inputs) = (self.system, &self.inputs);

        self.outcome
            .get_or_insert_with(|| system.infer(inputs))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// The crisp output, once computed successfully.
    pub fn output(&self) -> Option<f64> {
        self.outputs().map(Outputs::crisp)
    }

    pub fn outputs(&self) -> Option<&Outputs<T>> {
        self.outcome.as_ref().and_then(|outcome| outcome.as_ref().ok())
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::Triangular;
    use crate::rules::Rules;
    use crate::terms::{Key, Terms};
    use crate::variable::Variables;

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Level {
        Low,
        High,
    }

    fn system() -> (ControlSystem<Level>, Variable<Level>, Variable<Level>, Variable<Level>) {
        let mut vars = Variables::<Level>::new();
        let levels = |range| Terms::auto_partition(range, [Level::Low, Level::High]).unwrap();
        let x = vars.add("x", 0. ..=1., levels(0. ..=1.), None).unwrap();
        let y = vars.add("y", 0. ..=1., levels(0. ..=1.), None).unwrap();
        let out = vars.add("out", 0. ..=1., levels(0. ..=1.), None).unwrap();
        let mut rules = Rules::new();

        rules.add(x.is(Level::Low).and(y.is(Level::Low)), out.is(Level::Low)).unwrap();
        rules.add(x.is(Level::High).or(y.is(Level::High)), out.is(Level::High)).unwrap();

        (ControlSystem::new(vars, rules, out).unwrap(), x, y, out)
    }

    #[test]
    fn test_state_transitions() {
        let (system, x, y, _) = system();
        let mut sim = system.simulation();

        assert_eq!(sim.state(), SessionState::Empty);

        sim.input(x, 0.2).unwrap();

        assert_eq!(sim.state(), SessionState::PartiallyFilled);
        assert_eq!(sim.compute(), Err(Error::MissingInput("y".into())));
        assert_eq!(sim.state(), SessionState::PartiallyFilled);

        sim.input(y, 0.9).unwrap();

        assert_eq!(sim.state(), SessionState::Ready);

        let crisp = sim.compute().unwrap();

        assert_eq!(sim.state(), SessionState::Computed);
        assert_eq!(sim.output(), Some(crisp));
        assert_eq!(sim.compute(), Ok(crisp));
        assert_eq!(sim.input(x, 0.5), Err(Error::SessionComputed));
    }

    #[test]
    fn test_compute_on_empty_session() {
        let (system, _, _, _) = system();
        let mut sim = system.simulation();

        assert_eq!(sim.compute(), Err(Error::MissingInput("x".into())));
        assert_eq!(sim.state(), SessionState::Empty);
        assert_eq!(sim.output(), None);
    }

    #[test]
    fn test_no_rule_fired_is_stored() {
        let mut vars = Variables::<Level>::new();
        let mut low_only = Terms::new();

        low_only
            .insert(Level::Low, Triangular::new("Low", 0., 0.2, 0.4).unwrap())
            .unwrap();

        let x = vars.add("x", 0. ..=1., low_only, None).unwrap();
        let out = vars
            .add(
                "out",
                0. ..=1.,
                Terms::auto_partition(0. ..=1., [Level::Low, Level::High]).unwrap(),
                None,
            )
            .unwrap();
        let mut rules = Rules::new();

        rules.add(x.is(Level::Low), out.is(Level::Low)).unwrap();

        let system = ControlSystem::new(vars, rules, out).unwrap();
        let mut sim = system.simulation();

        sim.input(x, 0.8).unwrap();

        assert_eq!(sim.compute(), Err(Error::NoRuleFired("out".into())));
        assert_eq!(sim.state(), SessionState::Computed);
        assert_eq!(sim.compute(), Err(Error::NoRuleFired("out".into())));
        assert!(sim.compute_outputs().is_err());
        assert_eq!(sim.output(), None);
        assert_eq!(sim.input(x, 0.1), Err(Error::SessionComputed));
    }

    #[test]
    fn test_rejected_input_leaves_state() {
        let (system, x, _, out) = system();
        let mut sim = system.simulation();

        assert!(matches!(sim.input(x, 1.5), Err(Error::OutOfRangeInput { .. })));
        assert_eq!(sim.state(), SessionState::Empty);
        assert_eq!(sim.inputs().get(x), None);

        sim.input(x, 0.5).unwrap();

        assert!(sim.input(x, -0.1).is_err());
        assert_eq!(sim.inputs().get(x), Some(0.5));
        assert_eq!(sim.input(out, 0.5), Err(Error::NotAnInput("out".into())));
    }

    #[test]
    fn test_input_by_name() {
        let (system, _, _, _) = system();
        let mut sim = system.simulation();

        sim.input_by_name("x", 1.).unwrap();
        sim.input_by_name("y", 1.).unwrap();

        assert_eq!(sim.input_by_name("z", 1.), Err(Error::UnknownVariable("z".into())));
        assert!(sim.compute().unwrap() > 0.5);
        assert_eq!(sim.outputs().unwrap().firing_strengths(), &[0., 1.]);
    }
}
