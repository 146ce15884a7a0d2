use std::collections::HashSet;

use tracing::{debug, warn};

use crate::dsl::Degrees;
use crate::error::{Error, Result};
use crate::inputs::Inputs;
use crate::ops::{AndOp, DefuzzificationOp, OrOp};
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::session::Simulation;
use crate::terms::TermSet;
use crate::variable::{Variable, VariableConstraints, VariableKey, Variables};

/// A Mamdani style inference engine over one output variable.
///
/// Rules fire with the truth of their premise, rules sharing an output term
/// are combined by maximum, each output term is clipped at its activation
/// level and the union of the clipped terms is defuzzified.
///
/// A control system is immutable once built; [`ControlSystem::infer`] only
/// reads it, so one instance can be shared across threads.
pub struct ControlSystem<T> {
    vars: Variables<T>,
    rules: Rules<T>,
    output: VariableKey,
    inputs: Vec<VariableKey>,
    and_op: AndOp,
    or_op: OrOp,
    defuzz_op: DefuzzificationOp,
}

impl<T: TermSet> ControlSystem<T> {
    /// Validates the rule base against the registered variables. Every
    /// variable a premise mentions becomes a required input.
    pub fn new<O>(vars: Variables<T>, rules: Rules<T>, output: Variable<O>) -> Result<Self> {
        let output = output.0;
        let Some(output_var) = vars.get(output) else {
            return Err(Error::UnknownVariable("output".into()));
        };

        if rules.is_empty() {
            return Err(Error::EmptyRuleBase);
        }

        let mut referenced = HashSet::new();

        for (i, rule) in rules.iter().enumerate() {
            for (var_key, term) in rule.premise().propositions() {
                let var = vars.get(*var_key).ok_or(Error::UnregisteredVariable(i))?;

                if *var_key == output {
                    return Err(Error::NotAnInput(var.name().to_owned()));
                }

                check_term(var, *term)?;
                referenced.insert(*var_key);
            }

            let consequent = rule.consequent();

            if consequent.variable() != output {
                let found = vars
                    .get(consequent.variable())
                    .map(|var| var.name().to_owned())
                    .ok_or(Error::UnregisteredVariable(i))?;

                return Err(Error::OutputMismatch {
                    rule: i,
                    expected: output_var.name().to_owned(),
                    found,
                });
            }

            check_term(output_var, *consequent.term())?;
        }

        let inputs: Vec<_> = vars
            .iter()
            .map(|(key, _)| key)
            .filter(|key| referenced.contains(key))
            .collect();

        debug!(
            variables = vars.len(),
            inputs = inputs.len(),
            rules = rules.len(),
            output = output_var.name(),
            "control system ready"
        );

        Ok(Self {
            vars,
            rules,
            output,
            inputs,
            and_op: AndOp::default(),
            or_op: OrOp::default(),
            defuzz_op: DefuzzificationOp::default(),
        })
    }

    /// Defaults are min, max and centroid.
    pub fn with_ops(mut self, and_op: AndOp, or_op: OrOp, defuzz_op: DefuzzificationOp) -> Self {
        self.and_op = and_op;
        self.or_op = or_op;
        self.defuzz_op = defuzz_op;
        self
    }

    pub fn variables(&self) -> &Variables<T> {
        &self.vars
    }

    pub fn rules(&self) -> &Rules<T> {
        &self.rules
    }

    pub fn output(&self) -> &VariableConstraints<T> {
        &self.vars.0[self.output]
    }

    pub(crate) fn output_key(&self) -> VariableKey {
        self.output
    }

    /// Variables that must be set before an inference, in registration order.
    pub fn input_keys(&self) -> &[VariableKey] {
        &self.inputs
    }

    /// Starts a fresh, single use session against this system.
    pub fn simulation(&self) -> Simulation<'_, T> {
        Simulation::new(self)
    }

    /// Runs one inference. Fails if an input is missing or out of range,
    /// or if no rule fired strongly enough to give the output any area.
    pub fn infer(&self, inputs: &Inputs) -> Result<Outputs<T>> {
        // Fuzzificate facts
        let mut degrees = Degrees::new();

        for key in &self.inputs {
            let var = &self.vars.0[*key];
            let value = inputs
                .0
                .get(key)
                .copied()
                .ok_or_else(|| Error::MissingInput(var.name().to_owned()))?;

            var.check_range(value)?;

            for (term, degree) in var.fuzzify(value) {
                degrees.insert((*key, term), degree);
            }
        }

        // Fire rules
        let mut firing_strengths = Vec::with_capacity(self.rules.len());

        for (i, rule) in self.rules.iter().enumerate() {
            let strength = rule.premise().eval(&degrees, self.and_op, self.or_op)?;

            debug!(rule = rule.label().unwrap_or_default(), index = i, strength, "rule fired");
            firing_strengths.push(strength);
        }

        // Aggregate activation per output term
        let output = self.output();
        let activations: Vec<(T, f64)> = output
            .terms()
            .map(|term| {
                let level = self
                    .rules
                    .iter()
                    .zip(&firing_strengths)
                    .filter(|(rule, _)| *rule.consequent().term() == term)
                    .map(|(_, strength)| *strength)
                    .fold(0., f64::max);

                (term, level)
            })
            .collect();

        // Clip each term at its activation and take the union
        let aggregated: Vec<f64> = output
            .universe()
            .iter()
            .map(|&x| {
                activations
                    .iter()
                    .filter_map(|(term, level)| output.membership(*term).map(|tri| tri.degree(x).min(*level)))
                    .fold(0., f64::max)
            })
            .collect();

        // Defuzzificate
        let Some(crisp) = self.defuzz_op.call(output.universe(), &aggregated) else {
            warn!(output = output.name(), "no rule fired");

            return Err(Error::NoRuleFired(output.name().to_owned()));
        };

        debug!(output = output.name(), crisp, method = ?self.defuzz_op, "defuzzified");

        Ok(Outputs::new(crisp, firing_strengths, activations))
    }
}

fn check_term<T: TermSet>(var: &VariableConstraints<T>, term: T) -> Result<()> {
    match var.membership(term) {
        Some(_) => Ok(()),
        None => Err(Error::UnknownTerm {
            variable: var.name().to_owned(),
            term: format!("{term:?}"),
        }),
    }
}
