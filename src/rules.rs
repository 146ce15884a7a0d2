use crate::dsl::Expr;
use crate::error::{Error, Result};
use crate::variable::VariableKey;

#[derive(Default)]
pub struct Rules<T>(pub(crate) Vec<Rule<T>>);

impl<T> Rules<T> {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    /// The consequence must be a single `output.is(term)` proposition.
    pub fn add(&mut self, premise: Expr<T>, consequence: Expr<T>) -> Result<()> {
        let consequent = Consequent::try_from(consequence)?;

        self.0.push(Rule {
            premise,
            consequent,
            label: None,
        });

        Ok(())
    }

    /// Like [`Rules::add`], with a label used in logs.
    pub fn add_labeled(&mut self, label: &str, premise: Expr<T>, consequence: Expr<T>) -> Result<()> {
        self.add(premise, consequence)?;

        if let Some(rule) = self.0.last_mut() {
            rule.label = Some(label.to_owned());
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule<T>> {
        self.0.iter()
    }
}

pub struct Rule<T> {
    pub(crate) premise: Expr<T>,
    pub(crate) consequent: Consequent<T>,
    pub(crate) label: Option<String>,
}

impl<T> Rule<T> {
    pub fn premise(&self) -> &Expr<T> {
        &self.premise
    }

    pub fn consequent(&self) -> &Consequent<T> {
        &self.consequent
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// The output term a rule activates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Consequent<T> {
    pub(crate) var: VariableKey,
    pub(crate) term: T,
}

impl<T> Consequent<T> {
    pub fn variable(&self) -> VariableKey {
        self.var
    }

    pub fn term(&self) -> &T {
        &self.term
    }
}

impl<T> TryFrom<Expr<T>> for Consequent<T> {
    type Error = Error;

    fn try_from(expr: Expr<T>) -> Result<Self> {
        match expr {
            Expr::Is(var, term) => Ok(Consequent { var, term }),
            Expr::And(_) | Expr::Or(_) => Err(Error::InvalidConsequent),
        }
    }
}

#[test]
fn test_consequent_must_be_single_proposition() {
    use slotmap::SlotMap;

    let mut keys = SlotMap::<VariableKey, ()>::with_key();
    let (x, y) = (keys.insert(()), keys.insert(()));
    let mut rules = Rules::new();

    assert!(rules.add(Expr::Is(x, 0u8), Expr::Is(y, 1)).is_ok());
    assert_eq!(
        rules.add(Expr::Is(x, 0), Expr::Is(y, 1).and(Expr::Is(y, 2))),
        Err(Error::InvalidConsequent)
    );
    assert!(rules.add_labeled("low", Expr::Is(x, 1), Expr::Is(y, 0)).is_ok());
    assert_eq!(rules.len(), 2);
    assert_eq!(rules.0[1].label(), Some("low"));
    assert_eq!(rules.0[0].consequent().term(), &1);
}
