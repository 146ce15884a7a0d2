use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::ops::{AndOp, OrOp};
use crate::terms::TermSet;
use crate::variable::{Variable, VariableKey};

/// A rule premise: `variable is term` propositions joined by AND / OR.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr<T> {
    Is(VariableKey, T),
    And(Vec<Expr<T>>),
    Or(Vec<Expr<T>>),
}

/// Fuzzified inputs: the degree of every (variable, term) pair.
pub(crate) type Degrees<T> = HashMap<(VariableKey, T), f64>;

impl<T> Expr<T> {
    /// Chained `and`s collapse into a single node.
    pub fn and(self, rhs: Expr<T>) -> Self {
        match self {
            Expr::And(mut exprs) => {
                exprs.push(rhs);
                Expr::And(exprs)
            }
            lhs => Expr::And(vec![lhs, rhs]),
        }
    }

    /// Chained `or`s collapse into a single node.
    pub fn or(self, rhs: Expr<T>) -> Self {
        match self {
            Expr::Or(mut exprs) => {
                exprs.push(rhs);
                Expr::Or(exprs)
            }
            lhs => Expr::Or(vec![lhs, rhs]),
        }
    }

    pub fn all(exprs: impl IntoIterator<Item = Expr<T>>) -> Self {
        Expr::And(exprs.into_iter().collect())
    }

    pub fn any(exprs: impl IntoIterator<Item = Expr<T>>) -> Self {
        Expr::Or(exprs.into_iter().collect())
    }

    pub fn propositions(&self) -> Vec<(&VariableKey, &T)> {
        let mut props = Vec::new();

        fn parse<'p, T>(expr: &'p Expr<T>, out: &mut Vec<(&'p VariableKey, &'p T)>) {
            match expr {
                Expr::Is(var_key, term) => out.push((var_key, term)),
                Expr::And(exprs) | Expr::Or(exprs) => {
                    for expr in exprs {
                        parse(expr, out);
                    }
                }
            }
        }

        parse(self, &mut props);

        props
    }
}

impl<T: TermSet> Expr<T> {
    /// Truth value of the expression. Every child is evaluated; AND folds
    /// with `and_op` and OR with `or_op`. An empty AND is true and an empty
    /// OR is false, the identities of min and max.
    pub(crate) fn eval(&self, degrees: &Degrees<T>, and_op: AndOp, or_op: OrOp) -> Result<f64> {
        match self {
            Expr::Is(var_key, term) => degrees
                .get(&(*var_key, *term))
                .copied()
                .ok_or_else(|| Error::UnknownTerm {
                    variable: format!("{var_key:?}"),
                    term: format!("{term:?}"),
                }),
            Expr::And(exprs) => exprs.iter().try_fold(1., |acc: f64, expr| -> Result<f64> {
                Ok(and_op.call(acc, expr.eval(degrees, and_op, or_op)?))
            }),
            Expr::Or(exprs) => exprs.iter().try_fold(0., |acc: f64, expr| -> Result<f64> {
                Ok(or_op.call(acc, expr.eval(degrees, and_op, or_op)?))
            }),
        }
    }
}

impl<I> Variable<I> {
    pub fn is<T>(self, rhs: I) -> Expr<T>
    where
        I: Into<T>,
    {
        Expr::Is(self.0, rhs.into())
    }
}
