//! Simplification rules for addition.

use crate::symbolic::{
    expr::Expr,
    simplify::{rules::do_add, step::Step},
    step_collector::StepCollector,
};
use std::sync::Arc;

/// `a + b = c`, where `a` and `b` are numbers
pub fn fold_add(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |lhs, rhs| {
        Some(Expr::number(lhs.as_number()? + rhs.as_number()?))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::FoldAdd);
    Some(opt)
}

/// `a + a = 2 * a`
pub fn double_term(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |lhs, rhs| {
        // operands must be structurally equal
        if lhs == rhs {
            Some(Expr::Mul(Arc::new(Expr::number(2.0)), Arc::clone(lhs)))
        } else {
            None
        }
    })?;

    step_collector.push(Step::DoubleTerm);
    Some(opt)
}

/// Applies all addition rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    fold_add(expr, step_collector)
        .or_else(|| double_term(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn folds_numbers() {
        let expr = Expr::number(2.0) + 3.5;
        assert_eq!(all(&expr, &mut ()), Some(Expr::number(5.5)));
    }

    #[test]
    fn doubles_equal_terms() {
        let term = Expr::call("sin", [Expr::symbol("x")]);
        let expr = term.clone() + term.clone();
        let mut steps = Vec::new();
        assert_eq!(all(&expr, &mut steps), Some(Expr::number(2.0) * term));
        assert_eq!(steps, vec![Step::DoubleTerm]);
    }

    #[test]
    fn equal_numbers_fold_instead_of_doubling() {
        let expr = Expr::number(4.0) + 4.0;
        let mut steps = Vec::new();
        assert_eq!(all(&expr, &mut steps), Some(Expr::number(8.0)));
        assert_eq!(steps, vec![Step::FoldAdd]);
    }

    #[test]
    fn different_terms() {
        let expr = Expr::symbol("x") + Expr::symbol("y");
        assert_eq!(all(&expr, &mut ()), None);
    }
}
