//! Simplification rules for negations.

use crate::symbolic::{
    expr::Expr,
    simplify::{rules::do_negate, step::Step},
    step_collector::StepCollector,
};

/// `-(-a) = a`
///
/// The `-` operator already folds this when building a tree, but a tree built directly from
/// [`Expr::Neg`] nodes can still contain one.
pub fn double_negation(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_negate(expr, |operand| match &**operand {
        Expr::Neg(inner) => Some((**inner).clone()),
        _ => None,
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::DoubleNegation);
    Some(opt)
}

/// Applies all negation rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    double_negation(expr, step_collector)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use super::*;

    #[test]
    fn removes_double_negation() {
        let x = Expr::symbol("x");
        let expr = Expr::Neg(Arc::new(Expr::Neg(Arc::new(x.clone()))));
        let mut steps = Vec::new();
        assert_eq!(all(&expr, &mut steps), Some(x));
        assert_eq!(steps, vec![Step::DoubleNegation]);
    }

    #[test]
    fn keeps_single_negation() {
        let expr = -Expr::symbol("x");
        assert_eq!(all(&expr, &mut ()), None);
    }
}
