//! Simplification rules for multiplication.

use crate::symbolic::{
    expr::Expr,
    simplify::{rules::do_multiply, step::Step},
    step_collector::StepCollector,
};
use std::sync::Arc;

/// `a * b = c`, where `a` and `b` are numbers
pub fn fold_mul(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |lhs, rhs| {
        Some(Expr::number(lhs.as_number()? * rhs.as_number()?))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::FoldMul);
    Some(opt)
}

/// `1 * a = a`
pub fn multiply_one_left(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |lhs, rhs| {
        if lhs.is_numeral(1) && !rhs.is_numeral(1) {
            Some((**rhs).clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::MultiplyOneLeft);
    Some(opt)
}

/// `a * 1 = a`
pub fn multiply_one_right(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |lhs, rhs| {
        if !lhs.is_numeral(1) && rhs.is_numeral(1) {
            Some((**lhs).clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::MultiplyOneRight);
    Some(opt)
}

/// `a * a = a^2`
pub fn square(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |lhs, rhs| {
        if lhs == rhs {
            Some(Expr::Exp(Arc::clone(lhs), Arc::new(Expr::number(2.0))))
        } else {
            None
        }
    })?;

    step_collector.push(Step::Square);
    Some(opt)
}

/// `a * (b * c) = (b * c) * a`, where `a` is a number or symbol
pub fn commute_leaf(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |lhs, rhs| {
        if (lhs.is_symbol() || lhs.is_number()) && rhs.is_mul() {
            Some(Expr::Mul(Arc::clone(rhs), Arc::clone(lhs)))
        } else {
            None
        }
    })?;

    step_collector.push(Step::CommuteLeaf);
    Some(opt)
}

/// `(x * a) * n = (n * a) * x`, and `(a * x) * n = (n * a) * x`, where `x` is a symbol and `n` is
/// a number
///
/// The symbol in the left-hand product is moved outermost, and the number is moved next to the
/// remaining factor. If neither factor of the left-hand product is a symbol, the rule does not
/// apply.
pub fn collect_coefficient(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |lhs, rhs| {
        if !rhs.is_number() {
            return None;
        }

        let (mul_lhs, mul_rhs) = lhs.as_mul()?;
        let (symbol, other) = if mul_lhs.is_symbol() {
            (mul_lhs, mul_rhs)
        } else if mul_rhs.is_symbol() {
            (mul_rhs, mul_lhs)
        } else {
            return None;
        };

        Some(Expr::Mul(
            Arc::new(Expr::Mul(Arc::clone(rhs), Arc::clone(other))),
            Arc::clone(symbol),
        ))
    })?;

    step_collector.push(Step::CollectCoefficient);
    Some(opt)
}

/// Applies all multiplication rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    fold_mul(expr, step_collector)
        .or_else(|| multiply_one_left(expr, step_collector))
        .or_else(|| multiply_one_right(expr, step_collector))
        .or_else(|| square(expr, step_collector))
        .or_else(|| commute_leaf(expr, step_collector))
        .or_else(|| collect_coefficient(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    fn y() -> Expr {
        Expr::symbol("y")
    }

    #[test]
    fn folds_numbers() {
        let expr = Expr::number(1.5) * 4.0;
        assert_eq!(all(&expr, &mut ()), Some(Expr::number(6.0)));
    }

    #[test]
    fn one_times_one_folds() {
        let expr = Expr::number(1.0) * 1.0;
        let mut steps = Vec::new();
        assert_eq!(all(&expr, &mut steps), Some(Expr::number(1.0)));
        assert_eq!(steps, vec![Step::FoldMul]);
    }

    #[test]
    fn removes_one() {
        let mut steps = Vec::new();
        assert_eq!(all(&(Expr::number(1.0) * y()), &mut steps), Some(y()));
        assert_eq!(all(&(y() * 1.0), &mut steps), Some(y()));
        assert_eq!(steps, vec![Step::MultiplyOneLeft, Step::MultiplyOneRight]);
    }

    #[test]
    fn squares_equal_factors() {
        let mut steps = Vec::new();
        assert_eq!(all(&(x() * x()), &mut steps), Some(x().pow(2.0)));

        let factor = x() + 1.0;
        assert_eq!(all(&(factor.clone() * factor.clone()), &mut steps), Some(factor.pow(2.0)));
        assert_eq!(steps, vec![Step::Square, Step::Square]);
    }

    #[test]
    fn nan_is_not_squared() {
        let expr = Expr::Mul(
            Arc::new(Expr::call("f", [Expr::number(f64::NAN)])),
            Arc::new(Expr::call("f", [Expr::number(f64::NAN)])),
        );
        assert_eq!(all(&expr, &mut ()), None);
    }

    #[test]
    fn moves_leaf_right() {
        let mut steps = Vec::new();
        assert_eq!(all(&(y() * (x() * 3.0)), &mut steps), Some(x() * 3.0 * y()));
        assert_eq!(all(&(Expr::number(2.0) * (x() * y())), &mut steps), Some(x() * y() * 2.0));
        assert_eq!(steps, vec![Step::CommuteLeaf, Step::CommuteLeaf]);
    }

    #[test]
    fn collects_coefficient() {
        let mut steps = Vec::new();

        // symbol on the left of the product
        let expr = x() * y().pow(2.0) * 4.0;
        assert_eq!(all(&expr, &mut steps), Some(Expr::number(4.0) * y().pow(2.0) * x()));

        // symbol on the right of the product
        let expr = x() * 3.0 * x() * 4.0;
        assert_eq!(all(&expr, &mut steps), Some(Expr::number(4.0) * (x() * 3.0) * x()));

        assert_eq!(steps, vec![Step::CollectCoefficient, Step::CollectCoefficient]);
    }

    #[test]
    fn no_symbol_to_collect() {
        let expr = Expr::call("sin", [x()]) * Expr::number(3.0).pow(x()) * 2.0;
        assert_eq!(all(&expr, &mut ()), None);
    }

    #[test]
    fn chain_without_coefficient() {
        let expr = x() * 3.0 * x();
        assert_eq!(all(&expr, &mut ()), None);
    }
}
