//! Simplification rules for subtraction.

use crate::symbolic::{
    expr::Expr,
    simplify::{rules::do_subtract, step::Step},
    step_collector::StepCollector,
};

/// `a - b = c`, where `a` and `b` are numbers
pub fn fold_sub(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_subtract(expr, |lhs, rhs| {
        Some(Expr::number(lhs.as_number()? - rhs.as_number()?))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::FoldSub);
    Some(opt)
}

/// `a - 0 = a`
pub fn subtract_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_subtract(expr, |lhs, rhs| {
        if !lhs.is_numeral(0) && rhs.is_numeral(0) {
            Some((**lhs).clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::SubtractZero);
    Some(opt)
}

/// Applies all subtraction rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    fold_sub(expr, step_collector)
        .or_else(|| subtract_zero(expr, step_collector))
}
