//! Simplification rules for division.

use crate::symbolic::{
    expr::Expr,
    simplify::{rules::do_divide, step::Step},
    step_collector::StepCollector,
};

/// `a / b = c`, where `a` and `b` are numbers
///
/// Division by zero follows floating-point semantics, and folds to an infinity or `NaN`.
pub fn fold_div(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_divide(expr, |lhs, rhs| {
        Some(Expr::number(lhs.as_number()? / rhs.as_number()?))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::FoldDiv);
    Some(opt)
}

/// `a / 1 = a`
pub fn divide_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_divide(expr, |lhs, rhs| {
        if !lhs.is_numeral(1) && rhs.is_numeral(1) {
            Some((**lhs).clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::DivideOne);
    Some(opt)
}

/// Applies all division rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    fold_div(expr, step_collector)
        .or_else(|| divide_one(expr, step_collector))
}
