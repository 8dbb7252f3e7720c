//! Implementation of the rewrite rules, one module per kind of node.
//!
//! Each rule in this module is a function that takes the node to rewrite as an argument, whose
//! children have already been rewritten, and returns `Some(expr)` with the replacement node if the
//! rule applies, or `None` if the rule does not apply. Within a module, rules are listed and tried
//! in priority order; the first rule that applies wins.

pub mod add;
pub mod divide;
pub mod multiply;
pub mod negate;
pub mod subtract;

use crate::symbolic::{expr::Expr, step_collector::StepCollector};
use std::sync::Arc;
use super::step::Step;

/// If the expression is a negation, calls the given transformation function with the operand.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_negate(expr: &Expr, f: impl Fn(&Arc<Expr>) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Neg(operand) = expr {
        f(operand)
    } else {
        None
    }
}

/// If the expression is an addition, calls the given transformation function with the left and
/// right-hand-side of the addition.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_add(expr: &Expr, f: impl Fn(&Arc<Expr>, &Arc<Expr>) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Add(lhs, rhs) = expr {
        f(lhs, rhs)
    } else {
        None
    }
}

/// If the expression is a subtraction, calls the given transformation function with the left and
/// right-hand-side of the subtraction.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_subtract(expr: &Expr, f: impl Fn(&Arc<Expr>, &Arc<Expr>) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Sub(lhs, rhs) = expr {
        f(lhs, rhs)
    } else {
        None
    }
}

/// If the expression is a multiplication, calls the given transformation function with the left
/// and right-hand-side of the multiplication.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_multiply(expr: &Expr, f: impl Fn(&Arc<Expr>, &Arc<Expr>) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Mul(lhs, rhs) = expr {
        f(lhs, rhs)
    } else {
        None
    }
}

/// If the expression is a division, calls the given transformation function with the left and
/// right-hand-side of the division.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_divide(expr: &Expr, f: impl Fn(&Arc<Expr>, &Arc<Expr>) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Div(lhs, rhs) = expr {
        f(lhs, rhs)
    } else {
        None
    }
}

/// Applies the rules for the kind of the given node.
///
/// Leaves and powers have no rules. Calls are folded by the engine itself, since folding a call
/// can fail.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    match expr {
        Expr::Primary(_) | Expr::Exp(..) => None,
        Expr::Neg(_) => negate::all(expr, step_collector),
        Expr::Add(..) => add::all(expr, step_collector),
        Expr::Sub(..) => subtract::all(expr, step_collector),
        Expr::Mul(..) => multiply::all(expr, step_collector),
        Expr::Div(..) => divide::all(expr, step_collector),
    }
}
