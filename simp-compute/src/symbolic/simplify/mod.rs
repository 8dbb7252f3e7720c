//! The rewrite engine.
//!
//! A [`Simplifier`] rewrites an expression tree in a single bottom-up pass. Every node's children
//! are rewritten first, then the node is rebuilt from the rewritten children, and finally the
//! rules for that kind of node (see the [`rules`] module) are tried on the rebuilt node in priority
//! order. The first rule that applies replaces the node; if none apply, the rebuilt node is kept.
//!
//! The replacement produced by a rule is **not** rewritten again in the same pass. Run more passes
//! with [`Simplifier::iterate`] to pick up opportunities that a rule exposes.
//!
//! Calls whose arguments all rewrite to numbers are folded into a single number by evaluating the
//! function with the same name in the simplifier's [`Funcs`] table. This is the only way a pass can
//! fail: if the function is not in the table, or is given the wrong number of arguments, the pass
//! is aborted with an [`Error`] whose span points at the call in the rendering of the input tree.
//!
//! # Example
//!
//! ```
//! use simp_compute::symbolic::{expr::Expr, simplify::{step::Step, Simplifier}};
//!
//! let x = Expr::symbol("x");
//! let expr = Expr::number(1.0) * x.clone() + Expr::call("cos", [Expr::number(0.0)]);
//!
//! let simplifier = Simplifier::default();
//! let (rewritten, steps) = simplifier.rewrite_with_steps(&expr).unwrap();
//! assert_eq!(rewritten, x + 1.0);
//! assert_eq!(steps, vec![Step::MultiplyOneLeft, Step::FoldCall]);
//! ```

mod call;
pub mod error;
pub mod rules;
pub mod step;

use crate::funcs::Funcs;
use once_cell::sync::Lazy;
use simp_error::Error;
use std::sync::Arc;
use super::{
    expr::{Expr, Primary},
    lambda::Lambda,
    step_collector::StepCollector,
};
use step::Step;

/// Rewrites expression trees, folding calls with the functions in its table.
#[derive(Debug, Clone, Default)]
pub struct Simplifier {
    funcs: Funcs,
}

impl Simplifier {
    /// Creates a simplifier that folds calls with the given table of functions.
    pub fn new(funcs: Funcs) -> Self {
        Self { funcs }
    }

    /// Returns the table of functions calls are folded with.
    pub fn funcs(&self) -> &Funcs {
        &self.funcs
    }

    /// Returns a mutable reference to the table of functions calls are folded with.
    pub fn funcs_mut(&mut self) -> &mut Funcs {
        &mut self.funcs
    }

    /// Performs a single rewrite pass over the expression.
    pub fn rewrite(&self, expr: &Expr) -> Result<Expr, Error> {
        self.rewrite_with(expr, &mut ())
    }

    /// Performs a single rewrite pass over the expression, pushing every rule that was applied to
    /// the given collector.
    pub fn rewrite_with(
        &self,
        expr: &Expr,
        step_collector: &mut dyn StepCollector<Step>,
    ) -> Result<Expr, Error> {
        Pass {
            funcs: &self.funcs,
            root: expr,
            path: Vec::new(),
            step_collector,
        }.run()
    }

    /// Performs a single rewrite pass over the expression, returning the rewritten expression and
    /// the rules that were applied, in the order they were applied.
    pub fn rewrite_with_steps(&self, expr: &Expr) -> Result<(Expr, Vec<Step>), Error> {
        let mut steps = Vec::new();
        let rewritten = self.rewrite_with(expr, &mut steps)?;
        Ok((rewritten, steps))
    }

    /// Performs a single rewrite pass over the body of the function.
    ///
    /// The spans of a returned error index into the rendering of the whole function, parameters
    /// included.
    pub fn rewrite_lambda(&self, lambda: &Lambda) -> Result<Lambda, Error> {
        self.rewrite(&lambda.body)
            .map(|body| lambda.with_body(body))
            .map_err(|err| shift_spans(err, lambda.body_offset()))
    }

    /// Performs exactly `passes` rewrite passes, feeding the output of each pass into the next.
    ///
    /// After each pass, `on_pass` is called with the number of the pass (starting at 1) and the
    /// expression that pass produced. There is no early exit when a pass leaves the expression
    /// unchanged.
    pub fn iterate(
        &self,
        expr: &Expr,
        passes: usize,
        mut on_pass: impl FnMut(usize, &Expr),
    ) -> Result<Expr, Error> {
        let mut current = expr.clone();
        for pass in 1..=passes {
            current = self.rewrite(&current)?;
            log::debug!("pass {}: {} nodes", pass, current.node_count());
            on_pass(pass, &current);
        }
        Ok(current)
    }

    /// Performs exactly `passes` rewrite passes over the body of the function.
    ///
    /// See [`Simplifier::iterate`] and [`Simplifier::rewrite_lambda`].
    pub fn iterate_lambda(
        &self,
        lambda: &Lambda,
        passes: usize,
        mut on_pass: impl FnMut(usize, &Lambda),
    ) -> Result<Lambda, Error> {
        let mut current = lambda.clone();
        for pass in 1..=passes {
            current = self.rewrite_lambda(&current)?;
            log::debug!("pass {}: {} nodes", pass, current.body.node_count());
            on_pass(pass, &current);
        }
        Ok(current)
    }
}

/// Moves the spans of an error right by `offset` bytes.
fn shift_spans(mut err: Error, offset: usize) -> Error {
    for span in &mut err.spans {
        *span = span.start + offset..span.end + offset;
    }
    err
}

/// The state of a single rewrite pass.
///
/// The pass walks the tree with an explicit stack instead of recursing, so the depth of the tree
/// is limited only by memory.
struct Pass<'a> {
    /// The table calls are folded with.
    funcs: &'a Funcs,

    /// The tree the pass started from.
    root: &'a Expr,

    /// The child indices leading from the root to the node being rewritten.
    path: Vec<usize>,

    step_collector: &'a mut dyn StepCollector<Step>,
}

/// A unit of work on the stack of a [`Pass`].
enum Frame<'e> {
    /// The node has not been visited yet. `shared` is the [`Arc`] the node is held in, if any, and
    /// `index` is its position among its parent's children (`None` for the root).
    Enter {
        expr: &'e Expr,
        shared: Option<&'e Arc<Expr>>,
        index: Option<usize>,
    },

    /// Every child of the node has been rewritten, and the results are on top of the output stack.
    Exit {
        expr: &'e Expr,
        nested: bool,
    },
}

/// Returns the children of a node, each paired with the [`Arc`] it is held in, if any.
fn operands(expr: &Expr) -> Vec<(&Expr, Option<&Arc<Expr>>)> {
    match expr {
        Expr::Primary(Primary::Call(_, args)) => args.iter().map(|arg| (arg, None)).collect(),
        Expr::Primary(_) => Vec::new(),
        Expr::Neg(operand) => vec![(&**operand, Some(operand))],
        Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Exp(lhs, rhs) => vec![(&**lhs, Some(lhs)), (&**rhs, Some(rhs))],
    }
}

impl Pass<'_> {
    fn run(&mut self) -> Result<Expr, Error> {
        let mut frames = vec![Frame::Enter { expr: self.root, shared: None, index: None }];
        let mut done: Vec<Arc<Expr>> = Vec::new();

        while let Some(frame) = frames.pop() {
            match frame {
                Frame::Enter { expr, shared, index } => {
                    // numbers and symbols have no rules
                    if matches!(expr, Expr::Primary(Primary::Number(_) | Primary::Symbol(_))) {
                        done.push(shared.map_or_else(|| Arc::new(expr.clone()), Arc::clone));
                        continue;
                    }

                    if let Some(index) = index {
                        self.path.push(index);
                    }
                    frames.push(Frame::Exit { expr, nested: index.is_some() });

                    let children = operands(expr);
                    for (index, (child, shared)) in children.into_iter().enumerate().rev() {
                        frames.push(Frame::Enter { expr: child, shared, index: Some(index) });
                    }
                },
                Frame::Exit { expr, nested } => {
                    let children = done.split_off(done.len() - operands(expr).len());
                    let rewritten = self.exit(expr, children)?;
                    if nested {
                        self.path.pop();
                    }
                    done.push(Arc::new(rewritten));
                },
            }
        }

        // the rewritten root is the only tree left
        Ok(done.pop().map_or_else(|| self.root.clone(), Arc::unwrap_or_clone))
    }

    /// Rebuilds a node from its rewritten children, then applies the rules for its kind.
    fn exit(&mut self, expr: &Expr, children: Vec<Arc<Expr>>) -> Result<Expr, Error> {
        if let Expr::Primary(Primary::Call(name, _)) = expr {
            let args = children.into_iter().map(Arc::unwrap_or_clone).collect();
            return self.fold_call(name, args);
        }

        let rebuilt = match (expr, children.as_slice()) {
            (Expr::Neg(_), [operand]) => Expr::Neg(Arc::clone(operand)),
            (Expr::Add(..), [lhs, rhs]) => Expr::Add(Arc::clone(lhs), Arc::clone(rhs)),
            (Expr::Sub(..), [lhs, rhs]) => Expr::Sub(Arc::clone(lhs), Arc::clone(rhs)),
            (Expr::Mul(..), [lhs, rhs]) => Expr::Mul(Arc::clone(lhs), Arc::clone(rhs)),
            (Expr::Div(..), [lhs, rhs]) => Expr::Div(Arc::clone(lhs), Arc::clone(rhs)),
            (Expr::Exp(..), [lhs, rhs]) => Expr::Exp(Arc::clone(lhs), Arc::clone(rhs)),
            _ => return Ok(expr.clone()),
        };

        Ok(rules::all(&rebuilt, self.step_collector).unwrap_or(rebuilt))
    }

    fn fold_call(&mut self, name: &str, args: Vec<Expr>) -> Result<Expr, Error> {
        let values = args.iter().map(Expr::as_number).collect::<Option<Vec<_>>>();
        let Some(values) = values else {
            return Ok(Expr::call(name, args));
        };

        match call::fold(self.funcs, name, &values) {
            Ok(value) => {
                self.step_collector.push(Step::FoldCall);
                Ok(Expr::number(value))
            },
            Err(kind) => {
                let (_, span) = self.root.span_of(&self.path);
                Err(Error { spans: vec![span], kind })
            },
        }
    }
}

/// The simplifier used by the free functions in this module, with the default function table.
static DEFAULT: Lazy<Simplifier> = Lazy::new(Simplifier::default);

/// Performs a single rewrite pass over the expression, folding calls with the default function
/// table.
///
/// See [`Simplifier::rewrite`].
pub fn rewrite(expr: &Expr) -> Result<Expr, Error> {
    DEFAULT.rewrite(expr)
}

/// Performs a single rewrite pass over the expression with the default function table, returning
/// the rewritten expression and the rules that were applied.
///
/// See [`Simplifier::rewrite_with_steps`].
pub fn rewrite_with_steps(expr: &Expr) -> Result<(Expr, Vec<Step>), Error> {
    DEFAULT.rewrite_with_steps(expr)
}

#[cfg(test)]
mod tests {
    use crate::builtin::Builtin;
    use pretty_assertions::assert_eq;
    use std::thread;
    use super::*;
    use super::error::{MissingArgument, TooManyArguments, UndefinedFunction};

    fn x() -> Expr {
        Expr::symbol("x")
    }

    fn y() -> Expr {
        Expr::symbol("y")
    }

    fn num(value: f64) -> Expr {
        Expr::number(value)
    }

    fn bits(expr: &Expr) -> Option<u64> {
        expr.as_number().map(f64::to_bits)
    }

    #[test]
    fn constant_folding_is_exact() {
        let pairs = [
            (0.1, 0.2),
            (1e308, 1e308),
            (-0.0, 0.0),
            (3.0, 7.0),
            (f64::INFINITY, 2.5),
            (1.0 / 3.0, 3.0),
        ];

        for (a, b) in pairs {
            let sum = rewrite(&(num(a) + b)).unwrap();
            let difference = rewrite(&(num(a) - b)).unwrap();
            let product = rewrite(&(num(a) * b)).unwrap();
            let quotient = rewrite(&(num(a) / b)).unwrap();
            assert_eq!(bits(&sum), Some((a + b).to_bits()));
            assert_eq!(bits(&difference), Some((a - b).to_bits()));
            assert_eq!(bits(&product), Some((a * b).to_bits()));
            assert_eq!(bits(&quotient), Some((a / b).to_bits()));
        }
    }

    #[test]
    fn one_over_zero() {
        assert_eq!(rewrite(&(num(1.0) / 0.0)).unwrap(), num(f64::INFINITY));
    }

    #[test]
    fn double_negation() {
        let expr = Expr::Neg(Arc::new(Expr::Neg(Arc::new(x()))));
        assert_eq!(rewrite(&expr).unwrap(), x());
    }

    #[test]
    fn additive_doubling_of_shared_subtree() {
        let shared = Arc::new(x());
        let expr = Expr::Add(Arc::clone(&shared), Arc::clone(&shared));
        assert_eq!(rewrite(&expr).unwrap(), num(2.0) * x());
    }

    #[test]
    fn additive_doubling_of_separate_subtrees() {
        let expr = Expr::symbol("x") + Expr::symbol("x");
        assert_eq!(rewrite(&expr).unwrap(), num(2.0) * x());
    }

    #[test]
    fn squaring() {
        assert_eq!(rewrite(&(x() * x())).unwrap(), x().pow(2.0));
    }

    #[test]
    fn squaring_of_shared_subtree() {
        let shared = Arc::new(x());
        let expr = Expr::Mul(Arc::clone(&shared), Arc::clone(&shared));
        assert_eq!(rewrite(&expr).unwrap(), x().pow(2.0));

        let shared = Arc::new(x() + 1.0);
        let expr = Expr::Mul(Arc::clone(&shared), Arc::clone(&shared));
        let (rewritten, steps) = rewrite_with_steps(&expr).unwrap();
        assert_eq!(rewritten, (x() + 1.0).pow(2.0));
        assert_eq!(steps, vec![Step::Square]);
    }

    #[test]
    fn identity_eliminations() {
        assert_eq!(rewrite(&(x() - 0.0)).unwrap(), x());
        assert_eq!(rewrite(&(num(1.0) * y())).unwrap(), y());
        assert_eq!(rewrite(&(x() / 1.0)).unwrap(), x());
    }

    #[test]
    fn rules_see_rewritten_children() {
        // `3 - 3` folds to `0` before the subtraction above it is examined
        let expr = x() - (num(3.0) - 3.0);
        assert_eq!(rewrite(&expr).unwrap(), x());

        // both sides become `x`, and are doubled in the same pass
        let expr = (x() * 1.0) + (num(1.0) * x());
        assert_eq!(rewrite(&expr).unwrap(), num(2.0) * x());
    }

    #[test]
    fn rules_see_children_rewritten_in_the_same_pass() {
        // `1 * x` becomes `x`, so the product above it is squared right away
        let expr = (num(1.0) * x()) * x();
        assert_eq!(rewrite(&expr).unwrap(), x().pow(2.0));
    }

    #[test]
    fn rule_output_is_not_rewritten_again() {
        // the reordered product could collect its coefficient, but only in the next pass
        let expr = num(2.0) * (x() * 3.0);
        let (once, steps) = rewrite_with_steps(&expr).unwrap();
        assert_eq!(once, x() * 3.0 * 2.0);
        assert_eq!(steps, vec![Step::CommuteLeaf]);

        let (twice, steps) = rewrite_with_steps(&once).unwrap();
        assert_eq!(twice, num(2.0) * 3.0 * x());
        assert_eq!(steps, vec![Step::CollectCoefficient]);

        assert_eq!(rewrite(&twice).unwrap(), num(6.0) * x());
    }

    #[test]
    fn deep_chain() {
        let mut expr = num(0.0);
        for _ in 0..100_000 {
            expr = expr + 1.0;
        }
        assert_eq!(rewrite(&expr).unwrap(), num(100_000.0));

        let mut expr = x();
        for _ in 0..100_000 {
            expr = expr * 1.0;
        }
        assert_eq!(rewrite(&expr).unwrap(), x());

        let mut expr = x();
        for _ in 0..100_000 {
            expr = Expr::call("f", [expr]);
        }
        assert_eq!(rewrite(&expr).unwrap().node_count(), 100_001);
    }

    #[test]
    fn power_has_no_rules() {
        let expr = x().pow(num(1.0) + 1.0);
        assert_eq!(rewrite(&expr).unwrap(), x().pow(2.0));
        assert_eq!(rewrite(&num(2.0).pow(3.0)).unwrap(), num(2.0).pow(3.0));
    }

    #[test]
    fn call_folding() {
        let expr = Expr::call("sin", [num(0.0)]);
        assert_eq!(rewrite(&expr).unwrap(), num(0.0));

        let expr = Expr::call("sin", [x()]);
        assert_eq!(rewrite(&expr).unwrap(), expr);

        let expr = Expr::call("atan2", [num(1.0) + 1.0, num(2.0) * 1.0]);
        assert_eq!(rewrite(&expr).unwrap(), num(2f64.atan2(2.0)));
    }

    #[test]
    fn call_arguments_are_rewritten() {
        let expr = Expr::call("f", [x() - 0.0, num(2.0) * 3.0]);
        assert_eq!(rewrite(&expr).unwrap(), Expr::call("f", [x(), num(6.0)]));
    }

    #[test]
    fn unknown_function_with_symbolic_argument() {
        let expr = Expr::call("sine", [x()]);
        assert_eq!(rewrite(&expr).unwrap(), expr);
    }

    #[test]
    fn unknown_function() {
        let expr = x() + Expr::call("sine", [num(0.0)]);
        let err = rewrite(&expr).unwrap_err();
        assert_eq!(err.spans, vec![4..11]);
        assert_eq!(err.downcast_kind::<UndefinedFunction>(), Some(&UndefinedFunction {
            name: "sine".to_string(),
            suggestions: vec!["sin".to_string(), "sinh".to_string()],
        }));
    }

    #[test]
    fn wrong_argument_count() {
        let err = rewrite(&Expr::call("atan2", [num(1.0)])).unwrap_err();
        assert_eq!(err.spans, vec![0..8]);
        assert_eq!(err.downcast_kind::<MissingArgument>(), Some(&MissingArgument {
            name: "atan2".to_string(),
            expected: 2,
            given: 1,
        }));

        let expr = x() * Expr::call("sin", [num(1.0), num(2.0)]);
        let err = rewrite(&expr).unwrap_err();
        assert_eq!(err.spans, vec![4..13]);
        assert_eq!(err.downcast_kind::<TooManyArguments>(), Some(&TooManyArguments {
            name: "sin".to_string(),
            expected: 1,
            given: 2,
        }));
    }

    #[test]
    fn error_report() {
        let expr = x() + Expr::call("sine", [num(0.0)]);
        let err = rewrite(&expr).unwrap_err();

        let mut buf = Vec::new();
        err.write_report("expr", &expr.to_string(), &mut buf).unwrap();
        let report = String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap();
        assert!(report.contains("the `sine` function does not exist"));
        assert!(report.contains("this function call"));
        assert!(report.contains("did you mean one of these functions? `sin`, `sinh`"));
    }

    #[test]
    fn custom_function_table() {
        #[derive(Debug)]
        struct Half;

        impl Builtin for Half {
            fn name(&self) -> &'static str {
                "half"
            }

            fn arity(&self) -> usize {
                1
            }

            fn eval(&self, args: &[f64]) -> f64 {
                args[0] / 2.0
            }
        }

        let mut simplifier = Simplifier::new(Funcs::new());
        assert!(simplifier.rewrite(&Expr::call("sin", [num(0.0)])).is_err());

        simplifier.funcs_mut().add(Half);
        assert_eq!(simplifier.rewrite(&Expr::call("half", [num(5.0)])).unwrap(), num(2.5));
        assert_eq!(simplifier.funcs().names(), vec!["half"]);
    }

    #[test]
    fn nan_is_never_matched() {
        let expr = x() - f64::NAN;
        assert_eq!(rewrite(&expr).unwrap().to_string(), "x - NaN");

        let expr = x() / f64::NAN;
        assert_eq!(rewrite(&expr).unwrap().to_string(), "x / NaN");

        let nan = Arc::new(Expr::call("f", [x(), num(f64::NAN)]));
        let expr = Expr::Add(Arc::clone(&nan), Arc::clone(&nan));
        let (_, steps) = rewrite_with_steps(&expr).unwrap();
        assert!(steps.is_empty());
    }

    #[test]
    fn steps_in_post_order() {
        let double_neg = Expr::Neg(Arc::new(Expr::Neg(Arc::new(x()))));
        let expr = double_neg + (num(1.0) * y()) - (num(2.0) + 3.0);
        let (rewritten, steps) = rewrite_with_steps(&expr).unwrap();
        assert_eq!(rewritten, x() + y() - 5.0);
        assert_eq!(steps, vec![Step::DoubleNegation, Step::MultiplyOneLeft, Step::FoldAdd]);
    }

    #[test]
    fn counting_steps() {
        let mut count = 0usize;
        let expr = (x() * 1.0) / 1.0 - 0.0;
        let rewritten = Simplifier::default().rewrite_with(&expr, &mut count).unwrap();
        assert_eq!(rewritten, x());
        assert_eq!(count, 3);
    }

    #[test]
    fn deterministic() {
        let expr = x() * 3.0 * x() * 4.0 + Expr::call("cos", [num(1.0)]);
        assert_eq!(rewrite(&expr).unwrap(), rewrite(&expr).unwrap());
    }

    #[test]
    fn concurrent_rewrites() {
        let expr = Arc::new(x() * 3.0 * x() * 4.0 * x() * 2.0 + x() * x());
        let expected = rewrite(&expr).unwrap();

        thread::scope(|s| {
            let handles = (0..4)
                .map(|_| s.spawn(|| rewrite(&expr).unwrap()))
                .collect::<Vec<_>>();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn iterate_runs_every_pass() {
        let mut seen = Vec::new();
        let result = Simplifier::default()
            .iterate(&(x() * x()), 3, |pass, expr| seen.push((pass, expr.to_string())))
            .unwrap();
        assert_eq!(result, x().pow(2.0));
        assert_eq!(seen, vec![
            (1, "x^2".to_string()),
            (2, "x^2".to_string()),
            (3, "x^2".to_string()),
        ]);
    }

    #[test]
    fn iterate_zero_passes() {
        let expr = x() * 1.0;
        let result = Simplifier::default().iterate(&expr, 0, |_, _| panic!("no passes")).unwrap();
        assert_eq!(result, expr);
    }

    #[test]
    fn lambda_body_is_rewritten() {
        let lambda = Lambda::new(["x"], x() * 1.0 + 0.0);
        let rewritten = Simplifier::default().rewrite_lambda(&lambda).unwrap();
        assert_eq!(rewritten.params, vec!["x".to_string()]);
        assert_eq!(rewritten.to_string(), "x => x + 0");
    }

    #[test]
    fn lambda_error_spans_include_params() {
        let lambda = Lambda::new(["x"], x() + Expr::call("sine", [num(0.0)]));
        let err = Simplifier::default().rewrite_lambda(&lambda).unwrap_err();
        assert_eq!(err.spans, vec![9..16]);
        assert_eq!(&lambda.to_string()[9..16], "sine(0)");
    }

    #[test]
    fn iterate_lambda_stops_at_error() {
        let lambda = Lambda::new(["x"], Expr::call("nope", [num(1.0) + 1.0]));
        let mut passes = 0;
        let err = Simplifier::default()
            .iterate_lambda(&lambda, 8, |_, _| passes += 1)
            .unwrap_err();
        assert_eq!(passes, 0);
        assert!(err.downcast_kind::<UndefinedFunction>().is_some());
    }
}
