//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Expressions are represented as a binary tree of [`Expr`] nodes (see the [`mod@expr`] module).
//! Unlike a flattened sum-of-products form, the tree keeps exactly the shape it was built with, so
//! `x * 3 * x` is a product whose left factor is `x * 3`.
//!
//! # Rewriting
//!
//! The [`simplify`] module rewrites a tree into an equivalent tree by applying algebraic
//! identities: folding arithmetic on constants and calls with constant arguments, eliminating
//! identities such as `x - 0` and `1 * x`, and collecting repeated terms and factors.
//!
//! A single call to [`rewrite()`] performs **one** bottom-up pass over the tree. Rules only look at
//! a node and its already-rewritten children, so some opportunities only become visible to a later
//! pass. [`Simplifier::iterate`] runs a fixed number of passes, feeding each result into the next.
//!
//! ```
//! use simp_compute::symbolic::{expr::Expr, rewrite};
//!
//! let x = Expr::symbol("x");
//! let expr = x.clone() * x.clone() + (Expr::number(2.0) - 0.0);
//! let rewritten = rewrite(&expr).unwrap();
//! assert_eq!(rewritten.to_string(), "x^2 + 2");
//! ```
//!
//! For more information, see the [`mod@simplify`] module.

pub mod expr;
pub mod lambda;
pub mod simplify;
pub mod step_collector;

pub use expr::Expr;
pub use lambda::Lambda;
pub use simplify::{rewrite, rewrite_with_steps, Simplifier};
pub use step_collector::StepCollector;
