//! Expression trees over floating-point numbers, and an engine that rewrites them into smaller,
//! equivalent trees.
//!
//! The [`symbolic`] module holds the expression model and the rewrite engine. The [`funcs`] module
//! holds the native functions that function calls with constant arguments are folded with.
//!
//! ```
//! use simp_compute::symbolic::{expr::Expr, simplify::rewrite};
//!
//! let x = Expr::symbol("x");
//! let expr = x.clone() * 1.0 + Expr::number(2.0) * 3.0;
//! let rewritten = rewrite(&expr).unwrap();
//! assert_eq!(rewritten, x + 6.0);
//! ```

pub mod builtin;
pub mod funcs;
pub mod symbolic;
