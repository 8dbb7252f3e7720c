//! The expression tree that the rewrite engine operates on.
//!
//! An [`Expr`] is an immutable tree. Leaves are [`Primary`] values (numbers, symbols, and function
//! calls), and interior nodes are the arithmetic operators. Interior nodes hold their children
//! behind an [`Arc`], so rewriting a tree can move an already-rewritten subtree into a new parent
//! without copying it, and whole trees can be shared between threads.
//!
//! # Construction
//!
//! Trees are built with [`Expr::number`], [`Expr::symbol`], [`Expr::call`], [`Expr::pow`], and the
//! arithmetic operators from [`std::ops`]. None of these simplify anything, with one exception:
//! negating a [`Expr::Neg`] returns its operand instead of wrapping it again.
//!
//! ```
//! use simp_compute::symbolic::expr::Expr;
//!
//! let x = Expr::symbol("x");
//! let expr = x.clone() * 3.0 + -(-x.clone());
//! assert_eq!(expr.to_string(), "x * 3 + x");
//! ```
//!
//! # Structural equality
//!
//! The [`PartialEq`] implementation for [`Expr`] compares trees **structurally**: two trees are
//! equal if they are the same kind of node, with equal payloads, and with equal children in the
//! same order. Where the nodes were allocated plays no part, so two separately built `x` symbols
//! are equal.
//!
//! Numbers are compared with `==`. This means a [`Primary::Number`] holding `NaN` is never equal
//! to anything, itself included, so rewrite rules that look for two equal operands never fire on
//! it.

mod fmt;
mod iter;

pub use fmt::Precedence;
pub use iter::ExprIter;

use once_cell::sync::Lazy;
use std::{ops::{Add, Div, Mul, Neg, Sub}, sync::Arc};

/// A leaf of the expression tree: a number, a variable, or a function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// A floating-point number, such as `2` or `0.5`. `NaN` and the infinities are carried as-is.
    Number(f64),

    /// A variable, such as `x` or `y`. Two symbols are the same variable if their names are equal.
    Symbol(String),

    /// A call to a named function, such as `sin(x)` or `atan2(y, x)`.
    Call(String, Vec<Expr>),
}

/// An arithmetic expression over floating-point numbers.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A single number, variable, or function call.
    Primary(Primary),

    /// The negation of an expression.
    Neg(Arc<Expr>),

    /// The sum of two expressions.
    Add(Arc<Expr>, Arc<Expr>),

    /// The difference of two expressions.
    Sub(Arc<Expr>, Arc<Expr>),

    /// The product of two expressions.
    Mul(Arc<Expr>, Arc<Expr>),

    /// The quotient of two expressions.
    Div(Arc<Expr>, Arc<Expr>),

    /// An expression raised to a power.
    Exp(Arc<Expr>, Arc<Expr>),
}

impl Expr {
    /// Creates a number.
    pub fn number(value: f64) -> Self {
        Self::Primary(Primary::Number(value))
    }

    /// Creates a variable with the given name.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates a call to the function with the given name.
    pub fn call(name: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Self {
        Self::Primary(Primary::Call(name.into(), args.into_iter().collect()))
    }

    /// Raises this expression to the given power. No simplification is done.
    pub fn pow(self, exp: impl Into<Expr>) -> Self {
        Self::Exp(Arc::new(self), Arc::new(exp.into()))
    }

    /// Returns true if the expression is a [`Primary::Number`].
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Primary(Primary::Number(_)))
    }

    /// Returns true if the expression is a [`Primary::Symbol`].
    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Primary(Primary::Symbol(_)))
    }

    /// Returns true if the expression is an [`Expr::Mul`].
    pub fn is_mul(&self) -> bool {
        matches!(self, Self::Mul(..))
    }

    /// If the expression is a [`Primary::Number`], returns the contained number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Primary(Primary::Number(num)) => Some(*num),
            _ => None,
        }
    }

    /// Returns the contained number of a [`Primary::Number`].
    ///
    /// # Panics
    ///
    /// Panics if the expression is not a [`Primary::Number`]. Check with [`Expr::is_number`] or
    /// use [`Expr::as_number`] first.
    pub fn number_value(&self) -> f64 {
        match self {
            Self::Primary(Primary::Number(num)) => *num,
            other => panic!("expression is not a number: found {}", other.kind_name()),
        }
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to its name.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// If the expression is an [`Expr::Mul`], returns references to its two factors.
    pub fn as_mul(&self) -> Option<(&Arc<Expr>, &Arc<Expr>)> {
        match self {
            Self::Mul(lhs, rhs) => Some((lhs, rhs)),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Number`] equal to `num`.
    ///
    /// The comparison is exact floating-point `==`, so `-0.0` is the numeral `0`, and `NaN` is no
    /// numeral at all.
    pub fn is_numeral(&self, num: i32) -> bool {
        self.as_number() == Some(f64::from(num))
    }

    /// Returns the name of this kind of node, for use in messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Primary(Primary::Number(_)) => "number",
            Self::Primary(Primary::Symbol(_)) => "symbol",
            Self::Primary(Primary::Call(..)) => "call",
            Self::Neg(_) => "negation",
            Self::Add(..) => "addition",
            Self::Sub(..) => "subtraction",
            Self::Mul(..) => "multiplication",
            Self::Div(..) => "division",
            Self::Exp(..) => "power",
        }
    }

    /// Returns the direct children of this node, from left to right.
    ///
    /// The operand of a negation is child `0`. The left-hand side, or base, of a binary operator
    /// is child `0`, and the right-hand side, or exponent, is child `1`. The arguments of a call
    /// are numbered in order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Self::Primary(Primary::Call(_, args)) => args.iter().collect(),
            Self::Primary(_) => Vec::new(),
            Self::Neg(operand) => vec![&**operand],
            Self::Add(lhs, rhs)
                | Self::Sub(lhs, rhs)
                | Self::Mul(lhs, rhs)
                | Self::Div(lhs, rhs)
                | Self::Exp(lhs, rhs) => vec![&**lhs, &**rhs],
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns the number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.post_order_iter().count()
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

impl From<Primary> for Expr {
    fn from(primary: Primary) -> Self {
        Self::Primary(primary)
    }
}

/// Implements a binary operator that wraps both operands in the given [`Expr`] variant. No
/// simplification is done.
macro_rules! impl_binary_op {
    ($($trait:ident $method:ident => $variant:ident),* $(,)?) => {
        $(
            impl<T: Into<Expr>> $trait<T> for Expr {
                type Output = Expr;

                fn $method(self, rhs: T) -> Self::Output {
                    Expr::$variant(Arc::new(self), Arc::new(rhs.into()))
                }
            }
        )*
    };
}

impl_binary_op! {
    Add add => Add,
    Sub sub => Sub,
    Mul mul => Mul,
    Div div => Div,
}

/// Negates this expression. If the expression is already an [`Expr::Neg`], its operand is returned
/// instead.
impl Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        if let Self::Neg(operand) = &self {
            return (**operand).clone();
        }
        Self::Neg(Arc::new(self))
    }
}

/// Stands in for the children that [`Expr`]'s [`Drop`] implementation has moved out of a node.
static DETACHED: Lazy<Arc<Expr>> = Lazy::new(|| Arc::new(Expr::number(0.0)));

impl Expr {
    /// Moves the children that are owned only by this node onto the given stack, leaving
    /// placeholders behind. Numbers and symbols are left in place.
    fn detach_children(&mut self, stack: &mut Vec<Arc<Expr>>) {
        fn detach(child: &mut Arc<Expr>, stack: &mut Vec<Arc<Expr>>) {
            if child.is_number() || child.is_symbol() {
                return;
            }
            if Arc::get_mut(child).is_some() {
                stack.push(std::mem::replace(child, Arc::clone(&DETACHED)));
            }
        }

        match self {
            Self::Primary(Primary::Call(_, args)) => {
                let args = std::mem::take(args);
                stack.extend(
                    args.into_iter()
                        .filter(|arg| !arg.is_number() && !arg.is_symbol())
                        .map(Arc::new),
                );
            },
            Self::Primary(_) => (),
            Self::Neg(operand) => detach(operand, stack),
            Self::Add(lhs, rhs)
                | Self::Sub(lhs, rhs)
                | Self::Mul(lhs, rhs)
                | Self::Div(lhs, rhs)
                | Self::Exp(lhs, rhs) => {
                    detach(lhs, stack);
                    detach(rhs, stack);
                },
        }
    }
}

/// Drops the tree iteratively, so that dropping a deep tree does not overflow the stack.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.detach_children(&mut stack);
        while let Some(mut child) = stack.pop() {
            if let Some(expr) = Arc::get_mut(&mut child) {
                expr.detach_children(&mut stack);
            }
        }
    }
}
