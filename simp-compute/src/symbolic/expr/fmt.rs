//! Infix rendering of expressions.
//!
//! Parentheses are only emitted where precedence and associativity require them, so `a - (b - c)`
//! and `a - b - c`, which are different trees, render differently.

use std::{fmt, ops::Range};
use super::{Expr, Primary};

/// The binding strength of an expression when it is rendered, from loosest to tightest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// `+` and `-`.
    Term,

    /// `*` and `/`.
    Factor,

    /// Unary `-`, including negative numbers.
    Unary,

    /// `^`.
    Exp,

    /// Numbers, symbols, and calls.
    Primary,
}

impl Expr {
    /// Returns the precedence of the expression.
    pub fn precedence(&self) -> Precedence {
        match self {
            // renders with a leading `-`
            Self::Primary(Primary::Number(num)) if num.is_sign_negative() && !num.is_nan() => {
                Precedence::Unary
            },
            Self::Primary(_) => Precedence::Primary,
            Self::Neg(_) => Precedence::Unary,
            Self::Add(..) | Self::Sub(..) => Precedence::Term,
            Self::Mul(..) | Self::Div(..) => Precedence::Factor,
            Self::Exp(..) => Precedence::Exp,
        }
    }

    /// Renders the expression, and returns the rendering along with the byte range the node at the
    /// given path occupies in it.
    ///
    /// A path is a list of child indices leading from this node down to the target node (see
    /// [`Expr::children`] for how children are numbered). The empty path is this node. If the path
    /// does not lead to a node, the range covers the whole rendering.
    pub fn span_of(&self, path: &[usize]) -> (String, Range<usize>) {
        let mut renderer = Renderer::default();
        renderer.render(self, Some(path));
        let span = renderer.span.unwrap_or(0..renderer.out.len());
        (renderer.out, span)
    }
}

/// Narrows a path to the given child, if the path leads through that child.
fn narrow(target: Option<&[usize]>, index: usize) -> Option<&[usize]> {
    match target? {
        [head, rest @ ..] if *head == index => Some(rest),
        _ => None,
    }
}

/// Renders expressions into a string, recording the span of a target node along the way.
#[derive(Default)]
struct Renderer {
    out: String,
    span: Option<Range<usize>>,
}

impl Renderer {
    fn render(&mut self, expr: &Expr, target: Option<&[usize]>) {
        let start = self.out.len();
        match expr {
            Expr::Primary(primary) => self.render_primary(primary, target),
            Expr::Neg(operand) => {
                self.out.push('-');
                // `--x` and `--1` would read as something else
                let paren = operand.precedence() <= Precedence::Unary;
                self.render_operand(operand, paren, narrow(target, 0));
            },
            Expr::Add(lhs, rhs) => self.render_binary(" + ", lhs, rhs, Precedence::Term, target),
            Expr::Sub(lhs, rhs) => self.render_binary(" - ", lhs, rhs, Precedence::Term, target),
            Expr::Mul(lhs, rhs) => self.render_binary(" * ", lhs, rhs, Precedence::Factor, target),
            Expr::Div(lhs, rhs) => self.render_binary(" / ", lhs, rhs, Precedence::Factor, target),
            Expr::Exp(base, exp) => {
                // right-associative
                self.render_operand(base, base.precedence() <= Precedence::Exp, narrow(target, 0));
                self.out.push('^');
                self.render_operand(exp, exp.precedence() < Precedence::Exp, narrow(target, 1));
            },
        }

        if matches!(target, Some([])) {
            self.span = Some(start..self.out.len());
        }
    }

    fn render_primary(&mut self, primary: &Primary, target: Option<&[usize]>) {
        match primary {
            Primary::Number(num) => self.out.push_str(&num.to_string()),
            Primary::Symbol(sym) => self.out.push_str(sym),
            Primary::Call(name, args) => {
                self.out.push_str(name);
                self.out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.render(arg, narrow(target, i));
                }
                self.out.push(')');
            },
        }
    }

    /// Renders a left-associative binary operator.
    fn render_binary(
        &mut self,
        op: &str,
        lhs: &Expr,
        rhs: &Expr,
        precedence: Precedence,
        target: Option<&[usize]>,
    ) {
        self.render_operand(lhs, lhs.precedence() < precedence, narrow(target, 0));
        self.out.push_str(op);
        self.render_operand(rhs, rhs.precedence() <= precedence, narrow(target, 1));
    }

    fn render_operand(&mut self, expr: &Expr, paren: bool, target: Option<&[usize]>) {
        if paren {
            self.out.push('(');
            self.render(expr, target);
            self.out.push(')');
        } else {
            self.render(expr, target);
        }
    }
}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut renderer = Renderer::default();
        renderer.render_primary(self, None);
        f.write_str(&renderer.out)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut renderer = Renderer::default();
        renderer.render(self, None);
        f.write_str(&renderer.out)
    }
}
