//! An expression paired with the names of the parameters it is a function of.

use std::fmt;
use super::expr::Expr;

/// A function of some parameters, written `x => body` or `(x, y) => body`.
///
/// Only the body is ever rewritten; the parameter list is fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    /// The names of the parameters.
    pub params: Vec<String>,

    /// The expression the function evaluates.
    pub body: Expr,
}

impl Lambda {
    /// Creates a new function of the given parameters.
    pub fn new(params: impl IntoIterator<Item = impl Into<String>>, body: Expr) -> Self {
        Self {
            params: params.into_iter().map(Into::into).collect(),
            body,
        }
    }

    /// Returns a function with the same parameters and the given body.
    pub fn with_body(&self, body: Expr) -> Self {
        Self { params: self.params.clone(), body }
    }

    /// Renders the parameter list and arrow that precede the body.
    fn header(&self) -> String {
        match self.params.as_slice() {
            [param] => format!("{} => ", param),
            params => format!("({}) => ", params.join(", ")),
        }
    }

    /// Returns the byte offset at which the body starts in the rendering of this function.
    pub fn body_offset(&self) -> usize {
        self.header().len()
    }
}

impl fmt::Display for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.header(), self.body)
    }
}
