//! All built-in functions that calls can be folded with.
//!
//! Each function is implemented as a unit `struct` with an associated `eval_static` method. This
//! method can be used to evaluate the function in Rust code directly. The [`Builtin`] trait is also
//! implemented for each function, so the rewrite engine can look it up by name in a [`Funcs`]
//! table and evaluate it on the numbers extracted from a call's arguments.
//!
//! # Example
//!
//! ```
//! use simp_compute::builtin::Builtin;
//! use simp_compute::funcs::{trigonometry::Sin, Funcs};
//!
//! // evaluate sin(0) using `eval_static`
//! assert_eq!(Sin::eval_static(0.0), 0.0);
//!
//! // evaluate sin(0) through the default table
//! let funcs = Funcs::default();
//! let sin = funcs.get("sin").unwrap();
//! assert_eq!(sin.eval(&[0.0]), 0.0);
//! ```

#[macro_use]
mod helper;

pub mod miscellaneous;
pub mod power;
pub mod trigonometry;

use crate::builtin::Builtin;
use levenshtein::levenshtein;
use std::{collections::HashMap, sync::Arc};

/// Returns a list of all builtin functions, keyed by name.
pub fn all() -> HashMap<&'static str, Box<dyn Builtin>> {
    use miscellaneous::*;
    use power::*;
    use trigonometry::*;

    macro_rules! build {
        ($($upname:ident),* $(,)?) => {
            [
                $(
                    Box::new($upname) as Box<dyn Builtin>,
                )*
            ]
                .into_iter()
                .map(|func| (func.name(), func))
                .collect()
        };
    }

    build! {
        Sin, Cos, Tan, Asin, Acos, Atan, Atan2,
        Sinh, Cosh, Tanh,
        Exp, Ln, Log10, Sqrt, Cbrt, Pow,
        Abs, Min, Max, Hypot,
    }
}

/// The table of functions the rewrite engine folds calls with.
///
/// Identifiers are resolved against this table only when a call's arguments are all numbers.
#[derive(Debug, Clone)]
pub struct Funcs {
    funcs: HashMap<String, Arc<dyn Builtin>>,
}

impl Default for Funcs {
    /// Creates a table holding every function in [`all`].
    fn default() -> Self {
        Self {
            funcs: all()
                .into_iter()
                .map(|(name, func)| (name.to_string(), Arc::from(func)))
                .collect(),
        }
    }
}

impl Funcs {
    /// Creates a new empty table.
    ///
    /// With an empty table, every call with constant arguments fails to fold. Consider using the
    /// [`Default`] implementation instead.
    pub fn new() -> Self {
        Self { funcs: HashMap::new() }
    }

    /// Adds a function to the table, returning the function it replaces, if any.
    pub fn add(&mut self, func: impl Builtin + 'static) -> Option<Arc<dyn Builtin>> {
        self.funcs.insert(func.name().to_string(), Arc::new(func))
    }

    /// Get the function with the given name.
    pub fn get(&self, name: &str) -> Option<&dyn Builtin> {
        self.funcs.get(name).map(|func| &**func)
    }

    /// Returns true if the table contains no functions.
    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }

    /// Returns the names of all functions in the table, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names = self.funcs.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    /// Returns all functions in the table with a name similar to the given name, sorted.
    pub fn similar(&self, name: &str) -> Vec<String> {
        let mut similar = self.funcs
            .keys()
            .filter(|n| levenshtein(n, name) < 2)
            .cloned()
            .collect::<Vec<_>>();
        similar.sort_unstable();
        similar
    }
}
