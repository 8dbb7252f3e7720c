//! The [`Builtin`] trait, implemented by every native function a call can be folded with.

/// A trait implemented by all builtin functions.
///
/// Builtins must be pure: the same arguments always produce the same result, and evaluating a
/// builtin has no side effects. The rewrite engine relies on this to replace a call with constant
/// arguments by its result.
pub trait Builtin: std::fmt::Debug + Send + Sync {
    /// Returns the name of the function.
    // NOTE: this is a `&self` method and not an associated constant to make the trait object-safe
    fn name(&self) -> &'static str;

    /// Returns the number of arguments the function takes.
    fn arity(&self) -> usize;

    /// Evaluates the function.
    ///
    /// The caller must pass exactly [`Builtin::arity`] arguments.
    fn eval(&self, args: &[f64]) -> f64;
}
