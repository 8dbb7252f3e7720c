//! Folding of function calls whose arguments are all numbers.

use crate::funcs::Funcs;
use simp_error::ErrorKind;
use std::cmp::Ordering;
use super::error::{MissingArgument, TooManyArguments, UndefinedFunction};

/// Evaluates the function with the given name on the given arguments.
///
/// Returns an error if the function is not in the table, or if the number of arguments does not
/// match the function's arity.
pub(crate) fn fold(funcs: &Funcs, name: &str, args: &[f64]) -> Result<f64, Box<dyn ErrorKind>> {
    let Some(func) = funcs.get(name) else {
        return Err(Box::new(UndefinedFunction {
            name: name.to_string(),
            suggestions: funcs.similar(name),
        }));
    };

    match args.len().cmp(&func.arity()) {
        Ordering::Greater => Err(Box::new(TooManyArguments {
            name: name.to_string(),
            expected: func.arity(),
            given: args.len(),
        })),
        Ordering::Less => Err(Box::new(MissingArgument {
            name: name.to_string(),
            expected: func.arity(),
            given: args.len(),
        })),
        Ordering::Equal => {
            let value = func.eval(args);
            log::trace!("folded {}({:?}) to {}", name, args, value);
            Ok(value)
        },
    }
}
