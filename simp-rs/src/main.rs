use simp_compute::symbolic::{expr::Expr, Lambda, Simplifier};
use std::sync::Arc;

/// The number of passes to run when none is given.
const DEFAULT_PASSES: usize = 8;

/// Builds `x => x*3*x*4*x*2 + -(-x) + x*x + 1*x*5/x - sin(6)`.
fn sample() -> Lambda {
    let x = || Expr::symbol("x");

    // built from the variants directly, since the `-` operator would fold it
    let double_neg = Expr::Neg(Arc::new(Expr::Neg(Arc::new(x()))));

    let body = x() * 3.0 * x() * 4.0 * x() * 2.0
        + double_neg
        + x() * x()
        + Expr::number(1.0) * x() * 5.0 / x()
        - Expr::call("sin", [Expr::number(6.0)]);
    Lambda::new(["x"], body)
}

/// Reads the number of passes from the first argument, falling back to [`DEFAULT_PASSES`].
fn passes() -> usize {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "simp-rs".to_string());

    let Some(arg) = args.next() else {
        return DEFAULT_PASSES;
    };

    match arg.parse() {
        Ok(passes) => passes,
        Err(err) => {
            eprintln!("usage: {} [passes]", program);
            eprintln!("invalid pass count `{}` ({}), running {} passes", arg, err, DEFAULT_PASSES);
            DEFAULT_PASSES
        },
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let passes = passes();
    let lambda = sample();
    println!("{}", lambda);

    // the spans of an error index into the input of the failing pass
    let mut input = lambda.to_string();
    let result = Simplifier::default().iterate_lambda(&lambda, passes, |_, lambda| {
        input = lambda.to_string();
        println!("{}", input);
    });

    if let Err(err) = result {
        if let Err(io_err) = err.report_to_stderr("expr", &input) {
            log::error!("could not write error report: {}", io_err);
        }
    }
}
