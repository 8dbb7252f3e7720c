//! Exponential, logarithmic, and root functions.

build_unary! {
    "exp" Exp; f64::exp,
    "ln" Ln; f64::ln,
    "log10" Log10; f64::log10,
    "sqrt" Sqrt; f64::sqrt,
    "cbrt" Cbrt; f64::cbrt,
}

build_binary! {
    "pow" Pow; f64::powf,
}
