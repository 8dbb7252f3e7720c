//! Miscellaneous functions.

build_unary! {
    "abs" Abs; f64::abs,
}

build_binary! {
    "min" Min; f64::min,
    "max" Max; f64::max,
    "hypot" Hypot; f64::hypot,
}
