//! General trigonometric and hyperbolic trigonometric functions. All angles are in radians.

build_unary! {
    "sin" Sin; f64::sin,
    "cos" Cos; f64::cos,
    "tan" Tan; f64::tan,
    "asin" Asin; f64::asin,
    "acos" Acos; f64::acos,
    "atan" Atan; f64::atan,
    "sinh" Sinh; f64::sinh,
    "cosh" Cosh; f64::cosh,
    "tanh" Tanh; f64::tanh,
}

build_binary! {
    "atan2" Atan2; f64::atan2,
}
