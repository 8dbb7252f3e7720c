/// Possible rewrite steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `-(-a) = a`
    DoubleNegation,

    /// `2 + 3 = 5`
    FoldAdd,

    /// `a + a = 2 * a`
    DoubleTerm,

    /// `5 - 3 = 2`
    FoldSub,

    /// `a - 0 = a`
    SubtractZero,

    /// `2 * 3 = 6`
    FoldMul,

    /// `1 * a = a`
    MultiplyOneLeft,

    /// `a * 1 = a`
    MultiplyOneRight,

    /// `a * a = a^2`
    Square,

    /// `x * (a * b) = (a * b) * x`
    /// `2 * (a * b) = (a * b) * 2`
    CommuteLeaf,

    /// `(x * a) * 2 = (2 * a) * x`
    /// `(a * x) * 2 = (2 * a) * x`
    CollectCoefficient,

    /// `6 / 3 = 2`
    FoldDiv,

    /// `a / 1 = a`
    DivideOne,

    /// `sin(0) = 0`, or any other call whose arguments are all numbers
    FoldCall,
}
