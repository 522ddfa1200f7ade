use std::f64::consts::E;

/// Logistic function `1 / (1 + e^-x)`; maps any real into `(0, 1)`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Derivative of the logistic function written in terms of its output `y`,
/// i.e. `σ'(x) = y (1 - y)` where `y = σ(x)`.
///
/// Backprop only ever has the post-activation values on hand, so this is the
/// form the network uses.
pub fn sigmoid_derivative(y: f64) -> f64 {
    y * (1.0 - y)
}
