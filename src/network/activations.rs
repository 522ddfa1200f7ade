/// Layer values produced by one forward pass.
///
/// `input` is `a0`, `hidden` is `a1 = σ(W0·a0)`, `output` is `a2 = σ(W1·a1)`.
/// Backpropagation consumes the snapshot of the pass it follows, so a later
/// forward pass can never silently change what an update is computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Activations {
    pub input: Vec<f64>,
    pub hidden: Vec<f64>,
    pub output: Vec<f64>,
}
