//! Margin → probability transformation.

/// Numerically stable logistic sigmoid: `1 / (1 + exp(-x))`.
///
/// Clamps input to [-500, 500] to prevent overflow in `exp`.
/// NaN propagates.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    let clamped = x.clamp(-500.0, 500.0);
    if clamped >= 0.0 {
        1.0 / (1.0 + (-clamped).exp())
    } else {
        let e = clamped.exp();
        e / (1.0 + e)
    }
}
