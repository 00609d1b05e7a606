use crate::PjError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PjError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PjError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, PjError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(PjError::NonPositive { what, value: v })
    }
}

/// Ratio that degrades to zero instead of dividing by a non-positive denominator.
#[inline]
pub fn ratio_or_zero(num: Real, den: Real) -> Real {
    if den > 0.0 { num / den } else { 0.0 }
}
