//! Single-number design figure of merit.

use pj_model::PerformanceResult;

struct Term {
    weight: f64,
    reference: f64,
}

const THRUST: Term = Term { weight: 0.25, reference: 100.0 };
const ISP: Term = Term { weight: 0.20, reference: 150.0 };
const EFFICIENCY: Term = Term { weight: 0.20, reference: 25.0 };
const FREQUENCY_WEIGHT: f64 = 0.15;
const THRUST_TO_WEIGHT: Term = Term { weight: 0.10, reference: 3.0 };
const POWER: Term = Term { weight: 0.10, reference: 10.0 };

/// Preferred operating band [Hz] and the fall-off distance outside it.
const FREQUENCY_BAND: (f64, f64) = (80.0, 120.0);
const FREQUENCY_FALLOFF: f64 = 50.0;

fn capped(term: &Term, value: f64) -> f64 {
    term.weight * (value / term.reference).clamp(0.0, 1.0)
}

fn frequency_score(f: f64) -> f64 {
    let (lo, hi) = FREQUENCY_BAND;
    let distance = if f < lo {
        lo - f
    } else if f > hi {
        f - hi
    } else {
        0.0
    };
    (1.0 - distance / FREQUENCY_FALLOFF).max(0.0)
}

/// Weighted 0-100 score; saturates smoothly as the weighted sum approaches 1.
pub fn design_score(r: &PerformanceResult) -> f64 {
    if r.is_failed() {
        return 0.0;
    }
    let total = capped(&THRUST, r.thrust)
        + capped(&ISP, r.specific_impulse)
        + capped(&EFFICIENCY, r.thermal_efficiency)
        + FREQUENCY_WEIGHT * frequency_score(r.frequency)
        + capped(&THRUST_TO_WEIGHT, r.thrust_to_weight_ratio)
        + capped(&POWER, r.power);
    let score = 100.0 * (1.0 - (-2.3 * total).exp());
    if score.is_finite() { score.clamp(0.0, 100.0) } else { 0.0 }
}
