//! Qualitative design feedback from fixed thresholds.

use pj_core::GeometrySpec;
use pj_model::PerformanceResult;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionCategory {
    LdRatio,
    Frequency,
    AreaRatio,
    Efficiency,
    ThrustToWeight,
    SpecificImpulse,
}

impl SuggestionCategory {
    pub fn key(&self) -> &'static str {
        match self {
            SuggestionCategory::LdRatio => "ld_ratio",
            SuggestionCategory::Frequency => "frequency",
            SuggestionCategory::AreaRatio => "area_ratio",
            SuggestionCategory::Efficiency => "efficiency",
            SuggestionCategory::ThrustToWeight => "thrust_to_weight",
            SuggestionCategory::SpecificImpulse => "specific_impulse",
        }
    }
}

impl fmt::Display for SuggestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Feedback keyed by category. Metrics in a neutral band produce no entry.
pub fn suggestions(
    geometry: &GeometrySpec,
    result: &PerformanceResult,
) -> BTreeMap<SuggestionCategory, String> {
    use SuggestionCategory as C;
    let mut out = BTreeMap::new();

    let ld = geometry.length_to_diameter_ratio();
    let msg = if ld < 2.0 {
        format!(
            "L/D ratio is low ({ld:.1}). Consider increasing chamber length for better combustion completeness."
        )
    } else if ld > 5.0 {
        format!("L/D ratio is high ({ld:.1}). This may cause excessive heat transfer losses and weight.")
    } else {
        format!("L/D ratio ({ld:.1}) is in good range for pulse jets.")
    };
    out.insert(C::LdRatio, msg);

    let f = result.frequency;
    if f < 30.0 {
        out.insert(
            C::Frequency,
            "Low operating frequency may reduce power density. Consider shortening exhaust length."
                .to_string(),
        );
    } else if f > 250.0 {
        out.insert(
            C::Frequency,
            "High operating frequency may cause structural stress and wear. Consider lengthening exhaust."
                .to_string(),
        );
    } else if (50.0..=150.0).contains(&f) {
        out.insert(
            C::Frequency,
            format!("Operating frequency ({f:.0} Hz) is in optimal range."),
        );
    }

    let ar = geometry.area_ratio();
    if ar < 1.0 {
        out.insert(
            C::AreaRatio,
            "Exhaust area smaller than intake - this may restrict flow and reduce performance."
                .to_string(),
        );
    } else if ar > 3.0 {
        out.insert(
            C::AreaRatio,
            "Very large exhaust/intake area ratio may affect resonance tuning.".to_string(),
        );
    } else if (1.2..=2.5).contains(&ar) {
        out.insert(C::AreaRatio, format!("Area ratio ({ar:.2}) is well-balanced."));
    }

    let eta = result.thermal_efficiency;
    if eta < 10.0 {
        out.insert(
            C::Efficiency,
            "Low thermal efficiency. Consider optimizing combustion chamber geometry and air-fuel mixing."
                .to_string(),
        );
    } else if eta > 35.0 {
        out.insert(C::Efficiency, format!("Excellent thermal efficiency ({eta:.1}%)!"));
    } else if (15.0..=25.0).contains(&eta) {
        out.insert(
            C::Efficiency,
            format!("Thermal efficiency ({eta:.1}%) is typical for pulse jets."),
        );
    }

    let tw = result.thrust_to_weight_ratio;
    if tw < 2.0 {
        out.insert(
            C::ThrustToWeight,
            "Low thrust-to-weight ratio. Consider increasing chamber diameter or optimizing valve area."
                .to_string(),
        );
    } else if tw > 8.0 {
        out.insert(
            C::ThrustToWeight,
            format!("Excellent thrust-to-weight ratio ({tw:.1})!"),
        );
    }

    let isp = result.specific_impulse;
    if isp < 80.0 {
        out.insert(
            C::SpecificImpulse,
            "Low specific impulse indicates poor fuel efficiency. Optimize air-fuel ratio and combustion."
                .to_string(),
        );
    } else if isp > 200.0 {
        out.insert(
            C::SpecificImpulse,
            format!("Outstanding specific impulse ({isp:.0} s)!"),
        );
    }

    out
}
