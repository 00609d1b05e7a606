//! Static design trade-off reference.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TradeOff {
    pub parameter: &'static str,
    pub increase_benefits: &'static [&'static str],
    pub increase_drawbacks: &'static [&'static str],
    pub optimal_range: &'static str,
}

const TRADE_OFFS: [TradeOff; 4] = [
    TradeOff {
        parameter: "Exhaust Length",
        increase_benefits: &[
            "Lower operating frequency",
            "Better resonance tuning potential",
            "Improved expansion efficiency",
        ],
        increase_drawbacks: &[
            "Increased weight and complexity",
            "Higher heat transfer losses",
            "More difficult mounting and integration",
        ],
        optimal_range: "2-4 times chamber diameter",
    },
    TradeOff {
        parameter: "Chamber Diameter",
        increase_benefits: &[
            "Higher thrust potential",
            "Better combustion volume",
            "Improved mixing characteristics",
        ],
        increase_drawbacks: &[
            "Increased weight",
            "Higher fuel consumption",
            "Larger frontal area",
        ],
        optimal_range: "L/D ratio of 2.5-4.5",
    },
    TradeOff {
        parameter: "Valve Area",
        increase_benefits: &[
            "Better engine breathing",
            "Higher mass flow potential",
            "Improved performance at high frequencies",
        ],
        increase_drawbacks: &[
            "Structural complexity",
            "Potential for valve flutter",
            "Reduced pressure rise",
        ],
        optimal_range: "80-150% of intake area",
    },
    TradeOff {
        parameter: "Air-Fuel Ratio",
        increase_benefits: &[
            "Better fuel economy",
            "Cleaner combustion",
            "Lower emissions",
        ],
        increase_drawbacks: &[
            "Reduced power output",
            "Potential for misfire",
            "Incomplete combustion",
        ],
        optimal_range: "Near stoichiometric ratio",
    },
];

pub fn trade_offs() -> &'static [TradeOff] {
    &TRADE_OFFS
}
