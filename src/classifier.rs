// Copyright © 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Scenario classification -- decision feedback for a simulated what-if.
//!
//! Rules form a strict priority list: several conditions can hold at once,
//! and the first match wins.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ScenarioVerdict
// ---------------------------------------------------------------------------

/// Qualitative label attached to every simulated scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScenarioVerdict {
    /// Price raised while still expecting more volume; demand is capped by price.
    ContradictoryStrategy,
    /// Price raised and net revenue fell.
    HighRisk,
    /// Price cut stimulated enough volume to lift revenue.
    GoodScenario,
    /// Revenue fell under the chosen adjustment.
    Suboptimal,
    /// Neutral-or-positive outcome with no contradiction.
    Viable,
}

/// How the presentation layer should render a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Warning,
    Error,
}

impl ScenarioVerdict {
    pub const ALL: [ScenarioVerdict; 5] = [
        Self::ContradictoryStrategy,
        Self::HighRisk,
        Self::GoodScenario,
        Self::Suboptimal,
        Self::Viable,
    ];

    /// Stable wire label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ContradictoryStrategy => "CONTRADICTORY_STRATEGY",
            Self::HighRisk => "HIGH_RISK",
            Self::GoodScenario => "GOOD_SCENARIO",
            Self::Suboptimal => "SUBOPTIMAL",
            Self::Viable => "VIABLE",
        }
    }

    /// User-facing guidance for this verdict.
    pub fn message(&self) -> &'static str {
        match self {
            Self::ContradictoryStrategy => {
                "Strategic contradiction: raising price while expecting higher volume. Demand is capped by price."
            }
            Self::HighRisk => "High risk: the price increase suppresses demand and revenue declines.",
            Self::GoodScenario => "Good scenario: the price cut stimulates demand and revenue grows.",
            Self::Suboptimal => "Suboptimal scenario: revenue falls below the baseline forecast.",
            Self::Viable => "Viable scenario under current market conditions.",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::ContradictoryStrategy | Self::Suboptimal => Tone::Warning,
            Self::HighRisk => Tone::Error,
            Self::GoodScenario | Self::Viable => Tone::Success,
        }
    }

    /// Parse a wire label produced by [`label`](Self::label).
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.label() == label)
    }
}

impl fmt::Display for ScenarioVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// classify
// ---------------------------------------------------------------------------

/// Classify a scenario from its two adjustments and the simulated percent change.
///
/// Total over all inputs. The contradiction check runs before the risk check,
/// so `(+price, +qty, -revenue)` is `ContradictoryStrategy`, not `HighRisk`.
pub fn classify(
    price_change_pct: Decimal,
    quantity_change_pct: Decimal,
    percent_change: Decimal,
) -> ScenarioVerdict {
    let price_up = price_change_pct > Decimal::ZERO;
    let price_down = price_change_pct < Decimal::ZERO;

    if price_up && quantity_change_pct > Decimal::ZERO {
        ScenarioVerdict::ContradictoryStrategy
    } else if price_up && percent_change < Decimal::ZERO {
        ScenarioVerdict::HighRisk
    } else if price_down && percent_change > Decimal::ZERO {
        ScenarioVerdict::GoodScenario
    } else if percent_change < Decimal::ZERO {
        ScenarioVerdict::Suboptimal
    } else {
        ScenarioVerdict::Viable
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn contradiction_takes_priority_over_risk() {
        assert_eq!(
            classify(dec!(10), dec!(10), dec!(-5)),
            ScenarioVerdict::ContradictoryStrategy
        );
    }

    #[test]
    fn contradiction_regardless_of_outcome() {
        assert_eq!(
            classify(dec!(5), dec!(20), dec!(12)),
            ScenarioVerdict::ContradictoryStrategy
        );
    }

    #[test]
    fn price_rise_with_revenue_loss_is_high_risk() {
        assert_eq!(classify(dec!(20), dec!(0), dec!(-1)), ScenarioVerdict::HighRisk);
        assert_eq!(classify(dec!(20), dec!(-10), dec!(-3)), ScenarioVerdict::HighRisk);
    }

    #[test]
    fn price_cut_with_revenue_gain_is_good() {
        assert_eq!(classify(dec!(-10), dec!(15), dec!(3.2)), ScenarioVerdict::GoodScenario);
    }

    #[test]
    fn price_rise_without_loss_is_viable() {
        assert_eq!(classify(dec!(50), dec!(0), dec!(5.0)), ScenarioVerdict::Viable);
    }

    #[test]
    fn price_cut_with_loss_is_suboptimal() {
        assert_eq!(classify(dec!(-20), dec!(20), dec!(-10.4)), ScenarioVerdict::Suboptimal);
    }

    #[test]
    fn unchanged_price_with_loss_is_suboptimal() {
        assert_eq!(classify(dec!(0), dec!(-10), dec!(-10)), ScenarioVerdict::Suboptimal);
    }

    #[test]
    fn neutral_scenario_is_viable() {
        assert_eq!(classify(dec!(0), dec!(0), dec!(0)), ScenarioVerdict::Viable);
        assert_eq!(classify(dec!(-10), dec!(0), dec!(0)), ScenarioVerdict::Viable);
    }

    #[test]
    fn labels_round_trip_and_are_unique() {
        for v in ScenarioVerdict::ALL {
            assert_eq!(ScenarioVerdict::from_label(v.label()), Some(v));
            assert!(!v.message().is_empty(), "{v:?} message must not be empty");
        }
        assert_eq!(ScenarioVerdict::from_label("MAYBE"), None);
    }

    #[test]
    fn tones_follow_dashboard_boxes() {
        assert_eq!(ScenarioVerdict::ContradictoryStrategy.tone(), Tone::Warning);
        assert_eq!(ScenarioVerdict::HighRisk.tone(), Tone::Error);
        assert_eq!(ScenarioVerdict::GoodScenario.tone(), Tone::Success);
        assert_eq!(ScenarioVerdict::Suboptimal.tone(), Tone::Warning);
        assert_eq!(ScenarioVerdict::Viable.tone(), Tone::Success);
    }

    #[test]
    fn serializes_as_wire_label() {
        let json = serde_json::to_string(&ScenarioVerdict::HighRisk).expect("test: serialize");
        assert_eq!(json, "\"HIGH_RISK\"");
    }
}
