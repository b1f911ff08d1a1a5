// Copyright © 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Engine configuration: elasticity calibration, slider bounds, and the
//! thresholds used by the dashboard insights.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::simulator::ScenarioSimulator;
use crate::types::{ScenarioInput, DEFAULT_ELASTICITY};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("elasticity must not be positive (got {value} for {scope})")]
    PositiveElasticity { scope: String, value: Decimal },

    #[error("invalid scenario bounds: {0}")]
    InvalidBounds(&'static str),
}

/// Input rejected at the boundary before it reaches the simulator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoundsError {
    #[error("base revenue must not be negative (got {0})")]
    NegativeRevenue(Decimal),

    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },
}

// ---------------------------------------------------------------------------
// ScenarioBounds
// ---------------------------------------------------------------------------

/// Widest slider range the dashboard offers, in percent.
pub const SLIDER_DOMAIN_PCT: Decimal = dec!(50);

/// Upper limit on slider positions per axis; a sweep evaluates its square.
pub const MAX_SLIDER_POSITIONS: usize = 1000;

/// Range and step of the price / quantity sliders, in whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioBounds {
    pub min_pct: Decimal,
    pub max_pct: Decimal,
    pub step_pct: Decimal,
}

impl Default for ScenarioBounds {
    fn default() -> Self {
        Self {
            min_pct: dec!(-50),
            max_pct: dec!(50),
            step_pct: dec!(5),
        }
    }
}

impl ScenarioBounds {
    /// Every slider position from `min_pct` to `max_pct` inclusive, capped
    /// at [`MAX_SLIDER_POSITIONS`].
    pub fn steps(&self) -> Vec<Decimal> {
        if self.step_pct <= Decimal::ZERO || self.min_pct > self.max_pct {
            return Vec::new();
        }
        let mut out = Vec::new();
        let mut v = self.min_pct;
        while v <= self.max_pct && out.len() < MAX_SLIDER_POSITIONS {
            out.push(v);
            v += self.step_pct;
        }
        out
    }

    pub fn contains(&self, pct: Decimal) -> bool {
        pct >= self.min_pct && pct <= self.max_pct
    }

    /// Reject inputs the dashboard sliders could never produce.
    pub fn check(&self, input: &ScenarioInput) -> Result<(), BoundsError> {
        if input.base_revenue.0.is_sign_negative() && !input.base_revenue.is_zero() {
            return Err(BoundsError::NegativeRevenue(input.base_revenue.0));
        }
        for (field, value) in [
            ("price_change_pct", input.price_change_pct),
            ("quantity_change_pct", input.quantity_change_pct),
        ] {
            if !self.contains(value) {
                return Err(BoundsError::OutOfRange {
                    field,
                    value,
                    min: self.min_pct,
                    max: self.max_pct,
                });
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_pct >= self.max_pct {
            return Err(ConfigError::InvalidBounds("min_pct must be below max_pct"));
        }
        if self.min_pct < -SLIDER_DOMAIN_PCT || self.max_pct > SLIDER_DOMAIN_PCT {
            return Err(ConfigError::InvalidBounds("bounds must lie within [-50, 50]"));
        }
        if self.step_pct <= Decimal::ZERO {
            return Err(ConfigError::InvalidBounds("step_pct must be positive"));
        }
        let span = self.max_pct - self.min_pct;
        if !(span % self.step_pct).is_zero() {
            return Err(ConfigError::InvalidBounds("step_pct must divide the slider range"));
        }
        if span / self.step_pct + Decimal::ONE > Decimal::from(MAX_SLIDER_POSITIONS) {
            return Err(ConfigError::InvalidBounds("step_pct yields too many slider positions"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Insight thresholds
// ---------------------------------------------------------------------------

/// Regional demand alert thresholds, as multiples of the mean state forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemandAlertThresholds {
    /// Above this multiple: stock-out risk.
    pub high: Decimal,
    /// Below this multiple: overstock risk.
    pub low: Decimal,
}

impl Default for DemandAlertThresholds {
    fn default() -> Self {
        Self { high: dec!(1.2), low: dec!(0.8) }
    }
}

/// Row limits for the ranked tables shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightLimits {
    pub top_customers: usize,
    pub top_bundles: usize,
    pub top_categories: usize,
    pub overview_top_categories: usize,
    pub overview_share_top: usize,
}

impl Default for InsightLimits {
    fn default() -> Self {
        Self {
            top_customers: 20,
            top_bundles: 10,
            top_categories: 2,
            overview_top_categories: 10,
            overview_share_top: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default price elasticity of demand.
    pub elasticity: Decimal,
    /// Per-category elasticity overrides.
    pub category_elasticity: BTreeMap<String, Decimal>,
    pub bounds: ScenarioBounds,
    pub demand_alert: DemandAlertThresholds,
    pub insight_limits: InsightLimits,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            elasticity: DEFAULT_ELASTICITY,
            category_elasticity: BTreeMap::new(),
            bounds: ScenarioBounds::default(),
            demand_alert: DemandAlertThresholds::default(),
            insight_limits: InsightLimits::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.elasticity > Decimal::ZERO {
            return Err(ConfigError::PositiveElasticity {
                scope: "default".to_string(),
                value: self.elasticity,
            });
        }
        if let Some((category, value)) = self
            .category_elasticity
            .iter()
            .find(|(_, e)| **e > Decimal::ZERO)
        {
            return Err(ConfigError::PositiveElasticity {
                scope: category.clone(),
                value: *value,
            });
        }
        self.bounds.validate()
    }

    pub fn elasticity_for(&self, category: Option<&str>) -> Decimal {
        category
            .and_then(|c| self.category_elasticity.get(c).copied())
            .unwrap_or(self.elasticity)
    }

    /// Simulator calibrated for a category, falling back to the default elasticity.
    pub fn simulator_for(&self, category: Option<&str>) -> ScenarioSimulator {
        ScenarioSimulator::with_elasticity(self.elasticity_for(category))
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_dashboard() {
        let config = EngineConfig::default();
        assert_eq!(config.elasticity, dec!(-0.6));
        assert_eq!(config.bounds.min_pct, dec!(-50));
        assert_eq!(config.bounds.max_pct, dec!(50));
        assert_eq!(config.bounds.step_pct, dec!(5));
        assert_eq!(config.demand_alert.high, dec!(1.2));
        assert_eq!(config.demand_alert.low, dec!(0.8));
        assert_eq!(config.insight_limits.top_customers, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_bounds_have_21_steps() {
        let steps = ScenarioBounds::default().steps();
        assert_eq!(steps.len(), 21);
        assert_eq!(steps.first(), Some(&dec!(-50)));
        assert_eq!(steps.last(), Some(&dec!(50)));
        assert!(steps.contains(&Decimal::ZERO));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = EngineConfig::from_json_str(
            r#"{ "elasticity": "-0.8", "category_elasticity": { "watches_gifts": "-1.2" } }"#,
        )
        .expect("test: valid config");
        assert_eq!(config.elasticity, dec!(-0.8));
        assert_eq!(config.bounds, ScenarioBounds::default());
        assert_eq!(config.elasticity_for(Some("watches_gifts")), dec!(-1.2));
        assert_eq!(config.elasticity_for(Some("toys")), dec!(-0.8));
        assert_eq!(config.elasticity_for(None), dec!(-0.8));
        assert_eq!(config.simulator_for(Some("watches_gifts")).elasticity(), dec!(-1.2));
    }

    #[test]
    fn positive_elasticity_rejected() {
        let err = EngineConfig::from_json_str(r#"{ "elasticity": "0.4" }"#)
            .expect_err("test: positive elasticity");
        assert!(matches!(err, ConfigError::PositiveElasticity { .. }), "got: {err}");

        let err = EngineConfig::from_json_str(r#"{ "category_elasticity": { "toys": "0.1" } }"#)
            .expect_err("test: positive category elasticity");
        match err {
            ConfigError::PositiveElasticity { scope, .. } => assert_eq!(scope, "toys"),
            other => panic!("expected PositiveElasticity, got: {other}"),
        }
    }

    #[test]
    fn inverted_bounds_rejected() {
        let err = EngineConfig::from_json_str(
            r#"{ "bounds": { "min_pct": "10", "max_pct": "-10", "step_pct": "5" } }"#,
        )
        .expect_err("test: inverted bounds");
        assert!(matches!(err, ConfigError::InvalidBounds(_)));
    }

    #[test]
    fn out_of_domain_bounds_rejected() {
        for json in [
            r#"{ "bounds": { "max_pct": "80" } }"#,
            r#"{ "bounds": { "min_pct": "-60" } }"#,
        ] {
            let err = EngineConfig::from_json_str(json).expect_err("test: outside slider domain");
            assert!(matches!(err, ConfigError::InvalidBounds(_)), "got: {err}");
        }
    }

    #[test]
    fn tiny_step_rejected() {
        let err = EngineConfig::from_json_str(r#"{ "bounds": { "step_pct": "0.0001" } }"#)
            .expect_err("test: step too small");
        assert!(matches!(err, ConfigError::InvalidBounds(_)), "got: {err}");

        let err = EngineConfig::from_json_str(r#"{ "bounds": { "step_pct": "0" } }"#)
            .expect_err("test: zero step");
        assert!(matches!(err, ConfigError::InvalidBounds(_)), "got: {err}");

        // 100 / 0.1 + 1 = 1001 positions
        assert!(EngineConfig::from_json_str(r#"{ "bounds": { "step_pct": "0.1" } }"#).is_err());
        // 100 / 0.2 + 1 = 501 positions
        let config = EngineConfig::from_json_str(r#"{ "bounds": { "step_pct": "0.2" } }"#)
            .expect("test: fine but bounded step");
        assert_eq!(config.bounds.steps().len(), 501);
    }

    #[test]
    fn step_must_reach_max() {
        let err = EngineConfig::from_json_str(r#"{ "bounds": { "step_pct": "3" } }"#)
            .expect_err("test: 100 is not a multiple of 3");
        assert!(matches!(err, ConfigError::InvalidBounds(_)), "got: {err}");

        let config = EngineConfig::from_json_str(
            r#"{ "bounds": { "min_pct": "-30", "max_pct": "30", "step_pct": "4" } }"#,
        )
        .expect("test: 60 is a multiple of 4");
        assert_eq!(config.bounds.steps().last(), Some(&dec!(30)));
    }

    #[test]
    fn unvalidated_steps_are_capped() {
        let bounds = ScenarioBounds { min_pct: dec!(-50), max_pct: dec!(50), step_pct: dec!(0.0001) };
        assert_eq!(bounds.steps().len(), MAX_SLIDER_POSITIONS);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = EngineConfig::from_json_str("{ not json").expect_err("test: malformed");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn bounds_check_rejects_out_of_range() {
        let bounds = ScenarioBounds::default();
        assert!(bounds.check(&ScenarioInput::new(dec!(100), dec!(50), dec!(-50))).is_ok());
        assert!(bounds.check(&ScenarioInput::new(dec!(0), dec!(0), dec!(0))).is_ok());

        let err = bounds
            .check(&ScenarioInput::new(dec!(100), dec!(55), dec!(0)))
            .expect_err("test: out of range");
        assert_eq!(
            err,
            BoundsError::OutOfRange {
                field: "price_change_pct",
                value: dec!(55),
                min: dec!(-50),
                max: dec!(50),
            }
        );

        let err = bounds
            .check(&ScenarioInput::new(dec!(-1), dec!(0), dec!(0)))
            .expect_err("test: negative revenue");
        assert_eq!(err, BoundsError::NegativeRevenue(dec!(-1)));
    }
}
