// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Revenue What-If Engine - Type Definitions

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::classifier::ScenarioVerdict;

/// Assumed price elasticity of demand: every +1% of price costs 0.6% of demand.
pub const DEFAULT_ELASTICITY: Decimal = dec!(-0.6);

// ─── Revenue ─────────────────────────────────────────────────────────────────

/// Monetary amount backed by `rust_decimal::Decimal`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Revenue(pub Decimal);

impl Revenue {
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn from_decimal(d: Decimal) -> Self {
        Self(d)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Add for Revenue {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Revenue {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl std::iter::Sum for Revenue {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Revenue::zero(), |acc, r| acc + r)
    }
}

impl fmt::Display for Revenue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.round_dp(2).normalize())
    }
}

// ─── Scenario ────────────────────────────────────────────────────────────────

/// One what-if request: a baseline forecast plus two independent adjustments.
///
/// Percentages are whole-number percents (`10` means +10%). They are not
/// required to agree with each other; a price rise paired with a volume rise
/// is a valid (if contradictory) scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub base_revenue: Revenue,
    pub price_change_pct: Decimal,
    pub quantity_change_pct: Decimal,
}

impl ScenarioInput {
    pub fn new(base_revenue: Decimal, price_change_pct: Decimal, quantity_change_pct: Decimal) -> Self {
        Self {
            base_revenue: Revenue::from_decimal(base_revenue),
            price_change_pct,
            quantity_change_pct,
        }
    }
}

/// Result of a single simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOutput {
    pub adjusted_revenue: Revenue,
    pub percent_change: Decimal,
}

/// Intermediate terms of a simulation, kept for display and auditing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandTerms {
    pub demand_ceiling: Decimal,
    pub requested_quantity_factor: Decimal,
    pub realized_quantity_factor: Decimal,
}

impl DemandTerms {
    /// Whether the price-implied ceiling, not the requested volume, set the quantity.
    pub fn ceiling_binds(&self) -> bool {
        self.demand_ceiling < self.requested_quantity_factor
    }
}

/// Simulated scenario with its verdict, as handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub input: ScenarioInput,
    pub terms: DemandTerms,
    pub output: ScenarioOutput,
    pub verdict: ScenarioVerdict,
}
