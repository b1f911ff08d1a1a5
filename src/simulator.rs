// Copyright © 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Scenario Simulator -- demand-bounded what-if revenue.
//!
//! A seller may hope to sell more after moving price, but cannot sell more
//! than the market bears. The price change implies a demand ceiling through
//! a fixed elasticity, and the realized quantity is the tighter of the
//! requested quantity and that ceiling:
//!
//! ```text
//! ceiling  = max(0, 1 + e * dp)
//! quantity = min(1 + dq, ceiling)
//! revenue  = base * (1 + dp) * quantity
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classifier::{classify, ScenarioVerdict};
use crate::types::{
    DemandTerms, Revenue, ScenarioInput, ScenarioOutput, ScenarioReport, DEFAULT_ELASTICITY,
};

const ONE_HUNDRED: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised while simulating a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error("percent change is undefined for a zero base revenue")]
    DivisionByZero,

    #[error("revenue arithmetic overflowed the decimal range")]
    Overflow,
}

// ---------------------------------------------------------------------------
// ScenarioSimulator
// ---------------------------------------------------------------------------

/// Stateless simulator parameterised by a price elasticity of demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSimulator {
    elasticity: Decimal,
}

impl Default for ScenarioSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioSimulator {
    /// Create with the default elasticity of -0.6.
    pub fn new() -> Self {
        Self { elasticity: DEFAULT_ELASTICITY }
    }

    /// Create with a calibrated elasticity.
    pub fn with_elasticity(elasticity: Decimal) -> Self {
        Self { elasticity }
    }

    pub fn elasticity(&self) -> Decimal {
        self.elasticity
    }

    /// Maximum quantity multiplier the market allows after a price change.
    pub fn demand_ceiling(&self, price_change_pct: Decimal) -> Decimal {
        (Decimal::ONE + self.elasticity * (price_change_pct / ONE_HUNDRED)).max(Decimal::ZERO)
    }

    /// Tighter of the requested quantity multiplier and the demand ceiling.
    pub fn realized_quantity_factor(
        &self,
        price_change_pct: Decimal,
        quantity_change_pct: Decimal,
    ) -> Decimal {
        self.demand_terms(price_change_pct, quantity_change_pct)
            .realized_quantity_factor
    }

    /// All quantity terms of a simulation.
    pub fn demand_terms(&self, price_change_pct: Decimal, quantity_change_pct: Decimal) -> DemandTerms {
        let demand_ceiling = self.demand_ceiling(price_change_pct);
        let requested_quantity_factor = Decimal::ONE + quantity_change_pct / ONE_HUNDRED;
        DemandTerms {
            demand_ceiling,
            requested_quantity_factor,
            realized_quantity_factor: requested_quantity_factor.min(demand_ceiling),
        }
    }

    /// Adjusted revenue. Defined for a zero base; fails only on overflow.
    pub fn adjusted_revenue(&self, input: &ScenarioInput) -> Result<Revenue, SimulationError> {
        let terms = self.demand_terms(input.price_change_pct, input.quantity_change_pct);
        self.revenue_from_terms(input, &terms)
    }

    /// Percentage difference between `adjusted` and `base`.
    pub fn percent_change(base: Revenue, adjusted: Revenue) -> Result<Decimal, SimulationError> {
        if base.is_zero() {
            return Err(SimulationError::DivisionByZero);
        }
        adjusted
            .0
            .checked_sub(base.0)
            .and_then(|delta| delta.checked_div(base.0))
            .and_then(|ratio| ratio.checked_mul(ONE_HUNDRED))
            .ok_or(SimulationError::Overflow)
    }

    /// Simulate a scenario.
    ///
    /// Identical inputs always produce identical outputs; `(R, 0, 0)` yields
    /// exactly `(R, 0)`. Fails when the base revenue is zero or the result
    /// does not fit in a `Decimal`.
    pub fn simulate(&self, input: &ScenarioInput) -> Result<ScenarioOutput, SimulationError> {
        self.simulate_with_terms(input).map(|(_, output)| output)
    }

    /// Simulate and classify in one step.
    pub fn evaluate(&self, input: &ScenarioInput) -> Result<ScenarioReport, SimulationError> {
        let (terms, output) = self.simulate_with_terms(input)?;
        let verdict = classify(
            input.price_change_pct,
            input.quantity_change_pct,
            output.percent_change,
        );
        if verdict == ScenarioVerdict::ContradictoryStrategy {
            warn!(
                price_pct = %input.price_change_pct,
                quantity_pct = %input.quantity_change_pct,
                "price increase paired with a volume increase"
            );
        }
        Ok(ScenarioReport { input: *input, terms, output, verdict })
    }

    /// Price change (in percent) at which demand-bound revenue peaks.
    ///
    /// When the ceiling binds, revenue follows `(1 + x)(1 + e·x)`, which peaks
    /// at `x = -(1 + e) / 2e`. Past this point raising price only loses revenue.
    /// `None` for a zero elasticity, where revenue grows with price forever.
    pub fn revenue_maximizing_price_pct(&self) -> Option<Decimal> {
        if self.elasticity.is_zero() {
            return None;
        }
        let two_e = dec!(2) * self.elasticity;
        Some(-(Decimal::ONE + self.elasticity) / two_e * ONE_HUNDRED)
    }

    fn simulate_with_terms(
        &self,
        input: &ScenarioInput,
    ) -> Result<(DemandTerms, ScenarioOutput), SimulationError> {
        let terms = self.demand_terms(input.price_change_pct, input.quantity_change_pct);
        let adjusted_revenue = self.revenue_from_terms(input, &terms)?;
        let percent_change = Self::percent_change(input.base_revenue, adjusted_revenue)?;

        debug!(
            base = %input.base_revenue,
            price_pct = %input.price_change_pct,
            quantity_pct = %input.quantity_change_pct,
            ceiling = %terms.demand_ceiling,
            ceiling_binds = terms.ceiling_binds(),
            adjusted = %adjusted_revenue,
            "simulated scenario"
        );

        Ok((terms, ScenarioOutput { adjusted_revenue, percent_change }))
    }

    // Factors are combined first so a large base only overflows when the
    // final revenue itself is out of range.
    fn revenue_from_terms(
        &self,
        input: &ScenarioInput,
        terms: &DemandTerms,
    ) -> Result<Revenue, SimulationError> {
        let price_factor = Decimal::ONE + input.price_change_pct / ONE_HUNDRED;
        price_factor
            .checked_mul(terms.realized_quantity_factor)
            .and_then(|factor| input.base_revenue.0.checked_mul(factor))
            .map(Revenue)
            .ok_or(SimulationError::Overflow)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
