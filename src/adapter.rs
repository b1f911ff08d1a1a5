//! Adapter layer: converts between the dashboard's f64 world and the core's Decimal types.

use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::classifier::{classify, ScenarioVerdict};
use crate::simulator::{ScenarioSimulator, SimulationError};
use crate::types::{Revenue, ScenarioInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} is outside the decimal range")]
    OutOfRange { field: &'static str },

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// Convert f64 to Decimal, rejecting NaN, infinities and values beyond `Decimal::MAX`.
pub fn to_decimal(v: f64, field: &'static str) -> Result<Decimal, AdapterError> {
    if !v.is_finite() {
        return Err(AdapterError::NonFinite { field });
    }
    Decimal::from_f64(v).ok_or(AdapterError::OutOfRange { field })
}

/// Convert Decimal to f64.
pub fn from_decimal(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

/// Float-side view of a simulated scenario.
///
/// `percent_change` and `verdict` are `None` when the base revenue is zero;
/// the UI shows "N/A" for them while still plotting the adjusted revenue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatOutcome {
    pub adjusted_revenue: f64,
    pub percent_change: Option<f64>,
    pub demand_ceiling: f64,
    pub realized_quantity_factor: f64,
    pub verdict: Option<ScenarioVerdict>,
}

pub fn float_input(base: f64, price_pct: f64, quantity_pct: f64) -> Result<ScenarioInput, AdapterError> {
    Ok(ScenarioInput::new(
        to_decimal(base, "base_revenue")?,
        to_decimal(price_pct, "price_change_pct")?,
        to_decimal(quantity_pct, "quantity_change_pct")?,
    ))
}

/// Simulate from float inputs, mapping a zero base to an undefined percent change.
pub fn simulate_f64(
    simulator: &ScenarioSimulator,
    base: f64,
    price_pct: f64,
    quantity_pct: f64,
) -> Result<FloatOutcome, AdapterError> {
    let input = float_input(base, price_pct, quantity_pct)?;
    let terms = simulator.demand_terms(input.price_change_pct, input.quantity_change_pct);

    let (adjusted, percent_change, verdict) = match simulator.evaluate(&input) {
        Ok(report) => (
            report.output.adjusted_revenue,
            Some(report.output.percent_change),
            Some(report.verdict),
        ),
        Err(SimulationError::DivisionByZero) => (simulator.adjusted_revenue(&input)?, None, None),
        Err(e) => return Err(e.into()),
    };

    Ok(FloatOutcome {
        adjusted_revenue: from_decimal(adjusted.0),
        percent_change: percent_change.map(from_decimal),
        demand_ceiling: from_decimal(terms.demand_ceiling),
        realized_quantity_factor: from_decimal(terms.realized_quantity_factor),
        verdict,
    })
}

/// Strict float simulation: a zero base is an error, as in the core.
pub fn simulate_f64_strict(
    simulator: &ScenarioSimulator,
    base: f64,
    price_pct: f64,
    quantity_pct: f64,
) -> Result<(f64, f64), AdapterError> {
    let input = float_input(base, price_pct, quantity_pct)?;
    let out = simulator.simulate(&input)?;
    Ok((from_decimal(out.adjusted_revenue.0), from_decimal(out.percent_change)))
}

pub fn classify_f64(price_pct: f64, quantity_pct: f64, percent_change: f64) -> Result<ScenarioVerdict, AdapterError> {
    Ok(classify(
        to_decimal(price_pct, "price_change_pct")?,
        to_decimal(quantity_pct, "quantity_change_pct")?,
        to_decimal(percent_change, "percent_change")?,
    ))
}

pub fn revenue_from_f64(v: f64) -> Result<Revenue, AdapterError> {
    to_decimal(v, "revenue").map(Revenue::from_decimal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_scenarios_match_literals() {
        let sim = ScenarioSimulator::new();
        let out = simulate_f64(&sim, 1000.0, 50.0, 0.0).expect("test: finite input");
        assert_eq!(out.adjusted_revenue, 1050.0);
        assert_eq!(out.percent_change, Some(5.0));
        assert_eq!(out.verdict, Some(ScenarioVerdict::Viable));

        let out = simulate_f64(&sim, 1000.0, -20.0, 20.0).expect("test: finite input");
        assert_eq!(out.adjusted_revenue, 896.0);
        let pct = out.percent_change.expect("test: non-zero base");
        assert!((pct + 10.4).abs() < 1e-9, "got {pct}");
        assert_eq!(out.verdict, Some(ScenarioVerdict::Suboptimal));
        assert!((out.demand_ceiling - 1.12).abs() < 1e-12);
    }

    #[test]
    fn zero_base_maps_to_undefined_percent() {
        let sim = ScenarioSimulator::new();
        let out = simulate_f64(&sim, 0.0, 10.0, 10.0).expect("test: finite input");
        assert_eq!(out.adjusted_revenue, 0.0);
        assert_eq!(out.percent_change, None);
        assert_eq!(out.verdict, None);

        assert_eq!(
            simulate_f64_strict(&sim, 0.0, 10.0, 10.0),
            Err(AdapterError::Simulation(SimulationError::DivisionByZero))
        );
    }

    #[test]
    fn non_finite_input_rejected() {
        let sim = ScenarioSimulator::new();
        assert_eq!(
            simulate_f64(&sim, f64::NAN, 0.0, 0.0),
            Err(AdapterError::NonFinite { field: "base_revenue" })
        );
        assert_eq!(
            classify_f64(0.0, f64::INFINITY, 0.0),
            Err(AdapterError::NonFinite { field: "quantity_change_pct" })
        );
    }

    #[test]
    fn huge_finite_input_is_out_of_range() {
        let sim = ScenarioSimulator::new();
        assert_eq!(
            simulate_f64(&sim, 1e29, 0.0, 0.0),
            Err(AdapterError::OutOfRange { field: "base_revenue" })
        );
        assert_eq!(revenue_from_f64(-1e30), Err(AdapterError::OutOfRange { field: "revenue" }));
    }

    #[test]
    fn revenue_overflow_is_an_error_not_a_panic() {
        let sim = ScenarioSimulator::new();
        // 7.9e28 * 1.05 exceeds Decimal::MAX
        assert_eq!(
            simulate_f64(&sim, 7.9e28, 50.0, 0.0),
            Err(AdapterError::Simulation(SimulationError::Overflow))
        );
        assert_eq!(
            simulate_f64_strict(&sim, 7.9e28, 50.0, 0.0),
            Err(AdapterError::Simulation(SimulationError::Overflow))
        );
        let out = simulate_f64(&sim, 7.0e28, 50.0, 0.0).expect("test: result fits");
        assert!((out.adjusted_revenue / 7.35e28 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn classify_from_floats() {
        assert_eq!(classify_f64(10.0, 10.0, -5.0), Ok(ScenarioVerdict::ContradictoryStrategy));
        assert_eq!(classify_f64(-20.0, 20.0, -10.4), Ok(ScenarioVerdict::Suboptimal));
    }
}
