// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Revenue What-If Engine - Scenario Sweep

//! Evaluates every slider position for one baseline so the dashboard can show
//! the whole decision surface instead of a single point.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::classifier::ScenarioVerdict;
use crate::config::ScenarioBounds;
use crate::simulator::{ScenarioSimulator, SimulationError};
use crate::types::{Revenue, ScenarioInput};

// ─── Results ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub price_change_pct: Decimal,
    pub quantity_change_pct: Decimal,
    pub adjusted_revenue: Revenue,
    pub percent_change: Decimal,
    pub ceiling_binds: bool,
    pub verdict: ScenarioVerdict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub base_revenue: Revenue,
    pub elasticity: Decimal,
    pub points: Vec<SweepPoint>,
    /// Highest adjusted revenue; ties go to the smallest adjustment.
    pub best: Option<SweepPoint>,
    pub verdict_counts: BTreeMap<ScenarioVerdict, usize>,
}

impl SweepReport {
    pub fn count(&self, verdict: ScenarioVerdict) -> usize {
        self.verdict_counts.get(&verdict).copied().unwrap_or(0)
    }

    /// Points with the given verdict, in sweep order.
    pub fn with_verdict(&self, verdict: ScenarioVerdict) -> impl Iterator<Item = &SweepPoint> {
        self.points.iter().filter(move |p| p.verdict == verdict)
    }
}

// ─── Sweeps ──────────────────────────────────────────────────────────────────

/// Evaluate the full price × quantity grid defined by `bounds`.
pub fn sweep(
    simulator: &ScenarioSimulator,
    base_revenue: Revenue,
    bounds: &ScenarioBounds,
) -> Result<SweepReport, SimulationError> {
    let steps = bounds.steps();
    let mut points = Vec::with_capacity(steps.len() * steps.len());
    for &price in &steps {
        for &quantity in &steps {
            points.push(evaluate_point(simulator, base_revenue, price, quantity)?);
        }
    }
    let report = build_report(simulator, base_revenue, points);
    info!(
        base = %base_revenue,
        points = report.points.len(),
        best_price = ?report.best.map(|p| p.price_change_pct),
        best_quantity = ?report.best.map(|p| p.quantity_change_pct),
        "scenario sweep complete"
    );
    Ok(report)
}

/// Evaluate every price position for a fixed quantity adjustment.
pub fn sweep_price(
    simulator: &ScenarioSimulator,
    base_revenue: Revenue,
    quantity_change_pct: Decimal,
    bounds: &ScenarioBounds,
) -> Result<SweepReport, SimulationError> {
    let points = bounds
        .steps()
        .into_iter()
        .map(|price| evaluate_point(simulator, base_revenue, price, quantity_change_pct))
        .collect::<Result<Vec<_>, _>>()?;
    let report = build_report(simulator, base_revenue, points);
    debug!(
        base = %base_revenue,
        quantity_pct = %quantity_change_pct,
        points = report.points.len(),
        "price sweep complete"
    );
    Ok(report)
}

fn evaluate_point(
    simulator: &ScenarioSimulator,
    base_revenue: Revenue,
    price: Decimal,
    quantity: Decimal,
) -> Result<SweepPoint, SimulationError> {
    let report = simulator.evaluate(&ScenarioInput {
        base_revenue,
        price_change_pct: price,
        quantity_change_pct: quantity,
    })?;
    Ok(SweepPoint {
        price_change_pct: price,
        quantity_change_pct: quantity,
        adjusted_revenue: report.output.adjusted_revenue,
        percent_change: report.output.percent_change,
        ceiling_binds: report.terms.ceiling_binds(),
        verdict: report.verdict,
    })
}

fn build_report(
    simulator: &ScenarioSimulator,
    base_revenue: Revenue,
    points: Vec<SweepPoint>,
) -> SweepReport {
    let mut verdict_counts = BTreeMap::new();
    for p in &points {
        *verdict_counts.entry(p.verdict).or_insert(0) += 1;
    }
    let best = points.iter().copied().reduce(|best, p| {
        if better(&p, &best) { p } else { best }
    });
    SweepReport {
        base_revenue,
        elasticity: simulator.elasticity(),
        points,
        best,
        verdict_counts,
    }
}

fn better(candidate: &SweepPoint, current: &SweepPoint) -> bool {
    let key = |p: &SweepPoint| (p.price_change_pct.abs(), p.quantity_change_pct.abs());
    match candidate.adjusted_revenue.cmp(&current.adjusted_revenue) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => key(candidate) < key(current),
    }
}
