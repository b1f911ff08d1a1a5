// Monte Carlo over slider positions: N draws with a seedable PRNG
// Each draw picks a price and quantity step uniformly from the bounds' grid

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use whatif_engine::adapter::from_decimal;
use whatif_engine::{Revenue, ScenarioBounds, ScenarioInput, ScenarioSimulator, ScenarioVerdict, SimulationError};

use crate::report::Stats;

#[derive(Debug, Clone, Serialize)]
pub struct SampleReport {
    pub seed: u64,
    pub runs: usize,
    pub base_revenue: f64,
    pub percent_change: Stats,
    pub adjusted_revenue: Stats,
    /// Share of draws (0..1) per verdict.
    pub verdict_share: BTreeMap<ScenarioVerdict, f64>,
    /// Share of draws where the demand ceiling cut the requested volume.
    pub ceiling_bound_share: f64,
}

pub fn run(
    simulator: &ScenarioSimulator,
    base: Revenue,
    bounds: &ScenarioBounds,
    runs: usize,
    seed: u64,
) -> Result<SampleReport, SimulationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let steps = bounds.steps();

    let mut pct_samples = Vec::with_capacity(runs);
    let mut revenue_samples = Vec::with_capacity(runs);
    let mut counts: BTreeMap<ScenarioVerdict, usize> = BTreeMap::new();
    let mut bound = 0usize;

    for _ in 0..runs {
        let (Some(&price), Some(&quantity)) = (steps.choose(&mut rng), steps.choose(&mut rng)) else {
            break;
        };
        let report = simulator.evaluate(&ScenarioInput {
            base_revenue: base,
            price_change_pct: price,
            quantity_change_pct: quantity,
        })?;
        pct_samples.push(from_decimal(report.output.percent_change));
        revenue_samples.push(from_decimal(report.output.adjusted_revenue.0));
        *counts.entry(report.verdict).or_insert(0) += 1;
        if report.terms.ceiling_binds() {
            bound += 1;
        }
    }

    let n = pct_samples.len();
    debug!(seed, draws = n, "monte carlo complete");
    let share = |c: usize| if n == 0 { 0.0 } else { c as f64 / n as f64 };

    Ok(SampleReport {
        seed,
        runs: n,
        base_revenue: from_decimal(base.0),
        percent_change: Stats::from_samples(&pct_samples),
        adjusted_revenue: Stats::from_samples(&revenue_samples),
        verdict_share: counts.into_iter().map(|(v, c)| (v, share(c))).collect(),
        ceiling_bound_share: share(bound),
    })
}
