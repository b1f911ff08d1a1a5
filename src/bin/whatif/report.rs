// Report printing and sample statistics for the what-if runner

use rust_decimal::Decimal;
use serde::Serialize;

use whatif_engine::sweep::SweepReport;
use whatif_engine::{ScenarioReport, ScenarioVerdict};

// ─── Statistics ─────────────────────────────────────────────────────────────

/// Distribution of a sampled quantity: mean with a 95% interval on it, plus
/// nearest-rank percentiles of the draws themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub p05: f64,
    pub median: f64,
    pub p95: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self {
                mean: 0.0,
                std_dev: 0.0,
                ci_lower: 0.0,
                ci_upper: 0.0,
                min: 0.0,
                p05: 0.0,
                median: 0.0,
                p95: 0.0,
                max: 0.0,
                n: 0,
            };
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = sorted.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let half_width = 1.96 * std_dev / (n as f64).sqrt();
        Self {
            mean,
            std_dev,
            ci_lower: mean - half_width,
            ci_upper: mean + half_width,
            min: sorted[0],
            p05: percentile(&sorted, 5),
            median: percentile(&sorted, 50),
            p95: percentile(&sorted, 95),
            max: sorted[n - 1],
            n,
        }
    }
}

// Nearest-rank percentile of a non-empty ascending slice.
fn percentile(sorted: &[f64], pct: usize) -> f64 {
    let rank = (pct * sorted.len()).div_ceil(100).max(1);
    sorted[rank - 1]
}

// ─── Printing ───────────────────────────────────────────────────────────────

pub fn print_scenario(report: &ScenarioReport, elasticity: Decimal) {
    let input = &report.input;
    println!("\n  Scenario (elasticity {})", elasticity);
    println!("  {}", "-".repeat(48));
    println!("  Base forecast:          {:>14}", input.base_revenue.to_string());
    println!("  Price change:           {:>13}%", input.price_change_pct.to_string());
    println!("  Expected volume change: {:>13}%", input.quantity_change_pct.to_string());
    println!("  Demand ceiling:         {:>14}", report.terms.demand_ceiling.round_dp(4).normalize().to_string());
    println!("  Realized volume factor: {:>14}", report.terms.realized_quantity_factor.round_dp(4).normalize().to_string());
    println!("  Adjusted revenue:       {:>14}", report.output.adjusted_revenue.to_string());
    println!("  Revenue change:         {:>13}%", report.output.percent_change.round_dp(1).to_string());
    println!("  {}", "-".repeat(48));
    println!("  [{}] {}\n", report.verdict, report.verdict.message());
}

pub fn print_sweep(report: &SweepReport, peak_pct: Option<Decimal>) {
    println!("\n  Sweep: base {} | elasticity {} | {} scenario(s)",
        report.base_revenue, report.elasticity, report.points.len());
    println!("  {:>7} {:>7} {:>14} {:>9}  {:<24}", "Price%", "Qty%", "Revenue", "Change%", "Verdict");
    println!("  {}", "-".repeat(66));
    for p in &report.points {
        println!("  {:>7} {:>7} {:>14} {:>9}  {:<24}{}",
            p.price_change_pct.to_string(),
            p.quantity_change_pct.to_string(),
            p.adjusted_revenue.to_string(),
            p.percent_change.round_dp(1).to_string(),
            p.verdict.label(),
            if p.ceiling_binds { " (capped)" } else { "" },
        );
    }
    println!("  {}", "-".repeat(66));
    for v in ScenarioVerdict::ALL {
        println!("  {:<24} {:>5}", v.label(), report.count(v));
    }
    if let Some(best) = report.best {
        println!("\n  Best: price {}%, volume {}% -> {} ({}%)",
            best.price_change_pct, best.quantity_change_pct,
            best.adjusted_revenue, best.percent_change.round_dp(1));
    }
    if let Some(peak) = peak_pct {
        println!("  Demand-bound revenue peaks at a {}% price change\n", peak.round_dp(1));
    }
}

pub fn print_sample(report: &crate::monte_carlo::SampleReport) {
    println!("\n  Monte Carlo: {} draw(s) | seed {} | base {:.0}", report.runs, report.seed, report.base_revenue);
    println!("  PRNG: ChaCha8Rng");
    println!("  {}", "-".repeat(48));
    let pc = &report.percent_change;
    println!("  Revenue change: {:>7.2}% ± {:<5.2} [min {:.1}, max {:.1}]",
        pc.mean, (pc.ci_upper - pc.ci_lower) / 2.0, pc.min, pc.max);
    println!("  Percentiles:    p5 {:.1}% | median {:.1}% | p95 {:.1}%", pc.p05, pc.median, pc.p95);
    println!("  Demand ceiling binding: {:>5.1}%", report.ceiling_bound_share * 100.0);
    for v in ScenarioVerdict::ALL {
        let share = report.verdict_share.get(&v).copied().unwrap_or(0.0);
        println!("  {:<24} {:>5.1}%", v.label(), share * 100.0);
    }
    println!();
}
