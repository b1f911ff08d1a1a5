// Copyright © 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Dashboard insights over precomputed forecast tables.
//!
//! The tables arrive already cleaned; this module only ranks, looks up and
//! labels rows. Forecast values come from external models and are consumed
//! through [`RevenueForecaster`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::{DemandAlertThresholds, InsightLimits};
use crate::types::Revenue;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InsightError {
    #[error("table is empty: {0}")]
    EmptyTable(&'static str),

    #[error("no forecast for category {0:?}")]
    UnknownCategory(String),

    #[error("no forecast for state {0:?}")]
    UnknownState(String),
}

// ---------------------------------------------------------------------------
// Forecast tables
// ---------------------------------------------------------------------------

/// Source of the baseline forecast fed into the simulator.
pub trait RevenueForecaster {
    fn base_revenue(&self, category: &str) -> Result<Revenue, InsightError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryForecast {
    pub category: String,
    pub predicted_revenue: Revenue,
}

/// Next-month revenue forecast per product category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryForecasts {
    rows: Vec<CategoryForecast>,
}

impl CategoryForecasts {
    pub fn new(rows: Vec<CategoryForecast>) -> Self {
        Self { rows }
    }

    /// Category names in table order, without duplicates.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.category.as_str()) {
                seen.push(row.category.as_str());
            }
        }
        seen
    }

    /// The `n` categories with the highest forecast.
    pub fn top_categories(&self, n: usize) -> Vec<&CategoryForecast> {
        let mut ranked: Vec<&CategoryForecast> = self.rows.iter().collect();
        ranked.sort_by(|a, b| b.predicted_revenue.cmp(&a.predicted_revenue));
        ranked.truncate(n);
        ranked
    }
}

impl RevenueForecaster for CategoryForecasts {
    /// First row for the category, matching a table lookup by name.
    fn base_revenue(&self, category: &str) -> Result<Revenue, InsightError> {
        self.rows
            .iter()
            .find(|r| r.category == category)
            .map(|r| r.predicted_revenue)
            .ok_or_else(|| InsightError::UnknownCategory(category.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateForecast {
    pub state: String,
    pub predicted_revenue: Revenue,
}

/// Regional demand relative to the mean state forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandSignal {
    /// Well above average: stock-out risk.
    HighDemand,
    /// Well below average: avoid excess inventory.
    LowDemand,
    Normal,
}

impl DemandSignal {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::HighDemand => Some("High demand: risk of running out of stock."),
            Self::LowDemand => Some("Low demand: avoid excess inventory."),
            Self::Normal => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateForecasts {
    rows: Vec<StateForecast>,
}

impl StateForecasts {
    pub fn new(rows: Vec<StateForecast>) -> Self {
        Self { rows }
    }

    pub fn mean_revenue(&self) -> Result<Decimal, InsightError> {
        if self.rows.is_empty() {
            return Err(InsightError::EmptyTable("state forecasts"));
        }
        let total: Revenue = self.rows.iter().map(|r| r.predicted_revenue).sum();
        Ok(total.0 / Decimal::from(self.rows.len()))
    }

    pub fn revenue_for(&self, state: &str) -> Result<Revenue, InsightError> {
        self.rows
            .iter()
            .find(|r| r.state == state)
            .map(|r| r.predicted_revenue)
            .ok_or_else(|| InsightError::UnknownState(state.to_string()))
    }

    /// Compare one state's forecast against the mean of all states.
    pub fn state_demand_signal(
        &self,
        state: &str,
        thresholds: &DemandAlertThresholds,
    ) -> Result<DemandSignal, InsightError> {
        let revenue = self.revenue_for(state)?.0;
        let mean = self.mean_revenue()?;
        Ok(if revenue > thresholds.high * mean {
            DemandSignal::HighDemand
        } else if revenue < thresholds.low * mean {
            DemandSignal::LowDemand
        } else {
            DemandSignal::Normal
        })
    }

    /// State with the highest forecast; first row wins ties.
    pub fn top_state(&self) -> Option<&StateForecast> {
        self.rows.iter().reduce(|best, r| {
            if r.predicted_revenue > best.predicted_revenue { r } else { best }
        })
    }
}

// ---------------------------------------------------------------------------
// Customers, bundles, price bands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighPotentialCustomer {
    pub customer_id: String,
    pub repeat_purchase_prob: f64,
    pub segment: String,
}

/// The `limit` customers most likely to buy again, most likely first.
pub fn top_customers(customers: &[HighPotentialCustomer], limit: usize) -> Vec<&HighPotentialCustomer> {
    let mut ranked: Vec<&HighPotentialCustomer> = customers.iter().collect();
    ranked.sort_by(|a, b| b.repeat_purchase_prob.total_cmp(&a.repeat_purchase_prob));
    ranked.truncate(limit);
    ranked
}

/// Most frequent marketing segment among the top customers.
///
/// Ties go to the segment that appears first in the ranking.
pub fn priority_segment(customers: &[HighPotentialCustomer], limit: usize) -> Option<String> {
    let ranked = top_customers(customers, limit);
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for c in &ranked {
        let n = counts.entry(c.segment.as_str()).or_insert(0);
        if *n == 0 {
            order.push(c.segment.as_str());
        }
        *n += 1;
    }
    let mut best: Option<(&str, usize)> = None;
    for seg in order {
        let n = counts[seg];
        if best.map_or(true, |(_, m)| n > m) {
            best = Some((seg, n));
        }
    }
    best.map(|(seg, _)| seg.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleValue {
    pub itemset: String,
    pub mean_with_bundle: Revenue,
    pub mean_without_bundle: Revenue,
}

impl BundleValue {
    /// Average order value gained by buying the bundle.
    pub fn uplift(&self) -> Revenue {
        self.mean_with_bundle - self.mean_without_bundle
    }
}

/// Bundles ranked by average order value with the bundle.
pub fn top_bundles(bundles: &[BundleValue], limit: usize) -> Vec<&BundleValue> {
    let mut ranked: Vec<&BundleValue> = bundles.iter().collect();
    ranked.sort_by(|a, b| b.mean_with_bundle.cmp(&a.mean_with_bundle));
    ranked.truncate(limit);
    ranked
}

/// Bundle with the highest average order value among the top `limit`.
pub fn best_bundle(bundles: &[BundleValue], limit: usize) -> Option<&BundleValue> {
    top_bundles(bundles, limit).first().copied()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBand {
    pub band: String,
    pub total_revenue: Revenue,
}

pub fn best_price_band(bands: &[PriceBand]) -> Option<&PriceBand> {
    bands.iter().reduce(|best, b| if b.total_revenue > best.total_revenue { b } else { best })
}

// ---------------------------------------------------------------------------
// InsightSummary
// ---------------------------------------------------------------------------

/// The automatic insight block at the bottom of the optimization page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSummary {
    pub growth_categories: Vec<String>,
    pub logistics_state: Option<String>,
    pub marketing_segment: Option<String>,
    pub recommended_bundle: Option<String>,
    pub best_price_band: Option<String>,
}

/// Inputs to [`InsightSummary::build`].
pub struct InsightTables<'a> {
    pub categories: &'a CategoryForecasts,
    pub states: &'a StateForecasts,
    pub customers: &'a [HighPotentialCustomer],
    pub bundles: &'a [BundleValue],
    pub price_bands: &'a [PriceBand],
}

impl InsightSummary {
    pub fn build(tables: &InsightTables<'_>, limits: &InsightLimits) -> Self {
        Self {
            growth_categories: tables
                .categories
                .top_categories(limits.top_categories)
                .into_iter()
                .map(|c| c.category.clone())
                .collect(),
            logistics_state: tables.states.top_state().map(|s| s.state.clone()),
            marketing_segment: priority_segment(tables.customers, limits.top_customers),
            recommended_bundle: best_bundle(tables.bundles, limits.top_bundles)
                .map(|b| b.itemset.clone()),
            best_price_band: best_price_band(tables.price_bands).map(|b| b.band.clone()),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn categories() -> CategoryForecasts {
        CategoryForecasts::new(vec![
            CategoryForecast { category: "toys".into(), predicted_revenue: Revenue(dec!(1200)) },
            CategoryForecast { category: "bed_bath_table".into(), predicted_revenue: Revenue(dec!(5400)) },
            CategoryForecast { category: "watches_gifts".into(), predicted_revenue: Revenue(dec!(3100)) },
        ])
    }

    fn states() -> StateForecasts {
        // mean = 1000
        StateForecasts::new(vec![
            StateForecast { state: "SP".into(), predicted_revenue: Revenue(dec!(1500)) },
            StateForecast { state: "RJ".into(), predicted_revenue: Revenue(dec!(1000)) },
            StateForecast { state: "AC".into(), predicted_revenue: Revenue(dec!(500)) },
        ])
    }

    fn customer(id: &str, prob: f64, segment: &str) -> HighPotentialCustomer {
        HighPotentialCustomer {
            customer_id: id.into(),
            repeat_purchase_prob: prob,
            segment: segment.into(),
        }
    }

    #[test]
    fn forecaster_looks_up_category() {
        let table = categories();
        assert_eq!(table.base_revenue("toys"), Ok(Revenue(dec!(1200))));
        assert_eq!(
            table.base_revenue("garden"),
            Err(InsightError::UnknownCategory("garden".into()))
        );
        assert_eq!(table.categories(), vec!["toys", "bed_bath_table", "watches_gifts"]);
    }

    #[test]
    fn top_categories_ranked_by_forecast() {
        let table = categories();
        let top: Vec<&str> = table.top_categories(2).iter().map(|c| c.category.as_str()).collect();
        assert_eq!(top, vec!["bed_bath_table", "watches_gifts"]);
    }

    #[test]
    fn state_demand_signal_uses_mean_multiples() {
        let table = states();
        let t = DemandAlertThresholds::default();
        assert_eq!(table.mean_revenue(), Ok(dec!(1000)));
        assert_eq!(table.state_demand_signal("SP", &t), Ok(DemandSignal::HighDemand));
        assert_eq!(table.state_demand_signal("RJ", &t), Ok(DemandSignal::Normal));
        assert_eq!(table.state_demand_signal("AC", &t), Ok(DemandSignal::LowDemand));
        assert!(DemandSignal::Normal.message().is_none());
        assert_eq!(
            table.state_demand_signal("XX", &t),
            Err(InsightError::UnknownState("XX".into()))
        );
    }

    #[test]
    fn state_demand_signal_boundaries_are_exclusive() {
        let table = StateForecasts::new(vec![
            StateForecast { state: "A".into(), predicted_revenue: Revenue(dec!(120)) },
            StateForecast { state: "B".into(), predicted_revenue: Revenue(dec!(80)) },
        ]);
        // mean 100: 120 is not > 120, 80 is not < 80
        let t = DemandAlertThresholds::default();
        assert_eq!(table.state_demand_signal("A", &t), Ok(DemandSignal::Normal));
        assert_eq!(table.state_demand_signal("B", &t), Ok(DemandSignal::Normal));
    }

    #[test]
    fn empty_state_table_has_no_mean() {
        let table = StateForecasts::default();
        assert_eq!(table.mean_revenue(), Err(InsightError::EmptyTable("state forecasts")));
        assert!(table.top_state().is_none());
    }

    #[test]
    fn priority_segment_counts_only_top_customers() {
        let customers = vec![
            customer("a", 0.95, "loyal"),
            customer("b", 0.90, "new"),
            customer("c", 0.85, "new"),
            customer("d", 0.10, "loyal"),
            customer("e", 0.05, "loyal"),
        ];
        assert_eq!(priority_segment(&customers, 3), Some("new".to_string()));
        assert_eq!(priority_segment(&customers, 5), Some("loyal".to_string()));
        assert_eq!(priority_segment(&[], 20), None);
    }

    #[test]
    fn priority_segment_tie_goes_to_higher_ranked() {
        let customers = vec![customer("a", 0.4, "new"), customer("b", 0.9, "loyal")];
        assert_eq!(priority_segment(&customers, 2), Some("loyal".to_string()));
    }

    #[test]
    fn bundle_ranking_and_uplift() {
        let bundles = vec![
            BundleValue {
                itemset: "pillow+sheet".into(),
                mean_with_bundle: Revenue(dec!(180)),
                mean_without_bundle: Revenue(dec!(120)),
            },
            BundleValue {
                itemset: "watch+box".into(),
                mean_with_bundle: Revenue(dec!(240)),
                mean_without_bundle: Revenue(dec!(200)),
            },
        ];
        let top = top_bundles(&bundles, 10);
        assert_eq!(top[0].itemset, "watch+box");
        assert_eq!(top[0].uplift(), Revenue(dec!(40)));
        assert_eq!(top_bundles(&bundles, 1).len(), 1);
        assert_eq!(best_bundle(&bundles, 10).map(|b| b.itemset.as_str()), Some("watch+box"));
        assert_eq!(best_bundle(&bundles, 0), None);
        assert_eq!(best_bundle(&[], 10), None);
    }

    #[test]
    fn summary_collects_every_insight() {
        let cats = categories();
        let sts = states();
        let customers = vec![customer("a", 0.9, "loyal"), customer("b", 0.8, "loyal")];
        let bundles = vec![BundleValue {
            itemset: "watch+box".into(),
            mean_with_bundle: Revenue(dec!(240)),
            mean_without_bundle: Revenue(dec!(200)),
        }];
        let bands = vec![
            PriceBand { band: "0-50".into(), total_revenue: Revenue(dec!(9000)) },
            PriceBand { band: "50-100".into(), total_revenue: Revenue(dec!(15000)) },
        ];
        let summary = InsightSummary::build(
            &InsightTables {
                categories: &cats,
                states: &sts,
                customers: &customers,
                bundles: &bundles,
                price_bands: &bands,
            },
            &InsightLimits::default(),
        );
        assert_eq!(summary.growth_categories, vec!["bed_bath_table", "watches_gifts"]);
        assert_eq!(summary.logistics_state.as_deref(), Some("SP"));
        assert_eq!(summary.marketing_segment.as_deref(), Some("loyal"));
        assert_eq!(summary.recommended_bundle.as_deref(), Some("watch+box"));
        assert_eq!(summary.best_price_band.as_deref(), Some("50-100"));
    }
}
