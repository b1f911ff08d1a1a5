// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Revenue What-If Engine - Sales Overview & Customer Segments

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::types::Revenue;

// ─── Sales records ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: u16,
    pub month: u8,
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One cleaned order line from the uploaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub order_id: String,
    pub customer_id: String,
    pub customer_unique_id: String,
    pub price: Revenue,
    pub month: YearMonth,
    pub category: String,
    pub state: String,
    pub review_score: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranked<K> {
    pub key: K,
    pub revenue: Revenue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewKpis {
    pub total_revenue: Revenue,
    pub order_count: usize,
    pub customer_count: usize,
    pub average_review: Option<f64>,
    pub monthly_revenue: Vec<Ranked<YearMonth>>,
    pub best_month: Option<Ranked<YearMonth>>,
    pub worst_month: Option<Ranked<YearMonth>>,
    /// Categories by revenue, highest first, truncated to the configured limit.
    pub top_categories: Vec<Ranked<String>>,
    /// Percent of total revenue held by the leading categories.
    pub top_category_share_pct: Decimal,
    pub state_revenue: Vec<Ranked<String>>,
    pub best_state: Option<Ranked<String>>,
    pub worst_state: Option<Ranked<String>>,
}

impl OverviewKpis {
    /// Headline metrics for the revenue overview page.
    ///
    /// Category share is taken over the full category grouping, so it does
    /// not depend on how many categories the chart shows.
    pub fn compute(records: &[SaleRecord], top_categories: usize, share_top: usize) -> Self {
        let total_revenue: Revenue = records.iter().map(|r| r.price).sum();
        let order_count = records.iter().map(|r| r.order_id.as_str()).collect::<HashSet<_>>().len();
        let customer_count = records
            .iter()
            .map(|r| r.customer_unique_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        let scores: Vec<u8> = records.iter().filter_map(|r| r.review_score).collect();
        let average_review = if scores.is_empty() {
            None
        } else {
            Some(scores.iter().map(|&s| s as f64).sum::<f64>() / scores.len() as f64)
        };

        let monthly_revenue = ranked_by_key(group(records, |r| r.month));
        let (best_month, worst_month) = extremes(&monthly_revenue);

        let states = ranked_by_key(group(records, |r| r.state.clone()));
        let (best_state, worst_state) = extremes(&states);

        let categories = ranked_desc(group(records, |r| r.category.clone()));
        let top_share: Revenue = categories.iter().take(share_top).map(|c| c.revenue).sum();
        let top_category_share_pct = if total_revenue.is_zero() {
            Decimal::ZERO
        } else {
            top_share.0 / total_revenue.0 * dec!(100)
        };

        Self {
            total_revenue,
            order_count,
            customer_count,
            average_review,
            monthly_revenue,
            best_month,
            worst_month,
            top_categories: categories.into_iter().take(top_categories).collect(),
            top_category_share_pct,
            state_revenue: sorted_desc(states),
            best_state,
            worst_state,
        }
    }
}

fn group<K: Ord>(records: &[SaleRecord], key: impl Fn(&SaleRecord) -> K) -> BTreeMap<K, Revenue> {
    let mut out = BTreeMap::new();
    for r in records {
        let slot = out.entry(key(r)).or_insert_with(Revenue::zero);
        *slot = *slot + r.price;
    }
    out
}

fn ranked_by_key<K>(grouped: BTreeMap<K, Revenue>) -> Vec<Ranked<K>> {
    grouped.into_iter().map(|(key, revenue)| Ranked { key, revenue }).collect()
}

/// Highest revenue first; equal revenue keeps key order.
fn sorted_desc<K>(mut v: Vec<Ranked<K>>) -> Vec<Ranked<K>> {
    v.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    v
}

fn ranked_desc<K>(grouped: BTreeMap<K, Revenue>) -> Vec<Ranked<K>> {
    sorted_desc(ranked_by_key(grouped))
}

/// Highest and lowest entries of a key-ordered list; ties go to the smallest key.
fn extremes<K: Clone>(v: &[Ranked<K>]) -> (Option<Ranked<K>>, Option<Ranked<K>>) {
    let best = v.iter().reduce(|best, r| if r.revenue > best.revenue { r } else { best });
    let worst = v.iter().reduce(|worst, r| if r.revenue < worst.revenue { r } else { worst });
    (best.cloned(), worst.cloned())
}

// ─── Customer segments ───────────────────────────────────────────────────────

/// Named RFM cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SegmentName {
    Potential,
    Churned,
    New,
    Loyal,
}

impl SegmentName {
    pub fn from_cluster(cluster: u8) -> Option<Self> {
        match cluster {
            0 => Some(Self::Potential),
            1 => Some(Self::Churned),
            2 => Some(Self::New),
            3 => Some(Self::Loyal),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Potential => "Potential customers",
            Self::Churned => "Churned customers",
            Self::New => "New customers",
            Self::Loyal => "Loyal customers",
        }
    }
}

/// One customer's RFM profile with its precomputed cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteredCustomer {
    pub customer_id: String,
    pub recency: f64,
    pub frequency: f64,
    pub monetary: f64,
    pub cluster: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSummary {
    pub segment: SegmentName,
    pub customers: usize,
    pub mean_monetary: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentStats {
    pub total_customers: usize,
    pub segments: Vec<SegmentSummary>,
    pub loyal_customers: usize,
    /// Rows whose cluster id has no name.
    pub unlabelled: usize,
}

impl SegmentStats {
    pub fn compute(customers: &[ClusteredCustomer]) -> Self {
        let mut acc: BTreeMap<SegmentName, (usize, f64)> = BTreeMap::new();
        let mut unlabelled = 0;
        for c in customers {
            match SegmentName::from_cluster(c.cluster) {
                Some(name) => {
                    let entry = acc.entry(name).or_insert((0, 0.0));
                    entry.0 += 1;
                    entry.1 += c.monetary;
                }
                None => unlabelled += 1,
            }
        }
        let segments: Vec<SegmentSummary> = acc
            .into_iter()
            .map(|(segment, (count, monetary))| SegmentSummary {
                segment,
                customers: count,
                mean_monetary: monetary / count as f64,
            })
            .collect();
        let loyal_customers = segments
            .iter()
            .find(|s| s.segment == SegmentName::Loyal)
            .map_or(0, |s| s.customers);
        Self {
            total_customers: customers.len(),
            segments,
            loyal_customers,
            unlabelled,
        }
    }

    /// Number of distinct named segments present.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}
