// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Revenue What-If Engine

pub mod types;
pub mod classifier;
pub mod simulator;
pub mod config;
pub mod sweep;
pub mod adapter;
pub mod engine;

// Dashboard tables and model interfaces
pub mod insights;
pub mod overview;
pub mod models;

pub use classifier::{classify, ScenarioVerdict, Tone};
pub use config::{BoundsError, ConfigError, EngineConfig, ScenarioBounds};
pub use engine::{EngineError, WhatIfEngine};
pub use simulator::{ScenarioSimulator, SimulationError};
pub use types::*;

use wasm_bindgen::prelude::*;

// ─── WASM Interface ──────────────────────────────────────────────────────────

fn category_arg(category: &str) -> Option<&str> {
    if category.is_empty() { None } else { Some(category) }
}

#[wasm_bindgen]
impl WhatIfEngine {
    /// Build an engine around a single elasticity; JSON config via `from_json`.
    #[wasm_bindgen(constructor)]
    pub fn new(elasticity: f64) -> Result<WhatIfEngine, JsValue> {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        let elasticity = adapter::to_decimal(elasticity, "elasticity")
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let config = EngineConfig { elasticity, ..EngineConfig::default() };
        config.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_config(config))
    }

    pub fn from_json(json: &str) -> Result<WhatIfEngine, JsValue> {
        EngineConfig::from_json_str(json)
            .map(Self::from_config)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Simulate one slider position. `category` may be empty for the default elasticity.
    pub fn simulate(&self, category: &str, base: f64, price_pct: f64, quantity_pct: f64) -> Result<JsValue, JsValue> {
        let out = self
            .simulate_core(category_arg(category), base, price_pct, quantity_pct)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(serde_wasm_bindgen::to_value(&out).unwrap_or(JsValue::NULL))
    }

    /// Wire label of the verdict, e.g. `HIGH_RISK`.
    pub fn classify(&self, price_pct: f64, quantity_pct: f64, percent_change: f64) -> Result<String, JsValue> {
        self.classify_core(price_pct, quantity_pct, percent_change)
            .map(|v| v.label().to_string())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn verdict_message(label: &str) -> Option<String> {
        ScenarioVerdict::from_label(label).map(|v| v.message().to_string())
    }

    pub fn sweep(&self, category: &str, base: f64) -> Result<JsValue, JsValue> {
        let report = self
            .sweep_core(category_arg(category), base)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(serde_wasm_bindgen::to_value(&report).unwrap_or(JsValue::NULL))
    }

    pub fn revenue_maximizing_price_pct(&self, category: &str) -> Option<f64> {
        self.revenue_maximizing_price_pct_core(category_arg(category))
    }

    pub fn elasticity(&self, category: &str) -> f64 {
        adapter::from_decimal(self.config.elasticity_for(category_arg(category)))
    }
}

/// Convenience for float callers that only need the default model.
pub fn simulate_default(base: f64, price_pct: f64, quantity_pct: f64) -> Result<adapter::FloatOutcome, adapter::AdapterError> {
    adapter::simulate_f64(&ScenarioSimulator::new(), base, price_pct, quantity_pct)
}

/// Default elasticity as a float, for UI labels.
pub fn default_elasticity() -> f64 {
    adapter::from_decimal(DEFAULT_ELASTICITY)
}
