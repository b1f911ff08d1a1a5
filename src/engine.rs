// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Revenue What-If Engine - Dashboard Facade

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

use crate::adapter::{self, AdapterError, FloatOutcome};
use crate::classifier::ScenarioVerdict;
use crate::config::{BoundsError, EngineConfig};
use crate::simulator::{ScenarioSimulator, SimulationError};
use crate::sweep::{self, SweepReport};
use crate::types::ScenarioInput;

// ─── WhatIfEngine struct ─────────────────────────────────────────────────────

/// Stateless facade the dashboard calls for every slider interaction.
#[wasm_bindgen]
pub struct WhatIfEngine {
    pub(crate) config: EngineConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error(transparent)]
    Bounds(#[from] BoundsError),
}

impl From<SimulationError> for EngineError {
    fn from(e: SimulationError) -> Self {
        EngineError::Adapter(AdapterError::Simulation(e))
    }
}

// ─── Internal Logic (Testable, pure Rust) ────────────────────────────────────

impl WhatIfEngine {
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn simulator(&self, category: Option<&str>) -> ScenarioSimulator {
        self.config.simulator_for(category)
    }

    /// Bounds-checked float simulation for one slider position.
    pub fn simulate_core(
        &self,
        category: Option<&str>,
        base: f64,
        price_pct: f64,
        quantity_pct: f64,
    ) -> Result<FloatOutcome, EngineError> {
        let input = adapter::float_input(base, price_pct, quantity_pct)?;
        self.config.bounds.check(&input)?;
        Ok(adapter::simulate_f64(&self.simulator(category), base, price_pct, quantity_pct)?)
    }

    pub fn classify_core(
        &self,
        price_pct: f64,
        quantity_pct: f64,
        percent_change: f64,
    ) -> Result<ScenarioVerdict, EngineError> {
        Ok(adapter::classify_f64(price_pct, quantity_pct, percent_change)?)
    }

    pub fn sweep_core(&self, category: Option<&str>, base: f64) -> Result<SweepReport, EngineError> {
        let base = adapter::revenue_from_f64(base)?;
        self.config
            .bounds
            .check(&ScenarioInput::new(base.0, Decimal::ZERO, Decimal::ZERO))?;
        Ok(sweep::sweep(&self.simulator(category), base, &self.config.bounds)?)
    }

    pub fn revenue_maximizing_price_pct_core(&self, category: Option<&str>) -> Option<f64> {
        self.simulator(category)
            .revenue_maximizing_price_pct()
            .map(adapter::from_decimal)
    }
}
