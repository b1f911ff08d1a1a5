#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;
use whatif_engine::WhatIfEngine;

#[wasm_bindgen_test]
fn constructor_rejects_positive_elasticity() {
    assert!(WhatIfEngine::new(0.5).is_err());
    assert!(WhatIfEngine::new(-0.6).is_ok());
}

#[wasm_bindgen_test]
fn classify_returns_wire_label() {
    let engine = WhatIfEngine::new(-0.6).expect("test: valid elasticity");
    assert_eq!(engine.classify(10.0, 10.0, -5.0).expect("test: finite"), "CONTRADICTORY_STRATEGY");
    assert_eq!(engine.classify(-20.0, 20.0, -10.4).expect("test: finite"), "SUBOPTIMAL");
}

#[wasm_bindgen_test]
fn simulate_returns_object() {
    let engine = WhatIfEngine::new(-0.6).expect("test: valid elasticity");
    let value = engine.simulate("", 1000.0, 50.0, 0.0).expect("test: in bounds");
    assert!(value.is_object());
    assert!(engine.simulate("", 1000.0, 80.0, 0.0).is_err());
}

#[wasm_bindgen_test]
fn verdict_message_lookup() {
    assert!(WhatIfEngine::verdict_message("HIGH_RISK").is_some());
    assert!(WhatIfEngine::verdict_message("nope").is_none());
}
