//! Interfaces to the pre-trained model artifacts.
//!
//! Models are trained and serialized elsewhere; this crate only shapes their
//! inputs and consumes their predictions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeatureError {
    #[error("product length ({length} cm) must not be shorter than width ({width} cm)")]
    LengthShorterThanWidth { length: f64, width: f64 },

    #[error("{0} must be a finite, non-negative number")]
    Negative(&'static str),
}

/// Shipment and product attributes fed to the satisfaction classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipmentFeatures {
    pub price: f64,
    pub freight_value: f64,
    pub delivery_days: u32,
    pub is_late: bool,
    pub product_weight_g: f64,
    pub product_volume_cm3: f64,
}

/// Raw form input before the volume is derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipmentForm {
    pub price: f64,
    pub freight_value: f64,
    pub delivery_days: u32,
    pub is_late: bool,
    pub product_weight_g: f64,
    pub product_length_cm: f64,
    pub product_width_cm: f64,
    pub product_height_cm: f64,
}

impl ShipmentFeatures {
    pub fn from_form(form: &ShipmentForm) -> Result<Self, FeatureError> {
        for (name, v) in [
            ("price", form.price),
            ("freight_value", form.freight_value),
            ("product_weight_g", form.product_weight_g),
            ("product_length_cm", form.product_length_cm),
            ("product_width_cm", form.product_width_cm),
            ("product_height_cm", form.product_height_cm),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(FeatureError::Negative(name));
            }
        }
        if form.product_length_cm < form.product_width_cm {
            return Err(FeatureError::LengthShorterThanWidth {
                length: form.product_length_cm,
                width: form.product_width_cm,
            });
        }
        Ok(Self {
            price: form.price,
            freight_value: form.freight_value,
            delivery_days: form.delivery_days,
            is_late: form.is_late,
            product_weight_g: form.product_weight_g,
            product_volume_cm3: form.product_length_cm * form.product_width_cm * form.product_height_cm,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SatisfactionPrediction {
    pub satisfied: bool,
    /// Probability of the "satisfied" class.
    pub probability: f64,
}

/// A pre-trained customer satisfaction classifier.
pub trait SatisfactionModel {
    fn predict(&self, features: &ShipmentFeatures) -> SatisfactionPrediction;
}
