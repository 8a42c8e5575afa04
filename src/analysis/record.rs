//! Nutrition record returned by the analysis service
//!
//! A record is all-or-nothing: a 2xx body that is missing a field, carries a
//! wrongly typed field, or reports a negative/non-finite amount is rejected
//! here and never reaches the Result Store.

use serde::{Deserialize, Serialize};

/// Record validation errors
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Body is not JSON or does not have the record shape
    #[error("Malformed nutrition payload: {0}")]
    Shape(#[from] serde_json::Error),

    /// Numeric field outside the accepted range
    #[error("Invalid value for '{field}': {value}")]
    InvalidAmount { field: &'static str, value: f64 },
}

/// Structured result of a successful analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionRecord {
    /// Human-readable meal label
    pub item_name: String,
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fat: f64,
    /// Free-text advisory
    pub health_tip: String,
}

impl NutritionRecord {
    /// Parse and validate a response body
    pub fn from_json(body: &str) -> Result<Self, RecordError> {
        let record: NutritionRecord = serde_json::from_str(body)?;
        record.validate()?;
        Ok(record)
    }

    /// Check numeric fields are finite and non-negative
    pub fn validate(&self) -> Result<(), RecordError> {
        for (field, value) in self.amounts() {
            if !value.is_finite() || value < 0.0 {
                return Err(RecordError::InvalidAmount { field, value });
            }
        }
        Ok(())
    }

    fn amounts(&self) -> [(&'static str, f64); 4] {
        [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
        ]
    }

    /// Calories formatted for display
    pub fn calories_display(&self) -> String {
        format_amount(self.calories)
    }

    /// Gram amount formatted with unit, e.g. `38g`
    pub fn grams_display(value: f64) -> String {
        format!("{}g", format_amount(value))
    }
}

/// Deterministic number formatting
///
/// Integral values print without a fractional part, everything else is
/// rounded to one decimal with trailing zeros dropped.
pub fn format_amount(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 {
        // Also catches -0.0
        "0".to_string()
    } else if rounded.fract() == 0.0 {
        // Shortest round-trip form; no integer cast, so no saturation
        format!("{}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}
