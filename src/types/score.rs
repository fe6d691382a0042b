//! Weighted composite decision scores.

use crate::types::ColorClass;
use serde::{Deserialize, Serialize};

/// A weighted composite of several indicator scores, mapped to a
/// narrative band. Two independent instances exist per cycle: the
/// short-horizon Trading score and the medium-horizon Macro score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeScore {
    /// Weighted sum of indicator scores, rounded to one decimal.
    pub value: f64,
    /// Band label (e.g., "ACHAT FORT", "Expansion modérée").
    pub label: String,
    /// Recommended action text for the band.
    pub action: String,
    /// Historical probability range for the band (e.g., "75-80%", "< 40%").
    pub probability: String,
    /// Display color for the band.
    pub color: ColorClass,
}
