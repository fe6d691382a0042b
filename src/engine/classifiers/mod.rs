//! Indicator classifiers.
//!
//! Each classifier maps one raw metric to a normalized [1,9] score via an
//! ordered threshold table: lower bounds in descending order, each bound
//! inclusive or exclusive as published, with the last row as open-ended
//! fallback. Classification is a single top-down scan, so the boundaries
//! stay declarative and independently testable.

pub mod dollar_index;
pub mod etf_flows;
pub mod money_supply;
pub mod peak_distance;
pub mod sentiment;
pub mod stablecoin_ratio;

use crate::types::{ColorClass, IndicatorResult};

/// One row of a classifier threshold table.
pub(crate) struct Band {
    /// Lower bound of the band. `f64::NEG_INFINITY` marks the fallback row.
    pub min: f64,
    /// Whether a value exactly at the bound belongs to this band.
    pub inclusive: bool,
    pub score: u8,
    pub label: &'static str,
    pub color: ColorClass,
}

impl Band {
    const fn incl(min: f64, score: u8, label: &'static str, color: ColorClass) -> Self {
        Self { min, inclusive: true, score, label, color }
    }

    const fn excl(min: f64, score: u8, label: &'static str, color: ColorClass) -> Self {
        Self { min, inclusive: false, score, label, color }
    }
}

/// Scan a threshold table top-down and build the result for the first
/// matching band. The last row must be the open-ended fallback.
pub(crate) fn classify_with(bands: &[Band], value: f64) -> IndicatorResult {
    let band = bands
        .iter()
        .find(|b| {
            if b.inclusive {
                value >= b.min
            } else {
                value > b.min
            }
        })
        .unwrap_or_else(|| bands.last().expect("threshold table is never empty"));

    IndicatorResult {
        score: band.score,
        label: band.label.to_string(),
        color: band.color,
        derived_value: None,
    }
}
