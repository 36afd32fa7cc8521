//! Composite score: a fixed linear combination of the four indicators.
use crate::types::{Indicator, Region};
use crate::weights::WeightVector;
use serde::Serialize;

/// `housing*w.housing + life*w.life + safety*w.safety + transport*w.transport`.
///
/// A non-finite result (for example from a `NaN` weight) is reported as `0`.
/// The value is neither clamped nor rounded.
pub fn score(region: &Region, weights: &WeightVector) -> f64 {
    let total: f64 = Indicator::ALL
        .iter()
        .map(|&i| region.indicator(i) * weights.get(i))
        .sum();
    if total.is_finite() {
        total
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contribution {
    pub indicator: Indicator,
    pub value: f64,
    pub weight: f64,
    pub product: f64,
}

/// Per-indicator terms of a region's score, in formula order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub contributions: [Contribution; 4],
    pub total: f64,
}

pub fn breakdown(region: &Region, weights: &WeightVector) -> ScoreBreakdown {
    let contributions = Indicator::ALL.map(|indicator| {
        let value = region.indicator(indicator);
        let weight = weights.get(indicator);
        Contribution {
            indicator,
            value,
            weight,
            product: value * weight,
        }
    });
    ScoreBreakdown {
        contributions,
        total: score(region, weights),
    }
}
