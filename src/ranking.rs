//! Filtering, scoring and ordering of regions.
use crate::scoring::score;
use crate::types::{Indicator, Region, ScoredRegion};
use crate::weights::WeightVector;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Label of the "every district" option in the dashboard dropdown.
pub const ALL_AREAS: &str = "전체";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaFilter {
    #[default]
    All,
    Area(String),
}

impl AreaFilter {
    /// `None`, an empty string, [`ALL_AREAS`] and `"all"` (any case) mean
    /// [`AreaFilter::All`]; anything else selects that area verbatim.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            None | Some("") | Some(ALL_AREAS) => AreaFilter::All,
            Some(s) if s.eq_ignore_ascii_case("all") => AreaFilter::All,
            Some(s) => AreaFilter::Area(s.to_string()),
        }
    }

    pub fn matches(&self, region: &Region) -> bool {
        match self {
            AreaFilter::All => true,
            AreaFilter::Area(area) => region.area == *area,
        }
    }
}

impl fmt::Display for AreaFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaFilter::All => f.write_str(ALL_AREAS),
            AreaFilter::Area(area) => f.write_str(area),
        }
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Score every region the filter admits and sort by descending score.
///
/// The sort is stable, so equal scores keep input order. An unknown area
/// yields an empty ranking.
pub fn rank(
    regions: &[Arc<Region>],
    weights: &WeightVector,
    filter: &AreaFilter,
) -> Vec<ScoredRegion> {
    let mut ranked: Vec<ScoredRegion> = regions
        .iter()
        .filter(|r| filter.matches(r))
        .map(|r| ScoredRegion {
            score: score(r, weights),
            region: Arc::clone(r),
        })
        .collect();
    ranked.sort_by(|a, b| descending(a.score, b.score));
    ranked
}

pub fn top_n(ranked: &[ScoredRegion], n: usize) -> &[ScoredRegion] {
    &ranked[..n.min(ranked.len())]
}

/// Regions ordered by a single indicator, highest first, truncated to `n`.
pub fn rank_by_indicator(
    regions: &[Arc<Region>],
    indicator: Indicator,
    n: usize,
) -> Vec<Arc<Region>> {
    let mut sorted: Vec<Arc<Region>> = regions.to_vec();
    sorted.sort_by(|a, b| descending(a.indicator(indicator), b.indicator(indicator)));
    sorted.truncate(n);
    sorted
}

/// Dropdown options: [`AreaFilter::All`] followed by each distinct non-empty
/// area in order of first appearance.
pub fn area_options(regions: &[Arc<Region>]) -> Vec<AreaFilter> {
    let mut seen = HashSet::new();
    let mut options = vec![AreaFilter::All];
    for region in regions {
        if !region.area.is_empty() && seen.insert(region.area.as_str()) {
            options.push(AreaFilter::Area(region.area.clone()));
        }
    }
    options
}
