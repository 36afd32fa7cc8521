//! Explicit dashboard session: dataset, weights, area filter and selection,
//! with a pure recompute step and change notification.
use crate::config::DashboardConfig;
use crate::history::Snapshot;
use crate::loader::{load_regions, LoadReport};
use crate::map::{place_points, MapLayout};
use crate::ranking::{area_options, rank, rank_by_indicator, top_n, AreaFilter};
use crate::scoring::{breakdown, ScoreBreakdown};
use crate::selection::Selection;
use crate::types::{Indicator, Region, ScoredRegion};
use crate::weights::{WeightManager, WeightState, WeightVector};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

/// Ranking output for one `(dataset, weights, area)` combination.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedView {
    pub weights: WeightVector,
    pub area: AreaFilter,
    pub ranked: Vec<ScoredRegion>,
    top_n: usize,
}

impl RankedView {
    pub fn top(&self) -> &[ScoredRegion] {
        top_n(&self.ranked, self.top_n)
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn score_of(&self, id: &str) -> Option<f64> {
        self.ranked.iter().find(|r| r.id() == id).map(|r| r.score)
    }
}

/// Pure: the same inputs always give an equal view.
pub fn recompute(
    regions: &[Arc<Region>],
    weights: WeightVector,
    area: &AreaFilter,
    top_n: usize,
) -> RankedView {
    let ranked = rank(regions, &weights, area);
    debug!(area = %area, candidates = regions.len(), ranked = ranked.len(), "recomputed ranking");
    RankedView {
        weights,
        area: area.clone(),
        ranked,
        top_n,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Dataset,
    Weights,
    Area,
}

pub type Observer = Box<dyn FnMut(Change, &RankedView)>;

pub struct Session {
    config: DashboardConfig,
    regions: Vec<Arc<Region>>,
    weights: WeightManager,
    area: AreaFilter,
    selection: Selection,
    view: RankedView,
    observers: Vec<Observer>,
}

impl Session {
    pub fn new(config: DashboardConfig) -> Self {
        let weights = WeightManager::new();
        let view = recompute(&[], weights.current(), &AreaFilter::All, config.top_n);
        Self {
            config,
            regions: Vec::new(),
            weights,
            area: AreaFilter::All,
            selection: Selection::new(),
            view,
            observers: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(Change, &RankedView) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    fn refresh(&mut self, change: Change) {
        self.view = recompute(
            &self.regions,
            self.weights.current(),
            &self.area,
            self.config.top_n,
        );
        for observer in self.observers.iter_mut() {
            observer(change, &self.view);
        }
    }

    /// Replace the dataset. The selection belonged to the old data and is cleared.
    pub fn load(&mut self, regions: Vec<Arc<Region>>) {
        self.regions = regions;
        self.selection.clear();
        self.refresh(Change::Dataset);
    }

    /// Parse `text` with the configured column schema and load the result.
    pub fn load_text(&mut self, text: &str) -> LoadReport {
        let (regions, report) = load_regions(text, &self.config.columns);
        self.load(regions);
        report
    }

    pub fn set_weight(&mut self, indicator: Indicator, value: f64) {
        self.weights.set_weight(indicator, value);
        self.refresh(Change::Weights);
    }

    pub fn reset_weights(&mut self) {
        self.weights.reset();
        self.refresh(Change::Weights);
    }

    /// Change the area filter; always clears the selection.
    pub fn set_area(&mut self, area: AreaFilter) {
        self.area = area;
        self.selection.clear();
        self.refresh(Change::Area);
    }

    pub fn select(&mut self, id: &str) -> bool {
        self.selection.select_in(&self.view.ranked, id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Score terms of the selected region under the current weights.
    pub fn selected_breakdown(&self) -> Option<ScoreBreakdown> {
        self.selection
            .get()
            .map(|r| breakdown(r, &self.weights.current()))
    }

    pub fn view(&self) -> &RankedView {
        &self.view
    }

    pub fn weights(&self) -> WeightVector {
        self.weights.current()
    }

    pub fn weight_state(&self) -> WeightState {
        self.weights.state()
    }

    pub fn area(&self) -> &AreaFilter {
        &self.area
    }

    pub fn regions(&self) -> &[Arc<Region>] {
        &self.regions
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn area_options(&self) -> Vec<AreaFilter> {
        area_options(&self.regions)
    }

    /// Whole-dataset ranking by one indicator, for the category pages.
    pub fn category_ranking(&self, indicator: Indicator) -> Vec<Arc<Region>> {
        rank_by_indicator(&self.regions, indicator, self.config.category_top_n)
    }

    pub fn map_layout(&self) -> MapLayout {
        place_points(self.view.top().iter().map(|s| &s.region))
    }

    /// Capture the current state; the highlighted region is the selection or,
    /// failing that, the top-ranked region.
    pub fn snapshot(&self, saved_at: DateTime<Utc>) -> Snapshot {
        let top = self.view.top();
        Snapshot::capture(
            saved_at,
            self.weights.current(),
            self.area.clone(),
            self.selection.or_first(top).map(|r| &**r),
            top,
        )
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}
