//! The single highlighted region.
use crate::types::{Region, ScoredRegion};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    current: Option<Arc<Region>>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&Arc<Region>> {
        self.current.as_ref()
    }

    pub fn id(&self) -> Option<&str> {
        self.current.as_deref().map(|r| r.id.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn select(&mut self, region: Arc<Region>) {
        self.current = Some(region);
    }

    /// Select the entry of `ranked` with the given id. Returns `false` and
    /// leaves the selection untouched when no entry matches.
    pub fn select_in(&mut self, ranked: &[ScoredRegion], id: &str) -> bool {
        match ranked.iter().find(|r| r.id() == id) {
            Some(found) => {
                self.select(Arc::clone(&found.region));
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// The selected region, or the first ranked one when nothing is selected.
    pub fn or_first<'a>(&'a self, ranked: &'a [ScoredRegion]) -> Option<&'a Arc<Region>> {
        self.current
            .as_ref()
            .or_else(|| ranked.first().map(|r| &r.region))
    }
}
