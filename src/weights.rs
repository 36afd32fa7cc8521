//! Weight vector and the manager that owns the current one.
use crate::types::Indicator;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_WEIGHT: f64 = 0.25;

/// Importance multiplier per indicator. Fields are independent: nothing
/// forces them to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub housing: f64,
    pub life: f64,
    pub safety: f64,
    pub transport: f64,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            housing: DEFAULT_WEIGHT,
            life: DEFAULT_WEIGHT,
            safety: DEFAULT_WEIGHT,
            transport: DEFAULT_WEIGHT,
        }
    }
}

impl WeightVector {
    pub fn get(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::Housing => self.housing,
            Indicator::Life => self.life,
            Indicator::Safety => self.safety,
            Indicator::Transport => self.transport,
        }
    }

    /// Copy of `self` with exactly one field replaced.
    pub fn with(mut self, indicator: Indicator, value: f64) -> Self {
        match indicator {
            Indicator::Housing => self.housing = value,
            Indicator::Life => self.life = value,
            Indicator::Safety => self.safety = value,
            Indicator::Transport => self.transport = value,
        }
        self
    }

    pub fn as_array(&self) -> [f64; 4] {
        Indicator::ALL.map(|i| self.get(i))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightState {
    Default,
    Customized,
}

/// Any `set_weight` moves the manager to [`WeightState::Customized`], even if
/// the value written equals the default; only [`WeightManager::reset`] goes
/// back to [`WeightState::Default`].
#[derive(Debug, Clone, PartialEq)]
pub struct WeightManager {
    current: WeightVector,
    state: WeightState,
}

impl Default for WeightManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WeightManager {
    pub fn new() -> Self {
        Self {
            current: WeightVector::default(),
            state: WeightState::Default,
        }
    }

    pub fn current(&self) -> WeightVector {
        self.current
    }

    pub fn state(&self) -> WeightState {
        self.state
    }

    pub fn is_customized(&self) -> bool {
        self.state == WeightState::Customized
    }

    /// Replace one field. The value is stored as given; a non-finite weight is
    /// accepted here and neutralized by the scorer.
    pub fn set_weight(&mut self, indicator: Indicator, value: f64) {
        if !value.is_finite() {
            warn!(%indicator, value, "non-finite weight; affected scores fall back to 0");
        }
        self.current = self.current.with(indicator, value);
        self.state = WeightState::Customized;
        debug!(%indicator, value, "weight updated");
    }

    pub fn reset(&mut self) {
        self.current = WeightVector::default();
        self.state = WeightState::Default;
        debug!("weights reset to defaults");
    }
}
