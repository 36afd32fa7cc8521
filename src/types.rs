use crate::error::UnknownIndicator;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tabled::Tabled;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Housing,
    Life,
    Safety,
    Transport,
}

impl Indicator {
    /// Formula order: housing, life, safety, transport.
    pub const ALL: [Indicator; 4] = [
        Indicator::Housing,
        Indicator::Life,
        Indicator::Safety,
        Indicator::Transport,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Indicator::Housing => "housing",
            Indicator::Life => "life",
            Indicator::Safety => "safety",
            Indicator::Transport => "transport",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Indicator::Housing => "주거",
            Indicator::Life => "생활",
            Indicator::Safety => "치안",
            Indicator::Transport => "교통",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Indicator {
    type Err = UnknownIndicator;

    /// Accepts the English key (any case) or the Korean label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Indicator::ALL
            .into_iter()
            .find(|i| i.key().eq_ignore_ascii_case(s) || i.label() == s)
            .ok_or_else(|| UnknownIndicator(s.to_string()))
    }
}

/// A parsed data line: header name → trimmed cell, in header order.
///
/// Inserting an existing key replaces its value but keeps its position, so a
/// duplicated header resolves to the right-most cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

impl Serialize for RawRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Canonical neighborhood record produced by the normalizer.
///
/// Records are shared as `Arc<Region>` once a load completes and are never
/// mutated afterwards; scores live in [`ScoredRegion`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub id: String,
    /// Neighborhood label (법정동).
    pub name: String,
    /// Administrative area / district (자치구).
    pub area: String,
    pub housing: f64,
    pub life: f64,
    pub safety: f64,
    pub transport: f64,
    pub avg_rent: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub nearest_station: String,
    pub distance_km: f64,
    pub avg_noise: f64,
    pub park_count: f64,
    pub hospital_count: f64,
    pub shop_count: f64,
    pub raw: RawRow,
}

impl Region {
    pub fn indicator(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::Housing => self.housing,
            Indicator::Life => self.life,
            Indicator::Safety => self.safety,
            Indicator::Transport => self.transport,
        }
    }

    /// `"<name> (<area>)"`, as shown in result lists.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.area)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRegion {
    pub region: Arc<Region>,
    pub score: f64,
}

impl ScoredRegion {
    pub fn id(&self) -> &str {
        &self.region.id
    }
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct RankingRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Id")]
    #[tabled(rename = "Id")]
    pub id: String,
    #[serde(rename = "Region")]
    #[tabled(rename = "Region")]
    pub region: String,
    #[serde(rename = "Housing")]
    #[tabled(rename = "Housing")]
    pub housing: String,
    #[serde(rename = "Life")]
    #[tabled(rename = "Life")]
    pub life: String,
    #[serde(rename = "Safety")]
    #[tabled(rename = "Safety")]
    pub safety: String,
    #[serde(rename = "Transport")]
    #[tabled(rename = "Transport")]
    pub transport: String,
    #[serde(rename = "Score")]
    #[tabled(rename = "Score")]
    pub score: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct CategoryRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Region")]
    #[tabled(rename = "Region")]
    pub region: String,
    #[serde(rename = "Value")]
    #[tabled(rename = "Value")]
    pub value: String,
    #[serde(rename = "Detail")]
    #[tabled(rename = "Detail")]
    pub detail: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct BreakdownRow {
    #[serde(rename = "Indicator")]
    #[tabled(rename = "Indicator")]
    pub indicator: String,
    #[serde(rename = "Value")]
    #[tabled(rename = "Value")]
    pub value: String,
    #[serde(rename = "Weight")]
    #[tabled(rename = "Weight")]
    pub weight: String,
    #[serde(rename = "Contribution")]
    #[tabled(rename = "Contribution")]
    pub contribution: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("housing", Indicator::Housing)]
    #[case("LIFE", Indicator::Life)]
    #[case(" 치안 ", Indicator::Safety)]
    #[case("교통", Indicator::Transport)]
    fn parses_indicator_keys_and_labels(#[case] input: &str, #[case] expected: Indicator) {
        assert_eq!(input.parse::<Indicator>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_indicator() {
        let err = "noise".parse::<Indicator>().unwrap_err();
        assert_eq!(err, UnknownIndicator("noise".to_string()));
    }

    #[test]
    fn duplicate_key_keeps_position_and_takes_last_value() {
        let row: RawRow = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("a"), Some("3"));
        let keys: Vec<&str> = row.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn raw_row_serializes_as_ordered_map() {
        let row: RawRow = [("자치구", "강남구"), ("법정동", "역삼동")].into_iter().collect();
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"자치구":"강남구","법정동":"역삼동"}"#);
    }
}
