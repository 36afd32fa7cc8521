//! Raw row → canonical [`Region`].
//!
//! Each attribute is resolved through an ordered list of candidate column
//! names; the first candidate holding a non-empty cell wins. The default
//! table matches the Seoul neighborhood dataset and can be extended per
//! dataset with [`ColumnSchema::with_alias`].
use crate::types::{RawRow, Region};
use crate::util::coerce_number;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attributes of a [`Region`] that are read from the source row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Area,
    Housing,
    Life,
    Safety,
    Transport,
    AvgRent,
    Latitude,
    Longitude,
    NearestStation,
    DistanceKm,
    AvgNoise,
    ParkCount,
    HospitalCount,
    ShopCount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    aliases: BTreeMap<Field, Vec<String>>,
}

pub static DEFAULT_SCHEMA: Lazy<ColumnSchema> = Lazy::new(ColumnSchema::seoul);

impl ColumnSchema {
    /// A schema with no aliases at all; every attribute resolves to its default.
    pub fn empty() -> Self {
        Self {
            aliases: BTreeMap::new(),
        }
    }

    /// Column names used by the Seoul 이사점수 dataset.
    pub fn seoul() -> Self {
        let table: [(Field, &[&str]); 15] = [
            (Field::Name, &["법정동", "동명", "동"]),
            (Field::Area, &["자치구", "구명", "구"]),
            (Field::Housing, &["주거점수"]),
            (Field::Life, &["생활점수", "생활점수_y"]),
            (Field::Safety, &["치안점수"]),
            (Field::Transport, &["교통점수"]),
            (Field::AvgRent, &["평균월세"]),
            (Field::Latitude, &["위도", "lat", "LAT"]),
            (Field::Longitude, &["경도", "lng", "LNG"]),
            (Field::NearestStation, &["가장가까운역"]),
            (Field::DistanceKm, &["거리_km"]),
            (Field::AvgNoise, &["평균소음(dB)"]),
            (Field::ParkCount, &["공원수"]),
            (Field::HospitalCount, &["병의원수"]),
            (Field::ShopCount, &["점포수"]),
        ];
        table
            .into_iter()
            .fold(Self::empty(), |schema, (field, names)| {
                names
                    .iter()
                    .fold(schema, |schema, name| schema.with_alias(field, *name))
            })
    }

    /// Append `alias` to the end of `field`'s candidate list.
    pub fn with_alias(mut self, field: Field, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        let list = self.aliases.entry(field).or_default();
        if !list.contains(&alias) {
            list.push(alias);
        }
        self
    }

    pub fn aliases(&self, field: Field) -> &[String] {
        self.aliases.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First non-empty cell among `field`'s aliases, trimmed.
    pub fn resolve<'r>(&self, row: &'r RawRow, field: Field) -> Option<&'r str> {
        self.aliases(field)
            .iter()
            .filter_map(|alias| row.get(alias))
            .map(str::trim)
            .find(|v| !v.is_empty())
    }

    fn text(&self, row: &RawRow, field: Field) -> String {
        self.resolve(row, field).unwrap_or_default().to_string()
    }

    fn number(&self, row: &RawRow, field: Field) -> f64 {
        coerce_number(self.resolve(row, field))
    }
}

impl Default for ColumnSchema {
    fn default() -> Self {
        DEFAULT_SCHEMA.clone()
    }
}

/// Id rule: `"<area>-<name>"` when both are present, else `"row-<index>"`.
pub fn region_id(area: &str, name: &str, index: usize) -> String {
    if !area.is_empty() && !name.is_empty() {
        format!("{}-{}", area, name)
    } else {
        positional_id(index)
    }
}

pub fn positional_id(index: usize) -> String {
    format!("row-{}", index)
}

pub fn normalize(row: RawRow, index: usize) -> Region {
    normalize_with(&DEFAULT_SCHEMA, row, index)
}

/// Build a [`Region`] from `row`. Missing or non-numeric values become `0`
/// (numbers) or `""` (text); the row itself is kept as `raw`.
pub fn normalize_with(schema: &ColumnSchema, row: RawRow, index: usize) -> Region {
    let name = schema.text(&row, Field::Name);
    let area = schema.text(&row, Field::Area);
    Region {
        id: region_id(&area, &name, index),
        housing: schema.number(&row, Field::Housing),
        life: schema.number(&row, Field::Life),
        safety: schema.number(&row, Field::Safety),
        transport: schema.number(&row, Field::Transport),
        avg_rent: schema.number(&row, Field::AvgRent),
        latitude: schema.number(&row, Field::Latitude),
        longitude: schema.number(&row, Field::Longitude),
        nearest_station: schema.text(&row, Field::NearestStation),
        distance_km: schema.number(&row, Field::DistanceKm),
        avg_noise: schema.number(&row, Field::AvgNoise),
        park_count: schema.number(&row, Field::ParkCount),
        hospital_count: schema.number(&row, Field::HospitalCount),
        shop_count: schema.number(&row, Field::ShopCount),
        name,
        area,
        raw: row,
    }
}
