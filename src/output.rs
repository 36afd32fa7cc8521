use crate::error::DashboardError;
use crate::scoring::ScoreBreakdown;
use crate::types::{
    BreakdownRow, CategoryRow, Indicator, RankingRow, Region, ScoredRegion,
};
use crate::util::format_number;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), DashboardError> {
    let csv_err = |source| DashboardError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut wtr = csv::Writer::from_path(path).map_err(csv_err)?;
    for r in rows {
        wtr.serialize(r).map_err(csv_err)?;
    }
    wtr.flush().map_err(|source| DashboardError::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), DashboardError> {
    let s = serde_json::to_string_pretty(value).map_err(|source| DashboardError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, s).map_err(|source| DashboardError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Render rows as a Markdown table; `None` when there is nothing to show.
pub fn render_table<T>(rows: &[T], max_rows: usize) -> Option<String>
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        return None;
    }
    Some(Table::new(slice).with(Style::markdown()).to_string())
}

pub fn ranking_rows(ranked: &[ScoredRegion]) -> Vec<RankingRow> {
    ranked
        .iter()
        .enumerate()
        .map(|(idx, s)| RankingRow {
            rank: idx + 1,
            id: s.region.id.clone(),
            region: s.region.display_name(),
            housing: format_number(s.region.housing, 2),
            life: format_number(s.region.life, 2),
            safety: format_number(s.region.safety, 2),
            transport: format_number(s.region.transport, 2),
            score: format_number(s.score, 3),
        })
        .collect()
}

/// Supporting figures shown next to each indicator on its category page.
fn category_detail(region: &Region, indicator: Indicator) -> String {
    match indicator {
        Indicator::Housing => format!(
            "noise {} dB, parks {}",
            format_number(region.avg_noise, 1),
            format_number(region.park_count, 0)
        ),
        Indicator::Life => format!(
            "hospitals {}, shops {}, parks {}",
            format_number(region.hospital_count, 0),
            format_number(region.shop_count, 0),
            format_number(region.park_count, 0)
        ),
        Indicator::Safety => String::new(),
        Indicator::Transport => {
            let station = if region.nearest_station.is_empty() {
                "-"
            } else {
                region.nearest_station.as_str()
            };
            format!("{} ({} km)", station, format_number(region.distance_km, 2))
        }
    }
}

pub fn category_rows(regions: &[Arc<Region>], indicator: Indicator) -> Vec<CategoryRow> {
    regions
        .iter()
        .enumerate()
        .map(|(idx, r)| CategoryRow {
            rank: idx + 1,
            region: r.display_name(),
            value: format_number(r.indicator(indicator), 2),
            detail: category_detail(r, indicator),
        })
        .collect()
}

pub fn breakdown_rows(breakdown: &ScoreBreakdown) -> Vec<BreakdownRow> {
    breakdown
        .contributions
        .iter()
        .map(|c| BreakdownRow {
            indicator: c.indicator.label().to_string(),
            value: format_number(c.value, 2),
            weight: format_number(c.weight, 2),
            contribution: format_number(c.product, 3),
        })
        .collect()
}
