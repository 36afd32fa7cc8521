//! Point placement for the candidate map.
//!
//! Coordinates are scaled linearly into a `0..=100` percentage box; there is
//! no projection. North is up, so `y` grows as latitude falls.
use crate::types::Region;
use crate::util::min_max;
use serde::Serialize;
use std::sync::Arc;

/// Span used when every point shares a latitude (or longitude).
const MIN_SPAN: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub id: String,
    pub label: String,
    /// Percent from the left edge.
    pub x: f64,
    /// Percent from the top edge.
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum MapLayout {
    Empty,
    /// Regions exist but none has usable coordinates; shown as a plain list.
    Unplaced(Vec<String>),
    Points(Vec<MapPoint>),
}

fn has_coordinates(region: &Region) -> bool {
    region.latitude.is_finite()
        && region.longitude.is_finite()
        && !(region.latitude == 0.0 && region.longitude == 0.0)
}

fn span(lo: f64, hi: f64) -> f64 {
    let s = hi - lo;
    if s == 0.0 {
        MIN_SPAN
    } else {
        s
    }
}

pub fn place_points<'a, I>(regions: I) -> MapLayout
where
    I: IntoIterator<Item = &'a Arc<Region>>,
{
    let regions: Vec<&Arc<Region>> = regions.into_iter().collect();
    if regions.is_empty() {
        return MapLayout::Empty;
    }

    let placed: Vec<&Arc<Region>> = regions.iter().copied().filter(|r| has_coordinates(r)).collect();
    let (Some((min_lat, max_lat)), Some((min_lng, max_lng))) = (
        min_max(placed.iter().map(|r| r.latitude)),
        min_max(placed.iter().map(|r| r.longitude)),
    ) else {
        return MapLayout::Unplaced(regions.iter().map(|r| r.display_name()).collect());
    };

    let lat_span = span(min_lat, max_lat);
    let lng_span = span(min_lng, max_lng);
    MapLayout::Points(
        placed
            .into_iter()
            .map(|r| MapPoint {
                id: r.id.clone(),
                label: r.display_name(),
                x: (r.longitude - min_lng) / lng_span * 100.0,
                y: (max_lat - r.latitude) / lat_span * 100.0,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::types::RawRow;

    fn at(name: &str, lat: &str, lng: &str) -> Arc<Region> {
        let row: RawRow = [("자치구", "구"), ("법정동", name), ("위도", lat), ("경도", lng)]
            .into_iter()
            .collect();
        Arc::new(normalize(row, 0))
    }

    #[test]
    fn no_regions_is_empty() {
        assert_eq!(place_points(&Vec::<Arc<Region>>::new()), MapLayout::Empty);
    }

    #[test]
    fn regions_without_coordinates_fall_back_to_a_list() {
        let regions = vec![at("가동", "", ""), at("나동", "0", "0")];
        assert_eq!(
            place_points(&regions),
            MapLayout::Unplaced(vec!["가동 (구)".to_string(), "나동 (구)".to_string()])
        );
    }

    #[test]
    fn scales_to_percentages_with_north_up() {
        let regions = vec![
            at("북서", "37.6", "126.9"),
            at("남동", "37.4", "127.1"),
            at("무좌표", "", ""),
        ];
        let MapLayout::Points(points) = place_points(&regions) else {
            panic!("expected points");
        };
        assert_eq!(points.len(), 2);
        assert!((points[0].x - 0.0).abs() < 1e-9);
        assert!((points[0].y - 0.0).abs() < 1e-9);
        assert!((points[1].x - 100.0).abs() < 1e-9);
        assert!((points[1].y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn single_point_uses_minimum_span() {
        let MapLayout::Points(points) = place_points(&vec![at("한동", "37.5", "127.0")]) else {
            panic!("expected points");
        };
        assert_eq!((points[0].x, points[0].y), (0.0, 0.0));
    }
}
