//! Property checks for the ranking invariants.
use dong_ranker::{normalize, rank, top_n, AreaFilter, RawRow, Region, WeightVector};
use proptest::prelude::*;
use std::sync::Arc;

const AREAS: [&str; 3] = ["강남구", "마포구", "종로구"];

fn region_strategy() -> impl Strategy<Value = (usize, [f64; 4])> {
    (0..AREAS.len(), prop::array::uniform4(0.0f64..1.0))
}

fn build(seeds: &[(usize, [f64; 4])]) -> Vec<Arc<Region>> {
    seeds
        .iter()
        .enumerate()
        .map(|(i, (area, scores))| {
            let name = format!("동{}", i);
            let values = scores.map(|v| v.to_string());
            let row: RawRow = [
                ("자치구", AREAS[*area].to_string()),
                ("법정동", name),
                ("주거점수", values[0].clone()),
                ("생활점수", values[1].clone()),
                ("치안점수", values[2].clone()),
                ("교통점수", values[3].clone()),
            ]
            .into_iter()
            .collect();
            Arc::new(normalize(row, i))
        })
        .collect()
}

fn weights_strategy() -> impl Strategy<Value = WeightVector> {
    prop::array::uniform4(0.0f64..=1.0).prop_map(|[housing, life, safety, transport]| WeightVector {
        housing,
        life,
        safety,
        transport,
    })
}

proptest! {
    #[test]
    fn ranking_is_sorted_and_deterministic(
        seeds in prop::collection::vec(region_strategy(), 0..40),
        weights in weights_strategy(),
    ) {
        let regions = build(&seeds);
        let ranked = rank(&regions, &weights, &AreaFilter::All);
        prop_assert_eq!(ranked.len(), regions.len());
        prop_assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        prop_assert_eq!(&ranked, &rank(&regions, &weights, &AreaFilter::All));
    }

    #[test]
    fn filter_keeps_only_the_area(
        seeds in prop::collection::vec(region_strategy(), 0..40),
        area in 0..AREAS.len(),
    ) {
        let regions = build(&seeds);
        let filter = AreaFilter::Area(AREAS[area].to_string());
        let ranked = rank(&regions, &WeightVector::default(), &filter);
        prop_assert!(ranked.iter().all(|r| r.region.area == AREAS[area]));
        let expected = seeds.iter().filter(|(a, _)| *a == area).count();
        prop_assert_eq!(ranked.len(), expected);
    }

    #[test]
    fn top_n_never_exceeds_n(
        seeds in prop::collection::vec(region_strategy(), 0..30),
        n in 0usize..20,
    ) {
        let regions = build(&seeds);
        let ranked = rank(&regions, &WeightVector::default(), &AreaFilter::All);
        let top = top_n(&ranked, n);
        prop_assert_eq!(top.len(), n.min(ranked.len()));
        prop_assert_eq!(top, &ranked[..top.len()]);
    }

    #[test]
    fn equal_scores_keep_input_order(count in 1usize..20) {
        let regions = build(&vec![(0, [0.5; 4]); count]);
        let ranked = rank(&regions, &WeightVector::default(), &AreaFilter::All);
        let ids: Vec<&str> = ranked.iter().map(|r| r.id()).collect();
        let expected: Vec<&str> = regions.iter().map(|r| r.id.as_str()).collect();
        prop_assert_eq!(ids, expected);
    }
}
