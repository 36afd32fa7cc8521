//! End-to-end behaviour: raw rows through normalization, scoring and ranking.
use dong_ranker::{
    load_regions, normalize, rank, top_n, AreaFilter, ColumnSchema, Indicator, RawRow, Session,
    WeightManager, WeightVector,
};
use rstest::{fixture, rstest};
use std::sync::Arc;

fn row(cells: &[(&str, &str)]) -> RawRow {
    cells.iter().copied().collect()
}

#[fixture]
fn two_regions() -> Vec<Arc<dong_ranker::Region>> {
    let rows = [
        row(&[
            ("자치구", "강남구"),
            ("법정동", "역삼동"),
            ("주거점수", "0.9"),
            ("생활점수", "0.7"),
            ("치안점수", "0.8"),
            ("교통점수", "0.6"),
        ]),
        row(&[
            ("자치구", "마포구"),
            ("법정동", "합정동"),
            ("주거점수", "0.5"),
            ("생활점수", "0.9"),
            ("치안점수", "0.6"),
            ("교통점수", "0.7"),
        ]),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(i, r)| Arc::new(normalize(r, i)))
        .collect()
}

#[rstest]
fn default_weights_rank_yeoksam_first(two_regions: Vec<Arc<dong_ranker::Region>>) {
    let ranked = rank(&two_regions, &WeightVector::default(), &AreaFilter::All);

    let names: Vec<&str> = ranked.iter().map(|r| r.region.name.as_str()).collect();
    assert_eq!(names, vec!["역삼동", "합정동"]);
    assert!((ranked[0].score - 0.75).abs() < 1e-12);
    assert!((ranked[1].score - 0.675).abs() < 1e-12);
}

#[rstest]
fn ranking_is_idempotent(two_regions: Vec<Arc<dong_ranker::Region>>) {
    let weights = WeightVector::default().with(Indicator::Transport, 0.8);
    let first = rank(&two_regions, &weights, &AreaFilter::All);
    let second = rank(&two_regions, &weights, &AreaFilter::All);
    assert_eq!(first, second);
}

#[rstest]
fn ranking_does_not_touch_base_records(two_regions: Vec<Arc<dong_ranker::Region>>) {
    let before: Vec<dong_ranker::Region> = two_regions.iter().map(|r| (**r).clone()).collect();
    let ranked = rank(&two_regions, &WeightVector::default(), &AreaFilter::All);
    let after: Vec<dong_ranker::Region> = two_regions.iter().map(|r| (**r).clone()).collect();
    assert_eq!(before, after);
    assert!(Arc::ptr_eq(&ranked[0].region, &two_regions[0]));
}

#[test]
fn csv_text_to_top_ten() {
    let mut text = String::from("\u{feff}자치구,법정동,주거점수,생활점수,치안점수,교통점수\r\n");
    for i in 0..15 {
        let v = f64::from(i) / 20.0;
        text.push_str(&format!("구{},동{},{v},{v},{v},{v}\r\n", i % 3, i));
    }
    let (regions, report) = load_regions(&text, &ColumnSchema::seoul());
    assert_eq!(report.total_rows, 15);

    let ranked = rank(&regions, &WeightVector::default(), &AreaFilter::All);
    let top = top_n(&ranked, 10);
    let names: Vec<&str> = top.iter().map(|r| r.region.name.as_str()).collect();
    assert_eq!(names.first(), Some(&"동14"));
    assert_eq!(names.last(), Some(&"동5"));
    assert_eq!(top.len(), 10);
}

#[test]
fn malformed_cells_degrade_to_defaults() {
    let text = "자치구,법정동,주거점수,생활점수,치안점수,교통점수\n강남구,역삼동,abc,,0.5\n";
    let (regions, report) = load_regions(text, &ColumnSchema::seoul());
    let r = &regions[0];
    assert_eq!(report.short_rows, 1);
    assert_eq!((r.housing, r.life, r.safety, r.transport), (0.0, 0.0, 0.5, 0.0));
}

#[test]
fn reset_after_any_updates_is_default() {
    let mut manager = WeightManager::new();
    for (i, indicator) in Indicator::ALL.into_iter().cycle().take(9).enumerate() {
        manager.set_weight(indicator, i as f64 * 0.05);
    }
    manager.reset();
    assert_eq!(manager.current(), WeightVector::default());
}

#[test]
fn session_drives_the_whole_flow() {
    let mut session = Session::default();
    let report = session.load_text(
        "자치구,법정동,주거점수,생활점수,치안점수,교통점수,위도,경도\n\
         강남구,역삼동,0.9,0.7,0.8,0.6,37.50,127.03\n\
         마포구,합정동,0.5,0.9,0.6,0.7,37.55,126.91\n",
    );
    assert_eq!(report.total_rows, 2);
    assert_eq!(session.view().top()[0].region.name, "역삼동");

    session.set_area(AreaFilter::from_label(Some("마포구")));
    assert!(session.select("마포구-합정동"));
    let snapshot = session.snapshot(chrono::Utc::now());
    assert_eq!(snapshot.highlighted.as_deref(), Some("마포구-합정동"));
    assert_eq!(snapshot.top.len(), 1);

    session.set_area(AreaFilter::from_label(Some("전체")));
    assert!(session.selection().is_empty());
    assert!(matches!(session.map_layout(), dong_ranker::MapLayout::Points(ref p) if p.len() == 2));
}
