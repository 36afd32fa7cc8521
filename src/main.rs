// Interactive console host for the ranking engine.
//
// The session is owned here and driven from a numbered menu: load the
// dataset once, then adjust weights and the district filter and inspect the
// resulting recommendations as often as needed.
use chrono::Utc;
use clap::Parser;
use dong_ranker::output::{
    breakdown_rows, category_rows, ranking_rows, render_table, write_csv,
};
use dong_ranker::util::{format_int, format_number, read_trimmed_line};
use dong_ranker::{
    load_regions_from_path, AreaFilter, Change, DashboardConfig, DashboardError, Indicator,
    MapLayout, Session, SnapshotHistory,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Rank Seoul neighborhoods by weighted housing, life, safety and transport scores.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Neighborhood indicator CSV
    #[arg(short, long, env = "DONG_RANKER_DATA", default_value = "최종_이사점수_병합완료.csv")]
    data: PathBuf,

    /// Snapshot history file (JSON)
    #[arg(long, env = "DONG_RANKER_HISTORY", default_value = "snapshots.json")]
    history: PathBuf,

    /// JSON file with session settings and column aliases
    #[arg(short, long, env = "DONG_RANKER_CONFIG")]
    config: Option<PathBuf>,

    /// Length of the recommendation list (overrides the config file)
    #[arg(long, env = "DONG_RANKER_TOP_N")]
    top_n: Option<usize>,

    /// Length of per-indicator rankings (overrides the config file)
    #[arg(long, env = "DONG_RANKER_CATEGORY_TOP_N")]
    category_top_n: Option<usize>,

    /// Snapshots kept in the history file (overrides the config file)
    #[arg(long, env = "DONG_RANKER_HISTORY_CAPACITY")]
    history_capacity: Option<usize>,
}

fn load_config(args: &Args) -> Result<DashboardConfig, DashboardError> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| DashboardError::ReadFile {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&text).map_err(|source| DashboardError::Json {
                path: path.clone(),
                source,
            })?
        }
        None => DashboardConfig::default(),
    };
    if let Some(n) = args.top_n {
        config.top_n = n;
    }
    if let Some(n) = args.category_top_n {
        config.category_top_n = n;
    }
    if let Some(n) = args.history_capacity {
        config.history_capacity = n;
    }
    Ok(config)
}

/// Print `label` and read one trimmed line; `None` once stdin is closed.
fn prompt(label: &str) -> Option<String> {
    print!("{}", label);
    let _ = io::stdout().flush();
    read_trimmed_line(&mut io::stdin().lock())
}

fn read_choice() -> Option<String> {
    prompt("Enter choice: ")
}

fn read_indicator() -> Option<Indicator> {
    match prompt("Indicator (housing/life/safety/transport): ")?.parse::<Indicator>() {
        Ok(i) => Some(i),
        Err(e) => {
            println!("{}\n", e);
            None
        }
    }
}

fn handle_load(session: &mut Session, path: &Path) {
    match load_regions_from_path(path, &session.config().columns) {
        Ok((regions, report)) => {
            session.load(regions);
            println!(
                "Processing dataset... ({} regions loaded, {} districts)",
                format_int(report.total_rows),
                format_int(session.area_options().len().saturating_sub(1))
            );
            if report.short_rows > 0 {
                println!(
                    "Note: {} rows had missing trailing cells.",
                    format_int(report.short_rows)
                );
            }
            if report.positional_ids + report.duplicate_ids > 0 {
                println!(
                    "Info: {} rows use positional ids ({} duplicates).",
                    format_int(report.positional_ids + report.duplicate_ids),
                    format_int(report.duplicate_ids)
                );
            }
            println!();
        }
        Err(e) => eprintln!("Failed to load file: {}\n", e),
    }
}

fn show_recommendations(session: &Session) {
    let view = session.view();
    let w = view.weights;
    println!(
        "Top {} in {} (주거 {} / 생활 {} / 치안 {} / 교통 {})\n",
        session.config().top_n,
        view.area,
        format_number(w.housing, 2),
        format_number(w.life, 2),
        format_number(w.safety, 2),
        format_number(w.transport, 2)
    );
    match render_table(&ranking_rows(view.top()), session.config().top_n) {
        Some(table) => println!("{}\n", table),
        None => println!("No recommendations.\n"),
    }
}

fn handle_weight(session: &mut Session) {
    let Some(indicator) = read_indicator() else {
        return;
    };
    let Some(input) = prompt("Weight (0.00 - 1.00): ") else {
        return;
    };
    match input.parse::<f64>() {
        Ok(v) if v.is_finite() => session.set_weight(indicator, v),
        _ => println!("Invalid weight: {}\n", input),
    }
}

fn handle_area(session: &mut Session) {
    let options = session.area_options();
    for (idx, option) in options.iter().enumerate() {
        println!("[{}] {}", idx, option);
    }
    let Some(choice) = read_choice() else {
        return;
    };
    match choice.parse::<usize>().ok().and_then(|i| options.get(i)) {
        Some(option) => session.set_area(option.clone()),
        None => session.set_area(AreaFilter::from_label(Some(&choice))),
    }
}

fn handle_select(session: &mut Session) {
    let Some(input) = prompt("Rank or region id: ") else {
        return;
    };
    let id = match input.parse::<usize>() {
        Ok(rank) if rank >= 1 => session
            .view()
            .top()
            .get(rank - 1)
            .map(|r| r.id().to_string())
            .unwrap_or(input),
        _ => input,
    };
    if !session.select(&id) {
        println!("No region '{}' in the current ranking.\n", id);
        return;
    }
    if let (Some(region), Some(b)) = (session.selection().get(), session.selected_breakdown()) {
        println!("{} {}", region.area, region.name);
        println!("총점 {}\n", format_number(b.total, 3));
        if let Some(table) = render_table(&breakdown_rows(&b), 4) {
            println!("{}\n", table);
        }
    }
}

fn handle_category(session: &Session) {
    let Some(indicator) = read_indicator() else {
        return;
    };
    println!("{} ranking (top {})\n", indicator.label(), session.config().category_top_n);
    let rows = category_rows(&session.category_ranking(indicator), indicator);
    match render_table(&rows, session.config().category_top_n) {
        Some(table) => println!("{}\n", table),
        None => println!("(no rows)\n"),
    }
}

fn handle_map(session: &Session) {
    match session.map_layout() {
        MapLayout::Empty => println!("No regions to place.\n"),
        MapLayout::Unplaced(names) => {
            println!("No coordinates available; listing instead:");
            for (idx, name) in names.iter().enumerate() {
                println!("{}. {}", idx + 1, name);
            }
            println!();
        }
        MapLayout::Points(points) => {
            for p in &points {
                println!(
                    "{:<24} x {:>6}%  y {:>6}%",
                    p.label,
                    format_number(p.x, 1),
                    format_number(p.y, 1)
                );
            }
            println!();
        }
    }
}

fn handle_save(session: &Session, path: &Path) {
    let snapshot = session.snapshot(Utc::now());
    let Some(target) = snapshot.highlighted.clone() else {
        println!("Nothing to save.\n");
        return;
    };
    let capacity = session.config().history_capacity;
    let result = SnapshotHistory::load_json(path, capacity).and_then(|mut history| {
        history.append(snapshot);
        history.save_json(path).map(|_| history.len())
    });
    match result {
        Ok(count) => println!("Saved {} ({} of {} snapshots kept).\n", target, count, capacity),
        Err(e) => eprintln!("Save error: {}\n", e),
    }
}

fn handle_export(session: &Session) {
    let file = "ranking.csv";
    match write_csv(Path::new(file), &ranking_rows(&session.view().ranked)) {
        Ok(()) => println!("(Full ranking exported to {})\n", file),
        Err(e) => eprintln!("Write error: {}\n", e),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = match load_config(&args) {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "falling back to default settings");
            DashboardConfig::default()
        }
    };
    info!(data = %args.data.display(), top_n = config.top_n, "starting session");

    let mut session = Session::new(config);
    session.subscribe(|change, view| {
        let reason = match change {
            Change::Dataset => "dataset",
            Change::Weights => "weights",
            Change::Area => "district",
        };
        let leader = view
            .top()
            .first()
            .map(|r| r.region.display_name())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "Ranking updated ({}): {} regions, #1 {}\n",
            reason,
            format_int(view.ranked.len()),
            leader
        );
    });

    loop {
        println!("Select an action:");
        println!("[1] Load the file");
        println!("[2] Show recommendations");
        println!("[3] Adjust a weight");
        println!("[4] Reset weights");
        println!("[5] Choose district");
        println!("[6] Select a region");
        println!("[7] Category ranking");
        println!("[8] Map preview");
        println!("[9] Save snapshot");
        println!("[10] Export ranking CSV");
        println!("[0] Exit\n");
        let Some(choice) = read_choice() else {
            println!("\nInput closed. Exiting the program.");
            break;
        };
        match choice.as_str() {
            "1" => handle_load(&mut session, &args.data),
            "2" => show_recommendations(&session),
            "3" => handle_weight(&mut session),
            "4" => session.reset_weights(),
            "5" => handle_area(&mut session),
            "6" => handle_select(&mut session),
            "7" => handle_category(&session),
            "8" => handle_map(&session),
            "9" => handle_save(&session, &args.history),
            "10" => handle_export(&session),
            "0" => {
                println!("Exiting the program.");
                break;
            }
            _ => println!("Invalid choice. Please enter 0-10.\n"),
        }
    }
}
