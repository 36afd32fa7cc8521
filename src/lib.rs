//! Neighborhood ranking engine.
//!
//! Parses a Seoul neighborhood indicator table, normalizes each row into a
//! [`Region`], scores regions with a user-adjustable [`WeightVector`] and
//! ranks them by descending composite score, optionally restricted to one
//! administrative area (자치구). [`Session`] ties the pieces together for a
//! host application: it owns the weights, the area filter and the selection
//! and notifies subscribers after every recompute.
//!
//! ```
//! use dong_ranker::{AreaFilter, Session};
//!
//! let mut session = Session::default();
//! session.load_text("자치구,법정동,주거점수,생활점수,치안점수,교통점수\n강남구,역삼동,0.9,0.7,0.8,0.6\n");
//! session.set_area(AreaFilter::from_label(Some("강남구")));
//! assert_eq!(session.view().top()[0].region.name, "역삼동");
//! ```
pub mod config;
pub mod error;
pub mod history;
pub mod loader;
pub mod map;
pub mod normalize;
pub mod output;
pub mod ranking;
pub mod scoring;
pub mod selection;
pub mod session;
pub mod types;
pub mod util;
pub mod weights;

pub use config::DashboardConfig;
pub use error::{DashboardError, UnknownIndicator};
pub use history::{Snapshot, SnapshotEntry, SnapshotHistory};
pub use loader::{load_regions, load_regions_from_path, parse_table, LoadReport, ParsedTable};
pub use map::{place_points, MapLayout, MapPoint};
pub use normalize::{normalize, normalize_with, ColumnSchema, Field};
pub use ranking::{area_options, rank, rank_by_indicator, top_n, AreaFilter, ALL_AREAS};
pub use scoring::{breakdown, score, Contribution, ScoreBreakdown};
pub use selection::Selection;
pub use session::{recompute, Change, RankedView, Session};
pub use types::{Indicator, RawRow, Region, ScoredRegion};
pub use weights::{WeightManager, WeightState, WeightVector};
