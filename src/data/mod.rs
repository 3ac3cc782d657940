/// Data layer: core types, loading, filtering, aggregation, and export.
///
/// Architecture:
/// ```text
///   books .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, derive rating_score (memoized via TableCache)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ BookTable  │  Vec<BookRecord>, immutable after load
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply criteria → ordered row indices
///   └──────────┘
///        │
///        ├────────────► stats   (KPIs, counts, top-N, trend)
///        └────────────► export  (final_filtered_report.csv)
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
