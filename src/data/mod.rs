/// Data layer: typed records, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate file → SalaryDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ SalaryDataset │  Vec<SalaryRecord>, distinct values per dimension
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSelection → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────────┐
///   │ metrics  /  charts  │  → DashboardSnapshot
///   └─────────────────────┘
/// ```

pub mod charts;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod snapshot;
