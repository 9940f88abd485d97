/// Data layer: record types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .json / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → EnrollmentDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────────┐
///   │ EnrollmentDataset │  Vec<EnrollmentRecord>, language index
///   └───────────────────┘
///        │
///        ▼
///   ┌──────────┐     ┌──────────┐
///   │  filter   │ ──▶ │ aggregate │  per-year sums by term and by level
///   └──────────┘     └──────────┘
///                          │
///                          ▼
///                    ┌──────────┐
///                    │  export   │  series → CSV
///                    └──────────┘
/// ```

pub mod aggregate;
pub mod catalog;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
