/// Data layer: core types, loading, and the chart pipeline.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, site/booster index, bounds
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ pipeline  │  site selection + payload range → chart inputs
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod pipeline;
