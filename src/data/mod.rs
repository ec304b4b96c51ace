/// Data layer: core types, loading, and validation.
///
/// Architecture:
/// ```text
///      .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read file → Vec<RawRow>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ validate  │  dates, column counts, numbers (first failure aborts)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ AbundanceDataset │  species header + dated records
///   └─────────────────┘
/// ```

pub mod loader;
pub mod model;
pub mod validate;
