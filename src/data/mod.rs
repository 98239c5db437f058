/// Data layer: core types, loading, imputation and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawRecord>  (LoadError)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  impute   │  median / mode fill → Vec<Record>  (ImputationError)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ DatasetStore  │  Arc<Dataset>, education-level domain
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterState predicates → filtered rows  (InvalidFilterError)
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod impute;
pub mod loader;
pub mod model;
pub mod stats;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;
