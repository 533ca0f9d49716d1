/// Data layer: loading, normalization and chart queries.
///
/// Architecture:
/// ```text
///  HumedadMinima.txt  HumedadMaxima.txt  TemperaturaMinima.txt
///  TemperaturaMaxima.txt  lluvia.txt          (`;`-separated)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read each source, check columns, concatenate
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  dd-mm-yyyy dates, decimal-comma values
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  immutable Vec<Observation>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  time series, annual means, correlation pairs
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod loader;
pub mod model;
pub mod normalize;
