//! Data layer: parsing, filtering, record building and statistics.
//!
//! Architecture:
//! ```text
//!   tab-delimited text
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  split lines → labels + raw rows
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  validate, threshold, derive → kept rows + categories
//!   └──────────┘
//!        │
//!        ├──────────────────────┐
//!        ▼                      ▼
//!   ┌──────────────┐     ┌──────────┐
//!   │ model::Record │     │  stats    │  per-column range / mean / stdDev
//!   └──────────────┘     └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
