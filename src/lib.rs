//! Ingestion of differential-expression tables for volcano plots.
//!
//! A tab-delimited table (log2 fold-change in column 2, p-value in column 5,
//! gene name in column 7) is filtered against two thresholds, extended with
//! `negLog10Pvalue` and `color`, and summarised per numeric column.
//!
//! ```no_run
//! use volcano_ingest::data::model::FilterCriteria;
//! use volcano_ingest::pipeline::ingest;
//! use volcano_ingest::source::DatasetSelector;
//!
//! # async fn run() {
//! let selector: DatasetSelector = "mouse".parse().unwrap();
//! if let Some(output) = ingest(&selector, FilterCriteria::new(0.05, 1.0)).await {
//!     println!("{} records", output.records.len());
//! }
//! # }
//! ```

pub mod cli;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod source;
