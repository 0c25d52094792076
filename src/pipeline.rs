//! Sequences retrieval, parsing, filtering, record building and statistics.

use crate::data::filter::filter_rows;
use crate::data::loader::parse_table;
use crate::data::model::{FilterCriteria, IngestOutput, Record};
use crate::data::stats::column_statistics;
use crate::error::Result;
use crate::source::{fetch_text, DatasetSelector, Locator};

/// Ingest a dataset, logging and swallowing any retrieval failure.
///
/// `None` is the empty result: no partial data is ever returned.
pub async fn ingest(selector: &DatasetSelector, criteria: FilterCriteria) -> Option<IngestOutput> {
    let locator = selector.locator();
    match try_ingest(&locator, criteria).await {
        Ok(output) => Some(output),
        Err(e) => {
            log::error!("Error fetching data: {e}");
            None
        }
    }
}

/// Ingest from a locator, surfacing retrieval failures to the caller.
pub async fn try_ingest(locator: &Locator, criteria: FilterCriteria) -> Result<IngestOutput> {
    log::info!("fetching {locator}");
    let text = fetch_text(locator).await?;
    Ok(process_text(&text, criteria))
}

/// The synchronous part of the pipeline, from full text to output.
pub fn process_text(text: &str, criteria: FilterCriteria) -> IngestOutput {
    let table = parse_table(text);
    let outcome = filter_rows(&table.rows, table.header_width, &criteria);

    let records: Vec<Record> = outcome
        .rows
        .iter()
        .map(|row| Record::from_row(&table.labels, row))
        .collect();
    let statistics = column_statistics(&table.labels, &outcome.rows);

    log::info!(
        "kept {} of {} rows, {} numeric columns, {} categories",
        records.len(),
        table.rows.len(),
        statistics.len(),
        outcome.categories.len()
    );

    IngestOutput {
        records,
        statistics,
        categories: outcome.categories,
    }
}
