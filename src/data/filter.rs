use std::collections::BTreeSet;

use super::model::{parse_number, CellValue, FilterCriteria, DEFAULT_COLOR};

/// Fixed column positions of the differential-expression table.
pub const LOG2FC_COLUMN: usize = 2;
pub const PVALUE_COLUMN: usize = 5;
pub const CATEGORY_COLUMN: usize = 7;

/// Category that is always offered, meaning "no particular category".
pub const ALL_CATEGORIES: &str = "All";

// ---------------------------------------------------------------------------
// KeptRow – a row that survived filtering, with its derived cells
// ---------------------------------------------------------------------------

/// A data row that passed validation and the threshold filter.
#[derive(Debug, Clone, PartialEq)]
pub struct KeptRow {
    /// Raw cells, padded or truncated to the header width.
    pub cells: Vec<String>,
    pub neg_log10_pvalue: f64,
    pub color: String,
}

impl KeptRow {
    /// Value at a position of the extended label sequence: raw cells first,
    /// then `negLog10Pvalue`, then `color`.
    pub fn value_at(&self, index: usize) -> CellValue {
        let width = self.cells.len();
        match index {
            i if i < width => CellValue::Text(self.cells[i].clone()),
            i if i == width => CellValue::Number(self.neg_log10_pvalue),
            _ => CellValue::Text(self.color.clone()),
        }
    }
}

/// Why a row was left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// p-value missing, non-numeric or zero.
    InvalidPValue,
    /// log2 fold-change missing or non-numeric.
    InvalidLog2FoldChange,
    /// Rejected by the threshold predicate.
    BelowThreshold,
}

/// Output of the filter pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOutcome {
    pub rows: Vec<KeptRow>,
    /// Distinct category values plus `"All"`, sorted.
    pub categories: Vec<String>,
    pub invalid_pvalue: usize,
    pub invalid_log2fc: usize,
    pub below_threshold: usize,
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Threshold predicate: `true` means the row is dropped.
///
/// Evaluated literally as `p > pT || (fc < fcT && fc > -fcT)`.
// TODO: confirm with the product side whether the intent is
// `|fc| >= fcT && p <= pT`; kept literal until then.
pub fn is_excluded(p_value: f64, log2_fc: f64, criteria: &FilterCriteria) -> bool {
    let fc_t = criteria.log2_fc_threshold;
    p_value > criteria.p_value_threshold || (log2_fc < fc_t && log2_fc > -fc_t)
}

/// Check a single row. Checks run in order and stop at the first failure.
pub fn classify_row(
    row: &[String],
    criteria: &FilterCriteria,
) -> Result<(f64, f64), Exclusion> {
    let p_value = row
        .get(PVALUE_COLUMN)
        .and_then(|c| parse_number(c))
        .filter(|p| *p != 0.0)
        .ok_or(Exclusion::InvalidPValue)?;

    let log2_fc = row
        .get(LOG2FC_COLUMN)
        .and_then(|c| parse_number(c))
        .ok_or(Exclusion::InvalidLog2FoldChange)?;

    if is_excluded(p_value, log2_fc, criteria) {
        return Err(Exclusion::BelowThreshold);
    }
    Ok((p_value, log2_fc))
}

/// Evaluate every row exactly once and return the survivors with their
/// derived cells, plus the sorted category list.
pub fn filter_rows(
    rows: &[Vec<String>],
    header_width: usize,
    criteria: &FilterCriteria,
) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();
    let mut categories: BTreeSet<String> = BTreeSet::new();

    for row in rows {
        let p_value = match classify_row(row, criteria) {
            Ok((p, _)) => p,
            Err(Exclusion::InvalidPValue) => {
                outcome.invalid_pvalue += 1;
                continue;
            }
            Err(Exclusion::InvalidLog2FoldChange) => {
                outcome.invalid_log2fc += 1;
                continue;
            }
            Err(Exclusion::BelowThreshold) => {
                outcome.below_threshold += 1;
                continue;
            }
        };

        if let Some(category) = row.get(CATEGORY_COLUMN) {
            categories.insert(category.clone());
        }

        let mut cells = row.clone();
        cells.resize(header_width, String::new());

        outcome.rows.push(KeptRow {
            cells,
            neg_log10_pvalue: -p_value.log10(),
            color: DEFAULT_COLOR.to_string(),
        });
    }

    categories.insert(ALL_CATEGORIES.to_string());
    outcome.categories = categories.into_iter().collect();

    log::debug!(
        "filter: kept {}, invalid p-value {}, invalid log2FC {}, below threshold {}",
        outcome.rows.len(),
        outcome.invalid_pvalue,
        outcome.invalid_log2fc,
        outcome.below_threshold
    );
    outcome
}
