use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Label appended to the header for the derived `-log10(p)` column.
pub const NEG_LOG10_PVALUE: &str = "negLog10Pvalue";

/// Label appended to the header for the derived colour column.
pub const COLOR: &str = "color";

/// Colour assigned to every row that survives filtering.
pub const DEFAULT_COLOR: &str = "blue";

// ---------------------------------------------------------------------------
// CellValue – a single value in a record
// ---------------------------------------------------------------------------

/// A record value. Cells read from the table stay textual even when they
/// look numeric; only the derived `-log10(p)` column is stored as a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Numeric interpretation of the value, if any.
    ///
    /// Text cells are parsed strictly: the whole trimmed cell must be a
    /// number. Non-finite values never count as numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Text(s) => parse_number(s),
            CellValue::Number(v) if v.is_finite() => Some(*v),
            CellValue::Number(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Number(_) => None,
        }
    }
}

/// Parse a table cell as a finite number.
///
/// `Inf`, `-Inf`, `NaN` and literals that overflow (`1e400`) are rejected,
/// so rows carrying them are excluded and never reach the statistics.
pub fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// FilterCriteria – caller supplied thresholds
// ---------------------------------------------------------------------------

/// Significance thresholds supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub p_value_threshold: f64,
    #[serde(rename = "log2FCThreshold")]
    pub log2_fc_threshold: f64,
}

impl FilterCriteria {
    pub fn new(p_value_threshold: f64, log2_fc_threshold: f64) -> Self {
        Self {
            p_value_threshold,
            log2_fc_threshold,
        }
    }
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self::new(0.05, 1.0)
    }
}

// ---------------------------------------------------------------------------
// Record – one surviving row keyed by label
// ---------------------------------------------------------------------------

/// One surviving row, keyed by the extended header labels in header order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: Vec<(String, CellValue)>,
}

impl Record {
    /// Zip a kept row positionally against the extended label sequence.
    pub fn from_row(labels: &[String], row: &super::filter::KeptRow) -> Self {
        let fields = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), row.value_at(i)))
            .collect();
        Record { fields }
    }

    /// Look up a value by label. With duplicate labels the last one wins.
    pub fn get(&self, label: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .rev()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
    }

    /// Labels in header order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(l, _)| l.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (label, value) in &self.fields {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// ColumnStatistics / IngestOutput
// ---------------------------------------------------------------------------

/// Summary of one numeric column over the filtered rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStatistics {
    /// `[min, max]`
    pub range: [f64; 2],
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

/// The pipeline result handed to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestOutput {
    pub records: Vec<Record>,
    pub statistics: BTreeMap<String, ColumnStatistics>,
    /// Distinct category values plus `"All"`, sorted.
    pub categories: Vec<String>,
}
