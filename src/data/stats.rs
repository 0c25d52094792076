use std::collections::BTreeMap;

use super::filter::KeptRow;
use super::model::ColumnStatistics;

/// Per-label summary statistics over the kept rows.
///
/// Each column is examined by position. Values that are not numeric are
/// skipped. A column with no numeric values gets no entry at all, which is
/// how text columns such as gene names and `color` drop out.
pub fn column_statistics(
    labels: &[String],
    rows: &[KeptRow],
) -> BTreeMap<String, ColumnStatistics> {
    labels
        .iter()
        .enumerate()
        .filter_map(|(i, label)| {
            let column: Vec<f64> = rows
                .iter()
                .filter_map(|row| row.value_at(i).as_f64())
                .collect();
            summarize(&column).map(|stats| (label.clone(), stats))
        })
        .collect()
}

/// Range, mean and population standard deviation of a numeric column.
/// Returns `None` for an empty column.
pub fn summarize(values: &[f64]) -> Option<ColumnStatistics> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / n;

    let variance = values
        .iter()
        .map(|&x| {
            let diff = x - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;

    Some(ColumnStatistics {
        range: [min, max],
        mean,
        std_dev: variance.sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kept(cells: &[&str], neg_log10_pvalue: f64) -> KeptRow {
        KeptRow {
            cells: cells.iter().map(|s| s.to_string()).collect(),
            neg_log10_pvalue,
            color: "blue".to_string(),
        }
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn one_two_three() {
        let stats = summarize(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(stats.range, [1.0, 3.0]);
        assert!((stats.mean - 2.0).abs() < 1e-12);
        assert!((stats.std_dev - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn single_observation() {
        let stats = summarize(&[4.5]).unwrap();
        assert_eq!(stats.range, [4.5, 4.5]);
        assert_eq!(stats.mean, 4.5);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn empty_column_has_no_summary() {
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn text_columns_and_color_omitted() {
        let labels = labels(&["name", "score", "negLog10Pvalue", "color"]);
        let rows = vec![kept(&["Foo", "1"], 2.0), kept(&["Bar", "3"], 1.0)];
        let stats = column_statistics(&labels, &rows);

        let keys: Vec<&str> = stats.keys().map(String::as_str).collect();
        assert_eq!(keys, ["negLog10Pvalue", "score"]);
        assert_eq!(stats["score"].range, [1.0, 3.0]);
        assert_eq!(stats["negLog10Pvalue"].mean, 1.5);
    }

    #[test]
    fn non_numeric_values_skipped_not_fatal() {
        let labels = labels(&["padj", "negLog10Pvalue", "color"]);
        let rows = vec![
            kept(&["NA"], 1.0),
            kept(&["0.5"], 1.0),
            kept(&[""], f64::NAN),
            kept(&["1.5"], 1.0),
        ];
        let stats = column_statistics(&labels, &rows);
        assert_eq!(stats["padj"].range, [0.5, 1.5]);
        assert_eq!(stats["padj"].mean, 1.0);
        // NaN from a negative p-value is skipped like any non-number.
        assert_eq!(stats["negLog10Pvalue"].std_dev, 0.0);
    }

    #[test]
    fn no_rows_no_statistics() {
        let stats = column_statistics(&labels(&["a", "negLog10Pvalue", "color"]), &[]);
        assert!(stats.is_empty());
    }

    #[test]
    fn bounds_hold_for_every_value() {
        let values = [0.3, -7.25, 12.0, 4.0, 4.0];
        let stats = summarize(&values).unwrap();
        for v in values {
            assert!(stats.range[0] <= v && v <= stats.range[1]);
        }
        assert!(stats.std_dev >= 0.0);
    }
}
