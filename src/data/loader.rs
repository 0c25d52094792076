use csv::{ReaderBuilder, StringRecord};

use super::model::{COLOR, NEG_LOG10_PVALUE};

/// Header labels and raw rows of a tab-delimited table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    /// Header labels followed by the two derived labels.
    pub labels: Vec<String>,
    /// Number of labels taken from the header line itself.
    pub header_width: usize,
    /// Data rows, one string cell per tab-separated field.
    pub rows: Vec<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Split raw text into header labels and data rows.
///
/// Line 0 is the header, even when it is blank (a blank header has no
/// labels). `negLog10Pvalue` and `color` are appended to it so every record
/// built later carries them. The remaining lines are data rows. Cells are
/// split on tabs literally: quotes have no special meaning and rows may be
/// ragged. Blank data lines carry no row.
pub fn parse_table(text: &str) -> ParsedTable {
    let (header_line, body) = text.split_once('\n').unwrap_or((text, ""));

    let mut labels = read_lines(header_line).into_iter().next().unwrap_or_default();
    let header_width = labels.len();
    labels.push(NEG_LOG10_PVALUE.to_string());
    labels.push(COLOR.to_string());

    let rows = read_lines(body);
    log::debug!("parsed {header_width} header labels and {} rows", rows.len());

    ParsedTable {
        labels,
        header_width,
        rows,
    }
}

/// Tokenize tab-separated lines. The reader skips blank lines.
fn read_lines(text: &str) -> Vec<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());

    reader
        .records()
        .filter_map(|result| match result {
            Ok(record) => Some(record_to_cells(&record)),
            // Only invalid UTF-8 can fail here, and `text` is already a str.
            Err(e) => {
                log::warn!("skipping unreadable line: {e}");
                None
            }
        })
        .collect()
}

fn record_to_cells(record: &StringRecord) -> Vec<String> {
    record.iter().map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_gets_derived_labels() {
        let table = parse_table("gene\tlog2FC\tpval\nA\t1\t0.1\n");
        assert_eq!(table.header_width, 3);
        assert_eq!(
            table.labels,
            ["gene", "log2FC", "pval", "negLog10Pvalue", "color"]
        );
        assert_eq!(table.rows, vec![vec!["A", "1", "0.1"]]);
    }

    #[test]
    fn ragged_rows_and_crlf() {
        let table = parse_table("a\tb\tc\r\n1\t2\r\n\r\n3\t4\t5\t6\r\n");
        assert_eq!(table.header_width, 3);
        assert_eq!(table.rows, vec![vec!["1", "2"], vec!["3", "4", "5", "6"]]);
    }

    #[test]
    fn quotes_are_literal() {
        let table = parse_table("a\tb\n\"x\ty\"\tz\n");
        assert_eq!(table.rows, vec![vec!["\"x", "y\"", "z"]]);
    }

    #[test]
    fn empty_text_has_only_derived_labels() {
        let table = parse_table("");
        assert_eq!(table.header_width, 0);
        assert_eq!(table.labels, ["negLog10Pvalue", "color"]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn leading_blank_line_is_the_header() {
        let table = parse_table("\na\tb\n1\t2\n");
        assert_eq!(table.header_width, 0);
        assert_eq!(table.labels, ["negLog10Pvalue", "color"]);
        assert_eq!(table.rows, vec![vec!["a", "b"], vec!["1", "2"]]);

        let crlf = parse_table("\r\na\tb\r\n1\t2\r\n");
        assert_eq!(crlf.header_width, 0);
        assert_eq!(crlf.rows, vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn empty_cells_are_kept() {
        let table = parse_table("a\tb\tc\n\t\tx\n");
        assert_eq!(table.rows, vec![vec!["", "", "x"]]);
    }
}
