use clap::Parser;

use crate::data::model::FilterCriteria;
use crate::source::DatasetSelector;

/// Command-line arguments of the `volcano-ingest` binary.
#[derive(Parser, Debug)]
#[command(
    name = "volcano-ingest",
    about = "Filter a DESeq2 results table and summarise it as JSON"
)]
pub struct Cli {
    /// `mouse`, `fish`, a file path or an http(s) URL
    #[arg(default_value = "mouse")]
    pub dataset: String,

    /// Rows with a p-value above this are dropped
    #[arg(long = "p-value", env = "VOLCANO_PVALUE_THRESHOLD", default_value_t = 0.05)]
    pub p_value: f64,

    /// Rows with a log2 fold-change strictly inside (-t, t) are dropped
    #[arg(
        long = "log2fc",
        env = "VOLCANO_LOG2FC_THRESHOLD",
        default_value_t = 1.0,
        allow_negative_numbers = true
    )]
    pub log2fc: f64,

    /// Indent the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl Cli {
    pub fn selector(&self) -> DatasetSelector {
        match self.dataset.parse() {
            Ok(selector) => selector,
            Err(never) => match never {},
        }
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(self.p_value, self.log2fc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn thresholds_from_flags() {
        let cli = Cli::parse_from(["volcano-ingest", "fish", "--p-value", "0.01", "--log2fc", "2"]);
        assert_eq!(cli.selector(), DatasetSelector::Fish);
        assert_eq!(cli.criteria(), FilterCriteria::new(0.01, 2.0));
        assert!(!cli.pretty);
    }

    #[test]
    fn direct_locator_passes_through() {
        let cli = Cli::parse_from(["volcano-ingest", "tables/liver.txt", "--pretty"]);
        assert_eq!(
            cli.selector(),
            DatasetSelector::Locator("tables/liver.txt".to_string())
        );
        assert!(cli.pretty);
    }
}
