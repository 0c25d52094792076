use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Two-sided normal tail probability of a z statistic, using the
/// Abramowitz & Stegun 7.1.26 approximation of erfc.
fn two_sided_p(z: f64) -> f64 {
    let x = z.abs() / std::f64::consts::SQRT_2;
    let t = 1.0 / (1.0 + 0.3275911 * x);
    let poly = t
        * (0.254829592
            + t * (-0.284496736 + t * (1.421413741 + t * (-1.453152027 + t * 1.061405429))));
    (poly * (-x * x).exp()).clamp(0.0, 1.0)
}

const HEADER: [&str; 8] = [
    "ensembl_gene_id",
    "baseMean",
    "log2FoldChange",
    "lfcSE",
    "stat",
    "pvalue",
    "padj",
    "external_gene_name",
];

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sampleDeSeq2.txt".to_string());

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record(HEADER).context("writing header")?;
    log::info!("writing synthetic table to {output_path}");

    let n_genes = 2000;
    for i in 0..n_genes {
        let id = format!("ENSMUSG{:011}", 100_000 + i);
        let name = format!("Gene{}", i % 1500);
        let base_mean = (rng.gauss(6.0, 2.0)).exp();

        // Roughly one gene in ten is truly differentially expressed.
        let effect = if rng.next_f64() < 0.1 {
            rng.gauss(0.0, 3.0)
        } else {
            0.0
        };
        let lfc_se = 0.2 + rng.next_f64() * 0.6;
        let log2fc = effect + rng.gauss(0.0, lfc_se);
        let stat = log2fc / lfc_se;
        let pvalue = two_sided_p(stat);
        let padj = (pvalue * n_genes as f64 / (i + 1) as f64).min(1.0);

        let row: [String; 8] = match i % 97 {
            // DESeq2 reports NA for genes with zero counts.
            0 => [
                id,
                "0".into(),
                "NA".into(),
                "NA".into(),
                "NA".into(),
                "NA".into(),
                "NA".into(),
                name,
            ],
            // Underflowed p-value.
            1 => [
                id,
                format!("{base_mean:.4}"),
                format!("{log2fc:.6}"),
                format!("{lfc_se:.6}"),
                format!("{stat:.6}"),
                "0".into(),
                "0".into(),
                name,
            ],
            _ => [
                id,
                format!("{base_mean:.4}"),
                format!("{log2fc:.6}"),
                format!("{lfc_se:.6}"),
                format!("{stat:.6}"),
                format!("{pvalue:.6e}"),
                format!("{padj:.6e}"),
                name,
            ],
        };
        writer
            .write_record(&row)
            .with_context(|| format!("writing row {i}"))?;
    }
    writer.flush().context("flushing output")?;

    println!("Wrote {n_genes} genes to {output_path}");
    Ok(())
}
