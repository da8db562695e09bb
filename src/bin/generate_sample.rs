use anyhow::{Context, Result};
use serde::Serialize;

/// One output row, using the column names the dashboard expects.
#[derive(Serialize)]
struct Row<'a> {
    ano: i32,
    senioridade: &'a str,
    contrato: &'a str,
    tamanho_empresa: &'a str,
    cargo: &'a str,
    remoto: &'a str,
    usd: f64,
    residencia_iso3: &'a str,
}

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

    /// Pick from `(item, weight)` pairs.
    fn weighted<'a, T>(&mut self, items: &'a [(T, f64)]) -> &'a T {
        let total: f64 = items.iter().map(|(_, w)| w).sum();
        let mut target = self.next_f64() * total;
        for (item, w) in items {
            if target < *w {
                return item;
            }
            target -= w;
        }
        &items[items.len() - 1].0
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let years = [(2020, 0.05), (2021, 0.1), (2022, 0.25), (2023, 0.35), (2024, 0.25)];
    // seniority, salary multiplier
    let seniorities = [
        (("junior", 0.55), 0.15),
        (("pleno", 0.85), 0.3),
        (("senior", 1.15), 0.45),
        (("executivo", 1.5), 0.1),
    ];
    let contracts = [("integral", 0.95), ("contrato", 0.02), ("freelancer", 0.02), ("parcial", 0.01)];
    let sizes = [("pequena", 0.1), ("media", 0.7), ("grande", 0.2)];
    let remote = [("presencial", 0.5), ("remoto", 0.35), ("hibrido", 0.15)];
    // role, base salary in USD
    let roles = [
        (("Data Scientist", 140_000.0), 0.25),
        (("Data Engineer", 145_000.0), 0.25),
        (("Data Analyst", 100_000.0), 0.2),
        (("Machine Learning Engineer", 170_000.0), 0.12),
        (("Analytics Engineer", 150_000.0), 0.05),
        (("Research Scientist", 180_000.0), 0.04),
        (("Data Architect", 160_000.0), 0.03),
        (("Applied Scientist", 185_000.0), 0.03),
        (("BI Developer", 95_000.0), 0.02),
        (("Data Manager", 125_000.0), 0.01),
        (("Head of Data", 210_000.0), 0.005),
        (("AI Engineer", 175_000.0), 0.005),
    ];
    // country, cost-of-labour factor
    let countries = [
        (("USA", 1.0), 0.8),
        (("GBR", 0.7), 0.05),
        (("CAN", 0.8), 0.04),
        (("DEU", 0.75), 0.03),
        (("ESP", 0.5), 0.02),
        (("IND", 0.25), 0.02),
        (("BRA", 0.35), 0.02),
        (("FRA", 0.65), 0.01),
        (("PRT", 0.45), 0.01),
    ];

    let output_path = "dados-imersao-final.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;

    let n_rows = 5_000;
    for _ in 0..n_rows {
        let &(seniority, level) = rng.weighted(&seniorities);
        let &(cargo, base) = rng.weighted(&roles);
        let &(iso3, factor) = rng.weighted(&countries);
        let usd = rng.gauss(base * level * factor, 0.2 * base * level * factor).max(15_000.0);

        writer
            .serialize(Row {
                ano: *rng.weighted(&years),
                senioridade: seniority,
                contrato: *rng.weighted(&contracts),
                tamanho_empresa: *rng.weighted(&sizes),
                cargo,
                remoto: *rng.weighted(&remote),
                usd: usd.round(),
                residencia_iso3: iso3,
            })
            .context("writing row")?;
    }
    writer.flush().context("flushing output file")?;

    println!("Wrote {n_rows} salary records to {output_path}");
    Ok(())
}
