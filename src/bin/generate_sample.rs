use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const START: u32 = 6 * 3600;
const END: u32 = 20 * 3600;
const STEP: u32 = 10;

/// Clear-sky irradiance as a fraction of peak, bell-shaped around 13:00.
fn irradiance(seconds: u32) -> f64 {
    let hours = f64::from(seconds) / 3600.0;
    (-(hours - 13.0).powi(2) / (2.0 * 2.4_f64.powi(2))).exp()
}

fn clock(seconds: u32) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60
    )
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
        let result = self.state[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
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

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let mut times = Vec::new();
    let mut currents = Vec::new();
    let mut voltages = Vec::new();

    // 5.5 A short-circuit panel at peak, ~18 V under load.
    for seconds in (START..=END).step_by(STEP as usize) {
        let sun = irradiance(seconds);
        let current = (5.5 * sun + rng.gauss(0.0, 0.05)).max(0.0);
        let voltage = if sun > 0.02 {
            18.0 + 0.8 * sun + rng.gauss(0.0, 0.1)
        } else {
            rng.gauss(2.0, 0.2).max(0.0)
        };

        times.push(clock(seconds));
        currents.push((current * 1000.0).round() / 1000.0);
        voltages.push((voltage * 100.0).round() / 100.0);
    }

    // Write CSV
    let csv_path = "solar_sample.csv";
    let mut writer = csv::Writer::from_path(csv_path).context("creating CSV output")?;
    writer.write_record(["Time", "Current", "Voltage"])?;
    for ((t, c), v) in times.iter().zip(&currents).zip(&voltages) {
        writer.write_record([t.clone(), c.to_string(), v.to_string()])?;
    }
    writer.flush().context("flushing CSV output")?;

    // Build Arrow arrays
    let schema = Arc::new(Schema::new(vec![
        Field::new("Time", DataType::Utf8, false),
        Field::new("Current", DataType::Float64, false),
        Field::new("Voltage", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                times.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(currents)),
            Arc::new(Float64Array::from(voltages)),
        ],
    )
    .context("building record batch")?;

    // Write Parquet
    let parquet_path = "solar_sample.parquet";
    let file = std::fs::File::create(parquet_path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;

    println!(
        "Wrote {} readings ({} – {}) to {csv_path} and {parquet_path}",
        times.len(),
        clock(START),
        clock(END)
    );
    Ok(())
}
