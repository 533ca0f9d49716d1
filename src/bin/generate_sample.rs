use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};

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

/// Yearly cycle in [-1, 1], coldest mid-January.
fn season(date: NaiveDate) -> f64 {
    let phase = (date.ordinal0() as f64 - 15.0) / 365.25 * 2.0 * std::f64::consts::PI;
    -phase.cos()
}

/// Format with one decimal and a decimal comma, as the station files do.
fn comma_decimal(v: f64) -> String {
    format!("{v:.1}").replace('.', ",")
}

struct Source {
    file_name: &'static str,
    label: &'static str,
    value: fn(f64, &mut SimpleRng) -> f64,
}

const SOURCES: [Source; 5] = [
    Source {
        file_name: "HumedadMinima.txt",
        label: "Humedad Mínima",
        value: |s, rng| rng.gauss(50.0 - 15.0 * s, 8.0).clamp(5.0, 100.0),
    },
    Source {
        file_name: "HumedadMaxima.txt",
        label: "Humedad Máxima",
        value: |s, rng| rng.gauss(90.0 - 8.0 * s, 5.0).clamp(20.0, 100.0),
    },
    Source {
        file_name: "TemperaturaMinima.txt",
        label: "Temperatura Mínima",
        value: |s, rng| rng.gauss(5.0 + 8.0 * s, 2.5),
    },
    Source {
        file_name: "TemperaturaMaxima.txt",
        label: "Temperatura Máxima",
        value: |s, rng| rng.gauss(16.0 + 11.0 * s, 3.0),
    },
    Source {
        file_name: "lluvia.txt",
        label: "Lluvia máxima",
        value: |s, rng| {
            if rng.next_f64() < 0.35 - 0.15 * s {
                rng.gauss(6.0, 5.0).abs()
            } else {
                0.0
            }
        },
    },
];

fn main() {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir).expect("Failed to create output directory");

    let first = NaiveDate::from_ymd_opt(2014, 1, 1).expect("valid date");
    let last = NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date");

    let mut rng = SimpleRng::new(42);

    for source in &SOURCES {
        let path = out_dir.join(source.file_name);
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .from_path(&path)
            .expect("Failed to create output file");
        writer
            .write_record(["Fecha", "Valor", "Nombre de la variable"])
            .expect("Failed to write header");

        let mut rows = 0usize;
        for date in first.iter_days().take_while(|d| *d <= last) {
            let value = (source.value)(season(date), &mut rng);
            writer
                .write_record([
                    date.format("%d-%m-%Y").to_string(),
                    comma_decimal(value),
                    source.label.to_string(),
                ])
                .expect("Failed to write row");
            rows += 1;
        }
        writer.flush().expect("Failed to flush output file");

        println!("Wrote {rows} rows to {}", path.display());
    }
}
