use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    /// Bernoulli draw with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let sites = [
        "CCAFS LC-40",
        "CCAFS SLC-40",
        "KSC LC-39A",
        "VAFB SLC-4E",
    ];

    // (category, typical payload kg, payload spread kg, success rate)
    let boosters: [(&str, f64, f64, f64); 5] = [
        ("v1.0", 550.0, 200.0, 0.40),
        ("v1.1", 2700.0, 900.0, 0.65),
        ("FT", 5300.0, 2200.0, 0.85),
        ("B4", 4800.0, 2000.0, 0.85),
        ("B5", 6100.0, 2600.0, 0.95),
    ];

    let launches_per_cell = 3;

    // Collect all rows as parallel columns
    let mut all_site: Vec<String> = Vec::new();
    let mut all_class: Vec<i64> = Vec::new();
    let mut all_payload: Vec<f64> = Vec::new();
    let mut all_booster: Vec<String> = Vec::new();

    for site in &sites {
        for &(booster, typical, spread, success_rate) in &boosters {
            for _ in 0..launches_per_cell {
                let payload = rng.gauss(typical, spread).clamp(0.0, 9600.0);
                let payload = (payload * 10.0).round() / 10.0;
                let success = rng.chance(success_rate);

                all_site.push(site.to_string());
                all_class.push(i64::from(success));
                all_payload.push(payload);
                all_booster.push(booster.to_string());
            }
        }
    }

    write_csv("sample_launches.csv", &all_site, &all_class, &all_payload, &all_booster);
    write_parquet(
        "sample_launches.parquet",
        &all_site,
        &all_class,
        &all_payload,
        &all_booster,
    );

    println!(
        "Wrote {} launches across {} sites to sample_launches.csv / sample_launches.parquet",
        all_site.len(),
        sites.len()
    );
}

fn write_csv(path: &str, sites: &[String], classes: &[i64], payloads: &[f64], boosters: &[String]) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create CSV file");
    writer
        .write_record([
            "Launch Site",
            "class",
            "Payload Mass (kg)",
            "Booster Version Category",
        ])
        .expect("Failed to write CSV header");

    for i in 0..sites.len() {
        let class = classes[i].to_string();
        let payload = format!("{:.1}", payloads[i]);
        writer
            .write_record([
                sites[i].as_str(),
                class.as_str(),
                payload.as_str(),
                boosters[i].as_str(),
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV");
}

fn write_parquet(
    path: &str,
    sites: &[String],
    classes: &[i64],
    payloads: &[f64],
    boosters: &[String],
) {
    let site_array = StringArray::from(sites.iter().map(|s| s.as_str()).collect::<Vec<_>>());
    let class_array = Int64Array::from(classes.to_vec());
    let payload_array = Float64Array::from(payloads.to_vec());
    let booster_array = StringArray::from(boosters.iter().map(|s| s.as_str()).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(site_array),
            Arc::new(class_array),
            Arc::new(payload_array),
            Arc::new(booster_array),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}
