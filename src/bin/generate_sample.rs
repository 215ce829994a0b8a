use std::sync::Arc;

use arrow::array::StringArray;
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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Topics with a base weight and a yearly trend, so the chart has shape.
const TOPICS: [(&str, f64, f64); 6] = [
    ("Healthcare", 6.0, 0.8),
    ("Defense Spending", 8.0, -0.4),
    ("Budget and Appropriations", 5.0, 0.2),
    ("Energy Policy", 3.0, 0.6),
    ("Veterans' Affairs", 4.0, 0.0),
    ("Trade, Tariffs", 2.0, 0.9),
];

/// Label variants seen in summarised spreadsheets.
const SUFFIXES: [&str; 5] = ["", ".", ",", "\"", " ."];

fn main() {
    let mut rng = SimpleRng::new(42);

    let mut file_names: Vec<String> = Vec::new();
    let mut topics: Vec<String> = Vec::new();

    for year in 2010..=2023 {
        let t = (year - 2010) as f64;
        for report in 0..4 {
            let file_name = format!("CRS_report_{year}_{report:02}.pdf");
            for &(topic, base, trend) in &TOPICS {
                let expected = (base + trend * t).max(0.5);
                let mentions = (expected * (0.5 + rng.next_f64())).round() as usize / 4;
                for _ in 0..mentions {
                    file_names.push(file_name.clone());
                    topics.push(format!("{topic}{}", rng.pick(&SUFFIXES)));
                }
            }
        }
    }

    // A few rows whose file names carry no year; the dashboard drops these.
    for i in 0..5 {
        file_names.push(format!("misc_summary_{i}.pdf"));
        topics.push(rng.pick(&TOPICS).0.to_string());
    }

    write_parquet("sample_reports.parquet", &file_names, &topics);
    write_csv("sample_reports.csv", &file_names, &topics);

    println!(
        "Wrote {} records ({} topics) to sample_reports.parquet and sample_reports.csv",
        file_names.len(),
        TOPICS.len()
    );
}

fn write_parquet(output_path: &str, file_names: &[String], topics: &[String]) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("file_name", DataType::Utf8, false),
        Field::new("main_topic_summary", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(file_names)),
            Arc::new(StringArray::from_iter_values(topics)),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(output_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn write_csv(output_path: &str, file_names: &[String], topics: &[String]) {
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record(["file_name", "main_topic_summary"])
        .expect("Failed to write header");
    for (file_name, topic) in file_names.iter().zip(topics) {
        writer
            .write_record([file_name, topic])
            .expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush CSV");
}
