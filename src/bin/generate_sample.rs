use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;
use serde_json::json;

/// (language, base enrollment in 2002, yearly growth factor)
const LANGUAGES: &[(&str, f64, f64)] = &[
    ("Chinese", 420.0, 0.99),
    ("Japanese", 380.0, 1.01),
    ("Korean", 120.0, 1.06),
    ("Hindi", 60.0, 0.98),
    ("Urdu", 25.0, 0.97),
    ("Tamil", 14.0, 0.96),
    ("Telugu", 8.0, 0.97),
    ("Bengali", 9.0, 0.95),
    ("Punjabi", 10.0, 0.97),
    ("Sanskrit", 12.0, 0.98),
    ("Thai", 22.0, 0.97),
    ("Vietnamese", 35.0, 1.0),
    ("Tibetan", 6.0, 0.96),
    ("Indonesian", 15.0, 0.97),
    ("Filipino", 18.0, 1.02),
];

const TERMS: &[&str] = &["Fall", "Winter"];

/// Share of students per level.
const LEVELS: &[(&str, f64)] = &[("Beginner", 0.55), ("Intermediate", 0.3), ("Advanced", 0.15)];

const FIRST_YEAR: i64 = 2002;
const LAST_YEAR: i64 = 2024;

/// Minimal deterministic PRNG (splitmix64)
struct SimpleRng(u64);

impl SimpleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [lo, hi).
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + (hi - lo) * unit
    }
}

#[derive(Serialize)]
struct Row {
    year: i64,
    term: String,
    level: Option<String>,
    enrollment: i64,
    language: String,
}

fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    let mut rows = Vec::new();

    for &(language, base, growth) in LANGUAGES {
        for year in FIRST_YEAR..=LAST_YEAR {
            let trend = base * growth.powi((year - FIRST_YEAR) as i32);
            for &term in TERMS {
                // Winter cohorts shrink after Fall attrition.
                let term_factor = if term == "Fall" { 1.0 } else { 0.85 };
                for &(level, share) in LEVELS {
                    let noisy = trend * term_factor * share * rng.uniform(0.85, 1.15);
                    rows.push(Row {
                        year,
                        term: term.to_string(),
                        level: Some(level.to_string()),
                        enrollment: noisy.round().max(0.0) as i64,
                        language: language.to_string(),
                    });
                }
            }
        }
    }

    // A handful of rows that must not disturb either chart.
    rows.push(Row {
        year: 2011,
        term: "Spring".into(),
        level: Some("Beginner".into()),
        enrollment: 40,
        language: "Korean".into(),
    });
    rows.push(Row {
        year: 2016,
        term: "Fall".into(),
        level: None,
        enrollment: 12,
        language: "Hindi".into(),
    });

    rows
}

fn write_json(rows: &[Row], path: &str) -> Result<()> {
    let mut values: Vec<serde_json::Value> = rows
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<_, _>>()
        .context("serializing rows")?;

    // The upstream export mixes numeric and string years; reproduce that.
    values.push(json!({
        "year": "2020",
        "term": "Winter",
        "level": "Intermediate",
        "enrollment": 3,
        "language": "Tibetan"
    }));

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    serde_json::to_writer_pretty(file, &values).context("writing JSON")?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("year", DataType::Int64, false),
        Field::new("term", DataType::Utf8, false),
        Field::new("level", DataType::Utf8, true),
        Field::new("enrollment", DataType::Int64, false),
        Field::new("language", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.year))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.term.as_str()))),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.level.as_deref()).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.enrollment))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.language.as_str()))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng(42);
    let rows = generate(&mut rng);

    write_json(&rows, "sample_enrollment.json")?;
    write_parquet(&rows, "sample_enrollment.parquet")?;

    println!(
        "Wrote {} records for {} languages ({FIRST_YEAR}–{LAST_YEAR}) to sample_enrollment.json and sample_enrollment.parquet",
        rows.len(),
        LANGUAGES.len()
    );
    Ok(())
}
