use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::model::{
    EnrollmentDataset, EnrollmentRecord, Level, Term, enrollment_from_f64, parse_enrollment,
    parse_year, year_from_f64,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an enrollment dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `[{ "year": 2010, "term": "Fall", "level": "Beginner", ... }, ...]`
/// * `.csv`     – header row with `year,term,level,language,enrollment`
/// * `.parquet` – one column per field
///
/// Individual fields that are missing or of the wrong type become `None`
/// instead of failing the load; aggregation skips them later.
pub fn load_file(path: &Path) -> Result<EnrollmentDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    log_incomplete(&dataset);
    Ok(dataset)
}

fn log_incomplete(dataset: &EnrollmentDataset) {
    let unusable = dataset
        .records
        .iter()
        .filter(|r| r.year.is_none() || r.enrollment.is_none())
        .count();
    let no_term = dataset
        .records
        .iter()
        .filter(|r| !matches!(r.term, Some(Term::Fall | Term::Winter)))
        .count();
    let no_level = dataset
        .records
        .iter()
        .filter(|r| !matches!(r.level, Some(Level::Beginner | Level::Intermediate | Level::Advanced)))
        .count();

    if unusable > 0 {
        log::warn!("{unusable} records have no usable year or enrollment and will never be counted");
    }
    log::debug!("{no_term} records outside Fall/Winter, {no_level} records without a known level");
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "year": 2010, "term": "Fall", "level": "Beginner",
///     "enrollment": 42, "language": "Chinese" },
///   { "year": "2011", "term": "Winter", "enrollment": 17, "language": "Thai" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<EnrollmentDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<EnrollmentDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let Some(obj) = row.as_object() else {
            log::warn!("Row {i} is not a JSON object, skipping");
            continue;
        };
        records.push(json_to_record(obj));
    }

    Ok(EnrollmentDataset::from_records(records))
}

fn json_to_record(obj: &Map<String, JsonValue>) -> EnrollmentRecord {
    EnrollmentRecord {
        year: obj.get("year").and_then(json_year),
        term: json_str(obj.get("term")).map(Term::parse),
        level: json_str(obj.get("level")).map(Level::parse),
        language: json_str(obj.get("language")).map(str::to_string),
        enrollment: obj.get("enrollment").and_then(json_enrollment),
    }
}

fn json_str(val: Option<&JsonValue>) -> Option<&str> {
    val.and_then(|v| v.as_str())
}

fn json_year(val: &JsonValue) -> Option<i32> {
    match val {
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => i32::try_from(i).ok(),
            None => n.as_f64().and_then(year_from_f64),
        },
        JsonValue::String(s) => parse_year(s),
        _ => None,
    }
}

fn json_enrollment(val: &JsonValue) -> Option<u64> {
    match val {
        JsonValue::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(enrollment_from_f64)),
        JsonValue::String(s) => parse_enrollment(s),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, any order.
/// `year` and `enrollment` are required; `term`, `level` and `language` may be
/// absent, and empty cells are treated as missing.
fn load_csv(path: &Path) -> Result<EnrollmentDataset> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<EnrollmentDataset> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let position = |name: &str| headers.iter().position(|h| h == name);

    let year_idx = position("year").context("CSV missing 'year' column")?;
    let enrollment_idx = position("enrollment").context("CSV missing 'enrollment' column")?;
    let term_idx = position("term");
    let level_idx = position("level");
    let language_idx = position("language");

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let cell = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };

        records.push(EnrollmentRecord {
            year: cell(Some(year_idx)).and_then(parse_year),
            term: cell(term_idx).map(Term::parse),
            level: cell(level_idx).map(Level::parse),
            language: cell(language_idx).map(str::to_string),
            enrollment: cell(Some(enrollment_idx)).and_then(parse_enrollment),
        });
    }

    Ok(EnrollmentDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of enrollment records.
///
/// Expected schema (all columns nullable, `term`/`level`/`language` optional):
/// - `year`: Int32 / Int64 / Float64 / Utf8
/// - `term`, `level`, `language`: Utf8 or LargeUtf8
/// - `enrollment`: Int32 / Int64 / Float64 / Utf8
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<EnrollmentDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &str| schema.index_of(name).ok().map(|i| batch.column(i));

        let year_col = column("year").context("Parquet file missing 'year' column")?;
        let enrollment_col =
            column("enrollment").context("Parquet file missing 'enrollment' column")?;
        let term_col = column("term");
        let level_col = column("level");
        let language_col = column("language");

        for row in 0..batch.num_rows() {
            let text = |col: Option<&Arc<dyn Array>>| col.and_then(|c| extract_string(c, row));

            records.push(EnrollmentRecord {
                year: extract_year(year_col, row),
                term: text(term_col).as_deref().map(Term::parse),
                level: text(level_col).as_deref().map(Level::parse),
                language: text(language_col),
                enrollment: extract_enrollment(enrollment_col, row),
            });
        }
    }

    Ok(EnrollmentDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|s| s.value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        _ => None,
    }
}

fn extract_year(col: &Arc<dyn Array>, row: usize) -> Option<i32> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row)),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .and_then(|a| i32::try_from(a.value(row)).ok()),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .and_then(|a| year_from_f64(a.value(row) as f64)),
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .and_then(|a| year_from_f64(a.value(row))),
        _ => extract_string(col, row).as_deref().and_then(parse_year),
    }
}

fn extract_enrollment(col: &Arc<dyn Array>, row: usize) -> Option<u64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .and_then(|a| u64::try_from(a.value(row)).ok()),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .and_then(|a| u64::try_from(a.value(row)).ok()),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .and_then(|a| enrollment_from_f64(a.value(row) as f64)),
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .and_then(|a| enrollment_from_f64(a.value(row))),
        _ => extract_string(col, row).as_deref().and_then(parse_enrollment),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    #[test]
    fn json_accepts_numeric_and_string_years() {
        let ds = parse_json(
            r#"[
                {"year": 2010, "term": "Fall", "level": "Beginner", "enrollment": 10, "language": "Chinese"},
                {"year": "2010", "term": "Fall", "enrollment": 15, "language": "Chinese"}
            ]"#,
        )
        .unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].year, Some(2010));
        assert_eq!(ds.records[1].year, Some(2010));
        assert_eq!(ds.records[1].level, None);
        assert_eq!(ds.records[0].level, Some(Level::Beginner));
    }

    #[test]
    fn json_tolerates_bad_fields_and_skips_non_objects() {
        let ds = parse_json(
            r#"[
                {"year": true, "term": 3, "enrollment": -4, "language": "Thai"},
                "not a record",
                {"term": "Winter", "enrollment": "12"}
            ]"#,
        )
        .unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].year, None);
        assert_eq!(ds.records[0].term, None);
        assert_eq!(ds.records[0].enrollment, None);
        assert_eq!(ds.records[1].term, Some(Term::Winter));
        assert_eq!(ds.records[1].enrollment, Some(12));
        assert_eq!(ds.records[1].language, None);
    }

    #[test]
    fn json_must_be_an_array() {
        assert!(parse_json(r#"{"year": 2010}"#).is_err());
    }

    #[test]
    fn csv_reads_columns_in_any_order() {
        let data = "language,enrollment,year,term,level\n\
                    Korean,12,2016,Winter,Advanced\n\
                    Korean,3,2016,Spring,\n";
        let ds = read_csv(csv::Reader::from_reader(data.as_bytes())).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(
            ds.records[0],
            EnrollmentRecord {
                year: Some(2016),
                term: Some(Term::Winter),
                level: Some(Level::Advanced),
                language: Some("Korean".into()),
                enrollment: Some(12),
            }
        );
        assert_eq!(ds.records[1].term, Some(Term::Other("Spring".into())));
        assert_eq!(ds.records[1].level, None);
    }

    #[test]
    fn csv_without_year_column_fails() {
        let data = "term,enrollment\nFall,3\n";
        let err = read_csv(csv::Reader::from_reader(data.as_bytes())).unwrap_err();
        assert!(err.to_string().contains("year"));
    }

    #[test]
    fn load_file_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("records.JSON");
        std::fs::write(
            &json_path,
            r#"[{"year": 2003, "term": "Fall", "enrollment": 7, "language": "Tamil"}]"#,
        )
        .unwrap();
        let ds = load_file(&json_path).unwrap();
        assert_eq!(ds.records[0].language.as_deref(), Some("Tamil"));

        let csv_path = dir.path().join("records.csv");
        let mut f = std::fs::File::create(&csv_path).unwrap();
        writeln!(f, "year,term,enrollment,language").unwrap();
        writeln!(f, "2003,Winter,9,Tamil").unwrap();
        drop(f);
        assert_eq!(load_file(&csv_path).unwrap().records[0].enrollment, Some(9));

        let err = load_file(&dir.path().join("records.xlsx")).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }

    #[test]
    fn parquet_reads_mixed_column_types() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("year", DataType::Int64, true),
            Field::new("term", DataType::Utf8, true),
            Field::new("language", DataType::Utf8, true),
            Field::new("enrollment", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![Some(2020), None])),
                Arc::new(StringArray::from(vec![Some("Fall"), Some("Winter")])),
                Arc::new(StringArray::from(vec![Some("Bengali"), None])),
                Arc::new(Float64Array::from(vec![Some(14.0), Some(2.5)])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].year, Some(2020));
        assert_eq!(ds.records[0].enrollment, Some(14));
        assert_eq!(ds.records[0].language.as_deref(), Some("Bengali"));
        assert_eq!(ds.records[1].year, None);
        assert_eq!(ds.records[1].enrollment, None);
        assert_eq!(ds.records[1].level, None);
    }
}
