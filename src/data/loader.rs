use std::io;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray,
    StringArray,
};
use arrow::datatypes::Schema;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{LaunchDataset, LaunchRecord};

// ---------------------------------------------------------------------------
// Schema boundary
// ---------------------------------------------------------------------------

/// Schema violations that abort a load before any filtering can run.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("row {row}: success flag must be 0 or 1, got {value}")]
    BadSuccessFlag { row: usize, value: i64 },
    #[error("row {row}: payload mass must be a finite non-negative number, got {value}")]
    BadPayload { row: usize, value: f64 },
    #[error("dataset contains no launch records")]
    EmptyDataset,
}

/// One raw source row, keyed by the original column labels.
///
/// This is the only place those labels appear; everything downstream
/// operates on the typed [`LaunchRecord`] schema.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "class")]
    success: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_kg: f64,
    #[serde(rename = "Booster Version Category")]
    booster: String,
}

/// Map one raw row into the typed schema, rejecting out-of-domain values.
fn validate(raw: RawRecord, row: usize) -> Result<LaunchRecord, SchemaError> {
    let success = match raw.success {
        0 => false,
        1 => true,
        value => return Err(SchemaError::BadSuccessFlag { row, value }),
    };
    if !raw.payload_kg.is_finite() || raw.payload_kg < 0.0 {
        return Err(SchemaError::BadPayload {
            row,
            value: raw.payload_kg,
        });
    }
    Ok(LaunchRecord {
        site: raw.site,
        success,
        payload_kg: raw.payload_kg,
        booster: raw.booster,
    })
}

/// A dataset with zero rows cannot drive the dashboard; reject it at load.
fn finish(records: Vec<LaunchRecord>) -> Result<LaunchDataset> {
    let dataset = LaunchDataset::from_records(records);
    if dataset.is_empty() {
        return Err(SchemaError::EmptyDataset.into());
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch-records dataset from a file.  Dispatch by extension.
///
/// Supported formats, all carrying the columns `Launch Site` (string),
/// `class` (0/1), `Payload Mass (kg)` (non-negative number) and
/// `Booster Version Category` (string):
/// * `.csv`     – header row with the column names; extra columns are ignored
/// * `.json`    – records-oriented array: `[{ "Launch Site": ..., ... }, ...]`
/// * `.parquet` – flat columns under the same names
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    from_csv_reader(file)
}

/// Parse CSV from any reader; header names select the required columns.
fn from_csv_reader<R: io::Read>(reader: R) -> Result<LaunchDataset> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (row_no, result) in rdr.deserialize::<RawRecord>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(validate(raw, row_no)?);
    }

    finish(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "class": 1,
///     "Payload Mass (kg)": 2490.0,
///     "Booster Version Category": "FT"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    from_json_str(&text)
}

fn from_json_str(text: &str) -> Result<LaunchDataset> {
    let raws: Vec<RawRecord> = serde_json::from_str(text).context("parsing JSON records")?;

    let mut records = Vec::with_capacity(raws.len());
    for (row_no, raw) in raws.into_iter().enumerate() {
        records.push(validate(raw, row_no)?);
    }

    finish(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// Expected schema: flat columns `Launch Site` (Utf8), `class` (Int64 or
/// Int32), `Payload Mass (kg)` (Float64 or Float32), `Booster Version
/// Category` (Utf8).  Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_no = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let site_col = batch.column(locate(&schema, "Launch Site")?);
        let class_col = batch.column(locate(&schema, "class")?);
        let payload_col = batch.column(locate(&schema, "Payload Mass (kg)")?);
        let booster_col = batch.column(locate(&schema, "Booster Version Category")?);

        for row in 0..batch.num_rows() {
            let raw = RawRecord {
                site: string_at(site_col, row, "Launch Site")?,
                success: int_at(class_col, row, "class")?,
                payload_kg: float_at(payload_col, row, "Payload Mass (kg)")?,
                booster: string_at(booster_col, row, "Booster Version Category")?,
            };
            records.push(validate(raw, row_no)?);
            row_no += 1;
        }
    }

    finish(records)
}

// -- Parquet / Arrow helpers --

fn locate(schema: &Schema, name: &str) -> Result<usize> {
    schema
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))
}

fn string_at(col: &ArrayRef, row: usize, name: &str) -> Result<String> {
    if col.is_null(row) {
        bail!("Row {row}: '{name}' is null");
    }
    if let Some(arr) = col.as_any().downcast_ref::<StringArray>() {
        Ok(arr.value(row).to_string())
    } else if let Some(arr) = col.as_any().downcast_ref::<LargeStringArray>() {
        Ok(arr.value(row).to_string())
    } else {
        bail!(
            "'{name}' has type {:?}, expected a string column",
            col.data_type()
        )
    }
}

fn int_at(col: &ArrayRef, row: usize, name: &str) -> Result<i64> {
    if col.is_null(row) {
        bail!("Row {row}: '{name}' is null");
    }
    if let Some(arr) = col.as_any().downcast_ref::<Int64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = col.as_any().downcast_ref::<Int32Array>() {
        Ok(arr.value(row) as i64)
    } else {
        bail!(
            "'{name}' has type {:?}, expected an integer column",
            col.data_type()
        )
    }
}

fn float_at(col: &ArrayRef, row: usize, name: &str) -> Result<f64> {
    if col.is_null(row) {
        bail!("Row {row}: '{name}' is null");
    }
    if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = col.as_any().downcast_ref::<Float32Array>() {
        Ok(arr.value(row) as f64)
    } else {
        bail!(
            "'{name}' has type {:?}, expected a float column",
            col.data_type()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_CSV: &str = "\
Launch Site,class,Payload Mass (kg),Booster Version Category
CCAFS LC-40,0,0,v1.0
CCAFS LC-40,1,525,v1.0
VAFB SLC-4E,1,500,v1.1
KSC LC-39A,1,5300,FT
";

    #[test]
    fn csv_parses_into_typed_records() {
        let ds = from_csv_reader(GOOD_CSV.as_bytes()).unwrap();

        assert_eq!(ds.len(), 4);
        assert_eq!(ds.records[0].site, "CCAFS LC-40");
        assert!(!ds.records[0].success);
        assert_eq!(ds.records[1].payload_kg, 525.0);
        assert!(ds.records[1].success);
        assert_eq!(ds.records[3].booster, "FT");
        assert_eq!(ds.sites, vec!["CCAFS LC-40", "KSC LC-39A", "VAFB SLC-4E"]);
        assert_eq!(ds.payload_bounds, (0.0, 5300.0));
    }

    #[test]
    fn csv_preserves_row_order() {
        let ds = from_csv_reader(GOOD_CSV.as_bytes()).unwrap();
        let masses: Vec<f64> = ds.records.iter().map(|r| r.payload_kg).collect();
        assert_eq!(masses, vec![0.0, 525.0, 500.0, 5300.0]);
    }

    #[test]
    fn csv_ignores_extra_columns() {
        let csv = "\
Flight Number,Launch Site,class,Payload Mass (kg),Booster Version Category
1,CCAFS LC-40,1,2490,FT
";
        let ds = from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].payload_kg, 2490.0);
    }

    #[test]
    fn csv_missing_column_fails() {
        let csv = "\
Launch Site,class,Booster Version Category
CCAFS LC-40,1,FT
";
        assert!(from_csv_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn out_of_domain_success_flag_fails() {
        let csv = "\
Launch Site,class,Payload Mass (kg),Booster Version Category
CCAFS LC-40,2,2490,FT
";
        let err = from_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("success flag"));
    }

    #[test]
    fn negative_payload_fails() {
        let csv = "\
Launch Site,class,Payload Mass (kg),Booster Version Category
CCAFS LC-40,1,-5,FT
";
        let err = from_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("payload mass"));
    }

    #[test]
    fn non_numeric_payload_fails() {
        let csv = "\
Launch Site,class,Payload Mass (kg),Booster Version Category
CCAFS LC-40,1,heavy,FT
";
        assert!(from_csv_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn nan_payload_fails() {
        let csv = "\
Launch Site,class,Payload Mass (kg),Booster Version Category
CCAFS LC-40,1,NaN,FT
";
        let err = from_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("payload mass"));
    }

    #[test]
    fn header_only_csv_is_rejected() {
        let csv = "Launch Site,class,Payload Mass (kg),Booster Version Category\n";
        let err = from_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("no launch records"));
    }

    #[test]
    fn json_records_parse() {
        let json = r#"[
            { "Launch Site": "KSC LC-39A", "class": 1,
              "Payload Mass (kg)": 5300.0, "Booster Version Category": "FT" },
            { "Launch Site": "KSC LC-39A", "class": 0,
              "Payload Mass (kg)": 9600.0, "Booster Version Category": "B4" }
        ]"#;
        let ds = from_json_str(json).unwrap();

        assert_eq!(ds.len(), 2);
        assert!(ds.records[0].success);
        assert!(!ds.records[1].success);
        assert_eq!(ds.boosters, vec!["B4", "FT"]);
    }

    #[test]
    fn json_must_be_a_record_array() {
        assert!(from_json_str(r#"{ "Launch Site": "KSC LC-39A" }"#).is_err());
    }

    #[test]
    fn parquet_round_trip() {
        use arrow::datatypes::{DataType, Field};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;
        use std::sync::Arc;

        let schema = Arc::new(Schema::new(vec![
            Field::new("Launch Site", DataType::Utf8, false),
            Field::new("class", DataType::Int64, false),
            Field::new("Payload Mass (kg)", DataType::Float64, false),
            Field::new("Booster Version Category", DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["CCAFS LC-40", "KSC LC-39A"])),
                Arc::new(Int64Array::from(vec![0i64, 1])),
                Arc::new(Float64Array::from(vec![500.0, 5300.0])),
                Arc::new(StringArray::from(vec!["v1.0", "FT"])),
            ],
        )
        .unwrap();

        let path = std::env::temp_dir().join("launch_lens_round_trip.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].site, "CCAFS LC-40");
        assert!(!ds.records[0].success);
        assert_eq!(ds.records[0].booster, "v1.0");
        assert!(ds.records[1].success);
        assert_eq!(ds.records[1].payload_kg, 5300.0);
        assert_eq!(ds.payload_bounds, (500.0, 5300.0));
    }

    #[test]
    fn parquet_missing_column_fails() {
        use arrow::datatypes::{DataType, Field};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;
        use std::sync::Arc;

        // No 'class' column.
        let schema = Arc::new(Schema::new(vec![
            Field::new("Launch Site", DataType::Utf8, false),
            Field::new("Payload Mass (kg)", DataType::Float64, false),
            Field::new("Booster Version Category", DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["CCAFS LC-40"])),
                Arc::new(Float64Array::from(vec![500.0])),
                Arc::new(StringArray::from(vec!["v1.0"])),
            ],
        )
        .unwrap();

        let path = std::env::temp_dir().join("launch_lens_missing_col.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let err = load_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(err.to_string().contains("missing 'class'"));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("launches.txt")).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }
}
