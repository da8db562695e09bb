use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use thiserror::Error;

use super::model::{SalaryDataset, SalaryRecord, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Schema errors
// ---------------------------------------------------------------------------

/// A record or column that does not match the expected salary schema.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: column '{column}' is null")]
    NullValue { row: usize, column: &'static str },
    #[error("column '{column}' has unsupported type {found}")]
    UnsupportedType { column: &'static str, found: String },
    #[error("row {row}: year {value} is out of range")]
    InvalidYear { row: usize, value: i64 },
    #[error("row {row}: salary {value} is not a finite, non-negative amount")]
    InvalidSalary { row: usize, value: f64 },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a salary dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the columns in [`REQUIRED_COLUMNS`] (recommended)
/// * `.json`    – `[{ "ano": 2023, "cargo": "...", ... }, ...]`
/// * `.parquet` – one column per field, as written by Pandas or Polars
pub fn load_file(path: &Path) -> Result<SalaryDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    Ok(SalaryDataset::from_records(records))
}

/// Trim text fields and reject values the aggregations cannot handle.
/// A text cell that is empty after trimming counts as null.
fn validate(mut rec: SalaryRecord, row: usize) -> Result<SalaryRecord, SchemaError> {
    if !rec.salary_usd.is_finite() || rec.salary_usd < 0.0 {
        return Err(SchemaError::InvalidSalary {
            row,
            value: rec.salary_usd,
        });
    }
    for (column, field) in [
        ("senioridade", &mut rec.seniority),
        ("contrato", &mut rec.contract),
        ("tamanho_empresa", &mut rec.company_size),
        ("cargo", &mut rec.role),
        ("remoto", &mut rec.remote),
        ("residencia_iso3", &mut rec.residence_iso3),
    ] {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            return Err(SchemaError::NullValue { row, column });
        }
        if trimmed.len() != field.len() {
            *field = trimmed.to_string();
        }
    }
    Ok(rec)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names; columns outside
/// [`REQUIRED_COLUMNS`] are ignored.
fn load_csv(path: &Path) -> Result<Vec<SalaryRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?;

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(SchemaError::MissingColumn(column)).context("validating CSV header");
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<SalaryRecord>().enumerate() {
        let rec = result.with_context(|| format!("CSV row {row_no}: malformed record"))?;
        records.push(validate(rec, row_no).context("validating CSV record")?);
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "ano": 2023, "senioridade": "senior", "contrato": "integral",
///     "tamanho_empresa": "media", "cargo": "Data Scientist",
///     "remoto": "remoto", "usd": 150000.0, "residencia_iso3": "USA" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<SalaryRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let raw: Vec<SalaryRecord> = serde_json::from_str(&text).context("parsing JSON records")?;

    raw.into_iter()
        .enumerate()
        .map(|(row, rec)| validate(rec, row).context("validating JSON record"))
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per field.
///
/// `ano` may be Int32 or Int64, `usd` any of Float64/Float32/Int64/Int32 and
/// the text columns Utf8 or LargeUtf8.
fn load_parquet(path: &Path) -> Result<Vec<SalaryRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_offset = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let year = required_column(&batch, "ano")?;
        let seniority = required_column(&batch, "senioridade")?;
        let contract = required_column(&batch, "contrato")?;
        let company_size = required_column(&batch, "tamanho_empresa")?;
        let role = required_column(&batch, "cargo")?;
        let remote = required_column(&batch, "remoto")?;
        let usd = required_column(&batch, "usd")?;
        let iso3 = required_column(&batch, "residencia_iso3")?;

        for i in 0..batch.num_rows() {
            let row = row_offset + i;
            let raw_year = extract_i64(year, i, row, "ano")?;
            let rec = SalaryRecord {
                year: i32::try_from(raw_year).map_err(|_| SchemaError::InvalidYear {
                    row,
                    value: raw_year,
                })?,
                seniority: extract_string(seniority, i, row, "senioridade")?,
                contract: extract_string(contract, i, row, "contrato")?,
                company_size: extract_string(company_size, i, row, "tamanho_empresa")?,
                role: extract_string(role, i, row, "cargo")?,
                remote: extract_string(remote, i, row, "remoto")?,
                salary_usd: extract_f64(usd, i, row, "usd")?,
                residence_iso3: extract_string(iso3, i, row, "residencia_iso3")?,
            };
            records.push(validate(rec, row).context("validating parquet record")?);
        }

        row_offset += batch.num_rows();
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

fn required_column<'b>(batch: &'b RecordBatch, name: &'static str) -> Result<&'b ArrayRef> {
    batch
        .column_by_name(name)
        .ok_or(SchemaError::MissingColumn(name))
        .context("validating parquet schema")
}

fn unsupported(col: &Arc<dyn Array>, column: &'static str) -> SchemaError {
    SchemaError::UnsupportedType {
        column,
        found: format!("{:?}", col.data_type()),
    }
}

fn extract_string(
    col: &Arc<dyn Array>,
    i: usize,
    row: usize,
    column: &'static str,
) -> Result<String, SchemaError> {
    if col.is_null(i) {
        return Err(SchemaError::NullValue { row, column });
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|s| s.value(i).to_string())
            .ok_or_else(|| unsupported(col, column)),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(i).to_string()),
        _ => Err(unsupported(col, column)),
    }
}

fn extract_i64(
    col: &Arc<dyn Array>,
    i: usize,
    row: usize,
    column: &'static str,
) -> Result<i64, SchemaError> {
    if col.is_null(i) {
        return Err(SchemaError::NullValue { row, column });
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(i) as i64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(i)),
        _ => None,
    };
    value.ok_or_else(|| unsupported(col, column))
}

fn extract_f64(
    col: &Arc<dyn Array>,
    i: usize,
    row: usize,
    column: &'static str,
) -> Result<f64, SchemaError> {
    if col.is_null(i) {
        return Err(SchemaError::NullValue { row, column });
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(i)),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(i) as f64),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(i) as f64),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(i) as f64),
        _ => None,
    };
    value.ok_or_else(|| unsupported(col, column))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;
    use tempfile::tempdir;

    use super::*;

    const HEADER: &str = "ano,senioridade,contrato,tamanho_empresa,cargo,remoto,usd,residencia_iso3";

    fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).expect("create fixture");
        f.write_all(contents.as_bytes()).expect("write fixture");
        path
    }

    #[test]
    fn loads_csv_and_ignores_extra_columns() {
        let dir = tempdir().expect("tempdir");
        let csv = "extra,ano,senioridade,contrato,tamanho_empresa,cargo,remoto,usd,residencia_iso3\n\
                   x,2023,senior,full-time,M,Data Scientist,remote,150000,USA\n\
                   y,2022,junior,full-time,S, Analyst ,hybrid,60000.5,BRA\n";
        let path = write_file(dir.path(), "salaries.csv", csv);

        let ds = load_file(&path).expect("load csv");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].year, 2023);
        assert_eq!(ds.records[0].salary_usd, 150_000.0);
        assert_eq!(ds.records[1].role, "Analyst");
        assert_eq!(ds.records[1].residence_iso3, "BRA");
        assert_eq!(ds.years.iter().copied().collect::<Vec<_>>(), vec![2022, 2023]);
    }

    #[test]
    fn missing_csv_column_is_schema_error() {
        let dir = tempdir().expect("tempdir");
        let path = write_file(
            dir.path(),
            "bad.csv",
            "ano,senioridade,contrato,tamanho_empresa,cargo,remoto,residencia_iso3\n",
        );

        let err = load_file(&path).expect_err("usd is missing");
        assert_eq!(
            err.downcast_ref::<SchemaError>(),
            Some(&SchemaError::MissingColumn("usd"))
        );
    }

    #[test]
    fn negative_salary_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let csv = format!("{HEADER}\n2023,senior,full-time,M,Data Scientist,remote,-1,USA\n");
        let path = write_file(dir.path(), "neg.csv", &csv);

        let err = load_file(&path).expect_err("negative salary");
        assert_eq!(
            err.downcast_ref::<SchemaError>(),
            Some(&SchemaError::InvalidSalary { row: 0, value: -1.0 })
        );
    }

    #[test]
    fn non_numeric_year_fails() {
        let dir = tempdir().expect("tempdir");
        let csv = format!("{HEADER}\ntwenty,senior,full-time,M,Data Scientist,remote,1,USA\n");
        let path = write_file(dir.path(), "year.csv", &csv);

        let err = load_file(&path).expect_err("bad year");
        assert!(format!("{err:#}").contains("CSV row 0"));
    }

    #[test]
    fn unsupported_extension() {
        let err = load_file(Path::new("salaries.xlsx")).expect_err("xlsx");
        assert!(err.to_string().contains("Unsupported file extension"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().expect("tempdir");
        assert!(load_file(&dir.path().join("nope.csv")).is_err());
    }

    #[test]
    fn loads_json_records() {
        let dir = tempdir().expect("tempdir");
        let json = r#"[
            {"ano": 2024, "senioridade": "mid", "contrato": "contract",
             "tamanho_empresa": "L", "cargo": "Data Engineer", "remoto": "on-site",
             "usd": 120000, "residencia_iso3": "DEU", "salario": 1}
        ]"#;
        let path = write_file(dir.path(), "salaries.json", json);

        let ds = load_file(&path).expect("load json");
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].role, "Data Engineer");
        assert_eq!(ds.records[0].salary_usd, 120_000.0);
    }

    #[test]
    fn empty_text_cell_is_null() {
        let dir = tempdir().expect("tempdir");
        let csv = format!("{HEADER}\n2023,senior,full-time,M,,remote,1,USA\n");
        let path = write_file(dir.path(), "blank.csv", &csv);

        let err = load_file(&path).expect_err("blank role");
        assert_eq!(
            err.downcast_ref::<SchemaError>(),
            Some(&SchemaError::NullValue { row: 0, column: "cargo" })
        );
    }

    #[test]
    fn whitespace_only_json_field_is_null() {
        let dir = tempdir().expect("tempdir");
        let json = r#"[
            {"ano": 2024, "senioridade": "mid", "contrato": "contract",
             "tamanho_empresa": "L", "cargo": "Data Engineer", "remoto": "   ",
             "usd": 120000, "residencia_iso3": "DEU"}
        ]"#;
        let path = write_file(dir.path(), "blank.json", json);

        let err = load_file(&path).expect_err("blank remote");
        assert_eq!(
            err.downcast_ref::<SchemaError>(),
            Some(&SchemaError::NullValue { row: 0, column: "remoto" })
        );
    }

    /// Schema with the given year and salary types and nullable Utf8 text columns.
    fn parquet_schema(year: DataType, usd: DataType) -> Arc<Schema> {
        let text = |name: &str| Field::new(name, DataType::Utf8, true);
        Arc::new(Schema::new(vec![
            Field::new("ano", year, false),
            text("senioridade"),
            text("contrato"),
            text("tamanho_empresa"),
            text("cargo"),
            text("remoto"),
            Field::new("usd", usd, false),
            text("residencia_iso3"),
        ]))
    }

    fn write_parquet(path: &Path, schema: Arc<Schema>, columns: Vec<ArrayRef>) {
        let batch = RecordBatch::try_new(schema.clone(), columns).expect("record batch");
        let file = std::fs::File::create(path).expect("create parquet");
        let mut writer = ArrowWriter::try_new(file, schema, None).expect("writer");
        writer.write(&batch).expect("write batch");
        writer.close().expect("close writer");
    }

    #[test]
    fn loads_parquet_with_mixed_numeric_types() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("salaries.parquet");

        write_parquet(
            &path,
            parquet_schema(DataType::Int32, DataType::Int64),
            vec![
                Arc::new(Int32Array::from(vec![2023, 2024])),
                Arc::new(StringArray::from(vec!["senior", "junior"])),
                Arc::new(StringArray::from(vec!["full-time", "full-time"])),
                Arc::new(StringArray::from(vec!["M", "S"])),
                Arc::new(StringArray::from(vec!["Data Scientist", "Analyst"])),
                Arc::new(StringArray::from(vec!["remote", "hybrid"])),
                Arc::new(Int64Array::from(vec![150_000, 60_000])),
                Arc::new(StringArray::from(vec!["USA", "BRA"])),
            ],
        );

        let ds = load_file(&path).expect("load parquet");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].year, 2024);
        assert_eq!(ds.records[0].salary_usd, 150_000.0);
        assert_eq!(ds.records[1].remote, "hybrid");
    }

    #[test]
    fn parquet_null_cell_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nulls.parquet");

        write_parquet(
            &path,
            parquet_schema(DataType::Int64, DataType::Float64),
            vec![
                Arc::new(Int64Array::from(vec![2023])),
                Arc::new(StringArray::from(vec!["senior"])),
                Arc::new(StringArray::from(vec!["full-time"])),
                Arc::new(StringArray::from(vec!["M"])),
                Arc::new(StringArray::from(vec![None::<&str>])),
                Arc::new(StringArray::from(vec!["remote"])),
                Arc::new(Float64Array::from(vec![1.0])),
                Arc::new(StringArray::from(vec!["USA"])),
            ],
        );

        let err = load_file(&path).expect_err("null role");
        assert_eq!(
            err.downcast_ref::<SchemaError>(),
            Some(&SchemaError::NullValue { row: 0, column: "cargo" })
        );
    }

    #[test]
    fn parquet_year_outside_i32_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("years.parquet");
        let huge = i64::from(i32::MAX) + 1;

        write_parquet(
            &path,
            parquet_schema(DataType::Int64, DataType::Float64),
            vec![
                Arc::new(Int64Array::from(vec![2023, huge])),
                Arc::new(StringArray::from(vec!["senior", "mid"])),
                Arc::new(StringArray::from(vec!["full-time", "contract"])),
                Arc::new(StringArray::from(vec!["M", "L"])),
                Arc::new(StringArray::from(vec!["Data Scientist", "Data Engineer"])),
                Arc::new(StringArray::from(vec!["remote", "on-site"])),
                Arc::new(Float64Array::from(vec![150_000.0, 110_000.0])),
                Arc::new(StringArray::from(vec!["USA", "DEU"])),
            ],
        );

        let err = load_file(&path).expect_err("year overflow");
        assert_eq!(
            err.downcast_ref::<SchemaError>(),
            Some(&SchemaError::InvalidYear { row: 1, value: huge })
        );
    }
}
