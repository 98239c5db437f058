use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    Array, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray,
    StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{
    Column, PassStatus, RawRecord, ATTENDANCE_RATE, COLUMNS, EXTRACURRICULAR, PARENT_EDUCATION,
    PASSED, PREVIOUS_GRADES, STUDY_HOURS,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load raw student records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming the six required columns (primary format)
/// * `.json`    – `[{ "Study Hours per Week": 12.5, "Passed": "Yes", ... }, ...]`
/// * `.parquet` – one Arrow column per required column
///
/// Missing cells come back as `None`; imputation fills them afterwards.
pub fn load_file(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Cell parsing shared by all formats
// ---------------------------------------------------------------------------

/// Markers pandas treats as missing when reading CSV.
fn is_missing(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "" | "na" | "n/a" | "nan" | "null" | "none"
    )
}

fn parse_number(s: &str, row: usize, column: &Column) -> Result<Option<f64>, LoadError> {
    if is_missing(s) {
        return Ok(None);
    }
    s.trim()
        .parse::<f64>()
        .map(Some)
        .map_err(|_| invalid(row, column, s))
}

fn parse_text(s: &str) -> Option<String> {
    if is_missing(s) {
        None
    } else {
        Some(s.trim().to_string())
    }
}

fn parse_passed(s: &str, row: usize) -> Result<PassStatus, LoadError> {
    s.parse().map_err(|_| invalid(row, &PASSED, s))
}

fn invalid(row: usize, column: &Column, value: &str) -> LoadError {
    LoadError::InvalidValue {
        row,
        column: column.key,
        value: value.to_string(),
    }
}

/// Locate every required column among `headers`, in `COLUMNS` order.
fn column_positions(headers: &[&str]) -> Result<[usize; 6], LoadError> {
    let mut positions = [0usize; 6];
    for (slot, column) in positions.iter_mut().zip(COLUMNS.iter()) {
        *slot = headers
            .iter()
            .position(|h| column.matches_header(h))
            .ok_or(LoadError::MissingColumn(column.header))?;
    }
    Ok(positions)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one row per student.
/// Columns beyond the six required ones (e.g. `Student ID`) are ignored.
fn load_csv(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    read_csv(&mut reader)
}

fn read_csv<R: std::io::Read>(reader: &mut csv::Reader<R>) -> Result<Vec<RawRecord>, LoadError> {
    let headers = reader.headers()?.clone();
    let names: Vec<&str> = headers.iter().collect();
    let pos = column_positions(&names)?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let cell = |i: usize| record.get(pos[i]).unwrap_or("");

        rows.push(RawRecord {
            study_hours_per_week: parse_number(cell(0), row_no, &STUDY_HOURS)?,
            attendance_rate: parse_number(cell(1), row_no, &ATTENDANCE_RATE)?,
            previous_grades: parse_number(cell(2), row_no, &PREVIOUS_GRADES)?,
            extracurricular: parse_text(cell(3)),
            parent_education_level: parse_text(cell(4)),
            passed: Some(parse_passed(cell(5), row_no)?),
        });
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Study Hours per Week": 12.5,
///     "Attendance Rate": 91.2,
///     "Previous Grades": 78.0,
///     "Participation in Extracurricular Activities": "Yes",
///     "Parent Education Level": "Master",
///     "Passed": "Yes"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(open(path)?))?;
    parse_json_records(&root)
}

fn parse_json_records(root: &JsonValue) -> Result<Vec<RawRecord>, LoadError> {
    let records = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected top-level JSON array".to_string()))?;

    // Header check runs against the first object, like a CSV header row.
    if let Some(first) = records.first().and_then(JsonValue::as_object) {
        let keys: Vec<&str> = first.keys().map(String::as_str).collect();
        column_positions(&keys)?;
    }

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            let obj = rec
                .as_object()
                .ok_or_else(|| LoadError::Malformed(format!("row {i} is not a JSON object")))?;
            let field = move |column: &Column| {
                obj.iter()
                    .find(|(k, _)| column.matches_header(k))
                    .map(|(_, v)| v)
                    .ok_or(LoadError::MissingColumn(column.header))
            };

            Ok(RawRecord {
                study_hours_per_week: json_number(field(&STUDY_HOURS)?, i, &STUDY_HOURS)?,
                attendance_rate: json_number(field(&ATTENDANCE_RATE)?, i, &ATTENDANCE_RATE)?,
                previous_grades: json_number(field(&PREVIOUS_GRADES)?, i, &PREVIOUS_GRADES)?,
                extracurricular: json_text(field(&EXTRACURRICULAR)?),
                parent_education_level: json_text(field(&PARENT_EDUCATION)?),
                passed: Some(match field(&PASSED)? {
                    JsonValue::Bool(true) => PassStatus::Passed,
                    JsonValue::Bool(false) => PassStatus::NotPassed,
                    other => parse_passed(&json_text(other).unwrap_or_default(), i)?,
                }),
            })
        })
        .collect()
}

fn json_number(val: &JsonValue, row: usize, column: &Column) -> Result<Option<f64>, LoadError> {
    match val {
        JsonValue::Null => Ok(None),
        JsonValue::Number(n) => Ok(n.as_f64()),
        JsonValue::String(s) => parse_number(s, row, column),
        other => Err(invalid(row, column, &other.to_string())),
    }
}

fn json_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => parse_text(s),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per required field.
///
/// Numeric columns may be Float64, Float32, Int64 or Int32; text columns Utf8
/// or LargeUtf8. `Passed` may also be Boolean. Nulls become missing cells.
fn load_parquet(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    read_parquet(open(path)?, PARQUET_BATCH_SIZE)
}

const PARQUET_BATCH_SIZE: usize = 1024;

fn read_parquet(file: File, batch_size: usize) -> Result<Vec<RawRecord>, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?.with_batch_size(batch_size);
    let reader = builder.build()?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        let cols: Vec<&Arc<dyn Array>> = column_positions(&names)?
            .iter()
            .map(|&p| batch.column(p))
            .collect();

        for index in 0..batch.num_rows() {
            let row = rows.len();
            let at = |i: usize, column: &'static Column| ArrowCell {
                col: cols[i],
                index,
                row,
                column,
            };
            let passed = at(5, &PASSED).text()?.unwrap_or_default();
            rows.push(RawRecord {
                study_hours_per_week: at(0, &STUDY_HOURS).number()?,
                attendance_rate: at(1, &ATTENDANCE_RATE).number()?,
                previous_grades: at(2, &PREVIOUS_GRADES).number()?,
                extracurricular: at(3, &EXTRACURRICULAR).text()?,
                parent_education_level: at(4, &PARENT_EDUCATION).text()?,
                passed: Some(parse_passed(&passed, row)?),
            });
        }
    }
    Ok(rows)
}

// -- Arrow helpers --

/// One cell of an Arrow column: `index` within the batch, `row` within the
/// file (used in error reports).
struct ArrowCell<'a> {
    col: &'a Arc<dyn Array>,
    index: usize,
    row: usize,
    column: &'a Column,
}

impl ArrowCell<'_> {
    fn unsupported(&self) -> LoadError {
        LoadError::Malformed(format!(
            "column '{}' has unsupported type {:?}",
            self.column.header,
            self.col.data_type()
        ))
    }

    fn number(&self) -> Result<Option<f64>, LoadError> {
        let (col, i) = (self.col, self.index);
        if col.is_null(i) {
            return Ok(None);
        }
        let any = col.as_any();
        let value = match col.data_type() {
            DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(i)),
            DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| a.value(i) as f64),
            DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(i) as f64),
            DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(i) as f64),
            DataType::Utf8 | DataType::LargeUtf8 => {
                return match self.text()? {
                    Some(s) => parse_number(&s, self.row, self.column),
                    None => Ok(None),
                };
            }
            _ => None,
        };
        match value {
            Some(v) if v.is_nan() => Ok(None),
            Some(v) => Ok(Some(v)),
            None => Err(self.unsupported()),
        }
    }

    fn text(&self) -> Result<Option<String>, LoadError> {
        let (col, i) = (self.col, self.index);
        if col.is_null(i) {
            return Ok(None);
        }
        let any = col.as_any();
        let value = match col.data_type() {
            DataType::Utf8 => any
                .downcast_ref::<StringArray>()
                .map(|a| a.value(i).to_string()),
            DataType::LargeUtf8 => any
                .downcast_ref::<LargeStringArray>()
                .map(|a| a.value(i).to_string()),
            DataType::Boolean => any
                .downcast_ref::<BooleanArray>()
                .map(|a| a.value(i).to_string()),
            _ => None,
        };
        value
            .map(|s| parse_text(&s))
            .ok_or_else(|| self.unsupported())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use arrow::array::ArrayRef;
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Student ID,Study Hours per Week,Attendance Rate,Previous Grades,\
Participation in Extracurricular Activities,Parent Education Level,Passed\n";

    fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn csv_with_gaps_loads_missing_cells_as_none() {
        let file = temp_file(
            ".csv",
            &format!("{HEADER}S1,12.5,90,,Yes,Master,Yes\nS2,,85.5,70,,NA,No\n"),
        );
        let rows = load_file(file.path()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].study_hours_per_week, Some(12.5));
        assert_eq!(rows[0].previous_grades, None);
        assert_eq!(rows[0].passed, Some(PassStatus::Passed));
        assert_eq!(rows[1].study_hours_per_week, None);
        assert_eq!(rows[1].extracurricular, None);
        assert_eq!(rows[1].parent_education_level, None);
        assert_eq!(rows[1].passed, Some(PassStatus::NotPassed));
    }

    #[test]
    fn csv_accepts_snake_case_headers_in_any_order() {
        let file = temp_file(
            ".csv",
            "passed,parent_education_level,extracurricular,\
             previous_grades,attendance_rate,study_hours_per_week\n\
             Not Passed,PhD,No,60,70,3\n",
        );
        let rows = load_file(file.path()).unwrap();
        assert_eq!(rows[0].study_hours_per_week, Some(3.0));
        assert_eq!(rows[0].attendance_rate, Some(70.0));
        assert_eq!(rows[0].parent_education_level.as_deref(), Some("PhD"));
        assert_eq!(rows[0].passed, Some(PassStatus::NotPassed));
    }

    #[test]
    fn csv_missing_column_is_a_load_error() {
        let file = temp_file(
            ".csv",
            "Study Hours per Week,Attendance Rate,Previous Grades,Passed\n1,2,3,Yes\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingColumn("Participation in Extracurricular Activities")
        ));
    }

    #[test]
    fn csv_non_numeric_value_is_reported_with_row() {
        let file = temp_file(".csv", &format!("{HEADER}S1,lots,90,80,Yes,Master,Yes\n"));
        match load_file(file.path()).unwrap_err() {
            LoadError::InvalidValue { row, column, value } => {
                assert_eq!(row, 0);
                assert_eq!(column, "study_hours_per_week");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn csv_missing_passed_is_rejected() {
        let file = temp_file(".csv", &format!("{HEADER}S1,1,90,80,Yes,Master,\n"));
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::InvalidValue { column: "passed", .. })
        ));
    }

    #[test]
    fn unreadable_source_is_an_io_error() {
        let err = load_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = temp_file(".xlsx", "");
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn json_records_load_with_nulls_and_bools() {
        let file = temp_file(
            ".json",
            r#"[
                {"Study Hours per Week": 10, "Attendance Rate": 88.5, "Previous Grades": null,
                 "Participation in Extracurricular Activities": "Yes",
                 "Parent Education Level": "Bachelor", "Passed": true},
                {"Study Hours per Week": "7.5", "Attendance Rate": 60, "Previous Grades": 55,
                 "Participation in Extracurricular Activities": null,
                 "Parent Education Level": "High School", "Passed": "Not Passed"}
            ]"#,
        );
        let rows = load_file(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].study_hours_per_week, Some(10.0));
        assert_eq!(rows[0].previous_grades, None);
        assert_eq!(rows[0].passed, Some(PassStatus::Passed));
        assert_eq!(rows[1].study_hours_per_week, Some(7.5));
        assert_eq!(rows[1].extracurricular, None);
        assert_eq!(rows[1].passed, Some(PassStatus::NotPassed));
    }

    #[test]
    fn json_without_required_key_is_a_load_error() {
        let root: JsonValue = serde_json::json!([{ "Passed": "Yes" }]);
        assert!(matches!(
            parse_json_records(&root),
            Err(LoadError::MissingColumn("Study Hours per Week"))
        ));
    }

    // -- Parquet --

    fn parquet_file(batch: &RecordBatch) -> NamedTempFile {
        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer =
            ArrowWriter::try_new(file.as_file().try_clone().unwrap(), batch.schema(), None)
                .unwrap();
        writer.write(batch).unwrap();
        writer.close().unwrap();
        file
    }

    fn mixed_type_batch(hours: ArrayRef) -> RecordBatch {
        RecordBatch::try_from_iter(vec![
            ("Study Hours per Week", hours),
            (
                "Attendance Rate",
                Arc::new(Int64Array::from(vec![Some(80), None])) as ArrayRef,
            ),
            (
                "Previous Grades",
                Arc::new(Float64Array::from(vec![70.0, 60.0])) as ArrayRef,
            ),
            (
                "Participation in Extracurricular Activities",
                Arc::new(StringArray::from(vec![Some("Yes"), None])) as ArrayRef,
            ),
            (
                "Parent Education Level",
                Arc::new(LargeStringArray::from(vec!["Master", "PhD"])) as ArrayRef,
            ),
            (
                "Passed",
                Arc::new(BooleanArray::from(vec![true, false])) as ArrayRef,
            ),
        ])
        .unwrap()
    }

    #[test]
    fn parquet_mixed_types_load_with_nulls_and_nan_as_missing() {
        let hours = Arc::new(Float32Array::from(vec![1.5, f32::NAN])) as ArrayRef;
        let file = parquet_file(&mixed_type_batch(hours));
        let rows = load_file(file.path()).unwrap();

        assert_eq!(
            rows,
            vec![
                RawRecord {
                    study_hours_per_week: Some(1.5),
                    attendance_rate: Some(80.0),
                    previous_grades: Some(70.0),
                    extracurricular: Some("Yes".to_string()),
                    parent_education_level: Some("Master".to_string()),
                    passed: Some(PassStatus::Passed),
                },
                RawRecord {
                    study_hours_per_week: None,
                    attendance_rate: None,
                    previous_grades: Some(60.0),
                    extracurricular: None,
                    parent_education_level: Some("PhD".to_string()),
                    passed: Some(PassStatus::NotPassed),
                },
            ]
        );
    }

    #[test]
    fn parquet_missing_column_is_a_load_error() {
        let batch = RecordBatch::try_from_iter(vec![
            (
                "Study Hours per Week",
                Arc::new(Float64Array::from(vec![1.0])) as ArrayRef,
            ),
            ("Passed", Arc::new(BooleanArray::from(vec![true])) as ArrayRef),
        ])
        .unwrap();
        let file = parquet_file(&batch);
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::MissingColumn("Attendance Rate"))
        ));
    }

    #[test]
    fn parquet_errors_report_row_within_file_across_batches() {
        let hours = Arc::new(StringArray::from(vec!["2.5", "lots"])) as ArrayRef;
        let file = parquet_file(&mixed_type_batch(hours));

        match read_parquet(file.reopen().unwrap(), 1).unwrap_err() {
            LoadError::InvalidValue { row, column, value } => {
                assert_eq!(row, 1);
                assert_eq!(column, "study_hours_per_week");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
