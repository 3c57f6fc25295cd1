use csv::{ReaderBuilder, StringRecord};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

use crate::error::{BuildError, Result};

// Expected column headers. All nutrition values are per 100g.
pub const ID_COL: &str = "ID";
pub const NAME_COL: &str = "Name";
pub const CALORIES_COL: &str = "Calories";
pub const CARB_COL: &str = "Carbohydrate (g)";
pub const PROTEIN_COL: &str = "Protein (g)";
pub const FAT_COL: &str = "Fat (g)";
pub const SERVING_WEIGHT_COL: &str = "Serving Weight 2 (g)";

const UTF8_BOM: char = '\u{feff}';

/// One row of the nutrition facts sheet, already coerced to numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct NutritionRow {
    pub id: u64,
    pub name: String,
    pub calories: u32,
    pub carbohydrate_g: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    /// `None` when the column is absent or the cell is blank.
    pub serving_weight_g: Option<f64>,
}

struct ColumnIndices {
    id: usize,
    name: usize,
    calories: usize,
    carbohydrate: usize,
    protein: usize,
    fat: usize,
    serving_weight: Option<usize>,
}

impl ColumnIndices {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |column: &str| headers.iter().position(|h| h == column);
        let require = |column: &str| {
            find(column).ok_or_else(|| BuildError::MissingColumn {
                column: column.to_string(),
            })
        };

        Ok(Self {
            id: require(ID_COL)?,
            name: require(NAME_COL)?,
            calories: require(CALORIES_COL)?,
            carbohydrate: require(CARB_COL)?,
            protein: require(PROTEIN_COL)?,
            fat: require(FAT_COL)?,
            serving_weight: find(SERVING_WEIGHT_COL),
        })
    }
}

// The reader is flexible, so a short row surfaces here rather than in csv.
fn cell<'r>(record: &'r StringRecord, idx: usize, row: usize, column: &str) -> Result<&'r str> {
    record.get(idx).ok_or_else(|| BuildError::MissingField {
        row,
        column: column.to_string(),
    })
}

/// Rejects NaN and infinities: serde_json would write them as `null`.
fn parse_f64(s: &str, row: usize, column: &str) -> Result<f64> {
    match s.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(BuildError::InvalidNumber {
            row,
            column: column.to_string(),
            value: s.to_string(),
        }),
    }
}

fn parse_id(s: &str, row: usize) -> Result<u64> {
    s.trim().parse::<u64>().map_err(|_| BuildError::InvalidNumber {
        row,
        column: ID_COL.to_string(),
        value: s.to_string(),
    })
}

/// Parses as a float first, then truncates toward zero.
fn parse_calories(s: &str, row: usize) -> Result<u32> {
    let kcal = parse_f64(s, row, CALORIES_COL)?;
    if kcal < 0.0 || kcal >= f64::from(u32::MAX) + 1.0 {
        return Err(BuildError::InvalidNumber {
            row,
            column: CALORIES_COL.to_string(),
            value: s.to_string(),
        });
    }
    Ok(kcal.trunc() as u32)
}

fn parse_optional_f64(s: &str, row: usize, column: &str) -> Result<Option<f64>> {
    if s.trim().is_empty() {
        return Ok(None);
    }
    parse_f64(s, row, column).map(Some)
}

fn parse_record(record: &StringRecord, cols: &ColumnIndices, row: usize) -> Result<NutritionRow> {
    // A trailing serving weight cell may be left off entirely.
    let serving_weight_g = match cols.serving_weight.and_then(|idx| record.get(idx)) {
        Some(s) => parse_optional_f64(s, row, SERVING_WEIGHT_COL)?,
        None => None,
    };

    Ok(NutritionRow {
        id: parse_id(cell(record, cols.id, row, ID_COL)?, row)?,
        name: cell(record, cols.name, row, NAME_COL)?.to_string(),
        calories: parse_calories(cell(record, cols.calories, row, CALORIES_COL)?, row)?,
        carbohydrate_g: parse_f64(cell(record, cols.carbohydrate, row, CARB_COL)?, row, CARB_COL)?,
        protein_g: parse_f64(cell(record, cols.protein, row, PROTEIN_COL)?, row, PROTEIN_COL)?,
        fat_g: parse_f64(cell(record, cols.fat, row, FAT_COL)?, row, FAT_COL)?,
        serving_weight_g,
    })
}

/// Parses nutrition facts from CSV text. A leading byte-order mark is ignored.
///
/// Rows are returned in file order. `row` numbers in errors are 1-based and
/// count data rows only. `source` is only used to label CSV reader errors.
pub fn parse_nutrition_csv(text: &str, source: &Path) -> Result<Vec<NutritionRow>> {
    let csv_error = |e: csv::Error| BuildError::Csv {
        path: source.to_path_buf(),
        source: e,
    };

    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = rdr.headers().map_err(csv_error)?.clone();
    let cols = ColumnIndices::resolve(&headers)?;

    let mut rows = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record = result.map_err(csv_error)?;
        rows.push(parse_record(&record, &cols, row_index + 1)?);
    }
    Ok(rows)
}

/// Reads the whole nutrition CSV into memory and parses every row.
pub fn load_nutrition_rows(csv_path: &Path) -> Result<Vec<NutritionRow>> {
    let text = fs::read_to_string(csv_path).map_err(|e| match e.kind() {
        ErrorKind::InvalidData => BuildError::InvalidEncoding {
            path: csv_path.to_path_buf(),
            source: e,
        },
        _ => BuildError::io(csv_path, e),
    })?;
    let rows = parse_nutrition_csv(&text, csv_path)?;
    debug!(rows = rows.len(), path = ?csv_path, "parsed nutrition CSV");
    Ok(rows)
}
