use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::database::{self, DatabaseTemplate};
use crate::error::Result;
use crate::food::Food;
use crate::nutrition_csv::{load_nutrition_rows, NutritionRow};

/// What a finished build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub foods_written: usize,
    pub output_path: PathBuf,
}

/// Converts nutrition rows to foods, keeping row order.
pub fn rows_to_foods(rows: &[NutritionRow]) -> Vec<Food> {
    rows.iter().map(Food::from).collect()
}

/// Builds a populated food database from a template and a nutrition CSV.
///
/// Both inputs are read and the whole document is serialized before the
/// output path is opened, so a failed run leaves the output untouched.
pub fn build_database(
    template_path: &Path,
    csv_path: &Path,
    output_path: &Path,
) -> Result<BuildSummary> {
    info!(template = ?template_path, "loading database template");
    let template = DatabaseTemplate::load(template_path)?;

    info!(csv = ?csv_path, "loading nutrition facts");
    let rows = load_nutrition_rows(csv_path)?;
    let foods = rows_to_foods(&rows);
    debug!(foods = foods.len(), "converted nutrition rows to foods");

    let document = template.populate(&foods)?;
    let bytes = database::to_json_bytes(&document)?;

    database::write_database(output_path, &bytes)?;
    info!(
        foods = foods.len(),
        bytes = bytes.len(),
        output = ?output_path,
        "food database written"
    );

    Ok(BuildSummary {
        foods_written: foods.len(),
        output_path: output_path.to_path_buf(),
    })
}
