use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};
use crate::food::Food;

pub const FOODS_KEY: &str = "foods";
pub const MEALS_KEY: &str = "meals";

/// A database template: an arbitrary JSON object whose `foods` and `meals`
/// entries get replaced. Every other key is carried through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseTemplate {
    document: Map<String, Value>,
}

impl DatabaseTemplate {
    pub fn parse(json: &str, source: &Path) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| BuildError::InvalidTemplate {
            path: source.to_path_buf(),
            source: e,
        })?;
        match value {
            Value::Object(document) => Ok(Self { document }),
            _ => Err(BuildError::TemplateNotObject {
                path: source.to_path_buf(),
            }),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| BuildError::io(path, e))?;
        Self::parse(&json, path)
    }

    /// Replaces the food list and clears all meals.
    pub fn populate(mut self, foods: &[Food]) -> Result<Map<String, Value>> {
        let foods = serde_json::to_value(foods)?;
        self.document.insert(FOODS_KEY.to_string(), foods);
        self.document
            .insert(MEALS_KEY.to_string(), Value::Array(Vec::new()));
        Ok(self.document)
    }
}

/// Serializes a populated document into a compact JSON buffer.
pub fn to_json_bytes(document: &Map<String, Value>) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(document)?)
}

/// Writes the finished buffer in one go, replacing any existing file.
pub fn write_database(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|e| BuildError::io(path, e))
}

/// Typed view of a generated database file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodDatabase {
    pub foods: Vec<Food>,
    #[serde(default)]
    pub meals: Vec<Value>,
    /// Template keys other than `foods` and `meals`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FoodDatabase {
    pub fn parse(json: &str, source: &Path) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BuildError::InvalidDatabase {
            path: PathBuf::from(source),
            source: e,
        })
    }

    pub fn open(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| BuildError::io(path, e))?;
        Self::parse(&json, path)
    }

    pub fn get_food_from_id(&self, id: u64) -> Option<&Food> {
        self.foods.iter().find(|food| food.id == id)
    }
}
