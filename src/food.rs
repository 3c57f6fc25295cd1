use serde::{Deserialize, Serialize};
use std::ops::Mul;

use crate::nutrition_csv::NutritionRow;

pub type FoodID = u64;

/// Every generated record is normalized to this reference mass.
pub const REFERENCE_MASS_G: u64 = 100;
const DEFAULT_SERVING_WEIGHT_G: f64 = 100.0;

/// Macronutrients for a given amount of food. Masses are in grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    pub calories: u32, // kcal
    pub carbohydrates: f64,
    pub proteins: f64,
    pub fats: f64,
}

impl Mul<f64> for Nutrients {
    type Output = Nutrients;

    fn mul(self, rhs: f64) -> Self::Output {
        Nutrients {
            calories: (f64::from(self.calories) * rhs) as u32,
            carbohydrates: self.carbohydrates * rhs,
            proteins: self.proteins * rhs,
            fats: self.fats * rhs,
        }
    }
}

impl Mul<Nutrients> for f64 {
    type Output = Nutrients;

    fn mul(self, rhs: Nutrients) -> Self::Output {
        rhs * self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FoodQuantity {
    Mass(u64),    // grams
    Volume(f64),  // ml
    Serving(f64), // number of servings
}

/// A food entry in the database file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub parent_id: FoodID,
    pub id: FoodID,
    pub name: String,
    pub manufacturer: String,
    pub nutrition: Nutrients,
    pub mass: u64,
    pub volume_of_100g: f64,
    pub servings_in_100g: f64,
    pub user_defined: bool,
    pub ingredients: Vec<Food>,
    pub tags: String, // '|' separated
}

impl Default for Food {
    fn default() -> Self {
        Food {
            parent_id: 0,
            id: 0,
            name: String::new(),
            manufacturer: String::new(),
            nutrition: Nutrients::default(),
            mass: REFERENCE_MASS_G,
            volume_of_100g: 1.0,
            servings_in_100g: 1.0,
            user_defined: false,
            ingredients: vec![],
            tags: String::new(),
        }
    }
}

/// Servings per 100g for a serving weight in grams.
///
/// Missing or non-positive weights fall back to 100g (one serving per 100g).
/// Weights below one gram are clamped to one gram.
pub fn servings_in_100g(serving_weight_g: Option<f64>) -> f64 {
    let weight = match serving_weight_g {
        Some(w) if w > 0.0 => w,
        _ => DEFAULT_SERVING_WEIGHT_G,
    };
    100.0 / weight.max(1.0)
}

impl From<&NutritionRow> for Food {
    fn from(row: &NutritionRow) -> Self {
        Food {
            id: row.id,
            name: row.name.clone(),
            nutrition: Nutrients {
                calories: row.calories,
                carbohydrates: row.carbohydrate_g,
                proteins: row.protein_g,
                fats: row.fat_g,
            },
            servings_in_100g: servings_in_100g(row.serving_weight_g),
            ..Food::default()
        }
    }
}

impl Food {
    /// Nutrients for the given quantity of this food.
    ///
    /// Returns `None` if the food has no usable reference for that unit.
    pub fn get_nutrition(&self, quantity: FoodQuantity) -> Option<Nutrients> {
        if self.mass == 0 {
            return None;
        }
        let per_reference = REFERENCE_MASS_G as f64 / self.mass as f64;
        let factor = match quantity {
            FoodQuantity::Mass(grams) => grams as f64 / self.mass as f64,
            FoodQuantity::Volume(ml) => {
                if self.volume_of_100g <= 0.0 {
                    return None;
                }
                ml / self.volume_of_100g * per_reference
            }
            FoodQuantity::Serving(count) => {
                if self.servings_in_100g <= 0.0 {
                    return None;
                }
                count / self.servings_in_100g * per_reference
            }
        };
        Some(self.nutrition * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple_row(serving_weight_g: Option<f64>) -> NutritionRow {
        NutritionRow {
            id: 1,
            name: "Apple".to_string(),
            calories: 52,
            carbohydrate_g: 14.0,
            protein_g: 0.3,
            fat_g: 0.2,
            serving_weight_g,
        }
    }

    #[test]
    fn test_servings_in_100g() {
        assert_eq!(servings_in_100g(None), 1.0);
        assert_eq!(servings_in_100g(Some(100.0)), 1.0);
        assert_eq!(servings_in_100g(Some(50.0)), 2.0);
        assert_eq!(servings_in_100g(Some(200.0)), 0.5);
        // Non-positive weights are treated as missing.
        assert_eq!(servings_in_100g(Some(0.0)), 1.0);
        assert_eq!(servings_in_100g(Some(-5.0)), 1.0);
        assert_eq!(servings_in_100g(Some(f64::NAN)), 1.0);
        // Sub-gram weights clamp to 1g.
        assert_eq!(servings_in_100g(Some(0.5)), 100.0);
    }

    #[test]
    fn test_food_from_row_fixed_fields() {
        let food = Food::from(&apple_row(Some(50.0)));
        assert_eq!(food.parent_id, 0);
        assert_eq!(food.id, 1);
        assert_eq!(food.name, "Apple");
        assert_eq!(food.manufacturer, "");
        assert_eq!(food.tags, "");
        assert_eq!(food.mass, 100);
        assert_eq!(food.volume_of_100g, 1.0);
        assert_eq!(food.servings_in_100g, 2.0);
        assert!(!food.user_defined);
        assert!(food.ingredients.is_empty());
        assert_eq!(food.nutrition.calories, 52);
        assert_eq!(food.nutrition.proteins, 0.3);
    }

    #[test]
    fn test_food_serializes_nested_nutrition() -> anyhow::Result<()> {
        let food = Food::from(&apple_row(None));
        let value = serde_json::to_value(&food)?;
        assert_eq!(value["nutrition"]["calories"], 52);
        assert_eq!(value["nutrition"]["carbohydrates"], 14.0);
        assert_eq!(value["servings_in_100g"], 1.0);
        assert_eq!(value["user_defined"], false);
        assert_eq!(value["ingredients"], serde_json::json!([]));
        Ok(())
    }

    #[test]
    fn test_nutrients_scale_truncates_calories() {
        let nutrients = Nutrients {
            calories: 52,
            carbohydrates: 14.0,
            proteins: 0.5,
            fats: 0.25,
        };
        let half = nutrients * 0.5;
        assert_eq!(half.calories, 26);
        assert_eq!(half.proteins, 0.25);
        assert_eq!((0.3 * nutrients).calories, 15); // 15.6 truncated
    }

    #[test]
    fn test_get_nutrition_by_quantity() {
        let food = Food::from(&apple_row(Some(50.0)));

        let by_mass = food.get_nutrition(FoodQuantity::Mass(200)).unwrap();
        assert_eq!(by_mass.calories, 104);
        assert_eq!(by_mass.carbohydrates, 28.0);

        // Two servings fit in 100g, so one serving is 50g.
        let by_serving = food.get_nutrition(FoodQuantity::Serving(1.0)).unwrap();
        assert_eq!(by_serving.calories, 26);

        let by_volume = food.get_nutrition(FoodQuantity::Volume(100.0)).unwrap();
        assert_eq!(by_volume.calories, 5200); // volume_of_100g is 1ml
    }

    #[test]
    fn test_get_nutrition_without_reference() {
        let food = Food {
            volume_of_100g: 0.0,
            servings_in_100g: 0.0,
            ..Food::default()
        };
        assert!(food.get_nutrition(FoodQuantity::Volume(10.0)).is_none());
        assert!(food.get_nutrition(FoodQuantity::Serving(1.0)).is_none());
        assert!(food.get_nutrition(FoodQuantity::Mass(10)).is_some());
    }
}
