//! Canonical nutrient catalog
//!
//! Fixed lookup tables: FDC vendor nutrient IDs to canonical keys, and
//! canonical keys to display metadata for UI rendering.

use serde::{Deserialize, Serialize};

/// Canonical nutrient keys used across extraction, storage, and aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Calories,
    Protein,
    Carbs,
    Fat,
    Fiber,
    Sodium,
    Sugar,
    SaturatedFat,
    TransFat,
    MonounsaturatedFat,
    PolyunsaturatedFat,
    Cholesterol,
    VitaminA,
    VitaminC,
    VitaminD,
    VitaminE,
    VitaminK,
    Thiamin,
    Riboflavin,
    Niacin,
    VitaminB6,
    Folate,
    VitaminB12,
    Calcium,
    Iron,
    Magnesium,
    Phosphorus,
    Potassium,
    Zinc,
    Selenium,
    Water,
    Caffeine,
}

/// Display category for a nutrient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NutrientCategory {
    Macro,
    Vitamin,
    Mineral,
    Other,
}

/// Display metadata for a canonical nutrient
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NutrientInfo {
    pub label: &'static str,
    pub unit: &'static str,
    pub category: NutrientCategory,
}

impl Nutrient {
    /// Map an FDC nutrient number to its canonical key
    ///
    /// Unmapped IDs return None and are dropped by the extractor. Energy is
    /// only taken from kcal entries (1008 and the Atwater variants); the kJ
    /// entry 1062 is intentionally absent because values are copied without
    /// unit conversion.
    pub fn from_fdc_id(id: u32) -> Option<Self> {
        match id {
            1008 | 2047 | 2048 => Some(Nutrient::Calories),
            1003 => Some(Nutrient::Protein),
            1005 => Some(Nutrient::Carbs),
            1004 => Some(Nutrient::Fat),
            1079 => Some(Nutrient::Fiber),
            1093 => Some(Nutrient::Sodium),
            2000 | 1063 => Some(Nutrient::Sugar),
            1258 => Some(Nutrient::SaturatedFat),
            1257 => Some(Nutrient::TransFat),
            1292 => Some(Nutrient::MonounsaturatedFat),
            1293 => Some(Nutrient::PolyunsaturatedFat),
            1253 => Some(Nutrient::Cholesterol),
            1106 => Some(Nutrient::VitaminA),
            1162 => Some(Nutrient::VitaminC),
            1114 => Some(Nutrient::VitaminD),
            1109 => Some(Nutrient::VitaminE),
            1185 => Some(Nutrient::VitaminK),
            1165 => Some(Nutrient::Thiamin),
            1166 => Some(Nutrient::Riboflavin),
            1167 => Some(Nutrient::Niacin),
            1175 => Some(Nutrient::VitaminB6),
            1177 => Some(Nutrient::Folate),
            1178 => Some(Nutrient::VitaminB12),
            1087 => Some(Nutrient::Calcium),
            1089 => Some(Nutrient::Iron),
            1090 => Some(Nutrient::Magnesium),
            1091 => Some(Nutrient::Phosphorus),
            1092 => Some(Nutrient::Potassium),
            1095 => Some(Nutrient::Zinc),
            1103 => Some(Nutrient::Selenium),
            1051 => Some(Nutrient::Water),
            1057 => Some(Nutrient::Caffeine),
            _ => None,
        }
    }

    /// Parse a canonical key name (the snake_case serde form)
    pub fn from_key(s: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(s.to_string())).ok()
    }

    /// The canonical key name as stored and serialized
    pub fn key(&self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::Protein => "protein",
            Nutrient::Carbs => "carbs",
            Nutrient::Fat => "fat",
            Nutrient::Fiber => "fiber",
            Nutrient::Sodium => "sodium",
            Nutrient::Sugar => "sugar",
            Nutrient::SaturatedFat => "saturated_fat",
            Nutrient::TransFat => "trans_fat",
            Nutrient::MonounsaturatedFat => "monounsaturated_fat",
            Nutrient::PolyunsaturatedFat => "polyunsaturated_fat",
            Nutrient::Cholesterol => "cholesterol",
            Nutrient::VitaminA => "vitamin_a",
            Nutrient::VitaminC => "vitamin_c",
            Nutrient::VitaminD => "vitamin_d",
            Nutrient::VitaminE => "vitamin_e",
            Nutrient::VitaminK => "vitamin_k",
            Nutrient::Thiamin => "thiamin",
            Nutrient::Riboflavin => "riboflavin",
            Nutrient::Niacin => "niacin",
            Nutrient::VitaminB6 => "vitamin_b6",
            Nutrient::Folate => "folate",
            Nutrient::VitaminB12 => "vitamin_b12",
            Nutrient::Calcium => "calcium",
            Nutrient::Iron => "iron",
            Nutrient::Magnesium => "magnesium",
            Nutrient::Phosphorus => "phosphorus",
            Nutrient::Potassium => "potassium",
            Nutrient::Zinc => "zinc",
            Nutrient::Selenium => "selenium",
            Nutrient::Water => "water",
            Nutrient::Caffeine => "caffeine",
        }
    }

    /// Display metadata (label, unit, category) for UI rendering
    pub fn info(&self) -> NutrientInfo {
        use NutrientCategory::*;
        match self {
            Nutrient::Calories => NutrientInfo { label: "Calories", unit: "kcal", category: Macro },
            Nutrient::Protein => NutrientInfo { label: "Protein", unit: "g", category: Macro },
            Nutrient::Carbs => NutrientInfo { label: "Carbohydrates", unit: "g", category: Macro },
            Nutrient::Fat => NutrientInfo { label: "Total Fat", unit: "g", category: Macro },
            Nutrient::Fiber => NutrientInfo { label: "Dietary Fiber", unit: "g", category: Macro },
            Nutrient::Sodium => NutrientInfo { label: "Sodium", unit: "mg", category: Mineral },
            Nutrient::Sugar => NutrientInfo { label: "Sugars", unit: "g", category: Macro },
            Nutrient::SaturatedFat => NutrientInfo { label: "Saturated Fat", unit: "g", category: Macro },
            Nutrient::TransFat => NutrientInfo { label: "Trans Fat", unit: "g", category: Macro },
            Nutrient::MonounsaturatedFat => NutrientInfo { label: "Monounsaturated Fat", unit: "g", category: Macro },
            Nutrient::PolyunsaturatedFat => NutrientInfo { label: "Polyunsaturated Fat", unit: "g", category: Macro },
            Nutrient::Cholesterol => NutrientInfo { label: "Cholesterol", unit: "mg", category: Other },
            Nutrient::VitaminA => NutrientInfo { label: "Vitamin A", unit: "µg", category: Vitamin },
            Nutrient::VitaminC => NutrientInfo { label: "Vitamin C", unit: "mg", category: Vitamin },
            Nutrient::VitaminD => NutrientInfo { label: "Vitamin D", unit: "µg", category: Vitamin },
            Nutrient::VitaminE => NutrientInfo { label: "Vitamin E", unit: "mg", category: Vitamin },
            Nutrient::VitaminK => NutrientInfo { label: "Vitamin K", unit: "µg", category: Vitamin },
            Nutrient::Thiamin => NutrientInfo { label: "Thiamin (B1)", unit: "mg", category: Vitamin },
            Nutrient::Riboflavin => NutrientInfo { label: "Riboflavin (B2)", unit: "mg", category: Vitamin },
            Nutrient::Niacin => NutrientInfo { label: "Niacin (B3)", unit: "mg", category: Vitamin },
            Nutrient::VitaminB6 => NutrientInfo { label: "Vitamin B6", unit: "mg", category: Vitamin },
            Nutrient::Folate => NutrientInfo { label: "Folate", unit: "µg", category: Vitamin },
            Nutrient::VitaminB12 => NutrientInfo { label: "Vitamin B12", unit: "µg", category: Vitamin },
            Nutrient::Calcium => NutrientInfo { label: "Calcium", unit: "mg", category: Mineral },
            Nutrient::Iron => NutrientInfo { label: "Iron", unit: "mg", category: Mineral },
            Nutrient::Magnesium => NutrientInfo { label: "Magnesium", unit: "mg", category: Mineral },
            Nutrient::Phosphorus => NutrientInfo { label: "Phosphorus", unit: "mg", category: Mineral },
            Nutrient::Potassium => NutrientInfo { label: "Potassium", unit: "mg", category: Mineral },
            Nutrient::Zinc => NutrientInfo { label: "Zinc", unit: "mg", category: Mineral },
            Nutrient::Selenium => NutrientInfo { label: "Selenium", unit: "µg", category: Mineral },
            Nutrient::Water => NutrientInfo { label: "Water", unit: "g", category: Other },
            Nutrient::Caffeine => NutrientInfo { label: "Caffeine", unit: "mg", category: Other },
        }
    }
}
