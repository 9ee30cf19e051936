// 🏷️ Nutrition Classification - fixed BMI thresholds

use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) of the undernutrition band
pub const UNDERNUTRITION_BELOW: f64 = 17.0;

/// Lower bound (inclusive) of the overnutrition band
pub const OVERNUTRITION_FROM: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NutritionCategory {
    #[serde(rename = "Gizi Baik")]
    GoodNutrition,
    #[serde(rename = "Gizi Kurang")]
    Undernutrition,
    #[serde(rename = "Gizi Lebih")]
    Overnutrition,
}

impl NutritionCategory {
    pub const ALL: [NutritionCategory; 3] = [
        NutritionCategory::GoodNutrition,
        NutritionCategory::Undernutrition,
        NutritionCategory::Overnutrition,
    ];

    /// Label reported as `prediction` in responses
    pub fn label(&self) -> &'static str {
        match self {
            NutritionCategory::GoodNutrition => "Gizi Baik",
            NutritionCategory::Undernutrition => "Gizi Kurang",
            NutritionCategory::Overnutrition => "Gizi Lebih",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            NutritionCategory::GoodNutrition => "Child has appropriate weight for age and height.",
            NutritionCategory::Undernutrition => "Child has lower weight than recommended.",
            NutritionCategory::Overnutrition => "Child has higher weight than recommended.",
        }
    }
}

impl std::fmt::Display for NutritionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a BMI onto its category. Total over the reals; NaN falls through to overnutrition.
pub fn classify(bmi: f64) -> NutritionCategory {
    if bmi < UNDERNUTRITION_BELOW {
        NutritionCategory::Undernutrition
    } else if bmi < OVERNUTRITION_FROM {
        NutritionCategory::GoodNutrition
    } else {
        NutritionCategory::Overnutrition
    }
}
