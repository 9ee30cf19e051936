// 🥗 Food Recommendations - category filter + random sample
//
// Lookups return `Result<_, LookupError>` internally. The public `recommend`
// boundary turns any lookup failure into an empty list, so a dataset problem
// never fails an otherwise valid prediction.

use crate::classifier::NutritionCategory;
use crate::dataset::{Dataset, FoodRecord, LookupError};
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of foods returned per prediction
pub const DEFAULT_RECOMMENDATIONS: usize = 5;

impl NutritionCategory {
    /// Nutrient predicate selecting foods suited to this category.
    /// A missing nutrient value never satisfies a comparison.
    pub fn matches(&self, food: &FoodRecord) -> bool {
        let Some(calories) = food.caloric_value else {
            return false;
        };
        match self {
            NutritionCategory::GoodNutrition => {
                calories > 50.0 && calories < 200.0 && food.protein.is_some_and(|p| p > 5.0)
            }
            NutritionCategory::Undernutrition => {
                calories >= 200.0 && food.protein.is_some_and(|p| p > 10.0)
            }
            NutritionCategory::Overnutrition => {
                calories < 50.0 && food.fat.is_some_and(|f| f < 5.0)
            }
        }
    }
}

/// Rows of the dataset matching the category predicate
pub fn matching_foods<'a>(
    category: NutritionCategory,
    dataset: &'a Dataset,
) -> Result<Vec<&'a FoodRecord>, LookupError> {
    Ok(dataset
        .records()?
        .iter()
        .filter(|food| category.matches(food))
        .collect())
}

pub fn count_matches(category: NutritionCategory, dataset: &Dataset) -> Result<usize, LookupError> {
    Ok(matching_foods(category, dataset)?.len())
}

/// Uniform sample without replacement of `min(n, matches)` foods
pub fn try_recommend_with_rng<R: Rng + ?Sized>(
    category: NutritionCategory,
    n: usize,
    dataset: &Dataset,
    rng: &mut R,
) -> Result<Vec<FoodRecord>, LookupError> {
    let candidates = matching_foods(category, dataset)?;
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    Ok(candidates
        .choose_multiple(rng, n.min(candidates.len()))
        .map(|food| (*food).clone())
        .collect())
}

pub fn recommend_with_rng<R: Rng + ?Sized>(
    category: NutritionCategory,
    n: usize,
    dataset: &Dataset,
    rng: &mut R,
) -> Vec<FoodRecord> {
    match try_recommend_with_rng(category, n, dataset, rng) {
        Ok(foods) => foods,
        Err(e) => {
            tracing::warn!(category = %category, "Error in food recommendations: {}", e);
            Vec::new()
        }
    }
}

/// Recommend up to `n` foods for a category using the thread-local RNG
pub fn recommend(category: NutritionCategory, n: usize, dataset: &Dataset) -> Vec<FoodRecord> {
    recommend_with_rng(category, n, dataset, &mut rand::thread_rng())
}
