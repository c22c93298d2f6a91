use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of categories used by the ingredient catalog. Unknown category
/// strings are a load-time error, not a silent fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngredientCategory {
    Protein,
    Vegetable,
    Grain,
    Dairy,
    Herb,
    Spice,
    Fruit,
    Oil,
    Condiment,
}

impl IngredientCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientCategory::Protein => "Protein",
            IngredientCategory::Vegetable => "Vegetable",
            IngredientCategory::Grain => "Grain",
            IngredientCategory::Dairy => "Dairy",
            IngredientCategory::Herb => "Herb",
            IngredientCategory::Spice => "Spice",
            IngredientCategory::Fruit => "Fruit",
            IngredientCategory::Oil => "Oil",
            IngredientCategory::Condiment => "Condiment",
        }
    }

    /// Default unit assigned when the generator quantifies an ingredient.
    pub fn default_unit(&self) -> &'static str {
        match self {
            IngredientCategory::Protein => "oz",
            IngredientCategory::Vegetable => "cup",
            IngredientCategory::Herb | IngredientCategory::Spice => "tsp",
            _ => "tbsp",
        }
    }
}

impl fmt::Display for IngredientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IngredientCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Protein" => Ok(IngredientCategory::Protein),
            "Vegetable" => Ok(IngredientCategory::Vegetable),
            "Grain" => Ok(IngredientCategory::Grain),
            "Dairy" => Ok(IngredientCategory::Dairy),
            "Herb" => Ok(IngredientCategory::Herb),
            "Spice" => Ok(IngredientCategory::Spice),
            "Fruit" => Ok(IngredientCategory::Fruit),
            "Oil" => Ok(IngredientCategory::Oil),
            "Condiment" => Ok(IngredientCategory::Condiment),
            other => Err(anyhow!("Unknown ingredient category: '{}'", other)),
        }
    }
}

/// One entry of the fixed ingredient catalog. Identity is `id`; users only
/// ever select from the catalog, they never create ingredients.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub category: IngredientCategory,
    pub calories_per_100g: Option<f32>,
}

/// "This much of this ingredient, in this unit", scoped to one recipe.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IngredientLine {
    pub ingredient: Ingredient,
    pub quantity: f32,
    pub unit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(anyhow!(
                "Unknown difficulty: '{}' (expected easy, medium or hard)",
                other
            )),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Chef {
    pub name: String,
    pub avatar: String,
}

/// A recipe, either from the seed catalog, created by a user, or produced by
/// the generator. `id` is unique across the combined recipe universe.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    /// Minutes.
    pub cooking_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub ingredients: Vec<IngredientLine>,
    pub instructions: Vec<String>,
    pub chef: Chef,
    pub likes: u32,
    pub tags: Vec<String>,
    /// RFC 3339 timestamp.
    pub created_at: String,
}

/// One consolidated, unit-specific requirement on the shopping list. Produced
/// only by the aggregator; within one aggregation run there is at most one
/// item per (ingredient id, unit) pair.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GroceryItem {
    pub ingredient: Ingredient,
    pub quantity: f32,
    pub unit: String,
    /// Titles of the contributing recipes, each listed at most once.
    pub recipes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealTime {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealTime {
    /// Position within a day, used to sort a date's plan.
    pub fn day_order(&self) -> u8 {
        match self {
            MealTime::Breakfast => 0,
            MealTime::Lunch => 1,
            MealTime::Dinner => 2,
            MealTime::Snack => 3,
        }
    }
}

impl fmt::Display for MealTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MealTime::Breakfast => "Breakfast",
            MealTime::Lunch => "Lunch",
            MealTime::Dinner => "Dinner",
            MealTime::Snack => "Snack",
        };
        f.write_str(label)
    }
}

impl FromStr for MealTime {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(MealTime::Breakfast),
            "lunch" => Ok(MealTime::Lunch),
            "dinner" => Ok(MealTime::Dinner),
            "snack" => Ok(MealTime::Snack),
            other => Err(anyhow!(
                "Unknown meal time: '{}' (expected breakfast, lunch, dinner or snack)",
                other
            )),
        }
    }
}

/// A recipe assigned to a (date, meal time) slot. Multiple entries may share
/// the same slot.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MealPlan {
    pub id: String,
    /// ISO date, `yyyy-mm-dd`.
    pub date: String,
    pub meal_time: MealTime,
    pub recipe_id: String,
    /// Denormalized snapshot so the plan renders without a catalog lookup.
    pub recipe: Option<Recipe>,
}
