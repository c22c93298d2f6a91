pub mod data_loader;

pub use data_loader::{load_ingredients, load_seed_recipes};

use crate::model::{Ingredient, IngredientCategory};

/// Resolves a catalog ingredient by id, or failing that by case-insensitive
/// name. Users only ever pick from the fixed catalog.
pub fn find_ingredient<'a>(catalog: &'a [Ingredient], query: &str) -> Option<&'a Ingredient> {
    catalog.iter().find(|ing| ing.id == query).or_else(|| {
        let lowered = query.to_lowercase();
        catalog.iter().find(|ing| ing.name.to_lowercase() == lowered)
    })
}

/// Distinct categories in catalog order, for grouped listings.
pub fn categories(catalog: &[Ingredient]) -> Vec<IngredientCategory> {
    let mut seen = Vec::new();
    for ingredient in catalog {
        if !seen.contains(&ingredient.category) {
            seen.push(ingredient.category);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Ingredient> {
        vec![
            Ingredient {
                id: "1".to_string(),
                name: "Chicken Breast".to_string(),
                category: IngredientCategory::Protein,
                calories_per_100g: Some(165.0),
            },
            Ingredient {
                id: "12".to_string(),
                name: "Garlic".to_string(),
                category: IngredientCategory::Vegetable,
                calories_per_100g: Some(4.0),
            },
            Ingredient {
                id: "13".to_string(),
                name: "Tomatoes".to_string(),
                category: IngredientCategory::Vegetable,
                calories_per_100g: Some(18.0),
            },
        ]
    }

    #[test]
    fn test_find_ingredient_by_id_then_name() {
        let catalog = catalog();
        assert_eq!(find_ingredient(&catalog, "12").unwrap().name, "Garlic");
        assert_eq!(find_ingredient(&catalog, "garlic").unwrap().id, "12");
        assert_eq!(
            find_ingredient(&catalog, "Chicken Breast").unwrap().id,
            "1"
        );
        assert!(find_ingredient(&catalog, "Dragonfruit").is_none());
    }

    #[test]
    fn test_categories_keep_catalog_order_without_duplicates() {
        let catalog = catalog();
        assert_eq!(
            categories(&catalog),
            vec![IngredientCategory::Protein, IngredientCategory::Vegetable]
        );
    }
}
