use std::collections::HashMap;

use crate::model::{GroceryItem, IngredientLine, Recipe};

/// Consolidates the ingredient lines of the given recipes into one shopping
/// list. Quantities accumulate per (ingredient id, unit); the same ingredient
/// requested in two different units yields two distinct items, the second one
/// keyed by `"<id>-<unit>"`. A recipe title is recorded only on the entries
/// its lines actually contributed to.
///
/// Accumulation is commutative per key, so the result is independent of the
/// input recipe order up to the final sort: ascending by category name, with
/// ingredient name and unit as tie breakers.
pub fn build_grocery_list(recipes: &[Recipe]) -> Vec<GroceryItem> {
    let mut items: HashMap<String, GroceryItem> = HashMap::new();

    for recipe in recipes {
        for line in &recipe.ingredients {
            let key = match items.get(&line.ingredient.id) {
                // First sighting of this ingredient claims the plain id key.
                None => line.ingredient.id.clone(),
                Some(first) if first.unit == line.unit => line.ingredient.id.clone(),
                Some(_) => format!("{}-{}", line.ingredient.id, line.unit),
            };
            merge_line(&mut items, key, line, &recipe.title);
        }
    }

    let mut list: Vec<GroceryItem> = items.into_values().collect();
    list.sort_by(|a, b| {
        a.ingredient
            .category
            .as_str()
            .cmp(b.ingredient.category.as_str())
            .then_with(|| a.ingredient.name.cmp(&b.ingredient.name))
            .then_with(|| a.unit.cmp(&b.unit))
    });
    list
}

fn merge_line(
    items: &mut HashMap<String, GroceryItem>,
    key: String,
    line: &IngredientLine,
    recipe_title: &str,
) {
    match items.get_mut(&key) {
        Some(item) => {
            item.quantity += line.quantity;
            if !item.recipes.iter().any(|title| title == recipe_title) {
                item.recipes.push(recipe_title.to_string());
            }
        }
        None => {
            items.insert(
                key,
                GroceryItem {
                    ingredient: line.ingredient.clone(),
                    quantity: line.quantity,
                    unit: line.unit.clone(),
                    recipes: vec![recipe_title.to_string()],
                },
            );
        }
    }
}

/// Coarse calorie estimate for a grocery list: calories-per-100g scaled by
/// quantity and a fixed per-unit multiplier. The multipliers are constants,
/// not real unit-to-gram conversions. Ingredients without calorie data
/// contribute nothing.
pub fn total_calories(items: &[GroceryItem]) -> f32 {
    items
        .iter()
        .map(|item| {
            let per_100g = item.ingredient.calories_per_100g.unwrap_or(0.0);
            per_100g * item.quantity * unit_multiplier(&item.unit)
        })
        .sum()
}

fn unit_multiplier(unit: &str) -> f32 {
    match unit {
        "cup" => 2.0,
        "tbsp" => 0.25,
        "tsp" => 0.08,
        _ => 1.0,
    }
}
