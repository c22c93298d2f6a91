use chrono::Utc;
use rand::Rng;

use crate::model::{Chef, Difficulty, Ingredient, IngredientCategory, IngredientLine, Recipe};

const TITLE_ADJECTIVES: [&str; 6] = [
    "Fusion",
    "Creative",
    "Innovative",
    "Leftover",
    "Improvised",
    "Spontaneous",
];

const DISH_TYPES: [&str; 6] = ["Bowl", "Stir-fry", "Salad", "Casserole", "Skillet", "Medley"];

const COOKING_VERBS: [&str; 4] = ["Sauté", "Grill", "Roast", "Simmer"];

const FALLBACK_CHEFS: [(&str, &str); 3] = [
    (
        "Chef Alex",
        "https://images.unsplash.com/photo-1583394838336-acd977736f90?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=684&q=80",
    ),
    (
        "Chef Jordan",
        "https://images.unsplash.com/photo-1566554273541-37a9ca77b91f?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=687&q=80",
    ),
    (
        "Chef Morgan",
        "https://images.unsplash.com/photo-1581299894007-aaa50297cf16?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=687&q=80",
    ),
];

const FOOD_IMAGES: [&str; 4] = [
    "https://images.unsplash.com/photo-1546069901-ba9599a7e63c?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=1160&q=80",
    "https://images.unsplash.com/photo-1565299624946-b28f40a0ae38?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=1162&q=80",
    "https://images.unsplash.com/photo-1540189549336-e6e99c3679fe?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=687&q=80",
    "https://images.unsplash.com/photo-1567620905732-2d1ec7ab7445?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=780&q=80",
];

/// Generates a new recipe from the selected ingredients.
///
/// Seed recipes sharing at least one ingredient name with the selection
/// (case-insensitive) are "compatible"; when any exist, one is picked at
/// random and adapted, otherwise a recipe is synthesized from scratch. The
/// RNG is injected so callers can seed it for reproducible output.
///
/// Never fails: an empty selection still yields a structurally valid, if
/// bland, recipe. Minimum-selection policy belongs to the calling layer.
pub fn generate_recipe<R: Rng + ?Sized>(
    selected: &[Ingredient],
    seed_recipes: &[Recipe],
    rng: &mut R,
) -> Recipe {
    let selected_names: Vec<String> = selected.iter().map(|ing| ing.name.to_lowercase()).collect();

    let compatible: Vec<&Recipe> = seed_recipes
        .iter()
        .filter(|recipe| {
            recipe
                .ingredients
                .iter()
                .any(|line| selected_names.contains(&line.ingredient.name.to_lowercase()))
        })
        .collect();

    if compatible.is_empty() {
        synthesize_recipe(selected, rng)
    } else {
        let template = compatible[rng.gen_range(0..compatible.len())];
        adapt_template(template, selected, rng)
    }
}

/// Rework a compatible seed recipe around the selection: the template keeps
/// its timing, servings, difficulty, chef, image and tags, while the
/// ingredient list, title, description and instructions are rebuilt.
fn adapt_template<R: Rng + ?Sized>(
    template: &Recipe,
    selected: &[Ingredient],
    rng: &mut R,
) -> Recipe {
    let adjective = TITLE_ADJECTIVES[rng.gen_range(0..TITLE_ADJECTIVES.len())];
    let main_names: Vec<&str> = selected.iter().take(2).map(|ing| ing.name.as_str()).collect();
    let template_noun = template.title.split_whitespace().last().unwrap_or_default();
    let title = format!("{} {} {}", adjective, main_names.join(" & "), template_noun);

    Recipe {
        id: fresh_recipe_id(rng),
        title,
        description: selection_description(selected),
        image_url: template.image_url.clone(),
        cooking_time: template.cooking_time,
        servings: template.servings,
        difficulty: template.difficulty,
        ingredients: quantified_lines(selected, rng),
        instructions: build_instructions(selected, rng),
        chef: template.chef.clone(),
        likes: 0,
        tags: template.tags.clone(),
        created_at: Utc::now().to_rfc3339(),
    }
}

/// Build a recipe with no template to lean on.
fn synthesize_recipe<R: Rng + ?Sized>(selected: &[Ingredient], rng: &mut R) -> Recipe {
    let dish_type = DISH_TYPES[rng.gen_range(0..DISH_TYPES.len())];
    let main_names: Vec<&str> = selected.iter().take(2).map(|ing| ing.name.as_str()).collect();
    let title = if main_names.is_empty() {
        dish_type.to_string()
    } else {
        format!("{} {}", main_names.join(" & "), dish_type)
    };

    let has_protein = has_category(selected, IngredientCategory::Protein);
    let has_grain = has_category(selected, IngredientCategory::Grain);

    let mut cooking_time = 15;
    if has_protein {
        cooking_time += 10;
    }
    if has_grain {
        cooking_time += 15;
    }

    let difficulty = match selected.len() {
        0..=4 => Difficulty::Easy,
        5..=7 => Difficulty::Medium,
        _ => Difficulty::Hard,
    };

    let mut tags: Vec<String> = Vec::new();
    if has_category(selected, IngredientCategory::Vegetable) && !has_protein {
        tags.push("Vegetarian".to_string());
    }
    if let Some(grain) = selected
        .iter()
        .find(|ing| ing.category == IngredientCategory::Grain)
    {
        tags.push(grain.name.clone());
    }
    tags.push("Creative".to_string());
    tags.push("Leftover Recipe".to_string());

    let (chef_name, chef_avatar) = FALLBACK_CHEFS[rng.gen_range(0..FALLBACK_CHEFS.len())];

    Recipe {
        id: fresh_recipe_id(rng),
        title,
        description: selection_description(selected),
        image_url: FOOD_IMAGES[rng.gen_range(0..FOOD_IMAGES.len())].to_string(),
        cooking_time,
        servings: rng.gen_range(2..=4),
        difficulty,
        ingredients: quantified_lines(selected, rng),
        instructions: build_instructions(selected, rng),
        chef: Chef {
            name: chef_name.to_string(),
            avatar: chef_avatar.to_string(),
        },
        likes: 0,
        tags,
        created_at: Utc::now().to_rfc3339(),
    }
}

/// Timestamp plus a random suffix keeps ids practically unique for a
/// single-session client without a central allocator.
fn fresh_recipe_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "generated-{}-{:08x}",
        Utc::now().timestamp_millis(),
        rng.gen::<u32>()
    )
}

fn selection_description(selected: &[Ingredient]) -> String {
    let names: Vec<&str> = selected.iter().map(|ing| ing.name.as_str()).collect();
    format!(
        "A creative dish made with your selected ingredients: {}",
        names.join(", ")
    )
}

/// One line per selected ingredient: quantity 1-3, unit from the category
/// default table.
fn quantified_lines<R: Rng + ?Sized>(selected: &[Ingredient], rng: &mut R) -> Vec<IngredientLine> {
    selected
        .iter()
        .map(|ingredient| IngredientLine {
            ingredient: ingredient.clone(),
            quantity: rng.gen_range(1..=3) as f32,
            unit: ingredient.category.default_unit().to_string(),
        })
        .collect()
}

fn has_category(selected: &[Ingredient], category: IngredientCategory) -> bool {
    selected.iter().any(|ing| ing.category == category)
}

fn names_in_category(selected: &[Ingredient], category: IngredientCategory) -> Vec<&str> {
    selected
        .iter()
        .filter(|ing| ing.category == category)
        .map(|ing| ing.name.as_str())
        .collect()
}

/// Steps are emitted in a fixed order (prep, grains, protein, vegetables,
/// seasoning, finish); steps for absent categories are omitted entirely.
fn build_instructions<R: Rng + ?Sized>(selected: &[Ingredient], rng: &mut R) -> Vec<String> {
    let proteins = names_in_category(selected, IngredientCategory::Protein);
    let vegetables = names_in_category(selected, IngredientCategory::Vegetable);
    let grains = names_in_category(selected, IngredientCategory::Grain);
    let seasonings: Vec<&str> = selected
        .iter()
        .filter(|ing| {
            matches!(
                ing.category,
                IngredientCategory::Herb | IngredientCategory::Spice
            )
        })
        .map(|ing| ing.name.as_str())
        .collect();

    let mut steps = Vec::new();

    if !proteins.is_empty() {
        steps.push(format!(
            "Prepare {} by cutting into bite-sized pieces.",
            proteins.join(" and ")
        ));
    }
    if !vegetables.is_empty() {
        steps.push(format!("Wash and chop {}.", vegetables.join(", ")));
    }
    if !grains.is_empty() {
        steps.push(format!(
            "Cook {} according to package instructions.",
            grains.join(" and ")
        ));
    }
    if !proteins.is_empty() {
        let verb = COOKING_VERBS[rng.gen_range(0..COOKING_VERBS.len())];
        steps.push(format!(
            "{} the {} until fully cooked.",
            verb,
            proteins.join(" and ")
        ));
    }
    if !vegetables.is_empty() {
        steps.push("Add vegetables and cook for 5-7 minutes until tender.".to_string());
    }
    if !seasonings.is_empty() {
        steps.push(format!("Season with {} to taste.", seasonings.join(", ")));
    }

    steps.push("Combine all ingredients in a large bowl and mix well.".to_string());
    steps.push("Serve hot and enjoy your creative dish!".to_string());

    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Chef;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ingredient(id: &str, name: &str, category: IngredientCategory) -> Ingredient {
        Ingredient {
            id: id.to_string(),
            name: name.to_string(),
            category,
            calories_per_100g: Some(100.0),
        }
    }

    fn seed_recipe(id: &str, title: &str, ingredients: &[Ingredient]) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: title.to_string(),
            description: "A seed recipe".to_string(),
            image_url: "https://example.com/seed.jpg".to_string(),
            cooking_time: 25,
            servings: 2,
            difficulty: Difficulty::Medium,
            ingredients: ingredients
                .iter()
                .map(|ing| IngredientLine {
                    ingredient: ing.clone(),
                    quantity: 1.0,
                    unit: "cup".to_string(),
                })
                .collect(),
            instructions: vec!["Cook everything.".to_string()],
            chef: Chef {
                name: "Seed Chef".to_string(),
                avatar: "https://example.com/chef.jpg".to_string(),
            },
            likes: 12,
            tags: vec!["Dinner".to_string()],
            created_at: "2023-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_adapts_compatible_seed_recipe() {
        let mut rng = StdRng::seed_from_u64(7);
        let chicken = ingredient("1", "Chicken Breast", IngredientCategory::Protein);
        let garlic = ingredient("12", "Garlic", IngredientCategory::Vegetable);
        let seeds = vec![seed_recipe(
            "s1",
            "Thai Basil Chicken",
            &[chicken.clone(), ingredient("24", "Basil", IngredientCategory::Herb)],
        )];

        let recipe = generate_recipe(&[chicken, garlic], &seeds, &mut rng);

        // Template metadata survives, the rest is rebuilt.
        assert_eq!(recipe.cooking_time, 25);
        assert_eq!(recipe.servings, 2);
        assert_eq!(recipe.difficulty, Difficulty::Medium);
        assert_eq!(recipe.chef.name, "Seed Chef");
        assert_eq!(recipe.tags, vec!["Dinner".to_string()]);
        assert_eq!(recipe.likes, 0);

        // "<Adjective> Chicken Breast & Garlic <last word of template title>"
        assert!(recipe.title.ends_with("Chicken"));
        assert!(recipe.title.contains("Chicken Breast & Garlic"));
        let adjective = recipe.title.split_whitespace().next().unwrap();
        assert!(TITLE_ADJECTIVES.contains(&adjective));
    }

    #[test]
    fn test_ingredient_name_match_is_case_insensitive() {
        let mut rng = StdRng::seed_from_u64(1);
        let shouty = ingredient("1", "CHICKEN BREAST", IngredientCategory::Protein);
        let seeds = vec![seed_recipe(
            "s1",
            "Thai Basil Chicken",
            &[ingredient("1", "Chicken Breast", IngredientCategory::Protein)],
        )];

        let recipe = generate_recipe(&[shouty], &seeds, &mut rng);
        // Adapted, not synthesized: template cooking time carried over.
        assert_eq!(recipe.cooking_time, 25);
    }

    #[test]
    fn test_synthesizes_when_no_seed_is_compatible() {
        let mut rng = StdRng::seed_from_u64(3);
        let selection = vec![
            ingredient("1", "Chicken Breast", IngredientCategory::Protein),
            ingredient("16", "Rice", IngredientCategory::Grain),
            ingredient("12", "Garlic", IngredientCategory::Vegetable),
        ];

        let recipe = generate_recipe(&selection, &[], &mut rng);

        // 15 base + 10 protein + 15 grain.
        assert_eq!(recipe.cooking_time, 40);
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert!((2..=4).contains(&recipe.servings));
        let dish_type = recipe.title.split_whitespace().last().unwrap();
        assert!(DISH_TYPES.contains(&dish_type));
        assert!(recipe.title.starts_with("Chicken Breast & Rice"));
        assert!(FOOD_IMAGES.contains(&recipe.image_url.as_str()));
        assert!(FALLBACK_CHEFS
            .iter()
            .any(|(name, _)| *name == recipe.chef.name));
        // Grain name tag plus the two fixed tags; protein present, so no Vegetarian.
        assert_eq!(
            recipe.tags,
            vec![
                "Rice".to_string(),
                "Creative".to_string(),
                "Leftover Recipe".to_string()
            ]
        );
    }

    #[test]
    fn test_one_line_per_selected_ingredient_with_category_units() {
        let mut rng = StdRng::seed_from_u64(11);
        let selection = vec![
            ingredient("1", "Chicken Breast", IngredientCategory::Protein),
            ingredient("12", "Garlic", IngredientCategory::Vegetable),
            ingredient("24", "Basil", IngredientCategory::Herb),
            ingredient("28", "Cumin", IngredientCategory::Spice),
            ingredient("35", "Olive Oil", IngredientCategory::Oil),
        ];

        let recipe = generate_recipe(&selection, &[], &mut rng);

        assert_eq!(recipe.ingredients.len(), selection.len());
        for (line, selected) in recipe.ingredients.iter().zip(&selection) {
            assert_eq!(line.ingredient.id, selected.id);
            assert!((1.0..=3.0).contains(&line.quantity));
            assert_eq!(line.quantity.fract(), 0.0);
            assert_eq!(line.unit, selected.category.default_unit());
        }
    }

    #[test]
    fn test_vegetarian_tag_requires_vegetables_without_protein() {
        let mut rng = StdRng::seed_from_u64(5);
        let veggie_only = vec![
            ingredient("12", "Garlic", IngredientCategory::Vegetable),
            ingredient("7", "Spinach", IngredientCategory::Vegetable),
        ];
        let recipe = generate_recipe(&veggie_only, &[], &mut rng);
        assert!(recipe.tags.contains(&"Vegetarian".to_string()));

        let with_protein = vec![
            ingredient("12", "Garlic", IngredientCategory::Vegetable),
            ingredient("1", "Chicken Breast", IngredientCategory::Protein),
        ];
        let recipe = generate_recipe(&with_protein, &[], &mut rng);
        assert!(!recipe.tags.contains(&"Vegetarian".to_string()));
    }

    #[test]
    fn test_instruction_steps_follow_category_presence() {
        let mut rng = StdRng::seed_from_u64(9);
        let selection = vec![
            ingredient("1", "Chicken Breast", IngredientCategory::Protein),
            ingredient("7", "Spinach", IngredientCategory::Vegetable),
            ingredient("16", "Rice", IngredientCategory::Grain),
            ingredient("24", "Basil", IngredientCategory::Herb),
        ];

        let steps = build_instructions(&selection, &mut rng);

        assert_eq!(steps.len(), 8);
        assert_eq!(steps[0], "Prepare Chicken Breast by cutting into bite-sized pieces.");
        assert_eq!(steps[1], "Wash and chop Spinach.");
        assert_eq!(steps[2], "Cook Rice according to package instructions.");
        assert!(steps[3].ends_with("the Chicken Breast until fully cooked."));
        assert!(COOKING_VERBS
            .iter()
            .any(|verb| steps[3].starts_with(verb)));
        assert_eq!(steps[4], "Add vegetables and cook for 5-7 minutes until tender.");
        assert_eq!(steps[5], "Season with Basil to taste.");
        assert_eq!(steps[6], "Combine all ingredients in a large bowl and mix well.");
        assert_eq!(steps[7], "Serve hot and enjoy your creative dish!");
    }

    #[test]
    fn test_absent_categories_emit_no_steps() {
        let mut rng = StdRng::seed_from_u64(2);
        let selection = vec![ingredient("35", "Olive Oil", IngredientCategory::Oil)];
        let steps = build_instructions(&selection, &mut rng);
        // Only the two fixed closing lines remain.
        assert_eq!(steps.len(), 2);
    }

    #[test]
    fn test_empty_selection_still_yields_a_valid_recipe() {
        let mut rng = StdRng::seed_from_u64(4);
        let recipe = generate_recipe(&[], &[], &mut rng);

        assert!(DISH_TYPES.contains(&recipe.title.as_str()));
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.cooking_time, 15);
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert_eq!(recipe.instructions.len(), 2);
        assert!(!recipe.id.is_empty());
    }

    #[test]
    fn test_generated_ids_are_unique_across_calls() {
        let mut rng = StdRng::seed_from_u64(6);
        let selection = vec![ingredient("12", "Garlic", IngredientCategory::Vegetable)];

        let mut ids = std::collections::HashSet::new();
        for _ in 0..50 {
            let recipe = generate_recipe(&selection, &[], &mut rng);
            assert!(recipe.id.starts_with("generated-"));
            assert!(ids.insert(recipe.id));
        }
    }
}
