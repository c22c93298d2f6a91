use anyhow::{Result, Context};
use chrono::{NaiveDate, Utc};
use rand::thread_rng;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use recipe_pantry::catalog::{self, load_ingredients, load_seed_recipes};
use recipe_pantry::cli::{parse_args, Cli, Command, PlanCommand};
use recipe_pantry::grocery::total_calories;
use recipe_pantry::model::{Difficulty, Ingredient, MealPlan, MealTime, Recipe};
use recipe_pantry::storage::TextStore;
use recipe_pantry::store::{Pantry, RecipeFilter};

const INGREDIENTS_CSV_PATH: &str = "data/ingredients.csv";
const SEED_RECIPES_PATH: &str = "data/seed_recipes.json";
const DATA_DIR_ENV_VAR: &str = "PANTRY_DATA_DIR";
const MIN_GENERATION_INGREDIENTS: usize = 3;
// Simulated processing delay before revealing a generated recipe.
const GENERATION_PAUSE: Duration = Duration::from_millis(1500);

fn resolve_data_dir(cli: &Cli) -> PathBuf {
    cli.data_dir
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| std::env::var(DATA_DIR_ENV_VAR).ok().map(PathBuf::from))
        .unwrap_or_else(TextStore::default_dir)
}

fn main() -> Result<()> {
    dotenv::dotenv().ok(); // Pick up PANTRY_DATA_DIR from a .env file

    let cli = parse_args();

    let ingredient_catalog = load_ingredients(Path::new(INGREDIENTS_CSV_PATH)).with_context(|| {
        format!(
            "Failed to load ingredient catalog from '{}'",
            INGREDIENTS_CSV_PATH
        )
    })?;
    let seed_recipes = load_seed_recipes(Path::new(SEED_RECIPES_PATH))
        .with_context(|| format!("Failed to load seed recipes from '{}'", SEED_RECIPES_PATH))?;

    let data_dir = resolve_data_dir(&cli);
    let mut pantry = Pantry::open(seed_recipes, TextStore::new(data_dir));

    match cli.command {
        Command::Ingredients => list_ingredients(&ingredient_catalog),
        Command::Recipes {
            search,
            tag,
            difficulty,
            max_time,
            liked,
        } => {
            let difficulty = difficulty
                .map(|value| value.parse::<Difficulty>())
                .transpose()?;
            let filter = RecipeFilter {
                search,
                tags: tag,
                difficulty,
                max_cooking_time: max_time,
                liked_only: liked,
            };
            list_recipes(&pantry, &filter);
        }
        Command::Show { recipe_id } => {
            let recipe = pantry
                .find_recipe(&recipe_id)
                .ok_or_else(|| anyhow::anyhow!("No recipe with id '{}'", recipe_id))?;
            print_recipe(recipe);
        }
        Command::Generate { ingredients } => {
            generate(&mut pantry, &ingredient_catalog, &ingredients)?;
        }
        Command::Like { recipe_id } => {
            let title = pantry
                .find_recipe(&recipe_id)
                .map(|recipe| recipe.title.clone())
                .ok_or_else(|| anyhow::anyhow!("No recipe with id '{}'", recipe_id))?;
            if pantry.toggle_like(&recipe_id)? {
                println!("Liked '{}'.", title);
            } else {
                println!("Removed like from '{}'.", title);
            }
        }
        Command::Select { recipe_id } => {
            let recipe = pantry
                .find_recipe(&recipe_id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("No recipe with id '{}'", recipe_id))?;
            let title = recipe.title.clone();
            pantry.select_recipe(recipe)?;
            println!("'{}' is in the grocery selection.", title);
        }
        Command::Deselect { recipe_id } => {
            if pantry.deselect_recipe(&recipe_id)? {
                println!("Removed '{}' from the grocery selection.", recipe_id);
            } else {
                println!("'{}' was not in the grocery selection.", recipe_id);
            }
        }
        Command::Selection { clear } => {
            if clear {
                pantry.clear_selected()?;
                println!("Grocery selection cleared.");
            } else if pantry.selected_recipes().is_empty() {
                println!("The grocery selection is empty. Add recipes with 'select <recipe-id>'.");
            } else {
                println!("Selected recipes:");
                for recipe in pantry.selected_recipes() {
                    println!("  [{}] {}", recipe.id, recipe.title);
                }
            }
        }
        Command::Plan(plan_command) => run_plan_command(&mut pantry, plan_command)?,
        Command::Grocery => print_grocery_list(&pantry),
    }

    Ok(())
}

fn list_ingredients(ingredient_catalog: &[Ingredient]) {
    for category in catalog::categories(ingredient_catalog) {
        println!("{}:", category);
        for ingredient in ingredient_catalog
            .iter()
            .filter(|ing| ing.category == category)
        {
            match ingredient.calories_per_100g {
                Some(calories) => println!(
                    "  [{}] {} ({} kcal/100g)",
                    ingredient.id, ingredient.name, calories
                ),
                None => println!("  [{}] {}", ingredient.id, ingredient.name),
            }
        }
        println!();
    }
}

fn list_recipes(pantry: &Pantry, filter: &RecipeFilter) {
    let recipes = pantry.filter_recipes(filter);
    if recipes.is_empty() {
        println!("No recipes match the given filters.");
        return;
    }
    for recipe in recipes {
        let liked = if pantry.is_liked(&recipe.id) { "♥ " } else { "" };
        println!(
            "[{}] {}{} — {} min, {}, {} likes ({})",
            recipe.id,
            liked,
            recipe.title,
            recipe.cooking_time,
            recipe.difficulty,
            recipe.likes,
            recipe.tags.join(", ")
        );
    }
}

fn generate(
    pantry: &mut Pantry,
    ingredient_catalog: &[Ingredient],
    queries: &[String],
) -> Result<()> {
    let mut selection: Vec<Ingredient> = Vec::new();
    for query in queries {
        let ingredient = catalog::find_ingredient(ingredient_catalog, query).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown ingredient '{}'. Run the 'ingredients' command to list the catalog.",
                query
            )
        })?;
        if !selection.iter().any(|ing| ing.id == ingredient.id) {
            selection.push(ingredient.clone());
        }
    }

    if selection.len() < MIN_GENERATION_INGREDIENTS {
        return Err(anyhow::anyhow!(
            "Select at least {} ingredients to generate a recipe.",
            MIN_GENERATION_INGREDIENTS
        ));
    }

    let names: Vec<&str> = selection.iter().map(|ing| ing.name.as_str()).collect();
    println!("Generating a recipe from: {}...", names.join(", "));
    thread::sleep(GENERATION_PAUSE);

    let recipe = pantry.generate_new_recipe(&selection, &mut thread_rng())?;
    println!("Saved new recipe '{}'.\n", recipe.title);
    print_recipe(&recipe);
    Ok(())
}

fn run_plan_command(pantry: &mut Pantry, command: PlanCommand) -> Result<()> {
    match command {
        PlanCommand::Add {
            recipe_id,
            date,
            meal,
        } => {
            NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .with_context(|| format!("Invalid date '{}', expected yyyy-mm-dd", date))?;
            let meal_time: MealTime = meal.parse()?;
            let recipe = pantry
                .find_recipe(&recipe_id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("No recipe with id '{}'", recipe_id))?;

            let plan = MealPlan {
                id: format!("plan-{}", Utc::now().timestamp_millis()),
                date: date.clone(),
                meal_time,
                recipe_id: recipe.id.clone(),
                recipe: Some(recipe.clone()),
            };
            let plan_id = plan.id.clone();
            pantry.add_meal_plan(plan)?;
            println!(
                "Planned '{}' for {} ({}). Entry id: {}",
                recipe.title, date, meal_time, plan_id
            );
        }
        PlanCommand::Remove { plan_id } => {
            if pantry.remove_meal_plan(&plan_id)? {
                println!("Removed meal plan entry '{}'.", plan_id);
            } else {
                println!("No meal plan entry with id '{}'.", plan_id);
            }
        }
        PlanCommand::List { date } => match date {
            Some(date) => {
                let plans = pantry.plans_for_date(&date);
                if plans.is_empty() {
                    println!("Nothing planned for {}.", date);
                }
                for plan in plans {
                    print_plan_line(plan);
                }
            }
            None => {
                if pantry.meal_plans().is_empty() {
                    println!("The meal plan is empty. Add entries with 'plan add'.");
                }
                let mut plans: Vec<&MealPlan> = pantry.meal_plans().iter().collect();
                plans.sort_by(|a, b| {
                    a.date
                        .cmp(&b.date)
                        .then_with(|| a.meal_time.day_order().cmp(&b.meal_time.day_order()))
                });
                for plan in plans {
                    print_plan_line(plan);
                }
            }
        },
    }
    Ok(())
}

fn print_plan_line(plan: &MealPlan) {
    let title = plan
        .recipe
        .as_ref()
        .map(|recipe| recipe.title.as_str())
        .unwrap_or(plan.recipe_id.as_str());
    println!("{} {:9} {} [{}]", plan.date, plan.meal_time.to_string(), title, plan.id);
}

fn print_recipe(recipe: &Recipe) {
    println!("{} [{}]", recipe.title, recipe.id);
    println!("{}", recipe.description);
    println!(
        "{} min | serves {} | {} | by {}",
        recipe.cooking_time, recipe.servings, recipe.difficulty, recipe.chef.name
    );
    if !recipe.tags.is_empty() {
        println!("Tags: {}", recipe.tags.join(", "));
    }
    println!("\nIngredients:");
    for line in &recipe.ingredients {
        println!("  {} {} {}", line.quantity, line.unit, line.ingredient.name);
    }
    println!("\nInstructions:");
    for (index, step) in recipe.instructions.iter().enumerate() {
        println!("  {}. {}", index + 1, step);
    }
}

fn print_grocery_list(pantry: &Pantry) {
    let selected = pantry.selected_recipes();
    if selected.is_empty() {
        println!("The grocery selection is empty. Add recipes with 'select <recipe-id>'.");
        return;
    }

    println!("Grocery list for {} selected recipe(s):\n", selected.len());
    let items = pantry.grocery_list();
    let mut current_category = None;
    for item in &items {
        let category = item.ingredient.category;
        if current_category != Some(category) {
            println!("{}:", category);
            current_category = Some(category);
        }
        println!(
            "  {} {} {} (used in: {})",
            item.quantity,
            item.unit,
            item.ingredient.name,
            item.recipes.join(", ")
        );
    }

    println!(
        "\nEstimated total: {:.0} kcal",
        total_calories(&items)
    );
}
