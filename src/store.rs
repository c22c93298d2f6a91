use anyhow::{Context, Result};
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::generator::generate_recipe;
use crate::grocery::build_grocery_list;
use crate::model::{Difficulty, GroceryItem, Ingredient, MealPlan, Recipe};
use crate::storage::{
    TextStore, LIKED_RECIPES_KEY, MEAL_PLANS_KEY, SELECTED_RECIPES_KEY, USER_RECIPES_KEY,
};

/// Criteria for browsing the recipe collection. All fields are optional and
/// combine conjunctively.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    /// Case-insensitive match against title or description.
    pub search: Option<String>,
    /// Recipe must carry at least one of these tags.
    pub tags: Vec<String>,
    pub difficulty: Option<Difficulty>,
    /// Maximum cooking time in minutes.
    pub max_cooking_time: Option<u32>,
    pub liked_only: bool,
}

/// The application's state container: seed recipes hydrated from the catalog
/// plus every user-owned collection, with the backing text store.
///
/// Each command persists its slot right after the mutation, so the on-disk
/// state always reflects the last completed command. The generator and
/// aggregator stay pure; this is the only place where their results meet
/// persistence.
pub struct Pantry {
    seed_recipes: Vec<Recipe>,
    user_recipes: Vec<Recipe>,
    meal_plans: Vec<MealPlan>,
    liked: BTreeSet<String>,
    selected: Vec<Recipe>,
    storage: TextStore,
}

/// A slot that is absent or fails to parse hydrates as the empty collection.
fn hydrate_slot<T: DeserializeOwned + Default>(storage: &TextStore, key: &str) -> T {
    match storage.load(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
        _ => T::default(),
    }
}

impl Pantry {
    /// Opens the pantry over the given store, hydrating all four persisted
    /// slots.
    pub fn open(seed_recipes: Vec<Recipe>, storage: TextStore) -> Self {
        let user_recipes = hydrate_slot(&storage, USER_RECIPES_KEY);
        let meal_plans = hydrate_slot(&storage, MEAL_PLANS_KEY);
        let liked = hydrate_slot(&storage, LIKED_RECIPES_KEY);
        let selected = hydrate_slot(&storage, SELECTED_RECIPES_KEY);

        Pantry {
            seed_recipes,
            user_recipes,
            meal_plans,
            liked,
            selected,
            storage,
        }
    }

    fn persist<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize slot '{}'", key))?;
        self.storage.save(key, &raw)
    }

    pub fn add_recipe(&mut self, recipe: Recipe) -> Result<()> {
        self.user_recipes.push(recipe);
        self.persist(USER_RECIPES_KEY, &self.user_recipes)
    }

    /// Generates a recipe from the selection against the seed catalog, stores
    /// it in the user collection and returns it.
    pub fn generate_new_recipe<R: Rng + ?Sized>(
        &mut self,
        selection: &[Ingredient],
        rng: &mut R,
    ) -> Result<Recipe> {
        let recipe = generate_recipe(selection, &self.seed_recipes, rng);
        self.add_recipe(recipe.clone())?;
        Ok(recipe)
    }

    /// Toggles a like. Returns `true` when the recipe ends up liked. The
    /// matching recipe's like count follows the toggle; seed recipe counts
    /// are session-transient, only the id set is persisted.
    pub fn toggle_like(&mut self, recipe_id: &str) -> Result<bool> {
        let was_liked = self.liked.contains(recipe_id);
        if was_liked {
            self.liked.remove(recipe_id);
        } else {
            self.liked.insert(recipe_id.to_string());
        }

        for recipe in self
            .seed_recipes
            .iter_mut()
            .chain(self.user_recipes.iter_mut())
        {
            if recipe.id == recipe_id {
                recipe.likes = if was_liked {
                    recipe.likes.saturating_sub(1)
                } else {
                    recipe.likes + 1
                };
            }
        }

        self.persist(LIKED_RECIPES_KEY, &self.liked)?;
        self.persist(USER_RECIPES_KEY, &self.user_recipes)?;
        Ok(!was_liked)
    }

    pub fn add_meal_plan(&mut self, plan: MealPlan) -> Result<()> {
        self.meal_plans.push(plan);
        self.persist(MEAL_PLANS_KEY, &self.meal_plans)
    }

    /// Removes a meal plan entry. Returns `false` when no entry had that id.
    pub fn remove_meal_plan(&mut self, plan_id: &str) -> Result<bool> {
        let before = self.meal_plans.len();
        self.meal_plans.retain(|plan| plan.id != plan_id);
        let removed = self.meal_plans.len() < before;
        if removed {
            self.persist(MEAL_PLANS_KEY, &self.meal_plans)?;
        }
        Ok(removed)
    }

    /// Adds a recipe to the grocery selection; already-selected recipes are
    /// left alone.
    pub fn select_recipe(&mut self, recipe: Recipe) -> Result<()> {
        if self.is_selected(&recipe.id) {
            return Ok(());
        }
        self.selected.push(recipe);
        self.persist(SELECTED_RECIPES_KEY, &self.selected)
    }

    pub fn deselect_recipe(&mut self, recipe_id: &str) -> Result<bool> {
        let before = self.selected.len();
        self.selected.retain(|recipe| recipe.id != recipe_id);
        let removed = self.selected.len() < before;
        if removed {
            self.persist(SELECTED_RECIPES_KEY, &self.selected)?;
        }
        Ok(removed)
    }

    pub fn clear_selected(&mut self) -> Result<()> {
        self.selected.clear();
        self.persist(SELECTED_RECIPES_KEY, &self.selected)
    }

    pub fn is_selected(&self, recipe_id: &str) -> bool {
        self.selected.iter().any(|recipe| recipe.id == recipe_id)
    }

    /// Consolidated shopping list for the current selection.
    pub fn grocery_list(&self) -> Vec<GroceryItem> {
        build_grocery_list(&self.selected)
    }

    /// Seed catalog followed by user recipes.
    pub fn all_recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.seed_recipes.iter().chain(self.user_recipes.iter())
    }

    pub fn find_recipe(&self, recipe_id: &str) -> Option<&Recipe> {
        self.all_recipes().find(|recipe| recipe.id == recipe_id)
    }

    pub fn user_recipes(&self) -> &[Recipe] {
        &self.user_recipes
    }

    pub fn meal_plans(&self) -> &[MealPlan] {
        &self.meal_plans
    }

    pub fn selected_recipes(&self) -> &[Recipe] {
        &self.selected
    }

    pub fn liked_ids(&self) -> &BTreeSet<String> {
        &self.liked
    }

    pub fn is_liked(&self, recipe_id: &str) -> bool {
        self.liked.contains(recipe_id)
    }

    /// Browses seed + user recipes with the given criteria.
    pub fn filter_recipes(&self, filter: &RecipeFilter) -> Vec<&Recipe> {
        let search = filter.search.as_ref().map(|term| term.to_lowercase());
        self.all_recipes()
            .filter(|recipe| {
                if let Some(term) = &search {
                    let matches = recipe.title.to_lowercase().contains(term)
                        || recipe.description.to_lowercase().contains(term);
                    if !matches {
                        return false;
                    }
                }
                if !filter.tags.is_empty()
                    && !filter.tags.iter().any(|tag| recipe.tags.contains(tag))
                {
                    return false;
                }
                if let Some(difficulty) = filter.difficulty {
                    if recipe.difficulty != difficulty {
                        return false;
                    }
                }
                if let Some(max) = filter.max_cooking_time {
                    if recipe.cooking_time > max {
                        return false;
                    }
                }
                if filter.liked_only && !self.liked.contains(&recipe.id) {
                    return false;
                }
                true
            })
            .collect()
    }

    /// The given date's plan, ordered breakfast to snack.
    pub fn plans_for_date(&self, date: &str) -> Vec<&MealPlan> {
        let mut plans: Vec<&MealPlan> = self
            .meal_plans
            .iter()
            .filter(|plan| plan.date == date)
            .collect();
        plans.sort_by_key(|plan| plan.meal_time.day_order());
        plans
    }
}
