use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Slot holding the user-created recipe collection.
pub const USER_RECIPES_KEY: &str = "user_recipes";
/// Slot holding the meal plan entries.
pub const MEAL_PLANS_KEY: &str = "meal_plans";
/// Slot holding the liked-recipe id set, stored as an ordered list.
pub const LIKED_RECIPES_KEY: &str = "liked_recipes";
/// Slot holding the grocery selection.
pub const SELECTED_RECIPES_KEY: &str = "selected_recipes";

/// A named-slot text store backed by a directory of `<key>.json` files.
///
/// The store only moves strings; callers serialize with `serde_json`.
#[derive(Debug, Clone)]
pub struct TextStore {
    root: PathBuf,
}

impl TextStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        TextStore { root: root.into() }
    }

    /// Platform data directory for the application:
    /// - Linux: ~/.local/share/recipe_pantry
    /// - macOS: ~/Library/Application Support/recipe_pantry
    /// - Windows: %APPDATA%\recipe_pantry
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("recipe_pantry")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    /// Returns the stored value for `key`, or `None` when the slot has never
    /// been written.
    pub fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read stored slot at {:?}", path))?;
        Ok(Some(contents))
    }

    /// Writes `value` to `key`, creating the store directory on first use.
    pub fn save(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create store directory {:?}", self.root))?;
        let path = self.slot_path(key);
        fs::write(&path, value).with_context(|| format!("Failed to write slot at {:?}", path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_then_load_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let store = TextStore::new(dir.path().join("state"));

        store.save(USER_RECIPES_KEY, "[\"a\"]")?;
        assert_eq!(
            store.load(USER_RECIPES_KEY)?,
            Some("[\"a\"]".to_string())
        );

        // Overwrite replaces the previous value.
        store.save(USER_RECIPES_KEY, "[]")?;
        assert_eq!(store.load(USER_RECIPES_KEY)?, Some("[]".to_string()));
        Ok(())
    }

    #[test]
    fn test_absent_slot_loads_as_none() -> Result<()> {
        let dir = tempdir()?;
        let store = TextStore::new(dir.path());
        assert_eq!(store.load(MEAL_PLANS_KEY)?, None);
        Ok(())
    }

    #[test]
    fn test_slots_are_independent_files() -> Result<()> {
        let dir = tempdir()?;
        let store = TextStore::new(dir.path());

        store.save(LIKED_RECIPES_KEY, "[\"1\",\"2\"]")?;
        store.save(SELECTED_RECIPES_KEY, "[]")?;

        assert!(dir.path().join("liked_recipes.json").exists());
        assert!(dir.path().join("selected_recipes.json").exists());
        assert_eq!(store.load(USER_RECIPES_KEY)?, None);
        Ok(())
    }
}
