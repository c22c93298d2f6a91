use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::path::Path;

use crate::model::{Ingredient, IngredientCategory, Recipe};

// Expected column headers of the ingredient catalog.
const ID_COL: &str = "id";
const NAME_COL: &str = "name";
const CATEGORY_COL: &str = "category";
const CALORIES_COL: &str = "calories_per_100g";

fn parse_optional_f32(s: &str) -> Option<f32> {
    s.trim().parse::<f32>().ok()
}

/// Loads the fixed ingredient catalog from CSV. Rows with an empty name are
/// skipped; a missing or unparseable calorie cell becomes `None`; an unknown
/// category is an error, as is a catalog with no usable rows.
pub fn load_ingredients(csv_path: &Path) -> Result<Vec<Ingredient>> {
    if !csv_path.exists() {
        return Err(anyhow::anyhow!(
            "Ingredient catalog not found at: {:?}",
            csv_path
        ));
    }

    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open ingredient catalog at {:?}", csv_path))?;
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = rdr.headers()?.clone();
    let id_idx = headers
        .iter()
        .position(|h| h == ID_COL)
        .ok_or_else(|| anyhow::anyhow!("Column '{}' not found", ID_COL))?;
    let name_idx = headers
        .iter()
        .position(|h| h == NAME_COL)
        .ok_or_else(|| anyhow::anyhow!("Column '{}' not found", NAME_COL))?;
    let category_idx = headers
        .iter()
        .position(|h| h == CATEGORY_COL)
        .ok_or_else(|| anyhow::anyhow!("Column '{}' not found", CATEGORY_COL))?;
    let calories_idx = headers
        .iter()
        .position(|h| h == CALORIES_COL)
        .ok_or_else(|| anyhow::anyhow!("Column '{}' not found", CALORIES_COL))?;

    let mut catalog = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record =
            result.with_context(|| format!("Failed to read record at row index {}", row_index))?;

        let name = record
            .get(name_idx)
            .ok_or_else(|| anyhow::anyhow!("Missing name at row {}", row_index))?
            .trim()
            .to_string();
        if name.is_empty() {
            continue;
        }

        let id = record
            .get(id_idx)
            .ok_or_else(|| anyhow::anyhow!("Missing id at row {}", row_index))?
            .trim()
            .to_string();

        let category: IngredientCategory = record
            .get(category_idx)
            .ok_or_else(|| anyhow::anyhow!("Missing category at row {}", row_index))?
            .trim()
            .parse()
            .with_context(|| format!("Bad category for ingredient '{}' at row {}", name, row_index))?;

        catalog.push(Ingredient {
            id,
            name,
            category,
            calories_per_100g: record.get(calories_idx).and_then(parse_optional_f32),
        });
    }

    if catalog.is_empty() {
        return Err(anyhow::anyhow!(
            "No ingredients loaded from {:?}",
            csv_path
        ));
    }

    Ok(catalog)
}

/// Loads the seed recipe catalog from its JSON file.
pub fn load_seed_recipes(json_path: &Path) -> Result<Vec<Recipe>> {
    if !json_path.exists() {
        return Err(anyhow::anyhow!(
            "Seed recipe catalog not found at: {:?}",
            json_path
        ));
    }

    let contents = std::fs::read_to_string(json_path)
        .with_context(|| format!("Failed to read seed recipe catalog at {:?}", json_path))?;
    let recipes: Vec<Recipe> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse seed recipe catalog at {:?}", json_path))?;

    if recipes.is_empty() {
        return Err(anyhow::anyhow!(
            "No seed recipes loaded from {:?}",
            json_path
        ));
    }

    Ok(recipes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv_file() -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{},{},{},{}", ID_COL, NAME_COL, CATEGORY_COL, CALORIES_COL)?;
        writeln!(file, "1,Chicken Breast,Protein,165")?;
        writeln!(file, "12,Garlic,Vegetable,4")?;
        writeln!(file, "24,Basil,Herb,")?; // Missing calories
        writeln!(file, "99,,Vegetable,10")?; // Empty name
        writeln!(file, "35,Olive Oil,Oil,many")?; // Unparseable calories
        file.flush()?;
        Ok(file)
    }

    #[test]
    fn test_load_ingredients_success() -> Result<()> {
        let file = create_test_csv_file()?;
        let catalog = load_ingredients(file.path())?;

        assert_eq!(catalog.len(), 4); // Empty-name row skipped

        let chicken = catalog.iter().find(|ing| ing.name == "Chicken Breast").unwrap();
        assert_eq!(chicken.id, "1");
        assert_eq!(chicken.category, IngredientCategory::Protein);
        assert_eq!(chicken.calories_per_100g, Some(165.0));

        let basil = catalog.iter().find(|ing| ing.name == "Basil").unwrap();
        assert_eq!(basil.calories_per_100g, None); // Calories cell was empty

        let oil = catalog.iter().find(|ing| ing.name == "Olive Oil").unwrap();
        assert_eq!(oil.calories_per_100g, None); // Calories cell was "many"
        Ok(())
    }

    #[test]
    fn test_load_ingredients_missing_column() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        // No category column.
        writeln!(file, "{},{},{}", ID_COL, NAME_COL, CALORIES_COL)?;
        writeln!(file, "1,Chicken Breast,165")?;
        file.flush()?;

        let result = load_ingredients(file.path());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains(&format!("Column '{}' not found", CATEGORY_COL)));
        Ok(())
    }

    #[test]
    fn test_load_ingredients_rejects_unknown_category() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{},{},{},{}", ID_COL, NAME_COL, CATEGORY_COL, CALORIES_COL)?;
        writeln!(file, "1,Lentils,Legume,116")?;
        file.flush()?;

        let result = load_ingredients(file.path());
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn test_load_ingredients_empty_file_with_headers() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{},{},{},{}", ID_COL, NAME_COL, CATEGORY_COL, CALORIES_COL)?;
        file.flush()?;

        let result = load_ingredients(file.path());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("No ingredients loaded"));
        Ok(())
    }

    #[test]
    fn test_load_ingredients_file_not_found() {
        let path = Path::new("this_file_does_not_exist.csv");
        let result = load_ingredients(path);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Ingredient catalog not found"));
    }

    #[test]
    fn test_load_seed_recipes_rejects_malformed_json() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{{ not a recipe list")?;
        file.flush()?;

        let result = load_seed_recipes(file.path());
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn test_load_seed_recipes_rejects_empty_table() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "[]")?;
        file.flush()?;

        let result = load_seed_recipes(file.path());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("No seed recipes loaded"));
        Ok(())
    }
}
