use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Pantry-driven recipe manager and meal planner", long_about = None)]
pub struct Cli {
    /// Directory for persisted state (falls back to PANTRY_DATA_DIR, then the
    /// platform data directory)
    #[arg(long)]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the ingredient catalog, grouped by category
    Ingredients,
    /// List recipes, optionally filtered
    Recipes {
        /// Match against title or description
        #[arg(short, long)]
        search: Option<String>,
        /// Keep recipes carrying at least one of these tags (repeatable)
        #[arg(short, long)]
        tag: Vec<String>,
        /// easy, medium or hard
        #[arg(short, long)]
        difficulty: Option<String>,
        /// Only recipes cookable within this many minutes
        #[arg(long)]
        max_time: Option<u32>,
        /// Only liked recipes
        #[arg(long)]
        liked: bool,
    },
    /// Show one recipe in full
    Show { recipe_id: String },
    /// Generate a new recipe from at least three catalog ingredients
    /// (referenced by name or id)
    Generate { ingredients: Vec<String> },
    /// Toggle a like on a recipe
    Like { recipe_id: String },
    /// Add a recipe to the grocery selection
    Select { recipe_id: String },
    /// Remove a recipe from the grocery selection
    Deselect { recipe_id: String },
    /// Show the grocery selection
    Selection {
        /// Clear the selection instead of listing it
        #[arg(long)]
        clear: bool,
    },
    /// Manage the meal plan calendar
    #[command(subcommand)]
    Plan(PlanCommand),
    /// Build the consolidated grocery list from the selection
    Grocery,
}

#[derive(Subcommand, Debug)]
pub enum PlanCommand {
    /// Assign a recipe to a date and meal time
    Add {
        recipe_id: String,
        /// yyyy-mm-dd
        #[arg(long)]
        date: String,
        /// breakfast, lunch, dinner or snack
        #[arg(long)]
        meal: String,
    },
    /// Remove a meal plan entry
    Remove { plan_id: String },
    /// List planned meals, optionally for a single date
    List {
        /// yyyy-mm-dd
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
