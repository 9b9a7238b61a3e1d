//! Recipe running.
//!
//! - [`RecipeRunner`] turns test cases into recipes and dispatches them
//! - [`recipe_dump`] writes recipes to debug files named after scenarios

pub mod recipe_dump;
pub mod recipe_runner;

pub use recipe_dump::{dump_recipe, recipe_dump_path, DUMP_EXTENSION, SEGMENT_SEPARATOR};
pub use recipe_runner::RecipeRunner;
