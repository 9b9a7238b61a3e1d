//! Debug dumps of recipes.
//!
//! When a log folder is configured, each recipe run for a scenario is written
//! as pretty JSON to a path derived from the scenario id. Scenario ids are
//! `;`-separated paths such as `login-feature;valid-credentials;;2`.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::logging::Logger;
use crate::model::Recipe;

/// Separator between scenario id segments.
pub const SEGMENT_SEPARATOR: char = ';';

/// Extension of dumped recipe files.
pub const DUMP_EXTENSION: &str = "json";

/// Path a recipe for `scenario_id` is dumped to under `root`.
///
/// Returns `None` for a blank scenario id, and for one whose segments would
/// leave `root` (absolute paths, drive prefixes or `..`).
///
/// # Example
///
/// ```
/// use recipe_runner::runner::recipe_dump_path;
/// use std::path::Path;
///
/// let path = recipe_dump_path(Path::new("logs"), "groupA;case one; case two").unwrap();
/// assert_eq!(path, Path::new("logs/groupA/case one_case two.json"));
///
/// let path = recipe_dump_path(Path::new("logs"), "smoke").unwrap();
/// assert_eq!(path, Path::new("logs/smoke.json"));
/// ```
pub fn recipe_dump_path(root: &Path, scenario_id: &str) -> Option<PathBuf> {
    if scenario_id.trim().is_empty() {
        return None;
    }

    let mut segments: Vec<&str> = scenario_id.split(SEGMENT_SEPARATOR).collect();
    while segments.len() > 1 && segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }

    let (folder, base_name) = match segments.as_slice() {
        [single] => (root.to_path_buf(), single.to_string()),
        [first, rest @ ..] => {
            let joined = rest
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("_");
            let base_name = if joined.is_empty() {
                first.to_string()
            } else {
                joined
            };
            if !is_relative_name(first) {
                return None;
            }
            (root.join(first), base_name)
        }
        [] => return None,
    };

    let file_name = format!("{}.{}", base_name, DUMP_EXTENSION);
    if !is_relative_name(&file_name) {
        return None;
    }
    Some(folder.join(file_name))
}

/// Whether `name` joined onto a folder stays inside it.
fn is_relative_name(name: &str) -> bool {
    Path::new(name)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Write `recipe` for `scenario_id` under `root`.
///
/// Never fails: problems are logged at error level and the caller carries on.
/// Returns the written path on success.
pub fn dump_recipe(
    root: &Path,
    scenario_id: &str,
    recipe: &Recipe,
    logger: &dyn Logger,
) -> Option<PathBuf> {
    let Some(path) = recipe_dump_path(root, scenario_id) else {
        let reason = if scenario_id.trim().is_empty() {
            "blank scenario id".to_string()
        } else {
            format!("scenario id '{}' leaves the log folder", scenario_id)
        };
        logger.warn(&format!(
            "Not writing recipe to log folder [{}]: {}",
            root.display(),
            reason
        ));
        return None;
    };

    match write_recipe(&path, recipe) {
        Ok(()) => {
            logger.info(&format!("Writing recipe to {}", path.display()));
            Some(path)
        }
        Err(e) => {
            logger.error(&format!(
                "Failed to write recipe to log folder [{}]: {}",
                root.display(),
                e
            ));
            None
        }
    }
}

fn write_recipe(path: &Path, recipe: &Recipe) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = recipe.to_pretty_json()?;
    fs::write(path, json)?;
    Ok(())
}
