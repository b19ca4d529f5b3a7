pub mod builder;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extractors;
pub mod model;
pub mod normalizer;
pub mod segmenter;

pub use builder::{ImportResult, OutputMode, RecipeImporter, RecipeImporterBuilder};
pub use config::{ExtractionConfig, ImportConfig, NormalizeConfig};
pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink};
pub use error::ImportError;
pub use extractors::extract_nutrition;
pub use model::{IngredientEntry, MealType, Nutrition, Recipe, RecipeDraft, Section};
pub use normalizer::{validate, validate_and_repair, RecipeNormalizer, ValidationReport};
pub use segmenter::Segmenter;

/// Detect every recipe in a chat message using default settings.
///
/// Returns an empty list when nothing in the text looks like a recipe.
pub fn detect_recipes(text: &str) -> Vec<RecipeDraft> {
    detect_recipes_with(text, &ExtractionConfig::default(), &mut LogSink)
}

pub fn detect_recipes_with(
    text: &str,
    config: &ExtractionConfig,
    sink: &mut dyn DiagnosticSink,
) -> Vec<RecipeDraft> {
    Segmenter::new(config, sink).segment(text)
}

/// Normalize a detected draft into a recipe ready to be stored.
///
/// An empty `title` keeps the detected title.
pub fn build_recipe(draft: &RecipeDraft, meal_type: MealType, title: &str) -> Recipe {
    build_recipe_with(
        draft,
        meal_type,
        title,
        None,
        &NormalizeConfig::default(),
        &mut LogSink,
    )
}

/// Like [`build_recipe`], with an optional description override, explicit
/// settings and a diagnostic sink.
///
/// Validation runs on the result; empty ingredient and instruction lists are
/// repaired, anything else is reported to the sink and left as is.
pub fn build_recipe_with(
    draft: &RecipeDraft,
    meal_type: MealType,
    title: &str,
    description: Option<&str>,
    config: &NormalizeConfig,
    sink: &mut dyn DiagnosticSink,
) -> Recipe {
    let mut recipe = RecipeNormalizer::new(config, sink).normalize(draft, title);
    recipe.meal_type = meal_type;
    if let Some(description) = description {
        recipe.description = description.to_string();
    }

    validate_and_repair(&mut recipe, sink);
    recipe
}
