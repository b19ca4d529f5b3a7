use crate::{
    build_recipe_with, detect_recipes_with, DiagnosticSink, ImportConfig, ImportError, LogSink,
    MealType, Recipe, RecipeDraft,
};

/// Represents the desired output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Normalize one detected draft into a recipe (default)
    #[default]
    Recipe,
    /// Return every detected draft without normalization
    Drafts,
}

/// Result of a recipe import operation
#[derive(Debug, Clone)]
pub enum ImportResult {
    /// Normalized, validated recipe
    Recipe(Recipe),
    /// Drafts in the order they appear in the message
    Drafts(Vec<RecipeDraft>),
}

impl ImportResult {
    /// Pretty-printed JSON of the recipe or the draft list
    pub fn to_json_pretty(&self) -> Result<String, ImportError> {
        let json = match self {
            ImportResult::Recipe(recipe) => serde_json::to_string_pretty(recipe)?,
            ImportResult::Drafts(drafts) => serde_json::to_string_pretty(drafts)?,
        };
        Ok(json)
    }
}

/// Builder for configuring and executing recipe imports
#[derive(Debug, Default)]
pub struct RecipeImporterBuilder {
    text: Option<String>,
    mode: OutputMode,
    meal_type: Option<MealType>,
    title: Option<String>,
    description: Option<String>,
    index: usize,
    config: Option<ImportConfig>,
}

impl RecipeImporterBuilder {
    /// Set the chat message to import from
    ///
    /// # Example
    /// ```
    /// use chat_recipe_import::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .text("# Chicken Soup\nIngredients:\n- 2 cups broth");
    /// ```
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Return the detected drafts instead of a normalized recipe
    pub fn extract_only(mut self) -> Self {
        self.mode = OutputMode::Drafts;
        self
    }

    /// Set the meal slot of the recipe. Required unless extracting only.
    pub fn meal_type(mut self, meal_type: MealType) -> Self {
        self.meal_type = Some(meal_type);
        self
    }

    /// Override the detected title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Override the description taken from the recipe text
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Choose which detected recipe to normalize (zero-based, default 0)
    pub fn select(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Use explicit settings instead of the defaults
    ///
    /// # Example
    /// ```
    /// use chat_recipe_import::{ImportConfig, RecipeImporter};
    ///
    /// let mut config = ImportConfig::default();
    /// config.normalize.default_servings = 4;
    /// let builder = RecipeImporter::builder().config(config);
    /// ```
    pub fn config(mut self, config: ImportConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build and execute the import, logging diagnostics through `log`
    ///
    /// # Errors
    /// Returns `ImportError` if:
    /// - No text was specified
    /// - No recipe was detected in the text
    /// - The selected draft does not exist
    /// - No meal type was set for a recipe import
    ///
    /// # Example
    /// ```
    /// use chat_recipe_import::{ImportResult, MealType, RecipeImporter};
    ///
    /// let result = RecipeImporter::builder()
    ///     .text("# Veggie Stew\nIngredients:\n- 2 cups carrots\nInstructions:\n1. Chop vegetables.")
    ///     .meal_type(MealType::Dinner)
    ///     .build()
    ///     .unwrap();
    /// assert!(matches!(result, ImportResult::Recipe(_)));
    /// ```
    pub fn build(self) -> Result<ImportResult, ImportError> {
        self.build_with(&mut LogSink)
    }

    /// Build and execute the import, reporting diagnostics to `sink`
    pub fn build_with(self, sink: &mut dyn DiagnosticSink) -> Result<ImportResult, ImportError> {
        let text = self.text.ok_or_else(|| {
            ImportError::BuilderError("No input text specified. Use .text()".to_string())
        })?;
        let config = self.config.unwrap_or_default();

        let mut drafts = detect_recipes_with(&text, &config.extraction, sink);

        match self.mode {
            OutputMode::Drafts => Ok(ImportResult::Drafts(drafts)),
            OutputMode::Recipe => {
                let meal_type = self.meal_type.ok_or_else(|| {
                    ImportError::BuilderError(
                        "No meal type specified. Use .meal_type() or .extract_only()".to_string(),
                    )
                })?;

                if drafts.is_empty() {
                    return Err(ImportError::NoRecipeDetected);
                }
                let available = drafts.len();
                if self.index >= available {
                    return Err(ImportError::DraftNotFound {
                        index: self.index,
                        available,
                    });
                }
                let draft = drafts.swap_remove(self.index);

                let recipe = build_recipe_with(
                    &draft,
                    meal_type,
                    self.title.as_deref().unwrap_or(""),
                    self.description.as_deref(),
                    &config.normalize,
                    sink,
                );
                Ok(ImportResult::Recipe(recipe))
            }
        }
    }
}

/// Main entry point for the builder API
pub struct RecipeImporter;

impl RecipeImporter {
    /// Creates a new builder for importing recipes
    ///
    /// # Example
    /// ```
    /// use chat_recipe_import::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder();
    /// ```
    pub fn builder() -> RecipeImporterBuilder {
        RecipeImporterBuilder::default()
    }
}
