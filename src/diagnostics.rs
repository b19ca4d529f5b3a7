//! Structured diagnostics emitted while extracting and normalizing recipes.
//!
//! Every stage reports what it found to a [`DiagnosticSink`] instead of
//! writing to the logger directly. [`LogSink`] forwards events to the `log`
//! facade; a `Vec<Diagnostic>` collects them so tests can inspect the trace.

use log::Level;

use crate::model::{IngredientEntry, Nutrition, Section};

/// Where a backfilled value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackfillSource {
    /// Bulleted or numbered lines inside the matching text span
    ListLines,
    /// Lines with measurements or ingredient keywords inside the span
    KeywordLines,
    /// Long paragraphs inside the instructions span
    Paragraphs,
    /// Any reasonably long line inside the instructions span
    AnyLines,
    /// Fixed values for a recognized beverage category
    CategoryDefaults,
    /// The raw nutrition block of the draft
    RawNutrition,
    /// The full text of the draft
    FullText,
    /// Generic placeholder content
    Placeholder,
}

/// Field of a recipe that a backfill step populated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackfillField {
    Ingredients,
    Instructions,
    Nutrition,
}

/// Structural problem found when validating a recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    MissingName,
    InvalidMealType,
    NoIngredients,
    /// One-based position of the ingredient without a name
    UnnamedIngredient(usize),
    NoInstructions,
}

impl ValidationIssue {
    /// Issues that validation repairs by inserting placeholders
    pub fn is_repairable(&self) -> bool {
        matches!(
            self,
            ValidationIssue::NoIngredients | ValidationIssue::NoInstructions
        )
    }

    pub fn message(&self) -> String {
        match self {
            ValidationIssue::MissingName => "Recipe name is required".to_string(),
            ValidationIssue::InvalidMealType => {
                "Valid meal type is required (breakfast, lunch, dinner, or snack)".to_string()
            }
            ValidationIssue::NoIngredients => "Recipe should have at least one ingredient".to_string(),
            ValidationIssue::UnnamedIngredient(position) => {
                format!("Ingredient #{} is missing a name", position)
            }
            ValidationIssue::NoInstructions => {
                "Recipe should have at least one instruction".to_string()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A title line opened a new recipe
    RecipeStarted { line: usize, title: String },
    /// No title line was found; the whole text became one recipe
    FallbackRecipe { title: String },
    /// Nothing in the text looks like a recipe
    NoRecipe,
    /// An explicit section header switched the mode
    SectionHeader { line: usize, section: Section },
    /// Content implied a section without any header
    SectionInferred { line: usize, section: Section },
    IngredientParsed { line: usize, entry: IngredientEntry },
    InstructionAdded { line: usize, text: String },
    NutritionExtracted { line: usize, nutrition: Nutrition },
    RecipeFinished {
        title: String,
        ingredients: usize,
        instructions: usize,
    },
    Backfilled {
        field: BackfillField,
        source: BackfillSource,
        count: usize,
    },
    ValidationFailed(ValidationIssue),
    Repaired(ValidationIssue),
}

impl Diagnostic {
    pub fn level(&self) -> Level {
        match self {
            Diagnostic::ValidationFailed(_) => Level::Warn,
            Diagnostic::FallbackRecipe { .. }
            | Diagnostic::Backfilled { .. }
            | Diagnostic::Repaired(_) => Level::Info,
            _ => Level::Debug,
        }
    }
}

/// Receiver for extraction diagnostics
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::ValidationFailed(issue) => log::warn!("{}", issue.message()),
            Diagnostic::Repaired(issue) => log::info!("Repaired: {}", issue.message()),
            _ => log::log!(diagnostic.level(), "{:?}", diagnostic),
        }
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        sink.emit(Diagnostic::NoRecipe);
        sink.emit(Diagnostic::ValidationFailed(ValidationIssue::MissingName));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0], Diagnostic::NoRecipe);
    }

    #[test]
    fn test_levels() {
        assert_eq!(
            Diagnostic::ValidationFailed(ValidationIssue::NoIngredients).level(),
            Level::Warn
        );
        assert_eq!(Diagnostic::NoRecipe.level(), Level::Debug);
        assert_eq!(
            Diagnostic::Repaired(ValidationIssue::NoInstructions).level(),
            Level::Info
        );
    }

    #[test]
    fn test_repairable_issues() {
        assert!(ValidationIssue::NoIngredients.is_repairable());
        assert!(ValidationIssue::NoInstructions.is_repairable());
        assert!(!ValidationIssue::MissingName.is_repairable());
        assert!(!ValidationIssue::UnnamedIngredient(2).is_repairable());
        assert_eq!(
            ValidationIssue::UnnamedIngredient(2).message(),
            "Ingredient #2 is missing a name"
        );
    }
}
