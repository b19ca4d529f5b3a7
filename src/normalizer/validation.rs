use crate::diagnostics::{Diagnostic, DiagnosticSink, ValidationIssue};
use crate::model::{IngredientEntry, Recipe};

const PLACEHOLDER_INGREDIENT_ID: &str = "default-ing-1";
const PLACEHOLDER_INGREDIENT: &str = "Ingredients not specified";
const PLACEHOLDER_INSTRUCTION: &str = "Instructions not provided";

/// Outcome of [`validate_and_repair`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Every issue found, repaired or not
    pub issues: Vec<ValidationIssue>,
    /// Issues fixed in place with placeholder content
    pub repaired: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Issues that remain after repair. They are reported but never block.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(move |issue| !self.repaired.contains(issue))
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check the minimal structure a stored recipe needs.
///
/// Calories are numeric by construction, so only the name, meal type and
/// the ingredient and instruction lists are checked.
pub fn validate(recipe: &Recipe) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if recipe.name.trim().is_empty() {
        issues.push(ValidationIssue::MissingName);
    }
    if !recipe.meal_type.is_known() {
        issues.push(ValidationIssue::InvalidMealType);
    }

    if recipe.ingredients.is_empty() {
        issues.push(ValidationIssue::NoIngredients);
    } else {
        for (i, ingredient) in recipe.ingredients.iter().enumerate() {
            if ingredient.name.trim().is_empty() {
                issues.push(ValidationIssue::UnnamedIngredient(i + 1));
            }
        }
    }

    if recipe.instructions.is_empty() {
        issues.push(ValidationIssue::NoInstructions);
    }

    issues
}

/// Validate `recipe` and patch empty ingredient or instruction lists with a
/// single placeholder. Other issues are only reported.
pub fn validate_and_repair(recipe: &mut Recipe, sink: &mut dyn DiagnosticSink) -> ValidationReport {
    let issues = validate(recipe);
    let mut repaired = Vec::new();

    for issue in &issues {
        sink.emit(Diagnostic::ValidationFailed(issue.clone()));
        if !issue.is_repairable() {
            continue;
        }

        match issue {
            ValidationIssue::NoIngredients => {
                recipe.ingredients = vec![IngredientEntry::new(
                    PLACEHOLDER_INGREDIENT_ID,
                    PLACEHOLDER_INGREDIENT,
                    0.0,
                    "",
                )];
            }
            ValidationIssue::NoInstructions => {
                recipe.instructions = vec![PLACEHOLDER_INSTRUCTION.to_string()];
            }
            _ => continue,
        }

        sink.emit(Diagnostic::Repaired(issue.clone()));
        repaired.push(issue.clone());
    }

    ValidationReport { issues, repaired }
}
