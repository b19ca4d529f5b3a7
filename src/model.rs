use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ImportError;

/// Section of a recipe that content lines are routed into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Ingredients,
    Instructions,
    Nutrition,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Ingredients => "ingredients",
            Section::Instructions => "instructions",
            Section::Nutrition => "nutrition",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single ingredient line broken into amount, unit and name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IngredientEntry {
    /// Sequential within one recipe (`ing-1`, `ing-2`, ...)
    pub id: String,
    pub name: String,
    /// Quantity, possibly fractional; 0 when unknown
    pub amount: f64,
    pub unit: String,
}

impl IngredientEntry {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        amount: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
            unit: unit.into(),
        }
    }
}

/// Macro nutrients per serving. Zero means "not known".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nutrition {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    pub fiber: u32,
}

impl Nutrition {
    pub fn is_empty(&self) -> bool {
        *self == Nutrition::default()
    }

    /// True when any of calories, protein, carbs or fat is still unknown.
    /// Fiber is frequently omitted and does not count.
    pub fn has_missing_macros(&self) -> bool {
        self.calories == 0 || self.protein == 0 || self.carbs == 0 || self.fat == 0
    }

    /// Overwrite fields with every nonzero value from `other`.
    /// Zero values in `other` never clear a field.
    pub fn merge_nonzero(&mut self, other: &Nutrition) {
        overwrite_nonzero(&mut self.calories, other.calories);
        overwrite_nonzero(&mut self.protein, other.protein);
        overwrite_nonzero(&mut self.carbs, other.carbs);
        overwrite_nonzero(&mut self.fat, other.fat);
        overwrite_nonzero(&mut self.fiber, other.fiber);
    }

    /// Fill only the fields that are still zero. Returns true if anything changed.
    pub fn fill_missing(&mut self, other: &Nutrition) -> bool {
        let before = *self;
        fill_zero(&mut self.calories, other.calories);
        fill_zero(&mut self.protein, other.protein);
        fill_zero(&mut self.carbs, other.carbs);
        fill_zero(&mut self.fat, other.fat);
        fill_zero(&mut self.fiber, other.fiber);
        before != *self
    }
}

fn overwrite_nonzero(field: &mut u32, value: u32) {
    if value != 0 {
        *field = value;
    }
}

fn fill_zero(field: &mut u32, value: u32) {
    if *field == 0 && value != 0 {
        *field = value;
    }
}

/// Records which section headers were seen explicitly (as opposed to inferred).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionFlags {
    pub ingredient_section_found: bool,
    pub instruction_section_found: bool,
    pub nutrition_section_found: bool,
}

impl SectionFlags {
    pub fn mark(&mut self, section: Section) {
        match section {
            Section::Ingredients => self.ingredient_section_found = true,
            Section::Instructions => self.instruction_section_found = true,
            Section::Nutrition => self.nutrition_section_found = true,
        }
    }
}

/// A recipe detected inside a chat message, before normalization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeDraft {
    pub id: String,
    pub title: String,
    /// Inclusive range of source line indices this draft was built from
    pub line_range: (usize, usize),
    pub ingredients: Vec<IngredientEntry>,
    pub instructions: Vec<String>,
    /// Lines seen under a nutrition header, kept verbatim
    #[serde(rename = "rawNutritionalInfo")]
    pub raw_nutrition_text: String,
    #[serde(flatten)]
    pub nutrition: Nutrition,
    pub prep_time: u32,
    pub cook_time: u32,
    pub total_time: u32,
    pub servings: u32,
    #[serde(flatten)]
    pub sections: SectionFlags,
    pub full_text: String,
}

impl RecipeDraft {
    pub fn new(id: impl Into<String>, title: impl Into<String>, start_line: usize) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            line_range: (start_line, start_line),
            ..Default::default()
        }
    }

    /// Append an ingredient, assigning the next sequential id.
    pub fn add_ingredient(&mut self, mut entry: IngredientEntry) {
        entry.id = format!("ing-{}", self.ingredients.len() + 1);
        self.ingredients.push(entry);
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty() && self.instructions.is_empty() && self.nutrition.is_empty()
    }
}

/// Meal slot a recipe is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    /// Anything else; rejected by validation but still storable
    #[default]
    #[serde(other)]
    Unknown,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
            MealType::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, MealType::Unknown)
    }
}

impl FromStr for MealType {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" | "snacks" => Ok(MealType::Snack),
            _ => Err(ImportError::InvalidMealType(s.to_string())),
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized recipe in the shape the recipe store persists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: String,
    pub meal_type: MealType,
    pub prep_time: u32,
    pub cook_time: u32,
    pub total_time: u32,
    pub servings: u32,
    pub nutritional_info: Nutrition,
    pub ingredients: Vec<IngredientEntry>,
    pub instructions: Vec<String>,
    pub cuisine: String,
    pub tags: Vec<String>,
    pub raw_nutritional_info: String,
}
