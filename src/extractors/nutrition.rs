use lazy_static::lazy_static;
use regex::Regex;

use crate::model::Nutrition;

const NUTRITION_KEYWORDS: &[&str] = &["cal", "protein", "carb", "fat", "fiber", "fibre"];

fn patterns(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .map(|source| Regex::new(source).expect("nutrition pattern should be valid"))
        .collect()
}

// Each list is tried in order; the first pattern that matches wins for that macro.
lazy_static! {
    static ref CALORIES: Vec<Regex> = patterns(&[
        r"(?i)calories[:*\s]*(\d+)",
        r"(?i)(\d+)\s*calories",
        r"(?i)(\d+)\s*kcal",
        r"(?i)(\d+)\s*cal",
        r"(?i)energy[:*\s]*(\d+)",
    ]);
    static ref PROTEIN: Vec<Regex> = patterns(&[
        r"(?i)protein[:*\s]*(\d+)",
        r"(?i)(\d+)\s*g\s*(?:of\s+)?protein",
        r"(?i)protein\s*-\s*(\d+)\s*g",
    ]);
    static ref CARBS: Vec<Regex> = patterns(&[
        r"(?i)carbs[:*\s]*(\d+)",
        r"(?i)carbohydrates[:*\s]*(\d+)",
        r"(?i)(\d+)\s*g\s*(?:of\s+)?carbs",
        r"(?i)(\d+)\s*g\s*(?:of\s+)?carbohydrates",
        r"(?i)carbs\s*-\s*(\d+)\s*g",
    ]);
    static ref FAT: Vec<Regex> = patterns(&[
        r"(?i)fat[:*\s]*(\d+)",
        r"(?i)(\d+)\s*g\s*(?:of\s+)?fat",
        r"(?i)fats[:*\s]*(\d+)",
        r"(?i)fat\s*-\s*(\d+)\s*g",
    ]);
    static ref FIBER: Vec<Regex> = patterns(&[
        r"(?i)fiber[:*\s]*(\d+)",
        r"(?i)(\d+)\s*g\s*(?:of\s+)?fiber",
        r"(?i)fibre[:*\s]*(\d+)",
        r"(?i)dietary fiber[:*\s]*(\d+)",
        r"(?i)fiber\s*-\s*(\d+)\s*g",
    ]);
}

/// Line mentions calories or a macro nutrient and is worth scanning for numbers.
pub fn has_nutrition_keyword(line: &str) -> bool {
    let lower = line.to_lowercase();
    NUTRITION_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Pull calories, protein, carbs, fat and fiber out of a line or a block of text.
///
/// Each macro is matched independently; anything not found stays 0.
pub fn extract_nutrition(text: &str) -> Nutrition {
    Nutrition {
        calories: first_match(&CALORIES, text),
        protein: first_match(&PROTEIN, text),
        carbs: first_match(&CARBS, text),
        fat: first_match(&FAT, text),
        fiber: first_match(&FIBER, text),
    }
}

fn first_match(patterns: &[Regex], text: &str) -> u32 {
    patterns
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .unwrap_or(0)
}
