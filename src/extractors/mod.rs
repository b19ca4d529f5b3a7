//! Per-line parsers used by the segmenter and the normalizer.

use lazy_static::lazy_static;
use regex::Regex;

mod classifier;
mod ingredient;
mod nutrition;
mod timing;

pub use self::classifier::{classify, clean_title, Classifier, HeaderMatching, LineClass};
pub use self::ingredient::{parse_amount, parse_ingredient};
pub use self::nutrition::{extract_nutrition, has_nutrition_keyword};
pub use self::timing::{extract_timing, Timing};

lazy_static! {
    // "- ", "* ", "• " or "1." / "2)" followed by whitespace (so "1.5 cups" is not a marker)
    static ref LIST_ITEM: Regex =
        Regex::new(r"^(?:[-*•]\s|\d+[.)](?:\s|$))").expect("list item pattern should be valid");
    static ref LIST_MARKER: Regex =
        Regex::new(r"^(?:[-*•]\s*|\d+[.)](?:\s+|$))").expect("list marker pattern should be valid");
    static ref NUMBERED: Regex =
        Regex::new(r"^\d+[.)](?:\s|$)").expect("numbered pattern should be valid");
    static ref MEASUREMENT: Regex = Regex::new(r"(?i)\d+\s*(?:cups?|tbsp|tsp|oz|g|ml|lbs?)\b")
        .expect("measurement pattern should be valid");
}

/// Line starts with a bullet or a list number.
pub fn is_list_item(line: &str) -> bool {
    LIST_ITEM.is_match(line.trim_start())
}

/// Line starts with "1." or "1)".
pub fn is_numbered(line: &str) -> bool {
    NUMBERED.is_match(line.trim_start())
}

/// Line contains a number followed by a common kitchen unit.
pub fn has_measurement(line: &str) -> bool {
    MEASUREMENT.is_match(line)
}

/// Remove one leading bullet or list number and any markdown bold markers.
pub fn strip_list_marker(line: &str) -> String {
    let trimmed = line.trim();
    LIST_MARKER
        .replace(trimmed, "")
        .replace("**", "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_items() {
        assert!(is_list_item("- 2 cups carrots"));
        assert!(is_list_item("* salt"));
        assert!(is_list_item("• butter"));
        assert!(is_list_item("3. Stir well"));
        assert!(is_list_item("4) Serve"));
        assert!(!is_list_item("1.5 cups flour"));
        assert!(!is_list_item("**Bold heading**"));
        assert!(!is_list_item("plain text"));
    }

    #[test]
    fn test_strip_list_marker() {
        assert_eq!(strip_list_marker("- 2 cups carrots"), "2 cups carrots");
        assert_eq!(strip_list_marker("1. Chop vegetables."), "Chop vegetables.");
        assert_eq!(strip_list_marker("12) Serve hot"), "Serve hot");
        assert_eq!(strip_list_marker("1.5 cups flour"), "1.5 cups flour");
        assert_eq!(strip_list_marker("- **Olive oil** - 2 tbsp"), "Olive oil - 2 tbsp");
    }

    #[test]
    fn test_measurements() {
        assert!(has_measurement("2 cups flour"));
        assert!(has_measurement("200g pasta"));
        assert!(has_measurement("1 lb chicken"));
        assert!(!has_measurement("2 garlic cloves"));
        assert!(!has_measurement("Prep time: 10 min"));
    }
}
