use lazy_static::lazy_static;
use regex::Regex;

use crate::model::IngredientEntry;

lazy_static! {
    // "2 tbsp olive oil", "1/2 cup milk", "1 1/2 cups flour"
    static ref LEADING_QUANTITY: Regex = Regex::new(r"^(\d[\d/.\s]*?)\s*([a-zA-Z]+)\s+(.+)$")
        .expect("leading quantity pattern should be valid");
    // "Olive oil - 2 tbsp", "Sugar: 1/2 cup"
    static ref TRAILING_QUANTITY: Regex =
        Regex::new(r"^(.+?)[\s:,\-–]+(\d[\d/.\s]*?)\s*([a-zA-Z]+)$")
            .expect("trailing quantity pattern should be valid");
    static ref BARE_NUMBER: Regex =
        Regex::new(r"(\d+)\s*([a-zA-Z]+)").expect("bare number pattern should be valid");
}

/// Parse an ingredient line (list marker already removed) into amount, unit and name.
///
/// Tries, in order: a leading quantity ("2 tbsp olive oil"), a trailing
/// quantity ("Olive oil - 2 tbsp"), and finally any number followed by a
/// word anywhere in the line, in which case the whole line stays the name.
/// The returned entry has an empty id; the draft assigns one on insertion.
pub fn parse_ingredient(line: &str) -> IngredientEntry {
    let line = line.trim();

    if let Some(caps) = LEADING_QUANTITY.captures(line) {
        return entry(line, &caps[3], parse_amount(&caps[1]), &caps[2]);
    }

    if let Some(caps) = TRAILING_QUANTITY.captures(line) {
        return entry(line, &caps[1], parse_amount(&caps[2]), &caps[3]);
    }

    if let Some(caps) = BARE_NUMBER.captures(line) {
        return entry(line, line, parse_amount(&caps[1]), &caps[2]);
    }

    entry(line, line, 0.0, "")
}

fn entry(line: &str, name: &str, amount: f64, unit: &str) -> IngredientEntry {
    let name = name.trim().trim_end_matches([':', ',']).trim();
    let name = if name.is_empty() { line } else { name };
    IngredientEntry::new(String::new(), name, amount, unit)
}

/// Parse a quantity such as "2", "0.5", "1/2" or "1 1/2".
///
/// Anything unparseable, including malformed fractions and division by
/// zero, yields 0.
pub fn parse_amount(text: &str) -> f64 {
    let text = text.trim();
    let value = if text.contains('/') {
        parse_fraction(text)
    } else {
        text.split_whitespace()
            .next()
            .and_then(|token| token.parse::<f64>().ok())
    };

    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

fn parse_fraction(text: &str) -> Option<f64> {
    let (whole, fraction) = match text.rsplit_once(char::is_whitespace) {
        Some((whole, fraction)) if fraction.contains('/') && !whole.contains('/') => {
            (whole.trim(), fraction)
        }
        _ => ("", text),
    };

    let mut parts = fraction.split('/');
    let numerator = parts.next()?.trim().parse::<f64>().ok()?;
    let denominator = parts.next()?.trim().parse::<f64>().ok()?;
    if parts.next().is_some() || denominator == 0.0 {
        return None;
    }

    let whole = if whole.is_empty() {
        0.0
    } else {
        whole.parse::<f64>().ok()?
    };

    Some(whole + numerator / denominator)
}
