//! Budget normalization for free-text amounts like "1.2cr", "1 cr",
//! "120 l", or "120 lakhs", all reduced to whole lakhs.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::BudgetError;
use crate::types::Budget;

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").expect("valid regex"));

static LAKH_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:l|lac)s?\b").expect("valid regex"));

/// Normalize a free-text budget to whole lakhs.
///
/// Unit markers win: any "cr" means crores, "lakh"/"l"/"lac" means lakhs.
/// Without a marker, small numbers (<= 10) and decimals are read as crores,
/// anything else as lakhs already. Fractional lakhs round to the nearest
/// whole number, halves rounding up.
pub fn normalize(input: &str) -> Result<Budget, BudgetError> {
    if !input.chars().any(|c| c.is_ascii_digit()) {
        return Err(BudgetError::NoDigits);
    }

    let text: String = input
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let token = NUMBER_RE.find(&text).ok_or(BudgetError::NoNumber)?;
    let number: f64 = token
        .as_str()
        .parse()
        .map_err(|_| BudgetError::NoNumber)?;

    let crore_explicit = text.contains("cr");
    let lakh_explicit = text.contains("lakh") || LAKH_TOKEN_RE.is_match(&text);

    let lakhs = if crore_explicit {
        number * 100.0
    } else if !lakh_explicit && (number <= 10.0 || text.contains('.')) {
        number * 100.0
    } else {
        number
    };

    Ok(Budget(lakhs.round() as u32))
}
