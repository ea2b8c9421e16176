//! Listing search: tolerant matching of user phrasing against the catalog.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::catalog::Listing;
use crate::types::Budget;

static FILLER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:near|in|around|at)\b\s*").expect("valid regex"));

static BHK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d)\s*bhk").expect("valid regex"));

/// What the user is looking for.
#[derive(Debug, Clone)]
pub struct SearchCriteria {
    pub location: String,
    pub max_budget: Budget,
    pub property_type: Option<String>,
}

impl SearchCriteria {
    pub fn new(location: impl Into<String>, max_budget: Budget) -> Self {
        Self {
            location: location.into(),
            max_budget,
            property_type: None,
        }
    }

    pub fn with_property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = Some(property_type.into());
        self
    }
}

/// Filter `listings` down to those matching `criteria`, preserving catalog
/// order. A location that is empty after cleaning matches every listing.
pub fn search(listings: &[Listing], criteria: &SearchCriteria) -> Vec<Listing> {
    let wanted_location = clean_location(&criteria.location);
    let results: Vec<Listing> = listings
        .iter()
        .filter(|listing| {
            location_matches(&wanted_location, &listing.location)
                && listing.price_lakhs <= criteria.max_budget.lakhs()
                && type_matches(criteria.property_type.as_deref(), &listing.property_type)
        })
        .cloned()
        .collect();
    debug!(
        "Search for '{}' under {} lakhs matched {} listings",
        criteria.location,
        criteria.max_budget,
        results.len()
    );
    results
}

/// Lowercase, trim, and drop filler words like "near jagatpura" -> "jagatpura".
fn clean_location(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let stripped = FILLER_RE.replace_all(lowered.trim(), "");
    stripped.trim().to_string()
}

fn location_matches(wanted: &str, listing_location: &str) -> bool {
    if wanted.is_empty() {
        return true;
    }
    let have = listing_location.to_lowercase();
    let have = have.trim();
    have.contains(wanted) || (!have.is_empty() && wanted.contains(have))
}

fn type_matches(requested: Option<&str>, listing_type: &str) -> bool {
    let requested = match requested {
        Some(r) if !r.is_empty() => r.to_lowercase(),
        _ => return true,
    };
    let have = listing_type.to_lowercase();

    // Compare BHK counts when both sides state one.
    let bhk_ok = match (BHK_RE.captures(&requested), BHK_RE.captures(&have)) {
        (Some(req), Some(row)) => req[1] == row[1],
        _ => true,
    };

    // Apartment and flat are the same thing.
    let synonyms_ok = if requested.contains("apartment") || requested.contains("flat") {
        have.contains("apartment") || have.contains("flat")
    } else {
        true
    };

    bhk_ok && synonyms_ok
}
