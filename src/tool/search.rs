use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

use crate::budget;
use crate::catalog::CatalogSource;
use crate::error::BudgetError;
use crate::search::{self, SearchCriteria};

use super::Tool;

/// Tool to search the property catalog.
pub struct SearchListingsTool {
    catalog: Arc<dyn CatalogSource>,
}

impl SearchListingsTool {
    pub fn new(catalog: Arc<dyn CatalogSource>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for SearchListingsTool {
    fn name(&self) -> &str {
        "search_listings"
    }

    fn description(&self) -> &str {
        "Searches for real estate listings based on location, maximum budget, and property type (e.g., '2BHK Apartment')."
    }

    fn parameters(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "Area or locality the user wants, e.g. 'Jagatpura'"
                },
                "max_budget": {
                    "type": "string",
                    "description": "Maximum budget in the user's words, e.g. '80 lakhs' or '1.2 cr'"
                },
                "property_type": {
                    "type": "string",
                    "description": "Optional: property type such as '2BHK Apartment'"
                }
            },
            "required": ["location", "max_budget"]
        })
    }

    async fn execute(&self, params: HashMap<String, serde_json::Value>) -> String {
        let location = match params.get("location").and_then(|v| v.as_str()) {
            Some(l) => l.to_string(),
            None => return "Error: 'location' parameter is required".to_string(),
        };

        // The budget may arrive as a string or a bare number.
        let raw_budget = match params.get("max_budget") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => return "Error: 'max_budget' parameter is required".to_string(),
        };

        let max_budget = match budget::normalize(&raw_budget) {
            Ok(b) => b,
            Err(BudgetError::NoDigits) => {
                return "I cannot search for properties without a budget. Please ask the user for their budget first."
                    .to_string()
            }
            Err(BudgetError::NoNumber) => {
                return "Error: The budget provided was not a valid number. Please ask for a budget like '80 lakhs' or '1.2 cr'."
                    .to_string()
            }
        };

        let property_type = params
            .get("property_type")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let listings = match self.catalog.load() {
            Ok(listings) => listings,
            Err(e) => return format!("An error occurred while searching: {e}"),
        };

        let mut criteria = SearchCriteria::new(&location, max_budget);
        if let Some(requested) = &property_type {
            criteria = criteria.with_property_type(requested);
        }

        let results = search::search(&listings, &criteria);
        if results.is_empty() {
            return format!(
                "No properties found matching your criteria (Location: {}, Budget: under {} Lakhs, Type: {}).",
                location,
                max_budget,
                property_type
                    .as_deref()
                    .filter(|t| !t.is_empty())
                    .unwrap_or("Any")
            );
        }

        let lines: Vec<String> = results.iter().map(|l| l.summary()).collect();
        format!("Here are the properties I found:\n{}", lines.join("\n"))
    }
}
