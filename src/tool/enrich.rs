use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;

use crate::enrich;

use super::Tool;

/// Tool to expand a bare listing line into a fuller description.
pub struct EnrichListingTool;

#[async_trait]
impl Tool for EnrichListingTool {
    fn name(&self) -> &str {
        "enrich_listing"
    }

    fn description(&self) -> &str {
        "Takes a short listing summary (e.g., a single '- Found:' line) and returns a professional, enriched description with plausible amenities, nearby landmarks, connectivity, and lifestyle notes. This is templated content; do not invent prices or contacts beyond what is provided in the summary."
    }

    fn parameters(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "listing_summary": {
                    "type": "string",
                    "description": "The listing line to enrich"
                }
            },
            "required": ["listing_summary"]
        })
    }

    async fn execute(&self, params: HashMap<String, serde_json::Value>) -> String {
        let summary = params
            .get("listing_summary")
            .and_then(|v| v.as_str())
            .unwrap_or_default();

        match enrich::enrich_summary(summary) {
            Some(enriched) => enriched,
            None => "I need a listing summary line to enrich.".to_string(),
        }
    }
}
