use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

use crate::budget;
use crate::lead::{Lead, LeadStore};
use crate::types::Budget;

use super::Tool;

const REQUIRED_FIELDS: [&str; 6] = [
    "name",
    "phone",
    "location",
    "timeline",
    "loan_preapproved",
    "property_type",
];

/// Tool to append a fully qualified lead to the lead book.
pub struct SaveLeadTool {
    store: Arc<dyn LeadStore>,
}

impl SaveLeadTool {
    pub fn new(store: Arc<dyn LeadStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for SaveLeadTool {
    fn name(&self) -> &str {
        "save_lead"
    }

    fn description(&self) -> &str {
        "Saves the collected lead information to the lead book. Use this ONLY when you have ALL the required information."
    }

    fn parameters(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Full name of the lead"
                },
                "phone": {
                    "type": "string",
                    "description": "Phone number of the lead"
                },
                "location": {
                    "type": "string",
                    "description": "Area the lead wants to buy in"
                },
                "budget_lakhs": {
                    "type": "integer",
                    "description": "Maximum budget in lakhs"
                },
                "timeline": {
                    "type": "string",
                    "description": "When the lead wants to move, e.g. '3 months'"
                },
                "loan_preapproved": {
                    "type": "string",
                    "description": "Whether a home loan is pre-approved, e.g. 'yes' or 'no'"
                },
                "property_type": {
                    "type": "string",
                    "description": "Property type the lead wants, e.g. '2BHK Apartment'"
                }
            },
            "required": ["name", "phone", "location", "budget_lakhs", "timeline", "loan_preapproved", "property_type"]
        })
    }

    async fn execute(&self, params: HashMap<String, serde_json::Value>) -> String {
        for key in REQUIRED_FIELDS {
            if params.get(key).and_then(|v| v.as_str()).is_none() {
                return format!("Error: '{key}' parameter is required");
            }
        }

        // Budget may arrive as an integer or as the user's own words.
        let budget_lakhs = match params.get("budget_lakhs") {
            Some(serde_json::Value::Number(n)) => {
                if let Some(whole) = n.as_u64() {
                    Budget(u32::try_from(whole).unwrap_or(u32::MAX))
                } else {
                    Budget(n.as_f64().unwrap_or(0.0).round() as u32)
                }
            }
            Some(serde_json::Value::String(s)) => match budget::normalize(s) {
                Ok(b) => b,
                Err(_) => {
                    return "Error: The budget provided was not a valid number. Please ask for a budget like '80 lakhs' or '1.2 cr'."
                        .to_string()
                }
            },
            _ => return "Error: 'budget_lakhs' parameter is required".to_string(),
        };

        let field = |key: &str| {
            params
                .get(key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };

        let lead = Lead::new(
            field("name"),
            field("phone"),
            field("location"),
            budget_lakhs,
            field("timeline"),
            field("loan_preapproved"),
            field("property_type"),
        );

        match self.store.append(&lead) {
            Ok(()) => "Successfully saved the lead.".to_string(),
            Err(e) => format!("Failed to save lead: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LeadError;
    use crate::lead::MemoryLeadStore;

    fn full_params() -> HashMap<String, serde_json::Value> {
        [
            ("name", json!("Priya Verma")),
            ("phone", json!("+919876543210")),
            ("location", json!("Jagatpura")),
            ("budget_lakhs", json!(80)),
            ("timeline", json!("3 months")),
            ("loan_preapproved", json!("yes")),
            ("property_type", json!("2BHK Apartment")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    #[tokio::test]
    async fn test_save_lead() {
        let store = Arc::new(MemoryLeadStore::new());
        let tool = SaveLeadTool::new(store.clone());

        let result = tool.execute(full_params()).await;
        assert_eq!(result, "Successfully saved the lead.");

        let leads = store.list().unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].name, "Priya Verma");
        assert_eq!(leads[0].budget_lakhs, Budget(80));
        assert_eq!(leads[0].loan_preapproved, "yes");
    }

    #[tokio::test]
    async fn test_save_lead_budget_as_text() {
        let store = Arc::new(MemoryLeadStore::new());
        let tool = SaveLeadTool::new(store.clone());

        let mut params = full_params();
        params.insert("budget_lakhs".to_string(), json!("1.2 cr"));
        assert_eq!(tool.execute(params).await, "Successfully saved the lead.");
        assert_eq!(store.list().unwrap()[0].budget_lakhs, Budget(120));
    }

    #[tokio::test]
    async fn test_save_lead_rejects_bad_budget() {
        let tool = SaveLeadTool::new(Arc::new(MemoryLeadStore::new()));

        let mut params = full_params();
        params.insert("budget_lakhs".to_string(), json!("whatever fits"));
        assert_eq!(
            tool.execute(params).await,
            "Error: The budget provided was not a valid number. Please ask for a budget like '80 lakhs' or '1.2 cr'."
        );
    }

    #[tokio::test]
    async fn test_save_lead_requires_every_field() {
        let tool = SaveLeadTool::new(Arc::new(MemoryLeadStore::new()));

        let mut params = full_params();
        params.remove("timeline");
        assert_eq!(
            tool.execute(params).await,
            "Error: 'timeline' parameter is required"
        );

        let mut params = full_params();
        params.remove("budget_lakhs");
        assert_eq!(
            tool.execute(params).await,
            "Error: 'budget_lakhs' parameter is required"
        );
    }

    #[tokio::test]
    async fn test_save_lead_reports_store_failure() {
        struct BrokenStore;
        impl LeadStore for BrokenStore {
            fn append(&self, _lead: &Lead) -> Result<(), LeadError> {
                Err(LeadError::Write("disk full".to_string()))
            }
            fn list(&self) -> Result<Vec<Lead>, LeadError> {
                Ok(Vec::new())
            }
        }

        let tool = SaveLeadTool::new(Arc::new(BrokenStore));
        assert_eq!(
            tool.execute(full_params()).await,
            "Failed to save lead: failed to record lead: disk full"
        );
    }
}
