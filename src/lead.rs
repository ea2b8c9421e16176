//! Captured leads and the lead book they are appended to.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LeadError;
use crate::types::Budget;

/// A fully qualified lead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub location: String,
    pub budget_lakhs: Budget,
    pub timeline: String,
    pub loan_preapproved: String,
    pub property_type: String,
    pub created_at: DateTime<Utc>,
}

impl Lead {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        location: impl Into<String>,
        budget_lakhs: Budget,
        timeline: impl Into<String>,
        loan_preapproved: impl Into<String>,
        property_type: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            phone: phone.into(),
            location: location.into(),
            budget_lakhs,
            timeline: timeline.into(),
            loan_preapproved: loan_preapproved.into(),
            property_type: property_type.into(),
            created_at: Utc::now(),
        }
    }
}

/// Destination for captured leads.
pub trait LeadStore: Send + Sync {
    /// Append one lead to the book.
    fn append(&self, lead: &Lead) -> Result<(), LeadError>;

    /// All leads in append order.
    fn list(&self) -> Result<Vec<Lead>, LeadError>;
}

/// In-memory lead book for tests and embedding.
#[derive(Default)]
pub struct MemoryLeadStore {
    leads: Mutex<Vec<Lead>>,
}

impl MemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LeadStore for MemoryLeadStore {
    fn append(&self, lead: &Lead) -> Result<(), LeadError> {
        self.leads
            .lock()
            .map_err(|_| LeadError::Write("lead store lock poisoned".to_string()))?
            .push(lead.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<Lead>, LeadError> {
        Ok(self
            .leads
            .lock()
            .map_err(|_| LeadError::Read("lead store lock poisoned".to_string()))?
            .clone())
    }
}

/// JSONL lead book, one lead per line.
pub struct FileLeadStore {
    path: PathBuf,
}

impl FileLeadStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LeadStore for FileLeadStore {
    fn append(&self, lead: &Lead) -> Result<(), LeadError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| LeadError::Write(e.to_string()))?;
            }
        }

        let line = serde_json::to_string(lead).map_err(|e| LeadError::Write(e.to_string()))?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| LeadError::Write(e.to_string()))?;
        writeln!(file, "{line}").map_err(|e| LeadError::Write(e.to_string()))
    }

    fn list(&self) -> Result<Vec<Lead>, LeadError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content =
            std::fs::read_to_string(&self.path).map_err(|e| LeadError::Read(e.to_string()))?;
        let mut leads = Vec::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let lead = serde_json::from_str(line).map_err(|e| LeadError::Read(e.to_string()))?;
            leads.push(lead);
        }
        Ok(leads)
    }
}
