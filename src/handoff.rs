//! Lead hand-off: email the conversation to the operator, then ring the
//! operator so they can call the lead back.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::HandoffError;
use crate::phone;
use crate::types::{PhoneNumber, Transcript};

pub const HANDOFF_SUBJECT: &str = "Incoming Lead Call & Chat History";

/// Outcome of a placed call, as reported by the dialer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallReceipt {
    pub id: String,
    pub status: String,
}

/// Sends the hand-off email.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, subject: &str, body: &str) -> anyhow::Result<()>;
}

/// Places the hand-off call.
#[async_trait]
pub trait Dialer: Send + Sync {
    async fn call(&self, to: &str, announcement: &str) -> anyhow::Result<CallReceipt>;
}

/// What a completed hand-off did.
#[derive(Debug, Clone)]
pub struct HandoffReport {
    pub customer_phone: Option<PhoneNumber>,
    pub notified: String,
    pub call: CallReceipt,
}

/// Connects a lead to the operator.
///
/// The call always goes to the operator's own number, even when the
/// customer's number was found; the operator calls the lead back.
pub struct HandoffService {
    mailer: Arc<dyn Mailer>,
    dialer: Arc<dyn Dialer>,
    operator_number: String,
    announcement: String,
}

impl HandoffService {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        dialer: Arc<dyn Dialer>,
        operator_number: impl Into<String>,
        announcement: impl Into<String>,
    ) -> Self {
        Self {
            mailer,
            dialer,
            operator_number: operator_number.into(),
            announcement: announcement.into(),
        }
    }

    /// Email the transcript, then place the call. The email goes out first;
    /// a mail failure aborts before any call is attempted.
    pub async fn connect(&self, transcript: &Transcript) -> Result<HandoffReport, HandoffError> {
        if self.operator_number.is_empty() {
            return Err(HandoffError::NoOperator);
        }

        let customer_phone = phone::extract_phone(transcript);
        if customer_phone.is_none() {
            warn!("No customer phone in transcript, handing off anyway");
        }

        let phone_label = customer_phone
            .as_ref()
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| "not provided".to_string());
        let flattened = transcript.flatten();
        let history = if flattened.trim().is_empty() {
            "No transcript captured."
        } else {
            flattened.as_str()
        };
        let body = format!("Connecting you with a new lead ({phone_label}).\n\nConversation:\n{history}");

        self.mailer
            .send(HANDOFF_SUBJECT, &body)
            .await
            .map_err(|e| HandoffError::Email(e.to_string()))?;

        let call = self
            .dialer
            .call(&self.operator_number, &self.announcement)
            .await
            .map_err(|e| HandoffError::Call(e.to_string()))?;

        info!(
            "Hand-off call {} to {} is {}",
            call.id, self.operator_number, call.status
        );

        Ok(HandoffReport {
            customer_phone,
            notified: self.operator_number.clone(),
            call,
        })
    }
}
