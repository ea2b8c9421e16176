use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

use crate::handoff::HandoffService;
use crate::types::Transcript;

use super::Tool;

/// Tool to hand a live lead over to the operator.
pub struct ConnectAgentTool {
    service: Arc<HandoffService>,
}

impl ConnectAgentTool {
    pub fn new(service: Arc<HandoffService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for ConnectAgentTool {
    fn name(&self) -> &str {
        "connect_agent"
    }

    fn description(&self) -> &str {
        "Finds the customer's phone number from the chat history, emails the history to the agent, and then connects the customer to the agent via a phone call."
    }

    fn parameters(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "chat_history": {
                    "type": "array",
                    "description": "The conversation so far, as a list of turns or plain strings",
                    "items": {}
                }
            },
            "required": ["chat_history"]
        })
    }

    async fn execute(&self, params: HashMap<String, serde_json::Value>) -> String {
        // Histories arrive in loose shapes; anything unusable becomes an
        // empty transcript and the hand-off still reaches the operator.
        let transcript = match params.get("chat_history") {
            Some(value @ serde_json::Value::Array(_)) => {
                serde_json::from_value::<Transcript>(value.clone()).unwrap_or_default()
            }
            Some(serde_json::Value::String(s)) => {
                let mut t = Transcript::new();
                t.push_text(s.clone());
                t
            }
            _ => Transcript::new(),
        };

        match self.service.connect(&transcript).await {
            Ok(report) => format!(
                "Successfully sent the chat history and initiated a call to {}. Call ID: {}, status: {}.",
                report.notified, report.call.id, report.call.status
            ),
            Err(e) => format!("An error occurred: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::handoff::{CallReceipt, Dialer, Mailer};

    #[derive(Default)]
    struct StubMailer {
        bodies: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Mailer for StubMailer {
        async fn send(&self, _subject: &str, body: &str) -> anyhow::Result<()> {
            self.bodies.lock().unwrap().push(body.to_string());
            Ok(())
        }
    }

    struct StubDialer;

    #[async_trait]
    impl Dialer for StubDialer {
        async fn call(&self, _to: &str, _announcement: &str) -> anyhow::Result<CallReceipt> {
            Ok(CallReceipt {
                id: "CA42".to_string(),
                status: "queued".to_string(),
            })
        }
    }

    fn tool_with(operator: &str) -> (ConnectAgentTool, Arc<StubMailer>) {
        let mailer = Arc::new(StubMailer::default());
        let service = Arc::new(HandoffService::new(
            mailer.clone(),
            Arc::new(StubDialer),
            operator,
            "New lead waiting.",
        ));
        (ConnectAgentTool::new(service), mailer)
    }

    #[tokio::test]
    async fn test_connect_agent_success_message() {
        let (tool, mailer) = tool_with("+918239794674");

        let mut params = HashMap::new();
        params.insert(
            "chat_history".to_string(),
            json!([
                {"role": "user", "content": "call me on 9876543210"},
                "ok, connecting you now",
            ]),
        );

        let result = tool.execute(params).await;
        assert_eq!(
            result,
            "Successfully sent the chat history and initiated a call to +918239794674. Call ID: CA42, status: queued."
        );

        let bodies = mailer.bodies.lock().unwrap();
        assert!(bodies[0].contains("+919876543210"));
        assert!(bodies[0].contains("call me on 9876543210\nok, connecting you now"));
    }

    #[tokio::test]
    async fn test_connect_agent_tolerates_missing_history() {
        let (tool, mailer) = tool_with("+918239794674");

        let result = tool.execute(HashMap::new()).await;
        assert!(result.starts_with("Successfully sent the chat history"));
        assert!(mailer.bodies.lock().unwrap()[0].contains("No transcript captured."));
    }

    #[tokio::test]
    async fn test_connect_agent_string_history() {
        let (tool, mailer) = tool_with("+918239794674");

        let mut params = HashMap::new();
        params.insert(
            "chat_history".to_string(),
            json!("user: my number is 09123456780"),
        );

        let result = tool.execute(params).await;
        assert!(result.starts_with("Successfully sent the chat history"));
        assert!(mailer.bodies.lock().unwrap()[0].contains("+919123456780"));
    }

    #[tokio::test]
    async fn test_connect_agent_reports_failure() {
        let (tool, _mailer) = tool_with("");

        let mut params = HashMap::new();
        params.insert("chat_history".to_string(), json!(["hello"]));

        assert_eq!(
            tool.execute(params).await,
            "An error occurred: no operator number configured"
        );
    }
}
