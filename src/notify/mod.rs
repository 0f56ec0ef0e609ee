/// Delivery of composed messages to chat destinations
pub mod telegram;

pub use telegram::TelegramNotifier;

use tracing::{info, warn};

/// A message delivery failure
#[derive(Debug)]
pub enum NotifyError {
    Http(reqwest::Error),
    Api(String),
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifyError::Http(e) => write!(f, "HTTP request failed: {}", e),
            NotifyError::Api(description) => write!(f, "Telegram API error: {}", description),
        }
    }
}

impl std::error::Error for NotifyError {}

impl From<reqwest::Error> for NotifyError {
    fn from(e: reqwest::Error) -> Self {
        NotifyError::Http(e)
    }
}

/// Trait at the delivery seam, so tests can substitute a recording sink
#[async_trait::async_trait]
pub trait Messenger: Send + Sync {
    /// Deliver a text message to a single chat destination
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), NotifyError>;
}

/// Outcome of one destination's delivery attempt
#[derive(Debug)]
pub struct DeliveryReport {
    pub chat_id: String,
    pub error: Option<NotifyError>,
}

impl DeliveryReport {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Deliver a run's composed text to every destination, in order.
///
/// Best-effort: a failed destination is logged and recorded, and the
/// remaining destinations still get their send. `text` is `None` when the
/// filter matched nothing; no send is attempted then.
pub async fn deliver_run(
    messenger: &dyn Messenger,
    chat_ids: &[String],
    text: Option<&str>,
) -> Vec<DeliveryReport> {
    let Some(text) = text else {
        return Vec::new();
    };

    let mut reports = Vec::with_capacity(chat_ids.len());
    for chat_id in chat_ids {
        let result = messenger.send_message(chat_id, text).await;
        match &result {
            Ok(()) => info!(chat_id = %chat_id, "Message delivered"),
            Err(e) => warn!(chat_id = %chat_id, error = %e, "Message delivery failed"),
        }
        reports.push(DeliveryReport {
            chat_id: chat_id.clone(),
            error: result.err(),
        });
    }
    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records sends and fails for chat ids listed in `failing`
    struct RecordingMessenger {
        sent: Mutex<Vec<(String, String)>>,
        failing: Vec<String>,
    }

    impl RecordingMessenger {
        fn new(failing: &[&str]) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                failing: failing.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    #[async_trait::async_trait]
    impl Messenger for RecordingMessenger {
        async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), NotifyError> {
            self.sent
                .lock()
                .unwrap()
                .push((chat_id.to_string(), text.to_string()));
            if self.failing.iter().any(|id| id == chat_id) {
                return Err(NotifyError::Api("chat not found".to_string()));
            }
            Ok(())
        }
    }

    fn chat_ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_deliver_run_sends_to_each_destination_in_order() {
        let messenger = RecordingMessenger::new(&[]);
        let reports = deliver_run(&messenger, &chat_ids(&["1", "2", "3"]), Some("hello")).await;

        assert_eq!(reports.len(), 3);
        assert!(reports.iter().all(DeliveryReport::succeeded));

        let sent = messenger.sent.lock().unwrap();
        let order: Vec<&str> = sent.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, vec!["1", "2", "3"]);
        assert!(sent.iter().all(|(_, text)| text == "hello"));
    }

    #[tokio::test]
    async fn test_deliver_run_continues_after_a_failure() {
        let messenger = RecordingMessenger::new(&["2"]);
        let reports = deliver_run(&messenger, &chat_ids(&["1", "2", "3"]), Some("hi")).await;

        // All three destinations were attempted
        assert_eq!(messenger.sent.lock().unwrap().len(), 3);

        assert!(reports[0].succeeded());
        assert!(!reports[1].succeeded());
        assert_eq!(reports[1].chat_id, "2");
        assert!(reports[2].succeeded());
    }

    #[tokio::test]
    async fn test_deliver_run_without_text_sends_nothing() {
        let messenger = RecordingMessenger::new(&[]);
        let reports = deliver_run(&messenger, &chat_ids(&["1", "2"]), None).await;

        assert!(reports.is_empty());
        assert!(messenger.sent.lock().unwrap().is_empty());
    }
}
