use std::fmt;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyMethod {
    Email,
    Viber,
}

impl NotifyMethod {
    pub fn parse(value: &str) -> Result<Self, ApiError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(NotifyMethod::Email),
            "viber" => Ok(NotifyMethod::Viber),
            _ => Err(ApiError::InvalidNotifyType),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotifyMethod::Email => "email",
            NotifyMethod::Viber => "viber",
        }
    }
}

impl fmt::Display for NotifyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Delivers a message to a recipient over the chosen channel.
pub trait Notifier: Send + Sync {
    fn send(&self, method: NotifyMethod, recipient: &str, body: &str) -> Result<(), NotifyError>;
}

/// Simulated delivery: the message is written to the log instead of sent.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn send(&self, method: NotifyMethod, recipient: &str, body: &str) -> Result<(), NotifyError> {
        match method {
            NotifyMethod::Email => info!("Sending email to {}:\n{}", recipient, body),
            NotifyMethod::Viber => info!("Sending Viber message to {}:\n{}", recipient, body),
        }
        Ok(())
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub struct SentMessage {
        pub method: NotifyMethod,
        pub recipient: String,
        pub body: String,
    }

    /// Keeps every message in memory; optionally fails every send.
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub sent: Mutex<Vec<SentMessage>>,
        pub fail: bool,
    }

    impl RecordingNotifier {
        pub fn failing() -> Self {
            RecordingNotifier {
                sent: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        pub fn messages(&self) -> Vec<SentMessage> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn send(&self, method: NotifyMethod, recipient: &str, body: &str) -> Result<(), NotifyError> {
            if self.fail {
                return Err(NotifyError::Delivery("gateway unavailable".into()));
            }
            self.sent.lock().unwrap().push(SentMessage {
                method,
                recipient: recipient.to_string(),
                body: body.to_string(),
            });
            Ok(())
        }
    }
}
