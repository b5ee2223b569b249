use async_trait::async_trait;
use parking_lot::Mutex;

use carebook_scheduling::{EmailMessage, Mailer, NotifyError};

/// Mailer that records every message and can be told to fail.
#[derive(Default)]
pub struct RecordingMailer {
    fail: bool,
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mailer whose every send fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Messages handed to the mailer so far, including failed ones.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        self.sent.lock().push(message.clone());
        if self.fail {
            return Err(NotifyError::Delivery("recording mailer set to fail".into()));
        }
        Ok(())
    }
}
