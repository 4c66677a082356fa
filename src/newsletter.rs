//! Simulated newsletter signup.

use std::time::Duration;
use thiserror::Error;
use tracing::{info, instrument};

pub const THANK_YOU_MESSAGE: &str = "Děkujeme za přihlášení k odběru novinek!";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NewsletterError {
    #[error("Invalid email address: {0:?}")]
    InvalidEmail(String),
}

/// Accepts signups after a fixed delay. Nothing is stored or sent.
#[derive(Debug, Clone)]
pub struct Newsletter {
    delay: Duration,
}

impl Newsletter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    #[instrument(skip(self))]
    pub async fn subscribe(&self, email: &str) -> Result<String, NewsletterError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(NewsletterError::InvalidEmail(email.to_string()));
        }

        tokio::time::sleep(self.delay).await;
        info!(email, "Newsletter signup");
        Ok(THANK_YOU_MESSAGE.to_string())
    }
}
