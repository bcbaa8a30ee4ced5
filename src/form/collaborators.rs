use std::time::Duration;

use async_trait::async_trait;

/// What the operator is asked before a status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    pub message: String,
    pub subject_label: String,
    pub action_label: String,
}

#[async_trait]
pub trait Confirmation: Send + Sync {
    /// `Some(true)` confirms; `Some(false)` declines; `None` means the prompt
    /// was dismissed without an answer.
    async fn confirm(&self, prompt: ConfirmationPrompt) -> Option<bool>;
}

/// Short-lived operator notifications. Fire and forget.
pub trait Notifier: Send + Sync {
    fn show(&self, message: &str, dismiss_label: &str, duration: Duration);
}
