use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::form::Notifier;

struct Banner {
    message: String,
    dismiss_label: String,
    expires_at: Instant,
}

/// Notification shown at the bottom of the form until it expires.
#[derive(Clone, Default)]
pub struct StatusBanner {
    current: Arc<Mutex<Option<Banner>>>,
}

impl StatusBanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Message and dismiss label of the banner, if one is still showing.
    pub fn visible(&self) -> Option<(String, String)> {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if current
            .as_ref()
            .is_some_and(|banner| banner.expires_at <= Instant::now())
        {
            *current = None;
        }

        current
            .as_ref()
            .map(|banner| (banner.message.clone(), banner.dismiss_label.clone()))
    }

    pub fn dismiss(&self) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl Notifier for StatusBanner {
    fn show(&self, message: &str, dismiss_label: &str, duration: Duration) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(Banner {
            message: message.to_string(),
            dismiss_label: dismiss_label.to_string(),
            expires_at: Instant::now() + duration,
        });
    }
}
