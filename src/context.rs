//! Toast Notifications
//!
//! User-visible messages raised by list operations. Every toast is also
//! logged.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

/// Shared toast queue; clones push to the same queue
#[derive(Clone, Default)]
pub struct Toasts {
    queue: Arc<Mutex<Vec<Toast>>>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastLevel::Info, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message.into());
    }

    fn push(&self, level: ToastLevel, message: String) {
        match level {
            ToastLevel::Error => log::error!("{}", message),
            _ => log::info!("{}", message),
        }
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Toast { level, message });
    }

    /// Take all pending toasts, oldest first
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.queue.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn latest(&self) -> Option<Toast> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_queue() {
        let toasts = Toasts::new();
        let handle = toasts.clone();
        handle.error("Failed to save order");
        toasts.success("Order saved");

        assert_eq!(toasts.latest().map(|t| t.level), Some(ToastLevel::Success));
        let drained = handle.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].level, ToastLevel::Error);
        assert!(toasts.drain().is_empty());
    }
}
