//! Transient cart notices
//!
//! A [`Toast`] holds at most one message that clears itself after a delay.
//! The delay runs on a one-shot tokio task which is aborted when a new message
//! replaces it or when the toast is dropped along with its session.

use std::{sync::Arc, time::Duration};
use tokio::{sync::watch, task::JoinHandle};

/// Message shown after a successful add
pub const ADDED_TO_CART: &str = "Item added to cart!";

pub struct Toast {
    message: Arc<watch::Sender<Option<String>>>,
    timer: Option<JoinHandle<()>>,
}

impl Default for Toast {
    fn default() -> Self {
        Self::new()
    }
}

impl Toast {
    pub fn new() -> Self {
        let (message, _) = watch::channel(None);
        Self {
            message: Arc::new(message),
            timer: None,
        }
    }

    /// Shows `message` for `duration`, replacing any message still showing.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&mut self, message: impl Into<String>, duration: Duration) {
        self.cancel_timer();
        self.message.send_replace(Some(message.into()));

        let slot = Arc::clone(&self.message);
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            slot.send_replace(None);
        }));
    }

    pub fn current(&self) -> Option<String> {
        self.message.borrow().clone()
    }

    /// Stops the pending expiry, if any. The current message stays as is.
    pub fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for Toast {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
