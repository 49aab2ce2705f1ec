//! Transient toast notifications that dismiss themselves

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// A message currently on screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    pub id: u64,
}

struct NotifierInner {
    sender: watch::Sender<Option<Toast>>,
    next_id: AtomicU64,
    dismiss: Mutex<Option<JoinHandle<()>>>,
    lifetime: Duration,
}

/// Shows one toast at a time; a new toast replaces the old one and restarts the timer
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<NotifierInner>,
}

impl Notifier {
    pub const DEFAULT_LIFETIME: Duration = Duration::from_millis(3000);

    pub fn new() -> Self {
        Self::with_lifetime(Self::DEFAULT_LIFETIME)
    }

    pub fn with_lifetime(lifetime: Duration) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            inner: Arc::new(NotifierInner {
                sender,
                next_id: AtomicU64::new(0),
                dismiss: Mutex::new(None),
                lifetime,
            }),
        }
    }

    /// Show `message`, cancelling the dismiss timer of any earlier toast.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&self, message: impl Into<String>) {
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let toast = Toast {
            message: message.into(),
            id,
        };
        tracing::debug!(id, message = %toast.message, "toast shown");
        self.inner.sender.send_replace(Some(toast));

        let inner = self.inner.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(inner.lifetime).await;
            inner.sender.send_if_modified(|current| match current {
                Some(toast) if toast.id == id => {
                    *current = None;
                    true
                }
                _ => false,
            });
        });

        let previous = self
            .inner
            .dismiss
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(timer);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Hide the current toast right away
    pub fn dismiss(&self) {
        if let Some(timer) = self
            .inner
            .dismiss
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            timer.abort();
        }
        self.inner.sender.send_replace(None);
    }

    pub fn current(&self) -> Option<Toast> {
        self.inner.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Toast>> {
        self.inner.sender.subscribe()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
