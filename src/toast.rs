//! Transient user notifications.
//!
//! Each toast with a non-zero duration owns a timer task that removes it when
//! it elapses. Dismissing a toast first aborts that timer, so a timer never
//! outlives its entry.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use tokio::task::AbortHandle;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToastKind::Success => write!(f, "success"),
            ToastKind::Error => write!(f, "error"),
            ToastKind::Info => write!(f, "info"),
            ToastKind::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastMessage {
    pub id: String,
    pub message: String,
    pub kind: ToastKind,
}

struct Entry {
    toast: ToastMessage,
    timer: Option<AbortHandle>,
}

#[derive(Default)]
struct Inner {
    entries: Vec<Entry>,
    next_id: u64,
}

/// Ordered queue of live toasts. Cloning shares the same queue.
#[derive(Clone)]
pub struct ToastQueue {
    inner: Arc<Mutex<Inner>>,
    default_duration: Duration,
}

impl ToastQueue {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            default_duration,
        }
    }

    /// Append a toast with the queue's default duration and return its id.
    pub fn push(&self, message: impl Into<String>, kind: ToastKind) -> String {
        self.push_for(message, kind, self.default_duration)
    }

    /// Append a toast that expires after `duration`. `Duration::ZERO` keeps it
    /// until [`dismiss`](Self::dismiss) is called.
    ///
    /// A non-zero duration spawns a timer, so this must run inside a tokio runtime.
    pub fn push_for(&self, message: impl Into<String>, kind: ToastKind, duration: Duration) -> String {
        let mut inner = lock(&self.inner);
        inner.next_id += 1;
        let id = format!("toast-{}", inner.next_id);

        let timer = (!duration.is_zero())
            .then(|| spawn_expiry(Arc::downgrade(&self.inner), id.clone(), duration));

        let toast = ToastMessage {
            id: id.clone(),
            message: message.into(),
            kind,
        };
        debug!(id = %id, kind = %kind, ?duration, "toast pushed");
        inner.entries.push(Entry { toast, timer });
        id
    }

    /// Remove the toast with `id`. Unknown ids are ignored.
    pub fn dismiss(&self, id: &str) {
        if let Some(entry) = remove_entry(&self.inner, id) {
            if let Some(timer) = entry.timer {
                timer.abort();
            }
            debug!(id = %id, "toast dismissed");
        }
    }

    /// Live toasts in insertion order.
    pub fn snapshot(&self) -> Vec<ToastMessage> {
        lock(&self.inner)
            .entries
            .iter()
            .map(|e| e.toast.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        lock(&self.inner).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(test)]
    fn timer(&self, id: &str) -> Option<AbortHandle> {
        lock(&self.inner)
            .entries
            .iter()
            .find(|e| e.toast.id == id)
            .and_then(|e| e.timer.clone())
    }
}

fn spawn_expiry(queue: Weak<Mutex<Inner>>, id: String, duration: Duration) -> AbortHandle {
    tokio::spawn(async move {
        tokio::time::sleep(duration).await;
        if let Some(queue) = queue.upgrade() {
            if remove_entry(&queue, &id).is_some() {
                debug!(id = %id, "toast expired");
            }
        }
    })
    .abort_handle()
}

fn remove_entry(inner: &Mutex<Inner>, id: &str) -> Option<Entry> {
    let mut inner = lock(inner);
    let pos = inner.entries.iter().position(|e| e.toast.id == id)?;
    Some(inner.entries.remove(pos))
}

// Toast bookkeeping never panics while holding the lock, but recover anyway.
fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
