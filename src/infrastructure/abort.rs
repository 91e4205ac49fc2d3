//! Cooperative cancellation for in-flight requests.
//!
//! Every network call receives an [`AbortToken`]. The call races its request
//! against [`AbortToken::aborted`], and whoever applies the result checks
//! [`AbortToken::is_aborted`] first, so a fetch that outlives the UI ends
//! as a no-op instead of touching state that is gone.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Inner {
    aborted: AtomicBool,
    notify: Notify,
    children: Mutex<Vec<Weak<Inner>>>,
}

impl Inner {
    fn abort(&self) {
        if self.aborted.swap(true, Ordering::AcqRel) {
            return;
        }
        self.notify.notify_waiters();

        let children = match self.children.lock() {
            Ok(mut children) => std::mem::take(&mut *children),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        for child in children.iter().filter_map(Weak::upgrade) {
            child.abort();
        }
    }
}

/// Clonable cancellation flag. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct AbortToken {
    inner: Arc<Inner>,
}

impl AbortToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a token that is aborted together with `self`, but can also
    /// be aborted on its own without affecting the parent.
    pub fn child(&self) -> Self {
        let child = Self::new();
        {
            let mut children = match self.inner.children.lock() {
                Ok(children) => children,
                Err(poisoned) => poisoned.into_inner(),
            };
            children.retain(|weak| weak.strong_count() > 0);
            children.push(Arc::downgrade(&child.inner));
        }
        // Parent may have been aborted before registration finished.
        if self.is_aborted() {
            child.abort();
        }
        child
    }

    pub fn abort(&self) {
        self.inner.abort();
    }

    pub fn is_aborted(&self) -> bool {
        self.inner.aborted.load(Ordering::Acquire)
    }

    /// Resolves once the token is aborted. Resolves immediately if it
    /// already was.
    pub async fn aborted(&self) {
        loop {
            let notified = self.inner.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.is_aborted() {
                return;
            }
            notified.await;
        }
    }
}
