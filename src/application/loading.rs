//! Scoped loading indicator.
//!
//! The flag is raised by [`LoadingFlag::acquire`] and lowered when the
//! returned [`LoadingGuard`] is dropped. The guard travels with the city
//! request into the fetch task and back inside the outcome, so success,
//! failure, abort, or a result that is never delivered all end with the
//! flag lowered.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, Default)]
pub struct LoadingFlag {
    holders: Arc<AtomicUsize>,
}

impl LoadingFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.holders.load(Ordering::Acquire) > 0
    }

    #[must_use = "the flag is lowered as soon as the guard is dropped"]
    pub fn acquire(&self) -> LoadingGuard {
        self.holders.fetch_add(1, Ordering::AcqRel);
        LoadingGuard {
            holders: Arc::clone(&self.holders),
        }
    }
}

#[derive(Debug)]
pub struct LoadingGuard {
    holders: Arc<AtomicUsize>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.holders.fetch_sub(1, Ordering::AcqRel);
    }
}
