//! Pacing of keystroke-driven search input.
//!
//! This module provides:
//! - A debouncer that lets only the last of a burst of calls through
//! - A search input wrapper that debounces and sanitizes, with an immediate clear
//! - A sequencer for discarding responses to superseded requests

use crate::config::Config;
use crate::constants::DEFAULT_DEBOUNCE;
use crate::security::Sanitizer;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// Trailing-edge debouncer.
///
/// Clones share state, so a call through one clone supersedes pending calls
/// made through any other.
#[derive(Debug, Clone)]
pub struct Debouncer {
    /// Quiet period required before a call settles.
    wait: Duration,

    /// Incremented by every call and cancellation.
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet period.
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Quiet period required before a call settles.
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Wait out the quiet period.
    ///
    /// Returns `Some(value)` if no other call or cancellation happened in
    /// the meantime, `None` otherwise.
    pub async fn settle<T>(&self, value: T) -> Option<T> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.wait).await;

        if self.generation.load(Ordering::SeqCst) == ticket {
            Some(value)
        } else {
            trace!("Debounced call superseded");
            None
        }
    }

    /// Invalidate every pending call.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

/// Debounced, sanitized search field input.
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    debouncer: Debouncer,
    sanitizer: Sanitizer,
}

impl SearchInput {
    /// Pair a debouncer with a sanitizer.
    pub fn new(debouncer: Debouncer, sanitizer: Sanitizer) -> Self {
        Self {
            debouncer,
            sanitizer,
        }
    }

    /// Build from the configured debounce delay and query length limit.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Debouncer::new(config.search.debounce),
            Sanitizer::from_config(&config.sanitizer),
        )
    }

    /// Handle an edit. Resolves to the sanitized text once typing pauses, or
    /// `None` if a later edit or a clear superseded this one.
    pub async fn edit(&self, raw: &str) -> Option<String> {
        let raw = self.debouncer.settle(raw).await?;
        Some(self.sanitizer.sanitize(Some(raw)))
    }

    /// Clear the field: cancel pending edits and return the empty query
    /// right away, without waiting for the debounce.
    pub fn clear(&self) -> String {
        self.debouncer.cancel();
        self.sanitizer.sanitize(None)
    }
}

/// Ticket identifying one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Tracks which request is the most recent so stale responses can be dropped.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    /// Create a sequencer with no tickets issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new request, superseding all earlier tickets.
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` belongs to the most recently issued request.
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
