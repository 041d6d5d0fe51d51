//! Bounded, shared comment log.
//!
//! The store owns its sequence behind a single mutex. Writers prepend,
//! readers get a cloned snapshot; nobody outside the lock ever sees the
//! live `VecDeque`.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

/// Upper bound on the number of comments kept in the log.
pub const MAX_COMMENTS: usize = 200;

/// A submitted comment. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    author: String,
    text: String,
    submitted_at: DateTime<Utc>,
}

impl Comment {
    /// Create a comment stamped with the current time.
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            submitted_at: Utc::now(),
        }
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// RFC 3339 timestamp with millisecond precision, e.g.
    /// `2025-03-01T12:00:00.123Z`. Contains no HTML-significant characters.
    pub fn submitted_at_display(&self) -> String {
        self.submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Newest-first log of at most [`MAX_COMMENTS`] comments.
#[derive(Debug, Default)]
pub struct CommentStore {
    log: Mutex<VecDeque<Comment>>,
}

impl CommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A poisoned lock still guards a structurally valid deque, so recover
    /// the guard instead of propagating the panic to every later request.
    fn lock(&self) -> MutexGuard<'_, VecDeque<Comment>> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Prepend a comment, evicting from the tail past [`MAX_COMMENTS`].
    pub fn add(&self, comment: Comment) {
        let mut log = self.lock();
        log.push_front(comment);
        let mut evicted = 0usize;
        while log.len() > MAX_COMMENTS {
            log.pop_back();
            evicted += 1;
        }
        if evicted > 0 {
            debug!(evicted, len = log.len(), "comment log trimmed");
        }
    }

    /// Snapshot of the log, newest first.
    pub fn recent(&self) -> Vec<Comment> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
