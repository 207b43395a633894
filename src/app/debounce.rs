//! Search input debouncing.
//!
//! The debouncer does not own a timer. Every input returns a
//! [`DebounceTicket`]; the runtime waits `delay` and reports the ticket's
//! generation back through [`Debouncer::elapsed`]. Only the newest generation
//! can commit, which collapses a burst of keystrokes into one emission of
//! the last value.

use std::time::Duration;

/// Quiet period before a search value is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(700);

/// A pending timer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket {
    pub generation: u64,
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: u64,
    pending: Option<String>,
    committed: String,
}

impl Debouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
            committed: String::new(),
        }
    }

    /// An empty debouncer for a newly mounted route.
    ///
    /// Generations keep counting from `self`, so a tick scheduled before the
    /// switch can never match input made after it.
    #[must_use]
    pub fn restart(&self) -> Self {
        Self {
            delay: self.delay,
            generation: self.generation,
            pending: None,
            committed: String::new(),
        }
    }

    /// The last committed value.
    #[must_use]
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// The latest input not yet committed, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Records a new input value and supersedes every earlier ticket.
    pub fn input(&mut self, value: impl Into<String>) -> DebounceTicket {
        self.generation += 1;
        self.pending = Some(value.into());
        DebounceTicket {
            generation: self.generation,
            delay: self.delay,
        }
    }

    /// Reports that the quiet period of `generation` has passed.
    ///
    /// Returns the newly committed value, or `None` when the ticket was
    /// superseded or the value equals what is already committed.
    pub fn elapsed(&mut self, generation: u64) -> Option<String> {
        if generation != self.generation {
            tracing::trace!(generation, latest = self.generation, "superseded debounce tick");
            return None;
        }
        let value = self.pending.take()?;
        if value == self.committed {
            return None;
        }
        self.committed.clone_from(&value);
        Some(value)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
