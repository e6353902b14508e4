//! Request supersession for search-as-you-type and comparison fetches.
//!
//! Time is passed in by the caller (milliseconds from any monotonic origin), so
//! the state machine is the same in the browser and in tests. The browser side
//! only arms a timer for `next_due()` and calls `poll()` when it fires.

use serde::{Deserialize, Serialize};

pub type Millis = u64;

/// Monotonically increasing tag of a dispatched request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ticket(u64);

/// Issues tickets and tells whether a completed request is still the latest one.
#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    issued: u64,
    // Bumped by `invalidate` without issuing, so nothing in flight matches
    current: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> Ticket {
        self.issued = self.issued.max(self.current) + 1;
        self.current = self.issued;
        Ticket(self.issued)
    }

    /// Make every in-flight request stale
    pub fn invalidate(&mut self) {
        self.current = self.issued.max(self.current) + 1;
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.current
    }

    /// Pass the response through only when `ticket` is still authoritative
    pub fn accept<T>(&self, ticket: Ticket, response: T) -> Option<T> {
        if self.is_latest(ticket) {
            Some(response)
        } else {
            log::debug!(
                "Discarding stale response #{} (current #{})",
                ticket.0,
                self.current
            );
            None
        }
    }
}

/// Query released by the debouncer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub ticket: Ticket,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Timer (re)armed, query will be due at `due_at`
    Scheduled { due_at: Millis },
    /// Same text as before: the running timer is left alone
    Unchanged,
    /// Blank or too short: suggestions must be cleared right away
    Cleared,
}

/// Trailing-edge debounce with ticketed dispatch.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay_ms: Millis,
    min_len: usize,
    last_text: String,
    due_at: Option<Millis>,
    sequence: RequestSequence,
}

impl SearchDebouncer {
    pub fn new(delay_ms: Millis) -> Self {
        Self::with_min_len(delay_ms, 1)
    }

    pub fn with_min_len(delay_ms: Millis, min_len: usize) -> Self {
        Self {
            delay_ms,
            min_len: min_len.max(1),
            last_text: String::new(),
            due_at: None,
            sequence: RequestSequence::new(),
        }
    }

    pub fn delay_ms(&self) -> Millis {
        self.delay_ms
    }

    /// Feed the current input value
    pub fn on_input(&mut self, text: &str, now: Millis) -> InputOutcome {
        let text = text.trim();

        if text.chars().count() < self.min_len {
            self.last_text.clear();
            self.due_at = None;
            self.sequence.invalidate();
            return InputOutcome::Cleared;
        }

        if text == self.last_text {
            return InputOutcome::Unchanged;
        }

        self.last_text = text.to_string();
        let due_at = now.saturating_add(self.delay_ms);
        self.due_at = Some(due_at);
        InputOutcome::Scheduled { due_at }
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.due_at
    }

    /// Release the pending query if its delay has elapsed
    pub fn poll(&mut self, now: Millis) -> Option<SearchQuery> {
        match self.due_at {
            Some(due) if now >= due => {
                self.due_at = None;
                Some(SearchQuery {
                    ticket: self.sequence.issue(),
                    text: self.last_text.clone(),
                })
            }
            _ => None,
        }
    }

    /// Drop the pending query and make in-flight results stale
    pub fn cancel(&mut self) {
        self.due_at = None;
        self.last_text.clear();
        self.sequence.invalidate();
    }

    pub fn accept<T>(&self, ticket: Ticket, response: T) -> Option<T> {
        self.sequence.accept(ticket, response)
    }
}
