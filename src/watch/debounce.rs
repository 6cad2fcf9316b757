// src/watch/debounce.rs

//! Pure debounce state machine.
//!
//! Editors often emit several write events per save. Rapid repeated changes
//! covered by the same binding coalesce into a single firing once the
//! binding's quiet window elapses.
//!
//! This is deliberately a synchronous, deterministic core: the async
//! controller feeds it clock instants, so tests can drive it with synthetic
//! times and events.

use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    /// Binding index -> deadline at which that binding fires.
    pending: HashMap<usize, Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: HashMap::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a change for a binding, restarting its quiet window.
    pub fn record(&mut self, binding: usize, now: Instant) {
        self.pending.insert(binding, now + self.window);
    }

    /// Earliest pending deadline, if anything is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().min().copied()
    }

    /// Drain bindings whose quiet window has elapsed, in index order for
    /// deterministic firing.
    pub fn take_due(&mut self, now: Instant) -> Vec<usize> {
        let mut due: Vec<usize> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(binding, _)| *binding)
            .collect();

        for binding in &due {
            self.pending.remove(binding);
        }

        due.sort_unstable();
        due
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
