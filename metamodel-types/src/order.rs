//! Declaration order sequencing.
//!
//! YAML mappings end up in name-keyed maps, which lose the order members were
//! written in. Each decoded member instead receives a number from an
//! [`OrderSequencer`] at the moment it is visited.
//!
//! Which sequencer a decode pass uses is the caller's choice:
//! - [`global`] is shared by the whole process and never resets on its own, so
//!   numbers keep increasing across documents.
//! - A locally owned `OrderSequencer` scopes numbering to whatever the caller
//!   decodes with it (typically one document).

use std::sync::atomic::{AtomicI32, Ordering};

/// Monotonic counter handing out declaration order numbers.
#[derive(Debug, Default)]
pub struct OrderSequencer {
    last: AtomicI32,
}

impl OrderSequencer {
    /// A fresh sequencer; its first number is `1`.
    pub const fn new() -> Self {
        Self {
            last: AtomicI32::new(0),
        }
    }

    /// A sequencer whose next number is `last + 1`.
    pub const fn starting_after(last: i32) -> Self {
        Self {
            last: AtomicI32::new(last),
        }
    }

    /// Draw the next number.
    pub fn next(&self) -> i32 {
        // Relaxed: only uniqueness and per-thread monotonicity are required.
        self.last.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// The most recently drawn number (`0` if none), without advancing.
    pub fn current(&self) -> i32 {
        self.last.load(Ordering::Relaxed)
    }

    /// Restart numbering so the next number is `1`.
    pub fn reset(&self) {
        self.last.store(0, Ordering::Relaxed);
    }
}

static GLOBAL: OrderSequencer = OrderSequencer::new();

/// The process-wide sequencer.
pub fn global() -> &'static OrderSequencer {
    &GLOBAL
}
