//! Re-armable inactivity countdown.
//!
//! DESIGN
//! ======
//! The timer only tracks a deadline; the browser driver in
//! [`crate::util::idle_watch`] turns it into a single pending timeout that is
//! replaced on every interaction. Keeping the arithmetic here lets the
//! expiry rules be tested with plain integers.

#[cfg(test)]
#[path = "idle_test.rs"]
mod idle_test;

/// What a timeout callback should do when it wakes up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// The window elapsed; sign out.
    Expired,
    /// Woke early (activity moved the deadline, or the host timer ran
    /// short). Schedule again after this many milliseconds.
    Wait(i64),
    /// Disarmed meanwhile; nothing to do.
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdleTimer {
    window_ms: i64,
    deadline: Option<i64>,
}

impl IdleTimer {
    #[must_use]
    pub fn new(window_ms: i64) -> Self {
        Self { window_ms, deadline: None }
    }

    /// Start (or restart) the countdown from `now_ms`.
    pub fn arm(&mut self, now_ms: i64) {
        self.deadline = Some(now_ms.saturating_add(self.window_ms));
    }

    /// Start the countdown from the last recorded activity, so a reload
    /// does not grant a fresh window. Activity stamped in the future
    /// (clock skew) counts as now.
    pub fn arm_from(&mut self, last_active_ms: Option<i64>, now_ms: i64) {
        self.arm(last_active_ms.map_or(now_ms, |t| t.min(now_ms)));
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Push the deadline out after an interaction. Ignored while disarmed.
    pub fn touch(&mut self, now_ms: i64) -> bool {
        if self.deadline.is_none() {
            return false;
        }
        self.arm(now_ms);
        true
    }

    /// Milliseconds left before expiry, if armed.
    #[must_use]
    pub fn remaining_ms(&self, now_ms: i64) -> Option<i64> {
        self.deadline.map(|d| d.saturating_sub(now_ms).max(0))
    }

    /// Whether the countdown ran out. Returns `true` at most once per arming:
    /// an expired timer disarms itself.
    pub fn poll(&mut self, now_ms: i64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Decide what a fired timeout does: expire, wait again, or stop.
    pub fn on_timeout(&mut self, now_ms: i64) -> Tick {
        if self.poll(now_ms) {
            return Tick::Expired;
        }
        match self.remaining_ms(now_ms) {
            Some(remaining) => Tick::Wait(remaining),
            None => Tick::Stopped,
        }
    }
}
