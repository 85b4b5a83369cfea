//! Trailing-edge Debounce
//!
//! Timer-agnostic: the caller schedules one timer per `push` and hands the
//! ticket back to `settle` when it fires. Only the newest ticket settles.

/// Search boxes wait this long after the last keystroke
pub const DEFAULT_DEBOUNCE_MS: u32 = 400;

/// Handle returned by [`Debouncer::push`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay_ms: u32,
    generation: u64,
    pending: Option<T>,
}

impl<T: Clone> Debouncer<T> {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            generation: 0,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Record a new input value. Any earlier ticket becomes stale.
    pub fn push(&mut self, value: T) -> DebounceTicket {
        self.generation += 1;
        self.pending = Some(value);
        DebounceTicket(self.generation)
    }

    /// Called when the timer for `ticket` fires.
    ///
    /// Returns the value only if nothing was pushed since `ticket`.
    pub fn settle(&mut self, ticket: DebounceTicket) -> Option<T> {
        if ticket.0 != self.generation {
            return None;
        }
        self.pending.take()
    }

    /// Drop the pending value; outstanding tickets never settle.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T: Clone> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_last_push_settles() {
        let mut d = Debouncer::new(300);
        let first = d.push("ad".to_string());
        let second = d.push("adm".to_string());

        assert_eq!(d.settle(first), None);
        assert_eq!(d.settle(second), Some("adm".to_string()));
        // settles once
        assert_eq!(d.settle(second), None);
    }

    #[test]
    fn test_cancel_invalidates_ticket() {
        let mut d = Debouncer::new(300);
        let t = d.push(1);
        d.cancel();
        assert!(!d.is_pending());
        assert_eq!(d.settle(t), None);
    }

    #[test]
    fn test_keystrokes_inside_window_make_one_call() {
        let mut d = Debouncer::new(DEFAULT_DEBOUNCE_MS);
        let tickets: Vec<_> = ["r", "ro", "rol"].iter().map(|t| d.push(t.to_string())).collect();

        // timers fire in scheduling order once typing stops
        let calls: Vec<String> = tickets.into_iter().filter_map(|t| d.settle(t)).collect();
        assert_eq!(calls, vec!["rol".to_string()]);
    }
}
