//! Timer-free pipeline stages.
//!
//! The quiet-period gate needs a clock and lives in the driver loop in
//! [`pipeline`](crate::pipeline). The other two stages are plain state
//! machines kept here so they can be tested on their own.

/// Monotonically increasing dispatch counter.
pub type Generation = u64;

/// Drops a settled value identical to the previously surfaced one.
///
/// Comparison is on the raw value, before trimming.
#[derive(Debug, Default)]
pub struct ChangeFilter {
    last: Option<String>,
}

impl ChangeFilter {
    /// Returns `true` if `term` differs from the last admitted value, and
    /// remembers it.
    pub fn admit(&mut self, term: &str) -> bool {
        if self.last.as_deref() == Some(term) {
            return false;
        }
        self.last = Some(term.to_string());
        true
    }
}

/// Latest-wins bookkeeping.
///
/// Each surfaced term takes a new [`Generation`]. A lookup result is
/// accepted only if it belongs to the newest generation and nothing has
/// been accepted for that generation yet; everything else is stale.
#[derive(Debug, Default)]
pub struct LatestWins {
    current: Generation,
    awaiting: Option<Generation>,
}

impl LatestWins {
    /// Start a new lookup, superseding any in flight.
    pub fn dispatch(&mut self) -> Generation {
        self.current += 1;
        self.awaiting = Some(self.current);
        self.current
    }

    /// Supersede any in-flight lookup with a result that needs no lookup.
    pub fn supersede(&mut self) {
        self.current += 1;
        self.awaiting = None;
    }

    /// Whether a result for `generation` should be surfaced.
    pub fn accept(&mut self, generation: Generation) -> bool {
        if self.awaiting == Some(generation) {
            self.awaiting = None;
            true
        } else {
            false
        }
    }

    /// No lookup result is outstanding.
    pub fn is_idle(&self) -> bool {
        self.awaiting.is_none()
    }

    pub fn current(&self) -> Generation {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_filter_drops_consecutive_duplicates() {
        let mut filter = ChangeFilter::default();
        assert!(filter.admit("bat"));
        assert!(!filter.admit("bat"));
        assert!(filter.admit("batman"));
        assert!(filter.admit("bat"));
    }

    #[test]
    fn change_filter_compares_untrimmed() {
        let mut filter = ChangeFilter::default();
        assert!(filter.admit("bat"));
        assert!(filter.admit("bat "));
    }

    #[test]
    fn newest_generation_wins() {
        let mut latest = LatestWins::default();
        let a = latest.dispatch();
        let b = latest.dispatch();

        assert!(!latest.accept(a));
        assert!(latest.accept(b));
        assert!(latest.is_idle());
    }

    #[test]
    fn result_is_accepted_once() {
        let mut latest = LatestWins::default();
        let a = latest.dispatch();
        assert!(latest.accept(a));
        assert!(!latest.accept(a));
    }

    #[test]
    fn supersede_discards_in_flight() {
        let mut latest = LatestWins::default();
        let a = latest.dispatch();
        latest.supersede();

        assert!(latest.is_idle());
        assert!(!latest.accept(a));
        assert_eq!(latest.current(), 2);
    }
}
