use std::time::{Duration, Instant};

/// Quiet period before a deferred save dispatches; reset on every save
pub const DEBOUNCE_WINDOW: Duration = Duration::from_secs(1);

/// Upper bound on how long continuous edits can keep a save pending
pub const FLUSH_INTERVAL: Duration = Duration::from_secs(30);

/// What the caller should do with a save request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveDecision {
    /// Serialize a snapshot and push it now
    Dispatch,
    /// A deferred push is pending; `poll` will fire it later
    Defer,
}

/// Pure write-scheduling state machine for the remote leg. Driven by
/// injected `Instant`s so the 1 s window and 30 s flush rule are testable
/// without timers. The cache leg never goes through here — it is written
/// synchronously on every save.
#[derive(Debug, Default)]
pub struct Debounce {
    /// When the oldest un-pushed save was requested
    pending_since: Option<Instant>,
    /// Trailing edge of the debounce window
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new() -> Self {
        Debounce::default()
    }

    pub fn has_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// Record a save request. Repeated calls within the window collapse
    /// into one dispatch (the deadline resets each time); `immediate`
    /// bypasses the window and also absorbs any pending deferred save.
    pub fn record(&mut self, now: Instant, immediate: bool) -> SaveDecision {
        if immediate {
            self.clear();
            return SaveDecision::Dispatch;
        }
        if self.pending_since.is_none() {
            self.pending_since = Some(now);
        }
        self.deadline = Some(now + DEBOUNCE_WINDOW);
        SaveDecision::Defer
    }

    /// Returns true when a deferred save should dispatch: either the quiet
    /// period elapsed, or edits have kept the save pending past the flush
    /// interval. Clears the pending state on dispatch.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(since) = self.pending_since else {
            return false;
        };
        let window_elapsed = self.deadline.is_some_and(|d| now >= d);
        let flush_due = now.duration_since(since) >= FLUSH_INTERVAL;
        if window_elapsed || flush_due {
            self.clear();
            return true;
        }
        false
    }

    fn clear(&mut self) {
        self.pending_since = None;
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_collapses_into_one_dispatch() {
        let mut debounce = Debounce::new();
        let start = Instant::now();
        for i in 0..5 {
            let at = start + Duration::from_millis(i * 100);
            assert_eq!(debounce.record(at, false), SaveDecision::Defer);
            assert!(!debounce.poll(at));
        }
        // Quiet period after the last save in the burst
        let later = start + Duration::from_millis(400) + DEBOUNCE_WINDOW;
        assert!(debounce.poll(later));
        // Exactly one dispatch: polling again yields nothing
        assert!(!debounce.poll(later + Duration::from_secs(5)));
    }

    #[test]
    fn each_save_resets_the_window() {
        let mut debounce = Debounce::new();
        let start = Instant::now();
        debounce.record(start, false);
        let second = start + Duration::from_millis(900);
        debounce.record(second, false);
        // 1 s after the first save, but only 100 ms after the second
        assert!(!debounce.poll(start + DEBOUNCE_WINDOW));
        assert!(debounce.poll(second + DEBOUNCE_WINDOW));
    }

    #[test]
    fn immediate_bypasses_pending_timer() {
        let mut debounce = Debounce::new();
        let start = Instant::now();
        debounce.record(start, false);
        assert_eq!(debounce.record(start, true), SaveDecision::Dispatch);
        // The pending deferred save was absorbed by the immediate one
        assert!(!debounce.has_pending());
        assert!(!debounce.poll(start + DEBOUNCE_WINDOW));
    }

    #[test]
    fn continuous_edits_hit_the_flush_interval() {
        let mut debounce = Debounce::new();
        let start = Instant::now();
        // An edit every 500 ms forever keeps resetting the window
        let mut at = start;
        let mut dispatched = None;
        for i in 0..70 {
            at = start + Duration::from_millis(i * 500);
            debounce.record(at, false);
            if debounce.poll(at) {
                dispatched = Some(at);
                break;
            }
        }
        // The 30 s rule fired even though no quiet period ever elapsed
        let at = dispatched.expect("flush interval should have fired");
        assert!(at.duration_since(start) >= FLUSH_INTERVAL);
        assert!(at.duration_since(start) < FLUSH_INTERVAL + Duration::from_secs(1));
    }

    #[test]
    fn idle_machine_never_dispatches() {
        let mut debounce = Debounce::new();
        assert!(!debounce.poll(Instant::now() + Duration::from_secs(120)));
    }
}
