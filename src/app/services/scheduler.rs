//! Debounced auto-run.
//!
//! Each edit issues a ticket carrying the current generation. A timer fires
//! with its ticket after [`DEBOUNCE`]; only the ticket that still matches the
//! generation runs. A manual run or disabling auto-run bumps the generation,
//! which cancels every outstanding ticket.

use std::time::Duration;

use crate::app::domain::settings::AUTO_RUN_DELAY_MS;

pub const DEBOUNCE: Duration = Duration::from_millis(AUTO_RUN_DELAY_MS);

#[derive(Debug)]
pub struct RunScheduler {
    generation: u64,
    auto_run: bool,
}

impl RunScheduler {
    pub fn new(auto_run: bool) -> Self {
        Self {
            generation: 0,
            auto_run,
        }
    }

    pub fn auto_run(&self) -> bool {
        self.auto_run
    }

    /// Record an edit. Returns the ticket to fire after [`DEBOUNCE`], or
    /// `None` when auto-run is off.
    pub fn on_edit(&mut self) -> Option<u64> {
        if !self.auto_run {
            return None;
        }
        self.generation = self.generation.wrapping_add(1);
        Some(self.generation)
    }

    /// A debounce timer elapsed. Returns true if a run should happen now.
    pub fn on_timer(&mut self, ticket: u64) -> bool {
        if !self.auto_run || ticket != self.generation {
            return false;
        }
        // Consume the ticket so a duplicate timer cannot run twice.
        self.generation = self.generation.wrapping_add(1);
        true
    }

    /// A manual run is starting. Any pending auto-run is dropped.
    pub fn run_now(&mut self) {
        self.cancel();
    }

    pub fn set_auto_run(&mut self, enabled: bool) {
        if !enabled {
            self.cancel();
        }
        self.auto_run = enabled;
    }

    fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

impl Default for RunScheduler {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debounce_is_300ms() {
        assert_eq!(DEBOUNCE, Duration::from_millis(300));
    }

    #[test]
    fn test_burst_of_edits_runs_once() {
        let mut scheduler = RunScheduler::new(true);
        let tickets: Vec<u64> = (0..10).filter_map(|_| scheduler.on_edit()).collect();
        assert_eq!(tickets.len(), 10);

        let runs = tickets.iter().filter(|&&t| scheduler.on_timer(t)).count();
        assert_eq!(runs, 1);
    }

    #[test]
    fn test_only_last_ticket_runs() {
        let mut scheduler = RunScheduler::new(true);
        let first = scheduler.on_edit().unwrap();
        let last = scheduler.on_edit().unwrap();
        assert!(!scheduler.on_timer(first));
        assert!(scheduler.on_timer(last));
        assert!(!scheduler.on_timer(last));
    }

    #[test]
    fn test_auto_run_off_never_schedules() {
        let mut scheduler = RunScheduler::new(false);
        assert_eq!(scheduler.on_edit(), None);
        assert!(!scheduler.on_timer(0));
    }

    #[test]
    fn test_disabling_cancels_pending() {
        let mut scheduler = RunScheduler::new(true);
        let ticket = scheduler.on_edit().unwrap();
        scheduler.set_auto_run(false);
        scheduler.set_auto_run(true);
        assert!(!scheduler.on_timer(ticket));
    }

    #[test]
    fn test_manual_run_cancels_pending() {
        let mut scheduler = RunScheduler::new(true);
        let ticket = scheduler.on_edit().unwrap();
        scheduler.run_now();
        assert!(!scheduler.on_timer(ticket));

        let next = scheduler.on_edit().unwrap();
        assert!(scheduler.on_timer(next));
    }
}
