//! Trailing-edge debouncing that is independent of any event loop.
//!
//! Callers feed triggers in with [`Debouncer::call`] and ask whether the burst has settled with
//! [`Debouncer::poll`]. Time is always passed in explicitly, so the same primitive can be driven
//! from a timer, a frame callback, or a test.

use std::time::{Duration, Instant};

/// Coalesces rapid triggers, keeping only the latest value until a quiet interval elapses.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
  delay: Duration,
  pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
  /// Create a debouncer that fires once `delay` has passed without a new call.
  pub fn new(delay: Duration) -> Self {
    Self {
      delay,
      pending: None,
    }
  }

  /// Quiet interval required before a pending value fires.
  pub fn delay(&self) -> Duration {
    self.delay
  }

  /// Record a trigger, replacing any pending value and restarting the quiet interval.
  pub fn call(&mut self, value: T, now: Instant) {
    self.pending = Some((value, now));
  }

  /// Returns `true` while a value is waiting to fire.
  pub fn is_pending(&self) -> bool {
    self.pending.is_some()
  }

  /// Instant at which the pending value becomes due, if any.
  pub fn deadline(&self) -> Option<Instant> {
    self.pending.as_ref().map(|(_, at)| *at + self.delay)
  }

  /// Take the latest value once the quiet interval has elapsed.
  ///
  /// Returns `None` when nothing is pending or the burst is still active. A value is yielded
  /// at most once.
  pub fn poll(&mut self, now: Instant) -> Option<T> {
    let deadline = self.deadline()?;
    if now < deadline {
      return None;
    }
    self.pending.take().map(|(value, _)| value)
  }

  /// Drop any pending value without firing it.
  pub fn cancel(&mut self) -> Option<T> {
    self.pending.take().map(|(value, _)| value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const DELAY: Duration = Duration::from_millis(100);

  #[test]
  fn fires_only_the_last_call_of_a_burst() {
    let start = Instant::now();
    let mut debouncer = Debouncer::new(DELAY);

    debouncer.call(1, start);
    debouncer.call(2, start + Duration::from_millis(40));
    debouncer.call(3, start + Duration::from_millis(80));

    assert_eq!(debouncer.poll(start + Duration::from_millis(150)), None);
    assert_eq!(debouncer.poll(start + Duration::from_millis(180)), Some(3));
    assert_eq!(debouncer.poll(start + Duration::from_millis(500)), None);
  }

  #[test]
  fn stays_idle_without_calls() {
    let mut debouncer: Debouncer<()> = Debouncer::new(DELAY);
    assert_eq!(debouncer.delay(), DELAY);
    assert!(!debouncer.is_pending());
    assert_eq!(debouncer.deadline(), None);
    assert_eq!(debouncer.poll(Instant::now()), None);
  }

  #[test]
  fn reports_deadline_of_latest_call() {
    let start = Instant::now();
    let mut debouncer = Debouncer::new(DELAY);
    debouncer.call("a", start);
    debouncer.call("b", start + Duration::from_millis(30));
    assert_eq!(debouncer.deadline(), Some(start + Duration::from_millis(130)));
  }

  #[test]
  fn cancel_discards_pending_value() {
    let start = Instant::now();
    let mut debouncer = Debouncer::new(DELAY);
    debouncer.call("edit", start);
    assert_eq!(debouncer.cancel(), Some("edit"));
    assert_eq!(debouncer.poll(start + DELAY), None);
  }

  #[test]
  fn zero_delay_fires_on_next_poll() {
    let start = Instant::now();
    let mut debouncer = Debouncer::new(Duration::ZERO);
    debouncer.call((), start);
    assert_eq!(debouncer.poll(start), Some(()));
  }
}
