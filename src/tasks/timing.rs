//! Wall-clock timing of arbitrary calls.

use std::fmt;
use std::time::{Duration, Instant};

/// Run `f` and report how long it took.
pub fn timed<T, F: FnOnce() -> T>(f: F) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}

/// Run `f` once untimed, then `repeats` more times, keeping the result
/// and duration of the fastest timed call.
///
/// # Panics
///
/// Panics if `repeats == 0`.
pub fn best_of<T, F: FnMut() -> T>(repeats: u32, mut f: F) -> (T, Duration) {
    assert!(repeats > 0, "best_of requires at least one repeat");
    let _ = f();

    let mut best = timed(&mut f);
    for _ in 1..repeats {
        let (out, dt) = timed(&mut f);
        if dt < best.1 {
            best = (out, dt);
        }
    }
    best
}

pub fn seconds(dt: Duration) -> f64
{ dt.as_secs_f64() }

/// One line of a timing table.
///
/// ```text
/// reference (n = 100)            :   1.23e-4 [s]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimingLine {
    pub name: String,
    pub seconds: f64,
}

impl fmt::Display for TimingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    { write!(f, "{:30} : {:10.2e} [s]", self.name, self.seconds) }
}
