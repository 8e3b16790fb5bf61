//! A free-running tick counter usable as a [`TickSource`].

use core::sync::atomic::{AtomicU64, Ordering};
use nos_api::core::traits::TickSource;

/// A monotonic counter that advances on every [`TickSource::now`] call, in
/// addition to whatever a timer-interrupt handler adds explicitly via
/// [`tick`](Self::tick)/[`advance`](Self::advance).
///
/// `now()` stamps `get_time`/`t_delete` for KSM/SEM, whose eligibility
/// check (`get_time > t_delete`) must be able to tell apart a fresh `get()`
/// from a slot's initial, never-torn-down state (`t_delete == 0`) and from
/// whatever generation came before it. Tick 0 is reserved to mean "never
/// issued": the first call to `now()` returns 1, so a freshly allocated
/// slot (whose `t_delete` starts at 0) is always eligible to the process
/// that just created it, and every subsequent stamp - another `get()`,
/// a `destroy_seg`'s `t_delete` - is strictly greater than any stamp
/// issued before it, regardless of call order.
#[derive(Default)]
pub struct CountingTicks {
    ticks: AtomicU64,
}

impl CountingTicks {
    /// Creates a counter whose first `now()` call returns 1.
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU64::new(0),
        }
    }

    /// Advances the counter by one tick without reading it.
    pub fn tick(&self) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }

    /// Advances the counter by `n` ticks without reading it.
    pub fn advance(&self, n: u64) {
        self.ticks.fetch_add(n, Ordering::Relaxed);
    }
}

impl TickSource for CountingTicks {
    fn now(&self) -> u64 {
        self.ticks.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_never_returns_the_reserved_zero_tick() {
        let ticks = CountingTicks::new();
        assert!(ticks.now() >= 1);
    }

    #[test]
    fn now_is_strictly_increasing_across_calls() {
        let ticks = CountingTicks::new();
        let a = ticks.now();
        let b = ticks.now();
        assert!(b > a);
    }

    #[test]
    fn tick_and_advance_move_the_counter_forward() {
        let ticks = CountingTicks::new();
        let a = ticks.now();
        ticks.tick();
        let b = ticks.now();
        assert!(b > a + 1, "tick() plus now()'s own advance should add at least 2");
        ticks.advance(5);
        let c = ticks.now();
        assert!(c > b + 5, "advance(5) plus now()'s own advance should add at least 6");
    }
}
