//! A default, spin-based [`WaitChannel`] implementation.

use alloc::collections::BTreeMap;
use nos_api::process::interface::WaitChannel;
use spin::Mutex;

/// A busy-spin [`WaitChannel`] keyed by a generation counter per channel,
/// so a `wakeup` landing before `sleep` begins is never lost: `sleep`
/// snapshots the channel's current generation and spins until it moves
/// past that snapshot.
///
/// This is a placeholder for hosts with no real scheduler wired in yet —
/// a production kernel provides a `WaitChannel` that actually parks the
/// calling task instead of spinning. Callers that can't tolerate spinning
/// (e.g. tests exercising non-blocking paths) should supply their own
/// `WaitChannel` instead.
#[derive(Default)]
pub struct SpinWaitChannel {
    generations: Mutex<BTreeMap<usize, u64>>,
}

impl SpinWaitChannel {
    /// Creates a channel with no generations recorded yet.
    pub fn new() -> Self {
        Self::default()
    }

    fn generation(&self, channel: usize) -> u64 {
        *self.generations.lock().entry(channel).or_insert(0)
    }

    /// Returns the current generation recorded for `channel`, for tests
    /// and diagnostics. Not part of the `WaitChannel` capability itself.
    pub fn current_generation(&self, channel: usize) -> u64 {
        self.generation(channel)
    }
}

impl WaitChannel for SpinWaitChannel {
    fn sleep(&self, channel: usize) {
        let start = self.generation(channel);
        while self.generation(channel) == start {
            core::hint::spin_loop();
        }
    }

    fn wakeup(&self, channel: usize) {
        let mut gens = self.generations.lock();
        *gens.entry(channel).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wakeup_advances_the_channels_generation() {
        let chan = SpinWaitChannel::new();
        assert_eq!(chan.current_generation(7), 0);
        chan.wakeup(7);
        assert_eq!(chan.current_generation(7), 1);
        chan.wakeup(7);
        assert_eq!(chan.current_generation(7), 2);
        // An unrelated channel is unaffected.
        assert_eq!(chan.current_generation(8), 0);
    }
}
