//! Named counting semaphores (SEM).
//!
//! A small, fixed-size table of semaphores identified by a positive
//! integer name, each holding a bounded non-negative counter. Blocking
//! `wait` is expressed through the [`WaitChannel`] capability rather than
//! a concrete scheduler dependency. See [`SemService`].

use alloc::boxed::Box;
use alloc::vec::Vec;

use nos_api::core::traits::TickSource;
use nos_api::process::interface::WaitChannel;
use nos_api::{Error, KernelError, Result};
use spin::Mutex;

use crate::config::SemConfig;

/// External SEM handle, the 1-based slot index callers deal in.
pub type Handle = usize;

#[derive(Debug, Clone, Copy)]
enum SemSlot {
    Empty,
    Live { name: i64, value: i64 },
}

struct SemTable {
    slots: Vec<SemSlot>,
    /// Tick each slot was last torn down at, kept outside the slot for the
    /// same reason KSM keeps it separately: it must survive the slot being
    /// zeroed back to `Empty`.
    t_delete: Vec<u64>,
}

/// Per-process eligibility stamps, one per semaphore-table slot.
#[derive(Debug, Clone)]
pub struct ProcessSemState {
    get_time: Vec<u64>,
}

impl ProcessSemState {
    /// Creates empty per-process SEM state sized for `config`.
    pub fn new(config: &SemConfig) -> Self {
        Self {
            get_time: alloc::vec![0; config.n_sem],
        }
    }
}

/// The named counting-semaphore service: a fixed-size table of
/// semaphores guarded by `sem_lock`, plus the wait-channel capability
/// `wait`/`signal`/`delete` park and wake callers through.
pub struct SemService {
    config: SemConfig,
    table: Mutex<SemTable>,
    waiters: Box<dyn WaitChannel>,
    ticks: Box<dyn TickSource>,
}

impl SemService {
    /// Creates a service with an empty table.
    pub fn new(config: SemConfig, waiters: Box<dyn WaitChannel>, ticks: Box<dyn TickSource>) -> Self {
        Self {
            table: Mutex::new(SemTable {
                slots: alloc::vec![SemSlot::Empty; config.n_sem],
                t_delete: alloc::vec![0; config.n_sem],
            }),
            waiters,
            ticks,
            config,
        }
    }

    fn index_of(&self, handle: Handle) -> Result<usize> {
        if handle == 0 || handle > self.config.n_sem {
            return Err(Error::Kernel(KernelError::BadHandle));
        }
        Ok(handle - 1)
    }

    /// Looks up (or creates) the semaphore named by `name`, initialized to
    /// `value` if this is the first `get` to see it.
    pub fn get(&self, proc: &mut ProcessSemState, name: i64, value: i64) -> Result<Handle> {
        if name <= 0 {
            return Err(Error::Kernel(KernelError::BadKey));
        }
        if !(0..=self.config.max_val).contains(&value) {
            return Err(Error::Kernel(KernelError::WrongSize));
        }

        let mut table = self.table.lock();
        let mut empty_idx: Option<usize> = None;
        for i in 0..table.slots.len() {
            match table.slots[i] {
                SemSlot::Empty => {
                    if empty_idx.is_none() {
                        empty_idx = Some(i);
                    }
                }
                SemSlot::Live { name: n, .. } if n == name => {
                    proc.get_time[i] = self.ticks.now();
                    return Ok(i + 1);
                }
                _ => {}
            }
        }

        let Some(i) = empty_idx else {
            return Err(Error::Kernel(KernelError::OutOfSem));
        };
        table.slots[i] = SemSlot::Live { name, value };
        proc.get_time[i] = self.ticks.now();
        Ok(i + 1)
    }

    /// Deletes `handle`'s semaphore and wakes anyone parked on it, so a
    /// blocked waiter observes the slot's disappearance instead of
    /// spinning forever.
    pub fn delete(&self, proc: &ProcessSemState, handle: Handle) -> Result<()> {
        let idx = self.index_of(handle)?;
        let mut table = self.table.lock();
        match table.slots[idx] {
            SemSlot::Empty => return Err(Error::Kernel(KernelError::DoesNotExist)),
            SemSlot::Live { .. } => {
                if proc.get_time[idx] <= table.t_delete[idx] {
                    return Err(Error::Kernel(KernelError::SemNotEligible));
                }
            }
        }
        table.slots[idx] = SemSlot::Empty;
        table.t_delete[idx] = self.ticks.now();
        drop(table);
        self.waiters.wakeup(idx);
        Ok(())
    }

    /// Increments `handle`'s counter and wakes anyone parked on it.
    pub fn signal(&self, proc: &ProcessSemState, handle: Handle) -> Result<()> {
        let idx = self.index_of(handle)?;
        {
            let mut table = self.table.lock();
            match &mut table.slots[idx] {
                SemSlot::Empty => return Err(Error::Kernel(KernelError::DoesNotExist)),
                SemSlot::Live { value, .. } => {
                    if proc.get_time[idx] <= table.t_delete[idx] {
                        return Err(Error::Kernel(KernelError::SemNotEligible));
                    }
                    *value += 1;
                }
            }
        }
        self.waiters.wakeup(idx);
        Ok(())
    }

    /// Blocks until `handle`'s counter is positive, then decrements it.
    /// Returns `DOES_NOT_EXIST` if the slot is deleted, or replaced by a
    /// new generation this process hasn't re-`get()`'d, while parked.
    pub fn wait(&self, proc: &ProcessSemState, handle: Handle) -> Result<()> {
        let idx = self.index_of(handle)?;
        loop {
            {
                let mut table = self.table.lock();
                match &mut table.slots[idx] {
                    SemSlot::Empty => return Err(Error::Kernel(KernelError::DoesNotExist)),
                    SemSlot::Live { .. } if proc.get_time[idx] <= table.t_delete[idx] => {
                        return Err(Error::Kernel(KernelError::DoesNotExist));
                    }
                    SemSlot::Live { value, .. } if *value > 0 => {
                        *value -= 1;
                        return Ok(());
                    }
                    SemSlot::Live { .. } => {}
                }
            }
            self.waiters.sleep(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::CountingTicks;
    use crate::wait::SpinWaitChannel;

    fn service(config: SemConfig) -> SemService {
        SemService::new(config, Box::new(SpinWaitChannel::new()), Box::new(CountingTicks::new()))
    }

    fn small_config() -> SemConfig {
        SemConfig {
            n_sem: 4,
            max_val: 10,
        }
    }

    #[test]
    fn get_creates_then_returns_same_handle_for_same_name() {
        let svc = service(small_config());
        let mut proc = ProcessSemState::new(&small_config());
        let h1 = svc.get(&mut proc, 1, 0).unwrap();
        let h2 = svc.get(&mut proc, 1, 5).unwrap();
        assert_eq!(h1, h2);
    }

    #[test]
    fn get_rejects_non_positive_name() {
        let svc = service(small_config());
        let mut proc = ProcessSemState::new(&small_config());
        let err = svc.get(&mut proc, 0, 0).unwrap_err();
        assert!(matches!(err, Error::Kernel(KernelError::BadKey)));
    }

    #[test]
    fn get_rejects_out_of_range_value() {
        let svc = service(small_config());
        let mut proc = ProcessSemState::new(&small_config());
        let err = svc.get(&mut proc, 1, -1).unwrap_err();
        assert!(matches!(err, Error::Kernel(KernelError::WrongSize)));
        let err = svc.get(&mut proc, 1, 999).unwrap_err();
        assert!(matches!(err, Error::Kernel(KernelError::WrongSize)));
    }

    #[test]
    fn get_fills_table_then_reports_out_of_sem() {
        let config = small_config();
        let svc = service(config);
        let mut proc = ProcessSemState::new(&config);
        for name in 1..=config.n_sem as i64 {
            svc.get(&mut proc, name, 0).unwrap();
        }
        let err = svc.get(&mut proc, config.n_sem as i64 + 1, 0).unwrap_err();
        assert!(matches!(err, Error::Kernel(KernelError::OutOfSem)));
    }

    #[test]
    fn signal_then_wait_does_not_block() {
        let svc = service(small_config());
        let mut proc = ProcessSemState::new(&small_config());
        let h = svc.get(&mut proc, 1, 0).unwrap();
        svc.signal(&proc, h).unwrap();
        svc.wait(&proc, h).unwrap();
    }

    #[test]
    fn wait_on_nonzero_value_consumes_one_unit() {
        let svc = service(small_config());
        let mut proc = ProcessSemState::new(&small_config());
        let h = svc.get(&mut proc, 1, 2).unwrap();
        svc.wait(&proc, h).unwrap();
        svc.wait(&proc, h).unwrap();
    }

    #[test]
    fn signal_on_unknown_handle_is_does_not_exist() {
        let svc = service(small_config());
        let proc = ProcessSemState::new(&small_config());
        let err = svc.signal(&proc, 1).unwrap_err();
        assert!(matches!(err, Error::Kernel(KernelError::DoesNotExist)));
    }

    #[test]
    fn delete_wakes_any_parked_waiter_generation() {
        let svc = service(small_config());
        let mut proc = ProcessSemState::new(&small_config());
        let h = svc.get(&mut proc, 1, 0).unwrap();
        svc.delete(&proc, h).unwrap();
        let err = svc.wait(&proc, h).unwrap_err();
        assert!(matches!(err, Error::Kernel(KernelError::DoesNotExist)));
    }

    #[test]
    fn delete_requires_eligibility_on_the_current_generation() {
        let svc = service(small_config());
        let mut proc = ProcessSemState::new(&small_config());
        let h = svc.get(&mut proc, 1, 0).unwrap();
        svc.delete(&proc, h).unwrap();
        // The slot is reused by a new name: its generation has moved on.
        svc.get(&mut proc, 2, 0).unwrap();

        // A stale caller whose get_time predates the delete is not
        // eligible for the slot in its new generation.
        let mut stale = ProcessSemState::new(&small_config());
        stale.get_time[h - 1] = 0;
        let err = svc.delete(&stale, h).unwrap_err();
        assert!(matches!(err, Error::Kernel(KernelError::SemNotEligible)));
    }
}
