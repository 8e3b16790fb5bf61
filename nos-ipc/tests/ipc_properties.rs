//! Property tests for the KSM/SEM eligibility and idempotence invariants.

use proptest::prelude::*;

use nos_ipc::{
    BumpFrameAllocator, CountingTicks, KsmConfig, KsmService, ProcessKsmState, ProcessSemState,
    SemConfig, SemService, SimplePageTableFactory, SpinWaitChannel,
};

fn small_ksm_config() -> KsmConfig {
    KsmConfig {
        n_seg: 8,
        seg_maxsz: 4 * 4096,
        page_size: 4096,
        user_top: 0x1_0000_0000,
    }
}

fn ksm_service(config: KsmConfig) -> KsmService {
    let frames = config.n_seg * config.max_pages_per_seg();
    KsmService::new(
        config,
        Box::new(BumpFrameAllocator::new(frames, config.page_size)),
        Box::new(SimplePageTableFactory),
        Box::new(CountingTicks::new()),
    )
}

proptest! {
    /// Repeated `get()` calls with the same key and size always return the
    /// same handle, regardless of how many times they're repeated or what
    /// size is passed on lookups after the first (size 0 means "look up
    /// only" and never conflicts).
    #[test]
    fn get_is_idempotent_for_a_fixed_key(
        key in 1i64..1000,
        size in 1usize..(4 * 4096),
        repeats in 1usize..5,
    ) {
        let config = small_ksm_config();
        let svc = ksm_service(config);
        let mut proc = ProcessKsmState::new(&config, 0);

        let first = svc.get(&mut proc, 1, key, size).unwrap();
        for _ in 0..repeats {
            let again = svc.get(&mut proc, 1, key, size).unwrap();
            prop_assert_eq!(first, again);
            let lookup_only = svc.get(&mut proc, 1, key, 0).unwrap();
            prop_assert_eq!(first, lookup_only);
        }
    }

    /// Distinct keys (within table capacity) never collide on the same
    /// handle.
    #[test]
    fn distinct_keys_get_distinct_handles(
        key_a in 1i64..1000,
        key_b in 1001i64..2000,
        size in 1usize..(4 * 4096),
    ) {
        let config = small_ksm_config();
        let svc = ksm_service(config);
        let mut proc = ProcessKsmState::new(&config, 0);

        let ha = svc.get(&mut proc, 1, key_a, size).unwrap();
        let hb = svc.get(&mut proc, 1, key_b, size).unwrap();
        prop_assert_ne!(ha, hb);
    }

    /// Once a segment is deleted (and immediately destroyed, since no one
    /// is attached), a process that never called `get()` on the slot
    /// (`get_time` still at its initial zero) is never eligible to query
    /// it, even after the handle is recycled for a new key.
    #[test]
    fn deleted_segment_handle_is_never_eligible_for_a_caller_that_never_got_it(
        key in 1i64..1000,
        next_key in 1001i64..2000,
        size in 1usize..(4 * 4096),
    ) {
        let config = small_ksm_config();
        let svc = ksm_service(config);
        let mut caller = ProcessKsmState::new(&config, 0);

        let h = svc.get(&mut caller, 1, key, size).unwrap();
        svc.delete(&caller, h).unwrap();
        // Recreate at the same slot under a different key.
        let recreated = svc.get(&mut caller, 1, next_key, size).unwrap();
        prop_assert_eq!(h, recreated);

        let other = ProcessKsmState::new(&config, 0);
        let err = svc.info(&other, h).unwrap_err();
        prop_assert!(matches!(
            err,
            nos_api::Error::Kernel(nos_api::KernelError::NotEligible)
        ));
    }
}

fn small_sem_config() -> SemConfig {
    SemConfig {
        n_sem: 8,
        max_val: 100,
    }
}

fn sem_service(config: SemConfig) -> SemService {
    SemService::new(config, Box::new(SpinWaitChannel::new()), Box::new(CountingTicks::new()))
}

proptest! {
    /// Signaling a semaphore `n` times then waiting `n` times always
    /// succeeds and never blocks, for any `n` within the configured
    /// maximum value.
    #[test]
    fn signal_n_then_wait_n_never_blocks(n in 1i64..50) {
        let config = small_sem_config();
        let svc = sem_service(config);
        let mut proc = ProcessSemState::new(&config);

        let h = svc.get(&mut proc, 1, 0).unwrap();
        for _ in 0..n {
            svc.signal(&proc, h).unwrap();
        }
        for _ in 0..n {
            svc.wait(&proc, h).unwrap();
        }
    }

    /// `get()` with the same name always returns the same handle,
    /// regardless of the (ignored, since the slot already exists) value
    /// argument on subsequent calls.
    #[test]
    fn sem_get_is_idempotent_for_a_fixed_name(name in 1i64..1000, value in 0i64..100) {
        let config = small_sem_config();
        let svc = sem_service(config);
        let mut proc = ProcessSemState::new(&config);

        let first = svc.get(&mut proc, name, value).unwrap();
        let second = svc.get(&mut proc, name, 0).unwrap();
        prop_assert_eq!(first, second);
    }
}
