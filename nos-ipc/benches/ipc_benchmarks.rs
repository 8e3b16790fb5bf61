//! IPC benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use nos_ipc::{
    BumpFrameAllocator, CountingTicks, KsmConfig, KsmService, ProcessKsmState, ProcessSemState,
    SemConfig, SemService, SimplePageTableFactory, SpinWaitChannel,
};
use nos_memory_management::page_table::SimplePageTable;

fn ksm_config() -> KsmConfig {
    KsmConfig {
        n_seg: 64,
        seg_maxsz: 16 * 4096,
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

fn bench_ksm_get(c: &mut Criterion) {
    let config = ksm_config();
    c.bench_function("ksm_get_creates_then_looks_up", |b| {
        b.iter(|| {
            let svc = ksm_service(config);
            let mut proc = ProcessKsmState::new(&config, 0);
            let h = svc.get(&mut proc, 1, 1, 4096).unwrap();
            black_box(svc.get(&mut proc, 1, 1, 0).unwrap());
            black_box(h);
        });
    });
}

fn bench_ksm_attach_detach(c: &mut Criterion) {
    let config = ksm_config();
    c.bench_function("ksm_attach_then_detach", |b| {
        b.iter(|| {
            let svc = ksm_service(config);
            let mut proc = ProcessKsmState::new(&config, 0);
            let mut dest = SimplePageTable::new();
            let h = svc.get(&mut proc, 1, 1, config.seg_maxsz).unwrap();
            svc.attach(&mut proc, &mut dest, 1, h, true).unwrap();
            svc.detach(&mut proc, &mut dest, 1, h).unwrap();
        });
    });
}

fn bench_ksm_fork_hook(c: &mut Criterion) {
    let config = ksm_config();
    c.bench_function("ksm_fork_hook", |b| {
        b.iter(|| {
            let svc = ksm_service(config);
            let mut parent = ProcessKsmState::new(&config, 0);
            let mut dest = SimplePageTable::new();
            let h = svc.get(&mut parent, 1, 1, 4096).unwrap();
            svc.attach(&mut parent, &mut dest, 1, h, true).unwrap();
            black_box(svc.fork_hook(&parent, 2));
        });
    });
}

fn sem_service(config: SemConfig) -> SemService {
    SemService::new(config, Box::new(SpinWaitChannel::new()), Box::new(CountingTicks::new()))
}

fn bench_sem_signal_wait(c: &mut Criterion) {
    let config = SemConfig {
        n_sem: 64,
        max_val: 1000,
    };
    c.bench_function("sem_signal_then_wait", |b| {
        b.iter(|| {
            let svc = sem_service(config);
            let mut proc = ProcessSemState::new(&config);
            let h = svc.get(&mut proc, 1, 0).unwrap();
            svc.signal(&proc, h).unwrap();
            svc.wait(&proc, h).unwrap();
        });
    });
}

criterion_group!(
    ipc_benchmarks,
    bench_ksm_get,
    bench_ksm_attach_detach,
    bench_ksm_fork_hook,
    bench_sem_signal_wait
);

criterion_main!(ipc_benchmarks);
