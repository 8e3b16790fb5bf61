//! IPC system calls
//!
//! This module provides inter-process communication system calls: named
//! shared-memory segments (KSM) and counting semaphores (SEM), backed by
//! [`nos_ipc`]. Unlike the rest of this crate's syscalls, the handlers
//! here are not pure stubs - `nos_ipc` already owns the full KSM/SEM
//! semantics, so this module's job is purely argument marshaling and
//! per-process state lookup.
//!
//! # Deviation: explicit pid argument
//!
//! Every other handler in this crate ignores the notion of "the calling
//! process" entirely (there is no scheduler-context plumbing anywhere in
//! this crate to obtain it from). KSM/SEM genuinely need a calling pid to
//! index per-process state, so each handler here takes it as `args[0]`
//! rather than inventing a global "current process" the rest of the
//! crate has no equivalent of.

#[cfg(feature = "alloc")]
use alloc::boxed::Box;
#[cfg(feature = "alloc")]
use alloc::collections::BTreeMap;
#[cfg(feature = "alloc")]
use alloc::string::ToString;

#[cfg(feature = "alloc")]
use nos_api::core::types::Pid;
#[cfg(feature = "alloc")]
use nos_api::Result;
#[cfg(feature = "alloc")]
use nos_ipc::{
    BumpFrameAllocator, CountingTicks, KsmConfig, KsmService, ProcessKsmState, ProcessSemState,
    SemConfig, SemService, SimplePageTableFactory, SpinWaitChannel,
};
#[cfg(feature = "alloc")]
use nos_memory_management::page_table::SimplePageTable;
#[cfg(feature = "alloc")]
use spin::Mutex;

#[cfg(feature = "alloc")]
use crate::core::SyscallDispatcher;
#[cfg(feature = "alloc")]
use crate::core::SyscallHandler;
#[cfg(feature = "log")]
use log;

/// Register IPC system call handlers
#[cfg(feature = "alloc")]
pub fn register_handlers(dispatcher: &mut SyscallDispatcher) -> nos_api::Result<()> {
    init_ipc();

    dispatcher.register_handler(crate::types::SYS_KSM_GET, Box::new(KsmGetHandler));
    dispatcher.register_handler(crate::types::SYS_KSM_ATTACH, Box::new(KsmAttachHandler));
    dispatcher.register_handler(crate::types::SYS_KSM_DETACH, Box::new(KsmDetachHandler));
    dispatcher.register_handler(crate::types::SYS_KSM_DELETE, Box::new(KsmDeleteHandler));
    dispatcher.register_handler(crate::types::SYS_KSM_INFO, Box::new(KsmInfoHandler));
    dispatcher.register_handler(crate::types::SYS_PGUSED, Box::new(PgUsedHandler));
    dispatcher.register_handler(crate::types::SYS_SEM_GET, Box::new(SemGetHandler));
    dispatcher.register_handler(crate::types::SYS_SEM_DELETE, Box::new(SemDeleteHandler));
    dispatcher.register_handler(crate::types::SYS_SEM_SIGNAL, Box::new(SemSignalHandler));
    dispatcher.register_handler(crate::types::SYS_SEM_WAIT, Box::new(SemWaitHandler));

    Ok(())
}

/// Per-process state KSM/SEM need that the rest of this crate has no
/// equivalent registry for: the caller's free-VA bitmap and eligibility
/// stamps, and the page table its attachments are mapped into.
#[cfg(feature = "alloc")]
struct ProcessIpcState {
    ksm: ProcessKsmState,
    ksm_table: SimplePageTable,
    sem: ProcessSemState,
}

#[cfg(feature = "alloc")]
struct IpcState {
    ksm: KsmService,
    sem: SemService,
    processes: Mutex<BTreeMap<Pid, ProcessIpcState>>,
}

#[cfg(feature = "alloc")]
static GLOBAL_IPC: spin::Once<IpcState> = spin::Once::new();

#[cfg(feature = "alloc")]
fn init_ipc() {
    GLOBAL_IPC.call_once(|| {
        let ksm_config = KsmConfig::default();
        let sem_config = SemConfig::default();
        let frame_count = ksm_config.n_seg * ksm_config.max_pages_per_seg();
        IpcState {
            ksm: KsmService::new(
                ksm_config,
                Box::new(BumpFrameAllocator::new(frame_count, ksm_config.page_size)),
                Box::new(SimplePageTableFactory),
                Box::new(CountingTicks::new()),
            ),
            sem: SemService::new(
                sem_config,
                Box::new(SpinWaitChannel::new()),
                Box::new(CountingTicks::new()),
            ),
            processes: Mutex::new(BTreeMap::new()),
        }
    });
}

#[cfg(feature = "alloc")]
fn ipc() -> &'static IpcState {
    // init_ipc() runs in register_handlers(), before any handler can be
    // dispatched to.
    GLOBAL_IPC.get().expect("init_ipc() must run before ipc() is called")
}

#[cfg(feature = "alloc")]
fn with_process<R>(pid: Pid, f: impl FnOnce(&mut ProcessIpcState) -> R) -> R {
    let state = ipc();
    let mut processes = state.processes.lock();
    let entry = processes.entry(pid).or_insert_with(|| ProcessIpcState {
        ksm: ProcessKsmState::new(&KsmConfig::default(), 0),
        ksm_table: SimplePageTable::new(),
        sem: ProcessSemState::new(&SemConfig::default()),
    });
    f(entry)
}

#[cfg(feature = "alloc")]
fn insufficient_args() -> nos_api::Error {
    nos_api::Error::InvalidArgument("insufficient arguments".to_string())
}

/// `ksmget(pid, key, size) -> handle`
#[cfg(feature = "alloc")]
struct KsmGetHandler;

#[cfg(feature = "alloc")]
impl SyscallHandler for KsmGetHandler {
    fn id(&self) -> u32 {
        crate::types::SYS_KSM_GET
    }

    fn execute(&self, args: &[usize]) -> Result<isize> {
        if args.len() < 3 {
            return Err(insufficient_args());
        }
        let pid = args[0] as Pid;
        let key = args[1] as i64;
        let size = args[2];

        let handle = with_process(pid, |proc| ipc().ksm.get(&mut proc.ksm, pid, key, size))?;

        #[cfg(feature = "log")]
        log::trace!("ksmget(pid={}, key={}, size={}) = {}", pid, key, size, handle);

        Ok(handle as isize)
    }

    fn name(&self) -> &str {
        "ksmget"
    }
}

/// `ksmattach(pid, handle, writable) -> addr`
#[cfg(feature = "alloc")]
struct KsmAttachHandler;

#[cfg(feature = "alloc")]
impl SyscallHandler for KsmAttachHandler {
    fn id(&self) -> u32 {
        crate::types::SYS_KSM_ATTACH
    }

    fn execute(&self, args: &[usize]) -> Result<isize> {
        if args.len() < 3 {
            return Err(insufficient_args());
        }
        let pid = args[0] as Pid;
        let handle = args[1];
        let writable = args[2] != 0;

        let addr = with_process(pid, |proc| {
            ipc()
                .ksm
                .attach(&mut proc.ksm, &mut proc.ksm_table, pid, handle, writable)
        })?;

        #[cfg(feature = "log")]
        log::trace!("ksmattach(pid={}, handle={}) = {:#x}", pid, handle, addr);

        Ok(addr as isize)
    }

    fn name(&self) -> &str {
        "ksmattach"
    }
}

/// `ksmdetach(pid, handle) -> 0`
#[cfg(feature = "alloc")]
struct KsmDetachHandler;

#[cfg(feature = "alloc")]
impl SyscallHandler for KsmDetachHandler {
    fn id(&self) -> u32 {
        crate::types::SYS_KSM_DETACH
    }

    fn execute(&self, args: &[usize]) -> Result<isize> {
        if args.len() < 2 {
            return Err(insufficient_args());
        }
        let pid = args[0] as Pid;
        let handle = args[1];

        with_process(pid, |proc| {
            ipc()
                .ksm
                .detach(&mut proc.ksm, &mut proc.ksm_table, pid, handle)
        })?;

        #[cfg(feature = "log")]
        log::trace!("ksmdetach(pid={}, handle={})", pid, handle);

        Ok(0)
    }

    fn name(&self) -> &str {
        "ksmdetach"
    }
}

/// `ksmdelete(pid, handle) -> 0`
#[cfg(feature = "alloc")]
struct KsmDeleteHandler;

#[cfg(feature = "alloc")]
impl SyscallHandler for KsmDeleteHandler {
    fn id(&self) -> u32 {
        crate::types::SYS_KSM_DELETE
    }

    fn execute(&self, args: &[usize]) -> Result<isize> {
        if args.len() < 2 {
            return Err(insufficient_args());
        }
        let pid = args[0] as Pid;
        let handle = args[1];

        with_process(pid, |proc| ipc().ksm.delete(&proc.ksm, handle))?;

        #[cfg(feature = "log")]
        log::trace!("ksmdelete(pid={}, handle={})", pid, handle);

        Ok(0)
    }

    fn name(&self) -> &str {
        "ksmdelete"
    }
}

/// `ksminfo(pid, handle) -> size_bytes`
///
/// The full [`nos_ipc::KsmInfo`] bookkeeping struct has no natural
/// encoding into a single `isize` return value; only `size_bytes` is
/// surfaced here, matching the coarse level the rest of this crate's
/// syscall handlers are stubbed at.
#[cfg(feature = "alloc")]
struct KsmInfoHandler;

#[cfg(feature = "alloc")]
impl SyscallHandler for KsmInfoHandler {
    fn id(&self) -> u32 {
        crate::types::SYS_KSM_INFO
    }

    fn execute(&self, args: &[usize]) -> Result<isize> {
        if args.len() < 2 {
            return Err(insufficient_args());
        }
        let pid = args[0] as Pid;
        let handle = args[1];

        let info = with_process(pid, |proc| ipc().ksm.info(&proc.ksm, handle))?;

        #[cfg(feature = "log")]
        log::trace!(
            "ksminfo(pid={}, handle={}) size_bytes={} attach_count={}",
            pid,
            handle,
            info.size_bytes,
            info.attach_count
        );

        Ok(info.size_bytes as isize)
    }

    fn name(&self) -> &str {
        "ksminfo"
    }
}

/// `pgused() -> total physical pages currently backing live KSM segments`
#[cfg(feature = "alloc")]
struct PgUsedHandler;

#[cfg(feature = "alloc")]
impl SyscallHandler for PgUsedHandler {
    fn id(&self) -> u32 {
        crate::types::SYS_PGUSED
    }

    fn execute(&self, _args: &[usize]) -> Result<isize> {
        Ok(ipc().ksm.pages_in_use() as isize)
    }

    fn name(&self) -> &str {
        "pgused"
    }
}

/// `semget(pid, name, value) -> handle`
#[cfg(feature = "alloc")]
struct SemGetHandler;

#[cfg(feature = "alloc")]
impl SyscallHandler for SemGetHandler {
    fn id(&self) -> u32 {
        crate::types::SYS_SEM_GET
    }

    fn execute(&self, args: &[usize]) -> Result<isize> {
        if args.len() < 3 {
            return Err(insufficient_args());
        }
        let pid = args[0] as Pid;
        let name = args[1] as i64;
        let value = args[2] as i64;

        let handle = with_process(pid, |proc| ipc().sem.get(&mut proc.sem, name, value))?;

        #[cfg(feature = "log")]
        log::trace!("semget(pid={}, name={}, value={}) = {}", pid, name, value, handle);

        Ok(handle as isize)
    }

    fn name(&self) -> &str {
        "semget"
    }
}

/// `semdelete(pid, handle) -> 0`
#[cfg(feature = "alloc")]
struct SemDeleteHandler;

#[cfg(feature = "alloc")]
impl SyscallHandler for SemDeleteHandler {
    fn id(&self) -> u32 {
        crate::types::SYS_SEM_DELETE
    }

    fn execute(&self, args: &[usize]) -> Result<isize> {
        if args.len() < 2 {
            return Err(insufficient_args());
        }
        let pid = args[0] as Pid;
        let handle = args[1];

        with_process(pid, |proc| ipc().sem.delete(&proc.sem, handle))?;

        #[cfg(feature = "log")]
        log::trace!("semdelete(pid={}, handle={})", pid, handle);

        Ok(0)
    }

    fn name(&self) -> &str {
        "semdelete"
    }
}

/// `semsignal(pid, handle) -> 0`
#[cfg(feature = "alloc")]
struct SemSignalHandler;

#[cfg(feature = "alloc")]
impl SyscallHandler for SemSignalHandler {
    fn id(&self) -> u32 {
        crate::types::SYS_SEM_SIGNAL
    }

    fn execute(&self, args: &[usize]) -> Result<isize> {
        if args.len() < 2 {
            return Err(insufficient_args());
        }
        let pid = args[0] as Pid;
        let handle = args[1];

        with_process(pid, |proc| ipc().sem.signal(&proc.sem, handle))?;

        #[cfg(feature = "log")]
        log::trace!("semsignal(pid={}, handle={})", pid, handle);

        Ok(0)
    }

    fn name(&self) -> &str {
        "semsignal"
    }
}

/// `semwait(pid, handle) -> 0`
///
/// Blocks the calling context in place via [`SpinWaitChannel`] until the
/// semaphore is signaled - see that type's docs for the single-core
/// caveat this placeholder carries until a scheduler-integrated
/// `WaitChannel` is wired in.
#[cfg(feature = "alloc")]
struct SemWaitHandler;

#[cfg(feature = "alloc")]
impl SyscallHandler for SemWaitHandler {
    fn id(&self) -> u32 {
        crate::types::SYS_SEM_WAIT
    }

    fn execute(&self, args: &[usize]) -> Result<isize> {
        if args.len() < 2 {
            return Err(insufficient_args());
        }
        let pid = args[0] as Pid;
        let handle = args[1];

        with_process(pid, |proc| ipc().sem.wait(&proc.sem, handle))?;

        #[cfg(feature = "log")]
        log::trace!("semwait(pid={}, handle={})", pid, handle);

        Ok(0)
    }

    fn name(&self) -> &str {
        "semwait"
    }
}
