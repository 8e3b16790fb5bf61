//! Time system calls
//!
//! This module provides time-related system calls.

#[cfg(feature = "alloc")]
use alloc::string::ToString;
#[cfg(feature = "alloc")]
use alloc::boxed::Box;

use nos_api::Result;
use crate::core::traits::SyscallHandler;
#[cfg(feature = "log")]
use log;

#[cfg(feature = "alloc")]
use crate::core::dispatcher::SyscallDispatcher;

/// Register time system call handlers
#[cfg(feature = "alloc")]
pub fn register_handlers(dispatcher: &mut SyscallDispatcher) -> Result<()> {
    // Register clock_gettime system call
    dispatcher.register_handler(
        crate::types::SYS_CLOCK_GETTIME,
        Box::new(ClockGettimeHandler)
    );
    
    // Register gettimeofday system call
    dispatcher.register_handler(
        crate::types::SYS_GETTIMEOFDAY,
        Box::new(GettimeofdayHandler)
    );
    
    // Register nanosleep system call
    dispatcher.register_handler(
        crate::types::SYS_NANOSLEEP,
        Box::new(NanosleepHandler)
    );
    
    Ok(())
}

/// Clock_gettime system call handler
struct ClockGettimeHandler;

impl SyscallHandler for ClockGettimeHandler {
    fn id(&self) -> u32 {
        crate::types::SYS_CLOCK_GETTIME
    }
    
    fn execute(&self, args: &[usize]) -> Result<isize> {
        if args.len() < 2 {
            #[cfg(feature = "alloc")]
            #[cfg(feature = "alloc")]
            return Err(nos_api::Error::InvalidArgument("Insufficient arguments".to_string()));
            #[cfg(not(feature = "alloc"))]
            return Err(nos_api::Error::InvalidArgument("Insufficient arguments".into()));
        }
        
        let clock_id = args[0] as i32;
        let timespec = args[1] as *mut Timespec;
        
        // TODO: Implement actual clock_gettime logic using parameters:
        // clock_id: Clock type (CLOCK_REALTIME, CLOCK_MONOTONIC, etc.)
        // timespec: Pointer to timespec structure to fill with current time
        #[cfg(feature = "log")]
        log::trace!("clock_gettime called with: clock_id={}, timespec={:?}", clock_id, timespec);
        
        // Basic validation to ensure parameters are used even when logging is disabled
        let _ = (clock_id, timespec);
        
        Ok(0)
    }
    
    fn name(&self) -> &str {
        "clock_gettime"
    }
}

/// Gettimeofday system call handler
struct GettimeofdayHandler;

impl SyscallHandler for GettimeofdayHandler {
    fn id(&self) -> u32 {
        crate::types::SYS_GETTIMEOFDAY
    }
    
    fn execute(&self, args: &[usize]) -> Result<isize> {
        if args.len() < 2 {
            #[cfg(feature = "alloc")]
            #[cfg(feature = "alloc")]
            return Err(nos_api::Error::InvalidArgument("Insufficient arguments".to_string()));
            #[cfg(not(feature = "alloc"))]
            return Err(nos_api::Error::InvalidArgument("Insufficient arguments".into()));
        }
        
        let tv = args[0] as *mut Timeval;
        let tz = args[1] as *mut Timezone;
        
        // TODO: Implement actual gettimeofday logic using parameters:
        // tv: Pointer to timeval structure to fill with current time
        // tz: Pointer to timezone structure (unused in modern systems)
        #[cfg(feature = "log")]
        log::trace!("gettimeofday called with: tv={:?}, tz={:?}", tv, tz);
        
        // Basic validation to ensure parameters are used even when logging is disabled
        let _ = (tv, tz);
        
        Ok(0)
    }
    
    fn name(&self) -> &str {
        "gettimeofday"
    }
}

/// Nanosleep system call handler
struct NanosleepHandler;

impl SyscallHandler for NanosleepHandler {
    fn id(&self) -> u32 {
        crate::types::SYS_NANOSLEEP
    }
    
    fn execute(&self, args: &[usize]) -> Result<isize> {
        if args.len() < 2 {
            #[cfg(feature = "alloc")]
            #[cfg(feature = "alloc")]
            return Err(nos_api::Error::InvalidArgument("Insufficient arguments".to_string()));
            #[cfg(not(feature = "alloc"))]
            return Err(nos_api::Error::InvalidArgument("Insufficient arguments".into()));
        }
        
        let req = args[0] as *const Timespec;
        let rem = args[1] as *mut Timespec;
        
        // TODO: Implement actual nanosleep logic using parameters:
        // req: Requested sleep time
        // rem: Remaining sleep time if interrupted
        #[cfg(feature = "log")]
        log::trace!("nanosleep called with: req={:?}, rem={:?}", req, rem);
        
        // Basic validation to ensure parameters are used even when logging is disabled
        let _ = (req, rem);
        
        Ok(0)
    }
    
    fn name(&self) -> &str {
        "nanosleep"
    }
}

/// Time specification
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Timespec {
    pub tv_sec: i64,
    pub tv_nsec: i64,
}

/// Time value
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Timeval {
    pub tv_sec: i64,
    pub tv_usec: i64,
}

/// Timezone
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Timezone {
    pub tz_minuteswest: i32,
    pub tz_dsttime: i32,
}

/// Get current timestamp
pub fn get_timestamp() -> u64 {
    // Simple timestamp implementation
    // In a real implementation, this would use hardware timers
    use core::sync::atomic::{AtomicU64, Ordering};
    static TIMESTAMP: AtomicU64 = AtomicU64::new(0);
    TIMESTAMP.load(Ordering::Relaxed)
}