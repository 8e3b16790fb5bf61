//! Memory system calls
//!
//! This module provides memory management system calls.

#[cfg(feature = "alloc")]
use alloc::string::ToString;
#[cfg(feature = "alloc")]
use alloc::boxed::Box;

use nos_api::Result;
use crate::core::SyscallHandler;
#[cfg(feature = "log")]
use log;

#[cfg(feature = "alloc")]
use crate::core::SyscallDispatcher;

/// Register memory system call handlers
#[cfg(feature = "alloc")]
pub fn register_handlers(dispatcher: &mut SyscallDispatcher) -> Result<()> {
    // Register mmap system call
    dispatcher.register_handler(
        crate::types::SYS_MMAP,
        Box::new(MmapHandler)
    );
    
    // Register munmap system call
    dispatcher.register_handler(
        crate::types::SYS_MUNMAP,
        Box::new(MunmapHandler)
    );
    
    // Register mprotect system call
    dispatcher.register_handler(
        crate::types::SYS_MPROTECT,
        Box::new(MprotectHandler)
    );
    
    Ok(())
}

/// Mmap system call handler
struct MmapHandler;

impl SyscallHandler for MmapHandler {
    fn id(&self) -> u32 {
        crate::types::SYS_MMAP
    }
    
    fn execute(&self, args: &[usize]) -> Result<isize> {
        if args.len() < 6 {
            #[cfg(feature = "alloc")]
            #[cfg(feature = "alloc")]
            return Err(nos_api::Error::InvalidArgument("Insufficient arguments".to_string()));
            #[cfg(not(feature = "alloc"))]
            return Err(nos_api::Error::InvalidArgument("Insufficient arguments".into()));
        }
        
        let addr = args[0] as *mut u8;
        let length = args[1] as usize;
        let prot = args[2] as u32;
        let flags = args[3] as u32;
        let fd = args[4] as i32;
        let offset = args[5] as isize;
        
        // TODO: Implement actual mmap logic using parameters:
        // addr: Requested address for mapping
        // length: Length of mapping in bytes
        // prot: Protection flags (PROT_READ, PROT_WRITE, etc.)
        // flags: Mapping flags (MAP_SHARED, MAP_PRIVATE, etc.)
        // fd: File descriptor to map (or -1 for anonymous mapping)
        // offset: Offset in file to start mapping from
        #[cfg(feature = "log")]
        log::trace!("mmap called with: addr={:?}, length={}, prot={}, flags={}, fd={}, offset={}", addr, length, prot, flags, fd, offset);
        
        // Basic validation to ensure parameters are used even when logging is disabled
        let _ = (addr, length, prot, flags, fd, offset);
        
        Ok(addr as isize) // Return the mapped address
    }
    
    fn name(&self) -> &str {
        "mmap"
    }
}

/// Munmap system call handler
struct MunmapHandler;

impl SyscallHandler for MunmapHandler {
    fn id(&self) -> u32 {
        crate::types::SYS_MUNMAP
    }
    
    fn execute(&self, args: &[usize]) -> Result<isize> {
        if args.len() < 2 {
            #[cfg(feature = "alloc")]
            #[cfg(feature = "alloc")]
            return Err(nos_api::Error::InvalidArgument("Insufficient arguments".to_string()));
            #[cfg(not(feature = "alloc"))]
            return Err(nos_api::Error::InvalidArgument("Insufficient arguments".into()));
        }
        
        let addr = args[0] as *mut u8;
        let length = args[1] as usize;
        
        // TODO: Implement actual munmap logic using parameters:
        // addr: Address of mapping to unmap
        // length: Length of mapping to unmap
        #[cfg(feature = "log")]
        log::trace!("munmap called with: addr={:?}, length={}", addr, length);
        
        // Basic validation to ensure parameters are used even when logging is disabled
        let _ = (addr, length);
        
        Ok(0)
    }
    
    fn name(&self) -> &str {
        "munmap"
    }
}

/// Mprotect system call handler
struct MprotectHandler;

impl SyscallHandler for MprotectHandler {
    fn id(&self) -> u32 {
        crate::types::SYS_MPROTECT
    }
    
    fn execute(&self, args: &[usize]) -> Result<isize> {
        if args.len() < 3 {
            #[cfg(feature = "alloc")]
            #[cfg(feature = "alloc")]
            return Err(nos_api::Error::InvalidArgument("Insufficient arguments".to_string()));
            #[cfg(not(feature = "alloc"))]
            return Err(nos_api::Error::InvalidArgument("Insufficient arguments".into()));
        }
        
        let addr = args[0] as *mut u8;
        let len = args[1] as usize;
        let prot = args[2] as u32;
        
        // TODO: Implement actual mprotect logic using parameters:
        // addr: Address of memory to protect
        // len: Length of memory to protect
        // prot: New protection flags
        #[cfg(feature = "log")]
        log::trace!("mprotect called with: addr={:?}, len={}, prot={}", addr, len, prot);
        
        // Basic validation to ensure parameters are used even when logging is disabled
        let _ = (addr, len, prot);
        
        Ok(0)
    }
    
    fn name(&self) -> &str {
        "mprotect"
    }
}