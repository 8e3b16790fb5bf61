//! Virtual memory management module

use nos_api::Result;
use crate::physical::{PAGE_SIZE, PAGE_SHIFT, page_round_up, page_round_down};

/// A virtual address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct VirtAddr(pub usize);

impl VirtAddr {
    /// Creates a new virtual address from a raw usize value.
    pub const fn new(addr: usize) -> Self {
        Self(addr)
    }

    /// Returns the virtual address as a raw usize value.
    pub const fn as_usize(self) -> usize {
        self.0
    }

    /// Returns the offset within the current page.
    pub const fn page_offset(self) -> usize {
        self.0 & (PAGE_SIZE - 1)
    }

    /// Returns the page number for this virtual address.
    pub const fn page_number(self) -> usize {
        self.0 >> PAGE_SHIFT
    }

    /// Checks if the virtual address is page-aligned.
    pub const fn is_page_aligned(self) -> bool {
        self.page_offset() == 0
    }

    /// Rounds up the virtual address to the next page boundary.
    pub const fn page_round_up(self) -> Self {
        Self(page_round_up(self.0))
    }

    /// Rounds down the virtual address to the previous page boundary.
    pub const fn page_round_down(self) -> Self {
        Self(page_round_down(self.0))
    }

    /// Get page table indices for this virtual address (for 4-level paging)
    #[cfg(target_arch = "x86_64")]
    pub const fn page_table_indices(self) -> [usize; 4] {
        [
            (self.0 >> 39) & 0x1FF, // PML4
            (self.0 >> 30) & 0x1FF, // PDPT
            (self.0 >> 21) & 0x1FF, // PD
            (self.0 >> 12) & 0x1FF, // PT
        ]
    }

    /// Get page table indices for Sv39 (RISC-V)
    #[cfg(target_arch = "riscv64")]
    pub const fn page_table_indices(self) -> [usize; 3] {
        [
            (self.0 >> 30) & 0x1FF, // VPN[2]
            (self.0 >> 21) & 0x1FF, // VPN[1]
            (self.0 >> 12) & 0x1FF, // VPN[0]
        ]
    }

    /// Get page table indices for AArch64 4KB granule
    #[cfg(target_arch = "aarch64")]
    pub const fn page_table_indices(self) -> [usize; 4] {
        [
            (self.0 >> 39) & 0x1FF, // L0
            (self.0 >> 30) & 0x1FF, // L1
            (self.0 >> 21) & 0x1FF, // L2
            (self.0 >> 12) & 0x1FF, // L3
        ]
    }
}

impl From<usize> for VirtAddr {
    fn from(addr: usize) -> Self {
        Self(addr)
    }
}

impl From<VirtAddr> for usize {
    fn from(addr: VirtAddr) -> Self {
        addr.0
    }
}

/// Initialize virtual memory management
pub fn initialize() -> Result<()> {
    // Initialize virtual memory management
    Ok(())
}

/// Shutdown virtual memory management
pub fn shutdown() -> Result<()> {
    // Shutdown virtual memory management
    Ok(())
}

/// Get total virtual memory
pub fn get_total_memory() -> usize {
    // Return total virtual memory size
    2048 * 1024 * 1024 // 2GB placeholder
}

/// Get available virtual memory
pub fn get_available_memory() -> usize {
    // Return available virtual memory size
    1024 * 1024 * 1024 // 1GB placeholder
}
