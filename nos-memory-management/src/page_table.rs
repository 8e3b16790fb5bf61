//! Page table management module

extern crate alloc;

use alloc::collections::BTreeMap;

use nos_api::core::types::{MemoryProtection, PhysAddr, VirtAddr};
use nos_api::memory::interface::AddressSpace as AddressSpaceCapability;
use nos_api::{KernelError, Result};

/// Initialize page table management
pub fn initialize() -> Result<()> {
    // Initialize page table management
    Ok(())
}

/// Shutdown page table management
pub fn shutdown() -> Result<()> {
    // Shutdown page table management
    Ok(())
}

/// Get page size
pub fn get_page_size() -> usize {
    // Return page size
    4096 // 4KB pages
}

/// Get total pages
pub fn get_total_pages() -> usize {
    // Return total number of pages
    524288 // 2GB / 4KB
}

/// Get free pages
pub fn get_free_pages() -> usize {
    // Return number of free pages
    262144 // Half of pages are free
}

/// Get allocated pages
pub fn get_allocated_pages() -> usize {
    // Return number of allocated pages
    262144 // Half of pages are allocated
}

/// A single page table entry as tracked by [`SimplePageTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pte {
    /// Backing physical frame
    pub phys: PhysAddr,
    /// Protection bits for this mapping
    pub prot: MemoryProtection,
}

/// Page-table trait for address-space-scoped mapping operations.
///
/// This is the same small capability as
/// [`nos_api::memory::interface::AddressSpace`], re-exported here under
/// the name this crate's callers already expect, plus a couple of
/// iteration helpers a real multi-level page table and the in-memory
/// [`SimplePageTable`] fake can both implement cheaply.
pub trait PageTable: AddressSpaceCapability {
    /// Returns every currently mapped virtual page, in ascending order.
    fn mapped_pages(&self) -> alloc::vec::Vec<VirtAddr>;

    /// Copies every mapping from `self` into `dest`, calling `dest.map_page`
    /// once per present page. A real multi-level implementation may skip
    /// whole leaf tables at once when they are entirely absent; this
    /// default walks `mapped_pages()` one page at a time, which is
    /// observably identical but not the fast path.
    fn copy_range(&self, dest: &mut dyn PageTable) -> Result<()> {
        for va in self.mapped_pages() {
            let pte = self
                .translate(va)
                .ok_or(nos_api::Error::Kernel(KernelError::BadHandle))?;
            dest.map_page(va, pte, self.protection_of(va).unwrap_or(MemoryProtection::Read))?;
        }
        Ok(())
    }

    /// Returns the protection bits mapped at `virt`, if any.
    fn protection_of(&self, virt: VirtAddr) -> Option<MemoryProtection>;
}

/// In-memory page table backed by a `BTreeMap<VirtAddr, Pte>`.
///
/// Used both as a minimal real backend for hosts with no hardware MMU
/// to drive, and as the test double callers exercise their page-table
/// consumers against without a real address space.
#[derive(Debug, Default)]
pub struct SimplePageTable {
    entries: BTreeMap<usize, Pte>,
}

impl SimplePageTable {
    /// Creates an empty page table with no mappings.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Returns the number of pages currently mapped.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no pages are mapped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AddressSpaceCapability for SimplePageTable {
    fn map_page(&mut self, virt: VirtAddr, phys: PhysAddr, prot: MemoryProtection) -> Result<()> {
        self.entries.insert(virt, Pte { phys, prot });
        Ok(())
    }

    fn unmap_page(&mut self, virt: VirtAddr) -> Result<()> {
        self.entries
            .remove(&virt)
            .map(|_| ())
            .ok_or(nos_api::Error::Kernel(KernelError::WrongDetach))
    }

    fn translate(&self, virt: VirtAddr) -> Option<PhysAddr> {
        self.entries.get(&virt).map(|pte| pte.phys)
    }
}

impl PageTable for SimplePageTable {
    fn mapped_pages(&self) -> alloc::vec::Vec<VirtAddr> {
        self.entries.keys().copied().collect()
    }

    fn protection_of(&self, virt: VirtAddr) -> Option<MemoryProtection> {
        self.entries.get(&virt).map(|pte| pte.prot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_then_translate_round_trips() {
        let mut pt = SimplePageTable::new();
        pt.map_page(0x1000, 0x8000, MemoryProtection::ReadWriteExecute)
            .unwrap();
        assert_eq!(pt.translate(0x1000), Some(0x8000));
        assert!(pt.is_mapped(0x1000));
        assert!(!pt.is_mapped(0x2000));
    }

    #[test]
    fn unmap_removes_entry() {
        let mut pt = SimplePageTable::new();
        pt.map_page(0x1000, 0x8000, MemoryProtection::Read).unwrap();
        pt.unmap_page(0x1000).unwrap();
        assert_eq!(pt.translate(0x1000), None);
    }

    #[test]
    fn unmap_missing_page_is_wrong_detach() {
        let mut pt = SimplePageTable::new();
        let err = pt.unmap_page(0x1000).unwrap_err();
        assert!(matches!(
            err,
            nos_api::Error::Kernel(KernelError::WrongDetach)
        ));
    }

    #[test]
    fn copy_range_mirrors_every_mapping() {
        let mut src = SimplePageTable::new();
        src.map_page(0x1000, 0x9000, MemoryProtection::Read).unwrap();
        src.map_page(0x2000, 0xa000, MemoryProtection::ReadWriteExecute)
            .unwrap();

        let mut dest = SimplePageTable::new();
        src.copy_range(&mut dest).unwrap();

        assert_eq!(dest.len(), 2);
        assert_eq!(dest.translate(0x1000), Some(0x9000));
        assert_eq!(dest.translate(0x2000), Some(0xa000));
    }
}
