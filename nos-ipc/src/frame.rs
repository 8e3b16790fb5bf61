//! A minimal physical-frame allocator.

use nos_api::core::types::{PageNum, PhysAddr, Size};
use nos_api::memory::interface::FrameAllocator;
use nos_api::{Error, KernelError, Result};

/// Hands out frames by bumping a counter from a fixed capacity.
///
/// No free list: freed frames are only tracked to keep
/// [`free_frames`](FrameAllocator::free_frames) accurate, never reused.
/// That's fine for KSM, which frees a segment's frames exactly once, when
/// its last attachment drops and it has been marked for deletion — it
/// never hands a freed frame back out under a new key.
///
/// Usable both as a real backend on hosts with no hardware frame
/// allocator wired in yet, and as the test double KSM's own unit tests
/// exercise against.
pub struct BumpFrameAllocator {
    next: usize,
    capacity: usize,
    freed: usize,
    page_size: usize,
}

impl BumpFrameAllocator {
    /// Creates an allocator with `capacity_frames` frames of `page_size` bytes each.
    pub fn new(capacity_frames: usize, page_size: usize) -> Self {
        Self {
            next: 0,
            capacity: capacity_frames,
            freed: 0,
            page_size,
        }
    }
}

impl FrameAllocator for BumpFrameAllocator {
    fn alloc_frame(&mut self) -> Result<PhysAddr> {
        if self.next >= self.capacity {
            return Err(Error::Kernel(KernelError::MemoryFull));
        }
        self.next += 1;
        Ok(self.next * self.page_size)
    }

    fn free_frame(&mut self, _addr: PhysAddr) -> Result<()> {
        self.freed += 1;
        Ok(())
    }

    fn frame_size(&self) -> Size {
        self.page_size
    }

    fn free_frames(&self) -> PageNum {
        self.capacity - self.next + self.freed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_distinct_frames_until_exhausted() {
        let mut alloc = BumpFrameAllocator::new(2, 4096);
        let a = alloc.alloc_frame().unwrap();
        let b = alloc.alloc_frame().unwrap();
        assert_ne!(a, b);
        assert!(matches!(
            alloc.alloc_frame(),
            Err(Error::Kernel(KernelError::MemoryFull))
        ));
    }

    #[test]
    fn free_frames_accounts_for_frees() {
        let mut alloc = BumpFrameAllocator::new(4, 4096);
        assert_eq!(alloc.free_frames(), 4);
        let a = alloc.alloc_frame().unwrap();
        assert_eq!(alloc.free_frames(), 3);
        alloc.free_frame(a).unwrap();
        assert_eq!(alloc.free_frames(), 4);
    }
}
