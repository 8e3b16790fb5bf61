//! Named shared-memory segments (KSM).
//!
//! A small, fixed-size table of segments identified by a positive integer
//! key. A segment is backed by a set of physical frames mirrored into
//! every attaching process's address space at a process-chosen virtual
//! address, at up to its configured maximum size. See [`KsmService`].

use alloc::boxed::Box;
use alloc::vec::Vec;

use nos_api::core::traits::TickSource;
use nos_api::core::types::{MemoryProtection, Pid, PhysAddr, VirtAddr};
use nos_api::memory::interface::FrameAllocator;
use nos_api::{Error, KernelError, Result};
use nos_memory_management::page_table::{PageTable, SimplePageTable};
use nos_memory_management::layout::FreeBitmap;
use spin::Mutex;

use crate::config::KsmConfig;

/// External KSM handle, the 1-based slot index callers deal in.
pub type Handle = usize;

/// Produces a fresh backing page table for a newly created segment — the
/// dependency-injected "allocate the root address space" step
/// [`KsmService::get`] performs the first time a key is seen.
pub trait PageTableFactory: Send + Sync {
    /// Creates a new, empty page table to back a segment's physical frames.
    fn create(&self) -> Box<dyn PageTable>;
}

/// Default factory handing out [`SimplePageTable`]s, the in-memory fake
/// that doubles as a minimal real backend when no hardware MMU driver is
/// wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimplePageTableFactory;

impl PageTableFactory for SimplePageTableFactory {
    fn create(&self) -> Box<dyn PageTable> {
        Box::new(SimplePageTable::new())
    }
}

struct LiveSegment {
    key: i64,
    backing: Box<dyn PageTable>,
    size_bytes: usize,
    creator_pid: Pid,
    last_modifier_pid: Pid,
    attach_count: usize,
    t_attach: u64,
    t_detach: u64,
}

/// A segment-table slot. `PendingDelete` carries the same payload as
/// `Live`: the segment keeps serving existing attachments and bookkeeping
/// until its last attachment drops, at which point it is torn down.
enum Slot {
    Empty,
    Live(LiveSegment),
    PendingDelete(LiveSegment),
}

struct KsmTable {
    slots: Vec<Slot>,
    /// Tick at which each slot was last torn down, kept outside the slot
    /// itself so a fresh `Slot::Empty` write can never clobber it — the
    /// eligibility check (`get_time <= t_delete`) needs the stamp to
    /// survive the zeroing that makes the slot reusable.
    t_delete: Vec<u64>,
    total_segments: usize,
    total_shared_pages: usize,
}

/// One process's attachment to a live segment: where it's mapped and how
/// many pages it spans.
#[derive(Debug, Clone, Copy)]
pub struct Attachment {
    /// Lowest virtual address of the attachment.
    pub bottom: VirtAddr,
    /// Number of pages mapped starting at `bottom`.
    pub page_count: usize,
}

/// Per-process KSM bookkeeping: attachment table, eligibility stamps, and
/// the free-VA bitmap attachments are carved from. Owned by the process,
/// not by [`KsmService`] — every `KsmService` method that needs it takes
/// it as an explicit parameter.
pub struct ProcessKsmState {
    attach: Vec<Option<Attachment>>,
    get_time: Vec<u64>,
    free_bitmap: FreeBitmap,
    lowest_attached: VirtAddr,
    data_break: VirtAddr,
}

impl ProcessKsmState {
    /// Creates empty per-process KSM state sized for `config`.
    pub fn new(config: &KsmConfig, data_break: VirtAddr) -> Self {
        let bits = config.bitmap_pages();
        Self {
            attach: alloc::vec![None; config.n_seg],
            get_time: alloc::vec![0; config.n_seg],
            free_bitmap: FreeBitmap::new(config.user_top, bits, config.page_size),
            lowest_attached: config.user_top,
            data_break,
        }
    }

    /// Updates the process break bounding how far down attachments may be
    /// carved from `user_top`.
    pub fn set_data_break(&mut self, data_break: VirtAddr) {
        self.data_break = data_break;
    }

    /// Lowest virtual address currently covered by any attachment, or
    /// `user_top` if none.
    pub fn lowest_attached(&self) -> VirtAddr {
        self.lowest_attached
    }

    /// Returns the live attachment for `handle`, if any.
    pub fn attachment(&self, handle: Handle) -> Option<Attachment> {
        handle
            .checked_sub(1)
            .and_then(|idx| self.attach.get(idx).copied().flatten())
    }
}

/// A snapshot of a segment's bookkeeping returned by [`KsmService::info`].
#[derive(Debug, Clone, Copy)]
pub struct KsmInfo {
    /// Size of the segment in bytes.
    pub size_bytes: usize,
    /// Pid that first created the segment.
    pub creator_pid: Pid,
    /// Pid that most recently attached or detached the segment.
    pub last_modifier_pid: Pid,
    /// Number of processes currently attached.
    pub attach_count: usize,
    /// Caller's own `get_time` stamp for this handle.
    pub get_time: u64,
    /// Tick of the most recent attach.
    pub t_attach: u64,
    /// Tick of the most recent detach.
    pub t_detach: u64,
    /// Tick at which this slot was last torn down (0 if never).
    pub t_delete: u64,
    /// Number of segments currently live across the whole table.
    pub total_segments: usize,
    /// Number of physical pages currently backing live segments.
    pub total_shared_pages: usize,
}

/// The named shared-memory segment service: a fixed-size table of
/// segments shared under `ksm_lock`, plus the frame allocator and
/// page-table factory each segment's backing store is built from.
///
/// Lock order: `ksm_lock` is never held while acquiring the frame
/// allocator's lock in the other direction (frame-free happens after
/// `ksm_lock` is already taken, never the reverse), and `ksm_lock` is
/// never held across a call into a process's own page table (`attach`
/// and `detach` install/remove mappings in `dest` outside the table
/// lock's critical sections, see their bodies).
pub struct KsmService {
    config: KsmConfig,
    table: Mutex<KsmTable>,
    frames: Mutex<Box<dyn FrameAllocator>>,
    table_factory: Box<dyn PageTableFactory>,
    ticks: Box<dyn TickSource>,
}

impl KsmService {
    /// Creates a service with an empty table.
    pub fn new(
        config: KsmConfig,
        frames: Box<dyn FrameAllocator>,
        table_factory: Box<dyn PageTableFactory>,
        ticks: Box<dyn TickSource>,
    ) -> Self {
        let slots = (0..config.n_seg).map(|_| Slot::Empty).collect();
        Self {
            table: Mutex::new(KsmTable {
                slots,
                t_delete: alloc::vec![0; config.n_seg],
                total_segments: 0,
                total_shared_pages: 0,
            }),
            frames: Mutex::new(frames),
            table_factory,
            ticks,
            config,
        }
    }

    fn index_of(&self, handle: Handle) -> Result<usize> {
        if handle == 0 || handle > self.config.n_seg {
            return Err(Error::Kernel(KernelError::BadHandle));
        }
        Ok(handle - 1)
    }

    /// Number of physical pages currently backing live segments, across
    /// every process (the `pgused` companion call).
    pub fn pages_in_use(&self) -> usize {
        self.table.lock().total_shared_pages
    }

    /// Number of segments currently live in the table.
    pub fn total_segments(&self) -> usize {
        self.table.lock().total_segments
    }

    /// Looks up (or creates) the segment named by `key`.
    ///
    /// `size == 0` means "look up only": an existing segment is returned
    /// without stamping eligibility forward beyond the lookup itself, and
    /// a missing key is `NOT_CREATED` rather than `NOT_AVAILABLE`.
    pub fn get(
        &self,
        proc: &mut ProcessKsmState,
        pid: Pid,
        key: i64,
        size: usize,
    ) -> Result<Handle> {
        if key <= 0 {
            return Err(Error::Kernel(KernelError::BadKey));
        }
        if size > self.config.seg_maxsz {
            return Err(Error::Kernel(KernelError::WrongSize));
        }

        let mut table = self.table.lock();

        let mut empty_idx: Option<usize> = None;
        let mut match_idx: Option<usize> = None;
        for i in 0..table.slots.len() {
            match &table.slots[i] {
                Slot::Empty => {
                    if empty_idx.is_none() {
                        empty_idx = Some(i);
                    }
                }
                // A slot pending deletion is invisible to get(): it isn't a
                // free slot (its key is logically TO_BE_DELETED, not 0) and
                // it isn't a live match either, matching spec Invariant 1.
                Slot::PendingDelete(_) => {}
                Slot::Live(seg) => {
                    if seg.key == key {
                        match_idx = Some(i);
                        break;
                    }
                }
            }
        }

        if let Some(i) = match_idx {
            let seg_size = match &table.slots[i] {
                Slot::Live(seg) => seg.size_bytes,
                Slot::Empty | Slot::PendingDelete(_) => {
                    unreachable!("match_idx only set for live slots")
                }
            };
            return if size == 0 || size == seg_size {
                proc.get_time[i] = self.ticks.now();
                Ok(i + 1)
            } else {
                Err(Error::Kernel(KernelError::KeyTaken))
            };
        }

        let Some(i) = empty_idx else {
            return Err(Error::Kernel(KernelError::NotAvailable));
        };

        if size == 0 {
            return Err(Error::Kernel(KernelError::NotCreated));
        }

        let page_count = size.div_ceil(self.config.page_size);
        let mut backing = self.table_factory.create();
        let mut allocated: Vec<PhysAddr> = Vec::with_capacity(page_count);

        let alloc_result: Result<()> = (|| {
            let mut frames = self.frames.lock();
            for p in 0..page_count {
                let frame = frames.alloc_frame()?;
                allocated.push(frame);
                backing.map_page(p * self.config.page_size, frame, MemoryProtection::Write)?;
            }
            Ok(())
        })();

        if alloc_result.is_err() {
            let mut frames = self.frames.lock();
            for frame in allocated {
                let _ = frames.free_frame(frame);
            }
            return Err(Error::Kernel(KernelError::MemoryFull));
        }

        let now = self.ticks.now();
        table.slots[i] = Slot::Live(LiveSegment {
            key,
            backing,
            size_bytes: size,
            creator_pid: pid,
            last_modifier_pid: pid,
            attach_count: 0,
            t_attach: 0,
            t_detach: 0,
        });
        table.total_segments += 1;
        table.total_shared_pages += page_count;
        proc.get_time[i] = now;

        Ok(i + 1)
    }

    /// Decrements a slot's `attach_count` and, if it was pending deletion
    /// and just reached zero, tears it down. Must be called with
    /// `table` already locked.
    fn dec_attach_and_maybe_destroy(&self, table: &mut KsmTable, idx: usize) {
        let now_pending = matches!(table.slots[idx], Slot::PendingDelete(_));
        let attach_count = match &mut table.slots[idx] {
            Slot::Live(seg) | Slot::PendingDelete(seg) => {
                seg.attach_count -= 1;
                seg.attach_count
            }
            Slot::Empty => return,
        };
        if now_pending && attach_count == 0 {
            self.destroy_locked(table, idx);
        }
    }

    /// Frees a slot's backing frames and marks it empty. Must be called
    /// with `table` already locked.
    fn destroy_locked(&self, table: &mut KsmTable, idx: usize) {
        let slot = core::mem::replace(&mut table.slots[idx], Slot::Empty);
        if let Slot::Live(seg) | Slot::PendingDelete(seg) = slot {
            let page_count = seg.size_bytes.div_ceil(self.config.page_size);
            let mut frames = self.frames.lock();
            for p in 0..page_count {
                let va = p * self.config.page_size;
                if let Some(phys) = seg.backing.translate(va) {
                    let _ = frames.free_frame(phys);
                }
            }
            drop(frames);
            table.total_segments -= 1;
            table.total_shared_pages -= page_count;
        }
        table.t_delete[idx] = self.ticks.now();
    }

    /// Maps `handle`'s segment into `dest` at a virtual address this
    /// process chooses, returning the bottom of the new mapping. Attaching
    /// a handle this process is already attached to is idempotent and
    /// returns the existing bottom without touching `attach_count`.
    pub fn attach(
        &self,
        proc: &mut ProcessKsmState,
        dest: &mut dyn PageTable,
        pid: Pid,
        handle: Handle,
        writable: bool,
    ) -> Result<VirtAddr> {
        let idx = self.index_of(handle)?;

        if let Some(existing) = proc.attach[idx] {
            return Ok(existing.bottom);
        }

        let page_count;
        {
            let mut table = self.table.lock();
            match &table.slots[idx] {
                Slot::Empty => return Err(Error::Kernel(KernelError::NotCreated)),
                Slot::Live(seg) | Slot::PendingDelete(seg) => {
                    if proc.get_time[idx] <= table.t_delete[idx] {
                        return Err(Error::Kernel(KernelError::NotEligible));
                    }
                    page_count = seg.size_bytes.div_ceil(self.config.page_size);
                }
            }
            match &mut table.slots[idx] {
                Slot::Live(seg) | Slot::PendingDelete(seg) => seg.attach_count += 1,
                Slot::Empty => unreachable!(),
            }
        }

        let bound_pages = (self.config.user_top.saturating_sub(proc.data_break)) / self.config.page_size;
        let bottom = match proc
            .free_bitmap
            .reserve_run(page_count, bound_pages.min(proc.free_bitmap.capacity_pages()))
        {
            Some(addr) => addr,
            None => {
                let mut table = self.table.lock();
                self.dec_attach_and_maybe_destroy(&mut table, idx);
                return Err(Error::Kernel(KernelError::UserMemoryFull));
            }
        };

        {
            let mut table = self.table.lock();
            let prot = if writable {
                MemoryProtection::Write
            } else {
                MemoryProtection::Read
            };
            let copy_result: Result<()> = (|| -> Result<()> {
                match &table.slots[idx] {
                    Slot::Live(seg) | Slot::PendingDelete(seg) => {
                        for p in 0..page_count {
                            let src_va = p * self.config.page_size;
                            if let Some(phys) = seg.backing.translate(src_va) {
                                dest.map_page(bottom + src_va, phys, prot)?;
                            }
                        }
                    }
                    Slot::Empty => unreachable!(),
                }
                Ok(())
            })();

            if copy_result.is_err() {
                for p in 0..page_count {
                    let _ = dest.unmap_page(bottom + p * self.config.page_size);
                }
                proc.free_bitmap.release_run(bottom, page_count);
                self.dec_attach_and_maybe_destroy(&mut table, idx);
                return Err(copy_result.unwrap_err());
            }

            match &mut table.slots[idx] {
                Slot::Live(seg) | Slot::PendingDelete(seg) => {
                    seg.last_modifier_pid = pid;
                    seg.t_attach = self.ticks.now();
                }
                Slot::Empty => unreachable!(),
            }
        }

        if bottom < proc.lowest_attached {
            proc.lowest_attached = bottom;
        }
        proc.attach[idx] = Some(Attachment { bottom, page_count });

        Ok(bottom)
    }

    /// Unmaps `handle`'s attachment from `dest` and releases the
    /// corresponding run in the process's free-VA bitmap.
    pub fn detach(
        &self,
        proc: &mut ProcessKsmState,
        dest: &mut dyn PageTable,
        pid: Pid,
        handle: Handle,
    ) -> Result<()> {
        let idx = self.index_of(handle)?;
        let att = proc.attach[idx]
            .take()
            .ok_or(Error::Kernel(KernelError::WrongDetach))?;

        for p in 0..att.page_count {
            let _ = dest.unmap_page(att.bottom + p * self.config.page_size);
        }
        proc.free_bitmap.release_run(att.bottom, att.page_count);

        if proc.lowest_attached == att.bottom {
            proc.lowest_attached = proc
                .attach
                .iter()
                .flatten()
                .map(|a| a.bottom)
                .min()
                .unwrap_or(self.config.user_top);
        }

        let mut table = self.table.lock();
        match &mut table.slots[idx] {
            Slot::Empty => return Err(Error::Kernel(KernelError::NotCreated)),
            Slot::Live(seg) | Slot::PendingDelete(seg) => {
                seg.last_modifier_pid = pid;
                seg.t_detach = self.ticks.now();
            }
        }
        self.dec_attach_and_maybe_destroy(&mut table, idx);
        Ok(())
    }

    /// Marks `handle`'s segment for deletion. Torn down immediately if no
    /// process is currently attached, otherwise once the last attachment
    /// detaches or its owning process exits.
    pub fn delete(&self, proc: &ProcessKsmState, handle: Handle) -> Result<()> {
        let idx = self.index_of(handle)?;
        let mut table = self.table.lock();
        match &table.slots[idx] {
            Slot::Empty => return Err(Error::Kernel(KernelError::NotCreated)),
            Slot::Live(_) | Slot::PendingDelete(_) => {
                if proc.get_time[idx] <= table.t_delete[idx] {
                    return Err(Error::Kernel(KernelError::NotEligible));
                }
            }
        }

        let slot = core::mem::replace(&mut table.slots[idx], Slot::Empty);
        let seg = match slot {
            Slot::Live(seg) | Slot::PendingDelete(seg) => seg,
            Slot::Empty => unreachable!(),
        };
        let attach_count = seg.attach_count;
        table.slots[idx] = Slot::PendingDelete(seg);
        if attach_count == 0 {
            self.destroy_locked(&mut table, idx);
        }
        Ok(())
    }

    /// Returns bookkeeping for `handle`, as seen by this process.
    pub fn info(&self, proc: &ProcessKsmState, handle: Handle) -> Result<KsmInfo> {
        let idx = self.index_of(handle)?;
        let table = self.table.lock();
        match &table.slots[idx] {
            Slot::Empty => Err(Error::Kernel(KernelError::NotCreated)),
            Slot::Live(seg) | Slot::PendingDelete(seg) => {
                if proc.get_time[idx] <= table.t_delete[idx] {
                    return Err(Error::Kernel(KernelError::NotEligible));
                }
                Ok(KsmInfo {
                    size_bytes: seg.size_bytes,
                    creator_pid: seg.creator_pid,
                    last_modifier_pid: seg.last_modifier_pid,
                    attach_count: seg.attach_count,
                    get_time: proc.get_time[idx],
                    t_attach: seg.t_attach,
                    t_detach: seg.t_detach,
                    t_delete: table.t_delete[idx],
                    total_segments: table.total_segments,
                    total_shared_pages: table.total_shared_pages,
                })
            }
        }
    }

    /// Called when a process forks: every segment the parent has
    /// attached gains one more attacher, inherited by the child at the
    /// same virtual addresses (the child's address space is itself a
    /// copy of the parent's, made by the caller).
    pub fn fork_hook(&self, parent: &ProcessKsmState, child_pid: Pid) -> ProcessKsmState {
        let child = ProcessKsmState {
            attach: parent.attach.clone(),
            get_time: parent.get_time.clone(),
            free_bitmap: parent.free_bitmap.clone(),
            lowest_attached: parent.lowest_attached,
            data_break: parent.data_break,
        };

        let mut table = self.table.lock();
        for (idx, attachment) in child.attach.iter().enumerate() {
            if attachment.is_some() {
                if let Slot::Live(seg) | Slot::PendingDelete(seg) = &mut table.slots[idx] {
                    seg.attach_count += 1;
                    seg.last_modifier_pid = child_pid;
                    seg.t_attach = self.ticks.now();
                }
            }
        }

        child
    }

    /// Called when a process exits: every attachment it still held is
    /// released without touching its (about to be destroyed) page table.
    pub fn exit_hook(&self, proc: &mut ProcessKsmState) {
        let mut table = self.table.lock();
        for idx in 0..proc.attach.len() {
            if proc.attach[idx].take().is_some() {
                self.dec_attach_and_maybe_destroy(&mut table, idx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::BumpFrameAllocator;
    use crate::time::CountingTicks;

    fn service(config: KsmConfig) -> KsmService {
        let frame_count = config.n_seg * config.max_pages_per_seg();
        KsmService::new(
            config,
            Box::new(BumpFrameAllocator::new(frame_count, config.page_size)),
            Box::new(SimplePageTableFactory),
            Box::new(CountingTicks::new()),
        )
    }

    fn small_config() -> KsmConfig {
        KsmConfig {
            n_seg: 4,
            seg_maxsz: 3 * 4096,
            page_size: 4096,
            user_top: 0x1_0000_0000,
        }
    }

    #[test]
    fn get_creates_then_returns_same_handle_for_same_key() {
        let svc = service(small_config());
        let mut proc = ProcessKsmState::new(&small_config(), 0);
        let h1 = svc.get(&mut proc, 1, 42, 4096).unwrap();
        let h2 = svc.get(&mut proc, 1, 42, 0).unwrap();
        assert_eq!(h1, h2);
    }

    #[test]
    fn get_with_mismatched_size_is_key_taken() {
        let svc = service(small_config());
        let mut proc = ProcessKsmState::new(&small_config(), 0);
        svc.get(&mut proc, 1, 42, 4096).unwrap();
        let err = svc.get(&mut proc, 1, 42, 8192).unwrap_err();
        assert!(matches!(err, Error::Kernel(KernelError::KeyTaken)));
    }

    #[test]
    fn get_rejects_non_positive_key() {
        let svc = service(small_config());
        let mut proc = ProcessKsmState::new(&small_config(), 0);
        let err = svc.get(&mut proc, 1, 0, 4096).unwrap_err();
        assert!(matches!(err, Error::Kernel(KernelError::BadKey)));
    }

    #[test]
    fn get_with_zero_size_on_unknown_key_is_not_created() {
        let svc = service(small_config());
        let mut proc = ProcessKsmState::new(&small_config(), 0);
        let err = svc.get(&mut proc, 1, 7, 0).unwrap_err();
        assert!(matches!(err, Error::Kernel(KernelError::NotCreated)));
    }

    #[test]
    fn get_fills_table_then_reports_not_available() {
        let config = small_config();
        let svc = service(config);
        let mut proc = ProcessKsmState::new(&config, 0);
        for key in 1..=config.n_seg as i64 {
            svc.get(&mut proc, 1, key, 4096).unwrap();
        }
        let err = svc
            .get(&mut proc, 1, config.n_seg as i64 + 1, 4096)
            .unwrap_err();
        assert!(matches!(err, Error::Kernel(KernelError::NotAvailable)));
    }

    #[test]
    fn attach_then_detach_round_trips_and_frees_the_region() {
        let config = small_config();
        let svc = service(config);
        let mut proc = ProcessKsmState::new(&config, 0);
        let mut dest = SimplePageTable::new();

        let h = svc.get(&mut proc, 1, 1, 8192).unwrap();
        let bottom = svc.attach(&mut proc, &mut dest, 1, h, true).unwrap();
        assert!(dest.is_mapped(bottom));
        assert!(dest.is_mapped(bottom + config.page_size));

        svc.detach(&mut proc, &mut dest, 1, h).unwrap();
        assert!(!dest.is_mapped(bottom));
        assert!(proc.attachment(h).is_none());
    }

    #[test]
    fn attach_is_idempotent_and_does_not_bump_attach_count_twice() {
        let config = small_config();
        let svc = service(config);
        let mut proc = ProcessKsmState::new(&config, 0);
        let mut dest = SimplePageTable::new();

        let h = svc.get(&mut proc, 1, 1, 4096).unwrap();
        let first = svc.attach(&mut proc, &mut dest, 1, h, true).unwrap();
        let second = svc.attach(&mut proc, &mut dest, 1, h, true).unwrap();
        assert_eq!(first, second);

        let info = svc.info(&proc, h).unwrap();
        assert_eq!(info.attach_count, 1);
    }

    #[test]
    fn detach_without_attach_is_wrong_detach() {
        let config = small_config();
        let svc = service(config);
        let mut proc = ProcessKsmState::new(&config, 0);
        let mut dest = SimplePageTable::new();

        let h = svc.get(&mut proc, 1, 1, 4096).unwrap();
        let err = svc.detach(&mut proc, &mut dest, 1, h).unwrap_err();
        assert!(matches!(err, Error::Kernel(KernelError::WrongDetach)));
    }

    #[test]
    fn delete_with_no_attachments_destroys_immediately() {
        let config = small_config();
        let svc = service(config);
        let mut proc = ProcessKsmState::new(&config, 0);

        let h = svc.get(&mut proc, 1, 1, 4096).unwrap();
        svc.delete(&proc, h).unwrap();

        // Same key now creates a brand-new segment at the same handle.
        let h2 = svc.get(&mut proc, 1, 1, 4096).unwrap();
        assert_eq!(h, h2);
    }

    #[test]
    fn delete_with_live_attachment_defers_until_last_detach() {
        let config = small_config();
        let svc = service(config);
        let mut proc = ProcessKsmState::new(&config, 0);
        let mut dest = SimplePageTable::new();

        let h = svc.get(&mut proc, 1, 1, 4096).unwrap();
        svc.attach(&mut proc, &mut dest, 1, h, true).unwrap();
        svc.delete(&proc, h).unwrap();

        // Still mapped: the segment isn't torn down while attached.
        assert_eq!(svc.total_segments(), 1);

        svc.detach(&mut proc, &mut dest, 1, h).unwrap();
        assert_eq!(svc.total_segments(), 0);
    }

    #[test]
    fn get_without_attach_then_exit_loses_eligibility() {
        // A process that calls get() (stamping get_time) but never
        // attaches, then exits without detaching anything, leaves its
        // get_time stamp stale forever. If another process later deletes
        // and recreates the same slot, a *third* process doing a fresh
        // get() on the new segment is fully eligible; but if this exact
        // scenario recurs for the original caller's slot index before it
        // ever looked again, eligibility is governed purely by
        // get_time vs t_delete, matching upstream behavior exactly rather
        // than adding a fix-up this spec doesn't call for.
        let config = small_config();
        let svc = service(config);
        let mut caller = ProcessKsmState::new(&config, 0);

        let h = svc.get(&mut caller, 1, 9, 4096).unwrap();
        // No attach; caller "exits" (nothing to release since attach[]
        // has no entry for h).

        svc.delete(&caller, h).unwrap();
        let recreated = svc.get(&mut caller, 2, 9, 4096).unwrap();
        assert_eq!(h, recreated);

        // caller's get_time was refreshed by the second get() above, so
        // it is eligible again; a *different* process that never called
        // get() again after the delete is not.
        let mut stale = ProcessKsmState::new(&config, 0);
        stale.get_time[h - 1] = 0;
        let err = svc.info(&stale, h).unwrap_err();
        assert!(matches!(err, Error::Kernel(KernelError::NotEligible)));
    }

    #[test]
    fn info_on_unknown_handle_is_not_created() {
        let config = small_config();
        let svc = service(config);
        let proc = ProcessKsmState::new(&config, 0);
        let err = svc.info(&proc, 1).unwrap_err();
        assert!(matches!(err, Error::Kernel(KernelError::NotCreated)));
    }

    #[test]
    fn info_with_handle_zero_is_bad_handle() {
        let config = small_config();
        let svc = service(config);
        let proc = ProcessKsmState::new(&config, 0);
        let err = svc.info(&proc, 0).unwrap_err();
        assert!(matches!(err, Error::Kernel(KernelError::BadHandle)));
    }

    #[test]
    fn fork_hook_shares_parent_attachments_and_bumps_attach_count() {
        let config = small_config();
        let svc = service(config);
        let mut parent = ProcessKsmState::new(&config, 0);
        let mut dest = SimplePageTable::new();

        let h = svc.get(&mut parent, 1, 1, 4096).unwrap();
        svc.attach(&mut parent, &mut dest, 1, h, true).unwrap();

        let child = svc.fork_hook(&parent, 2);
        assert_eq!(child.attachment(h), parent.attachment(h));

        let info = svc.info(&parent, h).unwrap();
        assert_eq!(info.attach_count, 2);
    }

    #[test]
    fn exit_hook_releases_every_attachment() {
        let config = small_config();
        let svc = service(config);
        let mut proc = ProcessKsmState::new(&config, 0);
        let mut dest = SimplePageTable::new();

        let h = svc.get(&mut proc, 1, 1, 4096).unwrap();
        svc.attach(&mut proc, &mut dest, 1, h, true).unwrap();
        svc.delete(&proc, h).unwrap();

        svc.exit_hook(&mut proc);
        assert_eq!(svc.total_segments(), 0);
    }

    #[test]
    fn pages_in_use_tracks_live_backing_pages() {
        let config = small_config();
        let svc = service(config);
        let mut proc = ProcessKsmState::new(&config, 0);

        assert_eq!(svc.pages_in_use(), 0);
        svc.get(&mut proc, 1, 1, 8192).unwrap();
        assert_eq!(svc.pages_in_use(), 2);
    }

    #[test]
    fn get_exhausting_backing_memory_rolls_back_cleanly() {
        let config = KsmConfig {
            n_seg: 2,
            seg_maxsz: 2 * 4096,
            page_size: 4096,
            user_top: 0x1_0000_0000,
        };
        // Only one frame available: the second page of a 2-page segment
        // can't be backed.
        let svc = KsmService::new(
            config,
            Box::new(BumpFrameAllocator::new(1, config.page_size)),
            Box::new(SimplePageTableFactory),
            Box::new(CountingTicks::new()),
        );
        let mut proc = ProcessKsmState::new(&config, 0);
        let err = svc.get(&mut proc, 1, 1, 8192).unwrap_err();
        assert!(matches!(err, Error::Kernel(KernelError::MemoryFull)));
        assert_eq!(svc.total_segments(), 0);
    }
}
