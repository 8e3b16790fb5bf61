//! Table sizes and address-space bounds for the KSM and SEM services.

/// Configuration for the KSM (named shared-memory segment) table.
#[derive(Debug, Clone, Copy)]
pub struct KsmConfig {
    /// Number of segment-table slots.
    pub n_seg: usize,
    /// Maximum size of a single segment, in bytes.
    pub seg_maxsz: usize,
    /// Page size in bytes.
    pub page_size: usize,
    /// Top of the user-virtual-address range attachments are carved from.
    pub user_top: usize,
}

impl KsmConfig {
    /// Maximum number of pages a single segment can occupy at its configured
    /// maximum size.
    pub fn max_pages_per_seg(&self) -> usize {
        self.seg_maxsz.div_ceil(self.page_size)
    }

    /// Width, in pages, of the per-process free-VA bitmap. Sized to cover
    /// every slot attached simultaneously at maximum size, since a process
    /// may in principle attach every live segment at once.
    pub fn bitmap_pages(&self) -> usize {
        self.n_seg * self.max_pages_per_seg()
    }
}

impl Default for KsmConfig {
    fn default() -> Self {
        Self {
            n_seg: 64,
            seg_maxsz: 2 * 1024 * 1024,
            page_size: 4096,
            user_top: 0x0000_7FFF_FFFF_F000,
        }
    }
}

/// Configuration for the SEM (named counting-semaphore) table.
#[derive(Debug, Clone, Copy)]
pub struct SemConfig {
    /// Number of semaphore-table slots.
    pub n_sem: usize,
    /// Maximum value a semaphore's counter may hold.
    pub max_val: i64,
}

impl Default for SemConfig {
    fn default() -> Self {
        Self {
            n_sem: 128,
            max_val: i32::MAX as i64,
        }
    }
}
