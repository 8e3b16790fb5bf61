//! NOS IPC - Named shared-memory segments (KSM) and counting semaphores (SEM)
//!
//! This crate implements two small, fixed-size kernel-resident IPC
//! tables, each identified by a positive integer key/name rather than a
//! filesystem path:
//!
//! - [`ksm`] - named shared-memory **segments**: a process attaches a
//!   segment's backing frames into its own address space at a location it
//!   chooses, detaches it, or marks it for deletion.
//! - [`sem`] - named counting **semaphores**: a bounded, non-negative
//!   counter with blocking `wait` and non-blocking `signal`.
//!
//! Both tables share the same eligibility discipline: every slot carries
//! a generation stamp (`t_delete`) advanced each time the slot is torn
//! down, and every process caches a `get_time` stamp per handle from its
//! last successful lookup. An operation on a handle is only honored while
//! `get_time > t_delete` - once a slot has been deleted and (possibly)
//! reused for a different key, a caller holding a handle from before the
//! delete is rejected rather than silently operating on someone else's
//! segment or semaphore.
//!
//! # Design
//!
//! Neither table depends on a concrete scheduler, MMU, or physical
//! allocator. They depend on narrow capability traits from `nos_api`
//! instead - [`nos_api::FrameAllocator`], [`nos_memory_management::PageTable`],
//! [`nos_api::TickSource`], [`nos_api::WaitChannel`] - so the services in
//! this crate can be exercised against in-memory fakes in unit tests and
//! wired to real hardware-backed implementations elsewhere in the
//! workspace without code here changing.

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

pub mod config;
pub mod error;
pub mod frame;
pub mod ksm;
pub mod sem;
pub mod time;
pub mod wait;

pub use config::{KsmConfig, SemConfig};
pub use frame::BumpFrameAllocator;
pub use ksm::{
    Attachment, Handle as KsmHandle, KsmInfo, KsmService, PageTableFactory, ProcessKsmState,
    SimplePageTableFactory,
};
pub use sem::{Handle as SemHandle, ProcessSemState, SemService};
pub use time::CountingTicks;
pub use wait::SpinWaitChannel;
