//! Heap accounting for the `memory_bytes` field.
//!
//! Allocation can only be attributed to a region when [`TrackingAllocator`] is the
//! process-wide allocator. The binary installs it:
//!
//! ```ignore
//! use crosslang_bench::heap::TrackingAllocator;
//!
//! #[global_allocator]
//! static ALLOC: TrackingAllocator = TrackingAllocator;
//! ```
//!
//! Without it every region reports the `0` "not measured" sentinel.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub struct TrackingAllocator;

struct HeapCounters {
    installed: AtomicBool,
    current: AtomicUsize,
    peak: AtomicUsize,
}

static COUNTERS: HeapCounters = HeapCounters {
    installed: AtomicBool::new(false),
    current: AtomicUsize::new(0),
    peak: AtomicUsize::new(0),
};

// SAFETY: every call forwards to `System` with the caller's layout; only counters are added.
unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        record_dealloc(layout.size());
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn realloc(&self, ptr: *mut u8, old_layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, old_layout, new_size) };
        if !new_ptr.is_null() {
            let old = old_layout.size();
            if new_size > old {
                record_alloc(new_size - old);
            } else {
                record_dealloc(old - new_size);
            }
        }
        new_ptr
    }
}

fn record_alloc(size: usize) {
    if !COUNTERS.installed.load(Ordering::Relaxed) {
        COUNTERS.installed.store(true, Ordering::Relaxed);
    }
    let current = COUNTERS
        .current
        .fetch_add(size, Ordering::Relaxed)
        .saturating_add(size);
    COUNTERS.peak.fetch_max(current, Ordering::Relaxed);
}

fn record_dealloc(size: usize) {
    COUNTERS.current.fetch_sub(size, Ordering::Relaxed);
}

/// True once [`TrackingAllocator`] has served an allocation.
pub fn is_tracking() -> bool {
    COUNTERS.installed.load(Ordering::Relaxed)
}

/// Live heap bytes seen by the tracker.
pub fn live_bytes() -> usize {
    COUNTERS.current.load(Ordering::Relaxed)
}

/// Peak heap growth over a region.
///
/// Resets the global peak on start, so regions must not overlap. The suite is
/// sequential, which keeps that true.
#[derive(Debug)]
pub struct HeapRegion {
    baseline: Option<usize>,
}

impl HeapRegion {
    pub fn start() -> Self {
        if !is_tracking() {
            return Self { baseline: None };
        }
        let current = COUNTERS.current.load(Ordering::Relaxed);
        COUNTERS.peak.store(current, Ordering::Relaxed);
        Self {
            baseline: Some(current),
        }
    }

    /// Bytes by which the heap peak exceeded the start level; `0` when untracked.
    pub fn peak_growth_bytes(&self) -> i64 {
        match self.baseline {
            Some(baseline) => {
                let peak = COUNTERS.peak.load(Ordering::Relaxed);
                i64::try_from(peak.saturating_sub(baseline)).unwrap_or(i64::MAX)
            }
            None => 0,
        }
    }
}
