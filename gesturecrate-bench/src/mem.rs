//! Heap allocation measurements backed by an instrumented global allocator
//!
//! Benches using these must install [`INSTRUMENTED_SYSTEM`] as their
//! `#[global_allocator]`.

use stats_alloc::StatsAlloc;

pub type InstrumentedSystem = StatsAlloc<std::alloc::System>;
pub use stats_alloc::INSTRUMENTED_SYSTEM;

mod allocations;
mod allocation_size;
pub use allocations::Allocations;
pub use allocation_size::AllocationSize;
