//! LayoutPulse - Memory-layout profiling tool
//!
//! LayoutPulse is a CPU-bound benchmarking tool that measures how the in-memory
//! representation of a dataset affects the cost of a fixed per-record
//! transformation. The same workload runs against two layouts:
//!
//! - **Array-of-records**: an ordered `Vec` of records; each worker receives a
//!   copy of its slice and the coordinator copies the mutated records back.
//! - **Structure-of-arrays**: four parallel column buffers in a single arena;
//!   each worker writes through a view restricted to its assigned index range,
//!   so results are visible without copying.
//!
//! # Architecture
//!
//! - **Chunked dispatch**: the coordinator partitions `[0, N)` into disjoint
//!   contiguous chunks, one per worker thread
//! - **Sequential workers**: each worker burns CPU over its range and emits a
//!   single completion signal when done
//! - **Comprehensive stats**: per-chunk latency histograms, records/sec,
//!   per-worker and aggregate views
//! - **Flexible output**: text comparison, JSON and CSV export

pub mod chunk;
pub mod compute;
pub mod config;
pub mod coordinator;
pub mod dataset;
pub mod output;
pub mod stats;
pub mod util;
pub mod worker;

// Re-export commonly used types
pub use chunk::ChunkSpec;
pub use config::Config;
pub use dataset::Record;

/// Result type used throughout LayoutPulse
pub type Result<T> = anyhow::Result<T>;
