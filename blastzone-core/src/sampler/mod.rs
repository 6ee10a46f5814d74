//! Sample loop and its counters

mod sample_loop;
pub mod stats;

pub use sample_loop::{CycleReport, DropReason, SampleLoop, SampleSource, WriteOutcome};
pub use stats::{SampleStats, BUS_ERROR_LOG_INTERVAL};
