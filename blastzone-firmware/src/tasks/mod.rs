//! Embassy async tasks
//!
//! The controller runs a single loop; it is driven from the main task.

pub mod sample;

pub use sample::sample_loop;
