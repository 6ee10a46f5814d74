//! Trigger button handling
//!
//! The trigger is polled once per sample and reported as a one-cycle pulse
//! on the press edge.

pub mod tracker;

pub use tracker::{Polarity, TriggerState, TriggerTracker};
