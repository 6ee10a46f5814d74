//! Board-agnostic core logic for the controller firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Sensor abstraction trait and bus error types
//! - Trigger edge detection
//! - The fixed-period sample loop
//! - Configuration types and the `controller.toml` parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod sampler;
pub mod traits;
pub mod trigger;
