//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in blastzone-core:
//!
//! - Motion sensors (MPU-6500 over I2C)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod sensor;
