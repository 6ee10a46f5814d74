//! BlastZone Hardware Abstraction Layer
//!
//! This crate defines the narrow hardware interfaces the controller core
//! depends on. Chip-specific crates (currently RP2040) implement them, and
//! host tests implement them with in-memory mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  blastzone-firmware                     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  blastzone-core / blastzone-drivers     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  blastzone-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  blastzone-hal-rp2040                   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Polled digital input
//! - [`uart::UartTx`] - Serial transmit with timeout
//! - [`i2c::I2cBus`] - I2C master read/write with timeout

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::InputPin;
pub use i2c::{I2cBus, I2cConfig, I2cError};
pub use uart::{UartConfig, UartError, UartTx};
