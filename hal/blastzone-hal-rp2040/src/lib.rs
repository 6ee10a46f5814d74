//! RP2040-specific HAL for the controller firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `blastzone-hal` traits:
//!
//! - Timeout-bounded blocking I2C over the async embassy driver
//! - Timeout-bounded blocking UART transmit over the buffered driver
//! - Button input and config-driven pin selection

#![cfg_attr(not(test), no_std)]

pub mod gpio;
pub mod i2c;
pub mod uart;

pub use gpio::ButtonInput;
pub use i2c::TimedI2c;
pub use uart::TimedUartTx;
