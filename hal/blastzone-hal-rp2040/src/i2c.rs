//! Blocking I2C with timeouts
//!
//! The sample loop is synchronous, but the embassy RP2040 driver is async.
//! Each transfer is driven to completion with `block_on`, bounded by
//! `with_timeout`; a transfer that runs out of time is dropped, which
//! aborts it in the peripheral.

use blastzone_hal::{I2cBus, I2cConfig, I2cError};
use embassy_futures::block_on;
use embassy_time::{with_timeout, Duration};
use embedded_hal::i2c::{Error as _, ErrorKind};
use embedded_hal_async::i2c::I2c;

/// I2C master with per-transfer timeouts
pub struct TimedI2c<B> {
    bus: B,
}

impl<B> TimedI2c<B> {
    /// Wrap an async I2C master
    pub fn new(bus: B) -> Self {
        Self { bus }
    }
}

impl<B: I2c> I2cBus for TimedI2c<B> {
    fn write(&mut self, address: u8, data: &[u8], timeout_ms: u32) -> Result<(), I2cError> {
        let transfer = with_timeout(
            Duration::from_millis(timeout_ms as u64),
            self.bus.write(address, data),
        );
        match block_on(transfer) {
            Ok(result) => result.map_err(|e| map_error(e.kind())),
            Err(_) => Err(I2cError::Timeout),
        }
    }

    fn read(&mut self, address: u8, buf: &mut [u8], timeout_ms: u32) -> Result<(), I2cError> {
        let transfer = with_timeout(
            Duration::from_millis(timeout_ms as u64),
            self.bus.read(address, buf),
        );
        match block_on(transfer) {
            Ok(result) => result.map_err(|e| map_error(e.kind())),
            Err(_) => Err(I2cError::Timeout),
        }
    }
}

/// Convert an embedded-hal error kind into the HAL error
pub fn map_error(kind: ErrorKind) -> I2cError {
    match kind {
        ErrorKind::Bus => I2cError::Bus,
        ErrorKind::ArbitrationLoss => I2cError::ArbitrationLost,
        ErrorKind::NoAcknowledge(_) => I2cError::Nack,
        ErrorKind::Overrun => I2cError::Overrun,
        _ => I2cError::Other,
    }
}

/// Peripheral configuration for the embassy driver
pub fn to_rp_config(config: &I2cConfig) -> embassy_rp::i2c::Config {
    let mut rp = embassy_rp::i2c::Config::default();
    rp.frequency = config.frequency;
    rp
}
