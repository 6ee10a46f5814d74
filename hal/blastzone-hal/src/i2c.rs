//! I2C bus abstractions
//!
//! Provides the blocking, timeout-bounded I2C master operations the sensor
//! driver is built on.

/// Errors reported by an I2C transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cError {
    /// Device did not acknowledge its address or a data byte
    Nack,
    /// Transfer did not complete within the requested timeout
    Timeout,
    /// Another master won arbitration
    ArbitrationLost,
    /// Bus error (misplaced START/STOP)
    Bus,
    /// Receive overrun
    Overrun,
    /// Any other controller-specific failure
    Other,
}

/// I2C bus master
///
/// Each call is a single bus transaction against a 7-bit address and must
/// return within `timeout_ms`, reporting [`I2cError::Timeout`] otherwise.
pub trait I2cBus {
    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    /// * `timeout_ms` - Upper bound on the transfer duration
    fn write(&mut self, address: u8, data: &[u8], timeout_ms: u32) -> Result<(), I2cError>;

    /// Read data from a device at the given address
    ///
    /// Fills the whole of `buf`.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    /// * `timeout_ms` - Upper bound on the transfer duration
    fn read(&mut self, address: u8, buf: &mut [u8], timeout_ms: u32) -> Result<(), I2cError>;
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    fn write(&mut self, address: u8, data: &[u8], timeout_ms: u32) -> Result<(), I2cError> {
        (**self).write(address, data, timeout_ms)
    }

    fn read(&mut self, address: u8, buf: &mut [u8], timeout_ms: u32) -> Result<(), I2cError> {
        (**self).read(address, buf, timeout_ms)
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };
}
