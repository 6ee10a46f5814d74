//! MPU-6500 motion sensor (I2C mode)
//!
//! Six-axis IMU. The controller only uses the gyroscope output, read as one
//! burst of six registers starting at `GYRO_XOUT_H`:
//!
//! ```text
//! write [0x43]           register pointer
//! read  6 bytes          XH XL YH YL ZH ZL (big-endian i16 per axis)
//! ```
//!
//! The device powers up in sleep mode; [`Mpu6500::wake`] clears
//! `PWR_MGMT_1` once at startup.

use blastzone_core::config::SensorConfig;
use blastzone_core::traits::{BusError, MotionSensor, TransferPhase};
use blastzone_hal::I2cBus;
use blastzone_protocol::{MotionSample, MOTION_LEN};

/// Default 7-bit address (AD0 pin low)
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// MPU-6500 register addresses
pub mod reg {
    /// First accelerometer output register
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    /// First gyroscope output register
    pub const GYRO_XOUT_H: u8 = 0x43;
    /// Power management 1 (sleep, clock source, reset)
    pub const PWR_MGMT_1: u8 = 0x6B;
}

/// MPU-6500 driver over a blocking I2C bus
pub struct Mpu6500<I2C> {
    bus: I2C,
    address: u8,
    data_register: u8,
    transfer_timeout_ms: u32,
    wake_timeout_ms: u32,
}

impl<I2C: I2cBus> Mpu6500<I2C> {
    /// Create a new driver
    ///
    /// Does not touch the bus; call [`wake`](Self::wake) before sampling.
    pub fn new(bus: I2C, config: &SensorConfig) -> Self {
        Self {
            bus,
            address: config.address,
            data_register: config.data_register,
            transfer_timeout_ms: config.transfer_timeout_ms,
            wake_timeout_ms: config.wake_timeout_ms,
        }
    }

    /// Bring the device out of sleep mode
    ///
    /// Writes 0 to `PWR_MGMT_1`. A failure here is not fatal: the caller
    /// keeps sampling and reads fail until the sensor answers.
    pub fn wake(&mut self) -> Result<(), BusError> {
        self.bus
            .write(self.address, &[reg::PWR_MGMT_1, 0x00], self.wake_timeout_ms)
            .map_err(BusError::Config)
    }

    /// Configured bus address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.bus
    }
}

impl<I2C: I2cBus> MotionSensor for Mpu6500<I2C> {
    fn read_motion(&mut self) -> Result<MotionSample, BusError> {
        self.bus
            .write(self.address, &[self.data_register], self.transfer_timeout_ms)
            .map_err(|e| BusError::Transfer(TransferPhase::RegisterSelect, e))?;

        let mut raw = [0u8; MOTION_LEN];
        self.bus
            .read(self.address, &mut raw, self.transfer_timeout_ms)
            .map_err(|e| BusError::Transfer(TransferPhase::BurstRead, e))?;

        Ok(MotionSample(raw))
    }
}
