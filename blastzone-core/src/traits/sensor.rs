//! Motion sensor trait

use blastzone_hal::I2cError;
use blastzone_protocol::MotionSample;

/// Which half of a register read failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferPhase {
    /// Writing the start register address
    RegisterSelect,
    /// Reading the data registers
    BurstRead,
}

/// Errors from talking to the sensor over the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// One-time device configuration at startup failed
    ///
    /// The controller keeps running; reads may keep failing until the
    /// sensor comes up on its own.
    Config(I2cError),
    /// A per-sample transfer failed
    Transfer(TransferPhase, I2cError),
}

impl BusError {
    /// Underlying bus error
    pub fn kind(&self) -> I2cError {
        match self {
            BusError::Config(kind) | BusError::Transfer(_, kind) => *kind,
        }
    }

    /// Check if the transfer ran into its timeout
    pub fn is_timeout(&self) -> bool {
        self.kind() == I2cError::Timeout
    }
}

/// Trait for motion sensors
///
/// Implementations return the six raw data bytes of one burst read, in the
/// order the device delivers them.
pub trait MotionSensor {
    /// Read one motion sample
    ///
    /// Must return within the implementation's bus timeouts. Errors are
    /// transient from the caller's point of view; the next call simply
    /// tries again.
    fn read_motion(&mut self) -> Result<MotionSample, BusError>;
}

impl<T: MotionSensor + ?Sized> MotionSensor for &mut T {
    fn read_motion(&mut self) -> Result<MotionSample, BusError> {
        (**self).read_motion()
    }
}
