//! Controller configuration types
//!
//! Defaults match the shipped controller: MPU-6500 gyro output at `0x68`,
//! 100 ms sample period, 9600 baud, pull-up trigger button.

use blastzone_hal::gpio::Pull;
use blastzone_hal::{I2cConfig, UartConfig};
use blastzone_protocol::{EscapeMode, Revision};

use crate::trigger::Polarity;

/// Highest GPIO number accepted in pin strings (RP2040 has GPIO0-29)
pub const MAX_GPIO: u8 = 29;

/// What to send when the sensor read fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StalePolicy {
    /// Repeat the last good sample (zeros until the first success)
    #[default]
    HoldLast,
    /// Send six zero bytes
    Zeroed,
}

/// Sample loop timing and framing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SamplerConfig {
    /// Delay between cycles in milliseconds (16, 50 and 100 are common)
    pub period_ms: u32,
    /// Wire protocol revision
    pub revision: Revision,
    /// Header collision handling
    pub escape: EscapeMode,
    /// Payload used when the sensor read fails
    pub stale_policy: StalePolicy,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            period_ms: 100,
            revision: Revision::Canonical,
            escape: EscapeMode::Collision,
            stale_policy: StalePolicy::HoldLast,
        }
    }
}

/// Motion sensor bus settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// First register of the 6-byte burst read
    pub data_register: u8,
    /// Timeout for each half of a read (register select, burst read)
    pub transfer_timeout_ms: u32,
    /// Timeout for the power-on configuration write
    pub wake_timeout_ms: u32,
    /// Bus clock in Hz
    pub frequency_hz: u32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            address: 0x68,       // MPU-6500 with AD0 low
            data_register: 0x43, // GYRO_XOUT_H
            transfer_timeout_ms: 1000,
            wake_timeout_ms: 100,
            frequency_hz: 100_000,
        }
    }
}

impl SensorConfig {
    /// Bus configuration for the HAL
    pub fn i2c(&self) -> I2cConfig {
        I2cConfig {
            frequency: self.frequency_hz,
        }
    }
}

/// Serial link settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    /// Baud rate (framing is always 8N1, no flow control)
    pub baudrate: u32,
    /// How long a frame write may wait before the frame is dropped
    pub write_timeout_ms: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baudrate: 9600,
            write_timeout_ms: 100,
        }
    }
}

impl SerialConfig {
    /// UART configuration for the HAL
    pub fn uart(&self) -> UartConfig {
        UartConfig::with_baudrate(self.baudrate)
    }
}

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Parse a pin string from config
    ///
    /// Supports formats:
    /// - "gpio15" -> active-high, no pull
    /// - "!gpio15" -> active-low
    /// - "^gpio15" -> pull-up enabled
    /// - "^!gpio15" or "!^gpio15" -> pull-up, active-low
    pub fn parse(s: &str) -> Option<Self> {
        let mut s = s.trim();
        let mut inverted = false;
        let mut pull_up = false;

        loop {
            if let Some(rest) = s.strip_prefix('!') {
                if inverted {
                    return None;
                }
                inverted = true;
                s = rest;
            } else if let Some(rest) = s.strip_prefix('^') {
                if pull_up {
                    return None;
                }
                pull_up = true;
                s = rest;
            } else {
                break;
            }
        }

        let pin: u8 = s.strip_prefix("gpio")?.parse().ok()?;
        if pin > MAX_GPIO {
            return None;
        }

        Some(Self {
            pin,
            inverted,
            pull_up,
        })
    }

    /// Button polarity implied by the inversion flag
    pub fn polarity(&self) -> Polarity {
        if self.inverted {
            Polarity::ActiveLow
        } else {
            Polarity::ActiveHigh
        }
    }

    /// Internal pull resistor to enable
    pub fn pull(&self) -> Pull {
        if self.pull_up {
            Pull::Up
        } else {
            Pull::None
        }
    }
}

/// Trigger button settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TriggerConfig {
    /// Button input pin
    pub pin: PinConfig,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            pin: PinConfig {
                pin: 15,
                inverted: true,
                pull_up: true,
            },
        }
    }
}

/// Complete controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    pub sampler: SamplerConfig,
    pub sensor: SensorConfig,
    pub serial: SerialConfig,
    pub trigger: TriggerConfig,
}
