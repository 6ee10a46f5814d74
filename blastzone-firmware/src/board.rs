//! Controller board wiring
//!
//! Serial and sensor pins are soldered; only the trigger pin comes from
//! the configuration.

use defmt::*;

/// UART0 TX to the game
pub const SERIAL_TX: u8 = 0;
/// UART0 RX (unused, claimed by the peripheral)
pub const SERIAL_RX: u8 = 1;
/// I2C0 SDA to the MPU-6500
pub const SENSOR_SDA: u8 = 4;
/// I2C0 SCL to the MPU-6500
pub const SENSOR_SCL: u8 = 5;
/// Trigger button on the stock board
pub const DEFAULT_TRIGGER: u8 = 15;

/// Trigger GPIO to use for a configured pin number
///
/// Falls back to the stock pin if the configured one is already wired to
/// the serial link or the sensor.
pub fn trigger_gpio(requested: u8) -> u8 {
    if [SERIAL_TX, SERIAL_RX, SENSOR_SDA, SENSOR_SCL].contains(&requested) {
        warn!(
            "Trigger pin gpio{} is in use by the board, using gpio{}",
            requested, DEFAULT_TRIGGER
        );
        DEFAULT_TRIGGER
    } else {
        requested
    }
}
