//! Blocking UART transmit with timeouts
//!
//! Wraps the TX half of the buffered embassy UART. A write completes once
//! the whole frame sits in the TX ring buffer; if the buffer cannot take it
//! within the timeout the frame is abandoned.

use blastzone_hal::uart::{DataBits, Parity, StopBits};
use blastzone_hal::{UartConfig, UartError, UartTx};
use embassy_futures::block_on;
use embassy_time::{with_timeout, Duration};
use embedded_io::{Error as _, ErrorKind};
use embedded_io_async::Write;

/// UART transmitter with per-write timeouts
pub struct TimedUartTx<W> {
    tx: W,
}

impl<W> TimedUartTx<W> {
    /// Wrap an async writer
    pub fn new(tx: W) -> Self {
        Self { tx }
    }
}

impl<W: Write> UartTx for TimedUartTx<W> {
    fn write_blocking(&mut self, data: &[u8], timeout_ms: u32) -> Result<(), UartError> {
        let write = with_timeout(
            Duration::from_millis(timeout_ms as u64),
            self.tx.write_all(data),
        );
        match block_on(write) {
            Ok(result) => result.map_err(|e| map_error(e.kind())),
            Err(_) => Err(UartError::Timeout),
        }
    }
}

fn map_error(kind: ErrorKind) -> UartError {
    match kind {
        ErrorKind::TimedOut => UartError::Timeout,
        ErrorKind::InvalidData => UartError::Framing,
        ErrorKind::OutOfMemory => UartError::Overrun,
        _ => UartError::Other,
    }
}

/// Peripheral configuration for the embassy driver
///
/// Flow control is not wired on the controller board and is ignored.
pub fn to_rp_config(config: &UartConfig) -> embassy_rp::uart::Config {
    let mut rp = embassy_rp::uart::Config::default();
    rp.baudrate = config.baudrate;
    rp.data_bits = match config.data_bits {
        DataBits::Seven => embassy_rp::uart::DataBits::DataBits7,
        DataBits::Eight => embassy_rp::uart::DataBits::DataBits8,
    };
    rp.parity = match config.parity {
        Parity::None => embassy_rp::uart::Parity::ParityNone,
        Parity::Even => embassy_rp::uart::Parity::ParityEven,
        Parity::Odd => embassy_rp::uart::Parity::ParityOdd,
    };
    rp.stop_bits = match config.stop_bits {
        StopBits::One => embassy_rp::uart::StopBits::STOP1,
        StopBits::Two => embassy_rp::uart::StopBits::STOP2,
    };
    rp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        assert_eq!(map_error(ErrorKind::TimedOut), UartError::Timeout);
        assert_eq!(map_error(ErrorKind::Other), UartError::Other);
    }
}
