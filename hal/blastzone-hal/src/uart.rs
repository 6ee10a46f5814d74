//! UART serial communication abstractions
//!
//! The controller only ever transmits, so only the TX half is modelled.

/// Errors reported by a UART write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartError {
    /// The transmitter could not accept the data within the timeout
    Timeout,
    /// Overrun error
    Overrun,
    /// Framing error
    Framing,
    /// Other error
    Other,
}

/// UART transmitter
pub trait UartTx {
    /// Write all of `data` as one unfragmented write
    ///
    /// Blocks until the data has been accepted by the transmitter, an error
    /// occurs, or `timeout_ms` elapses. On timeout nothing is retried and the
    /// caller decides whether to drop the data.
    fn write_blocking(&mut self, data: &[u8], timeout_ms: u32) -> Result<(), UartError>;
}

impl<T: UartTx + ?Sized> UartTx for &mut T {
    fn write_blocking(&mut self, data: &[u8], timeout_ms: u32) -> Result<(), UartError> {
        (**self).write_blocking(data, timeout_ms)
    }
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
    /// Hardware flow control (RTS/CTS)
    pub flow_control: bool,
}

impl Default for UartConfig {
    /// 9600 8N1, no flow control - what the game's serial reader expects
    fn default() -> Self {
        Self {
            baudrate: 9600,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            flow_control: false,
        }
    }
}

impl UartConfig {
    /// Same framing as the default with a different baud rate
    pub const fn with_baudrate(baudrate: u32) -> Self {
        Self {
            baudrate,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            flow_control: false,
        }
    }

    /// Time to shift `bytes` out on the wire, in milliseconds, rounded up
    ///
    /// Counts start, data, parity and stop bits for each byte.
    pub fn transmit_time_ms(&self, bytes: usize) -> u32 {
        let bits_per_byte = 1
            + self.data_bits.count()
            + u32::from(self.parity != Parity::None)
            + self.stop_bits.count();
        let total_bits = bits_per_byte as u64 * bytes as u64 * 1000;
        let baud = self.baudrate.max(1) as u64;
        total_bits.div_ceil(baud) as u32
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

impl DataBits {
    const fn count(self) -> u32 {
        match self {
            DataBits::Seven => 7,
            DataBits::Eight => 8,
        }
    }
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

impl StopBits {
    const fn count(self) -> u32 {
        match self {
            StopBits::One => 1,
            StopBits::Two => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_9600_8n1() {
        let cfg = UartConfig::default();
        assert_eq!(cfg.baudrate, 9600);
        assert_eq!(cfg.data_bits, DataBits::Eight);
        assert_eq!(cfg.parity, Parity::None);
        assert_eq!(cfg.stop_bits, StopBits::One);
        assert!(!cfg.flow_control);
    }

    #[test]
    fn test_transmit_time() {
        // 8 bytes * 10 bits = 80 bits at 9600 baud = 8.33ms
        let cfg = UartConfig::default();
        assert_eq!(cfg.transmit_time_ms(8), 9);

        let fast = UartConfig::with_baudrate(115_200);
        assert_eq!(fast.transmit_time_ms(8), 1);
        assert_eq!(fast.transmit_time_ms(0), 0);
    }
}
