//! Button input and config-driven pin selection

use blastzone_hal::gpio::Pull;
use blastzone_hal::InputPin;
use embassy_rp::gpio::Input;

/// Polled digital input
pub struct ButtonInput<'d> {
    input: Input<'d>,
}

impl<'d> ButtonInput<'d> {
    /// Wrap a configured embassy input
    pub fn new(input: Input<'d>) -> Self {
        Self { input }
    }
}

impl InputPin for ButtonInput<'_> {
    fn is_high(&self) -> bool {
        self.input.is_high()
    }
}

/// Map the HAL pull setting onto the embassy one
pub fn to_rp_pull(pull: Pull) -> embassy_rp::gpio::Pull {
    match pull {
        Pull::None => embassy_rp::gpio::Pull::None,
        Pull::Up => embassy_rp::gpio::Pull::Up,
        Pull::Down => embassy_rp::gpio::Pull::Down,
    }
}

/// Take an input pin by number from peripherals
///
/// Pins 0/1 (UART0) and 4/5 (I2C0) are wired to the serial link and the
/// sensor on the controller board and can't be taken. Evaluates to
/// `Option<Peri<'static, AnyPin>>`.
///
/// ```ignore
/// let pin = take_input_pin!(p, config.trigger.pin.pin);
/// ```
#[macro_export]
macro_rules! take_input_pin {
    ($p:expr, $n:expr) => {{
        use embassy_rp::gpio::AnyPin;
        use embassy_rp::Peri;
        match $n {
            2 => Some(Peri::<AnyPin>::from($p.PIN_2)),
            3 => Some(Peri::<AnyPin>::from($p.PIN_3)),
            6 => Some(Peri::<AnyPin>::from($p.PIN_6)),
            7 => Some(Peri::<AnyPin>::from($p.PIN_7)),
            8 => Some(Peri::<AnyPin>::from($p.PIN_8)),
            9 => Some(Peri::<AnyPin>::from($p.PIN_9)),
            10 => Some(Peri::<AnyPin>::from($p.PIN_10)),
            11 => Some(Peri::<AnyPin>::from($p.PIN_11)),
            12 => Some(Peri::<AnyPin>::from($p.PIN_12)),
            13 => Some(Peri::<AnyPin>::from($p.PIN_13)),
            14 => Some(Peri::<AnyPin>::from($p.PIN_14)),
            15 => Some(Peri::<AnyPin>::from($p.PIN_15)),
            16 => Some(Peri::<AnyPin>::from($p.PIN_16)),
            17 => Some(Peri::<AnyPin>::from($p.PIN_17)),
            18 => Some(Peri::<AnyPin>::from($p.PIN_18)),
            19 => Some(Peri::<AnyPin>::from($p.PIN_19)),
            20 => Some(Peri::<AnyPin>::from($p.PIN_20)),
            21 => Some(Peri::<AnyPin>::from($p.PIN_21)),
            22 => Some(Peri::<AnyPin>::from($p.PIN_22)),
            23 => Some(Peri::<AnyPin>::from($p.PIN_23)),
            24 => Some(Peri::<AnyPin>::from($p.PIN_24)),
            25 => Some(Peri::<AnyPin>::from($p.PIN_25)),
            26 => Some(Peri::<AnyPin>::from($p.PIN_26)),
            27 => Some(Peri::<AnyPin>::from($p.PIN_27)),
            28 => Some(Peri::<AnyPin>::from($p.PIN_28)),
            29 => Some(Peri::<AnyPin>::from($p.PIN_29)),
            _ => None,
        }
    }};
}
