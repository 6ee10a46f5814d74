//! BlastZone - Motion Controller Firmware
//!
//! Main firmware binary for the RP2040-based gun controller. Reads the
//! MPU-6500 gyroscope and the trigger button at a fixed period and streams
//! one frame per sample to the game over UART0.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::Input;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, UART0};
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use blastzone_core::sampler::SampleLoop;
use blastzone_drivers::sensor::Mpu6500;
use blastzone_hal_rp2040::gpio::{to_rp_pull, ButtonInput};
use blastzone_hal_rp2040::{i2c as rp_i2c, take_input_pin, uart as rp_uart};
use blastzone_hal_rp2040::{TimedI2c, TimedUartTx};
use blastzone_protocol::FRAME_LEN;

mod board;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 16]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("BlastZone controller starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();

    // Trigger button (pin from config, pull and polarity from the pin string)
    let trigger = config.trigger.pin;
    let trigger_gpio = board::trigger_gpio(trigger.pin);
    let button_pin = unwrap!(take_input_pin!(p, trigger_gpio));
    let button = ButtonInput::new(Input::new(button_pin, to_rp_pull(trigger.pull())));
    info!(
        "Trigger on gpio{}, {:?}",
        trigger_gpio,
        trigger.polarity()
    );

    // Motion sensor on I2C0 (board pins: SDA=GPIO4, SCL=GPIO5)
    let i2c_bus = I2c::new_async(
        p.I2C0,
        p.PIN_5,
        p.PIN_4,
        Irqs,
        rp_i2c::to_rp_config(&config.sensor.i2c()),
    );
    let mut sensor = Mpu6500::new(TimedI2c::new(i2c_bus), &config.sensor);
    match sensor.wake() {
        Ok(()) => info!("Sensor awake at {=u8:#x}", sensor.address()),
        // Keep going: reads fail (and frames go out stale) until it answers
        Err(e) => warn!("Sensor wake failed: {:?}", e),
    }

    // Serial link on UART0 (board pins: TX=GPIO0, RX=GPIO1)
    let uart_config = config.serial.uart();
    let frame_ms = uart_config.transmit_time_ms(FRAME_LEN);
    if frame_ms >= config.sampler.period_ms {
        warn!(
            "Frame takes {} ms at {} baud, longer than the {} ms period",
            frame_ms, uart_config.baudrate, config.sampler.period_ms
        );
    }

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 16]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, rp_uart::to_rp_config(&uart_config));
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, _rx) = uart.split();
    info!("UART initialized at {} baud", uart_config.baudrate);

    info!(
        "Streaming {:?} frames, {:?} escaping",
        config.sampler.revision, config.sampler.escape
    );

    let sampler = SampleLoop::new(sensor, button, TimedUartTx::new(tx), &config);
    tasks::sample_loop(sampler).await
}
