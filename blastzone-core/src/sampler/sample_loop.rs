//! Fixed-period sample loop
//!
//! One cycle reads the sensor, polls the trigger, builds a frame and hands
//! it to the serial transmitter. Nothing in a cycle waits longer than the
//! bus and serial timeouts, and a failed step never aborts the cycle:
//!
//! - sensor failure: the frame carries stale (or zeroed) motion bytes
//! - serial failure: the frame is dropped, nothing is queued for later

use blastzone_hal::{InputPin, UartError, UartTx};
use blastzone_protocol::{
    EscapeMode, Frame, FrameError, MotionSample, Revision, FRAME_HEADER, MAX_FRAME_SIZE,
};
use embedded_hal::delay::DelayNs;

use super::stats::SampleStats;
use crate::config::{ControllerConfig, SamplerConfig, StalePolicy};
use crate::traits::{BusError, MotionSensor};
use crate::trigger::{TriggerState, TriggerTracker};

/// Where the motion bytes of a frame came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleSource {
    /// Read from the sensor this cycle
    Fresh,
    /// Sensor read failed, fallback payload used
    Stale(BusError),
}

/// Why a frame did not make it onto the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DropReason {
    /// Serial write failed or timed out
    Serial(UartError),
    /// Frame did not fit the encode buffer
    Encode(FrameError),
}

/// Result of handing a frame to the transmitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WriteOutcome {
    /// Frame handed to the transmitter
    Sent,
    /// Frame not sent, nothing retried
    Dropped(DropReason),
}

/// What happened during one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// Frame built this cycle
    pub frame: Frame,
    /// Freshness of the motion payload
    pub source: SampleSource,
    /// Serial write result
    pub write: WriteOutcome,
    /// Length of the error streak a good read just ended
    pub recovered_after: Option<u32>,
}

impl CycleReport {
    /// Sensor error of this cycle, if the read failed
    pub fn bus_error(&self) -> Option<BusError> {
        match self.source {
            SampleSource::Fresh => None,
            SampleSource::Stale(e) => Some(e),
        }
    }

    /// Check if the frame was handed to the transmitter
    pub fn was_sent(&self) -> bool {
        self.write == WriteOutcome::Sent
    }
}

/// Sensor-to-serial sample loop
///
/// Owns the retained trigger bit and the last good motion sample; nothing
/// else carries state between cycles.
pub struct SampleLoop<S, P, T> {
    sensor: S,
    button: P,
    serial: T,
    config: SamplerConfig,
    write_timeout_ms: u32,
    tracker: TriggerTracker,
    trigger: TriggerState,
    last_sample: MotionSample,
    stats: SampleStats,
}

impl<S, P, T> SampleLoop<S, P, T>
where
    S: MotionSensor,
    P: InputPin,
    T: UartTx,
{
    /// Create a new sample loop
    ///
    /// # Arguments
    /// - `sensor`: motion sensor, already woken up (or degraded)
    /// - `button`: trigger input, raw electrical level
    /// - `serial`: link to the game
    /// - `config`: controller configuration
    pub fn new(sensor: S, button: P, serial: T, config: &ControllerConfig) -> Self {
        Self {
            sensor,
            button,
            serial,
            config: config.sampler,
            write_timeout_ms: config.serial.write_timeout_ms,
            tracker: TriggerTracker::new(config.trigger.pin.polarity()),
            trigger: TriggerState::new(),
            last_sample: MotionSample::ZERO,
            stats: SampleStats::new(),
        }
    }

    /// Delay between cycles
    pub fn period_ms(&self) -> u32 {
        self.config.period_ms
    }

    /// Counters accumulated so far
    pub fn stats(&self) -> &SampleStats {
        &self.stats
    }

    /// Retained trigger level
    pub fn trigger_state(&self) -> TriggerState {
        self.trigger
    }

    /// Run one cycle without the trailing delay
    pub fn cycle(&mut self) -> CycleReport {
        // Earlier protocol revision: header goes out on its own, before the
        // (possibly slow) sensor read
        let header = match self.config.revision {
            Revision::SplitHeader => Some(
                self.serial
                    .write_blocking(&[FRAME_HEADER], self.write_timeout_ms),
            ),
            Revision::Legacy | Revision::Canonical => None,
        };

        let (motion, source, recovered_after) = match self.sensor.read_motion() {
            Ok(sample) => {
                self.last_sample = sample;
                (sample, SampleSource::Fresh, self.stats.record_fresh())
            }
            Err(e) => {
                self.stats.record_bus_error();
                let fallback = match self.config.stale_policy {
                    StalePolicy::HoldLast => self.last_sample,
                    StalePolicy::Zeroed => MotionSample::ZERO,
                };
                (fallback, SampleSource::Stale(e), None)
            }
        };

        let pulse = self.tracker.poll(&mut self.trigger, self.button.is_high());
        let frame = Frame::new(motion, pulse);

        let write = match header {
            // Body without its header would be misread as motion data
            Some(Err(e)) => WriteOutcome::Dropped(DropReason::Serial(e)),
            _ => self.write_frame(&frame),
        };
        self.stats.record_write(write == WriteOutcome::Sent);

        CycleReport {
            frame,
            source,
            write,
            recovered_after,
        }
    }

    /// Run one cycle, then wait one period
    pub fn step<D: DelayNs>(&mut self, delay: &mut D) -> CycleReport {
        let report = self.cycle();
        delay.delay_ms(self.config.period_ms);
        report
    }

    fn write_frame(&mut self, frame: &Frame) -> WriteOutcome {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let escape: EscapeMode = self.config.escape;
        let encoded = match self.config.revision {
            Revision::Legacy => frame.encode_legacy(&mut buffer),
            Revision::SplitHeader => frame.encode_body(escape, &mut buffer),
            Revision::Canonical => frame.encode(escape, &mut buffer),
        };

        let len = match encoded {
            Ok(len) => len,
            Err(e) => return WriteOutcome::Dropped(DropReason::Encode(e)),
        };

        match self
            .serial
            .write_blocking(&buffer[..len], self.write_timeout_ms)
        {
            Ok(()) => WriteOutcome::Sent,
            Err(e) => WriteOutcome::Dropped(DropReason::Serial(e)),
        }
    }
}
