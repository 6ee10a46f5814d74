//! Sample loop driver
//!
//! Runs one cycle, logs what happened, then sleeps for the configured
//! period. The sleep follows the cycle, so two frame writes are at least one
//! period apart even when a bus timeout stretches a cycle.

use defmt::*;
use embassy_time::{Duration, Instant, Timer};

use blastzone_core::sampler::{CycleReport, SampleLoop, SampleStats, WriteOutcome};
use blastzone_core::traits::MotionSensor;
use blastzone_hal::{InputPin, UartTx};

/// Throughput log interval
const STATS_INTERVAL: Duration = Duration::from_secs(1);

/// Drive the sample loop forever
///
/// Generic over the peripherals, so it runs inside the main task instead
/// of being spawned.
pub async fn sample_loop<S, P, T>(mut sampler: SampleLoop<S, P, T>) -> !
where
    S: MotionSensor,
    P: InputPin,
    T: UartTx,
{
    let period = Duration::from_millis(sampler.period_ms() as u64);
    info!("Sample loop started, period {} ms", sampler.period_ms());

    let mut window_start = Instant::now();
    let mut window_base = *sampler.stats();

    loop {
        let report = sampler.cycle();
        log_cycle(&report, sampler.stats());

        if window_start.elapsed() >= STATS_INTERVAL {
            let stats = sampler.stats();
            debug!(
                "{} frames sent, {} dropped, {} stale in the last second",
                stats.frames_sent - window_base.frames_sent,
                stats.frames_dropped - window_base.frames_dropped,
                stats.stale_frames - window_base.stale_frames
            );
            window_start = Instant::now();
            window_base = *stats;
        }

        Timer::after(period).await;
    }
}

fn log_cycle(report: &CycleReport, stats: &SampleStats) {
    if let Some(e) = report.bus_error() {
        if stats.should_log_bus_error() {
            warn!(
                "Sensor read failed ({} in a row): {:?}",
                stats.consecutive_bus_errors, e
            );
        }
    }

    if let Some(streak) = report.recovered_after {
        info!("Sensor recovered after {} failed reads", streak);
    }

    if let WriteOutcome::Dropped(reason) = report.write {
        trace!("Frame dropped: {:?}", reason);
    }

    if report.frame.trigger {
        debug!("Trigger pulled");
    }
}
