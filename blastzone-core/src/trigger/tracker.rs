//! Rising-edge detection for the trigger button
//!
//! The retained bit lives in [`TriggerState`], owned by whoever drives the
//! polling (the sample loop). [`TriggerTracker`] only knows the wiring.
//!
//! There is no debounce filtering beyond single-sample edge detection, and a
//! press shorter than one poll period is never seen.

/// Electrical level that means "pressed"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Pull-up wiring: pressed reads low
    #[default]
    ActiveLow,
    /// Pull-down wiring: pressed reads high
    ActiveHigh,
}

impl Polarity {
    /// Logical pressed level for a raw pin reading
    pub const fn is_pressed(self, raw_is_high: bool) -> bool {
        match self {
            Polarity::ActiveLow => !raw_is_high,
            Polarity::ActiveHigh => raw_is_high,
        }
    }
}

/// Previous logical pressed level
///
/// Starts released, so a trigger already held at power-on produces a pulse
/// on the first poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TriggerState {
    pressed: bool,
}

impl TriggerState {
    /// Released state
    pub const fn new() -> Self {
        Self { pressed: false }
    }

    /// Logical level seen by the last poll
    pub fn was_pressed(&self) -> bool {
        self.pressed
    }
}

/// Converts raw button levels into press pulses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TriggerTracker {
    polarity: Polarity,
}

impl TriggerTracker {
    /// Create a tracker for the given wiring
    pub const fn new(polarity: Polarity) -> Self {
        Self { polarity }
    }

    /// Wiring this tracker was created with
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Poll one raw reading
    ///
    /// Returns `true` only when the logical level goes from released to
    /// pressed. `state` is overwritten with the current level on every call,
    /// so a held trigger yields exactly one pulse.
    pub fn poll(&self, state: &mut TriggerState, raw_is_high: bool) -> bool {
        let pressed = self.polarity.is_pressed(raw_is_high);
        let edge = pressed && !state.pressed;
        state.pressed = pressed;
        edge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run(tracker: TriggerTracker, raw: &[bool]) -> Vec<bool> {
        let mut state = TriggerState::new();
        raw.iter().map(|&level| tracker.poll(&mut state, level)).collect()
    }

    #[test]
    fn test_single_pulse_on_press_none_on_release() {
        // unpressed, unpressed, pressed, pressed, unpressed, unpressed
        let raw = [true, true, false, false, true, true];
        let pulses = run(TriggerTracker::default(), &raw);
        assert_eq!(pulses, [false, false, true, false, false, false]);
    }

    #[test]
    fn test_second_press_pulses_again() {
        let raw = [true, false, true, false, false];
        let pulses = run(TriggerTracker::default(), &raw);
        assert_eq!(pulses, [false, true, false, true, false]);
    }

    #[test]
    fn test_held_at_startup_pulses_once() {
        let raw = [false, false, false];
        let pulses = run(TriggerTracker::default(), &raw);
        assert_eq!(pulses, [true, false, false]);
    }

    #[test]
    fn test_active_high_wiring() {
        let tracker = TriggerTracker::new(Polarity::ActiveHigh);
        let raw = [false, true, true, false];
        assert_eq!(run(tracker, &raw), [false, true, false, false]);
    }

    #[test]
    fn test_state_tracks_logical_level() {
        let tracker = TriggerTracker::default();
        let mut state = TriggerState::new();
        assert!(!state.was_pressed());
        tracker.poll(&mut state, false);
        assert!(state.was_pressed());
        tracker.poll(&mut state, true);
        assert!(!state.was_pressed());
    }

    proptest! {
        #[test]
        fn prop_hold_yields_one_pulse(n in 1usize..200) {
            let mut raw = vec![true];
            raw.extend(core::iter::repeat(false).take(n));
            let pulses = run(TriggerTracker::default(), &raw);

            prop_assert!(!pulses[0]);
            prop_assert!(pulses[1]);
            prop_assert_eq!(pulses.iter().filter(|&&p| p).count(), 1);
        }

        #[test]
        fn prop_pulses_never_exceed_presses(raw in proptest::collection::vec(any::<bool>(), 0..64)) {
            let pulses = run(TriggerTracker::default(), &raw);
            let mut prev_pressed = false;
            for (level, pulse) in raw.iter().zip(&pulses) {
                let pressed = !level;
                prop_assert_eq!(*pulse, pressed && !prev_pressed);
                prev_pressed = pressed;
            }
        }
    }
}
