//! Minimal TOML parser for `controller.toml`
//!
//! Handles only the subset the controller configuration uses. It does NOT
//! support the full TOML spec.
//!
//! Supported features:
//! - `[section]` headers
//! - `key = value` pairs (integer, string)
//! - Integers in decimal or `0x` hexadecimal, with `_` separators
//! - Comments (`# ...`), including trailing comments
//!
//! Keys that are not present keep their default value. Unknown sections
//! and keys are rejected so typos do not silently fall back to defaults.

use blastzone_protocol::{EscapeMode, Revision};

use super::types::{ControllerConfig, PinConfig, StalePolicy};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection { line: usize },
    /// Unknown key, or a key outside any section
    InvalidKey { line: usize },
    /// Value has the wrong type or is out of range
    InvalidValue { line: usize },
    /// Invalid pin string
    InvalidPin { line: usize },
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Sampler,
    Sensor,
    Serial,
    Trigger,
}

/// Parse TOML configuration into ControllerConfig
pub fn parse_config(input: &str) -> Result<ControllerConfig, ParseError> {
    let mut config = ControllerConfig::default();
    let mut section = Section::Root;

    for (index, raw_line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = strip_comment(header)
                .strip_suffix(']')
                .ok_or(ParseError::InvalidSection { line: line_no })?;
            section = parse_section_header(name.trim())
                .ok_or(ParseError::InvalidSection { line: line_no })?;
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or(ParseError::InvalidKey { line: line_no })?;
        let key = key.trim();
        let value = strip_comment(value.trim());

        apply_key(&mut config, section, key, value, line_no)?;
    }

    Ok(config)
}

fn parse_section_header(name: &str) -> Option<Section> {
    match name {
        "sampler" => Some(Section::Sampler),
        "sensor" => Some(Section::Sensor),
        "serial" => Some(Section::Serial),
        "trigger" => Some(Section::Trigger),
        _ => None,
    }
}

fn apply_key(
    config: &mut ControllerConfig,
    section: Section,
    key: &str,
    value: &str,
    line: usize,
) -> Result<(), ParseError> {
    let bad_value = ParseError::InvalidValue { line };

    match (section, key) {
        (Section::Sampler, "period_ms") => {
            config.sampler.period_ms = parse_u32(value).filter(|&ms| ms > 0).ok_or(bad_value)?;
        }
        (Section::Sampler, "revision") => {
            config.sampler.revision = match parse_string(value).ok_or(bad_value)? {
                "legacy" => Revision::Legacy,
                "split_header" => Revision::SplitHeader,
                "canonical" => Revision::Canonical,
                _ => return Err(bad_value),
            };
        }
        (Section::Sampler, "escape") => {
            config.sampler.escape = match parse_string(value).ok_or(bad_value)? {
                "collision" => EscapeMode::Collision,
                "stuffed" => EscapeMode::Stuffed,
                _ => return Err(bad_value),
            };
        }
        (Section::Sampler, "stale") => {
            config.sampler.stale_policy = match parse_string(value).ok_or(bad_value)? {
                "hold_last" => StalePolicy::HoldLast,
                "zeroed" => StalePolicy::Zeroed,
                _ => return Err(bad_value),
            };
        }
        (Section::Sensor, "address") => {
            let address = parse_u8(value).ok_or(bad_value)?;
            if address > 0x7F {
                return Err(bad_value);
            }
            config.sensor.address = address;
        }
        (Section::Sensor, "data_register") => {
            config.sensor.data_register = parse_u8(value).ok_or(bad_value)?;
        }
        (Section::Sensor, "transfer_timeout_ms") => {
            config.sensor.transfer_timeout_ms = parse_u32(value).ok_or(bad_value)?;
        }
        (Section::Sensor, "wake_timeout_ms") => {
            config.sensor.wake_timeout_ms = parse_u32(value).ok_or(bad_value)?;
        }
        (Section::Sensor, "frequency_hz") => {
            config.sensor.frequency_hz = parse_u32(value).filter(|&hz| hz > 0).ok_or(bad_value)?;
        }
        (Section::Serial, "baudrate") => {
            config.serial.baudrate = parse_u32(value).filter(|&baud| baud > 0).ok_or(bad_value)?;
        }
        (Section::Serial, "write_timeout_ms") => {
            config.serial.write_timeout_ms = parse_u32(value).ok_or(bad_value)?;
        }
        (Section::Trigger, "pin") => {
            let pin = parse_string(value).ok_or(bad_value)?;
            config.trigger.pin = PinConfig::parse(pin).ok_or(ParseError::InvalidPin { line })?;
        }
        _ => return Err(ParseError::InvalidKey { line }),
    }

    Ok(())
}

/// Remove a trailing `# comment` that is not inside a string
fn strip_comment(value: &str) -> &str {
    let mut in_string = false;
    for (i, c) in value.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return value[..i].trim_end(),
            _ => {}
        }
    }
    value
}

fn parse_string(value: &str) -> Option<&str> {
    value.strip_prefix('"')?.strip_suffix('"')
}

fn parse_u32(value: &str) -> Option<u32> {
    // Strip `_` separators without allocating
    let mut digits = [0u8; 16];
    let mut len = 0;
    for &b in value.as_bytes() {
        if b == b'_' {
            continue;
        }
        *digits.get_mut(len)? = b;
        len += 1;
    }
    let s = core::str::from_utf8(&digits[..len]).ok()?;

    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()
    } else {
        s.parse().ok()
    }
}

fn parse_u8(value: &str) -> Option<u8> {
    parse_u32(value).and_then(|v| u8::try_from(v).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::Polarity;

    const SHIPPED: &str = r#"
# BlastZone controller
[sampler]
period_ms = 50
revision = "canonical"
escape = "collision"   # game expects the +1 adjustment
stale = "hold_last"

[sensor]
address = 0x68
data_register = 0x43
transfer_timeout_ms = 1_000
wake_timeout_ms = 100
frequency_hz = 100_000

[serial]
baudrate = 9600
write_timeout_ms = 20

[trigger]
pin = "^!gpio15"
"#;

    #[test]
    fn test_parse_shipped_config() {
        let config = parse_config(SHIPPED).unwrap();
        assert_eq!(config.sampler.period_ms, 50);
        assert_eq!(config.sampler.revision, Revision::Canonical);
        assert_eq!(config.sampler.escape, EscapeMode::Collision);
        assert_eq!(config.sampler.stale_policy, StalePolicy::HoldLast);
        assert_eq!(config.sensor.address, 0x68);
        assert_eq!(config.sensor.data_register, 0x43);
        assert_eq!(config.sensor.transfer_timeout_ms, 1000);
        assert_eq!(config.sensor.frequency_hz, 100_000);
        assert_eq!(config.serial.baudrate, 9600);
        assert_eq!(config.serial.write_timeout_ms, 20);
        assert_eq!(config.trigger.pin.pin, 15);
        assert_eq!(config.trigger.pin.polarity(), Polarity::ActiveLow);
    }

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(parse_config("").unwrap(), ControllerConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config = parse_config("[sampler]\nperiod_ms = 16\n").unwrap();
        assert_eq!(config.sampler.period_ms, 16);
        assert_eq!(config.sensor, ControllerConfig::default().sensor);
    }

    #[test]
    fn test_legacy_and_stuffed() {
        let config =
            parse_config("[sampler]\nrevision = \"legacy\"\nescape = \"stuffed\"\nstale = \"zeroed\"\n")
                .unwrap();
        assert_eq!(config.sampler.revision, Revision::Legacy);
        assert_eq!(config.sampler.escape, EscapeMode::Stuffed);
        assert_eq!(config.sampler.stale_policy, StalePolicy::Zeroed);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = parse_config("[serial]\nbaud = 9600\n");
        assert_eq!(result, Err(ParseError::InvalidKey { line: 2 }));
    }

    #[test]
    fn test_key_outside_section_rejected() {
        let result = parse_config("period_ms = 10\n");
        assert_eq!(result, Err(ParseError::InvalidKey { line: 1 }));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result = parse_config("[display]\n");
        assert_eq!(result, Err(ParseError::InvalidSection { line: 1 }));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[sensor]\naddress = 0x80\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
        assert_eq!(
            parse_config("[sensor]\ndata_register = 256\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
        assert_eq!(
            parse_config("[sampler]\nrevision = canonical\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
        assert_eq!(
            parse_config("[trigger]\npin = \"gpio99\"\n"),
            Err(ParseError::InvalidPin { line: 2 })
        );
    }

    #[test]
    fn test_zero_period_rejected() {
        assert_eq!(
            parse_config("[sampler]\nperiod_ms = 0\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
    }

    #[test]
    fn test_zero_clock_rates_rejected() {
        assert_eq!(
            parse_config("[sensor]\nfrequency_hz = 0\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
        assert_eq!(
            parse_config("[serial]\nbaudrate = 0\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
    }

    #[test]
    fn test_repeated_pin_prefix_rejected() {
        assert_eq!(
            parse_config("[trigger]\npin = \"!!gpio15\"\n"),
            Err(ParseError::InvalidPin { line: 2 })
        );
        assert_eq!(
            parse_config("[trigger]\npin = \"^^gpio15\"\n"),
            Err(ParseError::InvalidPin { line: 2 })
        );
    }

    #[test]
    fn test_parse_u32_forms() {
        assert_eq!(parse_u32("0x43"), Some(0x43));
        assert_eq!(parse_u32("100_000"), Some(100_000));
        assert_eq!(parse_u32("-1"), None);
        assert_eq!(parse_u32("12345678901234567890"), None);
    }
}
