//! Header-collision handling for motion payload bytes
//!
//! Two schemes exist:
//!
//! - **Collision** (default, what the game expects): a payload byte equal to
//!   [`FRAME_HEADER`] is incremented by one. Fixed frame length, but the
//!   receiver cannot tell an adjusted header from a genuine `header + 1`.
//! - **Stuffed**: SLIP-style escaping. [`FRAME_HEADER`] becomes
//!   `[ESCAPE_BYTE, ESCAPED_HEADER]` and [`ESCAPE_BYTE`] becomes
//!   `[ESCAPE_BYTE, ESCAPED_ESCAPE]`. Reversible, variable length.

use crate::frame::{FrameError, FRAME_HEADER};

/// Escape marker used by [`EscapeMode::Stuffed`]
pub const ESCAPE_BYTE: u8 = 0xDB;

/// Second byte of an escaped header
pub const ESCAPED_HEADER: u8 = 0xDC;

/// Second byte of an escaped escape marker
pub const ESCAPED_ESCAPE: u8 = 0xDD;

/// How motion bytes that collide with the header are encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EscapeMode {
    /// Bump colliding bytes by one (lossy, wire-compatible)
    #[default]
    Collision,
    /// Reversible escape sequences (receiver must opt in)
    Stuffed,
}

/// Collision-mode adjustment of a single payload byte
///
/// Wraps on overflow, which only matters if the header were ever `0xFF`.
pub const fn adjust_collision(byte: u8) -> u8 {
    if byte == FRAME_HEADER {
        byte.wrapping_add(1)
    } else {
        byte
    }
}

/// Encode `payload` into `buffer` using `mode`
///
/// Returns the number of bytes written.
pub fn escape_into(mode: EscapeMode, payload: &[u8], buffer: &mut [u8]) -> Result<usize, FrameError> {
    let mut len = 0;
    for &byte in payload {
        match mode {
            EscapeMode::Collision => {
                *buffer.get_mut(len).ok_or(FrameError::BufferTooSmall)? = adjust_collision(byte);
                len += 1;
            }
            EscapeMode::Stuffed => {
                let escaped = match byte {
                    FRAME_HEADER => Some(ESCAPED_HEADER),
                    ESCAPE_BYTE => Some(ESCAPED_ESCAPE),
                    _ => None,
                };
                match escaped {
                    Some(second) => {
                        if buffer.len() < len + 2 {
                            return Err(FrameError::BufferTooSmall);
                        }
                        buffer[len] = ESCAPE_BYTE;
                        buffer[len + 1] = second;
                        len += 2;
                    }
                    None => {
                        *buffer.get_mut(len).ok_or(FrameError::BufferTooSmall)? = byte;
                        len += 1;
                    }
                }
            }
        }
    }
    Ok(len)
}

/// Resolve the byte following [`ESCAPE_BYTE`] in a stuffed payload
pub fn unescape(second: u8) -> Result<u8, FrameError> {
    match second {
        ESCAPED_HEADER => Ok(FRAME_HEADER),
        ESCAPED_ESCAPE => Ok(ESCAPE_BYTE),
        _ => Err(FrameError::InvalidEscape),
    }
}
