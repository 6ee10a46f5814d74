//! Frame encoding and decoding for the controller serial link.
//!
//! Frame format (canonical revision):
//! - HEADER (1 byte): 0xAA synchronization byte
//! - MOTION (6 bytes): raw sensor bytes, header collisions adjusted
//! - TRIGGER (1 byte): 0x01 on the cycle the trigger was pulled, else 0x00

use heapless::Vec;

use crate::escape::{escape_into, unescape, EscapeMode, ESCAPE_BYTE};
use crate::motion::{MotionSample, MOTION_LEN};

/// Frame synchronization byte
pub const FRAME_HEADER: u8 = 0xAA;

/// Length of a collision-mode frame (HEADER + MOTION + TRIGGER)
pub const FRAME_LEN: usize = 1 + MOTION_LEN + 1;

/// Largest possible frame (every motion byte stuffed)
pub const MAX_FRAME_SIZE: usize = 1 + 2 * MOTION_LEN + 1;

/// Errors that can occur during frame encoding or parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Buffer too small for encoding
    BufferTooSmall,
    /// Header byte seen before the current frame was complete
    UnexpectedHeader,
    /// Trigger byte was neither 0x00 nor 0x01
    InvalidTrigger,
    /// Escape marker followed by an unknown byte
    InvalidEscape,
}

/// Wire protocol revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Revision {
    /// Six raw motion bytes, no header, no trigger
    Legacy,
    /// Header sent as its own write, followed by motion + trigger
    SplitHeader,
    /// Header, motion and trigger in a single write
    #[default]
    Canonical,
}

/// One controller sample as it travels on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Motion payload
    pub motion: MotionSample,
    /// Trigger pulse for this cycle
    pub trigger: bool,
}

impl Frame {
    /// Create a new frame
    pub fn new(motion: MotionSample, trigger: bool) -> Self {
        Self { motion, trigger }
    }

    fn trigger_byte(&self) -> u8 {
        u8::from(self.trigger)
    }

    /// Encode header, motion and trigger into `buffer`
    ///
    /// Returns the number of bytes written ([`FRAME_LEN`] in collision mode).
    pub fn encode(&self, mode: EscapeMode, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let (first, rest) = buffer
            .split_first_mut()
            .ok_or(FrameError::BufferTooSmall)?;
        *first = FRAME_HEADER;
        Ok(1 + self.encode_body(mode, rest)?)
    }

    /// Encode everything after the header (motion + trigger)
    pub fn encode_body(&self, mode: EscapeMode, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let len = escape_into(mode, self.motion.as_bytes(), buffer)?;
        *buffer.get_mut(len).ok_or(FrameError::BufferTooSmall)? = self.trigger_byte();
        Ok(len + 1)
    }

    /// Encode the earliest revision: raw motion bytes only
    pub fn encode_legacy(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        buffer
            .get_mut(..MOTION_LEN)
            .ok_or(FrameError::BufferTooSmall)?
            .copy_from_slice(self.motion.as_bytes());
        Ok(MOTION_LEN)
    }

    /// Encode the bytes `revision` puts on the wire into a heapless Vec
    pub fn encode_to_vec(
        &self,
        revision: Revision,
        mode: EscapeMode,
    ) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = match revision {
            Revision::Legacy => self.encode_legacy(&mut buffer)?,
            Revision::SplitHeader | Revision::Canonical => self.encode(mode, &mut buffer)?,
        };
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| FrameError::BufferTooSmall)?;
        Ok(vec)
    }
}

/// State machine for parsing the controller byte stream
///
/// Used on the receiving side. In collision mode the motion bytes come back
/// exactly as sent, i.e. with the `header + 1` adjustment still applied.
#[derive(Debug, Clone)]
pub struct FrameParser {
    mode: EscapeMode,
    state: ParseState,
    motion: [u8; MOTION_LEN],
    index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for HEADER byte
    WaitingForHeader,
    /// Reading motion payload bytes
    ReadingMotion,
    /// Got ESCAPE_BYTE, waiting for the escaped value
    Escaped,
    /// Waiting for TRIGGER
    WaitingForTrigger,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new(EscapeMode::default())
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new(mode: EscapeMode) -> Self {
        Self {
            mode,
            state: ParseState::WaitingForHeader,
            motion: [0; MOTION_LEN],
            index: 0,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForHeader;
        self.index = 0;
    }

    /// Treat the current byte as the start of a new frame
    fn restart(&mut self) -> FrameError {
        self.state = ParseState::ReadingMotion;
        self.index = 0;
        FrameError::UnexpectedHeader
    }

    fn push_motion(&mut self, byte: u8) {
        self.motion[self.index] = byte;
        self.index += 1;
        self.state = if self.index == MOTION_LEN {
            ParseState::WaitingForTrigger
        } else {
            ParseState::ReadingMotion
        };
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error. A
    /// header byte in the middle of a frame discards the partial frame and
    /// starts a new one.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::WaitingForHeader => {
                if byte == FRAME_HEADER {
                    self.state = ParseState::ReadingMotion;
                    self.index = 0;
                }
                // Silently ignore bytes while out of sync
                Ok(None)
            }
            ParseState::ReadingMotion => {
                if byte == FRAME_HEADER {
                    return Err(self.restart());
                }
                if self.mode == EscapeMode::Stuffed && byte == ESCAPE_BYTE {
                    self.state = ParseState::Escaped;
                } else {
                    self.push_motion(byte);
                }
                Ok(None)
            }
            ParseState::Escaped => {
                if byte == FRAME_HEADER {
                    return Err(self.restart());
                }
                match unescape(byte) {
                    Ok(value) => {
                        self.push_motion(value);
                        Ok(None)
                    }
                    Err(e) => {
                        self.reset();
                        Err(e)
                    }
                }
            }
            ParseState::WaitingForTrigger => {
                if byte == FRAME_HEADER {
                    return Err(self.restart());
                }
                let trigger = match byte {
                    0x00 => false,
                    0x01 => true,
                    _ => {
                        self.reset();
                        return Err(FrameError::InvalidTrigger);
                    }
                };
                let frame = Frame::new(MotionSample(self.motion), trigger);
                self.reset();
                Ok(Some(frame))
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_adjusts_header_collisions() {
        let frame = Frame::new(MotionSample([0xAA, 0x01, 0x02, 0xAA, 0x03, 0x04]), true);
        let mut buffer = [0u8; FRAME_LEN];
        let len = frame.encode(EscapeMode::Collision, &mut buffer).unwrap();

        assert_eq!(len, FRAME_LEN);
        assert_eq!(buffer, [0xAA, 0xAB, 0x01, 0x02, 0xAB, 0x03, 0x04, 0x01]);
    }

    #[test]
    fn test_encode_trigger_released() {
        let frame = Frame::new(MotionSample([1, 2, 3, 4, 5, 6]), false);
        let encoded = frame
            .encode_to_vec(Revision::Canonical, EscapeMode::Collision)
            .unwrap();
        assert_eq!(&encoded[..], &[0xAA, 1, 2, 3, 4, 5, 6, 0x00]);
    }

    #[test]
    fn test_encode_body_omits_header() {
        let frame = Frame::new(MotionSample([0xAA; MOTION_LEN]), false);
        let mut buffer = [0u8; FRAME_LEN];
        let len = frame.encode_body(EscapeMode::Collision, &mut buffer).unwrap();
        assert_eq!(len, FRAME_LEN - 1);
        assert_eq!(&buffer[..len], &[0xAB, 0xAB, 0xAB, 0xAB, 0xAB, 0xAB, 0x00]);
    }

    #[test]
    fn test_legacy_is_raw_motion() {
        // The earliest revision had no header so nothing is adjusted
        let frame = Frame::new(MotionSample([0xAA, 0, 0, 0, 0, 0xAA]), true);
        let encoded = frame
            .encode_to_vec(Revision::Legacy, EscapeMode::Collision)
            .unwrap();
        assert_eq!(&encoded[..], &[0xAA, 0, 0, 0, 0, 0xAA]);
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let frame = Frame::new(MotionSample::ZERO, false);
        let mut buffer = [0u8; FRAME_LEN - 1];
        assert_eq!(
            frame.encode(EscapeMode::Collision, &mut buffer),
            Err(FrameError::BufferTooSmall)
        );
        assert_eq!(
            frame.encode(EscapeMode::Collision, &mut []),
            Err(FrameError::BufferTooSmall)
        );
    }

    #[test]
    fn test_stuffed_roundtrip_preserves_header_values() {
        let original = Frame::new(MotionSample([0xAA, 0xAB, 0xDB, 0x00, 0xAA, 0xFF]), true);
        let encoded = original
            .encode_to_vec(Revision::Canonical, EscapeMode::Stuffed)
            .unwrap();
        assert_eq!(encoded.len(), FRAME_LEN + 3);

        let mut parser = FrameParser::new(EscapeMode::Stuffed);
        let parsed = parser.feed_bytes(&encoded).unwrap().unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_parser_collision_mode_keeps_bias() {
        let frame = Frame::new(MotionSample([0xAA, 0xAB, 0, 0, 0, 0]), false);
        let encoded = frame
            .encode_to_vec(Revision::Canonical, EscapeMode::Collision)
            .unwrap();

        let mut parser = FrameParser::default();
        let parsed = parser.feed_bytes(&encoded).unwrap().unwrap();
        assert_eq!(parsed.motion.0, [0xAB, 0xAB, 0, 0, 0, 0]);
        assert!(!parsed.trigger);
    }

    #[test]
    fn test_parser_resync_after_garbage() {
        let mut parser = FrameParser::default();
        let data = [0x00, 0xFF, 0x12, 0xAA, 1, 2, 3, 4, 5, 6, 0x01];
        let parsed = parser.feed_bytes(&data).unwrap().unwrap();
        assert_eq!(parsed.motion.0, [1, 2, 3, 4, 5, 6]);
        assert!(parsed.trigger);
    }

    #[test]
    fn test_parser_truncated_frame_restarts_on_header() {
        let mut parser = FrameParser::default();
        // A frame cut short by a new header
        assert_eq!(
            parser.feed_bytes(&[0xAA, 1, 2, 0xAA]),
            Err(FrameError::UnexpectedHeader)
        );
        // The new header started a fresh frame
        let parsed = parser.feed_bytes(&[9, 8, 7, 6, 5, 4, 0x00]).unwrap().unwrap();
        assert_eq!(parsed.motion.0, [9, 8, 7, 6, 5, 4]);
    }

    #[test]
    fn test_parser_invalid_trigger() {
        let mut parser = FrameParser::default();
        let result = parser.feed_bytes(&[0xAA, 1, 2, 3, 4, 5, 6, 0x02]);
        assert_eq!(result, Err(FrameError::InvalidTrigger));
    }

    #[test]
    fn test_parser_invalid_escape() {
        let mut parser = FrameParser::new(EscapeMode::Stuffed);
        let result = parser.feed_bytes(&[0xAA, ESCAPE_BYTE, 0x00]);
        assert_eq!(result, Err(FrameError::InvalidEscape));
    }

    proptest! {
        #[test]
        fn prop_collision_frame_is_fixed_length(
            motion in proptest::array::uniform6(any::<u8>()),
            trigger in any::<bool>(),
        ) {
            let frame = Frame::new(MotionSample(motion), trigger);
            let encoded = frame.encode_to_vec(Revision::Canonical, EscapeMode::Collision).unwrap();
            prop_assert_eq!(encoded.len(), FRAME_LEN);
            prop_assert_eq!(encoded[0], FRAME_HEADER);
            prop_assert!(!encoded[1..].contains(&FRAME_HEADER));
            prop_assert_eq!(encoded[FRAME_LEN - 1], u8::from(trigger));
        }
    }
}
