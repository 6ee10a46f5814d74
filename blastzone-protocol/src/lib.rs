//! BlastZone controller serial protocol
//!
//! This crate defines the byte stream the controller sends to the game.
//! One frame is sent per sample period, fire-and-forget, with no
//! acknowledgement, length field or checksum:
//!
//! ```text
//! ┌────────┬──────────────────────────┬─────────┐
//! │ HEADER │ MOTION                   │ TRIGGER │
//! │ 0xAA   │ 6B (3 × i16 big-endian)  │ 0 / 1   │
//! └────────┴──────────────────────────┴─────────┘
//! ```
//!
//! Motion bytes equal to the header are bumped to `header + 1` so the
//! header only ever appears at a frame boundary. This is lossy: the game
//! sees a ±1 bias on those values. Receivers that need exact values can opt
//! into [`EscapeMode::Stuffed`], a reversible byte-stuffing variant.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod escape;
pub mod frame;
pub mod motion;

pub use escape::{EscapeMode, ESCAPE_BYTE};
pub use frame::{Frame, FrameError, FrameParser, Revision, FRAME_HEADER, FRAME_LEN, MAX_FRAME_SIZE};
pub use motion::{MotionSample, MOTION_LEN};
