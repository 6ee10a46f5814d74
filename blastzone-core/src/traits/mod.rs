//! Hardware abstraction traits
//!
//! These traits define the interface between the sample loop and the
//! device drivers.

pub mod sensor;

pub use sensor::{BusError, MotionSensor, TransferPhase};
