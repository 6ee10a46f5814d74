//! Motion sensor drivers

pub mod mpu6500;

pub use mpu6500::Mpu6500;
