//! Raw motion payload

/// Number of motion bytes in a frame
pub const MOTION_LEN: usize = 6;

/// Six raw bytes from the sensor burst read
///
/// Three 16-bit signed axis readings, big-endian, exactly as the sensor
/// delivers them. The controller never decodes them; [`MotionSample::axes`]
/// exists for receivers and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionSample(pub [u8; MOTION_LEN]);

impl MotionSample {
    /// All-zero sample, sent when no reading has succeeded yet
    pub const ZERO: Self = Self([0; MOTION_LEN]);

    /// Raw bytes
    pub fn as_bytes(&self) -> &[u8; MOTION_LEN] {
        &self.0
    }

    /// Decode the three big-endian axis readings (x, y, z)
    pub fn axes(&self) -> [i16; 3] {
        let b = &self.0;
        [
            i16::from_be_bytes([b[0], b[1]]),
            i16::from_be_bytes([b[2], b[3]]),
            i16::from_be_bytes([b[4], b[5]]),
        ]
    }

    /// Build a sample from axis readings
    pub fn from_axes(x: i16, y: i16, z: i16) -> Self {
        let [x0, x1] = x.to_be_bytes();
        let [y0, y1] = y.to_be_bytes();
        let [z0, z1] = z.to_be_bytes();
        Self([x0, x1, y0, y1, z0, z1])
    }
}

impl From<[u8; MOTION_LEN]> for MotionSample {
    fn from(bytes: [u8; MOTION_LEN]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_big_endian() {
        let sample = MotionSample([0x01, 0x02, 0xFF, 0xFE, 0x80, 0x00]);
        assert_eq!(sample.axes(), [0x0102, -2, i16::MIN]);
    }

    #[test]
    fn test_from_axes() {
        let sample = MotionSample::from_axes(-1, 256, 0);
        assert_eq!(sample.0, [0xFF, 0xFF, 0x01, 0x00, 0x00, 0x00]);
    }
}
