//! Humidity/temperature sensor interface
//!
//! Readings arrive as the 7-byte measurement frame of a DHT20: a status
//! byte, 20 bits of humidity, 20 bits of temperature and a CRC-8.

/// Bytes in one measurement frame.
pub const FRAME_LEN: usize = 7;

const STATUS_BUSY: u8 = 0x80;
const CRC_POLY: u8 = 0x31;
const RAW_SCALE: f32 = 1_048_576.0;
const RAW_MAX: u32 = 0x000F_FFFF;

/// One sample from the sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub humidity: f32,
    pub temperature_c: f32,
    pub temperature_f: f32,
}

impl Reading {
    pub fn new(humidity: f32, temperature_c: f32) -> Self {
        Self {
            humidity,
            temperature_c,
            temperature_f: celsius_to_fahrenheit(temperature_c),
        }
    }
}

pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}

#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    #[error("sensor bus error: {0}")]
    Bus(String),
    #[error("sensor busy, measurement not ready")]
    Busy,
    #[error("checksum mismatch (expected {expected:#04x}, got {actual:#04x})")]
    Checksum { expected: u8, actual: u8 },
}

impl SensorError {
    /// Error code shown on the LED bar, one lit LED per unit.
    pub fn code(&self) -> u8 {
        match self {
            SensorError::Bus(_) => 1,
            SensorError::Busy => 2,
            SensorError::Checksum { .. } => 3,
        }
    }
}

pub trait HumiditySensor {
    fn read_humidity(&mut self) -> Result<Reading, SensorError>;
}

/// CRC-8 over `data` (polynomial 0x31, initial value 0xFF).
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0xFFu8;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ CRC_POLY
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// Decodes a measurement frame.
///
/// A short frame is a bus error. The status busy bit is checked before the
/// checksum, so a frame taken mid-measurement reports `Busy`.
pub fn decode_frame(frame: &[u8]) -> Result<Reading, SensorError> {
    let Some(frame) = frame.get(..FRAME_LEN) else {
        return Err(SensorError::Bus(format!(
            "short read: {} of {} bytes",
            frame.len(),
            FRAME_LEN
        )));
    };

    if frame[0] & STATUS_BUSY != 0 {
        return Err(SensorError::Busy);
    }

    let expected = crc8(&frame[..FRAME_LEN - 1]);
    let actual = frame[FRAME_LEN - 1];
    if expected != actual {
        return Err(SensorError::Checksum { expected, actual });
    }

    let raw_humidity =
        (frame[1] as u32) << 12 | (frame[2] as u32) << 4 | (frame[3] as u32) >> 4;
    let raw_temperature =
        (frame[3] as u32 & 0x0F) << 16 | (frame[4] as u32) << 8 | frame[5] as u32;

    let humidity = raw_humidity as f32 / RAW_SCALE * 100.0;
    let temperature_c = raw_temperature as f32 / RAW_SCALE * 200.0 - 50.0;
    Ok(Reading::new(humidity, temperature_c))
}

/// Builds the frame an idle sensor would return for the given values.
pub fn encode_frame(humidity: f32, temperature_c: f32) -> [u8; FRAME_LEN] {
    let raw = |value: f32| (value * RAW_SCALE).round().clamp(0.0, RAW_MAX as f32) as u32;
    let h = raw(humidity / 100.0);
    let t = raw((temperature_c + 50.0) / 200.0);

    let mut frame = [
        0x1C,
        (h >> 12) as u8,
        (h >> 4) as u8,
        ((h & 0x0F) << 4 | (t >> 16) & 0x0F) as u8,
        (t >> 8) as u8,
        t as u8,
        0,
    ];
    frame[FRAME_LEN - 1] = crc8(&frame[..FRAME_LEN - 1]);
    frame
}

/// Deterministic stand-in for real hardware.
///
/// Humidity steps between 42.0 and 44.5 %, temperature between 20.0 and
/// 20.7 °C, so consecutive readings visibly change on the dashboard. Each
/// sample goes through the same frame decoding as the real sensor.
#[derive(Debug, Default)]
pub struct SimulatedSensor {
    tick: u64,
}

impl SimulatedSensor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HumiditySensor for SimulatedSensor {
    fn read_humidity(&mut self) -> Result<Reading, SensorError> {
        let tick = self.tick;
        self.tick = self.tick.wrapping_add(1);

        let humidity = 42.0 + (tick % 6) as f32 * 0.5;
        let temperature_c = 20.0 + (tick % 8) as f32 * 0.1;
        decode_frame(&encode_frame(humidity, temperature_c))
    }
}
