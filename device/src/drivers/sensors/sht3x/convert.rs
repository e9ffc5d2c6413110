//! Conversion of raw 16-bit signal codes to physical values (datasheet
//! section 4.13). Results are rounded to three decimal places.

const FULL_SCALE: f64 = 65535.0;

/// Temperature in degrees celsius.
pub fn raw_to_celsius(code: u16) -> f32 {
    round3(-45.0 + 175.0 * (code as f64 / FULL_SCALE))
}

/// Temperature in degrees fahrenheit.
pub fn raw_to_fahrenheit(code: u16) -> f32 {
    round3(-49.0 + 315.0 * (code as f64 / FULL_SCALE))
}

/// Relative humidity in percent, within 0..=100 for every code.
pub fn raw_to_humidity(code: u16) -> f32 {
    round3(100.0 * (code as f64 / FULL_SCALE))
}

// f32 cannot resolve the .0005 boundary for every code; `f64::round` needs std
fn round3(value: f64) -> f32 {
    let scaled = value * 1000.0;
    let rounded = if scaled >= 0.0 {
        (scaled + 0.5) as i64
    } else {
        (scaled - 0.5) as i64
    };
    (rounded as f64 / 1000.0) as f32
}
