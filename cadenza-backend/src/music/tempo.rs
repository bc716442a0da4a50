use crate::{Error, error};

/// Target tempo after adding `delta` beats per minute to `current`.
pub fn shift(current: u32, delta: i32) -> Result<u32, Error> {
    if current == 0 {
        return error::Kind::ZeroBpm.into();
    }
    let target = i64::from(current) + i64::from(delta);
    match u32::try_from(target) {
        Ok(target) if target > 0 => Ok(target),
        _ => error::Kind::InvalidBpm(target).into(),
    }
}

/// Playback speed factor turning `current` into `target`, rounded to `precision` decimal digits.
pub fn ratio(current: u32, target: u32, precision: u32) -> Result<f64, Error> {
    if current == 0 {
        return error::Kind::ZeroBpm.into();
    }
    let scale = 10f64.powi(precision.min(15) as i32);
    Ok((f64::from(target) / f64::from(current) * scale).round() / scale)
}
