//! SMPTE timecode and `HH:MM:SS.ffffff` time-string conversion.
//!
//! Drop-frame counting follows the NTSC convention: two frame numbers (four at
//! 59.94) are skipped at the start of every minute except each tenth minute.

use crate::error::OpentimeError;
use crate::rational_time::RationalTime;

const RATE_TOLERANCE: f64 = 1e-3;

/// Frame counts at or above this cannot be laid out as `HH:MM:SS:FF`.
const MAX_TIMECODE_FRAMES: f64 = (1u64 << 53) as f64;

const VALID_TIMECODE_RATES: &[f64] = &[
    1.0,
    12.0,
    23.97,
    23.976,
    23.98,
    24000.0 / 1001.0,
    24.0,
    25.0,
    29.97,
    30000.0 / 1001.0,
    30.0,
    47.95,
    47.952,
    48000.0 / 1001.0,
    48.0,
    50.0,
    59.94,
    60000.0 / 1001.0,
    60.0,
];

/// Whether `to_timecode` should count in drop-frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DropFrame {
    /// Drop-frame for 29.97 and 59.94, non-drop otherwise.
    #[default]
    InferFromRate,
    ForceNo,
    ForceYes,
}

pub fn is_valid_timecode_rate(rate: f64) -> bool {
    VALID_TIMECODE_RATES
        .iter()
        .any(|r| (r - rate).abs() < RATE_TOLERANCE)
}

pub fn nearest_valid_timecode_rate(rate: f64) -> f64 {
    VALID_TIMECODE_RATES
        .iter()
        .copied()
        .min_by(|a, b| {
            (a - rate)
                .abs()
                .partial_cmp(&(b - rate).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(24.0)
}

fn is_drop_frame_rate(rate: f64) -> bool {
    (rate - 30000.0 / 1001.0).abs() < 0.01 || (rate - 60000.0 / 1001.0).abs() < 0.01
}

fn dropped_per_minute(nominal_fps: i64) -> i64 {
    if nominal_fps == 60 {
        4
    } else {
        2
    }
}

impl RationalTime {
    /// Format as `HH:MM:SS:FF` (`HH:MM:SS;FF` when drop-frame) at `rate`.
    pub fn to_timecode(&self, rate: f64, drop_frame: DropFrame) -> Result<String, OpentimeError> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(OpentimeError::InvalidRate(rate));
        }
        if !is_valid_timecode_rate(rate) {
            return Err(OpentimeError::InvalidTimecodeRate(rate));
        }
        let use_drop_frame = match drop_frame {
            DropFrame::ForceYes => {
                if !is_drop_frame_rate(rate) {
                    return Err(OpentimeError::DropFrameUnsupported(rate));
                }
                true
            }
            DropFrame::ForceNo => false,
            DropFrame::InferFromRate => is_drop_frame_rate(rate),
        };

        let frames_in_rate = self.value_rescaled_to(rate);
        let unrepresentable = || {
            OpentimeError::timecode(
                &frames_in_rate.to_string(),
                "frame count is not representable as timecode",
            )
        };
        if frames_in_rate.is_nan() {
            return Err(unrepresentable());
        }
        if frames_in_rate < 0.0 {
            return Err(OpentimeError::NegativeValue(frames_in_rate));
        }
        if frames_in_rate >= MAX_TIMECODE_FRAMES {
            return Err(unrepresentable());
        }
        // Nudge before flooring so 1001/30000-style rescales land on their frame.
        let mut frame = (frames_in_rate + 1e-6).floor() as i64;
        let nominal_fps = rate.ceil() as i64;

        if use_drop_frame {
            let dropped = dropped_per_minute(nominal_fps);
            let frames_per_ten_minutes = (rate * 600.0).round() as i64;
            let frames_per_minute = nominal_fps * 60 - dropped;
            let ten_minute_chunks = frame / frames_per_ten_minutes;
            let remainder = frame % frames_per_ten_minutes;
            let mut skipped = dropped * 9 * ten_minute_chunks;
            if remainder > dropped {
                skipped += dropped * ((remainder - dropped) / frames_per_minute);
            }
            frame = frame.checked_add(skipped).ok_or_else(unrepresentable)?;
        }

        let ff = frame % nominal_fps;
        let ss = (frame / nominal_fps) % 60;
        let mm = (frame / (nominal_fps * 60)) % 60;
        let hh = frame / (nominal_fps * 3600);
        let sep = if use_drop_frame { ';' } else { ':' };
        Ok(format!("{hh:02}:{mm:02}:{ss:02}{sep}{ff:02}"))
    }

    /// Parse `HH:MM:SS:FF` or drop-frame `HH:MM:SS;FF` at `rate`.
    pub fn from_timecode(timecode: &str, rate: f64) -> Result<Self, OpentimeError> {
        if !is_valid_timecode_rate(rate) {
            return Err(OpentimeError::InvalidTimecodeRate(rate));
        }
        let drop_frame = timecode.contains(';');
        let fields: Vec<&str> = timecode.split([':', ';']).collect();
        if fields.len() != 4 {
            return Err(OpentimeError::timecode(
                timecode,
                "expected four fields HH:MM:SS:FF",
            ));
        }
        let mut parsed = [0i64; 4];
        for (slot, field) in parsed.iter_mut().zip(&fields) {
            if field.is_empty() || !field.chars().all(|c| c.is_ascii_digit()) {
                return Err(OpentimeError::timecode(
                    timecode,
                    format!("field '{field}' is not a non-negative integer"),
                ));
            }
            *slot = field
                .parse()
                .map_err(|_| OpentimeError::timecode(timecode, "field out of range"))?;
        }
        let [hh, mm, ss, ff] = parsed;
        let nominal_fps = rate.ceil() as i64;
        if ff >= nominal_fps {
            return Err(OpentimeError::timecode(
                timecode,
                format!("frame field {ff} exceeds rate {rate}"),
            ));
        }
        if mm >= 60 || ss >= 60 {
            return Err(OpentimeError::timecode(
                timecode,
                "minutes and seconds must be below 60",
            ));
        }

        let overflow = || OpentimeError::timecode(timecode, "timecode is out of range");
        let total_minutes = hh
            .checked_mul(60)
            .and_then(|m| m.checked_add(mm))
            .ok_or_else(overflow)?;
        let mut frames = total_minutes
            .checked_mul(60)
            .and_then(|s| s.checked_add(ss))
            .and_then(|s| s.checked_mul(nominal_fps))
            .and_then(|f| f.checked_add(ff))
            .ok_or_else(overflow)?;
        if drop_frame {
            if !is_drop_frame_rate(rate) {
                return Err(OpentimeError::DropFrameUnsupported(rate));
            }
            let dropped = dropped_per_minute(nominal_fps);
            frames -= dropped * (total_minutes - total_minutes / 10);
        }
        Ok(RationalTime::new(frames as f64, rate))
    }

    /// Format as `[-]HH:MM:SS.f` with up to six fractional digits.
    pub fn to_time_string(&self) -> String {
        let seconds = self.to_seconds();
        let sign = if seconds < 0.0 { "-" } else { "" };
        let micros = (seconds.abs() * 1_000_000.0).round() as u64;
        let hh = micros / 3_600_000_000;
        let mm = (micros / 60_000_000) % 60;
        let ss = (micros / 1_000_000) % 60;
        let frac = format!("{:06}", micros % 1_000_000);
        let frac = frac.trim_end_matches('0');
        let frac = if frac.is_empty() { "0" } else { frac };
        format!("{sign}{hh:02}:{mm:02}:{ss:02}.{frac}")
    }

    /// Parse `[-][[HH:]MM:]SS[.fff]` into a time at `rate`.
    pub fn from_time_string(time_string: &str, rate: f64) -> Result<Self, OpentimeError> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(OpentimeError::InvalidRate(rate));
        }
        let (negative, body) = match time_string.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, time_string),
        };
        let fields: Vec<&str> = body.split(':').collect();
        if fields.is_empty() || fields.len() > 3 {
            return Err(OpentimeError::timestring(
                time_string,
                "expected at most three ':'-separated fields",
            ));
        }
        let (seconds_field, unit_fields) = fields
            .split_last()
            .ok_or_else(|| OpentimeError::timestring(time_string, "empty time string"))?;

        let valid_seconds = !seconds_field.is_empty()
            && seconds_field.chars().all(|c| c.is_ascii_digit() || c == '.')
            && seconds_field.matches('.').count() <= 1;
        if !valid_seconds {
            return Err(OpentimeError::timestring(
                time_string,
                format!("seconds field '{seconds_field}' is not a number"),
            ));
        }
        let seconds: f64 = seconds_field
            .parse()
            .map_err(|_| OpentimeError::timestring(time_string, "unparseable seconds"))?;

        let mut total = seconds;
        let mut scale = 60.0;
        for field in unit_fields.iter().rev() {
            if field.is_empty() || !field.chars().all(|c| c.is_ascii_digit()) {
                return Err(OpentimeError::timestring(
                    time_string,
                    format!("field '{field}' is not a non-negative integer"),
                ));
            }
            let units: f64 = field
                .parse::<u64>()
                .map_err(|_| OpentimeError::timestring(time_string, "field out of range"))?
                as f64;
            total += units * scale;
            scale *= 60.0;
        }
        if negative {
            total = -total;
        }
        Ok(RationalTime::from_seconds(total, rate))
    }
}
