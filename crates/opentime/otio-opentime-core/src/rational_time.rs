//! RationalTime: a point in time (or a duration) expressed as `value / rate` seconds.
//!
//! Values are stored unreduced so that a time authored at 24fps keeps its frame
//! count. Arithmetic between two times picks the finer (larger) rate so no
//! precision is lost when mixing bases.

use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(tag = "OTIO_SCHEMA", rename = "RationalTime.1")]
pub struct RationalTime {
    pub value: f64,
    pub rate: f64,
}

impl Default for RationalTime {
    fn default() -> Self {
        Self {
            value: 0.0,
            rate: 1.0,
        }
    }
}

impl RationalTime {
    #[inline]
    pub const fn new(value: f64, rate: f64) -> Self {
        Self { value, rate }
    }

    /// A time is invalid when its rate is non-positive or either component is NaN.
    pub fn is_invalid_time(&self) -> bool {
        self.value.is_nan() || self.rate.is_nan() || self.rate <= 0.0
    }

    /// Express this time in `new_rate` units without changing the instant it denotes.
    #[inline]
    pub fn rescaled_to(&self, new_rate: f64) -> Self {
        Self::new(self.value_rescaled_to(new_rate), new_rate)
    }

    #[inline]
    pub fn value_rescaled_to(&self, new_rate: f64) -> f64 {
        if new_rate == self.rate {
            self.value
        } else {
            self.value * new_rate / self.rate
        }
    }

    #[inline]
    pub fn to_seconds(&self) -> f64 {
        self.value / self.rate
    }

    pub fn from_seconds(seconds: f64, rate: f64) -> Self {
        Self::new(seconds * rate, rate)
    }

    pub fn from_frames(frame: f64, rate: f64) -> Self {
        Self::new(frame.floor(), rate)
    }

    /// Whole frame index at this time's own rate (floor).
    pub fn to_frames(&self) -> i64 {
        self.value.floor() as i64
    }

    /// Whole frame index at `rate` (floor).
    pub fn to_frames_at(&self, rate: f64) -> i64 {
        self.value_rescaled_to(rate).floor() as i64
    }

    pub fn almost_equal(&self, other: &Self, delta: f64) -> bool {
        (self.value_rescaled_to(other.rate) - other.value).abs() <= delta
    }

    /// Duration between `start` and an exclusive `end`, at `start`'s rate.
    pub fn duration_from_start_end_time(start: Self, end_exclusive: Self) -> Self {
        Self::new(
            end_exclusive.value_rescaled_to(start.rate) - start.value,
            start.rate,
        )
    }

    /// Duration between `start` and an inclusive `end`, at `start`'s rate.
    pub fn duration_from_start_end_time_inclusive(start: Self, end_inclusive: Self) -> Self {
        Self::new(
            end_inclusive.value_rescaled_to(start.rate) - start.value + 1.0,
            start.rate,
        )
    }

    pub fn min(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }

    pub fn max(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }
}

impl PartialEq for RationalTime {
    fn eq(&self, other: &Self) -> bool {
        self.value_rescaled_to(other.rate) == other.value
    }
}

impl PartialOrd for RationalTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.to_seconds().partial_cmp(&other.to_seconds())
    }
}

impl Add for RationalTime {
    type Output = RationalTime;

    fn add(self, rhs: Self) -> Self::Output {
        if self.rate < rhs.rate {
            Self::new(self.value_rescaled_to(rhs.rate) + rhs.value, rhs.rate)
        } else {
            Self::new(rhs.value_rescaled_to(self.rate) + self.value, self.rate)
        }
    }
}

impl Sub for RationalTime {
    type Output = RationalTime;

    fn sub(self, rhs: Self) -> Self::Output {
        if self.rate < rhs.rate {
            Self::new(self.value_rescaled_to(rhs.rate) - rhs.value, rhs.rate)
        } else {
            Self::new(self.value - rhs.value_rescaled_to(self.rate), self.rate)
        }
    }
}

impl Neg for RationalTime {
    type Output = RationalTime;

    fn neg(self) -> Self::Output {
        Self::new(-self.value, self.rate)
    }
}

impl AddAssign for RationalTime {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for RationalTime {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl std::fmt::Display for RationalTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RationalTime({}, {})", self.value, self.rate)
    }
}
