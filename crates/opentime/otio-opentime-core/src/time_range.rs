//! TimeRange: an immutable `(start_time, duration)` pair.
//!
//! Ranges are half-open: `start_time` is contained, `end_time_exclusive()` is not.

use serde::{Deserialize, Serialize};

use crate::rational_time::RationalTime;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "OTIO_SCHEMA", rename = "TimeRange.1")]
pub struct TimeRange {
    pub start_time: RationalTime,
    pub duration: RationalTime,
}

impl TimeRange {
    #[inline]
    pub const fn new(start_time: RationalTime, duration: RationalTime) -> Self {
        Self {
            start_time,
            duration,
        }
    }

    /// A range starting at zero (in `duration`'s rate) lasting `duration`.
    pub fn from_duration(duration: RationalTime) -> Self {
        Self::new(RationalTime::new(0.0, duration.rate), duration)
    }

    pub fn range_from_start_end_time(start: RationalTime, end_exclusive: RationalTime) -> Self {
        Self::new(
            start,
            RationalTime::duration_from_start_end_time(start, end_exclusive),
        )
    }

    pub fn range_from_start_end_time_inclusive(
        start: RationalTime,
        end_inclusive: RationalTime,
    ) -> Self {
        Self::new(
            start,
            RationalTime::duration_from_start_end_time_inclusive(start, end_inclusive),
        )
    }

    pub fn is_invalid_range(&self) -> bool {
        self.start_time.is_invalid_time()
            || self.duration.is_invalid_time()
            || self.duration.value < 0.0
    }

    /// First instant after the range, expressed at the start time's rate.
    pub fn end_time_exclusive(&self) -> RationalTime {
        RationalTime::new(
            self.start_time.value + self.duration.value_rescaled_to(self.start_time.rate),
            self.start_time.rate,
        )
    }

    /// Last whole frame inside the range.
    ///
    /// Ranges no longer than one frame report `start_time`. Fractional durations
    /// floor the exclusive end rather than stepping back a whole frame.
    pub fn end_time_inclusive(&self) -> RationalTime {
        let et = self.end_time_exclusive();
        let span = et - self.start_time.rescaled_to(self.duration.rate);
        if span.value > 1.0 {
            if self.duration.value != self.duration.value.floor() {
                RationalTime::new(et.value.floor(), et.rate)
            } else {
                et - RationalTime::new(1.0, self.duration.rate)
            }
        } else {
            self.start_time
        }
    }

    pub fn duration_extended_by(&self, other: RationalTime) -> Self {
        Self::new(self.start_time, self.duration + other)
    }

    /// Smallest range covering both `self` and `other`.
    pub fn extended_by(&self, other: &TimeRange) -> Self {
        let start = self.start_time.min(other.start_time);
        let end = self.end_time_exclusive().max(other.end_time_exclusive());
        Self::range_from_start_end_time(start, end)
    }

    /// Intersection of `self` and `other`. Disjoint ranges clamp to an empty
    /// range at the later start.
    pub fn clamped(&self, other: &TimeRange) -> Self {
        let start = self.start_time.max(other.start_time);
        let end = self.end_time_exclusive().min(other.end_time_exclusive());
        if end < start {
            Self::new(start, RationalTime::new(0.0, start.rate))
        } else {
            Self::range_from_start_end_time(start, end)
        }
    }

    pub fn clamped_time(&self, time: RationalTime) -> RationalTime {
        time.max(self.start_time).min(self.end_time_inclusive())
    }

    pub fn contains_time(&self, time: RationalTime) -> bool {
        self.start_time <= time && time < self.end_time_exclusive()
    }

    pub fn contains_range(&self, other: &TimeRange) -> bool {
        self.start_time <= other.start_time
            && self.end_time_exclusive() >= other.end_time_exclusive()
    }

    /// True when the two ranges share a span of non-zero length.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start_time < other.end_time_exclusive() && other.start_time < self.end_time_exclusive()
    }

    /// True when the two ranges share any instant, including a touching boundary.
    pub fn intersects(&self, other: &TimeRange) -> bool {
        self.start_time <= other.end_time_exclusive()
            && other.start_time <= self.end_time_exclusive()
    }

    pub fn before(&self, other: &TimeRange) -> bool {
        self.end_time_exclusive() < other.start_time
    }

    pub fn meets(&self, other: &TimeRange) -> bool {
        self.end_time_exclusive() == other.start_time
    }

    pub fn begins(&self, time: RationalTime) -> bool {
        self.start_time == time
    }

    pub fn finishes(&self, time: RationalTime) -> bool {
        self.end_time_exclusive() == time
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TimeRange({}, {})", self.start_time, self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rt(v: f64) -> RationalTime {
        RationalTime::new(v, 24.0)
    }

    #[test]
    fn end_time_inclusive_steps_back_one_frame() {
        let r = TimeRange::new(rt(10.0), rt(5.0));
        assert_eq!(r.end_time_exclusive(), rt(15.0));
        assert_eq!(r.end_time_inclusive(), rt(14.0));
    }

    #[test]
    fn end_time_inclusive_single_frame_is_start() {
        let r = TimeRange::new(rt(10.0), rt(1.0));
        assert_eq!(r.end_time_inclusive(), rt(10.0));
    }

    #[test]
    fn end_time_inclusive_fractional_duration_floors() {
        let r = TimeRange::new(rt(0.0), rt(10.5));
        assert_eq!(r.end_time_inclusive(), rt(10.0));
    }

    #[test]
    fn clamped_disjoint_is_empty() {
        let a = TimeRange::new(rt(0.0), rt(5.0));
        let b = TimeRange::new(rt(10.0), rt(5.0));
        let c = a.clamped(&b);
        assert_eq!(c.start_time, rt(10.0));
        assert_eq!(c.duration.value, 0.0);
    }
}
