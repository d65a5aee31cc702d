//! Signal shaping primitives
//!
//! This module holds the numeric building blocks shared by every metric series:
//! - Half-open uniform draws `[min, max)` over a [`SignalRange`]
//! - Clamping and half-to-even rounding
//! - Diurnal waveform profiles (baseline + sinusoid + jitter)
//! - Explicit hour ranges used both as waveform input and as `"HH:00"` labels

use crate::error::ComputeError;
use rand::Rng;
use std::f64::consts::PI;

/// Numeric interval with `min <= max`; bounds are inclusive for [`Self::clamp`]
/// and [`Self::contains`], draws from [`Self::sample`] are half-open
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalRange {
    min: f64,
    max: f64,
}

impl SignalRange {
    /// Create a range, rejecting `min > max` and NaN bounds
    pub fn new(min: f64, max: f64) -> Result<Self, ComputeError> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(ComputeError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Range `[-half_width, half_width]`
    pub(crate) const fn symmetric(half_width: f64) -> Self {
        Self {
            min: -half_width,
            max: half_width,
        }
    }

    /// Unchecked constructor for compile-time constants
    pub(crate) const fn between(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Uniform draw `min + (max - min) * u` with `u` in `[0, 1)`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.min + (self.max - self.min) * rng.gen::<f64>()
    }

    /// Constrain `value` to this range
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

/// Round to the nearest integer, ties to even (`2.5 -> 2`, `-2.5 -> -2`)
pub fn round_half_even(value: f64) -> f64 {
    value.round_ties_even()
}

/// Round to `decimals` places, ties to even
///
/// Rounds the exact binary value, so `97.35` (stored just below) gives `97.3`
/// and `0.45` (stored just above) gives `0.5`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if decimals == 0 {
        return round_half_even(value);
    }
    format!("{:.*}", decimals as usize, value)
        .parse()
        .unwrap_or(value)
}

/// Diurnal waveform: `baseline + amplitude * sin(2π·h/24) + U(jitter)`,
/// clamped to `bounds` and rounded to `decimals`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiurnalProfile {
    pub baseline: f64,
    pub amplitude: f64,
    pub jitter: SignalRange,
    pub bounds: SignalRange,
    pub decimals: u32,
}

impl DiurnalProfile {
    /// Heart rate (bpm)
    pub const HEART_RATE: DiurnalProfile = DiurnalProfile {
        baseline: 70.0,
        amplitude: 10.0,
        jitter: SignalRange::symmetric(3.0),
        bounds: SignalRange::between(55.0, 95.0),
        decimals: 0,
    };

    /// Blood oxygen saturation (%)
    pub const SPO2: DiurnalProfile = DiurnalProfile {
        baseline: 97.0,
        amplitude: 2.0,
        jitter: SignalRange::symmetric(0.5),
        bounds: SignalRange::between(93.0, 100.0),
        decimals: 1,
    };

    /// Stress level (0-100 scale)
    pub const STRESS: DiurnalProfile = DiurnalProfile {
        baseline: 40.0,
        amplitude: 20.0,
        jitter: SignalRange::symmetric(5.0),
        bounds: SignalRange::between(10.0, 90.0),
        decimals: 0,
    };

    /// Deterministic part of the waveform at `hour`
    pub fn wave(&self, hour: u32) -> f64 {
        let phase = hour as f64 / 24.0 * 2.0 * PI;
        self.baseline + phase.sin() * self.amplitude
    }

    /// Sample one reading at `hour`
    pub fn sample<R: Rng + ?Sized>(&self, hour: u32, rng: &mut R) -> f64 {
        let raw = self.wave(hour) + self.jitter.sample(rng);
        round_to(self.bounds.clamp(raw), self.decimals)
    }
}

/// Half-open hour range `[start, end)` stepped by `step`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourRange {
    pub start: u32,
    pub end: u32,
    pub step: u32,
}

impl HourRange {
    /// Every hour of the day
    pub const DAY: HourRange = HourRange {
        start: 0,
        end: 24,
        step: 1,
    };

    /// Every second hour of the day
    pub const EVERY_OTHER: HourRange = HourRange {
        start: 0,
        end: 24,
        step: 2,
    };

    pub fn hours(&self) -> impl Iterator<Item = u32> {
        (self.start..self.end).step_by(self.step.max(1) as usize)
    }

    pub fn len(&self) -> usize {
        self.hours().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Zero-padded hour label, `7 -> "07:00"`
pub fn hour_label(hour: u32) -> String {
    format!("{hour:02}:00")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_round_half_even() {
        assert_eq!(round_half_even(-2.5), -2.0);
        assert_eq!(round_half_even(2.5), 2.0);
        assert_eq!(round_half_even(3.5), 4.0);
        assert_eq!(round_half_even(71.6), 72.0);
    }

    #[test]
    fn test_round_to_one_decimal() {
        assert!((round_to(97.44, 1) - 97.4).abs() < 1e-9);
        assert!((round_to(1.96, 1) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_to_uses_stored_binary_value() {
        // scaling by 10 first would turn 97.35 into the tie 973.5 and give 97.4
        assert_eq!(round_to(97.35, 1), 97.3);
        assert_eq!(round_to(0.45, 1), 0.5);
        assert_eq!(round_to(96.65, 1), 96.7);
        assert_eq!(round_to(2.675, 2), 2.67);
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        assert!(SignalRange::new(5.0, 1.0).is_err());
        assert!(SignalRange::new(f64::NAN, 1.0).is_err());
        assert!(SignalRange::new(1.0, 1.0).is_ok());
    }

    #[test]
    fn test_sample_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = SignalRange::new(6500.0, 11500.0).unwrap();
        for _ in 0..1000 {
            assert!(range.contains(range.sample(&mut rng)));
        }
    }

    #[test]
    fn test_builtin_profiles_are_valid() {
        for profile in [
            DiurnalProfile::HEART_RATE,
            DiurnalProfile::SPO2,
            DiurnalProfile::STRESS,
        ] {
            assert!(SignalRange::new(profile.jitter.min(), profile.jitter.max()).is_ok());
            assert!(SignalRange::new(profile.bounds.min(), profile.bounds.max()).is_ok());
        }
    }

    #[test]
    fn test_wave_peaks_at_six() {
        let hr = DiurnalProfile::HEART_RATE;
        assert!((hr.wave(0) - 70.0).abs() < 1e-9);
        assert!((hr.wave(6) - 80.0).abs() < 1e-9);
        assert!((hr.wave(18) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_hour_ranges() {
        assert_eq!(HourRange::DAY.len(), 24);
        let every_other: Vec<u32> = HourRange::EVERY_OTHER.hours().collect();
        assert_eq!(every_other, vec![0, 2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22]);
    }

    #[test]
    fn test_hour_label() {
        assert_eq!(hour_label(0), "00:00");
        assert_eq!(hour_label(9), "09:00");
        assert_eq!(hour_label(23), "23:00");
    }
}
