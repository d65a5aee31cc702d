//! Health signal generation
//!
//! [`HealthSignalGenerator`] produces bounded, hour-indexed synthetic readings.
//! It owns its random source, so callers choose between OS entropy (serving)
//! and a fixed seed (tests, reproducible CLI output).

use crate::shaping::{hour_label, round_half_even, round_to, DiurnalProfile, HourRange, SignalRange};
use crate::types::{
    BloodPressureReading, DailySteps, SleepBreakdown, TimedValue, SLEEP_TOTAL_HOURS, WEEKDAYS,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Activity level during waking hours
const ACTIVITY_AWAKE: SignalRange = SignalRange::between(40.0, 80.0);
/// Activity level overnight
const ACTIVITY_ASLEEP: SignalRange = SignalRange::between(5.0, 15.0);
/// Inclusive waking window for activity (hours)
const WAKING_HOURS: std::ops::RangeInclusive<u32> = 6..=22;

const SYSTOLIC_BASELINE: f64 = 120.0;
const SYSTOLIC_JITTER: SignalRange = SignalRange::symmetric(10.0);
const SYSTOLIC_BOUNDS: SignalRange = SignalRange::between(100.0, 140.0);
const DIASTOLIC_BASELINE: f64 = 78.0;
const DIASTOLIC_JITTER: SignalRange = SignalRange::symmetric(6.0);
const DIASTOLIC_BOUNDS: SignalRange = SignalRange::between(65.0, 90.0);

const SLEEP_DEEP: SignalRange = SignalRange::between(1.5, 2.5);
const SLEEP_LIGHT: SignalRange = SignalRange::between(3.5, 4.5);
const SLEEP_REM: SignalRange = SignalRange::between(1.0, 2.0);
const SLEEP_AWAKE: SignalRange = SignalRange::between(0.2, 0.6);

/// Daily step count range
pub const DAILY_STEPS: SignalRange = SignalRange::between(6500.0, 11500.0);

/// Synthetic health signal generator over an injected random source
pub struct HealthSignalGenerator<R: Rng = StdRng> {
    rng: R,
}

impl HealthSignalGenerator<StdRng> {
    /// Generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic generator for a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> HealthSignalGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Heart rate for every hour of the day (bpm, 55-95)
    pub fn heart_rate_24h(&mut self) -> Vec<TimedValue> {
        self.integer_series(HourRange::DAY, &DiurnalProfile::HEART_RATE)
    }

    /// Activity level for every hour of the day; high between 06:00 and 22:00
    pub fn activity_24h(&mut self) -> Vec<TimedValue> {
        HourRange::DAY
            .hours()
            .map(|hour| {
                let range = if WAKING_HOURS.contains(&hour) {
                    ACTIVITY_AWAKE
                } else {
                    ACTIVITY_ASLEEP
                };
                TimedValue {
                    time: hour_label(hour),
                    value: round_half_even(range.sample(&mut self.rng)) as u32,
                }
            })
            .collect()
    }

    /// Blood pressure every second hour (12 readings)
    pub fn blood_pressure_12h(&mut self) -> Vec<BloodPressureReading> {
        HourRange::EVERY_OTHER
            .hours()
            .map(|hour| {
                let systolic =
                    SYSTOLIC_BOUNDS.clamp(SYSTOLIC_BASELINE + SYSTOLIC_JITTER.sample(&mut self.rng));
                let diastolic = DIASTOLIC_BOUNDS
                    .clamp(DIASTOLIC_BASELINE + DIASTOLIC_JITTER.sample(&mut self.rng));
                BloodPressureReading {
                    time: hour_label(hour),
                    systolic: round_half_even(systolic) as u32,
                    diastolic: round_half_even(diastolic) as u32,
                }
            })
            .collect()
    }

    /// Sleep stage durations for one night; `total` is always 9.0
    pub fn sleep_quality(&mut self) -> SleepBreakdown {
        SleepBreakdown {
            deep: round_to(SLEEP_DEEP.sample(&mut self.rng), 1),
            light: round_to(SLEEP_LIGHT.sample(&mut self.rng), 1),
            rem: round_to(SLEEP_REM.sample(&mut self.rng), 1),
            awake: round_to(SLEEP_AWAKE.sample(&mut self.rng), 1),
            total: SLEEP_TOTAL_HOURS,
        }
    }

    /// Blood oxygen saturation for every hour of the day (%, one decimal)
    pub fn spo2_24h(&mut self) -> Vec<TimedValue<f64>> {
        let profile = DiurnalProfile::SPO2;
        HourRange::DAY
            .hours()
            .map(|hour| TimedValue {
                time: hour_label(hour),
                value: profile.sample(hour, &mut self.rng),
            })
            .collect()
    }

    /// Step counts for Mon through Sun
    pub fn daily_steps(&mut self) -> Vec<DailySteps> {
        WEEKDAYS
            .iter()
            .map(|day| DailySteps {
                day: day.to_string(),
                steps: round_half_even(DAILY_STEPS.sample(&mut self.rng)) as u32,
            })
            .collect()
    }

    /// Stress level for every hour of the day (10-90)
    pub fn stress_24h(&mut self) -> Vec<TimedValue> {
        self.integer_series(HourRange::DAY, &DiurnalProfile::STRESS)
    }

    fn integer_series(&mut self, hours: HourRange, profile: &DiurnalProfile) -> Vec<TimedValue> {
        hours
            .hours()
            .map(|hour| TimedValue {
                time: hour_label(hour),
                value: profile.sample(hour, &mut self.rng) as u32,
            })
            .collect()
    }
}
