//! Risk scoring
//!
//! Combines average heart rate with a weighted sleep-stage composite into a
//! single 0-100 score:
//!
//! ```text
//! sleep_composite = deep·1.5 + light·1.0 + rem·1.2
//! sleep_score     = min(sleep_composite / 8.5 · 100, 100)
//! risk            = (avg_hr - 60)·2 + (85 - sleep_score)·1.5
//! score           = clamp(round(risk), 0, 100)
//! ```

use crate::error::ComputeError;
use crate::shaping::round_half_even;
use crate::types::{RiskBreakdown, SleepBreakdown, TimedValue};

const DEEP_WEIGHT: f64 = 1.5;
const LIGHT_WEIGHT: f64 = 1.0;
const REM_WEIGHT: f64 = 1.2;

/// Composite at which the sleep score reaches 100
const SLEEP_COMPOSITE_NORM: f64 = 8.5;
const SLEEP_SCORE_CAP: f64 = 100.0;

const RESTING_HR_REFERENCE: f64 = 60.0;
const HEART_RATE_WEIGHT: f64 = 2.0;
const SLEEP_SCORE_TARGET: f64 = 85.0;
const SLEEP_DEFICIT_WEIGHT: f64 = 1.5;

/// Compute the risk score from a heart rate series and a night of sleep
pub fn calculate_risk_score(
    heart_rate: &[TimedValue],
    sleep: &SleepBreakdown,
) -> Result<u8, ComputeError> {
    explain_risk_score(heart_rate, sleep).map(|breakdown| breakdown.risk_score)
}

/// Compute the risk score along with its intermediate values
pub fn explain_risk_score(
    heart_rate: &[TimedValue],
    sleep: &SleepBreakdown,
) -> Result<RiskBreakdown, ComputeError> {
    if heart_rate.is_empty() {
        return Err(ComputeError::InsufficientReadings(
            "heart rate series is empty".to_string(),
        ));
    }

    let total: f64 = heart_rate.iter().map(|point| point.value as f64).sum();
    let average_heart_rate = total / heart_rate.len() as f64;

    let sleep_composite =
        sleep.deep * DEEP_WEIGHT + sleep.light * LIGHT_WEIGHT + sleep.rem * REM_WEIGHT;
    let sleep_score = (sleep_composite / SLEEP_COMPOSITE_NORM * 100.0).min(SLEEP_SCORE_CAP);

    let raw_risk = (average_heart_rate - RESTING_HR_REFERENCE) * HEART_RATE_WEIGHT
        + (SLEEP_SCORE_TARGET - sleep_score) * SLEEP_DEFICIT_WEIGHT;
    let risk_score = round_half_even(raw_risk).clamp(0.0, 100.0) as u8;

    Ok(RiskBreakdown {
        average_heart_rate,
        sleep_composite,
        sleep_score,
        raw_risk,
        risk_score,
    })
}
