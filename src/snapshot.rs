//! Snapshot assembly
//!
//! Builds the two dashboard payloads from a single generator:
//! - Realtime: heart rate, activity, blood pressure, sleep and the derived risk score
//! - Historical: heart rate, spo2, sleep, steps, blood pressure, stress and a timestamp

use crate::error::ComputeError;
use crate::generator::HealthSignalGenerator;
use crate::risk::calculate_risk_score;
use crate::types::{HistoricalSnapshot, RealtimeSnapshot};
use chrono::{DateTime, Utc};
use rand::Rng;

/// Assemble a realtime snapshot
pub fn realtime_snapshot<R: Rng>(
    generator: &mut HealthSignalGenerator<R>,
) -> Result<RealtimeSnapshot, ComputeError> {
    let heart_rate = generator.heart_rate_24h();
    let activity = generator.activity_24h();
    let blood_pressure = generator.blood_pressure_12h();
    let sleep = generator.sleep_quality();
    let risk_score = calculate_risk_score(&heart_rate, &sleep)?;

    Ok(RealtimeSnapshot {
        heart_rate,
        activity,
        blood_pressure,
        sleep,
        risk_score,
    })
}

/// Assemble a historical snapshot stamped with the current time
pub fn historical_snapshot<R: Rng>(generator: &mut HealthSignalGenerator<R>) -> HistoricalSnapshot {
    historical_snapshot_at(generator, Utc::now())
}

/// Assemble a historical snapshot stamped with `generated_at`
pub fn historical_snapshot_at<R: Rng>(
    generator: &mut HealthSignalGenerator<R>,
    generated_at: DateTime<Utc>,
) -> HistoricalSnapshot {
    HistoricalSnapshot {
        heart_rate: generator.heart_rate_24h(),
        spo2: generator.spo2_24h(),
        sleep: generator.sleep_quality(),
        steps: generator.daily_steps(),
        blood_pressure: generator.blood_pressure_12h(),
        stress: generator.stress_24h(),
        timestamp: generated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn sorted_keys(value: &serde_json::Value) -> Vec<String> {
        let mut keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    #[test]
    fn test_realtime_snapshot_shape() {
        let mut generator = HealthSignalGenerator::seeded(7);
        let snapshot = realtime_snapshot(&mut generator).unwrap();

        assert_eq!(snapshot.heart_rate.len(), 24);
        assert_eq!(snapshot.activity.len(), 24);
        assert_eq!(snapshot.blood_pressure.len(), 12);
        assert!(snapshot.risk_score <= 100);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            sorted_keys(&json),
            vec!["activity", "bloodPressure", "heartRate", "riskScore", "sleep"]
        );
    }

    #[test]
    fn test_realtime_risk_matches_its_own_series() {
        let mut generator = HealthSignalGenerator::seeded(99);
        let snapshot = realtime_snapshot(&mut generator).unwrap();

        let expected = calculate_risk_score(&snapshot.heart_rate, &snapshot.sleep).unwrap();
        assert_eq!(snapshot.risk_score, expected);
    }

    #[test]
    fn test_historical_snapshot_shape() {
        let mut generator = HealthSignalGenerator::seeded(7);
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap();
        let snapshot = historical_snapshot_at(&mut generator, at);

        assert_eq!(snapshot.heart_rate.len(), 24);
        assert_eq!(snapshot.spo2.len(), 24);
        assert_eq!(snapshot.stress.len(), 24);
        assert_eq!(snapshot.steps.len(), 7);
        assert_eq!(snapshot.blood_pressure.len(), 12);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            sorted_keys(&json),
            vec![
                "bloodPressure",
                "heartRate",
                "sleep",
                "spo2",
                "steps",
                "stress",
                "timestamp"
            ]
        );
        assert_eq!(json["timestamp"], "2024-01-15T08:30:00Z");
    }

    #[test]
    fn test_seeded_snapshots_are_reproducible() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let a = historical_snapshot_at(&mut HealthSignalGenerator::seeded(5), at);
        let b = historical_snapshot_at(&mut HealthSignalGenerator::seeded(5), at);
        assert_eq!(a, b);
    }
}
