//! Core types for LifeGuard Signals
//!
//! This module defines the value records served to the dashboard. Every record
//! is ephemeral: it is generated per request and never persisted. Field names
//! serialize exactly as the frontend reads them (`heartRate`, `riskScore`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed sleep total reported alongside the sampled stage durations (hours).
///
/// This is a label, not the sum of `deep + light + rem + awake`.
pub const SLEEP_TOTAL_HOURS: f64 = 9.0;

/// Weekday labels for the daily steps series, in output order
pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One hour-labeled reading
///
/// Integer metrics use `TimedValue<u32>` and serialize as JSON integers;
/// one-decimal metrics (spo2) use `TimedValue<f64>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedValue<V = u32> {
    /// Hour label, `"HH:00"`
    pub time: String,
    pub value: V,
}

/// Blood pressure sample (mmHg)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodPressureReading {
    pub time: String,
    pub systolic: u32,
    pub diastolic: u32,
}

/// Sleep stage durations for one night (hours)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepBreakdown {
    pub deep: f64,
    pub light: f64,
    pub rem: f64,
    pub awake: f64,
    /// Always [`SLEEP_TOTAL_HOURS`]
    #[serde(default = "default_sleep_total")]
    pub total: f64,
}

fn default_sleep_total() -> f64 {
    SLEEP_TOTAL_HOURS
}

/// Step count for one weekday
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySteps {
    pub day: String,
    pub steps: u32,
}

/// Snapshot served to the realtime dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeSnapshot {
    pub heart_rate: Vec<TimedValue>,
    pub activity: Vec<TimedValue>,
    pub blood_pressure: Vec<BloodPressureReading>,
    pub sleep: SleepBreakdown,
    /// Derived risk score (0-100)
    pub risk_score: u8,
}

/// Snapshot served to the historical dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalSnapshot {
    pub heart_rate: Vec<TimedValue>,
    pub spo2: Vec<TimedValue<f64>>,
    pub sleep: SleepBreakdown,
    pub steps: Vec<DailySteps>,
    pub blood_pressure: Vec<BloodPressureReading>,
    pub stress: Vec<TimedValue>,
    /// Generation time (UTC)
    pub timestamp: DateTime<Utc>,
}

/// Intermediate values of the risk model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskBreakdown {
    /// Mean heart rate over the series (bpm)
    pub average_heart_rate: f64,
    /// Weighted sleep stage composite
    pub sleep_composite: f64,
    /// Sleep composite normalized to at most 100
    pub sleep_score: f64,
    /// Risk before rounding and clamping
    pub raw_risk: f64,
    pub risk_score: u8,
}
