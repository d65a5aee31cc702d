//! LifeGuard Signals - synthetic wearable health signals for the LifeGuard dashboard
//!
//! The core is a deterministic-given-a-seed generator that shapes hour-indexed
//! physiological series (heart rate, activity, blood pressure, sleep, spo2,
//! steps, stress) and derives a 0-100 risk score from heart rate and sleep.
//!
//! ## Modules
//!
//! - **Generator**: [`generator::HealthSignalGenerator`] over an injected `rand::Rng`
//! - **Risk**: [`risk::calculate_risk_score`] and its breakdown
//! - **Snapshots**: realtime and historical dashboard payloads
//! - **Service**: axum router, configuration, assistant endpoint and startup

pub mod api;
pub mod assistant;
pub mod config;
pub mod error;
pub mod generator;
pub mod observability;
pub mod risk;
pub mod shaping;
pub mod snapshot;
pub mod startup;
pub mod types;

pub use error::{ApiError, ComputeError, ProviderError};
pub use generator::HealthSignalGenerator;
pub use risk::{calculate_risk_score, explain_risk_score};
pub use snapshot::{historical_snapshot, historical_snapshot_at, realtime_snapshot};

/// Crate version reported by the liveness probe and CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service name reported by the liveness probe
pub const SERVICE_NAME: &str = "lifeguard-signals";
