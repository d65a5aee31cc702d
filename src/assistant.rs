//! Health explanation assistant
//!
//! Wraps a user's chat message in the fixed LifeGuard explanation prompt, hands
//! it to a [`ReplyProvider`], and returns the reply as an `ai` message.

use crate::error::ProviderError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Prompt preamble. The user's text is appended directly after it.
pub const PROMPT_PREAMBLE: &str = r#"You are an AI health explanation assistant for a system called LifeGuard.
You do NOT diagnose medical conditions.
Your job is to clearly explain health risk trends in simple language and suggest safe, general actions.

{
  "heartRateTrend": "gradually increasing over the last 4 hours",
  "hrvTrend": "decreasing, showing stress buildup",
  "sleepTrend": "sleep duration reduced for 2 days",
  "activityTrend": "lower than usual",
  "stressTrend": "moderate and fluctuating",
  "riskScore": 68,
  "state": "Pre-Anomaly"
}
Give it to me as a paragraph with consistent font"#;

/// Reply used by the offline provider when none is configured
pub const DEFAULT_CANNED_REPLY: &str = "Your heart rate has been drifting upward over the last few hours while your sleep has been shorter than usual, which together point to building stress rather than an immediate concern. Try to take a short walk, stay hydrated, and aim for an earlier night; if you notice chest pain, dizziness, or shortness of breath, contact a medical professional.";

/// Sender of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Ai,
}

/// Chat message exchanged with the frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMessage {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub text: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// RFC 3339 timestamp, or a naive ISO-8601 one read as UTC
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{raw}': {e}")))
}

/// Build the full model prompt for a user's text
pub fn build_prompt(text: &str) -> String {
    format!("{PROMPT_PREAMBLE}{text}")
}

/// Generates a reply for a prompt
#[async_trait]
pub trait ReplyProvider: Send + Sync {
    /// Provider name for logs and diagnostics
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Provider that answers every prompt with a fixed explanation
pub struct OfflineReplyProvider {
    reply: String,
}

impl OfflineReplyProvider {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl Default for OfflineReplyProvider {
    fn default() -> Self {
        Self::new(DEFAULT_CANNED_REPLY)
    }
}

#[async_trait]
impl ReplyProvider for OfflineReplyProvider {
    fn name(&self) -> &str {
        "offline"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        if self.reply.trim().is_empty() {
            return Err(ProviderError::NotConfigured(
                "offline provider has an empty reply".to_string(),
            ));
        }
        Ok(self.reply.clone())
    }
}

/// Ask `provider` to answer `message`, stamping the reply with `now`
///
/// The reply id is `now` in epoch milliseconds plus one, so it sorts after a
/// user message created in the same millisecond.
pub async fn reply_to(
    message: &UserMessage,
    provider: &dyn ReplyProvider,
    now: DateTime<Utc>,
) -> Result<UserMessage, ProviderError> {
    let prompt = build_prompt(&message.text);

    tracing::debug!(
        provider = provider.name(),
        message_id = %message.id,
        prompt_len = prompt.len(),
        "Requesting assistant reply"
    );

    let text = provider.generate(&prompt).await?;

    Ok(UserMessage {
        id: (now.timestamp_millis() + 1).to_string(),
        kind: MessageKind::Ai,
        text,
        timestamp: now,
    })
}
