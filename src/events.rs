use crate::models::{MoodEvent, RawMoodEvent, RejectedEvent};
use crate::mood;
use chrono::{DateTime, NaiveDateTime, Utc};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::warn;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("unparseable timestamp {0:?}")]
    Timestamp(String),
}

/// Parses an ISO-8601 instant. Timestamps without an offset are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, EventError> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| EventError::Timestamp(raw.to_string()))
}

#[derive(Debug, Default)]
pub struct Ingested {
    pub events: Vec<MoodEvent>,
    pub rejected: Vec<RejectedEvent>,
    pub unrecognized: BTreeSet<String>,
}

/// Converts raw history records into events. A record whose timestamp cannot
/// be parsed is rejected on its own; the rest of the batch goes through.
pub fn ingest(raw: &[RawMoodEvent]) -> Ingested {
    let mut ingested = Ingested {
        events: Vec::with_capacity(raw.len()),
        ..Ingested::default()
    };

    for (index, record) in raw.iter().enumerate() {
        match parse_timestamp(&record.timestamp) {
            Ok(timestamp) => {
                if !mood::is_known(&record.mood_name)
                    && ingested.unrecognized.insert(record.mood_name.clone())
                {
                    warn!(mood = %record.mood_name, "mood missing from vocabulary, scoring as {}", mood::FALLBACK_MOOD);
                }
                ingested
                    .events
                    .push(MoodEvent::new(timestamp, record.mood_name.clone()));
            }
            Err(err) => {
                warn!(index, "skipping mood record: {err}");
                ingested.rejected.push(RejectedEvent {
                    index,
                    reason: err.to_string(),
                });
            }
        }
    }

    ingested
}
