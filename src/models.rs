use crate::theme::Theme;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A history record as the backend stores and returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawMoodEvent {
    pub timestamp: String,
    pub mood_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodEvent {
    pub timestamp: DateTime<Utc>,
    pub mood_name: String,
}

impl MoodEvent {
    pub fn new(timestamp: DateTime<Utc>, mood_name: impl Into<String>) -> Self {
        Self {
            timestamp,
            mood_name: mood_name.into(),
        }
    }

    /// UTC calendar day the event is bucketed under.
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub events: Vec<RawMoodEvent>,
}

/// Result of an aggregation run. `NoData` means the input was empty, which
/// callers show as guidance rather than as an empty chart.
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregate<T> {
    NoData,
    Ready(T),
}

impl<T> Aggregate<T> {
    pub fn is_no_data(&self) -> bool {
        matches!(self, Aggregate::NoData)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Aggregate::NoData => None,
            Aggregate::Ready(value) => Some(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub avg_wellbeing: f64,
    pub avg_energy: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodSeries {
    pub mood: String,
    pub counts: Vec<u64>,
}

/// Per-mood daily counts, column-wise: every series is aligned with `days`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySeries {
    pub days: Vec<NaiveDate>,
    pub series: Vec<MoodSeries>,
    pub unrecognized: Vec<String>,
}

impl CategorySeries {
    pub fn series_for(&self, mood: &str) -> Option<&[u64]> {
        self.series
            .iter()
            .find(|series| series.mood == mood)
            .map(|series| series.counts.as_slice())
    }

    pub fn day_total(&self, index: usize) -> u64 {
        self.series
            .iter()
            .filter_map(|series| series.counts.get(index))
            .sum()
    }
}

#[derive(Debug, Deserialize)]
pub struct MoodRequest {
    pub mood: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogMoodResponse {
    pub message: String,
    pub mood: String,
    pub theme: Theme,
}

#[derive(Debug, Serialize)]
pub struct MoodInfo {
    pub name: &'static str,
    pub label: String,
    #[serde(flatten)]
    pub dimension: crate::mood::MoodDimension,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrendsStatus {
    NoData,
    Ok,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct DailySeriesResponse {
    pub labels: Vec<String>,
    pub avg_wellbeing: Vec<f64>,
    pub avg_energy: Vec<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MoodSeriesResponse {
    pub mood: String,
    pub label: String,
    pub color: String,
    pub counts: Vec<u64>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct DistributionResponse {
    pub labels: Vec<String>,
    pub series: Vec<MoodSeriesResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RejectedEvent {
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrendsResponse {
    pub status: TrendsStatus,
    pub daily: DailySeriesResponse,
    pub distribution: DistributionResponse,
    pub rejected: Vec<RejectedEvent>,
    pub unrecognized_moods: Vec<String>,
}
