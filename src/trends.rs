use crate::events::ingest;
use crate::models::{
    Aggregate, CategorySeries, DailyPoint, DailySeriesResponse, DistributionResponse, MoodSeries,
    MoodSeriesResponse, RawMoodEvent, RejectedEvent, TrendsResponse, TrendsStatus,
};
use crate::mood;
use crate::stats::{aggregate_daily, count_by_mood, date_label};

/// Everything the trends view needs from one pass over the history.
#[derive(Debug)]
pub struct Trends {
    pub daily: Aggregate<Vec<DailyPoint>>,
    pub counts: Aggregate<CategorySeries>,
    pub rejected: Vec<RejectedEvent>,
    pub unrecognized: Vec<String>,
}

/// Runs the full pipeline over raw history records.
///
/// An empty history yields `NoData`. A non-empty history whose records were
/// all rejected yields ready-but-empty series, so the caller can tell
/// "nothing logged" apart from "nothing usable".
pub fn build_trends(raw: &[RawMoodEvent]) -> Trends {
    if raw.is_empty() {
        return Trends {
            daily: Aggregate::NoData,
            counts: Aggregate::NoData,
            rejected: Vec::new(),
            unrecognized: Vec::new(),
        };
    }

    let ingested = ingest(raw);
    let (daily, counts) = if ingested.events.is_empty() {
        (Aggregate::Ready(Vec::new()), Aggregate::Ready(empty_counts()))
    } else {
        (aggregate_daily(&ingested.events), count_by_mood(&ingested.events))
    };

    Trends {
        daily,
        counts,
        rejected: ingested.rejected,
        unrecognized: ingested.unrecognized.into_iter().collect(),
    }
}

fn empty_counts() -> CategorySeries {
    CategorySeries {
        days: Vec::new(),
        series: mood::vocabulary()
            .map(|name| MoodSeries {
                mood: name.to_string(),
                counts: Vec::new(),
            })
            .collect(),
        unrecognized: Vec::new(),
    }
}

impl Trends {
    pub fn is_no_data(&self) -> bool {
        self.daily.is_no_data()
    }

    pub fn to_response(&self) -> TrendsResponse {
        let daily = match &self.daily {
            Aggregate::NoData => DailySeriesResponse::default(),
            Aggregate::Ready(points) => DailySeriesResponse {
                labels: points.iter().map(|point| date_label(point.date)).collect(),
                avg_wellbeing: points.iter().map(|point| point.avg_wellbeing).collect(),
                avg_energy: points.iter().map(|point| point.avg_energy).collect(),
            },
        };

        let distribution = match &self.counts {
            Aggregate::NoData => DistributionResponse::default(),
            Aggregate::Ready(counts) => DistributionResponse {
                labels: counts.days.iter().copied().map(date_label).collect(),
                series: counts
                    .series
                    .iter()
                    .map(|series| MoodSeriesResponse {
                        mood: series.mood.clone(),
                        label: mood::display_label(&series.mood),
                        color: mood::dimensions_of(&series.mood).color.to_string(),
                        counts: series.counts.clone(),
                    })
                    .collect(),
            },
        };

        TrendsResponse {
            status: if self.is_no_data() {
                TrendsStatus::NoData
            } else {
                TrendsStatus::Ok
            },
            daily,
            distribution,
            rejected: self
                .rejected
                .iter()
                .map(|rejected| RejectedEvent {
                    index: rejected.index,
                    reason: rejected.reason.clone(),
                })
                .collect(),
            unrecognized_moods: self.unrecognized.clone(),
        }
    }
}
