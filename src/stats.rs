use crate::models::{Aggregate, CategorySeries, DailyPoint, MoodEvent, MoodSeries};
use crate::mood;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct DayTotals {
    wellbeing: f64,
    energy: f64,
    count: u32,
}

/// Averages wellbeing and energy per UTC calendar day, oldest day first.
/// Days without events are not synthesized.
pub fn aggregate_daily(events: &[MoodEvent]) -> Aggregate<Vec<DailyPoint>> {
    if events.is_empty() {
        return Aggregate::NoData;
    }

    let mut days: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();
    for event in events {
        let dimension = mood::dimensions_of(&event.mood_name);
        let totals = days.entry(event.day()).or_default();
        totals.wellbeing += dimension.wellbeing;
        totals.energy += dimension.energy;
        totals.count += 1;
    }

    let points: Vec<DailyPoint> = days
        .into_iter()
        .map(|(date, totals)| {
            let count = f64::from(totals.count);
            DailyPoint {
                date,
                avg_wellbeing: totals.wellbeing / count,
                avg_energy: totals.energy / count,
            }
        })
        .collect();

    debug!(events = events.len(), days = points.len(), "aggregated daily averages");
    Aggregate::Ready(points)
}

/// Counts events per mood per UTC calendar day. Every known mood gets a
/// zero-filled series; unknown names get one of their own after the
/// vocabulary so a day's counts always add up to its events.
pub fn count_by_mood(events: &[MoodEvent]) -> Aggregate<CategorySeries> {
    if events.is_empty() {
        return Aggregate::NoData;
    }

    let mut per_day: BTreeMap<NaiveDate, BTreeMap<&str, u64>> = BTreeMap::new();
    let mut unrecognized: BTreeSet<&str> = BTreeSet::new();
    for event in events {
        let name = event.mood_name.as_str();
        if !mood::is_known(name) {
            unrecognized.insert(name);
        }
        *per_day.entry(event.day()).or_default().entry(name).or_default() += 1;
    }

    if !unrecognized.is_empty() {
        warn!(?unrecognized, "counting moods outside the vocabulary under their own names");
    }

    let days: Vec<NaiveDate> = per_day.keys().copied().collect();
    let mut names: Vec<&str> = mood::vocabulary().collect();
    names.extend(unrecognized.iter().copied());
    let series = names
        .into_iter()
        .map(|name| MoodSeries {
            mood: name.to_string(),
            counts: per_day
                .values()
                .map(|counts| counts.get(name).copied().unwrap_or(0))
                .collect(),
        })
        .collect();

    debug!(events = events.len(), days = days.len(), "counted moods per day");
    Aggregate::Ready(CategorySeries {
        days,
        series,
        unrecognized: unrecognized.into_iter().map(str::to_string).collect(),
    })
}

/// Label used for a bucket on every chart axis.
pub fn date_label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
