use chrono::{Duration, NaiveDate, TimeZone, Utc};
use mood_trends::models::{Aggregate, MoodEvent, RawMoodEvent};
use mood_trends::mood;
use mood_trends::stats::{aggregate_daily, count_by_mood};
use mood_trends::build_trends;

const MOODS: [&str; 12] = [
    "happy", "energized", "calm", "neutral", "frustrated", "anxious", "sad", "overwhelmed",
    "angry", "tired", "annoyed", "zzz-unknown",
];

/// Deterministic spread of events over ten days, several per day.
fn sample_events() -> Vec<MoodEvent> {
    let start = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
    (0..97u32)
        .map(|i| {
            let offset = Duration::minutes(i64::from((i * 7919) % (10 * 24 * 60)));
            MoodEvent::new(start + offset, MOODS[(i as usize * 5) % MOODS.len()])
        })
        .collect()
}

fn shuffled(events: &[MoodEvent]) -> Vec<MoodEvent> {
    let mut out: Vec<MoodEvent> = events.iter().rev().cloned().collect();
    out.rotate_left(events.len() / 3);
    out.swap(0, events.len() - 1);
    out
}

#[test]
fn day_totals_match_raw_event_counts() {
    let events = sample_events();
    let Aggregate::Ready(counts) = count_by_mood(&events) else {
        panic!("expected counts");
    };

    for (index, day) in counts.days.iter().enumerate() {
        let raw = events.iter().filter(|event| event.day() == *day).count() as u64;
        assert_eq!(counts.day_total(index), raw, "day {day}");
    }
    for series in &counts.series {
        assert_eq!(series.counts.len(), counts.days.len());
    }
    for name in mood::vocabulary() {
        assert!(counts.series_for(name).is_some(), "missing {name}");
    }
}

#[test]
fn averages_stay_within_contributing_bounds() {
    let events = sample_events();
    let Aggregate::Ready(points) = aggregate_daily(&events) else {
        panic!("expected points");
    };

    for point in &points {
        let dims: Vec<_> = events
            .iter()
            .filter(|event| event.day() == point.date)
            .map(|event| mood::dimensions_of(&event.mood_name))
            .collect();
        assert!(!dims.is_empty());

        let (lo_w, hi_w) = dims.iter().fold((f64::MAX, f64::MIN), |(lo, hi), d| {
            (lo.min(d.wellbeing), hi.max(d.wellbeing))
        });
        let (lo_e, hi_e) = dims.iter().fold((f64::MAX, f64::MIN), |(lo, hi), d| {
            (lo.min(d.energy), hi.max(d.energy))
        });
        assert!(point.avg_wellbeing >= lo_w && point.avg_wellbeing <= hi_w);
        assert!(point.avg_energy >= lo_e && point.avg_energy <= hi_e);
    }
}

#[test]
fn output_ignores_input_order_and_repeats_identically() {
    let events = sample_events();
    let reordered = shuffled(&events);

    assert_eq!(aggregate_daily(&events), aggregate_daily(&reordered));
    assert_eq!(count_by_mood(&events), count_by_mood(&reordered));
    assert_eq!(aggregate_daily(&events), aggregate_daily(&events));
    assert_eq!(count_by_mood(&events), count_by_mood(&events));
}

#[test]
fn days_are_strictly_ascending() {
    let Aggregate::Ready(points) = aggregate_daily(&shuffled(&sample_events())) else {
        panic!("expected points");
    };
    assert_eq!(points.len(), 10);
    assert!(points.windows(2).all(|pair| pair[0].date < pair[1].date));
    assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
}

#[test]
fn worked_example_end_to_end() {
    let raw = |timestamp: &str, mood_name: &str| RawMoodEvent {
        timestamp: timestamp.to_string(),
        mood_name: mood_name.to_string(),
    };
    let trends = build_trends(&[
        raw("2026-01-05T08:00:00Z", "happy"),
        raw("2026-01-05T20:00:00Z", "sad"),
        raw("2026-01-06T08:00:00Z", "happy"),
    ]);

    let points = trends.daily.ready().unwrap();
    assert_eq!(points[0].avg_wellbeing, 5.5);
    assert_eq!(points[1].avg_wellbeing, 9.0);

    let counts = trends.counts.ready().unwrap();
    assert_eq!(counts.series_for("happy"), Some(&[1, 1][..]));
    assert_eq!(counts.series_for("sad"), Some(&[1, 0][..]));
    let others: u64 = counts
        .series
        .iter()
        .filter(|series| series.mood != "happy" && series.mood != "sad")
        .flat_map(|series| series.counts.iter())
        .sum();
    assert_eq!(others, 0);
}

#[test]
fn bad_record_among_many_keeps_the_chart() {
    let mut raw: Vec<RawMoodEvent> = (0..999)
        .map(|i| RawMoodEvent {
            timestamp: format!("2026-02-{:02}T10:00:00Z", i % 28 + 1),
            mood_name: "calm".to_string(),
        })
        .collect();
    raw.insert(500, RawMoodEvent {
        timestamp: "31/02/2026".to_string(),
        mood_name: "calm".to_string(),
    });

    let trends = build_trends(&raw);
    assert_eq!(trends.rejected.len(), 1);
    assert_eq!(trends.rejected[0].index, 500);
    assert_eq!(trends.daily.ready().map(Vec::len), Some(28));
}
