//! Chart configurations for the trends view and the per-canvas instances that
//! hold them.
//!
//! A [`ChartSlot`] owns at most one [`ChartInstance`]. Rendering into a slot
//! destroys the previous instance first, and dropping the slot destroys
//! whatever it still holds, so a canvas can never carry two live charts.

use crate::models::{Aggregate, CategorySeries, DailyPoint};
use crate::mood;
use crate::stats::date_label;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tracing::debug;

const SCALE_MIN: f64 = 0.0;
const SCALE_MAX: f64 = 10.0;
const AXIS_PADDING: f64 = 0.3;
const LINE_FULL_LABELS: usize = 5;
const BAR_FULL_LABELS: usize = 7;
const WELLBEING_COLOR: &str = "#4CAF50";
const ENERGY_COLOR: &str = "#2196F3";

pub const TREND_CANVAS: &str = "moodChart";
pub const EXPANDED_CANVAS: &str = "expandedMoodChart";
pub const DISTRIBUTION_CANVAS: &str = "stackedBarChart";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    StackedBar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub options: Value,
}

/// Y-axis range for the dual-metric chart: the data range padded by 0.3 and
/// clamped to the 0..10 scale.
pub fn axis_bounds(points: &[DailyPoint]) -> (f64, f64) {
    let values = points
        .iter()
        .flat_map(|point| [point.avg_wellbeing, point.avg_energy]);
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
        (lo.min(value), hi.max(value))
    });
    if lo > hi {
        return (SCALE_MIN, SCALE_MAX);
    }

    let min = if lo > SCALE_MIN { lo - AXIS_PADDING } else { lo };
    let max = if hi < SCALE_MAX { hi + AXIS_PADDING } else { hi };
    (min.max(SCALE_MIN), max.min(SCALE_MAX))
}

/// Axis tick text. Short ranges show every full date; longer ones show
/// `M-D` on even positions only.
pub fn tick_labels(days: &[NaiveDate], full_limit: usize) -> Vec<String> {
    if days.len() <= full_limit {
        return days.iter().copied().map(date_label).collect();
    }
    days.iter()
        .enumerate()
        .map(|(index, day)| {
            if index % 2 == 0 {
                format!("{}-{}", day.month(), day.day())
            } else {
                String::new()
            }
        })
        .collect()
}

pub fn line_chart(points: &[DailyPoint]) -> ChartConfig {
    let days: Vec<NaiveDate> = points.iter().map(|point| point.date).collect();
    let labels: Vec<String> = days.iter().copied().map(date_label).collect();
    let (min, max) = axis_bounds(points);

    let dataset = |label: &str, color: &str, data: Vec<f64>| {
        json!({
            "label": label,
            "data": data,
            "borderColor": color,
            "pointBackgroundColor": color,
            "tension": 0.3,
            "fill": false,
        })
    };

    ChartConfig {
        kind: ChartKind::Line,
        options: json!({
            "type": "line",
            "data": {
                "labels": labels,
                "datasets": [
                    dataset("Wellbeing Score", WELLBEING_COLOR, points.iter().map(|p| p.avg_wellbeing).collect()),
                    dataset("Energy Level", ENERGY_COLOR, points.iter().map(|p| p.avg_energy).collect()),
                ],
            },
            "options": {
                "scales": {
                    "y": { "min": min, "max": max, "title": "Score (0-10)" },
                    "x": { "ticks": tick_labels(&days, LINE_FULL_LABELS), "title": "Date" },
                },
            },
        }),
    }
}

pub fn stacked_bar_chart(counts: &CategorySeries) -> ChartConfig {
    let labels: Vec<String> = counts.days.iter().copied().map(date_label).collect();
    let totals: Vec<u64> = (0..counts.days.len())
        .map(|index| counts.day_total(index))
        .collect();
    let datasets: Vec<Value> = counts
        .series
        .iter()
        .map(|series| {
            let color = mood::dimensions_of(&series.mood).color;
            json!({
                "label": mood::display_label(&series.mood),
                "data": series.counts,
                "backgroundColor": color,
                "borderColor": color,
                "borderWidth": 1,
            })
        })
        .collect();

    ChartConfig {
        kind: ChartKind::StackedBar,
        options: json!({
            "type": "bar",
            "data": { "labels": labels, "datasets": datasets },
            "options": {
                "scales": {
                    "x": { "stacked": true, "ticks": tick_labels(&counts.days, BAR_FULL_LABELS), "title": "Date" },
                    "y": { "stacked": true, "beginAtZero": true, "title": "Number of Moods Logged" },
                },
            },
            "totals": totals,
        }),
    }
}

/// A chart drawn on a canvas. Only a [`ChartSlot`] can create one, and it is
/// destroyed when dropped.
#[derive(Debug)]
pub struct ChartInstance {
    id: u64,
    canvas: &'static str,
    config: ChartConfig,
    live: Arc<AtomicUsize>,
}

impl ChartInstance {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn canvas(&self) -> &'static str {
        self.canvas
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }
}

impl Drop for ChartInstance {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
        debug!(canvas = self.canvas, id = self.id, "chart destroyed");
    }
}

#[derive(Debug)]
pub struct ChartSlot {
    canvas: &'static str,
    instance: Option<ChartInstance>,
    live: Arc<AtomicUsize>,
    next_id: Arc<AtomicU64>,
}

impl ChartSlot {
    fn new(canvas: &'static str, live: Arc<AtomicUsize>, next_id: Arc<AtomicU64>) -> Self {
        Self {
            canvas,
            instance: None,
            live,
            next_id,
        }
    }

    /// Destroys the current chart, then creates one from `config`.
    pub fn render(&mut self, config: ChartConfig) -> &ChartInstance {
        self.release();

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.live.fetch_add(1, Ordering::SeqCst);
        debug!(canvas = self.canvas, id, kind = ?config.kind, "chart created");

        self.instance.insert(ChartInstance {
            id,
            canvas: self.canvas,
            config,
            live: Arc::clone(&self.live),
        })
    }

    /// Destroys the current chart, if any. Returns whether one was held.
    pub fn release(&mut self) -> bool {
        self.instance.take().is_some()
    }

    pub fn current(&self) -> Option<&ChartInstance> {
        self.instance.as_ref()
    }

    pub fn canvas(&self) -> &'static str {
        self.canvas
    }
}

/// The canvases of the trends view.
#[derive(Debug)]
pub struct ChartBoard {
    pub trend: ChartSlot,
    pub expanded: ChartSlot,
    pub distribution: ChartSlot,
    live: Arc<AtomicUsize>,
}

impl Default for ChartBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartBoard {
    pub fn new() -> Self {
        let live = Arc::new(AtomicUsize::new(0));
        let next_id = Arc::new(AtomicU64::new(1));
        Self {
            trend: ChartSlot::new(TREND_CANVAS, Arc::clone(&live), Arc::clone(&next_id)),
            expanded: ChartSlot::new(EXPANDED_CANVAS, Arc::clone(&live), Arc::clone(&next_id)),
            distribution: ChartSlot::new(DISTRIBUTION_CANVAS, Arc::clone(&live), next_id),
            live,
        }
    }

    /// Redraws every canvas from fresh aggregates. With no data, all charts
    /// are released and nothing is recreated. The expanded chart is only
    /// drawn while `expanded` is set.
    pub fn refresh(
        &mut self,
        daily: &Aggregate<Vec<DailyPoint>>,
        counts: &Aggregate<CategorySeries>,
        expanded: bool,
    ) {
        match daily {
            Aggregate::Ready(points) => {
                self.trend.render(line_chart(points));
                if expanded {
                    self.expanded.render(line_chart(points));
                } else {
                    self.expanded.release();
                }
            }
            Aggregate::NoData => {
                self.trend.release();
                self.expanded.release();
            }
        }

        match counts {
            Aggregate::Ready(series) => {
                self.distribution.render(stacked_bar_chart(series));
            }
            Aggregate::NoData => {
                self.distribution.release();
            }
        }
    }

    pub fn release_all(&mut self) {
        self.trend.release();
        self.expanded.release();
        self.distribution.release();
    }

    pub fn live_instances(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Canvas id to chart options, for the charts currently drawn.
    pub fn configs(&self) -> Value {
        let mut configs = Map::new();
        for slot in [&self.trend, &self.expanded, &self.distribution] {
            if let Some(instance) = slot.current() {
                configs.insert(slot.canvas().to_string(), instance.config().options.clone());
            }
        }
        Value::Object(configs)
    }
}
