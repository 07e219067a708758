use serde::Serialize;

/// Mood used whenever a name is not in the table.
pub const FALLBACK_MOOD: &str = "neutral";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoodCategory {
    PositiveHigh,
    CalmNeutral,
    NegativeActivated,
    LowEnergySad,
    Overwhelmed,
}

/// Position of a mood in the affective model. Both axes lie in `0.0..=10.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoodDimension {
    pub wellbeing: f64,
    pub energy: f64,
    pub category: MoodCategory,
    pub color: &'static str,
}

const fn dim(wellbeing: f64, energy: f64, category: MoodCategory, color: &'static str) -> MoodDimension {
    MoodDimension {
        wellbeing,
        energy,
        category,
        color,
    }
}

static MOODS: [(&str, MoodDimension); 10] = [
    ("happy", dim(9.0, 8.0, MoodCategory::PositiveHigh, "#4CAF50")),
    ("energized", dim(8.0, 9.0, MoodCategory::PositiveHigh, "#00BCD4")),
    ("calm", dim(8.0, 4.0, MoodCategory::CalmNeutral, "#8BC34A")),
    ("neutral", dim(5.0, 5.0, MoodCategory::CalmNeutral, "#607D8B")),
    ("frustrated", dim(3.0, 6.0, MoodCategory::NegativeActivated, "#FFC107")),
    ("anxious", dim(3.0, 7.0, MoodCategory::NegativeActivated, "#FF5722")),
    ("sad", dim(2.0, 3.0, MoodCategory::LowEnergySad, "#673AB7")),
    ("overwhelmed", dim(2.0, 4.0, MoodCategory::Overwhelmed, "#795548")),
    ("angry", dim(1.0, 8.0, MoodCategory::NegativeActivated, "#F44336")),
    ("tired", dim(1.0, 1.0, MoodCategory::LowEnergySad, "#9E9E9E")),
];

fn lookup(mood_name: &str) -> Option<&'static MoodDimension> {
    MOODS
        .iter()
        .find(|(name, _)| *name == mood_name)
        .map(|(_, dimension)| dimension)
}

/// Dimensions of `mood_name`, or of [`FALLBACK_MOOD`] when the name is unknown.
pub fn dimensions_of(mood_name: &str) -> &'static MoodDimension {
    lookup(mood_name).unwrap_or(&MOODS[3].1)
}

pub fn is_known(mood_name: &str) -> bool {
    lookup(mood_name).is_some()
}

/// Known mood names in table order.
pub fn vocabulary() -> impl Iterator<Item = &'static str> {
    MOODS.iter().map(|(name, _)| *name)
}

/// Legend label: the mood name with its first letter capitalized.
pub fn display_label(mood_name: &str) -> String {
    let mut chars = mood_name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
