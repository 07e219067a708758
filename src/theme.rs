//! Mood-driven visual theme.
//!
//! [`ThemeState`] is the pure value: the active theme plus whether a
//! transition window is open. [`ThemeSelector`] owns that value for the
//! service and runs the single-shot timer that closes the window.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(700);

const TRANSITION_CLASS: &str = "theme-smooth-transition";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    None,
    Bright,
    Calm,
    Muted,
    Grounding,
    Angry,
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::None,
        Theme::Bright,
        Theme::Calm,
        Theme::Muted,
        Theme::Grounding,
        Theme::Angry,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::None => "none",
            Theme::Bright => "bright",
            Theme::Calm => "calm",
            Theme::Muted => "muted",
            Theme::Grounding => "grounding",
            Theme::Angry => "angry",
        }
    }

    /// Body class for the theme; the default palette has none.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Theme::None => None,
            Theme::Bright => Some("theme-bright"),
            Theme::Calm => Some("theme-calm"),
            Theme::Muted => Some("theme-muted"),
            Theme::Grounding => Some("theme-grounding"),
            Theme::Angry => Some("theme-angry"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown theme {0:?}")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownTheme(value.to_string()))
    }
}

/// Theme mapped from a mood name, if the mood has one.
pub fn theme_for(mood: &str) -> Option<Theme> {
    match mood {
        "happy" | "energized" => Some(Theme::Bright),
        "calm" | "neutral" => Some(Theme::Calm),
        "sad" | "tired" => Some(Theme::Muted),
        "anxious" | "frustrated" | "overwhelmed" => Some(Theme::Grounding),
        "angry" | "annoyed" => Some(Theme::Angry),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    pub theme: Theme,
    pub transitioning: bool,
    generation: u64,
}

impl ThemeState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            transitioning: false,
            generation: 0,
        }
    }

    /// Swaps in `target` and opens a new transition window, superseding any
    /// window that was still open.
    pub fn transition(self, target: Theme) -> Self {
        Self {
            theme: target,
            transitioning: true,
            generation: self.generation.wrapping_add(1),
        }
    }

    /// Closes the window opened at `generation`. Older windows are ignored.
    pub fn close_window(self, generation: u64) -> Self {
        if generation != self.generation {
            return self;
        }
        Self {
            transitioning: false,
            ..self
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSnapshot {
    pub theme: Theme,
    pub transitioning: bool,
    pub transition_ms: u64,
}

impl ThemeSnapshot {
    pub fn body_classes(&self) -> Vec<&'static str> {
        let mut classes: Vec<&'static str> = self.theme.css_class().into_iter().collect();
        if self.transitioning {
            classes.push(TRANSITION_CLASS);
        }
        classes
    }
}

struct Inner {
    state: ThemeState,
    timer: Option<JoinHandle<()>>,
}

/// Decrements the live-timer count when the timer task ends or is aborted.
struct TimerGuard(Arc<AtomicUsize>);

impl TimerGuard {
    fn new(live: Arc<AtomicUsize>) -> Self {
        live.fetch_add(1, Ordering::SeqCst);
        Self(live)
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Clone)]
pub struct ThemeSelector {
    inner: Arc<Mutex<Inner>>,
    default_theme: Theme,
    window: Duration,
    live_timers: Arc<AtomicUsize>,
}

impl ThemeSelector {
    pub fn new(default_theme: Theme, window: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: ThemeState::new(default_theme),
                timer: None,
            })),
            default_theme,
            window,
            live_timers: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn default_theme(&self) -> Theme {
        self.default_theme
    }

    /// Applies the theme mapped from `mood`. Moods without a mapping fall back
    /// to the default theme.
    pub async fn select(&self, mood: &str) -> ThemeSnapshot {
        let target = theme_for(mood).unwrap_or_else(|| {
            debug!(mood, "no theme mapped, using {}", self.default_theme.as_str());
            self.default_theme
        });
        self.apply(target).await
    }

    pub async fn reset(&self) -> ThemeSnapshot {
        self.apply(self.default_theme).await
    }

    pub async fn snapshot(&self) -> ThemeSnapshot {
        let inner = self.inner.lock().await;
        self.snapshot_of(inner.state)
    }

    /// Number of transition timers that have not yet fired or been cancelled.
    pub fn live_timers(&self) -> usize {
        self.live_timers.load(Ordering::SeqCst)
    }

    async fn apply(&self, target: Theme) -> ThemeSnapshot {
        let mut inner = self.inner.lock().await;
        let previous = inner.state.theme;
        inner.state = inner.state.transition(target);

        if let Some(stale) = inner.timer.take() {
            stale.abort();
        }
        inner.timer = Some(self.spawn_close(inner.state.generation()));

        info!(from = previous.as_str(), to = target.as_str(), "theme changed");
        self.snapshot_of(inner.state)
    }

    fn spawn_close(&self, generation: u64) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let window = self.window;
        let guard = TimerGuard::new(Arc::clone(&self.live_timers));

        tokio::spawn(async move {
            let _guard = guard;
            tokio::time::sleep(window).await;
            let mut inner = inner.lock().await;
            if inner.state.generation() == generation {
                inner.state = inner.state.close_window(generation);
                inner.timer = None;
            }
        })
    }

    fn snapshot_of(&self, state: ThemeState) -> ThemeSnapshot {
        ThemeSnapshot {
            theme: state.theme,
            transitioning: state.transitioning,
            transition_ms: self.window.as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn mood_mapping_covers_every_theme_but_none() {
        assert_eq!(theme_for("happy"), Some(Theme::Bright));
        assert_eq!(theme_for("neutral"), Some(Theme::Calm));
        assert_eq!(theme_for("tired"), Some(Theme::Muted));
        assert_eq!(theme_for("overwhelmed"), Some(Theme::Grounding));
        assert_eq!(theme_for("annoyed"), Some(Theme::Angry));
        assert_eq!(theme_for("zzz-unknown"), None);
    }

    #[test]
    fn parses_theme_names() {
        assert_eq!("Calm".parse::<Theme>(), Ok(Theme::Calm));
        assert_eq!(" none ".parse::<Theme>(), Ok(Theme::None));
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn stale_window_close_is_ignored() {
        let first = ThemeState::new(Theme::None).transition(Theme::Bright);
        let second = first.transition(Theme::Calm);

        let after_stale = second.close_window(first.generation());
        assert!(after_stale.transitioning);
        assert_eq!(after_stale.theme, Theme::Calm);

        let closed = second.close_window(second.generation());
        assert!(!closed.transitioning);
        assert_eq!(closed.theme, Theme::Calm);
    }

    #[test]
    fn body_classes_follow_state() {
        let snapshot = ThemeSnapshot {
            theme: Theme::Grounding,
            transitioning: true,
            transition_ms: 700,
        };
        assert_eq!(snapshot.body_classes(), vec!["theme-grounding", TRANSITION_CLASS]);

        let idle = ThemeSnapshot {
            theme: Theme::None,
            transitioning: false,
            transition_ms: 700,
        };
        assert!(idle.body_classes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn selection_is_immediate_and_window_expires() {
        let selector = ThemeSelector::new(Theme::None, DEFAULT_TRANSITION);

        let snapshot = selector.select("sad").await;
        assert_eq!(snapshot.theme, Theme::Muted);
        assert!(snapshot.transitioning);
        assert_eq!(snapshot.transition_ms, 700);

        tokio::time::sleep(ms(701)).await;
        let snapshot = selector.snapshot().await;
        assert_eq!(snapshot.theme, Theme::Muted);
        assert!(!snapshot.transitioning);
        assert_eq!(selector.live_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_selections_coalesce_to_last() {
        let selector = ThemeSelector::new(Theme::None, DEFAULT_TRANSITION);

        selector.select("happy").await;
        tokio::time::sleep(ms(100)).await;
        selector.select("angry").await;
        tokio::time::sleep(ms(100)).await;
        selector.select("calm").await;
        tokio::time::sleep(ms(1)).await;

        assert_eq!(selector.snapshot().await.theme, Theme::Calm);
        assert_eq!(selector.live_timers(), 1);

        // The first timer would have fired here had it survived.
        tokio::time::sleep(ms(600)).await;
        assert!(selector.snapshot().await.transitioning);

        tokio::time::sleep(ms(100)).await;
        let snapshot = selector.snapshot().await;
        assert_eq!(snapshot.theme, Theme::Calm);
        assert!(!snapshot.transitioning);
        assert_eq!(selector.live_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn unmapped_mood_uses_configured_default() {
        let selector = ThemeSelector::new(Theme::Calm, ms(50));
        assert_eq!(selector.snapshot().await.theme, Theme::Calm);

        selector.select("happy").await;
        let snapshot = selector.select("zzz-unknown").await;
        assert_eq!(snapshot.theme, Theme::Calm);
        assert!(snapshot.transitioning);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_returns_to_default_with_a_window() {
        let selector = ThemeSelector::new(Theme::None, ms(50));
        selector.select("anxious").await;

        let snapshot = selector.reset().await;
        assert_eq!(snapshot.theme, Theme::None);
        assert!(snapshot.transitioning);

        tokio::time::sleep(ms(51)).await;
        assert!(!selector.snapshot().await.transitioning);
        assert_eq!(selector.live_timers(), 0);
    }
}
