use crate::chart::{DISTRIBUTION_CANVAS, EXPANDED_CANVAS, TREND_CANVAS};
use crate::mood;
use crate::theme::ThemeSnapshot;
use serde_json::Value;

pub const NO_DATA_MESSAGE: &str = "No mood logs yet. Log some moods to see your trends!";

pub fn render_index(theme: &ThemeSnapshot, charts: &Value, no_data: bool) -> String {
    let message = if no_data { NO_DATA_MESSAGE } else { "" };
    INDEX_HTML
        .replace("{{BODY_CLASS}}", &theme.body_classes().join(" "))
        .replace("{{THEME}}", theme.theme.as_str())
        .replace("{{TRANSITION_MS}}", &theme.transition_ms.to_string())
        .replace("{{MOOD_BUTTONS}}", &mood_buttons())
        .replace("{{MESSAGE}}", message)
        .replace("{{CANVASES}}", &canvases(charts))
        .replace("{{CHARTS}}", &script_safe_json(charts))
}

fn mood_buttons() -> String {
    mood::vocabulary()
        .map(|name| {
            format!(
                r#"<form method="post" action="/mood/{name}"><button type="submit" title="{label}">{label}</button></form>"#,
                label = mood::display_label(name)
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

fn canvases(charts: &Value) -> String {
    [
        (TREND_CANVAS, "Daily Average: Wellbeing &amp; Energy"),
        (DISTRIBUTION_CANVAS, "Daily Mood Distribution"),
        (EXPANDED_CANVAS, "Expanded Trend"),
    ]
    .iter()
    .filter(|(canvas, _)| charts.get(*canvas).is_some())
    .map(|(canvas, title)| {
        format!(r#"<h3>{title}</h3><div class="chart-wrapper"><canvas id="{canvas}"></canvas></div>"#)
    })
    .collect::<Vec<_>>()
    .join("\n      ")
}

/// Serializes chart options for an inline `<script>` block.
fn script_safe_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Mood Trends</title>
  <style>
    :root {
      --bg: #1a1a2e;
      --panel: #16213e;
      --ink: #e0e0e0;
      --accent: #00adb5;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    body.theme-smooth-transition {
      transition: background-color {{TRANSITION_MS}}ms ease, color {{TRANSITION_MS}}ms ease;
    }

    .app {
      width: min(960px, 100%);
      margin: 0 auto;
      padding: 32px 18px 48px;
      display: grid;
      gap: 24px;
    }

    .moods {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    .chart-wrapper {
      overflow-x: auto;
      background: var(--panel);
      border-radius: 12px;
      padding: 16px;
    }

    .chart-wrapper canvas {
      min-width: 700px;
      height: 350px;
    }

    .status {
      color: var(--accent);
      min-height: 1.2em;
    }
  </style>
</head>
<body class="{{BODY_CLASS}}" data-theme="{{THEME}}">
  <main class="app">
    <header>
      <h1>Your Mood Trends</h1>
    </header>
    <section class="moods">
        {{MOOD_BUTTONS}}
    </section>
    <p class="status" id="status">{{MESSAGE}}</p>
    <section class="charts">
      {{CANVASES}}
    </section>
  </main>
  <script type="application/json" id="chart-config">{{CHARTS}}</script>
  <script>
    setTimeout(() => document.body.classList.remove('theme-smooth-transition'), {{TRANSITION_MS}});
  </script>
</body>
</html>
"#;
