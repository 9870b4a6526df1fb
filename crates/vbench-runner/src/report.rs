//! Plot-phase reporting.
//!
//! Chart rendering is out of scope for the runner; the plot task prints
//! a per-profile textual summary of the persisted score collections.

use serde_json::{Map, Value};

use vbench_models::{AggregateKind, BASE_DIMENSIONS};

/// Result fields that are not grouping dimensions.
const RESULT_FIELDS: [&str; 6] = [
    "rate",
    "speed",
    "score_mean",
    "score_harm_mean",
    "score_10th_pct",
    "score_min",
];

/// Render a textual summary of loaded score entries, grouped by profile.
pub fn render_summary(entries: &[Map<String, Value>]) -> String {
    let mut out = String::new();

    let mut profiles: Vec<String> = Vec::new();
    for entry in entries {
        if let Some(Value::String(profile)) = entry.get("profile") {
            if !profiles.iter().any(|known| known == profile) {
                profiles.push(profile.clone());
            }
        }
    }

    for profile in &profiles {
        let rows: Vec<&Map<String, Value>> = entries
            .iter()
            .filter(|entry| entry.get("profile").and_then(Value::as_str) == Some(profile))
            .collect();

        out.push_str(&format!("Profile: {} ({} entries)\n", profile, rows.len()));
        for row in rows {
            out.push_str(&format!("  {}: {}\n", row_label(row), row_values(row)));
        }
    }

    out
}

/// Grouping label: tag, reference, then profile-declared dimensions.
fn row_label(entry: &Map<String, Value>) -> String {
    let mut parts = Vec::new();
    for field in ["tag", "reference"] {
        if let Some(value) = entry.get(field) {
            parts.push(value_display(value));
        }
    }
    for (key, value) in entry {
        if BASE_DIMENSIONS.contains(&key.as_str()) || RESULT_FIELDS.contains(&key.as_str()) {
            continue;
        }
        parts.push(value_display(value));
    }
    parts.join("_")
}

/// Telemetry and aggregate values for one entry.
fn row_values(entry: &Map<String, Value>) -> String {
    let mut parts = Vec::new();

    if let Some(rate) = entry.get("rate").and_then(Value::as_f64) {
        parts.push(format!("rate {rate:.1} kbps"));
    }
    if let Some(speed) = entry.get("speed").and_then(Value::as_f64) {
        parts.push(format!("speed {speed:.2}x"));
    }
    for kind in AggregateKind::ALL {
        if let Some(score) = entry.get(kind.field()).and_then(Value::as_f64) {
            parts.push(format!("{} {score:.2}", kind.label()));
        }
    }

    parts.join(", ")
}

fn value_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(raw: &str) -> Map<String, Value> {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_summary_groups_by_profile() {
        let entries = vec![
            entry(
                r#"{"tag": "ci", "profile": "simple", "reference": "park_joy",
                    "codec": "libx264", "rate": 224.868, "speed": 4.06,
                    "score_mean": 98.03, "score_harm_mean": 97.99,
                    "score_10th_pct": 96.49, "score_min": 96.38}"#,
            ),
            entry(
                r#"{"tag": "ci", "profile": "streaming", "reference": "park_joy",
                    "encoder": "x264", "codec": "h264", "target_rate": 1000,
                    "score_mean": 91.0, "score_harm_mean": 90.2,
                    "score_10th_pct": 88.1, "score_min": 85.7}"#,
            ),
        ];

        let summary = render_summary(&entries);
        assert!(summary.contains("Profile: simple (1 entries)"));
        assert!(summary.contains("Profile: streaming (1 entries)"));
        assert!(summary.contains("ci_park_joy_libx264"));
        assert!(summary.contains("rate 224.9 kbps"));
        assert!(summary.contains("speed 4.06x"));
        assert!(summary.contains("Harmonic Mean 97.99"));
        assert!(summary.contains("10th Percentile 96.49"));
        assert!(summary.contains("Minimum 96.38"));
    }

    #[test]
    fn test_entries_without_telemetry() {
        let entries = vec![entry(
            r#"{"tag": "ci", "profile": "simple", "reference": "r", "codec": "copy",
                "score_mean": 99.0, "score_harm_mean": 98.9,
                "score_10th_pct": 98.5, "score_min": 98.4}"#,
        )];

        let summary = render_summary(&entries);
        assert!(!summary.contains("rate"));
        assert!(!summary.contains("speed"));
        assert!(summary.contains("Mean 99.00"));
    }
}
