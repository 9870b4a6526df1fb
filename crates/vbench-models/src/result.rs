//! Transcode results and score aggregates.

use serde::{Deserialize, Serialize};

/// Per-configuration transcode measurement.
///
/// Either fully populated with all four score aggregates or the
/// configuration is reported as failed; partial score records are never
/// built. Bitrate and throughput are best-effort telemetry and may be
/// absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscodeResult {
    /// Achieved average bitrate in kbps, absent when probing failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    /// Encoding throughput in multiples of realtime, absent when the
    /// encoder does not report it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    pub score_mean: f64,
    pub score_harm_mean: f64,
    pub score_10th_pct: f64,
    pub score_min: f64,
}

impl TranscodeResult {
    /// Build a result from a non-empty sequence of offset per-frame
    /// scores plus probed telemetry. Returns `None` for an empty
    /// sequence.
    pub fn from_frame_scores(scores: &[f64], rate: Option<f64>, speed: Option<f64>) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }

        Some(Self {
            rate,
            speed,
            score_mean: AggregateKind::Mean.compute(scores),
            score_harm_mean: AggregateKind::HarmonicMean.compute(scores),
            score_10th_pct: AggregateKind::Pct10.compute(scores),
            score_min: AggregateKind::Min.compute(scores),
        })
    }
}

/// Score aggregate kinds computed over a per-frame score sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateKind {
    Mean,
    HarmonicMean,
    Pct10,
    Min,
}

impl AggregateKind {
    /// All aggregate kinds, in result-field order.
    pub const ALL: [AggregateKind; 4] = [
        AggregateKind::Mean,
        AggregateKind::HarmonicMean,
        AggregateKind::Pct10,
        AggregateKind::Min,
    ];

    /// Human-readable label for report output.
    pub fn label(self) -> &'static str {
        match self {
            AggregateKind::Mean => "Mean",
            AggregateKind::HarmonicMean => "Harmonic Mean",
            AggregateKind::Pct10 => "10th Percentile",
            AggregateKind::Min => "Minimum",
        }
    }

    /// Name of the corresponding persisted result field.
    pub fn field(self) -> &'static str {
        match self {
            AggregateKind::Mean => "score_mean",
            AggregateKind::HarmonicMean => "score_harm_mean",
            AggregateKind::Pct10 => "score_10th_pct",
            AggregateKind::Min => "score_min",
        }
    }

    /// Compute this aggregate over offset per-frame scores (raw score + 1).
    ///
    /// The harmonic mean subtracts the offset back out: each frame score
    /// was shifted by +1 before aggregation so a zero-valued frame cannot
    /// collapse the sum of reciprocals, and `n / sum(1/s) - 1` recovers an
    /// unbiased harmonic mean. `scores` must be non-empty.
    pub fn compute(self, scores: &[f64]) -> f64 {
        let n = scores.len();
        match self {
            AggregateKind::Mean => scores.iter().sum::<f64>() / n as f64,
            AggregateKind::HarmonicMean => {
                n as f64 / scores.iter().map(|s| 1.0 / s).sum::<f64>() - 1.0
            }
            AggregateKind::Pct10 => {
                let mut sorted = scores.to_vec();
                sorted.sort_by(f64::total_cmp);
                // nearest-rank, not interpolated
                let index = ((0.1 * n as f64).ceil() as usize).min(n - 1);
                sorted[index]
            }
            AggregateKind::Min => scores.iter().copied().fold(f64::INFINITY, f64::min),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset(raw: &[f64]) -> Vec<f64> {
        raw.iter().map(|s| s + 1.0).collect()
    }

    #[test]
    fn test_aggregate_ordering() {
        let scores = offset(&[95.2, 40.0, 99.9, 87.3, 62.1, 99.0]);
        let min = AggregateKind::Min.compute(&scores);
        let pct10 = AggregateKind::Pct10.compute(&scores);
        let mean = AggregateKind::Mean.compute(&scores);
        let harm = AggregateKind::HarmonicMean.compute(&scores);

        assert!(min <= pct10);
        assert!(pct10 <= mean);
        assert!(harm <= mean);
    }

    #[test]
    fn test_pct10_nearest_rank() {
        // ten uniformly spaced distinct scores: index ceil(0.1 * 10) = 1,
        // the second-smallest element
        let scores: Vec<f64> = (1..=10).map(|s| s as f64 * 10.0).collect();
        assert_eq!(AggregateKind::Pct10.compute(&scores), 20.0);
    }

    #[test]
    fn test_pct10_single_frame() {
        assert_eq!(AggregateKind::Pct10.compute(&[42.0]), 42.0);
    }

    #[test]
    fn test_harmonic_mean_offset_cancels() {
        // constant sequences are a fixed point of both means
        let scores = offset(&[80.0; 12]);
        let harm = AggregateKind::HarmonicMean.compute(&scores);
        assert!((harm - 80.0).abs() < 1e-9);

        let mean = AggregateKind::Mean.compute(&scores);
        assert!((mean - 81.0).abs() < 1e-9);
    }

    #[test]
    fn test_harmonic_mean_robust_near_zero() {
        // a raw zero frame must not produce a division singularity
        let scores = offset(&[0.0, 90.0, 90.0]);
        let harm = AggregateKind::HarmonicMean.compute(&scores);
        assert!(harm.is_finite());
        assert!(harm < AggregateKind::Mean.compute(&scores));
    }

    #[test]
    fn test_from_frame_scores_empty() {
        assert_eq!(TranscodeResult::from_frame_scores(&[], None, None), None);
    }

    #[test]
    fn test_from_frame_scores_populates_all_aggregates() {
        let scores = offset(&[99.0, 98.0, 97.0]);
        let result = TranscodeResult::from_frame_scores(&scores, Some(1200.5), None).unwrap();

        assert_eq!(result.rate, Some(1200.5));
        assert_eq!(result.speed, None);
        assert!((result.score_mean - 99.0).abs() < 1e-9);
        assert_eq!(result.score_min, 98.0);
        // nearest-rank: ceil(0.1 * 3) = 1, the second-smallest element
        assert_eq!(result.score_10th_pct, 99.0);
    }

    #[test]
    fn test_serde_omits_absent_telemetry() {
        let result = TranscodeResult::from_frame_scores(&[100.0, 100.0], None, None).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert!(json.get("rate").is_none());
        assert!(json.get("speed").is_none());
        assert!(json.get("score_mean").is_some());
    }
}
