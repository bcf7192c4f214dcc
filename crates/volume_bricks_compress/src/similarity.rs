//! Scoring how far a brick's value range is from the background.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How a brick's `(min, max)` range is reduced to a single distance from the background. Lower
/// scores mean the brick is safer to leave at background.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMetric {
    /// `min(|lo - bg|, |hi - bg|)`: background-like when either extreme is near background.
    Closest,
    /// `max(|lo - bg|, |hi - bg|)`: background-like only when both extremes are.
    Farthest,
    /// `|(lo + hi) / 2 - bg|`: distance of the midrange.
    Median,
}

impl Default for SimilarityMetric {
    fn default() -> Self {
        SimilarityMetric::Median
    }
}

impl SimilarityMetric {
    pub const ALL: [Self; 3] = [Self::Closest, Self::Farthest, Self::Median];

    /// A non-negative score for a brick with range `[min_value, max_value]`.
    #[inline]
    pub fn score(self, min_value: f32, max_value: f32, background: f32) -> f32 {
        let lo = (min_value - background).abs();
        let hi = (max_value - background).abs();

        match self {
            Self::Closest => lo.min(hi),
            Self::Farthest => lo.max(hi),
            Self::Median => ((min_value + max_value) / 2.0 - background).abs(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Closest => "closest",
            Self::Farthest => "farthest",
            Self::Median => "median",
        }
    }

    /// The numeric code accepted on the command line.
    pub fn code(self) -> u8 {
        match self {
            Self::Closest => 1,
            Self::Farthest => 2,
            Self::Median => 3,
        }
    }
}

impl fmt::Display for SimilarityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
#[error("unknown similarity metric {0:?} (expected closest|farthest|median or 1|2|3)")]
pub struct ParseMetricError(pub String);

impl FromStr for SimilarityMetric {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        Self::ALL
            .iter()
            .copied()
            .find(|m| s.eq_ignore_ascii_case(m.name()) || s == m.code().to_string())
            .ok_or_else(|| ParseMetricError(s.to_string()))
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_formulas() {
        // Range [1, 7] around background 2.
        assert_eq!(SimilarityMetric::Closest.score(1.0, 7.0, 2.0), 1.0);
        assert_eq!(SimilarityMetric::Farthest.score(1.0, 7.0, 2.0), 5.0);
        assert_eq!(SimilarityMetric::Median.score(1.0, 7.0, 2.0), 2.0);
    }

    #[test]
    fn scores_are_non_negative() {
        for metric in SimilarityMetric::ALL.iter() {
            assert!(metric.score(-5.0, -3.0, 10.0) >= 0.0);
            assert!(metric.score(10.0, 10.0, 10.0) == 0.0);
        }
    }

    #[test]
    fn parse_names_and_codes() {
        assert_eq!("closest".parse(), Ok(SimilarityMetric::Closest));
        assert_eq!("Farthest".parse(), Ok(SimilarityMetric::Farthest));
        assert_eq!(" median ".parse(), Ok(SimilarityMetric::Median));
        assert_eq!("1".parse(), Ok(SimilarityMetric::Closest));
        assert_eq!("2".parse(), Ok(SimilarityMetric::Farthest));
        assert_eq!("3".parse(), Ok(SimilarityMetric::Median));
        assert_eq!(
            "4".parse::<SimilarityMetric>(),
            Err(ParseMetricError("4".to_string()))
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for metric in SimilarityMetric::ALL.iter() {
            assert_eq!(metric.to_string().parse(), Ok(*metric));
        }
    }

    #[test]
    fn default_is_median() {
        assert_eq!(SimilarityMetric::default(), SimilarityMetric::Median);
    }
}
