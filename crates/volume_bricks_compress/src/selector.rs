//! Ranking bricks and choosing which of them to keep.

use crate::{Brick, SimilarityMetric};

use volume_bricks_core::prelude::*;

use float_ord::FloatOrd;
use std::cmp::Reverse;

/// A brick with its similarity score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankedBrick {
    pub brick: Brick,
    pub score: f32,
}

impl RankedBrick {
    /// Higher scores first, then lower enumeration indices.
    #[inline]
    pub fn sort_key(&self) -> (Reverse<FloatOrd<f32>>, usize) {
        (Reverse(FloatOrd(self.score)), self.brick.index)
    }
}

/// Scores every brick against `background` and sorts them from most different to most similar.
/// Ties keep enumeration order.
pub fn rank_bricks(
    bricks: &[Brick],
    metric: SimilarityMetric,
    background: f32,
) -> Vec<RankedBrick> {
    let mut ranked: Vec<RankedBrick> = bricks
        .iter()
        .map(|brick| RankedBrick {
            brick: *brick,
            score: metric.score(brick.min_value, brick.max_value, background),
        })
        .collect();
    ranked.sort_by_key(RankedBrick::sort_key);

    ranked
}

/// `floor(total_bricks * quality)`, clamped to `[0, total_bricks]`.
#[inline]
pub fn activate_count(total_bricks: usize, quality: f64) -> usize {
    let count = (total_bricks as f64 * quality).floor();
    if count <= 0.0 {
        0
    } else {
        (count as usize).min(total_bricks)
    }
}

/// The leading `activate_count(ranked.len(), quality)` bricks.
#[inline]
pub fn select_bricks(ranked: &[RankedBrick], quality: f64) -> &[RankedBrick] {
    &ranked[..activate_count(ranked.len(), quality)]
}

/// The extremal corners of a volume, which are always kept. There are fewer than 8 when some
/// dimension is 1.
#[inline]
pub fn volume_corners(dimensions: Point3i) -> Vec<Point3i> {
    Extent3i::from_dimensions(dimensions).corners()
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

    use pretty_assertions::assert_eq;

    fn brick(index: usize, min_value: f32, max_value: f32) -> Brick {
        Brick {
            index,
            extent: Extent3i::from_min_and_shape(PointN([index as i32, 0, 0]), Point3i::fill(1)),
            min_value,
            max_value,
        }
    }

    #[test]
    fn ranking_is_descending_with_index_tie_break() {
        let bricks = [
            brick(0, 0.0, 0.0),
            brick(1, 4.0, 4.0),
            brick(2, -4.0, -4.0),
            brick(3, 9.0, 9.0),
            brick(4, 4.0, 4.0),
        ];

        let ranked = rank_bricks(&bricks, SimilarityMetric::Median, 0.0);
        let order: Vec<usize> = ranked.iter().map(|r| r.brick.index).collect();

        assert_eq!(order, vec![3, 1, 2, 4, 0]);
    }

    #[test]
    fn metric_changes_the_order() {
        // Wide brick straddling background versus a narrow brick slightly off it.
        let bricks = [brick(0, -10.0, 10.0), brick(1, 2.0, 3.0)];

        let by_farthest = rank_bricks(&bricks, SimilarityMetric::Farthest, 0.0);
        let by_median = rank_bricks(&bricks, SimilarityMetric::Median, 0.0);

        assert_eq!(by_farthest[0].brick.index, 0);
        assert_eq!(by_median[0].brick.index, 1);
    }

    #[test]
    fn activate_count_law() {
        assert_eq!(activate_count(8, 0.5), 4);
        assert_eq!(activate_count(10, 0.7), 7);
        assert_eq!(activate_count(7, 0.5), 3);
        assert_eq!(activate_count(3, 0.0), 0);
        assert_eq!(activate_count(3, 1.0), 3);
        assert_eq!(activate_count(0, 1.0), 0);
        assert_eq!(activate_count(1, 0.99), 0);
    }

    #[test]
    fn selection_is_a_prefix_of_the_ranking() {
        let bricks: Vec<Brick> = (0..10).map(|i| brick(i, i as f32, i as f32)).collect();
        let ranked = rank_bricks(&bricks, SimilarityMetric::Closest, 0.0);

        let selected = select_bricks(&ranked, 0.35);

        assert_eq!(selected.len(), 3);
        assert_eq!(selected, &ranked[..3]);
        assert!(selected.iter().all(|r| r.brick.index >= 7));
    }

    #[test]
    fn corners_of_flat_volume_are_deduplicated() {
        assert_eq!(volume_corners(PointN([4, 4, 4])).len(), 8);
        assert_eq!(volume_corners(PointN([4, 4, 1])).len(), 4);
        assert_eq!(volume_corners(PointN([1, 1, 1])), vec![Point3i::ZERO]);
        assert!(volume_corners(PointN([5, 4, 3])).contains(&PointN([4, 3, 2])));
    }
}
