use float_ord::FloatOrd;

/// The background value of a volume: the element at index `n / 2` of its sorted samples. For an
/// even number of samples this is the upper of the two middle values, never their mean.
///
/// Works on a copy, so `samples` is left untouched. Returns `None` for an empty slice.
pub fn estimate_background(samples: &[f32]) -> Option<f32> {
    if samples.is_empty() {
        return None;
    }

    let mut sorted: Vec<FloatOrd<f32>> = samples.iter().map(|&s| FloatOrd(s)).collect();
    let middle = sorted.len() / 2;
    let (_, median, _) = sorted.select_nth_unstable(middle);

    Some(median.0)
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

    use utilities::{data_sets::random_volume, test::brute_force_median};
    use volume_bricks_core::prelude::*;

    #[test]
    fn median_of_odd_and_even_lengths() {
        assert_eq!(estimate_background(&[3.0]), Some(3.0));
        assert_eq!(estimate_background(&[5.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(estimate_background(&[4.0, 1.0, 3.0, 2.0]), Some(3.0));
        assert_eq!(estimate_background(&[]), None);
    }

    #[test]
    fn dominant_mode_wins_over_outliers() {
        let mut samples = vec![0.0; 90];
        samples.extend(std::iter::repeat(1000.0).take(10));

        assert_eq!(estimate_background(&samples), Some(0.0));
    }

    #[test]
    fn matches_brute_force_sort() {
        for seed in 0..8 {
            let (_dims, samples) = random_volume(PointN([7, 3, 5 + seed as i32]), seed);

            assert_eq!(
                estimate_background(&samples),
                Some(brute_force_median(&samples))
            );
        }
    }

    #[test]
    fn source_is_not_mutated() {
        let samples = vec![9.0, -1.0, 4.0, 4.0, 0.5];
        let copy = samples.clone();

        estimate_background(&samples);

        assert_eq!(samples, copy);
    }
}
