use volume_bricks_core::prelude::*;

use rand::{rngs::StdRng, Rng, SeedableRng};

// Fixtures are plain `(dimensions, samples)` pairs in row-major order so that every crate can use
// them without depending on the storage types. Sharing those types here causes this issue:
// https://github.com/rust-lang/cargo/issues/6765

/// The flat row-major index of `p` in a volume of the given `dimensions`.
pub fn sample_index(dimensions: Point3i, p: Point3i) -> usize {
    p.x() as usize
        + dimensions.x() as usize * (p.y() as usize + dimensions.y() as usize * p.z() as usize)
}

/// Calls `f` on every coordinate of the volume in row-major order and collects the results.
pub fn volume_from_fn(dimensions: Point3i, f: impl FnMut(Point3i) -> f32) -> (Point3i, Vec<f32>) {
    let samples = Extent3i::from_min_and_shape(Point3i::ZERO, dimensions)
        .iter_points()
        .map(f)
        .collect();

    (dimensions, samples)
}

pub fn uniform_volume(dimensions: Point3i, value: f32) -> (Point3i, Vec<f32>) {
    (dimensions, vec![value; dimensions.volume_usize()])
}

/// A cube of edge length `edge_length` holding `inner_value` inside a centered sphere and
/// `outer_value` everywhere else. Returns the sphere radius too.
pub fn sphere_volume(
    edge_length: i32,
    inner_value: f32,
    outer_value: f32,
) -> (Point3i, Vec<f32>, i32) {
    let center = edge_length as f32 / 2.0;
    let sphere_radius = edge_length / 2 - 1;

    let (dimensions, samples) = volume_from_fn(Point3i::fill(edge_length), |p| {
        let d = Point3f::from(p) + Point3f::fill(0.5) - Point3f::fill(center);
        let norm = (d.x() * d.x() + d.y() * d.y() + d.z() * d.z()).sqrt();
        if norm < sphere_radius as f32 {
            inner_value
        } else {
            outer_value
        }
    });

    (dimensions, samples, sphere_radius)
}

/// Values increase linearly along X, so every brick has a distinct range.
pub fn gradient_volume(dimensions: Point3i) -> (Point3i, Vec<f32>) {
    volume_from_fn(dimensions, |p| p.x() as f32)
}

/// Uniformly random samples in `[0, 1)`, reproducible for a given `seed`.
pub fn random_volume(dimensions: Point3i, seed: u64) -> (Point3i, Vec<f32>) {
    let mut rng = StdRng::seed_from_u64(seed);

    volume_from_fn(dimensions, |_p| rng.gen())
}

/// Mostly `background` with a few random bright blobs, the usual shape of scientific scalar
/// fields.
pub fn sparse_blob_volume(dimensions: Point3i, background: f32, seed: u64) -> (Point3i, Vec<f32>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let blobs: Vec<(Point3f, f32, f32)> = (0..4)
        .map(|_| {
            let center = PointN([
                rng.gen_range(0.0..dimensions.x() as f32),
                rng.gen_range(0.0..dimensions.y() as f32),
                rng.gen_range(0.0..dimensions.z() as f32),
            ]);
            let radius = rng.gen_range(1.0..4.0);
            let value = rng.gen_range(10.0..100.0);

            (center, radius, value)
        })
        .collect();

    volume_from_fn(dimensions, |p| {
        let pf = Point3f::from(p);
        for (center, radius, value) in blobs.iter() {
            let d = pf - *center;
            if d.x() * d.x() + d.y() * d.y() + d.z() * d.z() < radius * radius {
                return *value;
            }
        }

        background
    })
}
