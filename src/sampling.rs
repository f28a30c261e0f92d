//! Resampling and the sampling-distribution estimate.
//!
//! This is the expensive half of a plot refresh: `sample_count` samples of
//! `sample_size` draws each, with replacement, from the dataset values.
//!
//! # Density Normalization
//!
//! Sample means are bucketed by exact value (after rounding to 10 decimal
//! places to absorb floating-point noise) and every bucket is converted to a
//! height with
//!
//! ```text
//! density = count * sample_size / sample_count / 2
//! ```
//!
//! This is the normalization the visualizer has always used. It is not a true
//! density (it does not integrate to one over the bucket width in general)
//! but the plotted shapes are calibrated against it, so it is reproduced
//! exactly.

use std::collections::HashMap;

use rand::Rng;

use crate::dataset::mean_and_variance;

/// Number of decimal places sample means are rounded to before bucketing.
pub const BUCKET_DECIMALS: i32 = 10;

/// Number of points used to draw the expected normal curve.
pub const NORMAL_CURVE_POINTS: usize = 200;

/// Draw `sample_count` samples of `sample_size` values (with replacement) and
/// return the mean of each sample.
///
/// An empty pool or a zero sample size yields no means.
pub fn sample_means<R: Rng>(
    values: &[f64],
    sample_size: usize,
    sample_count: usize,
    rng: &mut R,
) -> Vec<f64> {
    if values.is_empty() || sample_size == 0 {
        return Vec::new();
    }
    (0..sample_count)
        .map(|_| {
            let sum: f64 = (0..sample_size).map(|_| values[rng.gen_range(0..values.len())]).sum();
            sum / sample_size as f64
        })
        .collect()
}

/// Round to [`BUCKET_DECIMALS`] places.
#[inline]
pub fn bucket_key(mean: f64) -> f64 {
    let scale = 10f64.powi(BUCKET_DECIMALS);
    (mean * scale).round() / scale
}

/// One bucket of identical sample means.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bucket {
    /// The (rounded) sample mean.
    pub x: f64,
    pub count: usize,
    /// Plotted height, see the module docs for the formula.
    pub density: f64,
}

/// Count identical sample means and convert the counts to plotted heights.
///
/// Buckets are returned sorted by `x`, ready for the frequency polygon.
pub fn frequency_buckets(
    means: &[f64],
    sample_size: usize,
    sample_count: usize,
) -> Vec<Bucket> {
    let mut counts: HashMap<u64, usize> = HashMap::new();
    for &mean in means {
        // +0.0 folds -0.0 into the same bucket
        *counts.entry((bucket_key(mean) + 0.0).to_bits()).or_insert(0) += 1;
    }

    let mut buckets: Vec<Bucket> = counts
        .into_iter()
        .map(|(bits, count)| Bucket {
            x: f64::from_bits(bits),
            count,
            density: density(count, sample_size, sample_count),
        })
        .collect();
    buckets.sort_by(|a, b| a.x.total_cmp(&b.x));
    buckets
}

/// `count * sample_size / sample_count / 2`.
#[inline]
pub fn density(
    count: usize,
    sample_size: usize,
    sample_count: usize,
) -> f64 {
    if sample_count == 0 {
        return 0.0;
    }
    count as f64 * sample_size as f64 / sample_count as f64 / 2.0
}

/// Normal probability density function.
pub fn normal_pdf(
    x: f64,
    mean: f64,
    std_dev: f64,
) -> f64 {
    if std_dev <= 0.0 {
        return if x == mean { f64::INFINITY } else { 0.0 };
    }
    let z = (x - mean) / std_dev;
    (-0.5 * z * z).exp() / (std_dev * (2.0 * std::f64::consts::PI).sqrt())
}

/// `count` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(
    start: f64,
    end: f64,
    count: usize,
) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Expected sampling distribution of the mean: `N(mean, variance / sample_size)`
/// evaluated at [`NORMAL_CURVE_POINTS`] points across `[x_min, x_max]`.
pub fn expected_curve(
    mean: f64,
    variance: f64,
    sample_size: usize,
    x_min: f64,
    x_max: f64,
) -> Vec<(f64, f64)> {
    let std_dev = (variance / sample_size.max(1) as f64).sqrt();
    linspace(x_min, x_max, NORMAL_CURVE_POINTS)
        .into_iter()
        .map(|x| (x, normal_pdf(x, mean, std_dev)))
        .collect()
}

/// Result of one resampling pass.
#[derive(Clone, Debug, PartialEq)]
pub struct SamplingRun {
    pub sample_size: usize,
    pub sample_count: usize,
    /// Buckets sorted by sample mean.
    pub buckets: Vec<Bucket>,
    /// Standard deviation of the observed sample means (population-style).
    pub sample_mean_std_dev: f64,
}

impl SamplingRun {
    /// Resample the pool and summarize the sample means.
    pub fn run<R: Rng>(
        values: &[f64],
        sample_size: usize,
        sample_count: usize,
        rng: &mut R,
    ) -> Self {
        let means = sample_means(values, sample_size, sample_count, rng);
        let (_, variance) = mean_and_variance(&means);
        Self {
            sample_size,
            sample_count,
            buckets: frequency_buckets(&means, sample_size, sample_count),
            sample_mean_std_dev: variance.sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    const POOL: [f64; 3] = [10.0, 20.0, 30.0];

    #[test]
    fn test_sample_means_count_and_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let means = sample_means(&POOL, 5, 400, &mut rng);
        assert_eq!(means.len(), 400);
        assert!(means.iter().all(|m| (10.0..=30.0).contains(m)), "Means must stay within the pool range");
    }

    #[test]
    fn test_sample_means_empty_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(sample_means(&[], 3, 10, &mut rng).is_empty());
        assert!(sample_means(&POOL, 0, 10, &mut rng).is_empty());
    }

    #[test]
    fn test_bucket_key_absorbs_float_noise() {
        let noisy = (0.1 + 0.2) / 3.0 * 3.0;
        assert_eq!(bucket_key(noisy), bucket_key(0.3));
    }

    #[test]
    fn test_density_formula_is_reproduced() {
        // 30 of 300 means, sample size 4: 30 * 4 / 300 / 2 = 0.2
        assert!((density(30, 4, 300) - 0.2).abs() < 1e-12);
        assert_eq!(density(5, 1, 0), 0.0);
    }

    #[test]
    fn test_density_sum_for_single_draw_samples() {
        let mut rng = StdRng::seed_from_u64(42);
        let sample_count = 1234;
        let run = SamplingRun::run(&POOL, 1, sample_count, &mut rng);
        let total: f64 = run.buckets.iter().map(|b| b.density * 2.0 / 1.0).sum();
        assert!((total - 1.0).abs() < 1e-9, "Scaled densities should sum to 1, got {total}");
    }

    #[test]
    fn test_three_value_population_scenario() {
        let mut rng = StdRng::seed_from_u64(2024);
        let run = SamplingRun::run(&POOL, 1, 3000, &mut rng);

        let xs: Vec<f64> = run.buckets.iter().map(|b| b.x).collect();
        assert_eq!(xs, vec![10.0, 20.0, 30.0], "Single draws can only produce pool values");
        for bucket in &run.buckets {
            assert!(
                (850..=1150).contains(&bucket.count),
                "Bucket {} count {} too far from 1000",
                bucket.x,
                bucket.count
            );
        }
        let total: usize = run.buckets.iter().map(|b| b.count).sum();
        assert_eq!(total, 3000);
    }

    #[test]
    fn test_buckets_sorted_by_x() {
        let buckets = frequency_buckets(&[3.0, 1.0, 2.0, 1.0], 1, 4);
        let xs: Vec<f64> = buckets.iter().map(|b| b.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
        assert_eq!(buckets[0].count, 2);
    }

    #[test]
    fn test_normal_pdf_peak() {
        let peak = normal_pdf(0.0, 0.0, 1.0);
        assert!((peak - 0.398_942_280_4).abs() < 1e-9);
        assert!(normal_pdf(1.0, 0.0, 1.0) < peak);
    }

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(10.0, 30.0, 200);
        assert_eq!(xs.len(), 200);
        assert_eq!(xs[0], 10.0);
        assert!((xs[199] - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_expected_curve_narrows_with_sample_size() {
        let wide = expected_curve(20.0, 200.0 / 3.0, 1, 10.0, 30.0);
        let narrow = expected_curve(20.0, 200.0 / 3.0, 50, 10.0, 30.0);
        let peak = |curve: &[(f64, f64)]| curve.iter().map(|p| p.1).fold(0.0, f64::max);
        assert_eq!(wide.len(), NORMAL_CURVE_POINTS);
        assert!(peak(&narrow) > peak(&wide), "Larger samples concentrate the curve");
    }
}
