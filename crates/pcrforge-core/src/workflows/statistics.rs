use crate::core::dna;
use rand::Rng;
use tracing::{debug, instrument};

/// Melting temperatures and GC percentages of `sample_count` uniformly random
/// sequences of `length` bases, index-aligned.
#[instrument(skip(rng), name = "sample_statistics")]
pub fn sample_statistics(
    length: usize,
    sample_count: usize,
    rng: &mut impl Rng,
) -> (Vec<f64>, Vec<f64>) {
    let mut temperatures = Vec::with_capacity(sample_count);
    let mut gc_percents = Vec::with_capacity(sample_count);

    for _ in 0..sample_count {
        let sequence = dna::random_sequence(length, rng);
        temperatures.push(dna::melting_temperature(&sequence));
        gc_percents.push(dna::gc_percent(&sequence));
    }

    if let (Some(tm), Some(gc)) = (
        Summary::from_samples(&temperatures),
        Summary::from_samples(&gc_percents),
    ) {
        debug!(
            mean_tm = tm.mean,
            mean_gc = gc.mean,
            "Sampled random sequences."
        );
    }
    (temperatures, gc_percents)
}

/// Descriptive statistics of a sample.
///
/// `std_dev` is the population standard deviation. Quartiles use linear
/// interpolation between closest ranks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Summary {
    /// `None` for an empty sample.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let count = samples.len();
        let mean = samples.iter().sum::<f64>() / count as f64;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count as f64;

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        Some(Self {
            count,
            mean,
            std_dev: variance.sqrt(),
            min: sorted[0],
            q25: percentile(&sorted, 25.0),
            median: percentile(&sorted, 50.0),
            q75: percentile(&sorted, 75.0),
            max: sorted[count - 1],
        })
    }
}

fn percentile(sorted: &[f64], pct: f64) -> f64 {
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (rank - lower as f64)
}
