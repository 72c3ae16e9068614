//! Level conversion and statistics helpers

/// Convert a linear amplitude to dBFS. Absent unless the amplitude is positive.
pub fn amplitude_to_db(amplitude: f64) -> Option<f64> {
    (amplitude > 0.0).then(|| 20.0 * amplitude.log10())
}

/// Convert an energy (power) value to dB. Absent unless the energy is positive.
pub fn energy_to_db(energy: f64) -> Option<f64> {
    (energy > 0.0).then(|| 10.0 * energy.log10())
}

/// Maximum absolute sample value (0 for an empty slice)
pub fn peak_amplitude(samples: &[f32]) -> f64 {
    samples
        .iter()
        .map(|&s| (s as f64).abs())
        .fold(0.0, f64::max)
}

/// Mean of squared sample values (0 for an empty slice)
pub fn mean_square(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    sum_sq / samples.len() as f64
}

/// Compute RMS (Root Mean Square)
pub fn rms(samples: &[f32]) -> f64 {
    mean_square(samples).sqrt()
}

/// Value at percentile `p` of an ascending slice, index `floor((n - 1) * p)`.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let idx = ((sorted.len() - 1) as f64 * p.clamp(0.0, 1.0)) as usize;
    sorted.get(idx).copied()
}

/// Arithmetic mean of the present values; absent when none are present.
pub fn mean_present<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Difference of two optional values; absent if either side is.
pub fn optional_delta(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some(a? - b?)
}
