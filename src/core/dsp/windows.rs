//! Window function implementations

use std::f64::consts::PI;

/// Symmetric Hann window (zero at both ends).
pub fn hann_window(size: usize) -> Vec<f64> {
    if size < 2 {
        return vec![1.0; size];
    }
    let denom = (size - 1) as f64;
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f64 / denom).cos()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_window() {
        let window = hann_window(5);
        assert!(window[0].abs() < 1e-12);
        assert!((window[2] - 1.0).abs() < 1e-12);
        assert!(window[4].abs() < 1e-12);
    }

    #[test]
    fn test_hann_window_is_symmetric() {
        let window = hann_window(1024);
        for i in 0..512 {
            assert!((window[i] - window[1023 - i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_degenerate_sizes() {
        assert!(hann_window(0).is_empty());
        assert_eq!(hann_window(1), vec![1.0]);
    }
}
