//! Numeric kernel: pure functions over return series
//!
//! All functions are stateless and defined for degenerate inputs: fewer
//! than two samples yields zero (or an empty series), never NaN.

/// Log-returns of a price series: entry i is `ln(prices[i+1] / prices[i])`.
///
/// Returns an empty vector for fewer than two prices or when any price in
/// the series is non-positive (the ratio would not be a valid log argument).
pub fn log_returns(prices: &[f64]) -> Vec<f64> {
    if prices.len() < 2 || prices.iter().any(|p| *p <= 0.0) {
        return Vec::new();
    }

    prices
        .windows(2)
        .map(|pair| (pair[1] / pair[0]).ln())
        .collect()
}

/// Arithmetic mean; zero for an empty slice
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Unbiased sample variance about a precomputed mean; zero for n < 2
pub fn variance(data: &[f64], mean: f64) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let sum: f64 = data.iter().map(|v| (v - mean) * (v - mean)).sum();
    sum / (data.len() - 1) as f64
}

/// Sample standard deviation about a precomputed mean
pub fn std_dev(data: &[f64], mean: f64) -> f64 {
    variance(data, mean).sqrt()
}

/// Unbiased sample covariance; zero for n < 2 or mismatched lengths
pub fn covariance(x: &[f64], y: &[f64], mean_x: f64, mean_y: f64) -> f64 {
    let n = x.len();
    if n != y.len() || n < 2 {
        return 0.0;
    }
    let sum: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(a, b)| (a - mean_x) * (b - mean_y))
        .sum();
    sum / (n - 1) as f64
}
