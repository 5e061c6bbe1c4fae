//! Shared numeric helpers for the indicator strategies.

/// Arithmetic mean of a slice. None when empty.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Simple moving average over the last `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    mean(&values[values.len() - period..])
}

/// Population standard deviation over the last `period` values.
pub fn standard_deviation(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    let m = mean(window)?;
    let variance = window.iter().map(|v| (v - m).powi(2)).sum::<f64>() / window.len() as f64;
    Some(variance.sqrt())
}
