use rust_decimal::Decimal;

/// Median of the values; even-length input averages the two middle values.
pub(crate) fn median(values: &[i64]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(Decimal::from(sorted[mid]))
    } else {
        Some((Decimal::from(sorted[mid - 1]) + Decimal::from(sorted[mid])) / Decimal::TWO)
    }
}

pub(crate) fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum: Decimal = values.iter().sum();
    Some(sum / Decimal::from(values.len()))
}

/// Sample standard deviation. Fewer than two values yield zero.
pub(crate) fn sample_stdev(values: &[i64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let avg = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|&v| {
            let d = v as f64 - avg;
            d * d
        })
        .sum::<f64>()
        / (n - 1.0);
    variance.sqrt()
}
