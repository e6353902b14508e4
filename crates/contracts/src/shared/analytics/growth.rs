//! Period-over-period growth.

/// `(current - previous) / previous`, or `None` when there is no meaningful base
/// (previous total not positive, or non-finite input).
pub fn growth_rate(current: f64, previous: f64) -> Option<f64> {
    if !current.is_finite() || !previous.is_finite() || previous <= 0.0 {
        return None;
    }
    let rate = (current - previous) / previous;
    rate.is_finite().then_some(rate)
}

/// Growth of each element against the one before it; the first has none.
pub fn with_growth(totals: &[f64]) -> Vec<Option<f64>> {
    let mut result = Vec::with_capacity(totals.len());
    if !totals.is_empty() {
        result.push(None);
    }
    result.extend(totals.windows(2).map(|w| growth_rate(w[1], w[0])));
    result
}

/// "▲ 12.5%" / "▼ 3.0%" / "—"
pub fn format_growth(rate: Option<f64>) -> String {
    match rate {
        Some(r) if r >= 0.0 => format!("▲ {:.1}%", r * 100.0),
        Some(r) => format!("▼ {:.1}%", r.abs() * 100.0),
        None => "—".to_string(),
    }
}
