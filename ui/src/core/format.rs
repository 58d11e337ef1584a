//! Formatting helpers for presenting metrics.

/// Integer with comma thousands separators (`12345` → `12,345`).
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

pub fn format_degrees(value: f64) -> String {
    format!("{value:.2}°")
}

/// A fraction in `[0, 1]` as a whole percentage.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

/// Share of `part` in `total`, `0` when the total is empty.
pub fn share(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}
