//! Currency and percentage formatting shared by the CLI and TUI.

/// `1234567.891` -> `$1,234,567.89`; negatives get a leading `-`.
///
/// Digits come from `{:.2}` formatting, so arbitrarily large finite values
/// are grouped exactly as printed.
pub fn fmt_usd(value: f64) -> String {
    if !value.is_finite() {
        return format!("${value}");
    }
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let rounds_to_zero = whole.bytes().all(|b| b == b'0') && cents.bytes().all(|b| b == b'0');
    let sign = if value < 0.0 && !rounds_to_zero { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// `0.01234` -> `1.23%`.
pub fn fmt_pct(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}
