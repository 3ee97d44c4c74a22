//! Display helpers for amounts, rates and durations.

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency.to_ascii_uppercase().as_str() {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        _ => None,
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `format_currency(1234.5, "USD") == "$1,234.50"`
pub fn format_currency(amount: f64, currency: &str) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((&fixed, "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    let body = format!("{}.{}", group_thousands(whole), cents);

    match currency_symbol(currency) {
        Some(symbol) => format!("{}{}{}", sign, symbol, body),
        None => format!("{}{} {}", sign, currency.to_ascii_uppercase(), body),
    }
}

pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

/// `7.5` hours renders as `"7h 30m"`, whole hours as `"8h"`.
pub fn format_hours(hours: f64) -> String {
    let total_minutes = (hours.max(0.0) * 60.0).round() as u64;
    let (h, m) = (total_minutes / 60, total_minutes % 60);

    if m > 0 {
        format!("{}h {}m", h, m)
    } else {
        format!("{}h", h)
    }
}
