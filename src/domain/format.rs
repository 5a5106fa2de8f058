// src/domain/format.rs

use once_cell::sync::Lazy;
use regex::Regex;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));
static NON_SLUG: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9-]").expect("valid slug pattern"));

/// Seller descriptions arrive as HTML fragments. Pages and metadata only
/// ever show their plain text.
pub fn strip_html_tags(html: &str) -> String {
    HTML_TAG
        .replace_all(html, "")
        .replace("&nbsp;", " ")
        .trim()
        .to_string()
}

/// Cuts to `max` characters. Counts chars, never bytes, so Arabic titles
/// are not split mid code point.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// `text` if it fits in `max` chars, else the first `max - 3` chars and "...".
pub fn ellipsize(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", truncate_chars(text, max.saturating_sub(3)))
    } else {
        text.to_string()
    }
}

pub fn slugify(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let dashed = WHITESPACE.replace_all(&lowered, "-");
    NON_SLUG.replace_all(&dashed, "").into_owned()
}

/// 1234567.5 -> "1,234,567.5"
pub fn group_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = (value.abs() * 1000.0).round() / 1000.0;
    let whole = rounded.trunc() as u64;
    let fraction = rounded - rounded.trunc();

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if fraction > 0.0 {
        let decimals = format!("{fraction:.3}");
        let decimals = decimals.trim_start_matches('0').trim_end_matches('0');
        grouped.push_str(decimals);
    }

    if negative && (whole > 0 || fraction > 0.0) {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_price(price: f64, currency: &str) -> String {
    if !price.is_finite() {
        return "N/A".to_string();
    }
    format!("{currency} {}", group_thousands(price))
}

pub fn format_mileage(km: f64) -> String {
    format!("{} km", group_thousands(km))
}
