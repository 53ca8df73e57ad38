//! Display formatting for amounts, dates and list summaries.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Taka amount with two decimals and thousands grouping, e.g. `৳1,234.50`
/// or `-৳80.00`
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{}৳{}.{}", sign, group_thousands(whole), fraction)
}

/// Amount with an explicit sign for net figures, e.g. `+৳500.00`
pub fn format_signed_amount(amount: Decimal) -> String {
    if amount > Decimal::ZERO {
        format!("+{}", format_amount(amount))
    } else {
        format_amount(amount)
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

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("January")
}

/// `March 14, 2025`
pub fn format_date(date: NaiveDate) -> String {
    use chrono::Datelike;
    format!("{} {}, {}", month_name(date.month()), date.day(), date.year())
}

/// `March 2025`
pub fn format_period(year: i32, month: u32) -> String {
    format!("{} {}", month_name(month), year)
}

/// `count` years ending with `current`, newest first
pub fn recent_years(current: i32, count: usize) -> Vec<i32> {
    (0..count as i32).map(|offset| current - offset).collect()
}

/// `Showing 21–40 of 57`
pub fn showing_range(page: u32, page_size: u32, total: u64) -> String {
    if total == 0 {
        return "Showing 0 of 0".to_string();
    }
    let start = u64::from(page.saturating_sub(1)) * u64::from(page_size) + 1;
    let end = (start + u64::from(page_size) - 1).min(total);
    format!("Showing {}–{} of {}", start, end, total)
}
