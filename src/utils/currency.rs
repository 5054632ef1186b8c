//! Currency display helpers

use bigdecimal::{BigDecimal, RoundingMode, Signed};

use crate::types::Currency;

const LAKH: i64 = 100_000;
const CRORE: i64 = 10_000_000;

/// Group whole-number digits the Indian way: `1234567` becomes `12,34,567`
pub fn format_indian_grouping(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Group whole-number digits in threes: `1234567` becomes `1,234,567`
pub fn format_western_grouping(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

fn sign(amount: &BigDecimal) -> &'static str {
    if amount.is_negative() {
        "-"
    } else {
        ""
    }
}

fn whole_digits(amount: &BigDecimal) -> String {
    amount
        .abs()
        .with_scale_round(0, RoundingMode::HalfUp)
        .to_string()
}

fn one_decimal(amount: BigDecimal) -> String {
    amount.with_scale_round(1, RoundingMode::HalfUp).to_string()
}

/// Rupee amount abbreviated to crores (`₹1.2Cr`) or lakhs (`₹12.0L`),
/// grouped the Indian way below one lakh (`₹85,000`)
pub fn format_inr(amount: &BigDecimal) -> String {
    let magnitude = amount.abs();
    let body = if magnitude >= BigDecimal::from(CRORE) {
        format!("{}Cr", one_decimal(magnitude / BigDecimal::from(CRORE)))
    } else if magnitude >= BigDecimal::from(LAKH) {
        format!("{}L", one_decimal(magnitude / BigDecimal::from(LAKH)))
    } else {
        format_indian_grouping(&whole_digits(amount))
    };
    format!("{}₹{}", sign(amount), body)
}

/// Dollar amount with western grouping and no decimals (`$1,234`)
pub fn format_usd(amount: &BigDecimal) -> String {
    format!(
        "{}${}",
        sign(amount),
        format_western_grouping(&whole_digits(amount))
    )
}

/// Format `amount` in the given currency
pub fn format_currency(amount: &BigDecimal, currency: Currency) -> String {
    match currency {
        Currency::Inr => format_inr(amount),
        Currency::Usd => format_usd(amount),
    }
}
