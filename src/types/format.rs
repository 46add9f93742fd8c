use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::MetalType;

const LAKH: i64 = 100_000;
const CRORE: i64 = 10_000_000;

/// Rounds half away from zero and pads to exactly `decimal_places` digits.
pub fn fixed(value: Decimal, decimal_places: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimal_places);
    rounded.to_string()
}

/// Formats a rupee amount without fraction digits, grouped the Indian way (`₹1,23,457`).
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let grouped = group_indian(&fixed(rounded.abs(), 0));

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

/// Compact form used on dashboards: lakhs below one crore, crores above.
pub fn format_currency_in_cr(amount: Decimal) -> String {
    let crore = Decimal::from(CRORE);

    if amount < crore {
        return format!("{} L", fixed(amount / Decimal::from(LAKH), 1));
    }

    let crores = amount / crore;

    if crores >= Decimal::ONE_HUNDRED {
        format!("{} CR", fixed(crores, 0))
    } else {
        format!("{} CR", fixed(crores, 1))
    }
}

pub fn format_weight(weight: Option<Decimal>, metal_type: MetalType) -> String {
    format!("{} {}", fixed(weight.unwrap_or_default(), 2), metal_type.unit())
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();

    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }

    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
