use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::donation::{Currency, ValidationError};

/// Parses the amount typed into the donation form. Accepts an optional
/// leading currency symbol and thousands separators ("$1,250.50").
pub fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
	let cleaned: String = input
		.trim()
		.trim_start_matches(['$', '€', '£'])
		.chars()
		.filter(|c| *c != ',')
		.collect();

	let amount = Decimal::from_str(cleaned.trim())
		.map_err(|_| ValidationError::InvalidAmount)?;
	to_minor_units(amount)?;

	Ok(amount)
}

/// Converts a major-unit amount to minor units (cents), rounding half away
/// from zero. Anything that does not come to at least one cent is rejected.
pub fn to_minor_units(amount: Decimal) -> Result<i64, ValidationError> {
	amount
		.checked_mul(Decimal::ONE_HUNDRED)
		.map(|cents| {
			cents.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
		})
		.and_then(|cents| cents.to_i64())
		.filter(|cents| *cents >= 1)
		.ok_or(ValidationError::InvalidAmount)
}

/// Same as [`to_minor_units`] for amounts that arrive as JSON numbers.
pub fn f64_to_minor_units(amount: f64) -> Result<i64, ValidationError> {
	Decimal::from_f64(amount)
		.ok_or(ValidationError::InvalidAmount)
		.and_then(to_minor_units)
}

/// Formats a minor-unit total for display, e.g. `5000` USD as `$50.00`.
pub fn format_minor_units(amount_total: i64, currency: Currency) -> String {
	let sign = if amount_total < 0 { "-" } else { "" };
	let abs = amount_total.unsigned_abs();
	format!(
		"{sign}{}{}.{:02}",
		currency.symbol(),
		group_thousands(abs / 100),
		abs % 100
	)
}

fn group_thousands(value: u64) -> String {
	let digits = value.to_string();
	let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, c) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			grouped.push(',');
		}
		grouped.push(c);
	}
	grouped
}
