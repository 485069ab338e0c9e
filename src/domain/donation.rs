use derive_more::derive::{Display, Error};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::money::{f64_to_minor_units, parse_amount};
use crate::domain::payment_status::PaymentStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
	#[default]
	#[serde(alias = "usd")]
	Usd,
	#[serde(alias = "ssp")]
	Ssp,
	#[serde(alias = "eur")]
	Eur,
	#[serde(alias = "gbp")]
	Gbp,
}

impl Currency {
	pub fn code(&self) -> &'static str {
		match self {
			Currency::Usd => "USD",
			Currency::Ssp => "SSP",
			Currency::Eur => "EUR",
			Currency::Gbp => "GBP",
		}
	}

	pub fn symbol(&self) -> &'static str {
		match self {
			Currency::Usd => "$",
			Currency::Ssp => "SSP ",
			Currency::Eur => "€",
			Currency::Gbp => "£",
		}
	}

	/// Case-insensitive lookup by ISO code.
	pub fn from_code(code: &str) -> Option<Self> {
		match code.trim().to_ascii_uppercase().as_str() {
			"USD" => Some(Currency::Usd),
			"SSP" => Some(Currency::Ssp),
			"EUR" => Some(Currency::Eur),
			"GBP" => Some(Currency::Gbp),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DonationCategory {
	#[default]
	General,
	ChildrensMinistry,
	BuildingFund,
	Emergency,
}

impl DonationCategory {
	pub fn label(&self) -> &'static str {
		match self {
			DonationCategory::General => "General Fund",
			DonationCategory::ChildrensMinistry => "Children's Ministry",
			DonationCategory::BuildingFund => "Building Fund",
			DonationCategory::Emergency => "Emergency Relief",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DonationFrequency {
	#[default]
	OneTime,
	Monthly,
	Quarterly,
	Yearly,
}

impl DonationFrequency {
	pub fn as_str(&self) -> &'static str {
		match self {
			DonationFrequency::OneTime => "one_time",
			DonationFrequency::Monthly => "monthly",
			DonationFrequency::Quarterly => "quarterly",
			DonationFrequency::Yearly => "yearly",
		}
	}

	pub fn is_recurring(&self) -> bool {
		!matches!(self, DonationFrequency::OneTime)
	}
}

#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum ValidationError {
	#[display("Please enter a valid donation amount greater than zero.")]
	InvalidAmount,
	#[display("Please enter a valid email address.")]
	InvalidEmail,
}

/// Optional donor identity as typed into the form. Blank values count as
/// absent.
#[derive(Debug, Clone, Default)]
pub struct DonorDetails {
	pub name:    Option<String>,
	pub email:   Option<String>,
	pub phone:   Option<String>,
	pub message: Option<String>,
}

/// A donation as sent to `POST /api/donations/checkout`.
///
/// Fields are private so `anonymous` can only ever be the one derived from
/// `donor_name` in [`DonationRequest::new`], and `amount` is always worth at
/// least one cent.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DonationRequest {
	amount:       f64,
	#[serde(skip)]
	amount_total: i64,
	currency:     Currency,
	category:     DonationCategory,
	frequency:    DonationFrequency,
	donor_name:   Option<String>,
	donor_email:  Option<String>,
	donor_phone:  Option<String>,
	message:      Option<String>,
	anonymous:    bool,
}

impl DonationRequest {
	pub fn new(
		amount: f64,
		currency: Currency,
		category: DonationCategory,
		frequency: DonationFrequency,
		donor: DonorDetails,
	) -> Result<Self, ValidationError> {
		let amount_total = f64_to_minor_units(amount)?;

		let donor_name = non_blank(donor.name);
		let donor_email = non_blank(donor.email);
		if let Some(email) = &donor_email &&
			!looks_like_email(email)
		{
			return Err(ValidationError::InvalidEmail);
		}

		Ok(Self {
			amount,
			amount_total,
			currency,
			category,
			frequency,
			anonymous: donor_name.is_none(),
			donor_name,
			donor_email,
			donor_phone: non_blank(donor.phone),
			message: non_blank(donor.message),
		})
	}

	/// Builds a request from the raw amount text of a form field.
	pub fn from_input(
		amount: &str,
		currency: Currency,
		category: DonationCategory,
		frequency: DonationFrequency,
		donor: DonorDetails,
	) -> Result<Self, ValidationError> {
		let amount = parse_amount(amount)?
			.to_f64()
			.ok_or(ValidationError::InvalidAmount)?;
		Self::new(amount, currency, category, frequency, donor)
	}

	pub fn amount(&self) -> f64 {
		self.amount
	}

	pub fn amount_total(&self) -> i64 {
		self.amount_total
	}

	pub fn currency(&self) -> Currency {
		self.currency
	}

	pub fn category(&self) -> DonationCategory {
		self.category
	}

	pub fn frequency(&self) -> DonationFrequency {
		self.frequency
	}

	pub fn donor_name(&self) -> Option<&str> {
		self.donor_name.as_deref()
	}

	pub fn donor_email(&self) -> Option<&str> {
		self.donor_email.as_deref()
	}

	pub fn donor_phone(&self) -> Option<&str> {
		self.donor_phone.as_deref()
	}

	pub fn message(&self) -> Option<&str> {
		self.message.as_deref()
	}

	pub fn is_anonymous(&self) -> bool {
		self.anonymous
	}
}

/// The backend's record of one checkout attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Donation {
	pub id:             Uuid,
	pub session_id:     String,
	pub amount:         f64,
	pub amount_total:   i64,
	pub currency:       Currency,
	pub category:       DonationCategory,
	pub frequency:      DonationFrequency,
	pub donor_name:     Option<String>,
	pub donor_email:    Option<String>,
	pub donor_phone:    Option<String>,
	pub message:        Option<String>,
	pub anonymous:      bool,
	pub payment_status: PaymentStatus,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at:     OffsetDateTime,
	#[serde(with = "time::serde::rfc3339")]
	pub updated_at:     OffsetDateTime,
}

impl Donation {
	pub fn pending(id: Uuid, session_id: String, request: &DonationRequest) -> Self {
		let now = OffsetDateTime::now_utc();
		Self {
			id,
			session_id,
			amount: request.amount(),
			amount_total: request.amount_total(),
			currency: request.currency(),
			category: request.category(),
			frequency: request.frequency(),
			donor_name: request.donor_name.clone(),
			donor_email: request.donor_email.clone(),
			donor_phone: request.donor_phone.clone(),
			message: request.message.clone(),
			anonymous: request.is_anonymous(),
			payment_status: PaymentStatus::Pending,
			created_at: now,
			updated_at: now,
		}
	}
}

fn non_blank(value: Option<String>) -> Option<String> {
	value
		.map(|v| v.trim().to_string())
		.filter(|v| !v.is_empty())
}

fn looks_like_email(email: &str) -> bool {
	match email.split_once('@') {
		Some((local, domain)) => {
			!local.is_empty() &&
				!domain.starts_with('.') &&
				domain.contains('.') &&
				!domain.ends_with('.') &&
				!email.contains(char::is_whitespace)
		}
		None => false,
	}
}
