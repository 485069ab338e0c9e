use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::donation::{Currency, DonationCategory, DonationFrequency};
use crate::use_cases::dto::CreateCheckoutCommand;

/// Body of `POST /api/donations/checkout`. An `anonymous` flag sent by the
/// caller is not part of the schema and is dropped.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CheckoutRequest {
	pub amount:      f64,
	#[serde(default)]
	pub currency:    Currency,
	pub category:    DonationCategory,
	#[serde(default)]
	pub frequency:   DonationFrequency,
	#[serde(default)]
	pub donor_name:  Option<String>,
	#[serde(default)]
	pub donor_email: Option<String>,
	#[serde(default)]
	pub donor_phone: Option<String>,
	#[serde(default)]
	pub message:     Option<String>,
}

impl From<CheckoutRequest> for CreateCheckoutCommand {
	fn from(request: CheckoutRequest) -> Self {
		CreateCheckoutCommand {
			amount:      request.amount,
			currency:    request.currency,
			category:    request.category,
			frequency:   request.frequency,
			donor_name:  request.donor_name,
			donor_email: request.donor_email,
			donor_phone: request.donor_phone,
			message:     request.message,
		}
	}
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CheckoutResponse {
	pub url:        String,
	pub session_id: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct HealthResponse {
	pub status:    String,
	pub database:  String,
	pub version:   String,
	#[serde(with = "time::serde::rfc3339")]
	pub timestamp: OffsetDateTime,
}
