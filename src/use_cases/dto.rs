use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::donation::{Currency, DonationCategory, DonationFrequency};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CreateCheckoutCommand {
	pub amount:      f64,
	pub currency:    Currency,
	pub category:    DonationCategory,
	pub frequency:   DonationFrequency,
	pub donor_name:  Option<String>,
	pub donor_email: Option<String>,
	pub donor_phone: Option<String>,
	pub message:     Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CheckoutResult {
	pub donation_id: Uuid,
	pub session_id:  String,
	pub url:         String,
}
