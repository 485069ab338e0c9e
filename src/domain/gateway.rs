use async_trait::async_trait;
use derive_more::derive::{Display, Error};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::donation::{Currency, DonationFrequency};
use crate::domain::payment_status::PaymentStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringInterval {
	Month,
	Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurring {
	pub interval:       RecurringInterval,
	pub interval_count: u32,
}

impl Recurring {
	pub fn for_frequency(frequency: DonationFrequency) -> Option<Self> {
		let (interval, interval_count) = match frequency {
			DonationFrequency::OneTime => return None,
			DonationFrequency::Monthly => (RecurringInterval::Month, 1),
			DonationFrequency::Quarterly => (RecurringInterval::Month, 3),
			DonationFrequency::Yearly => (RecurringInterval::Year, 1),
		};
		Some(Self {
			interval,
			interval_count,
		})
	}
}

/// What the hosted checkout page is asked to collect.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSessionParams {
	pub donation_id:    Uuid,
	pub amount_total:   i64,
	pub currency:       Currency,
	pub description:    String,
	pub customer_email: Option<String>,
	pub recurring:      Option<Recurring>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayCheckoutSession {
	pub id:  String,
	pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GatewaySession {
	pub id:             String,
	pub payment_status: PaymentStatus,
	pub amount_total:   i64,
	pub currency:       Option<Currency>,
}

#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum GatewayError {
	#[display("Payment gateway is unavailable: {message}")]
	Unavailable { message: String },
	#[display("Payment gateway rejected the request ({status}): {message}")]
	Rejected { status: u16, message: String },
	#[display("Checkout session {session_id} was not found")]
	SessionNotFound { session_id: String },
	#[display("Payment gateway sent an unreadable response: {message}")]
	InvalidResponse { message: String },
	#[display("Payment gateway calls are suspended after repeated failures")]
	CircuitOpen,
	#[display("Payment gateway is misconfigured: {message}")]
	Misconfigured { message: String },
}

#[async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
	async fn create_checkout_session(
		&self,
		params: CheckoutSessionParams,
	) -> Result<GatewayCheckoutSession, GatewayError>;

	async fn get_session(
		&self,
		session_id: &str,
	) -> Result<GatewaySession, GatewayError>;
}
