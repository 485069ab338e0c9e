use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::donation::Currency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
	#[default]
	Pending,
	Paid,
	Failed,
	Expired,
	#[serde(other)]
	Unknown,
}

impl PaymentStatus {
	pub fn is_paid(&self) -> bool {
		matches!(self, PaymentStatus::Paid)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			PaymentStatus::Pending => "pending",
			PaymentStatus::Paid => "paid",
			PaymentStatus::Failed => "failed",
			PaymentStatus::Expired => "expired",
			PaymentStatus::Unknown => "unknown",
		}
	}
}

/// Body of `GET /api/donations/status/{session_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentStatusReport {
	#[serde(default)]
	pub session_id:     String,
	pub payment_status: PaymentStatus,
	pub amount_total:   i64,
	/// Codes outside [`Currency`] decode as `None` rather than failing the
	/// whole report.
	#[serde(default, deserialize_with = "lenient_currency")]
	pub currency:       Option<Currency>,
}

fn lenient_currency<'de, D>(deserializer: D) -> Result<Option<Currency>, D::Error>
where
	D: Deserializer<'de>,
{
	let code = Option::<String>::deserialize(deserializer)?;
	Ok(code.as_deref().and_then(Currency::from_code))
}
