use log::{debug, warn};

use crate::domain::gateway::{GatewayError, PaymentGateway};
use crate::domain::payment_status::PaymentStatusReport;
use crate::domain::repository::DonationRepository;
use crate::use_cases::errors::DonationError;

/// Reads the authoritative status of a checkout session from the gateway and
/// mirrors it onto the stored donation. Sessions with no stored donation are
/// reported as not found. Safe to repeat for the same session.
#[derive(Clone)]
pub struct GetDonationStatusUseCase<G: PaymentGateway, R: DonationRepository> {
	gateway:       G,
	donation_repo: R,
}

impl<G: PaymentGateway, R: DonationRepository> GetDonationStatusUseCase<G, R> {
	pub fn new(gateway: G, donation_repo: R) -> Self {
		Self {
			gateway,
			donation_repo,
		}
	}

	pub async fn execute(
		&self,
		session_id: &str,
	) -> Result<PaymentStatusReport, DonationError> {
		let session_id = session_id.trim();
		if session_id.is_empty() {
			return Err(GatewayError::SessionNotFound {
				session_id: String::new(),
			}
			.into());
		}

		// Only sessions this service opened are answered. When the store is
		// unreachable the gateway stays the authority.
		let stored_status = match self
			.donation_repo
			.find_by_session_id(session_id)
			.await
		{
			Ok(Some(donation)) => Some(donation.payment_status),
			Ok(None) => {
				warn!("Status requested for unknown checkout session {session_id}");
				return Err(GatewayError::SessionNotFound {
					session_id: session_id.to_string(),
				}
				.into());
			}
			Err(e) => {
				warn!("Could not look up checkout session {session_id}: {e}");
				None
			}
		};

		let session = self.gateway.get_session(session_id).await?;

		if stored_status == Some(session.payment_status) {
			debug!(
				"Donation for session {} is still {}",
				session.id,
				session.payment_status.as_str()
			);
		} else {
			match self
				.donation_repo
				.update_status(&session.id, session.payment_status)
				.await
			{
				Ok(true) => debug!(
					"Donation for session {} is {}",
					session.id,
					session.payment_status.as_str()
				),
				Ok(false) => {
					warn!("No stored donation for checkout session {}", session.id)
				}
				// The gateway answer is still valid; the record catches up on
				// the next read.
				Err(e) => warn!(
					"Could not record status for checkout session {}: {e}",
					session.id
				),
			}
		}

		Ok(PaymentStatusReport {
			session_id:     session.id,
			payment_status: session.payment_status,
			amount_total:   session.amount_total,
			currency:       session.currency,
		})
	}
}
