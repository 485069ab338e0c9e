use log::{error, info};
use uuid::Uuid;

use crate::domain::donation::{Donation, DonationRequest, DonorDetails};
use crate::domain::gateway::{CheckoutSessionParams, PaymentGateway, Recurring};
use crate::domain::repository::DonationRepository;
use crate::use_cases::dto::{CheckoutResult, CreateCheckoutCommand};
use crate::use_cases::errors::DonationError;

#[derive(Clone)]
pub struct CreateCheckoutUseCase<G: PaymentGateway, R: DonationRepository> {
	gateway:       G,
	donation_repo: R,
}

impl<G: PaymentGateway, R: DonationRepository> CreateCheckoutUseCase<G, R> {
	pub fn new(gateway: G, donation_repo: R) -> Self {
		Self {
			gateway,
			donation_repo,
		}
	}

	pub async fn execute(
		&self,
		command: CreateCheckoutCommand,
	) -> Result<CheckoutResult, DonationError> {
		// Anything the caller sent as `anonymous` is ignored; it is derived
		// from the donor name here.
		let request = DonationRequest::new(
			command.amount,
			command.currency,
			command.category,
			command.frequency,
			DonorDetails {
				name:    command.donor_name,
				email:   command.donor_email,
				phone:   command.donor_phone,
				message: command.message,
			},
		)?;

		let donation_id = Uuid::new_v4();
		let params = CheckoutSessionParams {
			donation_id,
			amount_total: request.amount_total(),
			currency: request.currency(),
			description: describe(&request),
			customer_email: request.donor_email().map(str::to_string),
			recurring: Recurring::for_frequency(request.frequency()),
		};

		let session = self.gateway.create_checkout_session(params).await?;

		let donation = Donation::pending(donation_id, session.id.clone(), &request);
		if let Err(e) = self.donation_repo.save(donation).await {
			error!(
				"Checkout session {} created but donation {donation_id} was not stored: {e}",
				session.id
			);
			return Err(e.into());
		}

		info!(
			"Checkout session {} created for donation {donation_id}",
			session.id
		);

		Ok(CheckoutResult {
			donation_id,
			session_id: session.id,
			url: session.url,
		})
	}
}

fn describe(request: &DonationRequest) -> String {
	let label = request.category().label();
	let frequency = request.frequency();
	if frequency.is_recurring() {
		format!("{label} donation ({})", frequency.as_str())
	} else {
		format!("{label} donation")
	}
}
