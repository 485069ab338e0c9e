use actix_web::{HttpResponse, web};
use log::{info, warn};

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::{CheckoutRequest, CheckoutResponse};
use crate::domain::gateway::PaymentGateway;
use crate::domain::repository::DonationRepository;
use crate::use_cases::create_checkout::CreateCheckoutUseCase;

pub async fn donations_checkout<G, R>(
	payload: web::Json<CheckoutRequest>,
	create_checkout_use_case: web::Data<CreateCheckoutUseCase<G, R>>,
) -> Result<HttpResponse, ApiError>
where
	G: PaymentGateway,
	R: DonationRepository,
{
	let category = payload.category;
	match create_checkout_use_case
		.execute(payload.into_inner().into())
		.await
	{
		Ok(checkout) => {
			info!(
				"Checkout started for a {category:?} donation, session {}",
				checkout.session_id
			);
			Ok(HttpResponse::Ok().json(CheckoutResponse {
				url:        checkout.url,
				session_id: checkout.session_id,
			}))
		}
		Err(e) => {
			warn!("Checkout could not be started: {e}");
			Err(e.into())
		}
	}
}
