use actix_web::{HttpResponse, web};
use log::warn;

use crate::adapters::web::errors::ApiError;
use crate::domain::gateway::PaymentGateway;
use crate::domain::repository::DonationRepository;
use crate::use_cases::get_donation_status::GetDonationStatusUseCase;

pub async fn donations_status<G, R>(
	session_id: web::Path<String>,
	get_donation_status_use_case: web::Data<GetDonationStatusUseCase<G, R>>,
) -> Result<HttpResponse, ApiError>
where
	G: PaymentGateway,
	R: DonationRepository,
{
	match get_donation_status_use_case.execute(&session_id).await {
		Ok(report) => Ok(HttpResponse::Ok().json(report)),
		Err(e) => {
			warn!("Status lookup for session {session_id} failed: {e}");
			Err(e.into())
		}
	}
}
