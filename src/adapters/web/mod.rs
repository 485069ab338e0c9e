pub mod donations_checkout_handler;
pub mod donations_status_handler;
pub mod errors;
pub mod health_handler;
pub mod schema;

use actix_web::web;

use crate::adapters::web::donations_checkout_handler::donations_checkout;
use crate::adapters::web::donations_status_handler::donations_status;
use crate::adapters::web::errors::ApiError;
use crate::adapters::web::health_handler::health;
use crate::domain::gateway::PaymentGateway;
use crate::domain::repository::DonationRepository;

/// Mounts the donations API under `/api`. The app must provide
/// `web::Data` for `R`, `CreateCheckoutUseCase<G, R>` and
/// `GetDonationStatusUseCase<G, R>`.
pub fn configure<G, R>(cfg: &mut web::ServiceConfig)
where
	G: PaymentGateway,
	R: DonationRepository,
{
	cfg.service(
		web::scope("/api")
			.app_data(json_config())
			.route("/health", web::get().to(health::<R>))
			.route(
				"/donations/checkout",
				web::post().to(donations_checkout::<G, R>),
			)
			.route(
				"/donations/status/{session_id}",
				web::get().to(donations_status::<G, R>),
			),
	);
}

/// Malformed bodies are reported like any other validation failure.
fn json_config() -> web::JsonConfig {
	web::JsonConfig::default().error_handler(|err, _req| {
		ApiError::Validation {
			message: err.to_string(),
		}
		.into()
	})
}
