use actix_web::{HttpResponse, web};
use time::OffsetDateTime;

use crate::adapters::web::schema::HealthResponse;
use crate::domain::repository::DonationRepository;

pub async fn health<R: DonationRepository>(
	donation_repo: web::Data<R>,
) -> HttpResponse {
	let database = if donation_repo.ping().await {
		"connected"
	} else {
		"disconnected"
	};

	HttpResponse::Ok().json(HealthResponse {
		status:    "healthy".to_string(),
		database:  database.to_string(),
		version:   env!("CARGO_PKG_VERSION").to_string(),
		timestamp: OffsetDateTime::now_utc(),
	})
}
