pub mod adapters;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod use_cases;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use log::info;

use crate::adapters::web::configure;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::gateway::http_payment_gateway::HttpPaymentGateway;
use crate::infrastructure::persistence::redis_donation_repository::RedisDonationRepository;
use crate::use_cases::create_checkout::CreateCheckoutUseCase;
use crate::use_cases::get_donation_status::GetDonationStatusUseCase;

pub async fn run(config: Arc<Config>) -> io::Result<()> {
	let _ = env_logger::Builder::from_env(
		env_logger::Env::default().default_filter_or("info"),
	)
	.try_init();

	let origins = config
		.allowed_origins()
		.map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

	let redis_client = redis::Client::open(config.redis_url.as_str())
		.map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

	let http_client = reqwest::Client::builder()
		.timeout(Duration::from_millis(config.gateway_timeout_ms))
		.build()
		.map_err(io::Error::other)?;

	let gateway = HttpPaymentGateway::new(
		http_client,
		&config.gateway_url,
		&config.gateway_api_key,
		&config.success_url,
		&config.cancel_url,
	)
	.map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
	let donation_repo = RedisDonationRepository::new(redis_client);

	let create_checkout_use_case =
		CreateCheckoutUseCase::new(gateway.clone(), donation_repo.clone());
	let get_donation_status_use_case =
		GetDonationStatusUseCase::new(gateway, donation_repo.clone());

	info!(
		"Starting donations API on {}:{}...",
		config.server_host, config.server_port
	);
	HttpServer::new(move || {
		App::new()
			.wrap(cors(&origins))
			.wrap(Logger::default().exclude("/api/health"))
			.app_data(web::Data::new(donation_repo.clone()))
			.app_data(web::Data::new(create_checkout_use_case.clone()))
			.app_data(web::Data::new(get_donation_status_use_case.clone()))
			.configure(configure::<HttpPaymentGateway, RedisDonationRepository>)
	})
	.keep_alive(Duration::from_secs(config.server_keepalive))
	.bind((config.server_host.as_str(), config.server_port))?
	.run()
	.await
}

fn cors(origins: &[String]) -> Cors {
	let cors = if origins.iter().any(|origin| origin == "*") {
		Cors::default().allow_any_origin()
	} else {
		origins
			.iter()
			.fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
	};

	cors.allowed_methods(vec!["GET", "POST", "OPTIONS"])
		.allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
		.max_age(3600)
}
