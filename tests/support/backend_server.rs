use std::net::TcpListener;

use actix_web::{App, HttpServer, web};
use ministry_giving::adapters::web::configure;
use ministry_giving::use_cases::create_checkout::CreateCheckoutUseCase;
use ministry_giving::use_cases::get_donation_status::GetDonationStatusUseCase;

use crate::support::fakes::{FakePaymentGateway, InMemoryDonationRepository};

pub struct TestBackend {
	pub base_url: String,
	pub gateway:  FakePaymentGateway,
	pub repo:     InMemoryDonationRepository,
}

/// Serves the real donations routes over HTTP on a random local port, backed
/// by in-memory doubles.
pub async fn spawn_backend() -> TestBackend {
	let gateway = FakePaymentGateway::default();
	let repo = InMemoryDonationRepository::default();
	let listener = TcpListener::bind("127.0.0.1:0").unwrap();
	let port = listener.local_addr().unwrap().port();

	let (app_gateway, app_repo) = (gateway.clone(), repo.clone());
	let server = HttpServer::new(move || {
		App::new()
			.app_data(web::Data::new(app_repo.clone()))
			.app_data(web::Data::new(CreateCheckoutUseCase::new(
				app_gateway.clone(),
				app_repo.clone(),
			)))
			.app_data(web::Data::new(GetDonationStatusUseCase::new(
				app_gateway.clone(),
				app_repo.clone(),
			)))
			.configure(configure::<FakePaymentGateway, InMemoryDonationRepository>)
	})
	.workers(1)
	.listen(listener)
	.unwrap()
	.run();
	tokio::spawn(server);

	TestBackend {
		base_url: format!("http://127.0.0.1:{port}"),
		gateway,
		repo,
	}
}
