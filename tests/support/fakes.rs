use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ministry_giving::client::api::{ApiCallError, CheckoutSession, DonationsApi};
use ministry_giving::client::checkout_initiator::Navigator;
use ministry_giving::domain::donation::{Donation, DonationRequest};
use ministry_giving::domain::gateway::{
	CheckoutSessionParams, GatewayCheckoutSession, GatewayError, GatewaySession,
	PaymentGateway,
};
use ministry_giving::domain::payment_status::{PaymentStatus, PaymentStatusReport};
use ministry_giving::domain::repository::{DonationRepository, RepositoryError};
use tokio::sync::Notify;

#[derive(Clone, Default)]
pub struct InMemoryDonationRepository {
	pub donations: Arc<Mutex<HashMap<String, Donation>>>,
	pub failing:   Arc<AtomicBool>,
	pub writes:    Arc<AtomicUsize>,
}

impl InMemoryDonationRepository {
	pub fn get(&self, session_id: &str) -> Option<Donation> {
		self.donations.lock().unwrap().get(session_id).cloned()
	}

	pub fn len(&self) -> usize {
		self.donations.lock().unwrap().len()
	}

	pub fn fail(&self) {
		self.failing.store(true, Ordering::SeqCst);
	}

	fn check(&self) -> Result<(), RepositoryError> {
		if self.failing.load(Ordering::SeqCst) {
			return Err(RepositoryError::Connection {
				message: "store offline".to_string(),
			});
		}
		Ok(())
	}
}

#[async_trait]
impl DonationRepository for InMemoryDonationRepository {
	async fn save(&self, donation: Donation) -> Result<(), RepositoryError> {
		self.check()?;
		self.writes.fetch_add(1, Ordering::SeqCst);
		self.donations
			.lock()
			.unwrap()
			.insert(donation.session_id.clone(), donation);
		Ok(())
	}

	async fn find_by_session_id(
		&self,
		session_id: &str,
	) -> Result<Option<Donation>, RepositoryError> {
		self.check()?;
		Ok(self.get(session_id))
	}

	async fn update_status(
		&self,
		session_id: &str,
		status: PaymentStatus,
	) -> Result<bool, RepositoryError> {
		self.check()?;
		let mut donations = self.donations.lock().unwrap();
		let Some(donation) = donations.get_mut(session_id) else {
			return Ok(false);
		};
		if donation.payment_status != status {
			donation.payment_status = status;
			self.writes.fetch_add(1, Ordering::SeqCst);
		}
		Ok(true)
	}

	async fn ping(&self) -> bool {
		!self.failing.load(Ordering::SeqCst)
	}
}

#[derive(Clone, Default)]
pub struct FakePaymentGateway {
	pub created:  Arc<Mutex<Vec<CheckoutSessionParams>>>,
	pub sessions: Arc<Mutex<HashMap<String, GatewaySession>>>,
	pub failure:  Arc<Mutex<Option<GatewayError>>>,
	pub lookups:  Arc<AtomicUsize>,
}

impl FakePaymentGateway {
	pub fn fail_with(&self, error: GatewayError) {
		*self.failure.lock().unwrap() = Some(error);
	}

	pub fn set_status(&self, session_id: &str, status: PaymentStatus) {
		if let Some(session) = self.sessions.lock().unwrap().get_mut(session_id) {
			session.payment_status = status;
		}
	}

	pub fn created_count(&self) -> usize {
		self.created.lock().unwrap().len()
	}

	pub fn last_created(&self) -> Option<CheckoutSessionParams> {
		self.created.lock().unwrap().last().cloned()
	}

	fn failure(&self) -> Option<GatewayError> {
		self.failure.lock().unwrap().clone()
	}
}

#[async_trait]
impl PaymentGateway for FakePaymentGateway {
	async fn create_checkout_session(
		&self,
		params: CheckoutSessionParams,
	) -> Result<GatewayCheckoutSession, GatewayError> {
		if let Some(error) = self.failure() {
			return Err(error);
		}

		let mut created = self.created.lock().unwrap();
		let id = format!("cs_test_{}", created.len() + 1);
		self.sessions
			.lock()
			.unwrap()
			.insert(id.clone(), GatewaySession {
				id:             id.clone(),
				payment_status: PaymentStatus::Pending,
				amount_total:   params.amount_total,
				currency:       Some(params.currency),
			});
		created.push(params);

		Ok(GatewayCheckoutSession {
			url: format!("https://checkout.example.com/pay/{id}"),
			id,
		})
	}

	async fn get_session(
		&self,
		session_id: &str,
	) -> Result<GatewaySession, GatewayError> {
		self.lookups.fetch_add(1, Ordering::SeqCst);
		if let Some(error) = self.failure() {
			return Err(error);
		}

		self.sessions
			.lock()
			.unwrap()
			.get(session_id)
			.cloned()
			.ok_or_else(|| GatewayError::SessionNotFound {
				session_id: session_id.to_string(),
			})
	}
}

/// Scripted donations API for the client-side flow.
pub struct MockDonationsApi {
	pub checkout_response: Mutex<Result<CheckoutSession, ApiCallError>>,
	pub status_response:   Mutex<Result<PaymentStatusReport, ApiCallError>>,
	pub checkout_requests: Mutex<Vec<serde_json::Value>>,
	pub status_requests:   Mutex<Vec<String>>,
	/// When set, checkout calls wait here until notified.
	pub hold_checkout:     Option<Arc<Notify>>,
}

impl MockDonationsApi {
	pub fn new() -> Self {
		Self {
			checkout_response: Mutex::new(Ok(CheckoutSession {
				url:        "https://checkout.example.com/pay/cs_test_1".to_string(),
				session_id: Some("cs_test_1".to_string()),
			})),
			status_response:   Mutex::new(Err(ApiCallError::Transport {
				message: "not scripted".to_string(),
			})),
			checkout_requests: Mutex::new(Vec::new()),
			status_requests:   Mutex::new(Vec::new()),
			hold_checkout:     None,
		}
	}

	pub fn with_checkout(
		self,
		response: Result<CheckoutSession, ApiCallError>,
	) -> Self {
		*self.checkout_response.lock().unwrap() = response;
		self
	}

	pub fn with_status(
		self,
		response: Result<PaymentStatusReport, ApiCallError>,
	) -> Self {
		*self.status_response.lock().unwrap() = response;
		self
	}

	pub fn holding_checkout(mut self, gate: Arc<Notify>) -> Self {
		self.hold_checkout = Some(gate);
		self
	}

	pub fn checkout_calls(&self) -> usize {
		self.checkout_requests.lock().unwrap().len()
	}

	pub fn status_calls(&self) -> usize {
		self.status_requests.lock().unwrap().len()
	}
}

#[async_trait]
impl DonationsApi for MockDonationsApi {
	async fn create_checkout(
		&self,
		request: &DonationRequest,
	) -> Result<CheckoutSession, ApiCallError> {
		self.checkout_requests
			.lock()
			.unwrap()
			.push(serde_json::to_value(request).unwrap());

		if let Some(gate) = &self.hold_checkout {
			gate.notified().await;
		}

		self.checkout_response.lock().unwrap().clone()
	}

	async fn payment_status(
		&self,
		session_id: &str,
	) -> Result<PaymentStatusReport, ApiCallError> {
		self.status_requests
			.lock()
			.unwrap()
			.push(session_id.to_string());
		self.status_response.lock().unwrap().clone()
	}
}

#[derive(Clone, Default)]
pub struct RecordingNavigator {
	pub redirects: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
	pub fn redirects(&self) -> Vec<String> {
		self.redirects.lock().unwrap().clone()
	}
}

impl Navigator for RecordingNavigator {
	fn redirect(&self, url: &str) {
		self.redirects.lock().unwrap().push(url.to_string());
	}
}
