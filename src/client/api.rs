use std::time::Duration;

use async_trait::async_trait;
use derive_more::derive::{Display, Error};
use log::{debug, warn};
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::client::config::ApiClientConfig;
use crate::domain::donation::DonationRequest;
use crate::domain::payment_status::PaymentStatusReport;

#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum ApiCallError {
	#[display("Could not reach the donations service: {message}")]
	Transport { message: String },
	#[display("Donations service answered with status {status}")]
	Status { status: u16, detail: Option<String> },
	#[display("Unreadable response from the donations service: {message}")]
	Decode { message: String },
	#[display("Invalid donations service address: {message}")]
	InvalidUrl { message: String },
}

impl ApiCallError {
	/// Message the backend wants shown to the donor, if it sent one.
	pub fn detail(&self) -> Option<&str> {
		match self {
			ApiCallError::Status {
				detail: Some(detail),
				..
			} => Some(detail),
			_ => None,
		}
	}
}

/// Hosted checkout link handed back by `POST /api/donations/checkout`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CheckoutSession {
	pub url:        String,
	#[serde(default)]
	pub session_id: Option<String>,
}

#[async_trait]
pub trait DonationsApi: Send + Sync {
	async fn create_checkout(
		&self,
		request: &DonationRequest,
	) -> Result<CheckoutSession, ApiCallError>;

	async fn payment_status(
		&self,
		session_id: &str,
	) -> Result<PaymentStatusReport, ApiCallError>;
}

#[async_trait]
impl<T: DonationsApi + ?Sized> DonationsApi for std::sync::Arc<T> {
	async fn create_checkout(
		&self,
		request: &DonationRequest,
	) -> Result<CheckoutSession, ApiCallError> {
		(**self).create_checkout(request).await
	}

	async fn payment_status(
		&self,
		session_id: &str,
	) -> Result<PaymentStatusReport, ApiCallError> {
		(**self).payment_status(session_id).await
	}
}

#[derive(Clone)]
pub struct HttpDonationsApi {
	http_client: Client,
	base_url:    Url,
}

impl HttpDonationsApi {
	pub fn new(config: &ApiClientConfig) -> Result<Self, ApiCallError> {
		let base_url =
			Url::parse(&config.base_url).map_err(|e| ApiCallError::InvalidUrl {
				message: e.to_string(),
			})?;
		if base_url.cannot_be_a_base() {
			return Err(ApiCallError::InvalidUrl {
				message: config.base_url.clone(),
			});
		}

		let http_client = Client::builder()
			.timeout(Duration::from_millis(config.timeout_ms))
			.build()
			.map_err(|e| ApiCallError::Transport {
				message: e.to_string(),
			})?;

		Ok(Self {
			http_client,
			base_url,
		})
	}

	fn endpoint(&self, segments: &[&str]) -> Url {
		let mut url = self.base_url.clone();
		// `new` rejects cannot-be-a-base URLs, so segments are always available.
		if let Ok(mut path) = url.path_segments_mut() {
			path.pop_if_empty().extend(segments);
		}
		url
	}
}

#[async_trait]
impl DonationsApi for HttpDonationsApi {
	async fn create_checkout(
		&self,
		request: &DonationRequest,
	) -> Result<CheckoutSession, ApiCallError> {
		let url = self.endpoint(&["api", "donations", "checkout"]);
		debug!("Requesting checkout session from {url}");

		let resp = self
			.http_client
			.post(url)
			.json(request)
			.send()
			.await
			.map_err(transport_error)?;

		decode(resp).await
	}

	async fn payment_status(
		&self,
		session_id: &str,
	) -> Result<PaymentStatusReport, ApiCallError> {
		let url = self.endpoint(&["api", "donations", "status", session_id]);
		debug!("Fetching payment status from {url}");

		let resp = self
			.http_client
			.get(url)
			.send()
			.await
			.map_err(transport_error)?;

		decode(resp).await
	}
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiCallError> {
	let status = resp.status();

	if !status.is_success() {
		let detail = resp
			.json::<serde_json::Value>()
			.await
			.ok()
			.and_then(|body| extract_detail(&body));
		warn!("Donations service answered {status}: {detail:?}");
		return Err(ApiCallError::Status {
			status: status.as_u16(),
			detail,
		});
	}

	resp.json::<T>().await.map_err(|e| ApiCallError::Decode {
		message: e.to_string(),
	})
}

fn transport_error(e: reqwest::Error) -> ApiCallError {
	ApiCallError::Transport {
		message: e.to_string(),
	}
}

/// Pulls a human message out of `{"detail": "..."}` or the list form
/// `{"detail": [{"msg": "..."}]}` used for request validation failures.
pub fn extract_detail(body: &serde_json::Value) -> Option<String> {
	let detail = body.get("detail")?;
	let message = match detail {
		serde_json::Value::String(message) => Some(message.clone()),
		serde_json::Value::Array(items) => items
			.iter()
			.find_map(|item| item.get("msg").and_then(|m| m.as_str()))
			.map(str::to_string),
		_ => None,
	};
	message.filter(|m| !m.trim().is_empty())
}
