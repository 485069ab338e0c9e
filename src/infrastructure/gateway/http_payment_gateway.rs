use std::time::Duration;

use async_trait::async_trait;
use circuitbreaker_rs::{BreakerError, CircuitBreaker, DefaultPolicy};
use log::{debug, error, warn};
use reqwest::{Client, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::domain::donation::Currency;
use crate::domain::gateway::{
	CheckoutSessionParams, GatewayCheckoutSession, GatewayError, GatewaySession,
	PaymentGateway, Recurring,
};
use crate::domain::payment_status::PaymentStatus;

/// Placeholder the gateway replaces with the real session id when it
/// redirects the donor back.
pub const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

type GatewayOutcome<T> = Result<T, GatewayError>;

#[derive(Serialize)]
struct SessionMetadata {
	donation_id: String,
}

#[derive(Serialize)]
struct CreateSessionBody<'a> {
	mode:           &'static str,
	amount:         i64,
	currency:       String,
	description:    &'a str,
	success_url:    &'a str,
	cancel_url:     &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	customer_email: Option<&'a str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	recurring:      Option<Recurring>,
	metadata:       SessionMetadata,
}

#[derive(Deserialize)]
struct SessionBody {
	id:             String,
	#[serde(default)]
	url:            Option<String>,
	#[serde(default)]
	status:         Option<String>,
	#[serde(default)]
	payment_status: Option<String>,
	#[serde(default)]
	amount_total:   Option<i64>,
	#[serde(default)]
	currency:       Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
	error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
	message: String,
}

/// Hosted-checkout gateway spoken to over JSON with a bearer key.
#[derive(Clone)]
pub struct HttpPaymentGateway {
	http_client:     Client,
	base_url:        Url,
	api_key:         String,
	success_url:     String,
	cancel_url:      String,
	circuit_breaker: CircuitBreaker<DefaultPolicy, GatewayError>,
}

impl HttpPaymentGateway {
	pub fn new(
		http_client: Client,
		base_url: &str,
		api_key: &str,
		success_url: &str,
		cancel_url: &str,
	) -> Result<Self, GatewayError> {
		let base_url =
			Url::parse(base_url).map_err(|e| GatewayError::Misconfigured {
				message: format!("{base_url}: {e}"),
			})?;
		if base_url.cannot_be_a_base() {
			return Err(GatewayError::Misconfigured {
				message: format!("{base_url} cannot carry a path"),
			});
		}

		Ok(Self {
			http_client,
			base_url,
			api_key: api_key.to_string(),
			success_url: with_session_placeholder(success_url),
			cancel_url: cancel_url.to_string(),
			circuit_breaker: CircuitBreaker::<DefaultPolicy, GatewayError>::builder()
				.failure_threshold(0.5)
				.cooldown(Duration::from_secs(30))
				.build(),
		})
	}

	pub fn circuit_breaker(&self) -> &CircuitBreaker<DefaultPolicy, GatewayError> {
		&self.circuit_breaker
	}

	/// Each segment is percent-encoded, so a session id can never step
	/// outside the sessions collection or add a query.
	fn sessions_url(&self, segments: &[&str]) -> Url {
		let mut url = self.base_url.clone();
		// `new` rejects cannot-be-a-base URLs, so segments are always available.
		if let Ok(mut path) = url.path_segments_mut() {
			path.pop_if_empty()
				.extend(["v1", "checkout", "sessions"])
				.extend(segments);
		}
		url
	}
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
	async fn create_checkout_session(
		&self,
		params: CheckoutSessionParams,
	) -> Result<GatewayCheckoutSession, GatewayError> {
		let body = CreateSessionBody {
			mode:           if params.recurring.is_some() {
				"subscription"
			} else {
				"payment"
			},
			amount:         params.amount_total,
			currency:       params.currency.code().to_lowercase(),
			description:    &params.description,
			success_url:    &self.success_url,
			cancel_url:     &self.cancel_url,
			customer_email: params.customer_email.as_deref(),
			recurring:      params.recurring,
			metadata:       SessionMetadata {
				donation_id: params.donation_id.to_string(),
			},
		};

		let result: Result<
			GatewayOutcome<GatewayCheckoutSession>,
			BreakerError<GatewayError>,
		> = self
			.circuit_breaker
			.call_async(|| async {
				let resp = self
					.http_client
					.post(self.sessions_url(&[]))
					.bearer_auth(&self.api_key)
					.json(&body)
					.send()
					.await
					.map_err(|e| GatewayError::Unavailable {
						message: e.to_string(),
					})?;

				let session = match read_session(resp).await? {
					Ok(session) => session,
					Err(rejection) => return Ok(Err(rejection)),
				};

				Ok(match session.url {
					Some(url) if !url.is_empty() => Ok(GatewayCheckoutSession {
						id: session.id,
						url,
					}),
					_ => Err(GatewayError::InvalidResponse {
						message: format!("session {} has no checkout url", session.id),
					}),
				})
			})
			.await;

		settle(result)
	}

	async fn get_session(
		&self,
		session_id: &str,
	) -> Result<GatewaySession, GatewayError> {
		if matches!(session_id, "" | "." | "..") {
			return Err(GatewayError::SessionNotFound {
				session_id: session_id.to_string(),
			});
		}

		let result: Result<
			GatewayOutcome<GatewaySession>,
			BreakerError<GatewayError>,
		> = self
			.circuit_breaker
			.call_async(|| async {
				let resp = self
					.http_client
					.get(self.sessions_url(&[session_id]))
					.bearer_auth(&self.api_key)
					.send()
					.await
					.map_err(|e| GatewayError::Unavailable {
						message: e.to_string(),
					})?;

				if resp.status() == StatusCode::NOT_FOUND {
					return Ok(Err(GatewayError::SessionNotFound {
						session_id: session_id.to_string(),
					}));
				}

				let session = match read_session(resp).await? {
					Ok(session) => session,
					Err(rejection) => return Ok(Err(rejection)),
				};

				debug!(
					"Gateway session {} is {:?}/{:?}",
					session.id, session.status, session.payment_status
				);

				Ok(Ok(GatewaySession {
					payment_status: map_payment_status(
						session.status.as_deref(),
						session.payment_status.as_deref(),
					),
					amount_total:   session.amount_total.unwrap_or_default(),
					currency:       session.currency.as_deref().and_then(Currency::from_code),
					id:             session.id,
				}))
			})
			.await;

		settle(result)
	}
}

/// Outer error: the gateway is down and the breaker should count it.
/// Inner error: the gateway answered but refused or garbled the request.
async fn read_session(
	resp: Response,
) -> Result<GatewayOutcome<SessionBody>, GatewayError> {
	let status = resp.status();

	if status.is_server_error() {
		error!("Payment gateway returned {status}");
		return Err(GatewayError::Unavailable {
			message: format!("gateway returned {status}"),
		});
	}

	if !status.is_success() {
		let message = match resp.json::<ErrorBody>().await {
			Ok(body) => body.error.message,
			Err(_) => status.canonical_reason().unwrap_or("rejected").to_string(),
		};
		warn!("Payment gateway rejected request with {status}: {message}");
		return Ok(Err(GatewayError::Rejected {
			status: status.as_u16(),
			message,
		}));
	}

	Ok(resp
		.json::<SessionBody>()
		.await
		.map_err(|e| GatewayError::InvalidResponse {
			message: e.to_string(),
		}))
}

fn settle<T>(
	result: Result<GatewayOutcome<T>, BreakerError<GatewayError>>,
) -> Result<T, GatewayError> {
	match result {
		Ok(outcome) => outcome,
		Err(BreakerError::Open) => {
			warn!("Payment gateway circuit is open, failing fast");
			Err(GatewayError::CircuitOpen)
		}
		Err(BreakerError::Operation(e)) => Err(e),
		Err(e) => Err(GatewayError::Unavailable {
			message: e.to_string(),
		}),
	}
}

pub fn map_payment_status(
	session_status: Option<&str>,
	payment_status: Option<&str>,
) -> PaymentStatus {
	match (session_status, payment_status) {
		(_, Some("paid" | "no_payment_required")) => PaymentStatus::Paid,
		(Some("expired"), _) => PaymentStatus::Expired,
		(_, Some("failed")) => PaymentStatus::Failed,
		_ => PaymentStatus::Pending,
	}
}

fn with_session_placeholder(success_url: &str) -> String {
	let separator = if success_url.contains('?') { '&' } else { '?' };
	format!(
		"{success_url}{separator}session_id={}",
		SESSION_ID_PLACEHOLDER
	)
}
