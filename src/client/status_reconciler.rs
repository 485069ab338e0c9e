use log::{info, warn};
use reqwest::Url;

use crate::client::api::DonationsApi;
use crate::client::confirmation::ConfirmationView;
use crate::domain::payment_status::{PaymentStatus, PaymentStatusReport};

pub const SESSION_ID_PARAM: &str = "session_id";

#[derive(Debug, Clone, PartialEq)]
pub enum ReconcilerState {
	/// The page was opened without a session id.
	NoSession,
	/// The single status read is in flight.
	Checking { session_id: String },
	Confirmed { report: PaymentStatusReport },
	/// The status was not `paid`, or could not be read at all
	/// (`last_status` is then `None`).
	Unconfirmed {
		session_id:  String,
		last_status: Option<PaymentStatus>,
	},
}

impl ReconcilerState {
	pub fn is_terminal(&self) -> bool {
		!matches!(self, ReconcilerState::Checking { .. })
	}
}

/// One status read against the donations API, folded into a terminal state.
/// Errors never escape: an unreadable status is just not confirmed yet.
pub struct StatusReconciler<A: DonationsApi> {
	api: A,
}

impl<A: DonationsApi> StatusReconciler<A> {
	pub fn new(api: A) -> Self {
		Self { api }
	}

	pub async fn reconcile(&self, session_id: &str) -> ReconcilerState {
		match self.api.payment_status(session_id).await {
			Ok(report) if report.payment_status.is_paid() => {
				info!("Donation for session {session_id} confirmed as paid");
				ReconcilerState::Confirmed { report }
			}
			Ok(report) => {
				info!(
					"Donation for session {session_id} is {}",
					report.payment_status.as_str()
				);
				ReconcilerState::Unconfirmed {
					session_id:  session_id.to_string(),
					last_status: Some(report.payment_status),
				}
			}
			Err(e) => {
				warn!("Could not confirm donation for session {session_id}: {e}");
				ReconcilerState::Unconfirmed {
					session_id:  session_id.to_string(),
					last_status: None,
				}
			}
		}
	}
}

/// State of one view of the confirmation page. A fresh page load means a
/// fresh `ConfirmationPage`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationPage {
	state: ReconcilerState,
}

impl ConfirmationPage {
	/// Accepts an absolute URL or a path with query, e.g.
	/// `/donate/success?session_id=cs_123`.
	pub fn mount(page_url: &str) -> Self {
		Self::with_session_id(session_id_from_url(page_url).as_deref())
	}

	pub fn with_session_id(session_id: Option<&str>) -> Self {
		let state = match session_id.map(str::trim).filter(|id| !id.is_empty()) {
			Some(session_id) => ReconcilerState::Checking {
				session_id: session_id.to_string(),
			},
			None => ReconcilerState::NoSession,
		};
		Self { state }
	}

	pub fn state(&self) -> &ReconcilerState {
		&self.state
	}

	/// Runs the page's only status read. Once the page is terminal this is a
	/// no-op, so calling it again never issues another request.
	pub async fn reconcile<A: DonationsApi>(
		&mut self,
		reconciler: &StatusReconciler<A>,
	) -> &ReconcilerState {
		if let ReconcilerState::Checking { session_id } = &self.state {
			let session_id = session_id.clone();
			self.state = reconciler.reconcile(&session_id).await;
		}
		&self.state
	}

	pub fn view(&self) -> ConfirmationView {
		ConfirmationView::for_state(&self.state)
	}
}

pub fn session_id_from_url(page_url: &str) -> Option<String> {
	let url = match Url::parse(page_url) {
		Ok(url) => url,
		Err(_) => Url::parse("http://localhost/").ok()?.join(page_url).ok()?,
	};

	url.query_pairs()
		.find(|(key, _)| key == SESSION_ID_PARAM)
		.map(|(_, value)| value.trim().to_string())
		.filter(|value| !value.is_empty())
}
