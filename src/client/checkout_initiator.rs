use std::sync::atomic::{AtomicBool, Ordering};

use derive_more::derive::{Display, Error};
use log::{debug, info, warn};

use crate::client::api::DonationsApi;
use crate::domain::donation::{
	Currency, DonationCategory, DonationFrequency, DonationRequest,
	DonorDetails, ValidationError,
};

pub const GENERIC_CHECKOUT_FAILURE: &str =
	"We could not start your donation. Please try again.";

/// Performs the full-page hand-off to the hosted payment page.
pub trait Navigator: Send + Sync {
	fn redirect(&self, url: &str);
}

/// Raw values of the donation form, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct DonationForm {
	pub amount:      String,
	pub currency:    Currency,
	pub category:    DonationCategory,
	pub frequency:   DonationFrequency,
	pub donor_name:  String,
	pub donor_email: String,
	pub donor_phone: String,
	pub message:     String,
}

impl DonationForm {
	pub fn to_request(&self) -> Result<DonationRequest, ValidationError> {
		DonationRequest::from_input(
			&self.amount,
			self.currency,
			self.category,
			self.frequency,
			DonorDetails {
				name:    Some(self.donor_name.clone()),
				email:   Some(self.donor_email.clone()),
				phone:   Some(self.donor_phone.clone()),
				message: Some(self.message.clone()),
			},
		)
	}
}

#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum CheckoutError {
	#[display("{source}")]
	Validation { source: ValidationError },
	#[display("{}", detail.as_deref().unwrap_or(GENERIC_CHECKOUT_FAILURE))]
	Gateway { detail: Option<String> },
}

impl CheckoutError {
	/// Text for the inline message (validation) or the dismissible
	/// notification (gateway).
	pub fn user_message(&self) -> String {
		self.to_string()
	}

	pub fn is_validation(&self) -> bool {
		matches!(self, CheckoutError::Validation { .. })
	}
}

impl From<ValidationError> for CheckoutError {
	fn from(source: ValidationError) -> Self {
		CheckoutError::Validation { source }
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
	/// The donor was sent to the hosted checkout page.
	Redirected { url: String },
	/// The submit control was disabled; nothing was sent.
	Ignored,
}

/// The donate button's enabled state.
#[derive(Debug, Default)]
pub struct SubmitControl {
	disabled: AtomicBool,
}

impl SubmitControl {
	pub fn is_disabled(&self) -> bool {
		self.disabled.load(Ordering::Acquire)
	}

	fn try_disable(&self) -> bool {
		self.disabled
			.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
			.is_ok()
	}

	fn enable(&self) {
		self.disabled.store(false, Ordering::Release);
	}
}

pub struct CheckoutInitiator<A: DonationsApi, N: Navigator> {
	api:       A,
	navigator: N,
	control:   SubmitControl,
}

impl<A: DonationsApi, N: Navigator> CheckoutInitiator<A, N> {
	pub fn new(api: A, navigator: N) -> Self {
		Self {
			api,
			navigator,
			control: SubmitControl::default(),
		}
	}

	pub fn control(&self) -> &SubmitControl {
		&self.control
	}

	/// Handles one click on the donate button.
	pub async fn submit(
		&self,
		form: &DonationForm,
	) -> Result<SubmitOutcome, CheckoutError> {
		if self.control.is_disabled() {
			debug!("Donate button is disabled, ignoring submit");
			return Ok(SubmitOutcome::Ignored);
		}

		let request = form.to_request()?;
		self.initiate(request).await
	}

	/// Asks the backend for a checkout session and redirects to it.
	///
	/// The control stays disabled after a redirect since the page is being
	/// left; it is re-enabled when the backend call fails so the donor can
	/// try again.
	pub async fn initiate(
		&self,
		request: DonationRequest,
	) -> Result<SubmitOutcome, CheckoutError> {
		if !self.control.try_disable() {
			debug!("Checkout already in flight, ignoring submit");
			return Ok(SubmitOutcome::Ignored);
		}

		let session = match self.api.create_checkout(&request).await {
			Ok(session) if !session.url.trim().is_empty() => session,
			Ok(_) => {
				self.control.enable();
				warn!("Donations service returned an empty checkout url");
				return Err(CheckoutError::Gateway { detail: None });
			}
			Err(e) => {
				self.control.enable();
				warn!("Checkout could not be started: {e}");
				return Err(CheckoutError::Gateway {
					detail: e.detail().map(str::to_string),
				});
			}
		};

		info!(
			"Redirecting donor to hosted checkout (session {:?})",
			session.session_id
		);
		self.navigator.redirect(&session.url);

		Ok(SubmitOutcome::Redirected { url: session.url })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_gateway_error_falls_back_to_generic_message() {
		let error = CheckoutError::Gateway { detail: None };
		assert_eq!(error.user_message(), GENERIC_CHECKOUT_FAILURE);

		let error = CheckoutError::Gateway {
			detail: Some("The payment provider is unavailable.".to_string()),
		};
		assert_eq!(error.user_message(), "The payment provider is unavailable.");
		assert!(!error.is_validation());
	}

	#[test]
	fn test_validation_error_message() {
		let error = CheckoutError::from(ValidationError::InvalidAmount);

		assert!(error.is_validation());
		assert_eq!(
			error.user_message(),
			"Please enter a valid donation amount greater than zero."
		);
	}

	#[test]
	fn test_form_blank_fields_are_absent() {
		let form = DonationForm {
			amount: "50.00".to_string(),
			..Default::default()
		};
		let request = form.to_request().unwrap();

		assert!(request.is_anonymous());
		assert_eq!(request.donor_email(), None);
		assert_eq!(request.message(), None);
	}

	#[test]
	fn test_submit_control_disables_once() {
		let control = SubmitControl::default();

		assert!(!control.is_disabled());
		assert!(control.try_disable());
		assert!(!control.try_disable());
		assert!(control.is_disabled());

		control.enable();
		assert!(!control.is_disabled());
	}
}
