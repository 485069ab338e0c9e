use crate::client::status_reconciler::ReconcilerState;
use crate::domain::money::format_minor_units;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
	Idle,
	Loading,
	Success,
	Pending,
}

/// What the confirmation page shows for a given reconciler state.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationView {
	pub kind:    ViewKind,
	pub title:   String,
	pub message: String,
	pub amount:  Option<String>,
}

impl ConfirmationView {
	pub fn for_state(state: &ReconcilerState) -> Self {
		match state {
			ReconcilerState::NoSession => Self {
				kind:    ViewKind::Idle,
				title:   "Thank you for your generosity".to_string(),
				message: "Your donation is being processed. You will receive a \
				          receipt by email once it is complete."
					.to_string(),
				amount:  None,
			},
			ReconcilerState::Checking { .. } => Self {
				kind:    ViewKind::Loading,
				title:   "Confirming your donation".to_string(),
				message: "Please wait while we confirm your payment.".to_string(),
				amount:  None,
			},
			ReconcilerState::Confirmed { report } => {
				let amount = format_minor_units(
					report.amount_total,
					report.currency.unwrap_or_default(),
				);
				Self {
					kind:    ViewKind::Success,
					title:   "Thank you for your donation!".to_string(),
					message: format!(
						"Your gift of {amount} has been received. A receipt has \
						 been sent to your email."
					),
					amount:  Some(amount),
				}
			}
			ReconcilerState::Unconfirmed { .. } => Self {
				kind:    ViewKind::Pending,
				title:   "We are still confirming your payment".to_string(),
				message: "This can take a few moments. You will receive a receipt \
				          by email as soon as your donation is complete."
					.to_string(),
				amount:  None,
			},
		}
	}
}
