use async_trait::async_trait;
use derive_more::derive::{Display, Error};

use crate::domain::donation::Donation;
use crate::domain::payment_status::PaymentStatus;

#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum RepositoryError {
	#[display("Could not reach the donation store: {message}")]
	Connection { message: String },
	#[display("Stored donation is corrupt: {message}")]
	Corrupt { message: String },
}

#[async_trait]
pub trait DonationRepository: Send + Sync + 'static {
	async fn save(&self, donation: Donation) -> Result<(), RepositoryError>;

	async fn find_by_session_id(
		&self,
		session_id: &str,
	) -> Result<Option<Donation>, RepositoryError>;

	/// Records the latest status for a session. Returns `false` when no
	/// donation is stored under that session. Writing an unchanged status
	/// leaves the record untouched.
	async fn update_status(
		&self,
		session_id: &str,
		status: PaymentStatus,
	) -> Result<bool, RepositoryError>;

	async fn ping(&self) -> bool;
}
