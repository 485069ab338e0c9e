use derive_more::derive::{Display, Error};

use crate::domain::donation::ValidationError;
use crate::domain::gateway::GatewayError;
use crate::domain::repository::RepositoryError;

#[derive(Debug, Display, Error)]
pub enum DonationError {
	#[display("{source}")]
	Validation { source: ValidationError },
	#[display("{source}")]
	Gateway { source: GatewayError },
	#[display("{source}")]
	Storage { source: RepositoryError },
}

impl From<ValidationError> for DonationError {
	fn from(source: ValidationError) -> Self {
		DonationError::Validation { source }
	}
}

impl From<GatewayError> for DonationError {
	fn from(source: GatewayError) -> Self {
		DonationError::Gateway { source }
	}
}

impl From<RepositoryError> for DonationError {
	fn from(source: RepositoryError) -> Self {
		DonationError::Storage { source }
	}
}
