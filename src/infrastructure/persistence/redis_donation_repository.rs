use async_trait::async_trait;
use log::debug;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, RedisError};
use time::OffsetDateTime;

use crate::domain::donation::Donation;
use crate::domain::payment_status::PaymentStatus;
use crate::domain::repository::{DonationRepository, RepositoryError};
use crate::infrastructure::config::redis::donation_key;

#[derive(Clone)]
pub struct RedisDonationRepository {
	client: Client,
}

impl RedisDonationRepository {
	pub fn new(client: Client) -> Self {
		Self { client }
	}

	async fn connection(&self) -> Result<MultiplexedConnection, RepositoryError> {
		self.client
			.get_multiplexed_async_connection()
			.await
			.map_err(connection_error)
	}

	async fn write(
		con: &mut MultiplexedConnection,
		donation: &Donation,
	) -> Result<(), RepositoryError> {
		let serialized = serde_json::to_string(donation).map_err(|e| {
			RepositoryError::Corrupt {
				message: e.to_string(),
			}
		})?;

		con.set::<_, _, ()>(donation_key(&donation.session_id), serialized)
			.await
			.map_err(connection_error)
	}

	async fn read(
		con: &mut MultiplexedConnection,
		session_id: &str,
	) -> Result<Option<Donation>, RepositoryError> {
		let raw: Option<String> = con
			.get(donation_key(session_id))
			.await
			.map_err(connection_error)?;

		raw.map(|json| {
			serde_json::from_str::<Donation>(&json).map_err(|e| {
				RepositoryError::Corrupt {
					message: format!("{session_id}: {e}"),
				}
			})
		})
		.transpose()
	}
}

#[async_trait]
impl DonationRepository for RedisDonationRepository {
	async fn save(&self, donation: Donation) -> Result<(), RepositoryError> {
		let mut con = self.connection().await?;
		Self::write(&mut con, &donation).await
	}

	async fn find_by_session_id(
		&self,
		session_id: &str,
	) -> Result<Option<Donation>, RepositoryError> {
		let mut con = self.connection().await?;
		Self::read(&mut con, session_id).await
	}

	async fn update_status(
		&self,
		session_id: &str,
		status: PaymentStatus,
	) -> Result<bool, RepositoryError> {
		let mut con = self.connection().await?;

		let Some(mut donation) = Self::read(&mut con, session_id).await? else {
			return Ok(false);
		};

		if donation.payment_status == status {
			return Ok(true);
		}

		debug!(
			"Donation {} moves from {} to {}",
			donation.id,
			donation.payment_status.as_str(),
			status.as_str()
		);
		donation.payment_status = status;
		donation.updated_at = OffsetDateTime::now_utc();
		Self::write(&mut con, &donation).await?;

		Ok(true)
	}

	async fn ping(&self) -> bool {
		let Ok(mut con) = self.connection().await else {
			return false;
		};

		redis::cmd("PING")
			.query_async::<String>(&mut con)
			.await
			.is_ok()
	}
}

fn connection_error(e: RedisError) -> RepositoryError {
	RepositoryError::Connection {
		message: e.to_string(),
	}
}
