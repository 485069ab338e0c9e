use serde::Deserialize;

fn default_timeout_ms() -> u64 {
	15_000
}

/// Where the donations API lives. Built once by the host application and
/// handed to [`HttpDonationsApi`](crate::client::api::HttpDonationsApi).
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiClientConfig {
	pub base_url:   String,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
}

impl ApiClientConfig {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url:   base_url.into(),
			timeout_ms: default_timeout_ms(),
		}
	}

	pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
		self.timeout_ms = timeout_ms;
		self
	}

	/// Reads `DONATIONS_API_BASE_URL` and `DONATIONS_API_TIMEOUT_MS`.
	pub fn load() -> Result<Self, config::ConfigError> {
		let config_builder = config::Config::builder()
			.add_source(config::Environment::with_prefix("DONATIONS_API"))
			.build()?;

		config_builder.try_deserialize()
	}
}
