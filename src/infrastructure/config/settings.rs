use reqwest::Url;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
	pub redis_url:          String,
	pub gateway_url:        String,
	pub gateway_api_key:    String,
	pub gateway_timeout_ms: u64,
	pub success_url:        String,
	pub cancel_url:         String,
	pub server_host:        String,
	pub server_port:        u16,
	pub server_keepalive:   u64,
	pub cors_origins:       String,
}

impl Config {
	pub fn load() -> Result<Self, config::ConfigError> {
		let config_builder = config::Config::builder()
			.set_default("gateway_timeout_ms", 10_000)?
			.set_default("server_host", "0.0.0.0")?
			.set_default("server_port", 8000)?
			.set_default("server_keepalive", 75)?
			.set_default("cors_origins", "http://localhost:3000")?
			.add_source(config::Environment::with_prefix("APP"))
			.build()?;

		config_builder.try_deserialize()
	}

	/// Each entry must be `*` or a bare `scheme://host[:port]` origin.
	pub fn allowed_origins(&self) -> Result<Vec<String>, config::ConfigError> {
		self.cors_origins
			.split(',')
			.map(str::trim)
			.filter(|origin| !origin.is_empty())
			.map(|origin| {
				if origin == "*" || is_origin(origin) {
					Ok(origin.to_string())
				} else {
					Err(config::ConfigError::Message(format!(
						"Invalid CORS origin '{origin}': expected scheme://host[:port]"
					)))
				}
			})
			.collect()
	}
}

fn is_origin(value: &str) -> bool {
	Url::parse(value).is_ok_and(|url| {
		matches!(url.scheme(), "http" | "https")
			&& url.origin().ascii_serialization() == value
	})
}
